//! Integration tests for the Gemini client against a mocked endpoint.

use mockito::Matcher;
use serde_json::json;
use studyroom_core::ai::{AnswerHistory, GeminiClient, GeminiOptions, TextGenerator};
use studyroom_core::{ApiError, CoreError, QuestionAnswerer};

const PATH: &str = "/v1beta/models/gemini-test:generateContent";

fn client(server: &mockito::Server) -> GeminiClient {
    GeminiClient::new(
        "test-key",
        GeminiOptions {
            base_url: server.url(),
            model: "gemini-test".into(),
            timeout_secs: 5,
            ..GeminiOptions::default()
        },
    )
    .unwrap()
}

fn reply(text: &str) -> String {
    json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] }).to_string()
}

#[tokio::test]
async fn test_generate_sends_prompt_and_sampling() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
        .match_body(Matcher::PartialJson(json!({
            "contents": [{ "parts": [{ "text": "hello" }] }],
            "generationConfig": { "temperature": 0.2, "topP": 0.8 }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(reply("hi there"))
        .create_async()
        .await;

    let text = client(&server).generate("hello").await.unwrap();
    assert_eq!(text, "hi there");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_http_error_carries_api_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", PATH)
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(json!({ "error": { "code": 400, "message": "API key not valid" } }).to_string())
        .create_async()
        .await;

    let err = client(&server).generate("hello").await.unwrap_err();
    match err {
        ApiError::Http { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "API key not valid");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_candidates_is_empty_response() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({ "promptFeedback": { "blockReason": "SAFETY" } }).to_string())
        .create_async()
        .await;

    let err = client(&server).generate("hello").await.unwrap_err();
    assert!(matches!(err, ApiError::EmptyResponse(None)));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let client = GeminiClient::new(
        "test-key",
        GeminiOptions {
            base_url: "http://127.0.0.1:9".into(),
            timeout_secs: 2,
            ..GeminiOptions::default()
        },
    )
    .unwrap();
    assert!(matches!(
        client.generate("hello").await,
        Err(ApiError::Transport(_))
    ));
}

#[tokio::test]
async fn test_answerer_end_to_end() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", PATH)
        .match_query(Matcher::Any)
        .match_body(Matcher::Regex("解答：".into()))
        .with_status(200)
        .with_body(reply(
            "**科目：** 数学\n**範囲：** 二次関数\n**解答：** (0, -1)\n**解説：** 頂点の座標。",
        ))
        .create_async()
        .await;

    let answerer = QuestionAnswerer::new(client(&server));
    let mut history = AnswerHistory::new();
    let item = answerer
        .ask("y = x^2 - 1 の頂点は？", &mut history)
        .await
        .unwrap();

    assert_eq!(item.sheet.subject.as_deref(), Some("数学"));
    assert_eq!(item.sheet.answer, "(0, -1)");
    assert_eq!(history.search("数学").len(), 1);
}

#[tokio::test]
async fn test_answerer_keeps_history_on_http_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", PATH)
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("upstream unavailable")
        .create_async()
        .await;

    let answerer = QuestionAnswerer::new(client(&server));
    let mut history = AnswerHistory::new();
    let err = answerer.ask("question", &mut history).await.unwrap_err();
    assert!(matches!(
        err,
        CoreError::Api(ApiError::Http { status: 503, ref message }) if message == "upstream unavailable"
    ));
    assert!(history.is_empty());
}
