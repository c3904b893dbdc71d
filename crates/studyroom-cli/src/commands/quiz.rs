use std::sync::mpsc;
use std::sync::Arc;

use clap::Subcommand;
use studyroom_core::quiz::{default_bank, QuizResults};
use studyroom_core::timer::{EventSink, TimerDriver, TICK_PERIOD};
use studyroom_core::{Config, Event, QuizEngine, QuizPhase, TokioScheduler};

use super::{input_channel, print_json, prompt, Input};

#[derive(Subcommand)]
pub enum QuizAction {
    /// Play the time-attack quiz; type answers, `q` to give up
    Play {
        /// Print the results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the built-in question bank
    Bank,
}

fn ask_current(driver: &TimerDriver<QuizEngine>) {
    let line = driver.with(|quiz| {
        quiz.current_question().map(|q| {
            format!(
                "[{}/{}] ({}s left) {}\n> ",
                quiz.index() + 1,
                quiz.question_count(),
                quiz.remaining_secs(),
                q.text
            )
        })
    });
    if let Some(line) = line {
        prompt(&line);
    }
}

fn print_results(results: &QuizResults) {
    println!();
    for a in &results.answers {
        let mark = if a.is_correct { "o" } else { "x" };
        println!(
            "{mark} {}  your answer: {}  correct: {}",
            a.question_text, a.user_answer, a.correct_answer
        );
    }
    println!(
        "score {}/{} ({}%) in {}s",
        results.correct, results.question_count, results.score_pct, results.elapsed_secs
    );
}

pub fn run(action: QuizAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        QuizAction::Bank => print_json(&default_bank()),
        QuizAction::Play { json } => play(json),
    }
}

fn play(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let runtime = tokio::runtime::Runtime::new()?;
    let scheduler = Arc::new(TokioScheduler::new(runtime.handle().clone()));

    let (tx, events) = mpsc::channel();
    let sink: EventSink = Arc::new(move |event: Event| {
        let _ = tx.send(event);
    });
    let mut driver = TimerDriver::new(
        QuizEngine::new(default_bank(), config.quiz_config()),
        scheduler,
        TICK_PERIOD,
        sink,
    );
    let inputs = input_channel(events);

    driver.command(|quiz| match quiz.begin(&mut rand::thread_rng()) {
        Ok(event) => (Ok(()), Some(event)),
        Err(e) => (Err(e), None),
    })?;
    if driver.with(QuizEngine::phase) == QuizPhase::Ready {
        println!("ready...");
    } else {
        ask_current(&driver);
    }

    while let Ok(input) = inputs.recv() {
        match input {
            Input::Event(Event::QuizPhaseChanged { phase, .. }) => match phase {
                QuizPhase::Running => ask_current(&driver),
                QuizPhase::Results => break,
                QuizPhase::Title | QuizPhase::Ready => {}
            },
            Input::Event(_) => {}
            Input::Eof => break,
            Input::Line(line) if line.trim() == "q" => break,
            Input::Line(line) => {
                if driver.with(QuizEngine::phase) != QuizPhase::Running {
                    continue;
                }
                match driver.command(|quiz| match quiz.submit(&line) {
                    Ok((record, event)) => (Ok(record), event),
                    Err(e) => (Err(e), None),
                }) {
                    Ok(record) => {
                        println!("{}", if record.is_correct { "correct!" } else { "wrong" });
                        if driver.with(QuizEngine::phase) == QuizPhase::Results {
                            break;
                        }
                        ask_current(&driver);
                    }
                    Err(e) => {
                        println!("{e}");
                        ask_current(&driver);
                    }
                }
            }
        }
    }

    match driver.with(QuizEngine::results) {
        Some(results) if json => print_json(&results)?,
        Some(results) => print_results(&results),
        None => {
            driver.command(|quiz| ((), Some(quiz.reset())));
            println!("quiz abandoned");
        }
    }
    Ok(())
}
