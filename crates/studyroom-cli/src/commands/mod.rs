pub mod ask;
pub mod auth;
pub mod config;
pub mod generate;
pub mod memo;
pub mod quiz;
pub mod report;
pub mod session;
pub mod timer;

use std::io::{BufRead, Write};
use std::sync::mpsc::{self, Receiver};

use studyroom_core::Event;

/// Input arriving at a foreground command.
pub enum Input {
    Line(String),
    Event(Event),
    Eof,
}

/// Merge stdin lines and engine events into one channel.
pub fn input_channel(events: Receiver<Event>) -> Receiver<Input> {
    let (tx, rx) = mpsc::channel();

    let event_tx = tx.clone();
    std::thread::spawn(move || {
        for event in events {
            if event_tx.send(Input::Event(event)).is_err() {
                break;
            }
        }
    });

    let line_tx = tx;
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(Input::Line(line)).is_err() {
                return;
            }
        }
        let _ = line_tx.send(Input::Eof);
    });

    rx
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn prompt(text: &str) {
    print!("{text}");
    let _ = std::io::stdout().flush();
}

pub fn is_yes(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
}

pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
