use std::sync::mpsc::Receiver;
use std::sync::Arc;

use clap::Subcommand;
use studyroom_core::report::format::{clock, hours_minutes};
use studyroom_core::timer::ResetRequest;
use studyroom_core::{
    Config, Event, Haptics, HistoryStore, LogHaptics, NoHaptics, SessionDraft, SessionRecord,
    SessionStore, StudyTimer, TimerPhase, TokioScheduler,
};

use super::{input_channel, is_yes, prompt, today, Input};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the stopwatch (commands: s = start/stop, r = save, q = quit)
    Stopwatch {
        /// Subject recorded with the session
        #[arg(long, default_value = "")]
        subject: String,
        /// Pages studied
        #[arg(long, default_value = "0")]
        pages: u32,
    },
    /// Run the countdown (commands: s = start/pause, r = reset, q = quit)
    Countdown {
        /// Target in minutes (defaults to timer.countdown_minutes)
        #[arg(long)]
        minutes: Option<u64>,
        /// Subject recorded with the session
        #[arg(long, default_value = "")]
        subject: String,
        /// Pages studied
        #[arg(long, default_value = "0")]
        pages: u32,
    },
}

struct Screen<'a> {
    timer: StudyTimer,
    inputs: Receiver<Input>,
    draft: SessionDraft,
    history: &'a HistoryStore,
    sessions: SessionStore,
}

impl Screen<'_> {
    /// Next line of user input, printing engine events while waiting.
    fn next_line(&mut self) -> Option<String> {
        loop {
            match self.inputs.recv().ok()? {
                Input::Line(line) => return Some(line),
                Input::Eof => return None,
                Input::Event(event) => self.on_event(&event),
            }
        }
    }

    fn on_event(&self, event: &Event) {
        match event {
            Event::CountdownExpired { duration_secs, .. } => {
                prompt(&format!(
                    "\ntime is up ({}). save this session? [y/N] ",
                    hours_minutes(duration_secs / 60, (duration_secs % 60) as u8)
                ));
            }
            other => tracing::debug!(event = ?other, "timer event"),
        }
    }

    fn save(&mut self, record: &SessionRecord) -> Result<(), Box<dyn std::error::Error>> {
        self.history.save_sessions(&self.sessions)?;
        println!(
            "saved: {} {} ({} pages)",
            record.subject(),
            hours_minutes(record.duration_min(), record.seconds_remainder()),
            record.pages()
        );
        Ok(())
    }

    fn status(&self) {
        let sw = self.timer.stopwatch();
        let cd = self.timer.countdown();
        println!(
            "stopwatch {} [{:?}]  countdown {} [{:?}]",
            clock(sw.elapsed_secs()),
            sw.phase(),
            clock(cd.remaining_secs()),
            cd.phase()
        );
    }

    fn stopwatch(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        prompt("stopwatch> ");
        while let Some(line) = self.next_line() {
            match line.trim() {
                "s" if self.timer.stopwatch().phase() == TimerPhase::Running => {
                    self.timer.stop_stopwatch()
                }
                "s" => self.timer.start_stopwatch(),
                "r" => match self.timer.reset_stopwatch() {
                    ResetRequest::NothingToSave => println!("nothing to save"),
                    ResetRequest::Confirm(pending) => {
                        prompt(&format!(
                            "save {} as a session? [y/N] ",
                            clock(pending.duration_secs)
                        ));
                        let answer = self.next_line().unwrap_or_default();
                        if is_yes(&answer) {
                            let record = self.timer.confirm_stopwatch(
                                pending,
                                &self.draft,
                                today(),
                                &mut self.sessions,
                            );
                            self.save(&record)?;
                        }
                    }
                },
                "q" => break,
                "" => {}
                other => println!("unknown command: {other}"),
            }
            self.status();
            prompt("stopwatch> ");
        }
        Ok(())
    }

    fn countdown(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        prompt("countdown> ");
        while let Some(line) = self.next_line() {
            if self.timer.countdown_pending().is_some() {
                // Any reply settles the expiry prompt.
                if is_yes(&line) {
                    let record =
                        self.timer
                            .confirm_countdown(&self.draft, today(), &mut self.sessions)?;
                    self.save(&record)?;
                } else {
                    self.timer.dismiss_countdown();
                }
            } else {
                match line.trim() {
                    "s" if self.timer.countdown().phase() == TimerPhase::Running => {
                        self.timer.pause_countdown()
                    }
                    "s" => {
                        if let Err(e) = self.timer.start_countdown() {
                            println!("{e}");
                        }
                    }
                    "r" => self.timer.reset_countdown(),
                    "q" => break,
                    "" => {}
                    other => println!("unknown command: {other}"),
                }
            }
            if self.timer.countdown_pending().is_none() {
                self.status();
                prompt("countdown> ");
            }
        }
        Ok(())
    }
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let history = HistoryStore::open()?;
    let sessions = history.load_sessions()?;

    let runtime = tokio::runtime::Runtime::new()?;
    let scheduler = Arc::new(TokioScheduler::new(runtime.handle().clone()));
    let haptics: Arc<dyn Haptics> = if config.notifications.vibration {
        Arc::new(LogHaptics)
    } else {
        Arc::new(NoHaptics)
    };
    let (timer, events) = StudyTimer::new(scheduler, haptics, config.countdown_target_secs());

    let mut screen = Screen {
        timer,
        inputs: input_channel(events),
        draft: SessionDraft::default(),
        history: &history,
        sessions,
    };

    let result = match action {
        TimerAction::Stopwatch { subject, pages } => {
            screen.draft = SessionDraft::new(subject, pages);
            screen.stopwatch()
        }
        TimerAction::Countdown {
            minutes,
            subject,
            pages,
        } => {
            screen.draft = SessionDraft::new(subject, pages);
            if let Some(minutes) = minutes {
                screen.timer.set_countdown_target(minutes * 60)?;
            }
            screen.countdown()
        }
    };

    screen.timer.suspend();
    result
}
