//! Binds an engine to a tick source.
//!
//! The driver keeps at most one live [`TickHandle`] per engine: every
//! `arm()` cancels the previous handle before scheduling a new one, so a
//! repeated start can never double the tick rate.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use super::scheduler::{Scheduler, TickFlow, TickHandle};
use super::Tick;
use crate::events::Event;

/// Receives every event an engine produces, including ones fired from ticks.
pub type EventSink = Arc<dyn Fn(Event) + Send + Sync>;

pub struct TimerDriver<E> {
    engine: Arc<Mutex<E>>,
    scheduler: Arc<dyn Scheduler>,
    period: Duration,
    sink: EventSink,
    /// Live tick source. After the engine stops itself from a tick this still
    /// holds the retired handle until the next command releases it.
    ticker: Option<TickHandle>,
}

impl<E: Tick> TimerDriver<E> {
    pub fn new(engine: E, scheduler: Arc<dyn Scheduler>, period: Duration, sink: EventSink) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            scheduler,
            period,
            sink,
            ticker: None,
        }
    }

    /// Read engine state.
    pub fn with<R>(&self, f: impl FnOnce(&E) -> R) -> R {
        f(&lock(&self.engine))
    }

    /// Run a command against the engine. Events returned by the command are
    /// forwarded to the sink; the tick source follows the engine's running
    /// state afterwards.
    pub fn command<R>(&mut self, f: impl FnOnce(&mut E) -> (R, Option<Event>)) -> R {
        let (result, event, running) = {
            let mut engine = lock(&self.engine);
            let (result, event) = f(&mut engine);
            (result, event, engine.is_running())
        };
        let changed = event.is_some();
        if let Some(event) = event {
            (self.sink)(event);
        }
        if !running {
            self.disarm();
        } else if changed || self.ticker.is_none() {
            // A fresh start always replaces the previous source.
            self.arm();
        }
        result
    }

    /// Emit an event that did not come from the engine itself.
    pub fn emit(&self, event: Event) {
        (self.sink)(event);
    }

    fn arm(&mut self) {
        self.disarm();
        let engine = Arc::clone(&self.engine);
        let sink = Arc::clone(&self.sink);
        let handle = self.scheduler.schedule(
            self.period,
            Box::new(move || {
                let (event, running) = {
                    let mut engine = lock(&engine);
                    let event = engine.tick();
                    (event, engine.is_running())
                };
                if let Some(event) = event {
                    sink(event);
                }
                if running {
                    TickFlow::Continue
                } else {
                    TickFlow::Stop
                }
            }),
        );
        self.ticker = Some(handle);
    }

    fn disarm(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.cancel();
        }
    }
}

fn lock<E>(engine: &Mutex<E>) -> MutexGuard<'_, E> {
    engine.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;
    use crate::timer::{Countdown, ManualScheduler};

    fn driver(target: u64) -> (TimerDriver<Countdown>, ManualScheduler, mpsc::Receiver<Event>) {
        let sched = ManualScheduler::new();
        let (tx, rx) = mpsc::channel();
        let tx = Mutex::new(tx);
        let sink: EventSink = Arc::new(move |event: Event| {
            let _ = lock(&tx).send(event);
        });
        let driver = TimerDriver::new(
            Countdown::new(target),
            Arc::new(sched.clone()),
            Duration::from_secs(1),
            sink,
        );
        (driver, sched, rx)
    }

    #[test]
    fn self_stopping_engine_retires_its_source() {
        let (mut driver, sched, rx) = driver(2);
        driver.command(|cd| match cd.start() {
            Ok(event) => ((), event),
            Err(_) => ((), None),
        });
        assert_eq!(sched.active_sources(), 1);

        sched.advance(5);
        assert_eq!(sched.active_sources(), 0);
        assert_eq!(driver.with(Countdown::remaining_secs), 0);
        assert!(rx
            .try_iter()
            .any(|e| matches!(e, Event::CountdownExpired { duration_secs: 2, .. })));
    }

    #[test]
    fn restart_after_expiry_ticks_once_per_step() {
        let (mut driver, sched, _rx) = driver(3);
        driver.command(|cd| ((), cd.start().ok().flatten()));
        sched.advance(3);
        driver.command(|cd| ((), Some(cd.reset())));
        assert_eq!(sched.active_sources(), 0);

        driver.command(|cd| ((), cd.start().ok().flatten()));
        assert_eq!(sched.active_sources(), 1);
        sched.advance(1);
        assert_eq!(driver.with(Countdown::remaining_secs), 2);
    }
}
