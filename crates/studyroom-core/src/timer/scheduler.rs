//! Periodic tick sources.
//!
//! Engines never own a thread. A [`Scheduler`] calls a tick function once per
//! period until the returned [`TickHandle`] is cancelled (or dropped), or the
//! tick function itself returns [`TickFlow::Stop`].

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Whether a tick source should keep firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickFlow {
    Continue,
    Stop,
}

pub type TickFn = Box<dyn FnMut() -> TickFlow + Send + 'static>;

/// Something that can call `tick` once per `period`.
pub trait Scheduler: Send + Sync {
    fn schedule(&self, period: Duration, tick: TickFn) -> TickHandle;
}

/// Cancels its tick source when cancelled or dropped.
pub struct TickHandle {
    cancel: Option<Box<dyn FnOnce() + Send + 'static>>,
}

impl TickHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickHandle")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

// ── Tokio ────────────────────────────────────────────────────────────

/// Wall-clock scheduler backed by a tokio interval task per source.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    runtime: tokio::runtime::Handle,
}

impl TokioScheduler {
    pub fn new(runtime: tokio::runtime::Handle) -> Self {
        Self { runtime }
    }

    /// Use the runtime the caller is running on, if any.
    pub fn current() -> Option<Self> {
        tokio::runtime::Handle::try_current().ok().map(Self::new)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, period: Duration, mut tick: TickFn) -> TickHandle {
        let task = self.runtime.spawn(async move {
            let mut interval = tokio::time::interval(period);
            // The first tick of a tokio interval completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tick() == TickFlow::Stop {
                    break;
                }
            }
        });
        TickHandle::new(move || task.abort())
    }
}

// ── Manual ───────────────────────────────────────────────────────────

/// Deterministic scheduler: sources fire only when [`ManualScheduler::advance`]
/// is called. Each step fires every live source once, whatever its period.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Arc<Mutex<ManualInner>>,
}

#[derive(Default)]
struct ManualInner {
    next_id: u64,
    sources: Vec<(u64, TickFn)>,
    cancelled: HashSet<u64>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire every live source `steps` times.
    pub fn advance(&self, steps: u64) {
        for _ in 0..steps {
            let batch = {
                let mut inner = self.lock();
                std::mem::take(&mut inner.sources)
            };

            let mut kept = Vec::with_capacity(batch.len());
            for (id, mut tick) in batch {
                if self.lock().cancelled.contains(&id) {
                    continue;
                }
                if tick() == TickFlow::Continue {
                    kept.push((id, tick));
                }
            }

            let mut inner = self.lock();
            let cancelled = std::mem::take(&mut inner.cancelled);
            let added = std::mem::take(&mut inner.sources);
            inner.sources = kept
                .into_iter()
                .chain(added)
                .filter(|(id, _)| !cancelled.contains(id))
                .collect();
        }
    }

    /// Number of sources that would fire on the next step.
    pub fn active_sources(&self) -> usize {
        let inner = self.lock();
        inner
            .sources
            .iter()
            .filter(|(id, _)| !inner.cancelled.contains(id))
            .count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManualInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, _period: Duration, tick: TickFn) -> TickHandle {
        let id = {
            let mut inner = self.lock();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.sources.push((id, tick));
            id
        };
        let inner = Arc::clone(&self.inner);
        TickHandle::new(move || {
            let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
            let before = inner.sources.len();
            inner.sources.retain(|(sid, _)| *sid != id);
            if inner.sources.len() == before {
                // Source is mid-step; drop it when the step finishes.
                inner.cancelled.insert(id);
            }
        })
    }
}
