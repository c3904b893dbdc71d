//! Device vibration cues.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    /// A session record was saved.
    Saved,
    /// The countdown reached zero.
    CountdownExpired,
}

impl Cue {
    /// Alternating wait/vibrate durations in milliseconds.
    pub fn pattern_ms(self) -> &'static [u64] {
        match self {
            Cue::Saved => &[500],
            Cue::CountdownExpired => &[0, 300, 300, 300, 300, 300],
        }
    }
}

pub trait Haptics: Send + Sync {
    fn vibrate(&self, cue: Cue);
}

/// Writes cues to the log instead of a motor.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogHaptics;

impl Haptics for LogHaptics {
    fn vibrate(&self, cue: Cue) {
        tracing::info!(?cue, pattern = ?cue.pattern_ms(), "haptic cue");
    }
}

/// Ignores every cue (vibration disabled in config).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn vibrate(&self, _cue: Cue) {}
}
