use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every state change of the countdown produces an Event.
/// The shell logs them; `StateSnapshot` is what `status`-style output prints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerTicked {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Countdown reached zero.
    TimerExpired {
        at: DateTime<Utc>,
    },
    TimerReset {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// The user committed an edit to the countdown field.
    TimeEdited {
        input: String,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    ResetConfirmationRequested {
        at: DateTime<Utc>,
    },
    ResetCancelled {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: Phase,
        remaining_secs: u64,
        display: String,
        is_running: bool,
        skip_reset_confirmation: bool,
        pending_reset_confirmation: bool,
        at: DateTime<Utc>,
    },
}
