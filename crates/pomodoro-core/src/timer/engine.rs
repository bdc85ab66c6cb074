//! Countdown engine implementation.
//!
//! The engine is a pure state machine over whole seconds. It owns no tick
//! source - the [`TimerController`](super::TimerController) arms a
//! [`Ticker`](super::Ticker) while the engine is running and feeds
//! `tick()` once per elapsed second.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Idle | Expired)
//!   ^                        |
//!   +-------- reset ---------+
//! ```
//!
//! ## Usage
//!
//! ```
//! use pomodoro_core::timer::{Phase, TimerEngine};
//!
//! let mut engine = TimerEngine::new(3);
//! engine.start();
//! engine.tick();
//! engine.tick();
//! engine.tick();
//! assert_eq!(engine.phase(), Phase::Expired);
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::format::{format_time, parse_time};
use crate::events::Event;

/// Length of a fresh pomodoro, 25 minutes.
pub const DEFAULT_DURATION_SECS: u64 = 1500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Not running, time left on the clock.
    Idle,
    Running,
    /// Reached zero. Only `reset` or an edit brings time back.
    Expired,
}

/// Core countdown engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerEngine {
    /// Value `reset` restores.
    initial_secs: u64,
    remaining_secs: u64,
    is_running: bool,
    /// Session preference, survives resets.
    skip_reset_confirmation: bool,
    /// The "reset the timer?" prompt is showing.
    pending_reset_confirmation: bool,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_SECS)
    }
}

impl TimerEngine {
    /// Create an idle engine holding `initial_secs`.
    pub fn new(initial_secs: u64) -> Self {
        Self {
            initial_secs,
            remaining_secs: initial_secs,
            is_running: false,
            skip_reset_confirmation: false,
            pending_reset_confirmation: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        if self.is_running {
            Phase::Running
        } else if self.remaining_secs == 0 {
            Phase::Expired
        } else {
            Phase::Idle
        }
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn initial_secs(&self) -> u64 {
        self.initial_secs
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn skip_reset_confirmation(&self) -> bool {
        self.skip_reset_confirmation
    }

    pub fn pending_reset_confirmation(&self) -> bool {
        self.pending_reset_confirmation
    }

    /// The countdown field only accepts edits while stopped.
    pub fn is_editable(&self) -> bool {
        !self.is_running
    }

    /// Current countdown text, `MM:SS`.
    pub fn display(&self) -> String {
        format_time(self.remaining_secs)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.phase(),
            remaining_secs: self.remaining_secs,
            display: self.display(),
            is_running: self.is_running,
            skip_reset_confirmation: self.skip_reset_confirmation,
            pending_reset_confirmation: self.pending_reset_confirmation,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        match self.phase() {
            Phase::Idle => {
                self.is_running = true;
                Some(Event::TimerStarted {
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            // Already running, or nothing left to count.
            Phase::Running | Phase::Expired => None,
        }
    }

    /// Advance by one second. Returns `TimerExpired` on the tick that hits zero.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.is_running = false;
            return Some(Event::TimerExpired { at: Utc::now() });
        }
        Some(Event::TimerTicked {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        self.is_running = false;
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Reset, or raise the confirmation prompt unless the user opted out.
    pub fn request_reset(&mut self) -> Option<Event> {
        if self.skip_reset_confirmation {
            return self.reset();
        }
        self.pending_reset_confirmation = true;
        Some(Event::ResetConfirmationRequested { at: Utc::now() })
    }

    pub fn confirm_reset(&mut self) -> Option<Event> {
        if !self.pending_reset_confirmation {
            return None;
        }
        self.reset()
    }

    pub fn cancel_reset(&mut self) -> Option<Event> {
        if !self.pending_reset_confirmation {
            return None;
        }
        self.pending_reset_confirmation = false;
        Some(Event::ResetCancelled { at: Utc::now() })
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.is_running = false;
        self.pending_reset_confirmation = false;
        self.remaining_secs = self.initial_secs;
        Some(Event::TimerReset {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Commit text typed into the countdown field.
    ///
    /// Unparseable text sets the clock to zero. Rejected while running.
    pub fn commit_edit(&mut self, input: &str) -> Option<Event> {
        if !self.is_editable() {
            return None;
        }
        self.remaining_secs = parse_time(input);
        Some(Event::TimeEdited {
            input: input.to_string(),
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Takes effect on the next `request_reset`.
    pub fn set_skip_reset_confirmation(&mut self, skip: bool) {
        self.skip_reset_confirmation = skip;
    }
}
