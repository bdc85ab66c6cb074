//! Completed-session counting.
//!
//! The shell owns one [`SessionContext`] for the life of the process and
//! hands it to every timer controller it creates. Nothing is persisted.

use std::sync::atomic::{AtomicU64, Ordering};

/// Capability injected into the timer controller.
pub trait SessionTracker: Send + Sync {
    fn increment_session_count(&self);
}

#[derive(Debug, Default)]
pub struct SessionContext {
    total_sessions: AtomicU64,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_sessions(&self) -> u64 {
        self.total_sessions.load(Ordering::Relaxed)
    }
}

impl SessionTracker for SessionContext {
    fn increment_session_count(&self) {
        let total = self.total_sessions.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::info!(total, "pomodoro session completed");
    }
}
