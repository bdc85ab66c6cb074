//! Timer controller: the engine plus everything that happens around it.
//!
//! One controller exists per activation of the pomodoro view. It owns the
//! countdown engine, the tick source and the display content, and keeps
//! the tick source armed exactly while the engine is running.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use super::confirm::ResetConfirmation;
use super::engine::TimerEngine;
use super::ticker::Ticker;
use crate::content::{self, ActivationId, ContentClient, ContentUpdate, DisplayContent};
use crate::events::Event;
use crate::session::SessionTracker;

pub struct TimerController {
    engine: TimerEngine,
    ticker: Ticker,
    sessions: Arc<dyn SessionTracker>,
    activation: ActivationId,
    content: DisplayContent,
}

impl std::fmt::Debug for TimerController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerController")
            .field("engine", &self.engine)
            .field("ticker_active", &self.ticker.is_active())
            .field("activation", &self.activation)
            .field("content", &self.content)
            .finish()
    }
}

impl TimerController {
    pub fn new(
        engine: TimerEngine,
        sessions: Arc<dyn SessionTracker>,
        activation: ActivationId,
    ) -> Self {
        Self::with_ticker(engine, Ticker::default(), sessions, activation)
    }

    pub fn with_ticker(
        engine: TimerEngine,
        ticker: Ticker,
        sessions: Arc<dyn SessionTracker>,
        activation: ActivationId,
    ) -> Self {
        let mut controller = Self {
            engine,
            ticker,
            sessions,
            activation,
            content: DisplayContent::default(),
        };
        controller.sync_ticker();
        controller
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn content(&self) -> &DisplayContent {
        &self.content
    }

    pub fn activation(&self) -> ActivationId {
        self.activation
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_active()
    }

    // ── Content ──────────────────────────────────────────────────────

    /// Issue the quote and date fetches for this activation.
    pub fn request_content(&self, client: &ContentClient, tx: &UnboundedSender<ContentUpdate>) {
        content::spawn_fetches(client, self.activation, tx);
    }

    /// Apply a fetched text. Returns false if it belongs to another activation.
    pub fn apply_content(&mut self, update: ContentUpdate) -> bool {
        if update.activation != self.activation {
            tracing::debug!(
                stale = ?update.activation,
                current = ?self.activation,
                "discarding content for a closed view"
            );
            return false;
        }
        self.content.apply(update.field);
        true
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        let event = self.engine.start();
        self.settle(event)
    }

    pub fn pause(&mut self) -> Option<Event> {
        let event = self.engine.pause();
        self.settle(event)
    }

    /// Called by the shell loop each time the ticker fires.
    pub fn tick(&mut self) -> Option<Event> {
        let event = self.engine.tick();
        if matches!(event, Some(Event::TimerExpired { .. })) {
            self.sessions.increment_session_count();
        }
        self.settle(event)
    }

    pub fn request_reset(&mut self) -> Option<Event> {
        let event = self.engine.request_reset();
        self.settle(event)
    }

    pub fn confirm_reset(&mut self) -> Option<Event> {
        let event = self.engine.confirm_reset();
        self.settle(event)
    }

    pub fn cancel_reset(&mut self) -> Option<Event> {
        let event = self.engine.cancel_reset();
        self.settle(event)
    }

    pub fn reset(&mut self) -> Option<Event> {
        let event = self.engine.reset();
        self.settle(event)
    }

    /// Commit edited countdown text, then start.
    ///
    /// Returns the events that actually happened: nothing while running,
    /// only the edit when the text parsed to zero.
    pub fn submit_time(&mut self, input: &str) -> Vec<Event> {
        let edited = self.engine.commit_edit(input);
        let Some(edited) = self.settle(edited) else {
            return Vec::new();
        };
        let mut events = vec![edited];
        events.extend(self.start());
        events
    }

    pub fn set_skip_reset_confirmation(&mut self, skip: bool) {
        self.engine.set_skip_reset_confirmation(skip);
    }

    /// The confirmation overlay, while the prompt is showing.
    pub fn reset_confirmation(&mut self) -> Option<ResetConfirmation<'_>> {
        if self.engine.pending_reset_confirmation() {
            Some(ResetConfirmation::new(self))
        } else {
            None
        }
    }

    /// Resolves on the next tick. Pends forever while not running.
    pub async fn next_tick(&mut self) {
        self.ticker.next_tick().await;
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn settle(&mut self, event: Option<Event>) -> Option<Event> {
        self.sync_ticker();
        if let Some(ref event) = event {
            tracing::debug!(?event, "timer event");
        }
        event
    }

    fn sync_ticker(&mut self) {
        if !self.engine.is_running() {
            self.ticker.cancel();
        } else if !self.ticker.is_active() {
            self.ticker.start();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentField;
    use crate::session::SessionContext;
    use crate::timer::Phase;

    fn controller(secs: u64) -> (TimerController, Arc<SessionContext>) {
        let sessions = Arc::new(SessionContext::new());
        let controller =
            TimerController::new(TimerEngine::new(secs), sessions.clone(), ActivationId::first());
        (controller, sessions)
    }

    #[tokio::test(start_paused = true)]
    async fn runs_to_expiry_and_counts_session() {
        let (mut ctl, sessions) = controller(3);
        assert!(ctl.start().is_some());
        assert!(ctl.is_ticking());

        for _ in 0..3 {
            ctl.next_tick().await;
            ctl.tick();
        }

        assert_eq!(ctl.engine().phase(), Phase::Expired);
        assert_eq!(ctl.engine().remaining_secs(), 0);
        assert!(!ctl.is_ticking());
        assert_eq!(sessions.total_sessions(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_cancels_ticker() {
        let (mut ctl, _) = controller(10);
        ctl.start();
        ctl.next_tick().await;
        ctl.tick();
        ctl.pause();

        assert!(!ctl.is_ticking());
        let fired =
            tokio::time::timeout(std::time::Duration::from_secs(3), ctl.next_tick()).await;
        assert!(fired.is_err());
        assert_eq!(ctl.engine().remaining_secs(), 9);
    }

    #[tokio::test(start_paused = true)]
    async fn confirmed_reset_stops_ticking() {
        let (mut ctl, sessions) = controller(1500);
        ctl.start();
        ctl.next_tick().await;
        ctl.tick();

        ctl.request_reset();
        assert!(ctl.is_ticking());
        assert_eq!(ctl.engine().remaining_secs(), 1499);

        ctl.confirm_reset();
        assert!(!ctl.is_ticking());
        assert_eq!(ctl.engine().remaining_secs(), 1500);
        assert_eq!(sessions.total_sessions(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn submit_time_edits_and_starts() {
        let (mut ctl, _) = controller(1500);
        let events = ctl.submit_time("00:02");
        assert_eq!(events.len(), 2);
        assert!(ctl.is_ticking());
        assert_eq!(ctl.engine().remaining_secs(), 2);
    }

    #[test]
    fn submit_garbage_zeroes_without_starting() {
        let (mut ctl, _) = controller(1500);
        let events = ctl.submit_time("oops");
        assert_eq!(events.len(), 1);
        assert!(!ctl.is_ticking());
        assert_eq!(ctl.engine().display(), "00:00");
    }

    #[tokio::test(start_paused = true)]
    async fn submit_while_running_is_ignored() {
        let (mut ctl, _) = controller(1500);
        ctl.start();
        assert!(ctl.submit_time("01:00").is_empty());
        assert_eq!(ctl.engine().remaining_secs(), 1500);
    }

    #[test]
    fn stale_content_is_discarded() {
        let (mut ctl, _) = controller(1500);
        let stale = ContentUpdate {
            activation: ActivationId::first().next(),
            field: ContentField::Quote("late".into()),
        };
        assert!(!ctl.apply_content(stale));
        assert!(ctl.content().quote.is_empty());

        let fresh = ContentUpdate {
            activation: ActivationId::first(),
            field: ContentField::Quote("on time".into()),
        };
        assert!(ctl.apply_content(fresh));
        assert_eq!(ctl.content().quote, "on time");
    }

    #[test]
    fn overlay_only_while_pending() {
        let (mut ctl, _) = controller(1500);
        assert!(ctl.reset_confirmation().is_none());
        ctl.request_reset();
        assert!(ctl.reset_confirmation().is_some());
    }
}
