//! "Reset the timer?" overlay.

use super::controller::TimerController;
use crate::events::Event;

pub const PROMPT: &str = "reset the timer?";
pub const CONFIRM_LABEL: &str = "yes";
pub const CANCEL_LABEL: &str = "no";
pub const SKIP_LABEL: &str = "don't show again";

/// Borrowed view over a controller whose reset prompt is showing.
///
/// Obtained from [`TimerController::reset_confirmation`]. Confirming or
/// cancelling consumes the overlay, since the prompt closes either way.
#[derive(Debug)]
pub struct ResetConfirmation<'a> {
    controller: &'a mut TimerController,
}

impl<'a> ResetConfirmation<'a> {
    pub(super) fn new(controller: &'a mut TimerController) -> Self {
        Self { controller }
    }

    pub fn confirm(self) -> Option<Event> {
        self.controller.confirm_reset()
    }

    pub fn cancel(self) -> Option<Event> {
        self.controller.cancel_reset()
    }

    pub fn skip_future(&self) -> bool {
        self.controller.engine().skip_reset_confirmation()
    }

    /// Applies from the next reset request on.
    pub fn set_skip_future(&mut self, skip: bool) {
        self.controller.set_skip_reset_confirmation(skip);
    }
}
