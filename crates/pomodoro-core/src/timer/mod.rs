mod confirm;
mod controller;
mod engine;
mod format;
mod ticker;

pub use confirm::{ResetConfirmation, CANCEL_LABEL, CONFIRM_LABEL, PROMPT, SKIP_LABEL};
pub use controller::TimerController;
pub use engine::{Phase, TimerEngine, DEFAULT_DURATION_SECS};
pub use format::{format_time, parse_time};
pub use ticker::{Ticker, TICK_PERIOD};
