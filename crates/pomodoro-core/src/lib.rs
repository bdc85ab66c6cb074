//! # Pomodoro Core Library
//!
//! Core logic of the Pomodoro timer. The CLI shell renders it; everything
//! that decides what the timer does lives here.
//!
//! ## Architecture
//!
//! - **Timer**: a whole-second countdown state machine ([`TimerEngine`]),
//!   a cancellable tick source, and the [`TimerController`] that ties them
//!   together with the reset-confirmation overlay
//! - **Content**: best-effort quote and date fetches from two HTTP services
//! - **Session**: the completed-session counter owned by the shell
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`TimerController`]: one per activation of the pomodoro view
//! - [`ContentClient`]: quote/date HTTP client
//! - [`Config`]: application configuration management
//! - [`Event`]: emitted on every timer state change

pub mod content;
pub mod error;
pub mod events;
pub mod session;
pub mod storage;
pub mod timer;

pub use content::{ActivationId, ContentClient, ContentUpdate, DisplayContent};
pub use error::{ConfigError, CoreError, FetchError};
pub use events::Event;
pub use session::{SessionContext, SessionTracker};
pub use storage::Config;
pub use timer::{format_time, parse_time, Phase, TimerController, TimerEngine};
