pub mod config;
pub mod content;
pub mod run;
pub mod timer;
