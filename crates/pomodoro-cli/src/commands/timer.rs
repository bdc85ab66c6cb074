use clap::Subcommand;
use pomodoro_core::timer::{format_time, parse_time};
use pomodoro_core::Config;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Render seconds as MM:SS
    Format {
        /// Seconds remaining
        secs: u64,
    },
    /// Parse MM:SS into seconds (malformed input gives 0)
    Parse {
        /// Countdown text, e.g. "25:00"
        text: String,
    },
    /// Print the state a fresh timer starts in, as JSON
    Status,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Format { secs } => println!("{}", format_time(secs)),
        TimerAction::Parse { text } => println!("{}", parse_time(&text)),
        TimerAction::Status => {
            let engine = Config::load_or_default().engine();
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
    }
    Ok(())
}
