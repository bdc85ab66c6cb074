//! Interactive shell loop.
//!
//! A single task on a current-thread runtime owns the [`Shell`] and
//! multiplexes ticks, user input and fetch results, so every state change
//! happens in one place and in arrival order.

use std::sync::Arc;

use clap::Args;
use pomodoro_core::{Config, SessionContext};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::shell::{parse_action, Flow, Shell, Tab};

#[derive(Args)]
pub struct RunArgs {
    /// Tab to open on
    #[arg(long, value_enum, default_value = "pomodoro")]
    pub tab: Tab,
}

pub fn run(args: RunArgs, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = rt.block_on(event_loop(args, config));
    // A pending stdin read cannot be cancelled; don't wait for it.
    rt.shutdown_background();
    result
}

async fn event_loop(args: RunArgs, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let client = config.content_client()?;
    let (content_tx, mut content_rx) = mpsc::unbounded_channel();
    let sessions = Arc::new(SessionContext::new());
    let mut shell = Shell::new(config, client, sessions.clone(), content_tx, args.tab);

    println!("{}", shell.render());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = shell.next_tick() => {
                if let Some(line) = shell.on_tick() {
                    println!("{line}");
                }
            }
            Some(update) = content_rx.recv() => {
                if shell.on_content(update) {
                    println!("{}", shell.render());
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::debug!("stdin closed");
                    break;
                };
                match parse_action(&line) {
                    Ok(action) => match shell.handle(action) {
                        Flow::Quit => break,
                        Flow::Continue(message) => {
                            if let Some(message) = message {
                                println!("{message}");
                            }
                            println!("{}", shell.render());
                        }
                    },
                    Err(message) => println!("{message}"),
                }
            }
        }
    }

    tracing::info!(total_sessions = sessions.total_sessions(), "shell closed");
    Ok(())
}
