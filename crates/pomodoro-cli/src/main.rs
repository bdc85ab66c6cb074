use clap::{Args, Parser, Subcommand};
use pomodoro_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod shell;
mod views;

#[derive(Parser)]
#[command(name = "pomodoro", version, about = "Pomodoro timer")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct GlobalArgs {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quote service endpoint for this run
    #[arg(long, global = true)]
    quote_url: Option<String>,

    /// Date service endpoint for this run
    #[arg(long, global = true)]
    date_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive timer (default)
    Run(commands::run::RunArgs),
    /// Time text helpers and timer state
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Fetch quote/date content once
    Content {
        #[command(subcommand)]
        action: commands::content::ContentAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "pomodoro=debug,pomodoro_core=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // stdout belongs to the rendered view
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Config file plus per-run endpoint overrides.
fn effective_config(global: &GlobalArgs) -> Config {
    let mut config = Config::load_or_default();
    if let Some(url) = &global.quote_url {
        config.endpoints.quote_url = url.clone();
    }
    if let Some(url) = &global.date_url {
        config.endpoints.date_url = url.clone();
    }
    config
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    let command = cli.command.unwrap_or(Commands::Run(commands::run::RunArgs {
        tab: shell::Tab::Pomodoro,
    }));
    let result = match command {
        Commands::Run(args) => commands::run::run(args, effective_config(&cli.global)),
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Content { action } => {
            commands::content::run(action, effective_config(&cli.global))
        }
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
