use clap::Subcommand;
use pomodoro_core::content;
use pomodoro_core::Config;

#[derive(Subcommand)]
pub enum ContentAction {
    /// Fetch one quote and print the raw response
    Quote,
    /// Fetch the date and print the raw response
    Date,
    /// Fetch both the way the pomodoro view does (failures leave text empty)
    All,
}

pub fn run(action: ContentAction, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let client = config.content_client()?;
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match action {
        ContentAction::Quote => {
            let quote = rt.block_on(client.fetch_quote())?;
            println!("{}", serde_json::to_string_pretty(&quote)?);
        }
        ContentAction::Date => {
            let date = rt.block_on(client.fetch_date())?;
            println!("{}", serde_json::to_string_pretty(&date)?);
        }
        ContentAction::All => {
            let display = rt.block_on(content::fetch_display_content(&client));
            println!("{}", serde_json::to_string_pretty(&display)?);
        }
    }
    Ok(())
}
