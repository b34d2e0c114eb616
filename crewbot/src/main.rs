use anyhow::Result;
use clap::Parser;
use crewbot::{load_config, run_bot, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
        Commands::CheckConfig { token } => {
            let config = load_config(token)?;
            config.validate()?;
            println!(
                "Configuration OK: model {}, {} allowed chat(s), {} mode",
                config.completion.model,
                config.allowed_chat_ids.len(),
                if config.telegram.webhook.is_some() { "webhook" } else { "polling" }
            );
            Ok(())
        }
    }
}
