use clap::Parser;
use log::error;
use quizctl::cli::Cli;
use quizctl::commands;
use quizctl::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration from .env files and environment variables
    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    env_logger::init_from_env(env_logger::Env::new().default_filter_or(config.log_filter.as_str()));
    config.log_configuration();

    if let Err(e) = commands::run(cli.command, &config).await {
        error!("{:#}", e);
        return Err(e);
    }
    Ok(())
}
