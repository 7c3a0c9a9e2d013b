use anyhow::{anyhow, Result};
use clap::Parser;
use tracing::info;

use airspeeds::cli::{AppConfig, Cli};
use airspeeds::core::engine;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from(Cli::parse());
    config.validate().map_err(|e| anyhow!("invalid configuration: {}", e))?;
    config.init_tracing()?;
    info!(?config, "starting airspeeds quiz");

    let terminal = ratatui::init();
    let result = engine::run(&config, terminal).await;
    ratatui::restore();

    let stats = result?;
    info!(stats = %stats.to_json(), "session finished");
    println!(
        "✈️  {} rounds, {} perfect, best run {} / 18",
        stats.rounds_started, stats.perfect_rounds, stats.best_progress
    );
    Ok(())
}
