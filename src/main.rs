//! Gjenbruk CLI entry point.

use anyhow::Result;
use clap::Parser;
use gjenbruk::cli::{commands, Cli, Commands};
use gjenbruk::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("gjenbruk={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Ensure data directories exist
    std::fs::create_dir_all(settings.data_dir())?;
    std::fs::create_dir_all(settings.media_dir())?;

    // Execute command
    match &cli.command {
        Commands::Analyze { url, no_summary } => {
            commands::run_analyze(url, *no_summary, settings).await?;
        }

        Commands::Generate {
            session_id,
            platform,
        } => {
            commands::run_generate(*session_id, platform, settings).await?;
        }

        Commands::Summary { session_id } => {
            commands::run_summary(*session_id, settings).await?;
        }

        Commands::Refine {
            content_id,
            instruction,
        } => {
            commands::run_refine(*content_id, instruction, settings).await?;
        }

        Commands::Dictate { input } => {
            commands::run_dictate(input, settings).await?;
        }

        Commands::History => {
            commands::run_history(settings).await?;
        }

        Commands::Show { session_id } => {
            commands::run_show(*session_id, settings).await?;
        }

        Commands::Delete { session_id } => {
            commands::run_delete(*session_id, settings).await?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings)?;
        }
    }

    Ok(())
}
