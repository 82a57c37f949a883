//! Crece CLI - quiz game, rewards and course catalog from the terminal.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use commands::AppContext;
use crece_core::config::EngineConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = EngineConfig::load_or_default();
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    tracing::debug!("using store at {}", config.store_path().display());
    let ctx = AppContext::open(config)?;

    match cli.command {
        Commands::Register {
            name,
            email,
            career,
            password,
        } => commands::register(&ctx, &name, &email, &career, &password),
        Commands::Login { email, password } => commands::login(&ctx, &email, &password),
        Commands::Status => commands::status(&ctx),
        Commands::Play { difficulty } => commands::play(&ctx, &difficulty),
        Commands::Progress => commands::progress(&ctx),
        Commands::Claim { threshold } => commands::claim(&ctx, threshold),
        Commands::Open { difficulty } => commands::open_chest(&ctx, &difficulty),
        Commands::Courses => commands::courses(&ctx),
        Commands::Buy { course_id } => commands::buy(&ctx, &course_id),
        Commands::Chat { message } => commands::chat(&ctx, &message.join(" ")).await,
    }
}
