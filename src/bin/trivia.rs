use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use trivia_api::config::Settings;
use trivia_api::db;
use trivia_api::server::app::run_server;
use trivia_api::telemetry::init_tracing;
use trivia_api::transfer::{export_data, import_data};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API (default)
    Serve,
    /// Apply database migrations and exit
    Migrate,
    /// Import categories.csv and questions.csv from a directory
    Import { path: PathBuf },
    /// Export categories.csv and questions.csv into a directory
    Export { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = Settings::load().context("Failed to load settings")?;
    let pool = db::establish_connection(&settings.database_url)
        .await
        .with_context(|| format!("Cannot connect to {}", settings.database_url))?;

    let command = cli.command.unwrap_or(Commands::Serve);
    if settings.run_migrations || matches!(command, Commands::Migrate) {
        tracing::info!("Running db migrations...");
        db::run_migrations(&pool)
            .await
            .context("Migrations failed")?;
    }

    match command {
        Commands::Serve => run_server(pool, &settings.address()).await?,
        Commands::Migrate => {}
        Commands::Import { path } => import_data(&pool, &path).await?,
        Commands::Export { path } => export_data(&pool, &path).await?,
    };
    Ok(())
}
