//! Command line entry points
//!
//! - `serve`: HTTP API plus the periodic maintenance task
//! - `analyze`: one-shot analysis printed as JSON
//! - `clear-cache`: purge cached analyses

pub mod analyze;
pub mod clear_cache;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Profile Insight - profile scraping, summarization and chat
#[derive(Parser)]
#[command(name = "profile-insight")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Analyze one profile and print the report
    Analyze(analyze::AnalyzeArgs),

    /// Remove every cached analysis
    ClearCache,
}

/// Loads `.env` and configuration, then installs logging
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging)?;

    Ok(config)
}
