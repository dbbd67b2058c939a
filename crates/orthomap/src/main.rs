//! orthomap - main entry point

use clap::Parser;
use orthomap::cli::{Cli, Commands};
use orthomap::commands;
use orthomap_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // stdout carries results, so the console log stays quiet unless asked
    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    };
    let log_config = LogConfig::builder()
        .level(level)
        .output(LogOutput::Console)
        .log_file_prefix("orthomap")
        .build();

    // Environment variables take precedence
    let log_config = log_config
        .clone()
        .merge_from(|key| std::env::var(key).ok())
        .unwrap_or(log_config);

    // The CLI works without logging
    let guard = match init_logging(&log_config) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {:#}", e);
            None
        }
    };

    if let Err(e) = execute_command(&cli).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        drop(guard);
        process::exit(1);
    }
}

async fn execute_command(cli: &Cli) -> orthomap::Result<()> {
    match &cli.command {
        Commands::Map(args) => commands::map::run(cli, args).await,
        Commands::Marts { output } => commands::catalog::marts(cli, output).await,
        Commands::Datasets { mart, output } => commands::catalog::datasets(cli, mart, output).await,
    }
}
