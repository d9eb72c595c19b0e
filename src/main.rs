//! lbr - LabBook resolver toolkit
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use labbook_resolve::cli::{Cli, Commands};
use labbook_resolve::config::{Config, ConfigManager};
use labbook_resolve::error::LabResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> LabResult<()> {
    let cli = Cli::parse();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load().await?;

    init_logging(cli.verbose, &config);
    debug!("Loaded configuration from {}", config_manager.path().display());

    let username = cli
        .user
        .clone()
        .unwrap_or_else(|| config.general.username.clone());

    match cli.command {
        Commands::LabBook(args) => {
            labbook_resolve::cli::commands::labbook(args, &config, &username).await
        }
        Commands::Environment(args) => {
            labbook_resolve::cli::commands::environment(args, &config, &username).await
        }
        Commands::Remote(args) => labbook_resolve::cli::commands::remote(args, &config).await,
        Commands::Config(args) => {
            labbook_resolve::cli::commands::config(args, &config, &config_manager).await
        }
    }
}

/// 0 = warn, 1 = info, 2+ = debug; JSON lines when `general.log_format = "json"`
fn init_logging(verbose: u8, config: &Config) {
    let filter = match verbose {
        0 => EnvFilter::new("labbook_resolve=warn"),
        1 => EnvFilter::new("labbook_resolve=info"),
        _ => EnvFilter::new("labbook_resolve=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.without_time().init();
    }
}
