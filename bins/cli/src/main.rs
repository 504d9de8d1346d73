//! SplitLedger command-line front end.
//!
//! Usage: splitledger <command> [args...]

mod commands;
mod report;

use std::process::ExitCode;

use anyhow::Context;
use tracing::error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use splitledger_shared::config::LoggingConfig;
use splitledger_shared::{AppConfig, AppError, AppResult};
use splitledger_store::JsonLedgerStore;

use crate::commands::Command;

fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return Ok(exit_code(&err));
        }
    };

    // Initialize tracing
    init_tracing(&config.logging).context("Failed to install tracing subscriber")?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let store = JsonLedgerStore::from_config(&config.storage);

    let result = Command::parse(&args).and_then(|command| command.run(&store));
    match result {
        Ok(output) => {
            for line in output {
                println!("{line}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!(code = err.error_code(), "{err}");
            eprintln!("error: {err}");
            Ok(exit_code(&err))
        }
    }
}

fn load_config() -> AppResult<AppConfig> {
    AppConfig::load().map_err(AppError::from)
}

fn exit_code(err: &AppError) -> ExitCode {
    ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
}

/// Installs the global subscriber. Logs go to stderr so stdout stays a clean report.
fn init_tracing(config: &LoggingConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if config.json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    }
}
