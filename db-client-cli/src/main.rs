//! db-client entry point
//!
//! Loads configuration, connects to the configured backend, runs one command
//! and prints the result envelope as JSON on stdout. Logs go to stderr.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use db_client::{Config, DbClient, DbClientResult, initialize, supported_backends};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Operation};

/// Exit code when initialization fails.
const EXIT_INIT_FAILED: u8 = 1;
/// Exit code when the operation returned an error envelope.
const EXIT_OPERATION_FAILED: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let Some(operation) = cli.command.into_operation() else {
        return match print_json(&backend_names()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!("{e:#}");
                ExitCode::FAILURE
            }
        };
    };

    let config = match Config::load(cli.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            return ExitCode::from(EXIT_INIT_FAILED);
        }
    };
    tracing::debug!("Configuration: {config:?}");

    let client = match initialize(&config).await {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Initialization failed: {e}");
            return ExitCode::from(EXIT_INIT_FAILED);
        }
    };

    let outcome = run(client.as_ref(), operation).await;
    client.disconnect().await;

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_OPERATION_FAILED),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Run one operation, print its envelope, and report whether it succeeded.
async fn run(client: &dyn DbClient, operation: Operation) -> anyhow::Result<bool> {
    match operation {
        Operation::List => report(&client.list_accounts().await),
        Operation::Add { acct_id, password } => {
            report(&client.add_account(acct_id, &password).await)
        }
        Operation::Remove { acct_id } => report(&client.remove_account(acct_id).await),
        Operation::Flow => report(&client.get_flow().await),
    }
}

fn backend_names() -> Vec<String> {
    supported_backends().iter().map(ToString::to_string).collect()
}

fn report<T: Serialize>(result: &DbClientResult<T>) -> anyhow::Result<bool> {
    print_json(result)?;
    Ok(result.is_success())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
