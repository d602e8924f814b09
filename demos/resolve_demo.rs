// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolution walkthrough against the standard sources.
//!
//! This example demonstrates:
//! - Building the default manager (environment, static baseline, table metadata,
//!   vault)
//! - Passing context to a source
//! - Post-processing values that come from the environment
//! - Secret lookups, defaults, and the not-found error
//!
//! To run this example:
//! ```bash
//! # Override the columns of t1 from the environment
//! export all_columns="a, b, c"
//!
//! RUST_LOG=debug cargo run --example resolve_demo -- --table-id t1
//! ```

use clap::Parser;
use srcchain::adapters::EnvSource;
use srcchain::prelude::*;
use std::path::PathBuf;

/// Resolve a few keys against the standard sources.
#[derive(Debug, Parser)]
#[command(name = "resolve_demo")]
struct Args {
    /// Table whose columns are listed
    #[arg(long, default_value = "t1")]
    table_id: String,

    /// `.env` file merged into the environment source
    #[arg(long)]
    env_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    let args = Args::parse();

    let env = match &args.env_file {
        Some(path) => EnvSource::new().with_env_file(path)?,
        None => EnvSource::load_dotenv()?,
    };
    let config = ConfigurationFactory::create_manager(env)?;

    if let Err(e) = run(&config, &args) {
        tracing::error!("Configuration error: {}", e);
    }
    Ok(())
}

fn run(config: &ConfigurationManager, args: &Args) -> Result<()> {
    let all_tables = config.get("all_tables")?;
    tracing::info!("All tables: {}", all_tables);

    // Environment variables only carry flat strings
    let all_columns = config.resolve(
        Lookup::new("all_columns")
            .with_context(Context::new().with("table_id", args.table_id.as_str()))
            .with_processor(|source, value| {
                Ok(if source.name() == "env" {
                    value.split(",")
                } else {
                    value
                })
            }),
    )?;
    tracing::info!(
        "Columns for {}: {} with type {}",
        args.table_id,
        all_columns,
        all_columns.type_name()
    );

    let password = config.get_secret("password")?;
    tracing::info!("Password retrieved ({} characters)", password.to_string().len());

    let env = config.get("env")?;
    tracing::info!("Current environment: {}", env);

    // This will use the default value
    let timeout = config.get_or("connection_timeout", 30)?;
    tracing::info!("Connection timeout: {}", timeout);

    // This will fail
    let non_existent = config.get("non_existent_value")?;
    tracing::info!("Non-existent value: {}", non_existent);

    Ok(())
}
