//! Thriftkids CLI - database migrations and catalog tooling.
//!
//! # Usage
//!
//! ```bash
//! # Create the session table in the storefront database
//! tk-cli migrate
//!
//! # Validate the configured catalog, or a specific file
//! tk-cli catalog check
//! tk-cli catalog check path/to/catalog.json
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `catalog check` - Parse and validate a product catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tk-cli")]
#[command(author, version, about = "Thriftkids CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Inspect the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Parse and validate a catalog file
    Check {
        /// Catalog file (defaults to `STOREFRONT_CATALOG_PATH`)
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::storefront().await?,
        Commands::Catalog { action } => match action {
            CatalogAction::Check { path } => commands::catalog::check(path)?,
        },
    }
    Ok(())
}
