//! T-The-Plug CLI - catalog and checkout tooling.
//!
//! # Usage
//!
//! ```bash
//! # Validate a catalog file
//! ttp-cli catalog check crates/storefront/content/catalog.json
//!
//! # Preview the WhatsApp message for a cart
//! ttp-cli checkout preview \
//!     --catalog crates/storefront/content/catalog.json \
//!     --number 233201234567 \
//!     --item oreo-delight=2 --item lotus-biscoff
//! ```
//!
//! # Commands
//!
//! - `catalog check` - Load a catalog and report every validation error
//! - `checkout preview` - Print the order message and deep link for a cart

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use ttp_core::CurrencyCode;
use ttp_core::checkout::{DEFAULT_BUSINESS_NAME, DEFAULT_ORDER_PREFIX};

mod commands;

use commands::checkout::{ItemArg, PreviewOptions};

#[derive(Parser)]
#[command(name = "ttp-cli")]
#[command(author, version, about = "T-The-Plug storefront tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect product catalogs
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Work with checkout messages
    Checkout {
        #[command(subcommand)]
        action: CheckoutAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Load a catalog file and report its products or validation errors
    Check {
        /// Path to the catalog JSON file
        path: PathBuf,
    },
}

#[derive(Subcommand)]
enum CheckoutAction {
    /// Build a cart and print the WhatsApp message and link it produces
    Preview {
        /// Path to the catalog JSON file
        #[arg(short, long)]
        catalog: PathBuf,

        /// Recipient WhatsApp number, digits only
        #[arg(short, long)]
        number: String,

        /// Cart entry as `id` or `id=quantity`; repeat for more items
        #[arg(short, long = "item")]
        items: Vec<ItemArg>,

        /// Name used in the greeting line
        #[arg(long, default_value = DEFAULT_BUSINESS_NAME)]
        business_name: String,

        /// Order reference prefix
        #[arg(long, default_value = DEFAULT_ORDER_PREFIX)]
        prefix: String,

        /// Currency the catalog prices are quoted in
        #[arg(long, default_value_t = CurrencyCode::GHS)]
        currency: CurrencyCode,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::Check { path } => {
                commands::catalog::check(&path).await?;
            }
        },
        Commands::Checkout { action } => match action {
            CheckoutAction::Preview {
                catalog,
                number,
                items,
                business_name,
                prefix,
                currency,
            } => {
                let options = PreviewOptions {
                    number,
                    business_name,
                    prefix,
                    currency,
                };
                commands::checkout::preview(&catalog, &items, &options).await?;
            }
        },
    }
    Ok(())
}
