//! # senae: Tariff Engine CLI
//!
//! Drives `senae-core` from the command line. Results go to stdout as JSON,
//! logs go to stderr.
//!
//! ```sh
//! # Which category does a parcel fall into?
//! senae classify --value 49.99 --weight 0.34 --hint Electronics
//!
//! # Duties for a parcel in a given category
//! senae quote --category D --value 300 --weight 5 --product-type textiles
//!
//! # Classify and price a catalog product
//! senae product --price 150 --weight 0.9 --catalog-category Footwear
//!
//! # Batch of pre-totalled parcels, or a full order (FILE or - for stdin)
//! senae bulk parcels.json
//! cat order.json | senae order -
//!
//! # Show the effective configuration
//! senae check
//! ```

mod config;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use senae_core::{
    calculate_bulk, calculate_tariff_for_code, determine_category, draft_order, fitting_category,
    quote_product, BulkTariffItem, NewOrder, TariffOptions,
};

use crate::config::SenaeConfig;

/// SENAE courier tariff calculator.
#[derive(Parser, Debug)]
#[command(
    name = "senae",
    version,
    about = "Courier tariff calculator for Ecuadorian customs (SENAE)",
    long_about = "Classifies parcels into SENAE courier categories B, C and D \
                  and computes tariff, IVA, FODINFA and ADV.\n\n\
                  Configuration: SENAE_LOG_LEVEL, SENAE_PRETTY_JSON, SENAE_ORDER_PREFIX"
)]
struct Cli {
    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Print compact single-line JSON.
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pick the category for a parcel.
    Classify {
        /// Declared value in USD.
        #[arg(long)]
        value: f64,
        /// Weight in kg.
        #[arg(long)]
        weight: f64,
        /// Product hint, usually the catalog category.
        #[arg(long, default_value = "")]
        hint: String,
    },

    /// Calculate duties for a parcel in a given category.
    Quote {
        /// Category code (B, C or D).
        #[arg(long)]
        category: String,
        /// Declared value in USD.
        #[arg(long)]
        value: f64,
        /// Weight in kg.
        #[arg(long)]
        weight: f64,
        /// Importations this year (category B).
        #[arg(long)]
        importations: Option<u32>,
        /// Product type (category D: textiles or footwear).
        #[arg(long)]
        product_type: Option<String>,
    },

    /// Classify a catalog product and calculate its duties.
    Product {
        /// Price in USD.
        #[arg(long)]
        price: f64,
        /// Weight in kg (defaults to 1).
        #[arg(long)]
        weight: Option<f64>,
        /// Catalog category, used as hint and product type.
        #[arg(long)]
        catalog_category: Option<String>,
    },

    /// Calculate duties for a JSON array of pre-totalled parcels.
    Bulk {
        /// JSON file, or - for stdin.
        input: PathBuf,
    },

    /// Draft an order from a JSON order request.
    Order {
        /// JSON file, or - for stdin.
        input: PathBuf,
    },

    /// Print the effective configuration and exit.
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = SenaeConfig::load().context("failed to load configuration")?;

    if let Some(ref level) = cli.log_level {
        config.log_level = level.trim().to_lowercase();
        config.validate().context("invalid --log-level")?;
    }
    if cli.compact {
        config.pretty_json = false;
    }

    init_tracing(&config.log_level);
    debug!(?config, "configuration loaded");

    run(cli.command, &config)
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(command: Command, config: &SenaeConfig) -> Result<()> {
    match command {
        Command::Classify {
            value,
            weight,
            hint,
        } => {
            let category = determine_category(value, weight, &hint);
            let fits = fitting_category(value, weight, &hint).is_some();
            if !fits {
                warn!(value, weight, "parcel exceeds every category ceiling");
            }
            emit(
                &json!({
                    "category": category,
                    "fits": fits,
                    "value": value,
                    "weight": weight,
                }),
                config,
            )
        }

        Command::Quote {
            category,
            value,
            weight,
            importations,
            product_type,
        } => {
            let options = TariffOptions {
                importations_count: importations,
                product_type,
            };
            let outcome = calculate_tariff_for_code(&category, value, weight, &options)?;
            emit(&outcome, config)
        }

        Command::Product {
            price,
            weight,
            catalog_category,
        } => {
            let quote = quote_product(price, weight, catalog_category.as_deref())?;
            emit(&quote, config)
        }

        Command::Bulk { input } => {
            let items: Vec<BulkTariffItem> = read_json(&input)?;
            let summary = calculate_bulk(&items)?;
            info!(
                items = items.len(),
                failed_items = summary.failed_items,
                "bulk calculation finished"
            );
            emit(&summary, config)
        }

        Command::Order { input } => {
            let request: NewOrder = read_json(&input)?;
            let draft = draft_order(request, &config.order_prefix, Utc::now(), Uuid::new_v4())?;
            emit(&draft, config)
        }

        Command::Check => emit(config, config),
    }
}

/// Reads and parses JSON from a file, or from stdin when the path is `-`.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
    };

    serde_json::from_str(&raw).with_context(|| format!("invalid JSON in {}", path.display()))
}

fn emit<T: Serialize>(value: &T, config: &SenaeConfig) -> Result<()> {
    let out = if config.pretty_json {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}
