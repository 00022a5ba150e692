//! Configuration
//!
//! CLI and environment settings for the `bag` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{checkout::Platform, items::LineItemId};

/// Bag CLI configuration
#[derive(Debug, Parser)]
#[command(name = "bag", about = "Shopping bag and checkout", long_about = None)]
pub struct BagConfig {
    /// Seed cart settings.
    #[command(flatten)]
    pub cart: CartConfig,

    /// Checkout settings.
    #[command(flatten)]
    pub checkout: CheckoutConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Action to run.
    #[command(subcommand)]
    pub command: Command,
}

impl BagConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

/// Bag actions.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render the bag after applying quantity changes.
    Show(QuantityChanges),

    /// Apply quantity changes, then check out.
    Checkout(QuantityChanges),
}

impl Command {
    /// Quantity changes requested for this action.
    pub fn changes(&self) -> &QuantityChanges {
        match self {
            Command::Show(changes) | Command::Checkout(changes) => changes,
        }
    }
}

/// Quantity changes applied to the seed cart, increments first.
#[derive(Debug, Clone, Default, Args)]
pub struct QuantityChanges {
    /// Line item id to increment (repeatable)
    #[arg(long = "increment", value_name = "ID")]
    pub increments: Vec<String>,

    /// Line item id to decrement (repeatable)
    #[arg(long = "decrement", value_name = "ID")]
    pub decrements: Vec<String>,
}

impl QuantityChanges {
    /// Ids to increment.
    pub fn increments(&self) -> impl Iterator<Item = LineItemId> + '_ {
        self.increments.iter().map(|id| LineItemId::new(id.as_str()))
    }

    /// Ids to decrement.
    pub fn decrements(&self) -> impl Iterator<Item = LineItemId> + '_ {
        self.decrements.iter().map(|id| LineItemId::new(id.as_str()))
    }
}

/// Seed cart settings.
#[derive(Debug, Args)]
pub struct CartConfig {
    /// Path to a YAML cart fixture
    #[arg(
        short,
        long,
        env = "BAG_FIXTURE",
        default_value = "fixtures/carts/bag.yml"
    )]
    pub fixture: PathBuf,
}

/// Checkout settings.
#[derive(Debug, Args)]
pub struct CheckoutConfig {
    /// Platform the storefront runs on (web, ios, android)
    #[arg(short, long, env = "BAG_PLATFORM", value_enum, default_value_t = Platform::Web)]
    pub platform: Platform,

    /// Merchant name used in payment descriptions
    #[arg(long, env = "BAG_MERCHANT", default_value = "Storefront")]
    pub merchant: String,
}

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}
