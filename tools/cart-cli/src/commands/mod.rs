//! CLI command implementations.

pub mod cart;
pub mod config;
pub mod products;

use cart_core::ProductId;
use clap::{Args, Subcommand};

/// Arguments naming a single product.
#[derive(Args)]
pub struct ProductArgs {
    /// Product id.
    pub id: ProductId,
}

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    /// Product id.
    pub id: ProductId,

    /// New quantity. Zero or less leaves the cart unchanged.
    #[arg(allow_hyphen_values = true)]
    pub amount: i64,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
