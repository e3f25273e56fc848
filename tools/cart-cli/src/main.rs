//! Cart CLI - Command line tool for a storefront cart.
//!
//! Commands:
//! - `cart show` - Show the cart
//! - `cart add` - Add one unit of a product
//! - `cart remove` - Remove a product
//! - `cart update` - Set a product's quantity
//! - `cart products` - List the catalog
//! - `cart config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use cart_store::CartError;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::{ConfigArgs, ProductArgs, UpdateArgs};

/// Cart CLI - Manage a storefront cart from the terminal
#[derive(Parser)]
#[command(name = "cart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cart
    Show,

    /// Add one unit of a product
    Add(ProductArgs),

    /// Remove a product from the cart
    Remove(ProductArgs),

    /// Set the quantity of a product in the cart
    Update(UpdateArgs),

    /// List the catalog with stock
    Products,

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.json);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Show => commands::cart::show(&ctx).await,
        Commands::Add(args) => commands::cart::add(args, &ctx).await,
        Commands::Remove(args) => commands::cart::remove(args, &ctx).await,
        Commands::Update(args) => commands::cart::update(args, &ctx).await,
        Commands::Products => commands::products::run(&ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        // Cart failures were already surfaced through the notifier.
        if e.downcast_ref::<CartError>().is_some() {
            ctx.output.debug(&format!("{:#}", e));
        } else {
            ctx.output.error(&format!("{:#}", e));
        }
        std::process::exit(1);
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` overrides the default filter.
fn init_tracing(verbose: bool, json: bool) {
    let default_filter = if verbose {
        "cart_cli=debug,cart_store=debug,cart_data=debug,cart_cache=debug"
    } else {
        "cart_cli=info,cart_store=warn,cart_data=warn,cart_cache=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}
