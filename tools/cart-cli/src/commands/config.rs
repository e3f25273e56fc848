//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    ctx.output.info("[api]");
    ctx.output.kv("base_url", &ctx.config.api.base_url);
    if let Some(timeout) = ctx.config.api.timeout_ms {
        ctx.output.kv("timeout_ms", &timeout.to_string());
    }
    if let Some(ref fixture) = ctx.config.api.fixture {
        ctx.output.kv("fixture", fixture);
    }

    ctx.output.info("[storage]");
    ctx.output.kv("path", &ctx.config.storage.path);

    ctx.output.info("[store]");
    ctx.output.kv("storage_key", &ctx.config.store.storage_key);

    let messages = &ctx.config.store.messages;
    ctx.output.info("[store.messages]");
    ctx.output.kv("add_succeeded", &messages.add_succeeded);
    ctx.output.kv("out_of_stock", &messages.out_of_stock);
    ctx.output.kv("add_failed", &messages.add_failed);
    ctx.output.kv("remove_failed", &messages.remove_failed);
    ctx.output.kv("update_failed", &messages.update_failed);

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("cart.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let errors = ctx.config.validate();

    if let Some(ref fixture) = ctx.config.api.fixture {
        let path = ctx.resolve_path(fixture);
        if !path.exists() {
            ctx.output
                .warn(&format!("Warning: fixture file not found: {}", path.display()));
        }
    }

    if errors.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    bail!("Configuration has {} error(s)", errors.len())
}
