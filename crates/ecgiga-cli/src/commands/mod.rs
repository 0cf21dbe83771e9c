pub mod calc;
pub mod cases;
pub mod init;
pub mod modules;
pub mod quiz;
pub mod validate;

use anyhow::{Context, Result};

use ecgiga_core::parser::load_bank_directory;
use ecgiga_core::ContentRegistry;

use crate::config::EcgigaConfig;

/// Built-in content plus every bank found under the configured `bank_dirs`.
pub fn load_registry(config: &EcgigaConfig) -> Result<ContentRegistry> {
    let mut registry = ContentRegistry::builtin().context("failed to load built-in content")?;

    for dir in &config.bank_dirs {
        if !dir.is_dir() {
            tracing::warn!(dir = %dir.display(), "bank directory not found, skipping");
            continue;
        }
        for bank in load_bank_directory(dir)? {
            registry.register_bank(bank);
        }
    }

    Ok(registry)
}

fn check_format(format: &str) -> Result<()> {
    match format {
        "text" | "json" => Ok(()),
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }
}
