//! The `ecgiga cases` and `ecgiga case` commands.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};

use crate::config::EcgigaConfig;

pub fn list(config: &EcgigaConfig) -> Result<()> {
    let registry = super::load_registry(config)?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["ID", "Title", "Summary"]);
    for c in registry.cases() {
        table.add_row(vec![c.id.as_str(), c.title.as_str(), c.summary.as_str()]);
    }
    println!("{table}");

    Ok(())
}

pub fn show(config: &EcgigaConfig, id: &str, format: &str) -> Result<()> {
    super::check_format(format)?;
    let registry = super::load_registry(config)?;
    let case = registry
        .get_case(id)
        .ok_or_else(|| anyhow::anyhow!("unknown case: {id}"))?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(case)?);
    } else {
        println!("{}", case.title);
        println!("{}", "=".repeat(case.title.chars().count()));
        println!();
        println!("{}", case.body.trim_end());
    }

    Ok(())
}
