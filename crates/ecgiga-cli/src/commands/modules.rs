//! The `ecgiga modules` and `ecgiga module` commands.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};

use ecgiga_core::ModulePayload;

use crate::config::EcgigaConfig;

pub fn list(config: &EcgigaConfig) -> Result<()> {
    let registry = super::load_registry(config)?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["ID", "Title", "Quiz", "Summary"]);
    for m in registry.modules() {
        let quiz = if registry.has_quiz(&m.id) { "yes" } else { "" };
        table.add_row(vec![
            m.id.as_str(),
            m.title.as_str(),
            quiz,
            m.summary.as_str(),
        ]);
    }
    println!("{table}");

    Ok(())
}

pub fn show(config: &EcgigaConfig, id: &str, format: &str) -> Result<()> {
    super::check_format(format)?;
    let registry = super::load_registry(config)?;
    let module = registry
        .get_module(id)
        .ok_or_else(|| anyhow::anyhow!("unknown module: {id}"))?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(module)?);
        return Ok(());
    }

    print_module(module, registry.has_quiz(id));
    Ok(())
}

fn print_module(module: &ModulePayload, has_quiz: bool) {
    println!("{}", module.title);
    println!("{}", "=".repeat(module.title.chars().count()));
    println!();
    println!("{}", module.body.trim_end());

    if !module.case_ids.is_empty() {
        println!();
        println!("Clinical cases:");
        for case_id in &module.case_ids {
            println!("  ecgiga case {case_id}");
        }
    }
    if !module.calculators.is_empty() {
        println!();
        println!("Calculators:");
        for calc in &module.calculators {
            println!("  ecgiga {calc}");
        }
    }
    if has_quiz {
        println!();
        println!("Quiz: ecgiga quiz {}", module.id);
    }
}
