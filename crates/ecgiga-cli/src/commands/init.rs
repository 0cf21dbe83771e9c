//! The `ecgiga init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("ecgiga.toml").exists() {
        println!("ecgiga.toml already exists, skipping.");
    } else {
        std::fs::write("ecgiga.toml", SAMPLE_CONFIG)?;
        println!("Created ecgiga.toml");
    }

    std::fs::create_dir_all("banks")?;
    let example_path = std::path::Path::new("banks/example.toml");
    if example_path.exists() {
        println!("banks/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_BANK)?;
        println!("Created banks/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Add questions to banks/example.toml");
    println!("  2. Run: ecgiga validate --bank banks");
    println!("  3. Run: ecgiga quiz axis");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# ecgiga configuration

log_level = "warn"
default_sex = "male"
show_fridericia = true

# Extra question banks, relative to this file. ${VAR} references are expanded.
bank_dirs = ["banks"]
"#;

const EXAMPLE_BANK: &str = r#"[bank]
topic = "axis"
title = "Electrical Axis"

[[questions]]
prompt = "What is the normal range of the QRS axis in the frontal plane?"
options = ["-90° to -30°", "-30° to +90°", "+90° to +180°", "+180° to -90°"]
correct = 1
explanation = "A frontal QRS axis between -30° and +90° is considered normal in adults."

[[questions]]
prompt = "Lead I positive and aVF negative most likely indicates:"
options = ["Normal axis", "Right axis deviation", "Left axis deviation", "Extreme axis"]
correct = 2
explanation = "A positive QRS in lead I with a negative QRS in aVF places the axis between 0° and -90°. A negative lead II confirms left axis deviation."
"#;
