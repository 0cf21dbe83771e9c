//! Built-in course content, embedded at compile time as TOML assets.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{CaseVignette, ModulePayload, QuestionBank};
use crate::parser::parse_bank_str;

const MODULES_TOML: &str = include_str!("../content/modules.toml");
const CASES_TOML: &str = include_str!("../content/cases.toml");

const BANKS_TOML: &[(&str, &str)] = &[
    ("banks/basics.toml", include_str!("../content/banks/basics.toml")),
    ("banks/rhythms.toml", include_str!("../content/banks/rhythms.toml")),
    (
        "banks/hypertrophy.toml",
        include_str!("../content/banks/hypertrophy.toml"),
    ),
];

#[derive(Debug, Deserialize)]
struct ModulesFile {
    #[serde(default)]
    modules: Vec<ModulePayload>,
}

#[derive(Debug, Deserialize)]
struct CasesFile {
    #[serde(default)]
    cases: Vec<CaseVignette>,
}

/// Parse a modules TOML document (`[[modules]]` tables).
pub fn parse_modules_str(content: &str, source_path: &Path) -> Result<Vec<ModulePayload>> {
    let parsed: ModulesFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;
    Ok(parsed
        .modules
        .into_iter()
        .map(|mut m| {
            m.body = m.body.trim().to_string();
            m
        })
        .collect())
}

/// Parse a cases TOML document (`[[cases]]` tables).
pub fn parse_cases_str(content: &str, source_path: &Path) -> Result<Vec<CaseVignette>> {
    let parsed: CasesFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;
    Ok(parsed
        .cases
        .into_iter()
        .map(|mut c| {
            c.body = c.body.trim().to_string();
            c
        })
        .collect())
}

pub fn builtin_modules() -> Result<Vec<ModulePayload>> {
    parse_modules_str(MODULES_TOML, Path::new("content/modules.toml"))
}

pub fn builtin_cases() -> Result<Vec<CaseVignette>> {
    parse_cases_str(CASES_TOML, Path::new("content/cases.toml"))
}

pub fn builtin_banks() -> Result<Vec<QuestionBank>> {
    BANKS_TOML
        .iter()
        .map(|(name, content)| parse_bank_str(content, &Path::new("content").join(name)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::validate_bank;

    #[test]
    fn builtin_modules_parse() {
        let modules = builtin_modules().unwrap();
        let ids: Vec<_> = modules.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["basics", "rhythms", "ischemia", "hypertrophy", "blocks", "advanced"]
        );
        for m in &modules {
            assert!(!m.title.is_empty(), "{} has no title", m.id);
            assert!(m.body.starts_with('#'), "{} body is not trimmed", m.id);
        }
    }

    #[test]
    fn builtin_cases_parse() {
        let cases = builtin_cases().unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].id, "iam_inferior");
        assert!(cases[1].body.contains("V1-V6"));
    }

    #[test]
    fn builtin_banks_are_clean() {
        let banks = builtin_banks().unwrap();
        let sizes: Vec<_> = banks.iter().map(|b| (b.topic(), b.len())).collect();
        assert_eq!(
            sizes,
            vec![("basics", 2), ("rhythms", 1), ("hypertrophy", 1)]
        );
        for bank in &banks {
            let warnings = validate_bank(bank);
            assert!(warnings.is_empty(), "{}: {:?}", bank.topic(), warnings);
        }
    }

    #[test]
    fn modules_file_without_entries_is_empty() {
        let modules = parse_modules_str("", Path::new("empty.toml")).unwrap();
        assert!(modules.is_empty());
    }
}
