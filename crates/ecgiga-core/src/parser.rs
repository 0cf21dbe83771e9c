//! TOML question-bank parser.
//!
//! Loads question banks from TOML files and directories, and validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Question, QuestionBank};

/// Intermediate TOML structure for parsing question-bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    topic: String,
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    prompt: String,
    options: Vec<String>,
    correct: usize,
    #[serde(default)]
    explanation: String,
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank file: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a TOML string into a `QuestionBank` (used for embedded assets and tests).
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| Question {
            prompt: q.prompt.trim().to_string(),
            options: q.options,
            correct_option_index: q.correct,
            explanation: q.explanation.trim().to_string(),
        })
        .collect();

    let title = parsed
        .bank
        .title
        .unwrap_or_else(|| parsed.bank.topic.clone());

    QuestionBank::new(parsed.bank.topic, title, questions)
        .with_context(|| format!("invalid question bank: {}", source_path.display()))
}

/// Recursively load all `.toml` question-bank files from a directory.
///
/// Files that fail to parse are skipped with a warning so one broken bank
/// does not hide the others.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}

/// A warning from question-bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// 1-based question number (if applicable).
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate a question bank for authoring issues that the type invariants allow.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut seen_prompts = HashSet::new();

    for (i, q) in bank.questions().iter().enumerate() {
        let number = Some(i + 1);
        let mut warn = |message: String| {
            warnings.push(ValidationWarning {
                question: number,
                message,
            })
        };

        if q.prompt.trim().is_empty() {
            warn("prompt is empty".into());
        } else if !seen_prompts.insert(q.prompt.as_str()) {
            warn(format!("duplicate prompt: {}", q.prompt));
        }

        let mut seen_options = HashSet::new();
        for opt in &q.options {
            if opt.trim().is_empty() {
                warn("contains an empty option".into());
            } else if !seen_options.insert(opt.trim()) {
                warn(format!("duplicate option: {opt}"));
            }
        }

        if q.explanation.trim().is_empty() {
            warn("explanation is empty".into());
        }
    }

    warnings
}
