//! CLI configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use ecgiga_core::Sex;

/// Top-level ecgiga configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EcgigaConfig {
    /// Default log level for ecgiga targets (overridden by `RUST_LOG`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Sex used by the QTc calculator when `--sex` is not given.
    #[serde(default)]
    pub default_sex: Sex,
    /// Extra question-bank directories merged into the registry.
    #[serde(default)]
    pub bank_dirs: Vec<PathBuf>,
    /// Print Fridericia QTc and heart rate after the Bazett result.
    #[serde(default = "default_true")]
    pub show_fridericia: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for EcgigaConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            default_sex: Sex::default(),
            bank_dirs: Vec::new(),
            show_fridericia: true,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `ecgiga.toml` in the current directory
/// 2. `~/.config/ecgiga/config.toml`
///
/// Relative `bank_dirs` are resolved against the directory of the config
/// file. `ECGIGA_DEFAULT_SEX` overrides `default_sex`.
pub fn load_config_from(path: Option<&Path>) -> Result<EcgigaConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("ecgiga.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<EcgigaConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => EcgigaConfig::default(),
    };

    if let Ok(sex) = std::env::var("ECGIGA_DEFAULT_SEX") {
        config.default_sex = sex
            .parse()
            .map_err(|e: String| anyhow::anyhow!("ECGIGA_DEFAULT_SEX: {e}"))?;
    }

    let base = config_path
        .as_deref()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_default();
    config.bank_dirs = config
        .bank_dirs
        .iter()
        .map(|dir| {
            let resolved = PathBuf::from(resolve_env_vars(&dir.to_string_lossy()));
            if resolved.is_relative() {
                base.join(resolved)
            } else {
                resolved
            }
        })
        .collect();

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("ecgiga"))
}
