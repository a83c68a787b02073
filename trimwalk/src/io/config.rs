//! Trimwalk configuration stored in `trimwalk.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::io::document::DocumentFormat;

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "trimwalk.toml";

/// Trimwalk configuration (TOML).
///
/// This file is intended to be edited by humans. Missing fields default to
/// the values below; CLI flags override whatever the file says.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TrimwalkConfig {
    /// Pretty-print JSON output instead of emitting a single line.
    pub pretty_json: bool,

    /// Format assumed when the input has no recognizable extension (stdin).
    pub default_format: DocumentFormat,

    /// Refuse inputs larger than this many bytes.
    pub max_document_bytes: u64,
}

impl Default for TrimwalkConfig {
    fn default() -> Self {
        Self {
            pretty_json: true,
            default_format: DocumentFormat::Json,
            max_document_bytes: 16 * 1024 * 1024,
        }
    }
}

impl TrimwalkConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_document_bytes == 0 {
            return Err(anyhow!("max_document_bytes must be > 0"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `TrimwalkConfig::default()`.
pub fn load_config(path: &Path) -> Result<TrimwalkConfig> {
    if !path.exists() {
        let cfg = TrimwalkConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: TrimwalkConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &TrimwalkConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    crate::io::write_atomic(path, &buf)
}
