//! Line configuration stored in `assembly.toml`, merged with CLI overrides.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "assembly.toml";

/// Largest accepted `time_scale`. A large item then sleeps for minutes.
pub const MAX_TIME_SCALE: f64 = 1_000.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LineConfig {
    /// Number of employees draining the queue.
    pub workers: usize,

    /// Items created for each item kind.
    pub items_per_kind: usize,

    /// Multiplier applied to every item's processing cost.
    pub time_scale: f64,

    /// Shuffle seed. Random when unset.
    pub seed: Option<u64>,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            workers: 5,
            items_per_kind: 10,
            time_scale: 1.0,
            seed: None,
        }
    }
}

impl LineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(anyhow!("workers must be > 0"));
        }
        if !self.time_scale.is_finite()
            || self.time_scale <= 0.0
            || self.time_scale > MAX_TIME_SCALE
        {
            return Err(anyhow!(
                "time_scale must be a finite number in (0, {MAX_TIME_SCALE}], got {}",
                self.time_scale
            ));
        }
        Ok(())
    }
}

/// Values given on the command line; `None` keeps the configured value.
#[derive(Debug, Clone, Default)]
pub struct LineOverrides {
    pub workers: Option<usize>,
    pub items_per_kind: Option<usize>,
    pub time_scale: Option<f64>,
    pub seed: Option<u64>,
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `LineConfig::default()`.
pub fn load_config(path: &Path) -> Result<LineConfig> {
    if !path.exists() {
        return Ok(LineConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: LineConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Apply command-line overrides to the loaded config.
pub fn apply_overrides(mut base: LineConfig, overrides: &LineOverrides) -> Result<LineConfig> {
    if let Some(workers) = overrides.workers {
        base.workers = workers;
    }
    if let Some(items_per_kind) = overrides.items_per_kind {
        base.items_per_kind = items_per_kind;
    }
    if let Some(time_scale) = overrides.time_scale {
        base.time_scale = time_scale;
    }
    if overrides.seed.is_some() {
        base.seed = overrides.seed;
    }
    base.validate()?;
    Ok(base)
}
