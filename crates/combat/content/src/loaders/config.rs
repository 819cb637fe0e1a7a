//! Combat configuration loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// The tuning shipped with the crate (`data/combat.toml`).
    pub fn builtin() -> LoadResult<CombatConfig> {
        Self::parse(include_str!("../../data/combat.toml"))
    }

    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`CombatConfig::default`].
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if !(config.max_action.is_finite() && config.max_action > 0.0) {
            anyhow::bail!("max_action must be positive, got {}", config.max_action);
        }
        if !(config.base_rate.is_finite() && config.base_rate >= 0.0) {
            anyhow::bail!("base_rate must not be negative, got {}", config.base_rate);
        }
        Ok(config)
    }
}
