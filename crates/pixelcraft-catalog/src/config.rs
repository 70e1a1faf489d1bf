//! Catalog engine configuration.
//!
//! Progression curve parameters, balance thresholds and validation options.
//! Configuration is parsed from TOML text supplied by the host; this crate
//! never touches the file system.

use pixelcraft_common::ConfigError;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::balance::BalanceThresholds;
use crate::progression::{ProgressionConfig, ProgressionCurve};
use crate::validation::ValidationOptions;

/// Engine configuration. Every section falls back to defaults when omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// XP curve parameters.
    pub progression: ProgressionConfig,
    /// Balance report thresholds.
    pub balance: BalanceThresholds,
    /// Optional validation checks.
    pub validation: ValidationOptions,
}

impl CatalogConfig {
    /// Parse and check a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| {
            warn!("Failed to parse catalog config: {e}");
            ConfigError::Parse(e.to_string())
        })?;

        if let Err(err) = config.check() {
            warn!("Rejected catalog config: {err}");
            return Err(err);
        }

        info!(
            "Loaded catalog config (q={}, l={}, max_level={}, lint_ids={})",
            config.progression.quadratic_multiplier,
            config.progression.linear_multiplier,
            config.progression.max_level,
            config.validation.lint_ids
        );
        Ok(config)
    }

    /// Render as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Check every section.
    pub fn check(&self) -> Result<(), ConfigError> {
        self.progression.validate()?;
        self.balance.validate()
    }

    /// Build the progression curve described by this config.
    pub fn curve(&self) -> Result<ProgressionCurve, ConfigError> {
        ProgressionCurve::new(self.progression)
    }
}
