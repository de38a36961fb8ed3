//! # Franco Configuration
//!
//! File and environment configuration for running the rules outside the
//! host, e.g. from `franco-eval`.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     FRANCO_SLOT_THRESHOLD=1.5                                          │
//! │     FRANCO_CHF_THRESHOLD=400                                           │
//! │     FRANCO_FORCE_ENFORCEMENT=true                                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/cartons/franco.toml (Linux)                              │
//! │     ~/Library/Application Support/ch.franco.cartons/franco.toml (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     no thresholds, role "wholesaler", no forced enforcement            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # franco.toml
//! [thresholds]
//! slot = 1.5
//! chf = 400.0
//!
//! [enforcement]
//! role = "wholesaler"
//! force = true
//! ```

use std::path::PathBuf;

use franco_core::validation::{validate_chf_threshold, validate_role, validate_slot_threshold};
use franco_core::{CoreError, Money, ValidationError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::enforcement::{EnforcementPolicy, WHOLESALER_ROLE};
use crate::error::{HostError, HostResult};
use crate::host::SettingsStore;
use crate::settings::{OPTION_CHF_THRESHOLD, OPTION_SLOT_THRESHOLD};

pub const ENV_SLOT_THRESHOLD: &str = "FRANCO_SLOT_THRESHOLD";
pub const ENV_CHF_THRESHOLD: &str = "FRANCO_CHF_THRESHOLD";
pub const ENV_FORCE_ENFORCEMENT: &str = "FRANCO_FORCE_ENFORCEMENT";

// =============================================================================
// Sections
// =============================================================================

/// Threshold values; 0 means "not configured".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSettings {
    /// Slots required for free shipping.
    #[serde(default)]
    pub slot: f64,

    /// CHF total required for free shipping.
    #[serde(default)]
    pub chf: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnforcementSettings {
    /// Role the rules are enforced for.
    #[serde(default = "default_role")]
    pub role: String,

    /// Forces enforcement on or off regardless of the visitor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,
}

fn default_role() -> String {
    WHOLESALER_ROLE.to_string()
}

impl Default for EnforcementSettings {
    fn default() -> Self {
        EnforcementSettings {
            role: default_role(),
            force: None,
        }
    }
}

// =============================================================================
// Franco Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrancoConfig {
    #[serde(default)]
    pub thresholds: ThresholdSettings,

    #[serde(default)]
    pub enforcement: EnforcementSettings,
}

impl FrancoConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (franco.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> HostResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading Franco config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load Franco config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> HostResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| HostError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Franco config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> HostResult<()> {
        validate_slot_threshold(self.thresholds.slot).map_err(CoreError::from)?;

        if !self.thresholds.chf.is_finite() {
            return Err(CoreError::from(ValidationError::NotFinite {
                field: "chf threshold".to_string(),
            })
            .into());
        }
        validate_chf_threshold(self.chf_threshold()).map_err(CoreError::from)?;

        validate_role(&self.enforcement.role).map_err(CoreError::from)?;

        Ok(())
    }

    /// Applies overrides from a variable lookup, normally the process
    /// environment. Unparsable values are ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_SLOT_THRESHOLD) {
            match raw.trim().parse::<f64>() {
                Ok(slot) => {
                    debug!(slot, "Overriding slot threshold from environment");
                    self.thresholds.slot = slot;
                }
                Err(_) => warn!(value = %raw, "Ignoring invalid {}", ENV_SLOT_THRESHOLD),
            }
        }

        if let Some(raw) = lookup(ENV_CHF_THRESHOLD) {
            match raw.trim().parse::<f64>() {
                Ok(chf) => {
                    debug!(chf, "Overriding CHF threshold from environment");
                    self.thresholds.chf = chf;
                }
                Err(_) => warn!(value = %raw, "Ignoring invalid {}", ENV_CHF_THRESHOLD),
            }
        }

        if let Some(raw) = lookup(ENV_FORCE_ENFORCEMENT) {
            match raw.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => self.enforcement.force = Some(true),
                "false" | "0" | "no" | "off" => self.enforcement.force = Some(false),
                _ => warn!(value = %raw, "Ignoring invalid {}", ENV_FORCE_ENFORCEMENT),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("ch", "franco", "cartons")
            .map(|dirs| dirs.config_dir().join("franco.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn chf_threshold(&self) -> Money {
        Money::from_decimal(self.thresholds.chf)
    }

    /// Enforcement policy described by the `[enforcement]` section.
    pub fn policy(&self) -> EnforcementPolicy {
        EnforcementPolicy {
            forced: self.enforcement.force,
            role: self.enforcement.role.trim().to_string(),
        }
    }
}

/// Lets a config file stand in for the host option table.
impl SettingsStore for FrancoConfig {
    fn option(&self, key: &str) -> Option<String> {
        match key {
            OPTION_SLOT_THRESHOLD => Some(self.thresholds.slot.to_string()),
            OPTION_CHF_THRESHOLD => Some(self.thresholds.chf.to_string()),
            _ => None,
        }
    }
}
