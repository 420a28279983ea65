//! Configuration options for the refresh-odds engines.
//!
//! The expected-draws DP truncates its state space and the reachability DP
//! bounds the copy count it tracks. Both bounds are set here.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for the expected-draws and reachability engines.
///
/// Inputs above a ceiling are clamped to it, not modelled exactly.
///
/// # Example
/// ```
/// use shop_odds::odds::OddsConfig;
///
/// let config = OddsConfig::default();
/// assert_eq!(config.max_pool_remaining, 30);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OddsConfig {
    /// Ceiling for copies of the target item left in the pool.
    ///
    /// No cost tier ships more than 30 copies of one item.
    #[serde(default = "default_max_pool_remaining")]
    pub max_pool_remaining: usize,

    /// Ceiling for undrawn items of the whole cost tier.
    #[serde(default = "default_max_tier_remaining")]
    pub max_tier_remaining: usize,

    /// Highest copy count the reachability DP tracks.
    ///
    /// Three-of-a-kind upgrades top out at 9 copies.
    #[serde(default = "default_max_copies")]
    pub max_copies: usize,

    /// Draw slots exposed by one refresh.
    #[serde(default = "default_slots")]
    pub slots_per_refresh: u32,

    /// Value standing in for "never" inside the expectation table.
    #[serde(default = "default_unreachable")]
    pub unreachable: f64,

    /// Below this chance of progress a state is treated as stuck.
    #[serde(default = "default_min_progress")]
    pub min_progress_probability: f64,
}

fn default_max_pool_remaining() -> usize {
    30
}

fn default_max_tier_remaining() -> usize {
    500
}

fn default_max_copies() -> usize {
    9
}

fn default_slots() -> u32 {
    5
}

fn default_unreachable() -> f64 {
    1e9
}

fn default_min_progress() -> f64 {
    1e-10
}

impl Default for OddsConfig {
    fn default() -> Self {
        Self {
            max_pool_remaining: default_max_pool_remaining(),
            max_tier_remaining: default_max_tier_remaining(),
            max_copies: default_max_copies(),
            slots_per_refresh: default_slots(),
            unreachable: default_unreachable(),
            min_progress_probability: default_min_progress(),
        }
    }
}

impl OddsConfig {
    /// Create a new OddsConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Small ceilings for quick interactive estimates and tests.
    ///
    /// Still exact for pools of up to 10 copies in tiers of up to 150 items.
    pub fn exact_small() -> Self {
        Self {
            max_pool_remaining: 10,
            max_tier_remaining: 150,
            ..Default::default()
        }
    }

    /// Builder method: set the item pool ceiling.
    pub fn with_max_pool_remaining(mut self, ceiling: usize) -> Self {
        self.max_pool_remaining = ceiling;
        self
    }

    /// Builder method: set the tier pool ceiling.
    pub fn with_max_tier_remaining(mut self, ceiling: usize) -> Self {
        self.max_tier_remaining = ceiling;
        self
    }

    /// Builder method: set the tracked copy ceiling.
    pub fn with_max_copies(mut self, ceiling: usize) -> Self {
        self.max_copies = ceiling;
        self
    }

    /// Builder method: set slots per refresh.
    pub fn with_slots(mut self, slots: u32) -> Self {
        self.slots_per_refresh = slots;
        self
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_json_str(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_pool_remaining == 0 {
            return Err(ConfigError::InvalidCeiling("max_pool_remaining", self.max_pool_remaining));
        }
        if self.max_tier_remaining < self.max_pool_remaining {
            return Err(ConfigError::InvalidCeiling("max_tier_remaining", self.max_tier_remaining));
        }
        if self.max_copies == 0 {
            return Err(ConfigError::InvalidCeiling("max_copies", self.max_copies));
        }
        if self.slots_per_refresh == 0 || self.slots_per_refresh > 16 {
            return Err(ConfigError::InvalidSlots(self.slots_per_refresh));
        }
        if !(self.unreachable.is_finite() && self.unreachable > 0.0) {
            return Err(ConfigError::InvalidSentinel(self.unreachable));
        }
        if !(0.0..1.0).contains(&self.min_progress_probability) {
            return Err(ConfigError::InvalidValue {
                field: "min_progress_probability".to_string(),
                message: "must lie in [0, 1)".to_string(),
            });
        }
        Ok(())
    }
}

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// A state-space ceiling is zero or inconsistent with another ceiling.
    InvalidCeiling(&'static str, usize),
    /// Slots per refresh is zero or unreasonably large.
    InvalidSlots(u32),
    /// The unreachable sentinel is not a positive finite number.
    InvalidSentinel(f64),
    /// Reading a config or table file failed.
    IoError(String),
    /// A config or table file is not valid JSON for its type.
    ParseError(String),
    /// A field holds a value outside its domain.
    InvalidValue {
        /// Offending field.
        field: String,
        /// What is wrong with it.
        message: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidCeiling(name, val) => {
                write!(f, "Ceiling {} = {} is not usable", name, val)
            }
            ConfigError::InvalidSlots(val) => {
                write!(f, "Slots per refresh {} is out of range [1, 16]", val)
            }
            ConfigError::InvalidSentinel(val) => {
                write!(f, "Unreachable sentinel {} must be positive and finite", val)
            }
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::InvalidValue { field, message } => {
                write!(f, "Invalid value for '{}': {}", field, message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OddsConfig::default();

        assert_eq!(config.max_pool_remaining, 30);
        assert_eq!(config.max_tier_remaining, 500);
        assert_eq!(config.max_copies, 9);
        assert_eq!(config.slots_per_refresh, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = OddsConfig::new()
            .with_max_pool_remaining(12)
            .with_max_tier_remaining(200)
            .with_max_copies(6)
            .with_slots(4);

        assert_eq!(config.max_pool_remaining, 12);
        assert_eq!(config.max_tier_remaining, 200);
        assert_eq!(config.max_copies, 6);
        assert_eq!(config.slots_per_refresh, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_fails() {
        assert!(OddsConfig::new().with_max_pool_remaining(0).validate().is_err());
        assert!(OddsConfig::new().with_slots(0).validate().is_err());
        assert!(OddsConfig::new()
            .with_max_pool_remaining(40)
            .with_max_tier_remaining(20)
            .validate()
            .is_err());

        let mut config = OddsConfig::default();
        config.unreachable = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_minimal_json_uses_defaults() {
        let config = OddsConfig::from_json_str(r#"{ "max_copies": 6 }"#).unwrap();

        assert_eq!(config.max_copies, 6);
        assert_eq!(config.max_pool_remaining, 30);
        assert_eq!(config.slots_per_refresh, 5);
    }

    #[test]
    fn test_invalid_json_rejected() {
        let err = OddsConfig::from_json_str(r#"{ "slots_per_refresh": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSlots(0)));

        let err = OddsConfig::from_json_str("not json").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
