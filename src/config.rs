//! Analysis configuration.
//!
//! All knobs have CHIP-8 defaults; a JSON file may override any subset of
//! them.

use serde::{Serialize, Deserialize};
use std::path::Path;
use thiserror::Error;

/// Address where CHIP-8 interpreters load programs.
pub const DEFAULT_LOAD_ADDRESS: u16 = 0x200;

/// Size of the CHIP-8 address space.
pub const ADDRESS_SPACE: usize = 0x1000;

/// Tunables for exploration and rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Where the image bytes are placed in memory.
    pub load_address: u16,
    /// Where execution starts.
    pub entry_point: u16,
    /// Ceiling on instructions replayed across all exploration branches.
    pub max_explore_steps: usize,
    /// Ceiling on renderer iterations per subroutine.
    pub max_render_steps: usize,
    /// Deepest simulated call stack (the CHIP-8 stack has 16 slots).
    pub max_call_depth: usize,
    /// One level of indentation in structured output.
    pub indent: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            load_address: DEFAULT_LOAD_ADDRESS,
            entry_point: DEFAULT_LOAD_ADDRESS,
            max_explore_steps: 1_000_000,
            max_render_steps: 10_000,
            max_call_depth: 16,
            indent: "    ".to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Load a configuration from a JSON file and validate it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_json(&text)
    }

    /// Parse a configuration from JSON text and validate it.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.load_address % 2 != 0 {
            return Err(ConfigError::Invalid(format!(
                "load address 0x{:x} is not even", self.load_address
            )));
        }
        if self.entry_point % 2 != 0 {
            return Err(ConfigError::Invalid(format!(
                "entry point 0x{:x} is not even", self.entry_point
            )));
        }
        if self.entry_point < self.load_address {
            return Err(ConfigError::Invalid(format!(
                "entry point 0x{:x} is below the load address 0x{:x}",
                self.entry_point, self.load_address
            )));
        }
        if usize::from(self.load_address) >= ADDRESS_SPACE {
            return Err(ConfigError::Invalid(format!(
                "load address 0x{:x} is outside the address space", self.load_address
            )));
        }
        if self.max_explore_steps == 0 || self.max_render_steps == 0 {
            return Err(ConfigError::Invalid("iteration ceilings must be non-zero".into()));
        }
        Ok(())
    }
}

/// Errors that can occur while loading a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("invalid JSON: {0}")]
    Parse(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.entry_point, 0x200);
        assert_eq!(config.indent, "    ");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AnalysisConfig::from_json(r#"{ "max_render_steps": 50 }"#).unwrap();
        assert_eq!(config.max_render_steps, 50);
        assert_eq!(config.load_address, 0x200);
        assert_eq!(config.max_call_depth, 16);
    }

    #[test]
    fn test_invalid_entry_point() {
        let err = AnalysisConfig::from_json(r#"{ "entry_point": 256 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = AnalysisConfig::from_json(r#"{ "entry_point": 515 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_zero_ceiling_rejected() {
        let err = AnalysisConfig::from_json(r#"{ "max_explore_steps": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = AnalysisConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
