//! Configuration for identifier validation
//!
//! Loaded from TOML with the following structure (all keys optional):
//!
//! ```toml
//! [personal_id]
//! century = "standard"          # or { pivot = 60 } / { fixed = 1900 }
//!
//! [business_registration]
//! fill_char = "0"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::personal_id::CenturyWindow;

/// Century bases accepted for `century = { fixed = ... }`
const FIXED_CENTURY_RANGE: std::ops::RangeInclusive<i32> = 1800..=2100;

/// Errors that can occur when loading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("TOML parse error: {0}")]
    Parse(String),

    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// Validation settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentifierConfig {
    pub personal_id: PersonalIdConfig,
    pub business_registration: BusinessRegistrationConfig,
}

/// Personal identification number settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalIdConfig {
    /// Century placement of two-digit birth years
    pub century: CenturyWindow,
}

/// Business registration number settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessRegistrationConfig {
    /// Padding used when justifying short numbers
    pub fill_char: char,
}

impl Default for BusinessRegistrationConfig {
    fn default() -> Self {
        Self { fill_char: '0' }
    }
}

impl IdentifierConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if !self.business_registration.fill_char.is_ascii_digit() {
            return Err(ConfigError::Invalid(format!(
                "business_registration.fill_char must be a digit, got '{}'",
                self.business_registration.fill_char
            )));
        }
        match self.personal_id.century {
            CenturyWindow::Pivot(pivot) if pivot > 99 => Err(ConfigError::Invalid(format!(
                "personal_id.century pivot must be 0-99, got {pivot}"
            ))),
            CenturyWindow::Fixed(base)
                if base % 100 != 0 || !FIXED_CENTURY_RANGE.contains(&base) =>
            {
                Err(ConfigError::Invalid(format!(
                    "personal_id.century fixed base must be a multiple of 100 in {}..={}, got {base}",
                    FIXED_CENTURY_RANGE.start(),
                    FIXED_CENTURY_RANGE.end()
                )))
            }
            _ => Ok(()),
        }
    }
}
