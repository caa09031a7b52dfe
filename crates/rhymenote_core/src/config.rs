//! Engine configuration.
//!
//! # Responsibility
//! - Hold tunables shared by analysis and authoring.
//! - Normalize out-of-range values instead of failing on them.
//!
//! # Invariants
//! - `vocalize_batch_size` is always within `1..=MAX_VOCALIZE_BATCH_SIZE`
//!   after `normalized()`.
//! - Every palette entry is a valid `#rgb`/`#rrggbb` color after `validate()`.

use crate::logging::{default_log_level, normalize_level, LoggingError};
use crate::scheme::palette::DEFAULT_PALETTE;
use crate::scheme::shades::{ColorParseError, Rgb};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_VOCALIZE_BATCH_SIZE: usize = 4;
pub const MAX_VOCALIZE_BATCH_SIZE: usize = 16;

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyPalette,
    InvalidPaletteColor(ColorParseError),
    InvalidLogLevel(LoggingError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPalette => write!(f, "palette must contain at least one color"),
            Self::InvalidPaletteColor(err) => write!(f, "palette color is invalid: {err}"),
            Self::InvalidLogLevel(err) => write!(f, "log level is invalid: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EmptyPalette => None,
            Self::InvalidPaletteColor(err) => Some(err),
            Self::InvalidLogLevel(err) => Some(err),
        }
    }
}

impl From<ColorParseError> for ConfigError {
    fn from(value: ColorParseError) -> Self {
        Self::InvalidPaletteColor(value)
    }
}

impl From<LoggingError> for ConfigError {
    fn from(value: LoggingError) -> Self {
        Self::InvalidLogLevel(value)
    }
}

/// Tunables for `RhymeEngine` and `VerseService`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Words vocalized concurrently per batch.
    pub vocalize_batch_size: usize,
    /// Base colors for new schemes, picked by current scheme count.
    pub palette: Vec<String>,
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            vocalize_batch_size: DEFAULT_VOCALIZE_BATCH_SIZE,
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            log_level: default_log_level().to_string(),
        }
    }
}

impl EngineConfig {
    /// Clamps numeric fields into their supported range.
    pub fn normalized(mut self) -> Self {
        self.vocalize_batch_size = self
            .vocalize_batch_size
            .clamp(1, MAX_VOCALIZE_BATCH_SIZE);
        self
    }

    /// Checks palette colors and log level.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        for color in &self.palette {
            Rgb::parse_hex(color)?;
        }
        normalize_level(&self.log_level)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, EngineConfig, MAX_VOCALIZE_BATCH_SIZE};
    use crate::scheme::shades::ColorParseError;
    use std::error::Error;

    #[test]
    fn default_config_is_valid() {
        EngineConfig::default()
            .validate()
            .expect("default config should validate");
    }

    #[test]
    fn batch_size_is_clamped() {
        let zero = EngineConfig {
            vocalize_batch_size: 0,
            ..EngineConfig::default()
        };
        assert_eq!(zero.normalized().vocalize_batch_size, 1);

        let huge = EngineConfig {
            vocalize_batch_size: 1_000,
            ..EngineConfig::default()
        };
        assert_eq!(huge.normalized().vocalize_batch_size, MAX_VOCALIZE_BATCH_SIZE);
    }

    #[test]
    fn rejects_bad_palette_entries() {
        let config = EngineConfig {
            palette: vec!["#112233".to_string(), "red".to_string()],
            ..EngineConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidPaletteColor(ColorParseError::MissingHash("red".to_string()))
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn rejects_unknown_log_level() {
        let config = EngineConfig {
            log_level: "loud".to_string(),
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"vocalize_batch_size": 2}"#).expect("partial config");
        assert_eq!(config.vocalize_batch_size, 2);
        assert_eq!(config.palette, EngineConfig::default().palette);
    }
}
