use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::constants::*;
use crate::state::{Animation, Persistence};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid color {0:?}: expected six hex digits")]
    InvalidColor(String),

    #[error("failed to read defaults file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("default {field} duration must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    #[error("failed to parse defaults: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Text color without alpha. Opacity is tracked per slot and added at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb { r: 0xFF, g: 0xFF, b: 0xFF };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::BLACK
    }
}

impl FromStr for Rgb {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ConfigError::InvalidColor(s.to_string()))
        };
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Per-message settings. Copied into the slot at creation, so editing a
/// template afterwards never reaches messages already created from it.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageConfig {
    pub entrance: Animation,
    pub exit: Animation,
    pub entrance_duration: f32, // seconds, anything not > 0 means instant
    pub hold_duration: f32,     // seconds, only used in timer mode
    pub exit_duration: f32,     // seconds, anything not > 0 means instant
    pub color: Rgb,
    pub persistence: Persistence,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            entrance: Animation::Instant,
            exit: Animation::Instant,
            entrance_duration: 1.0,
            hold_duration: 2.0,
            exit_duration: 1.0,
            color: Rgb::BLACK,
            persistence: Persistence::Transient,
        }
    }
}

/// Process-wide default timings used by presets when a duration is omitted.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Defaults {
    pub entrance: f32,
    pub hold: f32,
    pub exit: f32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            entrance: DEFAULT_ENTRANCE_DURATION,
            hold: DEFAULT_HOLD_DURATION,
            exit: DEFAULT_EXIT_DURATION,
        }
    }
}

impl Defaults {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let defaults: Self = toml::from_str(s)?;
        defaults.validate()?;
        Ok(defaults)
    }

    /// TOML accepts `nan` and `inf`; neither makes sense as a duration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("entrance", self.entrance), ("hold", self.hold), ("exit", self.exit)] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}
