//! Evaluator configuration: division scale, rounding and nesting limit.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Fractional digits kept by division when nothing else is configured
pub const DEFAULT_SCALE: u32 = 5;

/// Maximum allowed nesting depth to prevent stack overflow
pub const MAX_NESTING_DEPTH: usize = 100;

/// How a division result is rounded to the configured scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Away from zero
    Up,
    /// Towards zero (truncation)
    Down,
    /// Towards positive infinity
    Ceiling,
    /// Towards negative infinity
    Floor,
    /// To nearest, ties away from zero
    #[default]
    HalfUp,
    /// To nearest, ties towards zero
    HalfDown,
    /// To nearest, ties to the even neighbour
    HalfEven,
}

impl RoundingMode {
    /// All modes, in declaration order
    pub const ALL: [RoundingMode; 7] = [
        RoundingMode::Up,
        RoundingMode::Down,
        RoundingMode::Ceiling,
        RoundingMode::Floor,
        RoundingMode::HalfUp,
        RoundingMode::HalfDown,
        RoundingMode::HalfEven,
    ];

    /// The snake_case name used in config files and on the command line
    pub fn name(self) -> &'static str {
        match self {
            RoundingMode::Up => "up",
            RoundingMode::Down => "down",
            RoundingMode::Ceiling => "ceiling",
            RoundingMode::Floor => "floor",
            RoundingMode::HalfUp => "half_up",
            RoundingMode::HalfDown => "half_down",
            RoundingMode::HalfEven => "half_even",
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RoundingMode {
    type Err = String;

    /// Accepts `half_up`, `half-up` and `HALF_UP` alike
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        RoundingMode::ALL
            .into_iter()
            .find(|mode| mode.name() == normalized)
            .ok_or_else(|| {
                let names: Vec<&str> = RoundingMode::ALL.iter().map(|m| m.name()).collect();
                format!("unknown rounding mode '{s}', expected one of: {}", names.join(", "))
            })
    }
}

/// Settings shared by every evaluation of one [`Evaluator`](crate::Evaluator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvaluatorConfig {
    /// Number of fractional digits retained by division
    pub scale: u32,
    /// Rounding applied when a division result is cut to `scale`
    pub rounding: RoundingMode,
    /// Deepest parenthesis nesting accepted before evaluation is refused
    pub max_depth: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            rounding: RoundingMode::default(),
            max_depth: MAX_NESTING_DEPTH,
        }
    }
}

impl EvaluatorConfig {
    /// Config with the given division settings and the default nesting limit
    pub fn new(scale: u32, rounding: RoundingMode) -> Self {
        Self {
            scale,
            rounding,
            ..Self::default()
        }
    }

    /// Parse a config from TOML text; missing keys keep their defaults
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }
}
