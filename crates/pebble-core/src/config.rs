//! Game configuration with validated aspect ratios

use crate::error::{PebbleError, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Tolerance for accepting a numeric aspect ratio as one of the known three
const RATIO_TOLERANCE: f64 = 1e-4;

/// The closed set of supported viewport aspect ratios.
///
/// Only the three enumerated values are valid; anything else is a hard
/// validation failure at the load boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AspectRatio {
    #[serde(rename = "16:9")]
    Wide,
    #[serde(rename = "4:3")]
    Standard,
    #[serde(rename = "21:9")]
    UltraWide,
}

impl Default for AspectRatio {
    fn default() -> Self {
        AspectRatio::Wide
    }
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 3] =
        [AspectRatio::Wide, AspectRatio::Standard, AspectRatio::UltraWide];

    /// The width/height ratio as a number
    pub fn value(&self) -> f64 {
        match self {
            AspectRatio::Wide => 16.0 / 9.0,
            AspectRatio::Standard => 4.0 / 3.0,
            AspectRatio::UltraWide => 21.0 / 9.0,
        }
    }

    /// The canonical "W:H" string
    pub fn label(&self) -> &'static str {
        match self {
            AspectRatio::Wide => "16:9",
            AspectRatio::Standard => "4:3",
            AspectRatio::UltraWide => "21:9",
        }
    }

    /// Parse an exact "W:H" string
    pub fn parse(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.label() == s)
            .ok_or_else(|| {
                PebbleError::ConfigValidation(format!(
                    "invalid aspect ratio {s:?}: must be one of 16:9, 4:3, 21:9"
                ))
            })
    }

    /// Accept a numeric ratio if it matches one of the three within 1e-4
    pub fn from_numeric(value: f64) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|r| (r.value() - value).abs() < RATIO_TOLERANCE)
            .ok_or_else(|| {
                PebbleError::ConfigValidation(format!(
                    "invalid aspect ratio {value}: must match 16:9, 4:3 or 21:9"
                ))
            })
    }
}

impl<'de> Deserialize<'de> for AspectRatio {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(f64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(s) => AspectRatio::parse(&s).map_err(D::Error::custom),
            Raw::Number(n) => AspectRatio::from_numeric(n).map_err(D::Error::custom),
        }
    }
}

/// Top-level game configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    #[serde(default, rename = "aspectRatio")]
    pub aspect_ratio: AspectRatio,
    #[serde(default, rename = "debugMode")]
    pub debug_mode: bool,
}

impl GameConfig {
    /// Parse a game config from a JSON string. All-or-nothing: a failure
    /// leaves the caller's running config untouched.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)
            .map_err(|e| PebbleError::ConfigValidation(e.to_string()))?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
