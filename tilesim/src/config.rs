// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Engine and level settings
//!
//! Settings are plain serde structs with defaults for every field, so a
//! TOML file only needs to mention what it changes:
//!
//! ```
//! use tilesim::config::Settings;
//!
//! let settings = Settings::from_toml_str(r#"
//!     [engine]
//!     fixed_timestep = 0.01
//!
//!     [level]
//!     width = 32
//!     height = 24
//! "#).unwrap();
//! assert_eq!(settings.engine.fixed_timestep, 0.01);
//! assert_eq!(settings.engine.max_frame_time, 1.0);
//! assert_eq!(settings.level.octaves, 3);
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main-loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Length of one fixed tick in seconds
    pub fixed_timestep: f64,
    /// Longest real-time gap a single frame may account for, in seconds
    pub max_frame_time: f64,
    /// Weight of the previous value in the smoothed frame time
    pub frame_time_smoothing: f64,
    /// Window title passed to the display
    pub title: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            fixed_timestep: 1.0 / 60.0,
            max_frame_time: 1.0,
            frame_time_smoothing: 0.99,
            title: "tilesim".to_string(),
        }
    }
}

impl EngineConfig {
    /// Check that every value is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        seconds("engine.fixed_timestep", self.fixed_timestep)?;
        seconds("engine.max_frame_time", self.max_frame_time)?;
        if !(0.0..1.0).contains(&self.frame_time_smoothing) {
            return Err(ConfigError::Invalid {
                field: "engine.frame_time_smoothing",
                reason: format!("{} is outside [0, 1)", self.frame_time_smoothing),
            });
        }
        Ok(())
    }

    /// Fixed tick as a duration
    ///
    /// Only meaningful once [`validate`](EngineConfig::validate) has passed;
    /// an unrepresentable value yields `Duration::ZERO`.
    pub fn fixed_step(&self) -> Duration {
        Duration::try_from_secs_f64(self.fixed_timestep).unwrap_or(Duration::ZERO)
    }

    /// Frame clamp as a duration
    ///
    /// Only meaningful once [`validate`](EngineConfig::validate) has passed.
    pub fn max_frame(&self) -> Duration {
        Duration::try_from_secs_f64(self.max_frame_time).unwrap_or(Duration::ZERO)
    }
}

/// Terrain generation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Columns
    pub width: usize,
    /// Rows
    pub height: usize,
    /// Noise layers
    pub octaves: u32,
    /// Amplitude factor between consecutive layers
    pub persistence: f64,
    /// Sampling frequency of the first layer
    pub frequency: f64,
}

impl Default for LevelConfig {
    fn default() -> Self {
        LevelConfig {
            width: 64,
            height: 64,
            octaves: 3,
            persistence: 0.3,
            frequency: 0.05,
        }
    }
}

impl LevelConfig {
    /// Check that every value is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid {
                field: "level.width/height",
                reason: format!("level must not be empty ({}x{})", self.width, self.height),
            });
        }
        if self.octaves == 0 {
            return Err(ConfigError::Invalid {
                field: "level.octaves",
                reason: "at least one octave is required".to_string(),
            });
        }
        positive_finite("level.persistence", self.persistence)?;
        positive_finite("level.frequency", self.frequency)?;
        Ok(())
    }
}

/// All settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Main loop
    pub engine: EngineConfig,
    /// Terrain
    pub level: LevelConfig,
}

impl Settings {
    /// Parse and validate settings from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let settings: Settings =
            toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a TOML settings file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Serialize to TOML text
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Check every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.level.validate()
    }
}

/// A positive number of seconds that survives conversion to a nonzero `Duration`
fn seconds(field: &'static str, value: f64) -> Result<Duration, ConfigError> {
    positive_finite(field, value)?;
    match Duration::try_from_secs_f64(value) {
        Ok(duration) if !duration.is_zero() => Ok(duration),
        Ok(_) => Err(ConfigError::Invalid {
            field,
            reason: format!("{} s is shorter than one nanosecond", value),
        }),
        Err(err) => Err(ConfigError::Invalid {
            field,
            reason: format!("{} s is not a representable duration: {}", value, err),
        }),
    }
}

fn positive_finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("{} must be positive and finite", value),
        })
    }
}
