// Copyright 2026 Daniel Pelikan
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

//! Configuration module.
//!
//! Handles loading and saving settings.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::bluetooth::ble_constants::buzz;
use crate::psychophysics::DeviceProfile;

const APP_DIR: &str = "neosensory-buzz";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Device discovery and layout.
    pub device: DeviceConfig,

    /// Illusion demo settings.
    pub illusion: IllusionConfig,

    /// Logging settings.
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Substring of the advertised device name to connect to.
    pub name_filter: String,

    /// Give up scanning after this many seconds.
    pub scan_timeout_secs: u64,

    pub num_motors: usize,
    pub min_intensity: u8,
    pub max_intensity: u8,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name_filter: buzz::NAME_FILTER.to_string(),
            scan_timeout_secs: 10,
            num_motors: buzz::NUM_MOTORS,
            min_intensity: buzz::MIN_INTENSITY,
            max_intensity: buzz::MAX_INTENSITY,
        }
    }
}

impl DeviceConfig {
    pub fn profile(&self) -> DeviceProfile {
        DeviceProfile {
            num_motors: self.num_motors,
            min_intensity: self.min_intensity,
            max_intensity: self.max_intensity,
        }
    }

    pub fn scan_timeout(&self) -> Duration {
        Duration::from_secs(self.scan_timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IllusionConfig {
    /// Normalized intensity on [0, 1].
    pub intensity: f64,

    /// Location advance per frame; wraps at 1.
    pub location_step: f64,

    /// Delay between frames in milliseconds.
    pub frame_interval_ms: u64,
}

impl Default for IllusionConfig {
    fn default() -> Self {
        Self {
            intensity: 0.5,
            location_step: 0.01,
            frame_interval_ms: 100,
        }
    }
}

impl IllusionConfig {
    /// Frame delay, never zero.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Default location of the config file.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.toml")
    }

    /// Load configuration from the default file or create it.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load configuration from `path`, writing defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
