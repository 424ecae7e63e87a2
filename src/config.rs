//! # Configuration
//!
//! Optional TOML file at `<config_dir>/padview/config.toml`. Every section and
//! every key may be omitted; missing values fall back to the defaults below, and
//! a missing file means the defaults for everything.
//!
//! ```toml
//! [window]
//! title = "padview"
//! title_from_device = true
//!
//! [display]
//! mode = "sprites"
//! axis_divisor = 512
//! trigger_bar_offset = 64
//!
//! [input]
//! log_deadzone = 8000
//!
//! [assets]
//! directory = "assets"
//!
//! [theme]
//! background = [255, 255, 255]
//! foreground = [0, 0, 0]
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::controller::translator::DEFAULT_LOG_DEADZONE;

const CONFIG_DIR: &str = "padview";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub display: DisplayConfig,
    pub input: InputConfig,
    pub assets: AssetsConfig,
    pub theme: Theme,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Replace the title with the name the gamepad reports
    pub title_from_device: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "padview".to_string(),
            title_from_device: true,
        }
    }
}

/// How digital controls are drawn
#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Vector outlines, filled while pressed
    #[default]
    Outline,
    /// Normal/pressed image swap, requires the asset set
    Sprites,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub mode: DisplayMode,
    /// Raw axis value per pixel of stick or trigger travel
    pub axis_divisor: i32,
    /// Minimum visible height of a trigger bar in pixels
    pub trigger_bar_offset: i32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            mode: DisplayMode::Outline,
            axis_divisor: 512,
            trigger_bar_offset: 64,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    pub log_deadzone: i16,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            log_deadzone: DEFAULT_LOG_DEADZONE,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct AssetsConfig {
    pub directory: PathBuf,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("assets"),
        }
    }
}

/// Colors as RGB tuples for direct use with egui's Color32
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Theme {
    pub background: (u8, u8, u8),
    pub foreground: (u8, u8, u8),
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: (0xff, 0xff, 0xff),
            foreground: (0x00, 0x00, 0x00),
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Loads the user config, or defaults when there is none
    pub fn load_default_location() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            Some(path) => {
                info!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => {
                info!("No config directory on this platform, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("Reading config from {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.axis_divisor <= 0 {
            return Err(ConfigError::Invalid(format!(
                "display.axis_divisor must be positive, got {}",
                self.display.axis_divisor
            )));
        }
        if self.display.trigger_bar_offset < 0 {
            return Err(ConfigError::Invalid(format!(
                "display.trigger_bar_offset must not be negative, got {}",
                self.display.trigger_bar_offset
            )));
        }
        Ok(())
    }
}
