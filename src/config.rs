//! Configuration file support.
//!
//! Holds the sequence metadata that cannot be derived from an annotation
//! task (camera, location, frame rate, ...) and is written verbatim into the
//! exported `info.txt` and `sequence` files, plus logging preferences for the
//! command-line tool.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Log level setting for the command-line tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    #[default]
    Warn,
    /// Show errors, warnings, and info messages
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Get all log levels in order from least to most verbose.
    pub fn all() -> &'static [LogLevel] {
        &[
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ]
    }

    /// Raise the level by `steps`, saturating at `Trace`.
    pub fn more_verbose(self, steps: u8) -> LogLevel {
        let levels = Self::all();
        let current = levels.iter().position(|l| *l == self).unwrap_or(0);
        let index = (current + steps as usize).min(levels.len() - 1);
        levels[index]
    }

    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Configuration for VOT export and the command-line tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VotConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Static sequence metadata for `info.txt`
    #[serde(default)]
    pub sequence: SequenceDefaults,

    /// Log level used by the command-line tool
    #[serde(default)]
    pub log_level: LogLevel,
}

/// `info.txt` and `sequence` values not derivable from the annotation task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceDefaults {
    pub spectrum: String,
    pub camera_name: String,
    pub location: String,
    pub year: String,
    pub original_video_file: String,
    pub cropping_offset_x: u32,
    pub cropping_offset_y: u32,
    pub deinterlaced: bool,
    /// Frame rate written to the `sequence` file.
    pub fps: u32,
}

impl Default for SequenceDefaults {
    fn default() -> Self {
        Self {
            spectrum: "RGB".to_string(),
            camera_name: String::new(),
            location: String::new(),
            year: String::new(),
            original_video_file: String::new(),
            cropping_offset_x: 0,
            cropping_offset_y: 0,
            deinterlaced: false,
            fps: 30,
        }
    }
}

impl VotConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            sequence: SequenceDefaults::default(),
            log_level: LogLevel::default(),
        }
    }

    /// Serialize configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Get the default config filename.
    pub fn default_filename() -> &'static str {
        "vot-config.json"
    }

    /// Get the default config file path.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("vot-convert").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("vot-convert")
                    .join(Self::default_filename())
            })
        }
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::load(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Save configuration to a file, creating parent directories if needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        std::fs::write(path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}

impl Default for VotConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration written by a newer version
    #[error(
        "Configuration version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },
}
