//! Application configuration loaded from `config.toml`.
//!
//! Every section is optional and falls back to defaults. A few values can be
//! overridden from the environment (after `.env` has been loaded):
//! - `LOG_LEVEL` - log level for the crate (default: `info`)
//! - `LOG_FILE` - log file path, empty to disable (default: `logs/app.log`)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Directories created under `paths.data_dir` at startup.
const DATA_SUBDIRS: [&str; 3] = ["media", "raw_videos", "final_videos"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not found. Please create one.")]
    NotFound(PathBuf),

    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid extraction pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub paths: PathsConfig,
    pub logging: LoggingConfig,
    pub ocr: OcrConfig,
    pub fetch: FetchConfig,
    pub extraction: ExtractionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Enables verbose request tracing.
    pub debug: bool,
    /// Largest accepted request body. Base64 screenshots travel inline.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            debug: false,
            max_body_bytes: 32 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub data_dir: PathBuf,
    /// Explicit tesseract executable. Used only if the file exists.
    pub tesseract_cmd: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("backend/data"),
            tesseract_cmd: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: Some(PathBuf::from("logs/app.log")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract language code(s), e.g. `eng` or `eng+hin`.
    pub language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub user_agent: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: None,
        }
    }
}

/// Line prefixes and markers recognised by the requirement extractor.
/// Matching is case-insensitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub product_prefixes: Vec<String>,
    pub audience_prefixes: Vec<String>,
    pub keyword_markers: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            product_prefixes: owned(&[
                "product:",
                "product name:",
                "software:",
                "tool:",
                "ai solution:",
                "ai software:",
            ]),
            audience_prefixes: owned(&["audience:", "target audience:", "demographic:"]),
            keyword_markers: owned(&["keywords:", "tags:"]),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file. The file must exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            self.logging.level = level.to_lowercase();
        }
        if let Ok(file) = std::env::var("LOG_FILE") {
            self.logging.file = if file.trim().is_empty() {
                None
            } else {
                Some(PathBuf::from(file))
            };
        }
    }

    /// Create the media and video directories under `paths.data_dir`.
    pub fn ensure_data_dirs(&self) -> std::io::Result<()> {
        for sub in DATA_SUBDIRS {
            std::fs::create_dir_all(self.paths.data_dir.join(sub))?;
        }
        Ok(())
    }
}
