//! Service configuration. Artifact locations, listener address, encoding and logging.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Env var naming the config file
pub const CONFIG_PATH_ENV: &str = "SUBSCRIPTION_API_CONFIG";
/// Env var overriding `bind_addr`
pub const BIND_ADDR_ENV: &str = "SUBSCRIPTION_API_BIND";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener address for the HTTP API
    pub bind_addr: String,
    /// Startup artifacts produced by training
    pub artifacts: ArtifactsConfig,
    /// One-hot column naming
    pub encoding: EncodingConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    /// Trained classifier (.onnx, or .json linear model)
    pub model_path: PathBuf,
    /// JSON array of feature column names, in training order
    pub schema_path: PathBuf,
    /// JSON number in [0, 1]
    pub threshold_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingConfig {
    /// Joins a categorical field and its value into an indicator column name
    pub separator: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
            artifacts: ArtifactsConfig::default(),
            encoding: EncodingConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/gb_model.onnx"),
            schema_path: PathBuf::from("models/feature_columns.json"),
            threshold_path: PathBuf::from("models/business_threshold.json"),
        }
    }
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            separator: "_".to_string(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

impl ServiceConfig {
    /// Load from JSON file if present; otherwise return default.
    /// A file that exists but does not parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        serde_json::from_str(&data)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load from the path in `SUBSCRIPTION_API_CONFIG` (default `config.json`)
    /// and apply env overrides.
    pub fn from_env() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.json"));
        let mut config = Self::load(&path)?;
        if let Ok(addr) = std::env::var(BIND_ADDR_ENV) {
            config.bind_addr = addr;
        }
        Ok(config)
    }
}
