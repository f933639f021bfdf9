//! Application configuration module.
//!
//! Configuration is loaded once from a JSON file and shared process-wide.
//! A missing or unreadable file degrades to compiled-in defaults.

use super::error::ConfigError;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/app_config.json";

/// Global configuration instance
static CONFIG_INSTANCE: OnceCell<AppConfig> = OnceCell::new();

/// Application configuration structure.
///
/// String fields use `Box<str>` for memory efficiency since they are set
/// once and never modified.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Host URL for the server
    pub host_url: Box<str>,

    /// Maximum allowed decoded document size in bytes
    pub max_file_size: u64,

    /// Base URL of the OCR processor service
    pub ocr_endpoint: Box<str>,

    /// Cloud project that owns the processor
    pub project_id: Box<str>,

    /// Identifier of the trained processor
    pub processor_id: Box<str>,

    /// Processor region (e.g. "eu", "us")
    pub location: Box<str>,

    /// Path to the reference marker catalog CSV
    pub catalog_path: Box<str>,
}

impl AppConfig {
    /// Load configuration from a JSON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration JSON file
    ///
    /// # Returns
    ///
    /// Returns the parsed `AppConfig` or a `ConfigError` if loading fails.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from the default path.
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::from_file(DEFAULT_CONFIG_PATH)
    }

    /// Initialize the global configuration instance from the default path.
    ///
    /// This should be called once at application startup. If not called,
    /// `get()` will initialize with default values.
    pub fn init() -> Result<&'static Self, ConfigError> {
        CONFIG_INSTANCE.get_or_try_init(Self::load_default)
    }

    /// Initialize the global configuration instance from an explicit path.
    pub fn init_from<P: AsRef<Path>>(path: P) -> Result<&'static Self, ConfigError> {
        CONFIG_INSTANCE.get_or_try_init(|| Self::from_file(path))
    }

    /// Get the global configuration instance.
    ///
    /// If the configuration hasn't been initialized, returns default values.
    #[must_use]
    pub fn get() -> &'static Self {
        CONFIG_INSTANCE.get_or_init(Self::default)
    }

    /// Full resource name of the configured processor.
    #[must_use]
    pub fn processor_name(&self) -> String {
        format!(
            "projects/{}/locations/{}/processors/{}",
            self.project_id, self.location, self.processor_id
        )
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host_url: "0.0.0.0:8080".into(),
            // The processor rejects documents over 40 MB
            max_file_size: 40 * 1024 * 1024,
            ocr_endpoint: "https://eu-documentai.googleapis.com/v1".into(),
            project_id: "".into(),
            processor_id: "".into(),
            location: "eu".into(),
            catalog_path: "config/reference_values.csv".into(),
        }
    }
}
