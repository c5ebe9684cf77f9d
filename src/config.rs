use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::engine::EngineOptions;
use crate::error::{ClassifierError, Result};

pub const DEFAULT_CONFIG_FILE: &str = "ai_classifier.toml";
pub const DEFAULT_LOG_FILTER: &str = "ai_system_classifier=info";

/// Main configuration structure loaded from ai_classifier.toml and environment variables
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub app: AppConfig,
    pub engine: EngineOptions,
    pub export: ExportConfig,
    /// Runtime configuration loaded from environment variables
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

/// Identity stamped on every exported document
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub name: String,
    pub version: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "AI System Classifier (EU AI Act-aligned)".to_string(),
            version: "1.0.0".to_string(),
        }
    }
}

/// Where and under which names exports are written
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub json_file_name: String,
    pub markdown_file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            json_file_name: "ai_system_classification.json".to_string(),
            markdown_file_name: "ai_system_decision_log.md".to_string(),
        }
    }
}

/// Process-level settings; never affect classification
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub log_level: String,
    pub config_path: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_FILTER.to_string(),
            config_path: DEFAULT_CONFIG_FILE.to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Load runtime configuration from environment variables
    pub fn load_from_env() -> Self {
        Self {
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
            config_path: std::env::var("AI_CLASSIFIER_CONFIG")
                .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string()),
        }
    }
}

/// Load environment variables from AI_CLASSIFIER_ENV_FILE if set, else ./.env.
/// Variables already present in the process environment win.
pub fn load_env_file() {
    if let Ok(env_path) = std::env::var("AI_CLASSIFIER_ENV_FILE") {
        let _ = dotenvy::from_path(env_path);
    } else {
        let _ = dotenvy::from_path(".env");
    }
}

impl Config {
    /// Load configuration from TOML file and environment variables
    /// Uses AI_CLASSIFIER_CONFIG environment variable or defaults to "ai_classifier.toml"
    pub fn load() -> Result<Self> {
        load_env_file();
        let runtime = RuntimeConfig::load_from_env();
        let mut config = match std::fs::read_to_string(&runtime.config_path) {
            Ok(content) => Self::from_toml_str(&content)?,
            Err(_) => {
                tracing::warn!("Config file {} not found, using defaults", runtime.config_path);
                Self::default()
            }
        };
        config.runtime = runtime;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document; missing sections fall back to defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.app.name.trim().is_empty() {
            return Err(ClassifierError::Config {
                message: "app.name must not be empty".into(),
            });
        }
        if self.app.version.trim().is_empty() {
            return Err(ClassifierError::Config {
                message: "app.version must not be empty".into(),
            });
        }
        for (key, name) in [
            ("export.json_file_name", &self.export.json_file_name),
            ("export.markdown_file_name", &self.export.markdown_file_name),
        ] {
            if name.trim().is_empty() {
                return Err(ClassifierError::Config {
                    message: format!("{key} must not be empty"),
                });
            }
            if name.contains('/') || name.contains('\\') {
                return Err(ClassifierError::Config {
                    message: format!("{key} must be a file name, not a path: '{name}'"),
                });
            }
        }
        if self.export.json_file_name == self.export.markdown_file_name {
            return Err(ClassifierError::Config {
                message: "export file names must differ".into(),
            });
        }
        Ok(())
    }
}
