//! Engine configuration.
//!
//! Loaded from `$XDG_CONFIG_HOME/crece/config.toml` (or the platform
//! equivalent). Every field has a default so a missing or partial file
//! always yields a usable config; a file that fails to parse is reported
//! and replaced with defaults rather than aborting.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Assistant backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Base URL of the generative-language API.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// API key; empty disables the chat commands.
    #[serde(default)]
    pub api_key: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_timeout() -> u64 {
    20
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: default_model(),
            api_key: String::new(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Directory holding the progress store.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default)]
    pub assistant: AssistantConfig,
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("crece")
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            assistant: AssistantConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Default config file location.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("crece")
            .join("config.toml")
    }

    /// Load the config file, falling back to defaults when it is missing or
    /// unreadable.
    pub fn load_or_default() -> Self {
        Self::load_from(&Self::default_path())
    }

    pub fn load_from(path: &PathBuf) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Config at {} failed to parse, using defaults: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Path of the JSON progress store.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join("progress.json")
    }
}
