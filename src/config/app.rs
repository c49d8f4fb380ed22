// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::model::ModelConfig;
use crate::utils::constants::{DEFAULT_DISEASE_INFO_PATH, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Serialize, Default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub enrichment: EnrichmentConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub timeout: Option<u64>,
    /// Allow any origin, method and header. Development default only.
    pub cors_permissive: bool,
    /// Report prediction failures with 4xx/5xx instead of a 200 envelope.
    pub strict_status_codes: bool,
}

#[derive(Debug, Deserialize, Clone, Serialize)]
pub struct EnrichmentConfig {
    pub enabled: bool,
    pub disease_info_path: PathBuf,
}

#[derive(Debug, Deserialize, Clone, Serialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            timeout: Some(DEFAULT_TIMEOUT_SECS),
            cors_permissive: true,
            strict_status_codes: false,
        }
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            disease_info_path: PathBuf::from(DEFAULT_DISEASE_INFO_PATH),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: "SYMPTOBUDDY".to_string(),
        }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let mut config = config::Config::builder();

        config = config.set_default("server.host", defaults.server.host.as_str())?;
        config = config.set_default("server.port", defaults.server.port)?;
        config = config.set_default("server.timeout", DEFAULT_TIMEOUT_SECS)?;
        config = config.set_default("server.cors_permissive", defaults.server.cors_permissive)?;
        config = config.set_default(
            "server.strict_status_codes",
            defaults.server.strict_status_codes,
        )?;

        config = config.set_default("model.engine", defaults.model.engine.to_string())?;
        config = config.set_default(
            "model.model_path",
            defaults.model.model_path.to_string_lossy().into_owned(),
        )?;
        config = config.set_default(
            "model.label_encoder_path",
            defaults.model.label_encoder_path.to_string_lossy().into_owned(),
        )?;
        config = config.set_default("model.input_mode", defaults.model.input_mode.to_string())?;

        config = config.set_default("enrichment.enabled", defaults.enrichment.enabled)?;
        config = config.set_default(
            "enrichment.disease_info_path",
            defaults.enrichment.disease_info_path.to_string_lossy().into_owned(),
        )?;

        config = config.set_default("logging.level", defaults.logging.level.as_str())?;

        if let Some(path) = &self.config_path {
            if !path.exists() {
                return Err(ConfigError::Message(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            config = config.add_source(config::File::from(path.as_path()));
        } else {
            let default_config = PathBuf::from("config.toml");
            if default_config.exists() {
                config = config.add_source(config::File::with_name("config"));
            }
        }

        config = config.add_source(
            config::Environment::with_prefix(&self.env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .ignore_empty(true),
        );

        config.build()?.try_deserialize().map_err(ConfigError::from)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Message(String),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

impl From<config::ConfigError> for ConfigError {
    fn from(e: config::ConfigError) -> Self {
        ConfigError::Message(e.to_string())
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        match std::env::var("SYMPTOBUDDY_CONFIG") {
            Ok(path) if !path.is_empty() => Self::load_with_path(path),
            _ => ConfigLoader::new().load(),
        }
    }

    pub fn load_with_path<P: Into<PathBuf>>(path: P) -> Result<Self, ConfigError> {
        let loader = ConfigLoader::new().with_config_path(path);
        loader.load()
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
