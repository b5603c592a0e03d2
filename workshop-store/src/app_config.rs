use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use workshop_core::{CoreError, Severity};

use crate::product_repo::DEFAULT_PRODUCT_NAME;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: Severity,
    #[serde(default = "default_app_name")]
    pub app_name: String,
    /// Receives `warn` and above. Falls back to stderr when unset.
    pub error_file: Option<PathBuf>,
    /// Receives everything below `warn`. Falls back to stderr when unset.
    pub debug_file: Option<PathBuf>,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            app_name: default_app_name(),
            error_file: None,
            debug_file: None,
            format: LogFormat::default(),
        }
    }
}

fn default_level() -> Severity {
    Severity::Trace
}
fn default_app_name() -> String {
    "logging-workshop".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    #[serde(default = "default_product_name")]
    pub product_name: String,
    /// Pins every stubbed lookup to this stock count instead of a random one.
    pub fixed_stock: Option<u64>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            product_name: default_product_name(),
            fixed_stock: None,
        }
    }
}

fn default_product_name() -> String {
    DEFAULT_PRODUCT_NAME.to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Failed to read configuration: {0}")]
    Source(#[from] config::ConfigError),
    #[error(transparent)]
    Invalid(#[from] CoreError),
}

impl Config {
    pub fn load() -> Result<Self, ConfigLoadError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::load_from("config", &run_mode)
    }

    /// Layer `default`, `{run_mode}` and `local` TOML files from `dir`, then
    /// `WORKSHOP__*` environment variables. Every file is optional.
    pub fn load_from(dir: impl AsRef<Path>, run_mode: &str) -> Result<Self, ConfigLoadError> {
        let dir = dir.as_ref();

        let s = config::Config::builder()
            .add_source(config::File::from(dir.join("default.toml")).required(false))
            .add_source(config::File::from(dir.join(format!("{}.toml", run_mode))).required(false))
            // Not checked in
            .add_source(config::File::from(dir.join("local.toml")).required(false))
            // Eg.. `WORKSHOP__SERVER__PORT=9090` sets `server.port`
            .add_source(config::Environment::with_prefix("WORKSHOP").separator("__"))
            .build()?;

        let config: Config = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a single inline TOML document, without files or environment.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigLoadError> {
        let s = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;

        let config: Config = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.logging.app_name.trim().is_empty() {
            return Err(CoreError::ValidationError("logging.app_name must not be empty".into()));
        }
        if self.catalog.product_name.is_empty() {
            return Err(CoreError::ValidationError("catalog.product_name must not be empty".into()));
        }
        if self.server.host.trim().is_empty() {
            return Err(CoreError::ValidationError("server.host must not be empty".into()));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
