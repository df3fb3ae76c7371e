//! Configuration management for the provenance dashboard
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config.toml, config.yaml)
//! - Default values

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Input table locations
    #[serde(default)]
    pub data: DataConfig,

    /// Chart presentation defaults
    #[serde(default)]
    pub charts: ChartsConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    /// Estimate records CSV
    #[serde(default = "default_estimates_path")]
    pub estimates_path: PathBuf,

    /// Source/citation records CSV
    #[serde(default = "default_sources_path")]
    pub sources_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChartsConfig {
    /// Values at or above this are dropped when outliers are excluded
    #[serde(default = "default_outlier_threshold")]
    pub outlier_threshold_twh: f64,

    /// Sankey node padding in pixels
    #[serde(default = "default_sankey_pad")]
    pub sankey_pad: u32,

    /// Sankey node thickness in pixels
    #[serde(default = "default_sankey_thickness")]
    pub sankey_thickness: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,

    /// Metrics port (0 to disable)
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,

    /// Service name for tracing
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

// Default value functions
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8050 }
fn default_request_timeout() -> u64 { 30 }
fn default_estimates_path() -> PathBuf { PathBuf::from(crate::DEFAULT_ESTIMATES_PATH) }
fn default_sources_path() -> PathBuf { PathBuf::from(crate::DEFAULT_SOURCES_PATH) }
fn default_outlier_threshold() -> f64 { 2000.0 }
fn default_sankey_pad() -> u32 { 15 }
fn default_sankey_thickness() -> u32 { 20 }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { true }
fn default_metrics_port() -> u16 { 9090 }
fn default_service_name() -> String { "provenance-dashboard".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            estimates_path: default_estimates_path(),
            sources_path: default_sources_path(),
        }
    }
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            outlier_threshold_twh: default_outlier_threshold(),
            sankey_pad: default_sankey_pad(),
            sankey_thickness: default_sankey_thickness(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: default_json_logging(),
            metrics_port: default_metrics_port(),
            service_name: default_service_name(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Load base config file
            .add_source(File::with_name("config/default").required(false))

            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))

            // Load local overrides
            .add_source(File::with_name("config/local").required(false))

            // Load from environment variables with APP__ prefix
            // e.g., APP__DATA__ESTIMATES_PATH=/srv/estimates.csv
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
            )

            .build()?;

        config.try_deserialize()
    }

    /// Load from a specific TOML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
            )
            .build()?;

        config.try_deserialize()
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            data: DataConfig::default(),
            charts: ChartsConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}
