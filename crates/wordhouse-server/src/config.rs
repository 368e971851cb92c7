//! Server configuration.

use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Service name.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Server host.
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Debug mode.
    #[serde(default)]
    pub debug: bool,

    /// Address contact and prayer notifications are delivered to.
    #[serde(default = "default_operator_address")]
    pub operator_address: String,

    /// Sender address for outbound mail.
    #[serde(default = "default_mail_from")]
    pub mail_from: String,

    /// CORS allowed origins; empty allows any.
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Directory holding the built SPA; served as the fallback for unmatched
    /// routes when set.
    pub static_dir: Option<String>,

    /// Object storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Mail relay configuration.
    #[serde(default)]
    pub mail: MailConfig,

    /// Telemetry configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Object storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Storage backend type (memory, drive).
    #[serde(default = "default_storage_backend")]
    pub backend: String,

    /// Drive provider API endpoint.
    pub drive_endpoint: Option<String>,

    /// Drive provider API key.
    pub drive_api_key: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            drive_endpoint: None,
            drive_api_key: None,
        }
    }
}

/// Mail relay configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MailConfig {
    /// Relay API endpoint; messages are logged and dropped when unset.
    pub relay_endpoint: Option<String>,

    /// Relay API key.
    pub relay_api_key: Option<String>,
}

/// Telemetry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format (json, pretty).
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_service_name() -> String {
    "wordhouse".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_operator_address() -> String {
    "office@wordhouse.example".to_string()
}

fn default_mail_from() -> String {
    "no-reply@wordhouse.example".to_string()
}

fn default_storage_backend() -> String {
    "memory".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl ServerConfig {
    /// Loads configuration from files and environment.
    pub fn load() -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("WORDHOUSE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let server_config: ServerConfig = config.try_deserialize()?;
        server_config.validate()?;
        Ok(server_config)
    }

    /// Validates the configuration.
    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("Invalid port: 0");
        }

        if self.storage.backend == "drive" && self.storage.drive_endpoint.is_none() {
            anyhow::bail!("storage.drive_endpoint is required for the drive backend");
        }

        if !matches!(self.storage.backend.as_str(), "memory" | "drive") {
            anyhow::bail!("Unknown storage backend: {}", self.storage.backend);
        }

        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            host: default_host(),
            port: default_port(),
            debug: false,
            operator_address: default_operator_address(),
            mail_from: default_mail_from(),
            cors_origins: Vec::new(),
            static_dir: None,
            storage: StorageConfig::default(),
            mail: MailConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 5000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_port_is_rejected() {
        let mut config = ServerConfig::default();
        config.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn drive_backend_requires_endpoint() {
        let mut config = ServerConfig::default();
        config.storage.backend = "drive".to_string();
        assert!(config.validate().is_err());

        config.storage.drive_endpoint = Some("https://drive.example.com/api".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let mut config = ServerConfig::default();
        config.storage.backend = "tape".to_string();
        assert!(config.validate().is_err());
    }
}
