#![deny(unsafe_code)]

//! Configuration loading and validation for svcstate.
//!
//! Loads TOML configuration files and validates them. [`AppConfig`] carries
//! the default daemon host, the logging level, and the table of wire
//! identifiers the daemon uses for each supervised service.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Top-level application configuration.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Daemon connection defaults.
    #[serde(default)]
    pub daemon: DaemonConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Wire identifiers for the daemon and its services.
    #[serde(default)]
    pub services: ServiceNamesConfig,
}

/// Daemon connection defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Host seeded into every fresh status snapshot.
    #[serde(default = "default_daemon_host")]
    pub host: String,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            host: default_daemon_host(),
        }
    }
}

fn default_daemon_host() -> String {
    "wss://127.0.0.1:55400".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "debug", "trace").
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// The identifiers the daemon protocol uses for each service.
///
/// These strings arrive as message origins and as `service` payload fields.
/// Deployments that rename services only need to change this table.
///
/// ## TOML Example
///
/// ```toml
/// [services]
/// wallet = "chia_wallet"
/// full_node = "chia_full_node"
/// simulator = "chia_full_node_simulator"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceNamesConfig {
    #[serde(default = "default_wallet")]
    pub wallet: String,

    #[serde(default = "default_full_node")]
    pub full_node: String,

    /// Simulated full node; tracked as the full node.
    #[serde(default = "default_simulator")]
    pub simulator: String,

    #[serde(default = "default_daemon")]
    pub daemon: String,

    #[serde(default = "default_farmer")]
    pub farmer: String,

    #[serde(default = "default_harvester")]
    pub harvester: String,

    #[serde(default = "default_plotter")]
    pub plotter: String,
}

impl Default for ServiceNamesConfig {
    fn default() -> Self {
        Self {
            wallet: default_wallet(),
            full_node: default_full_node(),
            simulator: default_simulator(),
            daemon: default_daemon(),
            farmer: default_farmer(),
            harvester: default_harvester(),
            plotter: default_plotter(),
        }
    }
}

impl ServiceNamesConfig {
    /// All identifiers paired with their config key, in declaration order.
    pub fn entries(&self) -> [(&'static str, &str); 7] {
        [
            ("wallet", self.wallet.as_str()),
            ("full_node", self.full_node.as_str()),
            ("simulator", self.simulator.as_str()),
            ("daemon", self.daemon.as_str()),
            ("farmer", self.farmer.as_str()),
            ("harvester", self.harvester.as_str()),
            ("plotter", self.plotter.as_str()),
        ]
    }
}

fn default_wallet() -> String {
    "chia_wallet".to_string()
}

fn default_full_node() -> String {
    "chia_full_node".to_string()
}

fn default_simulator() -> String {
    "chia_full_node_simulator".to_string()
}

fn default_daemon() -> String {
    "daemon".to_string()
}

fn default_farmer() -> String {
    "chia_farmer".to_string()
}

fn default_harvester() -> String {
    "chia_harvester".to_string()
}

fn default_plotter() -> String {
    "chia_plotter".to_string()
}

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl AppConfig {
    /// Load configuration from a TOML file at the given path using async I/O.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.daemon.host.trim().is_empty() {
            return Err(ConfigError::Validation(
                "daemon.host must not be empty".to_string(),
            ));
        }

        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.level must be one of {:?}, got {:?}",
                VALID_LOG_LEVELS, self.logging.level
            )));
        }

        let entries = self.services.entries();
        for (i, (key, value)) in entries.iter().enumerate() {
            if value.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "services.{key} must not be empty"
                )));
            }
            if let Some((other, _)) = entries[..i].iter().find(|(_, v)| v == value) {
                return Err(ConfigError::Validation(format!(
                    "services.{key} duplicates services.{other} ({value:?})"
                )));
            }
        }

        Ok(())
    }
}
