//! Configuration builders for tests.
//!
//! Use [`TestConfigBuilder`] to create customised [`AppConfig`] values without
//! repeating boilerplate across crate boundaries.

use std::path::PathBuf;

use svcstate_config::AppConfig;
use tempfile::TempDir;

/// Fluent builder for [`AppConfig`] in tests.
///
/// # Example
///
/// ```ignore
/// let config = TestConfigBuilder::new()
///     .daemon_host("wss://10.0.0.2:55400")
///     .service_name("wallet", "my_wallet")
///     .build();
/// ```
pub struct TestConfigBuilder {
    config: AppConfig,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    pub fn daemon_host(mut self, host: &str) -> Self {
        self.config.daemon.host = host.to_string();
        self
    }

    pub fn log_level(mut self, level: &str) -> Self {
        self.config.logging.level = level.to_string();
        self
    }

    /// Override one wire identifier by its config key (`wallet`, `full_node`, ...).
    ///
    /// Panics on an unknown key.
    pub fn service_name(mut self, key: &str, wire: &str) -> Self {
        let services = &mut self.config.services;
        let slot = match key {
            "wallet" => &mut services.wallet,
            "full_node" => &mut services.full_node,
            "simulator" => &mut services.simulator,
            "daemon" => &mut services.daemon,
            "farmer" => &mut services.farmer,
            "harvester" => &mut services.harvester,
            "plotter" => &mut services.plotter,
            other => panic!("unknown service key {other:?}"),
        };
        *slot = wire.to_string();
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A TOML config written to a temp directory that lives as long as this value.
pub struct TempConfigFile {
    pub path: PathBuf,
    _temp_dir: TempDir,
}

impl TempConfigFile {
    pub async fn with_toml(toml_content: &str) -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("svcstate.toml");
        tokio::fs::write(&path, toml_content)
            .await
            .expect("failed to write test config");

        Self {
            path,
            _temp_dir: temp_dir,
        }
    }
}
