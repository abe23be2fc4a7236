//! fleet.toml configuration parser.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::Device;

/// The full fleet configuration, loaded once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetConfig {
    /// Devices to supervise, in iteration order.
    pub devices: Vec<Device>,
    pub apps: AppsConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default)]
    pub recovery: RecoveryConfig,
}

/// The application pair every device must keep running.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppsConfig {
    /// Package that must stay in foreground.
    pub primary_package: String,
    /// Companion process that must stay alive.
    pub launcher_package: String,
    /// Entry activity of the primary package.
    #[serde(default = "default_entry")]
    pub primary_entry: String,
    /// Entry activity of the launcher package.
    #[serde(default = "default_entry")]
    pub launcher_entry: String,
}

/// Delays between devices and between rounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacingConfig {
    #[serde(default = "default_device_delay")]
    pub device_delay_secs: u64,
    #[serde(default = "default_round_delay")]
    pub round_delay_secs: u64,
}

/// Bounded-retry settings for the reconnect ladder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_retry_delay")]
    pub retry_delay_secs: u64,
}

impl FleetConfig {
    /// Load and validate a fleet config from a TOML file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: FleetConfig = toml::from_str(&content)?;
        if config.devices.is_empty() {
            anyhow::bail!("fleet config has no devices");
        }
        Ok(config)
    }
}

impl PacingConfig {
    pub fn device_delay(&self) -> Duration {
        Duration::from_secs(self.device_delay_secs)
    }

    pub fn round_delay(&self) -> Duration {
        Duration::from_secs(self.round_delay_secs)
    }
}

impl RecoveryConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            device_delay_secs: default_device_delay(),
            round_delay_secs: default_round_delay(),
        }
    }
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            retry_delay_secs: default_retry_delay(),
        }
    }
}

fn default_entry() -> String {
    ".MainActivity".to_string()
}

fn default_device_delay() -> u64 {
    5
}

fn default_round_delay() -> u64 {
    60
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    5
}
