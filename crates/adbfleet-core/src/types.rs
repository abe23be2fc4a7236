//! Shared fleet types.

use serde::{Deserialize, Serialize};

/// A supervised device: a stable name and its network address.
///
/// Identity is the name; the set of devices is fixed for the lifetime
/// of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
    pub address: String,
}

/// The action the scheduler took for a device during one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundAction {
    /// Device healthy: primary app in focus and launcher running.
    None,
    /// Primary app not in focus: both apps were restarted.
    RestartBoth,
    /// Launcher process not found: launcher was restarted.
    RestartLauncher,
    /// Device unreachable after the full recovery ladder; no
    /// inspection or remediation was attempted.
    SkippedUnreachable,
}

/// Outcome of one device's turn within a round.
///
/// Ephemeral: consumed for logging and tests, never persisted.
#[derive(Debug, Clone)]
pub struct DeviceRoundResult {
    /// Device name.
    pub device: String,
    /// Whether the device was reachable this round.
    pub reachable: bool,
    /// Package reported in foreground, if it could be determined.
    pub focused_app: Option<String>,
    /// Whether the launcher process was found running.
    pub launcher_alive: bool,
    /// Remediation applied this round.
    pub action: RoundAction,
}
