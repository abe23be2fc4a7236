//! adbfleet-core — shared fleet types and configuration.
//!
//! Defines the immutable device set, per-round result records, and the
//! TOML fleet config consumed by the scheduler and the daemon binary.

pub mod config;
pub mod types;

pub use config::{AppsConfig, FleetConfig, PacingConfig, RecoveryConfig};
pub use types::{Device, DeviceRoundResult, RoundAction};
