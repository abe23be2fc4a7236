//! adbfleet-transport — the device-bridge command boundary.
//!
//! Wraps the `adb` binary behind the [`Transport`] trait:
//!
//! - `run()` executes one remote shell command against an addressed device
//! - `connect()` establishes (or confirms) a device session
//! - `restart_server()` tears down and restarts the local adb daemon
//!
//! Failures never escape this boundary unclassified: remote command
//! failures and spawn failures both map to [`TransportError`], and
//! `connect()` folds every non-success outcome into `false`.

pub mod client;
pub mod error;

pub use client::{AdbClient, Transport};
pub use error::{TransportError, TransportResult};
