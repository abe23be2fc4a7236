//! adbfleet-monitor — per-device health checking and self-healing.
//!
//! Three narrow pieces, composed by the scheduler:
//!
//! - [`focus`] — reads the foreground window and companion-process state
//! - [`recovery`] — the tiered reconnect ladder for unreachable devices
//! - [`remedy`] — the app-level decision table and restart actions
//!
//! Every failure is recovered where it occurs: inspection misses yield
//! `None`/`false`, restart failures are logged and left for the next
//! polling round to re-evaluate.

pub mod focus;
pub mod recovery;
pub mod remedy;

pub use recovery::{Reachability, RecoveryPolicy};
