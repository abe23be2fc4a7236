//! adbfleet-scheduler — drives health-check rounds over the fleet.
//!
//! A single logical worker walks the immutable device set in order:
//!
//! ```text
//! FleetScheduler
//!   └── per device, strictly sequential
//!       ├── recovery::ensure_connected (reconnect ladder if needed)
//!       ├── focus inspection (foreground app + launcher liveness)
//!       ├── remedy::apply (decision table)
//!       └── inter-device pause (5s)
//!   └── inter-round pause (60s)
//! ```
//!
//! Devices are never checked concurrently: the adb server is a single
//! shared resource and a server restart drops every session, so
//! serializing access avoids command interleaving. Shutdown is
//! cooperative, checked at device and round boundaries only.

pub mod scheduler;

pub use scheduler::{FleetScheduler, Pacing};
