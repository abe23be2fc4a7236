//! Fleet scheduler — the polling loop.

use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, warn};

use adbfleet_core::{AppsConfig, Device, DeviceRoundResult, RoundAction};
use adbfleet_monitor::recovery::{ensure_connected, Reachability, RecoveryPolicy};
use adbfleet_monitor::{focus, remedy};
use adbfleet_transport::Transport;

/// Delays applied after each device and after each round.
#[derive(Debug, Clone)]
pub struct Pacing {
    pub device_delay: Duration,
    pub round_delay: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            device_delay: Duration::from_secs(5),
            round_delay: Duration::from_secs(60),
        }
    }
}

/// Walks the device set each round, checking and remediating each
/// device in turn.
pub struct FleetScheduler<T: Transport> {
    transport: T,
    /// The device set, fixed for the lifetime of the scheduler.
    devices: Vec<Device>,
    apps: AppsConfig,
    recovery: RecoveryPolicy,
    pacing: Pacing,
}

impl<T: Transport> FleetScheduler<T> {
    /// Create a scheduler with default recovery and pacing.
    pub fn new(transport: T, devices: Vec<Device>, apps: AppsConfig) -> Self {
        Self {
            transport,
            devices,
            apps,
            recovery: RecoveryPolicy::default(),
            pacing: Pacing::default(),
        }
    }

    /// Override the reconnect policy.
    pub fn with_recovery(mut self, recovery: RecoveryPolicy) -> Self {
        self.recovery = recovery;
        self
    }

    /// Override the pacing delays.
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Run one device's full check + remediation sequence.
    ///
    /// An unreachable device is skipped for the round: no inspection
    /// and no remediation commands are issued against it.
    pub async fn check_device(&self, device: &Device) -> DeviceRoundResult {
        info!(name = %device.name, address = %device.address, "processing device");

        let reachable =
            ensure_connected(&self.transport, &device.address, &self.recovery).await;
        if reachable == Reachability::Unreachable {
            warn!(name = %device.name, "device unreachable this round");
            return DeviceRoundResult {
                device: device.name.clone(),
                reachable: false,
                focused_app: None,
                launcher_alive: false,
                action: RoundAction::SkippedUnreachable,
            };
        }

        let focused_app = focus::focused_app(&self.transport, &device.address).await;
        let launcher_alive =
            focus::process_alive(&self.transport, &device.address, &self.apps.launcher_package)
                .await;

        let action = remedy::decide(
            focused_app.as_deref(),
            &self.apps.primary_package,
            launcher_alive,
        );
        remedy::apply(&self.transport, &device.address, &self.apps, action).await;

        if action == RoundAction::None {
            info!(name = %device.name, "primary app in focus and launcher running");
        }

        DeviceRoundResult {
            device: device.name.clone(),
            reachable: true,
            focused_app,
            launcher_alive,
            action,
        }
    }

    /// One full pass over the fleet, in fixed iteration order.
    ///
    /// The inter-device pause is applied exactly once per device,
    /// whether or not remediation occurred. Shutdown is honored at
    /// device boundaries; a partial result set is returned when the
    /// round is abandoned.
    pub async fn run_round(&self, shutdown: &mut watch::Receiver<bool>) -> Vec<DeviceRoundResult> {
        let mut results = Vec::with_capacity(self.devices.len());

        for device in &self.devices {
            if *shutdown.borrow() {
                break;
            }

            results.push(self.check_device(device).await);

            tokio::select! {
                _ = tokio::time::sleep(self.pacing.device_delay) => {}
                _ = shutdown.changed() => break,
            }
        }

        results
    }

    /// Run rounds until shutdown is requested.
    ///
    /// Cancellation is checked at device and round boundaries, never
    /// mid-command; in-flight adb commands are allowed to finish.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!(devices = self.devices.len(), "fleet scheduler started");

        loop {
            if *shutdown.borrow() {
                break;
            }

            let results = self.run_round(&mut shutdown).await;
            log_round_summary(&results);

            tokio::select! {
                _ = tokio::time::sleep(self.pacing.round_delay) => {}
                _ = shutdown.changed() => break,
            }
        }

        info!("fleet scheduler stopped");
    }

    /// The devices this scheduler supervises.
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }
}

fn log_round_summary(results: &[DeviceRoundResult]) {
    let unreachable = results
        .iter()
        .filter(|r| r.action == RoundAction::SkippedUnreachable)
        .count();
    let remediated = results
        .iter()
        .filter(|r| {
            matches!(
                r.action,
                RoundAction::RestartBoth | RoundAction::RestartLauncher
            )
        })
        .count();

    if unreachable > 0 || remediated > 0 {
        warn!(
            checked = results.len(),
            remediated, unreachable, "round complete"
        );
    } else {
        info!(checked = results.len(), "round complete, fleet healthy");
    }
}
