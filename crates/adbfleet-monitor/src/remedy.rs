//! Application remediation — decides and applies app-level fixes.
//!
//! The decision is a pure function over the inspected state; applying
//! it issues best-effort force-stop + start commands. A failed restart
//! is logged and left alone: the next polling round re-inspects and
//! re-issues the restart if the device still diverges.

use tracing::{error, info, warn};

use adbfleet_core::{AppsConfig, RoundAction};
use adbfleet_transport::Transport;

/// Pick the remediation for an inspected, reachable device.
///
/// | focused == primary | launcher alive | action          |
/// |--------------------|----------------|-----------------|
/// | no                 | any            | RestartBoth     |
/// | yes                | no             | RestartLauncher |
/// | yes                | yes            | None            |
pub fn decide(focused_app: Option<&str>, primary_package: &str, launcher_alive: bool) -> RoundAction {
    if focused_app != Some(primary_package) {
        RoundAction::RestartBoth
    } else if !launcher_alive {
        RoundAction::RestartLauncher
    } else {
        RoundAction::None
    }
}

/// Apply a remediation decision to a device.
pub async fn apply<T: Transport>(
    transport: &T,
    address: &str,
    apps: &AppsConfig,
    action: RoundAction,
) {
    match action {
        RoundAction::RestartBoth => {
            warn!(%address, primary = %apps.primary_package, "primary app not in focus, restarting both apps");
            restart_application(transport, address, &apps.primary_package, &apps.primary_entry)
                .await;
            restart_application(
                transport,
                address,
                &apps.launcher_package,
                &apps.launcher_entry,
            )
            .await;
        }
        RoundAction::RestartLauncher => {
            warn!(%address, launcher = %apps.launcher_package, "launcher not running, restarting launcher");
            restart_application(
                transport,
                address,
                &apps.launcher_package,
                &apps.launcher_entry,
            )
            .await;
        }
        RoundAction::None | RoundAction::SkippedUnreachable => {}
    }
}

/// Force-stop a package, then start its entry component.
///
/// Both steps are best-effort and fire-and-forget; repeated restarts of
/// an already-stopped app are harmless no-ops at the transport level.
pub async fn restart_application<T: Transport>(
    transport: &T,
    address: &str,
    package: &str,
    entry: &str,
) {
    info!(%address, %package, "restarting application");

    if let Err(e) = transport
        .run(address, &["shell", "am", "force-stop", package])
        .await
    {
        error!(%address, %package, error = %e, "force-stop failed");
    }

    let component = format!("{package}/{entry}");
    if let Err(e) = transport
        .run(address, &["shell", "am", "start", "-n", &component])
        .await
    {
        error!(%address, %package, error = %e, "start failed");
    }
}
