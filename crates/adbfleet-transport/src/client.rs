//! ADB client — shells out to the adb binary for all device commands.

use std::path::PathBuf;
use std::process::Output;

use tokio::process::Command;
use tracing::{error, info};

use crate::error::{TransportError, TransportResult};

/// Command boundary to the device bridge.
///
/// All monitor and scheduler code goes through this trait so tests can
/// substitute a scripted transport.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Run an adb command against one addressed device and return stdout.
    async fn run(&self, address: &str, args: &[&str]) -> TransportResult<String>;

    /// Ask the bridge to connect to `address`.
    ///
    /// True only when adb explicitly reports a connected state in its
    /// output; any other outcome (failure output, non-zero exit, spawn
    /// error) is false and logged.
    async fn connect(&self, address: &str) -> bool;

    /// Kill and restart the local adb server.
    ///
    /// Drops every device session; callers must re-connect afterwards.
    async fn restart_server(&self) -> TransportResult<()>;
}

/// [`Transport`] implementation over the `adb` binary.
pub struct AdbClient {
    adb_path: PathBuf,
}

impl AdbClient {
    /// Create a client using the given adb binary (path or name on PATH).
    pub fn new(adb_path: impl Into<PathBuf>) -> Self {
        Self {
            adb_path: adb_path.into(),
        }
    }

    async fn output(&self, args: &[&str]) -> TransportResult<Output> {
        let output = Command::new(&self.adb_path).args(args).output().await?;
        Ok(output)
    }

    async fn checked(&self, args: &[&str]) -> TransportResult<Output> {
        let output = self.output(args).await?;
        if output.status.success() {
            Ok(output)
        } else {
            Err(command_error(&output))
        }
    }
}

impl Transport for AdbClient {
    async fn run(&self, address: &str, args: &[&str]) -> TransportResult<String> {
        let mut full: Vec<&str> = vec!["-s", address];
        full.extend_from_slice(args);
        let output = self.checked(&full).await?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn connect(&self, address: &str) -> bool {
        match self.output(&["connect", address]).await {
            Ok(output) => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                if output.status.success() && reports_connected(&stdout) {
                    info!(%address, "connected");
                    true
                } else {
                    error!(%address, output = %stdout.trim(), "connect did not report a connection");
                    false
                }
            }
            Err(e) => {
                error!(%address, error = %e, "connect failed");
                false
            }
        }
    }

    async fn restart_server(&self) -> TransportResult<()> {
        self.checked(&["kill-server"]).await?;
        self.checked(&["start-server"]).await?;
        info!("adb server restarted");
        Ok(())
    }
}

/// Whether `adb connect` stdout reports a connected state.
///
/// Accepted forms are `connected to <addr>` and
/// `already connected to <addr>`. The failure forms
/// (`failed to connect to`, `cannot connect to`) do not contain the
/// `connected to` substring.
fn reports_connected(stdout: &str) -> bool {
    stdout.contains("connected to")
}

fn command_error(output: &Output) -> TransportError {
    TransportError::Command {
        exit_code: output.status.code().unwrap_or(-1),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
}
