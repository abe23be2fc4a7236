//! Transport error types.

use thiserror::Error;

/// Errors that can occur when issuing an adb command.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The remote command executed but exited non-zero.
    #[error("adb command failed (exit {exit_code}): {stderr}")]
    Command { exit_code: i32, stderr: String },

    /// The adb binary itself could not be invoked.
    #[error("failed to invoke adb: {0}")]
    Spawn(#[from] std::io::Error),
}

pub type TransportResult<T> = Result<T, TransportError>;
