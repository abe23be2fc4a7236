//! adbfleetd — the fleet supervisor daemon.
//!
//! Assembles the pieces: loads the fleet config, builds the adb client,
//! and drives the scheduler until Ctrl-C. Fully headless; the scheduler
//! itself stays embeddable behind a watch-channel shutdown.
//!
//! # Usage
//!
//! ```text
//! adbfleetd run --config fleet.toml
//! adbfleetd run --config fleet.toml --once
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing::info;

use adbfleet_core::FleetConfig;
use adbfleet_monitor::RecoveryPolicy;
use adbfleet_scheduler::{FleetScheduler, Pacing};
use adbfleet_transport::AdbClient;

#[derive(Parser)]
#[command(name = "adbfleetd", about = "ADB fleet supervisor daemon")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Supervise the fleet until interrupted.
    Run {
        /// Fleet configuration file.
        #[arg(long, default_value = "fleet.toml")]
        config: PathBuf,

        /// Path to the adb binary.
        #[arg(long, default_value = "adb")]
        adb_path: PathBuf,

        /// Perform a single round and exit.
        #[arg(long)]
        once: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,adbfleetd=debug,adbfleet=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            config,
            adb_path,
            once,
        } => run(config, adb_path, once).await,
    }
}

async fn run(config_path: PathBuf, adb_path: PathBuf, once: bool) -> anyhow::Result<()> {
    let config = FleetConfig::from_file(&config_path)?;
    info!(
        path = ?config_path,
        devices = config.devices.len(),
        primary = %config.apps.primary_package,
        "fleet config loaded"
    );

    let client = AdbClient::new(adb_path);
    let scheduler = FleetScheduler::new(client, config.devices.clone(), config.apps.clone())
        .with_recovery(RecoveryPolicy {
            max_attempts: config.recovery.max_attempts,
            retry_delay: config.recovery.retry_delay(),
        })
        .with_pacing(Pacing {
            device_delay: config.pacing.device_delay(),
            round_delay: config.pacing.round_delay(),
        });

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    if once {
        let results = scheduler.run_round(&mut shutdown_rx).await;
        info!(checked = results.len(), "single round complete");
        return Ok(());
    }

    let handle = tokio::spawn(async move {
        scheduler.run(shutdown_rx).await;
    });

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");
    let _ = shutdown_tx.send(true);
    handle.await?;

    info!("adbfleetd stopped");
    Ok(())
}
