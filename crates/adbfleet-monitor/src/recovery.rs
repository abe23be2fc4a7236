//! Connection recovery — the tiered reconnect ladder.
//!
//! Direct retries handle transient link flakiness cheaply. A full adb
//! server restart drops every device session, so it is reserved for
//! persistent failures: tried only after direct retries exhaust, and
//! followed by one more retry pass before giving up for the round.

use std::time::Duration;

use tracing::{error, info, warn};

use adbfleet_transport::Transport;

/// Bounded-retry policy for one reachability check.
#[derive(Debug, Clone)]
pub struct RecoveryPolicy {
    /// Connect attempts per retry pass.
    pub max_attempts: u32,
    /// Pause between attempts.
    pub retry_delay: Duration,
}

impl Default for RecoveryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay: Duration::from_secs(5),
        }
    }
}

/// Terminal outcome of a reachability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reachability {
    /// A session is established; inspection may proceed.
    Connected,
    /// The full ladder was exhausted; skip the device this round.
    Unreachable,
}

/// Establish a session with `address`, escalating through the ladder.
///
/// Ladder: initial connect, bounded direct retries, adb server restart,
/// one more bounded retry pass. Escalation state is scoped to this call;
/// every round starts the ladder fresh.
pub async fn ensure_connected<T: Transport>(
    transport: &T,
    address: &str,
    policy: &RecoveryPolicy,
) -> Reachability {
    if transport.connect(address).await {
        return Reachability::Connected;
    }

    if retry_connect(transport, address, policy).await {
        return Reachability::Connected;
    }

    warn!(
        %address,
        attempts = policy.max_attempts,
        "direct retries exhausted, restarting adb server"
    );
    if let Err(e) = transport.restart_server().await {
        error!(error = %e, "adb server restart failed");
    }

    if retry_connect(transport, address, policy).await {
        return Reachability::Connected;
    }

    error!(%address, "unreachable after adb server restart, skipping");
    Reachability::Unreachable
}

/// One bounded retry pass: up to `max_attempts` connects, paced by
/// `retry_delay` after each failure.
async fn retry_connect<T: Transport>(
    transport: &T,
    address: &str,
    policy: &RecoveryPolicy,
) -> bool {
    for attempt in 1..=policy.max_attempts {
        info!(%address, attempt, "attempting to reconnect");
        if transport.connect(address).await {
            return true;
        }
        tokio::time::sleep(policy.retry_delay).await;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use adbfleet_transport::TransportResult;

    /// Transport double that replays scripted connect results and
    /// records the order of connect / restart calls.
    struct ScriptedTransport {
        connects: Mutex<VecDeque<bool>>,
        log: Mutex<Vec<&'static str>>,
    }

    impl ScriptedTransport {
        fn new(connects: &[bool]) -> Self {
            Self {
                connects: Mutex::new(connects.iter().copied().collect()),
                log: Mutex::new(Vec::new()),
            }
        }

        fn log(&self) -> Vec<&'static str> {
            self.log.lock().unwrap().clone()
        }
    }

    impl Transport for ScriptedTransport {
        async fn run(&self, _address: &str, _args: &[&str]) -> TransportResult<String> {
            self.log.lock().unwrap().push("run");
            Ok(String::new())
        }

        async fn connect(&self, _address: &str) -> bool {
            self.log.lock().unwrap().push("connect");
            self.connects.lock().unwrap().pop_front().unwrap_or(false)
        }

        async fn restart_server(&self) -> TransportResult<()> {
            self.log.lock().unwrap().push("restart");
            Ok(())
        }
    }

    fn fast_policy() -> RecoveryPolicy {
        RecoveryPolicy {
            max_attempts: 3,
            retry_delay: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn immediate_connect_skips_the_ladder() {
        let transport = ScriptedTransport::new(&[true]);
        let outcome = ensure_connected(&transport, "192.168.50.101", &fast_policy()).await;

        assert_eq!(outcome, Reachability::Connected);
        assert_eq!(transport.log(), vec!["connect"]);
    }

    #[tokio::test]
    async fn direct_retry_recovers_without_server_restart() {
        // Initial connect fails, second retry succeeds.
        let transport = ScriptedTransport::new(&[false, false, true]);
        let outcome = ensure_connected(&transport, "192.168.50.101", &fast_policy()).await;

        assert_eq!(outcome, Reachability::Connected);
        assert_eq!(transport.log(), vec!["connect", "connect", "connect"]);
    }

    #[tokio::test]
    async fn server_restart_only_after_direct_retries_exhaust() {
        // Initial + 3 direct retries fail, then post-restart connect succeeds.
        let transport = ScriptedTransport::new(&[false, false, false, false, true]);
        let outcome = ensure_connected(&transport, "192.168.50.103", &fast_policy()).await;

        assert_eq!(outcome, Reachability::Connected);
        assert_eq!(
            transport.log(),
            vec!["connect", "connect", "connect", "connect", "restart", "connect"]
        );
    }

    #[tokio::test]
    async fn exhausted_ladder_is_unreachable() {
        let transport = ScriptedTransport::new(&[]);
        let outcome = ensure_connected(&transport, "192.168.50.101", &fast_policy()).await;

        assert_eq!(outcome, Reachability::Unreachable);
        // Initial + 3 retries + restart + 3 retries.
        assert_eq!(
            transport.log(),
            vec![
                "connect", "connect", "connect", "connect", "restart", "connect", "connect",
                "connect"
            ]
        );
    }

    #[tokio::test]
    async fn attempt_budget_follows_policy() {
        let transport = ScriptedTransport::new(&[]);
        let policy = RecoveryPolicy {
            max_attempts: 1,
            retry_delay: Duration::ZERO,
        };
        let outcome = ensure_connected(&transport, "192.168.50.101", &policy).await;

        assert_eq!(outcome, Reachability::Unreachable);
        assert_eq!(
            transport.log(),
            vec!["connect", "connect", "restart", "connect"]
        );
    }
}
