//! Withdrawal status watcher.
//!
//! While a wallet command sits in `WAIT_TO_PAY` the payment gateway may flip
//! it to a terminal state at any moment (the customer scans the QR, the
//! transfer bounces). The watcher re-fetches the command on a fixed interval,
//! publishes every observed status over a watch channel, and stops itself on
//! the first terminal status. Dropping the handle aborts the task, so a
//! watcher never outlives the page that started it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::WalletStatus;
use crate::gateway::{GatewayClient, GatewayError, wallet_status};

/// A source of wallet command statuses.
///
/// The production implementation is [`GatewayCommandSource`]; tests use the
/// scripted source in [`scripted`](super::scripted).
pub trait CommandStatusSource: Send + Sync + 'static {
    /// Fetch the current status of the command.
    fn fetch_status(
        &self,
        command_id: &str,
    ) -> impl Future<Output = Result<WalletStatus, GatewayError>> + Send;
}

/// Fetches statuses from the payment gateway with the operator's token.
#[derive(Clone)]
pub struct GatewayCommandSource {
    client: Arc<GatewayClient>,
    token: String,
}

impl GatewayCommandSource {
    pub fn new(client: Arc<GatewayClient>, token: impl Into<String>) -> Self {
        Self {
            client,
            token: token.into(),
        }
    }
}

impl CommandStatusSource for GatewayCommandSource {
    async fn fetch_status(&self, command_id: &str) -> Result<WalletStatus, GatewayError> {
        let command = self.client.get_wallet_command(&self.token, command_id).await?;
        wallet_status(&command).map_err(|e| GatewayError::Json {
            message: e.to_string(),
            body: None,
        })
    }
}

/// Configuration for the watcher.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// How often to re-fetch a pending command.
    pub poll_interval: Duration,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            // The original dashboard polled every 3 seconds
            poll_interval: Duration::from_secs(3),
        }
    }
}

/// Handle to a running status watcher.
///
/// Receivers see `None` until the first fetch lands. The task ends on its
/// own after publishing a terminal status; dropping the handle aborts it
/// early.
pub struct StatusWatcher {
    rx: watch::Receiver<Option<WalletStatus>>,
    task: JoinHandle<()>,
}

impl StatusWatcher {
    /// Start watching a command.
    ///
    /// The first fetch happens immediately; subsequent fetches follow the
    /// configured interval. Fetch failures are logged and do not stop the
    /// watcher; the command may still resolve on a later poll.
    pub fn spawn<S: CommandStatusSource>(
        source: S,
        command_id: impl Into<String>,
        config: &WatchConfig,
    ) -> Self {
        let command_id = command_id.into();
        let (tx, rx) = watch::channel(None);
        let poll_interval = config.poll_interval;

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(poll_interval);
            loop {
                interval.tick().await;
                match source.fetch_status(&command_id).await {
                    Ok(status) => {
                        tracing::debug!(command = %command_id, status = %status, "observed wallet status");
                        if tx.send(Some(status)).is_err() {
                            // Nobody is listening any more
                            break;
                        }
                        if status.is_terminal() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(command = %command_id, error = %e, "wallet status fetch failed");
                    }
                }
            }
        });

        Self { rx, task }
    }

    /// The most recently observed status, if any fetch has landed.
    pub fn latest(&self) -> Option<WalletStatus> {
        *self.rx.borrow()
    }

    /// A receiver for callers that want to await status changes.
    pub fn subscribe(&self) -> watch::Receiver<Option<WalletStatus>> {
        self.rx.clone()
    }

    /// True once the watcher has stopped (terminal status seen or aborted).
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for StatusWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payments::scripted::ScriptedCommands;

    fn fast_config() -> WatchConfig {
        WatchConfig {
            poll_interval: Duration::from_millis(100),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn emits_each_status_and_stops_on_terminal() {
        let source = ScriptedCommands::from_sequences([(
            "wc-1",
            vec![
                WalletStatus::WaitToPay,
                WalletStatus::WaitToPay,
                WalletStatus::Success,
            ],
        )]);

        let watcher = StatusWatcher::spawn(source, "wc-1", &fast_config());
        let mut rx = watcher.subscribe();

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), Some(WalletStatus::WaitToPay));

        // Two more polls: another WAIT_TO_PAY, then the terminal SUCCESS
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(watcher.latest(), Some(WalletStatus::Success));

        // The task ends by itself after the terminal status
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(watcher.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn already_terminal_command_stops_after_first_fetch() {
        let source = ScriptedCommands::from_sequences([("wc-2", vec![WalletStatus::Rejected])]);

        let watcher = StatusWatcher::spawn(source, "wc-2", &fast_config());
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(watcher.latest(), Some(WalletStatus::Rejected));
        assert!(watcher.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_errors_do_not_stop_polling() {
        // An unknown command id makes every fetch fail
        let source = ScriptedCommands::from_sequences([("other", vec![WalletStatus::Success])]);

        let watcher = StatusWatcher::spawn(source, "wc-missing", &fast_config());
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert_eq!(watcher.latest(), None);
        assert!(!watcher.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_script_repeats_last_status() {
        let source =
            ScriptedCommands::from_sequences([("wc-3", vec![WalletStatus::WaitToPay])]);

        let watcher = StatusWatcher::spawn(source, "wc-3", &fast_config());
        tokio::time::sleep(Duration::from_millis(500)).await;

        // Still pending, still polling
        assert_eq!(watcher.latest(), Some(WalletStatus::WaitToPay));
        assert!(!watcher.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_handle_aborts_task() {
        let source =
            ScriptedCommands::from_sequences([("wc-4", vec![WalletStatus::WaitToPay])]);

        let watcher = StatusWatcher::spawn(source, "wc-4", &fast_config());
        let mut rx = watcher.subscribe();
        rx.changed().await.unwrap();

        drop(watcher);
        tokio::time::sleep(Duration::from_millis(200)).await;

        // The channel closes once the task is gone
        assert!(rx.changed().await.is_err());
    }
}
