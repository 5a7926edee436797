//! Application state for the web layer.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::editor::{EditorSessions, SessionConfig};
use crate::gateway::GatewayClient;
use crate::payments::{StatusWatcher, WatchConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Gateway client (all backend data goes through this)
    pub gateway: Arc<GatewayClient>,

    /// Live transit-editing sessions
    pub sessions: EditorSessions,

    /// Running withdrawal watchers, keyed by wallet command id
    pub watchers: Arc<Mutex<HashMap<String, StatusWatcher>>>,

    /// Polling configuration for withdrawal watchers
    pub watch_config: WatchConfig,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        gateway: GatewayClient,
        session_config: &SessionConfig,
        watch_config: WatchConfig,
    ) -> Self {
        Self {
            gateway: Arc::new(gateway),
            sessions: EditorSessions::new(session_config),
            watchers: Arc::new(Mutex::new(HashMap::new())),
            watch_config,
        }
    }

    /// Register a watcher for a wallet command.
    ///
    /// Finished watchers are swept out first, so handles for commands nobody
    /// polled again do not accumulate over the server's lifetime. A watcher
    /// already registered under the same id is replaced; its task aborts on
    /// drop.
    pub async fn track_watcher(&self, command_id: String, watcher: StatusWatcher) {
        let mut watchers = self.watchers.lock().await;
        watchers.retain(|_, w| !w.is_finished());
        watchers.insert(command_id, watcher);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::domain::WalletStatus;
    use crate::gateway::{GatewayClient, GatewayConfig};
    use crate::payments::ScriptedCommands;

    fn test_state() -> AppState {
        let gateway = GatewayClient::new(GatewayConfig::new("http://localhost:1")).unwrap();
        AppState::new(gateway, &SessionConfig::default(), WatchConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn tracking_a_watcher_sweeps_finished_ones() {
        let state = test_state();
        let config = WatchConfig {
            poll_interval: Duration::from_millis(100),
        };
        let source = ScriptedCommands::from_sequences([
            ("wc-done", vec![WalletStatus::Success]),
            ("wc-pending", vec![WalletStatus::WaitToPay]),
        ]);

        let done = StatusWatcher::spawn(source.clone(), "wc-done", &config);
        state.track_watcher("wc-done".into(), done).await;

        // SUCCESS is terminal; the first watcher's task ends on its own
        tokio::time::sleep(Duration::from_millis(200)).await;

        let pending = StatusWatcher::spawn(source, "wc-pending", &config);
        state.track_watcher("wc-pending".into(), pending).await;

        let watchers = state.watchers.lock().await;
        assert!(!watchers.contains_key("wc-done"));
        assert!(watchers.contains_key("wc-pending"));
    }

    #[tokio::test(start_paused = true)]
    async fn tracking_replaces_a_watcher_for_the_same_command() {
        let state = test_state();
        let config = WatchConfig {
            poll_interval: Duration::from_millis(100),
        };
        let source =
            ScriptedCommands::from_sequences([("wc-1", vec![WalletStatus::WaitToPay])]);

        let first = StatusWatcher::spawn(source.clone(), "wc-1", &config);
        state.track_watcher("wc-1".into(), first).await;
        let second = StatusWatcher::spawn(source, "wc-1", &config);
        state.track_watcher("wc-1".into(), second).await;

        assert_eq!(state.watchers.lock().await.len(), 1);
    }
}
