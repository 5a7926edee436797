//! Scripted wallet command source for development and tests.
//!
//! Serves pre-recorded status sequences as if the payment gateway were
//! resolving commands, so the watcher can be exercised without credentials.
//! Scripts load from a directory of `{command_id}.json` files, each holding
//! an array of wire-form statuses (e.g. `["WAIT_TO_PAY", "SUCCESS"]`).

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::WalletStatus;
use crate::gateway::GatewayError;

use super::watch::CommandStatusSource;

/// Per-command playback state.
struct Script {
    statuses: Vec<WalletStatus>,
    cursor: usize,
}

/// Scripted command source.
///
/// Each fetch returns the next status in the command's script; once the
/// script is exhausted the last status repeats, matching a gateway that has
/// settled on a final answer.
#[derive(Clone)]
pub struct ScriptedCommands {
    scripts: Arc<Mutex<HashMap<String, Script>>>,
}

impl ScriptedCommands {
    /// Load scripts from a directory of `{command_id}.json` files.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, GatewayError> {
        let data_dir = data_dir.as_ref();
        let mut scripts = HashMap::new();

        let entries = std::fs::read_dir(data_dir).map_err(|e| GatewayError::Api {
            status: 0,
            message: format!("failed to read script directory {data_dir:?}: {e}"),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| GatewayError::Api {
                status: 0,
                message: format!("failed to read directory entry: {e}"),
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let command_id = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| GatewayError::Api {
                    status: 0,
                    message: format!("invalid script filename: {path:?}"),
                })?
                .to_string();

            let json = std::fs::read_to_string(&path).map_err(|e| GatewayError::Api {
                status: 0,
                message: format!("failed to read {path:?}: {e}"),
            })?;

            let raw: Vec<String> =
                serde_json::from_str(&json).map_err(|e| GatewayError::Api {
                    status: 0,
                    message: format!("failed to parse {path:?}: {e}"),
                })?;

            let statuses = raw
                .iter()
                .map(|s| WalletStatus::parse(s))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| GatewayError::Api {
                    status: 0,
                    message: format!("bad status in {path:?}: {e}"),
                })?;

            if statuses.is_empty() {
                return Err(GatewayError::Api {
                    status: 0,
                    message: format!("empty script in {path:?}"),
                });
            }

            scripts.insert(command_id, Script { statuses, cursor: 0 });
        }

        if scripts.is_empty() {
            return Err(GatewayError::Api {
                status: 0,
                message: format!("no script files found in {data_dir:?}"),
            });
        }

        Ok(Self {
            scripts: Arc::new(Mutex::new(scripts)),
        })
    }

    /// Build a source directly from in-memory sequences.
    ///
    /// Sequences with no statuses are dropped; fetching such a command
    /// answers `NotFound`, same as an id that was never scripted.
    pub fn from_sequences<I, K>(sequences: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<WalletStatus>)>,
        K: Into<String>,
    {
        let scripts = sequences
            .into_iter()
            .filter(|(_, statuses)| !statuses.is_empty())
            .map(|(id, statuses)| (id.into(), Script { statuses, cursor: 0 }))
            .collect();

        Self {
            scripts: Arc::new(Mutex::new(scripts)),
        }
    }
}

impl CommandStatusSource for ScriptedCommands {
    async fn fetch_status(&self, command_id: &str) -> Result<WalletStatus, GatewayError> {
        let mut scripts = self.scripts.lock().await;
        let script = scripts.get_mut(command_id).ok_or(GatewayError::NotFound)?;

        let status = script.statuses[script.cursor.min(script.statuses.len() - 1)];
        if script.cursor + 1 < script.statuses.len() {
            script.cursor += 1;
        }
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn plays_statuses_in_order_then_repeats_last() {
        let source = ScriptedCommands::from_sequences([(
            "wc-1",
            vec![WalletStatus::WaitToResolve, WalletStatus::WaitToPay],
        )]);

        assert_eq!(
            source.fetch_status("wc-1").await.unwrap(),
            WalletStatus::WaitToResolve
        );
        assert_eq!(
            source.fetch_status("wc-1").await.unwrap(),
            WalletStatus::WaitToPay
        );
        assert_eq!(
            source.fetch_status("wc-1").await.unwrap(),
            WalletStatus::WaitToPay
        );
    }

    #[tokio::test]
    async fn empty_sequences_are_dropped() {
        let source = ScriptedCommands::from_sequences([
            ("wc-empty", Vec::new()),
            ("wc-1", vec![WalletStatus::Success]),
        ]);

        assert!(matches!(
            source.fetch_status("wc-empty").await,
            Err(GatewayError::NotFound)
        ));
        assert_eq!(
            source.fetch_status("wc-1").await.unwrap(),
            WalletStatus::Success
        );
    }

    #[tokio::test]
    async fn unknown_command_is_not_found() {
        let source = ScriptedCommands::from_sequences([("wc-1", vec![WalletStatus::Success])]);

        assert!(matches!(
            source.fetch_status("nope").await,
            Err(GatewayError::NotFound)
        ));
    }

    #[tokio::test]
    async fn loads_scripts_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("wc-9.json"),
            r#"["WAIT_TO_PAY", "SUCCESS"]"#,
        )
        .unwrap();

        let source = ScriptedCommands::from_dir(dir.path()).unwrap();
        assert_eq!(
            source.fetch_status("wc-9").await.unwrap(),
            WalletStatus::WaitToPay
        );
        assert_eq!(
            source.fetch_status("wc-9").await.unwrap(),
            WalletStatus::Success
        );
    }

    #[test]
    fn rejects_bad_script_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("wc-bad.json"), r#"["NOT_A_STATUS"]"#).unwrap();
        assert!(ScriptedCommands::from_dir(dir.path()).is_err());

        let empty_dir = tempfile::tempdir().unwrap();
        assert!(ScriptedCommands::from_dir(empty_dir.path()).is_err());
    }

    #[test]
    fn rejects_empty_script() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("wc-empty.json"), "[]").unwrap();
        assert!(ScriptedCommands::from_dir(dir.path()).is_err());
    }

    #[test]
    fn ignores_non_json_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("wc-1.json"), r#"["SUCCESS"]"#).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();

        assert!(ScriptedCommands::from_dir(dir.path()).is_ok());
    }
}
