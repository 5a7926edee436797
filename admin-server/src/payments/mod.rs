//! Withdrawal (wallet command) monitoring.
//!
//! [`watch`] owns the lifecycle of a pending withdrawal: a cancellable timed
//! task that re-fetches the command until it reaches a terminal status.
//! [`scripted`] replays recorded status sequences for tests and local
//! development.

pub mod scripted;
pub mod watch;

pub use scripted::ScriptedCommands;
pub use watch::{CommandStatusSource, GatewayCommandSource, StatusWatcher, WatchConfig};
