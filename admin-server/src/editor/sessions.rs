//! Editing session store.
//!
//! Each visit to a trip's transit editor page gets its own session: a
//! [`TransitSequence`] behind a lock, keyed by a fresh UUID. All edits go
//! against the session until an explicit save; a reload issues a new
//! session, so unsaved edits are discarded. Sessions expire after sitting
//! idle and the store is capacity-bounded.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::sequence::TransitSequence;

/// A shared, lockable editing session.
///
/// The lock serializes mutations and holds across the save round-trip, so
/// concurrent requests against one session cannot interleave.
pub type SharedSequence = Arc<Mutex<TransitSequence>>;

/// Configuration for the session store.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long a session survives without being touched.
    pub idle_ttl: Duration,

    /// Maximum number of live sessions.
    pub max_capacity: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_ttl: Duration::from_secs(30 * 60),
            max_capacity: 500,
        }
    }
}

/// In-process store of transit editing sessions.
#[derive(Clone)]
pub struct EditorSessions {
    sessions: MokaCache<Uuid, SharedSequence>,
}

impl EditorSessions {
    /// Create a new store with the given configuration.
    pub fn new(config: &SessionConfig) -> Self {
        let sessions = MokaCache::builder()
            .time_to_idle(config.idle_ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { sessions }
    }

    /// Store a freshly loaded sequence under a new session id.
    pub async fn create(&self, sequence: TransitSequence) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions
            .insert(id, Arc::new(Mutex::new(sequence)))
            .await;
        id
    }

    /// Look up a live session. `None` means the session expired, was
    /// evicted, or never existed; the caller surfaces that as not-found.
    pub async fn get(&self, id: &Uuid) -> Option<SharedSequence> {
        self.sessions.get(id).await
    }

    /// Number of live sessions (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.sessions.entry_count()
    }
}
