//! In-memory session transcripts.
//!
//! Per-session chat history behind a synchronized store with LRU eviction.
//! Sessions also age out: a cleanup sweep drops any session older than the
//! configured TTL, counted from creation.

use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use tokio::sync::RwLock;

/// One transcript entry as served by the history endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SessionEntry {
    /// Entry identifier.
    pub id: String,
    /// Role: "user" or "assistant"
    pub role: String,
    /// Entry text.
    pub content: String,
    /// Creation timestamp, RFC 3339 UTC.
    pub timestamp: String,
    /// Provider that produced an assistant entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

#[derive(Debug)]
struct Session {
    created_at: DateTime<Utc>,
    entries: Vec<SessionEntry>,
    message_count: u64,
}

/// Snapshot of one session as served by the history endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    /// Session creation timestamp, RFC 3339 UTC.
    pub created_at: String,
    /// Transcript entries in order.
    pub history: Vec<SessionEntry>,
    /// Number of chat turns recorded.
    pub message_count: u64,
}

/// Synchronized session store with LRU eviction and TTL expiry.
///
/// Uses IndexMap to maintain insertion order for LRU eviction, the same
/// structure as the per-sender conversation history this replaces.
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<IndexMap<String, Session>>,
    max_sessions: usize,
    ttl: Duration,
}

impl SessionStore {
    /// Create a store with the given session cap and TTL in seconds.
    pub fn new(max_sessions: usize, ttl_secs: u64) -> Self {
        Self {
            sessions: RwLock::new(IndexMap::new()),
            max_sessions,
            ttl: Duration::seconds(ttl_secs as i64),
        }
    }

    /// Record one chat turn.
    ///
    /// Creates the session on first use, appends both entries, bumps the
    /// turn counter, marks the session recently used, and LRU-evicts the
    /// oldest sessions past the cap.
    pub async fn record_exchange(
        &self,
        session_id: &str,
        now: DateTime<Utc>,
        user_entry: SessionEntry,
        assistant_entry: SessionEntry,
    ) {
        let mut sessions = self.sessions.write().await;

        // Remove and re-insert to move to end (mark as recently used)
        let mut session = sessions
            .shift_remove(session_id)
            .unwrap_or_else(|| Session {
                created_at: now,
                entries: Vec::new(),
                message_count: 0,
            });

        session.entries.push(user_entry);
        session.entries.push(assistant_entry);
        session.message_count += 1;

        sessions.insert(session_id.to_string(), session);

        // LRU eviction: remove oldest entries if we exceed max_sessions
        while sessions.len() > self.max_sessions {
            sessions.shift_remove_index(0);
        }
    }

    /// Snapshot a session for the history endpoint.
    ///
    /// This marks the session as recently used for LRU purposes.
    pub async fn snapshot(&self, session_id: &str) -> Option<SessionSnapshot> {
        let mut sessions = self.sessions.write().await;

        let session = sessions.shift_remove(session_id)?;
        let snapshot = SessionSnapshot {
            created_at: session.created_at.to_rfc3339(),
            history: session.entries.clone(),
            message_count: session.message_count,
        };
        sessions.insert(session_id.to_string(), session);

        Some(snapshot)
    }

    /// Remove a session. Returns whether it existed.
    pub async fn remove(&self, session_id: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        sessions.shift_remove(session_id).is_some()
    }

    /// Drop sessions whose creation time is older than the TTL.
    ///
    /// Returns how many were dropped.
    pub async fn evict_expired(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| now - session.created_at <= self.ttl);
        let dropped = before - sessions.len();

        if dropped > 0 {
            tracing::info!("Cleaned up {} expired sessions", dropped);
        }

        dropped
    }

    /// Current number of tracked sessions.
    pub async fn len(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }

    /// Whether no sessions are tracked.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
