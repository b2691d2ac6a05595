//! Session-keyed interaction log
//!
//! A bounded diagnostic ring per session. Keying by session id keeps
//! concurrent sessions from interleaving entries in one shared buffer, and
//! the per-key shard lock gives the single-writer discipline FIFO eviction
//! needs.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use fiscal_core::LegalReference;

/// Ring capacity per session; oldest entries are evicted first
pub const MAX_LOG_ENTRIES: usize = 100;

/// Minimal view of the conversation at the time of one call
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContextSnapshot {
    pub message_count: u64,
    pub recent_topics: Vec<String>,
}

/// One recorded invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionLogEntry {
    pub timestamp: DateTime<Utc>,
    pub query: String,
    pub response_text: String,
    pub confidence: f32,
    pub context_snapshot: ContextSnapshot,
    #[serde(default)]
    pub law_references: Vec<LegalReference>,
}

/// All session rings, keyed by session id
#[derive(Debug, Default)]
pub struct InteractionLogs {
    sessions: DashMap<String, VecDeque<InteractionLogEntry>>,
}

impl InteractionLogs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to a session's ring, evicting the oldest past the cap
    pub fn record(&self, session_id: &str, entry: InteractionLogEntry) {
        let mut ring = self.sessions.entry(session_id.to_string()).or_default();
        ring.push_back(entry);
        while ring.len() > MAX_LOG_ENTRIES {
            ring.pop_front();
        }
    }

    /// Snapshot of one session's entries, oldest first
    pub fn snapshot(&self, session_id: &str) -> Vec<InteractionLogEntry> {
        self.sessions
            .get(session_id)
            .map(|ring| ring.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of entries currently held for a session
    pub fn len(&self, session_id: &str) -> usize {
        self.sessions.get(session_id).map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self, session_id: &str) -> bool {
        self.len(session_id) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(query: &str) -> InteractionLogEntry {
        InteractionLogEntry {
            timestamp: Utc::now(),
            query: query.to_string(),
            response_text: String::new(),
            confidence: 0.5,
            context_snapshot: ContextSnapshot::default(),
            law_references: vec![],
        }
    }

    #[test]
    fn test_ring_caps_at_limit_fifo() {
        let logs = InteractionLogs::new();
        for i in 0..(MAX_LOG_ENTRIES + 50) {
            logs.record("s1", entry(&format!("q{i}")));
        }
        assert_eq!(logs.len("s1"), MAX_LOG_ENTRIES);
        let snapshot = logs.snapshot("s1");
        assert_eq!(snapshot.first().unwrap().query, "q50");
        assert_eq!(
            snapshot.last().unwrap().query,
            format!("q{}", MAX_LOG_ENTRIES + 49)
        );
    }

    #[test]
    fn test_sessions_do_not_interleave() {
        let logs = InteractionLogs::new();
        logs.record("alpha", entry("from alpha"));
        logs.record("beta", entry("from beta"));
        let alpha = logs.snapshot("alpha");
        assert_eq!(alpha.len(), 1);
        assert_eq!(alpha[0].query, "from alpha");
        assert_eq!(logs.len("beta"), 1);
        assert!(logs.is_empty("unknown"));
    }
}
