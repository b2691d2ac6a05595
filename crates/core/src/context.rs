//! Conversation context owned by the calling application
//!
//! The engine never persists history itself: the host creates one
//! [`ConversationContext`] per session, passes it into every call and renders
//! whatever it wants from it. The engine mutates it in place, capping the
//! sliding window at [`MAX_PREVIOUS_MESSAGES`] entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound on the history window. Oldest entries are evicted first.
pub const MAX_PREVIOUS_MESSAGES: usize = 20;

/// Tax residency of the user, when known
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Residency {
    Resident,
    NonResident,
    #[default]
    Unknown,
}

/// Optional profile supplied by the host application
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserProfile {
    /// Display name, if the host knows it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Declared tax residency
    #[serde(default)]
    pub residency: Residency,
}

/// Mutable per-session scratch state
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SessionState {
    /// Last classified intent, as a stable string tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_intent: Option<String>,
    /// Language detected on the most recent message (ISO 639-1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_language: Option<String>,
}

/// One exchange recorded in the sliding history window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextMessage {
    /// Raw user query as received
    pub query: String,
    /// Text of the answer that was returned
    pub response: String,
    /// When the exchange happened
    pub timestamp: DateTime<Utc>,
    /// Coarse topic tags for the exchange
    #[serde(default)]
    pub topics: Vec<String>,
}

/// Caller-owned conversation state passed into every `process_message` call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationContext {
    /// Session identifier; also keys the engine's interaction log
    pub session_id: String,
    /// Sliding window of past exchanges, newest last
    #[serde(default)]
    pub previous_messages: Vec<ContextMessage>,
    /// Optional user profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_profile: Option<UserProfile>,
    /// Per-session scratch state
    #[serde(default)]
    pub session_state: SessionState,
    /// Total number of messages processed in this session
    #[serde(default)]
    pub message_count: u64,
}

impl ConversationContext {
    /// Create a fresh context with a random session id
    pub fn new() -> Self {
        Self::with_session_id(uuid::Uuid::new_v4().to_string())
    }

    /// Create a fresh context bound to a host-supplied session id
    pub fn with_session_id(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            previous_messages: Vec::new(),
            user_profile: None,
            session_state: SessionState::default(),
            message_count: 0,
        }
    }

    /// Attach a user profile
    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.user_profile = Some(profile);
        self
    }

    /// Declared residency, defaulting to `Unknown` without a profile
    pub fn residency(&self) -> Residency {
        self.user_profile
            .as_ref()
            .map(|p| p.residency)
            .unwrap_or_default()
    }

    /// Record one exchange and truncate the window to the newest
    /// [`MAX_PREVIOUS_MESSAGES`] entries.
    pub fn record_exchange(
        &mut self,
        query: impl Into<String>,
        response: impl Into<String>,
        topics: Vec<String>,
    ) {
        self.previous_messages.push(ContextMessage {
            query: query.into(),
            response: response.into(),
            timestamp: Utc::now(),
            topics,
        });
        if self.previous_messages.len() > MAX_PREVIOUS_MESSAGES {
            let excess = self.previous_messages.len() - MAX_PREVIOUS_MESSAGES;
            self.previous_messages.drain(..excess);
        }
        self.message_count += 1;
    }

    /// Topic tags of the most recent exchanges, newest first, deduplicated
    pub fn recent_topics(&self, limit: usize) -> Vec<String> {
        let mut seen = Vec::new();
        for message in self.previous_messages.iter().rev() {
            for topic in &message.topics {
                if !seen.contains(topic) {
                    seen.push(topic.clone());
                    if seen.len() == limit {
                        return seen;
                    }
                }
            }
        }
        seen
    }
}

impl Default for ConversationContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_never_exceeds_cap() {
        let mut ctx = ConversationContext::new();
        for i in 0..3 * MAX_PREVIOUS_MESSAGES {
            ctx.record_exchange(format!("q{i}"), format!("r{i}"), vec![]);
        }
        assert_eq!(ctx.previous_messages.len(), MAX_PREVIOUS_MESSAGES);
        assert_eq!(ctx.message_count, 3 * MAX_PREVIOUS_MESSAGES as u64);
        // Oldest entries were evicted first
        assert_eq!(ctx.previous_messages[0].query, "q40");
    }

    #[test]
    fn test_recent_topics_dedup() {
        let mut ctx = ConversationContext::new();
        ctx.record_exchange("a", "r", vec!["income_tax".into()]);
        ctx.record_exchange("b", "r", vec!["income_tax".into(), "indirect_tax".into()]);
        let topics = ctx.recent_topics(5);
        assert_eq!(topics, vec!["income_tax".to_string(), "indirect_tax".to_string()]);
    }

    #[test]
    fn test_residency_defaults_to_unknown() {
        let ctx = ConversationContext::new();
        assert_eq!(ctx.residency(), Residency::Unknown);

        let ctx = ConversationContext::new().with_profile(UserProfile {
            display_name: None,
            residency: Residency::NonResident,
        });
        assert_eq!(ctx.residency(), Residency::NonResident);
    }
}
