//! Per-user bounded conversation history.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Turns kept per user.
pub const MAX_TURNS: usize = 15;

/// One exchange: what the user said and what Nancy answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub input: String,
    pub output: String,
}

/// In-memory history keyed by user id. Clones share the same state.
///
/// Each user holds at most `capacity` turns; pushing onto a full history evicts the oldest.
#[derive(Debug, Clone)]
pub struct ConversationStore {
    capacity: usize,
    turns: Arc<RwLock<HashMap<i64, VecDeque<Turn>>>>,
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::with_capacity(MAX_TURNS)
    }

    /// A capacity of 0 is treated as 1.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            turns: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first; empty for unknown users.
    pub async fn history(&self, user_id: i64) -> Vec<Turn> {
        self.turns
            .read()
            .await
            .get(&user_id)
            .map(|t| t.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub async fn push(&self, user_id: i64, input: impl Into<String>, output: impl Into<String>) {
        let mut turns = self.turns.write().await;
        let history = turns.entry(user_id).or_default();
        while history.len() >= self.capacity {
            history.pop_front();
        }
        history.push_back(Turn {
            input: input.into(),
            output: output.into(),
        });
        debug!(user_id, len = history.len(), "Conversation turn stored");
    }

    pub async fn clear(&self, user_id: i64) {
        self.turns.write().await.remove(&user_id);
    }

    pub async fn len(&self, user_id: i64) -> usize {
        self.turns
            .read()
            .await
            .get(&user_id)
            .map_or(0, VecDeque::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_user_is_empty() {
        let store = ConversationStore::new();
        assert!(store.history(1).await.is_empty());
        assert_eq!(store.len(1).await, 0);
    }

    #[tokio::test]
    async fn evicts_oldest_past_capacity() {
        let store = ConversationStore::new();
        for i in 0..17 {
            store.push(1, format!("in {i}"), format!("out {i}")).await;
        }

        let history = store.history(1).await;
        assert_eq!(history.len(), MAX_TURNS);
        assert_eq!(history[0].input, "in 2");
        assert_eq!(history[14].output, "out 16");
    }

    #[tokio::test]
    async fn users_are_isolated() {
        let store = ConversationStore::with_capacity(2);
        store.push(1, "a", "b").await;
        store.push(2, "c", "d").await;
        store.push(2, "e", "f").await;
        store.push(2, "g", "h").await;

        assert_eq!(store.len(1).await, 1);
        assert_eq!(store.len(2).await, 2);

        store.clear(2).await;
        assert_eq!(store.len(2).await, 0);
        assert_eq!(
            store.history(1).await,
            vec![Turn {
                input: "a".to_string(),
                output: "b".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn zero_capacity_keeps_last_turn() {
        let store = ConversationStore::with_capacity(0);
        store.push(1, "a", "b").await;
        store.push(1, "c", "d").await;
        assert_eq!(store.capacity(), 1);
        assert_eq!(store.history(1).await[0].input, "c");
    }
}
