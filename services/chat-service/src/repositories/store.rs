// In-memory store untuk semua chat, dimiliki AppState dan di-share ke repositories
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{Chat, ParticipantPair};

// Error dari store dan repositories
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Chat not found.")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),
}

#[derive(Debug, Default)]
struct StoreInner {
    chats: HashMap<Uuid, Chat>,
    // Index pasangan participant -> chat id
    pairs: HashMap<ParticipantPair, Uuid>,
}

/// Process-lifetime owner of every [`Chat`].
///
/// All state sits behind one lock, so check-then-create in
/// [`ChatStore::find_or_create`] and appends are atomic with respect to
/// each other. Chats are never removed.
#[derive(Debug, Clone, Default)]
pub struct ChatStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl ChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the chat id for the unordered pair and whether it was created
    /// by this call.
    pub async fn find_or_create(&self, user1: &str, user2: &str) -> (Uuid, bool) {
        let pair = ParticipantPair::new(user1, user2);

        if let Some(chat_id) = self.inner.read().await.pairs.get(&pair) {
            return (*chat_id, false);
        }

        let mut inner = self.inner.write().await;

        // Cek ulang, request lain bisa membuat chat yang sama di antara read dan write
        if let Some(chat_id) = inner.pairs.get(&pair) {
            return (*chat_id, false);
        }

        let chat_id = loop {
            let candidate = Uuid::new_v4();
            if !inner.chats.contains_key(&candidate) {
                break candidate;
            }
        };

        let chat = Chat::new(chat_id, user1, user2);
        inner.pairs.insert(chat.pair(), chat.id);
        inner.chats.insert(chat.id, chat);

        (chat_id, true)
    }

    pub async fn with_chat<R>(&self, chat_id: &Uuid, f: impl FnOnce(&Chat) -> R) -> Option<R> {
        self.inner.read().await.chats.get(chat_id).map(f)
    }

    pub async fn with_chat_mut<R>(&self, chat_id: &Uuid, f: impl FnOnce(&mut Chat) -> R) -> Option<R> {
        self.inner.write().await.chats.get_mut(chat_id).map(f)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.chats.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_or_create_reuses_pair() {
        let store = ChatStore::new();

        let (first, created) = store.find_or_create("Alice", "Bob").await;
        assert!(created);

        let (second, created) = store.find_or_create("Bob", "Alice").await;
        assert!(!created);
        assert_eq!(first, second);
        assert_eq!(store.len().await, 1);

        let users = store.with_chat(&first, |chat| chat.users.clone()).await.unwrap();
        assert_eq!(users, ["Alice".to_string(), "Bob".to_string()]);
    }

    #[tokio::test]
    async fn test_distinct_pairs_get_distinct_chats() {
        let store = ChatStore::new();

        let (a, _) = store.find_or_create("Alice", "Bob").await;
        let (b, _) = store.find_or_create("Alice", "Carol").await;

        assert_ne!(a, b);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_unknown_chat() {
        let store = ChatStore::new();
        assert_eq!(store.len().await, 0);
        assert!(store.with_chat(&Uuid::new_v4(), |chat| chat.id).await.is_none());
        assert!(store.with_chat_mut(&Uuid::new_v4(), |chat| chat.append("Alice", "hi")).await.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_start_creates_one_chat() {
        let store = ChatStore::new();

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                if i % 2 == 0 {
                    store.find_or_create("Alice", "Bob").await.0
                } else {
                    store.find_or_create("Bob", "Alice").await.0
                }
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }

        assert!(ids.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(store.len().await, 1);
    }
}
