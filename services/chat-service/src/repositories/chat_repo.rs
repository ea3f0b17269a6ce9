// Repository untuk session registry (pasangan participant -> chat id)
use shared::utils::validation;
use uuid::Uuid;

use super::store::{ChatStore, StoreError};

#[derive(Clone)]
pub struct ChatRepository {
    store: ChatStore,
}

impl ChatRepository {
    pub fn new(store: ChatStore) -> Self {
        Self { store }
    }

    /// Returns the chat for the unordered pair `(user1, user2)`, creating it
    /// on first request. Idempotent per pair.
    pub async fn start_chat(
        &self,
        user1: Option<&str>,
        user2: Option<&str>,
    ) -> Result<Uuid, StoreError> {
        let (Some(user1), Some(user2)) = (validation::required(user1), validation::required(user2)) else {
            return Err(StoreError::Validation(
                "Both user1 and user2 are required.".to_string(),
            ));
        };

        let (chat_id, created) = self.store.find_or_create(user1, user2).await;

        if created {
            tracing::info!("Chat {} dibuat untuk {} dan {}", chat_id, user1, user2);
        } else {
            tracing::debug!("Chat {} sudah ada untuk {} dan {}", chat_id, user1, user2);
        }

        Ok(chat_id)
    }

    pub async fn chat_count(&self) -> usize {
        self.store.len().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (ChatRepository, ChatStore) {
        let store = ChatStore::new();
        (ChatRepository::new(store.clone()), store)
    }

    fn repo() -> ChatRepository {
        setup().0
    }

    #[tokio::test]
    async fn test_start_same_pair_twice() {
        let repo = repo();
        let first = repo.start_chat(Some("Alice"), Some("Bob")).await.unwrap();
        let second = repo.start_chat(Some("Alice"), Some("Bob")).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_start_swapped_order() {
        let (repo, store) = setup();
        let first = repo.start_chat(Some("Alice"), Some("Bob")).await.unwrap();
        let second = repo.start_chat(Some("Bob"), Some("Alice")).await.unwrap();
        assert_eq!(first, second);

        let (users, empty) = store
            .with_chat(&first, |chat| (chat.users.clone(), chat.messages.is_empty()))
            .await
            .unwrap();
        assert_eq!(users, ["Alice".to_string(), "Bob".to_string()]);
        assert!(empty);
    }

    #[tokio::test]
    async fn test_start_rejects_missing_names() {
        let repo = repo();

        for (user1, user2) in [
            (None, Some("Bob")),
            (Some("Alice"), None),
            (Some(""), Some("Bob")),
            (Some("Alice"), Some("")),
            (None, None),
        ] {
            let err = repo.start_chat(user1, user2).await.unwrap_err();
            assert_eq!(
                err,
                StoreError::Validation("Both user1 and user2 are required.".to_string())
            );
        }

        assert_eq!(repo.chat_count().await, 0);
    }

    #[tokio::test]
    async fn test_same_name_twice_is_a_valid_pair() {
        let (repo, store) = setup();
        let chat_id = repo.start_chat(Some("Alice"), Some("Alice")).await.unwrap();
        assert!(store.with_chat(&chat_id, |chat| chat.id).await.is_some());
        assert_eq!(repo.chat_count().await, 1);
    }

    #[tokio::test]
    async fn test_whitespace_name_is_accepted() {
        let (repo, store) = setup();
        let chat_id = repo.start_chat(Some("   "), Some("Bob")).await.unwrap();

        let users = store.with_chat(&chat_id, |chat| chat.users.clone()).await.unwrap();
        assert_eq!(users, ["   ".to_string(), "Bob".to_string()]);
        assert_eq!(repo.start_chat(Some("Bob"), Some("   ")).await.unwrap(), chat_id);
    }
}
