// Repository untuk message log per chat
use shared::utils::validation;
use uuid::Uuid;

use super::store::{ChatStore, StoreError};
use crate::domain::ChatMessage;

#[derive(Clone)]
pub struct MessageRepository {
    store: ChatStore,
}

impl MessageRepository {
    pub fn new(store: ChatStore) -> Self {
        Self { store }
    }

    /// Appends a message to the chat log.
    ///
    /// An unknown chat is reported before missing fields are.
    pub async fn append_message(
        &self,
        chat_id: &Uuid,
        sender: Option<&str>,
        text: Option<&str>,
    ) -> Result<ChatMessage, StoreError> {
        let appended = self
            .store
            .with_chat_mut(chat_id, |chat| {
                match (validation::required(sender), validation::required(text)) {
                    (Some(sender), Some(text)) => Ok(chat.append(sender, text)),
                    _ => Err(StoreError::Validation("Sender and text are required.".to_string())),
                }
            })
            .await
            .ok_or_else(|| StoreError::NotFound(chat_id.to_string()))??;

        tracing::debug!("Message dari {} disimpan di chat {}", appended.sender, chat_id);
        Ok(appended)
    }

    // Semua pesan chat sesuai urutan append
    pub async fn list_messages(&self, chat_id: &Uuid) -> Result<Vec<ChatMessage>, StoreError> {
        self.store
            .with_chat(chat_id, |chat| chat.messages.clone())
            .await
            .ok_or_else(|| StoreError::NotFound(chat_id.to_string()))
    }
}
