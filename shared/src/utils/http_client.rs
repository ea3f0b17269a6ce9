// HTTP client untuk chat service (start chat, kirim pesan, polling history)
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::env;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

use crate::models::chat::{
    ChatMessage, ErrorResponse, MessagesResponse, PostMessageRequest, PostMessageResponse,
    StartChatRequest, StartChatResponse,
};

pub const DEFAULT_CHAT_SERVICE_URL: &str = "http://localhost:3001";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

#[derive(Debug, Error)]
pub enum ChatClientError {
    #[error("No active chat session")]
    NoActiveChat,

    #[error("Chat not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Response parsing error: {0}")]
    ParseError(String),
}

/// Client for one chat service instance.
///
/// Remembers the chat opened by [`ChatClient::start_chat`]; message calls
/// fail with [`ChatClientError::NoActiveChat`] until a chat is set.
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: Client,
    base_url: String,
    current_chat_id: Option<Uuid>,
}

impl ChatClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client: Client::new(),
            base_url,
            current_chat_id: None,
        }
    }

    // Base URL dari CHAT_SERVICE_URL, fallback ke instance default
    pub fn from_env() -> Self {
        let base_url = env::var("CHAT_SERVICE_URL")
            .unwrap_or_else(|_| DEFAULT_CHAT_SERVICE_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn current_chat_id(&self) -> Option<Uuid> {
        self.current_chat_id
    }

    pub fn set_current_chat_id(&mut self, chat_id: Uuid) {
        self.current_chat_id = Some(chat_id);
    }

    // Buka chat untuk pasangan user, simpan chat id sebagai chat aktif
    pub async fn start_chat(&mut self, user1: &str, user2: &str) -> Result<Uuid, ChatClientError> {
        let body = StartChatRequest {
            user1: Some(user1.to_string()),
            user2: Some(user2.to_string()),
        };

        let response: StartChatResponse = self.post("/chat/start", &body).await?;
        self.current_chat_id = Some(response.chat_id);

        tracing::debug!("Chat {} aktif untuk {} dan {}", response.chat_id, user1, user2);
        Ok(response.chat_id)
    }

    pub async fn send_message(&self, sender: &str, text: &str) -> Result<ChatMessage, ChatClientError> {
        let chat_id = self.active_chat()?;
        let body = PostMessageRequest {
            sender: Some(sender.to_string()),
            text: Some(text.to_string()),
        };

        let response: PostMessageResponse = self
            .post(&format!("/chat/{}/message", chat_id), &body)
            .await?;

        Ok(response.message)
    }

    pub async fn get_messages(&self) -> Result<Vec<ChatMessage>, ChatClientError> {
        let chat_id = self.active_chat()?;
        let response: MessagesResponse = self
            .get(&format!("/chat/{}/messages", chat_id))
            .await?;

        Ok(response.messages)
    }

    /// Polls the active chat every `every` and publishes each snapshot.
    ///
    /// Last snapshot wins. The task ends once every receiver is dropped;
    /// failed polls are logged and retried on the next tick. Must be called
    /// from within a tokio runtime.
    pub fn spawn_message_poller(
        &self,
        every: Duration,
    ) -> Result<watch::Receiver<Vec<ChatMessage>>, ChatClientError> {
        let chat_id = self.active_chat()?;
        let (tx, rx) = watch::channel(Vec::new());
        let client = self.clone();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = tx.closed() => break,
                }

                match client.get_messages().await {
                    Ok(messages) => {
                        if tx.send(messages).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Polling chat {} gagal: {}", chat_id, e);
                    }
                }
            }

            tracing::debug!("Message poller untuk chat {} berhenti", chat_id);
        });

        Ok(rx)
    }

    fn active_chat(&self) -> Result<Uuid, ChatClientError> {
        self.current_chat_id.ok_or(ChatClientError::NoActiveChat)
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ChatClientError> {
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ChatClientError::RequestFailed(e.to_string()))?;

        Self::handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ChatClientError> {
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ChatClientError::RequestFailed(e.to_string()))?;

        Self::handle_response(response).await
    }

    // Map status code ke ChatClientError, parse JSON kalau sukses
    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, ChatClientError> {
        let status = response.status();

        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ChatClientError::ParseError(e.to_string()));
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let message = serde_json::from_str::<ErrorResponse>(&error_text)
            .map(|body| body.error)
            .unwrap_or(error_text);

        match status {
            StatusCode::NOT_FOUND => Err(ChatClientError::NotFound(message)),
            StatusCode::BAD_REQUEST => Err(ChatClientError::BadRequest(message)),
            _ => Err(ChatClientError::RequestFailed(format!("Status {}: {}", status, message))),
        }
    }
}
