// Shared library untuk chat service dan client
pub mod models;
pub mod utils;

pub use models::chat::{
    ChatMessage, ErrorResponse, MessagesResponse, PostMessageRequest, PostMessageResponse,
    StartChatRequest, StartChatResponse,
};
pub use utils::http_client::{ChatClient, ChatClientError};
