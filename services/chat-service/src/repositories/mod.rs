// Repository modules untuk Chat Service
pub mod chat_repo;
pub mod message_repo;
pub mod store;

// Export publik
pub use chat_repo::*;
pub use message_repo::*;
pub use store::*;
