// Modul domain untuk Chat Service
pub mod chat;
pub mod message;

// Export publik
pub use chat::*;
pub use message::*;
