// Domain model untuk Chat antara dua participant
use uuid::Uuid;

use super::message::{next_timestamp, ChatMessage};

/// Unordered pair of participant names, used as the registry lookup key.
///
/// `(A, B)` and `(B, A)` produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParticipantPair {
    first: String,
    second: String,
}

impl ParticipantPair {
    pub fn new(a: &str, b: &str) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        Self {
            first: first.to_string(),
            second: second.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Chat {
    pub id: Uuid,
    // Urutan sesuai request yang membuat chat
    pub users: [String; 2],
    pub messages: Vec<ChatMessage>,
}

impl Chat {
    // Membuat chat baru dengan log kosong
    pub fn new(id: Uuid, user1: &str, user2: &str) -> Self {
        Self {
            id,
            users: [user1.to_string(), user2.to_string()],
            messages: Vec::new(),
        }
    }

    // Key registry untuk chat ini
    pub fn pair(&self) -> ParticipantPair {
        ParticipantPair::new(&self.users[0], &self.users[1])
    }

    /// Appends a message stamped with the current time, never earlier than
    /// the previous message in this chat.
    pub fn append(&mut self, sender: &str, text: &str) -> ChatMessage {
        let timestamp = next_timestamp(self.messages.last().map(|m| m.timestamp));
        let message = ChatMessage::new(sender, text, timestamp);
        self.messages.push(message.clone());
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_is_symmetric() {
        assert_eq!(ParticipantPair::new("Alice", "Bob"), ParticipantPair::new("Bob", "Alice"));
        assert_ne!(ParticipantPair::new("Alice", "Bob"), ParticipantPair::new("Alice", "Carol"));
    }

    #[test]
    fn test_pair_is_case_sensitive() {
        assert_ne!(ParticipantPair::new("alice", "Bob"), ParticipantPair::new("Alice", "Bob"));
    }

    #[test]
    fn test_chat_keeps_creation_order() {
        let chat = Chat::new(Uuid::new_v4(), "Bob", "Alice");
        assert_eq!(chat.users, ["Bob".to_string(), "Alice".to_string()]);
        assert_eq!(chat.pair(), ParticipantPair::new("Alice", "Bob"));
    }

    #[test]
    fn test_append_keeps_order_and_timestamps() {
        let mut chat = Chat::new(Uuid::new_v4(), "Alice", "Bob");
        for i in 0..5 {
            chat.append("Alice", &format!("message {}", i));
        }

        assert_eq!(chat.messages.len(), 5);
        for (i, message) in chat.messages.iter().enumerate() {
            assert_eq!(message.text, format!("message {}", i));
        }
        assert!(chat.messages.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }
}
