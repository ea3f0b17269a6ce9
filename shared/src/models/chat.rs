// Request/response payloads untuk chat API
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A single chat message as stored by the service and sent over the wire.
///
/// `timestamp` is the server receipt time, serialised as RFC 3339 UTC with
/// millisecond precision (`2024-05-01T10:20:30.123Z`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    pub sender: String,
    pub text: String,
    #[serde(with = "iso_millis")]
    #[schema(value_type = String, format = DateTime, example = "2024-05-01T10:20:30.123Z")]
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(sender: impl Into<String>, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
            timestamp: timestamp.trunc_subsecs(3),
        }
    }
}

// Waktu sekarang dengan presisi milidetik, sama dengan format wire
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct StartChatRequest {
    pub user1: Option<String>,
    pub user2: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartChatResponse {
    pub chat_id: Uuid,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PostMessageRequest {
    pub sender: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostMessageResponse {
    pub success: bool,
    pub message: ChatMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessagesResponse {
    pub messages: Vec<ChatMessage>,
}

// Body error standar: {"error": "..."}
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Serde adapter for `DateTime<Utc>` in `YYYY-MM-DDTHH:MM:SS.mmmZ` form.
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_serialized_with_millis() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 10, 20, 30).unwrap()
            + chrono::Duration::microseconds(123_456);
        let message = ChatMessage::new("Alice", "hi", ts);

        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["timestamp"], "2024-05-01T10:20:30.123Z");
        assert_eq!(json["sender"], "Alice");
        assert_eq!(json["text"], "hi");
    }

    #[test]
    fn test_message_parses_back_from_wire() {
        let raw = r#"{"sender":"Bob","text":"hey","timestamp":"2024-05-01T10:20:30.123Z"}"#;
        let message: ChatMessage = serde_json::from_str(raw).unwrap();

        assert_eq!(message.sender, "Bob");
        assert_eq!(message.timestamp.timestamp_subsec_millis(), 123);
        assert_eq!(serde_json::to_string(&message).unwrap(), raw);
    }

    #[test]
    fn test_invalid_timestamp_rejected() {
        let raw = r#"{"sender":"Bob","text":"hey","timestamp":"yesterday"}"#;
        assert!(serde_json::from_str::<ChatMessage>(raw).is_err());
    }

    #[test]
    fn test_start_request_missing_fields_are_none() {
        let request: StartChatRequest = serde_json::from_str(r#"{"user1":"Alice"}"#).unwrap();
        assert_eq!(request.user1.as_deref(), Some("Alice"));
        assert!(request.user2.is_none());

        let request: StartChatRequest = serde_json::from_str(r#"{"user1":null,"user2":"Bob"}"#).unwrap();
        assert!(request.user1.is_none());
    }

    #[test]
    fn test_start_response_uses_camel_case() {
        let chat_id = Uuid::new_v4();
        let json = serde_json::to_value(StartChatResponse { chat_id }).unwrap();
        assert_eq!(json["chatId"], chat_id.to_string());
    }

    #[test]
    fn test_now_millis_has_no_sub_millisecond_part() {
        let now = now_millis();
        assert_eq!(now.timestamp_subsec_nanos() % 1_000_000, 0);
    }
}
