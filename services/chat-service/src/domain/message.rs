// Domain model untuk Message
use chrono::{DateTime, Utc};

pub use shared::models::chat::{now_millis, ChatMessage};

// Timestamp pesan berikutnya: waktu sekarang, tapi tidak mundur dari pesan sebelumnya
pub fn next_timestamp(previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = now_millis();
    match previous {
        Some(prev) if prev > now => prev,
        _ => now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_timestamp_without_previous() {
        let before = now_millis();
        let ts = next_timestamp(None);
        assert!(ts >= before);
    }

    #[test]
    fn test_next_timestamp_never_goes_backwards() {
        let future = now_millis() + chrono::Duration::seconds(60);
        assert_eq!(next_timestamp(Some(future)), future);
    }

    #[test]
    fn test_next_timestamp_advances_past_old_message() {
        let past = now_millis() - chrono::Duration::seconds(60);
        assert!(next_timestamp(Some(past)) > past);
    }
}
