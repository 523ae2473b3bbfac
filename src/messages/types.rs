use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single chat turn. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: Role,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    /// Two-digit `HH:MM` clock label for display
    pub fn time_label(&self) -> String {
        self.sent_at.format("%H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_time_label_is_zero_padded() {
        let mut msg = ChatMessage::user("hello");
        msg.sent_at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 42).unwrap();
        assert_eq!(msg.time_label(), "07:05");
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let msg = ChatMessage::assistant("hi");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "assistant");
        assert!(!msg.is_user());
    }
}
