use super::settings::AssistantSettings;
use crate::alerts::PriceAlert;
use crate::messages::ChatMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A transient user-visible message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

/// Events emitted by the assistant
#[derive(Debug, Clone)]
pub enum AssistantEvent {
    /// A message was added to the log
    MessageAppended(ChatMessage),

    /// An alert was removed from the feed
    AlertDismissed(PriceAlert),

    /// Something the user should see briefly
    Notice(Notice),

    ListeningChanged(bool),

    MuteChanged(bool),

    SettingsChanged(AssistantSettings),
}
