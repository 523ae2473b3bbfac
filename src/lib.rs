pub mod alerts;
pub mod integration;
pub mod messages;
pub mod responder;
pub mod speech;
pub mod ui;

use thiserror::Error;

pub use integration::{Assistant, AssistantConfig, AssistantEvent, AssistantSettings};

#[derive(Error, Debug, Clone)]
pub enum AssistantError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IOError(String),

    #[error("Speech error: {0}")]
    SpeechError(String),

    #[error("Task error: {0}")]
    TaskError(String),

    #[error("Unknown setting: {0}")]
    UnknownSetting(String),

    #[error("Invalid alert: {0}")]
    InvalidAlert(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<std::io::Error> for AssistantError {
    fn from(e: std::io::Error) -> Self {
        AssistantError::IOError(e.to_string())
    }
}

impl From<serde_json::Error> for AssistantError {
    fn from(e: serde_json::Error) -> Self {
        AssistantError::SerializationError(e.to_string())
    }
}

impl AssistantError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Bad config needs the user to edit the file
            AssistantError::ConfigError(_) => false,
            AssistantError::IOError(_) => false,
            // Speech falls back to text-only output
            AssistantError::SpeechError(_) => true,
            // A reply task panicked; the session keeps going
            AssistantError::TaskError(_) => true,
            AssistantError::UnknownSetting(_) => true,
            AssistantError::InvalidAlert(_) => true,
            AssistantError::SerializationError(_) => true,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            AssistantError::ConfigError(_) => {
                "Configuration error. Please check settings.".to_string()
            }
            AssistantError::IOError(_) => "File system error occurred.".to_string(),
            AssistantError::SpeechError(_) => {
                "Text-to-speech failed. Response will be shown as text.".to_string()
            }
            AssistantError::TaskError(_) => {
                "The assistant could not finish that reply. Please try again.".to_string()
            }
            AssistantError::UnknownSetting(name) => {
                format!("There is no setting called \"{}\".", name)
            }
            AssistantError::InvalidAlert(_) => "That price alert is not valid.".to_string(),
            AssistantError::SerializationError(_) => {
                "Could not export the conversation.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AssistantError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: AssistantError = io.into();
        assert!(matches!(err, AssistantError::IOError(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_user_message_names_setting() {
        let err = AssistantError::UnknownSetting("volume".into());
        assert!(err.is_recoverable());
        assert!(err.user_message().contains("volume"));
    }
}
