//! Voice input and output for the assistant
//!
//! This module provides:
//! - A capability wrapper for optional host features
//! - Speech synthesis backends and text normalization
//! - The voice facade the assistant talks to

pub mod capability;
pub mod synthesis;
pub mod voice;

// Re-export commonly used types
pub use capability::Capability;
pub use synthesis::{normalize_for_speech, SpeechSynthesizer, TracingSynthesizer, Utterance};
pub use voice::{ListenToggle, SimulatedRecognizer, SpeechOutcome, SpeechRecognizer, VoiceFacade};
