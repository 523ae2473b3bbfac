//! Voice facade over optional speech synthesis and recognition
//!
//! Both capabilities are chosen when the facade is built, and the chosen
//! backend is asked again on every call whether it can serve it. Speaking
//! without synthesis, or while muted, is a silent no-op. Listening without
//! recognition is reported back to the caller so it can surface a notice.

use super::capability::Capability;
use super::synthesis::{normalize_for_speech, SpeechSynthesizer, TracingSynthesizer, Utterance};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Source of a captured transcript
pub trait SpeechRecognizer: Send + Sync {
    /// Text heard during the capture session that just ended
    fn transcript(&self) -> String;

    /// Checked when a session starts and when it ends
    fn is_available(&self) -> bool {
        true
    }
}

/// Recognizer that always "hears" the same phrase
#[derive(Debug, Clone)]
pub struct SimulatedRecognizer {
    transcript: String,
}

impl SimulatedRecognizer {
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
        }
    }
}

impl SpeechRecognizer for SimulatedRecognizer {
    fn transcript(&self) -> String {
        self.transcript.clone()
    }
}

/// What happened to a `speak` request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechOutcome {
    Spoken,
    Muted,
    Unavailable,
    Failed,
}

/// Result of flipping the listening flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenToggle {
    /// A new capture session started
    Started { session: u64 },
    Stopped,
    Unavailable { reason: String },
}

#[derive(Debug, Default)]
struct ListenState {
    listening: bool,
    session: u64,
}

pub struct VoiceFacade {
    synthesis: Capability<Arc<dyn SpeechSynthesizer>>,
    recognition: Capability<Arc<dyn SpeechRecognizer>>,
    muted: AtomicBool,
    listen: Mutex<ListenState>,
}

impl VoiceFacade {
    pub fn new(
        synthesis: Capability<Arc<dyn SpeechSynthesizer>>,
        recognition: Capability<Arc<dyn SpeechRecognizer>>,
    ) -> Self {
        if let Some(reason) = synthesis.reason() {
            info!("Speech synthesis unavailable: {}", reason);
        }
        if let Some(reason) = recognition.reason() {
            info!("Speech recognition unavailable: {}", reason);
        }

        Self {
            synthesis,
            recognition,
            muted: AtomicBool::new(false),
            listen: Mutex::new(ListenState::default()),
        }
    }

    /// Facade with neither capability
    pub fn disabled() -> Self {
        Self::new(
            Capability::unavailable("speech output disabled"),
            Capability::unavailable("speech input disabled"),
        )
    }

    /// Pick backends from the host switches: log-backed synthesis and a
    /// recognizer that always hears `transcript`.
    pub fn detect(enable_output: bool, enable_input: bool, transcript: &str) -> Self {
        let synthesis: Capability<Arc<dyn SpeechSynthesizer>> = if enable_output {
            Capability::Available(Arc::new(TracingSynthesizer))
        } else {
            Capability::unavailable("speech output disabled")
        };

        let recognition: Capability<Arc<dyn SpeechRecognizer>> = if enable_input {
            Capability::Available(Arc::new(SimulatedRecognizer::new(transcript)))
        } else {
            Capability::unavailable("speech input disabled")
        };

        Self::new(synthesis, recognition)
    }

    pub fn can_speak(&self) -> bool {
        self.synthesis
            .as_available()
            .is_some_and(|synth| synth.is_available())
    }

    pub fn can_listen(&self) -> bool {
        self.recognition
            .as_available()
            .is_some_and(|recognizer| recognizer.is_available())
    }

    pub fn is_muted(&self) -> bool {
        self.muted.load(Ordering::SeqCst)
    }

    pub fn is_listening(&self) -> bool {
        self.listen.lock().listening
    }

    /// Speak `text` if synthesis is available and not muted
    pub fn speak(&self, text: &str) -> SpeechOutcome {
        let Some(synth) = self.synthesis.as_available() else {
            return SpeechOutcome::Unavailable;
        };
        if !synth.is_available() {
            debug!("Speech backend not available right now");
            return SpeechOutcome::Unavailable;
        }

        if self.is_muted() {
            debug!("Muted, not speaking");
            return SpeechOutcome::Muted;
        }

        let utterance = Utterance::new(normalize_for_speech(text));
        match synth.speak(&utterance) {
            Ok(()) => SpeechOutcome::Spoken,
            Err(e) => {
                warn!("Speech synthesis failed: {}", e);
                SpeechOutcome::Failed
            }
        }
    }

    /// Flip the mute flag and return the new value. Muting cuts off
    /// anything currently being spoken.
    pub fn toggle_mute(&self) -> bool {
        let was_muted = self.muted.fetch_xor(true, Ordering::SeqCst);
        if !was_muted {
            if let Some(synth) = self.synthesis.as_available() {
                synth.cancel();
            }
        }
        !was_muted
    }

    /// Start or stop a capture session
    pub fn toggle_listening(&self) -> ListenToggle {
        let mut state = self.listen.lock();
        // Stopping never needs the backend
        if !state.listening {
            match &self.recognition {
                Capability::Unavailable { reason } => {
                    return ListenToggle::Unavailable {
                        reason: reason.clone(),
                    };
                }
                Capability::Available(recognizer) if !recognizer.is_available() => {
                    return ListenToggle::Unavailable {
                        reason: "speech recognition backend is not ready".to_string(),
                    };
                }
                Capability::Available(_) => {}
            }
        }

        if state.listening {
            state.listening = false;
            ListenToggle::Stopped
        } else {
            state.listening = true;
            state.session += 1;
            ListenToggle::Started {
                session: state.session,
            }
        }
    }

    /// End capture `session` and return what was heard.
    ///
    /// Returns `None` if the session was stopped or replaced in the
    /// meantime.
    pub fn finish_capture(&self, session: u64) -> Option<String> {
        let recognizer = self.recognition.as_available()?;

        let mut state = self.listen.lock();
        if !state.listening || state.session != session {
            debug!("Capture session {} is stale, dropping transcript", session);
            return None;
        }
        state.listening = false;
        drop(state);

        if !recognizer.is_available() {
            warn!("Recognizer went away during capture session {}", session);
            return None;
        }
        Some(recognizer.transcript())
    }
}
