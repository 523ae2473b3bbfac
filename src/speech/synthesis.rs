//! Speech synthesis backends
//!
//! Backends receive an [`Utterance`] whose text has already been run through
//! [`normalize_for_speech`].

use crate::Result;
use tracing::info;

/// Text plus the voice parameters used to speak it
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// Speech rate (1.0 = normal)
    pub rate: f32,
    pub pitch: f32,
    /// Volume (0.0 to 1.0)
    pub volume: f32,
}

impl Utterance {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

/// A host text-to-speech engine
pub trait SpeechSynthesizer: Send + Sync {
    /// Start speaking. Must not block until playback ends.
    fn speak(&self, utterance: &Utterance) -> Result<()>;

    /// Stop anything currently being spoken
    fn cancel(&self);

    /// Checked before every `speak`; a backend can drop out mid-session
    fn is_available(&self) -> bool {
        true
    }
}

/// Synthesizer that "speaks" into the tracing log
#[derive(Debug, Default, Clone)]
pub struct TracingSynthesizer;

impl SpeechSynthesizer for TracingSynthesizer {
    fn speak(&self, utterance: &Utterance) -> Result<()> {
        info!(
            rate = utterance.rate,
            pitch = utterance.pitch,
            volume = utterance.volume,
            "Speaking: {}",
            utterance.text
        );
        Ok(())
    }

    fn cancel(&self) {
        info!("Speech cancelled");
    }
}

/// Rewrite symbols a speech engine would read literally.
///
/// `$650` becomes `650 dollars`, `12%` becomes `12 percent`.
pub fn normalize_for_speech(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + 16);
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '$' if chars.peek().is_some_and(|n| n.is_ascii_digit()) => {
                let mut amount = String::new();
                while let Some(&next) = chars.peek() {
                    if next.is_ascii_digit() || next == ',' || next == '.' {
                        amount.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                // A trailing '.' ends the sentence, not the amount
                let sentence_end = amount.ends_with('.');
                let amount = amount.trim_end_matches('.');
                result.push_str(amount);
                result.push_str(" dollars");
                if sentence_end {
                    result.push('.');
                }
            }
            '%' => result.push_str(" percent"),
            '&' => result.push_str(" and "),
            _ => result.push(c),
        }
    }

    result.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_currency_and_percent() {
        let text = "The average price is $650. Prices have decreased by 12% in the last month.";
        assert_eq!(
            normalize_for_speech(text),
            "The average price is 650 dollars. Prices have decreased by 12 percent in the last month."
        );
    }

    #[test]
    fn test_lone_dollar_sign_is_kept() {
        assert_eq!(normalize_for_speech("costs $ a lot"), "costs $ a lot");
    }

    #[test]
    fn test_ampersand_and_whitespace() {
        assert_eq!(normalize_for_speech("  buy  &  sell "), "buy and sell");
    }

    #[test]
    fn test_default_utterance_parameters() {
        let utterance = Utterance::new("hi");
        assert_eq!(utterance.rate, 1.0);
        assert_eq!(utterance.pitch, 1.0);
        assert_eq!(utterance.volume, 1.0);
        assert!(TracingSynthesizer.speak(&utterance).is_ok());
    }
}
