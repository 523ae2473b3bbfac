use crate::AssistantError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// User toggles for the assistant. Not persisted; every session starts
/// with everything on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssistantSettings {
    pub voice_output: bool,
    pub notifications: bool,
    pub price_alerts: bool,
    pub suggestions: bool,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            voice_output: true,
            notifications: true,
            price_alerts: true,
            suggestions: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    VoiceOutput,
    Notifications,
    PriceAlerts,
    Suggestions,
}

impl SettingKey {
    pub const ALL: [SettingKey; 4] = [
        SettingKey::VoiceOutput,
        SettingKey::Notifications,
        SettingKey::PriceAlerts,
        SettingKey::Suggestions,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SettingKey::VoiceOutput => "Voice Responses",
            SettingKey::Notifications => "Notifications",
            SettingKey::PriceAlerts => "Price Alerts",
            SettingKey::Suggestions => "Similar Listing Suggestions",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SettingKey::VoiceOutput => "voice",
            SettingKey::Notifications => "notifications",
            SettingKey::PriceAlerts => "alerts",
            SettingKey::Suggestions => "suggestions",
        };
        f.write_str(name)
    }
}

impl FromStr for SettingKey {
    type Err = AssistantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "voice" | "voice_output" => Ok(SettingKey::VoiceOutput),
            "notifications" => Ok(SettingKey::Notifications),
            "alerts" | "price_alerts" => Ok(SettingKey::PriceAlerts),
            "suggestions" => Ok(SettingKey::Suggestions),
            other => Err(AssistantError::UnknownSetting(other.to_string())),
        }
    }
}

impl AssistantSettings {
    pub fn get(&self, key: SettingKey) -> bool {
        match key {
            SettingKey::VoiceOutput => self.voice_output,
            SettingKey::Notifications => self.notifications,
            SettingKey::PriceAlerts => self.price_alerts,
            SettingKey::Suggestions => self.suggestions,
        }
    }

    pub fn set(&mut self, key: SettingKey, value: bool) {
        let slot = match key {
            SettingKey::VoiceOutput => &mut self.voice_output,
            SettingKey::Notifications => &mut self.notifications,
            SettingKey::PriceAlerts => &mut self.price_alerts,
            SettingKey::Suggestions => &mut self.suggestions,
        };
        *slot = value;
    }

    /// Flip `key` and return its new value
    pub fn toggle(&mut self, key: SettingKey) -> bool {
        let value = !self.get(key);
        self.set(key, value);
        value
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_all_on() {
        let settings = AssistantSettings::default();
        assert!(SettingKey::ALL.iter().all(|k| settings.get(*k)));
    }

    #[test]
    fn test_set_toggle_reset() {
        let mut settings = AssistantSettings::default();
        settings.set(SettingKey::VoiceOutput, false);
        assert!(!settings.voice_output);

        assert!(!settings.toggle(SettingKey::PriceAlerts));
        assert!(settings.toggle(SettingKey::PriceAlerts));

        settings.reset();
        assert_eq!(settings, AssistantSettings::default());
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!("Voice".parse::<SettingKey>().unwrap(), SettingKey::VoiceOutput);
        assert_eq!("alerts".parse::<SettingKey>().unwrap(), SettingKey::PriceAlerts);
        for key in SettingKey::ALL {
            assert_eq!(key.to_string().parse::<SettingKey>().unwrap(), key);
        }
        assert!(matches!(
            "volume".parse::<SettingKey>(),
            Err(AssistantError::UnknownSetting(_))
        ));
    }
}
