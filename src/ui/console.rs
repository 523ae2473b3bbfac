//! Line-oriented front end for the assistant
//!
//! Every reply and capture a line schedules is tracked until it completes,
//! so [`Console::finish`] can wait for all of them before the process exits.

use crate::integration::{
    Assistant, AssistantEvent, ListenOutcome, NoticeLevel, PendingCapture, PendingReply,
    SettingKey,
};
use crate::messages::Role;
use crate::Result;
use std::io::Write;
use tracing::{debug, info, warn};

pub const HELP: &str = "\
Commands:
  /alerts                 show price alerts
  /dismiss <id>           dismiss a price alert
  /listen                 start or stop voice input
  /mute                   mute or unmute spoken replies
  /settings               show settings
  /set <key> <on|off>     change a setting (voice, notifications, alerts, suggestions)
  /reset                  reset settings to defaults
  /history                print the conversation as JSON
  /help                   show this help
  /quit                   exit
Anything else is sent to the assistant.";

enum InFlight {
    Reply(PendingReply),
    Capture(PendingCapture),
}

impl InFlight {
    fn is_finished(&self) -> bool {
        match self {
            InFlight::Reply(pending) => pending.is_finished(),
            InFlight::Capture(pending) => pending.is_finished(),
        }
    }

    async fn wait(self) -> Result<()> {
        match self {
            InFlight::Reply(pending) => pending.wait().await.map(|_| ()),
            InFlight::Capture(pending) => pending.wait().await.map(|_| ()),
        }
    }
}

pub struct Console<W: Write> {
    assistant: Assistant,
    out: W,
    in_flight: Vec<InFlight>,
}

impl<W: Write> Console<W> {
    pub fn new(assistant: Assistant, out: W) -> Self {
        Self {
            assistant,
            out,
            in_flight: Vec::new(),
        }
    }

    pub fn assistant(&self) -> &Assistant {
        &self.assistant
    }

    /// Replies and captures scheduled but not yet completed
    pub fn in_flight(&self) -> usize {
        self.in_flight.iter().filter(|task| !task.is_finished()).count()
    }

    /// Handle one line of input. Returns `false` when the user asked to
    /// quit.
    ///
    /// Plain text goes to the assistant exactly as typed; surrounding
    /// whitespace only matters for spotting commands and blank lines.
    pub fn handle_line(&mut self, line: &str) -> Result<bool> {
        self.in_flight.retain(|task| !task.is_finished());

        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(true);
        }

        if let Some(command) = trimmed.strip_prefix('/') {
            return self.run_command(command);
        }

        // Reply arrives through the event stream
        if let Some(pending) = self.assistant.submit(line) {
            self.in_flight.push(InFlight::Reply(pending));
        }
        Ok(true)
    }

    fn run_command(&mut self, command: &str) -> Result<bool> {
        let mut parts = command.split_whitespace();
        match parts.next().unwrap_or_default() {
            "quit" | "exit" => return Ok(false),
            "help" => writeln!(self.out, "{}", HELP)?,
            "alerts" => self.show_alerts()?,
            "dismiss" => match parts.next() {
                Some(id) => {
                    if self.assistant.dismiss_alert(id).is_none() {
                        writeln!(self.out, "No alert with id {}", id)?;
                    }
                }
                None => writeln!(self.out, "Usage: /dismiss <id>")?,
            },
            "listen" => match self.assistant.toggle_listening() {
                ListenOutcome::Started(pending) => {
                    self.in_flight.push(InFlight::Capture(pending));
                }
                ListenOutcome::Stopped => {}
                ListenOutcome::Unavailable => warn!("Voice input unavailable"),
            },
            "mute" => {
                self.assistant.toggle_mute();
            }
            "settings" => self.show_settings()?,
            "set" => match (parts.next(), parts.next()) {
                (Some(key), Some(value)) => match key.parse::<SettingKey>() {
                    Ok(key) => match value {
                        "on" | "true" => self.assistant.set_setting(key, true),
                        "off" | "false" => self.assistant.set_setting(key, false),
                        _ => writeln!(self.out, "Value must be on or off")?,
                    },
                    Err(e) => writeln!(self.out, "{}", e.user_message())?,
                },
                _ => writeln!(self.out, "Usage: /set <key> <on|off>")?,
            },
            "reset" => self.assistant.reset_settings(),
            "history" => {
                let json = serde_json::to_string_pretty(&self.assistant.messages())?;
                writeln!(self.out, "{}", json)?;
            }
            other => writeln!(self.out, "Unknown command /{}. Type /help.", other)?,
        }
        Ok(true)
    }

    pub fn show_alerts(&mut self) -> Result<()> {
        let alerts = self.assistant.visible_alerts();
        if alerts.is_empty() {
            return Ok(());
        }
        writeln!(self.out, "Price Alerts")?;
        for alert in alerts {
            writeln!(self.out, "  [{}] {}", alert.id, alert.summary())?;
        }
        Ok(())
    }

    fn show_settings(&mut self) -> Result<()> {
        let settings = self.assistant.settings();
        for key in SettingKey::ALL {
            let state = if settings.get(key) { "on" } else { "off" };
            writeln!(self.out, "  {:<30} {:<14} {}", key.label(), key.to_string(), state)?;
        }
        writeln!(self.out, "  {:<30} {:<14} {}", "Muted", "", self.assistant.is_muted())?;
        Ok(())
    }

    /// Wait for every outstanding reply and capture, then hand back the
    /// writer. A task that failed is logged and does not stop the others.
    pub async fn finish(mut self) -> Result<W> {
        let pending = std::mem::take(&mut self.in_flight);
        if !pending.is_empty() {
            info!("Waiting for {} pending replies", pending.len());
        }
        for task in pending {
            if let Err(e) = task.wait().await {
                warn!("Pending task failed: {}", e);
            }
        }
        debug!("All pending replies delivered");
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Text shown for an event, if any
pub fn render_event(event: &AssistantEvent) -> Option<String> {
    match event {
        AssistantEvent::MessageAppended(message) => {
            let who = match message.role {
                Role::User => "you",
                Role::Assistant => "assistant",
            };
            Some(format!("[{}] {}: {}", message.time_label(), who, message.text))
        }
        AssistantEvent::AlertDismissed(alert) => Some(format!("Dismissed alert {}", alert.id)),
        AssistantEvent::Notice(notice) => {
            let tag = match notice.level {
                NoticeLevel::Info => "info",
                NoticeLevel::Success => "ok",
                NoticeLevel::Error => "error",
            };
            Some(format!("({}) {}", tag, notice.text))
        }
        AssistantEvent::ListeningChanged(true) => Some("🎤 listening".to_string()),
        AssistantEvent::ListeningChanged(false) => None,
        AssistantEvent::MuteChanged(muted) => {
            Some(if *muted { "🔇 muted" } else { "🔊 unmuted" }.to_string())
        }
        AssistantEvent::SettingsChanged(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::AssistantConfig;
    use crate::responder::replies::{GREETING_REPLY, LISTINGS_REPLY};
    use std::time::Duration;

    fn console() -> Console<Vec<u8>> {
        let config = AssistantConfig::default()
            .without_speech_output()
            .with_reply_latency(Duration::from_millis(1000))
            .with_listen_duration(Duration::from_millis(2000));
        let (assistant, _events) = Assistant::new(config).unwrap();
        Console::new(assistant, Vec::new())
    }

    fn output(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_finish_waits_for_pending_reply() {
        let mut console = console();
        assert!(console.handle_line("hello").unwrap());
        assert_eq!(console.in_flight(), 1);

        // Input ends right away; the reply must still land
        let assistant = console.assistant().clone();
        console.finish().await.unwrap();

        let messages = assistant.messages();
        assert_eq!(messages.len(), 3);
        let last = messages.last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.text, GREETING_REPLY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_finish_waits_for_capture_and_its_reply() {
        let mut console = console();
        console.handle_line("/listen").unwrap();
        assert!(console.assistant().is_listening());

        let assistant = console.assistant().clone();
        console.finish().await.unwrap();

        let texts: Vec<_> = assistant.messages().into_iter().map(|m| m.text).collect();
        assert_eq!(texts.len(), 3);
        assert_eq!(texts[1], "Show me iPhone listings");
        assert_eq!(texts[2], LISTINGS_REPLY);
        assert!(!assistant.is_listening());
    }

    #[tokio::test(start_paused = true)]
    async fn test_text_is_submitted_as_typed() {
        let mut console = console();
        console.handle_line("  hello  ").unwrap();

        let assistant = console.assistant().clone();
        console.finish().await.unwrap();

        let messages = assistant.messages();
        assert_eq!(messages[1].text, "  hello  ");
        assert_eq!(messages[2].text, GREETING_REPLY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_lines_are_ignored() {
        let mut console = console();
        console.handle_line("   ").unwrap();
        console.handle_line("").unwrap();
        assert_eq!(console.in_flight(), 0);
        assert_eq!(console.assistant().message_count(), 1);
    }

    #[tokio::test]
    async fn test_commands() {
        let mut console = console();
        console.handle_line("/dismiss 99").unwrap();
        console.handle_line("  /set volume on").unwrap();
        console.handle_line("/set alerts off").unwrap();
        console.handle_line("/bogus").unwrap();
        assert!(!console.handle_line("/quit").unwrap());

        assert!(!console.assistant().settings().price_alerts);
        let text = output(console.finish().await.unwrap());
        assert!(text.contains("No alert with id 99"));
        assert!(text.contains("\"volume\""));
        assert!(text.contains("Unknown command /bogus"));
    }

    #[tokio::test]
    async fn test_history_is_json() {
        let mut console = console();
        console.handle_line("/history").unwrap();
        let text = output(console.finish().await.unwrap());

        let history: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(history.as_array().map(|a| a.len()), Some(1));
        assert_eq!(history[0]["role"], "assistant");
    }

    #[test]
    fn test_render_event() {
        let message = crate::messages::ChatMessage::user("hi");
        let line = render_event(&AssistantEvent::MessageAppended(message)).unwrap();
        assert!(line.ends_with("you: hi"));
        assert!(render_event(&AssistantEvent::ListeningChanged(false)).is_none());
    }
}
