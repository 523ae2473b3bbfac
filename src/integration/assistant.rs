//! The market assistant: message log, reply generator, alert feed, settings
//! and voice facade wired together.
//!
//! Simulated latency is modelled as tokio tasks. Every call that schedules
//! work (`submit`, `toggle_listening`) must run inside a tokio runtime and
//! hands back a handle that resolves when the work is done. Scheduled work
//! cannot be aborted.

use super::config::AssistantConfig;
use super::events::{AssistantEvent, Notice, NoticeLevel};
use super::settings::{AssistantSettings, SettingKey};
use crate::alerts::{AlertFeed, PriceAlert};
use crate::messages::{ChatMessage, MessageLog};
use crate::responder::ResponseGenerator;
use crate::speech::{ListenToggle, VoiceFacade};
use crate::{AssistantError, Result};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub const LISTENING_NOTICE: &str = "Listening...";
pub const STOPPED_LISTENING_NOTICE: &str = "Stopped listening";
pub const VOICE_RECEIVED_NOTICE: &str = "Voice input received";
pub const RECOGNITION_UNSUPPORTED_NOTICE: &str = "Voice recognition is not supported on this host";
pub const SETTINGS_RESET_NOTICE: &str = "Assistant settings reset to defaults";

/// An assistant reply that has been scheduled but maybe not delivered yet
pub struct PendingReply {
    handle: JoinHandle<ChatMessage>,
}

impl PendingReply {
    /// Wait for the reply to be appended to the log
    pub async fn wait(self) -> Result<ChatMessage> {
        self.handle
            .await
            .map_err(|e| AssistantError::TaskError(format!("Reply task failed: {}", e)))
    }

    /// Whether the reply has already been delivered
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// A running voice capture session
pub struct PendingCapture {
    handle: JoinHandle<Option<ChatMessage>>,
}

impl PendingCapture {
    /// Wait for the session to end. Yields the assistant's reply to the
    /// captured transcript, or `None` if the session was stopped first.
    pub async fn wait(self) -> Result<Option<ChatMessage>> {
        self.handle
            .await
            .map_err(|e| AssistantError::TaskError(format!("Capture task failed: {}", e)))
    }

    /// Whether the session and any reply it triggered are done
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

pub enum ListenOutcome {
    Started(PendingCapture),
    Stopped,
    Unavailable,
}

struct Inner {
    config: AssistantConfig,
    generator: ResponseGenerator,
    messages: MessageLog,
    alerts: Mutex<AlertFeed>,
    settings: RwLock<AssistantSettings>,
    voice: VoiceFacade,
    event_tx: Sender<AssistantEvent>,
}

/// Handle to the assistant. Cheap to clone; clones share all state.
#[derive(Clone)]
pub struct Assistant {
    inner: Arc<Inner>,
}

/// Builder for [`Assistant`]
pub struct AssistantBuilder {
    config: AssistantConfig,
    generator: ResponseGenerator,
    alerts: AlertFeed,
    voice: Option<VoiceFacade>,
}

impl AssistantBuilder {
    pub fn new(config: AssistantConfig) -> Self {
        Self {
            config,
            generator: ResponseGenerator::default(),
            alerts: AlertFeed::seeded(),
            voice: None,
        }
    }

    pub fn generator(mut self, generator: ResponseGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub fn alerts(mut self, alerts: AlertFeed) -> Self {
        self.alerts = alerts;
        self
    }

    /// Use this facade instead of detecting one from the config
    pub fn voice(mut self, voice: VoiceFacade) -> Self {
        self.voice = Some(voice);
        self
    }

    /// Build the assistant and the receiver for its events. The greeting
    /// is already in the log (and in the channel) when this returns.
    pub fn build(self) -> Result<(Assistant, Receiver<AssistantEvent>)> {
        self.config.validate()?;

        let (event_tx, event_rx) = bounded(self.config.event_queue_size);
        let voice = self.voice.unwrap_or_else(|| {
            VoiceFacade::detect(
                self.config.enable_speech_output,
                self.config.enable_speech_input,
                &self.config.simulated_transcript,
            )
        });

        let greeting = ChatMessage::assistant(self.config.greeting.clone());

        let assistant = Assistant {
            inner: Arc::new(Inner {
                config: self.config,
                generator: self.generator,
                messages: MessageLog::new(),
                alerts: Mutex::new(self.alerts),
                settings: RwLock::new(AssistantSettings::default()),
                voice,
                event_tx,
            }),
        };

        assistant.append(greeting);
        info!(
            "Assistant ready ({} alerts, speech out: {}, speech in: {})",
            assistant.inner.alerts.lock().len(),
            assistant.inner.voice.can_speak(),
            assistant.inner.voice.can_listen()
        );

        Ok((assistant, event_rx))
    }
}

impl Assistant {
    /// Assistant with the built-in replies, seeded alerts and a voice
    /// facade detected from `config`
    pub fn new(config: AssistantConfig) -> Result<(Self, Receiver<AssistantEvent>)> {
        AssistantBuilder::new(config).build()
    }

    pub fn builder(config: AssistantConfig) -> AssistantBuilder {
        AssistantBuilder::new(config)
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.inner.config
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.inner.messages.get_all()
    }

    pub fn message_count(&self) -> usize {
        self.inner.messages.len()
    }

    /// Post user input. Blank input is ignored and returns `None`;
    /// otherwise the user message is logged now and the reply after the
    /// configured latency.
    pub fn submit(&self, input: &str) -> Option<PendingReply> {
        let query = input.trim().to_string();
        if query.is_empty() {
            debug!("Ignoring empty input");
            return None;
        }

        self.append(ChatMessage::user(input));

        let assistant = self.clone();
        let latency = self.inner.config.reply_latency();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(latency).await;
            assistant.deliver_reply(&query)
        });

        Some(PendingReply { handle })
    }

    fn deliver_reply(&self, query: &str) -> ChatMessage {
        let reply = self.inner.generator.respond(query);
        let message = ChatMessage::assistant(reply.text);
        self.append(message.clone());

        // Checked on delivery, so a toggle made while waiting applies
        if self.settings().voice_output {
            let outcome = self.inner.voice.speak(&message.text);
            debug!("Reply speech: {:?}", outcome);
        } else {
            debug!("Voice output off, not speaking reply");
        }

        message
    }

    /// Log `message` and announce it. The event is queued while the log is
    /// still locked, so listeners see appends in log order.
    fn append(&self, message: ChatMessage) -> usize {
        debug!("{:?}: {}", message.role, message.text);
        self.inner.messages.append_then(message, |_, logged| {
            self.emit(AssistantEvent::MessageAppended(logged.clone()));
        })
    }

    /// All alerts left in the feed
    pub fn alerts(&self) -> Vec<PriceAlert> {
        self.inner.alerts.lock().to_vec()
    }

    /// Alerts to display; empty while the price alerts setting is off
    pub fn visible_alerts(&self) -> Vec<PriceAlert> {
        if !self.settings().price_alerts {
            return Vec::new();
        }
        self.alerts()
    }

    /// Remove an alert. Unknown ids are a no-op.
    pub fn dismiss_alert(&self, id: &str) -> Option<PriceAlert> {
        let removed = self.inner.alerts.lock().dismiss(id);
        match &removed {
            Some(alert) => self.emit(AssistantEvent::AlertDismissed(alert.clone())),
            None => debug!("No alert with id {}", id),
        }
        removed
    }

    pub fn settings(&self) -> AssistantSettings {
        *self.inner.settings.read()
    }

    pub fn set_setting(&self, key: SettingKey, value: bool) {
        let settings = {
            let mut settings = self.inner.settings.write();
            settings.set(key, value);
            *settings
        };
        debug!("Setting {} = {}", key, value);
        self.emit(AssistantEvent::SettingsChanged(settings));
    }

    /// Flip a setting and return its new value
    pub fn toggle_setting(&self, key: SettingKey) -> bool {
        let value = !self.settings().get(key);
        self.set_setting(key, value);
        value
    }

    pub fn reset_settings(&self) {
        let settings = {
            let mut settings = self.inner.settings.write();
            settings.reset();
            *settings
        };
        self.emit(AssistantEvent::SettingsChanged(settings));
        self.notify(Notice::success(SETTINGS_RESET_NOTICE));
    }

    pub fn is_muted(&self) -> bool {
        self.inner.voice.is_muted()
    }

    /// Flip mute and return the new value
    pub fn toggle_mute(&self) -> bool {
        let muted = self.inner.voice.toggle_mute();
        self.emit(AssistantEvent::MuteChanged(muted));
        muted
    }

    pub fn is_listening(&self) -> bool {
        self.inner.voice.is_listening()
    }

    /// Start or stop simulated voice input.
    ///
    /// A started session yields the recognizer's transcript after the
    /// listen duration and submits it after the auto-submit delay.
    pub fn toggle_listening(&self) -> ListenOutcome {
        match self.inner.voice.toggle_listening() {
            ListenToggle::Unavailable { reason } => {
                debug!("Cannot listen: {}", reason);
                self.notify(Notice::error(RECOGNITION_UNSUPPORTED_NOTICE));
                ListenOutcome::Unavailable
            }
            ListenToggle::Stopped => {
                self.emit(AssistantEvent::ListeningChanged(false));
                self.notify(Notice::info(STOPPED_LISTENING_NOTICE));
                ListenOutcome::Stopped
            }
            ListenToggle::Started { session } => {
                self.emit(AssistantEvent::ListeningChanged(true));
                self.notify(Notice::info(LISTENING_NOTICE));

                let assistant = self.clone();
                let handle = tokio::spawn(async move { assistant.run_capture(session).await });
                ListenOutcome::Started(PendingCapture { handle })
            }
        }
    }

    async fn run_capture(&self, session: u64) -> Option<ChatMessage> {
        tokio::time::sleep(self.inner.config.listen_duration()).await;

        let transcript = self.inner.voice.finish_capture(session)?;
        self.emit(AssistantEvent::ListeningChanged(false));
        self.notify(Notice::success(VOICE_RECEIVED_NOTICE));

        tokio::time::sleep(self.inner.config.auto_submit_delay()).await;

        let pending = self.submit(&transcript)?;
        match pending.wait().await {
            Ok(reply) => Some(reply),
            Err(e) => {
                warn!("Voice reply failed: {}", e);
                None
            }
        }
    }

    /// Info and success notices respect the notifications setting; errors
    /// always go out.
    fn notify(&self, notice: Notice) {
        if notice.level != NoticeLevel::Error && !self.settings().notifications {
            debug!("Notifications off, suppressing: {}", notice.text);
            return;
        }
        self.emit(AssistantEvent::Notice(notice));
    }

    fn emit(&self, event: AssistantEvent) {
        match self.inner.event_tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                warn!("Event queue full, dropping {:?}", event);
            }
            Err(TrySendError::Disconnected(_)) => {
                debug!("No event listener");
            }
        }
    }
}
