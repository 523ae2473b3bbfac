//! Integration layer tying the assistant's parts together
//!
//! - **config**: timings and host capability switches
//! - **settings**: the user's toggles
//! - **events**: what the assistant reports to its front end
//! - **assistant**: the orchestrator itself

pub mod assistant;
pub mod config;
pub mod events;
pub mod settings;

pub use assistant::{Assistant, AssistantBuilder, ListenOutcome, PendingCapture, PendingReply};
pub use config::AssistantConfig;
pub use events::{AssistantEvent, Notice, NoticeLevel};
pub use settings::{AssistantSettings, SettingKey};
