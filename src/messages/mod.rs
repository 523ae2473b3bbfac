pub mod storage;
pub mod types;

pub use storage::MessageLog;
pub use types::{ChatMessage, Role};
