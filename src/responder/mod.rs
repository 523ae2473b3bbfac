//! Canned-reply generation for the market assistant
//!
//! - **generator**: the ordered keyword table and its lookup
//! - **replies**: the built-in reply strings and keywords

pub mod generator;
pub mod replies;

pub use generator::{KeywordRule, Reply, ReplyKind, ResponseGenerator};
pub use replies::{FALLBACK_REPLY, GREETING};
