pub mod console;

pub use console::{render_event, Console, HELP};
