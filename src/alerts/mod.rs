pub mod feed;
pub mod types;

pub use feed::AlertFeed;
pub use types::{AlertDirection, PriceAlert};
