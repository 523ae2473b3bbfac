//! Canned replies for the HiveMarket assistant

/// First message shown when a session starts
pub const GREETING: &str = "Hi there! I'm your HiveMarket assistant. I can help you find products, track prices, and more. Ask me anything!";

pub const HELP_REPLY: &str = "I can help you with: finding products, tracking price changes, setting price alerts, comparing listings, and providing market trends. What would you like help with?";

pub const LISTINGS_REPLY: &str = "I found 28 iPhone listings. The average price is $650. Prices have decreased by 12% in the last month. Would you like me to show you the best deals?";

pub const GREETING_REPLY: &str = "Hello! How can I help you today with your marketplace search?";

pub const MARKET_TRENDS_REPLY: &str = "Based on recent data, electronics prices have decreased by 8% while furniture prices have increased by 5%. What category are you interested in tracking?";

/// Used when no keyword rule matches
pub const FALLBACK_REPLY: &str = "I see you're interested in that. I can help you find the best deals and track prices over time. Would you like me to search for specific items?";

pub const HELP_KEYWORDS: &[&str] = &["help", "what can you do"];
pub const LISTINGS_KEYWORDS: &[&str] = &["iphone", "phone"];
pub const GREETING_KEYWORDS: &[&str] = &["hello", "hi"];
pub const MARKET_TRENDS_KEYWORDS: &[&str] = &["price", "trend"];
