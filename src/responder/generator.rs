//! Keyword-dispatch reply generator
//!
//! Input is trimmed and lower-cased, then checked against an ordered list of
//! rules. The first rule with any keyword contained in the input wins; when
//! nothing matches the fallback reply is returned.

use super::replies::*;
use serde::Serialize;
use tracing::debug;

/// Which rule produced a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    Help,
    Listings,
    Greeting,
    MarketTrends,
    Custom,
    Fallback,
}

/// A set of substrings that all map to the same canned reply
#[derive(Debug, Clone)]
pub struct KeywordRule {
    kind: ReplyKind,
    keywords: Vec<String>,
    reply: String,
}

impl KeywordRule {
    /// Keywords are stored lower-cased. Empty keywords are dropped since an
    /// empty substring matches every input.
    pub fn new<I, S>(kind: ReplyKind, keywords: I, reply: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        Self {
            kind,
            keywords,
            reply: reply.into(),
        }
    }

    pub fn kind(&self) -> ReplyKind {
        self.kind
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn reply(&self) -> &str {
        &self.reply
    }

    fn matches(&self, normalized: &str) -> bool {
        self.keywords.iter().any(|k| normalized.contains(k.as_str()))
    }
}

/// A generated reply borrowed from the generator's table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reply<'a> {
    pub kind: ReplyKind,
    pub text: &'a str,
}

#[derive(Debug, Clone)]
pub struct ResponseGenerator {
    rules: Vec<KeywordRule>,
    fallback: String,
}

impl Default for ResponseGenerator {
    fn default() -> Self {
        Self::new(FALLBACK_REPLY)
            .with_rule(KeywordRule::new(ReplyKind::Help, HELP_KEYWORDS, HELP_REPLY))
            .with_rule(KeywordRule::new(
                ReplyKind::Listings,
                LISTINGS_KEYWORDS,
                LISTINGS_REPLY,
            ))
            .with_rule(KeywordRule::new(
                ReplyKind::Greeting,
                GREETING_KEYWORDS,
                GREETING_REPLY,
            ))
            .with_rule(KeywordRule::new(
                ReplyKind::MarketTrends,
                MARKET_TRENDS_KEYWORDS,
                MARKET_TRENDS_REPLY,
            ))
    }
}

impl ResponseGenerator {
    /// An empty table that always answers with `fallback`
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            rules: Vec::new(),
            fallback: fallback.into(),
        }
    }

    /// Append a rule with the lowest priority so far
    pub fn with_rule(mut self, rule: KeywordRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Pick the reply for `input`. Never fails.
    pub fn respond(&self, input: &str) -> Reply<'_> {
        let normalized = input.trim().to_lowercase();

        let reply = self
            .rules
            .iter()
            .find(|rule| rule.matches(&normalized))
            .map(|rule| Reply {
                kind: rule.kind,
                text: &rule.reply,
            })
            .unwrap_or(Reply {
                kind: ReplyKind::Fallback,
                text: &self.fallback,
            });

        debug!("Matched {:?} for input: {}", reply.kind, normalized);
        reply
    }
}
