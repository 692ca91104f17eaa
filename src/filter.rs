//! Deciding which messages count as activity.
//!
//! The stock policy looks at message text only: anything mentioning the whole word `bot` or `system`
//! (any case) is treated as bot or system output and not counted. That also drops human messages that
//! merely talk about a bot; a policy keyed on sender identity can be supplied through [`MessageFilter`]
//! instead.

use core::fmt::Debug;
use regex::Regex;
use std::sync::LazyLock;

/// Case-insensitive `bot` or `system` between ASCII word boundaries
pub const SYSTEM_WORDS_PATTERN: &str = r"(?i)(?-u:\b)(bot|system)(?-u:\b)";

static SYSTEM_WORDS: LazyLock<Regex> = LazyLock::new(|| Regex::new(SYSTEM_WORDS_PATTERN).expect("pattern is valid"));

/// Policy for skipping messages that should not be counted
pub trait MessageFilter: Debug + Send + Sync {
    /// Whether a message with this text is bot or system output
    fn is_system_message(&self, text: &str) -> bool;
}

/// Skips messages whose text matches a regular expression
#[derive(Debug, Clone)]
pub struct PatternFilter {
    pattern: Regex,
}

impl PatternFilter {
    #[must_use]
    pub const fn new(pattern: Regex) -> Self {
        Self { pattern }
    }

    /// Case-insensitive whole-word `bot` or `system`
    #[must_use]
    pub fn system_words() -> Self {
        Self::new(SYSTEM_WORDS.clone())
    }
}

impl Default for PatternFilter {
    fn default() -> Self {
        Self::system_words()
    }
}

impl MessageFilter for PatternFilter {
    fn is_system_message(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// Counts every message
#[derive(Debug, Clone, Copy, Default)]
pub struct CountEverything;

impl MessageFilter for CountEverything {
    fn is_system_message(&self, _text: &str) -> bool {
        false
    }
}
