//! Noise rules for lineup poster text.
//!
//! Festival posters mix artist names with sponsor logos, stage labels and
//! dates. A [`NoiseRules`] value folds both kinds of filter into one
//! case-insensitive pattern:
//!
//! - a keyword list matched against the *whole* text (`STAGE` is noise,
//!   `Main Stage Opener` is not);
//! - a digit run matched anywhere in the text (`Nov 14` is noise).

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use tracing::debug;

use super::error::NoiseRulesError;

/// Keywords dropped when a line or fragment consists of exactly one of them.
pub const DEFAULT_NOISE_KEYWORDS: &[&str] = &[
    "VANS",
    "NOV",
    "BEATBOX",
    "EARGASM",
    "PRESENTS",
    "PRESENTED BY",
    "SPONSORED BY",
    "STAGE",
];

/// Number of consecutive digits that marks text as a date/time/price.
pub const DEFAULT_DIGIT_RUN: usize = 2;

#[allow(clippy::expect_used)]
static DEFAULT_RULES: LazyLock<NoiseRules> = LazyLock::new(|| {
    NoiseRules::new(DEFAULT_NOISE_KEYWORDS.iter().copied(), DEFAULT_DIGIT_RUN)
        .expect("default noise rules are valid") // Static pattern, safe to panic
});

/// Combined keyword + digit-run filter for candidate names.
///
/// # Example
///
/// ```
/// use festival_sync_core::lineup::NoiseRules;
///
/// let rules = NoiseRules::default();
/// assert!(rules.is_noise("presented by"));
/// assert!(rules.is_noise("FRI 14"));
/// assert!(!rules.is_noise("Main Stage Opener"));
/// ```
#[derive(Debug, Clone)]
pub struct NoiseRules {
    keywords: Vec<String>,
    digit_run: usize,
    pattern: Regex,
}

impl Default for NoiseRules {
    fn default() -> Self {
        DEFAULT_RULES.clone()
    }
}

impl NoiseRules {
    /// Builds a rule set from a keyword list and a digit-run length.
    ///
    /// Keywords are trimmed; blank entries are ignored. Keywords are matched
    /// literally (regex metacharacters are escaped).
    ///
    /// # Errors
    ///
    /// Returns [`NoiseRulesError::InvalidDigitRun`] when `digit_run` is zero and
    /// [`NoiseRulesError::Pattern`] when the combined pattern cannot be compiled.
    pub fn new<I, S>(keywords: I, digit_run: usize) -> Result<Self, NoiseRulesError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if digit_run == 0 {
            return Err(NoiseRulesError::InvalidDigitRun { length: digit_run });
        }

        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|keyword| keyword.as_ref().trim().to_string())
            .filter(|keyword| !keyword.is_empty())
            .collect();

        let digit_pattern = format!("[0-9]{{{digit_run}}}");
        let source = if keywords.is_empty() {
            digit_pattern
        } else {
            let alternation = keywords
                .iter()
                .map(|keyword| regex::escape(keyword))
                .collect::<Vec<_>>()
                .join("|");
            format!("^(?:{alternation})$|{digit_pattern}")
        };

        let pattern = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()?;

        debug!(keywords = keywords.len(), digit_run, "noise rules compiled");

        Ok(Self {
            keywords,
            digit_run,
            pattern,
        })
    }

    /// Builds a rule set from custom keywords with the default digit run.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseRulesError::Pattern`] when the pattern cannot be compiled.
    pub fn with_keywords<I, S>(keywords: I) -> Result<Self, NoiseRulesError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(keywords, DEFAULT_DIGIT_RUN)
    }

    /// Rebuilds the rule set with a different digit-run length.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseRulesError::InvalidDigitRun`] when `digit_run` is zero.
    pub fn with_digit_run(self, digit_run: usize) -> Result<Self, NoiseRulesError> {
        Self::new(self.keywords, digit_run)
    }

    /// Returns the keywords in configuration order.
    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Returns the digit-run length.
    #[must_use]
    pub fn digit_run(&self) -> usize {
        self.digit_run
    }

    /// Returns true when `text` is exactly a keyword (any case) or contains a digit run.
    #[must_use]
    pub fn is_noise(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}
