//! Candidate artist name extraction from raw OCR text.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument, trace};

use super::noise::NoiseRules;

/// Minimum length (in characters) of a line or fragment kept as a candidate.
pub const MIN_CANDIDATE_LEN: usize = 3;

/// Separators between names on one poster line: bullet, asterisk, comma,
/// hyphen, or a gap of two or more whitespace characters.
#[allow(clippy::expect_used)]
static FRAGMENT_DELIMITERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[•*,\-]|\s{2,}").expect("fragment delimiter regex is valid") // Static pattern, safe to panic
});

/// Splits lineup text into candidate artist names.
///
/// Filtering happens twice: whole lines that are noise are dropped before
/// splitting, and each fragment is checked again after splitting because a
/// sponsor or stage label can sit between two names on the same line.
#[derive(Debug, Clone, Default)]
pub struct CandidateExtractor {
    rules: NoiseRules,
}

impl CandidateExtractor {
    /// Creates an extractor using the given noise rules.
    #[must_use]
    pub fn new(rules: NoiseRules) -> Self {
        Self { rules }
    }

    /// Returns the noise rules in use.
    #[must_use]
    pub fn rules(&self) -> &NoiseRules {
        &self.rules
    }

    /// Extracts deduplicated candidate names in first-seen order.
    ///
    /// Never fails: empty or garbled input produces fewer (or zero) candidates.
    /// Deduplication is exact and case-sensitive.
    ///
    /// # Example
    ///
    /// ```
    /// use festival_sync_core::lineup::CandidateExtractor;
    ///
    /// let extractor = CandidateExtractor::default();
    /// let names = extractor.extract("Artist A • Artist B, Artist C\nSTAGE");
    /// assert_eq!(names, ["Artist A", "Artist B", "Artist C"]);
    /// ```
    #[must_use]
    #[instrument(skip_all, fields(input_len = raw_text.len()))]
    pub fn extract(&self, raw_text: &str) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut candidates = Vec::new();

        for line in raw_text.split('\n') {
            let trimmed = line.trim();
            if char_len(trimmed) < MIN_CANDIDATE_LEN {
                continue;
            }
            if self.rules.is_noise(trimmed) {
                trace!(line = trimmed, "noise line dropped");
                continue;
            }

            for fragment in FRAGMENT_DELIMITERS.split(trimmed) {
                let cleaned = clean_fragment(fragment);
                if char_len(cleaned) < MIN_CANDIDATE_LEN || self.rules.is_noise(cleaned) {
                    continue;
                }
                if seen.insert(cleaned) {
                    candidates.push(cleaned.to_string());
                }
            }
        }

        debug!(candidates = candidates.len(), "lineup text parsed");
        candidates
    }
}

/// Extracts candidate names using the default noise rules.
///
/// # Example
///
/// ```
/// use festival_sync_core::lineup::extract_candidates;
///
/// let names = extract_candidates("Presents\nDaft Punk\n42\nSTAGE");
/// assert_eq!(names, ["Daft Punk"]);
/// ```
#[must_use]
pub fn extract_candidates(raw_text: &str) -> Vec<String> {
    CandidateExtractor::default().extract(raw_text)
}

fn clean_fragment(fragment: &str) -> &str {
    fragment.trim().trim_matches(|c: char| is_delimiter_char(c) || c.is_whitespace())
}

fn is_delimiter_char(c: char) -> bool {
    matches!(c, '•' | '*' | ',' | '-')
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // ==================== Noise Filtering Tests ====================

    #[test]
    fn test_extract_drops_keyword_and_digit_lines() {
        let names = extract_candidates("Presents\nDaft Punk\n42\nSTAGE");
        assert_eq!(names, ["Daft Punk"]);
    }

    #[test]
    fn test_extract_drops_lines_containing_dates() {
        let names = extract_candidates("FRIDAY NOV 14\nKaytranada\nDoors 18:00");
        assert_eq!(names, ["Kaytranada"]);
    }

    #[test]
    fn test_extract_drops_noise_fragments_inside_lines() {
        let names = extract_candidates("Bicep * STAGE * Fred Again");
        assert_eq!(names, ["Bicep", "Fred Again"]);
    }

    #[test]
    fn test_noise_line_never_reaches_fragment_splitting() {
        // Whole line carries a digit run, so "Overmono" is lost with it.
        let names = extract_candidates("Overmono • Sat 21");
        assert!(names.is_empty());
    }

    // ==================== Splitting Tests ====================

    #[test]
    fn test_extract_splits_on_bullets_and_commas() {
        let names = extract_candidates("Artist A • Artist B, Artist C");
        assert_eq!(names, ["Artist A", "Artist B", "Artist C"]);
    }

    #[test]
    fn test_extract_splits_on_wide_gaps_but_not_single_spaces() {
        let names = extract_candidates("Daft Punk    Justice");
        assert_eq!(names, ["Daft Punk", "Justice"]);
    }

    #[test]
    fn test_extract_splits_on_hyphen() {
        let names = extract_candidates("Run-DMC");
        assert_eq!(names, ["Run", "DMC"]);
    }

    #[test]
    fn test_extract_strips_leftover_delimiters() {
        let names = extract_candidates("** Four Tet **\n--Floating Points--");
        assert_eq!(names, ["Four Tet", "Floating Points"]);
    }

    #[test]
    fn test_extract_drops_short_fragments() {
        let names = extract_candidates("DJ • MK • Jamie xx");
        assert_eq!(names, ["Jamie xx"]);
    }

    // ==================== Dedup and Ordering Tests ====================

    #[test]
    fn test_extract_deduplicates_exact_matches() {
        let names = extract_candidates("Same Band\nSame Band");
        assert_eq!(names, ["Same Band"]);
    }

    #[test]
    fn test_extract_dedup_is_case_sensitive() {
        let names = extract_candidates("Bicep\nBICEP");
        assert_eq!(names, ["Bicep", "BICEP"]);
    }

    #[test]
    fn test_extract_preserves_first_seen_order() {
        let names = extract_candidates("Caribou, Bonobo\nBonobo • Moderat\nCaribou");
        assert_eq!(names, ["Caribou", "Bonobo", "Moderat"]);
    }

    // ==================== Edge Case Tests ====================

    #[test]
    fn test_extract_empty_input_returns_empty() {
        assert!(extract_candidates("").is_empty());
        assert!(extract_candidates("   \n\n  ").is_empty());
    }

    #[test]
    fn test_extract_handles_crlf_line_endings() {
        let names = extract_candidates("Little Simz\r\nLoyle Carner\r\n");
        assert_eq!(names, ["Little Simz", "Loyle Carner"]);
    }

    #[test]
    fn test_extract_garbled_input_does_not_panic() {
        let names = extract_candidates("\u{0}\u{1}\u{fffd}\u{fffd}\u{fffd}\n•••\n***,,,---");
        assert_eq!(names, ["\u{0}\u{1}\u{fffd}\u{fffd}\u{fffd}"]);
    }

    #[test]
    fn test_extract_counts_characters_not_bytes() {
        // Two multi-byte characters: too short despite 4+ bytes.
        assert!(extract_candidates("Øé").is_empty());
        assert_eq!(extract_candidates("Sigur Rós"), ["Sigur Rós"]);
    }

    #[test]
    fn test_extract_is_deterministic() {
        let text = "Headliner • Support Act\nSPONSORED BY\nLocal Hero";
        assert_eq!(extract_candidates(text), extract_candidates(text));
    }

    // ==================== Injected Rules Tests ====================

    #[test]
    fn test_extractor_with_custom_keywords() {
        let rules = NoiseRules::with_keywords(["Main Stage", "Tickets"]).unwrap();
        let extractor = CandidateExtractor::new(rules);
        let names = extractor.extract("MAIN STAGE\nTickets\nSTAGE\nRoisin Murphy");
        assert_eq!(names, ["STAGE", "Roisin Murphy"]);
    }
}
