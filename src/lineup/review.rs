//! Review state for extracted candidates.
//!
//! Every extracted name starts selected; the user deselects OCR mistakes
//! before the confirmed names are searched on Spotify.

use serde::{Deserialize, Serialize};

/// One candidate name with its review flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateEntry {
    /// Candidate artist name as extracted.
    pub name: String,
    /// Whether the name is kept for the Spotify search.
    pub selected: bool,
}

/// Ordered list of candidates under review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSelection {
    entries: Vec<CandidateEntry>,
}

impl CandidateSelection {
    /// Wraps extracted names, all selected.
    #[must_use]
    pub fn from_candidates<I>(names: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self {
            entries: names
                .into_iter()
                .map(|name| CandidateEntry {
                    name,
                    selected: true,
                })
                .collect(),
        }
    }

    /// Flips the flag at `index`. Returns the new value, or `false` when out of range.
    pub fn toggle(&mut self, index: usize) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.selected = !entry.selected;
                entry.selected
            }
            None => false,
        }
    }

    /// Sets the flag for every entry with exactly this name.
    pub fn set_selected(&mut self, name: &str, selected: bool) {
        for entry in self.entries.iter_mut().filter(|entry| entry.name == name) {
            entry.selected = selected;
        }
    }

    /// Returns the confirmed names in review order.
    #[must_use]
    pub fn selected_names(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| entry.selected)
            .map(|entry| entry.name.clone())
            .collect()
    }

    #[must_use]
    pub fn entries(&self) -> &[CandidateEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
