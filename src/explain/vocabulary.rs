//! Brand vocabulary substitution
//!
//! Exact-match, case-insensitive, word-boundary replacement with a
//! longest-match-first contract: entries are sorted by term length
//! descending, and each scan position tries them in that order, so a
//! short term can never shadow a longer overlapping one ("person"
//! inside "security person"). Replacement text is emitted past, never
//! rescanned within a pass.

use std::collections::BTreeMap;

/// Substitution table prepared from a brand's `custom_vocabulary`.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    /// (term, replacement), sorted by term length descending, then
    /// alphabetically for determinism.
    entries: Vec<(String, String)>,
}

impl Vocabulary {
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let mut entries: Vec<(String, String)> = map
            .iter()
            .map(|(term, replacement)| (term.clone(), replacement.clone()))
            .collect();
        entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply the table to one rendered phrase.
    pub fn apply(&self, text: &str) -> String {
        if self.entries.is_empty() {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len());
        let mut i = 0;
        while i < text.len() {
            if let Some((term, replacement)) = self.match_at(text, i) {
                out.push_str(replacement);
                i += term.len();
                continue;
            }
            // No entry matched here; copy one char and move on.
            let ch = text[i..].chars().next().unwrap_or('\u{FFFD}');
            out.push(ch);
            i += ch.len_utf8();
        }
        out
    }

    /// Longest entry matching at byte offset `i`, respecting word
    /// boundaries on both sides.
    fn match_at(&self, text: &str, i: usize) -> Option<(&str, &str)> {
        let boundary_before = text[..i]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        if !boundary_before {
            return None;
        }

        for (term, replacement) in &self.entries {
            let end = i + term.len();
            if end > text.len() || !text.is_char_boundary(end) {
                continue;
            }
            if !text[i..end].eq_ignore_ascii_case(term) {
                continue;
            }
            let boundary_after = text[end..]
                .chars()
                .next()
                .map_or(true, |c| !c.is_alphanumeric());
            if boundary_after {
                return Some((term.as_str(), replacement.as_str()));
            }
        }
        None
    }
}

// ============================================================================
// TESTS
// ============================================================================
