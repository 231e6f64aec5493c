#![allow(dead_code)]

//! Exact-Match Engine — case-insensitive contiguous substring matching.
//!
//! The relation is existence, not count: a phrase either occurs contiguously
//! in the haystack (after case folding and whitespace trimming) or it does
//! not. No tokenization, no stemming, no synonyms, no edit distance.

/// A case-folded haystack, folded once so a batch of phrases can be tested
/// without re-lowercasing the document per phrase.
#[derive(Debug, Clone)]
pub struct Haystack {
    folded: String,
}

impl Haystack {
    pub fn new(text: &str) -> Self {
        Self {
            folded: text.to_lowercase(),
        }
    }

    /// True iff the trimmed, case-folded phrase occurs contiguously.
    /// An empty (or whitespace-only) phrase matches nothing.
    pub fn contains_phrase(&self, phrase: &str) -> bool {
        let needle = phrase.trim().to_lowercase();
        !needle.is_empty() && self.folded.contains(&needle)
    }
}

/// Standalone form of the matching relation, for call sites that test a
/// single pair and do not benefit from a pre-folded haystack.
pub fn matches(phrase: &str, haystack: &str) -> bool {
    Haystack::new(haystack).contains_phrase(phrase)
}

/// Returns the subset of `phrases` present in the haystack, preserving the
/// input order and the exact input strings.
pub fn match_all(phrases: &[String], haystack: &Haystack) -> Vec<String> {
    phrases
        .iter()
        .filter(|phrase| haystack.contains_phrase(phrase))
        .cloned()
        .collect()
}
