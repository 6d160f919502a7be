//! Reference catalog
//!
//! Ordered collection of reference phrases and the canonical label each one
//! resolves to. Built from `label : synonym, synonym, ...` lines; the label's
//! own words are always the first entry for that line.

use crate::{Error, Result};
use ahash::AHashMap;
use serde::Serialize;

/// A reference phrase and the label it resolves to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceEntry {
    words: Vec<String>,
    label: String,
}

impl ReferenceEntry {
    #[inline]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The phrase as its words joined by single spaces
    pub fn phrase(&self) -> String {
        self.words.join(" ")
    }
}

/// One parsed reference line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceLine<'a> {
    pub label: &'a str,
    pub synonyms: Vec<&'a str>,
}

impl<'a> ReferenceLine<'a> {
    /// Split a line at its first colon into a trimmed label and the
    /// non-empty, trimmed, comma-separated synonyms.
    ///
    /// Returns `Ok(None)` for lines carrying nothing (blank, or only
    /// separators).
    pub fn parse(line: &'a str) -> Result<Option<Self>> {
        let (label, rest) = match line.split_once(':') {
            Some((label, rest)) => (label.trim(), rest),
            None => (line.trim(), ""),
        };

        let synonyms: Vec<&str> = rest
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        if label.is_empty() {
            if synonyms.is_empty() {
                return Ok(None);
            }
            return Err(Error::EmptyLabel(line.to_string()));
        }

        Ok(Some(Self { label, synonyms }))
    }
}

/// Ordered reference catalog
///
/// Entry order is insertion order and decides ties between equally scored
/// entries. Phrases are unique: a phrase added again for the same label is
/// skipped, while a phrase claimed by a different label is rejected.
#[derive(Debug, Clone, Default)]
pub struct ReferenceCatalog {
    entries: Vec<ReferenceEntry>,
    // phrase (words joined by a space) -> entry position
    index: AHashMap<String, usize>,
}

impl ReferenceCatalog {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from reference lines
    pub fn from_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut catalog = Self::new();
        catalog.extend_lines(lines)?;
        Ok(catalog)
    }

    /// Add every line in order, stopping at the first invalid one
    pub fn extend_lines<I, S>(&mut self, lines: I) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added = 0;
        for line in lines {
            added += self.add_line(line.as_ref())?;
        }
        Ok(added)
    }

    /// Add one `label : synonym, ...` line
    ///
    /// Every phrase of the line is checked before any is inserted, so a
    /// rejected line leaves the catalog unchanged.
    ///
    /// # Returns
    /// The number of new entries
    pub fn add_line(&mut self, line: &str) -> Result<usize> {
        let Some(parsed) = ReferenceLine::parse(line)? else {
            return Ok(0);
        };

        let label = parsed.label.split_whitespace().collect::<Vec<_>>().join(" ");
        let mut pending: Vec<Vec<String>> = Vec::new();
        for phrase in std::iter::once(parsed.label).chain(parsed.synonyms) {
            let words = split_words(phrase);
            if words.is_empty() || pending.contains(&words) {
                continue;
            }
            if self.check_phrase(&words.join(" "), &label)? {
                pending.push(words);
            }
        }

        let added = pending.len();
        for words in pending {
            self.push(words, &label);
        }

        tracing::debug!(label = %label, added, "reference line added");
        Ok(added)
    }

    /// Map `phrase` to `label`
    ///
    /// # Returns
    /// `true` when a new entry was created, `false` when the phrase was empty
    /// or already mapped to the same label
    pub fn add_phrase(&mut self, phrase: &str, label: &str) -> Result<bool> {
        let words = split_words(phrase);
        if words.is_empty() {
            return Ok(false);
        }
        let label = label.trim();
        if label.is_empty() {
            return Err(Error::EmptyLabel(phrase.to_string()));
        }

        if !self.check_phrase(&words.join(" "), label)? {
            return Ok(false);
        }
        self.push(words, label);
        Ok(true)
    }

    /// `Ok(true)` when `key` is new, `Ok(false)` when it already maps to
    /// `label`
    fn check_phrase(&self, key: &str, label: &str) -> Result<bool> {
        let Some(&existing) = self.index.get(key) else {
            return Ok(true);
        };
        let existing = &self.entries[existing];
        if existing.label == label {
            tracing::debug!(phrase = %key, label, "duplicate reference phrase skipped");
            return Ok(false);
        }
        Err(Error::ConflictingPhrase {
            phrase: key.to_string(),
            existing: existing.label.clone(),
            requested: label.to_string(),
        })
    }

    fn push(&mut self, words: Vec<String>, label: &str) {
        self.index.insert(words.join(" "), self.entries.len());
        self.entries.push(ReferenceEntry {
            words,
            label: label.to_string(),
        });
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&ReferenceEntry> {
        self.entries.get(index)
    }

    /// Look up the entry for an exact phrase
    pub fn find(&self, phrase: &str) -> Option<&ReferenceEntry> {
        let key = phrase.split_whitespace().collect::<Vec<_>>().join(" ");
        self.index.get(&key).map(|&i| &self.entries[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReferenceEntry> {
        self.entries.iter()
    }

    #[inline]
    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    /// Distinct labels in first-seen order
    pub fn labels(&self) -> Vec<&str> {
        let mut seen = ahash::AHashSet::new();
        self.entries
            .iter()
            .map(ReferenceEntry::label)
            .filter(|label| seen.insert(*label))
            .collect()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn split_words(phrase: &str) -> Vec<String> {
    phrase.split_whitespace().map(str::to_string).collect()
}

impl<'a> IntoIterator for &'a ReferenceCatalog {
    type Item = &'a ReferenceEntry;
    type IntoIter = std::slice::Iter<'a, ReferenceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
