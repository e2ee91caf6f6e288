use std::collections::HashMap;

use primorph_protocol::TagCode;

/// All stored inflections of one lemma.
///
/// Keeps insertion order (the nearest-match scan depends on it) and an index
/// for exact lookups. Each code appears at most once; the first surface wins.
#[derive(Debug, Clone, Default)]
pub struct LexicalEntry {
    forms: Vec<(TagCode, String)>,
    index: HashMap<TagCode, usize>,
}

impl LexicalEntry {
    /// Stores `surface` under `code` unless the code is already taken.
    /// Returns whether it was stored.
    pub(crate) fn insert_first(&mut self, code: TagCode, surface: String) -> bool {
        if self.index.contains_key(&code) {
            return false;
        }
        self.index.insert(code, self.forms.len());
        self.forms.push((code, surface));
        true
    }

    pub fn get(&self, code: TagCode) -> Option<&str> {
        self.index
            .get(&code)
            .map(|&position| self.forms[position].1.as_str())
    }

    /// Forms in the order they were read from the dictionary.
    pub fn iter(&self) -> impl Iterator<Item = (TagCode, &str)> {
        self.forms
            .iter()
            .map(|(code, surface)| (*code, surface.as_str()))
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

/// Lowercased lemma -> its forms. Read-only once the builder hands it over.
#[derive(Debug, Clone, Default)]
pub struct LexicalDictionary {
    entries: HashMap<String, LexicalEntry>,
}

impl LexicalDictionary {
    /// `lemma` must already be lowercased.
    pub fn entry(&self, lemma: &str) -> Option<&LexicalEntry> {
        self.entries.get(lemma)
    }

    pub fn lemma_count(&self) -> usize {
        self.entries.len()
    }

    pub fn form_count(&self) -> usize {
        self.entries.values().map(LexicalEntry::len).sum()
    }

    /// Inserts an empty entry if `lemma` is new. Returns whether it was new.
    pub(crate) fn insert_lemma(&mut self, lemma: &str) -> bool {
        if self.entries.contains_key(lemma) {
            return false;
        }
        self.entries
            .insert(lemma.to_string(), LexicalEntry::default());
        true
    }

    pub(crate) fn entry_mut(&mut self, lemma: &str) -> Option<&mut LexicalEntry> {
        self.entries.get_mut(lemma)
    }
}
