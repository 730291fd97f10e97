use std::collections::HashSet;

/// Set of words compared case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LemmaSet {
    words: HashSet<String>,
}

impl LemmaSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, word: &str) -> bool {
        self.words.insert(word.to_lowercase())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn is_subset(&self, other: &LemmaSet) -> bool {
        self.words.is_subset(&other.words)
    }

    /// Lower-cased members in sorted order.
    pub fn sorted(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.words.iter().map(String::as_str).collect();
        words.sort_unstable();
        words
    }
}

impl<'a> Extend<&'a str> for LemmaSet {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        for word in iter {
            self.insert(word);
        }
    }
}

impl<'a> FromIterator<&'a str> for LemmaSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
