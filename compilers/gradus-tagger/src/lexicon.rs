use std::collections::HashMap;
use std::path::Path;

use gradus_protocol::{Features, PartOfSpeech};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::TaggerError;

/// One known surface form with its analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub form: String,
    pub pos: PartOfSpeech,
    pub lemma: String,
    #[serde(default)]
    pub features: Features,
}

impl LexiconEntry {
    pub fn new(form: impl Into<String>, pos: PartOfSpeech, lemma: impl Into<String>) -> Self {
        Self {
            form: form.into(),
            pos,
            lemma: lemma.into(),
            features: Features::default(),
        }
    }

    pub fn with_features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }
}

/// Case-insensitive form → analysis table backing [`crate::LexiconTagger`].
#[derive(Debug, Clone, Default)]
pub struct TagLexicon {
    forms: HashMap<String, LexiconEntry>,
}

impl TagLexicon {
    pub fn from_entries(entries: impl IntoIterator<Item = LexiconEntry>) -> Self {
        let forms = entries
            .into_iter()
            .map(|entry| (entry.form.to_lowercase(), entry))
            .collect();
        Self { forms }
    }

    /// Parses a JSON array of entries.
    pub fn from_json_str(json: &str) -> Result<Self, TaggerError> {
        let entries: Vec<LexiconEntry> = serde_json::from_str(json)?;
        Ok(Self::from_entries(entries))
    }

    pub fn load(path: &Path) -> Result<Self, TaggerError> {
        let json = std::fs::read_to_string(path).map_err(|source| TaggerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let lexicon = Self::from_json_str(&json)?;
        info!(path = %path.display(), forms = lexicon.len(), "loaded tagger lexicon");
        Ok(lexicon)
    }

    pub fn lookup(&self, surface_form: &str) -> Option<&LexiconEntry> {
        self.forms.get(&surface_form.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}
