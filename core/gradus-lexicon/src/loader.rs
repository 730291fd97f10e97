use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use gradus_protocol::{PartOfSpeech, PosWordList, VocabularyTier, VocabularyTiers};
use rkyv::AlignedVec;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use tracing::info;

use crate::error::LexiconError;
use crate::lemma_set::LemmaSet;

/// Word-list document of the form `{"A1": {"n": [...], "v": [...]}, "A2": {...}}`.
///
/// Tier order is the order of the keys in the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierMap(pub VocabularyTiers);

struct TierMapVisitor;

impl<'de> Visitor<'de> for TierMapVisitor {
    type Value = TierMap;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map from tier label to part-of-speech word lists")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut tiers = Vec::new();
        while let Some((label, lists)) = access.next_entry::<String, BTreeMap<String, Vec<String>>>()? {
            let mut tier = VocabularyTier::new(label);
            for (code, words) in lists {
                let pos = PartOfSpeech::from_code(&code).ok_or_else(|| {
                    de::Error::custom(format!("unknown part-of-speech code '{code}' in tier '{}'", tier.label))
                })?;
                tier.lists.push(PosWordList { pos, words });
            }
            tiers.push(tier);
        }
        Ok(TierMap(VocabularyTiers::new(tiers)))
    }
}

impl<'de> Deserialize<'de> for TierMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(TierMapVisitor)
    }
}

pub fn parse_tiers_json(json: &str) -> Result<VocabularyTiers, LexiconError> {
    let TierMap(tiers) = serde_json::from_str(json)?;
    Ok(tiers)
}

/// Validates and deserializes a compiled tier archive.
pub fn parse_tiers_archive(bytes: &[u8]) -> Result<VocabularyTiers, LexiconError> {
    let mut aligned = AlignedVec::with_capacity(bytes.len());
    aligned.extend_from_slice(bytes);
    rkyv::from_bytes::<VocabularyTiers>(&aligned)
        .map_err(|e| LexiconError::CorruptArchive(e.to_string()))
}

fn read(path: &Path) -> Result<Vec<u8>, LexiconError> {
    std::fs::read(path).map_err(|source| LexiconError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn is_archive(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "rkyv" || ext == "bin")
}

/// Loads tiers from a JSON word-list document or a `.rkyv` archive.
pub fn load_tiers(path: &Path) -> Result<VocabularyTiers, LexiconError> {
    let bytes = read(path)?;
    let tiers = if is_archive(path) {
        parse_tiers_archive(&bytes)?
    } else {
        let TierMap(tiers) = serde_json::from_slice(&bytes)?;
        tiers
    };
    info!(
        path = %path.display(),
        tiers = tiers.len(),
        labels = ?tiers.labels().collect::<Vec<_>>(),
        "loaded vocabulary tiers"
    );
    Ok(tiers)
}

/// Stopwords come either as a JSON array or as one word per line.
pub fn parse_stopwords(content: &str) -> Result<LemmaSet, LexiconError> {
    if content.trim_start().starts_with('[') {
        let words: Vec<String> = serde_json::from_str(content)?;
        return Ok(words.iter().map(String::as_str).collect());
    }

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect())
}

pub fn load_stopwords(path: &Path) -> Result<LemmaSet, LexiconError> {
    let bytes = read(path)?;
    let content = String::from_utf8_lossy(&bytes);
    let stopwords = parse_stopwords(&content)?;
    info!(path = %path.display(), count = stopwords.len(), "loaded stopwords");
    Ok(stopwords)
}
