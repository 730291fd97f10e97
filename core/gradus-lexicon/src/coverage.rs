use std::collections::HashSet;

use gradus_protocol::{PartOfSpeech, TaggedToken, VocabularyTiers};
use gradus_tagger::Tagger;
use serde::Serialize;
use tracing::debug;

use crate::error::LexiconError;
use crate::lemma_set::LemmaSet;
use crate::tiers::{cumulative, Vocabulary};

#[derive(Debug, Clone)]
pub struct CoverageOptions {
    /// Parts of speech that count as content words.
    pub content_pos: Vec<PartOfSpeech>,
}

impl Default for CoverageOptions {
    fn default() -> Self {
        Self {
            content_pos: PartOfSpeech::CONTENT.to_vec(),
        }
    }
}

/// Percentage rounded to two decimals, `None` for an empty denominator.
pub fn percent(part: usize, whole: usize) -> Option<f64> {
    (whole > 0).then(|| (part as f64 / whole as f64 * 10_000.0).round() / 100.0)
}

/// Conform and unconform surface forms for one slice of the text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WordSplit {
    pub percent: Option<f64>,
    pub conform: Vec<String>,
    pub unconform: Vec<String>,
}

impl WordSplit {
    fn from_parts(mut conform: Vec<String>, mut unconform: Vec<String>) -> Self {
        conform.sort();
        unconform.sort();
        Self {
            percent: percent(conform.len(), conform.len() + unconform.len()),
            conform,
            unconform,
        }
    }

    pub fn conform_count(&self) -> usize {
        self.conform.len()
    }

    pub fn unconform_count(&self) -> usize {
        self.unconform.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PosCoverage {
    pub pos: PartOfSpeech,
    #[serde(flatten)]
    pub words: WordSplit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniqueCoverage {
    pub percent: Option<f64>,
    pub conform: usize,
    pub unconform: usize,
}

/// Coverage of the text by one cumulative tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierCoverage {
    pub label: String,
    pub by_pos: Vec<PosCoverage>,
    pub overall: WordSplit,
    pub unique: UniqueCoverage,
}

impl TierCoverage {
    pub fn pos(&self, pos: PartOfSpeech) -> Option<&PosCoverage> {
        self.by_pos.iter().find(|c| c.pos == pos)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PosTotal {
    pub pos: PartOfSpeech,
    pub words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageReport {
    pub text: String,
    /// Content words per part of speech, after stopword removal.
    pub totals: Vec<PosTotal>,
    pub total_words: Vec<String>,
    /// Distinct (lemma, part of speech) pairs among the content words.
    pub unique_total: usize,
    pub tiers: Vec<TierCoverage>,
}

impl CoverageReport {
    pub fn tier(&self, label: &str) -> Option<&TierCoverage> {
        self.tiers.iter().find(|t| t.label == label)
    }
}

fn tier_coverage(
    label: &str,
    vocabulary: &Vocabulary,
    content: &[(PartOfSpeech, Vec<&TaggedToken>)],
    unique_total: usize,
) -> TierCoverage {
    let mut by_pos = Vec::with_capacity(content.len());
    let mut all_conform = Vec::new();
    let mut all_unconform = Vec::new();
    let mut unique_conform = HashSet::new();

    for (pos, tokens) in content {
        let (hits, misses): (Vec<&TaggedToken>, Vec<&TaggedToken>) = tokens
            .iter()
            .copied()
            .partition(|t| vocabulary.contains(*pos, &t.lemma));

        unique_conform.extend(hits.iter().map(|t| (t.lemma.to_lowercase(), *pos)));

        let conform: Vec<String> = hits.iter().map(|t| t.text.clone()).collect();
        let unconform: Vec<String> = misses.iter().map(|t| t.text.clone()).collect();
        all_conform.extend(conform.iter().cloned());
        all_unconform.extend(unconform.iter().cloned());

        by_pos.push(PosCoverage {
            pos: *pos,
            words: WordSplit::from_parts(conform, unconform),
        });
    }

    TierCoverage {
        label: label.to_owned(),
        by_pos,
        overall: WordSplit::from_parts(all_conform, all_unconform),
        unique: UniqueCoverage {
            percent: percent(unique_conform.len(), unique_total),
            conform: unique_conform.len(),
            unconform: unique_total - unique_conform.len(),
        },
    }
}

/// Measures how much of `text` is covered by each cumulative vocabulary tier.
///
/// Stopwords are matched on the surface form, vocabulary on the lemma, both
/// case-insensitively. Non-content tokens are ignored.
pub fn check_coverage<T: Tagger + ?Sized>(
    text: &str,
    tagger: &T,
    tiers: &VocabularyTiers,
    stopwords: Option<&LemmaSet>,
    options: &CoverageOptions,
) -> Result<CoverageReport, LexiconError> {
    let tokens = tagger.tag(text)?;

    let kept: Vec<&TaggedToken> = tokens
        .iter()
        .filter(|t| stopwords.map_or(true, |stop| !stop.contains(&t.text)))
        .filter(|t| options.content_pos.contains(&t.pos))
        .collect();

    let content: Vec<(PartOfSpeech, Vec<&TaggedToken>)> = options
        .content_pos
        .iter()
        .map(|pos| (*pos, kept.iter().copied().filter(|t| t.pos == *pos).collect()))
        .collect();

    let totals: Vec<PosTotal> = content
        .iter()
        .map(|(pos, tokens)| {
            let mut words: Vec<String> = tokens.iter().map(|t| t.text.clone()).collect();
            words.sort();
            PosTotal { pos: *pos, words }
        })
        .collect();

    let mut total_words: Vec<String> = kept.iter().map(|t| t.text.clone()).collect();
    total_words.sort();

    let unique_total = kept
        .iter()
        .map(|t| (t.lemma.to_lowercase(), t.pos))
        .collect::<HashSet<_>>()
        .len();

    let tiers: Vec<TierCoverage> = cumulative(tiers)
        .iter()
        .map(|tier| tier_coverage(&tier.label, &tier.vocabulary, &content, unique_total))
        .collect();

    debug!(
        content_words = kept.len(),
        unique = unique_total,
        tiers = tiers.len(),
        "computed lexical coverage"
    );

    Ok(CoverageReport {
        text: text.to_owned(),
        totals,
        total_words,
        unique_total,
        tiers,
    })
}
