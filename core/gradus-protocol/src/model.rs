use alloc::string::String;
use alloc::vec::Vec;

use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use crate::morphology::{Language, PartOfSpeech};
use crate::report::Category;

pub const INVENTORY_FORMAT_VERSION: u32 = 1;

#[cfg(feature = "serde")]
fn default_version() -> u32 {
    INVENTORY_FORMAT_VERSION
}

/// Allow-lists and combination tables defining one proficiency level.
///
/// A missing section means the category is not constrained at all.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct ConstraintInventory {
    #[cfg_attr(feature = "serde", serde(default = "default_version"))]
    pub version: u32,
    pub language: Language,
    pub level: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub pronouns: Option<PronounRules>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub numerals: Option<NumeralRules>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub verbs: Option<VerbRules>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub nouns: Option<NounRules>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub adjectives: Option<AdjectiveRules>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub syntax: Option<SyntaxRules>,
}

impl ConstraintInventory {
    /// Categories this inventory has rules for.
    pub fn categories(&self) -> Category {
        let mut categories = Category::empty();
        categories.set(Category::PRONOUNS, self.pronouns.is_some());
        categories.set(Category::NUMBERS, self.numerals.is_some());
        categories.set(Category::VERBS, self.verbs.is_some());
        categories.set(Category::NOUNS, self.nouns.is_some());
        categories.set(Category::ADJECTIVES, self.adjectives.is_some());
        categories.set(Category::SYNTAX, self.syntax.is_some());
        categories
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct PronounRules {
    pub allowed_kinds: Vec<String>,
    /// Kind whose members are further restricted to `allowed_interrogatives`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub interrogative_kind: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub allowed_interrogatives: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct NumeralRules {
    pub ordinal_kind: String,
    pub allowed_ordinals: Vec<String>,
}

/// A fully specified conjugation slot.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Conjugation {
    pub mood: String,
    pub tense: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub aspect: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct TenseSpec {
    pub tense: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub aspect: Option<String>,
}

/// Allowed usage of one mood. Empty lists leave that attribute unrestricted.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct MoodRule {
    pub mood: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tenses: Vec<TenseSpec>,
    /// Tense assumed when a token of this mood carries none, for moods
    /// whose taggers never annotate the single tense they have.
    #[cfg_attr(feature = "serde", serde(default))]
    pub implied_tense: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub persons: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub numbers: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub lemmas: Vec<String>,
}

/// The "be going to" periphrasis when annotated as a continuous tense.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct GoingToRule {
    pub auxiliary: String,
    pub mood: String,
    pub aspect: String,
    pub present_tense: String,
    pub past_tense: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct ModalRules {
    pub allowed: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub semi_modals: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub going_to: Option<GoingToRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct NonFiniteRules {
    pub forbid_passive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct VerbRules {
    #[cfg_attr(feature = "serde", serde(default))]
    pub irregular_lemmas: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub permitted_irregulars: Vec<String>,
    pub active_voice: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub passive_allowances: Vec<Conjugation>,
    pub moods: Vec<MoodRule>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modals: Option<ModalRules>,
    /// Present when the tagger distinguishes finite from non-finite forms.
    #[cfg_attr(feature = "serde", serde(default))]
    pub non_finite: Option<NonFiniteRules>,
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct NounRules {
    pub plural_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct AdjectiveRules {
    pub allowed_functions: Vec<String>,
    pub descriptive_function: String,
    pub positive_degree: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct SyntaxRules {
    pub main_functions: Vec<String>,
    pub volitive_function: String,
    pub imperative_mood: String,
    pub coordinate_types: Vec<String>,
    pub subordinate_functions: Vec<String>,
    pub conditional_function: String,
    pub conditional_conjunction: String,
}

/// Words of one part of speech inside a tier.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct PosWordList {
    pub pos: PartOfSpeech,
    pub words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct VocabularyTier {
    pub label: String,
    pub lists: Vec<PosWordList>,
}

impl VocabularyTier {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            lists: Vec::new(),
        }
    }

    pub fn with_words<I, S>(mut self, pos: PartOfSpeech, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lists.push(PosWordList {
            pos,
            words: words.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn words(&self, pos: PartOfSpeech) -> impl Iterator<Item = &str> {
        self.lists
            .iter()
            .filter(move |list| list.pos == pos)
            .flat_map(|list| list.words.iter().map(String::as_str))
    }
}

/// Ordered, cumulative vocabulary levels (lowest first).
#[derive(Debug, Clone, Default, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct VocabularyTiers {
    pub tiers: Vec<VocabularyTier>,
}

impl VocabularyTiers {
    pub fn new(tiers: Vec<VocabularyTier>) -> Self {
        Self { tiers }
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.tiers.iter().map(|tier| tier.label.as_str())
    }
}
