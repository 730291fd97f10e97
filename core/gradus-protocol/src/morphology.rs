use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Coarse part-of-speech bucket shared by taggers, inventories and word lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum PartOfSpeech {
    #[cfg_attr(feature = "serde", serde(rename = "noun", alias = "NOUN", alias = "n"))]
    Noun = 0,
    #[cfg_attr(feature = "serde", serde(rename = "propn", alias = "PROPN"))]
    ProperNoun = 1,
    #[cfg_attr(feature = "serde", serde(rename = "verb", alias = "VERB", alias = "AUX", alias = "v"))]
    Verb = 2,
    #[cfg_attr(feature = "serde", serde(rename = "adjective", alias = "ADJ", alias = "a"))]
    Adjective = 3,
    #[cfg_attr(feature = "serde", serde(rename = "adverb", alias = "ADV", alias = "r"))]
    Adverb = 4,
    #[cfg_attr(feature = "serde", serde(rename = "adposition", alias = "ADP", alias = "p"))]
    Adposition = 5,
    #[cfg_attr(feature = "serde", serde(rename = "determiner", alias = "DET", alias = "d"))]
    Determiner = 6,
    #[cfg_attr(feature = "serde", serde(rename = "conjunction", alias = "CCONJ", alias = "SCONJ", alias = "c"))]
    Conjunction = 7,
    #[cfg_attr(feature = "serde", serde(rename = "pronoun", alias = "PRON", alias = "pron"))]
    Pronoun = 8,
    #[cfg_attr(feature = "serde", serde(rename = "numeral", alias = "NUM", alias = "num"))]
    Numeral = 9,
    #[cfg_attr(feature = "serde", serde(rename = "interjection", alias = "INTJ", alias = "i"))]
    Interjection = 10,
    #[cfg_attr(feature = "serde", serde(rename = "particle", alias = "PART", alias = "part"))]
    Particle = 11,
    #[cfg_attr(feature = "serde", serde(rename = "punct", alias = "PUNCT"))]
    Punctuation = 12,
    #[cfg_attr(feature = "serde", serde(rename = "symbol", alias = "SYM", alias = "sym"))]
    Symbol = 13,
    #[cfg_attr(feature = "serde", serde(rename = "other", alias = "X", alias = "x"))]
    Other = 14,
}

impl PartOfSpeech {
    pub const ALL: [PartOfSpeech; 15] = [
        Self::Noun,
        Self::ProperNoun,
        Self::Verb,
        Self::Adjective,
        Self::Adverb,
        Self::Adposition,
        Self::Determiner,
        Self::Conjunction,
        Self::Pronoun,
        Self::Numeral,
        Self::Interjection,
        Self::Particle,
        Self::Punctuation,
        Self::Symbol,
        Self::Other,
    ];

    /// Buckets that carry lexical content (the ones word lists are written for).
    pub const CONTENT: [PartOfSpeech; 4] = [Self::Noun, Self::Verb, Self::Adjective, Self::Adverb];

    /// Short code used as key in vocabulary word lists.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Noun => "n",
            Self::ProperNoun => "propn",
            Self::Verb => "v",
            Self::Adjective => "a",
            Self::Adverb => "r",
            Self::Adposition => "p",
            Self::Determiner => "d",
            Self::Conjunction => "c",
            Self::Pronoun => "pron",
            Self::Numeral => "num",
            Self::Interjection => "i",
            Self::Particle => "part",
            Self::Punctuation => "punct",
            Self::Symbol => "sym",
            Self::Other => "x",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|pos| pos.code() == code)
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Target languages with a shipped inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Language {
    Italian = 0,
    English = 1,
}

impl Language {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Italian => "it",
            Self::English => "en",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Italian => "italian",
            Self::English => "english",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLanguage(pub String);

impl fmt::Display for UnknownLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported language: '{}'", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UnknownLanguage {}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "it" | "italian" | "italiano" => Ok(Self::Italian),
            "en" | "english" => Ok(Self::English),
            _ => Err(UnknownLanguage(String::from(s))),
        }
    }
}

macro_rules! label_setters {
    ($($field:ident => $setter:ident),* $(,)?) => {
        $(
            pub fn $setter(mut self, value: impl Into<String>) -> Self {
                self.$field = Some(value.into());
                self
            }
        )*
    };
}

/// Morphological attributes attached to a token.
///
/// Labels are kept as produced by the tagger (e.g. `"indicativo"` or
/// `"indicative"`); inventories decide what they mean.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Features {
    pub mood: Option<String>,
    pub tense: Option<String>,
    pub aspect: Option<String>,
    pub voice: Option<String>,
    pub person: Option<String>,
    pub number: Option<String>,
    pub degree: Option<String>,
    /// Pronoun or numeral sub-category.
    pub kind: Option<String>,
    /// Adjective function (descriptive, possessive, ...).
    pub function: Option<String>,
    pub verb_form: Option<String>,
    /// Auxiliary or modal construct carried by a verb group.
    pub auxiliary: Option<String>,
    pub finite: Option<bool>,
    pub modal: Option<bool>,
    pub regular: Option<bool>,
    pub possessive: Option<bool>,
}

impl Features {
    pub fn new() -> Self {
        Self::default()
    }

    label_setters! {
        mood => with_mood,
        tense => with_tense,
        aspect => with_aspect,
        voice => with_voice,
        person => with_person,
        number => with_number,
        degree => with_degree,
        kind => with_kind,
        function => with_function,
        verb_form => with_verb_form,
        auxiliary => with_auxiliary,
    }

    pub fn with_finite(mut self, finite: bool) -> Self {
        self.finite = Some(finite);
        self
    }

    pub fn with_modal(mut self, modal: bool) -> Self {
        self.modal = Some(modal);
        self
    }

    pub fn with_regular(mut self, regular: bool) -> Self {
        self.regular = Some(regular);
        self
    }

    pub fn with_possessive(mut self, possessive: bool) -> Self {
        self.possessive = Some(possessive);
        self
    }

    pub fn is_modal(&self) -> bool {
        self.modal.unwrap_or(false)
    }
}

/// Renders an optional label for diagnostics.
pub fn label(value: Option<&String>) -> &str {
    value.map(String::as_str).unwrap_or("unknown")
}
