use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use crate::ids::{SentenceId, TokenId};
use crate::morphology::{Features, PartOfSpeech};

/// One token as emitted by a tagger. Never mutated after tagging.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct TaggedToken {
    pub id: TokenId,
    pub text: String,
    pub pos: PartOfSpeech,
    pub lemma: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub features: Features,
}

impl TaggedToken {
    pub fn new(
        id: impl Into<TokenId>,
        text: impl Into<String>,
        pos: PartOfSpeech,
        lemma: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
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

/// Half-open range of token ids covered by a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct TokenSpan {
    pub start: TokenId,
    pub end: TokenId,
}

impl TokenSpan {
    pub fn new(start: impl Into<TokenId>, end: impl Into<TokenId>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn contains(&self, id: TokenId) -> bool {
        self.start <= id && id < self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct ClauseAnalysis {
    pub content: String,
    /// Function of a main/subordinate clause, type of a coordinate clause.
    pub label: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tokens: Option<TokenSpan>,
}

impl ClauseAnalysis {
    pub fn new(content: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            label: label.into(),
            tokens: None,
        }
    }

    pub fn with_tokens(mut self, span: TokenSpan) -> Self {
        self.tokens = Some(span);
        self
    }
}

/// Clause decomposition of a single sentence. The main clause is mandatory.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct SentenceAnalysis {
    pub id: SentenceId,
    pub content: String,
    pub kind: String,
    pub main: ClauseAnalysis,
    #[cfg_attr(feature = "serde", serde(default))]
    pub coordinate: Vec<ClauseAnalysis>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub subordinate: Vec<ClauseAnalysis>,
}

impl SentenceAnalysis {
    pub fn new(
        id: impl Into<SentenceId>,
        content: impl Into<String>,
        kind: impl Into<String>,
        main: ClauseAnalysis,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            kind: kind.into(),
            main,
            coordinate: Vec::new(),
            subordinate: Vec::new(),
        }
    }

    pub fn with_coordinate(mut self, clause: ClauseAnalysis) -> Self {
        self.coordinate.push(clause);
        self
    }

    pub fn with_subordinate(mut self, clause: ClauseAnalysis) -> Self {
        self.subordinate.push(clause);
        self
    }
}

/// Everything the evaluator needs to know about one text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct TextAnalysis {
    pub tokens: Vec<TaggedToken>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sentences: Vec<SentenceAnalysis>,
}

impl TextAnalysis {
    pub fn from_tokens(tokens: Vec<TaggedToken>) -> Self {
        Self {
            tokens,
            sentences: Vec::new(),
        }
    }

    pub fn with_sentence(mut self, sentence: SentenceAnalysis) -> Self {
        self.sentences.push(sentence);
        self
    }
}
