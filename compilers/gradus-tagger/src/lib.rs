pub mod error;
pub mod lexicon;
pub mod parser;
pub mod splitter;
pub mod token;

use std::sync::Arc;

use gradus_protocol::{Features, Language, PartOfSpeech, TaggedToken, TokenId};
use tracing::debug;

pub use crate::error::TaggerError;
pub use crate::lexicon::{LexiconEntry, TagLexicon};
pub use crate::splitter::{Segmenter, SentenceSplitter};
use crate::parser::parse_with_spans;
use crate::token::RawToken;

/// Anything that turns raw text into tagged, lemmatized tokens.
///
/// Implementations must assign token ids in text order starting at zero.
pub trait Tagger {
    fn tag(&self, text: &str) -> Result<Vec<TaggedToken>, TaggerError>;
}

impl<T: Tagger + ?Sized> Tagger for &T {
    fn tag(&self, text: &str) -> Result<Vec<TaggedToken>, TaggerError> {
        (**self).tag(text)
    }
}

impl<T: Tagger + ?Sized> Tagger for Box<T> {
    fn tag(&self, text: &str) -> Result<Vec<TaggedToken>, TaggerError> {
        (**self).tag(text)
    }
}

impl<T: Tagger + ?Sized> Tagger for Arc<T> {
    fn tag(&self, text: &str) -> Result<Vec<TaggedToken>, TaggerError> {
        (**self).tag(text)
    }
}

/// Labels the tagger writes into `Features::kind` for digit tokens.
fn numeral_kinds(language: Language) -> (&'static str, &'static str) {
    match language {
        Language::Italian => ("cardinale", "ordinale"),
        Language::English => ("cardinal", "ordinal"),
    }
}

/// Deterministic tagger: nom tokenizer plus a form lookup table.
///
/// Unknown words are tagged [`PartOfSpeech::Other`] with their lower-cased
/// surface as lemma; digit runs become numerals.
#[derive(Debug, Clone)]
pub struct LexiconTagger {
    lexicon: Arc<TagLexicon>,
    language: Language,
}

impl LexiconTagger {
    pub fn new(lexicon: Arc<TagLexicon>, language: Language) -> Self {
        Self { lexicon, language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    fn tag_word(&self, id: TokenId, text: &str) -> TaggedToken {
        match self.lexicon.lookup(text) {
            Some(entry) => TaggedToken::new(id, text, entry.pos, entry.lemma.clone())
                .with_features(entry.features.clone()),
            None => TaggedToken::new(id, text, PartOfSpeech::Other, text.to_lowercase()),
        }
    }

    fn tag_number(&self, id: TokenId, text: &str, ordinal: bool) -> TaggedToken {
        let (cardinal_kind, ordinal_kind) = numeral_kinds(self.language);
        let kind = if ordinal { ordinal_kind } else { cardinal_kind };
        TaggedToken::new(id, text, PartOfSpeech::Numeral, text)
            .with_features(Features::new().with_kind(kind))
    }
}

/// Token ids are `u32`; longer texts are rejected instead of wrapping.
pub(crate) fn token_id(index: usize) -> Result<TokenId, TaggerError> {
    u32::try_from(index)
        .map(TokenId::new)
        .map_err(|_| TaggerError::TooManyTokens(index))
}

impl Tagger for LexiconTagger {
    fn tag(&self, text: &str) -> Result<Vec<TaggedToken>, TaggerError> {
        let tokens = parse_with_spans(text)
            .into_iter()
            .enumerate()
            .map(|(index, (span, raw))| {
                let id = token_id(index)?;
                let surface = span.slice(text);
                Ok(match raw {
                    RawToken::Word(_) => self.tag_word(id, surface),
                    RawToken::Number(_) => self.tag_number(id, surface, raw.is_ordinal_number()),
                    RawToken::Punct(_) => {
                        TaggedToken::new(id, surface, PartOfSpeech::Punctuation, surface)
                    }
                })
            })
            .collect::<Result<Vec<_>, TaggerError>>()?;

        debug!(language = %self.language, tokens = tokens.len(), "tagged text");
        Ok(tokens)
    }
}
