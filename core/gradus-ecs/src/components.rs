use gradus_protocol::{Features, PartOfSpeech, SentenceId, TokenId, TokenSpan};

/// Basic data about the token (source of truth for diagnostics)
#[derive(Debug, Clone)]
pub struct TokenData {
    pub id: TokenId,
    pub text: String,
    pub lemma: String,
}

/// Part of speech, kept as its own component so systems can filter on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pos(pub PartOfSpeech);

/// Morphological attributes of the token.
#[derive(Debug, Clone, Default)]
pub struct Morphology(pub Features);

/// Where a clause sits in its sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ClauseRole {
    Main,
    Coordinate,
    Subordinate,
}

/// A clause of the syntactic decomposition.
#[derive(Debug, Clone)]
pub struct ClauseData {
    pub sentence: SentenceId,
    pub role: ClauseRole,
    /// Position among the clauses sharing `role` in the sentence.
    pub order: usize,
    pub content: String,
    pub label: String,
    pub span: Option<TokenSpan>,
}

/// Sentence-level context copied onto every clause entity.
#[derive(Debug, Clone)]
pub struct SentenceContext {
    pub content: String,
    pub kind: String,
}
