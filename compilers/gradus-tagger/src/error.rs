use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaggerError {
    #[error("failed to read tagger lexicon {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed tagger lexicon: {0}")]
    Lexicon(#[from] serde_json::Error),
    #[error("tagging backend failed: {0}")]
    Backend(String),
    #[error("text has more tokens than token ids can address (token #{0})")]
    TooManyTokens(usize),
}
