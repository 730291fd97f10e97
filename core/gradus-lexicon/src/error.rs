use std::path::PathBuf;

use gradus_tagger::TaggerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed word list: {0}")]
    Json(#[from] serde_json::Error),
    #[error("corrupt vocabulary archive: {0}")]
    CorruptArchive(String),
    #[error(transparent)]
    Tagger(#[from] TaggerError),
}
