use std::path::PathBuf;

use thiserror::Error;

/// Problems loading a constraint inventory. Fatal at startup.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("failed to read inventory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed inventory: {0}")]
    Json(#[from] serde_json::Error),
    #[error("corrupt inventory archive: {0}")]
    CorruptArchive(String),
    #[error("unsupported inventory format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}
