use std::time::Duration;

use gradus_tagger::TaggerError;
use thiserror::Error;

/// Failures of the rewrite capability or of the controller setup.
///
/// Capability failures and timeouts are absorbed by the retry path; only
/// configuration errors reach the caller.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("rewrite capability failed: {0}")]
    Capability(String),
    #[error("rewrite call timed out after {0:?}")]
    Timeout(Duration),
    #[error("invalid rewrite configuration for '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

/// Failures of the analyze/evaluate step in a gated rewrite.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("analysis failed: {0}")]
    Analysis(#[from] TaggerError),
}
