use serde::{Deserialize, Serialize};

use crate::error::RewriteError;
use crate::extract::Delimiter;

/// Unit the fixpoint loop runs on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Document,
    Sentence,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteConfig {
    /// Upper bound of rewrite rounds per unit.
    pub max_iterations: u32,
    /// Extra attempts after a malformed or failed response.
    pub max_retries: u32,
    pub delimiter: Delimiter,
    pub granularity: Granularity,
    /// Replaces a unit whose retries ran out, instead of keeping the last good text.
    pub error_marker: Option<String>,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            max_retries: 2,
            delimiter: Delimiter::default(),
            granularity: Granularity::Document,
            error_marker: None,
        }
    }
}

impl RewriteConfig {
    pub fn validate(&self) -> Result<(), RewriteError> {
        if self.max_iterations == 0 {
            return Err(RewriteError::InvalidConfig {
                field: "max_iterations",
                reason: "must be at least 1".to_owned(),
            });
        }
        if let Delimiter::Tag(name) = &self.delimiter {
            if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
                return Err(RewriteError::InvalidConfig {
                    field: "delimiter",
                    reason: format!("'{name}' is not a valid tag name"),
                });
            }
        }
        Ok(())
    }

    /// Calls made per round before giving up on it.
    pub fn attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}
