use crate::error::RewriteError;
use crate::message::TokenUsage;

/// One raw answer of the rewrite capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub content: String,
    pub usage: Option<TokenUsage>,
}

impl RawResponse {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            usage: None,
        }
    }

    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }
}

/// External capability that proposes a rewrite of `text` under `constraints`
/// (typically an LLM). Timeouts and transport failures are reported as errors.
pub trait Rewriter {
    fn rewrite(&mut self, text: &str, constraints: &str) -> Result<RawResponse, RewriteError>;
}

impl<F> Rewriter for F
where
    F: FnMut(&str, &str) -> Result<RawResponse, RewriteError>,
{
    fn rewrite(&mut self, text: &str, constraints: &str) -> Result<RawResponse, RewriteError> {
        self(text, constraints)
    }
}
