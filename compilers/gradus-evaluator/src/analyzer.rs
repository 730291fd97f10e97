use gradus_protocol::TextAnalysis;
use gradus_tagger::{Tagger, TaggerError};

/// Produces the analysis the evaluator consumes.
///
/// Every [`Tagger`] is an analyzer without clause decomposition, which is
/// enough for all checks except syntax.
pub trait Analyzer {
    fn analyze(&self, text: &str) -> Result<TextAnalysis, TaggerError>;
}

impl<T: Tagger + ?Sized> Analyzer for T {
    fn analyze(&self, text: &str) -> Result<TextAnalysis, TaggerError> {
        Ok(TextAnalysis::from_tokens(self.tag(text)?))
    }
}
