pub mod adjectives;
pub mod nouns;
pub mod numerals;
pub mod pronouns;
pub mod syntax;
pub mod verbs;

use gradus_protocol::Diagnostic;

/// Puts token diagnostics in text order, keeping per-token check order.
pub(crate) fn in_text_order(mut diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
    diagnostics.sort_by_key(|d| d.token);
    diagnostics
}
