use gradus_protocol::ConformanceReport;
use serde::Serialize;

use crate::message::{Message, TokenUsage};

/// How a unit of text left the rewrite loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RewriteStatus {
    /// The evaluator accepted the text.
    Conformant,
    /// The rewrite returned the text unchanged (modulo whitespace).
    Converged,
    /// `max_iterations` rounds ran without reaching a fixpoint.
    BudgetExhausted,
    /// Retries ran out; the unit kept its last good text.
    Degraded,
}

impl RewriteStatus {
    /// The worse of two statuses, for aggregating sentences into a document.
    pub fn combine(self, other: RewriteStatus) -> RewriteStatus {
        self.max(other)
    }
}

/// Mutable state of one controller invocation.
///
/// `current`, `iteration` and `last_good` describe the unit being rewritten;
/// transcript, usage and warnings accumulate over the whole invocation.
#[derive(Debug, Clone, Default)]
pub struct RewriteSession {
    pub current: String,
    pub iteration: u32,
    pub last_good: Option<String>,
    pub transcript: Vec<Message>,
    pub usage: TokenUsage,
    pub warnings: Vec<String>,
}

impl RewriteSession {
    pub fn begin_unit(&mut self, text: String) {
        self.current = text;
        self.iteration = 0;
        self.last_good = None;
    }

    pub fn note(&mut self, message: Message) {
        self.transcript.push(message);
    }

    pub fn warn(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Text to keep when a round cannot produce a candidate.
    pub fn fallback(&self) -> &str {
        self.last_good.as_deref().unwrap_or(&self.current)
    }
}

/// Result of rewriting one sentence in sentence granularity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentenceOutcome {
    pub input: String,
    pub output: String,
    pub iterations: u32,
    pub status: RewriteStatus,
    pub report: Option<ConformanceReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RewriteOutcome {
    pub text: String,
    /// Rounds run, summed over sentences in sentence granularity.
    pub iterations: u32,
    pub status: RewriteStatus,
    pub warnings: Vec<String>,
    pub transcript: Vec<Message>,
    pub usage: TokenUsage,
    /// Empty in document granularity.
    pub sentences: Vec<SentenceOutcome>,
    /// Evaluation of the final text, present for gated rewrites.
    pub report: Option<ConformanceReport>,
}

impl RewriteOutcome {
    pub(crate) fn from_session(session: RewriteSession, text: String, iterations: u32, status: RewriteStatus) -> Self {
        Self {
            text,
            iterations,
            status,
            warnings: session.warnings,
            transcript: session.transcript,
            usage: session.usage,
            sentences: Vec::new(),
            report: None,
        }
    }
}
