//! Constraint-driven rewriting: a controller that calls a rewrite capability
//! until its output reaches a fixpoint, with bounded retries on malformed
//! responses and an optional evaluator gate.

pub mod config;
pub mod controller;
pub mod error;
pub mod extract;
pub mod message;
pub mod rewriter;
pub mod session;

pub use config::{Granularity, RewriteConfig};
pub use controller::Controller;
pub use error::{GateError, RewriteError};
pub use extract::{normalize_whitespace, Delimiter};
pub use message::{Message, Role, TokenUsage};
pub use rewriter::{RawResponse, Rewriter};
pub use session::{RewriteOutcome, RewriteSession, RewriteStatus, SentenceOutcome};
