use std::borrow::Cow;
use std::convert::Infallible;

use gradus_evaluator::{Analyzer, Evaluator};
use gradus_protocol::ConformanceReport;
use gradus_tagger::{Segmenter, SentenceSplitter};
use tracing::{debug, warn};

use crate::config::{Granularity, RewriteConfig};
use crate::error::{GateError, RewriteError};
use crate::extract::normalize_whitespace;
use crate::message::Message;
use crate::rewriter::Rewriter;
use crate::session::{RewriteOutcome, RewriteSession, RewriteStatus, SentenceOutcome};

enum Inspection {
    Accept,
    /// Rewrite, optionally with feedback appended to the constraints.
    Rewrite(Option<String>),
}

/// Decides, before each round, whether the current text still needs work.
trait Gate {
    type Error;

    fn inspect(&mut self, text: &str) -> Result<Inspection, Self::Error>;

    fn report(&mut self, text: &str) -> Result<Option<ConformanceReport>, Self::Error>;
}

struct Ungated;

impl Gate for Ungated {
    type Error = Infallible;

    fn inspect(&mut self, _text: &str) -> Result<Inspection, Infallible> {
        Ok(Inspection::Rewrite(None))
    }

    fn report(&mut self, _text: &str) -> Result<Option<ConformanceReport>, Infallible> {
        Ok(None)
    }
}

struct EvaluatorGate<'a, A: ?Sized> {
    analyzer: &'a A,
    evaluator: &'a Evaluator,
    check_syntax: bool,
    last: Option<(String, ConformanceReport)>,
}

impl<A: Analyzer + ?Sized> EvaluatorGate<'_, A> {
    fn evaluate(&mut self, text: &str) -> Result<ConformanceReport, GateError> {
        if let Some((seen, report)) = &self.last {
            if seen == text {
                return Ok(report.clone());
            }
        }
        let analysis = self.analyzer.analyze(text)?;
        let report = self.evaluator.evaluate(&analysis, self.check_syntax);
        self.last = Some((text.to_owned(), report.clone()));
        Ok(report)
    }
}

impl<A: Analyzer + ?Sized> Gate for EvaluatorGate<'_, A> {
    type Error = GateError;

    fn inspect(&mut self, text: &str) -> Result<Inspection, GateError> {
        let report = self.evaluate(text)?;
        if report.conform() {
            return Ok(Inspection::Accept);
        }
        let mut feedback = String::from("The current text violates these constraints:");
        for message in report.error_messages() {
            feedback.push_str("\n- ");
            feedback.push_str(message);
        }
        Ok(Inspection::Rewrite(Some(feedback)))
    }

    fn report(&mut self, text: &str) -> Result<Option<ConformanceReport>, GateError> {
        self.evaluate(text).map(Some)
    }
}

struct UnitResult {
    text: String,
    iterations: u32,
    status: RewriteStatus,
}

/// Drives a [`Rewriter`] until its output stops changing.
///
/// Each round sends the current text, extracts the delimited answer and
/// compares it with the input after whitespace normalization. Malformed
/// answers and capability errors are retried up to `max_retries` times,
/// after which the unit keeps its last good text. Sentence granularity cuts
/// the text with `S`.
#[derive(Debug, Clone)]
pub struct Controller<S = SentenceSplitter> {
    config: RewriteConfig,
    splitter: S,
}

impl Controller {
    pub fn new(config: RewriteConfig) -> Result<Self, RewriteError> {
        Self::with_splitter(config, SentenceSplitter::new())
    }
}

impl<S: Segmenter> Controller<S> {
    pub fn with_splitter(config: RewriteConfig, splitter: S) -> Result<Self, RewriteError> {
        config.validate()?;
        Ok(Self { config, splitter })
    }

    pub fn config(&self) -> &RewriteConfig {
        &self.config
    }

    pub fn rewrite<R>(&self, text: &str, constraints: &str, rewriter: &mut R) -> RewriteOutcome
    where
        R: Rewriter + ?Sized,
    {
        match self.drive(text, constraints, rewriter, &mut Ungated) {
            Ok(outcome) => outcome,
            Err(never) => match never {},
        }
    }

    /// Analyze, evaluate and only then rewrite, feeding the diagnostics back
    /// as extra constraints. Stops as soon as the text is conformant.
    pub fn rewrite_gated<R, A>(
        &self,
        text: &str,
        constraints: &str,
        rewriter: &mut R,
        analyzer: &A,
        evaluator: &Evaluator,
        check_syntax: bool,
    ) -> Result<RewriteOutcome, GateError>
    where
        R: Rewriter + ?Sized,
        A: Analyzer + ?Sized,
    {
        let mut gate = EvaluatorGate {
            analyzer,
            evaluator,
            check_syntax,
            last: None,
        };
        let mut outcome = self.drive(text, constraints, rewriter, &mut gate)?;
        outcome.report = gate.report(&outcome.text)?;
        Ok(outcome)
    }

    fn drive<R, G>(
        &self,
        text: &str,
        constraints: &str,
        rewriter: &mut R,
        gate: &mut G,
    ) -> Result<RewriteOutcome, G::Error>
    where
        R: Rewriter + ?Sized,
        G: Gate,
    {
        let mut session = RewriteSession::default();

        match self.config.granularity {
            Granularity::Document => {
                let unit = self.run_unit(text, constraints, rewriter, gate, &mut session)?;
                Ok(RewriteOutcome::from_session(session, unit.text, unit.iterations, unit.status))
            }
            Granularity::Sentence => {
                let mut sentences = Vec::new();
                for sentence in self.splitter.sentences(text) {
                    let unit = self.run_unit(sentence, constraints, rewriter, gate, &mut session)?;
                    let report = gate.report(&unit.text)?;
                    sentences.push(SentenceOutcome {
                        input: sentence.to_owned(),
                        output: unit.text,
                        iterations: unit.iterations,
                        status: unit.status,
                        report,
                    });
                }

                let joined = sentences
                    .iter()
                    .map(|s| s.output.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                let iterations = sentences.iter().map(|s| s.iterations).sum();
                let status = sentences
                    .iter()
                    .map(|s| s.status)
                    .reduce(RewriteStatus::combine)
                    .unwrap_or(RewriteStatus::Converged);

                let mut outcome = RewriteOutcome::from_session(session, joined, iterations, status);
                outcome.sentences = sentences;
                Ok(outcome)
            }
        }
    }

    fn run_unit<R, G>(
        &self,
        text: &str,
        constraints: &str,
        rewriter: &mut R,
        gate: &mut G,
        session: &mut RewriteSession,
    ) -> Result<UnitResult, G::Error>
    where
        R: Rewriter + ?Sized,
        G: Gate,
    {
        session.begin_unit(normalize_whitespace(text));

        for iteration in 1..=self.config.max_iterations {
            session.iteration = iteration;

            let feedback = match gate.inspect(&session.current)? {
                Inspection::Accept => {
                    debug!(iteration, "text accepted by evaluator");
                    return Ok(UnitResult {
                        text: session.current.clone(),
                        iterations: iteration,
                        status: RewriteStatus::Conformant,
                    });
                }
                Inspection::Rewrite(feedback) => feedback,
            };
            let constraints = match feedback {
                Some(feedback) => Cow::Owned(format!("{constraints}\n\n{feedback}")),
                None => Cow::Borrowed(constraints),
            };

            match self.attempt(rewriter, &constraints, session) {
                Some(candidate) if candidate == session.current => {
                    debug!(iteration, "rewrite reached a fixpoint");
                    return Ok(UnitResult {
                        text: candidate,
                        iterations: iteration,
                        status: RewriteStatus::Converged,
                    });
                }
                Some(candidate) => {
                    debug!(iteration, chars = candidate.len(), "rewrite changed the text");
                    session.last_good = Some(candidate.clone());
                    session.current = candidate;
                }
                None => {
                    let text = match &self.config.error_marker {
                        Some(marker) => marker.clone(),
                        None => session.fallback().to_owned(),
                    };
                    return Ok(UnitResult {
                        text,
                        iterations: iteration,
                        status: RewriteStatus::Degraded,
                    });
                }
            }
        }

        let max = self.config.max_iterations;
        if let Inspection::Accept = gate.inspect(&session.current)? {
            debug!(iteration = max, "last rewrite accepted by evaluator");
            return Ok(UnitResult {
                text: session.current.clone(),
                iterations: max,
                status: RewriteStatus::Conformant,
            });
        }
        warn!(max_iterations = max, "rewrite did not converge");
        session.warn(format!(
            "WARNING: no fixpoint after {max} iterations, keeping the last rewrite."
        ));
        Ok(UnitResult {
            text: session.current.clone(),
            iterations: max,
            status: RewriteStatus::BudgetExhausted,
        })
    }

    /// One round: up to `max_retries + 1` calls until a delimited answer arrives.
    fn attempt<R>(&self, rewriter: &mut R, constraints: &str, session: &mut RewriteSession) -> Option<String>
    where
        R: Rewriter + ?Sized,
    {
        let attempts = self.config.attempts();
        let max_retries = self.config.max_retries;
        session.note(Message::user(session.current.clone()));

        for attempt in 1..=attempts {
            let failure = match rewriter.rewrite(&session.current, constraints) {
                Ok(response) => {
                    if let Some(usage) = response.usage {
                        session.usage.add(usage);
                    }
                    let extracted = self
                        .config
                        .delimiter
                        .extract(&response.content)
                        .map(normalize_whitespace)
                        .filter(|text| !text.is_empty());
                    session.note(Message::assistant(response.content));
                    match extracted {
                        Some(text) => return Some(text),
                        None => "no delimited text found in the response".to_owned(),
                    }
                }
                Err(err) => err.to_string(),
            };

            let iteration = session.iteration;
            if attempt < attempts {
                let retry = attempt;
                warn!(iteration, retry, max_retries, reason = %failure, "retrying rewrite");
                session.note(Message::system(format!(
                    "Retry {retry}/{max_retries}: {failure}, retrying..."
                )));
                session.warn(format!(
                    "WARNING: Retry {retry}/{max_retries} at iteration {iteration} - {failure}."
                ));
            } else {
                warn!(iteration, attempts, reason = %failure, "rewrite failed, falling back");
                session.warn(format!(
                    "ERROR: no valid rewrite after {attempts} attempts at iteration {iteration} - {failure}. Keeping the previous text."
                ));
            }
        }

        None
    }
}
