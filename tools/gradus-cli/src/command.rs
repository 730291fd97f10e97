//! A [`Rewriter`] backed by an external program.
//!
//! The program receives `{"text": ..., "constraints": ...}` as JSON on stdin
//! and answers on stdout with a delimited rewrite, the same contract an LLM
//! wrapper script would follow.

use std::io::{Read, Write};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use gradus_rewrite::{RawResponse, RewriteError, Rewriter};
use serde::Serialize;
use tracing::debug;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Serialize)]
struct RewriteRequest<'a> {
    text: &'a str,
    constraints: &'a str,
}

#[derive(Debug, Clone)]
pub struct CommandRewriter {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

fn capability(context: &str, err: impl std::fmt::Display) -> RewriteError {
    RewriteError::Capability(format!("{context}: {err}"))
}

impl CommandRewriter {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn spawn(&self, request: &[u8]) -> Result<Child, RewriteError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| capability(&format!("failed to start '{}'", self.program), e))?;

        // Dropping stdin closes the pipe so the program sees end of input.
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(request)
                .map_err(|e| capability("failed to send the rewrite request", e))?;
        }
        Ok(child)
    }
}

impl Rewriter for CommandRewriter {
    fn rewrite(&mut self, text: &str, constraints: &str) -> Result<RawResponse, RewriteError> {
        let request = serde_json::to_vec(&RewriteRequest { text, constraints })
            .map_err(|e| capability("failed to encode the rewrite request", e))?;
        let mut child = self.spawn(&request)?;

        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| RewriteError::Capability("rewrite program has no stdout".to_owned()))?;
        let reader = thread::spawn(move || {
            let mut content = String::new();
            stdout.read_to_string(&mut content).map(|_| content)
        });

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    // Already exited or unkillable; either way the call is over.
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(RewriteError::Timeout(self.timeout));
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => return Err(capability("failed to wait for the rewrite program", e)),
            }
        };

        let content = reader
            .join()
            .map_err(|_| RewriteError::Capability("stdout reader panicked".to_owned()))?
            .map_err(|e| capability("failed to read the rewrite program output", e))?;

        if !status.success() {
            return Err(RewriteError::Capability(format!(
                "'{}' exited with {status}",
                self.program
            )));
        }

        debug!(program = %self.program, bytes = content.len(), "rewrite program answered");
        Ok(RawResponse::new(content))
    }
}
