//! The external-program rewriter, exercised through `sh`.
#![cfg(unix)]

use std::time::Duration;

use gradus_cli::CommandRewriter;
use gradus_rewrite::{Controller, RewriteConfig, RewriteError, RewriteStatus, Rewriter};
use pretty_assertions::assert_eq;

fn shell(script: &str) -> CommandRewriter {
    CommandRewriter::new("sh", vec!["-c".to_owned(), script.to_owned()])
}

#[test]
fn request_is_sent_as_json_on_stdin() {
    let mut rewriter = shell("cat");
    let response = rewriter.rewrite("Ciao a tutti.", "Usa solo il presente.").expect("cat answers");

    let request: serde_json::Value = serde_json::from_str(&response.content).expect("stdin was JSON");
    assert_eq!(request["text"], "Ciao a tutti.");
    assert_eq!(request["constraints"], "Usa solo il presente.");
    assert_eq!(response.usage, None);
}

#[test]
fn stdout_becomes_the_raw_response() {
    let mut rewriter = shell("cat > /dev/null; printf '<text>Hello there.</text>'");
    let response = rewriter.rewrite("Hi.", "").expect("program answers");
    assert_eq!(response.content, "<text>Hello there.</text>");
}

#[test]
fn failing_program_is_a_capability_error() {
    let mut rewriter = shell("cat > /dev/null; exit 3");
    let err = rewriter.rewrite("Hi.", "").unwrap_err();
    assert!(matches!(err, RewriteError::Capability(ref msg) if msg.contains("exited")), "{err}");
}

#[test]
fn missing_program_is_a_capability_error() {
    let mut rewriter = CommandRewriter::new("gradus-no-such-rewriter", Vec::new());
    let err = rewriter.rewrite("Hi.", "").unwrap_err();
    assert!(matches!(err, RewriteError::Capability(ref msg) if msg.contains("failed to start")), "{err}");
}

#[test]
fn slow_program_times_out() {
    let mut rewriter = shell("exec sleep 5").with_timeout(Duration::from_millis(100));
    let err = rewriter.rewrite("Hi.", "").unwrap_err();
    assert!(matches!(err, RewriteError::Timeout(timeout) if timeout == Duration::from_millis(100)));
}

#[test]
fn controller_drives_the_program_to_a_fixpoint() {
    let mut rewriter = shell("cat > /dev/null; printf '<text>Hello there.</text>'");
    let controller = Controller::new(RewriteConfig::default()).expect("default config is valid");

    let outcome = controller.rewrite("Hi there.", "", &mut rewriter);

    assert_eq!(outcome.text, "Hello there.");
    assert_eq!(outcome.status, RewriteStatus::Converged);
    assert_eq!(outcome.iterations, 2);
    assert!(outcome.warnings.is_empty());
}
