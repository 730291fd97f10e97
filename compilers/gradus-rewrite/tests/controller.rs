use std::sync::Arc;

use gradus_evaluator::Evaluator;
use gradus_protocol::{Features, Language, PartOfSpeech};
use gradus_rewrite::{
    Controller, Delimiter, Granularity, RawResponse, RewriteConfig, RewriteError, RewriteStatus,
    Role, TokenUsage,
};
use gradus_tagger::{LexiconEntry, LexiconTagger, TagLexicon};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

type Reply = Result<RawResponse, RewriteError>;

fn controller(config: RewriteConfig) -> Controller {
    Controller::new(config).expect("valid config")
}

fn wrapped(text: &str) -> Reply {
    Ok(RawResponse::new(format!("Sure, here it is: <text>{text}</text>")))
}

#[test]
fn echo_converges_on_first_iteration() {
    let mut calls = 0;
    let mut echo = |text: &str, _: &str| {
        calls += 1;
        wrapped(text)
    };

    let outcome = controller(RewriteConfig::default()).rewrite("A  B C\n", "keep it simple", &mut echo);

    assert_eq!(outcome.text, "A B C");
    assert_eq!(outcome.iterations, 1);
    assert_eq!(outcome.status, RewriteStatus::Converged);
    assert!(outcome.warnings.is_empty());
    assert_eq!(calls, 1);
}

#[test]
fn whitespace_only_differences_count_as_fixpoint() {
    let mut reflow = |text: &str, _: &str| wrapped(&format!("\n  {}  \n", text.replace(' ', "\n")));

    let outcome = controller(RewriteConfig::default()).rewrite("uno due tre", "", &mut reflow);

    assert_eq!(outcome.status, RewriteStatus::Converged);
    assert_eq!(outcome.text, "uno due tre");
}

#[test]
fn always_malformed_keeps_original_text() {
    let mut calls = 0;
    let mut broken = |_: &str, _: &str| {
        calls += 1;
        Ok(RawResponse::new("I cannot help with that."))
    };

    let outcome = controller(RewriteConfig::default()).rewrite("Io vado al mare.", "", &mut broken);

    assert_eq!(outcome.text, "Io vado al mare.");
    assert_eq!(outcome.status, RewriteStatus::Degraded);
    assert_eq!(calls, 3);
    assert_eq!(outcome.warnings.len(), 3);
    assert!(outcome.warnings[0].starts_with("WARNING: Retry 1/2"));
    assert!(outcome.warnings[2].starts_with("ERROR"));

    let roles: Vec<Role> = outcome.transcript.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![
            Role::User,
            Role::Assistant,
            Role::System,
            Role::Assistant,
            Role::System,
            Role::Assistant,
        ]
    );
}

#[test]
fn empty_extraction_is_malformed() {
    let mut empty = |_: &str, _: &str| wrapped("   ");
    let config = RewriteConfig {
        max_retries: 0,
        ..RewriteConfig::default()
    };

    let outcome = controller(config).rewrite("ciao", "", &mut empty);

    assert_eq!(outcome.text, "ciao");
    assert_eq!(outcome.status, RewriteStatus::Degraded);
    assert_eq!(outcome.warnings.len(), 1);
}

#[test]
fn degraded_round_keeps_last_good_rewrite() {
    let mut calls = 0;
    let mut flaky = |text: &str, _: &str| {
        calls += 1;
        if calls == 1 {
            wrapped(&format!("{text} bis"))
        } else {
            Err(RewriteError::Capability("quota exceeded".into()))
        }
    };
    let config = RewriteConfig {
        max_retries: 1,
        ..RewriteConfig::default()
    };

    let outcome = controller(config).rewrite("canto", "", &mut flaky);

    assert_eq!(outcome.text, "canto bis");
    assert_eq!(outcome.iterations, 2);
    assert_eq!(outcome.status, RewriteStatus::Degraded);
    assert!(outcome.warnings.iter().any(|w| w.contains("quota exceeded")));
}

#[test]
fn retry_recovers_and_leaves_a_note() {
    let mut calls = 0;
    let mut flaky = |text: &str, _: &str| {
        calls += 1;
        if calls == 1 {
            Err(RewriteError::Timeout(std::time::Duration::from_secs(30)))
        } else {
            wrapped(text)
        }
    };

    let outcome = controller(RewriteConfig::default()).rewrite("Ciao.", "", &mut flaky);

    assert_eq!(outcome.status, RewriteStatus::Converged);
    assert_eq!(outcome.iterations, 1);
    assert_eq!(outcome.warnings.len(), 1);
    assert!(outcome
        .transcript
        .iter()
        .any(|m| m.role == Role::System && m.content.starts_with("Retry 1/2")));
}

#[test]
fn budget_exhaustion_returns_last_rewrite() {
    let mut calls = 0;
    let mut grow = |text: &str, _: &str| {
        calls += 1;
        wrapped(&format!("{text} x"))
    };
    let config = RewriteConfig {
        max_iterations: 3,
        ..RewriteConfig::default()
    };

    let outcome = controller(config).rewrite("seed", "", &mut grow);

    assert_eq!(outcome.text, "seed x x x");
    assert_eq!(outcome.iterations, 3);
    assert_eq!(outcome.status, RewriteStatus::BudgetExhausted);
    assert_eq!(calls, 3);
    assert_eq!(outcome.warnings.len(), 1);
}

#[test]
fn usage_accumulates_over_calls() {
    let mut upper = |text: &str, _: &str| {
        Ok(RawResponse::new(format!("<text>{}</text>", text.to_uppercase()))
            .with_usage(TokenUsage::new(10, 5)))
    };

    let outcome = controller(RewriteConfig::default()).rewrite("abc", "", &mut upper);

    assert_eq!(outcome.text, "ABC");
    assert_eq!(outcome.iterations, 2);
    assert_eq!(outcome.usage, TokenUsage { prompt: 20, completion: 10, total: 30 });
}

#[test]
fn constraints_reach_the_rewriter() {
    let mut seen = Vec::new();
    let mut record = |text: &str, constraints: &str| {
        seen.push(constraints.to_owned());
        wrapped(text)
    };

    controller(RewriteConfig::default()).rewrite("Hi.", "A1 only", &mut record);

    assert_eq!(seen, vec!["A1 only".to_owned()]);
}

#[test]
fn other_delimiters() {
    let config = RewriteConfig {
        delimiter: Delimiter::Square,
        ..RewriteConfig::default()
    };
    let mut square = |text: &str, _: &str| Ok(RawResponse::new(format!("Result: [{text}]")));

    let outcome = controller(config).rewrite("semplice", "", &mut square);

    assert_eq!(outcome.status, RewriteStatus::Converged);
    assert_eq!(outcome.text, "semplice");
}

#[test]
fn sentence_granularity_rewrites_each_sentence() {
    let config = RewriteConfig {
        granularity: Granularity::Sentence,
        ..RewriteConfig::default()
    };
    let mut echo = |text: &str, _: &str| wrapped(text);

    let outcome = controller(config).rewrite("Uno due. Tre!\n\nQuattro?", "", &mut echo);

    assert_eq!(outcome.text, "Uno due. Tre! Quattro?");
    assert_eq!(outcome.sentences.len(), 3);
    assert_eq!(outcome.iterations, 3);
    assert_eq!(outcome.status, RewriteStatus::Converged);
    assert_eq!(outcome.sentences[1].input, "Tre!");
    assert!(outcome.sentences.iter().all(|s| s.report.is_none()));
}

#[test]
fn sentence_failures_are_isolated() {
    let config = RewriteConfig {
        granularity: Granularity::Sentence,
        max_retries: 0,
        error_marker: Some("[ERR]".to_owned()),
        ..RewriteConfig::default()
    };
    let mut picky = |text: &str, _: &str| {
        if text.contains("Due") {
            Err(RewriteError::Capability("refused".into()))
        } else {
            wrapped(text)
        }
    };

    let outcome = controller(config).rewrite("Uno. Due. Tre.", "", &mut picky);

    assert_eq!(outcome.text, "Uno. [ERR] Tre.");
    assert_eq!(outcome.status, RewriteStatus::Degraded);
    assert_eq!(outcome.sentences[0].status, RewriteStatus::Converged);
    assert_eq!(outcome.sentences[1].status, RewriteStatus::Degraded);
    assert_eq!(outcome.sentences[2].status, RewriteStatus::Converged);
}

#[test]
fn huge_retry_budget_does_not_overflow() {
    let mut calls = 0;
    let mut flaky = |text: &str, _: &str| {
        calls += 1;
        if calls < 3 {
            Ok(RawResponse::new("still thinking"))
        } else {
            wrapped(text)
        }
    };
    let config = RewriteConfig {
        max_retries: u32::MAX,
        ..RewriteConfig::default()
    };

    let outcome = controller(config).rewrite("ciao", "", &mut flaky);

    assert_eq!(outcome.status, RewriteStatus::Converged);
    assert_eq!(outcome.text, "ciao");
    assert_eq!(outcome.warnings.len(), 2);
    assert!(outcome.warnings[0].starts_with(&format!("WARNING: Retry 1/{}", u32::MAX)));
}

fn by_semicolon(text: &str) -> Vec<&str> {
    text.split(';').map(str::trim).filter(|s| !s.is_empty()).collect()
}

#[test]
fn caller_supplied_sentence_splitter() {
    let config = RewriteConfig {
        granularity: Granularity::Sentence,
        ..RewriteConfig::default()
    };
    let mut seen = Vec::new();
    let mut echo = |text: &str, _: &str| {
        seen.push(text.to_owned());
        wrapped(text)
    };

    let controller = Controller::with_splitter(config, by_semicolon).expect("valid config");
    let outcome = controller.rewrite("uno. due; tre", "", &mut echo);

    assert_eq!(seen, vec!["uno. due".to_owned(), "tre".to_owned()]);
    assert_eq!(outcome.sentences.len(), 2);
    assert_eq!(outcome.text, "uno. due tre");
}

#[test]
fn invalid_config_is_rejected() {
    let config = RewriteConfig {
        max_iterations: 0,
        ..RewriteConfig::default()
    };
    assert!(matches!(
        Controller::new(config),
        Err(RewriteError::InvalidConfig { field: "max_iterations", .. })
    ));
}

fn english_tagger() -> LexiconTagger {
    let lexicon = TagLexicon::from_entries([
        LexiconEntry::new("mice", PartOfSpeech::Noun, "mouse")
            .with_features(Features::new().with_number("plural")),
        LexiconEntry::new("mouse", PartOfSpeech::Noun, "mouse")
            .with_features(Features::new().with_number("singular")),
    ]);
    LexiconTagger::new(Arc::new(lexicon), Language::English)
}

#[test]
fn gated_rewrite_stops_when_conformant() {
    let mut calls = 0;
    let mut never = |text: &str, _: &str| {
        calls += 1;
        wrapped(text)
    };
    let evaluator = Evaluator::for_language(Language::English);

    let outcome = controller(RewriteConfig::default())
        .rewrite_gated("One mouse ran.", "", &mut never, &english_tagger(), &evaluator, false)
        .expect("lexicon tagger never fails");

    assert_eq!(calls, 0);
    assert_eq!(outcome.status, RewriteStatus::Conformant);
    assert_eq!(outcome.iterations, 1);
    assert!(outcome.report.as_ref().is_some_and(|r| r.conform()));
}

#[test]
fn gated_rewrite_feeds_diagnostics_back() {
    let mut seen = Vec::new();
    let mut fix = |text: &str, constraints: &str| {
        seen.push(constraints.to_owned());
        wrapped(&text.replace("Three mice", "One mouse"))
    };
    let evaluator = Evaluator::for_language(Language::English);

    let outcome = controller(RewriteConfig::default())
        .rewrite_gated("Three mice ran.", "Use A1 English.", &mut fix, &english_tagger(), &evaluator, false)
        .expect("lexicon tagger never fails");

    assert_eq!(outcome.text, "One mouse ran.");
    assert_eq!(outcome.status, RewriteStatus::Conformant);
    assert_eq!(outcome.iterations, 2);
    assert_eq!(seen.len(), 1);
    assert!(seen[0].starts_with("Use A1 English."));
    assert!(seen[0].contains("mice"));
    assert!(outcome.report.is_some_and(|r| r.conform()));
}

#[test]
fn gated_last_rewrite_is_checked() {
    let mut fix = |text: &str, _: &str| wrapped(&text.replace("Three mice", "One mouse"));
    let evaluator = Evaluator::for_language(Language::English);
    let config = RewriteConfig {
        max_iterations: 1,
        ..RewriteConfig::default()
    };

    let outcome = controller(config)
        .rewrite_gated("Three mice ran.", "", &mut fix, &english_tagger(), &evaluator, false)
        .expect("lexicon tagger never fails");

    assert_eq!(outcome.text, "One mouse ran.");
    assert_eq!(outcome.iterations, 1);
    assert_eq!(outcome.status, RewriteStatus::Conformant);
    assert!(outcome.warnings.is_empty());
}

#[test]
fn gated_budget_exhaustion_when_still_failing() {
    let mut stubborn = |text: &str, _: &str| wrapped(&format!("{text} Two mice sat."));
    let evaluator = Evaluator::for_language(Language::English);
    let config = RewriteConfig {
        max_iterations: 2,
        ..RewriteConfig::default()
    };

    let outcome = controller(config)
        .rewrite_gated("Three mice ran.", "", &mut stubborn, &english_tagger(), &evaluator, false)
        .expect("lexicon tagger never fails");

    assert_eq!(outcome.status, RewriteStatus::BudgetExhausted);
    assert!(outcome.report.is_some_and(|r| !r.conform()));
}

proptest! {
    #[test]
    fn calls_are_bounded(
        script in proptest::collection::vec(0u8..3, 1..16),
        max_iterations in 1u32..5,
        max_retries in 0u32..3,
    ) {
        let config = RewriteConfig { max_iterations, max_retries, ..RewriteConfig::default() };
        let mut calls = 0usize;
        let mut scripted = |text: &str, _: &str| {
            let step = script[calls % script.len()];
            calls += 1;
            match step {
                0 => Ok(RawResponse::new("no tags here")),
                1 => wrapped(&format!("{text} y")),
                _ => wrapped(text),
            }
        };

        let outcome = controller(config).rewrite("start", "", &mut scripted);

        prop_assert!(calls <= (max_iterations * (max_retries + 1)) as usize);
        prop_assert!(outcome.iterations <= max_iterations);
        prop_assert!(outcome.text.starts_with("start"));
    }
}
