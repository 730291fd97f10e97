//! Layered configuration tests, sandboxed with `figment::Jail`.

use std::path::{Path, PathBuf};

use figment::Jail;
use gradus_cli::{CommandConfig, ConfigError, GradusConfig, CONFIG_FILE};
use gradus_protocol::Language;
use gradus_rewrite::{Delimiter, Granularity};
use pretty_assertions::assert_eq;

#[test]
fn defaults_without_file_or_env() {
    Jail::expect_with(|_jail| {
        let config = GradusConfig::load().expect("defaults load");
        assert_eq!(config, GradusConfig::default());
        Ok(())
    });
}

#[test]
fn toml_file_overrides_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            CONFIG_FILE,
            r#"
language = "english"
tiers = "data/tiers.json"
check_syntax = false

[rewrite]
max_iterations = 4
delimiter = "square"
granularity = "sentence"
"#,
        )?;

        let config = GradusConfig::load().expect("config loads");
        assert_eq!(config.language, Language::English);
        assert_eq!(config.tiers, Some(PathBuf::from("data/tiers.json")));
        assert!(!config.check_syntax);
        assert_eq!(config.rewrite.max_iterations, 4);
        assert_eq!(config.rewrite.max_retries, 2);
        assert_eq!(config.rewrite.delimiter, Delimiter::Square);
        assert_eq!(config.rewrite.granularity, Granularity::Sentence);
        Ok(())
    });
}

#[test]
fn custom_tag_delimiter_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "custom.toml",
            r#"
[rewrite.delimiter]
tag = "answer"
"#,
        )?;

        let config = GradusConfig::load_from(Path::new("custom.toml")).expect("config loads");
        assert_eq!(config.rewrite.delimiter, Delimiter::Tag("answer".to_owned()));
        Ok(())
    });
}

#[test]
fn env_beats_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(CONFIG_FILE, "language = \"english\"\n[rewrite]\nmax_retries = 5\n")?;
        jail.set_env("GRADUS_LANGUAGE", "italian");
        jail.set_env("GRADUS_REWRITE__MAX_RETRIES", "1");
        jail.set_env("GRADUS_LEXICON", "lexicon.json");

        let config = GradusConfig::load().expect("config loads");
        assert_eq!(config.language, Language::Italian);
        assert_eq!(config.rewrite.max_retries, 1);
        assert_eq!(config.lexicon, Some(PathBuf::from("lexicon.json")));
        Ok(())
    });
}

#[test]
fn zero_iterations_is_invalid() {
    Jail::expect_with(|jail| {
        jail.set_env("GRADUS_REWRITE__MAX_ITERATIONS", "0");

        let err = GradusConfig::load().expect_err("must be rejected");
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "rewrite"));
        Ok(())
    });
}

#[test]
fn rewriter_program_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            CONFIG_FILE,
            r#"
[rewriter]
program = "./llm-rewrite.sh"
args = ["--model", "small"]
timeout_secs = 30
"#,
        )?;

        let config = GradusConfig::load().expect("config loads");
        assert_eq!(
            config.rewriter,
            CommandConfig {
                program: Some("./llm-rewrite.sh".to_owned()),
                args: vec!["--model".to_owned(), "small".to_owned()],
                timeout_secs: 30,
            }
        );
        assert_eq!(config.rewrite, GradusConfig::default().rewrite);
        Ok(())
    });
}

#[test]
fn zero_rewriter_timeout_is_invalid() {
    Jail::expect_with(|jail| {
        jail.set_env("GRADUS_REWRITER__TIMEOUT_SECS", "0");

        let err = GradusConfig::load().expect_err("must be rejected");
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "rewriter.timeout_secs"));
        Ok(())
    });
}

#[test]
fn unknown_language_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.set_env("GRADUS_LANGUAGE", "klingon");

        let err = GradusConfig::load().expect_err("must be rejected");
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}
