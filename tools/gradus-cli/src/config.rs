//! Layered configuration for the `gradus` binary.
//!
//! Sources, highest priority last:
//! 1. built-in defaults
//! 2. `gradus.toml` in the working directory
//! 3. `GRADUS_*` environment variables, `__` separating sections
//!    (`GRADUS_REWRITE__MAX_ITERATIONS=4` sets `rewrite.max_iterations`)

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use gradus_protocol::Language;
use gradus_rewrite::RewriteConfig;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const CONFIG_FILE: &str = "gradus.toml";

/// External program the `rewrite` command calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandConfig {
    pub program: Option<String>,
    pub args: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            program: None,
            args: Vec::new(),
            timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradusConfig {
    pub language: Language,
    /// Inventory file; the built-in A1 inventory of `language` when absent.
    pub inventory: Option<PathBuf>,
    pub tiers: Option<PathBuf>,
    pub stopwords: Option<PathBuf>,
    /// Tagger lexicon used by the coverage check and gated rewrites.
    pub lexicon: Option<PathBuf>,
    pub check_syntax: bool,
    pub rewrite: RewriteConfig,
    pub rewriter: CommandConfig,
}

impl Default for GradusConfig {
    fn default() -> Self {
        Self {
            language: Language::Italian,
            inventory: None,
            tiers: None,
            stopwords: None,
            lexicon: None,
            check_syntax: true,
            rewrite: RewriteConfig::default(),
            rewriter: CommandConfig::default(),
        }
    }
}

impl GradusConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Same layering as [`GradusConfig::load`] with an explicit TOML file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(path).extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("GRADUS_").split("__"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rewrite.validate().map_err(|err| ConfigError::InvalidValue {
            field: "rewrite".to_owned(),
            reason: err.to_string(),
        })?;
        if self.rewriter.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "rewriter.timeout_secs".to_owned(),
                reason: "must be at least 1".to_owned(),
            });
        }
        Ok(())
    }
}
