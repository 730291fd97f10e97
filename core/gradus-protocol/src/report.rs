use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use bitflags::bitflags;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use crate::ids::TokenId;

bitflags! {
    /// Grammatical categories a report can pass or fail on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct Category: u8 {
        const PRONOUNS = 1;
        const NUMBERS = 2;
        const VERBS = 4;
        const NOUNS = 8;
        const ADJECTIVES = 16;
        const SYNTAX = 32;
    }
}

impl Category {
    /// Lower-case name of a single category flag.
    pub fn name(self) -> &'static str {
        match self {
            Self::PRONOUNS => "pronouns",
            Self::NUMBERS => "numbers",
            Self::VERBS => "verbs",
            Self::NOUNS => "nouns",
            Self::ADJECTIVES => "adjectives",
            Self::SYNTAX => "syntax",
            _ => "mixed",
        }
    }
}

/// One human-readable rule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Diagnostic {
    pub category: Category,
    pub token: Option<TokenId>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(category: Category, token: Option<TokenId>, message: impl Into<String>) -> Self {
        Self {
            category,
            token,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Verdict of one evaluation.
///
/// Only constructible from a diagnostics list, so `conform`, the failed
/// categories and the diagnostics can never disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeSerialize))]
pub struct ConformanceReport {
    conform: bool,
    checked: Category,
    failed: Category,
    diagnostics: Vec<Diagnostic>,
}

impl ConformanceReport {
    pub fn from_diagnostics(checked: Category, diagnostics: Vec<Diagnostic>) -> Self {
        let failed = diagnostics
            .iter()
            .fold(Category::empty(), |acc, d| acc | d.category);

        Self {
            conform: diagnostics.is_empty(),
            checked: checked | failed,
            failed,
            diagnostics,
        }
    }

    pub fn conform(&self) -> bool {
        self.conform
    }

    pub fn checked(&self) -> Category {
        self.checked
    }

    pub fn failed(&self) -> Category {
        self.failed
    }

    /// Per-category flag; `None` when the category was not evaluated.
    pub fn category_conform(&self, category: Category) -> Option<bool> {
        self.checked
            .contains(category)
            .then(|| !self.failed.intersects(category))
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn error_messages(&self) -> impl Iterator<Item = &str> {
        self.diagnostics.iter().map(|d| d.message.as_str())
    }
}
