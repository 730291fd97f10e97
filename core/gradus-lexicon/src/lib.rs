//! Vocabulary tiers and lexical coverage.
//!
//! Tiers are cumulative: coverage at tier `i` is measured against the union
//! of tiers `0..=i`.

pub mod coverage;
pub mod error;
pub mod lemma_set;
pub mod loader;
pub mod tiers;

pub use coverage::{
    check_coverage, percent, CoverageOptions, CoverageReport, PosCoverage, PosTotal,
    TierCoverage, UniqueCoverage, WordSplit,
};
pub use error::LexiconError;
pub use lemma_set::LemmaSet;
pub use loader::{
    load_stopwords, load_tiers, parse_stopwords, parse_tiers_archive, parse_tiers_json, TierMap,
};
pub use tiers::{cumulative, merge_tiers, CumulativeTier, Vocabulary};
