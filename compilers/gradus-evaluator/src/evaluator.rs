use std::sync::Arc;

use gradus_ecs::rules::RuleTables;
use gradus_ecs::GradusWorld;
use gradus_protocol::{ConformanceReport, ConstraintInventory, Language, TextAnalysis};
use tracing::debug;

use crate::builtin::builtin;

/// Applies one inventory to text analyses.
///
/// Holds no per-call state, so one evaluator can be shared across threads.
#[derive(Debug, Clone)]
pub struct Evaluator {
    inventory: Arc<ConstraintInventory>,
    rules: Arc<RuleTables>,
}

impl Evaluator {
    pub fn new(inventory: Arc<ConstraintInventory>) -> Self {
        let rules = Arc::new(RuleTables::compile(&inventory));
        Self { inventory, rules }
    }

    /// Evaluator over the built-in A1 inventory of `language`.
    pub fn for_language(language: Language) -> Self {
        Self::new(Arc::new(builtin(language)))
    }

    pub fn inventory(&self) -> &ConstraintInventory {
        &self.inventory
    }

    pub fn language(&self) -> Language {
        self.inventory.language
    }

    /// Checks `analysis` against every rule section the inventory defines.
    ///
    /// Syntax rules need a clause decomposition and only run when
    /// `check_syntax` is set.
    pub fn evaluate(&self, analysis: &TextAnalysis, check_syntax: bool) -> ConformanceReport {
        let world = GradusWorld::from_analysis(analysis);
        let diagnostics = world.validate(&self.rules, check_syntax);
        let report = ConformanceReport::from_diagnostics(self.rules.categories(check_syntax), diagnostics);

        debug!(
            language = %self.inventory.language,
            conform = report.conform(),
            diagnostics = report.diagnostics().len(),
            "evaluated analysis"
        );
        report
    }
}
