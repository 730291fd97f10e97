pub mod components;
pub mod rules;
pub mod systems;

use gradus_protocol::{ClauseAnalysis, Diagnostic, SentenceAnalysis, TaggedToken, TextAnalysis};
use hecs::{Entity, World};
use tracing::trace;

use components::{ClauseData, ClauseRole, Morphology, Pos, SentenceContext, TokenData};
use rules::RuleTables;
use systems::{
    adjectives::check_adjectives, nouns::check_nouns, numerals::check_numerals,
    pronouns::check_pronouns, syntax::check_syntax, verbs::check_verbs,
};

/// One analysed text as an entity world: a token entity per tagged token and
/// a clause entity per clause of the decomposition.
pub struct GradusWorld {
    world: World,
}

impl Default for GradusWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl GradusWorld {
    pub fn new() -> Self {
        Self { world: World::new() }
    }

    pub fn from_analysis(analysis: &TextAnalysis) -> Self {
        let mut world = Self::new();
        for token in &analysis.tokens {
            world.add_token(token);
        }
        for sentence in &analysis.sentences {
            world.add_sentence(sentence);
        }
        trace!(
            tokens = analysis.tokens.len(),
            sentences = analysis.sentences.len(),
            "populated evaluation world"
        );
        world
    }

    /// Expose the inner hecs World for external systems
    pub fn inner(&self) -> &World {
        &self.world
    }

    pub fn add_token(&mut self, token: &TaggedToken) -> Entity {
        self.world.spawn((
            TokenData {
                id: token.id,
                text: token.text.clone(),
                lemma: token.lemma.clone(),
            },
            Pos(token.pos),
            Morphology(token.features.clone()),
        ))
    }

    pub fn add_sentence(&mut self, sentence: &SentenceAnalysis) {
        let context = SentenceContext {
            content: sentence.content.clone(),
            kind: sentence.kind.clone(),
        };
        let mut spawn = |clause: &ClauseAnalysis, role: ClauseRole, order: usize| {
            self.world.spawn((
                ClauseData {
                    sentence: sentence.id,
                    role,
                    order,
                    content: clause.content.clone(),
                    label: clause.label.clone(),
                    span: clause.tokens,
                },
                context.clone(),
            ));
        };

        spawn(&sentence.main, ClauseRole::Main, 0);
        for (order, clause) in sentence.coordinate.iter().enumerate() {
            spawn(clause, ClauseRole::Coordinate, order);
        }
        for (order, clause) in sentence.subordinate.iter().enumerate() {
            spawn(clause, ClauseRole::Subordinate, order);
        }
    }

    /// Run all validation systems the rule tables enable.
    ///
    /// Diagnostics come grouped by category, then in text order.
    pub fn validate(&self, rules: &RuleTables, check_syntax_rules: bool) -> Vec<Diagnostic> {
        let level = rules.level.as_str();
        let mut diagnostics = Vec::new();

        if let Some(table) = &rules.pronouns {
            diagnostics.extend(check_pronouns(&self.world, table, level));
        }
        if let Some(table) = &rules.numerals {
            diagnostics.extend(check_numerals(&self.world, table, level));
        }
        if let Some(table) = &rules.verbs {
            diagnostics.extend(check_verbs(&self.world, table, level));
        }
        if let Some(table) = &rules.nouns {
            diagnostics.extend(check_nouns(&self.world, table, level));
        }
        if let Some(table) = &rules.adjectives {
            diagnostics.extend(check_adjectives(&self.world, table, level));
        }
        if check_syntax_rules {
            if let Some(table) = &rules.syntax {
                diagnostics.extend(check_syntax(&self.world, table, level));
            }
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradus_protocol::{
        ConstraintInventory, Features, Language, NounRules, PartOfSpeech, SentenceAnalysis,
        SyntaxRules, TokenSpan,
    };
    use pretty_assertions::assert_eq;

    fn inventory() -> ConstraintInventory {
        ConstraintInventory {
            version: 1,
            language: Language::Italian,
            level: "A1".into(),
            pronouns: None,
            numerals: None,
            verbs: None,
            nouns: Some(NounRules {
                plural_number: "plur".into(),
            }),
            adjectives: None,
            syntax: Some(SyntaxRules {
                main_functions: vec!["dichiarativa".into(), "volitiva".into()],
                volitive_function: "volitiva".into(),
                imperative_mood: "imperativo".into(),
                coordinate_types: vec!["copulativa".into()],
                subordinate_functions: vec!["condizionale".into()],
                conditional_function: "condizionale".into(),
                conditional_conjunction: "se".into(),
            }),
        }
    }

    #[test]
    fn test_world_tracks_every_token_and_clause() {
        let analysis = TextAnalysis::from_tokens(vec![
            TaggedToken::new(0, "Apri", PartOfSpeech::Verb, "aprire"),
            TaggedToken::new(1, "porta", PartOfSpeech::Noun, "porta"),
        ])
        .with_sentence(
            SentenceAnalysis::new(0, "Apri la porta", "semplice", ClauseAnalysis::new("Apri la porta", "volitiva"))
                .with_coordinate(ClauseAnalysis::new("e chiudi", "copulativa")),
        );

        let world = GradusWorld::from_analysis(&analysis);
        assert_eq!(world.inner().query::<&TokenData>().iter().count(), 2);
        assert_eq!(world.inner().query::<&ClauseData>().iter().count(), 2);
    }

    #[test]
    fn test_syntax_only_runs_when_requested() {
        let rules = RuleTables::compile(&inventory());
        let analysis = TextAnalysis::default().with_sentence(SentenceAnalysis::new(
            0,
            "Perché piove?",
            "semplice",
            ClauseAnalysis::new("Perché piove?", "interrogativa"),
        ));
        let world = GradusWorld::from_analysis(&analysis);

        assert!(world.validate(&rules, false).is_empty());
        assert_eq!(world.validate(&rules, true).len(), 1);
    }

    #[test]
    fn test_volitive_clause_uses_token_span() {
        let rules = RuleTables::compile(&inventory());
        let imperative = Features::new().with_mood("imperativo");
        let analysis = TextAnalysis::from_tokens(vec![
            TaggedToken::new(0, "Vieni", PartOfSpeech::Verb, "venire").with_features(imperative.clone()),
            TaggedToken::new(1, "qui", PartOfSpeech::Adverb, "qui"),
            TaggedToken::new(2, "vieni", PartOfSpeech::Verb, "venire").with_features(imperative),
        ])
        .with_sentence(SentenceAnalysis::new(
            0,
            "Vieni qui",
            "semplice",
            ClauseAnalysis::new("Vieni qui", "volitiva").with_tokens(TokenSpan::new(0, 2)),
        ))
        .with_sentence(SentenceAnalysis::new(
            1,
            "Vieni qui",
            "semplice",
            ClauseAnalysis::new("Vieni qui", "volitiva").with_tokens(TokenSpan::new(3, 5)),
        ));

        let diagnostics = GradusWorld::from_analysis(&analysis).validate(&rules, true);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("imperativo"));
    }

    #[test]
    fn test_diagnostics_in_text_order() {
        let rules = RuleTables::compile(&inventory());
        let plural = Features::new().with_number("plur");
        let tokens = (0..5u32)
            .rev()
            .map(|i| TaggedToken::new(i, format!("n{i}"), PartOfSpeech::Noun, "x").with_features(plural.clone()))
            .collect();

        let diagnostics = GradusWorld::from_analysis(&TextAnalysis::from_tokens(tokens)).validate(&rules, false);
        let ids: Vec<u32> = diagnostics.iter().filter_map(|d| d.token).map(u32::from).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }
}
