use gradus_protocol::{label, Category, Diagnostic, PartOfSpeech};
use hecs::World;

use crate::components::{Morphology, Pos, TokenData};
use crate::rules::{same, AdjectiveTable};
use crate::systems::in_text_order;

pub fn check_adjectives(world: &World, table: &AdjectiveTable, level: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for (_id, (token, pos, morph)) in world.query::<(&TokenData, &Pos, &Morphology)>().iter() {
        if pos.0 != PartOfSpeech::Adjective {
            continue;
        }
        let features = &morph.0;
        let function = features.function.as_ref();

        if !table.allowed_functions.allows(function) {
            diagnostics.push(Diagnostic::new(
                Category::ADJECTIVES,
                Some(token.id),
                format!(
                    "The adjective '{}' has function '{}', which is outside the {level} inventory.",
                    token.text,
                    label(function)
                ),
            ));
        }

        let descriptive = same(&table.descriptive_function, function);
        let positive = same(&table.positive_degree, features.degree.as_ref());
        if descriptive && !positive && features.regular != Some(true) {
            diagnostics.push(Diagnostic::new(
                Category::ADJECTIVES,
                Some(token.id),
                format!(
                    "The adjective '{}' is irregular and used in its '{}' form, which the {level} inventory does not allow.",
                    token.text,
                    label(features.degree.as_ref())
                ),
            ));
        }
    }

    in_text_order(diagnostics)
}
