use gradus_protocol::{Category, Diagnostic, PartOfSpeech};
use hecs::World;

use crate::components::{Morphology, Pos, TokenData};
use crate::rules::{same, NounTable};
use crate::systems::in_text_order;

/// Irregular plurals are rejected; regularity must be asserted explicitly.
pub fn check_nouns(world: &World, table: &NounTable, level: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for (_id, (token, pos, morph)) in world.query::<(&TokenData, &Pos, &Morphology)>().iter() {
        if pos.0 != PartOfSpeech::Noun {
            continue;
        }
        let features = &morph.0;

        if same(&table.plural_number, features.number.as_ref()) && features.regular != Some(true) {
            diagnostics.push(Diagnostic::new(
                Category::NOUNS,
                Some(token.id),
                format!(
                    "The noun '{}' is an irregular plural. Irregular plurals are not part of the {level} inventory.",
                    token.text
                ),
            ));
        }
    }

    in_text_order(diagnostics)
}
