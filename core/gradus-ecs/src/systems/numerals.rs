use gradus_protocol::{Category, Diagnostic, PartOfSpeech};
use hecs::World;

use crate::components::{Morphology, Pos, TokenData};
use crate::rules::{same, NumeralTable};
use crate::systems::in_text_order;

/// Ordinals must be on the allow-list; cardinals are free.
pub fn check_numerals(world: &World, table: &NumeralTable, level: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for (_id, (token, pos, morph)) in world.query::<(&TokenData, &Pos, &Morphology)>().iter() {
        if pos.0 != PartOfSpeech::Numeral {
            continue;
        }

        match morph.0.kind.as_ref() {
            None => diagnostics.push(Diagnostic::new(
                Category::NUMBERS,
                Some(token.id),
                format!(
                    "The number '{}' has no kind annotation, so it cannot be checked against the {level} inventory.",
                    token.text
                ),
            )),
            Some(kind) => {
                if same(&table.ordinal_kind, Some(kind))
                    && !table.allowed_ordinals.contains(&token.text)
                {
                    diagnostics.push(Diagnostic::new(
                        Category::NUMBERS,
                        Some(token.id),
                        format!(
                            "The ordinal number '{}' falls outside the range allowed by the {level} inventory.",
                            token.text
                        ),
                    ));
                }
            }
        }
    }

    in_text_order(diagnostics)
}
