use gradus_protocol::{label, Category, Diagnostic, PartOfSpeech};
use hecs::World;

use crate::components::{Morphology, Pos, TokenData};
use crate::rules::{same, PronounTable};
use crate::systems::in_text_order;

pub fn check_pronouns(world: &World, table: &PronounTable, level: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for (_id, (token, pos, morph)) in world.query::<(&TokenData, &Pos, &Morphology)>().iter() {
        if pos.0 != PartOfSpeech::Pronoun {
            continue;
        }
        let kind = morph.0.kind.as_ref();

        if !table.allowed_kinds.allows(kind) {
            diagnostics.push(Diagnostic::new(
                Category::PRONOUNS,
                Some(token.id),
                format!(
                    "The pronoun '{}' has kind '{}', a pronoun category outside the {level} inventory.",
                    token.text,
                    label(kind)
                ),
            ));
        }

        let is_interrogative = table
            .interrogative_kind
            .as_deref()
            .is_some_and(|interrogative| same(interrogative, kind));
        if is_interrogative && !table.allowed_interrogatives.contains(&token.text) {
            diagnostics.push(Diagnostic::new(
                Category::PRONOUNS,
                Some(token.id),
                format!(
                    "The interrogative pronoun '{}' is not one of the interrogatives admitted at {level}.",
                    token.text
                ),
            ));
        }
    }

    in_text_order(diagnostics)
}
