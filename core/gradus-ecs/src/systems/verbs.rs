use gradus_protocol::{label, Category, Diagnostic, Features, PartOfSpeech, TokenId};
use hecs::World;

use crate::components::{Morphology, Pos, TokenData};
use crate::rules::{normalize, same, ConjugationKey, ModalTable, VerbTable};
use crate::systems::in_text_order;

struct VerbCheck<'a> {
    table: &'a VerbTable,
    level: &'a str,
    token: &'a TokenData,
    features: &'a Features,
    out: Vec<Diagnostic>,
}

impl VerbCheck<'_> {
    fn flag(&mut self, message: String) {
        self.out.push(Diagnostic::new(Category::VERBS, Some(self.token.id), message));
    }

    fn id(&self) -> TokenId {
        self.token.id
    }

    fn conjugation(&self) -> String {
        let f = self.features;
        match f.aspect.as_ref() {
            Some(aspect) => format!(
                "'mood' = '{}', 'tense' = '{}' and 'aspect' = '{}'",
                label(f.mood.as_ref()),
                label(f.tense.as_ref()),
                aspect
            ),
            None => format!(
                "'mood' = '{}' and 'tense' = '{}'",
                label(f.mood.as_ref()),
                label(f.tense.as_ref())
            ),
        }
    }

    fn irregularity(&mut self) {
        let lemma = &self.token.lemma;
        if self.table.irregular_lemmas.contains(lemma) && !self.table.permitted_irregulars.contains(lemma) {
            let message = format!(
                "The verb '{}' (lemma '{}') is irregular and not among the irregular verbs of the {} inventory.",
                self.token.text,
                normalize(lemma),
                self.level
            );
            self.flag(message);
        }
    }

    fn voice(&mut self) {
        let f = self.features;
        if same(&self.table.active_voice, f.voice.as_ref()) {
            return;
        }
        let allowed = self
            .table
            .passive_allowances
            .iter()
            .any(|key: &ConjugationKey| key.matches(f.mood.as_ref(), f.tense.as_ref(), f.aspect.as_ref()));
        if !allowed {
            let message = format!(
                "The verb '{}' has 'voice' = '{}', which the {} inventory does not allow with {}.",
                self.token.text,
                label(f.voice.as_ref()),
                self.level,
                self.conjugation()
            );
            self.flag(message);
        }
    }

    fn mood(&mut self) {
        let f = self.features;
        let verdict = self.table.mood(f.mood.as_ref()).map(|rule| {
            let ok = rule.tense_allowed(f.tense.as_ref(), f.aspect.as_ref())
                && rule.agreement_allowed(f.person.as_ref(), f.number.as_ref(), &self.token.lemma);
            (ok, rule.restricts_agreement())
        });

        let message = match verdict {
            Some((true, _)) => return,
            Some((false, true)) => format!(
                "The verb '{}' has {}, 'person' = '{}' and 'number' = '{}'. This combination is outside the verb forms of the {} inventory.",
                self.token.text,
                self.conjugation(),
                label(f.person.as_ref()),
                label(f.number.as_ref()),
                self.level
            ),
            Some((false, false)) | None => format!(
                "The verb '{}' has {}. This combination is outside the verb forms of the {} inventory.",
                self.token.text,
                self.conjugation(),
                self.level
            ),
        };
        self.flag(message);
    }

    /// Flags "be going to" read as a continuous tense. Returns true when it fired.
    fn going_to(&mut self, modals: &ModalTable) -> bool {
        let f = self.features;
        let Some(rule) = modals.going_to.as_ref() else {
            return false;
        };
        if !(f.is_modal() && same(&rule.auxiliary, f.auxiliary.as_ref())) {
            return false;
        }
        if !(same(&rule.mood, f.mood.as_ref()) && same(&rule.aspect, f.aspect.as_ref())) {
            return false;
        }

        let meaning = if same(&rule.present_tense, f.tense.as_ref()) {
            "a future intention"
        } else if same(&rule.past_tense, f.tense.as_ref()) {
            "a future intention in the past"
        } else {
            return false;
        };

        let message = format!(
            "The verb construct '{}' uses the semi-auxiliary '{}' (annotated with {}) to express {}, which the {} inventory does not allow.",
            self.token.text,
            rule.auxiliary,
            self.conjugation(),
            meaning,
            self.level
        );
        self.flag(message);
        true
    }

    fn finite_modal(&mut self, modals: &ModalTable) {
        let f = self.features;
        if !f.is_modal() {
            return;
        }
        let modal = f.auxiliary.clone().unwrap_or_else(|| self.token.lemma.clone());

        let message = if modals.semi_modals.contains(&modal) {
            format!(
                "The verb construct '{}' contains the semi-modal '{}' (annotated with {}). Semi-modals are not part of the {} inventory.",
                self.token.text,
                normalize(&modal),
                self.conjugation(),
                self.level
            )
        } else if !modals.allowed.contains(&modal) {
            format!(
                "The verb '{}' ({}) contains the modal '{}', which is not allowed by the {} inventory.",
                self.token.text,
                self.conjugation(),
                normalize(&modal),
                self.level
            )
        } else {
            return;
        };
        self.flag(message);
    }

    fn non_finite(&mut self, forbid_passive: bool) {
        let f = self.features;
        let form = label(f.verb_form.as_ref()).to_owned();

        if let Some(modals) = self.table.modals.as_ref() {
            if f.is_modal() && !modals.allowed.contains(&self.token.lemma) {
                let message = format!(
                    "The non-finite verb '{}' ('verb_form' = '{}') contains the modal '{}', which is not allowed by the {} inventory.",
                    self.token.text,
                    form,
                    normalize(&self.token.lemma),
                    self.level
                );
                self.flag(message);
            }
        }

        if forbid_passive && !same(&self.table.active_voice, f.voice.as_ref()) {
            let message = format!(
                "The non-finite verb '{}' ('verb_form' = '{}') has 'voice' = '{}'. Non-finite forms must be active in the {} inventory.",
                self.token.text,
                form,
                label(f.voice.as_ref()),
                self.level
            );
            self.flag(message);
        }
    }

    fn run(mut self) -> Vec<Diagnostic> {
        let table = self.table;
        self.irregularity();

        if let Some(forbid_passive) = table.forbid_non_finite_passive {
            if self.features.finite == Some(false) {
                self.non_finite(forbid_passive);
                return self.out;
            }
        }

        if let Some(modals) = table.modals.as_ref() {
            if self.going_to(modals) {
                tracing::trace!(token = %self.id(), "going-to construct, remaining checks skipped");
                return self.out;
            }
        }

        self.mood();
        self.voice();

        if let Some(modals) = table.modals.as_ref() {
            self.finite_modal(modals);
        }

        self.out
    }
}

/// Runs the independent verb sub-checks; a verb may collect several diagnostics.
pub fn check_verbs(world: &World, table: &VerbTable, level: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for (_id, (token, pos, morph)) in world.query::<(&TokenData, &Pos, &Morphology)>().iter() {
        if pos.0 != PartOfSpeech::Verb {
            continue;
        }
        let check = VerbCheck {
            table,
            level,
            token,
            features: &morph.0,
            out: Vec::new(),
        };
        diagnostics.extend(check.run());
    }

    in_text_order(diagnostics)
}
