//! The two shipped A1 inventories.

use gradus_protocol::{
    AdjectiveRules, Conjugation, ConstraintInventory, GoingToRule, Language, ModalRules,
    MoodRule, NonFiniteRules, NounRules, NumeralRules, PronounRules, SyntaxRules, TenseSpec,
    VerbRules, INVENTORY_FORMAT_VERSION,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

fn tenses(items: &[(&str, Option<&str>)]) -> Vec<TenseSpec> {
    items
        .iter()
        .map(|(tense, aspect)| TenseSpec {
            tense: (*tense).to_owned(),
            aspect: aspect.map(str::to_owned),
        })
        .collect()
}

const ITALIAN_ORDINALS: &[&str] = &[
    "primo", "prima", "primi", "prime", "secondo", "seconda", "secondi", "seconde", "terzo",
    "terza", "terzi", "terze", "1°", "2°", "3°", "1′", "2′", "3′", "1ª", "2ª", "3ª", "1º", "2º",
    "3º", "i", "ii", "iii", "primo (1º)", "primo (1°)", "prima (1ª)", "secondo (2º)",
    "secondo (2°)", "seconda (2ª)", "terzo (3º)", "terzo (3°)", "terza (3ª)",
];

/// Irregular Italian verbs, one lemma per line, `#` starting a comment.
const ITALIAN_IRREGULAR_VERBS: &str = include_str!("../data/italian_irregular_verbs.txt");

/// Lemmas of a word list embedded as plain text.
fn word_list(source: &str) -> Vec<String> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect()
}

const ITALIAN_PERMITTED_IRREGULARS: &[&str] = &[
    "esserci", "essere", "esservi", "avercela", "avere", "averla", "aversela", "volercene",
    "volerci", "volere", "volerne", "volersi", "potere", "dovere",
];

/// Italian A1: pronoun kinds, ordinals 1st to 3rd, active voice only,
/// present/passato prossimo indicative, present infinitive, second-person
/// imperative and the `volere` courtesy conditional; optional clause checks.
pub fn italian_a1() -> ConstraintInventory {
    ConstraintInventory {
        version: INVENTORY_FORMAT_VERSION,
        language: Language::Italian,
        level: "A1".to_owned(),
        pronouns: Some(PronounRules {
            allowed_kinds: strings(&["personale", "possessivo", "dimostrativo", "interrogativo", "indefinito"]),
            interrogative_kind: None,
            allowed_interrogatives: Vec::new(),
        }),
        numerals: Some(NumeralRules {
            ordinal_kind: "ordinale".to_owned(),
            allowed_ordinals: strings(ITALIAN_ORDINALS),
        }),
        verbs: Some(VerbRules {
            irregular_lemmas: word_list(ITALIAN_IRREGULAR_VERBS),
            permitted_irregulars: strings(ITALIAN_PERMITTED_IRREGULARS),
            active_voice: "attiva".to_owned(),
            passive_allowances: Vec::new(),
            moods: vec![
                MoodRule {
                    mood: "indicativo".to_owned(),
                    tenses: tenses(&[("presente", None), ("passato prossimo", None)]),
                    implied_tense: None,
                    persons: Vec::new(),
                    numbers: Vec::new(),
                    lemmas: Vec::new(),
                },
                MoodRule {
                    mood: "infinito".to_owned(),
                    tenses: tenses(&[("presente", None)]),
                    implied_tense: None,
                    persons: Vec::new(),
                    numbers: Vec::new(),
                    lemmas: Vec::new(),
                },
                // Taggers usually leave the (always present) imperative tense out.
                MoodRule {
                    mood: "imperativo".to_owned(),
                    tenses: tenses(&[("presente", None)]),
                    implied_tense: Some("presente".to_owned()),
                    persons: strings(&["second", "2", "seconda"]),
                    numbers: Vec::new(),
                    lemmas: Vec::new(),
                },
                MoodRule {
                    mood: "condizionale".to_owned(),
                    tenses: tenses(&[("presente", None)]),
                    implied_tense: None,
                    persons: strings(&["first", "1", "prima"]),
                    numbers: strings(&["singular", "sing", "singolare"]),
                    lemmas: strings(&["volere"]),
                },
            ],
            modals: None,
            non_finite: None,
        }),
        nouns: None,
        adjectives: None,
        syntax: Some(SyntaxRules {
            main_functions: strings(&["dichiarativa", "volitiva", "interrogativa"]),
            volitive_function: "volitiva".to_owned(),
            imperative_mood: "imperativo".to_owned(),
            coordinate_types: strings(&["copulativa", "avversativa", "esplicativa"]),
            subordinate_functions: strings(&["causale", "temporale", "finale", "condizionale", "relativa"]),
            conditional_function: "condizionale".to_owned(),
            conditional_conjunction: "se".to_owned(),
        }),
    }
}

/// English A1: closed pronoun and adjective sets, `can`/`will` only, no
/// semi-modals, five indicative conjugations and passive in the simple
/// present and past.
pub fn english_a1() -> ConstraintInventory {
    let indicative = |tense: &str, aspect: &str| Conjugation {
        mood: "indicative".to_owned(),
        tense: tense.to_owned(),
        aspect: Some(aspect.to_owned()),
    };

    ConstraintInventory {
        version: INVENTORY_FORMAT_VERSION,
        language: Language::English,
        level: "A1".to_owned(),
        pronouns: Some(PronounRules {
            allowed_kinds: strings(&["personal", "possessive", "interrogative", "demonstrative"]),
            interrogative_kind: Some("interrogative".to_owned()),
            allowed_interrogatives: strings(&["who", "what", "which"]),
        }),
        numerals: None,
        verbs: Some(VerbRules {
            irregular_lemmas: Vec::new(),
            permitted_irregulars: Vec::new(),
            active_voice: "active".to_owned(),
            passive_allowances: vec![indicative("present", "simple"), indicative("past", "simple")],
            moods: vec![
                MoodRule {
                    mood: "indicative".to_owned(),
                    tenses: tenses(&[
                        ("present", Some("simple")),
                        ("present", Some("perfect")),
                        ("present", Some("continuous")),
                        ("past", Some("simple")),
                        ("past", Some("continuous")),
                    ]),
                    implied_tense: None,
                    persons: Vec::new(),
                    numbers: Vec::new(),
                    lemmas: Vec::new(),
                },
                MoodRule {
                    mood: "imperative".to_owned(),
                    tenses: Vec::new(),
                    implied_tense: None,
                    persons: Vec::new(),
                    numbers: Vec::new(),
                    lemmas: Vec::new(),
                },
            ],
            modals: Some(ModalRules {
                allowed: strings(&["can", "will"]),
                semi_modals: strings(&["be going to", "be to", "have to", "be able to", "had better"]),
                going_to: Some(GoingToRule {
                    auxiliary: "be going to".to_owned(),
                    mood: "indicative".to_owned(),
                    aspect: "continuous".to_owned(),
                    present_tense: "present".to_owned(),
                    past_tense: "past".to_owned(),
                }),
            }),
            non_finite: Some(NonFiniteRules { forbid_passive: true }),
        }),
        nouns: Some(NounRules {
            plural_number: "plural".to_owned(),
        }),
        adjectives: Some(AdjectiveRules {
            allowed_functions: strings(&["descriptive", "interrogative", "possessive"]),
            descriptive_function: "descriptive".to_owned(),
            positive_degree: "positive".to_owned(),
        }),
        syntax: None,
    }
}

pub fn builtin(language: Language) -> ConstraintInventory {
    match language {
        Language::Italian => italian_a1(),
        Language::English => english_a1(),
    }
}
