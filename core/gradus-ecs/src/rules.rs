use std::collections::HashSet;

use gradus_protocol::{
    AdjectiveRules, Category, ConstraintInventory, GoingToRule, Language, MoodRule, NounRules,
    SyntaxRules,
};

/// Lower-cased, trimmed form used for every comparison.
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Case-insensitive allow-list.
#[derive(Debug, Clone, Default)]
pub struct AllowList(HashSet<String>);

impl AllowList {
    pub fn new<'a>(items: impl IntoIterator<Item = &'a String>) -> Self {
        Self(items.into_iter().map(|s| normalize(s)).collect())
    }

    /// Missing values never match.
    pub fn allows(&self, value: Option<&String>) -> bool {
        value.is_some_and(|v| self.0.contains(&normalize(v)))
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.contains(&normalize(value))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// `Some(expected)` equals the optional value after normalization.
pub fn same(expected: &str, value: Option<&String>) -> bool {
    value.is_some_and(|v| normalize(v) == expected)
}

#[derive(Debug, Clone)]
pub struct PronounTable {
    pub allowed_kinds: AllowList,
    pub interrogative_kind: Option<String>,
    pub allowed_interrogatives: AllowList,
}

#[derive(Debug, Clone)]
pub struct NumeralTable {
    pub ordinal_kind: String,
    pub allowed_ordinals: AllowList,
}

#[derive(Debug, Clone)]
pub struct ConjugationKey {
    pub mood: String,
    pub tense: String,
    pub aspect: Option<String>,
}

impl ConjugationKey {
    /// An absent aspect in the key accepts any aspect.
    pub fn matches(&self, mood: Option<&String>, tense: Option<&String>, aspect: Option<&String>) -> bool {
        same(&self.mood, mood)
            && same(&self.tense, tense)
            && self.aspect.as_deref().map_or(true, |a| same(a, aspect))
    }
}

#[derive(Debug, Clone)]
pub struct MoodTable {
    pub mood: String,
    pub tenses: Vec<(String, Option<String>)>,
    pub implied_tense: Option<String>,
    pub persons: AllowList,
    pub numbers: AllowList,
    pub lemmas: AllowList,
}

impl MoodTable {
    fn compile(rule: &MoodRule) -> Self {
        Self {
            mood: normalize(&rule.mood),
            tenses: rule
                .tenses
                .iter()
                .map(|t| (normalize(&t.tense), t.aspect.as_deref().map(normalize)))
                .collect(),
            implied_tense: rule.implied_tense.as_deref().map(normalize),
            persons: AllowList::new(&rule.persons),
            numbers: AllowList::new(&rule.numbers),
            lemmas: AllowList::new(&rule.lemmas),
        }
    }

    /// Whether person, number or lemma are restricted on top of the tense.
    pub fn restricts_agreement(&self) -> bool {
        !(self.persons.is_empty() && self.numbers.is_empty() && self.lemmas.is_empty())
    }

    pub fn tense_allowed(&self, tense: Option<&String>, aspect: Option<&String>) -> bool {
        let tense = tense.or(self.implied_tense.as_ref());
        self.tenses.is_empty()
            || self.tenses.iter().any(|(t, a)| {
                same(t, tense) && a.as_deref().map_or(true, |a| same(a, aspect))
            })
    }

    pub fn agreement_allowed(&self, person: Option<&String>, number: Option<&String>, lemma: &str) -> bool {
        let restricted = |list: &AllowList, value: Option<&String>| list.is_empty() || list.allows(value);
        restricted(&self.persons, person)
            && restricted(&self.numbers, number)
            && (self.lemmas.is_empty() || self.lemmas.contains(lemma))
    }
}

#[derive(Debug, Clone)]
pub struct ModalTable {
    pub allowed: AllowList,
    pub semi_modals: AllowList,
    pub going_to: Option<GoingToRule>,
}

#[derive(Debug, Clone)]
pub struct VerbTable {
    pub irregular_lemmas: AllowList,
    pub permitted_irregulars: AllowList,
    pub active_voice: String,
    pub passive_allowances: Vec<ConjugationKey>,
    pub moods: Vec<MoodTable>,
    pub modals: Option<ModalTable>,
    pub forbid_non_finite_passive: Option<bool>,
}

impl VerbTable {
    pub fn mood(&self, mood: Option<&String>) -> Option<&MoodTable> {
        let mood = normalize(mood?);
        self.moods.iter().find(|m| m.mood == mood)
    }
}

#[derive(Debug, Clone)]
pub struct AdjectiveTable {
    pub allowed_functions: AllowList,
    pub descriptive_function: String,
    pub positive_degree: String,
}

impl AdjectiveTable {
    fn compile(rules: &AdjectiveRules) -> Self {
        Self {
            allowed_functions: AllowList::new(&rules.allowed_functions),
            descriptive_function: normalize(&rules.descriptive_function),
            positive_degree: normalize(&rules.positive_degree),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NounTable {
    pub plural_number: String,
}

impl NounTable {
    fn compile(rules: &NounRules) -> Self {
        Self {
            plural_number: normalize(&rules.plural_number),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SyntaxTable {
    pub main_functions: AllowList,
    pub volitive_function: String,
    pub imperative_mood: String,
    pub coordinate_types: AllowList,
    pub subordinate_functions: AllowList,
    pub conditional_function: String,
    pub conditional_conjunction: String,
}

impl SyntaxTable {
    fn compile(rules: &SyntaxRules) -> Self {
        Self {
            main_functions: AllowList::new(&rules.main_functions),
            volitive_function: normalize(&rules.volitive_function),
            imperative_mood: normalize(&rules.imperative_mood),
            coordinate_types: AllowList::new(&rules.coordinate_types),
            subordinate_functions: AllowList::new(&rules.subordinate_functions),
            conditional_function: normalize(&rules.conditional_function),
            conditional_conjunction: normalize(&rules.conditional_conjunction),
        }
    }
}

/// A [`ConstraintInventory`] compiled into hashed, lower-cased lookup tables.
#[derive(Debug, Clone)]
pub struct RuleTables {
    pub language: Language,
    pub level: String,
    pub pronouns: Option<PronounTable>,
    pub numerals: Option<NumeralTable>,
    pub verbs: Option<VerbTable>,
    pub nouns: Option<NounTable>,
    pub adjectives: Option<AdjectiveTable>,
    pub syntax: Option<SyntaxTable>,
}

impl RuleTables {
    pub fn compile(inventory: &ConstraintInventory) -> Self {
        let pronouns = inventory.pronouns.as_ref().map(|p| PronounTable {
            allowed_kinds: AllowList::new(&p.allowed_kinds),
            interrogative_kind: p.interrogative_kind.as_deref().map(normalize),
            allowed_interrogatives: AllowList::new(&p.allowed_interrogatives),
        });

        let numerals = inventory.numerals.as_ref().map(|n| NumeralTable {
            ordinal_kind: normalize(&n.ordinal_kind),
            allowed_ordinals: AllowList::new(&n.allowed_ordinals),
        });

        let verbs = inventory.verbs.as_ref().map(|v| VerbTable {
            irregular_lemmas: AllowList::new(&v.irregular_lemmas),
            permitted_irregulars: AllowList::new(&v.permitted_irregulars),
            active_voice: normalize(&v.active_voice),
            passive_allowances: v
                .passive_allowances
                .iter()
                .map(|c| ConjugationKey {
                    mood: normalize(&c.mood),
                    tense: normalize(&c.tense),
                    aspect: c.aspect.as_deref().map(normalize),
                })
                .collect(),
            moods: v.moods.iter().map(MoodTable::compile).collect(),
            modals: v.modals.as_ref().map(|m| ModalTable {
                allowed: AllowList::new(&m.allowed),
                semi_modals: AllowList::new(&m.semi_modals),
                going_to: m.going_to.as_ref().map(|g| GoingToRule {
                    auxiliary: normalize(&g.auxiliary),
                    mood: normalize(&g.mood),
                    aspect: normalize(&g.aspect),
                    present_tense: normalize(&g.present_tense),
                    past_tense: normalize(&g.past_tense),
                }),
            }),
            forbid_non_finite_passive: v.non_finite.as_ref().map(|nf| nf.forbid_passive),
        });

        Self {
            language: inventory.language,
            level: inventory.level.clone(),
            pronouns,
            numerals,
            verbs,
            nouns: inventory.nouns.as_ref().map(NounTable::compile),
            adjectives: inventory.adjectives.as_ref().map(AdjectiveTable::compile),
            syntax: inventory.syntax.as_ref().map(SyntaxTable::compile),
        }
    }

    /// Categories checked when evaluating, honouring the syntax switch.
    pub fn categories(&self, check_syntax: bool) -> Category {
        let mut categories = Category::empty();
        categories.set(Category::PRONOUNS, self.pronouns.is_some());
        categories.set(Category::NUMBERS, self.numerals.is_some());
        categories.set(Category::VERBS, self.verbs.is_some());
        categories.set(Category::NOUNS, self.nouns.is_some());
        categories.set(Category::ADJECTIVES, self.adjectives.is_some());
        categories.set(Category::SYNTAX, check_syntax && self.syntax.is_some());
        categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradus_protocol::TenseSpec;

    #[test]
    fn test_allow_list_fails_closed() {
        let list = AllowList::new(&["Personale".to_string()]);
        assert!(list.allows(Some(&" personale ".to_string())));
        assert!(!list.allows(None));
        assert!(!list.allows(Some(&"relativo".to_string())));
    }

    #[test]
    fn test_conjugation_key_aspect_wildcard() {
        let key = ConjugationKey {
            mood: "indicative".into(),
            tense: "past".into(),
            aspect: None,
        };
        let (mood, tense) = ("Indicative".to_string(), "past".to_string());
        assert!(key.matches(Some(&mood), Some(&tense), None));
        assert!(!key.matches(Some(&mood), None, None));
    }

    #[test]
    fn test_implied_tense_fills_missing_annotation() {
        let rule = MoodRule {
            mood: "Imperativo".into(),
            tenses: vec![TenseSpec {
                tense: "presente".into(),
                aspect: None,
            }],
            implied_tense: Some("presente".into()),
            persons: Vec::new(),
            numbers: Vec::new(),
            lemmas: Vec::new(),
        };
        let table = MoodTable::compile(&rule);

        assert!(table.tense_allowed(None, None));
        assert!(table.tense_allowed(Some(&"Presente".to_string()), None));
        assert!(!table.tense_allowed(Some(&"passato".to_string()), None));
    }
}
