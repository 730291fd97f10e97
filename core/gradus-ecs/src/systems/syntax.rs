use gradus_protocol::{Category, Diagnostic, PartOfSpeech, TokenId};
use hecs::World;

use crate::components::{ClauseData, ClauseRole, Morphology, Pos, SentenceContext, TokenData};
use crate::rules::{normalize, same, SyntaxTable};

/// Lower-cased words of `text`, apostrophes kept attached (`l'`, `dell'`).
fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '’'))
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Whether `needle` occurs in `haystack` as a run of whole words.
fn contains_words(haystack: &[String], needle: &[String]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|window| window == needle)
}

struct Imperative {
    id: TokenId,
    words: Vec<String>,
}

fn imperatives(world: &World, table: &SyntaxTable) -> Vec<Imperative> {
    let mut found = Vec::new();
    for (_id, (token, pos, morph)) in world.query::<(&TokenData, &Pos, &Morphology)>().iter() {
        if pos.0 == PartOfSpeech::Verb && same(&table.imperative_mood, morph.0.mood.as_ref()) {
            found.push(Imperative {
                id: token.id,
                words: words(&token.text),
            });
        }
    }
    found
}

/// With a token span the verb must fall inside it; otherwise its surface
/// form has to appear in the clause as whole words.
fn has_imperative(clause: &ClauseData, imperatives: &[Imperative]) -> bool {
    match clause.span {
        Some(span) => imperatives.iter().any(|verb| span.contains(verb.id)),
        None => {
            let clause_words = words(&clause.content);
            imperatives
                .iter()
                .any(|verb| contains_words(&clause_words, &verb.words))
        }
    }
}

fn starts_with_word(content: &str, word: &str) -> bool {
    words(content).first().is_some_and(|first| *first == word)
}

fn describe(sentence: &SentenceContext, clause: &ClauseData, attribute: &str) -> String {
    let role = match clause.role {
        ClauseRole::Main => "main",
        ClauseRole::Coordinate => "coordinate",
        ClauseRole::Subordinate => "subordinate",
    };
    format!(
        "The sentence '{}' (type '{}') contains a {} clause '{}' with '{}' = '{}'",
        sentence.content,
        sentence.kind,
        role,
        clause.content,
        attribute,
        normalize(&clause.label)
    )
}

/// Clause-level checks over the syntactic decomposition, in sentence order.
pub fn check_syntax(world: &World, table: &SyntaxTable, level: &str) -> Vec<Diagnostic> {
    let imperatives = imperatives(world, table);

    let mut clauses: Vec<(ClauseData, SentenceContext)> = world
        .query::<(&ClauseData, &SentenceContext)>()
        .iter()
        .map(|(_id, (clause, sentence))| (clause.clone(), sentence.clone()))
        .collect();
    clauses.sort_by_key(|(clause, _)| (clause.sentence, clause.role, clause.order));

    let mut diagnostics = Vec::new();
    let mut flag = |message: String| diagnostics.push(Diagnostic::new(Category::SYNTAX, None, message));

    for (clause, sentence) in &clauses {
        let label = Some(&clause.label);
        match clause.role {
            ClauseRole::Main => {
                let head = describe(sentence, clause, "function");
                if !table.main_functions.allows(label) {
                    flag(format!("{head}, which falls outside the {level} inventory."));
                } else if same(&table.volitive_function, label) && !has_imperative(clause, &imperatives) {
                    flag(format!(
                        "{head}, which is allowed by the {level} inventory, but it does not contain a verb in '{}' mood as required.",
                        table.imperative_mood
                    ));
                }
            }
            ClauseRole::Coordinate => {
                if !table.coordinate_types.allows(label) {
                    let head = describe(sentence, clause, "type");
                    flag(format!("{head}, which falls outside the {level} inventory."));
                }
            }
            ClauseRole::Subordinate => {
                let head = describe(sentence, clause, "function");
                if !table.subordinate_functions.allows(label) {
                    flag(format!("{head}, which falls outside the {level} inventory."));
                }
                if same(&table.conditional_function, label)
                    && !starts_with_word(&clause.content, &table.conditional_conjunction)
                {
                    flag(format!(
                        "{head}, which is allowed by the {level} inventory, but it is not introduced by '{}' as required.",
                        table.conditional_conjunction
                    ));
                }
            }
        }
    }

    diagnostics
}
