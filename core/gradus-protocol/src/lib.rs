#![no_std] // Shared by the tools and any embedded evaluator build

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod analysis;
pub mod ids;
pub mod model;
pub mod morphology;
pub mod report;

// Re-export core types for convenience
pub use analysis::*;
pub use ids::{SentenceId, TokenId};
pub use model::*;
pub use morphology::*;
pub use report::*;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec;
    use rkyv::{from_bytes, to_bytes};

    fn tiny_inventory() -> ConstraintInventory {
        ConstraintInventory {
            version: INVENTORY_FORMAT_VERSION,
            language: Language::English,
            level: String::from("A1"),
            pronouns: Some(PronounRules {
                allowed_kinds: vec![String::from("personal")],
                interrogative_kind: Some(String::from("interrogative")),
                allowed_interrogatives: vec![String::from("who")],
            }),
            numerals: None,
            verbs: None,
            nouns: Some(NounRules {
                plural_number: String::from("plural"),
            }),
            adjectives: None,
            syntax: None,
        }
    }

    #[test]
    fn test_inventory_archive_round_trip() {
        let original = tiny_inventory();

        let bytes = to_bytes::<_, 1024>(&original).expect("Failed to serialize inventory");
        let restored: ConstraintInventory =
            from_bytes(&bytes).expect("Failed to deserialize inventory");

        assert_eq!(original, restored);
    }

    #[test]
    fn test_inventory_categories() {
        let inventory = tiny_inventory();
        assert_eq!(inventory.categories(), Category::PRONOUNS | Category::NOUNS);
    }

    #[test]
    fn test_id_layout() {
        assert_eq!(core::mem::size_of::<TokenId>(), 4);
        assert_eq!(u32::from(TokenId::new(7)), 7);
    }

    #[test]
    fn test_pos_codes() {
        for pos in PartOfSpeech::ALL {
            assert_eq!(PartOfSpeech::from_code(pos.code()), Some(pos));
        }
        assert_eq!(PartOfSpeech::from_code("???"), None);
    }

    #[test]
    fn test_report_invariant() {
        let clean = ConformanceReport::from_diagnostics(Category::VERBS, vec![]);
        assert!(clean.conform());
        assert_eq!(clean.category_conform(Category::VERBS), Some(true));
        assert_eq!(clean.category_conform(Category::SYNTAX), None);

        let dirty = ConformanceReport::from_diagnostics(
            Category::VERBS | Category::NOUNS,
            vec![Diagnostic::new(Category::NOUNS, Some(TokenId::new(2)), "bad noun")],
        );
        assert!(!dirty.conform());
        assert_eq!(dirty.failed(), Category::NOUNS);
        assert_eq!(dirty.category_conform(Category::VERBS), Some(true));
        assert_eq!(dirty.category_conform(Category::NOUNS), Some(false));
        assert_eq!(dirty.error_messages().collect::<vec::Vec<_>>(), vec!["bad noun"]);
    }

    #[test]
    fn test_language_parsing() {
        assert_eq!("IT".parse::<Language>(), Ok(Language::Italian));
        assert_eq!("english".parse::<Language>(), Ok(Language::English));
        assert!("klingon".parse::<Language>().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_inventory_json_defaults() {
        let json = r#"{ "language": "italian", "level": "A1",
                        "nouns": { "plural_number": "plur" } }"#;
        let inventory: ConstraintInventory = serde_json::from_str(json).expect("valid inventory");
        assert_eq!(inventory.version, INVENTORY_FORMAT_VERSION);
        assert_eq!(inventory.categories(), Category::NOUNS);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_token_accepts_upos_aliases() {
        let json = r#"{ "id": 0, "text": "Corri", "pos": "VERB", "lemma": "correre",
                        "features": { "mood": "imperativo", "person": "2" } }"#;
        let token: TaggedToken = serde_json::from_str(json).expect("valid token");
        assert_eq!(token.pos, PartOfSpeech::Verb);
        assert_eq!(token.features.person.as_deref(), Some("2"));
        assert_eq!(token.features.tense, None);
    }
}
