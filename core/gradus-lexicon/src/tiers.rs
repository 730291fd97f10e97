use std::collections::HashMap;

use gradus_protocol::{PartOfSpeech, VocabularyTiers};

use crate::lemma_set::LemmaSet;

/// Union of every word list from one or more tiers, keyed by part of speech.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    by_pos: HashMap<PartOfSpeech, LemmaSet>,
}

impl Vocabulary {
    pub fn contains(&self, pos: PartOfSpeech, lemma: &str) -> bool {
        self.by_pos.get(&pos).is_some_and(|set| set.contains(lemma))
    }

    pub fn words(&self, pos: PartOfSpeech) -> Option<&LemmaSet> {
        self.by_pos.get(&pos)
    }

    pub fn is_subset(&self, other: &Vocabulary) -> bool {
        self.by_pos.iter().all(|(pos, set)| {
            other
                .by_pos
                .get(pos)
                .map_or(set.is_empty(), |theirs| set.is_subset(theirs))
        })
    }

    fn absorb(&mut self, tiers: &VocabularyTiers, index: usize) {
        let Some(tier) = tiers.tiers.get(index) else {
            return;
        };
        for list in &tier.lists {
            self.by_pos
                .entry(list.pos)
                .or_default()
                .extend(list.words.iter().map(String::as_str));
        }
    }
}

/// Merges tiers `start..=end` into one deduplicated vocabulary.
///
/// Out-of-range indices are ignored; the result does not depend on the
/// order the tiers are visited in.
pub fn merge_tiers(tiers: &VocabularyTiers, start: usize, end: usize) -> Vocabulary {
    let mut vocabulary = Vocabulary::default();
    for index in start..=end {
        vocabulary.absorb(tiers, index);
    }
    vocabulary
}

/// The vocabulary reachable at one tier, i.e. that tier merged with all lower ones.
#[derive(Debug, Clone)]
pub struct CumulativeTier {
    pub label: String,
    pub vocabulary: Vocabulary,
}

/// Precomputes the cumulative vocabulary of every tier, lowest first.
pub fn cumulative(tiers: &VocabularyTiers) -> Vec<CumulativeTier> {
    let mut running = Vocabulary::default();
    tiers
        .tiers
        .iter()
        .enumerate()
        .map(|(index, tier)| {
            running.absorb(tiers, index);
            CumulativeTier {
                label: tier.label.clone(),
                vocabulary: running.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradus_protocol::VocabularyTier;
    use proptest::prelude::*;

    fn two_tiers() -> VocabularyTiers {
        VocabularyTiers::new(vec![
            VocabularyTier::new("A1").with_words(PartOfSpeech::Noun, ["casa", "Gatto"]),
            VocabularyTier::new("A2")
                .with_words(PartOfSpeech::Noun, ["gatto", "cane"])
                .with_words(PartOfSpeech::Verb, ["correre"]),
        ])
    }

    #[test]
    fn test_merge_deduplicates() {
        let merged = merge_tiers(&two_tiers(), 0, 1);
        assert_eq!(merged.words(PartOfSpeech::Noun).map(LemmaSet::len), Some(3));
        assert!(merged.contains(PartOfSpeech::Verb, "CORRERE"));
        assert!(!merged.contains(PartOfSpeech::Adverb, "casa"));
    }

    #[test]
    fn test_cumulative_matches_merge() {
        let tiers = two_tiers();
        let cumulative = cumulative(&tiers);
        assert_eq!(cumulative.len(), 2);
        assert_eq!(cumulative[0].label, "A1");
        assert_eq!(cumulative[1].vocabulary, merge_tiers(&tiers, 0, 1));
        assert!(!cumulative[0].vocabulary.contains(PartOfSpeech::Noun, "cane"));
    }

    fn arb_tiers() -> impl Strategy<Value = VocabularyTiers> {
        let words = prop::collection::vec("[a-dA-D]{1,3}", 0..6);
        let tier = (words.clone(), words).prop_map(|(nouns, verbs)| {
            VocabularyTier::new("t")
                .with_words(PartOfSpeech::Noun, nouns)
                .with_words(PartOfSpeech::Verb, verbs)
        });
        prop::collection::vec(tier, 1..5).prop_map(VocabularyTiers::new)
    }

    proptest! {
        #[test]
        fn test_tiers_are_monotonic(tiers in arb_tiers()) {
            let cumulative = cumulative(&tiers);
            for pair in cumulative.windows(2) {
                prop_assert!(pair[0].vocabulary.is_subset(&pair[1].vocabulary));
            }
        }

        #[test]
        fn test_merge_is_order_independent(tiers in arb_tiers()) {
            let forward = merge_tiers(&tiers, 0, tiers.len() - 1);
            let mut reversed = tiers.clone();
            reversed.tiers.reverse();
            let backward = merge_tiers(&reversed, 0, reversed.len() - 1);
            prop_assert_eq!(forward, backward);
        }
    }
}
