use bit_set::BitSet;
use log::debug;

use crate::{Puzzle, SlotId, Vocabulary, WordId};

/// The words still considered possible for each slot, as a set of `WordId`s indexed by `SlotId`.
/// Domains start out holding the whole vocabulary and only ever shrink, except when the search
/// restores a snapshot it took itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domains {
    domains: Vec<BitSet>,
}

impl Domains {
    /// Seed every slot's domain with the full vocabulary.
    pub fn new(puzzle: &Puzzle, vocabulary: &Vocabulary) -> Domains {
        let all_words: BitSet = (0..vocabulary.len()).collect();
        Domains { domains: vec![all_words; puzzle.slot_count()] }
    }

    pub fn get(&self, slot_id: SlotId) -> &BitSet {
        &self.domains[slot_id]
    }

    pub fn len(&self, slot_id: SlotId) -> usize {
        self.domains[slot_id].len()
    }

    pub fn is_empty(&self, slot_id: SlotId) -> bool {
        self.domains[slot_id].is_empty()
    }

    pub fn remove(&mut self, slot_id: SlotId, word_id: WordId) -> bool {
        self.domains[slot_id].remove(word_id)
    }

    /// Shrink a slot's domain down to the single given word.
    pub fn restrict(&mut self, slot_id: SlotId, word_id: WordId) {
        let domain = &mut self.domains[slot_id];
        domain.clear();
        domain.insert(word_id);
    }

    /// The lowest-numbered slot whose domain has no words left, if any.
    pub fn first_empty(&self) -> Option<SlotId> {
        self.domains.iter().position(|domain| domain.is_empty())
    }

    /// Remove every word whose length doesn't match its slot's length. Idempotent.
    pub fn enforce_node_consistency(&mut self, puzzle: &Puzzle, vocabulary: &Vocabulary) {
        for (slot_id, domain) in self.domains.iter_mut().enumerate() {
            let length = puzzle.slot(slot_id).length;
            let mismatched: Vec<WordId> =
                domain.iter().filter(|&word_id| vocabulary.word(word_id).len() != length).collect();

            for word_id in mismatched {
                domain.remove(word_id);
            }

            if domain.is_empty() {
                debug!("No words of length {} for slot {}", length, puzzle.slot(slot_id));
            }
        }
    }

    /// The words remaining for a slot, alphabetically.
    pub fn words<'a>(&self, slot_id: SlotId, vocabulary: &'a Vocabulary) -> Vec<&'a str> {
        self.domains[slot_id].iter().map(|word_id| vocabulary.word(word_id).string.as_str()).collect()
    }
}
