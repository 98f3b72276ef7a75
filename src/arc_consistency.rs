//! AC-3: repeatedly revise directed arcs between crossing slots until every word left in a slot's
//! domain has a compatible word in each crossing slot's domain, or some domain runs dry.

use std::collections::HashSet;

use log::debug;

use crate::{Domains, Puzzle, SlotId, Vocabulary, WordId};

/// A directed arc `(x, y)`: "make `x` consistent with `y`".
pub type Arc = (SlotId, SlotId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArcConsistencySuccess {
    /// How many times `revise` was called.
    pub revisions: u64,
    /// How many words were removed across all domains.
    pub eliminations: u64,
}

/// Some slot ended up with no possible words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArcConsistencyFailure {
    pub slot_id: SlotId,
    pub revisions: u64,
}

pub type ArcConsistencyResult = Result<ArcConsistencySuccess, ArcConsistencyFailure>;

/// Make `x` arc-consistent with `y` by removing every word in `x`'s domain that has no word in
/// `y`'s domain agreeing with it at their shared cell. Returns whether anything was removed; slots
/// that don't cross are left alone.
pub fn revise(
    puzzle: &Puzzle,
    vocabulary: &Vocabulary,
    domains: &mut Domains,
    x: SlotId,
    y: SlotId,
) -> bool {
    revise_counting(puzzle, vocabulary, domains, x, y) > 0
}

fn revise_counting(
    puzzle: &Puzzle,
    vocabulary: &Vocabulary,
    domains: &mut Domains,
    x: SlotId,
    y: SlotId,
) -> usize {
    let (i, j) = match puzzle.overlap(x, y) {
        Some(overlap) => overlap,
        None => return 0,
    };

    // Every letter some word in `y` can put in the shared cell. A word too short to reach the
    // cell supports nothing, and is never supported.
    let supported: HashSet<char> =
        domains.get(y).iter().filter_map(|word_id| vocabulary.word(word_id).glyph(j)).collect();

    let unsupported: Vec<WordId> = domains
        .get(x)
        .iter()
        .filter(|&word_id| match vocabulary.word(word_id).glyph(i) {
            Some(letter) => !supported.contains(&letter),
            None => true,
        })
        .collect();

    for &word_id in &unsupported {
        domains.remove(x, word_id);
    }

    unsupported.len()
}

/// Run AC-3 over the given arcs, or over every arc in the puzzle if `arcs` is `None`.
///
/// The worklist is a stack: arcs are popped from the end, and whenever revising `(x, y)` shrinks
/// `x`'s domain, every arc `(z, x)` with `z` a neighbor of `x` other than `y` is pushed back on.
/// Fails as soon as any domain becomes empty, leaving the domains partially pruned.
pub fn ac3(
    puzzle: &Puzzle,
    vocabulary: &Vocabulary,
    domains: &mut Domains,
    arcs: Option<Vec<Arc>>,
) -> ArcConsistencyResult {
    let mut queue = arcs.unwrap_or_else(|| puzzle.arcs());
    let mut result = ArcConsistencySuccess::default();

    while let Some((x, y)) = queue.pop() {
        result.revisions += 1;

        let removed = revise_counting(puzzle, vocabulary, domains, x, y);
        if removed == 0 {
            continue;
        }
        result.eliminations += removed as u64;

        if domains.is_empty(x) {
            debug!("Arc consistency emptied the domain of {}", puzzle.slot(x));
            return Err(ArcConsistencyFailure { slot_id: x, revisions: result.revisions });
        }

        queue.extend(puzzle.neighbors(x).iter().filter(|&z| z != y).map(|z| (z, x)));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::{ac3, revise};
    use crate::Direction::{Across, Down};
    use crate::{Domains, Grid, Puzzle, Slot, Vocabulary};

    fn setup(puzzle: &Puzzle, words: &[&str]) -> (Vocabulary, Domains) {
        let vocabulary = Vocabulary::new(words);
        let mut domains = Domains::new(puzzle, &vocabulary);
        domains.enforce_node_consistency(puzzle, &vocabulary);
        (vocabulary, domains)
    }

    /// Slot 0 is `A` (across, length 3) and slot 1 is `B` (down, length 4), crossing at A[1]/B[0].
    fn crossing_pair() -> Puzzle {
        Puzzle::new(vec![Slot::new(0, 0, Across, 3), Slot::new(0, 1, Down, 4)])
    }

    #[test]
    fn test_revise_removes_unsupported_words() {
        let puzzle = crossing_pair();
        let (vocabulary, mut domains) = setup(&puzzle, &["CAT", "DOG", "COLD", "GOLD", "OATH"]);

        assert!(revise(&puzzle, &vocabulary, &mut domains, 0, 1));
        assert_eq!(domains.words(0, &vocabulary), vec!["DOG"]);
        assert!(!revise(&puzzle, &vocabulary, &mut domains, 0, 1), "second pass is a no-op");

        assert!(revise(&puzzle, &vocabulary, &mut domains, 1, 0));
        assert_eq!(domains.words(1, &vocabulary), vec!["OATH"]);
    }

    /// Slot 0 runs down four cells and slot 1 crosses its last cell at its own second letter.
    #[test]
    fn test_revise_drops_words_too_short_to_cross() {
        let puzzle = Puzzle::new(vec![Slot::new(0, 1, Down, 4), Slot::new(3, 0, Across, 3)]);
        let vocabulary = Vocabulary::new(["ABCD", "ABCY", "XYZ", "Q"]);
        let mut domains = Domains::new(&puzzle, &vocabulary);

        assert_eq!(puzzle.overlap(0, 1), Some((3, 1)));
        assert!(revise(&puzzle, &vocabulary, &mut domains, 0, 1));
        assert_eq!(domains.words(0, &vocabulary), vec!["ABCY"]);

        assert!(revise(&puzzle, &vocabulary, &mut domains, 1, 0));
        assert_eq!(domains.words(1, &vocabulary), vec!["XYZ"]);
    }

    #[test]
    fn test_revise_without_overlap_is_noop() {
        let puzzle = Puzzle::new(vec![Slot::new(0, 0, Across, 3), Slot::new(2, 0, Across, 3)]);
        let (vocabulary, mut domains) = setup(&puzzle, &["CAT", "DOG"]);
        let before = domains.clone();

        assert!(!revise(&puzzle, &vocabulary, &mut domains, 0, 1));
        assert_eq!(domains, before);
    }

    #[test]
    fn test_ac3_reaches_arc_consistent_fixpoint() {
        let puzzle = Puzzle::new(Grid::parse(include_str!("../data/structure0.txt")).unwrap().slots());
        let vocabulary = Vocabulary::parse(include_str!("../data/words0.txt")).unwrap();
        let mut domains = Domains::new(&puzzle, &vocabulary);
        domains.enforce_node_consistency(&puzzle, &vocabulary);

        let result = ac3(&puzzle, &vocabulary, &mut domains, None).expect("ac3 failed");
        assert!(result.eliminations > 0);

        for (x, y) in puzzle.arcs() {
            let (i, j) = puzzle.overlap(x, y).unwrap();
            for w in domains.get(x).iter() {
                let letter = vocabulary.word(w).glyph(i);
                assert!(
                    domains.get(y).iter().any(|v| vocabulary.word(v).glyph(j) == letter),
                    "{} has no support in {}",
                    vocabulary.word(w).string,
                    puzzle.slot(y),
                );
            }
        }

        let left = puzzle.slot_id(&Slot::new(0, 1, Down, 5));
        let bottom = puzzle.slot_id(&Slot::new(4, 1, Across, 4));
        assert_eq!(domains.words(left, &vocabulary), vec!["SEVEN"]);
        assert_eq!(domains.words(bottom, &vocabulary), vec!["NINE"]);
    }

    #[test]
    fn test_ac3_fails_on_incompatible_crossing() {
        let puzzle = crossing_pair();
        let (vocabulary, mut domains) = setup(&puzzle, &["CAT", "DOG", "COLD", "CORD"]);

        let failure = ac3(&puzzle, &vocabulary, &mut domains, None).expect_err("ac3 should fail");

        assert!(domains.is_empty(failure.slot_id));
    }

    #[test]
    fn test_ac3_with_explicit_arcs_only_revises_those() {
        let puzzle = crossing_pair();
        let (vocabulary, mut domains) = setup(&puzzle, &["CAT", "DOG", "COLD", "GOLD", "OATH"]);

        let result = ac3(&puzzle, &vocabulary, &mut domains, Some(vec![(0, 1)])).unwrap();

        assert_eq!(result.revisions, 1, "slot 0 has no other neighbors to requeue");
        assert_eq!(domains.words(0, &vocabulary), vec!["DOG"]);
        assert_eq!(domains.words(1, &vocabulary), vec!["COLD", "GOLD", "OATH"]);
    }

    #[test]
    fn test_ac3_without_arcs() {
        let puzzle = Puzzle::new(vec![]);
        let (vocabulary, mut domains) = setup(&puzzle, &["CAT"]);

        assert_eq!(ac3(&puzzle, &vocabulary, &mut domains, None).unwrap().revisions, 0);
    }
}
