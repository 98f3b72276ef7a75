//! Backtracking search over partial assignments, guided by the minimum-remaining-values and degree
//! heuristics for choosing a slot and the least-constraining-value heuristic for ordering words.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::{Display, Formatter};

use instant::{Duration, Instant};
use log::{debug, info, trace};
use smallvec::SmallVec;

use crate::arc_consistency::{self, Arc, ArcConsistencyResult};
use crate::{Domains, Puzzle, Slot, SlotId, Vocabulary, WordId, MAX_SLOT_LENGTH};

/// Knobs for the solver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverOptions {
    /// Re-run AC-3 from each slot as it's assigned, rolling the domains back when the branch is
    /// abandoned. Doesn't change whether a fill is found, but may change which one.
    pub inference: bool,
}

/// A struct tracking statistics about the filling process.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    pub states: u64,
    pub backtracks: u64,
    pub revisions: u64,
    pub consistency_checks: u64,
    pub duration: Duration,
}

/// A partial or complete mapping from slots to words. Each branch of the search extends its own
/// copy via `with`, so sibling branches never see each other's choices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    words: BTreeMap<SlotId, WordId>,
}

impl Assignment {
    pub fn new() -> Assignment {
        Assignment::default()
    }

    /// A copy of this assignment with `slot_id` set to `word_id`.
    pub fn with(&self, slot_id: SlotId, word_id: WordId) -> Assignment {
        let mut words = self.words.clone();
        words.insert(slot_id, word_id);
        Assignment { words }
    }

    pub fn get(&self, slot_id: SlotId) -> Option<WordId> {
        self.words.get(&slot_id).copied()
    }

    pub fn contains(&self, slot_id: SlotId) -> bool {
        self.words.contains_key(&slot_id)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotId, WordId)> + '_ {
        self.words.iter().map(|(&slot_id, &word_id)| (slot_id, word_id))
    }
}

/// A struct recording the word placed in a slot by a completed fill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub slot: Slot,
    pub word: String,
}

/// A struct representing the results of a fill operation.
#[derive(Debug, Clone)]
pub struct FillSuccess {
    pub statistics: Statistics,
    pub choices: Vec<Choice>,
}

impl FillSuccess {
    pub fn word_for(&self, slot: &Slot) -> Option<&str> {
        self.choices.iter().find(|choice| &choice.slot == slot).map(|choice| choice.word.as_str())
    }
}

/// Why no fill was found. Both cases mean the same thing to a user, and display identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillFailure {
    /// Node or arc consistency left this slot with no possible words, so search never ran.
    UnsatisfiableDomain(Slot),
    /// Every branch of the search was tried without completing the grid.
    SearchExhausted,
}

impl Display for FillFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "No solution.")
    }
}

impl std::error::Error for FillFailure {}

/// Owns the domain store for one puzzle and runs the consistency passes and search over it.
pub struct Solver<'a> {
    puzzle: &'a Puzzle,
    vocabulary: &'a Vocabulary,
    domains: Domains,
    options: SolverOptions,
    statistics: Statistics,
}

impl<'a> Solver<'a> {
    pub fn new(puzzle: &'a Puzzle, vocabulary: &'a Vocabulary, options: SolverOptions) -> Solver<'a> {
        Solver {
            puzzle,
            vocabulary,
            domains: Domains::new(puzzle, vocabulary),
            options,
            statistics: Statistics::default(),
        }
    }

    pub fn domains(&self) -> &Domains {
        &self.domains
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn enforce_node_consistency(&mut self) {
        self.domains.enforce_node_consistency(self.puzzle, self.vocabulary);
    }

    pub fn revise(&mut self, x: SlotId, y: SlotId) -> bool {
        self.statistics.revisions += 1;
        arc_consistency::revise(self.puzzle, self.vocabulary, &mut self.domains, x, y)
    }

    /// Run AC-3 over the given arcs (or all of them), folding its work into our statistics.
    pub fn ac3(&mut self, arcs: Option<Vec<Arc>>) -> ArcConsistencyResult {
        let result = arc_consistency::ac3(self.puzzle, self.vocabulary, &mut self.domains, arcs);
        self.statistics.revisions += match &result {
            Ok(success) => success.revisions,
            Err(failure) => failure.revisions,
        };
        result
    }

    pub fn assignment_complete(&self, assignment: &Assignment) -> bool {
        (0..self.puzzle.slot_count()).all(|slot_id| assignment.contains(slot_id))
    }

    /// Check every assigned slot from scratch: no word used twice, every word the right length,
    /// and every pair of assigned crossing slots agreeing on their shared letter.
    pub fn consistent(&self, assignment: &Assignment) -> bool {
        let mut used: HashSet<WordId> = HashSet::with_capacity(assignment.len());

        // Lengths first, so the crossing checks below only ever see words that fit their slots.
        for (slot_id, word_id) in assignment.iter() {
            if !used.insert(word_id) {
                return false;
            }
            if self.vocabulary.word(word_id).len() != self.puzzle.slot(slot_id).length {
                return false;
            }
        }

        for (slot_id, word_id) in assignment.iter() {
            let word = self.vocabulary.word(word_id);
            for neighbor_id in self.puzzle.neighbors(slot_id).iter() {
                let neighbor_word_id = match assignment.get(neighbor_id) {
                    Some(neighbor_word_id) => neighbor_word_id,
                    None => continue,
                };
                if let Some((i, j)) = self.puzzle.overlap(slot_id, neighbor_id) {
                    if word.glyph(i) != self.vocabulary.word(neighbor_word_id).glyph(j) {
                        return false;
                    }
                }
            }
        }

        true
    }

    /// Pick the unassigned slot with the fewest remaining words, breaking ties in favor of the slot
    /// with the most crossings and then the lowest id. `None` once everything is assigned.
    pub fn select_unassigned_variable(&self, assignment: &Assignment) -> Option<SlotId> {
        (0..self.puzzle.slot_count())
            .filter(|&slot_id| !assignment.contains(slot_id))
            .min_by_key(|&slot_id| (self.domains.len(slot_id), Reverse(self.puzzle.degree(slot_id))))
    }

    /// The slot's remaining words, ordered by how many words each would rule out across the
    /// unassigned crossing slots (fewest first). Ties keep alphabetical order.
    pub fn order_domain_values(&self, slot_id: SlotId, assignment: &Assignment) -> Vec<WordId> {
        // For each unassigned crossing: the cell index in our word, the size of the crossing
        // slot's domain, and how many of its words have each letter in the shared cell. A word
        // rules out every crossing word that doesn't share its letter.
        let crossings: SmallVec<[(usize, usize, HashMap<char, usize>); MAX_SLOT_LENGTH]> = self
            .puzzle
            .neighbors(slot_id)
            .iter()
            .filter(|&neighbor_id| !assignment.contains(neighbor_id))
            .filter_map(|neighbor_id| {
                let (i, j) = self.puzzle.overlap(slot_id, neighbor_id)?;
                let mut glyph_counts: HashMap<char, usize> = HashMap::new();
                for word_id in self.domains.get(neighbor_id).iter() {
                    if let Some(glyph) = self.vocabulary.word(word_id).glyph(j) {
                        *glyph_counts.entry(glyph).or_insert(0) += 1;
                    }
                }
                Some((i, self.domains.len(neighbor_id), glyph_counts))
            })
            .collect();

        let mut values: Vec<WordId> = self.domains.get(slot_id).iter().collect();
        values.sort_by_cached_key(|&word_id| {
            let word = self.vocabulary.word(word_id);
            crossings
                .iter()
                .map(|(i, total, glyph_counts)| {
                    let compatible = word.glyph(*i).and_then(|glyph| glyph_counts.get(&glyph));
                    total - compatible.copied().unwrap_or(0)
                })
                .sum::<usize>()
        });
        values
    }

    /// Depth-first search for a complete, consistent extension of `assignment`. The first one
    /// found is returned.
    pub fn backtrack(&mut self, assignment: &Assignment) -> Option<Assignment> {
        self.statistics.states += 1;

        if self.assignment_complete(assignment) {
            return Some(assignment.clone());
        }

        let slot_id = self.select_unassigned_variable(assignment)?;
        trace!(
            "Filling {} ({} options, {} assigned)",
            self.puzzle.slot(slot_id),
            self.domains.len(slot_id),
            assignment.len()
        );

        for word_id in self.order_domain_values(slot_id, assignment) {
            let extended = assignment.with(slot_id, word_id);

            self.statistics.consistency_checks += 1;
            if !self.consistent(&extended) {
                continue;
            }
            trace!("Trying {} in {}", self.vocabulary.word(word_id).string, self.puzzle.slot(slot_id));

            let result = if self.options.inference {
                self.backtrack_with_inference(slot_id, word_id, &extended)
            } else {
                self.backtrack(&extended)
            };

            if result.is_some() {
                return result;
            }
        }

        self.statistics.backtracks += 1;
        None
    }

    /// Narrow `slot_id` down to `word_id`, propagate that into the unassigned crossing slots, and
    /// keep searching. The domains are put back exactly as they were before returning.
    fn backtrack_with_inference(
        &mut self,
        slot_id: SlotId,
        word_id: WordId,
        assignment: &Assignment,
    ) -> Option<Assignment> {
        let snapshot = self.domains.clone();
        self.domains.restrict(slot_id, word_id);

        let arcs: Vec<Arc> = self
            .puzzle
            .neighbors(slot_id)
            .iter()
            .filter(|&neighbor_id| !assignment.contains(neighbor_id))
            .map(|neighbor_id| (neighbor_id, slot_id))
            .collect();

        let result = match self.ac3(Some(arcs)) {
            Ok(_) => self.backtrack(assignment),
            Err(failure) => {
                trace!("Choice empties {}, skipping", self.puzzle.slot(failure.slot_id));
                None
            }
        };

        self.domains = snapshot;
        result
    }

    /// Enforce node and arc consistency, then search. Stops before searching if either pass
    /// leaves a slot with no possible words.
    pub fn solve(&mut self) -> Result<FillSuccess, FillFailure> {
        let start = Instant::now();
        info!(
            "Filling {} slots from {} words (inference: {})",
            self.puzzle.slot_count(),
            self.vocabulary.len(),
            self.options.inference
        );

        let result = self.solve_impl();
        self.statistics.duration = start.elapsed();

        match &result {
            Ok(_) => info!("Found a fill: {:?}", self.statistics),
            Err(failure) => info!("No fill ({:?}): {:?}", failure, self.statistics),
        }

        result.map(|assignment| FillSuccess {
            statistics: self.statistics.clone(),
            choices: assignment
                .iter()
                .map(|(slot_id, word_id)| Choice {
                    slot: *self.puzzle.slot(slot_id),
                    word: self.vocabulary.word(word_id).string.clone(),
                })
                .collect(),
        })
    }

    fn solve_impl(&mut self) -> Result<Assignment, FillFailure> {
        self.enforce_node_consistency();
        if let Some(slot_id) = self.domains.first_empty() {
            return Err(FillFailure::UnsatisfiableDomain(*self.puzzle.slot(slot_id)));
        }

        match self.ac3(None) {
            Ok(success) => debug!(
                "Arc consistency removed {} words in {} revisions",
                success.eliminations, success.revisions
            ),
            Err(failure) => {
                return Err(FillFailure::UnsatisfiableDomain(*self.puzzle.slot(failure.slot_id)));
            }
        }

        self.backtrack(&Assignment::new()).ok_or(FillFailure::SearchExhausted)
    }
}
