use std::collections::HashMap;

use bit_set::BitSet;
use smallvec::SmallVec;

use crate::{GridCoord, Slot, SlotId};

/// The static shape of the problem: every slot, which slots cross which, and where. Built once and
/// read-only afterwards.
#[derive(Debug, Clone)]
pub struct Puzzle {
    slots: Vec<Slot>,
    slot_ids: HashMap<Slot, SlotId>,
    neighbors: Vec<BitSet>,

    /// Keyed by both `(a, b)` and `(b, a)`, with mirrored offsets.
    overlaps: HashMap<(SlotId, SlotId), (usize, usize)>,
}

impl Puzzle {
    /// Build a puzzle from a collection of slots. Slots are sorted into their natural order (which
    /// determines their ids) and duplicates are dropped.
    pub fn new<I: IntoIterator<Item = Slot>>(slots: I) -> Puzzle {
        let mut slots: Vec<Slot> = slots.into_iter().collect();
        slots.sort();
        slots.dedup();

        let slot_ids = slots.iter().enumerate().map(|(id, &slot)| (slot, id)).collect();

        // Build a map from cell location to slots involved, which we can then use to calculate
        // crossings without comparing every pair of slots.
        let mut slots_by_cell: HashMap<GridCoord, SmallVec<[(SlotId, usize); 2]>> = HashMap::new();
        for (slot_id, slot) in slots.iter().enumerate() {
            for (cell_idx, cell) in slot.cells().into_iter().enumerate() {
                slots_by_cell.entry(cell).or_default().push((slot_id, cell_idx));
            }
        }

        let mut neighbors: Vec<BitSet> =
            slots.iter().map(|_| BitSet::with_capacity(slots.len())).collect();
        let mut overlaps = HashMap::new();

        for (slot_id, slot) in slots.iter().enumerate() {
            for (cell_idx, cell) in slot.cells().into_iter().enumerate() {
                for &(other_slot_id, other_cell_idx) in &slots_by_cell[&cell] {
                    // Only record each pair from its lower id, so the two directions always mirror
                    // each other even if a malformed input shares more than one cell.
                    if other_slot_id <= slot_id || overlaps.contains_key(&(slot_id, other_slot_id)) {
                        continue;
                    }

                    overlaps.insert((slot_id, other_slot_id), (cell_idx, other_cell_idx));
                    overlaps.insert((other_slot_id, slot_id), (other_cell_idx, cell_idx));
                    neighbors[slot_id].insert(other_slot_id);
                    neighbors[other_slot_id].insert(slot_id);
                }
            }
        }

        Puzzle { slots, slot_ids, neighbors, overlaps }
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn slot(&self, slot_id: SlotId) -> &Slot {
        &self.slots[slot_id]
    }

    /// Look up the id of a slot. Asking about a slot that isn't part of this puzzle is a bug in the
    /// caller, so this panics rather than returning an `Option`.
    pub fn slot_id(&self, slot: &Slot) -> SlotId {
        match self.slot_ids.get(slot) {
            Some(&slot_id) => slot_id,
            None => panic!("Slot {} is not part of this puzzle", slot),
        }
    }

    /// The slots that cross the given slot.
    pub fn neighbors(&self, slot_id: SlotId) -> &BitSet {
        &self.neighbors[slot_id]
    }

    /// Number of crossing slots, used as the tie-breaker when choosing which slot to fill next.
    pub fn degree(&self, slot_id: SlotId) -> usize {
        self.neighbors[slot_id].len()
    }

    /// The `(i, j)` offsets at which the two slots share a cell, meaning letter `i` of `a`'s word
    /// must equal letter `j` of `b`'s word. `None` if they don't cross (or are the same slot).
    pub fn overlap(&self, a: SlotId, b: SlotId) -> Option<(usize, usize)> {
        assert!(
            a < self.slots.len() && b < self.slots.len(),
            "Slot id out of range: ({}, {}) with {} slots",
            a,
            b,
            self.slots.len()
        );
        self.overlaps.get(&(a, b)).copied()
    }

    /// Every directed arc `(x, y)` where `y` crosses `x`, in slot id order.
    pub fn arcs(&self) -> Vec<(SlotId, SlotId)> {
        (0..self.slots.len())
            .flat_map(|x| self.neighbors[x].iter().map(move |y| (x, y)))
            .collect()
    }
}
