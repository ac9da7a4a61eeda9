use bit_set::BitSet;

use crate::grid_config::{GridConfig, SlotId};
use crate::word_list::WordId;

/// The live set of candidate words for each slot, indexed by slot id. This is the only state that
/// propagation and search mutate; backtracking saves and restores it wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domains {
    domains: Vec<BitSet>,
}

impl Domains {
    /// Every slot starts out with the full dictionary, each in its own set.
    pub fn new(config: &GridConfig) -> Domains {
        let word_count = config.word_count();
        let full: BitSet = (0..word_count).collect();

        Domains {
            domains: (0..config.slot_count()).map(|_| full.clone()).collect(),
        }
    }

    pub fn get(&self, slot_id: SlotId) -> &BitSet {
        &self.domains[slot_id]
    }

    pub fn contains(&self, slot_id: SlotId, word_id: WordId) -> bool {
        self.domains[slot_id].contains(word_id)
    }

    /// Number of candidates left for the slot.
    pub fn len(&self, slot_id: SlotId) -> usize {
        self.domains[slot_id].len()
    }

    pub fn is_empty(&self, slot_id: SlotId) -> bool {
        self.domains[slot_id].is_empty()
    }

    /// Remove a word from a slot's domain. Removing a word that isn't there does nothing.
    pub fn remove(&mut self, slot_id: SlotId, word_id: WordId) -> bool {
        self.domains[slot_id].remove(word_id)
    }

    /// Keep only the words for which `keep` returns true, returning whether anything was removed.
    pub fn retain<F>(&mut self, slot_id: SlotId, mut keep: F) -> bool
        where
            F: FnMut(WordId) -> bool
    {
        let removed: Vec<WordId> = self.domains[slot_id].iter()
            .filter(|&word_id| !keep(word_id))
            .collect();

        for &word_id in &removed {
            self.domains[slot_id].remove(word_id);
        }

        !removed.is_empty()
    }

    /// Reduce a slot's domain to just the given word.
    pub fn set_single(&mut self, slot_id: SlotId, word_id: WordId) {
        let domain = &mut self.domains[slot_id];
        domain.clear();
        domain.insert(word_id);
    }

    /// Copy out the whole state so it can be put back with `restore`.
    pub fn snapshot(&self) -> Domains {
        self.clone()
    }

    pub fn restore(&mut self, snapshot: Domains) {
        *self = snapshot;
    }
}
