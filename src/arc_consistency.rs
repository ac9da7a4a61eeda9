//! Unary and binary consistency over the slot domains: node consistency removes words of the wrong
//! length, and AC-3 removes words that have no compatible partner in some crossing slot.

use std::collections::{HashSet, VecDeque};
use bit_set::BitSet;
use log::{debug, trace};

use crate::domains::Domains;
use crate::grid_config::{GridConfig, SlotId};

/// An ordered pair of crossing slots `(x, y)`, meaning "make `x` consistent with `y`".
pub type Arc = (SlotId, SlotId);

/// Data structure used in `ac3` to track which arcs we still need to revise. An arc that's already
/// waiting in the queue isn't added a second time.
#[derive(Debug)]
struct ConsistencyQueue {
    queue: VecDeque<Arc>,
    queued: HashSet<Arc>,
}

impl ConsistencyQueue {
    fn with_initial_queue<Items>(items: Items) -> ConsistencyQueue
        where
            Items: IntoIterator<Item=Arc>
    {
        let mut queue = ConsistencyQueue { queue: VecDeque::new(), queued: HashSet::new() };
        for arc in items {
            queue.enqueue(arc);
        }
        queue
    }

    fn pop_front(&mut self) -> Option<Arc> {
        let arc = self.queue.pop_front()?;
        self.queued.remove(&arc);
        Some(arc)
    }

    fn enqueue(&mut self, arc: Arc) {
        if self.queued.insert(arc) {
            self.queue.push_back(arc);
        }
    }
}

/// Remove every word whose length differs from its slot's length.
pub fn enforce_node_consistency(config: &GridConfig, domains: &mut Domains) {
    for slot_config in &config.slot_configs {
        let length = slot_config.variable.length;
        domains.retain(slot_config.id, |word_id| config.word(word_id).len() == length);
    }
}

/// Make slot `x` arc-consistent with slot `y`: drop every word in `x`'s domain that doesn't share
/// its overlap letter with at least one word in `y`'s current domain. Returns whether anything was
/// dropped. `x` and `y` must cross.
pub fn revise(config: &GridConfig, domains: &mut Domains, x: SlotId, y: SlotId) -> bool {
    let overlap = config.overlap(x, y);
    debug_assert!(overlap.is_some(), "revise called on slots {x} and {y}, which don't cross");
    let Some((x_cell, y_cell)) = overlap else {
        return false;
    };

    // Which glyphs can `y` still put in the shared cell?
    let mut supported_glyphs = BitSet::with_capacity(config.word_list.glyphs.len());
    for word_id in domains.get(y) {
        if let Some(&glyph) = config.word(word_id).glyphs.get(y_cell) {
            supported_glyphs.insert(glyph);
        }
    }

    domains.retain(x, |word_id| {
        config.word(word_id).glyphs.get(x_cell)
            .map(|&glyph| supported_glyphs.contains(glyph))
            .unwrap_or(false)
    })
}

/// Every arc in the puzzle: one per ordered pair of crossing slots.
pub fn all_arcs(config: &GridConfig) -> Vec<Arc> {
    config.slot_configs.iter().flat_map(|slot_config| {
        slot_config.neighbors.iter().map(move |&neighbor| (slot_config.id, neighbor))
    }).collect()
}

/// Propagate arc consistency until nothing changes. The queue starts with `arcs` if given, or with
/// every arc in the puzzle otherwise. Returns false as soon as any domain is emptied, leaving the
/// remaining arcs unprocessed.
pub fn ac3(config: &GridConfig, domains: &mut Domains, arcs: Option<Vec<Arc>>) -> bool {
    let mut queue = ConsistencyQueue::with_initial_queue(
        arcs.unwrap_or_else(|| all_arcs(config))
    );
    let mut revisions: usize = 0;

    while let Some((x, y)) = queue.pop_front() {
        if !revise(config, domains, x, y) {
            continue;
        }
        revisions += 1;

        if domains.is_empty(x) {
            debug!(
                "AC-3 emptied the domain of {} after {} revisions", config.variable(x), revisions,
            );
            return false;
        }

        // A word just removed from `x` may have been the only support for something in a slot
        // crossing `x`, so those slots need to be rechecked against `x`.
        for &neighbor in config.neighbors(x) {
            if neighbor != y {
                queue.enqueue((neighbor, x));
            }
        }
    }

    trace!("AC-3 reached a fixpoint after {} revisions", revisions);
    true
}

#[cfg(test)]
mod tests {
    use crate::arc_consistency::{ac3, all_arcs, enforce_node_consistency, revise};
    use crate::domains::Domains;
    use crate::grid_config::{generate_grid_config, Direction, GridConfig, GridEntry};
    use crate::word_list::WordList;

    /// Two 3-letter slots crossing at their middle cells.
    fn plus_config(words: &[&str]) -> GridConfig {
        generate_grid_config(WordList::new(words), &[
            GridEntry { row: 1, col: 0, len: 3, dir: Direction::Across },
            GridEntry { row: 0, col: 1, len: 3, dir: Direction::Down },
        ]).unwrap()
    }

    fn domain_strings(config: &GridConfig, domains: &Domains, slot_id: usize) -> Vec<String> {
        domains.get(slot_id).iter().map(|word_id| config.word(word_id).string.clone()).collect()
    }

    /// Every word left in `x` has a partner in every crossing slot.
    fn assert_arc_consistent(config: &GridConfig, domains: &Domains) {
        for (x, y) in all_arcs(config) {
            let (x_cell, y_cell) = config.overlap(x, y).unwrap();
            for word_id in domains.get(x) {
                let glyph = config.word(word_id).glyphs[x_cell];
                assert!(
                    domains.get(y).iter().any(|other| config.word(other).glyphs[y_cell] == glyph),
                    "{} in slot {} has no support in slot {}", config.word(word_id).string, x, y,
                );
            }
        }
    }

    #[test]
    fn test_node_consistency_keeps_only_matching_lengths() {
        let config = plus_config(&["cat", "horse", "ox", "dog"]);
        let mut domains = Domains::new(&config);

        enforce_node_consistency(&config, &mut domains);

        for slot_id in 0..config.slot_count() {
            assert_eq!(domain_strings(&config, &domains, slot_id), vec!["CAT", "DOG"]);
            for word_id in domains.get(slot_id) {
                assert_eq!(config.word(word_id).len(), config.variable(slot_id).length);
            }
        }
    }

    #[test]
    fn test_node_consistency_is_idempotent() {
        let config = plus_config(&["cat", "horse", "ox", "dog"]);
        let mut once = Domains::new(&config);
        enforce_node_consistency(&config, &mut once);

        let mut twice = once.clone();
        enforce_node_consistency(&config, &mut twice);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_revise_removes_unsupported_words() {
        let config = plus_config(&["cat", "bat", "oil", "tie"]);
        let mut domains = Domains::new(&config);
        domains.retain(1, |word_id| config.word(word_id).string == "OIL");

        assert!(revise(&config, &mut domains, 0, 1));
        assert_eq!(domain_strings(&config, &domains, 0), vec!["OIL", "TIE"]);

        // Nothing left to remove the second time.
        assert!(!revise(&config, &mut domains, 0, 1));
    }

    #[test]
    fn test_revise_only_touches_first_slot() {
        let config = plus_config(&["cat", "dog"]);
        let mut domains = Domains::new(&config);
        domains.retain(1, |word_id| config.word(word_id).string == "CAT");

        assert!(revise(&config, &mut domains, 0, 1));
        assert_eq!(domain_strings(&config, &domains, 0), vec!["CAT"]);
        assert_eq!(domain_strings(&config, &domains, 1), vec!["CAT"]);
    }

    #[test]
    fn test_ac3_reaches_consistent_fixpoint() {
        // The across slot's middle cell is the down slot's first cell.
        let config = generate_grid_config(WordList::new(["cat", "axe", "dog", "horse"]), &[
            GridEntry { row: 0, col: 0, len: 3, dir: Direction::Across },
            GridEntry { row: 0, col: 1, len: 3, dir: Direction::Down },
        ]).unwrap();
        let mut domains = Domains::new(&config);
        enforce_node_consistency(&config, &mut domains);

        assert!(ac3(&config, &mut domains, None));
        assert_arc_consistent(&config, &domains);
        assert_eq!(domain_strings(&config, &domains, 0), vec!["CAT"]);
        assert_eq!(domain_strings(&config, &domains, 1), vec!["AXE"]);
    }

    #[test]
    fn test_ac3_fails_when_a_domain_empties() {
        let config = plus_config(&["cat", "tie", "act"]);
        let mut domains = Domains::new(&config);
        enforce_node_consistency(&config, &mut domains);
        domains.retain(0, |word_id| config.word(word_id).string != "TIE");
        domains.retain(1, |word_id| config.word(word_id).string == "TIE");

        assert!(!ac3(&config, &mut domains, None));
        assert!(domains.is_empty(0));
    }

    #[test]
    fn test_ac3_with_explicit_arcs_only_starts_from_those_arcs() {
        let config = plus_config(&["cat", "bat", "oil"]);
        let mut domains = Domains::new(&config);
        enforce_node_consistency(&config, &mut domains);
        domains.retain(1, |word_id| config.word(word_id).string == "OIL");

        // Revising slot 1 against slot 0 removes nothing, so nothing is propagated back.
        assert!(ac3(&config, &mut domains, Some(vec![(1, 0)])));
        assert_eq!(domains.len(0), 3);

        assert!(ac3(&config, &mut domains, Some(vec![(0, 1)])));
        assert_eq!(domain_strings(&config, &domains, 0), vec!["OIL"]);
    }

    #[test]
    fn test_ac3_with_no_arcs_changes_nothing() {
        let config = plus_config(&["cat", "dog"]);
        let mut domains = Domains::new(&config);
        domains.retain(1, |word_id| config.word(word_id).string == "CAT");
        let before = domains.clone();

        assert!(ac3(&config, &mut domains, Some(vec![])));
        assert_eq!(domains, before);
    }
}
