//! This module implements grid-filling using a backtracking search that maintains arc consistency.
//! Slots are chosen by fewest remaining values with ties broken by degree, and words are tried in
//! least-constraining order. Each tentative choice is propagated with an AC-3 pass seeded from the
//! arcs pointing at the chosen slot, and undone by restoring a snapshot if anything below it fails.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashSet};
use instant::{Duration, Instant};
use log::{debug, info, trace};
use smallvec::SmallVec;

use crate::arc_consistency::{ac3, enforce_node_consistency, Arc};
use crate::domains::Domains;
use crate::grid_config::{GridConfig, SlotId, Variable};
use crate::word_list::WordId;
use crate::{CHECK_INVARIANTS, MAX_SLOT_LENGTH};

/// A struct recording a slot assignment made during the filling process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub slot_id: SlotId,
    pub word_id: WordId,
}

/// A partial or complete mapping from slots to the words chosen for them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    choices: BTreeMap<SlotId, WordId>,
}

impl Assignment {
    pub fn new() -> Assignment {
        Assignment::default()
    }

    /// Put a word in a slot, returning the word it replaced, if any.
    pub fn assign(&mut self, slot_id: SlotId, word_id: WordId) -> Option<WordId> {
        self.choices.insert(slot_id, word_id)
    }

    pub fn get(&self, slot_id: SlotId) -> Option<WordId> {
        self.choices.get(&slot_id).copied()
    }

    pub fn contains(&self, slot_id: SlotId) -> bool {
        self.choices.contains_key(&slot_id)
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Does every slot in the grid have a word?
    pub fn is_complete(&self, config: &GridConfig) -> bool {
        self.choices.len() == config.slot_count()
    }

    /// The choices made so far, in slot id order.
    pub fn choices(&self) -> impl Iterator<Item=Choice> + '_ {
        self.choices.iter().map(|(&slot_id, &word_id)| Choice { slot_id, word_id })
    }

    /// The choices made so far as variables and the words assigned to them.
    pub fn words<'a>(
        &'a self,
        config: &'a GridConfig,
    ) -> impl Iterator<Item=(&'a Variable, &'a str)> + 'a {
        self.choices.iter().map(move |(&slot_id, &word_id)| {
            (config.variable(slot_id), config.word(word_id).string.as_str())
        })
    }

    pub fn word_map(&self, config: &GridConfig) -> BTreeMap<Variable, String> {
        self.words(config).map(|(variable, word)| (*variable, word.to_string())).collect()
    }
}

/// A struct tracking statistics about the filling process.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    /// Search nodes visited, including the root.
    pub states: u64,

    /// Tentative choices that were rejected or rolled back.
    pub backtracks: u64,
    pub duration: Duration,
}

/// A struct representing the results of a fill operation.
#[derive(Debug)]
pub struct FillSuccess {
    pub statistics: Statistics,
    pub assignment: Assignment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillFailure {
    /// No assignment satisfies the grid with the given dictionary.
    Unsatisfiable,
}

/// Is this (possibly partial) assignment valid? Every word must fit its slot, crossing slots that
/// are both filled must agree on their shared letter, and no word can be used twice.
pub fn consistent(config: &GridConfig, assignment: &Assignment) -> bool {
    for Choice { slot_id, word_id } in assignment.choices() {
        let word = config.word(word_id);
        if word.len() != config.variable(slot_id).length {
            return false;
        }

        for &neighbor in config.neighbors(slot_id) {
            let (Some(neighbor_word_id), Some((cell, neighbor_cell))) =
                (assignment.get(neighbor), config.overlap(slot_id, neighbor)) else {
                continue;
            };

            if word.glyphs.get(cell) != config.word(neighbor_word_id).glyphs.get(neighbor_cell) {
                return false;
            }
        }
    }

    let distinct_words: HashSet<WordId> =
        assignment.choices().map(|choice| choice.word_id).collect();
    distinct_words.len() == assignment.len()
}

/// Choose the next slot to fill: the unassigned slot with the fewest remaining words, preferring
/// slots that cross more other slots when that's tied. Returns None once everything is assigned.
pub fn select_unassigned_variable(
    config: &GridConfig,
    assignment: &Assignment,
    domains: &Domains,
) -> Option<SlotId> {
    (0..config.slot_count())
        .filter(|&slot_id| !assignment.contains(slot_id))
        .min_by_key(|&slot_id| (domains.len(slot_id), Reverse(config.degree(slot_id))))
}

/// Return the words in a slot's domain, least constraining first. A word's cost is the number of
/// unassigned crossing slots that still have that exact word available, since choosing it here
/// takes it away from them. Words with equal cost keep their dictionary order.
pub fn order_domain_values(
    config: &GridConfig,
    slot_id: SlotId,
    assignment: &Assignment,
    domains: &Domains,
) -> Vec<WordId> {
    let unassigned_neighbors: SmallVec<[SlotId; MAX_SLOT_LENGTH]> = config.neighbors(slot_id).iter()
        .filter(|&&neighbor| !assignment.contains(neighbor))
        .cloned()
        .collect();

    let mut values: Vec<WordId> = domains.get(slot_id).iter().collect();
    values.sort_by_cached_key(|&word_id| {
        unassigned_neighbors.iter().filter(|&&neighbor| domains.contains(neighbor, word_id)).count()
    });
    values
}

/// Extend `assignment` to a complete, consistent assignment if one exists. On failure, both
/// `assignment` and `domains` are left exactly as they were passed in.
///
/// Before propagating a tentative word, the chosen slot's domain is narrowed to that word, so the
/// incremental AC-3 pass prunes against the choice rather than the slot's whole domain.
pub fn backtrack(
    config: &GridConfig,
    assignment: &mut Assignment,
    domains: &mut Domains,
    statistics: &mut Statistics,
) -> Option<Assignment> {
    statistics.states += 1;

    if CHECK_INVARIANTS {
        assert!(consistent(config, assignment), "Search reached an inconsistent assignment");
    }

    if assignment.is_complete(config) {
        return Some(assignment.clone());
    }

    let slot_id = select_unassigned_variable(config, assignment, domains)?;

    let saved_assignment = assignment.clone();
    let saved_domains = domains.snapshot();

    for word_id in order_domain_values(config, slot_id, assignment, domains) {
        trace!(
            "Trying {} in {} at depth {}",
            config.word(word_id).string, config.variable(slot_id), saved_assignment.len(),
        );
        assignment.assign(slot_id, word_id);

        if consistent(config, assignment) {
            // The chosen slot now holds exactly one word; propagate that to everything crossing it.
            domains.set_single(slot_id, word_id);
            let arcs: Vec<Arc> = config.neighbors(slot_id).iter()
                .map(|&neighbor| (neighbor, slot_id))
                .collect();

            if ac3(config, domains, Some(arcs)) {
                if let Some(result) = backtrack(config, assignment, domains, statistics) {
                    return Some(result);
                }
            }
        }

        statistics.backtracks += 1;
        assignment.clone_from(&saved_assignment);
        domains.clone_from(&saved_domains);
    }

    *assignment = saved_assignment;
    domains.restore(saved_domains);
    None
}

/// Search for a valid fill for the given grid, reporting statistics about the search.
pub fn find_fill(config: &GridConfig) -> Result<FillSuccess, FillFailure> {
    let start = Instant::now();
    let mut statistics = Statistics::default();

    let mut domains = Domains::new(config);
    enforce_node_consistency(config, &mut domains);

    if !ac3(config, &mut domains, None) {
        statistics.duration = start.elapsed();
        debug!("Initial arc consistency left a slot without options; no fill exists");
        return Err(FillFailure::Unsatisfiable);
    }

    info!(
        "Searching {} slots with {} words after initial propagation",
        config.slot_count(),
        (0..config.slot_count()).map(|slot_id| domains.len(slot_id)).sum::<usize>(),
    );

    let result = backtrack(config, &mut Assignment::new(), &mut domains, &mut statistics);
    statistics.duration = start.elapsed();

    match result {
        Some(assignment) => {
            debug!("Found a fill: {:?}", statistics);
            Ok(FillSuccess { statistics, assignment })
        }
        None => {
            debug!("Search exhausted without a fill: {:?}", statistics);
            Err(FillFailure::Unsatisfiable)
        }
    }
}

/// Fill the grid, returning the assignment if one exists.
pub fn solve(config: &GridConfig) -> Option<Assignment> {
    find_fill(config).ok().map(|success| success.assignment)
}
