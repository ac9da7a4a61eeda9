//! Fill crossword grids from a dictionary by treating each slot as a variable in a constraint
//! satisfaction problem: node and arc consistency prune the candidate words, then a backtracking
//! search assigns words slot by slot.

pub mod arc_consistency;
pub mod backtracking_search;
pub mod cli;
pub mod domains;
pub mod error;
pub mod grid_config;
pub mod render;
pub mod word_list;

pub use backtracking_search::{find_fill, solve, Assignment, FillFailure, FillSuccess};
pub use error::{PuzzleError, Result};
pub use grid_config::{Direction, GridConfig, Variable};

/// Should we run extra checks to validate that we're never in an invalid state during search? This
/// can be enabled with `--features check_invariants` when debugging or making risky algorithm
/// changes.
pub const CHECK_INVARIANTS: bool = cfg!(feature = "check_invariants");

/// The expected maximum number of distinct characters appearing in a dictionary.
pub const MAX_GLYPH_COUNT: usize = 256;

/// The expected maximum length for a single slot.
pub const MAX_SLOT_LENGTH: usize = 21;
