use std::collections::HashMap;
use std::fmt;
use std::fmt::{Debug, Formatter};
use smallvec::SmallVec;

use crate::error::{PuzzleError, Result};
use crate::word_list::{Word, WordId, WordList};
use crate::MAX_SLOT_LENGTH;

/// An identifier for a given slot, based on its index in the GridConfig's `slot_configs` field.
pub type SlotId = usize;

/// Zero-indexed row and column for a cell in the grid, where row 0 is the top row.
pub type GridCoord = (usize, usize);

/// The cell offsets at which two slots must hold the same letter: the first offset is into the
/// slot the overlap was looked up from, the second into the other slot.
pub type Overlap = (usize, usize);

/// Direction that a slot is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Across,
    Down,
}

/// A single slot in the puzzle. Two variables are the same slot iff they start at the same cell,
/// run the same way, and have the same length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub length: usize,
}

impl Variable {
    pub fn new(row: usize, col: usize, direction: Direction, length: usize) -> Variable {
        Variable { row, col, direction, length }
    }

    /// Generate the coords for each cell of this slot.
    pub fn cells(&self) -> impl Iterator<Item=GridCoord> + '_ {
        (0..self.length).map(move |cell_idx| {
            match self.direction {
                Direction::Across => (self.row, self.col + cell_idx),
                Direction::Down => (self.row + cell_idx, self.col),
            }
        })
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            Direction::Across => "across",
            Direction::Down => "down",
        };
        write!(f, "({}, {}) {} : {}", self.row, self.col, direction, self.length)
    }
}

/// A struct representing a crossing between one slot and another, referencing the other slot's id
/// and the location of the intersection within the other slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crossing {
    pub other_slot_id: SlotId,
    pub other_slot_cell: usize,
}

/// A struct representing the aspects of a slot in the grid that are static during filling.
pub struct SlotConfig {
    pub id: SlotId,
    pub variable: Variable,

    /// One entry per cell; `Some` where another slot passes through that cell.
    pub crossings: SmallVec<[Option<Crossing>; MAX_SLOT_LENGTH]>,

    /// Ids of every slot crossing this one, in cell order.
    pub neighbors: SmallVec<[SlotId; MAX_SLOT_LENGTH]>,
}

impl Debug for SlotConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotConfig")
            .field("id", &self.id)
            .field("variable", &self.variable)
            .field("neighbors", &self.neighbors)
            .finish()
    }
}

/// A struct representing the aspects of a puzzle that are static during filling: the grid
/// geometry, the slots and their crossings, and the dictionary.
pub struct GridConfig {
    pub width: usize,
    pub height: usize,

    /// `structure[row][col]` is true for open cells.
    pub structure: Vec<Vec<bool>>,
    pub slot_configs: Vec<SlotConfig>,
    pub word_list: WordList,
}

impl Debug for GridConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridConfig")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("slot_configs", &self.slot_configs)
            .field("words", &(["(", &self.word_list.len().to_string(), " entries)"].join("")))
            .finish()
    }
}

impl GridConfig {
    pub fn slot_count(&self) -> usize {
        self.slot_configs.len()
    }

    pub fn variable(&self, slot_id: SlotId) -> &Variable {
        &self.slot_configs[slot_id].variable
    }

    /// All variables in slot id order.
    pub fn variables(&self) -> impl Iterator<Item=&Variable> + '_ {
        self.slot_configs.iter().map(|slot_config| &slot_config.variable)
    }

    /// Look up the id of a slot from its variable.
    pub fn slot_id(&self, variable: &Variable) -> Option<SlotId> {
        self.slot_configs.iter().position(|slot_config| &slot_config.variable == variable)
    }

    pub fn neighbors(&self, slot_id: SlotId) -> &[SlotId] {
        &self.slot_configs[slot_id].neighbors
    }

    /// Number of slots crossing this one.
    pub fn degree(&self, slot_id: SlotId) -> usize {
        self.slot_configs[slot_id].neighbors.len()
    }

    /// The overlap between `x` and `y`, if they cross. The first offset is into `x`.
    pub fn overlap(&self, x: SlotId, y: SlotId) -> Option<Overlap> {
        self.slot_configs[x].crossings.iter().enumerate().find_map(|(cell_idx, crossing)| {
            crossing
                .filter(|crossing| crossing.other_slot_id == y)
                .map(|crossing| (cell_idx, crossing.other_slot_cell))
        })
    }

    pub fn word(&self, word_id: WordId) -> &Word {
        self.word_list.word(word_id)
    }

    pub fn word_count(&self) -> usize {
        self.word_list.len()
    }
}

/// An across or down entry in the input to `generate_grid_config`.
#[derive(Debug, Clone)]
pub struct GridEntry {
    pub row: usize,
    pub col: usize,
    pub len: usize,
    pub dir: Direction,
}

/// Generate a GridConfig representing a grid with the specified entries. Every cell covered by an
/// entry is open; everything else is blocked.
pub fn generate_grid_config(word_list: WordList, entries: &[GridEntry]) -> Result<GridConfig> {
    let variables: Vec<Variable> = entries.iter()
        .map(|entry| Variable::new(entry.row, entry.col, entry.dir, entry.len))
        .collect();

    let cells = || variables.iter().flat_map(|v| v.cells());
    let height = cells().map(|(row, _)| row + 1).max().unwrap_or(0);
    let width = cells().map(|(_, col)| col + 1).max().unwrap_or(0);

    let mut structure = vec![vec![false; width]; height];
    for (row, col) in cells() {
        structure[row][col] = true;
    }

    build_grid_config(word_list, width, height, structure, variables)
}

/// Generate a grid config from a structure template, with `_` or `.` representing open cells and
/// anything else (including spaces) representing blocks. Blank lines before the first row and after
/// the last are ignored; every line in between is a row. Rows shorter than the widest row are
/// padded with blocks.
pub fn generate_grid_config_from_template_string(
    word_list: WordList,
    template: &str,
) -> Result<GridConfig> {
    let lines: Vec<&str> = template.lines().collect();
    let has_cells = |line: &&str| !line.trim().is_empty();

    let (Some(first), Some(last)) = (
        lines.iter().position(has_cells),
        lines.iter().rposition(has_cells),
    ) else {
        return Err(PuzzleError::EmptyStructure);
    };

    let template: Vec<Vec<char>> = lines[first..=last].iter()
        .map(|line| line.chars().collect())
        .collect();

    let height = template.len();
    let width = template.iter().map(|line| line.len()).max().unwrap_or(0);

    let structure: Vec<Vec<bool>> = template.iter().map(|line| {
        (0..width).map(|col| matches!(line.get(col), Some('_') | Some('.'))).collect()
    }).collect();

    let is_open = |row: usize, col: usize| -> bool {
        row < height && col < width && structure[row][col]
    };

    // A run starts at an open cell whose predecessor is blocked (or off the grid) and whose
    // successor is open. Across runs come first, then down runs, each in row-major order.
    let mut across: Vec<Variable> = vec![];
    let mut down: Vec<Variable> = vec![];
    for row in 0..height {
        for col in 0..width {
            if !is_open(row, col) {
                continue;
            }

            if (col == 0 || !is_open(row, col - 1)) && is_open(row, col + 1) {
                let length = (col..width).take_while(|&c| is_open(row, c)).count();
                across.push(Variable::new(row, col, Direction::Across, length));
            }

            if (row == 0 || !is_open(row - 1, col)) && is_open(row + 1, col) {
                let length = (row..height).take_while(|&r| is_open(r, col)).count();
                down.push(Variable::new(row, col, Direction::Down, length));
            }
        }
    }

    across.extend(down);
    build_grid_config(word_list, width, height, structure, across)
}

/// Compute crossings and neighbors for the given variables and assemble the config.
fn build_grid_config(
    word_list: WordList,
    width: usize,
    height: usize,
    structure: Vec<Vec<bool>>,
    variables: Vec<Variable>,
) -> Result<GridConfig> {
    // Map from cell location to the slots passing through it, as (slot id, cell index in slot).
    let mut slots_by_cell: HashMap<GridCoord, Vec<(SlotId, usize)>> = HashMap::new();
    for (slot_id, variable) in variables.iter().enumerate() {
        for (cell_idx, loc) in variable.cells().enumerate() {
            slots_by_cell.entry(loc).or_default().push((slot_id, cell_idx));
        }
    }

    let mut slot_configs: Vec<SlotConfig> = Vec::with_capacity(variables.len());

    for (slot_id, variable) in variables.into_iter().enumerate() {
        let mut crossings: SmallVec<[Option<Crossing>; MAX_SLOT_LENGTH]> = SmallVec::new();
        let mut neighbors: SmallVec<[SlotId; MAX_SLOT_LENGTH]> = SmallVec::new();

        for loc in variable.cells() {
            let others: Vec<&(SlotId, usize)> = slots_by_cell[&loc].iter()
                .filter(|&&(other_slot_id, _)| other_slot_id != slot_id)
                .collect();

            match others.as_slice() {
                [] => crossings.push(None),
                [&(other_slot_id, other_slot_cell)] => {
                    if neighbors.contains(&other_slot_id) {
                        return Err(PuzzleError::ConflictingCrossing { row: loc.0, col: loc.1 });
                    }
                    neighbors.push(other_slot_id);
                    crossings.push(Some(Crossing { other_slot_id, other_slot_cell }));
                }
                _ => return Err(PuzzleError::ConflictingCrossing { row: loc.0, col: loc.1 }),
            }
        }

        slot_configs.push(SlotConfig { id: slot_id, variable, crossings, neighbors });
    }

    Ok(GridConfig { width, height, structure, slot_configs, word_list })
}
