//! Command-line front end: read a structure and a word file, fill the grid, and print it

use std::fs;
use std::path::{Path, PathBuf};
use clap::Parser;
use log::info;

use crate::backtracking_search::{find_fill, FillSuccess};
use crate::error::{PuzzleError, Result};
use crate::grid_config::{generate_grid_config_from_template_string, GridConfig};
use crate::render::render_grid;
use crate::word_list::WordList;

/// Fill a crossword structure with words from a dictionary.
#[derive(Parser, Debug)]
#[command(name = "fillgrid", version)]
pub struct Cli {
    /// Structure file: `_` for open cells, anything else for blocks
    #[arg(value_name = "STRUCTURE")]
    pub structure: PathBuf,

    /// Word file, one word per line
    #[arg(value_name = "WORDS")]
    pub words: PathBuf,

    /// Also write the filled grid to this file
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Print search statistics
    #[arg(short, long)]
    pub stats: bool,
}

/// Read a structure file and a word file into a grid config.
pub fn load_puzzle(structure: &Path, words: &Path) -> Result<GridConfig> {
    let template = fs::read_to_string(structure).map_err(|source| PuzzleError::Io {
        path: structure.to_path_buf(),
        source,
    })?;
    let word_list = WordList::load(words)?;
    info!("Loaded {} words from {}", word_list.len(), words.display());

    generate_grid_config_from_template_string(word_list, &template)
}

/// Solve the puzzle named on the command line and print the result. Returns whether a fill was
/// found; a missing fill isn't an error.
pub fn run(cli: &Cli) -> Result<bool> {
    let grid_config = load_puzzle(&cli.structure, &cli.words)?;

    let FillSuccess { statistics, assignment } = match find_fill(&grid_config) {
        Ok(result) => result,
        Err(_) => {
            println!("No solution.");
            return Ok(false);
        }
    };

    let display_grid = render_grid(&grid_config, &assignment);

    if cli.stats {
        println!("{:?}", statistics);
    }
    println!("{}", display_grid);

    if let Some(output) = &cli.output {
        fs::write(output, format!("{}\n", display_grid)).map_err(|source| PuzzleError::Io {
            path: output.clone(),
            source,
        })?;
        info!("Wrote filled grid to {}", output.display());
    }

    Ok(true)
}
