use std::fmt;
use std::path::PathBuf;

/// Problems that can occur while loading a puzzle or its dictionary. Failing to find a fill is not
/// one of these; that's reported as a normal result by the search.
#[derive(Debug)]
pub enum PuzzleError {
    /// A structure or word file couldn't be read or written.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The structure template didn't contain any rows.
    EmptyStructure,

    /// Two slots share more than one cell, or more than two slots share a cell, so they can't be
    /// related by a single overlap.
    ConflictingCrossing {
        row: usize,
        col: usize,
    },
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Failed to access '{}': {source}", path.display())
            }
            Self::EmptyStructure => write!(f, "Structure contains no rows"),
            Self::ConflictingCrossing { row, col } => {
                write!(f, "Conflicting slot crossing at row {row}, column {col}")
            }
        }
    }
}

impl std::error::Error for PuzzleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PuzzleError>;
