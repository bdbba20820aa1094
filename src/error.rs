//! Error types for maze generation.

use std::{collections::TryReserveError, fmt};

/// Errors that can end a run before the maze is complete.
#[derive(Debug)]
pub enum MazeError {
    /// `width * height` (or the derived edge count) does not fit in `usize`.
    TooLarge { width: usize, height: usize },

    /// Storage for one of the per-run arrays could not be allocated.
    Allocation {
        what: &'static str,
        len: usize,
        source: TryReserveError,
    },

    /// Writing a frame to the terminal failed.
    Io(std::io::Error),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MazeError::TooLarge { width, height } => {
                write!(f, "maze too large: {}x{} cells", width, height)
            }
            MazeError::Allocation { what, len, source } => {
                write!(f, "cannot allocate {} of {} entries: {}", what, len, source)
            }
            MazeError::Io(err) => write!(f, "terminal output failed: {}", err),
        }
    }
}

impl std::error::Error for MazeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MazeError::TooLarge { .. } => None,
            MazeError::Allocation { source, .. } => Some(source),
            MazeError::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for MazeError {
    fn from(err: std::io::Error) -> Self {
        MazeError::Io(err)
    }
}
