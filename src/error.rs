//! The error taxonomy for the reasoning engine.

use thiserror::Error;

use crate::cell::CellId;
use crate::cellset::CellSet;

#[derive(Debug, Error)]
pub enum SolverError {
    #[error("invalid bounds: lo={lo} hi={hi} over {size} cell(s)")]
    InvalidBounds { lo: usize, hi: usize, size: usize },

    #[error("no inequality found for cell set {0:?}")]
    Missing(CellSet),

    #[error("tightening {cells:?} would require lo={lo} > hi={hi}")]
    Unsatisfiable {
        cells: CellSet,
        lo: usize,
        hi: usize,
    },

    #[error("propagation made no progress; {remaining} inequalities remain unresolved")]
    NoProgress { remaining: usize },

    #[error("cell id {id} is out of range for a board of {bound} cell(s)")]
    InvalidCellId { id: CellId, bound: usize },

    #[error("no board entry was supplied for cell {0}")]
    MissingCellEntry(CellId),

    #[error("cell {id} has an unrecognized state character {ch:?}")]
    UnrecognizedStateChar { id: CellId, ch: char },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SolverError>;
