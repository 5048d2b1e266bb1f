//! Per-cell state, as seen by the reasoning engine, and the ground-truth
//! representation used to build puzzles from the `(id, state_char, neighbors)`
//! external format.

/// Opaque cell identifier. The engine never interprets this beyond equality,
/// ordering and hashing.
pub type CellId = usize;

/// A cell's count of mined neighbors, once revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealedKind {
    Count(u8),
    Unknown,
}

/// The three exclusive states a cell can be in, from the solver's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Hidden,
    Flagged,
    Revealed(RevealedKind),
}

impl CellState {
    pub fn is_hidden(&self) -> bool {
        matches!(self, CellState::Hidden)
    }

    pub fn is_flagged(&self) -> bool {
        matches!(self, CellState::Flagged)
    }
}

/// Ground truth for a single board cell, known to the board/demo layer but
/// never consulted by the reasoning engine to shortcut a deduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundTruth {
    Mine,
    Safe(u8),
    SafeUnknown,
}

impl GroundTruth {
    /// Parses a single `state_char` from the external board format, given the
    /// ground truth of its neighbors (needed to resolve `.` into a concrete count).
    pub fn from_char(c: char, mined_neighbor_count: u8) -> Option<GroundTruth> {
        match c {
            '*' => Some(GroundTruth::Mine),
            '?' => Some(GroundTruth::SafeUnknown),
            '.' => Some(GroundTruth::Safe(mined_neighbor_count)),
            d if d.is_ascii_digit() => Some(GroundTruth::Safe(d as u8 - b'0')),
            _ => None,
        }
    }

    pub fn numeric_count(&self) -> Option<u8> {
        match self {
            GroundTruth::Safe(n) => Some(*n),
            GroundTruth::Mine | GroundTruth::SafeUnknown => None,
        }
    }
}
