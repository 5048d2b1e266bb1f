//! `Inequality` and its `cross` operation — the unit of deduction.

use crate::cellset::CellSet;
use crate::error::SolverError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inequality {
    cells: CellSet,
    lo: usize,
    hi: usize,
}

impl Inequality {
    pub fn new(cells: CellSet, lo: usize, hi: usize) -> Result<Self, SolverError> {
        let size = cells.len();
        if size == 0 || lo > hi || hi > size {
            return Err(SolverError::InvalidBounds { lo, hi, size });
        }
        Ok(Self { cells, lo, hi })
    }

    pub fn cells(&self) -> &CellSet {
        &self.cells
    }

    pub fn lo(&self) -> usize {
        self.lo
    }

    pub fn hi(&self) -> usize {
        self.hi
    }

    pub fn bounds(&self) -> (usize, usize) {
        (self.lo, self.hi)
    }

    /// All cells are mines.
    pub fn is_all_mines(&self) -> bool {
        self.lo == self.cells.len()
    }

    /// No cell is a mine.
    pub fn is_all_safe(&self) -> bool {
        self.hi == 0
    }

    pub fn is_trivial(&self) -> bool {
        self.is_all_mines() || self.is_all_safe()
    }

    /// Splits two overlapping inequalities into up to three derived regions:
    /// the shared cells, and whatever each side has left over. Disjoint or
    /// identical operands produce no new information.
    pub fn cross(&self, other: &Inequality) -> Result<Vec<Inequality>, SolverError> {
        if self.cells == other.cells {
            return Ok(Vec::new());
        }
        if self.cells.is_disjoint(&other.cells) {
            return Ok(vec![self.clone(), other.clone()]);
        }

        let shared = self.cells.intersection(&other.cells);
        let left = self.cells.difference(&shared);
        let right = other.cells.difference(&shared);

        let shared_lo = self
            .lo
            .saturating_sub(left.len())
            .max(other.lo.saturating_sub(right.len()));
        let shared_hi = shared.len().min(self.hi).min(other.hi);

        let mut derived = vec![Inequality::new(shared, shared_lo, shared_hi)?];

        if !left.is_empty() {
            let left_lo = self.lo.saturating_sub(shared_hi);
            let left_hi = left.len().min(self.hi.saturating_sub(shared_lo));
            derived.push(Inequality::new(left, left_lo, left_hi)?);
        }

        if !right.is_empty() {
            let right_lo = other.lo.saturating_sub(shared_hi);
            let right_hi = right.len().min(other.hi.saturating_sub(shared_lo));
            derived.push(Inequality::new(right, right_lo, right_hi)?);
        }

        Ok(derived)
    }
}
