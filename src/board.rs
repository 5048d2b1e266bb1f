//! Flattens the external `(id, state_char, neighbors)` board format into
//! ground truth plus neighbor lists. This is the "puzzle-file reader"
//! collaborator the reasoning engine treats as external; it knows about
//! mines, the core engine never does.

use crate::cell::{CellId, GroundTruth};
use crate::error::SolverError;

#[derive(Debug, Clone)]
pub struct Board {
    ground_truth: Vec<GroundTruth>,
    neighbors: Vec<Vec<CellId>>,
}

impl Board {
    /// Builds a board from the external per-cell `(id, state_char, neighbors)`
    /// format described in the spec's external interfaces section. `id`s must
    /// be a dense `0..entries.len()` range; entries need not be pre-sorted.
    pub fn from_entries(entries: &[(CellId, char, Vec<CellId>)]) -> Result<Board, SolverError> {
        let n = entries.len();
        for (id, _, ns) in entries {
            if *id >= n {
                return Err(SolverError::InvalidCellId { id: *id, bound: n });
            }
            for neighbor in ns {
                if *neighbor >= n {
                    return Err(SolverError::InvalidCellId {
                        id: *neighbor,
                        bound: n,
                    });
                }
            }
        }

        let mut raw_char = vec![None; n];
        let mut neighbors = vec![Vec::new(); n];
        for (id, c, ns) in entries {
            raw_char[*id] = Some(*c);
            neighbors[*id] = ns.clone();
        }

        let mined_neighbor_count = |id: CellId| -> u8 {
            neighbors[id]
                .iter()
                .filter(|n| raw_char[**n] == Some('*'))
                .count() as u8
        };

        let mut ground_truth = Vec::with_capacity(n);
        for id in 0..n {
            let c = raw_char[id].ok_or(SolverError::MissingCellEntry(id))?;
            let gt = GroundTruth::from_char(c, mined_neighbor_count(id))
                .ok_or(SolverError::UnrecognizedStateChar { id, ch: c })?;
            ground_truth.push(gt);
        }

        Ok(Board {
            ground_truth,
            neighbors,
        })
    }

    pub fn len(&self) -> usize {
        self.ground_truth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ground_truth.is_empty()
    }

    pub fn neighbors(&self, cell: CellId) -> &[CellId] {
        &self.neighbors[cell]
    }

    pub fn ground_truth(&self, cell: CellId) -> GroundTruth {
        self.ground_truth[cell]
    }

    /// Number of cells whose ground truth is an actual mine; used only by
    /// tests and demos to check the solver against the known answer.
    pub fn mine_count(&self) -> usize {
        self.ground_truth
            .iter()
            .filter(|g| matches!(g, GroundTruth::Mine))
            .count()
    }
}

/// 8-neighbor adjacency on a `w`x`h` grid, row-major cell ids, mirroring the
/// "Combination Lock" puzzle generator in the original solver.
pub fn grid_neighbors(w: usize, h: usize) -> Vec<Vec<CellId>> {
    let mut out = Vec::with_capacity(w * h);
    for i in 0..(w * h) {
        let (x, y) = ((i % w) as isize, (i / w) as isize);
        let mut ns = Vec::with_capacity(8);
        for dx in -1..=1 {
            for dy in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || nx >= w as isize || ny < 0 || ny >= h as isize {
                    continue;
                }
                ns.push((ny as usize) * w + (nx as usize));
            }
        }
        out.push(ns);
    }
    out
}

/// Builds `(id, char, neighbors)` entries for a `w`x`h` grid from a
/// row-major, densely-packed state string.
pub fn grid_entries(w: usize, h: usize, compressed: &str) -> Vec<(CellId, char, Vec<CellId>)> {
    let chars: Vec<char> = compressed.chars().collect();
    assert_eq!(chars.len(), w * h, "compressed board does not match w*h");
    grid_neighbors(w, h)
        .into_iter()
        .enumerate()
        .map(|(id, ns)| (id, chars[id], ns))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn derives_dot_counts_from_neighbor_mines() {
        let entries = vec![(0, '.', vec![1]), (1, '*', vec![0])];
        let board = Board::from_entries(&entries).unwrap();
        assert_eq!(board.ground_truth(0), GroundTruth::Safe(1));
        assert_eq!(board.ground_truth(1), GroundTruth::Mine);
    }

    #[test]
    fn grid_neighbors_are_8_connected_and_bounded() {
        let ns = grid_neighbors(3, 3);
        assert_eq!(ns[4].len(), 8); // center cell
        assert_eq!(ns[0].len(), 3); // corner cell
    }

    #[test]
    fn rejects_out_of_range_id_instead_of_panicking() {
        let entries = vec![(0, '.', vec![]), (5, '.', vec![])];
        let err = Board::from_entries(&entries).unwrap_err();
        assert!(matches!(err, SolverError::InvalidCellId { id: 5, bound: 2 }));
    }

    #[test]
    fn rejects_out_of_range_neighbor_instead_of_panicking() {
        let entries = vec![(0, '.', vec![9]), (1, '.', vec![])];
        let err = Board::from_entries(&entries).unwrap_err();
        assert!(matches!(
            err,
            SolverError::InvalidCellId { id: 9, bound: 2 }
        ));
    }

    #[test]
    fn rejects_missing_entry() {
        // A duplicated id (both in range) leaves cell `1` without an entry.
        let entries = vec![(0, '.', vec![]), (0, '.', vec![])];
        let err = Board::from_entries(&entries).unwrap_err();
        assert!(matches!(err, SolverError::MissingCellEntry(1)));
    }

    #[test]
    fn rejects_unrecognized_state_char() {
        let entries = vec![(0, 'x', vec![])];
        let err = Board::from_entries(&entries).unwrap_err();
        assert!(matches!(
            err,
            SolverError::UnrecognizedStateChar { id: 0, ch: 'x' }
        ));
    }
}
