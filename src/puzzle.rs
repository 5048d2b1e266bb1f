//! `Puzzle`: owns the board view and the revealed/flagged/changed sets, seeds
//! the poset, and drives the propagation loop to a fixed point.

use indexmap::IndexSet;

use crate::board::Board;
use crate::cell::{CellId, CellState, RevealedKind};
use crate::cellset::CellSet;
use crate::error::SolverError;
use crate::inequality::Inequality;
use crate::poset::Poset;

/// The result of running a puzzle to its fixed point.
#[derive(Debug)]
pub struct SolveOutcome {
    pub revealed: Vec<CellId>,
    pub flagged: Vec<CellId>,
    pub remaining: Vec<Inequality>,
}

impl SolveOutcome {
    /// `true` once every cell is accounted for; a non-empty `remaining`
    /// always implies this is `false`.
    pub fn is_fully_solved(&self, board: &Board) -> bool {
        self.remaining.is_empty() && self.revealed.len() + self.flagged.len() == board.len()
    }
}

pub struct Puzzle {
    board: Board,
    poset: Poset,
    revealed: IndexSet<CellId>,
    flagged: IndexSet<CellId>,
    changed: IndexSet<CellId>,
}

impl Puzzle {
    pub fn new(
        board: Board,
        revealed0: Vec<CellId>,
        constraints: Vec<(usize, Vec<CellId>)>,
    ) -> Result<Self, SolverError> {
        let revealed: IndexSet<CellId> = revealed0.into_iter().collect();
        let mut poset = Poset::new();

        for (count, cells) in constraints {
            let unresolved: Vec<CellId> = cells.into_iter().filter(|c| !revealed.contains(c)).collect();
            if !unresolved.is_empty() {
                let cell_set = CellSet::new(unresolved);
                poset.add(Inequality::new(cell_set, count, count)?)?;
            }
        }

        Ok(Self {
            board,
            poset,
            revealed,
            flagged: IndexSet::new(),
            changed: IndexSet::new(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn poset(&self) -> &Poset {
        &self.poset
    }

    /// The solver's current view of a cell: flagged and revealed take
    /// priority over ground truth, since they reflect what has actually been
    /// decided rather than what is true of the board underneath.
    pub fn state_of(&self, cell: CellId) -> CellState {
        if self.flagged.contains(&cell) {
            CellState::Flagged
        } else if self.revealed.contains(&cell) {
            let kind = match self.board.ground_truth(cell).numeric_count() {
                Some(n) => RevealedKind::Count(n),
                None => RevealedKind::Unknown,
            };
            CellState::Revealed(kind)
        } else {
            CellState::Hidden
        }
    }

    /// Converts every changed cell's revealed, numeric neighborhood into a
    /// fresh inequality, then clears `changed`.
    fn seed_from_changed(&mut self) -> Result<(), SolverError> {
        let changed: Vec<CellId> = self.changed.iter().copied().collect();
        for c in changed {
            let Some(count) = self.board.ground_truth(c).numeric_count() else {
                continue;
            };

            let neighbors: Vec<CellId> = self.board.neighbors(c).to_vec();
            let hidden: Vec<CellId> = neighbors
                .iter()
                .copied()
                .filter(|n| !self.revealed.contains(n) && !self.flagged.contains(n))
                .collect();
            if hidden.is_empty() {
                continue;
            }

            let flagged_neighbors = neighbors.iter().filter(|n| self.flagged.contains(n)).count();
            let remaining = (count as usize)
                .saturating_sub(flagged_neighbors)
                .min(hidden.len());

            self.poset
                .add(Inequality::new(CellSet::new(hidden), remaining, remaining)?)?;
        }
        self.changed.clear();
        Ok(())
    }

    fn apply_trivials(&mut self, trivials: &[Inequality]) {
        for t in trivials {
            let mut cells = t.cells().to_vec();
            cells.sort_unstable();
            if t.lo() == 0 {
                for c in cells {
                    if self.revealed.insert(c) {
                        self.changed.insert(c);
                    }
                }
            } else {
                for c in cells {
                    self.flagged.insert(c);
                }
            }
        }
    }

    /// Runs the propagation loop to a fixed point: cross, collect trivials,
    /// apply them, reduce, repeat until the poset empties or a round makes no
    /// progress with the all-pairs fallback already exhausted.
    pub fn solve(&mut self) -> Result<SolveOutcome, SolverError> {
        self.changed = self.revealed.clone();

        while !self.poset.is_empty() {
            self.seed_from_changed()?;

            let fresh_was_empty = self.poset.fresh_is_empty();
            self.poset.cross_ineqs()?;

            let trivials = self.poset.find_trivial();
            let no_progress = trivials.is_empty() && self.poset.num_added() == 0;

            self.apply_trivials(&trivials);
            self.poset.reduce(&trivials)?;

            if no_progress && fresh_was_empty {
                let remaining = self.poset.len();
                if remaining > 0 {
                    eprintln!("{}", SolverError::NoProgress { remaining });
                }
                break;
            }
        }

        Ok(SolveOutcome {
            revealed: self.revealed.iter().copied().collect(),
            flagged: self.flagged.iter().copied().collect(),
            remaining: self.poset.inequalities().cloned().collect(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::board::Board;

    fn board_from_entries(entries: &[(CellId, char, Vec<CellId>)]) -> Board {
        Board::from_entries(entries).unwrap()
    }

    #[test]
    fn zero_constraint_reveals_all_cells() {
        let entries = vec![
            (0, '?', vec![]),
            (1, '?', vec![]),
            (2, '?', vec![]),
        ];
        let board = board_from_entries(&entries);
        let mut puzzle =
            Puzzle::new(board, vec![], vec![(0, vec![0, 1, 2])]).unwrap();
        let out = puzzle.solve().unwrap();
        assert_eq!(out.flagged, Vec::<CellId>::new());
        let mut revealed = out.revealed;
        revealed.sort_unstable();
        assert_eq!(revealed, vec![0, 1, 2]);
    }

    #[test]
    fn full_constraint_flags_all_cells() {
        let entries = vec![
            (0, '?', vec![]),
            (1, '?', vec![]),
            (2, '?', vec![]),
        ];
        let board = board_from_entries(&entries);
        let mut puzzle =
            Puzzle::new(board, vec![], vec![(3, vec![0, 1, 2])]).unwrap();
        let out = puzzle.solve().unwrap();
        let mut flagged = out.flagged;
        flagged.sort_unstable();
        assert_eq!(flagged, vec![0, 1, 2]);
    }

    #[test]
    fn overlapping_constraints_leave_a_residual() {
        let entries = vec![
            (0, '?', vec![]),
            (1, '?', vec![]),
            (2, '?', vec![]),
        ];
        let board = board_from_entries(&entries);
        let mut puzzle = Puzzle::new(
            board,
            vec![],
            vec![(1, vec![0, 1]), (1, vec![1, 2])],
        )
        .unwrap();
        let out = puzzle.solve().unwrap();
        assert!(out.revealed.is_empty());
        assert!(out.flagged.is_empty());
        assert!(!out.remaining.is_empty());
    }

    #[test]
    fn demo1_matches_literal_expected_output() {
        // . * . *
        // ? . . ?
        let entries = vec![
            (0, '.', vec![1, 4, 5]),
            (1, '*', vec![0, 2, 4, 5, 6]),
            (2, '.', vec![1, 3, 5, 6, 7]),
            (3, '*', vec![2, 6, 7]),
            (4, '?', vec![0, 1, 5]),
            (5, '.', vec![0, 1, 2, 4, 6]),
            (6, '.', vec![1, 2, 3, 5, 7]),
            (7, '?', vec![2, 3, 6]),
        ];
        let board = board_from_entries(&entries);
        let revealed0 = vec![0, 5, 7];
        let constraints = vec![(2, (0..8).collect())];
        let mut puzzle = Puzzle::new(board, revealed0, constraints).unwrap();
        let out = puzzle.solve().unwrap();

        let mut revealed = out.revealed;
        revealed.sort_unstable();
        let mut flagged = out.flagged;
        flagged.sort_unstable();

        assert_eq!(flagged, vec![1, 3]);
        assert_eq!(revealed, vec![0, 2, 4, 5, 6, 7]);
        assert!(out.remaining.is_empty());

        assert_eq!(puzzle.state_of(1), CellState::Flagged);
        assert_eq!(
            puzzle.state_of(0),
            CellState::Revealed(RevealedKind::Count(1))
        );
        assert_eq!(
            puzzle.state_of(7),
            CellState::Revealed(RevealedKind::Unknown)
        );
    }
}
