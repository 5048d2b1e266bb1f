//! The three bundled puzzles: the literal 4x2 scenario from the component
//! design walkthrough, a row/column-hinted "Combination Lock" grid, and the
//! color-hinted "Squared Square". Each returns the raw ingredients a
//! `Puzzle` is built from, so the CLI and the integration tests can both
//! construct and solve them the same way.

use crate::board::{grid_entries, Board};
use crate::cell::CellId;
use crate::error::SolverError;

pub type Constraint = (usize, Vec<CellId>);

/// The 4x2 board used throughout the component design walkthrough:
///
/// ```text
/// . * . *
/// ? . . ?
/// ```
pub fn demo1() -> Result<(Board, Vec<CellId>, Vec<Constraint>), SolverError> {
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
    let board = Board::from_entries(&entries)?;
    let revealed = vec![0, 5, 7];
    let constraints = vec![(2, (0..8).collect())];
    Ok((board, revealed, constraints))
}

/// "Combination Lock I": a 6x6 grid with one constraint per row, one per
/// column, and a grand total, on top of the 8-neighbor numeric board.
/// Nothing is pre-revealed; every deduction comes from the hints.
pub fn combination_lock() -> Result<(Board, Vec<CellId>, Vec<Constraint>), SolverError> {
    const W: usize = 6;
    const H: usize = 6;
    const COMPRESSED: &str = ".*.?...*.?..*.***?**.?..*?*.*....*.?";

    let entries = grid_entries(W, H, COMPRESSED);
    let board = Board::from_entries(&entries)?;

    let mine_total = COMPRESSED.chars().filter(|&c| c == '*').count();
    let mut constraints = vec![(mine_total, (0..W * H).collect())];

    // Column hints: cells `j, j+w, j+2w, ...`.
    for j in 0..W {
        let column: Vec<CellId> = (0..H).map(|k| j + k * W).collect();
        let count = column.iter().filter(|&&c| COMPRESSED.as_bytes()[c] == b'*').count();
        constraints.push((count, column));
    }

    // Row hints: cells `j*w .. j*w+w`.
    for j in 0..H {
        let row: Vec<CellId> = (j * W..j * W + W).collect();
        let count = row.iter().filter(|&&c| COMPRESSED.as_bytes()[c] == b'*').count();
        constraints.push((count, row));
    }

    Ok((board, Vec::new(), constraints))
}

/// "Squared Square": an irregular 17-cell board with four named color-group
/// hints (pink, red, orange, yellow) plus a grand total, and three cells
/// already revealed.
pub fn squared_square() -> Result<(Board, Vec<CellId>, Vec<Constraint>), SolverError> {
    let entries = vec![
        (0, '?', vec![1, 3, 5, 6]),
        (1, '?', vec![0, 2, 3, 4]),
        (2, '?', vec![1, 4, 7, 8]),
        (3, '*', vec![0, 1, 2, 4, 6, 7, 9, 10]),
        (4, '.', vec![1, 2, 3, 7]),
        (5, '.', vec![0, 6, 9, 13]),
        (6, '?', vec![0, 3, 5, 9]),
        (7, '.', vec![2, 3, 4, 8, 10, 11, 12]),
        (8, '.', vec![2, 7, 12, 15]),
        (9, '.', vec![3, 5, 6, 10, 11, 13, 14]),
        (10, '?', vec![3, 7, 9, 11]),
        (11, '.', vec![7, 9, 10, 12, 14, 15, 16]),
        (12, '*', vec![7, 8, 11, 15]),
        (13, '*', vec![5, 9, 14, 16]),
        (14, '?', vec![9, 11, 13, 16]),
        (15, '?', vec![8, 11, 12, 16]),
        (16, '.', vec![11, 13, 14, 15]),
    ];
    let board = Board::from_entries(&entries)?;
    let revealed = vec![10, 11, 16];
    let constraints = vec![
        (1, vec![0, 2, 13, 15]),        // pink
        (0, vec![1, 5, 8, 16]),         // red
        (1, vec![3, 7, 9, 11]),         // orange
        (1, vec![4, 6, 10, 12, 14]),    // yellow
        (3, (0..17).collect()),         // total
    ];
    Ok((board, revealed, constraints))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn combination_lock_hints_sum_to_the_grand_total() {
        let (_, _, constraints) = combination_lock().unwrap();
        let total = constraints[0].0;
        let column_sum: usize = constraints[1..7].iter().map(|(count, _)| count).sum();
        let row_sum: usize = constraints[7..13].iter().map(|(count, _)| count).sum();
        assert_eq!(column_sum, total);
        assert_eq!(row_sum, total);
    }

    #[test]
    fn squared_square_board_has_seventeen_cells() {
        let (board, revealed, _) = squared_square().unwrap();
        assert_eq!(board.len(), 17);
        assert_eq!(revealed, vec![10, 11, 16]);
    }

    #[test]
    fn demo1_board_matches_the_walkthrough() {
        let (board, revealed, constraints) = demo1().unwrap();
        assert_eq!(board.len(), 8);
        assert_eq!(revealed, vec![0, 5, 7]);
        assert_eq!(constraints, vec![(2, vec![0, 1, 2, 3, 4, 5, 6, 7])]);
    }
}
