use std::fs::File;

use structopt::StructOpt;

use tametsi_solver::error::SolverError;
use tametsi_solver::graph;
use tametsi_solver::puzzle::Puzzle;
use tametsi_solver::{demos, opts};

use opts::{Opts, PuzzleId};

fn main() -> Result<(), SolverError> {
    let Opts::Solve { puzzle, graph: graph_path } = Opts::from_args();

    let (board, revealed, constraints) = match puzzle {
        PuzzleId::Demo1 => demos::demo1()?,
        PuzzleId::CombinationLock => demos::combination_lock()?,
        PuzzleId::SquaredSquare => demos::squared_square()?,
    };

    let mine_count = board.mine_count();
    let mut puzzle = Puzzle::new(board, revealed, constraints)?;
    let outcome = puzzle.solve()?;

    println!("revealed: {:?}", outcome.revealed);
    println!("flagged:  {:?}", outcome.flagged);
    println!("mines on board: {}", mine_count);
    if outcome.remaining.is_empty() {
        println!("solved: every cell is revealed or flagged");
    } else {
        println!(
            "unsolved: {} inequalities remain (requires guessing)",
            outcome.remaining.len()
        );
    }

    if let Some(path) = graph_path {
        let file = File::create(&path)?;
        graph::write_dot(puzzle.poset(), file)?;
        println!("wrote poset graph to {}", path.display());
    }

    Ok(())
}
