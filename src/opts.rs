use std::path::PathBuf;
use std::str::FromStr;

use structopt::StructOpt;

#[derive(Debug)]
pub struct PuzzleDoesNotExist(String);

impl std::fmt::Display for PuzzleDoesNotExist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "no such puzzle: {}", self.0)
    }
}

impl std::error::Error for PuzzleDoesNotExist {}

#[derive(Debug, Clone, Copy)]
pub enum PuzzleId {
    Demo1,
    CombinationLock,
    SquaredSquare,
}

impl std::fmt::Display for PuzzleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Demo1 => "demo1",
            Self::CombinationLock => "combination-lock",
            Self::SquaredSquare => "squared-square",
        };
        write!(f, "{}", text)
    }
}

impl FromStr for PuzzleId {
    type Err = PuzzleDoesNotExist;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "demo1" => Ok(Self::Demo1),
            "combination-lock" => Ok(Self::CombinationLock),
            "squared-square" => Ok(Self::SquaredSquare),
            other => Err(PuzzleDoesNotExist(other.to_string())),
        }
    }
}

#[derive(Debug, StructOpt)]
#[structopt(name = "tametsi-solver")]
pub enum Opts {
    /// Solve one of the bundled puzzles and print the result.
    Solve {
        puzzle: PuzzleId,

        /// Write the residual poset as a Graphviz .dot file here.
        #[structopt(long, parse(from_os_str))]
        graph: Option<PathBuf>,
    },
}
