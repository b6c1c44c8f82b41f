//! One-shot, non-interactive runs.

use std::fmt;

use pathviz_core::Board;
use pathviz_search::{Algorithm, RunError, RunOutcome, run};

use crate::config::PathvizConfig;
use crate::walls::{make_rng, random_board};

/// Board and result of a headless run.
#[derive(Debug, Clone)]
pub struct Report {
    pub algorithm: Algorithm,
    pub board: Board,
    pub outcome: RunOutcome,
}

impl Report {
    /// Process exit status: 0 when a route was found, 2 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.outcome.found { 0 } else { 2 }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        writeln!(f)?;
        write!(f, "{}: ", self.algorithm)?;
        if self.outcome.found {
            write!(f, "Path length : {}", self.outcome.path_length)?;
        } else {
            write!(f, "Cannot find route!")?;
        }
        write!(f, " ({} cells discovered)", self.outcome.discovered)
    }
}

/// Build a random board from `config` and run its algorithm once.
pub fn run_headless(config: &PathvizConfig) -> Result<Report, RunError> {
    let mut rng = make_rng(config.walls.seed);
    let board = random_board(
        config.grid.rows,
        config.grid.cols,
        &mut rng,
        config.walls.density,
    )?;
    run_board(board, config.run.algorithm)
}

/// Run `algorithm` on `board` without animation.
pub fn run_board(mut board: Board, algorithm: Algorithm) -> Result<Report, RunError> {
    let outcome = run(&mut board, algorithm)?;
    Ok(Report {
        algorithm,
        board,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_for_found_route() {
        let board: Board = "S..\n.#.\n..G".parse().unwrap();
        let report = run_board(board, Algorithm::Bfs).unwrap();
        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.outcome.path_length, 4);
        let text = report.to_string();
        assert!(text.starts_with("S"));
        assert!(
            text.ends_with("BFS: Path length : 4 (6 cells discovered)"),
            "{text}"
        );
    }

    #[test]
    fn report_for_no_route() {
        let board: Board = "S#G".parse().unwrap();
        let report = run_board(board, Algorithm::Astar).unwrap();
        assert_eq!(report.exit_code(), 2);
        assert_eq!(
            report.to_string(),
            "S#G\n\nA*: Cannot find route! (0 cells discovered)"
        );
    }

    #[test]
    fn invalid_board_is_an_error() {
        let board: Board = "S.S\n..G".parse().unwrap();
        assert!(run_board(board, Algorithm::Bfs).is_err());
    }

    #[test]
    fn seeded_runs_repeat() {
        let mut config = PathvizConfig::default();
        config.grid.rows = 6;
        config.grid.cols = 10;
        config.walls.seed = Some(5);
        let a = run_headless(&config).unwrap();
        let b = run_headless(&config).unwrap();
        assert_eq!(a.board, b.board);
        assert_eq!(a.outcome, b.outcome);
        assert_eq!(a.board.rows(), 6);
    }
}
