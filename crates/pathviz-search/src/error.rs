//! Error types for pathviz-search.

use pathviz_core::{BoardError, Pos};

/// An algorithm name that is not one of `bfs`, `gbfs`, `astar`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown algorithm {0:?} (expected bfs, gbfs or astar)")]
pub struct ParseAlgorithmError(pub String);

/// The parent chain of a finished search does not lead back to the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TraceError {
    /// No record, or a record without a parent, at `at`.
    #[error("parent chain broken at {at}")]
    Broken { at: Pos },

    /// The chain revisits a position before reaching the start.
    #[error("parent chain loops at {at}")]
    Cycle { at: Pos },
}

/// Errors that abort a run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Trace(#[from] TraceError),
}
