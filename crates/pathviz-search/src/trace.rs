use log::{trace, warn};
use pathviz_core::{Board, CellState, Pos};

use crate::error::TraceError;
use crate::record::Records;

/// Reconstructs a found route from search records and marks it on a board.
///
/// The parent chain is followed from the goal back to the start once, up
/// front. [`step`](Trace::step) then hands out the intermediate positions
/// in start-to-goal order, marking each one [`CellState::Path`].
#[derive(Debug, Clone)]
pub struct Trace {
    start: Pos,
    goal: Pos,
    /// Intermediate positions, the one next to the start on top.
    stack: Vec<Pos>,
    length: usize,
}

impl Trace {
    pub fn new(start: Pos, goal: Pos, records: &Records) -> Result<Self, TraceError> {
        let mut stack = Vec::new();
        if start != goal {
            let mut at = goal;
            loop {
                let parent = records
                    .get(&at)
                    .and_then(|r| r.parent)
                    .ok_or(TraceError::Broken { at })?;
                if parent == start {
                    break;
                }
                if stack.len() > records.len() {
                    return Err(TraceError::Cycle { at: parent });
                }
                stack.push(parent);
                at = parent;
            }
        }
        Ok(Self {
            start,
            goal,
            stack,
            length: 1,
        })
    }

    /// Mark and return the next position of the route, or `None` once every
    /// intermediate position has been marked.
    pub fn step(&mut self, board: &mut Board) -> Option<Pos> {
        let p = self.stack.pop()?;
        if let Err(e) = board.set(p, CellState::Path) {
            warn!("path mark dropped: {e}");
        }
        self.length += 1;
        trace!("path {p}");
        Some(p)
    }

    /// Mark the rest of the route and return its length.
    pub fn finish(&mut self, board: &mut Board) -> usize {
        while self.step(board).is_some() {}
        self.length
    }

    /// Route length counted so far: one for the final step into the goal,
    /// plus one per position handed out. Equals the number of moves from
    /// start to goal once the trace is finished.
    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Positions not marked yet, in start-to-goal order.
    pub fn remaining(&self) -> impl Iterator<Item = Pos> + '_ {
        self.stack.iter().rev().copied()
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.stack.is_empty()
    }

    #[inline]
    pub fn start(&self) -> Pos {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Pos {
        self.goal
    }
}

/// The whole route from `start` to `goal`, both included.
pub fn trace_path(start: Pos, goal: Pos, records: &Records) -> Result<Vec<Pos>, TraceError> {
    let trace = Trace::new(start, goal, records)?;
    let mut path = Vec::with_capacity(trace.stack.len() + 2);
    path.push(start);
    path.extend(trace.remaining());
    if goal != start {
        path.push(goal);
    }
    Ok(path)
}
