use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use log::{debug, trace, warn};
use pathviz_core::{Board, CellState, Pos};

use crate::distance::manhattan;
use crate::error::ParseAlgorithmError;
use crate::neighbors::Neighbors;
use crate::record::{Cost, OpenSet, Records, SearchRecord};

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// The three interchangeable search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Algorithm {
    /// Breadth-first search.
    Bfs,
    /// Greedy best-first search on the Manhattan heuristic.
    #[cfg_attr(feature = "serde", serde(alias = "gbfs"))]
    Greedy,
    /// A* on the Manhattan heuristic.
    #[default]
    Astar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Self::Bfs, Self::Greedy, Self::Astar];

    /// Short display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bfs => "BFS",
            Self::Greedy => "GBFS",
            Self::Astar => "A*",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(Self::Bfs),
            "gbfs" | "greedy" => Ok(Self::Greedy),
            "astar" | "a*" => Ok(Self::Astar),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Status / Discovery
// ---------------------------------------------------------------------------

/// Where a [`Search`] stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    /// The goal was reached; the records hold a parent chain to it.
    Found,
    /// The frontier ran dry without reaching the goal.
    Exhausted,
}

/// A newly discovered position, reported once per position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discovery {
    pub pos: Pos,
    /// Whether the board cell was marked [`CellState::Frontier`]. The goal is
    /// reported unmarked.
    pub marked: bool,
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// A resumable search from `start` to `goal`.
///
/// Each call to [`step`](Search::step) runs until the next newly discovered
/// position, marks it on the board and returns it, so a caller can render
/// and pause between discoveries. Neighbours are read from the board passed
/// to each step.
#[derive(Debug)]
pub struct Search {
    pub(crate) algorithm: Algorithm,
    pub(crate) start: Pos,
    pub(crate) goal: Pos,
    pub(crate) records: Records,
    /// FIFO frontier (BFS).
    pub(crate) queue: VecDeque<Pos>,
    /// Priority frontier (greedy, A*).
    pub(crate) open: OpenSet,
    /// Node whose neighbours are being examined.
    pub(crate) current: Option<Pos>,
    pub(crate) pending: Neighbors,
    pub(crate) status: Status,
    pub(crate) discovered: usize,
    pub(crate) expanded: usize,
}

impl Search {
    /// Prepare a search. Nothing is explored until the first step.
    pub fn new(algorithm: Algorithm, start: Pos, goal: Pos) -> Self {
        let mut search = Self {
            algorithm,
            start,
            goal,
            records: Records::new(),
            queue: VecDeque::new(),
            open: OpenSet::new(),
            current: None,
            pending: Neighbors::new(),
            status: Status::Running,
            discovered: 0,
            expanded: 0,
        };
        match algorithm {
            Algorithm::Bfs => search.queue.push_back(start),
            Algorithm::Greedy => {
                let h = manhattan(start, goal);
                search.open_start(Cost::Greedy { h }, h);
            }
            Algorithm::Astar => {
                let h = manhattan(start, goal);
                search.open_start(Cost::Astar { g: 0, h, f: h }, h);
            }
        }
        search
    }

    fn open_start(&mut self, cost: Cost, key: i32) {
        let mut rec = SearchRecord::new(None, cost);
        rec.open = true;
        self.records.insert(self.start, rec);
        self.open.push(key, self.start);
    }

    /// Advance to the next newly discovered position.
    ///
    /// Returns `None` once the search has terminated; [`status`](Self::status)
    /// then tells whether the goal was found.
    pub fn step(&mut self, board: &mut Board) -> Option<Discovery> {
        if self.status != Status::Running {
            return None;
        }
        let discovery = match self.algorithm {
            Algorithm::Bfs => self.bfs_step(board),
            Algorithm::Greedy => self.greedy_step(board),
            Algorithm::Astar => self.astar_step(board),
        };
        if discovery.is_none() {
            debug!(
                "{} search {:?}: {} discovered, {} expanded",
                self.algorithm, self.status, self.discovered, self.expanded
            );
        }
        discovery
    }

    /// Iterate over the remaining discoveries.
    pub fn steps<'a>(&'a mut self, board: &'a mut Board) -> Steps<'a> {
        Steps {
            search: self,
            board,
        }
    }

    /// Run the search to termination and return the final status.
    pub fn finish(&mut self, board: &mut Board) -> Status {
        self.steps(board).for_each(drop);
        self.status
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[inline]
    pub fn start(&self) -> Pos {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Pos {
        self.goal
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Number of positions reported so far.
    #[inline]
    pub fn discovered(&self) -> usize {
        self.discovered
    }

    /// The search records gathered so far.
    #[inline]
    pub fn records(&self) -> &Records {
        &self.records
    }

    /// Consume the search, keeping only its records.
    pub fn into_records(self) -> Records {
        self.records
    }

    /// Start examining the neighbours of `p`.
    pub(crate) fn expand(&mut self, p: Pos, board: &Board) {
        self.current = Some(p);
        self.pending.load(board, p);
        self.expanded += 1;
    }

    /// Report `pos` as discovered, marking it unless it is the goal.
    pub(crate) fn discover(&mut self, pos: Pos, board: &mut Board) -> Discovery {
        self.discovered += 1;
        let marked = pos != self.goal;
        if marked {
            if let Err(e) = board.set(pos, CellState::Frontier) {
                warn!("frontier mark dropped: {e}");
            }
        }
        trace!("discovered {pos}");
        Discovery { pos, marked }
    }

    /// Next `(current, neighbour)` edge for the priority-queue searches.
    ///
    /// Pops and closes nodes from the open set as neighbour lists run out.
    /// Returns `None` and settles the status once the goal is popped or the
    /// open set is empty.
    pub(crate) fn next_open_edge(&mut self, board: &Board) -> Option<(Pos, Pos)> {
        loop {
            if let Some(current) = self.current {
                if let Some(adj) = self.pending.next() {
                    return Some((current, adj));
                }
                self.current = None;
            }

            let Some(p) = self.open.pop() else {
                self.status = Status::Exhausted;
                return None;
            };
            if p == self.goal {
                self.status = Status::Found;
                return None;
            }
            if let Some(rec) = self.records.get_mut(&p) {
                rec.open = false;
                rec.closed = true;
            }
            self.expand(p, board);
        }
    }
}

/// Iterator over the discoveries of a [`Search`], see [`Search::steps`].
pub struct Steps<'a> {
    search: &'a mut Search,
    board: &'a mut Board,
}

impl Iterator for Steps<'_> {
    type Item = Discovery;

    fn next(&mut self) -> Option<Discovery> {
        self.search.step(self.board)
    }
}
