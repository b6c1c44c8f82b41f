//! Running a search and its trace as one paced sequence of [`Event`]s.

use std::thread;
use std::time::{Duration, Instant};

use log::{debug, warn};
use pathviz_core::{Board, BoardError, Pos};

use crate::error::{RunError, TraceError};
use crate::search::{Algorithm, Search, Status};
use crate::trace::Trace;

/// A visible change produced by a [`Run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A position was discovered and marked Frontier.
    Frontier(Pos),
    /// The goal was discovered. The board is not touched.
    GoalSeen(Pos),
    /// A route position was marked Path.
    Path(Pos),
}

impl Event {
    #[inline]
    pub fn pos(self) -> Pos {
        match self {
            Self::Frontier(p) | Self::GoalSeen(p) | Self::Path(p) => p,
        }
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunOutcome {
    pub found: bool,
    /// Number of moves from start to goal; zero when no route was found.
    pub path_length: usize,
    /// Positions reported by the search.
    pub discovered: usize,
}

/// Receives every event of a run together with the board it changed.
pub trait Sink {
    fn changed(&mut self, board: &Board, event: &Event);
}

impl Sink for () {
    fn changed(&mut self, _board: &Board, _event: &Event) {}
}

impl Sink for Vec<Event> {
    fn changed(&mut self, _board: &Board, event: &Event) {
        self.push(*event);
    }
}

#[derive(Debug)]
enum Phase {
    Search(Search),
    Trace(Trace),
    Done,
}

/// A search followed, on success, by the trace of its route.
#[derive(Debug)]
pub struct Run {
    algorithm: Algorithm,
    start: Pos,
    goal: Pos,
    phase: Phase,
    outcome: RunOutcome,
}

impl Run {
    /// Reset the marks of a previous run, validate the board and prepare a
    /// search. An invalid board is reported after the reset.
    pub fn start(board: &mut Board, algorithm: Algorithm) -> Result<Self, BoardError> {
        board.clear_marks();
        let (start, goal) = board.endpoints()?;
        debug!("{algorithm} run from {start} to {goal}");
        Ok(Self {
            algorithm,
            start,
            goal,
            phase: Phase::Search(Search::new(algorithm, start, goal)),
            outcome: RunOutcome::default(),
        })
    }

    /// Produce the next event, or `None` once the run is over.
    pub fn step(&mut self, board: &mut Board) -> Result<Option<Event>, TraceError> {
        loop {
            match &mut self.phase {
                Phase::Search(search) => {
                    if let Some(d) = search.step(board) {
                        self.outcome.discovered = search.discovered();
                        let event = if d.marked {
                            Event::Frontier(d.pos)
                        } else {
                            Event::GoalSeen(d.pos)
                        };
                        return Ok(Some(event));
                    }
                    if search.status() != Status::Found {
                        self.phase = Phase::Done;
                        return Ok(None);
                    }
                    match Trace::new(self.start, self.goal, search.records()) {
                        Ok(trace) => self.phase = Phase::Trace(trace),
                        Err(e) => {
                            warn!("{} run: {e}", self.algorithm);
                            self.phase = Phase::Done;
                            return Err(e);
                        }
                    }
                }
                Phase::Trace(trace) => {
                    if let Some(p) = trace.step(board) {
                        return Ok(Some(Event::Path(p)));
                    }
                    self.outcome.found = true;
                    self.outcome.path_length = trace.length();
                    debug!("{} route length {}", self.algorithm, trace.length());
                    self.phase = Phase::Done;
                    return Ok(None);
                }
                Phase::Done => return Ok(None),
            }
        }
    }

    /// The outcome so far; final once [`is_finished`](Self::is_finished).
    #[inline]
    pub fn outcome(&self) -> RunOutcome {
        self.outcome
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Done)
    }

    /// Whether the route is being marked.
    #[inline]
    pub fn is_tracing(&self) -> bool {
        matches!(self.phase, Phase::Trace(_))
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[inline]
    pub fn start_pos(&self) -> Pos {
        self.start
    }

    #[inline]
    pub fn goal_pos(&self) -> Pos {
        self.goal
    }
}

// ---------------------------------------------------------------------------
// Pacing
// ---------------------------------------------------------------------------

/// Delays between events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// After each search event.
    pub search: Duration,
    /// After each path mark.
    pub trace: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            search: Duration::from_millis(10),
            trace: Duration::from_millis(30),
        }
    }
}

impl Pacing {
    pub const INSTANT: Pacing = Pacing {
        search: Duration::ZERO,
        trace: Duration::ZERO,
    };

    pub fn from_millis(search: u64, trace: u64) -> Self {
        Self {
            search: Duration::from_millis(search),
            trace: Duration::from_millis(trace),
        }
    }

    pub fn delay_after(&self, event: &Event) -> Duration {
        match event {
            Event::Frontier(_) | Event::GoalSeen(_) => self.search,
            Event::Path(_) => self.trace,
        }
    }
}

/// Releases the events of a [`Run`] as they fall due, for callers that poll
/// on a clock of their own (a UI tick).
#[derive(Debug, Clone)]
pub struct Pacer {
    pacing: Pacing,
    due: Option<Instant>,
}

impl Pacer {
    pub fn new(pacing: Pacing) -> Self {
        Self { pacing, due: None }
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Step `run` until the next event is not due yet at `now` or the run
    /// ends, feeding every event to `sink`. Returns the number of events.
    pub fn advance<S: Sink + ?Sized>(
        &mut self,
        run: &mut Run,
        board: &mut Board,
        now: Instant,
        sink: &mut S,
    ) -> Result<usize, TraceError> {
        let mut n = 0;
        while self.due.is_none_or(|due| due <= now) {
            let Some(event) = run.step(board)? else {
                break;
            };
            sink.changed(board, &event);
            n += 1;
            let base = self.due.unwrap_or(now);
            self.due = Some(base + self.pacing.delay_after(&event));
        }
        Ok(n)
    }
}

/// Drive `run` to the end on the current thread, sleeping between events.
pub fn drive<S: Sink + ?Sized>(
    run: &mut Run,
    board: &mut Board,
    sink: &mut S,
    pacing: Pacing,
) -> Result<RunOutcome, TraceError> {
    while let Some(event) = run.step(board)? {
        sink.changed(board, &event);
        let delay = pacing.delay_after(&event);
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
    Ok(run.outcome())
}

/// Reset, validate, search and trace in one go, without delays.
pub fn run(board: &mut Board, algorithm: Algorithm) -> Result<RunOutcome, RunError> {
    let mut r = Run::start(board, algorithm)?;
    Ok(drive(&mut r, board, &mut (), Pacing::INSTANT)?)
}
