//! Elm-architecture Model for the terminal UI.

use std::fmt;
use std::time::Instant;

use log::{debug, info, warn};
use pathviz_core::{
    AttrMask, Board, BoardError, Cell, CellState, Effect, Grid, Key, Model, MouseAction, Msg, Pos,
    Style,
};
use pathviz_search::{Algorithm, Pacer, Pacing, Run};
use rand::rngs::StdRng;

use crate::colors;
use crate::config::PathvizConfig;
use crate::walls::{corner_board, make_rng, scatter_walls};

/// Screen row of the first board row.
pub const BOARD_TOP: i32 = 1;
/// Terminal columns per board cell, so that cells look roughly square.
pub const CELL_WIDTH: i32 = 2;

const HINT: &str = "? help  q quit";
const HELP: &str = "w/s/g/e draw wall/start/goal/erase  1 BFS  2 GBFS  3 A*  \
c clear marks  x clear board  r walls  q quit";

/// What a mouse press paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    #[default]
    Wall,
    Start,
    Goal,
    Erase,
}

impl DrawMode {
    pub const fn state(self) -> CellState {
        match self {
            Self::Wall => CellState::Wall,
            Self::Start => CellState::Start,
            Self::Goal => CellState::Goal,
            Self::Erase => CellState::Empty,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Wall => "Wall",
            Self::Start => "Start",
            Self::Goal => "Goal",
            Self::Erase => "Erase",
        }
    }
}

/// Result line shown under the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Ready,
    Running,
    Found(usize),
    NoRoute,
    InvalidGrid,
    Failed(String),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready => Ok(()),
            Self::Running => f.write_str("Searching..."),
            Self::Found(n) => write!(f, "Path length : {n}"),
            Self::NoRoute => f.write_str("Cannot find route!"),
            Self::InvalidGrid => f.write_str("Invalid grid!"),
            Self::Failed(e) => write!(f, "Error: {e}"),
        }
    }
}

struct ActiveRun {
    run: Run,
    pacer: Pacer,
}

/// The pathviz model: a board, the tools to edit it, and at most one run in
/// flight.
pub struct PathvizModel {
    board: Board,
    mode: DrawMode,
    algorithm: Algorithm,
    pacing: Pacing,
    active: Option<ActiveRun>,
    status: Status,
    painting: bool,
    hover: Option<Pos>,
    show_help: bool,
    rng: StdRng,
    density: f64,
}

impl PathvizModel {
    /// An empty board from `config`, with the start top-left and the goal
    /// bottom-right.
    pub fn new(config: &PathvizConfig) -> Result<Self, BoardError> {
        let board = corner_board(config.grid.rows, config.grid.cols)?;
        Ok(Self::with_board(board, config))
    }

    /// A model editing `board`.
    pub fn with_board(board: Board, config: &PathvizConfig) -> Self {
        Self {
            board,
            mode: DrawMode::default(),
            algorithm: config.run.algorithm,
            pacing: config.pacing(),
            active: None,
            status: Status::Ready,
            painting: false,
            hover: None,
            show_help: false,
            rng: make_rng(config.walls.seed),
            density: config.walls.density,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Screen size needed to show the board, status and help lines.
    pub fn screen_size(&self) -> (i32, i32) {
        let rows = BOARD_TOP + self.board.rows() + 2;
        let cols = (self.board.cols() * CELL_WIDTH).max(HELP.len() as i32 + 2);
        (rows, cols)
    }

    /// Board position under a screen position. May be off the board.
    pub fn board_pos(screen: Pos) -> Pos {
        Pos::new(screen.row - BOARD_TOP, screen.col.div_euclid(CELL_WIDTH))
    }

    // -------------------------------------------------------------------
    // Update
    // -------------------------------------------------------------------

    fn handle_key(&mut self, key: Key) -> Option<Effect> {
        match key {
            Key::Char('q') | Key::Escape => return Some(Effect::End),
            Key::Char('?') => {
                self.show_help = !self.show_help;
                return None;
            }
            _ => {}
        }
        if self.is_running() {
            debug!("run in flight, ignoring {key:?}");
            return None;
        }
        match key {
            Key::Char('w') => self.mode = DrawMode::Wall,
            Key::Char('s') => self.mode = DrawMode::Start,
            Key::Char('g') => self.mode = DrawMode::Goal,
            Key::Char('e') => self.mode = DrawMode::Erase,
            Key::Char('1' | 'b') => self.start_run(Algorithm::Bfs),
            Key::Char('2' | 'f') => self.start_run(Algorithm::Greedy),
            Key::Char('3' | 'a') => self.start_run(Algorithm::Astar),
            Key::Enter | Key::Space => self.start_run(self.algorithm),
            Key::Char('c') => {
                self.board.clear_marks();
                self.status = Status::Ready;
            }
            Key::Char('x') => {
                self.board.clear();
                self.status = Status::Ready;
            }
            Key::Char('r') => {
                self.board.clear_marks();
                let n = scatter_walls(&mut self.board, &mut self.rng, self.density);
                debug!("scattered {n} walls");
                self.status = Status::Ready;
            }
            _ => {}
        }
        None
    }

    fn handle_mouse(&mut self, action: MouseAction, screen: Pos) {
        let p = Self::board_pos(screen);
        self.hover = self.board.contains(p).then_some(p);
        match action {
            MouseAction::Main => {
                self.painting = true;
                self.paint(p, self.mode.state());
            }
            MouseAction::Secondary => self.paint(p, CellState::Empty),
            MouseAction::Release => self.painting = false,
            MouseAction::Move => {
                if self.painting {
                    self.paint(p, self.mode.state());
                }
            }
        }
    }

    fn paint(&mut self, p: Pos, state: CellState) {
        if self.is_running() {
            return;
        }
        if let Err(e) = self.board.set(p, state) {
            warn!("{e}");
        }
    }

    fn start_run(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
        match Run::start(&mut self.board, algorithm) {
            Ok(run) => {
                info!("{algorithm} run started");
                self.active = Some(ActiveRun {
                    run,
                    pacer: Pacer::new(self.pacing),
                });
                self.status = Status::Running;
            }
            Err(e) => {
                warn!("{e}");
                self.status = Status::InvalidGrid;
            }
        }
    }

    fn tick(&mut self, now: Instant) {
        let Some(active) = &mut self.active else {
            return;
        };
        match active
            .pacer
            .advance(&mut active.run, &mut self.board, now, &mut ())
        {
            Ok(_) if active.run.is_finished() => {
                let outcome = active.run.outcome();
                info!("{} run finished: {outcome:?}", self.algorithm);
                self.status = if outcome.found {
                    Status::Found(outcome.path_length)
                } else {
                    Status::NoRoute
                };
                self.active = None;
            }
            Ok(_) => {}
            Err(e) => {
                warn!("{} run aborted: {e}", self.algorithm);
                self.status = Status::Failed(e.to_string());
                self.active = None;
            }
        }
    }

    // -------------------------------------------------------------------
    // Draw
    // -------------------------------------------------------------------

    fn draw_title(&self, grid: &mut Grid) {
        let title = format!(
            " pathviz  draw: {:<5}  algorithm: {}",
            self.mode.label(),
            self.algorithm
        );
        let style = Style::default().with_attrs(AttrMask::BOLD);
        grid.print(Pos::new(0, 0), &title, style);
    }

    fn draw_board(&self, grid: &mut Grid) {
        for (p, state) in self.board.iter() {
            let style = colors::cell_style(state);
            let (left, right) = if self.hover == Some(p) && !self.is_running() {
                ('[', ']')
            } else {
                (' ', ' ')
            };
            let style = style.with_fg(colors::FG_DIM);
            let at = Pos::new(p.row + BOARD_TOP, p.col * CELL_WIDTH);
            grid.set(at, Cell::new(left, style));
            grid.set(at.shift(0, 1), Cell::new(right, style));
        }
    }

    fn draw_status(&self, grid: &mut Grid) {
        let row = BOARD_TOP + self.board.rows();
        let fg = match self.status {
            Status::Found(_) => colors::FG_OK,
            Status::NoRoute | Status::InvalidGrid | Status::Failed(_) => colors::FG_ERR,
            Status::Ready | Status::Running => colors::FG,
        };
        grid.print(
            Pos::new(row, 1),
            &self.status.to_string(),
            Style::default().with_fg(fg),
        );
        let help = if self.show_help { HELP } else { HINT };
        grid.print(
            Pos::new(row + 1, 1),
            help,
            Style::default().with_fg(colors::FG_DIM),
        );
    }
}

impl Model for PathvizModel {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Init => None,
            Msg::Quit => Some(Effect::End),
            Msg::KeyDown { key, .. } => self.handle_key(key),
            Msg::Mouse { action, pos, .. } => {
                self.handle_mouse(action, pos);
                None
            }
            Msg::Tick { time } => {
                self.tick(time);
                None
            }
            Msg::Screen { .. } => None,
        }
    }

    fn draw(&self, grid: &mut Grid) {
        grid.fill(Cell::default());
        self.draw_title(grid);
        self.draw_board(grid);
        self.draw_status(grid);
    }
}
