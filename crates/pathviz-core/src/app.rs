//! The Elm-architecture application loop: [`Model`], [`Driver`], [`Effect`],
//! [`App`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};

use log::debug;

use crate::grid::{Frame, Grid, compute_frame};
use crate::messages::Msg;

// ---------------------------------------------------------------------------
// Context (cancellation token)
// ---------------------------------------------------------------------------

/// A cooperative-cancellation token backed by an [`AtomicBool`].
#[derive(Clone, Debug, Default)]
pub struct Context {
    done: Arc<AtomicBool>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// A side-effect returned by [`Model::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Stop the application loop.
    End,
}

// ---------------------------------------------------------------------------
// Model / Driver
// ---------------------------------------------------------------------------

/// The application model (Elm architecture).
pub trait Model {
    /// Process a message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Render the current state into `grid`.
    fn draw(&self, grid: &mut Grid);
}

/// Back-end driver (e.g. a terminal).
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>>;

    /// Poll for input, sending messages through `tx`. Should return promptly
    /// (within a frame) so the loop can tick.
    fn poll_msgs(
        &mut self,
        ctx: &Context,
        tx: Sender<Msg>,
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Flush a computed frame to the screen.
    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>>;

    /// Release the back-end.
    fn close(&mut self);
}

// ---------------------------------------------------------------------------
// AppConfig / App
// ---------------------------------------------------------------------------

/// Configuration for creating an [`App`].
pub struct AppConfig<M: Model, D: Driver> {
    pub model: M,
    pub driver: D,
    pub rows: i32,
    pub cols: i32,
}

/// The main application runner.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    rows: i32,
    cols: i32,
}

impl<M: Model, D: Driver> App<M, D> {
    pub fn new(config: AppConfig<M, D>) -> Self {
        Self {
            model: config.model,
            driver: config.driver,
            rows: config.rows,
            cols: config.cols,
        }
    }

    /// The model, e.g. to inspect it after [`run`](Self::run) returns.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Run the Model-View-Update loop.
    ///
    /// 1. Initialises the driver and sends `Msg::Init`.
    /// 2. Loops: poll → tick → update → draw → diff → flush.
    /// 3. Stops when the model returns `Effect::End`.
    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.driver.init()?;

        let ctx = Context::new();
        let (tx, rx): (Sender<Msg>, Receiver<Msg>) = mpsc::channel();
        tx.send(Msg::Init).ok();

        let mut prev_grid = Grid::new(self.rows, self.cols);
        let mut curr_grid = Grid::new(self.rows, self.cols);

        let result = self.event_loop(&ctx, &tx, &rx, &mut prev_grid, &mut curr_grid);
        self.driver.close();
        result
    }

    fn event_loop(
        &mut self,
        ctx: &Context,
        tx: &Sender<Msg>,
        rx: &Receiver<Msg>,
        prev_grid: &mut Grid,
        curr_grid: &mut Grid,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.process_pending(rx, ctx, prev_grid, curr_grid)?;

        while !ctx.is_done() {
            if let Err(e) = self.driver.poll_msgs(ctx, tx.clone()) {
                debug!("driver poll failed: {e}");
                ctx.cancel();
                return Err(e);
            }
            if ctx.is_done() {
                break;
            }
            tx.send(Msg::tick()).ok();
            self.process_pending(rx, ctx, prev_grid, curr_grid)?;
        }
        Ok(())
    }

    /// Drain queued messages, update the model, draw, diff, and flush.
    fn process_pending(
        &mut self,
        rx: &Receiver<Msg>,
        ctx: &Context,
        prev_grid: &mut Grid,
        curr_grid: &mut Grid,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut needs_draw = false;

        while let Ok(msg) = rx.try_recv() {
            if let Some(Effect::End) = self.model.update(msg) {
                ctx.cancel();
                return Ok(());
            }
            needs_draw = true;
        }

        if needs_draw {
            self.model.draw(curr_grid);
            let frame = compute_frame(prev_grid, curr_grid);
            if !frame.cells.is_empty() {
                self.driver.flush(frame)?;
            }
            prev_grid.copy_from(curr_grid);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::geom::Pos;
    use crate::messages::Key;

    /// Counts ticks and quits on `q`.
    #[derive(Default)]
    struct Counter {
        ticks: u32,
        inits: u32,
    }

    impl Model for Counter {
        fn update(&mut self, msg: Msg) -> Option<Effect> {
            match msg {
                Msg::Init => {
                    self.inits += 1;
                    None
                }
                Msg::Tick { .. } => {
                    self.ticks += 1;
                    None
                }
                Msg::KeyDown {
                    key: Key::Char('q'),
                    ..
                } => Some(Effect::End),
                _ => None,
            }
        }

        fn draw(&self, grid: &mut Grid) {
            let digit = char::from_digit(self.ticks % 10, 10).unwrap_or('?');
            grid.set(Pos::new(0, 0), Cell::default().with_char(digit));
        }
    }

    /// Replays a fixed script, one message per poll.
    struct Scripted {
        script: Vec<Msg>,
        frames: Vec<Frame>,
        closed: bool,
    }

    impl Driver for Scripted {
        fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
            self.script.reverse();
            Ok(())
        }

        fn poll_msgs(
            &mut self,
            _ctx: &Context,
            tx: Sender<Msg>,
        ) -> Result<(), Box<dyn std::error::Error>> {
            if let Some(msg) = self.script.pop() {
                tx.send(msg).ok();
            }
            Ok(())
        }

        fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn std::error::Error>> {
            self.frames.push(frame);
            Ok(())
        }

        fn close(&mut self) {
            self.closed = true;
        }
    }

    #[test]
    fn loop_ticks_until_end() {
        let driver = Scripted {
            script: vec![Msg::tick(), Msg::tick(), Msg::key(Key::Char('q'))],
            frames: Vec::new(),
            closed: false,
        };
        let mut app = App::new(AppConfig {
            model: Counter::default(),
            driver,
            rows: 1,
            cols: 1,
        });
        app.run().unwrap();
        assert_eq!(app.model().inits, 1);
        // Two scripted ticks plus one loop tick after each of the first two polls.
        assert_eq!(app.model().ticks, 4);
        assert!(app.driver.closed);
        assert!(!app.driver.frames.is_empty());
    }
}
