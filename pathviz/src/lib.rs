//! pathviz: a terminal visualizer for BFS, greedy best-first and A* search.
//!
//! The binary draws a [`Board`](pathviz_core::Board) in the terminal, lets
//! the user paint walls, a start and a goal with the mouse, and animates a
//! search and its route with [`pathviz_search`]. `--headless` skips the UI
//! and prints a single run on a random board.

pub mod cli;
pub mod colors;
pub mod config;
pub mod headless;
pub mod model;
pub mod walls;

pub use cli::Args;
pub use config::{ConfigLoadError, PathvizConfig};
pub use headless::{Report, run_board, run_headless};
pub use model::{DrawMode, PathvizModel, Status};
