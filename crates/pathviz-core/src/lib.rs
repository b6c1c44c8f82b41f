//! **pathviz-core**: shared types for the pathviz grid-search visualizer.
//!
//! This crate provides the [`Board`] that searches run against, the
//! geometry primitives used everywhere, and the small Elm-architecture
//! application loop (render [`Grid`], frame diffing, [`Msg`], [`Driver`])
//! that the terminal front-end is built on.

pub mod app;
pub mod board;
pub mod cell;
pub mod geom;
pub mod grid;
pub mod messages;

pub use app::{App, AppConfig, Context, Driver, Effect, Model};
pub use board::{Board, BoardError, CellState};
pub use cell::{AttrMask, Cell, Color, Style};
pub use geom::{Pos, Range};
pub use grid::Grid;
pub use messages::{Key, MouseAction, Msg};
