//! Step-by-step graph search on grid boards.
//!
//! This crate finds routes between the start and goal of a
//! [`Board`](pathviz_core::Board) one discovery at a time, so that every
//! intermediate state can be shown:
//!
//! - **BFS** breadth-first search ([`Algorithm::Bfs`])
//! - **GBFS** greedy best-first search on the Manhattan distance
//!   ([`Algorithm::Greedy`])
//! - **A\*** on the Manhattan distance ([`Algorithm::Astar`])
//!
//! A [`Search`] marks each newly discovered position Frontier as it goes.
//! Once it reaches the goal, a [`Trace`] follows the parent records back and
//! marks the route Path. [`Run`] chains the two into a single stream of
//! [`Event`]s, which [`Pacer`] (polled) or [`drive`] (blocking) release at a
//! chosen [`Pacing`]. [`run`] does all of it at once.
//!
//! # Trait hierarchy
//!
//! | Trait | Role |
//! |---|---|
//! | [`Pather`] | Passable neighbours of a position, in search order |
//! | [`Sink`] | Observer of every [`Event`] of a run |

mod astar;
mod bfs;
mod distance;
mod error;
mod gbfs;
mod neighbors;
mod record;
mod run;
mod search;
mod trace;
mod traits;

pub use distance::manhattan;
pub use error::{ParseAlgorithmError, RunError, TraceError};
pub use neighbors::{Neighbors, neighbors};
pub use record::{Cost, OpenSet, Records, SearchRecord};
pub use run::{Event, Pacer, Pacing, Run, RunOutcome, Sink, drive, run};
pub use search::{Algorithm, Discovery, Search, Status, Steps};
pub use trace::{Trace, trace_path};
pub use traits::Pather;
