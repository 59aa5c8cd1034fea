//! Traced A* search over a [`GridModel`](gridpath_core::GridModel).
//!
//! [`run`] validates a grid snapshot, searches it, and returns the cheapest
//! path together with a [`Trace`]: every discovery and expansion in the
//! order the algorithm decided on it, ready for a player to animate.
//!
//! ```
//! use gridpath_core::{Cell, GridModel, SearchConfig};
//! use gridpath_search::run;
//!
//! let grid = GridModel::new((3, 3), [], Cell::new(0, 0), Cell::new(2, 2), SearchConfig::four_way());
//! let (trace, outcome) = run(grid).unwrap();
//! assert_eq!(outcome.total_cost(), Some(4.0));
//! assert_eq!(trace.path().map(<[Cell]>::len), Some(5));
//! ```
//!
//! The search is single-threaded and has no side effects besides its own
//! log lines. Tie-breaks never depend on hashing or timing, so equal inputs
//! give equal traces.

mod astar;
mod cost;
mod frontier;
mod nodes;
mod outcome;
mod trace;

pub use astar::{run, run_with};
pub use outcome::{Outcome, SearchError};
pub use trace::{Event, Trace, TraceStats};
