//! **gridpath-core**: grid model and editing types for the gridpath search.
//!
//! This crate holds everything a search needs to be handed and nothing it
//! produces: cell geometry, the frozen [`GridModel`] with its validation
//! rules, neighbor enumeration and heuristics, the mutable [`GridMap`]
//! working copy used by editors, and a cooperative cancellation
//! [`Context`].

pub mod config;
pub mod context;
pub mod distance;
pub mod editor;
pub mod error;
pub mod geom;
pub mod grid;
pub mod neighbors;

pub use config::{HeuristicMode, SearchConfig};
pub use context::Context;
pub use distance::{Heuristic, manhattan, octile};
pub use editor::GridMap;
pub use error::{CellRole, InvalidGrid};
pub use geom::{Cell, Direction};
pub use grid::GridModel;
pub use neighbors::{CARDINAL_COST, DIAGONAL_COST, Step};
