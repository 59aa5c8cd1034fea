//! Grid validation errors.

use std::fmt;

use crate::geom::Cell;

/// Which special cell a validation failure refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CellRole {
    Start,
    Goal,
    Obstacle,
}

impl fmt::Display for CellRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::Goal => "goal",
            Self::Obstacle => "obstacle",
        })
    }
}

/// Reasons a grid model is rejected before any search state exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvalidGrid {
    /// `rows` or `cols` is zero or negative.
    NonPositiveDimensions { rows: i32, cols: i32 },
    /// A start, goal or obstacle cell lies outside the grid.
    OutOfBounds { role: CellRole, cell: Cell },
    /// Start and goal are the same cell.
    StartEqualsGoal { cell: Cell },
    /// The start or goal cell is an obstacle.
    StartOrGoalBlocked { role: CellRole, cell: Cell },
}

impl fmt::Display for InvalidGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveDimensions { rows, cols } => {
                write!(f, "invalid grid: dimensions {rows}x{cols} must both be positive")
            }
            Self::OutOfBounds { role, cell } => {
                write!(f, "invalid grid: {role} cell {cell} is out of bounds")
            }
            Self::StartEqualsGoal { cell } => {
                write!(f, "invalid grid: start and goal are both {cell}")
            }
            Self::StartOrGoalBlocked { role, cell } => {
                write!(f, "invalid grid: {role} cell {cell} is an obstacle")
            }
        }
    }
}

impl std::error::Error for InvalidGrid {}
