use std::fmt;

use gridpath_core::{Cell, InvalidGrid};

/// How a completed search ended. Unreachability is an outcome, not an
/// error.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The cheapest path, start to goal inclusive, and its cost.
    Success { path: Vec<Cell>, total_cost: f64 },
    /// No path exists under the model's obstacles and connectivity.
    Unreachable,
}

impl Outcome {
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn path(&self) -> Option<&[Cell]> {
        match self {
            Outcome::Success { path, .. } => Some(path),
            Outcome::Unreachable => None,
        }
    }

    pub fn total_cost(&self) -> Option<f64> {
        match self {
            Outcome::Success { total_cost, .. } => Some(*total_cost),
            Outcome::Unreachable => None,
        }
    }
}

/// Errors from [`run_with`](crate::run_with).
#[derive(Clone, Debug, PartialEq)]
pub enum SearchError {
    /// The model failed validation; nothing was searched.
    Invalid(InvalidGrid),
    /// The context was cancelled; all partial state was discarded.
    Cancelled { expanded: usize },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(e) => write!(f, "search rejected: {e}"),
            Self::Cancelled { expanded } => {
                write!(f, "search cancelled after {expanded} expansions")
            }
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Invalid(e) => Some(e),
            Self::Cancelled { .. } => None,
        }
    }
}

impl From<InvalidGrid> for SearchError {
    fn from(e: InvalidGrid) -> Self {
        Self::Invalid(e)
    }
}
