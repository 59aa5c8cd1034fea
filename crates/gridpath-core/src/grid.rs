//! The [`GridModel`], a frozen occupancy map handed to a search by value.

use std::collections::BTreeSet;

use crate::config::SearchConfig;
use crate::distance::Heuristic;
use crate::error::{CellRole, InvalidGrid};
use crate::geom::Cell;
use crate::neighbors::{self, Step};

/// An immutable grid snapshot: dimensions, obstacles, endpoints and
/// movement rules.
///
/// Construction never fails; [`validate`](GridModel::validate) reports the
/// first problem found. Searches validate on entry, so an invalid model can
/// be built and inspected but never searched.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridModel {
    rows: i32,
    cols: i32,
    obstacles: BTreeSet<Cell>,
    start: Cell,
    goal: Cell,
    config: SearchConfig,
}

impl GridModel {
    /// Build a model from its parts. `dimensions` is `(rows, cols)`.
    pub fn new(
        dimensions: (i32, i32),
        obstacles: impl IntoIterator<Item = Cell>,
        start: Cell,
        goal: Cell,
        config: SearchConfig,
    ) -> Self {
        let (rows, cols) = dimensions;
        Self {
            rows,
            cols,
            obstacles: obstacles.into_iter().collect(),
            start,
            goal,
            config,
        }
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn dimensions(&self) -> (i32, i32) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn start(&self) -> Cell {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Cell {
        self.goal
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Obstacles in row-major order.
    pub fn obstacles(&self) -> impl ExactSizeIterator<Item = Cell> + '_ {
        self.obstacles.iter().copied()
    }

    /// Number of cells in the grid, zero when the dimensions are invalid.
    pub fn cell_count(&self) -> usize {
        if self.rows <= 0 || self.cols <= 0 {
            return 0;
        }
        self.rows as usize * self.cols as usize
    }

    /// Check every structural invariant, reporting the first violation.
    ///
    /// Order: dimensions, bounds (start, goal, then obstacles row-major),
    /// start/goal distinctness, start/goal occupancy.
    pub fn validate(&self) -> Result<(), InvalidGrid> {
        if self.rows <= 0 || self.cols <= 0 {
            return Err(InvalidGrid::NonPositiveDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let bounded = [(CellRole::Start, self.start), (CellRole::Goal, self.goal)]
            .into_iter()
            .chain(self.obstacles().map(|c| (CellRole::Obstacle, c)));
        for (role, cell) in bounded {
            if !self.contains(cell) {
                return Err(InvalidGrid::OutOfBounds { role, cell });
            }
        }
        if self.start == self.goal {
            return Err(InvalidGrid::StartEqualsGoal { cell: self.start });
        }
        for (role, cell) in [(CellRole::Start, self.start), (CellRole::Goal, self.goal)] {
            if self.is_obstacle(cell) {
                return Err(InvalidGrid::StartOrGoalBlocked { role, cell });
            }
        }
        Ok(())
    }

    /// Whether `cell` lies inside the grid.
    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.in_bounds(self.rows, self.cols)
    }

    #[inline]
    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.obstacles.contains(&cell)
    }

    /// In bounds and not an obstacle.
    #[inline]
    pub fn is_free(&self, cell: Cell) -> bool {
        self.contains(cell) && !self.is_obstacle(cell)
    }

    /// Legal moves out of `cell` with their costs, in enumeration order.
    pub fn neighbors(&self, cell: Cell) -> Vec<Step> {
        let mut buf = Vec::with_capacity(8);
        self.neighbors_into(cell, &mut buf);
        buf
    }

    /// Like [`neighbors`](Self::neighbors) but reuses `buf`, which is
    /// cleared first.
    pub fn neighbors_into(&self, cell: Cell, buf: &mut Vec<Step>) {
        buf.clear();
        neighbors::neighbors_into(cell, &self.config, |c| self.is_free(c), buf);
    }

    /// The heuristic matching this model's connectivity.
    #[inline]
    pub fn heuristic(&self) -> Heuristic {
        self.config.resolve_heuristic()
    }

    /// Heuristic estimate from `cell` to the goal.
    #[inline]
    pub fn estimate(&self, cell: Cell) -> f64 {
        self.heuristic().estimate(cell, self.goal)
    }
}
