//! [`GridMap`]: the mutable working copy edited by a front-end.
//!
//! Edits never reach a search in progress: [`GridMap::snapshot`] copies the
//! current state into a [`GridModel`] value.

use rand::Rng;

use crate::config::SearchConfig;
use crate::geom::Cell;
use crate::grid::GridModel;

/// An editable occupancy map with start and goal markers.
///
/// Start defaults to the top-left cell and goal to the bottom-right one.
/// Out-of-range edits are refused, never clamped.
#[derive(Clone, Debug)]
pub struct GridMap {
    rows: i32,
    cols: i32,
    blocked: Vec<bool>,
    start: Cell,
    goal: Cell,
}

impl GridMap {
    /// Create an obstacle-free `rows` × `cols` map.
    pub fn new(rows: i32, cols: i32) -> Self {
        let len = rows.max(0) as usize * cols.max(0) as usize;
        Self {
            rows,
            cols,
            blocked: vec![false; len],
            start: Cell::ORIGIN,
            goal: Cell::new(rows - 1, cols - 1),
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

    #[inline]
    pub fn start(&self) -> Cell {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Cell {
        self.goal
    }

    #[inline]
    fn idx(&self, cell: Cell) -> Option<usize> {
        if !cell.in_bounds(self.rows, self.cols) {
            return None;
        }
        Some(cell.row as usize * self.cols as usize + cell.col as usize)
    }

    /// In bounds and not an obstacle.
    pub fn is_free(&self, cell: Cell) -> bool {
        self.idx(cell).is_some_and(|i| !self.blocked[i])
    }

    /// Mark `cell` as an obstacle. Refused (returns `false`) when out of
    /// bounds or on the start or goal cell.
    pub fn set_obstacle(&mut self, cell: Cell) -> bool {
        if cell == self.start || cell == self.goal {
            return false;
        }
        match self.idx(cell) {
            Some(i) => {
                self.blocked[i] = true;
                true
            }
            None => false,
        }
    }

    /// Make `cell` passable again. Returns `false` when out of bounds.
    pub fn clear_obstacle(&mut self, cell: Cell) -> bool {
        match self.idx(cell) {
            Some(i) => {
                self.blocked[i] = false;
                true
            }
            None => false,
        }
    }

    /// Set many obstacles at once; returns how many were accepted.
    pub fn set_obstacles(&mut self, cells: impl IntoIterator<Item = Cell>) -> usize {
        cells.into_iter().filter(|&c| self.set_obstacle(c)).count()
    }

    /// Remove every obstacle.
    pub fn clear_obstacles(&mut self) {
        self.blocked.fill(false);
    }

    /// Move the start marker. Refused when the cell is not free.
    pub fn set_start(&mut self, cell: Cell) -> bool {
        if !self.is_free(cell) {
            return false;
        }
        self.start = cell;
        true
    }

    /// Move the goal marker. Refused when the cell is not free.
    pub fn set_goal(&mut self, cell: Cell) -> bool {
        if !self.is_free(cell) {
            return false;
        }
        self.goal = cell;
        true
    }

    /// Number of obstacle cells.
    pub fn obstacle_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| b).count()
    }

    /// Obstacles in row-major order.
    pub fn obstacles(&self) -> impl Iterator<Item = Cell> + '_ {
        let cols = self.cols.max(1);
        self.blocked
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b)
            .map(move |(i, _)| Cell::new(i as i32 / cols, i as i32 % cols))
    }

    /// Randomly turn free cells into obstacles, each with probability
    /// `density`. Start and goal are never covered. Returns the number of
    /// cells placed.
    pub fn scatter_obstacles(&mut self, rng: &mut impl Rng, density: f64) -> usize {
        let mut placed = 0;
        for row in 0..self.rows {
            for col in 0..self.cols {
                let cell = Cell::new(row, col);
                if rng.random::<f64>() < density && self.is_free(cell) && self.set_obstacle(cell) {
                    placed += 1;
                }
            }
        }
        placed
    }

    /// Freeze the current state into a search-ready model.
    pub fn snapshot(&self, config: SearchConfig) -> GridModel {
        GridModel::new(
            (self.rows, self.cols),
            self.obstacles(),
            self.start,
            self.goal,
            config,
        )
    }
}
