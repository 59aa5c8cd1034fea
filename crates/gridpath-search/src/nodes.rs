use gridpath_core::{Cell, GridModel, InvalidGrid};

use crate::cost::Cost;

/// Sentinel parent index for the start node.
pub(crate) const NO_PARENT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// Per-cell search state
// ---------------------------------------------------------------------------

/// `g` and `parent` are meaningful only once `discovered` is set.
#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: Cost,
    pub(crate) parent: usize,
    pub(crate) discovered: bool,
    pub(crate) closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: Cost::ZERO,
            parent: NO_PARENT,
            discovered: false,
            closed: false,
        }
    }
}

// ---------------------------------------------------------------------------
// NodeTable
// ---------------------------------------------------------------------------

/// Flat, row-major search state for one validated grid.
///
/// Holds a dense copy of the obstacle set so neighbor checks are a single
/// index, plus one [`Node`] per cell. Lives for exactly one search.
pub(crate) struct NodeTable {
    rows: i32,
    cols: i32,
    blocked: Vec<bool>,
    pub(crate) nodes: Vec<Node>,
    pub(crate) start: usize,
    pub(crate) goal: usize,
}

impl NodeTable {
    /// Validate `grid` and lay out its cells. Nothing is allocated when
    /// validation fails.
    pub(crate) fn new(grid: &GridModel) -> Result<Self, InvalidGrid> {
        grid.validate()?;
        let (rows, cols) = grid.dimensions();
        let len = grid.cell_count();
        let mut table = Self {
            rows,
            cols,
            blocked: vec![false; len],
            nodes: vec![Node::default(); len],
            start: NO_PARENT,
            goal: NO_PARENT,
        };
        // Validation guarantees every cell below is in bounds.
        for cell in grid.obstacles() {
            let i = table.flat(cell);
            table.blocked[i] = true;
        }
        table.start = table.flat(grid.start());
        table.goal = table.flat(grid.goal());
        Ok(table)
    }

    /// Row-major index of an in-bounds `cell`.
    #[inline]
    fn flat(&self, cell: Cell) -> usize {
        cell.row as usize * self.cols as usize + cell.col as usize
    }

    /// Convert a `Cell` to a flat index. Returns `None` if out of bounds.
    #[inline]
    pub(crate) fn idx(&self, cell: Cell) -> Option<usize> {
        cell.in_bounds(self.rows, self.cols).then(|| self.flat(cell))
    }

    /// Convert a flat index back to a `Cell`.
    #[inline]
    pub(crate) fn cell(&self, idx: usize) -> Cell {
        let cols = self.cols as usize;
        Cell::new((idx / cols) as i32, (idx % cols) as i32)
    }

    #[inline]
    pub(crate) fn is_free(&self, cell: Cell) -> bool {
        self.idx(cell).is_some_and(|i| !self.blocked[i])
    }

    /// Walk parent links from `idx` back to the start, returning the cells
    /// in start-to-`idx` order.
    pub(crate) fn path_to(&self, idx: usize) -> Vec<Cell> {
        let mut path = Vec::new();
        let mut ci = idx;
        while ci != NO_PARENT {
            path.push(self.cell(ci));
            ci = self.nodes[ci].parent;
        }
        path.reverse();
        path
    }
}
