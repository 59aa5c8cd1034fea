//! [`Board`]: what every cell looks like at one playback frame.

use gridpath_core::{Cell, GridModel};

/// Display state of one cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mark {
    #[default]
    Empty,
    Obstacle,
    Start,
    Goal,
    /// Discovered, not yet expanded.
    Frontier,
    /// Expanded.
    Visited,
    /// On the final path (endpoints keep their own marks).
    Path,
}

impl Mark {
    /// ASCII glyph used by [`Board::render_ascii`].
    pub const fn glyph(self) -> char {
        match self {
            Mark::Empty => '.',
            Mark::Obstacle => '#',
            Mark::Start => 'S',
            Mark::Goal => 'G',
            Mark::Frontier => '+',
            Mark::Visited => 'o',
            Mark::Path => '*',
        }
    }

    /// Start, goal and obstacles never change during playback.
    #[inline]
    pub const fn is_fixed(self) -> bool {
        matches!(self, Mark::Obstacle | Mark::Start | Mark::Goal)
    }
}

/// A row-major grid of [`Mark`]s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    rows: i32,
    cols: i32,
    marks: Vec<Mark>,
}

impl Board {
    /// The frame-zero board for `grid`: obstacles, start and goal only.
    pub fn from_model(grid: &GridModel) -> Self {
        let (rows, cols) = grid.dimensions();
        let mut board = Self {
            rows,
            cols,
            marks: vec![Mark::Empty; grid.cell_count()],
        };
        for cell in grid.obstacles() {
            board.set(cell, Mark::Obstacle);
        }
        board.set(grid.start(), Mark::Start);
        board.set(grid.goal(), Mark::Goal);
        board
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
    fn idx(&self, cell: Cell) -> Option<usize> {
        if !cell.in_bounds(self.rows, self.cols) {
            return None;
        }
        Some(cell.row as usize * self.cols as usize + cell.col as usize)
    }

    /// The mark at `cell`, `None` outside the board.
    pub fn at(&self, cell: Cell) -> Option<Mark> {
        self.idx(cell).map(|i| self.marks[i])
    }

    /// Overwrite the mark at `cell`, returning the previous one.
    pub fn set(&mut self, cell: Cell, mark: Mark) -> Option<Mark> {
        let i = self.idx(cell)?;
        Some(std::mem::replace(&mut self.marks[i], mark))
    }

    /// Cells holding `mark`, row-major.
    pub fn cells_with(&self, mark: Mark) -> impl Iterator<Item = Cell> + '_ {
        let cols = self.cols.max(1);
        self.marks
            .iter()
            .enumerate()
            .filter(move |&(_, &m)| m == mark)
            .map(move |(i, _)| Cell::new(i as i32 / cols, i as i32 % cols))
    }

    /// How many cells hold `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.marks.iter().filter(|&&m| m == mark).count()
    }

    /// One line per row, one glyph per cell.
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity(self.marks.len() + self.rows.max(0) as usize);
        for row in 0..self.rows {
            for col in 0..self.cols {
                let mark = self.at(Cell::new(row, col)).unwrap_or_default();
                out.push(mark.glyph());
            }
            out.push('\n');
        }
        out
    }
}
