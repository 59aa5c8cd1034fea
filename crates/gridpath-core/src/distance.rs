use crate::geom::Cell;

/// √2 − 1, the extra cost of a diagonal step over a cardinal one.
const DIAGONAL_EXTRA: f64 = std::f64::consts::SQRT_2 - 1.0;

/// Manhattan (L1) distance between two cells.
#[inline]
pub fn manhattan(a: Cell, b: Cell) -> f64 {
    let (dr, dc) = a.abs_diff(b);
    f64::from(dr + dc)
}

/// Octile distance: `max(dr, dc) + (√2 − 1) · min(dr, dc)`.
#[inline]
pub fn octile(a: Cell, b: Cell) -> f64 {
    let (dr, dc) = a.abs_diff(b);
    f64::from(dr.max(dc)) + DIAGONAL_EXTRA * f64::from(dr.min(dc))
}

/// A resolved heuristic.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Heuristic {
    Manhattan,
    Octile,
}

impl Heuristic {
    /// Estimated remaining cost from `from` to `to`.
    #[inline]
    pub fn estimate(self, from: Cell, to: Cell) -> f64 {
        match self {
            Heuristic::Manhattan => manhattan(from, to),
            Heuristic::Octile => octile(from, to),
        }
    }
}
