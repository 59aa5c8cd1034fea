//! Exact path costs.
//!
//! Every cost the search handles is `a + b·√2` for non-negative integers
//! `a` (cardinal steps) and `b` (diagonal steps). Keeping the two counts
//! instead of a float makes equal costs compare equal, so ties are broken
//! by the frontier keys and never by rounding.

use std::cmp::Ordering;
use std::f64::consts::SQRT_2;
use std::ops::Add;

use gridpath_core::{Cell, Direction, Heuristic};

/// `cardinal + diagonal·√2`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub(crate) struct Cost {
    pub(crate) cardinal: u32,
    pub(crate) diagonal: u32,
}

impl Cost {
    pub(crate) const ZERO: Cost = Cost {
        cardinal: 0,
        diagonal: 0,
    };

    #[inline]
    pub(crate) const fn new(cardinal: u32, diagonal: u32) -> Self {
        Self { cardinal, diagonal }
    }

    /// Cost of one move in `dir`.
    #[inline]
    pub(crate) const fn step(dir: Direction) -> Self {
        if dir.is_diagonal() {
            Self::new(0, 1)
        } else {
            Self::new(1, 0)
        }
    }

    /// `heuristic` from `from` to `to`, in exact form.
    pub(crate) fn estimate(heuristic: Heuristic, from: Cell, to: Cell) -> Self {
        let (dr, dc) = from.abs_diff(to);
        let (dr, dc) = (dr.unsigned_abs(), dc.unsigned_abs());
        match heuristic {
            Heuristic::Manhattan => Self::new(dr + dc, 0),
            Heuristic::Octile => Self::new(dr.max(dc) - dr.min(dc), dr.min(dc)),
        }
    }

    /// Nearest `f64`.
    #[inline]
    pub(crate) fn value(self) -> f64 {
        f64::from(self.cardinal) + f64::from(self.diagonal) * SQRT_2
    }
}

impl Add for Cost {
    type Output = Cost;

    #[inline]
    fn add(self, rhs: Cost) -> Cost {
        Cost::new(self.cardinal + rhs.cardinal, self.diagonal + rhs.diagonal)
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        // Sign of p + q·√2.
        let p = i64::from(self.cardinal) - i64::from(other.cardinal);
        let q = i64::from(self.diagonal) - i64::from(other.diagonal);
        if p.signum() * q.signum() >= 0 {
            return (p + q).cmp(&0);
        }
        // Opposite signs: the larger of p² and 2q² wins. They are never
        // equal because √2 is irrational.
        let pp = i128::from(p) * i128::from(p);
        let qq = 2 * i128::from(q) * i128::from(q);
        if pp > qq { p.cmp(&0) } else { q.cmp(&0) }
    }
}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
