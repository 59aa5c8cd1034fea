use crate::config::SearchConfig;
use crate::geom::{Cell, Direction};

/// Cost of a cardinal step.
pub const CARDINAL_COST: f64 = 1.0;
/// Cost of a diagonal step.
pub const DIAGONAL_COST: f64 = std::f64::consts::SQRT_2;

/// One legal move out of a cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Step {
    pub cell: Cell,
    pub cost: f64,
    pub dir: Direction,
}

/// Append the legal moves out of `from` into `buf`, in enumeration order.
///
/// `free` must return `false` for out-of-bounds and blocked cells. With
/// diagonals enabled, a diagonal move needs at least one free corner, or
/// both when `allow_corner_cutting` is off. The caller clears `buf`.
pub fn neighbors_into(
    from: Cell,
    config: &SearchConfig,
    free: impl Fn(Cell) -> bool,
    buf: &mut Vec<Step>,
) {
    for &dir in Direction::enumeration(config.allow_diagonal) {
        let to = from.step(dir);
        if !free(to) {
            continue;
        }
        let cost = match dir.corners() {
            None => CARDINAL_COST,
            Some((a, b)) => {
                let (fa, fb) = (free(from.step(a)), free(from.step(b)));
                let passable = if config.allow_corner_cutting {
                    fa || fb
                } else {
                    fa && fb
                };
                if !passable {
                    continue;
                }
                DIAGONAL_COST
            }
        };
        buf.push(Step { cell: to, cost, dir });
    }
}
