use std::convert::Infallible;

use gridpath_core::{Context, GridModel, Heuristic, InvalidGrid, Step};

use crate::cost::Cost;
use crate::frontier::Frontier;
use crate::nodes::{NO_PARENT, NodeTable};
use crate::outcome::{Outcome, SearchError};
use crate::trace::{Event, Trace};

/// Run A* on `grid`, recording every decision.
///
/// The model is validated first; an invalid model is rejected before any
/// search state is allocated. Equal models always produce equal traces and
/// outcomes.
pub fn run(grid: GridModel) -> Result<(Trace, Outcome), InvalidGrid> {
    let engine = Engine::new(&grid)?;
    match engine.search(Never) {
        Ok(done) => Ok(done),
        Err(never) => match never {},
    }
}

/// Like [`run`], polling `ctx` once per iteration.
///
/// A cancelled search returns [`SearchError::Cancelled`]; the partial trace
/// is dropped.
pub fn run_with(grid: GridModel, ctx: &Context) -> Result<(Trace, Outcome), SearchError> {
    let engine = Engine::new(&grid)?;
    engine.search(ctx)
}

// ---------------------------------------------------------------------------
// Cancellation polling
// ---------------------------------------------------------------------------

trait Poll {
    type Error;
    fn poll(&self, expanded: usize) -> Result<(), Self::Error>;
}

struct Never;

impl Poll for Never {
    type Error = Infallible;

    #[inline]
    fn poll(&self, _expanded: usize) -> Result<(), Infallible> {
        Ok(())
    }
}

impl Poll for &Context {
    type Error = SearchError;

    #[inline]
    fn poll(&self, expanded: usize) -> Result<(), SearchError> {
        if self.is_done() {
            log::warn!("[astar] cancelled after {expanded} expansions");
            return Err(SearchError::Cancelled { expanded });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// State of one search call. Consumed by [`Engine::search`].
struct Engine<'g> {
    grid: &'g GridModel,
    heuristic: Heuristic,
    table: NodeTable,
    frontier: Frontier,
    trace: Trace,
    expanded: usize,
}

impl<'g> Engine<'g> {
    fn new(grid: &'g GridModel) -> Result<Self, InvalidGrid> {
        let table = NodeTable::new(grid)?;
        Ok(Self {
            grid,
            heuristic: grid.heuristic(),
            table,
            frontier: Frontier::default(),
            trace: Trace::default(),
            expanded: 0,
        })
    }

    /// Record a (re)discovery of `idx` and queue it.
    fn discover(&mut self, idx: usize, parent: usize, g: Cost, rank: u8) {
        let cell = self.table.cell(idx);
        let h = Cost::estimate(self.heuristic, cell, self.grid.goal());

        let node = &mut self.table.nodes[idx];
        node.g = g;
        node.parent = parent;
        node.discovered = true;

        self.frontier.push(idx, g, h, rank);
        let parent = (parent != NO_PARENT).then(|| self.table.cell(parent));
        self.trace.append(Event::Discovered {
            cell,
            parent,
            g: g.value(),
            h: h.value(),
        });
    }

    fn search<P: Poll>(mut self, poll: P) -> Result<(Trace, Outcome), P::Error> {
        let config = *self.grid.config();
        log::debug!(
            "[astar] run: {}x{} start={} goal={} diagonal={} corner_cutting={}",
            self.grid.rows(),
            self.grid.cols(),
            self.grid.start(),
            self.grid.goal(),
            config.allow_diagonal,
            config.allow_corner_cutting,
        );

        self.discover(self.table.start, NO_PARENT, Cost::ZERO, 0);
        let mut steps: Vec<Step> = Vec::with_capacity(8);

        loop {
            poll.poll(self.expanded)?;

            let Some(entry) = self.frontier.pop() else {
                break;
            };
            let ci = entry.idx;

            // Skip closed cells and superseded entries.
            let node = &self.table.nodes[ci];
            if node.closed || entry.g > node.g {
                continue;
            }

            self.table.nodes[ci].closed = true;
            self.expanded += 1;
            let current = self.table.cell(ci);
            let current_g = entry.g;
            log::trace!(
                "[astar] expand {current} g={:.3} f={:.3}",
                current_g.value(),
                entry.f.value()
            );
            self.trace.append(Event::Expanded { cell: current });

            if ci == self.table.goal {
                let path = self.table.path_to(ci);
                log::debug!(
                    "[astar] path found: {} cells, cost={:.3}, expanded={}, frontier={}",
                    path.len(),
                    current_g.value(),
                    self.expanded,
                    self.frontier.len(),
                );
                self.trace.append(Event::PathFound { path: path.clone() });
                return Ok((
                    self.trace,
                    Outcome::Success {
                        path,
                        total_cost: current_g.value(),
                    },
                ));
            }

            steps.clear();
            let table = &self.table;
            gridpath_core::neighbors::neighbors_into(
                current,
                &config,
                |c| table.is_free(c),
                &mut steps,
            );

            for step in &steps {
                let Some(ni) = self.table.idx(step.cell) else {
                    continue;
                };
                let n = &self.table.nodes[ni];
                if n.closed {
                    continue;
                }
                let tentative_g = current_g + Cost::step(step.dir);
                if n.discovered && tentative_g >= n.g {
                    continue;
                }
                self.discover(ni, ci, tentative_g, step.dir.rank());
            }
        }

        log::debug!("[astar] unreachable after {} expansions", self.expanded);
        self.trace.append(Event::Unreachable);
        Ok((self.trace, Outcome::Unreachable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridpath_core::{Cell, CellRole, GridMap, SearchConfig};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f64::consts::SQRT_2;

    fn c(row: i32, col: i32) -> Cell {
        Cell::new(row, col)
    }

    fn grid(
        dims: (i32, i32),
        obstacles: &[(i32, i32)],
        start: (i32, i32),
        goal: (i32, i32),
        config: SearchConfig,
    ) -> GridModel {
        GridModel::new(
            dims,
            obstacles.iter().map(|&o| Cell::from(o)),
            start.into(),
            goal.into(),
            config,
        )
    }

    fn disc(cell: Cell, parent: Option<Cell>, g: f64, h: f64) -> Event {
        Event::Discovered { cell, parent, g, h }
    }

    fn exp(cell: Cell) -> Event {
        Event::Expanded { cell }
    }

    /// Reference cheapest cost from `from` to every cell, by repeated
    /// relaxation over all cells.
    fn brute_force_costs(model: &GridModel, from: Cell) -> Vec<Option<f64>> {
        let (rows, cols) = model.dimensions();
        let idx = |c: Cell| (c.row * cols + c.col) as usize;
        let mut dist = vec![f64::INFINITY; (rows * cols) as usize];
        dist[idx(from)] = 0.0;
        let mut changed = true;
        while changed {
            changed = false;
            for row in 0..rows {
                for col in 0..cols {
                    let cell = Cell::new(row, col);
                    let d = dist[idx(cell)];
                    if !d.is_finite() || !model.is_free(cell) {
                        continue;
                    }
                    for step in model.neighbors(cell) {
                        let nd = d + step.cost;
                        if nd + 1e-12 < dist[idx(step.cell)] {
                            dist[idx(step.cell)] = nd;
                            changed = true;
                        }
                    }
                }
            }
        }
        dist.into_iter().map(|d| d.is_finite().then_some(d)).collect()
    }

    fn random_model(rng: &mut StdRng, config: SearchConfig) -> GridModel {
        let rows = rng.random_range(2..8);
        let cols = rng.random_range(2..8);
        let mut map = GridMap::new(rows, cols);
        map.scatter_obstacles(rng, 0.3);
        loop {
            let s = Cell::new(rng.random_range(0..rows), rng.random_range(0..cols));
            let g = Cell::new(rng.random_range(0..rows), rng.random_range(0..cols));
            if s != g && map.is_free(s) && map.is_free(g) {
                map.set_start(s);
                map.set_goal(g);
                break;
            }
        }
        map.snapshot(config)
    }

    const CONFIGS: [SearchConfig; 3] = [
        SearchConfig::four_way(),
        SearchConfig::eight_way(false),
        SearchConfig::eight_way(true),
    ];

    #[test]
    fn four_way_3x3_exact_trace() {
        let (trace, outcome) = run(grid((3, 3), &[], (0, 0), (2, 2), SearchConfig::four_way())).unwrap();
        let path = vec![c(0, 0), c(1, 0), c(2, 0), c(2, 1), c(2, 2)];
        assert_eq!(
            outcome,
            Outcome::Success {
                path: path.clone(),
                total_cost: 4.0
            }
        );
        let expected = vec![
            disc(c(0, 0), None, 0.0, 4.0),
            exp(c(0, 0)),
            disc(c(1, 0), Some(c(0, 0)), 1.0, 3.0),
            disc(c(0, 1), Some(c(0, 0)), 1.0, 3.0),
            exp(c(1, 0)),
            disc(c(2, 0), Some(c(1, 0)), 2.0, 2.0),
            disc(c(1, 1), Some(c(1, 0)), 2.0, 2.0),
            exp(c(2, 0)),
            disc(c(2, 1), Some(c(2, 0)), 3.0, 1.0),
            exp(c(2, 1)),
            disc(c(2, 2), Some(c(2, 1)), 4.0, 0.0),
            exp(c(2, 2)),
            Event::PathFound { path },
        ];
        assert_eq!(trace.events(), &expected[..]);
    }

    #[test]
    fn diagonal_3x3_goes_straight_through() {
        let (trace, outcome) =
            run(grid((3, 3), &[], (0, 0), (2, 2), SearchConfig::eight_way(true))).unwrap();
        assert_eq!(outcome.path(), Some(&[c(0, 0), c(1, 1), c(2, 2)][..]));
        let cost = outcome.total_cost().unwrap();
        assert!((cost - 2.0 * SQRT_2).abs() < 1e-9);
        assert_eq!(trace.expanded_cells().collect::<Vec<_>>(), vec![c(0, 0), c(1, 1), c(2, 2)]);
    }

    #[test]
    fn strict_corners_block_the_only_diagonal() {
        let model = grid(
            (3, 3),
            &[(0, 1), (1, 0)],
            (0, 0),
            (1, 1),
            SearchConfig::eight_way(false),
        );
        let (trace, outcome) = run(model).unwrap();
        assert_eq!(outcome, Outcome::Unreachable);
        assert_eq!(
            trace.events(),
            &[disc(c(0, 0), None, 0.0, SQRT_2), exp(c(0, 0)), Event::Unreachable][..]
        );
    }

    #[test]
    fn two_blocked_corners_stop_cutting_too() {
        let model = grid(
            (3, 3),
            &[(0, 1), (1, 0)],
            (0, 0),
            (1, 1),
            SearchConfig::eight_way(true),
        );
        assert_eq!(run(model).unwrap().1, Outcome::Unreachable);
    }

    #[test]
    fn one_blocked_corner_depends_on_policy() {
        let strict = grid((2, 2), &[(0, 1)], (0, 0), (1, 1), SearchConfig::eight_way(false));
        let (_, outcome) = run(strict).unwrap();
        assert_eq!(outcome.path(), Some(&[c(0, 0), c(1, 0), c(1, 1)][..]));
        assert_eq!(outcome.total_cost(), Some(2.0));

        let cutting = grid((2, 2), &[(0, 1)], (0, 0), (1, 1), SearchConfig::eight_way(true));
        let (_, outcome) = run(cutting).unwrap();
        assert_eq!(outcome.path(), Some(&[c(0, 0), c(1, 1)][..]));
    }

    #[test]
    fn enclosed_goal_is_unreachable() {
        let model = grid(
            (5, 5),
            &[(1, 2), (1, 3), (1, 4), (2, 2), (2, 4), (3, 2), (3, 3), (3, 4)],
            (0, 0),
            (2, 3),
            SearchConfig::eight_way(true),
        );
        let (trace, outcome) = run(model).unwrap();
        assert_eq!(outcome, Outcome::Unreachable);
        assert_eq!(trace.terminal(), Some(&Event::Unreachable));
        assert!(!trace.iter().any(|e| matches!(e, Event::PathFound { .. })));
        // Every reachable free cell outside the ring was expanded.
        assert_eq!(trace.stats().expanded, 25 - 8 - 1);
    }

    #[test]
    fn improved_rediscovery_wins_four_way() {
        let model = grid((2, 5), &[(1, 1)], (0, 4), (1, 0), SearchConfig::four_way());
        let (trace, outcome) = run(model).unwrap();
        let path = vec![c(0, 4), c(0, 3), c(0, 2), c(0, 1), c(0, 0), c(1, 0)];
        assert_eq!(
            outcome,
            Outcome::Success {
                path: path.clone(),
                total_cost: 5.0
            }
        );
        let expected = vec![
            disc(c(0, 4), None, 0.0, 5.0),
            exp(c(0, 4)),
            disc(c(1, 4), Some(c(0, 4)), 1.0, 4.0),
            disc(c(0, 3), Some(c(0, 4)), 1.0, 4.0),
            exp(c(1, 4)),
            disc(c(1, 3), Some(c(1, 4)), 2.0, 3.0),
            exp(c(1, 3)),
            disc(c(1, 2), Some(c(1, 3)), 3.0, 2.0),
            exp(c(1, 2)),
            // First, worse discovery of (0, 2)...
            disc(c(0, 2), Some(c(1, 2)), 4.0, 3.0),
            exp(c(0, 3)),
            // ...superseded by a cheaper one; the stale entry is skipped.
            disc(c(0, 2), Some(c(0, 3)), 2.0, 3.0),
            exp(c(0, 2)),
            disc(c(0, 1), Some(c(0, 2)), 3.0, 2.0),
            exp(c(0, 1)),
            disc(c(0, 0), Some(c(0, 1)), 4.0, 1.0),
            exp(c(0, 0)),
            disc(c(1, 0), Some(c(0, 0)), 5.0, 0.0),
            exp(c(1, 0)),
            Event::PathFound { path },
        ];
        assert_eq!(trace.events(), &expected[..]);
        assert_eq!(trace.stats().rediscovered, 1);
    }

    #[test]
    fn improved_rediscovery_wins_eight_way() {
        let model = grid((2, 4), &[(0, 2)], (1, 0), (0, 3), SearchConfig::eight_way(true));
        let (trace, outcome) = run(model).unwrap();
        assert_eq!(outcome.path(), Some(&[c(1, 0), c(1, 1), c(1, 2), c(0, 3)][..]));
        assert!((outcome.total_cost().unwrap() - (2.0 + SQRT_2)).abs() < 1e-9);

        let gs: Vec<(Option<Cell>, f64)> = trace
            .iter()
            .filter_map(|e| match e {
                Event::Discovered { cell, parent, g, .. } if *cell == c(1, 2) => Some((*parent, *g)),
                _ => None,
            })
            .collect();
        assert_eq!(gs.len(), 2);
        assert_eq!(gs[0].0, Some(c(0, 1)));
        assert!((gs[0].1 - 2.0 * SQRT_2).abs() < 1e-9);
        assert_eq!(gs[1], (Some(c(1, 1)), 2.0));
    }

    /// `a + b·√2`, rounded the same way the trace rounds exact costs.
    fn v(a: u32, b: u32) -> f64 {
        f64::from(a) + f64::from(b) * SQRT_2
    }

    #[test]
    fn eight_way_equal_f_prefers_lower_h() {
        // After (1, 1) is expanded, (1, 2) and (0, 2) both have f = 1 + 2√2,
        // reached through different float sums. (0, 2) is closer to the goal.
        let model = grid((2, 4), &[(0, 1)], (0, 0), (0, 3), SearchConfig::eight_way(true));
        let (trace, outcome) = run(model).unwrap();
        let path = vec![c(0, 0), c(1, 1), c(0, 2), c(0, 3)];
        assert_eq!(
            outcome,
            Outcome::Success {
                path: path.clone(),
                total_cost: v(1, 2)
            }
        );
        let expected = vec![
            disc(c(0, 0), None, 0.0, 3.0),
            exp(c(0, 0)),
            disc(c(1, 0), Some(c(0, 0)), 1.0, v(2, 1)),
            disc(c(1, 1), Some(c(0, 0)), SQRT_2, v(1, 1)),
            exp(c(1, 1)),
            disc(c(1, 2), Some(c(1, 1)), v(1, 1), SQRT_2),
            disc(c(0, 2), Some(c(1, 1)), v(0, 2), 1.0),
            exp(c(0, 2)),
            disc(c(0, 3), Some(c(0, 2)), v(1, 2), 0.0),
            disc(c(1, 3), Some(c(0, 2)), v(0, 3), 1.0),
            exp(c(0, 3)),
            Event::PathFound { path },
        ];
        assert_eq!(trace.events(), &expected[..]);
    }

    #[test]
    fn expansions_follow_f_then_h() {
        let mut rng = StdRng::seed_from_u64(0x7E);
        for config in [SearchConfig::eight_way(false), SearchConfig::eight_way(true)] {
            for _ in 0..300 {
                let model = random_model(&mut rng, config);
                let (trace, _) = run(model.clone()).unwrap();
                // Latest (g, h) of every cell still open.
                let mut open = std::collections::BTreeMap::new();
                for event in &trace {
                    match event {
                        Event::Discovered { cell, g, h, .. } => {
                            open.insert(*cell, (*g, *h));
                        }
                        Event::Expanded { cell } => {
                            let Some((g, h)) = open.remove(cell) else {
                                panic!("{cell} expanded while not open in {model:?}");
                            };
                            let f = g + h;
                            for (other, &(og, oh)) in &open {
                                let of = og + oh;
                                assert!(of > f - 1e-9, "{other} had lower f than {cell}");
                                assert!(
                                    (of - f).abs() >= 1e-9 || oh >= h - 1e-9,
                                    "{other} tied with {cell} on f but had lower h in {model:?}"
                                );
                            }
                        }
                        Event::PathFound { .. } | Event::Unreachable => {}
                    }
                }
            }
        }
    }

    #[test]
    fn short_search_on_large_grid_keeps_a_small_trace() {
        let model = grid((300, 300), &[], (0, 0), (0, 1), SearchConfig::four_way());
        let (trace, _) = run(model).unwrap();
        assert!(trace.len() < 10);
        assert!(trace.capacity() < 64, "capacity {}", trace.capacity());
    }

    #[test]
    fn invalid_grid_is_rejected_before_search() {
        let model = grid((3, 3), &[(2, 2)], (0, 0), (2, 2), SearchConfig::four_way());
        assert_eq!(
            run(model),
            Err(InvalidGrid::StartOrGoalBlocked {
                role: CellRole::Goal,
                cell: c(2, 2)
            })
        );
        let model = grid((0, 0), &[], (0, 0), (0, 1), SearchConfig::four_way());
        assert!(matches!(
            run(model),
            Err(InvalidGrid::NonPositiveDimensions { .. })
        ));
    }

    #[test]
    fn cancelled_context_stops_before_expanding() {
        let ctx = Context::new();
        ctx.cancel();
        let model = grid((3, 3), &[], (0, 0), (2, 2), SearchConfig::four_way());
        assert_eq!(
            run_with(model, &ctx),
            Err(SearchError::Cancelled { expanded: 0 })
        );
    }

    #[test]
    fn live_context_matches_plain_run() {
        let model = grid((4, 6), &[(1, 1), (2, 3)], (0, 0), (3, 5), SearchConfig::eight_way(false));
        let plain = run(model.clone()).unwrap();
        let with_ctx = run_with(model, &Context::new()).unwrap();
        assert_eq!(plain, with_ctx);
    }

    #[test]
    fn invalid_grid_wins_over_cancellation() {
        let ctx = Context::new();
        ctx.cancel();
        let model = grid((3, 3), &[], (1, 1), (1, 1), SearchConfig::four_way());
        assert!(matches!(run_with(model, &ctx), Err(SearchError::Invalid(_))));
    }

    #[test]
    fn runs_are_deterministic() {
        let mut rng = StdRng::seed_from_u64(0xA5);
        for config in CONFIGS {
            for _ in 0..50 {
                let model = random_model(&mut rng, config);
                let first = run(model.clone()).unwrap();
                let second = run(model).unwrap();
                assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn paths_are_optimal() {
        let mut rng = StdRng::seed_from_u64(42);
        for config in CONFIGS {
            for _ in 0..200 {
                let model = random_model(&mut rng, config);
                let costs = brute_force_costs(&model, model.start());
                let goal = model.goal();
                let best = costs[(goal.row * model.cols() + goal.col) as usize];
                let (_, outcome) = run(model.clone()).unwrap();
                match (best, &outcome) {
                    (Some(best), Outcome::Success { path, total_cost }) => {
                        assert!((best - total_cost).abs() < 1e-9, "{model:?}");
                        // The path is a chain of legal steps whose costs add up.
                        let mut sum = 0.0;
                        for pair in path.windows(2) {
                            let step = model
                                .neighbors(pair[0])
                                .into_iter()
                                .find(|s| s.cell == pair[1])
                                .expect("path step must be a legal move");
                            sum += step.cost;
                        }
                        assert!((sum - total_cost).abs() < 1e-9);
                        assert_eq!(path.first(), Some(&model.start()));
                        assert_eq!(path.last(), Some(&goal));
                    }
                    (None, Outcome::Unreachable) => {}
                    (best, outcome) => panic!("reference {best:?} vs {outcome:?} on {model:?}"),
                }
            }
        }
    }

    #[test]
    fn heuristic_never_overestimates() {
        let mut rng = StdRng::seed_from_u64(7);
        for config in CONFIGS {
            for _ in 0..100 {
                let model = random_model(&mut rng, config);
                // Moves are symmetric, so costs from the goal are costs to it.
                let to_goal = brute_force_costs(&model, model.goal());
                for row in 0..model.rows() {
                    for col in 0..model.cols() {
                        let cell = Cell::new(row, col);
                        if let Some(true_cost) = to_goal[(row * model.cols() + col) as usize] {
                            assert!(model.estimate(cell) <= true_cost + 1e-9, "{cell} in {model:?}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn traces_are_complete_and_ordered() {
        let mut rng = StdRng::seed_from_u64(99);
        for config in CONFIGS {
            for _ in 0..100 {
                let model = random_model(&mut rng, config);
                let (trace, outcome) = run(model).unwrap();
                let mut discovered = std::collections::HashSet::new();
                let mut expanded = std::collections::HashSet::new();
                for event in &trace {
                    match event {
                        Event::Discovered { cell, .. } => {
                            assert!(!expanded.contains(cell), "rediscovered after expansion");
                            discovered.insert(*cell);
                        }
                        Event::Expanded { cell } => {
                            assert!(discovered.contains(cell), "expanded before discovery");
                            assert!(expanded.insert(*cell), "expanded twice");
                        }
                        Event::PathFound { .. } | Event::Unreachable => {}
                    }
                }
                assert_eq!(trace.iter().filter(|e| e.is_terminal()).count(), 1);
                assert!(trace.events().last().is_some_and(Event::is_terminal));
                if let Some(path) = outcome.path() {
                    assert!(path.iter().all(|c| expanded.contains(c)));
                    assert_eq!(trace.path(), Some(path));
                }
            }
        }
    }

    #[test]
    fn snapshot_isolates_search_from_edits() {
        let mut map = GridMap::new(3, 3);
        let snap = map.snapshot(SearchConfig::four_way());
        map.set_obstacle(c(1, 0));
        map.set_obstacle(c(0, 1));
        let (_, outcome) = run(snap).unwrap();
        assert_eq!(outcome.total_cost(), Some(4.0));
        let (_, blocked) = run(map.snapshot(SearchConfig::four_way())).unwrap();
        assert_eq!(blocked, Outcome::Unreachable);
    }
}
