use crate::grid::{Coord, Grid};
use crate::heuristics::Heuristic;
use crate::metrics::Metrics;
use crate::solver::{finish, reverse_path, table_bytes, GridSolver, SolverKind};
use fxhash::{FxHashMap, FxHashSet};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Instant;

/// Frontier entry. Ordered so that [BinaryHeap] pops the smallest estimated cost first, breaking
/// ties by insertion order (first discovered wins) and finally by coordinate.
struct SmallestCostHolder {
    estimated_cost: f64,
    index: usize,
    coord: Coord,
}

impl Eq for SmallestCostHolder {}

impl PartialEq for SmallestCostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimated_cost
            .total_cmp(&self.estimated_cost)
            .then_with(|| other.index.cmp(&self.index))
            .then_with(|| other.coord.cmp(&self.coord))
    }
}

/// Best-first (A*) search ranking frontier cells by `g + heuristic_factor * h`.
///
/// Relaxation is lazy: a cell that is still waiting in the frontier gets its cost and parent
/// updated when a cheaper route is found, but keeps its original frontier entry. There is no
/// closed set either, so a cell reached again through a cheaper route after being expanded is
/// pushed and expanded once more. Paths are cost-optimal for admissible heuristics with a
/// factor of 1.0.
#[derive(Clone, Debug)]
pub struct AstarSolver {
    pub heuristic: Heuristic,
    pub heuristic_factor: f64,
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver::with_heuristic(Heuristic::Manhattan)
    }
    pub fn with_heuristic(heuristic: Heuristic) -> AstarSolver {
        AstarSolver {
            heuristic,
            heuristic_factor: 1.0,
        }
    }
    /// Just the heuristic times a heuristic factor.
    fn estimate(&self, coord: Coord, goal: Coord) -> f64 {
        self.heuristic.estimate(coord, goal) * self.heuristic_factor
    }
}

impl Default for AstarSolver {
    fn default() -> Self {
        AstarSolver::new()
    }
}

impl GridSolver for AstarSolver {
    fn name(&self) -> &str {
        SolverKind::Astar(self.heuristic).name()
    }

    fn search(&self, grid: &Grid, start: Coord, goal: Coord) -> (Vec<Coord>, Metrics) {
        self.search_named(self.name(), grid, start, goal)
    }
}

impl AstarSolver {
    /// Runs the search, reporting it under `name` in the logs.
    pub(crate) fn search_named(
        &self,
        name: &str,
        grid: &Grid,
        start: Coord,
        goal: Coord,
    ) -> (Vec<Coord>, Metrics) {
        let started = Instant::now();
        let mut metrics = Metrics::default();
        let mut to_see = BinaryHeap::new();
        let mut next_index = 0;
        let mut cost: FxHashMap<Coord, f64> = FxHashMap::default();
        let mut parents: FxHashMap<Coord, Coord> = FxHashMap::default();
        let mut open: FxHashSet<Coord> = FxHashSet::default();

        cost.insert(start, 0.0);
        to_see.push(SmallestCostHolder {
            estimated_cost: self.estimate(start, goal),
            index: next_index,
            coord: start,
        });
        next_index += 1;
        open.insert(start);

        let mut path = Vec::new();
        loop {
            metrics.observe_open_size(to_see.len());
            let Some(SmallestCostHolder { coord: current, .. }) = to_see.pop() else {
                break;
            };
            open.remove(&current);
            if current == goal {
                path = reverse_path(&parents, current);
                break;
            }
            metrics.record_expansion(current);

            let current_cost = cost[&current];
            for neighbour in grid.neighbors(current) {
                let new_cost = current_cost + grid.get_cost(current, neighbour);
                if cost.get(&neighbour).is_some_and(|&known| known <= new_cost) {
                    continue;
                }
                cost.insert(neighbour, new_cost);
                parents.insert(neighbour, current);
                // A pending entry is left as is and picks up the new cost when it is expanded
                if open.insert(neighbour) {
                    to_see.push(SmallestCostHolder {
                        estimated_cost: new_cost + self.estimate(neighbour, goal),
                        index: next_index,
                        coord: neighbour,
                    });
                    next_index += 1;
                }
            }
        }

        metrics.memory_estimate_bytes = metrics.max_open_size
            * std::mem::size_of::<SmallestCostHolder>()
            + table_bytes::<Coord, f64>(cost.len())
            + table_bytes::<Coord, Coord>(parents.len());
        finish(name, start, goal, path, metrics, started)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        for allow_diag in [false, true] {
            let grid = Grid::new(1, 1, allow_diag);
            let start = Coord::new(0, 0);
            let (path, metrics) = AstarSolver::new().search(&grid, start, start);
            assert_eq!(path, vec![start]);
            assert_eq!(metrics.path_length, 1);
            assert_eq!(metrics.nodes_expanded, 0);
        }
    }

    /// Asserts that the optimal 4 step solution is found around a central obstacle.
    #[test]
    fn solve_simple_problem() {
        for (allow_diag, heuristic, expected) in [
            (false, Heuristic::Manhattan, 5),
            (true, Heuristic::Octile, 4),
        ] {
            let mut grid = Grid::new(3, 3, allow_diag);
            grid.add_block(Coord::new(1, 1));
            let solver = AstarSolver::with_heuristic(heuristic);
            let (path, _) = solver.search(&grid, Coord::new(0, 0), Coord::new(2, 2));
            assert_eq!(path.len(), expected);
        }
    }

    #[test]
    fn heap_pops_lowest_estimate_then_oldest() {
        let mut heap = BinaryHeap::new();
        let entries = [(2.0, 0, (0, 0)), (1.0, 2, (0, 1)), (1.0, 1, (1, 0))];
        for (estimated_cost, index, (row, col)) in entries {
            heap.push(SmallestCostHolder {
                estimated_cost,
                index,
                coord: Coord::new(row, col),
            });
        }
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|h| h.index)).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn straight_corridor_expands_only_the_corridor() {
        let grid = Grid::new(10, 10, false);
        let (path, metrics) =
            AstarSolver::new().search(&grid, Coord::new(0, 0), Coord::new(0, 9));
        assert_eq!(path.len(), 10);
        assert_eq!(metrics.nodes_expanded, 9);
        assert!(metrics.explored.iter().all(|c| c.row == 0));
    }

    #[test]
    fn avoids_expensive_cells() {
        let mut grid = Grid::new(3, 3, false);
        grid.set_weight(Coord::new(1, 1), 10.0).unwrap();
        let (path, _) = AstarSolver::new().search(&grid, Coord::new(1, 0), Coord::new(1, 2));
        assert_eq!(grid.path_cost(&path), 4.0);
        assert!(!path.contains(&Coord::new(1, 1)));
    }

    #[test]
    fn heuristic_factor_scales_estimate() {
        let mut solver = AstarSolver::new();
        solver.heuristic_factor = 1.5;
        assert_eq!(solver.estimate(Coord::new(0, 0), Coord::new(2, 2)), 6.0);
        let grid = Grid::new(8, 8, false);
        let (path, _) = solver.search(&grid, Coord::new(0, 0), Coord::new(7, 7));
        assert_eq!(path.len(), 15);
    }

    /// With the estimate inflated, the cheap cell (0, 1) is only reached after (1, 1) and (2, 1)
    /// were expanded, so both are expanded a second time through it. The pending (1, 0) and
    /// (2, 0) pick up their cheaper costs without being pushed again.
    #[test]
    fn reexpands_cells_reached_more_cheaply() {
        // .~S
        // ...
        // ..~
        let mut grid = Grid::new(3, 3, false);
        grid.set_weight(Coord::new(0, 1), 0.5).unwrap();
        grid.set_weight(Coord::new(2, 2), 8.0).unwrap();
        let mut solver = AstarSolver::new();
        solver.heuristic_factor = 2.0;
        let start = Coord::new(0, 2);
        let goal = Coord::new(2, 2);
        let (path, metrics) = solver.search(&grid, start, goal);

        assert_eq!(path, vec![start, Coord::new(1, 2), goal]);
        assert_eq!(metrics.nodes_expanded, 8);
        assert_eq!(metrics.explored_order.len(), 6);
        assert!(metrics.nodes_expanded > metrics.explored_order.len());
        assert_eq!(metrics.max_open_size, 5);
        let first_seen = [(0, 2), (1, 2), (1, 1), (2, 1), (0, 1), (2, 0)]
            .map(|(row, col)| Coord::new(row, col));
        assert!(metrics.explored_order.keys().copied().eq(first_seen));
        assert_eq!(metrics.explored_order[&Coord::new(1, 1)], 5);
        assert_eq!(metrics.explored_order[&Coord::new(2, 1)], 6);
        let replay = [(0, 2), (1, 2), (0, 1), (1, 1), (2, 1), (2, 0)]
            .map(|(row, col)| Coord::new(row, col));
        assert_eq!(metrics.replay(), replay);
    }

    /// The goal is first pushed through the expensive (1, 1). The cheaper route over the top row
    /// rewrites its cost and parent while it waits in the frontier.
    #[test]
    fn pending_cell_takes_cheaper_parent_in_place() {
        // .~.
        // S~G
        let mut grid = Grid::new(2, 3, false);
        grid.set_weight(Coord::new(1, 1), 4.0).unwrap();
        grid.set_weight(Coord::new(1, 2), 8.0).unwrap();
        let mut solver = AstarSolver::new();
        solver.heuristic_factor = 2.0;
        let start = Coord::new(1, 0);
        let goal = Coord::new(1, 2);
        let (path, metrics) = solver.search(&grid, start, goal);

        let expected = [(1, 0), (0, 0), (0, 1), (0, 2), (1, 2)]
            .map(|(row, col)| Coord::new(row, col));
        assert_eq!(path, expected);
        assert_eq!(grid.path_cost(&path), 11.0);
        assert_eq!(metrics.nodes_expanded, 5);
        assert_eq!(metrics.max_open_size, 3);
        let replay = [(1, 0), (1, 1), (0, 0), (0, 1), (0, 2)]
            .map(|(row, col)| Coord::new(row, col));
        assert_eq!(metrics.replay(), replay);
    }

    #[test]
    fn name_follows_heuristic() {
        assert_eq!(AstarSolver::new().name(), "astar");
        assert_eq!(AstarSolver::with_heuristic(Heuristic::Euclidean).name(), "astar_euclid");
        assert_eq!(AstarSolver::with_heuristic(Heuristic::Octile).name(), "astar_octile");
        for kind in SolverKind::ALL {
            assert_eq!(kind.build().name(), kind.name());
        }
    }
}
