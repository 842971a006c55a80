use crate::grid::{Coord, Grid};
use crate::metrics::Metrics;
use crate::solver::{finish, reverse_path, table_bytes, GridSolver};
use fxhash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use std::time::Instant;

/// Breadth-first search. Every move counts as one step regardless of cell weights, so the path
/// has the fewest moves rather than the lowest cost.
#[derive(Clone, Copy, Debug, Default)]
pub struct BfsSolver;

impl GridSolver for BfsSolver {
    fn name(&self) -> &str {
        "bfs"
    }

    fn search(&self, grid: &Grid, start: Coord, goal: Coord) -> (Vec<Coord>, Metrics) {
        let started = Instant::now();
        let mut metrics = Metrics::default();
        let mut queue = VecDeque::from([start]);
        let mut visited: FxHashSet<Coord> = FxHashSet::default();
        let mut parents: FxHashMap<Coord, Coord> = FxHashMap::default();
        visited.insert(start);

        let mut path = Vec::new();
        while let Some(current) = queue.pop_front() {
            metrics.record_expansion(current);
            if current == goal {
                path = reverse_path(&parents, current);
                break;
            }
            for neighbour in grid.neighbors(current) {
                // Marked on enqueue so that no cell is queued twice
                if visited.insert(neighbour) {
                    parents.insert(neighbour, current);
                    queue.push_back(neighbour);
                    metrics.observe_open_size(queue.len());
                }
            }
        }

        metrics.memory_estimate_bytes = metrics.max_open_size * std::mem::size_of::<Coord>()
            + table_bytes::<Coord, ()>(visited.len())
            + table_bytes::<Coord, Coord>(parents.len());
        finish(self.name(), start, goal, path, metrics, started)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_is_expanded_when_equal_to_goal() {
        let grid = Grid::new(3, 3, false);
        let start = Coord::new(1, 1);
        let (path, metrics) = BfsSolver.search(&grid, start, start);
        assert_eq!(path, vec![start]);
        assert_eq!(metrics.nodes_expanded, 1);
        assert_eq!(metrics.max_open_size, 0);
    }

    #[test]
    fn expands_in_layers() {
        let grid = Grid::new(5, 5, false);
        let start = Coord::new(2, 2);
        let (_, metrics) = BfsSolver.search(&grid, start, Coord::new(0, 0));
        let distance = |c: &Coord| c.delta(&start).0 + c.delta(&start).1;
        let replay = metrics.replay();
        assert!(replay.windows(2).all(|w| distance(&w[0]) <= distance(&w[1])));
        assert_eq!(replay[0], start);
        let first_layer = [(1, 2), (3, 2), (2, 1), (2, 3)].map(|(row, col)| Coord::new(row, col));
        assert_eq!(replay[1..5], first_layer);
    }

    #[test]
    fn ignores_weights() {
        let mut grid = Grid::new(1, 4, false);
        grid.set_weight(Coord::new(0, 1), 100.0).unwrap();
        let (path, _) = BfsSolver.search(&grid, Coord::new(0, 0), Coord::new(0, 3));
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn open_size_is_queue_high_water_mark() {
        let grid = Grid::new(3, 3, false);
        let (path, metrics) = BfsSolver.search(&grid, Coord::new(1, 1), Coord::new(2, 2));
        // Peaks while (2,1) enqueues the last two corners
        assert_eq!(metrics.max_open_size, 6);
        assert_eq!(metrics.nodes_expanded, 9);
        assert_eq!(path.len(), 3);
    }
}
