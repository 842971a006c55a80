use crate::grid::{Coord, Grid};
use crate::metrics::Metrics;
use crate::solver::{finish, reverse_path, table_bytes, GridSolver};
use fxhash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use std::time::Instant;

/// One direction of a bidirectional search.
struct Frontier {
    queue: VecDeque<Coord>,
    visited: FxHashSet<Coord>,
    parents: FxHashMap<Coord, Coord>,
}

impl Frontier {
    fn new(root: Coord) -> Frontier {
        let mut visited = FxHashSet::default();
        visited.insert(root);
        Frontier {
            queue: VecDeque::from([root]),
            visited,
            parents: FxHashMap::default(),
        }
    }

    /// Expands every cell currently queued, i.e. one full layer. Returns the first discovered
    /// neighbour that the other direction has already visited, abandoning the rest of the layer.
    fn expand_layer(
        &mut self,
        grid: &Grid,
        other: &Frontier,
        metrics: &mut Metrics,
    ) -> Option<Coord> {
        for _ in 0..self.queue.len() {
            let current = self.queue.pop_front()?;
            metrics.record_expansion(current);
            for neighbour in grid.neighbors(current) {
                if other.visited.contains(&neighbour) {
                    self.parents.insert(neighbour, current);
                    return Some(neighbour);
                }
                if self.visited.insert(neighbour) {
                    self.parents.insert(neighbour, current);
                    self.queue.push_back(neighbour);
                }
            }
        }
        None
    }

    /// Cells after `from` along the parent links, ending at this frontier's root.
    fn chain_from(&self, from: Coord) -> impl Iterator<Item = Coord> + '_ {
        std::iter::successors(self.parents.get(&from).copied(), |node| {
            self.parents.get(node).copied()
        })
    }

    fn bytes(&self) -> usize {
        table_bytes::<Coord, ()>(self.visited.len())
            + table_bytes::<Coord, Coord>(self.parents.len())
    }
}

/// Breadth-first search run from both ends at once, alternating one full layer from the start
/// with one full layer from the goal until the two meet. Weights are ignored; the result is not
/// guaranteed to be cost-optimal on weighted grids.
#[derive(Clone, Copy, Debug, Default)]
pub struct BidirectionalBfsSolver;

impl GridSolver for BidirectionalBfsSolver {
    fn name(&self) -> &str {
        "bidir"
    }

    fn search(&self, grid: &Grid, start: Coord, goal: Coord) -> (Vec<Coord>, Metrics) {
        let started = Instant::now();
        let mut metrics = Metrics::default();
        if start == goal {
            return finish(self.name(), start, goal, vec![start], metrics, started);
        }

        let mut forward = Frontier::new(start);
        let mut backward = Frontier::new(goal);
        let mut meeting = None;
        while !forward.queue.is_empty() && !backward.queue.is_empty() {
            metrics.observe_open_size(forward.queue.len() + backward.queue.len());
            meeting = forward.expand_layer(grid, &backward, &mut metrics);
            // A drained forward frontier has seen its whole component without meeting the goal
            if meeting.is_some() || forward.queue.is_empty() {
                break;
            }
            meeting = backward.expand_layer(grid, &forward, &mut metrics);
            if meeting.is_some() {
                break;
            }
        }

        let path = match meeting {
            Some(meeting) => {
                let mut path = reverse_path(&forward.parents, meeting);
                path.extend(backward.chain_from(meeting));
                path
            }
            None => Vec::new(),
        };
        metrics.memory_estimate_bytes = metrics.max_open_size * std::mem::size_of::<Coord>()
            + forward.bytes()
            + backward.bytes();
        finish(self.name(), start, goal, path, metrics, started)
    }
}
