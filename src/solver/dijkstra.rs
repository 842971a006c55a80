use crate::grid::{Coord, Grid};
use crate::heuristics::Heuristic;
use crate::metrics::Metrics;
use crate::solver::{astar::AstarSolver, GridSolver};

/// Uniform-cost search: an [AstarSolver] whose heuristic is fixed to zero. Finds cost-optimal
/// paths on any grid with positive weights.
#[derive(Clone, Debug)]
pub struct DijkstraSolver {
    inner: AstarSolver,
}

impl DijkstraSolver {
    pub fn new() -> DijkstraSolver {
        DijkstraSolver {
            inner: AstarSolver::with_heuristic(Heuristic::Zero),
        }
    }
}

impl Default for DijkstraSolver {
    fn default() -> Self {
        DijkstraSolver::new()
    }
}

impl GridSolver for DijkstraSolver {
    fn name(&self) -> &str {
        "dijkstra"
    }

    fn search(&self, grid: &Grid, start: Coord, goal: Coord) -> (Vec<Coord>, Metrics) {
        self.inner.search_named(self.name(), grid, start, goal)
    }
}
