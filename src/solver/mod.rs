use crate::error::Error;
use crate::grid::{Coord, Grid};
use crate::heuristics::Heuristic;
use crate::metrics::Metrics;
use core::fmt;
use fxhash::FxHashMap;
use log::{debug, info};
use std::str::FromStr;
use std::time::Instant;

pub mod astar;
pub mod bfs;
pub mod bidirectional;
pub mod dijkstra;

use astar::AstarSolver;
use bfs::BfsSolver;
use bidirectional::BidirectionalBfsSolver;
use dijkstra::DijkstraSolver;

/// A shortest-path search over a [Grid].
pub trait GridSolver {
    fn name(&self) -> &str;

    /// Searches for a path from `start` to `goal`, both of which must be passable cells.
    /// Returns the path from start to goal inclusive, or an empty path if the goal cannot be
    /// reached, together with the [Metrics] of the run.
    fn search(&self, grid: &Grid, start: Coord, goal: Coord) -> (Vec<Coord>, Metrics);
}

/// Follows the parent links back from `end` and returns the path in forward order.
pub(crate) fn reverse_path(parents: &FxHashMap<Coord, Coord>, end: Coord) -> Vec<Coord> {
    let mut path: Vec<Coord> =
        std::iter::successors(Some(end), |node| parents.get(node).copied()).collect();
    path.reverse();
    path
}

/// Stamps the path length and runtime on the metrics of a finished search.
pub(crate) fn finish(
    name: &str,
    start: Coord,
    goal: Coord,
    path: Vec<Coord>,
    mut metrics: Metrics,
    started: Instant,
) -> (Vec<Coord>, Metrics) {
    metrics.path_length = path.len();
    metrics.finish_timer(started);
    if path.is_empty() {
        info!("{}: {} is not reachable from {}", name, goal, start);
    }
    debug!(
        "{}: {} -> {} expanded {} nodes (max open {}), path of {} cells in {:.3} ms",
        name,
        start,
        goal,
        metrics.nodes_expanded,
        metrics.max_open_size,
        metrics.path_length,
        metrics.runtime_ms
    );
    (path, metrics)
}

/// Size in bytes of `entries` key-value pairs, used for the memory estimate in [Metrics].
pub(crate) fn table_bytes<K, V>(entries: usize) -> usize {
    entries * std::mem::size_of::<(K, V)>()
}

/// The solvers that can be selected by name, e.g. from a benchmark configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverKind {
    Astar(Heuristic),
    Dijkstra,
    Bfs,
    Bidirectional,
}

impl SolverKind {
    /// Every named solver, in the order a benchmark runs them.
    pub const ALL: [SolverKind; 6] = [
        SolverKind::Astar(Heuristic::Manhattan),
        SolverKind::Astar(Heuristic::Euclidean),
        SolverKind::Astar(Heuristic::Octile),
        SolverKind::Dijkstra,
        SolverKind::Bfs,
        SolverKind::Bidirectional,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SolverKind::Astar(Heuristic::Manhattan) => "astar",
            SolverKind::Astar(Heuristic::Euclidean) => "astar_euclid",
            SolverKind::Astar(Heuristic::Octile) => "astar_octile",
            SolverKind::Astar(Heuristic::Zero) => "astar_zero",
            SolverKind::Astar(Heuristic::Custom(_)) => "astar_custom",
            SolverKind::Dijkstra => "dijkstra",
            SolverKind::Bfs => "bfs",
            SolverKind::Bidirectional => "bidir",
        }
    }

    pub fn build(&self) -> Box<dyn GridSolver> {
        match *self {
            SolverKind::Astar(heuristic) => Box::new(AstarSolver::with_heuristic(heuristic)),
            SolverKind::Dijkstra => Box::new(DijkstraSolver::new()),
            SolverKind::Bfs => Box::new(BfsSolver),
            SolverKind::Bidirectional => Box::new(BidirectionalBfsSolver),
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SolverKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "astar" => Ok(SolverKind::Astar(Heuristic::Manhattan)),
            "astar_euclid" => Ok(SolverKind::Astar(Heuristic::Euclidean)),
            "astar_octile" => Ok(SolverKind::Astar(Heuristic::Octile)),
            "astar_zero" => Ok(SolverKind::Astar(Heuristic::Zero)),
            "dijkstra" => Ok(SolverKind::Dijkstra),
            "bfs" => Ok(SolverKind::Bfs),
            "bidir" => Ok(SolverKind::Bidirectional),
            other => Err(Error::UnknownSolver(other.to_owned())),
        }
    }
}
