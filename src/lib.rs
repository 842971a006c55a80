//! # grid_search
//!
//! Shortest-path search on a weighted grid. Implements
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm),
//! [Dijkstra](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm) as A* with a zero heuristic,
//! [breadth-first search](https://en.wikipedia.org/wiki/Breadth-first_search) and bidirectional
//! breadth-first search behind a single [GridSolver] trait. Every search returns [Metrics]
//! describing how much work it did and the order in which cells were expanded, so a run can be
//! replayed or tabulated afterwards.
//!
//! Entering a cell costs its weight (1.0 unless set with [Grid::set_weight]), in both 4- and
//! 8-directional movement. Connected components are tracked with a
//! [UnionFind](petgraph::unionfind::UnionFind) so that callers can check reachability up front.
pub mod error;
pub mod grid;
pub mod heuristics;
pub mod metrics;
pub mod solver;

pub use error::{Error, Result};
pub use grid::{Coord, Grid};
pub use heuristics::Heuristic;
pub use metrics::Metrics;
pub use solver::astar::AstarSolver;
pub use solver::bfs::BfsSolver;
pub use solver::bidirectional::BidirectionalBfsSolver;
pub use solver::dijkstra::DijkstraSolver;
pub use solver::{GridSolver, SolverKind};
