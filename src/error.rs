//! Error types for grid_search

use thiserror::Error;

use crate::grid::Coord;

/// Errors raised while configuring a [Grid](crate::grid::Grid) or selecting a solver by name.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("{coord} is outside the {rows}x{cols} grid")]
    OutOfBounds { coord: Coord, rows: usize, cols: usize },

    #[error("weight must be positive, got {0}")]
    InvalidWeight(f64),

    #[error("unknown heuristic: {0}")]
    UnknownHeuristic(String),

    #[error("unknown solver: {0}")]
    UnknownSolver(String),
}

pub type Result<T> = std::result::Result<T, Error>;
