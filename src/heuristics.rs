//! Distance estimates between two cells, used to guide best-first search towards the goal.
//!
//! All estimates are non-negative. A best-first search only returns cost-optimal paths if the
//! estimate never exceeds the true remaining cost.
use crate::error::Error;
use crate::grid::Coord;
use core::fmt;
use std::f64::consts::SQRT_2;
use std::str::FromStr;

/// Admissible and consistent for 4-directional movement with unit cost.
pub fn manhattan(a: Coord, b: Coord) -> f64 {
    let (d_row, d_col) = a.delta(&b);
    (d_row + d_col) as f64
}

/// Admissible for any movement mode, but a weaker guide on 4-directional grids.
pub fn euclidean(a: Coord, b: Coord) -> f64 {
    let (d_row, d_col) = a.delta(&b);
    (d_row as f64).hypot(d_col as f64)
}

/// Distance for 8-directional movement where diagonal steps cost √2.
pub fn octile(a: Coord, b: Coord) -> f64 {
    let (d_row, d_col) = a.delta(&b);
    (d_row + d_col) as f64 + (SQRT_2 - 1.0) * d_row.min(d_col) as f64
}

/// Turns best-first search into uniform-cost search.
pub fn zero(_a: Coord, _b: Coord) -> f64 {
    0.0
}

/// Selects one of the distance estimates above, or a caller supplied function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Heuristic {
    #[default]
    Manhattan,
    Euclidean,
    Octile,
    Zero,
    Custom(fn(Coord, Coord) -> f64),
}

impl Heuristic {
    pub fn estimate(&self, a: Coord, b: Coord) -> f64 {
        match self {
            Heuristic::Manhattan => manhattan(a, b),
            Heuristic::Euclidean => euclidean(a, b),
            Heuristic::Octile => octile(a, b),
            Heuristic::Zero => zero(a, b),
            Heuristic::Custom(f) => f(a, b),
        }
    }
    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::Manhattan => "manhattan",
            Heuristic::Euclidean => "euclidean",
            Heuristic::Octile => "octile",
            Heuristic::Zero => "zero",
            Heuristic::Custom(_) => "custom",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Heuristic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manhattan" => Ok(Heuristic::Manhattan),
            "euclidean" => Ok(Heuristic::Euclidean),
            "octile" => Ok(Heuristic::Octile),
            "zero" => Ok(Heuristic::Zero),
            other => Err(Error::UnknownHeuristic(other.to_owned())),
        }
    }
}
