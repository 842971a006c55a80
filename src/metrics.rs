//! Instrumentation filled in by a single search call.
use crate::grid::Coord;
use fxhash::{FxBuildHasher, FxHashSet};
use indexmap::IndexMap;
use std::time::Instant;

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Counters, timings and the expansion order of one search. A fresh record is created by every
/// call to [search](crate::solver::GridSolver::search) and handed to the caller once the search
/// is done.
#[derive(Clone, Debug, Default)]
pub struct Metrics {
    /// Number of expansions, counting a cell again if it is expanded more than once.
    pub nodes_expanded: usize,
    /// Number of cells in the returned path, 0 if no path was found.
    pub path_length: usize,
    /// Wall-clock duration of the search call in milliseconds.
    pub runtime_ms: f64,
    /// Largest frontier size observed during the search.
    pub max_open_size: usize,
    /// Rough size of the search bookkeeping at its peak.
    pub memory_estimate_bytes: usize,
    /// Every cell that was expanded.
    pub explored: FxHashSet<Coord>,
    /// Maps each expanded cell to the step at which it was (last) expanded. Iterates in the
    /// order cells were first expanded.
    pub explored_order: FxIndexMap<Coord, usize>,
}

impl Metrics {
    /// Records the expansion of `coord` as the next step.
    pub fn record_expansion(&mut self, coord: Coord) {
        self.explored.insert(coord);
        self.explored_order.insert(coord, self.nodes_expanded);
        self.nodes_expanded += 1;
    }
    pub fn observe_open_size(&mut self, size: usize) {
        self.max_open_size = self.max_open_size.max(size);
    }
    pub fn finish_timer(&mut self, started: Instant) {
        self.runtime_ms = started.elapsed().as_secs_f64() * 1000.0;
    }
    /// Cells ordered by the step at which they were last expanded, for replaying a search.
    pub fn replay(&self) -> Vec<Coord> {
        let mut steps: Vec<(usize, Coord)> = self
            .explored_order
            .iter()
            .map(|(&coord, &step)| (step, coord))
            .collect();
        steps.sort_unstable();
        steps.into_iter().map(|(_, coord)| coord).collect()
    }
    /// Flattens the scalar fields into a field name to value record for tabular export.
    /// `explored` and `explored_order` are left out since they grow with the search.
    pub fn to_record(&self) -> IndexMap<&'static str, f64> {
        IndexMap::from([
            ("nodes_expanded", self.nodes_expanded as f64),
            ("path_length", self.path_length as f64),
            ("runtime_ms", self.runtime_ms),
            ("max_open_size", self.max_open_size as f64),
            ("memory_estimate_bytes", self.memory_estimate_bytes as f64),
        ])
    }
}
