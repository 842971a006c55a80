use grid_search::{Coord, Grid, Metrics};
use itertools::Itertools;

/// Asserts that a non-empty path runs from start to goal through distinct passable cells, one
/// legal move at a time.
pub fn assert_valid_path(grid: &Grid, path: &[Coord], start: Coord, goal: Coord) {
    assert_eq!(path.first(), Some(&start));
    assert_eq!(path.last(), Some(&goal));
    assert!(path.iter().all_unique(), "repeated cell in {:?}", path);
    assert!(path.iter().all(|&c| grid.passable(c)));
    for (&from, &to) in path.iter().tuple_windows() {
        assert!(grid.is_move(from, to), "illegal move {} -> {}", from, to);
    }
}

/// Asserts that the expansion indices are exactly `0..nodes_expanded`.
pub fn assert_contiguous_order(metrics: &Metrics) {
    let steps = metrics.explored_order.values().copied().sorted().collect_vec();
    assert_eq!(steps, (0..metrics.nodes_expanded).collect_vec());
    assert_eq!(metrics.explored.len(), metrics.nodes_expanded);
    assert!(metrics
        .explored_order
        .keys()
        .all(|c| metrics.explored.contains(c)));
}
