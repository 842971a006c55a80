use crate::error::{Error, Result};
use core::fmt;
use fxhash::{FxHashMap, FxHashSet};
use itertools::{iproduct, Itertools};
use log::warn;
use petgraph::unionfind::UnionFind;
use rand::Rng;

/// Cardinal offsets, in the order neighbours are yielded.
const CARDINAL: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
/// Cardinal offsets followed by the four diagonals.
const MOORE: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// A cell on the grid, addressed by row and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Coord {
        Coord { row, col }
    }
    /// Shifts the coordinate by a signed offset, returning [None] if either component would
    /// become negative.
    pub fn offset(&self, d_row: isize, d_col: isize) -> Option<Coord> {
        Some(Coord::new(
            self.row.checked_add_signed(d_row)?,
            self.col.checked_add_signed(d_col)?,
        ))
    }
    pub fn delta(&self, other: &Coord) -> (usize, usize) {
        (self.row.abs_diff(other.row), self.col.abs_diff(other.col))
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Coord {
        Coord::new(row, col)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// [Grid] is a rows x cols lattice graph. Neighbours are derived from direction offsets on every
/// call rather than stored, entering a cell costs its weight (1.0 unless overridden) and blocked
/// cells are never yielded as neighbours. Connected components are kept in a [UnionFind]
/// structure so callers can cheaply ask whether two cells are connected at all.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    diagonal: bool,
    weights: FxHashMap<Coord, f64>,
    blocks: FxHashSet<Coord>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Grid {
    pub fn new(rows: usize, cols: usize, diagonal: bool) -> Grid {
        Grid {
            rows,
            cols,
            diagonal,
            weights: FxHashMap::default(),
            blocks: FxHashSet::default(),
            components: UnionFind::new(rows * cols),
            components_dirty: true,
        }
    }
    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn diagonal(&self) -> bool {
        self.diagonal
    }
    /// Switches between 4- and 8-directional movement. Connectivity depends on the movement
    /// mode, so the components are flagged as dirty.
    pub fn set_diagonal(&mut self, diagonal: bool) {
        if self.diagonal != diagonal {
            self.diagonal = diagonal;
            self.components_dirty = true;
        }
    }
    /// The direction offsets of the current movement mode.
    pub fn directions(&self) -> &'static [(isize, isize)] {
        if self.diagonal {
            &MOORE
        } else {
            &CARDINAL
        }
    }
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }
    pub fn is_blocked(&self, coord: Coord) -> bool {
        self.blocks.contains(&coord)
    }
    pub fn passable(&self, coord: Coord) -> bool {
        self.in_bounds(coord) && !self.is_blocked(coord)
    }
    /// Lazily yields the in-bounds, unblocked cells one move away from `coord`.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        self.directions()
            .iter()
            .filter_map(move |&(d_row, d_col)| coord.offset(d_row, d_col))
            .filter(move |&n| self.passable(n))
    }
    /// Checks whether `to` is exactly one direction vector away from `from`.
    pub fn is_move(&self, from: Coord, to: Coord) -> bool {
        match from.delta(&to) {
            (0, 1) | (1, 0) => true,
            (1, 1) => self.diagonal,
            _ => false,
        }
    }
    pub fn weight(&self, coord: Coord) -> f64 {
        self.weights.get(&coord).copied().unwrap_or(1.0)
    }
    /// Cost of moving from `from` into `to`. Cost is attributed to entering a cell, so this is
    /// the weight of the destination regardless of the direction of the move.
    pub fn get_cost(&self, _from: Coord, to: Coord) -> f64 {
        self.weight(to)
    }
    pub fn set_weight(&mut self, coord: Coord, weight: f64) -> Result<()> {
        if !self.in_bounds(coord) {
            return Err(Error::OutOfBounds {
                coord,
                rows: self.rows,
                cols: self.cols,
            });
        }
        if weight.is_nan() || weight <= 0.0 {
            return Err(Error::InvalidWeight(weight));
        }
        self.weights.insert(coord, weight);
        Ok(())
    }
    pub fn clear_weights(&mut self) {
        self.weights.clear();
    }
    /// Sums the cost of every move along the path.
    pub fn path_cost(&self, path: &[Coord]) -> f64 {
        path.iter()
            .tuple_windows()
            .map(|(&from, &to)| self.get_cost(from, to))
            .sum()
    }
    /// Blocks a cell. Out-of-bounds coordinates are ignored.
    pub fn add_block(&mut self, coord: Coord) {
        if !self.in_bounds(coord) {
            warn!("Ignoring block at {} outside the {}x{} grid", coord, self.rows, self.cols);
            return;
        }
        if self.blocks.insert(coord) {
            // Blocking may split a component in two
            self.components_dirty = true;
        }
    }
    /// Unblocks a cell, joining it to the components of its neighbours.
    pub fn remove_block(&mut self, coord: Coord) {
        if self.blocks.remove(&coord) && !self.components_dirty {
            let ix = self.get_ix(coord);
            let neighbours = self.neighbors(coord).map(|n| self.get_ix(n)).collect_vec();
            for n_ix in neighbours {
                self.components.union(ix, n_ix);
            }
        }
    }
    pub fn clear_blocks(&mut self) {
        if !self.blocks.is_empty() {
            self.blocks.clear();
            self.components_dirty = true;
        }
    }
    pub fn blocked_count(&self) -> usize {
        self.blocks.len()
    }
    /// Clears all blocks, then blocks every cell independently with probability `density`.
    /// Cells are visited row by row, drawing one uniform sample in `[0, 1)` each, so a seeded
    /// `rng` reproduces the same layout.
    pub fn randomize_blocks<R: Rng>(&mut self, density: f64, rng: &mut R) {
        self.blocks.clear();
        for (row, col) in iproduct!(0..self.rows, 0..self.cols) {
            if rng.gen::<f64>() < density {
                self.blocks.insert(Coord::new(row, col));
            }
        }
        self.components_dirty = true;
    }

    fn get_ix(&self, coord: Coord) -> usize {
        coord.row * self.cols + coord.col
    }
    /// Retrieves the component id a given [Coord] belongs to, or `None` if it is out of bounds.
    pub fn get_component(&self, coord: Coord) -> Option<usize> {
        self.in_bounds(coord).then(|| self.components.find(self.get_ix(coord)))
    }
    /// Checks if start and goal are passable and on the same component.
    ///
    /// Components are only rebuilt by [update](Grid::update), so call it after adding blocks or
    /// switching the movement mode. A fresh grid reports distinct cells as unreachable until then.
    pub fn reachable(&self, start: Coord, goal: Coord) -> bool {
        self.passable(start)
            && self.passable(goal)
            && self.components.equiv(self.get_ix(start), self.get_ix(goal))
    }
    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: Coord, goal: Coord) -> bool {
        !self.reachable(start, goal)
    }
    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }
    /// Generates a new [UnionFind] structure and links up passable neighbours to the same
    /// components under the current movement mode.
    pub fn generate_components(&mut self) {
        let mut components = UnionFind::new(self.rows * self.cols);
        for (row, col) in iproduct!(0..self.rows, 0..self.cols) {
            let coord = Coord::new(row, col);
            if self.is_blocked(coord) {
                continue;
            }
            let ix = self.get_ix(coord);
            for n in self.neighbors(coord) {
                components.union(ix, self.get_ix(n));
            }
        }
        self.components = components;
        self.components_dirty = false;
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows {
            let line: String = (0..self.cols)
                .map(|col| {
                    let coord = Coord::new(row, col);
                    if self.is_blocked(coord) {
                        '#'
                    } else if self.weights.contains_key(&coord) {
                        '~'
                    } else {
                        '.'
                    }
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
