use grid_search::{AstarSolver, Coord, Grid, GridSolver};

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have a 4-neighborhood

fn main() {
    let mut grid = Grid::new(3, 3, false);
    grid.add_block(Coord::new(1, 1));
    println!("{}", grid);
    let start = Coord::new(0, 0);
    let end = Coord::new(2, 2);
    let (path, metrics) = AstarSolver::new().search(&grid, start, end);
    println!("Path:");
    for p in path {
        println!("{}", p);
    }
    println!("Expanded {} nodes", metrics.nodes_expanded);
}
