use grid_search::{Coord, Grid, SolverKind};
use rand::{rngs::StdRng, SeedableRng};

// Runs every named solver on the same seeded random grid and prints one row of flattened metrics
// per solver, the way a benchmark harness would tabulate them.

fn main() {
    let (rows, cols, density, seed) = (50, 50, 0.2, 0);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut grid = Grid::new(rows, cols, false);
    grid.randomize_blocks(density, &mut rng);
    let start = Coord::new(0, 0);
    let goal = Coord::new(rows - 1, cols - 1);
    grid.remove_block(start);
    grid.remove_block(goal);

    let mut header_printed = false;
    for kind in SolverKind::ALL {
        let (_, metrics) = kind.build().search(&grid, start, goal);
        let record = metrics.to_record();
        if !header_printed {
            let keys: Vec<&str> = record.keys().copied().collect();
            println!("alg,rows,cols,density,seed,{}", keys.join(","));
            header_printed = true;
        }
        let values: Vec<String> = record.values().map(|v| v.to_string()).collect();
        println!(
            "{},{},{},{},{},{}",
            kind,
            rows,
            cols,
            density,
            seed,
            values.join(",")
        );
    }
}
