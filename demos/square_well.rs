use simplelog::{ Config, LevelFilter, SimpleLogger };
use wellspace::{
    analytic,
    config::SolverConfig,
    grid::SpatialGrid,
    normalize::Quadrature,
    solve::Solver,
};

// even and odd states of a finite square well, in units ħ = m = 1

fn main() {
    let _ = SimpleLogger::init(LevelFilter::Info, Config::default());

    const WIDTH: f64 = 2.0;
    const DEPTH: f64 = 50.0;

    let xargs = (-4.0, 4.0, 4001);
    let config = SolverConfig::natural().with_quadrature(Quadrature::Simpson);
    let solver = Solver::new(1.0, config).unwrap();
    let v = analytic::finite_well_potential(WIDTH, DEPTH);
    let res = solver.solve_symmetric_full(xargs, &v, (0.0, DEPTH)).unwrap();

    let grid = SpatialGrid::new(xargs.0, xargs.1, xargs.2).unwrap();
    let exact = analytic::finite_well(1.0, 1.0, WIDTH, DEPTH, &grid).unwrap();

    println!("{}: {} states; {}: {} states",
        res.method, res.len(), exact.method, exact.len());
    for (s, e) in res.states.iter().zip(&exact.states) {
        println!(
            "{:>3} {:>12.6} {:>12.6} {:>10.2e}",
            s.index,
            s.energy,
            e.energy,
            (s.energy - e.energy).abs() / e.energy,
        );
    }
}
