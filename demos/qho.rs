use simplelog::{ Config, LevelFilter, SimpleLogger };
use wellspace::{
    analytic,
    config::SolverConfig,
    grid::SpatialGrid,
    solve::Solver,
    units,
};

// bound states of an electron in a harmonic trap, compared against ħω(n + ½)

fn main() {
    let _ = SimpleLogger::init(LevelFilter::Info, Config::default());

    const MASS: f64 = units::me; // kg
    const OMEGA: f64 = 1e15; // s⁻¹
    let k = MASS * OMEGA.powi(2);
    let hw = units::hbar * OMEGA;

    let xargs = (-4e-9, 4e-9, 1001);
    let erange = (0.1 * 0.5 * hw, 20.5 * hw);
    let solver = Solver::new(MASS, SolverConfig::default()).unwrap();
    let res = solver.solve(xargs, |x| 0.5 * k * x * x, erange).unwrap();

    let grid = SpatialGrid::new(xargs.0, xargs.1, xargs.2).unwrap();
    let exact
        = analytic::harmonic_oscillator(MASS, OMEGA, units::hbar, &grid, res.len())
        .unwrap();

    println!("method: {}", res.method);
    println!("{:>3} {:>12} {:>12} {:>10} {:>6}", "n", "E (eV)", "exact (eV)", "rel. err", "nodes");
    for (s, e) in res.states.iter().zip(&exact.states) {
        println!(
            "{:>3} {:>12.6} {:>12.6} {:>10.2e} {:>6}",
            s.index,
            s.energy_ev(),
            e.energy_ev(),
            (s.energy - e.energy).abs() / e.energy,
            s.node_count(0.1),
        );
    }
}
