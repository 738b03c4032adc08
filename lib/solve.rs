//! Shooting-method search for bound states of the one-dimensional,
//! time-independent Schrödinger equation (TISE).
//!
//! A [`Solver`] scans an energy window in equal steps, integrating the TISE at
//! each step and tracking the sign of the wavefunction at the right edge of the
//! grid. Every flip of that sign brackets one eigenenergy, which is then
//! refined by bisection, re-integrated, and normalized.
//!
//! ```
//! use wellspace::{ config::SolverConfig, numerov::Parity, solve::Solver };
//!
//! let solver = Solver::new(1.0, SolverConfig::natural()).unwrap();
//! let even = solver.solve_symmetric(
//!     (-10.0, 10.0, 2001), |x| 0.5 * x * x, (0.1, 5.0), Parity::Even).unwrap();
//! // 0.5, 2.5, 4.5
//! assert_eq!(even.len(), 3);
//! ```

use std::{ cmp, fmt };
use log::{ debug, info, warn };
use ndarray as nd;
use rayon::prelude::*;
use crate::{
    config::SolverConfig,
    error::XError,
    grid::System,
    normalize::Normalizer,
    numerov::{ ForwardIntegrator, Integrator, Parity, Sign, SymmetricIntegrator },
    refine::EnergyRefiner,
    units,
    utils::node_count,
    DEF_SYMMETRY_TOL,
};

pub type XResult<T> = Result<T, XError>;

/// Identifies how a [`SolveResult`] was produced.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    /// Numerov shooting from the left wall across the whole grid.
    Shooting,
    /// Numerov shooting from the center of a symmetric grid, one parity only.
    Symmetric(Parity),
    /// Both parities of [`Self::Symmetric`], merged.
    SymmetricMerged,
    /// Closed-form harmonic oscillator.
    HarmonicOscillator,
    /// Closed-form infinite square well.
    InfiniteWell,
    /// Finite square well (transcendental equations solved numerically).
    FiniteWell,
}

impl Method {
    /// Short tag naming the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shooting => "numerov-shooting",
            Self::Symmetric(Parity::Even) => "numerov-symmetric-even",
            Self::Symmetric(Parity::Odd) => "numerov-symmetric-odd",
            Self::SymmetricMerged => "numerov-symmetric",
            Self::HarmonicOscillator => "analytic-harmonic-oscillator",
            Self::InfiniteWell => "analytic-infinite-well",
            Self::FiniteWell => "analytic-finite-well",
        }
    }

    /// Return `true` if the result came from a closed-form reference solution.
    pub fn is_analytic(&self) -> bool {
        matches!(
            self,
            Self::HarmonicOscillator | Self::InfiniteWell | Self::FiniteWell
        )
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single bound state.
#[derive(Clone, Debug)]
pub struct BoundState {
    /// Energy (same units as the potential).
    pub energy: f64,
    /// Normalized wavefunction, one value per grid point.
    pub wf: nd::Array1<f64>,
    /// Position of this state in its result, counting from 0.
    pub index: usize,
}

impl BoundState {
    /// Compare two `BoundState`s by their energy.
    pub fn cmp_energy(&self, other: &Self) -> Option<cmp::Ordering> {
        self.energy.partial_cmp(&other.energy)
    }

    /// Energy in electronvolts, assuming it is given in Joules.
    pub fn energy_ev(&self) -> f64 { units::j_to_ev(self.energy) }

    /// Number of interior nodes, ignoring a fraction `margin` of the grid at
    /// each edge.
    pub fn node_count(&self, margin: f64) -> usize {
        node_count(&self.wf, margin)
    }
}

/// Output of a solve: bound states in ascending energy order, along with the
/// coordinate array they were sampled over.
#[derive(Clone, Debug)]
pub struct SolveResult {
    /// Coordinate array.
    pub x: nd::Array1<f64>,
    /// Bound states, in ascending energy order.
    pub states: Vec<BoundState>,
    /// How the states were found.
    pub method: Method,
}

impl SolveResult {
    /// Number of bound states.
    pub fn len(&self) -> usize { self.states.len() }

    /// Return `true` if no bound states were found.
    pub fn is_empty(&self) -> bool { self.states.is_empty() }

    /// Energies of all states.
    pub fn energies(&self) -> nd::Array1<f64> {
        self.states.iter().map(|s| s.energy).collect()
    }

    /// Energies of all states in electronvolts, assuming they are in Joules.
    pub fn energies_ev(&self) -> nd::Array1<f64> {
        self.states.iter().map(|s| s.energy_ev()).collect()
    }

    /// Iterate over the wavefunctions of all states.
    pub fn wavefunctions(&self) -> impl Iterator<Item = &nd::Array1<f64>> + '_ {
        self.states.iter().map(|s| &s.wf)
    }

    /// Stack all wavefunctions into a 2D array, one state per row.
    pub fn wavefunction_matrix(&self) -> nd::Array2<f64> {
        let n = self.x.len();
        nd::Array2::from_shape_fn(
            (self.states.len(), n),
            |(i, j)| self.states[i].wf[j],
        )
    }

    /// Merge two results over the same grid into one, sorted by energy and
    /// re-indexed.
    pub fn merge(self, other: Self, method: Method) -> Self {
        let mut states = self.states;
        states.extend(other.states);
        states.sort_by(|l, r| l.energy.total_cmp(&r.energy));
        states.iter_mut().enumerate().for_each(|(k, s)| { s.index = k; });
        Self { x: self.x, states, method }
    }
}

// sequential pass over scan signs: a bracket is recorded whenever the current
// sign is nonzero and differs from the last nonzero sign seen; zero signs are
// skipped without updating the tracked sign/energy
pub(crate) fn find_brackets(energies: &[f64], signs: &[Sign]) -> Vec<(f64, f64)> {
    let mut brackets: Vec<(f64, f64)> = Vec::new();
    let Some((&e0, &s0)) = energies.first().zip(signs.first())
        else { return brackets; };
    let mut prev: (f64, Sign) = (e0, s0);
    for (&e, &s) in energies.iter().zip(signs).skip(1) {
        if prev.1.flipped(s) { brackets.push((prev.0, e)); }
        if !s.is_zero() { prev = (e, s); }
    }
    brackets
}

/// Shooting-method bound state solver for a particle of fixed mass.
///
/// Each solve samples the potential once, builds the integrator, refiner, and
/// normalizer for that call only, and shares no state with any other solve;
/// separate calls may run concurrently.
#[derive(Copy, Clone, Debug)]
pub struct Solver {
    mass: f64,
    config: SolverConfig,
}

impl Solver {
    /// Create a new solver, checking the mass and configuration.
    pub fn new(mass: f64, config: SolverConfig) -> XResult<Self> {
        XError::check_mass(mass)?;
        config.check()?;
        Ok(Self { mass, config })
    }

    /// Particle mass.
    pub fn mass(&self) -> f64 { self.mass }

    /// Configuration.
    pub fn config(&self) -> &SolverConfig { &self.config }

    /// Find all bound states with energies in `erange = (e_min, e_max)` for a
    /// potential `V` sampled over a grid given in "linspace-style" (start,
    /// inclusive end, and a number of points).
    ///
    /// Finding no states is not an error.
    pub fn solve<F>(&self, xargs: (f64, f64, usize), V: F, erange: (f64, f64))
        -> XResult<SolveResult>
    where F: FnMut(f64) -> f64
    {
        XError::check_energy_range(erange.0, erange.1)?;
        let sys = System::new_linspace(xargs, V)?;
        self.solve_system(&sys, erange)
    }

    /// Like [`Self::solve`], but for an already sampled potential.
    pub fn solve_system(&self, sys: &System, erange: (f64, f64))
        -> XResult<SolveResult>
    {
        XError::check_energy_range(erange.0, erange.1)?;
        let method = Method::Shooting;
        let integrator = ForwardIntegrator::new(sys, self.mass, self.config.hbar);
        let states = self.search(&integrator, sys, erange, method);
        Ok(SolveResult { x: sys.get_x().clone(), states, method })
    }

    /// Find all bound states of a single parity with energies in `erange` for a
    /// symmetric potential `V(-x) = V(x)`, integrating from x = 0 outward.
    ///
    /// The grid must be symmetric about x = 0; an odd number of points is
    /// recommended so that x = 0 is itself a grid point. With an even number
    /// of points the integration starts from the point nearest x = 0, at
    /// x = ±dx/2, and parity is imposed about that point instead. This shifts
    /// energies at first order in dx: the oscillator ground state on
    /// `(-10, 10, 2000)` comes out near 0.503 (about 0.6% high), against a
    /// relative error below 1e-5 on `(-10, 10, 2001)`.
    pub fn solve_symmetric<F>(
        &self,
        xargs: (f64, f64, usize),
        V: F,
        erange: (f64, f64),
        parity: Parity,
    ) -> XResult<SolveResult>
    where F: FnMut(f64) -> f64
    {
        XError::check_energy_range(erange.0, erange.1)?;
        let sys = System::new_linspace(xargs, V)?;
        self.solve_symmetric_system(&sys, erange, parity)
    }

    /// Like [`Self::solve_symmetric`], but for an already sampled potential.
    pub fn solve_symmetric_system(
        &self,
        sys: &System,
        erange: (f64, f64),
        parity: Parity,
    ) -> XResult<SolveResult>
    {
        XError::check_energy_range(erange.0, erange.1)?;
        self.check_symmetric(sys)?;
        let method = Method::Symmetric(parity);
        let integrator
            = SymmetricIntegrator::new(sys, self.mass, self.config.hbar, parity);
        let states = self.search(&integrator, sys, erange, method);
        Ok(SolveResult { x: sys.get_x().clone(), states, method })
    }

    /// Run [`Self::solve_symmetric`] for both parities and merge the results in
    /// ascending energy order.
    pub fn solve_symmetric_full<F>(
        &self,
        xargs: (f64, f64, usize),
        V: F,
        erange: (f64, f64),
    ) -> XResult<SolveResult>
    where F: FnMut(f64) -> f64
    {
        XError::check_energy_range(erange.0, erange.1)?;
        let sys = System::new_linspace(xargs, V)?;
        let even = self.solve_symmetric_system(&sys, erange, Parity::Even)?;
        let odd = self.solve_symmetric_system(&sys, erange, Parity::Odd)?;
        Ok(even.merge(odd, Method::SymmetricMerged))
    }

    fn check_symmetric(&self, sys: &System) -> XResult<()> {
        let grid = sys.grid();
        if !grid.is_symmetric(DEF_SYMMETRY_TOL) {
            return Err(XError::AsymmetricGrid(grid.x_min(), grid.x_max()));
        }
        if grid.len() % 2 == 0 {
            warn!(
                "solve: symmetric solve on a grid with an even number of points \
                ({}); parity is imposed about x = {:e}, which biases energies \
                at first order in dx",
                grid.len(),
                grid.x_min() + grid.center_index() as f64 * grid.spacing(),
            );
        }
        let asym = sys.asymmetry();
        if asym > DEF_SYMMETRY_TOL.sqrt() {
            warn!(
                "solve: potential is not symmetric about x = 0 (relative \
                mismatch {asym:.3e}); parity-restricted states may be wrong"
            );
        }
        Ok(())
    }

    fn scan<I>(&self, integrator: &I, energies: &[f64]) -> Vec<Sign>
    where I: Integrator + Sync
    {
        if self.config.parallel {
            energies.par_iter()
                .map(|&e| integrator.boundary_sign(e))
                .collect()
        } else {
            energies.iter()
                .map(|&e| integrator.boundary_sign(e))
                .collect()
        }
    }

    // refine, re-integrate, and normalize a single bracket
    fn accept<I>(&self, integrator: &I, dx: f64, bracket: (f64, f64))
        -> (f64, nd::Array1<f64>)
    where I: Integrator
    {
        let refiner = EnergyRefiner::new(
            integrator, self.config.tolerance, self.config.maxiters);
        let normalizer = Normalizer::new(self.config.quadrature);
        let e = refiner.refine(bracket.0, bracket.1);
        debug!("solve: refined [{:e}, {:e}] -> {:e}", bracket.0, bracket.1, e);
        let wf = integrator.eigenfunction(e, self.config.match_tail);
        (e, normalizer.normalize(&wf, dx))
    }

    fn search<I>(
        &self,
        integrator: &I,
        sys: &System,
        erange: (f64, f64),
        method: Method,
    ) -> Vec<BoundState>
    where I: Integrator + Sync
    {
        let (e_min, e_max) = erange;
        let k = self.config.scan_steps;
        info!(
            "solve: {method} over {} points, energies [{e_min:e}, {e_max:e}] in \
            {k} steps",
            sys.len(),
        );
        let de = (e_max - e_min) / k as f64;
        let energies: Vec<f64>
            = (0..=k)
            .map(|i| if i == k { e_max } else { e_min + i as f64 * de })
            .collect();
        let signs = self.scan(integrator, &energies);
        let brackets = find_brackets(&energies, &signs);
        brackets.iter()
            .for_each(|b| debug!("solve: bracket [{:e}, {:e}]", b.0, b.1));

        let dx = sys.get_dx();
        let found: Vec<(f64, nd::Array1<f64>)>
            = if self.config.parallel {
                brackets.par_iter()
                    .map(|&b| self.accept(integrator, dx, b))
                    .collect()
            } else {
                brackets.iter()
                    .map(|&b| self.accept(integrator, dx, b))
                    .collect()
            };
        info!("solve: {method} found {} bound state(s)", found.len());
        found.into_iter().enumerate()
            .map(|(index, (energy, wf))| BoundState { energy, wf, index })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::grid::SpatialGrid;

    const P: Sign = Sign::Positive;
    const N: Sign = Sign::Negative;
    const Z: Sign = Sign::Zero;

    fn natural() -> Solver { Solver::new(1.0, SolverConfig::natural()).unwrap() }

    fn qho(x: f64) -> f64 { 0.5 * x * x }

    #[test]
    fn method_tags() {
        assert_eq!(Method::Shooting.to_string(), "numerov-shooting");
        assert_eq!(
            Method::Symmetric(Parity::Odd).as_str(), "numerov-symmetric-odd");
        assert!(Method::FiniteWell.is_analytic());
        assert!(!Method::SymmetricMerged.is_analytic());
    }

    #[test]
    fn brackets_from_signs() {
        let e = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(find_brackets(&e, &[P, P, N, N, P, P]), vec![(1.0, 2.0), (3.0, 4.0)]);
        // zeros are skipped without resetting the tracked sign
        assert_eq!(find_brackets(&e, &[P, Z, Z, N, Z, N]), vec![(0.0, 3.0)]);
        assert!(find_brackets(&e, &[P, Z, P, Z, P, P]).is_empty());
        // a zero start only begins tracking at the first nonzero sign
        assert_eq!(find_brackets(&e, &[Z, N, N, P, Z, Z]), vec![(2.0, 3.0)]);
        assert!(find_brackets(&[], &[]).is_empty());
    }

    #[test]
    fn rejects_bad_configuration() {
        assert!(matches!(
            Solver::new(0.0, SolverConfig::natural()), Err(XError::BadMass(_))));
        assert!(matches!(
            Solver::new(1.0, SolverConfig::natural().with_scan_steps(0)),
            Err(XError::BadSteps(0)),
        ));
        let solver = natural();
        assert!(matches!(
            solver.solve((-1.0, 1.0, 101), qho, (1.0, 1.0)),
            Err(XError::BadEnergyRange(..)),
        ));
        assert!(matches!(
            solver.solve((1.0, -1.0, 101), qho, (0.0, 1.0)),
            Err(XError::Grid(_)),
        ));
        assert!(matches!(
            solver.solve_symmetric((-1.0, 2.0, 101), qho, (0.0, 1.0), Parity::Even),
            Err(XError::AsymmetricGrid(..)),
        ));
    }

    #[test]
    fn oscillator_levels() {
        let res = natural().solve((-10.0, 10.0, 2001), qho, (0.1, 8.0)).unwrap();
        assert_eq!(res.method, Method::Shooting);
        assert_eq!(res.len(), 8);
        for (n, s) in res.states.iter().enumerate() {
            assert_eq!(s.index, n);
            assert_relative_eq!(s.energy, n as f64 + 0.5, max_relative = 1e-5);
            assert_eq!(s.node_count(0.1), n);
        }
        assert_eq!(res.wavefunction_matrix().dim(), (8, 2001));
        assert_eq!(res.wavefunctions().count(), 8);
    }

    #[test]
    fn symmetric_matches_forward() {
        let solver = natural();
        let full = solver.solve((-10.0, 10.0, 2001), qho, (0.1, 6.0)).unwrap();
        let sym = solver.solve_symmetric_full((-10.0, 10.0, 2001), qho, (0.1, 6.0))
            .unwrap();
        assert_eq!(sym.method, Method::SymmetricMerged);
        assert_eq!(full.len(), sym.len());
        for (a, b) in full.states.iter().zip(&sym.states) {
            assert_relative_eq!(a.energy, b.energy, max_relative = 1e-5);
            assert_eq!(a.index, b.index);
        }
        let even = solver.solve_symmetric(
            (-10.0, 10.0, 2001), qho, (0.1, 6.0), Parity::Even).unwrap();
        assert_eq!(even.len(), 3);
        assert!(even.states.iter().all(|s| s.node_count(0.1) % 2 == 0));
    }

    #[test]
    fn empty_window_is_not_an_error() {
        let res = natural().solve((-10.0, 10.0, 1001), qho, (0.6, 1.4)).unwrap();
        assert!(res.is_empty());
        assert_eq!(res.energies().len(), 0);
        assert_eq!(res.wavefunction_matrix().dim(), (0, 1001));
        assert_eq!(res.x.len(), 1001);
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let par = natural().solve((-8.0, 8.0, 1201), qho, (0.1, 4.0)).unwrap();
        let seq = Solver::new(1.0, SolverConfig::natural().with_parallel(false))
            .unwrap()
            .solve((-8.0, 8.0, 1201), qho, (0.1, 4.0))
            .unwrap();
        assert_eq!(par.energies(), seq.energies());
        assert_eq!(par.wavefunction_matrix(), seq.wavefunction_matrix());
    }

    #[test]
    fn even_grid_shifts_symmetric_energies() {
        let solver = natural();
        let odd_grid = solver
            .solve_symmetric((-10.0, 10.0, 2001), qho, (0.1, 1.0), Parity::Even)
            .unwrap();
        assert_eq!(odd_grid.len(), 1);
        assert_relative_eq!(odd_grid.energies()[0], 0.5, max_relative = 1e-5);

        // mirrored about x = dx/2 rather than x = 0
        let even_grid = solver
            .solve_symmetric((-10.0, 10.0, 2000), qho, (0.1, 1.0), Parity::Even)
            .unwrap();
        assert_eq!(even_grid.len(), 1);
        let rel = (even_grid.energies()[0] - 0.5) / 0.5;
        assert!(rel > 1e-3 && rel < 1e-2, "relative shift {}", rel);
    }

    #[test]
    fn presampled_system() {
        let grid = SpatialGrid::new(-10.0, 10.0, 2001).unwrap();
        let sys = System::new(grid, qho);
        let res = natural().solve_system(&sys, (0.1, 1.0)).unwrap();
        assert_eq!(res.len(), 1);
        assert_relative_eq!(res.energies()[0], 0.5, max_relative = 1e-5);
    }

    #[test]
    fn merge_sorts_and_reindexes() {
        let x: nd::Array1<f64> = nd::Array1::zeros(3);
        let mk = |es: &[f64]| SolveResult {
            x: x.clone(),
            states: es.iter().enumerate()
                .map(|(index, &energy)| {
                    BoundState { energy, wf: nd::Array1::zeros(3), index }
                })
                .collect(),
            method: Method::Shooting,
        };
        let merged = mk(&[0.5, 2.5]).merge(mk(&[1.5]), Method::SymmetricMerged);
        assert_eq!(merged.energies(), nd::array![0.5, 1.5, 2.5]);
        assert!(merged.states.iter().enumerate().all(|(k, s)| s.index == k));
    }
}
