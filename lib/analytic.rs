//! Closed-form reference solutions for a few textbook potentials.
//!
//! These return the same [`SolveResult`] shape as the shooting solver so that
//! the two can be compared directly; nothing in the solver calls them.

use std::f64::consts::{ FRAC_PI_2, PI };
use ndarray as nd;
use crate::{
    error::XError,
    grid::SpatialGrid,
    normalize::Normalizer,
    numerov::Sign,
    refine::bisect,
    solve::{ BoundState, Method, SolveResult, XResult },
    units,
};

fn collect_states<I>(grid: &SpatialGrid, method: Method, states: I)
    -> SolveResult
where I: IntoIterator<Item = (f64, nd::Array1<f64>)>
{
    let states: Vec<BoundState>
        = states.into_iter().enumerate()
        .map(|(index, (energy, wf))| BoundState { energy, wf, index })
        .collect();
    SolveResult { x: grid.to_array(), states, method }
}

/// Lowest `n_states` eigenstates of the harmonic potential `V(x) = ½ m ω² x²`,
/// centered on x = 0.
///
/// Energies are `ħω(n + ½)`; wavefunctions are the Hermite functions, computed
/// by upward recurrence and normalized over the whole real line.
pub fn harmonic_oscillator(
    mass: f64,
    omega: f64,
    hbar: f64,
    grid: &SpatialGrid,
    n_states: usize,
) -> XResult<SolveResult>
{
    XError::check_mass(mass)?;
    XError::check_hbar(hbar)?;
    XError::check_parameter("omega", omega)?;
    let a = units::oscillator_length(mass, omega, hbar);
    let xi = grid.to_array() / a;
    let psi0 = xi.mapv(|z| PI.powf(-0.25) * (-z * z / 2.0).exp());
    let mut states: Vec<(f64, nd::Array1<f64>)> = Vec::with_capacity(n_states);
    let mut prev: nd::Array1<f64> = nd::Array1::zeros(xi.len());
    let mut cur = psi0;
    for n in 0..n_states {
        let energy = hbar * omega * (n as f64 + 0.5);
        states.push((energy, &cur / a.sqrt()));
        // ψₙ₊₁ = √(2/(n+1)) ξ ψₙ - √(n/(n+1)) ψₙ₋₁
        let c1 = (2.0 / (n as f64 + 1.0)).sqrt();
        let c0 = (n as f64 / (n as f64 + 1.0)).sqrt();
        let next = c1 * &xi * &cur - c0 * &prev;
        prev = cur;
        cur = next;
    }
    Ok(collect_states(grid, Method::HarmonicOscillator, states))
}

/// Lowest `n_states` eigenstates of an infinitely deep square well whose walls
/// sit at the ends of `grid`.
///
/// Energies are `n²π²ħ² / 2mL²` for `n = 1, 2, ...`, with `L` the grid width.
pub fn infinite_well(
    mass: f64,
    hbar: f64,
    grid: &SpatialGrid,
    n_states: usize,
) -> XResult<SolveResult>
{
    XError::check_mass(mass)?;
    XError::check_hbar(hbar)?;
    let l = grid.width();
    let x0 = grid.x_min();
    let amp = (2.0 / l).sqrt();
    let states
        = (1..=n_states)
        .map(|n| {
            let k = n as f64 * PI / l;
            let energy = (hbar * k).powi(2) / (2.0 * mass);
            let wf = grid.sample(|x| amp * (k * (x - x0)).sin());
            (energy, wf)
        });
    Ok(collect_states(grid, Method::InfiniteWell, states))
}

/// Square well of total `width` centered on x = 0, with `V = 0` inside and
/// `V = depth` outside.
pub fn finite_well_potential(width: f64, depth: f64) -> impl Fn(f64) -> f64 {
    let a = width / 2.0;
    move |x| if x.abs() < a { 0.0 } else { depth }
}

/// All bound states of the square well described by
/// [`finite_well_potential`].
///
/// With `a = width / 2`, `z = ka` and `z₀ = a √(2 m V₀) / ħ`, even states
/// satisfy `z tan z = √(z₀² - z²)` and odd states `-z cot z = √(z₀² - z²)`.
/// Each branch has exactly one root per half-period below `z₀`; roots are found
/// by bisection and wavefunctions are normalized over `grid` with the
/// trapezoidal rule.
pub fn finite_well(
    mass: f64,
    hbar: f64,
    width: f64,
    depth: f64,
    grid: &SpatialGrid,
) -> XResult<SolveResult>
{
    XError::check_mass(mass)?;
    XError::check_hbar(hbar)?;
    XError::check_parameter("width", width)?;
    XError::check_parameter("depth", depth)?;
    let a = width / 2.0;
    let z0 = a * (2.0 * mass * depth).sqrt() / hbar;
    let w = |z: f64| (z0 * z0 - z * z).max(0.0).sqrt();
    let g_even = |z: f64| z * z.sin() - w(z) * z.cos();
    let g_odd = |z: f64| z * z.cos() + w(z) * z.sin();
    let tol = z0 * f64::EPSILON;

    // (z, odd)
    let mut roots: Vec<(f64, bool)> = Vec::new();
    let mut lo: f64 = 0.0;
    let mut odd = false;
    while lo < z0 {
        let hi = (lo + FRAC_PI_2).min(z0);
        let z = if odd {
            bisect(|z| Sign::of(g_odd(z)), (lo, hi), tol, 200).x
        } else {
            bisect(|z| Sign::of(g_even(z)), (lo, hi), tol, 200).x
        };
        roots.push((z, odd));
        lo += FRAC_PI_2;
        odd = !odd;
    }

    let normalizer = Normalizer::default();
    let dx = grid.spacing();
    let states
        = roots.into_iter()
        .map(|(z, odd)| {
            let k = z / a;
            let kappa = w(z) / a;
            let energy = (hbar * k).powi(2) / (2.0 * mass);
            let wf = grid.sample(|x| {
                let outside = (-kappa * (x.abs() - a)).exp();
                match (odd, x.abs() < a) {
                    (false, true) => (k * x).cos(),
                    (false, false) => z.cos() * outside,
                    (true, true) => (k * x).sin(),
                    (true, false) => x.signum() * z.sin() * outside,
                }
            });
            (energy, normalizer.normalize(&wf, dx))
        });
    Ok(collect_states(grid, Method::FiniteWell, states))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{ assert_abs_diff_eq, assert_relative_eq };
    use crate::utils::{ node_count, wf_dot, wf_norm };

    #[test]
    fn oscillator_is_orthonormal() {
        let grid = SpatialGrid::new(-12.0, 12.0, 2401).unwrap();
        let res = harmonic_oscillator(1.0, 1.0, 1.0, &grid, 10).unwrap();
        assert_eq!(res.method, Method::HarmonicOscillator);
        assert_eq!(res.len(), 10);
        let dx = grid.spacing();
        for (n, s) in res.states.iter().enumerate() {
            assert_relative_eq!(s.energy, n as f64 + 0.5);
            assert_eq!(node_count(&s.wf, 0.0), n);
            for t in res.states.iter().skip(n) {
                let expected = if t.index == s.index { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(wf_dot(&s.wf, &t.wf, dx), expected, epsilon = 1e-8);
            }
        }
    }

    #[test]
    fn oscillator_scales_with_length() {
        // a = √(ħ/mω) = 0.5
        let grid = SpatialGrid::new(-6.0, 6.0, 2401).unwrap();
        let res = harmonic_oscillator(4.0, 1.0, 1.0, &grid, 1).unwrap();
        let peak = res.states[0].wf[1200];
        assert_relative_eq!(peak, PI.powf(-0.25) / 0.5_f64.sqrt(), max_relative = 1e-12);
        assert!(matches!(
            harmonic_oscillator(1.0, -1.0, 1.0, &grid, 1),
            Err(XError::BadParameter("omega", _)),
        ));
    }

    #[test]
    fn infinite_well_levels() {
        let grid = SpatialGrid::new(-0.5, 0.5, 1001).unwrap();
        let res = infinite_well(1.0, 1.0, &grid, 5).unwrap();
        let e1 = PI * PI / 2.0;
        for (n, s) in res.states.iter().enumerate() {
            assert_relative_eq!(s.energy, e1 * ((n + 1) * (n + 1)) as f64, max_relative = 1e-12);
            assert_abs_diff_eq!(wf_norm(&s.wf, grid.spacing()), 1.0, epsilon = 1e-9);
            assert_abs_diff_eq!(s.wf[0], 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(s.wf[1000], 0.0, epsilon = 1e-12);
        }
        assert!(infinite_well(0.0, 1.0, &grid, 1).is_err());
    }

    #[test]
    fn finite_well_state_count() {
        // z₀ = 10 → ⌈z₀ / (π/2)⌉ = 7 states
        let (width, depth) = (2.0, 50.0);
        let grid = SpatialGrid::new(-4.0, 4.0, 2001).unwrap();
        let res = finite_well(1.0, 1.0, width, depth, &grid).unwrap();
        assert_eq!(res.len(), 7);
        let dx = grid.spacing();
        for (n, s) in res.states.iter().enumerate() {
            assert!(s.energy > 0.0 && s.energy < depth);
            assert_eq!(node_count(&s.wf, 0.0), n);
            assert_abs_diff_eq!(wf_norm(&s.wf, dx), 1.0, epsilon = 1e-12);
        }
        // sits below the infinite-well level of the same width
        let e1_inf = PI * PI / (2.0 * width * width);
        assert!(res.states[0].energy < e1_inf);
    }

    #[test]
    fn finite_well_approaches_infinite_well() {
        let grid = SpatialGrid::new(-1.0, 1.0, 2001).unwrap();
        // z₀ ≈ 707
        let res = finite_well(1.0, 1.0, 1.0, 1e6, &grid).unwrap();
        let e1 = PI * PI / 2.0;
        for n in 0..3 {
            let exact = e1 * ((n + 1) * (n + 1)) as f64;
            assert!(res.states[n].energy < exact);
            assert_relative_eq!(res.states[n].energy, exact, max_relative = 1e-2);
        }
    }

    #[test]
    fn shallow_well_keeps_one_state() {
        let grid = SpatialGrid::new(-20.0, 20.0, 2001).unwrap();
        let res = finite_well(1.0, 1.0, 1.0, 0.1, &grid).unwrap();
        assert_eq!(res.len(), 1);
        assert!(matches!(
            finite_well(1.0, 1.0, 1.0, 0.0, &grid),
            Err(XError::BadParameter("depth", _)),
        ));
    }

    #[test]
    fn potential_shape() {
        let v = finite_well_potential(2.0, 3.0);
        assert_eq!(v(0.0), 0.0);
        assert_eq!(v(0.99), 0.0);
        assert_eq!(v(-1.5), 3.0);
    }
}
