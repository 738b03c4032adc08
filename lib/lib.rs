#![allow(dead_code, non_snake_case)]

//! Provides functions and higher-level constructs for automated discovery of
//! bound states of the one-dimensional, time-independent Schrödinger equation
//!
//! ```text
//!    ħ² ∂²ψ
//! - --- --- + V(x) ψ(x) = E ψ(x)
//!   2 m ∂x²
//! ```
//! for an arbitrary caller-supplied potential, via Numerov's scheme and a
//! shooting-method energy search.
//!
//! Provides implementations for the following numerical routines:
//! - Numerov integration from a hard left wall across the whole grid
//! - Parity-exploiting Numerov integration from the center of a symmetric
//!   grid outward
//! - Sign-change scanning over an energy window with bisection refinement
//! - Wavefunction normalization under trapezoidal or Simpson quadrature
//!
//! Closed-form reference solutions in [`analytic`] share the solver's result
//! shape for cross-validation. See [`docs`] for theoretical background.
//!
//! ```
//! use wellspace::{ config::SolverConfig, solve::Solver };
//!
//! // harmonic oscillator in units ħ = m = ω = 1
//! let solver = Solver::new(1.0, SolverConfig::natural()).unwrap();
//! let res = solver.solve((-10.0, 10.0, 2001), |x| 0.5 * x * x, (0.1, 5.0))
//!     .unwrap();
//! assert_eq!(res.len(), 5);
//! assert!((res.energies()[0] - 0.5).abs() < 1e-4);
//! ```

pub mod analytic;
pub mod config;
pub mod error;
pub mod grid;
pub mod normalize;
pub mod numerov;
pub mod refine;
pub mod solve;
pub mod units;
pub mod utils;

pub mod docs;

pub(crate) const DEF_EPSILON: f64 = 1e-6;
pub(crate) const DEF_MAXITERS: usize = 1000;
pub(crate) const DEF_SCAN_STEPS: usize = 200;
pub(crate) const DEF_SYMMETRY_TOL: f64 = 1e-9;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
