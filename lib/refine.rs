//! Bisection refinement of eigenenergies bracketed by a sign change.

use log::{ debug, warn };
use crate::{
    numerov::{ Integrator, Sign },
    DEF_EPSILON,
};

/// Stopping criterion for bisection.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tolerance {
    /// Stop once the bracket is at most this wide (same units as the bracket).
    Absolute(f64),
    /// Stop once the bracket has shrunk to this fraction of its initial width.
    ///
    /// This keeps the iteration count roughly independent of the absolute
    /// energy scale of the problem.
    Relative(f64),
}

impl Default for Tolerance {
    fn default() -> Self { Self::Relative(DEF_EPSILON) }
}

impl Tolerance {
    /// The bare number, in whichever interpretation.
    pub fn value(self) -> f64 {
        match self {
            Self::Absolute(t) => t,
            Self::Relative(r) => r,
        }
    }

    /// Absolute bracket width at which to stop, given the initial width.
    pub fn resolve(self, width: f64) -> f64 {
        match self {
            Self::Absolute(t) => t,
            Self::Relative(r) => r * width.abs(),
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct Bounds<T>(T, T);

impl Bounds<f64> {
    fn midpoint(self) -> f64 { (self.0 + self.1) / 2.0 }

    fn diff(self) -> f64 { self.1 - self.0 }
}

impl<T> From<(T, T)> for Bounds<T> {
    fn from(xx: (T, T)) -> Self { Self(xx.0, xx.1) }
}

/// Outcome of [`bisect`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bisection {
    /// Midpoint of the final bracket.
    pub x: f64,
    /// Final bracket.
    pub bracket: (f64, f64),
    /// Number of function evaluations after the initial one.
    pub iters: usize,
    /// Whether the final bracket is no wider than the requested tolerance.
    pub converged: bool,
}

/// Locate a sign change of `f` inside `bounds = (lo, hi)` by bisection.
///
/// `f` must change sign across the bracket; this is not checked. At each step,
/// whichever bound has the same sign as the midpoint is replaced by it. A
/// midpoint with [`Sign::Zero`] is treated as matching the low bound.
///
/// Stops once the bracket is at most `tol` wide, after `maxiters` steps, or
/// when the midpoint is no longer strictly inside the bracket (i.e. floating
/// point resolution has been exhausted); the last two cases are reported with
/// `converged = false`.
pub fn bisect<F>(mut f: F, bounds: (f64, f64), tol: f64, maxiters: usize)
    -> Bisection
where F: FnMut(f64) -> Sign
{
    let mut b: Bounds<f64> = bounds.into();
    let s_lo = f(b.0);
    let mut iters: usize = 0;
    while b.diff() > tol && iters < maxiters {
        let mid = b.midpoint();
        if mid <= b.0 || mid >= b.1 { break; }
        iters += 1;
        let s = f(mid);
        if s == s_lo || s.is_zero() {
            b.0 = mid;
        } else {
            b.1 = mid;
        }
    }
    Bisection {
        x: b.midpoint(),
        bracket: (b.0, b.1),
        iters,
        converged: b.diff() <= tol,
    }
}

/// Refines bracketed eigenenergies by bisecting on the sign of an
/// [`Integrator`]'s boundary value.
#[derive(Copy, Clone, Debug)]
pub struct EnergyRefiner<'a, I> {
    integrator: &'a I,
    tolerance: Tolerance,
    maxiters: usize,
}

impl<'a, I> EnergyRefiner<'a, I>
where I: Integrator
{
    /// Create a new refiner.
    pub fn new(integrator: &'a I, tolerance: Tolerance, maxiters: usize)
        -> Self
    {
        Self { integrator, tolerance, maxiters }
    }

    /// Bisect an energy bracket `(e_lo, e_hi)`, `e_lo < e_hi`, across which the
    /// integrator's boundary sign is known to change. Returns the midpoint of
    /// the final bracket.
    pub fn refine(&self, e_lo: f64, e_hi: f64) -> f64 {
        let tol = self.tolerance.resolve(e_hi - e_lo);
        let res = bisect(
            |e| self.integrator.boundary_sign(e),
            (e_lo, e_hi),
            tol,
            self.maxiters,
        );
        if !res.converged {
            if res.iters >= self.maxiters {
                warn!(
                    "refine: bisection reached maxiters ({}) with bracket \
                    width {:.3e} > {:.3e}",
                    self.maxiters,
                    res.bracket.1 - res.bracket.0,
                    tol,
                );
            } else {
                debug!(
                    "refine: bracket [{:e}, {:e}] hit floating-point \
                    resolution before tolerance {:.3e}",
                    res.bracket.0,
                    res.bracket.1,
                    tol,
                );
            }
        }
        res.x
    }
}
