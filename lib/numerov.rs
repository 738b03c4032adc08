//! Numerov integration of the TISE at a fixed trial energy.
//!
//! Two integrators are provided, both implementing [`Integrator`]:
//! - [`ForwardIntegrator`] starts at a hard wall on the left edge of the grid
//!   and integrates across the whole domain.
//! - [`SymmetricIntegrator`] assumes `V(-x) = V(x)`, integrates from the center
//!   of the grid outward under a fixed [`Parity`], and fills the left half by
//!   mirroring.
//!
//! Both share the same recurrence and divergence guard. Integrations that
//! overflow are reported as [`Integration::Diverged`] rather than as errors:
//! the sign of an overflowed value is still meaningful to a shooting search.

use log::trace;
use ndarray as nd;
use crate::{ Arr1, grid::System };

/// Magnitude past which an integration is considered divergent.
pub const DIVERGENCE_LIMIT: f64 = 1e300;

// magnitude at which an inward tail integration is rescaled to unit size
const RESCALE_LIMIT: f64 = 1e150;

/// Three-valued sign of a boundary value.
///
/// `NaN` is treated as [`Sign::Zero`], i.e. as carrying no sign information.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    /// Classify a value.
    pub fn of(x: f64) -> Self {
        if x > 0.0 {
            Self::Positive
        } else if x < 0.0 {
            Self::Negative
        } else {
            Self::Zero
        }
    }

    /// Return `true` if `self` is `Zero`.
    pub fn is_zero(self) -> bool { matches!(self, Self::Zero) }

    /// Return `true` if both signs are nonzero and differ.
    pub fn flipped(self, other: Self) -> bool {
        !self.is_zero() && !other.is_zero() && self != other
    }
}

/// Outcome of a single integration.
#[derive(Clone, Debug)]
pub enum Integration {
    /// The recurrence ran to the end of the grid.
    Completed(nd::Array1<f64>),
    /// The recurrence exceeded [`DIVERGENCE_LIMIT`] at index `at`; every entry
    /// from `at` onward holds the (signed) value that tripped the guard.
    Diverged { wf: nd::Array1<f64>, at: usize },
}

impl Integration {
    /// Get a reference to the wavefunction array.
    pub fn wf(&self) -> &nd::Array1<f64> {
        match self {
            Self::Completed(wf) => wf,
            Self::Diverged { wf, .. } => wf,
        }
    }

    /// Take the wavefunction array.
    pub fn into_wf(self) -> nd::Array1<f64> {
        match self {
            Self::Completed(wf) => wf,
            Self::Diverged { wf, .. } => wf,
        }
    }

    /// Return `true` if `self` is `Diverged`.
    pub fn is_diverged(&self) -> bool { matches!(self, Self::Diverged { .. }) }

    /// Index at which the divergence guard tripped, if it did.
    pub fn diverged_at(&self) -> Option<usize> {
        match self {
            Self::Completed(_) => None,
            Self::Diverged { at, .. } => Some(*at),
        }
    }

    /// Value of the wavefunction at the right edge of the grid.
    pub fn boundary_value(&self) -> f64 {
        match self {
            Self::Completed(wf) => {
                wf.len().checked_sub(1).map_or(0.0, |i| wf[i])
            },
            Self::Diverged { wf, at } => wf[*at],
        }
    }

    /// Sign of [`Self::boundary_value`].
    pub fn boundary_sign(&self) -> Sign { Sign::of(self.boundary_value()) }
}

/// Wavefunction parity under x → -x.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Parity {
    /// ψ(-x) = ψ(x)
    Even,
    /// ψ(-x) = -ψ(x)
    Odd,
}

impl Parity {
    /// Mirroring factor: `+1` for `Even`, `-1` for `Odd`.
    pub fn sign(self) -> f64 {
        match self {
            Self::Even => 1.0,
            Self::Odd => -1.0,
        }
    }

    /// The other parity.
    pub fn flip(self) -> Self {
        match self {
            Self::Even => Self::Odd,
            Self::Odd => Self::Even,
        }
    }
}

/// Common interface for fixed-energy integrators used by the shooting search.
pub trait Integrator {
    /// Integrate for a trial energy. The sign of the result's
    /// [boundary value][Integration::boundary_value] is what the shooting
    /// search tracks.
    fn integrate(&self, e: f64) -> Integration;

    /// Build the (unnormalized) wavefunction at a refined eigenenergy.
    ///
    /// With `match_tail = true` the classically forbidden right tail is
    /// recomputed by integrating inward from the right wall and matched at the
    /// rightmost classically allowed point, which suppresses the exponentially
    /// growing error left over from a finite-precision energy. Otherwise this
    /// is just [`Self::integrate`].
    fn eigenfunction(&self, e: f64, match_tail: bool) -> nd::Array1<f64>;

    /// Shorthand for the boundary sign at a trial energy.
    fn boundary_sign(&self, e: f64) -> Sign { self.integrate(e).boundary_sign() }
}

/// Compute the Numerov coefficients `f[i] = (dx²/12) 2 m (E - V[i]) / ħ²`.
#[allow(non_snake_case)]
pub fn numerov_coeffs<S>(dx: f64, V: &Arr1<S>, E: f64, mass: f64, hbar: f64)
    -> nd::Array1<f64>
where S: nd::Data<Elem = f64>
{
    let a = dx.powi(2) / 12.0 * 2.0 * mass / hbar.powi(2);
    V.mapv(|Vk| a * (E - Vk))
}

// starting value one grid point away from a hard wall, for a grid of `n`
// points; the scale s = 1 / (n √L) is arbitrary but keeps the integration
// clear of both overflow and underflow
//
// at k² = 0 the seed is s itself, and a seed that underflows is replaced with
// the smallest positive float, so the integration is never identically zero
fn wall_seed(f: f64, n: usize, dx: f64) -> f64 {
    let l = n as f64 * dx;
    let s = (n as f64 * l.sqrt()).recip();
    let k2 = 12.0 * f / dx.powi(2);
    let seed =
        if k2 > 0.0 {
            s * (k2.sqrt() * dx).sin()
        } else if k2 < 0.0 {
            s * (-(-k2).sqrt() * l / 2.0).exp()
        } else {
            s
        };
    if seed == 0.0 { f64::MIN_POSITIVE } else { seed }
}

// fill q[2..] with Numerov's recurrence, given q[0] and q[1]
//
// returns the index at which |q| first exceeded the divergence limit, after
// which every remaining entry is filled with that (signed) value; a NaN is
// treated as a zero
fn propagate<S, T>(f: &Arr1<S>, q: &mut Arr1<T>) -> Option<usize>
where
    S: nd::Data<Elem = f64>,
    T: nd::DataMut<Elem = f64>,
{
    let n = q.len();
    for j in 1..n.saturating_sub(1) {
        let qnext = (
            (2.0 - 10.0 * f[j]) * q[j]
            - (1.0 + f[j - 1]) * q[j - 1]
        ) / (1.0 + f[j + 1]);
        if qnext.is_nan() || qnext.abs() > DIVERGENCE_LIMIT {
            let fill =
                if qnext.is_nan() {
                    0.0
                } else if qnext.is_infinite() {
                    DIVERGENCE_LIMIT.copysign(qnext)
                } else {
                    qnext
                };
            q.slice_mut(nd::s![j + 1..]).fill(fill);
            return Some(j + 1);
        }
        q[j + 1] = qnext;
    }
    None
}

// like `propagate`, but whenever |q| passes `RESCALE_LIMIT` everything computed
// so far is divided by that magnitude, so the growing solution never
// overflows; entries far behind the front may underflow to zero
//
// returns `false` if a non-finite value appears anyway
fn propagate_rescaled<S>(f: &Arr1<S>, q: &mut nd::Array1<f64>) -> bool
where S: nd::Data<Elem = f64>
{
    let n = q.len();
    for j in 1..n.saturating_sub(1) {
        let qnext = (
            (2.0 - 10.0 * f[j]) * q[j]
            - (1.0 + f[j - 1]) * q[j - 1]
        ) / (1.0 + f[j + 1]);
        if !qnext.is_finite() { return false; }
        q[j + 1] = qnext;
        if qnext.abs() > RESCALE_LIMIT {
            let r = qnext.abs().recip();
            q.slice_mut(nd::s![..j + 2]).map_inplace(|qk| { *qk *= r; });
        }
    }
    true
}

// replace the classically forbidden right tail of `q` with an inward
// integration from the right wall
//
// the matching point m is the rightmost classically allowed point strictly
// after `start`; nothing is done if there is no forbidden tail, if the outward
// integration already diverged at or before m, if the inward integration
// fails, or if the match is degenerate
fn match_right_tail<S>(
    f: &Arr1<S>,
    q: &mut nd::Array1<f64>,
    start: usize,
    dx: f64,
    diverged_at: Option<usize>,
)
where S: nd::Data<Elem = f64>
{
    let n = q.len();
    let Some(m) = (start + 1..n.saturating_sub(1)).rev().find(|&i| f[i] >= 0.0)
        else { return; };
    if m + 3 > n { return; }
    if diverged_at.is_some_and(|at| at <= m) { return; }

    // inward[k] <-> q[n - 1 - k]
    let mut inward: nd::Array1<f64> = nd::Array1::zeros(n - m);
    inward[1] = wall_seed(f[n - 2], n, dx);
    if !propagate_rescaled(&f.slice(nd::s![m..;-1]), &mut inward) {
        trace!("inward tail integration failed; keeping the outward tail");
        return;
    }
    let scale = q[m] / inward[n - 1 - m];
    if !scale.is_finite() || scale == 0.0 { return; }
    nd::Zip::from(q.slice_mut(nd::s![m..]))
        .and(inward.slice(nd::s![..;-1]))
        .for_each(|qk, rk| { *qk = scale * rk; });
}

/// Numerov integration across the whole grid, starting from a hard wall at the
/// left edge (ψ[0] = 0).
#[derive(Copy, Clone, Debug)]
pub struct ForwardIntegrator<'a> {
    sys: &'a System,
    mass: f64,
    hbar: f64,
}

impl<'a> ForwardIntegrator<'a> {
    /// Create a new integrator for a particle of mass `mass` in a sampled
    /// potential.
    pub fn new(sys: &'a System, mass: f64, hbar: f64) -> Self {
        Self { sys, mass, hbar }
    }

    #[allow(non_snake_case)]
    fn coeffs(&self, E: f64) -> nd::Array1<f64> {
        numerov_coeffs(self.sys.get_dx(), self.sys.get_V(), E, self.mass, self.hbar)
    }

    fn outward(&self, f: &nd::Array1<f64>) -> Integration {
        let n = f.len();
        let mut q: nd::Array1<f64> = nd::Array1::zeros(n);
        if n < 2 { return Integration::Completed(q); }
        q[1] = wall_seed(f[1], n, self.sys.get_dx());
        match propagate(f, &mut q) {
            None => Integration::Completed(q),
            Some(at) => {
                trace!("forward integration diverged at index {at} of {n}");
                Integration::Diverged { wf: q, at }
            },
        }
    }
}

impl<'a> Integrator for ForwardIntegrator<'a> {
    fn integrate(&self, e: f64) -> Integration {
        self.outward(&self.coeffs(e))
    }

    fn eigenfunction(&self, e: f64, match_tail: bool) -> nd::Array1<f64> {
        let f = self.coeffs(e);
        let res = self.outward(&f);
        let at = res.diverged_at();
        let mut q = res.into_wf();
        if match_tail {
            match_right_tail(&f, &mut q, 0, self.sys.get_dx(), at);
        }
        q
    }
}

/// Numerov integration from the center of a symmetric grid outward, assuming a
/// symmetric potential and a fixed parity.
///
/// The initial conditions at the center index *c* are
/// - even: ψ[c] = 1, ψ[c + 1] = 1 - 6 f[c] (so that ψ'(0) = 0)
/// - odd: ψ[c] = 0, ψ[c + 1] = dx (so that ψ(0) = 0)
///
/// and the left half is filled as ψ[i] = ±ψ[2c - i].
#[derive(Copy, Clone, Debug)]
pub struct SymmetricIntegrator<'a> {
    sys: &'a System,
    mass: f64,
    hbar: f64,
    parity: Parity,
    c: usize,
}

impl<'a> SymmetricIntegrator<'a> {
    /// Create a new integrator for a particle of mass `mass` in a sampled
    /// potential, looking for states of a given parity.
    pub fn new(sys: &'a System, mass: f64, hbar: f64, parity: Parity) -> Self {
        let c = sys.grid().center_index();
        Self { sys, mass, hbar, parity, c }
    }

    /// Parity assumed by this integrator.
    pub fn parity(&self) -> Parity { self.parity }

    /// Index of the grid point the integration starts from.
    pub fn center_index(&self) -> usize { self.c }

    #[allow(non_snake_case)]
    fn coeffs(&self, E: f64) -> nd::Array1<f64> {
        numerov_coeffs(self.sys.get_dx(), self.sys.get_V(), E, self.mass, self.hbar)
    }

    // integrate over [c, n), returning the divergence index in the full array
    fn fill_right(&self, f: &nd::Array1<f64>, q: &mut nd::Array1<f64>)
        -> Option<usize>
    {
        let c = self.c;
        let fh = f.slice(nd::s![c..]);
        let mut qh = q.slice_mut(nd::s![c..]);
        let m = qh.len();
        let (q0, q1) =
            match self.parity {
                Parity::Even => (1.0, 1.0 - 6.0 * fh[0]),
                Parity::Odd => (0.0, self.sys.get_dx()),
            };
        qh[0] = q0;
        if m > 1 { qh[1] = q1; }
        propagate(&fh, &mut qh).map(|k| c + k)
    }

    // ψ[i] = ±ψ[2c - i] for i < c; on even-length grids 2c - i can run one
    // past the right edge, in which case the edge value is used
    fn mirror(&self, q: &mut nd::Array1<f64>) {
        let n = q.len();
        let s = self.parity.sign();
        for i in 0..self.c {
            q[i] = s * q[(2 * self.c - i).min(n - 1)];
        }
    }

    fn outward(&self, f: &nd::Array1<f64>) -> (nd::Array1<f64>, Option<usize>) {
        let mut q: nd::Array1<f64> = nd::Array1::zeros(f.len());
        let at = self.fill_right(f, &mut q);
        (q, at)
    }
}

impl<'a> Integrator for SymmetricIntegrator<'a> {
    fn integrate(&self, e: f64) -> Integration {
        let f = self.coeffs(e);
        let (mut q, at) = self.outward(&f);
        self.mirror(&mut q);
        match at {
            None => Integration::Completed(q),
            Some(at) => {
                trace!(
                    "symmetric ({:?}) integration diverged at index {at} of {}",
                    self.parity,
                    q.len(),
                );
                Integration::Diverged { wf: q, at }
            },
        }
    }

    fn eigenfunction(&self, e: f64, match_tail: bool) -> nd::Array1<f64> {
        let f = self.coeffs(e);
        let (mut q, at) = self.outward(&f);
        if match_tail {
            match_right_tail(&f, &mut q, self.c, self.sys.get_dx(), at);
        }
        self.mirror(&mut q);
        q
    }
}
