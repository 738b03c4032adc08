//! Error types for grid construction and bound-state solves.
//!
//! Each type derives [`thiserror::Error`]; grid and length errors convert into
//! [`XError`] with `?`, and all of them work with [`anyhow`][anyhow] in
//! application code.
//!
//! Only configuration problems are errors. Numerical divergence during
//! integration and empty search results are ordinary output and are reported
//! through return values instead.
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use thiserror::Error;

/// Returned when a coordinate array and a potential array do not have the same
/// number of points.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        let na = a.len();
        let nb = b.len();
        (na == nb).then_some(()).ok_or(Self(na, nb))
    }
}

/// Returned from [`SpatialGrid`][crate::grid::SpatialGrid] construction and
/// indexing.
#[derive(Debug, Error)]
pub enum GridError {
    /// Returned when a grid would have fewer than 2 points, or when its bounds
    /// are not finite and strictly increasing.
    #[error("invalid grid: need x_min < x_max (finite) and at least 2 points; got [{x_min}, {x_max}] with {n} points")]
    InvalidGrid { x_min: f64, x_max: f64, n: usize },

    /// Returned when a grid index falls outside `[0, n - 1]`.
    #[error("grid index {0} out of bounds for grid of {1} points")]
    Index(usize, usize),
}

impl GridError {
    pub(crate) fn check_grid(x_min: f64, x_max: f64, n: usize)
        -> Result<(), Self>
    {
        (x_min.is_finite() && x_max.is_finite() && x_max > x_min && n >= 2)
            .then_some(())
            .ok_or(Self::InvalidGrid { x_min, x_max, n })
    }

    pub(crate) fn check_index(index: usize, n: usize) -> Result<(), Self> {
        (index < n).then_some(()).ok_or(Self::Index(index, n))
    }
}

/// Returned from bound-state solver functions.
#[derive(Debug, Error)]
pub enum XError {
    /// Returned when a non-positive `epsilon` value is encountered.
    #[error("epsilon values must be greater than 0; got {0}")]
    BadEpsilon(f64),

    /// Returned when a non-positive `maxiters` value is encountered.
    #[error("maxiters must be greater than 0; got {0}")]
    BadMaxiters(usize),

    /// Returned when the energy scan is configured with zero steps.
    #[error("energy scan must take at least 1 step; got {0}")]
    BadSteps(usize),

    /// Returned when a particle mass is not finite and positive.
    #[error("mass must be finite and greater than 0; got {0}")]
    BadMass(f64),

    /// Returned when the value used for ħ is not finite and positive.
    #[error("hbar must be finite and greater than 0; got {0}")]
    BadHbar(f64),

    /// Returned when an energy window is empty, reversed, or not finite.
    #[error("energy range must satisfy e_min < e_max (finite); got [{0}, {1}]")]
    BadEnergyRange(f64, f64),

    /// Returned when a parity-exploiting solve is requested on a grid that is
    /// not symmetric about x = 0.
    #[error("symmetric solve requires a grid symmetric about 0; got [{0}, {1}]")]
    AsymmetricGrid(f64, f64),

    /// Returned when a closed-form reference is given a physical parameter
    /// (trap frequency, well width or depth) that is not finite and positive.
    #[error("{0} must be finite and greater than 0; got {1}")]
    BadParameter(&'static str, f64),

    /// [`GridError`]
    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),
}

impl XError {
    pub(crate) fn check_epsilon(epsilon: f64) -> Result<(), Self> {
        (epsilon > 0.0 && epsilon.is_finite())
            .then_some(()).ok_or(Self::BadEpsilon(epsilon))
    }

    pub(crate) fn check_maxiters(maxiters: usize) -> Result<(), Self> {
        (maxiters != 0).then_some(()).ok_or(Self::BadMaxiters(maxiters))
    }

    pub(crate) fn check_steps(steps: usize) -> Result<(), Self> {
        (steps != 0).then_some(()).ok_or(Self::BadSteps(steps))
    }

    pub(crate) fn check_mass(mass: f64) -> Result<(), Self> {
        (mass > 0.0 && mass.is_finite())
            .then_some(()).ok_or(Self::BadMass(mass))
    }

    pub(crate) fn check_hbar(hbar: f64) -> Result<(), Self> {
        (hbar > 0.0 && hbar.is_finite())
            .then_some(()).ok_or(Self::BadHbar(hbar))
    }

    pub(crate) fn check_parameter(name: &'static str, value: f64)
        -> Result<(), Self>
    {
        (value > 0.0 && value.is_finite())
            .then_some(()).ok_or(Self::BadParameter(name, value))
    }

    pub(crate) fn check_energy_range(e_min: f64, e_max: f64)
        -> Result<(), Self>
    {
        (e_min.is_finite() && e_max.is_finite() && e_min < e_max)
            .then_some(()).ok_or(Self::BadEnergyRange(e_min, e_max))
    }
}
