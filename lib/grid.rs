//! Uniform one-dimensional coordinate grids and sampled potentials.

use ndarray as nd;
use crate::error::{ GridError, LengthError };

/// A uniform discretization of `[x_min, x_max]` into `n` points, endpoints
/// included.
///
/// Immutable once built. Construction guarantees `n >= 2` and
/// `x_min < x_max`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpatialGrid {
    x_min: f64,
    x_max: f64,
    n: usize,
}

impl SpatialGrid {
    /// Create a new grid from "linspace-style" arguments (start, inclusive
    /// end, and a number of points).
    pub fn new(x_min: f64, x_max: f64, n: usize) -> Result<Self, GridError> {
        GridError::check_grid(x_min, x_max, n)?;
        Ok(Self { x_min, x_max, n })
    }

    /// Left endpoint.
    pub fn x_min(&self) -> f64 { self.x_min }

    /// Right endpoint.
    pub fn x_max(&self) -> f64 { self.x_max }

    /// Number of points.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.n }

    /// Total width of the domain.
    pub fn width(&self) -> f64 { self.x_max - self.x_min }

    /// Grid spacing `dx = (x_max - x_min) / (n - 1)`.
    pub fn spacing(&self) -> f64 { self.width() / (self.n - 1) as f64 }

    // unchecked
    fn x(&self, i: usize) -> f64 { self.x_min + i as f64 * self.spacing() }

    /// Position of the `i`-th point.
    pub fn point_at(&self, i: usize) -> Result<f64, GridError> {
        GridError::check_index(i, self.n)?;
        Ok(self.x(i))
    }

    /// Iterate over all grid positions in order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.n).map(move |i| self.x(i))
    }

    /// Collect all grid positions into an array.
    pub fn to_array(&self) -> nd::Array1<f64> { self.iter().collect() }

    /// Index of the grid point nearest to x = 0, clamped to the grid.
    pub fn center_index(&self) -> usize {
        let c = (-self.x_min * (self.n - 1) as f64 / self.width()).round();
        if c <= 0.0 {
            0
        } else {
            (c as usize).min(self.n - 1)
        }
    }

    /// Return `true` if the grid is symmetric about x = 0 to within a relative
    /// tolerance, i.e. `|x_min + x_max| < tol * max(|x_min|, |x_max|)`.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        (self.x_min + self.x_max).abs()
            < tol * self.x_min.abs().max(self.x_max.abs())
    }

    /// Evaluate a function at every grid point.
    pub fn sample<F>(&self, f: F) -> nd::Array1<f64>
    where F: FnMut(f64) -> f64
    {
        self.iter().map(f).collect()
    }
}

/// Simple record to keep track of a coordinate grid and the potential sampled
/// over it.
///
/// The potential array is guaranteed to have one entry per grid point and is
/// read-only once built.
#[allow(non_snake_case)]
#[derive(Clone, Debug)]
pub struct System {
    grid: SpatialGrid,
    // coordinate array
    x: nd::Array1<f64>,
    // potential array
    V: nd::Array1<f64>,
}

#[allow(non_snake_case)]
impl System {
    /// Sample a potential function over a grid.
    pub fn new<F>(grid: SpatialGrid, V: F) -> Self
    where F: FnMut(f64) -> f64
    {
        let x = grid.to_array();
        let V = x.mapv(V);
        Self { grid, x, V }
    }

    /// Create a new `System` from "linspace-style" arguments (start, inclusive
    /// end, and a number of points).
    pub fn new_linspace<F>(xargs: (f64, f64, usize), V: F)
        -> Result<Self, GridError>
    where F: FnMut(f64) -> f64
    {
        let grid = SpatialGrid::new(xargs.0, xargs.1, xargs.2)?;
        Ok(Self::new(grid, V))
    }

    /// Create a new `System` from a grid and a pre-sampled potential array.
    pub fn from_samples(grid: SpatialGrid, V: nd::Array1<f64>)
        -> Result<Self, LengthError>
    {
        let x = grid.to_array();
        LengthError::check(&x, &V)?;
        Ok(Self { grid, x, V })
    }

    /// Get a reference to the underlying grid.
    pub fn grid(&self) -> &SpatialGrid { &self.grid }

    /// Get a reference to the coordinate array.
    pub fn get_x(&self) -> &nd::Array1<f64> { &self.x }

    /// Get a reference to the potential array.
    pub fn get_V(&self) -> &nd::Array1<f64> { &self.V }

    /// Get the coordinate array grid spacing.
    pub fn get_dx(&self) -> f64 { self.grid.spacing() }

    /// Get the length of the coordinate and potential arrays.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.grid.len() }

    /// Largest relative mismatch `|V(x_i) - V(x_{2c - i})|` over the mirrored
    /// pairs around the center index, scaled by the largest |V| sampled.
    ///
    /// Returns `0.0` for a potential that is identically zero.
    pub fn asymmetry(&self) -> f64 {
        let n = self.len();
        let c = self.grid.center_index();
        let scale = self.V.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        if scale == 0.0 || !scale.is_finite() { return 0.0; }
        (0..c)
            .filter(|i| 2 * c - i < n)
            .map(|i| (self.V[i] - self.V[2 * c - i]).abs() / scale)
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rejects_bad_grids() {
        assert!(SpatialGrid::new(0.0, 1.0, 1).is_err());
        assert!(SpatialGrid::new(1.0, 0.0, 10).is_err());
        assert!(SpatialGrid::new(0.0, 0.0, 10).is_err());
        assert!(SpatialGrid::new(0.0, 1.0, 2).is_ok());
    }

    #[test]
    fn spacing_and_points() {
        let grid = SpatialGrid::new(-1.0, 1.0, 5).unwrap();
        assert_relative_eq!(grid.spacing(), 0.5);
        assert_relative_eq!(grid.point_at(0).unwrap(), -1.0);
        assert_relative_eq!(grid.point_at(3).unwrap(), 0.5);
        assert_relative_eq!(grid.point_at(4).unwrap(), 1.0);
        assert!(matches!(grid.point_at(5), Err(GridError::Index(5, 5))));
        let x = grid.to_array();
        assert_eq!(x.len(), 5);
        assert_eq!(x, grid.to_array());
        assert_eq!(grid.iter().count(), grid.iter().count());
    }

    #[test]
    fn center_index() {
        let grid = SpatialGrid::new(-2.0, 2.0, 101).unwrap();
        assert_eq!(grid.center_index(), 50);
        let grid = SpatialGrid::new(-1.0, 3.0, 5).unwrap();
        assert_eq!(grid.center_index(), 1);
        let grid = SpatialGrid::new(1.0, 3.0, 5).unwrap();
        assert_eq!(grid.center_index(), 0);
        let grid = SpatialGrid::new(-3.0, -1.0, 5).unwrap();
        assert_eq!(grid.center_index(), 4);
    }

    #[test]
    fn symmetry() {
        assert!(SpatialGrid::new(-2.0, 2.0, 11).unwrap().is_symmetric(1e-9));
        assert!(!SpatialGrid::new(-2.0, 2.5, 11).unwrap().is_symmetric(1e-9));
        assert!(SpatialGrid::new(-2.0, 2.5, 11).unwrap().is_symmetric(0.5));
    }

    #[test]
    fn system_sampling() {
        let sys = System::new_linspace((-1.0, 1.0, 21), |x| x * x).unwrap();
        assert_eq!(sys.len(), 21);
        assert_eq!(sys.get_V().len(), 21);
        assert_relative_eq!(sys.get_V()[0], 1.0);
        assert_relative_eq!(sys.get_dx(), 0.1);
        assert!(sys.asymmetry() < 1e-12);

        let skew = System::new_linspace((-1.0, 1.0, 21), |x| x).unwrap();
        assert_relative_eq!(skew.asymmetry(), 2.0, max_relative = 1e-12);
    }

    #[test]
    fn system_from_samples() {
        let grid = SpatialGrid::new(0.0, 1.0, 4).unwrap();
        assert!(System::from_samples(grid, nd::Array1::zeros(4)).is_ok());
        assert!(System::from_samples(grid, nd::Array1::zeros(3)).is_err());
    }
}
