//! Solver configuration.

use crate::{
    error::XError,
    normalize::Quadrature,
    refine::Tolerance,
    units,
    DEF_MAXITERS,
    DEF_SCAN_STEPS,
};

/// Immutable settings for a [`Solver`][crate::solve::Solver].
///
/// The [`Default`] values are:
/// - `hbar`: the SI reduced Planck constant
/// - `scan_steps`: 200
/// - `tolerance`: [`Tolerance::Relative(1e-6)`][Tolerance::Relative]
/// - `maxiters`: 1000
/// - `quadrature`: [`Quadrature::Trapezoid`]
/// - `match_tail`: `true`
/// - `parallel`: `true`
///
/// Setting `hbar = 1` (along with a unit mass) lets the solver work directly in
/// natural units.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverConfig {
    /// Value of ħ, in whatever unit system the mass, grid, and potential use.
    pub hbar: f64,
    /// Number of equal energy increments in the scan over the energy window.
    ///
    /// Eigenvalues spaced more closely than one increment can cancel each
    /// other's sign change and go unnoticed; increase this to resolve them.
    pub scan_steps: usize,
    /// Bisection stopping criterion.
    pub tolerance: Tolerance,
    /// Maximum number of bisection steps per eigenvalue.
    pub maxiters: usize,
    /// Quadrature rule used to normalize wavefunctions.
    pub quadrature: Quadrature,
    /// Rebuild the classically forbidden right tail of each final wavefunction
    /// by inward integration (see
    /// [`Integrator::eigenfunction`][crate::numerov::Integrator::eigenfunction]).
    pub match_tail: bool,
    /// Evaluate the energy scan and bracket refinements on the rayon thread
    /// pool. Results are identical either way.
    pub parallel: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            hbar: units::hbar,
            scan_steps: DEF_SCAN_STEPS,
            tolerance: Tolerance::default(),
            maxiters: DEF_MAXITERS,
            quadrature: Quadrature::default(),
            match_tail: true,
            parallel: true,
        }
    }
}

impl SolverConfig {
    /// Defaults, but with ħ = 1.
    pub fn natural() -> Self { Self { hbar: 1.0, ..Self::default() } }

    /// Set the value of ħ.
    pub fn with_hbar(mut self, hbar: f64) -> Self {
        self.hbar = hbar;
        self
    }

    /// Set the number of energy scan steps.
    pub fn with_scan_steps(mut self, scan_steps: usize) -> Self {
        self.scan_steps = scan_steps;
        self
    }

    /// Set the bisection stopping criterion.
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the bisection iteration cap.
    pub fn with_maxiters(mut self, maxiters: usize) -> Self {
        self.maxiters = maxiters;
        self
    }

    /// Set the normalization quadrature rule.
    pub fn with_quadrature(mut self, quadrature: Quadrature) -> Self {
        self.quadrature = quadrature;
        self
    }

    /// Turn tail matching on or off.
    pub fn with_match_tail(mut self, match_tail: bool) -> Self {
        self.match_tail = match_tail;
        self
    }

    /// Turn parallel evaluation on or off.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check that all values are usable.
    pub fn check(&self) -> Result<(), XError> {
        XError::check_hbar(self.hbar)?;
        XError::check_steps(self.scan_steps)?;
        XError::check_epsilon(self.tolerance.value())?;
        XError::check_maxiters(self.maxiters)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = SolverConfig::default();
        assert_eq!(cfg.hbar, units::hbar);
        assert_eq!(cfg.scan_steps, 200);
        assert_eq!(cfg.maxiters, 1000);
        assert_eq!(cfg.quadrature, Quadrature::Trapezoid);
        assert!(cfg.match_tail && cfg.parallel);
        assert!(cfg.check().is_ok());
        assert_eq!(SolverConfig::natural().hbar, 1.0);
    }

    #[test]
    fn builder() {
        let cfg = SolverConfig::natural()
            .with_scan_steps(50)
            .with_tolerance(Tolerance::Absolute(1e-9))
            .with_maxiters(10)
            .with_quadrature(Quadrature::Simpson)
            .with_match_tail(false)
            .with_parallel(false);
        assert_eq!(cfg.scan_steps, 50);
        assert_eq!(cfg.tolerance, Tolerance::Absolute(1e-9));
        assert_eq!(cfg.maxiters, 10);
        assert_eq!(cfg.quadrature, Quadrature::Simpson);
        assert!(!cfg.match_tail && !cfg.parallel);
    }

    #[test]
    fn rejects_bad_values() {
        let cfg = SolverConfig::default();
        assert!(matches!(cfg.with_hbar(0.0).check(), Err(XError::BadHbar(_))));
        assert!(matches!(cfg.with_scan_steps(0).check(), Err(XError::BadSteps(0))));
        assert!(matches!(
            cfg.with_tolerance(Tolerance::Relative(-1.0)).check(),
            Err(XError::BadEpsilon(_)),
        ));
        assert!(matches!(cfg.with_maxiters(0).check(), Err(XError::BadMaxiters(0))));
    }
}
