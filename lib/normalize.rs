//! Wavefunction normalization under a choice of quadrature rule.

use ndarray as nd;
use crate::{
    Arr1,
    utils::{ wf_norm, wf_norm_simpson },
};

/// Quadrature rule used to estimate ∫|ψ|² dx.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Quadrature {
    /// Pairwise-average (trapezoidal) rule, second-order accurate.
    #[default]
    Trapezoid,
    /// Composite Simpson rule, fourth-order accurate. An odd number of
    /// intervals is handled by treating the last one with the trapezoidal
    /// rule.
    Simpson,
    /// Scale so that max |ψ| = 1.
    ///
    /// This is a display convenience, not a probability normalization: the
    /// "norm" in this mode is max |ψ|².
    MaxAmplitude,
}

/// Rescales wavefunctions to unit norm.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Normalizer {
    mode: Quadrature,
}

impl Normalizer {
    /// Create a new normalizer using a particular quadrature rule.
    pub fn new(mode: Quadrature) -> Self { Self { mode } }

    /// Quadrature rule in use.
    pub fn mode(&self) -> Quadrature { self.mode }

    /// Estimate ∫|ψ|² dx without modifying `q`.
    ///
    /// In [`Quadrature::MaxAmplitude`] mode this is instead max |ψ|².
    pub fn norm<S>(&self, q: &Arr1<S>, dx: f64) -> f64
    where S: nd::Data<Elem = f64>
    {
        match self.mode {
            Quadrature::Trapezoid => wf_norm(q, dx),
            Quadrature::Simpson => wf_norm_simpson(q, dx),
            Quadrature::MaxAmplitude => {
                q.iter().fold(0.0_f64, |acc, qk| acc.max(qk.abs())).powi(2)
            },
        }
    }

    /// Return a normalized copy of a wavefunction.
    ///
    /// If the norm is zero or not finite, an unchanged copy is returned.
    pub fn normalize<S>(&self, q: &Arr1<S>, dx: f64) -> nd::Array1<f64>
    where S: nd::Data<Elem = f64>
    {
        let mut q = q.to_owned();
        self.normalize_inplace(&mut q, dx);
        q
    }

    /// Renormalize a wavefunction in place, returning `false` (and leaving `q`
    /// untouched) if the norm is zero or not finite.
    pub fn normalize_inplace<S>(&self, q: &mut Arr1<S>, dx: f64) -> bool
    where S: nd::DataMut<Elem = f64>
    {
        let norm = self.norm(q, dx);
        if norm == 0.0 || !norm.is_finite() { return false; }
        let scale = norm.sqrt().recip();
        q.map_inplace(|qk| { *qk *= scale; });
        true
    }

    /// Return `true` if `|norm - 1| < tol`.
    pub fn is_normalized<S>(&self, q: &Arr1<S>, dx: f64, tol: f64) -> bool
    where S: nd::Data<Elem = f64>
    {
        (self.norm(q, dx) - 1.0).abs() < tol
    }
}
