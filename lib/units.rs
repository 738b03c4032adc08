#![allow(non_upper_case_globals)]

//! Physical constants and energy unit conversions.
//!
//! Constants are SI, with values taken from NIST. The solver itself performs no
//! conversion and works in whatever consistent unit system it is handed.

use std::f64::consts::PI;

/// Planck constant, kg m² s⁻¹ (exact).
pub const h: f64 = 6.62607015e-34;

/// Reduced Planck constant `h / 2π`, kg m² s⁻¹ (exact).
pub const hbar: f64 = h / (2.0 * PI);

/// Elementary charge, C (exact).
pub const e: f64 = 1.602176634e-19;

/// Electron mass, kg (± 2.8e-40).
pub const me: f64 = 9.1093837015e-31;

/// One electronvolt, J.
pub const eV: f64 = e;

/// Convert an energy in Joules to electronvolts.
pub fn j_to_ev(energy: f64) -> f64 { energy / eV }

/// Convert an energy in electronvolts to Joules.
pub fn ev_to_j(energy: f64) -> f64 { energy * eV }

/// Characteristic oscillator length `√(ħ / m ω)` for a harmonic trap of
/// angular frequency `omega`.
pub fn oscillator_length(mass: f64, omega: f64, hbar_: f64) -> f64 {
    (hbar_ / mass / omega).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ev_round_trip_scale() {
        assert_relative_eq!(j_to_ev(e), 1.0);
        assert_relative_eq!(ev_to_j(2.0), 2.0 * e);
    }

    #[test]
    fn half_quantum_in_ev() {
        // ½ħω for ω = 1e15 rad/s
        let half = 0.5 * hbar * 1e15;
        assert_relative_eq!(j_to_ev(half), 0.3291, max_relative = 1e-3);
    }

    #[test]
    fn electron_oscillator_length() {
        let a = oscillator_length(me, 1e15, hbar);
        assert_relative_eq!(a, 3.4024e-10, max_relative = 1e-3);
    }
}
