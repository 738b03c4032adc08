//! Miscellaneous tools: quadrature on uniform grids, wavefunction inner
//! products, and node counting.

use ndarray::{ self as nd, Ix1 };
use num_traits::Float;

/// Integrate using the trapezoidal rule.
///
/// Returns zero if `y` has fewer than 2 elements.
pub fn trapz<S, A>(y: &nd::ArrayBase<S, Ix1>, dx: A) -> A
where
    S: nd::Data<Elem = A>,
    A: Float,
{
    let n: usize = y.len();
    if n < 2 { return A::zero(); }
    let two = A::one() + A::one();
    let inner = y.iter().skip(1).take(n - 2)
        .fold(A::zero(), |acc, yk| acc + *yk);
    (dx / two) * (y[0] + two * inner + y[n - 1])
}

/// Integrate using the composite Simpson rule.
///
/// If `y` spans an odd number of intervals, Simpson's rule is applied to all
/// but the last one and the last interval is added with the trapezoidal rule.
/// Falls back to [`trapz`] entirely for fewer than 3 points.
pub fn simpson<S, A>(y: &nd::ArrayBase<S, Ix1>, dx: A) -> A
where
    S: nd::Data<Elem = A>,
    A: Float,
{
    let n: usize = y.len();
    if n < 3 { return trapz(y, dx); }
    let two = A::one() + A::one();
    let three = two + A::one();
    let four = two + two;
    // number of points covered by the Simpson part; always odd
    let m = if (n - 1) % 2 == 0 { n } else { n - 1 };
    let interior = y.iter().enumerate().take(m - 1).skip(1)
        .fold(A::zero(), |acc, (k, yk)| {
            acc + if k % 2 == 1 { four * *yk } else { two * *yk }
        });
    let simps = (dx / three) * (y[0] + interior + y[m - 1]);
    if m == n {
        simps
    } else {
        simps + (dx / two) * (y[n - 2] + y[n - 1])
    }
}

/// Calculate the norm ∫|ψ|² dx of a wavefunction with the trapezoidal rule.
pub fn wf_norm<S, A>(q: &nd::ArrayBase<S, Ix1>, dx: A) -> A
where
    S: nd::Data<Elem = A>,
    A: Float,
{
    trapz(&q.mapv(|qk| qk * qk), dx)
}

/// Calculate the norm ∫|ψ|² dx of a wavefunction with the Simpson rule.
pub fn wf_norm_simpson<S, A>(q: &nd::ArrayBase<S, Ix1>, dx: A) -> A
where
    S: nd::Data<Elem = A>,
    A: Float,
{
    simpson(&q.mapv(|qk| qk * qk), dx)
}

/// Calculate the inner product ∫ψφ dx of two real wavefunctions with the
/// trapezoidal rule, truncating to the shorter of the two.
pub fn wf_dot<S, T, A>(
    q: &nd::ArrayBase<S, Ix1>,
    p: &nd::ArrayBase<T, Ix1>,
    dx: A,
) -> A
where
    S: nd::Data<Elem = A>,
    T: nd::Data<Elem = A>,
    A: Float,
{
    let n: usize = q.len().min(p.len());
    if n < 2 { return A::zero(); }
    let two = A::one() + A::one();
    let inner = q.iter().zip(p).skip(1).take(n - 2)
        .fold(A::zero(), |acc, (qk, pk)| acc + *qk * *pk);
    (dx / two) * (q[0] * p[0] + two * inner + q[n - 1] * p[n - 1])
}

/// Count sign changes in a sampled wavefunction, ignoring a fraction `margin`
/// of the points at each end of the array.
///
/// Exact zeros are skipped, so a sample sitting exactly on a node is not
/// counted twice.
pub fn node_count<S>(q: &nd::ArrayBase<S, Ix1>, margin: f64) -> usize
where S: nd::Data<Elem = f64>
{
    let n = q.len();
    let skip = ((n as f64) * margin.clamp(0.0, 0.5)).floor() as usize;
    if 2 * skip >= n { return 0; }
    q.iter().skip(skip).take(n - 2 * skip)
        .filter(|qk| **qk != 0.0 && qk.is_finite())
        .fold((0, 0.0_f64), |(count, prev), &qk| {
            if prev != 0.0 && prev.signum() != qk.signum() {
                (count + 1, qk)
            } else {
                (count, qk)
            }
        })
        .0
}
