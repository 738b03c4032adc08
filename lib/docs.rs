//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Shooting from a hard wall](#shooting-from-a-hard-wall)
//! - [Parity](#parity)
//! - [Divergence](#divergence)
//! - [Tail matching](#tail-matching)
//! - [Normalization](#normalization)
//! - [Units](#units)
//!
//! # Background
//! Bound states of a particle of mass *m* in a potential *V*(*x*) are
//! solutions of the one-dimensional time-independent Schrödinger equation
//! (TISE),
//! ```text
//!    ħ² ∂²ψ
//! - --- --- + V(x) ψ(x) = E ψ(x)
//!   2 m ∂x²
//! ```
//! that are square-integrable. Rewriting this as
//! ```text
//! ∂²ψ
//! --- = -Q(x) ψ(x)
//! ∂x²
//!
//!        2 m
//! Q(x) = --- (E - V(x))
//!         ħ²
//! ```
//! puts it in the form handled by Numerov's method[^1]. On a uniform grid
//! ```text
//! x[i] = x_min + i δx, i ∊ {0, ..., N - 1}
//! ```
//! and with *f*\[*i*\] ≡ (*δx*²/12) *Q*(*x*\[*i*\]), the scheme reads
//! ```text
//!            (2 - 10 f[i]) ψ[i] - (1 + f[i - 1]) ψ[i - 1]
//! ψ[i + 1] = --------------------------------------------
//!                           1 + f[i + 1]
//! ```
//! with a local error of *O*(*δx*⁶). Each step needs only the two previous
//! values, so a full integration over *N* points is *O*(*N*).
//!
//! # Shooting from a hard wall
//! The grid ends are treated as infinitely high walls, so a bound state must
//! vanish at both. Fixing ψ\[0\] = 0 and a small ψ\[1\] turns the boundary
//! value problem into an initial value problem in *E*: for an arbitrary trial
//! energy, the integrated ψ\[*N* - 1\] is nonzero, and it changes sign each
//! time *E* passes through an eigenvalue. The search therefore
//! 1. steps *E* across a window in *K* equal increments, integrating at each;
//! 2. records each pair of neighboring energies whose boundary values differ
//!    in sign;
//! 3. bisects each such bracket on the sign of ψ\[*N* - 1\].
//!
//! Two eigenvalues closer together than one increment produce two sign flips
//! within the same increment, which cancel; such pairs are not found unless *K*
//! is increased.
//!
//! The value of ψ\[1\] only sets the overall scale of the solution. It is
//! chosen from the local wavenumber at the wall, *k*² = 2*m*(*E* - *V*\[0\])/*ħ*²,
//! so that it is small but representable:
//! ```text
//!         { s sin(k δx)        if k² > 0
//! ψ[1] =  { s exp(-|k| L / 2)  if k² < 0
//!         { s                  if k² = 0
//!
//! s = 1 / (N √L),  L = N δx
//! ```
//!
//! # Parity
//! If *V*(-*x*) = *V*(*x*) then every bound state is either even or odd, and
//! the search can start from *x* = 0 instead of a wall. With *c* the center
//! index,
//! ```text
//! even: ψ[c] = 1, ψ[c + 1] = 1 - 6 f[c]
//! odd:  ψ[c] = 0, ψ[c + 1] = δx
//! ```
//! where the even start is the Taylor expansion of a function with zero slope at
//! *x* = 0. The right half is integrated outward and the left half filled by
//! ψ\[*i*\] = ±ψ\[2*c* - *i*\]. Each parity sees only half of the spectrum, so
//! its eigenvalues are twice as far apart; this makes the fixed-*K* scan less
//! likely to miss close pairs.
//!
//! # Divergence
//! Far from an eigenvalue, integration through a classically forbidden region
//! (*E* < *V*) couples to the exponentially growing solution and can overflow.
//! Integration stops as soon as |ψ| exceeds 10³⁰⁰ and the remainder of the
//! array is filled with the offending value, keeping its sign. The sign is all
//! the shooting search needs, so a diverged integration is an ordinary result.
//!
//! # Tail matching
//! A refined energy is only accurate to the bisection tolerance *δE*. The
//! growing solution in a forbidden region picks up an amplitude proportional to
//! *δE*, multiplied by exp(∫κ d*x*) across the region; in deep wells this easily
//! dominates the true, decaying tail and ruins the normalization. The final
//! wavefunction is therefore built from two pieces: the outward integration up
//! to the rightmost classically allowed point *m*, and an inward integration
//! from the right wall (seeded the same way as the left one) down to *m*. In
//! the inward direction the physical solution is the growing one, so the
//! integration is stable. Across a thick barrier it also grows past the range
//! of `f64`, so it is divided down to unit size whenever it exceeds 10¹⁵⁰;
//! values near the far wall then underflow to zero, which is where the true
//! tail is anyway. The inward piece is scaled to meet the outward piece at *m*.
//!
//! # Normalization
//! Wavefunctions are rescaled so that ∫|ψ|² d*x* = 1, estimated with either the
//! trapezoidal rule
//! ```text
//! ∫ g dx ≈ δx Σᵢ (g[i] + g[i + 1]) / 2
//! ```
//! or the composite Simpson rule, which needs an even number of intervals; with
//! an odd count, the last interval is added with the trapezoidal rule. For
//! display purposes a wavefunction can also be scaled to max |ψ| = 1.
//!
//! # Units
//! Nothing is converted internally: ħ, the mass, the grid, and the potential
//! must all be in one consistent unit system. The default value of ħ is the SI
//! one, so that a mass in kg, a grid in m, and a potential in J give energies
//! in J ([`units`][crate::units] converts these to eV). Alternatively, choose a
//! length scale *a* and measure energies in
//! ```text
//!      ħ²
//! ε = -----
//!     m a²
//! ```
//! after which the TISE reads
//! ```text
//!   1 ∂²ψ
//! - - --- + V'(x') ψ(x') = E' ψ(x')
//!   2 ∂x'²
//! ```
//! with *x'* = *x* / *a*, *V'* = *V* / *ε*, and *E'* = *E* / *ε*; this is the
//! same problem with ħ = *m* = 1. For the harmonic oscillator *V* = ½ *m ω*²
//! *x*², the natural choice *a* = √(*ħ* / *m ω*) gives *ε* = *ħ ω* and
//! *E'* = *n* + ½.
//!
//! [^1]: B. Numerov, "Note on the numerical integration of d2x/dt2 = f(x,t)."
//! Astronomische Nachrichten **230** 19 (1927).
