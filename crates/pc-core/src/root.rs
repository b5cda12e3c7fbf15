//! Bounded single-unknown root finding.
//!
//! Every sizing operation in the workspace reduces to one scalar residual on a
//! caller-supplied bracket. The bracket is checked before iterating: bounds that
//! do not straddle a sign change are an error, never silently clamped to the
//! nearer boundary.

use crate::error::CoreError;
use crate::numeric::Tolerances;

/// Stopping rules for [`bisect`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootOptions {
    pub tol: Tolerances,
    pub max_iter: usize,
}

impl Default for RootOptions {
    fn default() -> Self {
        Self {
            tol: Tolerances::default(),
            max_iter: 50,
        }
    }
}

/// A converged root.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Root {
    pub x: f64,
    pub residual: f64,
    pub iterations: usize,
}

/// Validate a `[lo, hi]` pair before use as a bracket.
pub fn check_bounds(lo: f64, hi: f64) -> Result<(), CoreError> {
    if !lo.is_finite() || !hi.is_finite() || lo >= hi {
        return Err(CoreError::InvalidBounds { lo, hi });
    }
    Ok(())
}

/// Bisection on `[lo, hi]`.
///
/// The residual closure may fail; its error is propagated unchanged so a
/// component error raised at a candidate value reaches the caller with its
/// context. Convergence is reached when the bracket half-width falls below
/// `tol.abs + tol.rel * |x|` or the residual is exactly zero.
pub fn bisect<F, E>(mut f: F, lo: f64, hi: f64, opts: RootOptions) -> Result<Root, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<CoreError>,
{
    check_bounds(lo, hi)?;

    let mut a = lo;
    let mut b = hi;
    let mut f_a = f(a)?;
    if f_a == 0.0 {
        return Ok(Root {
            x: a,
            residual: 0.0,
            iterations: 0,
        });
    }
    let f_b = f(b)?;
    if f_b == 0.0 {
        return Ok(Root {
            x: b,
            residual: 0.0,
            iterations: 0,
        });
    }
    if f_a.is_nan() || f_b.is_nan() || f_a.signum() == f_b.signum() {
        return Err(CoreError::NotBracketed {
            lo,
            hi,
            f_lo: f_a,
            f_hi: f_b,
        }
        .into());
    }

    let mut mid = 0.5 * (a + b);
    let mut f_mid = f_a;
    for iter in 1..=opts.max_iter {
        mid = 0.5 * (a + b);
        f_mid = f(mid)?;
        if f_mid.is_nan() {
            return Err(CoreError::NonFinite {
                what: "residual",
                value: f_mid,
            }
            .into());
        }

        let half_width = 0.5 * (b - a);
        if f_mid == 0.0 || half_width <= opts.tol.band(mid) {
            return Ok(Root {
                x: mid,
                residual: f_mid,
                iterations: iter,
            });
        }

        if f_mid.signum() == f_a.signum() {
            a = mid;
            f_a = f_mid;
        } else {
            b = mid;
        }
    }

    Err(CoreError::MaxIterations {
        iterations: opts.max_iter,
        x: mid,
        residual: f_mid,
    }
    .into())
}

/// Smallest integer `n` in `[lo, hi]` with `f(n) <= 0`, for residuals that
/// decrease with `n` (e.g. required length against plate count).
pub fn bisect_integer<F, E>(mut f: F, lo: u32, hi: u32) -> Result<u32, E>
where
    F: FnMut(u32) -> Result<f64, E>,
    E: From<CoreError>,
{
    if lo >= hi {
        return Err(CoreError::InvalidBounds {
            lo: lo as f64,
            hi: hi as f64,
        }
        .into());
    }
    let f_hi = f(hi)?;
    if f_hi > 0.0 {
        let f_lo = f(lo)?;
        return Err(CoreError::NotBracketed {
            lo: lo as f64,
            hi: hi as f64,
            f_lo,
            f_hi,
        }
        .into());
    }

    let (mut a, mut b) = (lo, hi);
    if f(a)? <= 0.0 {
        return Ok(a);
    }
    while b - a > 1 {
        let mid = a + (b - a) / 2;
        if f(mid)? <= 0.0 {
            b = mid;
        } else {
            a = mid;
        }
    }
    Ok(b)
}
