//! Scalar numerical routines backing the interval search.
//!
//! Three classical derivative-free methods, each over plain `f64 -> f64`
//! callables: Brent's bracketed root-finding, adaptive Simpson quadrature,
//! and a bracket-outward golden-section maximizer.

use crate::error::{Error, Result};

/// Iteration budget for the root-finder. The bisection fallback halves the
/// bracket every iteration, so `xtol` is always reached well inside this.
const BRENT_MAX_ITER: usize = 200;

/// Maximum bisection depth for the adaptive quadrature.
const SIMPSON_MAX_DEPTH: u32 = 48;

/// Inverse golden ratio, the section factor for the 1-D maximizer.
const INV_GOLD: f64 = 0.618_033_988_749_894_9;

/// Bracket growth factor when walking out from the initial maximizer guess.
const GOLD: f64 = 1.618_033_988_749_895;

/// Finds a root of `f` in `[a, b]` via Brent's method.
///
/// The objective is fallible so that callers can thread density-evaluation
/// failures out of the search; any `Err` aborts immediately.
///
/// # Errors
///
/// Returns [`Error::NoSignChange`] when `f(a)` and `f(b)` have the same
/// sign, and propagates any error raised by the objective itself.
#[allow(clippy::float_cmp, clippy::many_single_char_names)]
pub(crate) fn brentq<F>(mut f: F, a: f64, b: f64, xtol: f64) -> Result<f64>
where
    F: FnMut(f64) -> Result<f64>,
{
    let mut a = a;
    let mut b = b;
    let mut fa = f(a)?;
    let mut fb = f(b)?;

    if fa == 0.0 {
        return Ok(a);
    }
    if fb == 0.0 {
        return Ok(b);
    }
    if fa.signum() == fb.signum() {
        return Err(Error::NoSignChange { low: a, high: b });
    }

    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = b - a;

    for _ in 0..BRENT_MAX_ITER {
        if fb.signum() == fc.signum() {
            // Root no longer bracketed by [b, c]; reset the contrapoint.
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * xtol;
        let mid = 0.5 * (c - b);
        if mid.abs() <= tol || fb == 0.0 {
            return Ok(b);
        }

        if e.abs() >= tol && fa.abs() > fb.abs() {
            // Attempt inverse quadratic interpolation (secant when a == c).
            let s = fb / fa;
            let (mut p, mut q);
            if a == c {
                p = 2.0 * mid * s;
                q = 1.0 - s;
            } else {
                let t = fa / fc;
                let r = fb / fc;
                p = s * (2.0 * mid * t * (t - r) - (b - a) * (r - 1.0));
                q = (t - 1.0) * (r - 1.0) * (s - 1.0);
            }
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();
            if 2.0 * p < (3.0 * mid * q - (tol * q).abs()).min((e * q).abs()) {
                e = d;
                d = p / q;
            } else {
                d = mid;
                e = mid;
            }
        } else {
            d = mid;
            e = mid;
        }

        a = b;
        fa = fb;
        b += if d.abs() > tol { d } else { tol.copysign(mid) };
        fb = f(b)?;
    }

    Ok(b)
}

/// Integrates `f` over `[a, b]` with adaptive Simpson quadrature to the
/// given absolute tolerance.
#[allow(clippy::float_cmp)]
pub(crate) fn integrate<F>(f: &F, a: f64, b: f64, tol: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    if a == b {
        return 0.0;
    }
    let m = 0.5 * (a + b);
    let fa = f(a);
    let fm = f(m);
    let fb = f(b);
    let whole = simpson(a, b, fa, fm, fb);
    refine(f, a, b, fa, fm, fb, whole, tol, SIMPSON_MAX_DEPTH)
}

fn simpson(a: f64, b: f64, fa: f64, fm: f64, fb: f64) -> f64 {
    (b - a) / 6.0 * (fa + 4.0 * fm + fb)
}

#[allow(clippy::too_many_arguments)]
fn refine<F>(f: &F, a: f64, b: f64, fa: f64, fm: f64, fb: f64, whole: f64, tol: f64, depth: u32) -> f64
where
    F: Fn(f64) -> f64,
{
    let m = 0.5 * (a + b);
    let lm = 0.5 * (a + m);
    let rm = 0.5 * (m + b);
    let fl = f(lm);
    let fr = f(rm);
    let left = simpson(a, m, fa, fl, fm);
    let right = simpson(m, b, fm, fr, fb);
    let delta = left + right - whole;

    // Richardson criterion: the halved estimate is ~15x more accurate.
    if depth == 0 || delta.abs() <= 15.0 * tol {
        return left + right + delta / 15.0;
    }
    refine(f, a, m, fa, fl, fm, left, 0.5 * tol, depth - 1)
        + refine(f, m, b, fm, fr, fb, right, 0.5 * tol, depth - 1)
}

/// Locates a local maximum of `f` within `[lo, hi]`, seeded at `start`.
///
/// Walks outward from `start` with golden-ratio step growth until a triple
/// `a < b < c` with `f(b) >= f(a)` and `f(b) >= f(c)` is found, then refines
/// it by golden-section search down to `xtol`.
///
/// # Errors
///
/// Returns [`Error::DegenerateDensity`] when the walk reaches a boundary of
/// `[lo, hi]` while the function is still ascending, i.e. no interior
/// maximum exists on the probed side.
pub(crate) fn maximize<F>(f: &F, start: f64, step: f64, lo: f64, hi: f64, xtol: f64) -> Result<f64>
where
    F: Fn(f64) -> f64,
{
    debug_assert!(lo < hi && step > 0.0);

    let b0 = start.clamp(lo, hi);
    let mut a = (b0 - step).max(lo);
    let mut b = b0;
    let mut c = (b0 + step).min(hi);
    let mut fa = f(a);
    let mut fb = f(b);
    let mut fc = f(c);
    let mut stride = step;

    while !(fb >= fa && fb >= fc) {
        stride *= GOLD;
        if fa > fc {
            // Still ascending leftward.
            if a <= lo {
                return Err(Error::DegenerateDensity(
                    "density keeps increasing toward the evaluation domain edge",
                ));
            }
            c = b;
            fc = fb;
            b = a;
            fb = fa;
            a = (b - stride).max(lo);
            fa = f(a);
        } else {
            if c >= hi {
                return Err(Error::DegenerateDensity(
                    "density keeps increasing toward the evaluation domain edge",
                ));
            }
            a = b;
            fa = fb;
            b = c;
            fb = fc;
            c = (b + stride).min(hi);
            fc = f(c);
        }
    }

    // Golden-section refinement over [a, c].
    let mut x1 = c - INV_GOLD * (c - a);
    let mut x2 = a + INV_GOLD * (c - a);
    let mut f1 = f(x1);
    let mut f2 = f(x2);
    while c - a > xtol {
        if f1 < f2 {
            a = x1;
            x1 = x2;
            f1 = f2;
            x2 = a + INV_GOLD * (c - a);
            f2 = f(x2);
        } else {
            c = x2;
            x2 = x1;
            f2 = f1;
            x1 = c - INV_GOLD * (c - a);
            f1 = f(x1);
        }
    }

    Ok(0.5 * (a + c))
}
