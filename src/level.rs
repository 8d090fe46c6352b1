//! Density-level search: from a target probability mass to the matching cut.

use crate::error::{Error, Result};
use crate::numeric;
use crate::posterior::Posterior;
use crate::region::{enclosed_mass, RegionMass};

/// Absolute tolerance for the total-mass normalization check.
///
/// Checked over the finite evaluation domain, the same domain the crossing
/// search uses; the estimator's tails outside it must be negligible.
const NORMALIZATION_TOL: f64 = 1e-8;

/// Threshold location tolerance for the outer root-finder.
const THRESHOLD_XTOL: f64 = 1e-12;

/// Finds the density threshold whose enclosed region holds exactly `level`
/// of probability mass.
///
/// The enclosed mass decreases monotonically as the threshold rises from 0
/// (whole domain, mass ~1) to the peak density (single point, mass 0), so a
/// unique root exists for any level in `(0, 1]` over a well-formed unimodal
/// density. Returns the [`RegionMass`] evaluated at the accepted threshold;
/// its crossings are the interval bounds.
#[allow(clippy::float_cmp)]
fn cut_from_top(posterior: &Posterior, level: f64) -> Result<RegionMass> {
    let mut last: Option<(f64, RegionMass)> = None;
    let threshold = numeric::brentq(
        |t| {
            let r = enclosed_mass(posterior, t)?;
            last = Some((t, r));
            Ok(r.mass - level)
        },
        0.0,
        posterior.peak_density(),
        THRESHOLD_XTOL,
    )?;

    // The last objective evaluation is usually the accepted root, but the
    // endpoint shortcuts can return an iterate evaluated earlier (level 1.0
    // roots at threshold 0 after the peak endpoint was probed). Only reuse
    // the recorded region when it belongs to the returned threshold.
    let region = match last {
        Some((t, region)) if t == threshold => region,
        _ => enclosed_mass(posterior, threshold)?,
    };
    trace_debug!(
        level,
        lower = region.lower,
        upper = region.upper,
        "density cut accepted"
    );
    Ok(region)
}

/// Verifies the density integrates to 1 over its evaluation domain and
/// returns the integrated total.
fn checked_total_mass(posterior: &Posterior) -> Result<f64> {
    let (lo, hi) = posterior.support();
    let total = posterior.mass_between(lo, hi);
    if (total - 1.0).abs() > NORMALIZATION_TOL {
        return Err(Error::Unnormalized {
            mass: total,
            tolerance: NORMALIZATION_TOL,
        });
    }
    Ok(total)
}

fn validate_level(level: f64) -> Result<()> {
    if level > 0.0 && level <= 1.0 {
        Ok(())
    } else {
        Err(Error::InvalidLevel(level))
    }
}

/// Computes the highest-density credible interval for a single level.
///
/// Returns the `(lower, upper)` pair bounding `level` of probability mass,
/// cut at the highest possible density threshold.
///
/// # Errors
///
/// - [`Error::InvalidLevel`] for a level outside `(0.0, 1.0]`.
/// - [`Error::Unnormalized`] when the density's total mass over its
///   evaluation domain is off by more than `1e-8`.
/// - [`Error::LevelExceedsMass`] when the level exceeds that total.
/// - [`Error::NoSignChange`] when a root search cannot bracket its target,
///   the signature of a flat, multi-modal, or delta-like posterior.
///
/// # Examples
///
/// ```
/// use credible::{credible_interval, Posterior};
///
/// // A deterministic, roughly normal draw set (sum of 12 uniforms).
/// let mut state = 0x853c_49e6_748f_ea9b_u64;
/// let mut uniform = move || {
///     state = state
///         .wrapping_mul(6_364_136_223_846_793_005)
///         .wrapping_add(1_442_695_040_888_963_407);
///     (state >> 11) as f64 / (1u64 << 53) as f64
/// };
/// let draws: Vec<f64> = (0..2000)
///     .map(|_| (0..12).map(|_| uniform()).sum::<f64>() - 6.0)
///     .collect();
///
/// let posterior = Posterior::from_samples(&draws).unwrap();
/// let (lo, hi) = credible_interval(&posterior, 0.68).unwrap();
/// assert!(lo < posterior.mode() && posterior.mode() < hi);
/// assert!((posterior.mass_between(lo, hi) - 0.68).abs() < 1e-6);
/// ```
pub fn credible_interval(posterior: &Posterior, level: f64) -> Result<(f64, f64)> {
    validate_level(level)?;
    let total = checked_total_mass(posterior)?;
    if level > total {
        return Err(Error::LevelExceedsMass { level, mass: total });
    }
    let region = cut_from_top(posterior, level)?;
    Ok((region.lower, region.upper))
}

/// Computes highest-density intervals for several levels at once.
///
/// Returns all `2 * levels.len()` interval boundaries merged into a single
/// ascending sequence: nested levels interleave, so for levels `{0.95, 0.68}`
/// the order is `[lower95, lower68, upper68, upper95]`.
///
/// # Errors
///
/// As [`credible_interval`], applied across all levels.
pub fn credible_intervals(posterior: &Posterior, levels: &[f64]) -> Result<Vec<f64>> {
    for &level in levels {
        validate_level(level)?;
    }
    let total = checked_total_mass(posterior)?;

    let mut bounds = Vec::with_capacity(2 * levels.len());
    for &level in levels {
        if level > total {
            return Err(Error::LevelExceedsMass { level, mass: total });
        }
        let region = cut_from_top(posterior, level)?;
        bounds.push(region.lower);
        bounds.push(region.upper);
    }
    bounds.sort_by(f64::total_cmp);
    Ok(bounds)
}
