//! Probability mass enclosed by a horizontal density cut.

use crate::error::Result;
use crate::numeric;
use crate::posterior::{Posterior, QUAD_TOL};

/// Crossing-point location tolerance for the bracketed root-finder.
const CROSSING_XTOL: f64 = 1e-12;

/// The region bounded by a density threshold: its probability mass and the
/// two x-values where the density crosses the threshold.
///
/// Returned by [`enclosed_mass`] so the level search can keep the crossing
/// points of the accepted threshold without recomputing them.
#[derive(Clone, Copy, Debug, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub struct RegionMass {
    /// Integral of the density between the two crossings.
    pub mass: f64,
    /// Left crossing, in `(domain_min, mode)`.
    pub lower: f64,
    /// Right crossing, in `(mode, domain_max)`.
    pub upper: f64,
}

/// Locates the two points where the density equals `threshold` and returns
/// the probability mass between them.
///
/// Two boundary cases are defined without searching: a zero threshold
/// encloses the whole evaluation domain (mass 1), and a threshold equal to
/// the peak density encloses only the mode (mass 0). Otherwise the density
/// is assumed to increase monotonically from the domain edge to the mode on
/// each side, so each half-domain brackets exactly one crossing.
///
/// # Errors
///
/// Returns [`Error::NoSignChange`](crate::Error::NoSignChange) when a
/// half-domain bracket contains no crossing, which is how flat, multi-modal,
/// and near-delta densities surface here.
#[allow(clippy::float_cmp)]
pub fn enclosed_mass(posterior: &Posterior, threshold: f64) -> Result<RegionMass> {
    let (domain_min, domain_max) = posterior.support();

    if threshold == 0.0 {
        return Ok(RegionMass {
            mass: 1.0,
            lower: domain_min,
            upper: domain_max,
        });
    }
    if threshold == posterior.peak_density() {
        let mode = posterior.mode();
        return Ok(RegionMass {
            mass: 0.0,
            lower: mode,
            upper: mode,
        });
    }

    let cross = |x: f64| Ok(posterior.density(x) - threshold);
    let lower = numeric::brentq(cross, domain_min, posterior.mode(), CROSSING_XTOL)?;
    let upper = numeric::brentq(cross, posterior.mode(), domain_max, CROSSING_XTOL)?;

    let mass = numeric::integrate(&|x| posterior.density(x), lower, upper, QUAD_TOL);
    Ok(RegionMass { mass, lower, upper })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wedge_posterior() -> Posterior {
        // A dense, roughly triangular draw set centered near 2.
        let draws: Vec<f64> = (0..400)
            .map(|i| {
                let u = f64::from(i) / 400.0;
                // Inverse CDF of a symmetric triangle on [0, 4].
                if u < 0.5 {
                    2.0 * (2.0 * u).sqrt()
                } else {
                    4.0 - 2.0 * (2.0 * (1.0 - u)).sqrt()
                }
            })
            .collect();
        Posterior::from_samples(&draws).unwrap()
    }

    #[test]
    fn zero_threshold_covers_the_domain() {
        let posterior = wedge_posterior();
        let region = enclosed_mass(&posterior, 0.0).unwrap();
        let (lo, hi) = posterior.support();
        assert_eq!(region.mass, 1.0);
        assert_eq!(region.lower, lo);
        assert_eq!(region.upper, hi);
    }

    #[test]
    fn peak_threshold_collapses_to_the_mode() {
        let posterior = wedge_posterior();
        let region = enclosed_mass(&posterior, posterior.peak_density()).unwrap();
        assert_eq!(region.mass, 0.0);
        assert_eq!(region.lower, posterior.mode());
        assert_eq!(region.upper, posterior.mode());
    }

    #[test]
    fn interior_threshold_straddles_the_mode() {
        let posterior = wedge_posterior();
        let region = enclosed_mass(&posterior, 0.5 * posterior.peak_density()).unwrap();

        assert!(region.lower < posterior.mode());
        assert!(region.upper > posterior.mode());
        assert!(region.mass > 0.0 && region.mass < 1.0);

        // Both crossings actually sit at the threshold.
        let t = 0.5 * posterior.peak_density();
        assert!((posterior.density(region.lower) - t).abs() < 1e-9);
        assert!((posterior.density(region.upper) - t).abs() < 1e-9);
    }

    #[test]
    fn mass_shrinks_as_the_threshold_rises() {
        let posterior = wedge_posterior();
        let peak = posterior.peak_density();
        let low = enclosed_mass(&posterior, 0.2 * peak).unwrap();
        let high = enclosed_mass(&posterior, 0.8 * peak).unwrap();
        assert!(low.mass > high.mass);
        assert!(low.lower < high.lower && low.upper > high.upper);
    }

    #[test]
    fn flat_density_has_no_crossing_to_bracket() {
        // An oversized bandwidth makes the density essentially constant over
        // the evaluation domain, so the domain edges already sit above an
        // interior threshold and the half-domain brackets carry no sign
        // change.
        let posterior = Posterior::with_bandwidth(&[0.0, 1.0], 10.0).unwrap();
        let result = enclosed_mass(&posterior, 0.5 * posterior.peak_density());
        assert!(matches!(
            result,
            Err(crate::error::Error::NoSignChange { .. })
        ));
    }
}
