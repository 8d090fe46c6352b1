//! Density model for one marginal posterior dimension.

use crate::error::{Error, Result};
use crate::kde::KernelDensityEstimator;
use crate::numeric;

/// Absolute tolerance for the adaptive quadrature behind [`Posterior::mass_between`].
pub(crate) const QUAD_TOL: f64 = 1e-9;

/// Mode-location tolerance, scaled by the sample standard deviation.
const MODE_XTOL_FACTOR: f64 = 1e-8;

/// A smooth density model for one dimension of a sampled posterior.
///
/// Wraps a Gaussian KDE over the draws and precomputes everything the
/// interval search needs: sample moments, the mode, the peak density, and a
/// finite evaluation domain extending half the sample range beyond the
/// observed minimum and maximum on each side. Immutable after construction.
///
/// `mean` and `std_dev` come from the raw draws, not from the density
/// estimate, so they stay well-defined even when the estimate degenerates.
///
/// # Examples
///
/// ```
/// use credible::Posterior;
///
/// let draws = [1.0, 2.0, 2.5, 3.0, 4.0];
/// let posterior = Posterior::from_samples(&draws).unwrap();
///
/// assert!((posterior.mean() - 2.5).abs() < 1e-12);
/// assert!(posterior.mode() > 1.0 && posterior.mode() < 4.0);
/// assert!(posterior.density(posterior.mode()) > 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct Posterior {
    kde: KernelDensityEstimator,
    mean: f64,
    std_dev: f64,
    mode: f64,
    peak_density: f64,
    support_min: f64,
    support_max: f64,
}

impl Posterior {
    /// Builds a density model from a non-empty draw array, with Scott's-rule
    /// bandwidth selection.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptySamples`] for an empty array.
    /// - [`Error::DegenerateDensity`] when the draws have zero or non-finite
    ///   range (all identical values collapse the evaluation domain to a
    ///   point), or when the mode search fails to bracket a maximum.
    pub fn from_samples(samples: &[f64]) -> Result<Self> {
        let kde = KernelDensityEstimator::new(samples)?;
        Self::build(samples, kde)
    }

    /// Builds a density model with an explicit kernel bandwidth.
    ///
    /// # Errors
    ///
    /// As [`Posterior::from_samples`], plus [`Error::InvalidBandwidth`] for
    /// a non-positive or non-finite bandwidth.
    pub fn with_bandwidth(samples: &[f64], bandwidth: f64) -> Result<Self> {
        let kde = KernelDensityEstimator::with_bandwidth(samples, bandwidth)?;
        Self::build(samples, kde)
    }

    #[allow(clippy::cast_precision_loss)]
    fn build(samples: &[f64], kde: KernelDensityEstimator) -> Result<Self> {
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let std_dev = (samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n).sqrt();

        let (min, max) = samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                (lo.min(x), hi.max(x))
            });
        let range = max - min;
        if !(range > 0.0 && range.is_finite()) {
            return Err(Error::DegenerateDensity(
                "sample range is zero or non-finite; the evaluation domain collapses",
            ));
        }
        let support_min = min - 0.5 * range;
        let support_max = max + 0.5 * range;

        // Maximize the estimate starting from the sample mean, stepping by
        // the sample deviation.
        let xtol = (MODE_XTOL_FACTOR * std_dev).max(1e-12);
        let mode = numeric::maximize(
            &|x| kde.pdf(x),
            mean,
            std_dev,
            support_min,
            support_max,
            xtol,
        )?;
        let peak_density = kde.pdf(mode);

        Ok(Self {
            kde,
            mean,
            std_dev,
            mode,
            peak_density,
            support_min,
            support_max,
        })
    }

    /// Sample mean of the raw draws.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population standard deviation of the raw draws.
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Location of the estimated density's maximum.
    #[must_use]
    pub fn mode(&self) -> f64 {
        self.mode
    }

    /// Density value at the mode.
    #[must_use]
    pub fn peak_density(&self) -> f64 {
        self.peak_density
    }

    /// The finite evaluation domain `[min - range/2, max + range/2]`.
    ///
    /// Root-finding brackets stay inside this domain, so it is deliberately
    /// generous relative to the empirical support.
    #[must_use]
    pub fn support(&self) -> (f64, f64) {
        (self.support_min, self.support_max)
    }

    /// Evaluates the estimated density at `x`. Pure, no side effects.
    #[must_use]
    pub fn density(&self, x: f64) -> f64 {
        self.kde.pdf(x)
    }

    /// Probability mass of the estimated density over `[lo, hi]`.
    #[must_use]
    pub fn mass_between(&self, lo: f64, hi: f64) -> f64 {
        numeric::integrate(&|x| self.kde.pdf(x), lo, hi, QUAD_TOL)
    }
}
