//! Gaussian kernel density estimation over one-dimensional sample arrays.
//!
//! This is the density-estimation collaborator behind [`Posterior`]: it turns
//! a discrete draw set into a smooth, everywhere-finite, non-negative density
//! that integrates to 1 over the real line (up to numerical tolerance).
//!
//! [`Posterior`]: crate::Posterior

use crate::error::{Error, Result};

/// A Gaussian kernel density estimator for a single marginal.
///
/// Places one Gaussian kernel per draw and averages them. Bandwidth defaults
/// to Scott's rule, which suits the unimodal posteriors this crate targets.
#[derive(Clone, Debug)]
pub(crate) struct KernelDensityEstimator {
    /// Kernel centers, one per draw.
    centers: Vec<f64>,
    /// Standard deviation of each Gaussian kernel.
    bandwidth: f64,
    /// Per-kernel weight `1 / (n * h * sqrt(2*pi))`, hoisted out of `pdf`.
    weight: f64,
}

impl KernelDensityEstimator {
    /// Builds an estimator with Scott's-rule bandwidth `n^(-1/5) * sigma`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySamples`] if `samples` is empty.
    pub(crate) fn new(samples: &[f64]) -> Result<Self> {
        let bandwidth = scotts_rule(samples)?;
        Ok(Self::with_parts(samples.to_vec(), bandwidth))
    }

    /// Builds an estimator with an explicit bandwidth.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySamples`] if `samples` is empty and
    /// [`Error::InvalidBandwidth`] if `bandwidth` is not positive.
    pub(crate) fn with_bandwidth(samples: &[f64], bandwidth: f64) -> Result<Self> {
        if samples.is_empty() {
            return Err(Error::EmptySamples);
        }
        if !(bandwidth > 0.0 && bandwidth.is_finite()) {
            return Err(Error::InvalidBandwidth(bandwidth));
        }
        Ok(Self::with_parts(samples.to_vec(), bandwidth))
    }

    #[allow(clippy::cast_precision_loss)]
    fn with_parts(centers: Vec<f64>, bandwidth: f64) -> Self {
        let n = centers.len() as f64;
        let weight = 1.0 / (n * bandwidth * (2.0 * core::f64::consts::PI).sqrt());
        Self {
            centers,
            bandwidth,
            weight,
        }
    }

    /// Density at `x`: the average of the kernels, `(1/n) sum_i K_h(x - x_i)`.
    ///
    /// Pure: no side effects, finite and non-negative for any finite `x`.
    pub(crate) fn pdf(&self, x: f64) -> f64 {
        let inv_h = 1.0 / self.bandwidth;
        self.centers
            .iter()
            .map(|&center| {
                let z = (x - center) * inv_h;
                self.weight * (-0.5 * z * z).exp()
            })
            .sum()
    }
}

/// Scott's rule: `h = n^(-1/5) * sigma` over the population deviation.
///
/// Falls back to a unit bandwidth for draw sets with zero spread so the
/// estimator itself stays well-defined; callers decide whether such a draw
/// set is acceptable.
#[allow(clippy::cast_precision_loss)]
fn scotts_rule(samples: &[f64]) -> Result<f64> {
    if samples.is_empty() {
        return Err(Error::EmptySamples);
    }
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let sigma = variance.sqrt();
    if sigma < f64::EPSILON {
        return Ok(1.0);
    }
    Ok(n.powf(-0.2) * sigma)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_positive_and_peaked_near_data() {
        let kde = KernelDensityEstimator::new(&[0.0, 1.0, 2.0]).unwrap();
        assert!(kde.pdf(1.0) > 0.0);
        assert!(kde.pdf(1.0) > kde.pdf(10.0));
    }

    #[test]
    fn pdf_integrates_to_one() {
        let kde = KernelDensityEstimator::new(&[0.0, 1.0, 2.0, 3.0, 4.0]).unwrap();

        let n_points = 20_000;
        let (low, high) = (-12.0, 16.0);
        let dx = (high - low) / f64::from(n_points);
        let integral: f64 = (0..n_points)
            .map(|i| kde.pdf(low + (f64::from(i) + 0.5) * dx) * dx)
            .sum();

        assert!(
            (integral - 1.0).abs() < 1e-3,
            "integral = {integral}, expected ~1.0"
        );
    }

    #[test]
    fn scotts_rule_matches_formula() {
        let samples: Vec<f64> = (0..10).map(f64::from).collect();
        let kde = KernelDensityEstimator::new(&samples).unwrap();
        // n = 10, sigma ~ 2.872; h = 10^(-0.2) * sigma ~ 1.812
        assert!((kde.bandwidth - 1.812).abs() < 1e-3);
    }

    #[test]
    fn identical_samples_fall_back_to_unit_bandwidth() {
        let kde = KernelDensityEstimator::new(&[3.0, 3.0, 3.0, 3.0]).unwrap();
        assert!((kde.bandwidth - 1.0).abs() < f64::EPSILON);
        assert!(kde.pdf(3.0) > 0.0);
    }

    #[test]
    fn explicit_bandwidth_is_used() {
        let kde = KernelDensityEstimator::with_bandwidth(&[0.0, 1.0, 2.0], 0.5).unwrap();
        assert!((kde.bandwidth - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_samples_rejected() {
        assert!(matches!(
            KernelDensityEstimator::new(&[]),
            Err(Error::EmptySamples)
        ));
        assert!(matches!(
            KernelDensityEstimator::with_bandwidth(&[], 1.0),
            Err(Error::EmptySamples)
        ));
    }

    #[test]
    fn non_positive_bandwidth_rejected() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                KernelDensityEstimator::with_bandwidth(&[1.0, 2.0], bad),
                Err(Error::InvalidBandwidth(_))
            ));
        }
    }

    #[test]
    fn single_sample_kernel() {
        let kde = KernelDensityEstimator::new(&[5.0]).unwrap();
        assert!(kde.pdf(5.0) > kde.pdf(6.0));
    }
}
