#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::correlation::MIN_RADII;
use crate::distance::Metric;
use crate::error::DrrError;
use crate::param_guard::{EstimateGuard, ParamGuard};
use crate::Float;

/// A verified hyper-parameter set ready for the estimation of a correlation dimension
///
/// See [`CorrelationDimensionParams`] for more information.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationDimensionValidParams<F> {
    pub(crate) metric: Metric,
    pub(crate) max_samples: usize,
    pub(crate) seed: u64,
    pub(crate) n_radii: usize,
    pub(crate) trim_fraction: F,
    pub(crate) min_points: usize,
}

impl<F: Float> CorrelationDimensionValidParams<F> {
    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn max_samples(&self) -> usize {
        self.max_samples
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn n_radii(&self) -> usize {
        self.n_radii
    }

    pub fn trim_fraction(&self) -> F {
        self.trim_fraction
    }

    pub fn min_points(&self) -> usize {
        self.min_points
    }

    /// Number of grid points dropped from each end of the radius grid
    pub fn trimmed_radii(&self) -> usize {
        (F::cast(self.n_radii) * self.trim_fraction)
            .floor()
            .to_usize()
            .unwrap_or(0)
    }
}

/// Hyper-parameters of the correlation dimension estimator
///
/// # Defaults
///
///  * `metric`: [`Metric::L1`]
///  * `max_samples`: 2000
///  * `seed`: 42
///  * `n_radii`: 50
///  * `trim_fraction`: 0.2
///  * `min_points`: 4
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationDimensionParams<F>(pub(crate) CorrelationDimensionValidParams<F>);

impl<F: Float> Default for CorrelationDimensionParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> CorrelationDimensionParams<F> {
    pub fn new() -> Self {
        Self(CorrelationDimensionValidParams {
            metric: Metric::L1,
            max_samples: 2000,
            seed: 42,
            n_radii: 50,
            trim_fraction: F::cast(0.2),
            min_points: 4,
        })
    }

    /// Set the distance metric
    pub fn metric(mut self, metric: Metric) -> Self {
        self.0.metric = metric;
        self
    }

    /// Set the maximal number of records used for the pairwise distances
    ///
    /// Larger records are subsampled without replacement. Time and memory of an estimate grow
    /// with the square of this value.
    pub fn max_samples(mut self, max_samples: usize) -> Self {
        self.0.max_samples = max_samples;
        self
    }

    /// Set the seed of the subsampling draw
    pub fn seed(mut self, seed: u64) -> Self {
        self.0.seed = seed;
        self
    }

    /// Set the number of log-spaced radii the correlation integral is evaluated on
    pub fn n_radii(mut self, n_radii: usize) -> Self {
        self.0.n_radii = n_radii;
        self
    }

    /// Set the fraction of the radius grid discarded at each end before the slope is fitted
    ///
    /// Small radii suffer from too few pairs, large radii from saturation near the diameter of
    /// the records. Must lie in `[0, 0.5)` and leave at least two radii.
    pub fn trim_fraction(mut self, trim_fraction: F) -> Self {
        self.0.trim_fraction = trim_fraction;
        self
    }

    /// Set the minimal number of distinct records needed for an estimate
    pub fn min_points(mut self, min_points: usize) -> Self {
        self.0.min_points = min_points;
        self
    }
}

impl<F: Float> ParamGuard for CorrelationDimensionParams<F> {
    type Checked = CorrelationDimensionValidParams<F>;
    type Error = DrrError;

    fn check_ref(&self) -> Result<&Self::Checked, Self::Error> {
        let trim = self.0.trim_fraction;
        let half = F::cast(0.5);

        if self.0.max_samples == 0 {
            Err(DrrError::InvalidMaxSamples(self.0.max_samples))
        } else if self.0.n_radii < MIN_RADII {
            Err(DrrError::TooFewRadii(self.0.n_radii))
        } else if !trim.is_finite()
            || trim.is_negative()
            || trim >= half
            || self.0.n_radii - 2 * self.0.trimmed_radii() < 2
        {
            Err(DrrError::InvalidTrimFraction(trim.as_() as f32))
        } else if self.0.min_points < 2 {
            Err(DrrError::InvalidMinPoints(self.0.min_points))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}

impl<F: Float> EstimateGuard for CorrelationDimensionParams<F> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = CorrelationDimensionParams::<f64>::default().check().unwrap();
        assert_eq!(params.metric(), Metric::L1);
        assert_eq!(params.max_samples(), 2000);
        assert_eq!(params.seed(), 42);
        assert_eq!(params.n_radii(), 50);
        assert_eq!(params.trimmed_radii(), 10);
        assert_eq!(params.min_points(), 4);
    }

    #[test]
    fn max_samples_cannot_be_zero() {
        let res = CorrelationDimensionParams::<f64>::new().max_samples(0).check();
        assert!(matches!(res, Err(DrrError::InvalidMaxSamples(0))));
    }

    #[test]
    fn too_few_radii() {
        let res = CorrelationDimensionParams::<f64>::new().n_radii(3).check();
        assert!(matches!(res, Err(DrrError::TooFewRadii(3))));
    }

    #[test]
    fn trim_fraction_out_of_range() {
        for trim in [-0.1, 0.5, 0.9, f64::NAN] {
            let res = CorrelationDimensionParams::new().trim_fraction(trim).check();
            assert!(matches!(res, Err(DrrError::InvalidTrimFraction(_))));
        }
    }

    #[test]
    fn trim_must_leave_two_radii() {
        // floor(5 * 0.45) = 2 radii dropped at each end leaves a single one
        let res = CorrelationDimensionParams::new()
            .n_radii(5)
            .trim_fraction(0.45)
            .check();
        assert!(matches!(res, Err(DrrError::InvalidTrimFraction(_))));

        let res = CorrelationDimensionParams::new()
            .n_radii(6)
            .trim_fraction(0.45)
            .check();
        assert!(res.is_ok());
    }

    #[test]
    fn min_points_at_least_2() {
        let res = CorrelationDimensionParams::<f32>::new().min_points(1).check();
        assert!(matches!(res, Err(DrrError::InvalidMinPoints(1))));
    }
}
