//! Correlation dimension estimation
//!
//! The correlation integral `C(r)` of a point set counts the fraction of point pairs closer
//! than `r`. On a `d`-dimensional manifold it scales like `r^d` over the range of radii where
//! the manifold is well sampled but not yet saturated. The slope of `ln C(r)` against `ln r` in
//! that range is the correlation dimension, and its nearest integer is reported as the
//! intrinsic dimension `I` of the records.
//!
//! ## The algorithm
//!
//! 1. Subsample the records to at most `max_samples` rows with a seeded draw
//! 2. Compute the distance of every pair of rows under the chosen [`Metric`](crate::Metric)
//! 3. Evaluate `C(r)` on `n_radii` log-spaced radii between the smallest strictly positive and
//!    the largest distance
//! 4. Drop `trim_fraction` of the radii at each end and fit `ln C(r) = d ln r + c` by least
//!    squares on the remaining radii with `C(r) > 0`
//! 5. Round `d` to the nearest integer and clamp it to `[1, R]`, where `R` is the number of
//!    features
//!
//! The Dimensionality Reduction Ratio is then `1 - I / R`.
//!
//! ## Example
//!
//! ```
//! use drr::prelude::*;
//! use ndarray::Array2;
//!
//! // a straight line embedded in three dimensions
//! let records = Array2::from_shape_fn((200, 3), |(i, j)| (i * (j + 1)) as f64);
//!
//! let estimate = CorrelationDimension::params()
//!     .metric(Metric::L2)
//!     .max_samples(1000)
//!     .estimate(&records)
//!     .unwrap();
//!
//! assert_eq!(estimate.raw_dimension(), 3);
//! assert_eq!(estimate.intrinsic_dimension(), 1);
//! ```
mod algorithm;
mod hyperparams;
mod integral;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

pub use hyperparams::{CorrelationDimensionParams, CorrelationDimensionValidParams};
pub use integral::{CorrelationIntegral, LinearFit};

use crate::Float;

/// Smallest radius grid the estimator accepts
pub const MIN_RADII: usize = 4;

/// Entry point of the correlation dimension estimator
pub struct CorrelationDimension;

impl CorrelationDimension {
    /// Create a default parameter set for the estimation of a correlation dimension
    ///
    /// See [`CorrelationDimensionParams`] for the defaults.
    pub fn params<F: Float>() -> CorrelationDimensionParams<F> {
        CorrelationDimensionParams::new()
    }
}

/// Raw dimension, intrinsic dimension and Dimensionality Reduction Ratio of a set of records
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionEstimate<F> {
    pub(crate) raw_dimension: usize,
    pub(crate) intrinsic_dimension: usize,
    pub(crate) drr: F,
    pub(crate) correlation_dimension: F,
    pub(crate) n_samples: usize,
}

impl<F: Float> DimensionEstimate<F> {
    /// Number of features `R` of the records
    pub fn raw_dimension(&self) -> usize {
        self.raw_dimension
    }

    /// Intrinsic dimension `I`, in `[1, R]`
    pub fn intrinsic_dimension(&self) -> usize {
        self.intrinsic_dimension
    }

    /// Dimensionality Reduction Ratio `1 - I / R`, in `[0, 1)`
    pub fn drr(&self) -> F {
        self.drr
    }

    /// Fitted slope before rounding and clamping
    pub fn correlation_dimension(&self) -> F {
        self.correlation_dimension
    }

    /// Number of records the distances were computed over
    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    /// `(R, I, DRR)`
    pub fn as_tuple(&self) -> (usize, usize, F) {
        (self.raw_dimension, self.intrinsic_dimension, self.drr)
    }
}
