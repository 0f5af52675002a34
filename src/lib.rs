//! `drr` estimates how many degrees of freedom a tabular numeric dataset really has.
//!
//! A dataset with `R` feature columns often varies along far fewer directions: features
//! duplicate each other, are derived from each other or are bound by constraints. `drr`
//! estimates this intrinsic dimension `I` from the scaling of pairwise distances between the
//! records (the [correlation dimension](correlation)) and reports the Dimensionality Reduction
//! Ratio
//!
//! ```text
//! DRR = 1 - I / R
//! ```
//!
//! A DRR of zero means every feature carries its own degree of freedom, a DRR close to one
//! means almost all of them are redundant.
//!
//! `drr` does not project records into fewer dimensions, it only estimates how many would
//! suffice.
//!
//! ## Usage
//!
//! ```
//! use drr::Metric;
//! use ndarray::Array2;
//!
//! // two features, one of them twice the other
//! let records = Array2::from_shape_fn((100, 2), |(i, j)| (i * (j + 1)) as f64);
//!
//! let (r, i, drr) = drr::estimate(&records, Metric::L1, 2000, 42).unwrap().as_tuple();
//! assert_eq!((r, i), (2, 1));
//! assert!((drr - 0.5).abs() < 1e-12);
//! ```
//!
//! Every estimate is a pure function of the records, the metric, the sampling cap and the seed.
//! Time and memory are quadratic in `min(n_samples, max_samples)`.

pub mod correlation;
pub mod distance;
pub mod error;
mod float;
pub mod pairwise;
pub mod param_guard;
pub mod prelude;
pub mod sample;
pub mod traits;

use ndarray::{ArrayBase, Data, Ix2};

pub use correlation::{CorrelationDimension, DimensionEstimate};
pub use distance::Metric;
pub use error::{DrrError as Error, DrrError, Result};
pub use float::Float;
pub use param_guard::ParamGuard;

use traits::Estimator;

/// Estimates raw dimension, intrinsic dimension and DRR of `records`
///
/// Shorthand for [`CorrelationDimension::params`] with the given metric, sampling cap and seed
/// and default values for the radius grid.
pub fn estimate<F: Float, D: Data<Elem = F>>(
    records: &ArrayBase<D, Ix2>,
    metric: Metric,
    max_samples: usize,
    seed: u64,
) -> Result<DimensionEstimate<F>> {
    CorrelationDimension::params()
        .metric(metric)
        .max_samples(max_samples)
        .seed(seed)
        .estimate(records)
}
