//! Error types in drr
//!
use thiserror::Error;

use crate::distance::Metric;

pub type Result<T> = std::result::Result<T, DrrError>;

#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum DrrError {
    #[error("invalid input of shape {nrows}x{ncols}: {reason}")]
    InvalidInput {
        nrows: usize,
        ncols: usize,
        reason: String,
    },
    #[error("at least {required} distinct samples needed to fit a scaling exponent, found {found}")]
    InsufficientData { found: usize, required: usize },
    #[error("degenerate data: {0}")]
    DegenerateData(String),
    #[error("unsupported distance metric `{0}`, expected one of l1, l2, euclidean, manhattan, cosine")]
    UnsupportedMetric(String),
    #[error("{metric} distance undefined between samples {first} and {second}")]
    DegenerateMetric {
        metric: Metric,
        first: usize,
        second: usize,
    },
    #[error("max_samples must be at least 1, but is {0}")]
    InvalidMaxSamples(usize),
    #[error("trim fraction should be in range [0, 0.5) and leave two radii, but is {0}")]
    InvalidTrimFraction(f32),
    #[error("number of radii must be at least {min}, but is {0}", min = crate::correlation::MIN_RADII)]
    TooFewRadii(usize),
    #[error("min_points must be at least 2, but is {0}")]
    InvalidMinPoints(usize),
}
