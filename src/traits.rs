//! Provide traits for the estimators in this crate
//!
use crate::error::DrrError;

/// Estimation algorithms
///
/// An estimator consumes a set of records and summarises them in an object, without learning
/// any state that could be applied to other records afterwards.
pub trait Estimator<R> {
    type Object;
    type Error: std::error::Error + From<DrrError>;

    fn estimate(&self, records: &R) -> Result<Self::Object, Self::Error>;
}
