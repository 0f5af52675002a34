use std::error::Error;

use crate::traits::Estimator;

/// A set of hyperparameters whose values have not been checked for validity. A reference to the
/// checked hyperparameters can only be obtained after checking has completed. If the
/// `Estimator` trait has been implemented on the checked hyperparameters, it will also be
/// implemented on the unchecked hyperparameters with the checking step done automatically.
///
/// The hyperparameter validation done in `check_ref()` and `check()` should be identical.
pub trait ParamGuard {
    /// The checked hyperparameters
    type Checked;
    /// Error type resulting from failed hyperparameter checking
    type Error: Error;

    /// Checks the hyperparameters and returns a reference to the checked hyperparameters if
    /// successful
    fn check_ref(&self) -> Result<&Self::Checked, Self::Error>;

    /// Checks the hyperparameters and returns the checked hyperparameters if successful
    fn check(self) -> Result<Self::Checked, Self::Error>;

    /// Calls `check()` and unwraps the result
    fn check_unwrap(self) -> Self::Checked
    where
        Self: Sized,
    {
        self.check().unwrap()
    }
}

/// Performs checking step and calls `estimate` on the checked hyperparameters. If checking
/// fails, the checking error is converted to the estimator's error type and returned.
pub trait EstimateGuard {}

impl<R, P> Estimator<R> for P
where
    P: ParamGuard + EstimateGuard,
    P::Checked: Estimator<R>,
    <P::Checked as Estimator<R>>::Error: From<P::Error>,
{
    type Object = <P::Checked as Estimator<R>>::Object;
    type Error = <P::Checked as Estimator<R>>::Error;

    fn estimate(&self, records: &R) -> Result<Self::Object, Self::Error> {
        let checked = self.check_ref()?;
        checked.estimate(records)
    }
}
