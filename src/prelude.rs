//! drr prelude.
//!
//! This module contains the most used types, type aliases, traits and
//! functions that you can import easily as a group.
//!

#[doc(no_inline)]
pub use crate::error::{DrrError, Result};

#[doc(no_inline)]
pub use crate::traits::*;

#[doc(no_inline)]
pub use crate::param_guard::ParamGuard;

#[doc(no_inline)]
pub use crate::correlation::{
    CorrelationDimension, CorrelationDimensionParams, CorrelationIntegral, DimensionEstimate,
};

#[doc(no_inline)]
pub use crate::distance::{Distance, Metric};

#[doc(no_inline)]
pub use crate::Float;
