use std::collections::HashSet;

use ndarray::{ArrayBase, Data, Ix2};

use crate::correlation::hyperparams::CorrelationDimensionValidParams;
use crate::correlation::integral::CorrelationIntegral;
use crate::correlation::DimensionEstimate;
use crate::error::{DrrError, Result};
use crate::pairwise::pairwise_distances;
use crate::sample::prepare_sample;
use crate::traits::Estimator;
use crate::Float;

impl<F: Float, D: Data<Elem = F>> Estimator<ArrayBase<D, Ix2>>
    for CorrelationDimensionValidParams<F>
{
    type Object = DimensionEstimate<F>;
    type Error = DrrError;

    /// Estimates the intrinsic dimension of `records`
    ///
    /// The raw dimension is always the column count of `records`, subsampling only thins out
    /// the rows the distances are computed over.
    fn estimate(&self, records: &ArrayBase<D, Ix2>) -> Result<DimensionEstimate<F>> {
        validate_records(records)?;
        let raw_dimension = records.ncols();

        let sample = prepare_sample(records, self.max_samples(), self.seed())?;
        let n_samples = sample.nrows();
        if n_samples < self.min_points() {
            return Err(DrrError::InsufficientData {
                found: n_samples,
                required: self.min_points(),
            });
        }

        match count_distinct_rows(&sample) {
            1 => {
                return Err(DrrError::DegenerateData(format!(
                    "all {} samples are identical",
                    n_samples
                )))
            }
            n if n < self.min_points() => {
                return Err(DrrError::InsufficientData {
                    found: n,
                    required: self.min_points(),
                })
            }
            _ => {}
        }

        let distances = pairwise_distances(&sample, self.metric())?;
        let integral = CorrelationIntegral::from_distances(distances, self.n_radii())?;
        let fit = integral.fit_scaling(self.trimmed_radii())?;

        let intrinsic_dimension = round_and_clamp(fit.slope, raw_dimension);
        let drr = F::one() - F::cast(intrinsic_dimension) / F::cast(raw_dimension);

        log::debug!(
            "{} metric on {}x{} samples: slope {:.4} (r2 {:.4}), I = {}, R = {}",
            self.metric(),
            n_samples,
            raw_dimension,
            fit.slope,
            fit.r_squared,
            intrinsic_dimension,
            raw_dimension
        );

        Ok(DimensionEstimate {
            raw_dimension,
            intrinsic_dimension,
            drr,
            correlation_dimension: fit.slope,
            n_samples,
        })
    }
}

/// Rejects empty records and records holding NaN or infinite values
fn validate_records<F: Float, D: Data<Elem = F>>(records: &ArrayBase<D, Ix2>) -> Result<()> {
    let (nrows, ncols) = records.dim();
    if nrows == 0 || ncols == 0 {
        return Err(DrrError::InvalidInput {
            nrows,
            ncols,
            reason: "records need at least one row and one column".into(),
        });
    }

    match records.indexed_iter().find(|(_, v)| !v.is_finite()) {
        Some(((row, col), value)) => Err(DrrError::InvalidInput {
            nrows,
            ncols,
            reason: format!("non-finite value {} at row {}, column {}", value, row, col),
        }),
        None => Ok(()),
    }
}

fn count_distinct_rows<F: Float, D: Data<Elem = F>>(records: &ArrayBase<D, Ix2>) -> usize {
    records
        .rows()
        .into_iter()
        .map(|row| {
            // adding zero folds -0.0 into 0.0
            row.iter()
                .map(|v| (v.as_() + 0.0).to_bits())
                .collect::<Vec<u64>>()
        })
        .collect::<HashSet<_>>()
        .len()
}

/// Nearest integer to `slope`, clamped to `[1, raw_dimension]`
fn round_and_clamp<F: Float>(slope: F, raw_dimension: usize) -> usize {
    slope
        .round()
        .max(F::one())
        .min(F::cast(raw_dimension))
        .to_usize()
        .unwrap_or(1)
}
