use ndarray::{ArrayBase, Axis, CowArray, Data, Ix2};
use rand::{seq::index, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;

use crate::error::{DrrError, Result};

/// Reduces `records` to at most `max_samples` rows
///
/// Records with no more than `max_samples` rows are returned as a view, unchanged. Otherwise
/// `max_samples` distinct rows are drawn uniformly without replacement from a
/// `Xoshiro256Plus` seeded with `seed`, and returned in their original relative order. The
/// same records, cap and seed always select the same rows.
///
/// The cap exists because the pairwise distance set grows quadratically with the number of
/// rows: a larger `max_samples` stabilises the estimate at `O(max_samples^2)` time and memory.
pub fn prepare_sample<'a, F: Clone, D: Data<Elem = F>>(
    records: &'a ArrayBase<D, Ix2>,
    max_samples: usize,
    seed: u64,
) -> Result<CowArray<'a, F, Ix2>> {
    let (nrows, ncols) = records.dim();
    if nrows == 0 || ncols == 0 {
        return Err(DrrError::InvalidInput {
            nrows,
            ncols,
            reason: "records need at least one row and one column".into(),
        });
    }
    if max_samples == 0 {
        return Err(DrrError::InvalidMaxSamples(max_samples));
    }

    if nrows <= max_samples {
        return Ok(CowArray::from(records.view()));
    }

    let mut rng = Xoshiro256Plus::seed_from_u64(seed);
    let mut indices = index::sample(&mut rng, nrows, max_samples).into_vec();
    indices.sort_unstable();

    log::debug!(
        "subsampled {} of {} rows with seed {}",
        max_samples,
        nrows,
        seed
    );

    Ok(CowArray::from(records.select(Axis(0), &indices)))
}
