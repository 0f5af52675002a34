use std::cmp::Ordering;

use ndarray::{ArrayBase, Data, Ix2};

use crate::distance::{Distance, Metric};
use crate::error::{DrrError, Result};
use crate::Float;

/// Distances between every unordered pair of records
///
/// Stored in condensed form: the pair `(i, j)` with `i < j` of `k` points sits at
/// `k*i - i*(i+1)/2 + (j - i - 1)`. Memory grows with `k*(k-1)/2`, which is why the estimator
/// caps the number of points before building this set.
#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseDistances<F> {
    n_points: usize,
    distances: Vec<F>,
}

impl<F: Float> PairwiseDistances<F> {
    /// Number of points the distances were computed over
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// Number of pairs, `C(k, 2)`
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    pub fn as_slice(&self) -> &[F] {
        &self.distances
    }

    /// Distance between points `i` and `j`
    pub fn get(&self, i: usize, j: usize) -> Option<F> {
        let (i, j) = match i.cmp(&j) {
            Ordering::Less => (i, j),
            Ordering::Greater => (j, i),
            Ordering::Equal => return (i < self.n_points).then(F::zero),
        };
        if j >= self.n_points {
            return None;
        }
        let k = self.n_points;
        self.distances.get(k * i - i * (i + 1) / 2 + (j - i - 1)).copied()
    }

    /// Largest distance of the set
    pub fn max(&self) -> Option<F> {
        self.distances.iter().copied().fold(None, |acc, d| match acc {
            Some(m) if m >= d => Some(m),
            _ => Some(d),
        })
    }

    /// Smallest strictly positive distance of the set
    pub fn min_positive(&self) -> Option<F> {
        self.distances
            .iter()
            .copied()
            .filter(|d| *d > F::zero())
            .fold(None, |acc, d| match acc {
                Some(m) if m <= d => Some(m),
                _ => Some(d),
            })
    }

    /// Consumes the set and returns its distances in ascending order
    pub fn into_sorted(mut self) -> Vec<F> {
        self.distances
            .sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        self.distances
    }
}

/// Computes the distance between every unordered pair of rows under `metric`
///
/// This is quadratic in time and memory with respect to the number of rows.
pub fn pairwise_distances<F: Float, D: Data<Elem = F>>(
    records: &ArrayBase<D, Ix2>,
    metric: Metric,
) -> Result<PairwiseDistances<F>> {
    let n_points = records.nrows();
    let mut distances = Vec::with_capacity(n_points * n_points.saturating_sub(1) / 2);

    for i in 0..n_points {
        let a = records.row(i);
        for j in (i + 1)..n_points {
            let d = metric
                .distance(a.view(), records.row(j))
                .ok_or(DrrError::DegenerateMetric {
                    metric,
                    first: i,
                    second: j,
                })?;
            distances.push(d);
        }
    }

    Ok(PairwiseDistances {
        n_points,
        distances,
    })
}
