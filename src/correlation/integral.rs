use ndarray::{Array1, ArrayView1};

use crate::error::{DrrError, Result};
use crate::pairwise::PairwiseDistances;
use crate::Float;

/// Correlation integral of a distance set, sampled on a log-spaced radius grid
///
/// `values[k]` is the fraction of pairs whose distance is strictly below `radii[k]`. The grid
/// runs from the smallest strictly positive distance to the largest distance, so the values are
/// non-decreasing, start at zero when the records hold no duplicates and stay below one.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationIntegral<F> {
    radii: Array1<F>,
    values: Array1<F>,
}

impl<F: Float> CorrelationIntegral<F> {
    /// Evaluates the correlation integral of `distances` on `n_radii` log-spaced radii
    ///
    /// Fails with `DegenerateData` if no distance is strictly positive or all strictly positive
    /// distances coincide with the largest one, as no scale range is left to sample.
    pub fn from_distances(distances: PairwiseDistances<F>, n_radii: usize) -> Result<Self> {
        let (r_min, r_max) = match (distances.min_positive(), distances.max()) {
            (Some(r_min), Some(r_max)) if r_min < r_max => (r_min, r_max),
            (Some(_), Some(_)) => {
                return Err(DrrError::DegenerateData(
                    "all pairwise distances are equal".into(),
                ))
            }
            _ => {
                return Err(DrrError::DegenerateData(
                    "no strictly positive pairwise distance".into(),
                ))
            }
        };

        let radii = log_spaced(r_min, r_max, n_radii);
        log::debug!(
            "correlation integral over {} radii in [{}, {}]",
            n_radii,
            r_min,
            r_max
        );

        let n_pairs = F::cast(distances.len());
        let sorted = distances.into_sorted();
        let values = radii.mapv(|r| F::cast(sorted.partition_point(|d| *d < r)) / n_pairs);

        Ok(CorrelationIntegral { radii, values })
    }

    pub fn radii(&self) -> ArrayView1<'_, F> {
        self.radii.view()
    }

    pub fn values(&self) -> ArrayView1<'_, F> {
        self.values.view()
    }

    pub fn len(&self) -> usize {
        self.radii.len()
    }

    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }

    /// Fits the scaling exponent on the grid with `trim` radii discarded at each end
    ///
    /// Only radii with a non-zero integral take part in the fit, as the logarithm of an empty
    /// count is undefined.
    pub fn fit_scaling(&self, trim: usize) -> Result<LinearFit<F>> {
        let end = self.len().saturating_sub(trim);
        let (log_r, log_c): (Vec<F>, Vec<F>) = self
            .radii
            .iter()
            .zip(self.values.iter())
            .take(end)
            .skip(trim)
            .filter(|(_, c)| **c > F::zero())
            .map(|(r, c)| (r.ln(), c.ln()))
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .unzip();

        LinearFit::ordinary_least_squares(&log_r, &log_c)
    }
}

/// `n` radii from `r_min` to `r_max` with a constant ratio between neighbours
///
/// The end points are exact, so the first radius never counts the closest pair.
fn log_spaced<F: Float>(r_min: F, r_max: F, n: usize) -> Array1<F> {
    let (log_min, log_max) = (r_min.ln(), r_max.ln());
    let step = (log_max - log_min) / F::cast(n.saturating_sub(1).max(1));

    Array1::from_shape_fn(n, |k| match k {
        0 => r_min,
        k if k + 1 == n => r_max,
        k => (log_min + step * F::cast(k)).exp(),
    })
}

/// Least squares line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit<F> {
    pub slope: F,
    pub intercept: F,
    pub r_squared: F,
}

impl<F: Float> LinearFit<F> {
    pub fn ordinary_least_squares(x: &[F], y: &[F]) -> Result<Self> {
        if x.len() < 2 || x.len() != y.len() {
            return Err(DrrError::DegenerateData(format!(
                "{} usable points in the scaling region, at least 2 needed",
                x.len().min(y.len())
            )));
        }

        let n = F::cast(x.len());
        let mean_x = x.iter().copied().sum::<F>() / n;
        let mean_y = y.iter().copied().sum::<F>() / n;

        let (mut sxx, mut sxy, mut syy) = (F::zero(), F::zero(), F::zero());
        for (xi, yi) in x.iter().zip(y.iter()) {
            let (dx, dy) = (*xi - mean_x, *yi - mean_y);
            sxx += dx * dx;
            sxy += dx * dy;
            syy += dy * dy;
        }

        if sxx <= F::zero() {
            return Err(DrrError::DegenerateData(
                "scaling region spans a single radius".into(),
            ));
        }

        let slope = sxy / sxx;
        if !slope.is_finite() {
            return Err(DrrError::DegenerateData(format!(
                "non-finite scaling exponent {}",
                slope
            )));
        }

        let r_squared = if syy > F::zero() {
            sxy * sxy / (sxx * syy)
        } else {
            F::one()
        };

        Ok(LinearFit {
            slope,
            intercept: mean_y - slope * mean_x,
            r_squared,
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use ndarray::{arr2, Array2};

    use super::*;
    use crate::distance::Metric;
    use crate::pairwise::pairwise_distances;

    fn line(n: usize) -> Array2<f64> {
        Array2::from_shape_fn((n, 1), |(i, _)| i as f64)
    }

    #[test]
    fn fit_ignores_trimmed_ends() {
        // ln C = 2 ln r - 20 on the middle six radii, flat on two radii at each end
        let radii = Array1::from_shape_fn(10, |k| (k as f64).exp());
        let values = Array1::from_shape_fn(10, |k| match k {
            0 | 1 => (-16f64).exp(),
            8 | 9 => (-6f64).exp(),
            k => (2. * k as f64 - 20.).exp(),
        });
        let integral = CorrelationIntegral { radii, values };

        let trimmed = integral.fit_scaling(2).unwrap();
        assert_abs_diff_eq!(trimmed.slope, 2.0, epsilon = 1e-10);
        assert_abs_diff_eq!(trimmed.intercept, -20.0, epsilon = 1e-10);
        assert_abs_diff_eq!(trimmed.r_squared, 1.0, epsilon = 1e-10);

        let full = integral.fit_scaling(0).unwrap();
        assert!(full.slope < 1.8);
        assert!(full.r_squared < 1.0);
    }

    #[test]
    fn least_squares_line() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [1.0, 3.0, 5.0, 7.0];
        let fit = LinearFit::ordinary_least_squares(&x, &y).unwrap();
        assert_abs_diff_eq!(fit.slope, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.intercept, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.r_squared, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn least_squares_needs_spread() {
        assert!(matches!(
            LinearFit::ordinary_least_squares(&[1.0], &[2.0]),
            Err(DrrError::DegenerateData(_))
        ));
        assert!(matches!(
            LinearFit::ordinary_least_squares(&[1.0, 1.0, 1.0], &[2.0, 3.0, 4.0]),
            Err(DrrError::DegenerateData(_))
        ));
    }

    #[test]
    fn grid_spans_distance_range() {
        let dists = pairwise_distances(&line(20), Metric::L1).unwrap();
        let integral = CorrelationIntegral::from_distances(dists, 30).unwrap();

        assert_eq!(integral.len(), 30);
        assert_abs_diff_eq!(integral.radii()[0], 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(integral.radii()[29], 19.0, epsilon = 1e-9);

        // geometric spacing
        let ratios: Vec<f64> = integral
            .radii()
            .windows(2)
            .into_iter()
            .map(|w| w[1] / w[0])
            .collect();
        for ratio in &ratios {
            assert_abs_diff_eq!(*ratio, ratios[0], epsilon = 1e-9);
        }
    }

    #[test]
    fn integral_is_monotone_and_bounded() {
        let dists = pairwise_distances(&line(40), Metric::L2).unwrap();
        let integral = CorrelationIntegral::from_distances(dists, 25).unwrap();
        let values = integral.values();

        assert_eq!(values[0], 0.0);
        assert!(values.iter().all(|c| (0.0..1.0).contains(c)));
        assert!(values.windows(2).into_iter().all(|w| w[0] <= w[1]));
    }

    #[test]
    fn strict_inequality_at_radius() {
        // distances 1, 1, 2: the first radius equals the smallest distance and counts nothing
        let points = arr2(&[[0.0], [1.0], [2.0]]);
        let dists = pairwise_distances(&points, Metric::L1).unwrap();
        let integral = CorrelationIntegral::from_distances(dists, 4).unwrap();
        assert_eq!(integral.values()[0], 0.0);
        assert_abs_diff_eq!(integral.values()[3], 2.0 / 3.0);
    }

    #[test]
    fn uniform_line_has_unit_slope() {
        let dists = pairwise_distances(&line(200), Metric::L1).unwrap();
        let integral = CorrelationIntegral::from_distances(dists, 50).unwrap();
        let fit = integral.fit_scaling(10).unwrap();
        assert_abs_diff_eq!(fit.slope, 1.0, epsilon = 0.2);
    }

    #[test]
    fn equal_distances_are_degenerate() {
        // unit vectors are pairwise 2 apart under l1
        let points = arr2(&[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        let dists = pairwise_distances(&points, Metric::L1).unwrap();
        let res = CorrelationIntegral::from_distances(dists, 10);
        assert!(matches!(res, Err(DrrError::DegenerateData(_))));

        let points = arr2(&[[1.0, 1.0], [1.0, 1.0]]);
        let dists = pairwise_distances(&points, Metric::L2).unwrap();
        let res = CorrelationIntegral::from_distances(dists, 10);
        assert!(matches!(res, Err(DrrError::DegenerateData(_))));
    }
}
