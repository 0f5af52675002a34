//! Utility functions for randomly generating records on manifolds of known dimension

use std::f64::consts::PI;

use ndarray::{Array, Array2};
use ndarray_rand::{
    rand::Rng,
    rand_distr::{StandardNormal, Uniform},
    RandomExt,
};

/// Generate `n` points on a helix in three dimensions, a curve of intrinsic dimension one
///
/// The points `(cos t, sin t, t)` are evenly spaced in `t ∈ [0, 4π]` and every coordinate is
/// perturbed with Gaussian noise of standard deviation `noise`.
pub fn helix(n: usize, noise: f64, rng: &mut impl Rng) -> Array2<f64> {
    let step = if n > 1 { 4. * PI / (n - 1) as f64 } else { 0. };
    let mut records = Array2::from_shape_fn((n, 3), |(i, j)| {
        let t = i as f64 * step;
        match j {
            0 => t.cos(),
            1 => t.sin(),
            _ => t,
        }
    });

    if noise != 0. {
        let perturbation: Array2<f64> = Array::random_using((n, 3), StandardNormal, rng);
        records.scaled_add(noise.abs(), &perturbation);
    }

    records
}

/// Generate `n` points drawn uniformly from the unit cube of dimension `dim`
///
/// Every coordinate is independent, so the intrinsic dimension equals `dim`.
pub fn uniform_cube(n: usize, dim: usize, rng: &mut impl Rng) -> Array2<f64> {
    Array::random_using((n, dim), Uniform::new(0., 1.), rng)
}

/// Generate `n` points of a uniform cube of dimension `intrinsic` embedded linearly into
/// `ambient` dimensions
///
/// The embedding matrix has standard normal entries and therefore full rank almost surely,
/// the returned records span an `intrinsic`-dimensional subspace.
pub fn linear_subspace(
    n: usize,
    intrinsic: usize,
    ambient: usize,
    rng: &mut impl Rng,
) -> Array2<f64> {
    let latent = uniform_cube(n, intrinsic, rng);
    let embedding: Array2<f64> = Array::random_using((intrinsic, ambient), StandardNormal, rng);

    latent.dot(&embedding)
}

/// Append `extra` columns to `records`, each a scaled copy of an existing column
///
/// The intrinsic dimension stays the same while the raw dimension grows.
pub fn with_redundant_columns(records: &Array2<f64>, extra: usize) -> Array2<f64> {
    let ncols = records.ncols();
    let (nrows, total) = (records.nrows(), ncols + if ncols == 0 { 0 } else { extra });

    Array2::from_shape_fn((nrows, total), |(i, j)| {
        if j < ncols {
            records[[i, j]]
        } else {
            let k = j - ncols;
            records[[i, k % ncols]] * (k + 2) as f64
        }
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use ndarray::Axis;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;

    use super::*;

    #[test]
    fn helix_without_noise() {
        let mut rng = Xoshiro256Plus::seed_from_u64(42);
        let records = helix(5, 0., &mut rng);

        assert_eq!(records.dim(), (5, 3));
        assert_abs_diff_eq!(records[[0, 0]], 1.0);
        assert_abs_diff_eq!(records[[4, 2]], 4. * PI, epsilon = 1e-12);
        for row in records.axis_iter(Axis(0)) {
            assert_abs_diff_eq!(row[0].hypot(row[1]), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn cube_is_seeded() {
        let a = uniform_cube(50, 4, &mut Xoshiro256Plus::seed_from_u64(3));
        let b = uniform_cube(50, 4, &mut Xoshiro256Plus::seed_from_u64(3));

        assert_eq!(a, b);
        assert!(a.iter().all(|v| (0. ..1.).contains(v)));
    }

    #[test]
    fn subspace_shape() {
        let mut rng = Xoshiro256Plus::seed_from_u64(7);
        assert_eq!(linear_subspace(20, 2, 6, &mut rng).dim(), (20, 6));
    }

    #[test]
    fn redundant_columns() {
        let records = ndarray::array![[1., 2.], [3., 4.]];
        let out = with_redundant_columns(&records, 3);

        assert_eq!(
            out,
            ndarray::array![[1., 2., 2., 6., 4.], [3., 4., 6., 12., 12.]]
        );
    }
}
