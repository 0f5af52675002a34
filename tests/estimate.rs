use approx::assert_abs_diff_eq;
use drr::pairwise::pairwise_distances;
use drr::prelude::*;
use drr_datasets::generate;
use ndarray::{Array2, Axis};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

fn helix(seed: u64) -> Array2<f64> {
    let mut rng = Xoshiro256Plus::seed_from_u64(seed);
    generate::helix(500, 0.02, &mut rng)
}

fn cube(n: usize, dim: usize, seed: u64) -> Array2<f64> {
    let mut rng = Xoshiro256Plus::seed_from_u64(seed);
    generate::uniform_cube(n, dim, &mut rng)
}

#[test]
fn deterministic_under_subsampling() {
    let records = helix(1);

    let first = drr::estimate(&records, Metric::L1, 300, 7).unwrap();
    let second = drr::estimate(&records, Metric::L1, 300, 7).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        first.correlation_dimension().to_bits(),
        second.correlation_dimension().to_bits()
    );
}

#[test]
fn raw_dimension_survives_subsampling() {
    let records = cube(600, 5, 2);
    let estimate = drr::estimate(&records, Metric::L2, 100, 42).unwrap();

    assert_eq!(estimate.raw_dimension(), 5);
    assert_eq!(estimate.n_samples(), 100);
}

#[test]
fn bounds() {
    let mut rng = Xoshiro256Plus::seed_from_u64(3);
    let plane = generate::linear_subspace(500, 2, 4, &mut rng);
    let records = generate::with_redundant_columns(&plane, 2);

    for metric in [Metric::L1, Metric::L2, Metric::Cosine].iter() {
        let estimate = drr::estimate(&records, *metric, 2000, 42).unwrap();
        let (r, i, drr) = estimate.as_tuple();

        assert_eq!(r, 6);
        assert!((1..=r).contains(&i));
        assert!((0. ..1.).contains(&drr));
        assert_abs_diff_eq!(drr, 1. - i as f64 / r as f64);
    }
}

#[test]
fn plane_in_four_dimensions() {
    let mut rng = Xoshiro256Plus::seed_from_u64(5);
    let records = generate::linear_subspace(800, 2, 4, &mut rng);

    let estimate = drr::estimate(&records, Metric::L2, 2000, 42).unwrap();
    assert!((1..=3).contains(&estimate.intrinsic_dimension()));
    assert!(estimate.drr() >= 0.25);
}

#[test]
fn correlation_integral_is_monotone() {
    let records = helix(4);
    let distances = pairwise_distances(&records, Metric::L1).unwrap();
    let integral = CorrelationIntegral::from_distances(distances, 50).unwrap();

    assert!(integral.radii().to_vec().windows(2).all(|w| w[0] < w[1]));
    assert!(integral.values().to_vec().windows(2).all(|w| w[0] <= w[1]));
    assert!(integral.values().iter().all(|v| (0. ..=1.).contains(v)));
}

#[test]
fn identical_rows_are_degenerate() {
    let records = Array2::from_elem((50, 3), 0.25);

    for metric in [Metric::L1, Metric::L2].iter() {
        let res = drr::estimate(&records, *metric, 2000, 42);
        assert!(matches!(res, Err(DrrError::DegenerateData(_))));
    }
}

#[test]
fn empty_input() {
    let records = Array2::<f64>::zeros((0, 0));
    let res = drr::estimate(&records, Metric::L1, 2000, 42);

    assert!(matches!(res, Err(DrrError::InvalidInput { .. })));
}

#[test]
fn helix_is_a_curve() {
    let records = helix(42);
    let estimate = drr::estimate(&records, Metric::L1, 2000, 42).unwrap();

    assert_eq!(estimate.raw_dimension(), 3);
    assert!((1..=2).contains(&estimate.intrinsic_dimension()));
    assert!(estimate.drr() >= 0.33);
}

#[test]
fn trimming_changes_the_fit() {
    let records = helix(42);

    let trimmed = CorrelationDimension::params()
        .estimate(&records)
        .unwrap();
    let untrimmed = CorrelationDimension::params()
        .trim_fraction(0.0)
        .estimate(&records)
        .unwrap();

    let (a, b) = (
        trimmed.correlation_dimension(),
        untrimmed.correlation_dimension(),
    );
    assert!((a - b).abs() > 1e-3, "{} vs {}", a, b);
}

#[test]
fn uniform_noise_is_full_rank() {
    let records = cube(1000, 5, 42);
    let estimate = drr::estimate(&records, Metric::L1, 2000, 42).unwrap();

    assert_eq!(estimate.raw_dimension(), 5);
    assert!(estimate.intrinsic_dimension() >= 4);
    assert!(estimate.drr() <= 0.2);
}

#[test]
fn metrics_agree() {
    for records in [helix(8), cube(1000, 5, 8)].iter() {
        let l1 = drr::estimate(records, Metric::L1, 2000, 42).unwrap();
        let l2 = "euclidean"
            .parse::<Metric>()
            .and_then(|metric| drr::estimate(records, metric, 2000, 42))
            .unwrap();

        let (i1, i2) = (l1.intrinsic_dimension(), l2.intrinsic_dimension());
        assert!(i1.max(i2) - i1.min(i2) <= 1);
    }
}

#[test]
fn single_precision() {
    let records = Array2::from_shape_fn((150, 4), |(i, j)| (i * (j + 1)) as f32);
    let estimate = drr::estimate(&records, Metric::L2, 2000, 42).unwrap();

    assert_eq!(estimate.as_tuple(), (4, 1, 0.75));
}

#[test]
fn subsample_keeps_rows_intact() {
    let records = cube(300, 3, 9);
    let sample = drr::sample::prepare_sample(&records, 50, 42).unwrap();

    assert_eq!(sample.nrows(), 50);
    for row in sample.axis_iter(Axis(0)) {
        assert!(records.axis_iter(Axis(0)).any(|r| r == row));
    }
}
