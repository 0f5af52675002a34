use std::fmt;
use std::str::FromStr;

use ndarray::ArrayView1;
use ndarray_stats::DeviationExt;
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::DrrError;
use crate::Float;

pub type Point<'a, F> = ArrayView1<'a, F>;

/// A distance between two feature vectors
///
/// Returns `None` when the distance is undefined for the pair, which is the case for points of
/// unequal dimension and for metrics with numeric edge cases (see [`CosineDist`]).
pub trait Distance<F: Float> {
    fn distance(&self, a: Point<F>, b: Point<F>) -> Option<F>;
}

/// Manhattan distance
pub struct L1Dist;
impl<F: Float> Distance<F> for L1Dist {
    fn distance(&self, a: Point<F>, b: Point<F>) -> Option<F> {
        a.l1_dist(&b).ok()
    }
}

/// Euclidean distance
pub struct L2Dist;
impl<F: Float> Distance<F> for L2Dist {
    fn distance(&self, a: Point<F>, b: Point<F>) -> Option<F> {
        a.l2_dist(&b).ok().map(F::cast)
    }
}

/// One minus the cosine similarity, in `[0, 2]`
///
/// The similarity against a zero vector is taken as zero. The distance between two zero
/// vectors is undefined.
pub struct CosineDist;
impl<F: Float> Distance<F> for CosineDist {
    fn distance(&self, a: Point<F>, b: Point<F>) -> Option<F> {
        if a.len() != b.len() {
            return None;
        }

        let norm_a = a.dot(&a).sqrt();
        let norm_b = b.dot(&b).sqrt();

        match (norm_a.is_zero(), norm_b.is_zero()) {
            (true, true) => None,
            (true, false) | (false, true) => Some(F::one()),
            (false, false) => {
                let similarity = a.dot(&b) / (norm_a * norm_b);
                let two = F::one() + F::one();
                Some((F::one() - similarity).max(F::zero()).min(two))
            }
        }
    }
}

/// The closed set of metrics the estimator supports
///
/// Parsed case-insensitively from `l1`/`manhattan`, `l2`/`euclidean` and `cosine`.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "lowercase")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Metric {
    /// Manhattan distance
    #[default]
    L1,
    /// Euclidean distance
    L2,
    /// Cosine distance
    Cosine,
}

impl Metric {
    /// Every name accepted by `from_str`, aliases included
    pub const NAMES: [&'static str; 5] = ["l1", "l2", "euclidean", "manhattan", "cosine"];

    pub fn name(&self) -> &'static str {
        match self {
            Self::L1 => "l1",
            Self::L2 => "l2",
            Self::Cosine => "cosine",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = DrrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l1" | "manhattan" => Ok(Self::L1),
            "l2" | "euclidean" => Ok(Self::L2),
            "cosine" => Ok(Self::Cosine),
            _ => Err(DrrError::UnsupportedMetric(s.to_string())),
        }
    }
}

impl<F: Float> Distance<F> for Metric {
    fn distance(&self, a: Point<F>, b: Point<F>) -> Option<F> {
        match self {
            Self::L1 => L1Dist.distance(a, b),
            Self::L2 => L2Dist.distance(a, b),
            Self::Cosine => CosineDist.distance(a, b),
        }
    }
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;
    use ndarray::arr1;

    use super::*;

    fn dist_test(dist: Metric, result: f64) {
        let a = arr1(&[0.5, 6.6]);
        let b = arr1(&[4.4, 3.0]);
        let ab = dist.distance(a.view(), b.view()).unwrap();
        assert_abs_diff_eq!(ab, result, epsilon = 1e-3);

        // Symmetry
        let ba = dist.distance(b.view(), a.view()).unwrap();
        assert_abs_diff_eq!(ab, ba);

        // Triangle inequality
        let c = arr1(&[-4.5, 3.3]);
        let bc = dist.distance(b.view(), c.view()).unwrap();
        let ac = dist.distance(a.view(), c.view()).unwrap();
        assert!(ab + bc > ac)
    }

    #[test]
    fn l1_dist() {
        dist_test(Metric::L1, 7.5);
    }

    #[test]
    fn l2_dist() {
        dist_test(Metric::L2, 5.3075);
    }

    #[test]
    fn cosine_dist() {
        let a = arr1(&[1.0, 0.0]);
        let b = arr1(&[0.0, 2.0]);
        let c = arr1(&[-3.0, 0.0]);
        assert_abs_diff_eq!(CosineDist.distance(a.view(), b.view()).unwrap(), 1.0);
        assert_abs_diff_eq!(CosineDist.distance(a.view(), c.view()).unwrap(), 2.0);
        assert_abs_diff_eq!(CosineDist.distance(a.view(), a.view()).unwrap(), 0.0);

        // Parallel vectors of different length are identical under cosine
        let d = arr1(&[5.0, 0.0]);
        assert_abs_diff_eq!(CosineDist.distance(a.view(), d.view()).unwrap(), 0.0);
    }

    #[test]
    fn cosine_zero_vectors() {
        let zero = arr1(&[0.0f64, 0.0]);
        let a = arr1(&[1.0, 1.0]);
        assert_eq!(CosineDist.distance(zero.view(), zero.view()), None);
        assert_eq!(CosineDist.distance(zero.view(), a.view()), Some(1.0));
        assert_eq!(CosineDist.distance(a.view(), zero.view()), Some(1.0));
    }

    #[test]
    fn unequal_dimension() {
        let a = arr1(&[1.0f64, 2.0]);
        let b = arr1(&[1.0, 2.0, 3.0]);
        for metric in [Metric::L1, Metric::L2, Metric::Cosine] {
            assert_eq!(metric.distance(a.view(), b.view()), None);
        }
    }

    #[test]
    fn parse_metric_names() {
        assert_eq!("l1".parse::<Metric>().unwrap(), Metric::L1);
        assert_eq!("Manhattan".parse::<Metric>().unwrap(), Metric::L1);
        assert_eq!("l2".parse::<Metric>().unwrap(), Metric::L2);
        assert_eq!("EUCLIDEAN".parse::<Metric>().unwrap(), Metric::L2);
        assert_eq!("cosine".parse::<Metric>().unwrap(), Metric::Cosine);

        for name in Metric::NAMES.iter() {
            assert!(name.parse::<Metric>().is_ok());
        }

        let res = "chebyshev".parse::<Metric>();
        assert_eq!(res, Err(DrrError::UnsupportedMetric("chebyshev".into())));
    }

    #[test]
    fn display_is_canonical() {
        assert_eq!(Metric::L1.to_string(), "l1");
        assert_eq!("euclidean".parse::<Metric>().unwrap().to_string(), "l2");
        assert_eq!(Metric::default(), Metric::L1);
    }
}
