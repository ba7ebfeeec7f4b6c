//! Pairwise distance matrices over collections of group elements.
//!
//! Only the strict upper triangle is evaluated; it is mirrored into the lower
//! triangle and the diagonal stays zero without calling the metric. The pair
//! evaluations are independent and run on the rayon pool when the `parallel`
//! feature is enabled and the workload passes [`ParallelConfig`]'s threshold.

use crate::{
    config::ParallelConfig,
    error::{LieError, Result},
    metric::{BiInvariantMetric, GroupMetric},
    types::{constants, DMatrix, GroupElement},
    validation::check_same_shape,
};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Symmetric, zero-diagonal, non-negative matrix of pairwise distances.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DistanceMatrix {
    data: DMatrix<f64>,
}

impl DistanceMatrix {
    /// Wraps an existing matrix after validating the distance-matrix invariants.
    ///
    /// # Errors
    ///
    /// - `InvalidDimension`: if the matrix is not square
    /// - `InvalidInput`: if it is asymmetric, has a non-zero diagonal, or has
    ///   negative or non-finite entries beyond the fixed tolerances
    pub fn from_matrix(data: DMatrix<f64>) -> Result<Self> {
        let n = crate::validation::check_square(&data)?;
        for i in 0..n {
            let diag = data[(i, i)];
            if !diag.is_finite() || diag.abs() > constants::NON_NEGATIVITY_TOLERANCE {
                return Err(LieError::invalid_input(format!(
                    "diagonal entry ({}, {}) = {} is not zero",
                    i, i, diag
                )));
            }
            for j in (i + 1)..n {
                let (a, b) = (data[(i, j)], data[(j, i)]);
                if !a.is_finite() || !b.is_finite() {
                    return Err(LieError::invalid_input(format!(
                        "entry ({}, {}) is not finite",
                        i, j
                    )));
                }
                if (a - b).abs() > constants::SYMMETRY_TOLERANCE {
                    return Err(LieError::invalid_input(format!(
                        "asymmetric entries ({}, {}) = {} and ({}, {}) = {}",
                        i, j, a, j, i, b
                    )));
                }
                if a < -constants::NON_NEGATIVITY_TOLERANCE {
                    return Err(LieError::invalid_input(format!(
                        "negative distance {} at ({}, {})",
                        a, i, j
                    )));
                }
            }
        }
        Ok(Self { data })
    }

    /// Number of elements the matrix covers.
    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    /// Whether the matrix covers no elements.
    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    /// Distance between elements `i` and `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[(i, j)]
    }

    /// Borrow the underlying matrix.
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    /// Consume into the underlying matrix.
    pub fn into_inner(self) -> DMatrix<f64> {
        self.data
    }

    /// Strict upper-triangle entries in row-major order `(0,1), (0,2), …, (1,2), …`.
    pub fn upper_triangle(&self) -> Vec<f64> {
        let n = self.len();
        let mut values = Vec::with_capacity(n * n.saturating_sub(1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                values.push(self.data[(i, j)]);
            }
        }
        values
    }

    /// Largest pairwise distance, zero for fewer than two elements.
    pub fn max_distance(&self) -> f64 {
        self.data.iter().copied().fold(0.0, f64::max)
    }
}

/// Builds distance matrices with an injectable metric.
pub struct DistanceMatrixBuilder<'a, M: GroupMetric + ?Sized = BiInvariantMetric> {
    metric: &'a M,
    parallel: ParallelConfig,
}

impl DistanceMatrixBuilder<'static, BiInvariantMetric> {
    /// Builder using the bi-invariant metric.
    pub fn bi_invariant() -> Self {
        Self::new(&BiInvariantMetric)
    }
}

impl<'a, M: GroupMetric + ?Sized> DistanceMatrixBuilder<'a, M> {
    /// Builder using the given metric.
    pub fn new(metric: &'a M) -> Self {
        Self {
            metric,
            parallel: ParallelConfig::default(),
        }
    }

    /// Replace the parallel execution settings.
    pub fn with_parallel_config(mut self, config: ParallelConfig) -> Self {
        self.parallel = config;
        self
    }

    /// Computes the full symmetric distance matrix for `elements`.
    ///
    /// # Errors
    ///
    /// - `InvalidDimension`: if the elements do not all share one shape
    /// - `NumericalError`: if the metric returns a NaN or clearly negative value
    /// - any error returned by the metric itself
    pub fn build(&self, elements: &[GroupElement]) -> Result<DistanceMatrix> {
        let k = elements.len();
        if let Some(first) = elements.first() {
            for element in &elements[1..] {
                check_same_shape(first, element)?;
            }
        }

        let pairs: Vec<(usize, usize)> = (0..k)
            .flat_map(|i| ((i + 1)..k).map(move |j| (i, j)))
            .collect();

        tracing::debug!(
            elements = k,
            pairs = pairs.len(),
            metric = self.metric.name(),
            "building distance matrix"
        );

        let values = self.evaluate_pairs(elements, &pairs)?;

        let mut data = DMatrix::<f64>::zeros(k, k);
        for (&(i, j), &d) in pairs.iter().zip(values.iter()) {
            let d = sanitize_distance(d, i, j)?;
            data[(i, j)] = d;
            data[(j, i)] = d;
        }
        Ok(DistanceMatrix { data })
    }

    fn evaluate_pairs(&self, elements: &[GroupElement], pairs: &[(usize, usize)]) -> Result<Vec<f64>> {
        if self.parallel.should_parallelize(pairs.len()) {
            return self.evaluate_pairs_parallel(elements, pairs);
        }
        pairs
            .iter()
            .map(|&(i, j)| self.metric.distance(&elements[i], &elements[j]))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn evaluate_pairs_parallel(
        &self,
        elements: &[GroupElement],
        pairs: &[(usize, usize)],
    ) -> Result<Vec<f64>> {
        pairs
            .par_iter()
            .map(|&(i, j)| self.metric.distance(&elements[i], &elements[j]))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate_pairs_parallel(
        &self,
        elements: &[GroupElement],
        pairs: &[(usize, usize)],
    ) -> Result<Vec<f64>> {
        pairs
            .iter()
            .map(|&(i, j)| self.metric.distance(&elements[i], &elements[j]))
            .collect()
    }
}

fn sanitize_distance(d: f64, i: usize, j: usize) -> Result<f64> {
    if d.is_nan() || d.is_infinite() {
        return Err(LieError::numerical_error(format!(
            "metric returned {} for pair ({}, {})",
            d, i, j
        )));
    }
    if d < -constants::NON_NEGATIVITY_TOLERANCE {
        return Err(LieError::numerical_error(format!(
            "metric returned negative distance {} for pair ({}, {})",
            d, i, j
        )));
    }
    if d < 0.0 {
        tracing::warn!(pair = ?(i, j), value = d, "clamping negative rounding in distance");
        return Ok(0.0);
    }
    Ok(d)
}

/// Distance matrix under the bi-invariant metric.
pub fn compute_distance_matrix(elements: &[GroupElement]) -> Result<DistanceMatrix> {
    DistanceMatrixBuilder::bi_invariant().build(elements)
}

/// Distance matrix under an injected metric.
pub fn compute_distance_matrix_with<M: GroupMetric + ?Sized>(
    elements: &[GroupElement],
    metric: &M,
) -> Result<DistanceMatrix> {
    DistanceMatrixBuilder::new(metric).build(elements)
}
