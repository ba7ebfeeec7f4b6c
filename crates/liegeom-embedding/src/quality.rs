//! Fidelity of an embedding with respect to the source distances.
//!
//! Only the strict upper triangle of both distance matrices is compared.
//! With `δ` the source distances and `d` the Euclidean distances between
//! embedded rows:
//!
//! ```text
//! normalized stress = sqrt( Σ (δ − d)² / Σ δ² )
//! mean distortion   = mean |δ − d|
//! max distortion    = max  |δ − d|
//! ```
//!
//! When every source distance is equal (for instance the vertices of a
//! regular simplex) the correlations are undefined. A perfect embedding of
//! such input, whose embedded distances equal the common source distance, is
//! reported with both correlations at 1.0; any other embedding of it is
//! rejected.

use liegeom_core::{
    distance::DistanceMatrix,
    error::{LieError, Result},
    types::{constants, DMatrix},
    validation::check_finite,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Summary statistics comparing embedded and source distances.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EmbeddingQuality {
    /// Linear correlation of the pairwise distances, in [−1, 1].
    pub pearson_correlation: f64,
    /// Rank correlation of the pairwise distances, in [−1, 1].
    pub spearman_correlation: f64,
    /// Root of the squared residuals relative to the squared source distances.
    pub normalized_stress: f64,
    /// Mean absolute residual.
    pub mean_distortion: f64,
    /// Largest absolute residual.
    pub max_distortion: f64,
}

/// Euclidean distances between the rows of `points`.
pub fn pairwise_euclidean(points: &DMatrix<f64>) -> DMatrix<f64> {
    let n = points.nrows();
    let mut dist = DMatrix::<f64>::zeros(n, n);
    for i in 0..n {
        for j in (i + 1)..n {
            let d = (points.row(i) - points.row(j)).norm();
            dist[(i, j)] = d;
            dist[(j, i)] = d;
        }
    }
    dist
}

/// Euclidean distances between the rows of `points` as a [`DistanceMatrix`].
///
/// # Errors
///
/// - `InvalidInput`: if a coordinate is not finite
pub fn euclidean_distance_matrix(points: &DMatrix<f64>) -> Result<DistanceMatrix> {
    DistanceMatrix::from_matrix(pairwise_euclidean(points))
}

/// Compares the row distances of `embedding` with `distances`.
///
/// # Errors
///
/// - `InvalidDimension`: if the row count differs from the matrix size
/// - `NumericalError`: if the embedding has non-finite coordinates, there
///   are fewer than 2 pairs, all source distances are zero, or exactly one
///   of the two distance sets is constant or both are constant but unequal
pub fn analyze_embedding_quality(
    embedding: &DMatrix<f64>,
    distances: &DistanceMatrix,
) -> Result<EmbeddingQuality> {
    check_finite(embedding, "embedding")?;
    if embedding.nrows() != distances.len() {
        return Err(LieError::dimension_mismatch(
            format!("{} embedded rows", distances.len()),
            format!("{}", embedding.nrows()),
        ));
    }

    let embedded = pairwise_euclidean(embedding);
    let n = distances.len();
    let mut source = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    let mut target = Vec::with_capacity(source.capacity());
    for i in 0..n {
        for j in (i + 1)..n {
            source.push(distances.get(i, j));
            target.push(embedded[(i, j)]);
        }
    }

    if source.len() < 2 {
        return Err(LieError::numerical_error(format!(
            "quality analysis requires at least 2 pairs, got {}",
            source.len()
        )));
    }

    let source_energy: f64 = source.iter().map(|d| d * d).sum();
    if source_energy == 0.0 {
        return Err(LieError::numerical_error(
            "all source distances are zero",
        ));
    }

    let residuals: Vec<f64> = source
        .iter()
        .zip(target.iter())
        .map(|(s, t)| (s - t).abs())
        .collect();
    let residual_energy: f64 = residuals.iter().map(|r| r * r).sum();

    let (pearson, spearman) = if is_constant(&source) && is_constant(&target) {
        let (mean_s, mean_t) = (mean(&source), mean(&target));
        if (mean_s - mean_t).abs() > constants::CONSTANT_VARIANCE.sqrt() * mean_s {
            return Err(LieError::numerical_error(format!(
                "correlation is undefined between constant distances {} and {}",
                mean_s, mean_t
            )));
        }
        (1.0, 1.0)
    } else {
        (
            pearson_correlation(&source, &target)?,
            spearman_correlation(&source, &target)?,
        )
    };

    let quality = EmbeddingQuality {
        pearson_correlation: pearson,
        spearman_correlation: spearman,
        normalized_stress: (residual_energy / source_energy).sqrt(),
        mean_distortion: residuals.iter().sum::<f64>() / residuals.len() as f64,
        max_distortion: residuals.iter().copied().fold(0.0, f64::max),
    };
    tracing::debug!(
        pairs = source.len(),
        pearson = quality.pearson_correlation,
        stress = quality.normalized_stress,
        "embedding quality"
    );
    Ok(quality)
}

/// Pearson correlation, clamped to [−1, 1].
///
/// # Errors
///
/// - `InvalidDimension`: if the slices differ in length
/// - `NumericalError`: if there are fewer than 2 values or either side has
///   zero variance relative to its magnitude
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(LieError::dimension_mismatch(x.len(), y.len()));
    }
    if x.len() < 2 {
        return Err(LieError::numerical_error(
            "correlation requires at least 2 values",
        ));
    }

    if is_constant(x) || is_constant(y) {
        return Err(LieError::numerical_error(
            "correlation is undefined for constant input",
        ));
    }

    let (mean_x, mean_y) = (mean(x), mean(y));
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y.iter()) {
        let (dx, dy) = (a - mean_x, b - mean_y);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    Ok((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Whether the spread of `values` is rounding noise relative to their size.
fn is_constant(values: &[f64]) -> bool {
    let m = mean(values);
    let centred: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    let raw: f64 = values.iter().map(|v| v * v).sum();
    centred <= constants::CONSTANT_VARIANCE * raw
}

/// Spearman rank correlation with average ranks for ties.
pub fn spearman_correlation(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(LieError::dimension_mismatch(x.len(), y.len()));
    }
    pearson_correlation(&average_ranks(x), &average_ranks(y))
}

/// 1-based ranks; tied values share the mean of their positions.
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // positions start..end hold ranks start+1 ..= end
        let rank = (start + end + 1) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = rank;
        }
        start = end;
    }
    ranks
}
