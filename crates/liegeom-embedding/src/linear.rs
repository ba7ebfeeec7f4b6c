//! Principal component projection of flattened group elements.
//!
//! Each n×n element becomes a real feature vector of length 2n²: the real
//! parts of its entries in row-major order, followed by the imaginary parts
//! in the same order. Features are centred and the scores `U_k Σ_k` of the
//! top `k` singular directions are returned. Each axis is signed so that the
//! largest-magnitude entry of its left singular vector is positive.

use crate::scaling::dominant_sign;
use liegeom_core::{
    error::{LieError, Result},
    types::{constants, DMatrix, Embedding, GroupElement},
    validation::check_same_shape,
};

/// Real feature matrix, one row per element.
///
/// # Errors
///
/// - `InvalidDimension`: if the elements do not all share one shape
pub fn flatten_elements(elements: &[GroupElement]) -> Result<DMatrix<f64>> {
    let Some(first) = elements.first() else {
        return Ok(DMatrix::zeros(0, 0));
    };
    for element in &elements[1..] {
        check_same_shape(first, element)?;
    }

    let (rows, cols) = first.shape();
    let width = rows * cols;
    let mut features = DMatrix::<f64>::zeros(elements.len(), 2 * width);
    for (k, element) in elements.iter().enumerate() {
        for i in 0..rows {
            for j in 0..cols {
                let z = element[(i, j)];
                features[(k, i * cols + j)] = z.re;
                features[(k, width + i * cols + j)] = z.im;
            }
        }
    }
    Ok(features)
}

/// Projects elements onto their top `n_components` principal axes.
///
/// # Errors
///
/// - `InvalidDimension`: if there are fewer than 2 elements, shapes differ,
///   or `n_components` is zero or exceeds `min(elements, features)`
/// - `NumericalError`: if the SVD does not converge
pub fn linear_projection(elements: &[GroupElement], n_components: usize) -> Result<Embedding> {
    if elements.len() < 2 {
        return Err(LieError::invalid_dimension(format!(
            "linear projection requires at least 2 elements, got {}",
            elements.len()
        )));
    }
    let features = flatten_elements(elements)?;
    principal_scores(features, n_components)
}

/// Principal component scores of the rows of a real feature matrix.
pub fn principal_scores(mut features: DMatrix<f64>, n_components: usize) -> Result<Embedding> {
    let (samples, width) = features.shape();
    let rank_bound = samples.min(width);
    if n_components == 0 || n_components > rank_bound {
        return Err(LieError::invalid_dimension(format!(
            "n_components must be in 1..={}, got {}",
            rank_bound, n_components
        )));
    }

    for mut column in features.column_iter_mut() {
        let mean = column.mean();
        column.add_scalar_mut(-mean);
    }

    let svd = features
        .try_svd(
            true,
            false,
            constants::SOLVER_EPSILON,
            constants::SOLVER_MAX_ITERATIONS,
        )
        .ok_or_else(|| LieError::numerical_error("SVD did not converge in linear projection"))?;
    let u = svd
        .u
        .ok_or_else(|| LieError::numerical_error("SVD did not return left singular vectors"))?;

    let mut order: Vec<usize> = (0..svd.singular_values.len()).collect();
    order.sort_by(|&a, &b| svd.singular_values[b].total_cmp(&svd.singular_values[a]));

    let mut scores = Embedding::zeros(samples, n_components);
    for (axis, &idx) in order.iter().take(n_components).enumerate() {
        let sigma = svd.singular_values[idx];
        let vector = u.column(idx);
        let sign = dominant_sign(vector.iter().copied());
        for i in 0..samples {
            scores[(i, axis)] = sign * sigma * vector[i];
        }
    }

    tracing::debug!(samples, features = width, n_components, "linear projection");
    Ok(scores)
}
