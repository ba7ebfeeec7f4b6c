//! Dispatch from an [`EmbeddingMethod`] to the matching algorithm.
//!
//! Group elements are converted to a bi-invariant [`DistanceMatrix`] (or one
//! under an injected [`GroupMetric`]) whenever the selected method works on
//! distances. A precomputed distance matrix is used as is.
//!
//! ```rust
//! use liegeom_core::sampling::HaarSampler;
//! use liegeom_embedding::engine::{embed, EmbeddingInput};
//! use liegeom_embedding::method::EmbeddingMethod;
//!
//! let elements = HaarSampler::from_seed(1).su_batch(2, 16)?;
//! let coords = embed(EmbeddingInput::from(&elements[..]), &EmbeddingMethod::Linear, 2)?;
//! assert_eq!(coords.shape(), (16, 2));
//! # Ok::<(), liegeom_core::LieError>(())
//! ```

use crate::{
    graph::graph_geodesic_distances,
    linear::linear_projection,
    method::EmbeddingMethod,
    scaling::{classical_scaling, stress_scaling},
};
use liegeom_core::{
    distance::{compute_distance_matrix, compute_distance_matrix_with, DistanceMatrix},
    error::{LieError, Result},
    metric::{BiInvariantMetric, GroupMetric},
    types::{Embedding, GroupElement},
    validation::check_finite,
};
use std::borrow::Cow;

/// What an embedding is computed from.
#[derive(Debug, Clone, Copy)]
pub enum EmbeddingInput<'a> {
    /// Raw group elements.
    Elements(&'a [GroupElement]),
    /// A precomputed distance matrix.
    Distances(&'a DistanceMatrix),
}

impl<'a> EmbeddingInput<'a> {
    /// Number of points to embed.
    pub fn len(&self) -> usize {
        match self {
            Self::Elements(elements) => elements.len(),
            Self::Distances(d) => d.len(),
        }
    }

    /// Whether there are no points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> From<&'a [GroupElement]> for EmbeddingInput<'a> {
    fn from(elements: &'a [GroupElement]) -> Self {
        Self::Elements(elements)
    }
}

impl<'a> From<&'a Vec<GroupElement>> for EmbeddingInput<'a> {
    fn from(elements: &'a Vec<GroupElement>) -> Self {
        Self::Elements(elements.as_slice())
    }
}

impl<'a> From<&'a DistanceMatrix> for EmbeddingInput<'a> {
    fn from(distances: &'a DistanceMatrix) -> Self {
        Self::Distances(distances)
    }
}

/// Embeds the input with the bi-invariant metric.
///
/// # Errors
///
/// - `InvalidDimension`: fewer than 2 points, or `n_components` out of range
/// - `InvalidInput`: [`EmbeddingMethod::Linear`] given only distances
/// - `DisconnectedNeighborGraph`: graph-geodesic method on a disconnected graph
/// - `NumericalError`: a solver failed or produced non-finite coordinates
pub fn embed(
    input: EmbeddingInput<'_>,
    method: &EmbeddingMethod,
    n_components: usize,
) -> Result<Embedding> {
    embed_with_metric(input, method, n_components, &BiInvariantMetric)
}

/// Embeds the input, measuring element distances with `metric`.
pub fn embed_with_metric<M: GroupMetric + ?Sized>(
    input: EmbeddingInput<'_>,
    method: &EmbeddingMethod,
    n_components: usize,
    metric: &M,
) -> Result<Embedding> {
    if input.len() < 2 {
        return Err(LieError::invalid_dimension(format!(
            "embedding requires at least 2 points, got {}",
            input.len()
        )));
    }
    if n_components == 0 {
        return Err(LieError::invalid_dimension("n_components must be at least 1"));
    }

    tracing::debug!(
        method = method.name(),
        points = input.len(),
        n_components,
        "embedding"
    );

    let embedding = match method {
        EmbeddingMethod::GraphGeodesic { n_neighbors } => {
            let distances = resolve_distances(input, metric)?;
            let geodesics = graph_geodesic_distances(&distances, *n_neighbors)?;
            classical_scaling(&geodesics, n_components)?
        }
        EmbeddingMethod::Scaling(options) => {
            let distances = resolve_distances(input, metric)?;
            stress_scaling(&distances, n_components, options)?
        }
        EmbeddingMethod::Linear => match input {
            EmbeddingInput::Elements(elements) => linear_projection(elements, n_components)?,
            EmbeddingInput::Distances(_) => {
                return Err(LieError::invalid_input(
                    "linear embedding needs group elements, not a distance matrix",
                ))
            }
        },
    };

    check_finite(&embedding, "embedding")?;
    Ok(embedding)
}

fn resolve_distances<'a, M: GroupMetric + ?Sized>(
    input: EmbeddingInput<'a>,
    metric: &M,
) -> Result<Cow<'a, DistanceMatrix>> {
    match input {
        EmbeddingInput::Distances(d) => Ok(Cow::Borrowed(d)),
        EmbeddingInput::Elements(elements) => {
            compute_distance_matrix_with(elements, metric).map(Cow::Owned)
        }
    }
}

/// Embeds elements with a method given by name and its default options.
///
/// # Errors
///
/// - `UnknownMethod`: if `method` is not a recognised name, whatever the input
/// - otherwise as [`embed`]
pub fn geodesic_embedding(
    elements: &[GroupElement],
    method: &str,
    n_components: usize,
) -> Result<Embedding> {
    let method: EmbeddingMethod = method.parse()?;
    embed(EmbeddingInput::Elements(elements), &method, n_components)
}

/// Isomap embedding that also returns the bi-invariant distance matrix.
pub fn isomap_embedding(
    elements: &[GroupElement],
    n_components: usize,
    n_neighbors: usize,
) -> Result<(Embedding, DistanceMatrix)> {
    let distances = compute_distance_matrix(elements)?;
    let embedding = embed(
        EmbeddingInput::Distances(&distances),
        &EmbeddingMethod::graph_geodesic(n_neighbors),
        n_components,
    )?;
    Ok((embedding, distances))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaling::ScalingOptions;
    use liegeom_core::sampling::HaarSampler;

    #[test]
    fn test_unknown_method_before_validation() {
        assert!(matches!(
            geodesic_embedding(&[], "umap", 2),
            Err(LieError::UnknownMethod { .. })
        ));
    }

    #[test]
    fn test_linear_needs_elements() {
        let elements = HaarSampler::from_seed(5).su_batch(2, 6).unwrap();
        let d = compute_distance_matrix(&elements).unwrap();
        assert!(matches!(
            embed(EmbeddingInput::from(&d), &EmbeddingMethod::Linear, 2),
            Err(LieError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_elements_and_distances_agree() {
        let elements = HaarSampler::from_seed(9).su_batch(3, 15).unwrap();
        let d = compute_distance_matrix(&elements).unwrap();
        let method = EmbeddingMethod::graph_geodesic(6);
        let from_elements = embed(EmbeddingInput::from(&elements), &method, 2).unwrap();
        let from_distances = embed(EmbeddingInput::from(&d), &method, 2).unwrap();
        assert_eq!(from_elements, from_distances);
    }

    #[test]
    fn test_injected_metric() {
        let frobenius = |a: &GroupElement, b: &GroupElement| -> Result<f64> { Ok((a - b).norm()) };
        let elements = HaarSampler::from_seed(13).su_batch(2, 8).unwrap();
        let method = EmbeddingMethod::Scaling(ScalingOptions::new().with_n_init(1));
        let coords = embed_with_metric(EmbeddingInput::from(&elements), &method, 2, &frobenius).unwrap();
        assert_eq!(coords.shape(), (8, 2));
    }

    #[test]
    fn test_too_few_points() {
        let elements = HaarSampler::from_seed(1).su_batch(2, 1).unwrap();
        assert!(matches!(
            geodesic_embedding(&elements, "pca", 1),
            Err(LieError::InvalidDimension { .. })
        ));
        let two = HaarSampler::from_seed(1).su_batch(2, 2).unwrap();
        assert!(matches!(
            geodesic_embedding(&two, "isomap", 0),
            Err(LieError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_isomap_returns_distances() {
        let elements = HaarSampler::from_seed(21).su_batch(2, 10).unwrap();
        let (coords, d) = isomap_embedding(&elements, 2, 5).unwrap();
        assert_eq!(coords.shape(), (10, 2));
        assert_eq!(d, compute_distance_matrix(&elements).unwrap());
    }
}
