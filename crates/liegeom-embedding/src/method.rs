//! Embedding method selector.

use crate::scaling::ScalingOptions;
use liegeom_core::error::LieError;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default neighbor count of the graph-geodesic method.
pub const DEFAULT_NEIGHBORS: usize = 12;

/// Embedding algorithm together with its options.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EmbeddingMethod {
    /// Isomap: classical scaling of shortest paths on a k-nearest-neighbor graph.
    GraphGeodesic {
        /// Neighbors per point before symmetrization.
        n_neighbors: usize,
    },
    /// Metric MDS by SMACOF stress minimization.
    Scaling(ScalingOptions),
    /// PCA of the flattened matrix entries; needs the elements themselves.
    Linear,
}

impl EmbeddingMethod {
    /// Graph-geodesic method with the given neighbor count.
    pub fn graph_geodesic(n_neighbors: usize) -> Self {
        Self::GraphGeodesic { n_neighbors }
    }

    /// Scaling method with default options.
    pub fn scaling() -> Self {
        Self::Scaling(ScalingOptions::default())
    }

    /// Canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::GraphGeodesic { .. } => "isomap",
            Self::Scaling(_) => "mds",
            Self::Linear => "pca",
        }
    }

    /// Whether the method consumes a distance matrix.
    pub fn uses_distances(&self) -> bool {
        !matches!(self, Self::Linear)
    }
}

impl Default for EmbeddingMethod {
    fn default() -> Self {
        Self::graph_geodesic(DEFAULT_NEIGHBORS)
    }
}

impl fmt::Display for EmbeddingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EmbeddingMethod {
    type Err = LieError;

    /// Parses a method name with default options.
    ///
    /// Accepts `isomap`/`graph-geodesic`, `mds`/`scaling` and `pca`/`linear`,
    /// ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "isomap" | "graph-geodesic" => Ok(Self::default()),
            "mds" | "scaling" => Ok(Self::scaling()),
            "pca" | "linear" => Ok(Self::Linear),
            _ => Err(LieError::unknown_method(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("isomap".parse::<EmbeddingMethod>().unwrap(), EmbeddingMethod::graph_geodesic(12));
        assert_eq!("Graph-Geodesic".parse::<EmbeddingMethod>().unwrap(), EmbeddingMethod::default());
        assert_eq!("MDS".parse::<EmbeddingMethod>().unwrap(), EmbeddingMethod::scaling());
        assert_eq!("scaling".parse::<EmbeddingMethod>().unwrap(), EmbeddingMethod::scaling());
        assert_eq!("pca".parse::<EmbeddingMethod>().unwrap(), EmbeddingMethod::Linear);
        assert_eq!("linear".parse::<EmbeddingMethod>().unwrap(), EmbeddingMethod::Linear);
    }

    #[test]
    fn test_unknown_name() {
        match "tsne".parse::<EmbeddingMethod>() {
            Err(LieError::UnknownMethod { name }) => assert_eq!(name, "tsne"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for method in [EmbeddingMethod::default(), EmbeddingMethod::scaling(), EmbeddingMethod::Linear] {
            assert_eq!(method.to_string().parse::<EmbeddingMethod>().unwrap(), method);
        }
    }
}
