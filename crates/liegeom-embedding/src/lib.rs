//! Low-dimensional embeddings of Lie group samples.
//!
//! Three families of embedding are available behind a single dispatcher:
//!
//! - **Graph geodesic** (Isomap): shortest paths on a symmetric
//!   k-nearest-neighbor graph, then classical scaling
//! - **Scaling** (metric MDS): SMACOF stress minimization from seeded starts
//! - **Linear** (PCA): principal components of the flattened matrix entries
//!
//! The [`quality`] module measures how faithfully an embedding reproduces the
//! source distances.
//!
//! # Modules
//!
//! - [`engine`]: [`embed`](engine::embed) and the string-keyed entry points
//! - [`graph`]: Neighbor graphs, Dijkstra and connected components
//! - [`linear`]: Principal component projection
//! - [`method`]: The [`EmbeddingMethod`](method::EmbeddingMethod) selector
//! - [`quality`]: Correlation, stress and distortion of an embedding
//! - [`scaling`]: Classical and SMACOF scaling

pub mod engine;
pub mod graph;
pub mod linear;
pub mod method;
pub mod quality;
pub mod scaling;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::engine::{
        embed, embed_with_metric, geodesic_embedding, isomap_embedding, EmbeddingInput,
    };
    pub use crate::graph::{graph_geodesic_distances, NeighborGraph};
    pub use crate::linear::linear_projection;
    pub use crate::method::{EmbeddingMethod, DEFAULT_NEIGHBORS};
    pub use crate::quality::{
        analyze_embedding_quality, euclidean_distance_matrix, EmbeddingQuality,
    };
    pub use crate::scaling::{classical_scaling, smacof, stress_scaling, ScalingOptions};
}
