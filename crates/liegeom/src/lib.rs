//! # liegeom
//!
//! Geometry of compact matrix Lie groups, principally SU(n): Haar sampling,
//! a branch-consistent matrix logarithm, the bi-invariant distance, manifold
//! embeddings of samples, Weyl alcove coordinates and the Cartan, polar and
//! Iwasawa decompositions.
//!
//! ## Quick Start
//!
//! ```rust
//! use liegeom::prelude::*;
//!
//! let elements = HaarSampler::from_seed(42).su_batch(3, 20)?;
//! let (coords, distances) = isomap_embedding(&elements, 2, 12)?;
//! let quality = analyze_embedding_quality(&coords, &distances)?;
//! assert!(quality.normalized_stress >= 0.0);
//!
//! let alcove = sun_alcove_coords(&elements[0])?;
//! assert_eq!(alcove.len(), 2);
//! # Ok::<(), LieError>(())
//! ```
//!
//! ## Crates
//!
//! - [`liegeom_core`]: sampling, logarithm, metric and distance matrices
//! - [`embedding`]: graph-geodesic, scaling and linear embeddings with quality analysis
//! - [`structure`]: alcoves, Cartan types and matrix decompositions
//!
//! ## Features
//!
//! - `parallel` (default): evaluate distance matrices on the rayon pool
//! - `serde`: serialization of configurations and results

pub use liegeom_core::{config, distance, error, logarithm, metric, sampling, types, validation};
pub use liegeom_core::{LieError, Result};
pub use liegeom_embedding as embedding;
pub use liegeom_structure as structure;

pub mod pipeline;

/// Re-export of nalgebra for convenience
pub use nalgebra;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use liegeom_core::prelude::*;
    pub use liegeom_embedding::prelude::*;
    pub use liegeom_structure::prelude::*;

    pub use crate::pipeline::{
        run_alcove_pipeline, run_default_alcove_pipeline, run_embedding_pipeline, PipelineConfig,
        PipelineOutput, DEFAULT_ALCOVE_SAMPLES,
    };
}
