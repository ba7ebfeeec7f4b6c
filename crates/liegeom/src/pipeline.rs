//! End-to-end runs from Haar samples to embeddings and alcove coordinates.
//!
//! ```rust,no_run
//! use liegeom::pipeline::{run_embedding_pipeline, PipelineConfig};
//!
//! let output = run_embedding_pipeline(&PipelineConfig::default())?;
//! println!("stress = {:.3}", output.quality.normalized_stress);
//! # Ok::<(), liegeom::LieError>(())
//! ```

use liegeom_core::{
    config::ParallelConfig,
    distance::{DistanceMatrix, DistanceMatrixBuilder},
    error::{LieError, Result},
    sampling::HaarSampler,
    types::{DMatrix, Embedding, GroupElement},
};
use liegeom_embedding::{
    engine::{embed, EmbeddingInput},
    method::{EmbeddingMethod, DEFAULT_NEIGHBORS},
    quality::{analyze_embedding_quality, EmbeddingQuality},
};
use liegeom_structure::alcove::alcove_coords_batch;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of SU(3) samples drawn for an alcove picture.
pub const DEFAULT_ALCOVE_SAMPLES: usize = 5000;

/// User-facing settings of [`run_embedding_pipeline`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PipelineConfig {
    /// Number of group elements to sample.
    pub samples: usize,
    /// Matrix size n of SU(n).
    pub dimension: usize,
    /// Embedding method name, parsed as an [`EmbeddingMethod`].
    pub method: String,
    /// Target dimension of the embedding.
    pub n_components: usize,
    /// Neighbor count of the graph-geodesic method.
    pub n_neighbors: usize,
    /// Seed for sampling and for scaling starts.
    pub seed: u64,
    /// Parallel settings of the distance computation.
    pub parallel: ParallelConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            samples: 400,
            dimension: 4,
            method: "isomap".to_string(),
            n_components: 2,
            n_neighbors: DEFAULT_NEIGHBORS,
            seed: 42,
            parallel: ParallelConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Default configuration: 400 samples of SU(4), isomap into 2 dimensions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sample count.
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Set the matrix size.
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    /// Set the embedding method name.
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Set the target dimension.
    pub fn with_n_components(mut self, n_components: usize) -> Self {
        self.n_components = n_components;
        self
    }

    /// Set the neighbor count.
    pub fn with_n_neighbors(mut self, n_neighbors: usize) -> Self {
        self.n_neighbors = n_neighbors;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replace the parallel settings.
    pub fn with_parallel_config(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// The configured method with this configuration's neighbor count and seed.
    ///
    /// # Errors
    ///
    /// - `UnknownMethod`: if `method` is not a recognised name
    pub fn embedding_method(&self) -> Result<EmbeddingMethod> {
        Ok(match self.method.parse::<EmbeddingMethod>()? {
            EmbeddingMethod::GraphGeodesic { .. } => {
                EmbeddingMethod::graph_geodesic(self.n_neighbors)
            }
            EmbeddingMethod::Scaling(options) => {
                EmbeddingMethod::Scaling(options.with_seed(self.seed))
            }
            EmbeddingMethod::Linear => EmbeddingMethod::Linear,
        })
    }

    /// Checks the settings without running anything.
    pub fn validate(&self) -> Result<()> {
        self.embedding_method()?;
        if self.dimension == 0 {
            return Err(LieError::invalid_dimension("dimension must be at least 1"));
        }
        if self.samples < 2 {
            return Err(LieError::invalid_dimension(format!(
                "pipeline needs at least 2 samples, got {}",
                self.samples
            )));
        }
        if self.n_components == 0 {
            return Err(LieError::invalid_dimension("n_components must be at least 1"));
        }
        Ok(())
    }
}

/// Everything computed by [`run_embedding_pipeline`].
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Sampled SU(n) elements in sampling order.
    pub elements: Vec<GroupElement>,
    /// Bi-invariant distances between the elements.
    pub distances: DistanceMatrix,
    /// One row per element.
    pub embedding: Embedding,
    /// Fidelity of the embedding to `distances`.
    pub quality: EmbeddingQuality,
}

/// Sample, measure, embed and score.
///
/// # Errors
///
/// Any error of the configuration check, the sampler, the distance builder,
/// the embedding or the quality analysis.
pub fn run_embedding_pipeline(config: &PipelineConfig) -> Result<PipelineOutput> {
    config.validate()?;
    let method = config.embedding_method()?;

    let elements = HaarSampler::from_seed(config.seed).su_batch(config.dimension, config.samples)?;
    let distances = DistanceMatrixBuilder::bi_invariant()
        .with_parallel_config(config.parallel.clone())
        .build(&elements)?;

    let input = if method.uses_distances() {
        EmbeddingInput::Distances(&distances)
    } else {
        EmbeddingInput::Elements(&elements)
    };
    let embedding = embed(input, &method, config.n_components)?;
    let quality = analyze_embedding_quality(&embedding, &distances)?;

    tracing::info!(
        samples = config.samples,
        dimension = config.dimension,
        method = %method,
        pearson = quality.pearson_correlation,
        spearman = quality.spearman_correlation,
        stress = quality.normalized_stress,
        "embedding pipeline finished"
    );

    Ok(PipelineOutput {
        elements,
        distances,
        embedding,
        quality,
    })
}

/// SU(3) alcove coordinates of `samples` Haar-random elements, one row each.
pub fn run_alcove_pipeline(samples: usize, seed: u64) -> Result<DMatrix<f64>> {
    let elements = HaarSampler::from_seed(seed).su_batch(3, samples)?;
    let coords = alcove_coords_batch(&elements)?;
    tracing::info!(samples, "alcove pipeline finished");
    Ok(coords)
}

/// [`run_alcove_pipeline`] with [`DEFAULT_ALCOVE_SAMPLES`] samples.
pub fn run_default_alcove_pipeline(seed: u64) -> Result<DMatrix<f64>> {
    run_alcove_pipeline(DEFAULT_ALCOVE_SAMPLES, seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_matches_reference_run() {
        let config = PipelineConfig::default();
        assert_eq!(config.samples, 400);
        assert_eq!(config.dimension, 4);
        assert_eq!(config.method, "isomap");
        assert_eq!(config.n_components, 2);
        assert_eq!(config.n_neighbors, 12);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_method_picks_up_options() {
        let config = PipelineConfig::new().with_method("MDS").with_seed(7);
        match config.embedding_method().unwrap() {
            EmbeddingMethod::Scaling(options) => assert_eq!(options.seed, 7),
            other => panic!("unexpected {:?}", other),
        }
        let config = PipelineConfig::new().with_n_neighbors(5);
        assert_eq!(
            config.embedding_method().unwrap(),
            EmbeddingMethod::graph_geodesic(5)
        );
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            PipelineConfig::new().with_method("lle").validate(),
            Err(LieError::UnknownMethod { .. })
        ));
        assert!(matches!(
            PipelineConfig::new().with_samples(1).validate(),
            Err(LieError::InvalidDimension { .. })
        ));
        assert!(matches!(
            PipelineConfig::new().with_dimension(0).validate(),
            Err(LieError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_small_alcove_run() {
        let coords = run_alcove_pipeline(25, 1).unwrap();
        assert_eq!(coords.shape(), (25, 2));
        assert!(coords.iter().all(|&c| c >= 0.0));
    }

    #[test]
    fn test_default_alcove_run_size() {
        let coords = run_default_alcove_pipeline(42).unwrap();
        assert_eq!(coords.shape(), (DEFAULT_ALCOVE_SAMPLES, 2));
        assert_eq!(coords.row(3), run_alcove_pipeline(4, 42).unwrap().row(3));
    }
}
