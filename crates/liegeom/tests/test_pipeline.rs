//! Cross-crate runs of the sampling, embedding and structure pipelines.

use approx::assert_relative_eq;
use liegeom::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn test_su3_isomap_end_to_end() {
    let config = PipelineConfig::new()
        .with_samples(20)
        .with_dimension(3)
        .with_method("isomap")
        .with_n_neighbors(12)
        .with_seed(7);
    let output = run_embedding_pipeline(&config).unwrap();

    assert_eq!(output.elements.len(), 20);
    assert_eq!(output.distances.len(), 20);
    assert_eq!(output.embedding.shape(), (20, 2));
    assert!(output.embedding.iter().all(|x| !x.is_nan()));

    let q = output.quality;
    assert!(q.normalized_stress >= 0.0);
    assert!((-1.0..=1.0).contains(&q.pearson_correlation));
    assert!((-1.0..=1.0).contains(&q.spearman_correlation));
}

#[test]
fn test_every_method_runs() {
    for method in ["isomap", "mds", "pca"] {
        let config = PipelineConfig::new()
            .with_samples(24)
            .with_dimension(2)
            .with_method(method)
            .with_n_components(3);
        let output = run_embedding_pipeline(&config).unwrap();
        assert_eq!(output.embedding.shape(), (24, 3), "method {}", method);
    }
}

#[test]
fn test_output_is_consistent_with_its_parts() {
    let config = PipelineConfig::new()
        .with_samples(12)
        .with_dimension(3)
        .with_method("mds");
    let output = run_embedding_pipeline(&config).unwrap();

    for i in 0..12 {
        for j in 0..12 {
            let d = bi_invariant_distance(&output.elements[i], &output.elements[j]).unwrap();
            assert_relative_eq!(output.distances.get(i, j), d, epsilon = 1e-12);
        }
    }

    let q = analyze_embedding_quality(&output.embedding, &output.distances).unwrap();
    assert_relative_eq!(q.pearson_correlation, output.quality.pearson_correlation, epsilon = 1e-12);
    assert_relative_eq!(q.normalized_stress, output.quality.normalized_stress, epsilon = 1e-12);
}

#[test]
fn test_pipeline_is_reproducible() {
    let config = PipelineConfig::new()
        .with_samples(16)
        .with_dimension(3)
        .with_method("mds");
    let a = run_embedding_pipeline(&config).unwrap();
    let b = run_embedding_pipeline(&config).unwrap();
    assert_eq!(a.distances, b.distances);
    assert_eq!(a.embedding, b.embedding);
}

#[test]
fn test_sequential_and_parallel_runs_agree() {
    let base = PipelineConfig::new().with_samples(18).with_dimension(3);
    let seq = run_embedding_pipeline(&base.clone().with_parallel_config(ParallelConfig::sequential()))
        .unwrap();
    let par = run_embedding_pipeline(
        &base.with_parallel_config(ParallelConfig::new().with_min_pairs(1)),
    )
    .unwrap();
    assert_eq!(seq.distances, par.distances);
    assert_eq!(seq.embedding, par.embedding);
}

#[test]
fn test_unknown_method_fails_before_sampling() {
    let config = PipelineConfig::new().with_method("diffusion-map").with_samples(0);
    assert!(matches!(
        run_embedding_pipeline(&config),
        Err(LieError::UnknownMethod { .. })
    ));
}

#[test]
fn test_alcove_and_weyl_chamber_agree() {
    let coords = run_alcove_pipeline(10, 3).unwrap();
    let elements = HaarSampler::from_seed(3).su_batch(3, 10).unwrap();
    for (row, u) in coords.row_iter().zip(elements.iter()) {
        let chamber = weyl_chamber_projection(u, CartanType::A).unwrap();
        assert_eq!(row.transpose(), chamber);
    }
}

#[cfg(feature = "serde")]
#[test]
fn test_config_serde_roundtrip() {
    let config = PipelineConfig::new().with_method("pca").with_seed(9);
    let json = serde_json::to_string(&config).unwrap();
    let back: PipelineConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
