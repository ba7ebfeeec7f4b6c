//! Tests for the algebraic invariants of sampling and the bi-invariant metric.
//!
//! These checks run over many seeds: unitarity and unit determinant of
//! samples, zero self-distance, symmetry, and left/right invariance.

use approx::assert_relative_eq;
use liegeom_core::prelude::*;
use liegeom_core::validation::{determinant_deviation, unitarity_deviation};
use proptest::prelude::*;

#[test]
fn test_sampled_elements_lie_in_su_n() {
    let mut sampler = HaarSampler::from_seed(2024);
    for n in 2..=6 {
        for _ in 0..10 {
            let u = sampler.su(n).unwrap();
            assert!(unitarity_deviation(&u) < 1e-10, "U†U != I for n = {}", n);
            assert!(determinant_deviation(&u) < 1e-10, "det U != 1 for n = {}", n);
        }
    }
}

#[test]
fn test_distance_matrix_is_a_distance_matrix() {
    let elements = HaarSampler::from_seed(99).su_batch(4, 12).unwrap();
    let d = compute_distance_matrix(&elements).unwrap();
    let m = d.as_matrix();
    assert_relative_eq!((m - m.transpose()).norm(), 0.0, epsilon = 1e-10);
    for i in 0..d.len() {
        assert_eq!(m[(i, i)], 0.0);
    }
    assert!(m.iter().all(|&x| x >= -1e-10));
}

#[test]
fn test_distance_bounded_by_maximal_angle() {
    // every eigenvalue angle is at most π, so d ≤ π √n
    let mut sampler = HaarSampler::from_seed(5);
    for n in 2..=5 {
        let u = sampler.su(n).unwrap();
        let v = sampler.su(n).unwrap();
        let d = bi_invariant_distance(&u, &v).unwrap();
        assert!(d <= std::f64::consts::PI * (n as f64).sqrt() + 1e-12);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_self_distance_is_zero(seed in any::<u64>(), n in 2usize..=5) {
        let u = HaarSampler::from_seed(seed).su(n).unwrap();
        prop_assert!(bi_invariant_distance(&u, &u).unwrap() < 1e-10);
    }

    #[test]
    fn prop_bi_invariance(seed in any::<u64>(), n in 2usize..=4) {
        let mut sampler = HaarSampler::from_seed(seed);
        let u = sampler.su(n).unwrap();
        let v = sampler.su(n).unwrap();
        let w = sampler.su(n).unwrap();

        let d = bi_invariant_distance(&u, &v).unwrap();
        let d_left = bi_invariant_distance(&(&w * &u), &(&w * &v)).unwrap();
        let d_right = bi_invariant_distance(&(&u * &w), &(&v * &w)).unwrap();

        prop_assert!((d_left - d).abs() <= 1e-9 * d.max(1.0));
        prop_assert!((d_right - d).abs() <= 1e-9 * d.max(1.0));
    }

    #[test]
    fn prop_symmetry(seed in any::<u64>()) {
        let mut sampler = HaarSampler::from_seed(seed);
        let u = sampler.su(3).unwrap();
        let v = sampler.su(3).unwrap();
        let d1 = bi_invariant_distance(&u, &v).unwrap();
        let d2 = bi_invariant_distance(&v, &u).unwrap();
        prop_assert!((d1 - d2).abs() <= 1e-9 * d1.max(1.0));
    }
}
