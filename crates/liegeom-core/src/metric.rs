//! Bi-invariant distance on the unitary group.
//!
//! # Mathematical Formula
//!
//! ```text
//! d(U, V) = ‖log(U† V)‖_F = [∑ᵢ θᵢ²]^{1/2}
//! ```
//! where e^{iθᵢ} are the eigenvalues of U† V with θᵢ ∈ (−π, π].
//!
//! Left invariance is exact in exact arithmetic since (WU)†(WV) = U†V.
//! Right invariance follows from (UW)†(VW) = W†(U†V)W being conjugate to
//! U†V, which leaves the eigenvalue angles unchanged.

use crate::{
    error::Result,
    logarithm::log_unitary,
    types::GroupElement,
    validation::{check_same_shape, check_square},
};

/// A distance function between group elements.
///
/// Implemented by [`BiInvariantMetric`] and by any closure
/// `Fn(&GroupElement, &GroupElement) -> Result<f64>`, so builders and
/// embeddings accept alternative metrics.
pub trait GroupMetric: Sync {
    /// Distance between `a` and `b`.
    fn distance(&self, a: &GroupElement, b: &GroupElement) -> Result<f64>;

    /// Human-readable metric name.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> GroupMetric for F
where
    F: Fn(&GroupElement, &GroupElement) -> Result<f64> + Sync,
{
    fn distance(&self, a: &GroupElement, b: &GroupElement) -> Result<f64> {
        self(a, b)
    }
}

/// The bi-invariant metric `‖log(U†V)‖_F`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BiInvariantMetric;

impl GroupMetric for BiInvariantMetric {
    fn distance(&self, a: &GroupElement, b: &GroupElement) -> Result<f64> {
        bi_invariant_distance(a, b)
    }

    fn name(&self) -> &str {
        "bi-invariant"
    }
}

/// Bi-invariant distance between two unitary matrices.
///
/// # Errors
///
/// - `InvalidDimension`: if the inputs are not square or differ in size
/// - `SingularEigenbasis`: if `U†V` has a defective eigenvalue cluster
pub fn bi_invariant_distance(u: &GroupElement, v: &GroupElement) -> Result<f64> {
    check_square(u)?;
    check_same_shape(u, v)?;
    let w = u.adjoint() * v;
    let log_w = log_unitary(&w)?;
    Ok(log_w.norm())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LieError;
    use crate::sampling::HaarSampler;
    use crate::types::C64;
    use approx::assert_relative_eq;
    use nalgebra::DVector;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn test_self_distance_is_zero() {
        let mut sampler = HaarSampler::from_seed(23);
        for n in 2..=5 {
            let u = sampler.su(n).unwrap();
            assert!(bi_invariant_distance(&u, &u).unwrap() < 1e-10);
        }
    }

    #[test]
    fn test_symmetry() {
        let mut sampler = HaarSampler::from_seed(29);
        let u = sampler.su(3).unwrap();
        let v = sampler.su(3).unwrap();
        let d1 = bi_invariant_distance(&u, &v).unwrap();
        let d2 = bi_invariant_distance(&v, &u).unwrap();
        assert_relative_eq!(d1, d2, max_relative = 1e-9);
    }

    #[test]
    fn test_known_distance_from_identity() {
        // diag(e^{iπ/4}, e^{-iπ/4}) is at distance π/4 · √2 from I
        let d = GroupElement::from_diagonal(&DVector::from_vec(vec![
            C64::from_polar(1.0, FRAC_PI_4),
            C64::from_polar(1.0, -FRAC_PI_4),
        ]));
        let id = GroupElement::identity(2, 2);
        let dist = bi_invariant_distance(&id, &d).unwrap();
        assert_relative_eq!(dist, FRAC_PI_4 * 2.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_shape_mismatch() {
        let a = GroupElement::identity(2, 2);
        let b = GroupElement::identity(3, 3);
        assert!(matches!(
            bi_invariant_distance(&a, &b),
            Err(LieError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_closure_metric() {
        let frobenius = |a: &GroupElement, b: &GroupElement| -> Result<f64> { Ok((a - b).norm()) };
        let a = GroupElement::identity(2, 2);
        let b = -GroupElement::identity(2, 2);
        assert_relative_eq!(frobenius.distance(&a, &b).unwrap(), 2.0 * 2.0_f64.sqrt());
        assert_eq!(frobenius.name(), "custom");
        assert_eq!(BiInvariantMetric.name(), "bi-invariant");
    }
}
