//! Haar-distributed sampling of SU(n) and random elements of SL(n,R).
//!
//! SU(n) samples follow Mezzadri's recipe: QR-factor a complex Ginibre
//! matrix, move the phases of R's diagonal into Q so the distribution of Q is
//! Haar on U(n), then divide by the principal n-th root of the determinant.
//!
//! ```rust
//! use liegeom_core::sampling::HaarSampler;
//! use liegeom_core::validation::check_special_unitary;
//!
//! let mut sampler = HaarSampler::from_seed(7);
//! let u = sampler.su(3)?;
//! check_special_unitary(&u)?;
//! # Ok::<(), liegeom_core::LieError>(())
//! ```

use crate::{
    error::{LieError, Result},
    types::{c_one, GroupElement, RealGroupElement, C64},
    validation::{check_special_linear, check_special_unitary, check_square},
};
use nalgebra::DMatrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// Draws one Haar-random element of SU(n).
///
/// # Errors
///
/// - `InvalidDimension`: if `n < 1`
/// - `InvalidElement`: if rounding pushed the result off SU(n)
pub fn sample_su<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<GroupElement> {
    if n < 1 {
        return Err(LieError::invalid_dimension(format!(
            "SU(n) requires n >= 1, got {}",
            n
        )));
    }

    let ginibre = DMatrix::<C64>::from_fn(n, n, |_, _| {
        let re: f64 = StandardNormal.sample(&mut *rng);
        let im: f64 = StandardNormal.sample(&mut *rng);
        C64::new(re, im)
    });

    let qr = ginibre.qr();
    let r = qr.r();
    let mut q = qr.q();

    // Q · diag(r_jj / |r_jj|)
    for j in 0..n {
        let d = r[(j, j)];
        let modulus = d.norm();
        let phase = if modulus > 0.0 { d / modulus } else { c_one() };
        for i in 0..n {
            q[(i, j)] *= phase;
        }
    }

    let det = q.determinant();
    if det.norm() == 0.0 {
        return Err(LieError::singular_matrix(
            "unitary factor has zero determinant",
        ));
    }
    let root = det.powf(1.0 / n as f64);
    let u = q.map(|z| z / root);

    check_special_unitary(&u)?;
    Ok(u)
}

/// Draws `k` independent Haar-random elements of SU(n).
pub fn sample_su_batch<R: Rng + ?Sized>(
    n: usize,
    k: usize,
    rng: &mut R,
) -> Result<Vec<GroupElement>> {
    (0..k).map(|_| sample_su(n, rng)).collect()
}

/// Draws a random element of SL(n,R) from a standard-normal real matrix.
///
/// # Errors
///
/// - `InvalidDimension`: if `n < 1`
/// - `SingularMatrix`: if the drawn matrix has zero determinant
pub fn sample_sln_real<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<RealGroupElement> {
    if n < 1 {
        return Err(LieError::invalid_dimension(format!(
            "SL(n,R) requires n >= 1, got {}",
            n
        )));
    }
    let a = DMatrix::<f64>::from_fn(n, n, |_, _| StandardNormal.sample(&mut *rng));
    normalize_to_sln(a)
}

/// Rescales a real matrix to unit determinant.
///
/// The matrix is divided by the real n-th root of `|det|`. A negative
/// determinant is corrected by the sign of an odd root, or for even `n` by
/// negating the first row, so the result always has determinant `+1`.
///
/// # Errors
///
/// - `InvalidDimension`: if `a` is not square or empty
/// - `SingularMatrix`: if `det(a)` is zero or not finite
pub fn normalize_to_sln(mut a: RealGroupElement) -> Result<RealGroupElement> {
    let n = check_square(&a)?;
    if n == 0 {
        return Err(LieError::invalid_dimension("empty matrix"));
    }

    let mut det = a.determinant();
    if det == 0.0 || !det.is_finite() {
        return Err(LieError::singular_matrix(format!(
            "cannot normalize to unit determinant, det = {}",
            det
        )));
    }

    let mut sign = 1.0;
    if det < 0.0 {
        if n % 2 == 1 {
            sign = -1.0;
        } else {
            for j in 0..n {
                a[(0, j)] = -a[(0, j)];
            }
            det = -det;
        }
    }

    let root = sign * det.abs().powf(1.0 / n as f64);
    a /= root;

    check_special_linear(&a)?;
    Ok(a)
}

/// Seeded source of random group elements.
///
/// Two samplers created from the same seed produce identical sequences.
#[derive(Debug, Clone)]
pub struct HaarSampler {
    rng: StdRng,
}

impl HaarSampler {
    /// Creates a sampler from a fixed seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a sampler seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Draws one element of SU(n).
    pub fn su(&mut self, n: usize) -> Result<GroupElement> {
        sample_su(n, &mut self.rng)
    }

    /// Draws `k` elements of SU(n).
    pub fn su_batch(&mut self, n: usize, k: usize) -> Result<Vec<GroupElement>> {
        sample_su_batch(n, k, &mut self.rng)
    }

    /// Draws one element of SL(n,R).
    pub fn sln_real(&mut self, n: usize) -> Result<RealGroupElement> {
        sample_sln_real(n, &mut self.rng)
    }

    /// Returns a mutable reference to the underlying RNG.
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{determinant_deviation, unitarity_deviation};
    use approx::assert_relative_eq;

    #[test]
    fn test_su_is_unitary_with_unit_determinant() {
        let mut sampler = HaarSampler::from_seed(1);
        for n in 2..=6 {
            let u = sampler.su(n).unwrap();
            assert_eq!(u.shape(), (n, n));
            assert!(unitarity_deviation(&u) < 1e-10);
            assert!(determinant_deviation(&u) < 1e-10);
        }
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let mut sampler = HaarSampler::from_seed(1);
        assert!(matches!(
            sampler.su(0),
            Err(LieError::InvalidDimension { .. })
        ));
        assert!(matches!(
            sampler.sln_real(0),
            Err(LieError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_one_dimensional_group_is_trivial() {
        let mut sampler = HaarSampler::from_seed(3);
        let u = sampler.su(1).unwrap();
        assert_relative_eq!(u[(0, 0)].re, 1.0, epsilon = 1e-12);
        assert_relative_eq!(u[(0, 0)].im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_batch_length_and_independence() {
        let mut sampler = HaarSampler::from_seed(11);
        let batch = sampler.su_batch(3, 10).unwrap();
        assert_eq!(batch.len(), 10);
        assert!((&batch[0] - &batch[1]).norm() > 1e-6);
    }

    #[test]
    fn test_seed_reproducibility() {
        let a = HaarSampler::from_seed(42).su_batch(4, 5).unwrap();
        let b = HaarSampler::from_seed(42).su_batch(4, 5).unwrap();
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x, y);
        }
    }

    #[test]
    fn test_sln_real_unit_determinant() {
        let mut sampler = HaarSampler::from_seed(5);
        for n in 2..=5 {
            let a = sampler.sln_real(n).unwrap();
            assert_relative_eq!(a.determinant(), 1.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_normalize_negative_determinant() {
        // det = -4 for even n: first row is negated before scaling
        let a = DMatrix::from_row_slice(2, 2, &[-2.0, 0.0, 0.0, 2.0]);
        let s = normalize_to_sln(a).unwrap();
        assert_relative_eq!(s.determinant(), 1.0, epsilon = 1e-12);

        // det = -8 for odd n: divided by the negative real cube root
        let b = DMatrix::from_diagonal(&nalgebra::DVector::from_vec(vec![-2.0, 2.0, 2.0]));
        let s = normalize_to_sln(b).unwrap();
        assert_relative_eq!(s.determinant(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_singular_rejected() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        assert!(matches!(
            normalize_to_sln(a),
            Err(LieError::SingularMatrix { .. })
        ));
    }
}
