//! Cartan (KAK), polar and Iwasawa (KAN) decompositions.
//!
//! # Cartan projection
//!
//! With the singular value decomposition `g = W Σ V†` and the singular
//! values sorted so that σ₁ ≥ … ≥ σₙ,
//!
//! ```text
//! g = K · A · K′,   K = W,   A = diag(σ),   K′ = V†
//! μ(g) = (log σ₁, …, log σₙ)
//! ```
//!
//! μ is unchanged under `g ↦ k₁ g k₂` for orthogonal (unitary) k₁, k₂.
//!
//! # Polar decomposition
//!
//! `A = U P` with `U = W V†` unitary and `P = V Σ V†` positive semidefinite.
//!
//! # Iwasawa decomposition
//!
//! `A = K · A · N` with K orthogonal, A positive diagonal and N unit upper
//! triangular, obtained from the QR factorization by moving the signs of R's
//! diagonal into K.

use liegeom_core::{
    error::{LieError, Result},
    types::{constants, CartanCoordinate, DMatrix, DVector, C64},
    validation::{check_finite, check_square},
};
use nalgebra::ComplexField;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Factors of `g = K · A · K′`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "T: nalgebra::Scalar + Serialize",
        deserialize = "T: nalgebra::Scalar + Deserialize<'de>"
    ))
)]
pub struct CartanDecomposition<T: nalgebra::Scalar = f64> {
    /// Left orthogonal (unitary) factor.
    pub k: DMatrix<T>,
    /// Diagonal of sorted singular values.
    pub a: DMatrix<T>,
    /// Right orthogonal (unitary) factor.
    pub k_prime: DMatrix<T>,
}

impl<T: ComplexField<RealField = f64>> CartanDecomposition<T> {
    /// The product `K · A · K′`.
    pub fn reconstruct(&self) -> DMatrix<T> {
        &self.k * &self.a * &self.k_prime
    }

    /// Sorted singular values.
    pub fn singular_values(&self) -> DVector<f64> {
        self.a.diagonal().map(|s| s.real())
    }
}

/// Result of [`cartan_projection_with`].
#[derive(Debug, Clone, PartialEq)]
pub enum CartanOutput {
    /// Log singular values only.
    Coordinates(CartanCoordinate),
    /// Full `K · A · K′` factorization.
    Decomposition(CartanDecomposition),
}

/// Factors of `A = K · A · N`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IwasawaDecomposition {
    /// Orthogonal factor.
    pub k: DMatrix<f64>,
    /// Positive diagonal factor.
    pub a: DMatrix<f64>,
    /// Unit upper-triangular factor.
    pub n: DMatrix<f64>,
}

impl IwasawaDecomposition {
    /// The product `K · A · N`.
    pub fn reconstruct(&self) -> DMatrix<f64> {
        &self.k * &self.a * &self.n
    }
}

/// SVD with singular values in decreasing order and the factors permuted
/// to match.
fn sorted_svd<T: ComplexField<RealField = f64>>(
    g: &DMatrix<T>,
) -> Result<(DMatrix<T>, DVector<f64>, DMatrix<T>)> {
    let n = check_square(g)?;
    if n == 0 {
        return Err(LieError::invalid_dimension("decomposition of an empty matrix"));
    }
    if g.iter().any(|x| !x.is_finite()) {
        return Err(LieError::singular_input("matrix has non-finite entries"));
    }

    let svd = g
        .clone()
        .try_svd(
            true,
            true,
            constants::SOLVER_EPSILON,
            constants::SOLVER_MAX_ITERATIONS,
        )
        .ok_or_else(|| LieError::singular_input("SVD did not converge"))?;
    let (u, v_t) = match (svd.u, svd.v_t) {
        (Some(u), Some(v_t)) => (u, v_t),
        _ => return Err(LieError::singular_input("SVD did not return singular vectors")),
    };

    let mut perm: Vec<usize> = (0..n).collect();
    perm.sort_by(|&a, &b| svd.singular_values[b].total_cmp(&svd.singular_values[a]));

    let k = DMatrix::from_fn(n, n, |i, j| u[(i, perm[j])].clone());
    let k_prime = DMatrix::from_fn(n, n, |i, j| v_t[(perm[i], j)].clone());
    let sigma = DVector::from_fn(n, |i, _| svd.singular_values[perm[i]]);
    Ok((k, sigma, k_prime))
}

fn log_singular_values(sigma: &DVector<f64>) -> Result<CartanCoordinate> {
    let largest = sigma.max();
    let threshold = largest * constants::RANK_TOLERANCE;
    if largest <= 0.0 || sigma.iter().any(|&s| s <= threshold) {
        return Err(LieError::singular_input(format!(
            "zero singular value (smallest {:e}, largest {:e})",
            sigma.min(),
            largest
        )));
    }
    Ok(sigma.map(f64::ln))
}

/// Sorted log singular values of a real matrix.
///
/// # Errors
///
/// - `InvalidDimension`: if `g` is not square or is empty
/// - `SingularInput`: if the SVD fails or a singular value is zero
pub fn cartan_projection(g: &DMatrix<f64>) -> Result<CartanCoordinate> {
    let (_, sigma, _) = sorted_svd(g)?;
    log_singular_values(&sigma)
}

/// Sorted log singular values of a complex matrix.
pub fn cartan_projection_complex(g: &DMatrix<C64>) -> Result<CartanCoordinate> {
    let (_, sigma, _) = sorted_svd(g)?;
    log_singular_values(&sigma)
}

/// `g = K · A · K′` for a real matrix, singular values in decreasing order.
///
/// Singular matrices are accepted; only the logarithm needs σ > 0.
pub fn cartan_decomposition(g: &DMatrix<f64>) -> Result<CartanDecomposition> {
    cartan_factors(g)
}

/// `g = K · A · K′` for a complex matrix, with K and K′ unitary.
pub fn cartan_decomposition_complex(g: &DMatrix<C64>) -> Result<CartanDecomposition<C64>> {
    cartan_factors(g)
}

fn cartan_factors<T: ComplexField<RealField = f64>>(
    g: &DMatrix<T>,
) -> Result<CartanDecomposition<T>> {
    let (k, sigma, k_prime) = sorted_svd(g)?;
    let a = DMatrix::from_diagonal(&sigma.map(T::from_real));
    Ok(CartanDecomposition { k, a, k_prime })
}

/// Log singular values, or the full factorization when requested.
pub fn cartan_projection_with(g: &DMatrix<f64>, return_decomposition: bool) -> Result<CartanOutput> {
    if return_decomposition {
        cartan_decomposition(g).map(CartanOutput::Decomposition)
    } else {
        cartan_projection(g).map(CartanOutput::Coordinates)
    }
}

/// `A = U P` for a real matrix: U orthogonal, P symmetric positive semidefinite.
///
/// # Errors
///
/// - `InvalidDimension`: if `a` is not square or is empty
/// - `SingularInput`: if the SVD fails
pub fn polar_decomposition(a: &DMatrix<f64>) -> Result<(DMatrix<f64>, DMatrix<f64>)> {
    polar_factors(a)
}

/// `A = U P` for a complex matrix: U unitary, P Hermitian positive semidefinite.
pub fn polar_decomposition_complex(a: &DMatrix<C64>) -> Result<(DMatrix<C64>, DMatrix<C64>)> {
    polar_factors(a)
}

fn polar_factors<T: ComplexField<RealField = f64>>(
    a: &DMatrix<T>,
) -> Result<(DMatrix<T>, DMatrix<T>)> {
    let (w, sigma, v_adj) = sorted_svd(a)?;
    let v = v_adj.adjoint();
    let u = &w * &v_adj;
    let p = &v * DMatrix::from_diagonal(&sigma.map(T::from_real)) * &v_adj;
    let half = T::from_real(0.5);
    let p = (&p + p.adjoint()) * half;
    Ok((u, p))
}

/// `A = K · A · N` for an invertible real matrix.
///
/// # Errors
///
/// - `InvalidDimension`: if `a` is not square or is empty
/// - `SingularMatrix`: if `a` is numerically singular
/// - `NumericalError`: if `a` has non-finite entries
pub fn iwasawa_decomposition(a: &DMatrix<f64>) -> Result<IwasawaDecomposition> {
    let n = check_square(a)?;
    if n == 0 {
        return Err(LieError::invalid_dimension("decomposition of an empty matrix"));
    }
    check_finite(a, "Iwasawa input")?;

    let qr = a.clone().qr();
    let mut k = qr.q();
    let mut r = qr.r();

    let largest = (0..n).map(|i| r[(i, i)].abs()).fold(0.0, f64::max);
    let threshold = largest * constants::RANK_TOLERANCE;
    for i in 0..n {
        let d = r[(i, i)];
        if d.abs() <= threshold || largest == 0.0 {
            return Err(LieError::singular_matrix(format!(
                "R has diagonal entry {:e} at {}",
                d, i
            )));
        }
        if d < 0.0 {
            // Q R = (Q S)(S R) with S = S⁻¹ = diag(±1).
            for j in 0..n {
                k[(j, i)] = -k[(j, i)];
                r[(i, j)] = -r[(i, j)];
            }
        }
    }

    let diag = r.diagonal();
    let mut unit = r;
    for i in 0..n {
        let scale = diag[i];
        for j in 0..n {
            unit[(i, j)] /= scale;
        }
    }

    tracing::trace!(n, "Iwasawa decomposition");
    Ok(IwasawaDecomposition {
        k,
        a: DMatrix::from_diagonal(&diag),
        n: unit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_matrix() -> DMatrix<f64> {
        DMatrix::from_row_slice(3, 3, &[2.0, -1.0, 0.5, 0.3, 1.5, -2.0, 1.0, 0.2, 0.7])
    }

    #[test]
    fn test_cartan_of_diagonal() {
        let g = DMatrix::from_diagonal(&DVector::from_vec(vec![0.5, 4.0, 0.5]));
        let mu = cartan_projection(&g).unwrap();
        assert_relative_eq!(mu[0], 4.0_f64.ln(), epsilon = 1e-12);
        assert_relative_eq!(mu[1], 0.5_f64.ln(), epsilon = 1e-12);
        assert_relative_eq!(mu[2], 0.5_f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_cartan_factors_reconstruct() {
        let g = sample_matrix();
        let dec = cartan_decomposition(&g).unwrap();
        assert_relative_eq!(dec.reconstruct(), g, epsilon = 1e-10);
        let id = DMatrix::<f64>::identity(3, 3);
        assert_relative_eq!(&dec.k * dec.k.transpose(), id, epsilon = 1e-10);
        assert_relative_eq!(&dec.k_prime * dec.k_prime.transpose(), id, epsilon = 1e-10);
        let s = dec.singular_values();
        assert!(s[0] >= s[1] && s[1] >= s[2]);
    }

    #[test]
    fn test_projection_with_flag() {
        let g = sample_matrix();
        match cartan_projection_with(&g, false).unwrap() {
            CartanOutput::Coordinates(mu) => assert_eq!(mu, cartan_projection(&g).unwrap()),
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            cartan_projection_with(&g, true).unwrap(),
            CartanOutput::Decomposition(_)
        ));
    }

    #[test]
    fn test_singular_input() {
        let g = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        assert!(matches!(
            cartan_projection(&g),
            Err(LieError::SingularInput { .. })
        ));
        assert!(cartan_decomposition(&g).is_ok());
        assert!(matches!(
            iwasawa_decomposition(&g),
            Err(LieError::SingularMatrix { .. })
        ));
    }

    #[test]
    fn test_polar_of_real_matrix() {
        let a = sample_matrix();
        let (u, p) = polar_decomposition(&a).unwrap();
        assert_relative_eq!(&u * &p, a, epsilon = 1e-10);
        assert_relative_eq!(&u * u.transpose(), DMatrix::identity(3, 3), epsilon = 1e-10);
        assert_relative_eq!(p.clone(), p.transpose(), epsilon = 1e-12);
        assert!(p.symmetric_eigenvalues().iter().all(|&l| l >= -1e-10));
    }

    #[test]
    fn test_iwasawa_factors() {
        let a = sample_matrix();
        let dec = iwasawa_decomposition(&a).unwrap();
        assert_relative_eq!(dec.reconstruct(), a, epsilon = 1e-10);
        assert_relative_eq!(&dec.k * dec.k.transpose(), DMatrix::identity(3, 3), epsilon = 1e-10);
        for i in 0..3 {
            assert!(dec.a[(i, i)] > 0.0);
            assert_relative_eq!(dec.n[(i, i)], 1.0, epsilon = 1e-12);
            for j in 0..i {
                assert_eq!(dec.n[(i, j)], 0.0);
                assert_eq!(dec.a[(i, j)], 0.0);
            }
        }
    }

    #[test]
    fn test_non_square_rejected() {
        let g = DMatrix::<f64>::zeros(2, 3);
        assert!(matches!(cartan_projection(&g), Err(LieError::InvalidDimension { .. })));
        assert!(matches!(polar_decomposition(&g), Err(LieError::InvalidDimension { .. })));
        assert!(matches!(iwasawa_decomposition(&g), Err(LieError::InvalidDimension { .. })));
    }
}
