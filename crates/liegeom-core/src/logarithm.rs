//! Principal matrix logarithm for Hermitian and unitary matrices.
//!
//! # Mathematical Formulas
//!
//! For Hermitian positive definite H = V Λ V†:
//! ```text
//! log(H) = V diag(ln λᵢ) V†
//! ```
//!
//! For unitary U = V diag(e^{iθᵢ}) V⁻¹ with θᵢ ∈ (−π, π]:
//! ```text
//! log(U) = V diag(iθᵢ) V⁻¹
//! ```
//!
//! The unitary eigenbasis is obtained from the complex Schur form U = Q T Q†
//! followed by back substitution on the triangular factor, so V = Q Y with Y
//! unit upper triangular.
//!
//! # Branch cut
//!
//! The matrix logarithm is discontinuous on the unitary group wherever an
//! eigenvalue sits at −1. An eigenvalue with angle exactly ±π is mapped to
//! +π, and a perturbation of size ε across the cut can flip the sign of the
//! corresponding term. Callers must tolerate that ambiguity; results near the
//! cut are only accurate up to that sign.

use crate::{
    error::{LieError, Result},
    types::{constants, DMatrix, DVector, C64},
    validation::check_square,
};
use nalgebra::{Schur, SymmetricEigen};
use std::f64::consts::PI;

/// Which eigendecomposition the logarithm uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogBranch {
    /// Real eigenvalues, orthonormal eigenvectors, real logarithm.
    Hermitian,
    /// Unit-modulus eigenvalues, principal angle in (−π, π].
    Unitary,
}

/// Computes the principal matrix logarithm on the selected branch.
///
/// # Errors
///
/// - `InvalidDimension`: if `u` is not square
/// - `NonPositiveEigenvalue`: Hermitian branch with an eigenvalue ≤ 0
/// - `SingularEigenbasis`: unitary branch with a non-invertible eigenbasis
/// - `NumericalError`: if the eigensolver does not converge
pub fn matrix_log(u: &DMatrix<C64>, branch: LogBranch) -> Result<DMatrix<C64>> {
    match branch {
        LogBranch::Hermitian => log_hermitian(u),
        LogBranch::Unitary => log_unitary(u),
    }
}

/// Boolean form of [`matrix_log`]: `hermitian = false` selects the unitary branch.
pub fn matrix_log_with_flag(u: &DMatrix<C64>, hermitian: bool) -> Result<DMatrix<C64>> {
    let branch = if hermitian {
        LogBranch::Hermitian
    } else {
        LogBranch::Unitary
    };
    matrix_log(u, branch)
}

/// Logarithm of a Hermitian positive definite matrix.
pub fn log_hermitian(h: &DMatrix<C64>) -> Result<DMatrix<C64>> {
    let n = check_square(h)?;
    if n == 0 {
        return Ok(DMatrix::zeros(0, 0));
    }

    let eigen = hermitian_eigen(h)?;
    let mut log_vals = DVector::<C64>::zeros(n);
    for (i, &lambda) in eigen.eigenvalues.iter().enumerate() {
        if lambda <= 0.0 {
            return Err(LieError::non_positive_eigenvalue(lambda));
        }
        log_vals[i] = C64::new(lambda.ln(), 0.0);
    }

    let log_diag = DMatrix::from_diagonal(&log_vals);
    Ok(&eigen.eigenvectors * log_diag * eigen.eigenvectors.adjoint())
}

/// Principal logarithm of a unitary matrix.
///
/// The result is skew-Hermitian for unitary input. For a non-normal input
/// the eigenvector basis is not orthonormal and is inverted explicitly.
pub fn log_unitary(u: &DMatrix<C64>) -> Result<DMatrix<C64>> {
    let n = check_square(u)?;
    if n == 0 {
        return Ok(DMatrix::zeros(0, 0));
    }

    let (eigenvectors, eigenvalues) = unitary_eigen(u)?;
    let log_vals = eigenvalues.map(|lambda| C64::new(0.0, principal_angle(lambda)));

    let inverse = invert_eigenbasis(&eigenvectors)?;
    let log_diag = DMatrix::from_diagonal(&log_vals);
    Ok(&eigenvectors * log_diag * inverse)
}

/// Angle of `z` in (−π, π].
#[inline]
pub fn principal_angle(z: C64) -> f64 {
    let theta = z.im.atan2(z.re);
    if theta <= -PI {
        PI
    } else {
        theta
    }
}

/// Eigenvalues of a square complex matrix, read off the complex Schur form.
pub fn eigenvalues(u: &DMatrix<C64>) -> Result<DVector<C64>> {
    let n = check_square(u)?;
    if n == 0 {
        return Ok(DVector::zeros(0));
    }
    if n == 1 {
        return Ok(DVector::from_element(1, u[(0, 0)]));
    }
    let (_, t) = schur_form(u)?;
    Ok(t.diagonal())
}

/// Eigenvalue angles of a square complex matrix, each in (−π, π].
pub fn eigenvalue_angles(u: &DMatrix<C64>) -> Result<DVector<f64>> {
    Ok(eigenvalues(u)?.map(principal_angle))
}

/// Exponential of a skew-Hermitian matrix, `exp(L) = V diag(e^{iμ}) V†`
/// where `L = iH` and `H = V diag(μ) V†`.
pub fn exp_skew_hermitian(l: &DMatrix<C64>) -> Result<DMatrix<C64>> {
    let n = check_square(l)?;
    let minus_i = C64::new(0.0, -1.0);
    let h = l.map(|z| z * minus_i);
    let h = (&h + h.adjoint()) * C64::new(0.5, 0.0);
    if n == 0 {
        return Ok(DMatrix::zeros(0, 0));
    }
    let eigen = hermitian_eigen(&h)?;
    let phases = eigen.eigenvalues.map(|mu| C64::new(0.0, mu).exp());
    Ok(&eigen.eigenvectors * DMatrix::from_diagonal(&phases) * eigen.eigenvectors.adjoint())
}

/// Exponential of a Hermitian matrix, `exp(H) = V diag(e^{μ}) V†`.
pub fn exp_hermitian(h: &DMatrix<C64>) -> Result<DMatrix<C64>> {
    let n = check_square(h)?;
    if n == 0 {
        return Ok(DMatrix::zeros(0, 0));
    }
    let eigen = hermitian_eigen(h)?;
    let vals = eigen.eigenvalues.map(|mu| C64::new(mu.exp(), 0.0));
    Ok(&eigen.eigenvectors * DMatrix::from_diagonal(&vals) * eigen.eigenvectors.adjoint())
}

fn hermitian_eigen(h: &DMatrix<C64>) -> Result<SymmetricEigen<C64, nalgebra::Dyn>> {
    SymmetricEigen::try_new(
        h.clone(),
        constants::SOLVER_EPSILON,
        constants::SOLVER_MAX_ITERATIONS,
    )
    .ok_or_else(|| LieError::numerical_error("Hermitian eigendecomposition did not converge"))
}

fn schur_form(u: &DMatrix<C64>) -> Result<(DMatrix<C64>, DMatrix<C64>)> {
    let schur = Schur::try_new(
        u.clone(),
        constants::SOLVER_EPSILON,
        constants::SOLVER_MAX_ITERATIONS,
    )
    .ok_or_else(|| LieError::numerical_error("Schur decomposition did not converge"))?;
    Ok(schur.unpack())
}

/// Eigenvectors (as columns) and eigenvalues of a complex square matrix.
///
/// Eigenvectors of the triangular Schur factor are found by back
/// substitution. A pair of numerically equal eigenvalues whose Schur
/// coupling is below [`constants::DEGENERATE_COUPLING`] is treated as a
/// degenerate eigenspace; a larger coupling means a defective matrix.
fn unitary_eigen(u: &DMatrix<C64>) -> Result<(DMatrix<C64>, DVector<C64>)> {
    let n = u.nrows();
    if n == 1 {
        return Ok((DMatrix::identity(1, 1), DVector::from_element(1, u[(0, 0)])));
    }

    let (q, t) = schur_form(u)?;
    let lambdas = t.diagonal();
    let mut y = DMatrix::<C64>::identity(n, n);

    for k in 0..n {
        let lambda_k = lambdas[k];
        let scale = lambda_k.norm().max(1.0);
        for i in (0..k).rev() {
            let mut numerator = C64::new(0.0, 0.0);
            for j in (i + 1)..=k {
                numerator += t[(i, j)] * y[(j, k)];
            }
            let gap = lambdas[i] - lambda_k;
            if gap.norm() <= constants::EIGENVALUE_SEPARATION * scale {
                if numerator.norm() <= constants::DEGENERATE_COUPLING * scale {
                    y[(i, k)] = C64::new(0.0, 0.0);
                } else {
                    tracing::debug!(
                        row = i,
                        column = k,
                        coupling = numerator.norm(),
                        "defective eigenvalue cluster in Schur form"
                    );
                    return Err(LieError::singular_eigenbasis(format!(
                        "eigenvalues {} and {} coincide but are coupled by {:e}",
                        i,
                        k,
                        numerator.norm()
                    )));
                }
            } else {
                y[(i, k)] = -numerator / gap;
            }
        }
    }

    Ok((q * y, lambdas))
}

/// Inverts an eigenvector basis, rejecting ill-conditioned ones.
fn invert_eigenbasis(v: &DMatrix<C64>) -> Result<DMatrix<C64>> {
    let n = v.nrows() as f64;
    let inverse = v
        .clone()
        .try_inverse()
        .ok_or_else(|| LieError::singular_eigenbasis("eigenvector matrix is not invertible"))?;

    let condition = v.norm() * inverse.norm() / n;
    if !condition.is_finite() || 1.0 / condition < constants::EIGENBASIS_CONDITION {
        return Err(LieError::singular_eigenbasis(format!(
            "eigenvector matrix is ill-conditioned (condition estimate {:e})",
            condition
        )));
    }
    Ok(inverse)
}
