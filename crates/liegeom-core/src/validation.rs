//! Numerical validation of group membership.
//!
//! Group elements that drift off SU(n) indicate an upstream sampling or
//! arithmetic defect. These checks measure the drift and reject it beyond
//! [`constants::GROUP_TOLERANCE`](crate::types::constants::GROUP_TOLERANCE).

use crate::{
    error::{LieError, Result},
    types::{constants, GroupElement, DMatrix, C64},
};
use nalgebra::{ComplexField, Scalar};

/// Checks that a matrix is square and returns its size.
pub fn check_square<T: Scalar>(m: &DMatrix<T>) -> Result<usize> {
    if m.nrows() != m.ncols() {
        return Err(LieError::dimension_mismatch(
            "square matrix",
            format!("{}x{}", m.nrows(), m.ncols()),
        ));
    }
    Ok(m.nrows())
}

/// Checks that two matrices have the same shape.
pub fn check_same_shape<T: Scalar, U: Scalar>(a: &DMatrix<T>, b: &DMatrix<U>) -> Result<()> {
    if a.shape() != b.shape() {
        return Err(LieError::dimension_mismatch(
            format!("{}x{}", a.nrows(), a.ncols()),
            format!("{}x{}", b.nrows(), b.ncols()),
        ));
    }
    Ok(())
}

/// Frobenius norm of `U† U - I`.
pub fn unitarity_deviation<T: ComplexField>(u: &DMatrix<T>) -> T::RealField {
    let n = u.nrows();
    (u.adjoint() * u - DMatrix::<T>::identity(n, n)).norm()
}

/// Absolute deviation of `det(U)` from one.
pub fn determinant_deviation(u: &GroupElement) -> f64 {
    (u.determinant() - C64::new(1.0, 0.0)).norm()
}

/// Validates that `u` is unitary within the group tolerance.
pub fn check_unitary(u: &GroupElement) -> Result<()> {
    check_square(u)?;
    let deviation = unitarity_deviation(u);
    if !deviation.is_finite() || deviation > constants::GROUP_TOLERANCE {
        return Err(LieError::invalid_element(format!(
            "‖U†U - I‖_F = {:e} exceeds tolerance {:e}",
            deviation,
            constants::GROUP_TOLERANCE
        )));
    }
    Ok(())
}

/// Validates that `u` belongs to SU(n) within the group tolerance.
///
/// # Errors
///
/// - `InvalidDimension`: if `u` is not square
/// - `InvalidElement`: if `u` is not unitary or `det(u) ≠ 1`
pub fn check_special_unitary(u: &GroupElement) -> Result<()> {
    check_unitary(u)?;
    let deviation = determinant_deviation(u);
    if !deviation.is_finite() || deviation > constants::GROUP_TOLERANCE {
        return Err(LieError::invalid_element(format!(
            "|det(U) - 1| = {:e} exceeds tolerance {:e}",
            deviation,
            constants::GROUP_TOLERANCE
        )));
    }
    Ok(())
}

/// Validates that a real matrix belongs to SL(n,R) within the group tolerance.
pub fn check_special_linear(a: &DMatrix<f64>) -> Result<()> {
    check_square(a)?;
    let deviation = (a.determinant() - 1.0).abs();
    if !deviation.is_finite() || deviation > constants::GROUP_TOLERANCE {
        return Err(LieError::invalid_element(format!(
            "|det(A) - 1| = {:e} exceeds tolerance {:e}",
            deviation,
            constants::GROUP_TOLERANCE
        )));
    }
    Ok(())
}

/// Rejects matrices containing NaN or infinite entries.
pub fn check_finite(m: &DMatrix<f64>, what: &str) -> Result<()> {
    if m.iter().any(|x| !x.is_finite()) {
        return Err(LieError::numerical_error(format!(
            "{} contains non-finite values",
            what
        )));
    }
    Ok(())
}
