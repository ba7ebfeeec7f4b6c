//! Projection of SU(n) conjugacy classes onto the Weyl alcove.
//!
//! The eigenvalue angles θ₁, …, θₙ of U ∈ SU(n) determine its conjugacy
//! class. They are centred to sum to zero, sorted in decreasing order and
//! reported as the n − 1 consecutive gaps
//!
//! ```text
//! αᵢ = θᵢ − θᵢ₊₁ ≥ 0,   i = 1, …, n − 1
//! ```
//!
//! Conjugating U leaves its spectrum, and hence these coordinates, unchanged.
//!
//! # Known limitation
//!
//! Multiplying U by a central element e^{2πik/n}·I shifts every angle by
//! 2πk/n before wrapping into (−π, π]. Angles that cross the branch cut
//! change the sorted order, so the gaps of U and of a central translate of U
//! can differ. Folding by the full affine Weyl group would remove this and
//! is not performed.

use liegeom_core::{
    error::{LieError, Result},
    logarithm::eigenvalue_angles,
    types::{AlcoveCoordinate, DMatrix, GroupElement},
    validation::check_square,
};
use std::f64::consts::PI;

/// Vertices of the SU(3) fundamental alcove in gap coordinates:
/// `(0, 0)`, `(2π/3, 0)` and `(π/3, π/√3)`.
pub const SU3_ALCOVE_VERTICES: [[f64; 2]; 3] = [
    [0.0, 0.0],
    [2.0 * PI / 3.0, 0.0],
    // π/√3
    [PI / 3.0, 1.813_799_364_234_217_8],
];

/// Alcove coordinates of an n×n unitary matrix (length n − 1).
///
/// # Errors
///
/// - `InvalidDimension`: if `u` is not square or is empty
/// - `NumericalError`: if the eigenvalue iteration fails
pub fn sun_alcove_coords(u: &GroupElement) -> Result<AlcoveCoordinate> {
    let n = check_square(u)?;
    if n == 0 {
        return Err(LieError::invalid_dimension("alcove of an empty matrix"));
    }

    let mut angles: Vec<f64> = eigenvalue_angles(u)?.iter().copied().collect();
    let mean = angles.iter().sum::<f64>() / n as f64;
    for theta in angles.iter_mut() {
        *theta -= mean;
    }
    angles.sort_by(|a, b| b.total_cmp(a));

    Ok(AlcoveCoordinate::from_iterator(
        n - 1,
        angles.windows(2).map(|pair| pair[0] - pair[1]),
    ))
}

/// Alcove coordinates of a 3×3 matrix, a point of the plane.
pub fn su3_alcove_coords(u: &GroupElement) -> Result<AlcoveCoordinate> {
    if u.shape() != (3, 3) {
        return Err(LieError::dimension_mismatch(
            "3x3 matrix",
            format!("{}x{}", u.nrows(), u.ncols()),
        ));
    }
    sun_alcove_coords(u)
}

/// Alcove coordinates of equally sized elements, one row each.
///
/// # Errors
///
/// - `InvalidDimension`: if the elements differ in size
pub fn alcove_coords_batch(elements: &[GroupElement]) -> Result<DMatrix<f64>> {
    let Some(first) = elements.first() else {
        return Ok(DMatrix::zeros(0, 0));
    };
    let n = check_square(first)?;
    let width = n.saturating_sub(1);

    let mut rows = DMatrix::<f64>::zeros(elements.len(), width);
    for (k, element) in elements.iter().enumerate() {
        if element.shape() != first.shape() {
            return Err(LieError::dimension_mismatch(
                format!("{}x{} element", n, n),
                format!("{}x{} at index {}", element.nrows(), element.ncols(), k),
            ));
        }
        let coords = sun_alcove_coords(element)?;
        rows.row_mut(k).tr_copy_from(&coords);
    }
    Ok(rows)
}
