//! Type definitions and numerical constants for matrix Lie groups.
//!
//! Group elements are stored as dynamically-sized nalgebra matrices. Complex
//! matrices represent SU(n), real matrices represent SL(n,R) and general
//! inputs to the Cartan decompositions.

use nalgebra::{Complex, OMatrix, OVector, Dyn};

/// Complex scalar used for unitary group elements.
pub type C64 = Complex<f64>;

/// Type alias for a dynamically-sized matrix.
pub type DMatrix<T> = OMatrix<T, Dyn, Dyn>;

/// Type alias for a dynamically-sized vector.
pub type DVector<T> = OVector<T, Dyn>;

/// An element of SU(n): an n x n complex matrix.
pub type GroupElement = DMatrix<C64>;

/// An element of SL(n,R): an n x n real matrix.
pub type RealGroupElement = DMatrix<f64>;

/// Row-per-element coordinate array produced by an embedding.
pub type Embedding = DMatrix<f64>;

/// Conjugacy-class coordinate of an SU(n) element (length n - 1).
pub type AlcoveCoordinate = DVector<f64>;

/// Sorted log-singular-values of a matrix (length n).
pub type CartanCoordinate = DVector<f64>;

/// Numerical tolerances. These are fixed per check and not user-configurable.
pub mod constants {
    /// Maximum Frobenius deviation from unitarity and unit determinant
    /// accepted for a group element.
    pub const GROUP_TOLERANCE: f64 = 1e-8;

    /// Maximum asymmetry |D_ij - D_ji| accepted in a distance matrix.
    pub const SYMMETRY_TOLERANCE: f64 = 1e-9;

    /// Largest negative value treated as zero in distances and spectra.
    pub const NON_NEGATIVITY_TOLERANCE: f64 = 1e-10;

    /// Relative gap below which two eigenvalues are considered equal when
    /// building an eigenvector basis.
    pub const EIGENVALUE_SEPARATION: f64 = 1e-10;

    /// Largest Schur coupling between two numerically equal eigenvalues that
    /// is dropped as rounding noise. Larger couplings mean the matrix is not
    /// diagonalizable in floating point.
    pub const DEGENERATE_COUPLING: f64 = 1e-8;

    /// Reciprocal condition estimate below which an eigenvector basis is
    /// rejected as non-invertible.
    pub const EIGENBASIS_CONDITION: f64 = 1e-12;

    /// Smallest singular value or pivot, relative to the largest, treated as
    /// non-zero by the decompositions.
    pub const RANK_TOLERANCE: f64 = 1e-12;

    /// Centred sum of squares, relative to the raw sum of squares, below
    /// which a sample is treated as constant by the correlation measures.
    pub const CONSTANT_VARIANCE: f64 = 1e-20;

    /// Convergence threshold passed to the iterative Schur and SVD solvers.
    pub const SOLVER_EPSILON: f64 = f64::EPSILON;

    /// Iteration cap for the Schur and SVD solvers.
    pub const SOLVER_MAX_ITERATIONS: usize = 10_000;
}

/// Complex zero.
#[inline]
pub fn c_zero() -> C64 {
    C64::new(0.0, 0.0)
}

/// Complex one.
#[inline]
pub fn c_one() -> C64 {
    C64::new(1.0, 0.0)
}
