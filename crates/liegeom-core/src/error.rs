//! Error types for Lie group computations.
//!
//! This module defines the single error type shared by sampling, logarithms,
//! distances, embeddings and decompositions. Every failure is reported at the
//! call that detects it; nothing is retried internally.

use thiserror::Error;

/// Errors that can occur during Lie group computations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LieError {
    /// Dimension is invalid or shapes do not match.
    ///
    /// Raised for `n < 1`, non-square matrices, mismatched element sizes and
    /// target dimensions the data cannot support.
    #[error("Invalid dimension: {reason}")]
    InvalidDimension {
        /// Description of the dimension problem
        reason: String,
    },

    /// Matrix is not a valid group element.
    ///
    /// Raised when unitarity or the unit-determinant constraint is violated
    /// beyond the fixed group tolerance.
    #[error("Matrix is not a group element: {reason}")]
    InvalidElement {
        /// Description of the violated constraint
        reason: String,
    },

    /// Matrix is singular where an inverse or a determinant root is required.
    #[error("Singular matrix: {reason}")]
    SingularMatrix {
        /// Description of where the singularity was detected
        reason: String,
    },

    /// Singular value decomposition could not be used on the input.
    #[error("Singular input: {reason}")]
    SingularInput {
        /// Description of the SVD failure
        reason: String,
    },

    /// Hermitian logarithm of a matrix that is not positive definite.
    #[error("Non-positive eigenvalue {value} in Hermitian logarithm")]
    NonPositiveEigenvalue {
        /// The offending eigenvalue
        value: f64,
    },

    /// Eigenvector basis is numerically non-invertible.
    ///
    /// Occurs for near-degenerate eigenvalues whose eigenvectors collapse onto
    /// each other, which defeats the reconstruction `V diag(log λ) V⁻¹`.
    #[error("Singular eigenvector basis: {reason}")]
    SingularEigenbasis {
        /// Description of the degeneracy
        reason: String,
    },

    /// The k-nearest-neighbor graph has more than one connected component.
    #[error(
        "Neighbor graph has {components} connected components with n_neighbors = {n_neighbors}; increase the neighbor count"
    )]
    DisconnectedNeighborGraph {
        /// Number of connected components found
        components: usize,
        /// Neighbor count used to build the graph
        n_neighbors: usize,
    },

    /// Unrecognized embedding method or Cartan type selector.
    #[error("Unknown method: {name}")]
    UnknownMethod {
        /// The selector that was not recognized
        name: String,
    },

    /// Input kind is not accepted by the requested operation.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the problem
        reason: String,
    },

    /// Recognized but unimplemented feature.
    #[error("Not supported: {feature}")]
    Unsupported {
        /// Name of the unsupported feature
        feature: String,
    },

    /// Numerical instability detected.
    #[error("Numerical instability detected: {reason}")]
    NumericalError {
        /// Description of the numerical issue
        reason: String,
    },
}

impl LieError {
    /// Create an InvalidDimension error.
    pub fn invalid_dimension<S: Into<String>>(reason: S) -> Self {
        Self::InvalidDimension {
            reason: reason.into(),
        }
    }

    /// Create an InvalidDimension error describing a shape mismatch.
    pub fn dimension_mismatch<S1, S2>(expected: S1, actual: S2) -> Self
    where
        S1: std::fmt::Display,
        S2: std::fmt::Display,
    {
        Self::InvalidDimension {
            reason: format!("expected {}, got {}", expected, actual),
        }
    }

    /// Create an InvalidElement error.
    pub fn invalid_element<S: Into<String>>(reason: S) -> Self {
        Self::InvalidElement {
            reason: reason.into(),
        }
    }

    /// Create a SingularMatrix error.
    pub fn singular_matrix<S: Into<String>>(reason: S) -> Self {
        Self::SingularMatrix {
            reason: reason.into(),
        }
    }

    /// Create a SingularInput error.
    pub fn singular_input<S: Into<String>>(reason: S) -> Self {
        Self::SingularInput {
            reason: reason.into(),
        }
    }

    /// Create a NonPositiveEigenvalue error.
    pub fn non_positive_eigenvalue(value: f64) -> Self {
        Self::NonPositiveEigenvalue { value }
    }

    /// Create a SingularEigenbasis error.
    pub fn singular_eigenbasis<S: Into<String>>(reason: S) -> Self {
        Self::SingularEigenbasis {
            reason: reason.into(),
        }
    }

    /// Create a DisconnectedNeighborGraph error.
    pub fn disconnected_graph(components: usize, n_neighbors: usize) -> Self {
        Self::DisconnectedNeighborGraph {
            components,
            n_neighbors,
        }
    }

    /// Create an UnknownMethod error.
    pub fn unknown_method<S: Into<String>>(name: S) -> Self {
        Self::UnknownMethod { name: name.into() }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input<S: Into<String>>(reason: S) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Create an Unsupported error for a specific feature.
    pub fn unsupported<S: Into<String>>(feature: S) -> Self {
        Self::Unsupported {
            feature: feature.into(),
        }
    }

    /// Create a NumericalError with a custom reason.
    pub fn numerical_error<S: Into<String>>(reason: S) -> Self {
        Self::NumericalError {
            reason: reason.into(),
        }
    }
}

/// Result type alias for Lie group operations.
pub type Result<T> = std::result::Result<T, LieError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_creation() {
        let err = LieError::invalid_dimension("n must be at least 1");
        assert!(matches!(err, LieError::InvalidDimension { .. }));
        assert_eq!(err.to_string(), "Invalid dimension: n must be at least 1");

        let err = LieError::dimension_mismatch("3x3", "4x4");
        assert!(matches!(err, LieError::InvalidDimension { .. }));
        assert_eq!(err.to_string(), "Invalid dimension: expected 3x3, got 4x4");
    }

    #[test]
    fn test_error_display() {
        let errors = vec![
            LieError::invalid_element("not unitary"),
            LieError::singular_matrix("zero determinant"),
            LieError::singular_input("SVD did not converge"),
            LieError::non_positive_eigenvalue(-0.5),
            LieError::singular_eigenbasis("eigenvalues too close"),
            LieError::disconnected_graph(3, 4),
            LieError::unknown_method("tsne"),
            LieError::invalid_input("distance matrix given to linear projection"),
            LieError::unsupported("Cartan type B"),
            LieError::numerical_error("Schur iteration did not converge"),
        ];

        for err in errors {
            assert!(!err.to_string().is_empty());
        }
    }

    #[test]
    fn test_error_context() {
        let err = LieError::disconnected_graph(2, 5);
        if let LieError::DisconnectedNeighborGraph {
            components,
            n_neighbors,
        } = &err
        {
            assert_eq!(*components, 2);
            assert_eq!(*n_neighbors, 5);
        } else {
            panic!("Expected DisconnectedNeighborGraph variant");
        }
        assert!(err.to_string().contains("increase the neighbor count"));

        let err = LieError::non_positive_eigenvalue(-1.25);
        assert_eq!(
            err.to_string(),
            "Non-positive eigenvalue -1.25 in Hermitian logarithm"
        );
    }
}
