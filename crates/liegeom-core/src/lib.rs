//! Core types and routines for matrix Lie groups.
//!
//! This crate provides Haar sampling of SU(n), the principal matrix
//! logarithm, the bi-invariant distance and pairwise distance matrices. It
//! is the foundation that the embedding and structure crates build on.
//!
//! # Key Concepts
//!
//! - **Group elements**: complex n×n matrices in SU(n), or real matrices in SL(n,R)
//! - **Haar measure**: the unique invariant probability measure on a compact group
//! - **Bi-invariant distance**: ‖log(U†V)‖_F, unchanged by left and right translation
//! - **Distance matrix**: symmetric, zero-diagonal, non-negative pairwise distances
//!
//! # Modules
//!
//! - [`config`]: Parallel execution settings
//! - [`distance`]: Distance matrices and their builder
//! - [`error`]: Error type shared by the workspace
//! - [`logarithm`]: Principal matrix logarithm and matching exponentials
//! - [`metric`]: Bi-invariant metric and the metric trait
//! - [`sampling`]: Haar-random SU(n) and random SL(n,R) elements
//! - [`types`]: Type aliases and numerical tolerances
//! - [`validation`]: Group membership checks

pub mod config;
pub mod distance;
pub mod error;
pub mod logarithm;
pub mod metric;
pub mod sampling;
pub mod types;
pub mod validation;

pub use error::{LieError, Result};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use liegeom_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::ParallelConfig;
    pub use crate::distance::{
        compute_distance_matrix, compute_distance_matrix_with, DistanceMatrix,
        DistanceMatrixBuilder,
    };
    pub use crate::error::{LieError, Result};
    pub use crate::logarithm::{matrix_log, matrix_log_with_flag, LogBranch};
    pub use crate::metric::{bi_invariant_distance, BiInvariantMetric, GroupMetric};
    pub use crate::sampling::{
        sample_sln_real, sample_su, sample_su_batch, HaarSampler,
    };
    pub use crate::types::{
        constants, AlcoveCoordinate, CartanCoordinate, DMatrix, DVector, Embedding,
        GroupElement, RealGroupElement, C64,
    };
}
