//! Structure theory of matrix Lie groups.
//!
//! # Modules
//!
//! - [`alcove`]: Weyl alcove coordinates of SU(n) conjugacy classes
//! - [`cartan_type`]: Cartan–Killing types, Cartan subalgebras and Weyl chambers
//! - [`decomposition`]: Cartan (KAK), polar and Iwasawa (KAN) decompositions

pub mod alcove;
pub mod cartan_type;
pub mod decomposition;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::alcove::{
        alcove_coords_batch, su3_alcove_coords, sun_alcove_coords, SU3_ALCOVE_VERTICES,
    };
    pub use crate::cartan_type::{cartan_subalgebra_basis, weyl_chamber_projection, CartanType};
    pub use crate::decomposition::{
        cartan_decomposition, cartan_decomposition_complex, cartan_projection,
        cartan_projection_complex, cartan_projection_with, iwasawa_decomposition,
        polar_decomposition, polar_decomposition_complex, CartanDecomposition, CartanOutput,
        IwasawaDecomposition,
    };
}
