//! Cartan–Killing types, their Cartan subalgebras and Weyl chambers.
//!
//! Only type A (the special unitary and special linear families) is
//! implemented. The other classical and exceptional types are listed so
//! callers can name them, and return [`LieError::Unsupported`].

use crate::alcove::sun_alcove_coords;
use liegeom_core::{
    error::{LieError, Result},
    types::{AlcoveCoordinate, DMatrix, GroupElement},
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cartan–Killing classification letter of a simple Lie algebra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CartanType {
    /// sl(r+1), su(r+1)
    A,
    /// so(2r+1)
    B,
    /// sp(2r)
    C,
    /// so(2r)
    D,
    /// E6, E7, E8
    E,
    /// F4
    F,
    /// G2
    G,
}

impl CartanType {
    /// All types in classification order.
    pub const ALL: [CartanType; 7] = [
        CartanType::A,
        CartanType::B,
        CartanType::C,
        CartanType::D,
        CartanType::E,
        CartanType::F,
        CartanType::G,
    ];

    /// Classification letter.
    pub fn letter(&self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
            Self::F => 'F',
            Self::G => 'G',
        }
    }

    /// Whether chamber projections and Cartan bases exist for this type.
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::A)
    }

    fn unsupported(&self, what: &str) -> LieError {
        LieError::unsupported(format!("{} for Cartan type {}", what, self.letter()))
    }
}

impl fmt::Display for CartanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for CartanType {
    type Err = LieError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            "E" => Ok(Self::E),
            "F" => Ok(Self::F),
            "G" => Ok(Self::G),
            _ => Err(LieError::unknown_method(s)),
        }
    }
}

/// Projects `g` onto the positive Weyl chamber of the given type.
///
/// For type A this is [`sun_alcove_coords`].
///
/// # Errors
///
/// - `Unsupported`: for every type other than A
pub fn weyl_chamber_projection(g: &GroupElement, lie_type: CartanType) -> Result<AlcoveCoordinate> {
    match lie_type {
        CartanType::A => sun_alcove_coords(g),
        other => Err(other.unsupported("Weyl chamber projection")),
    }
}

/// Basis of the Cartan subalgebra of the rank-`rank` algebra of the given type.
///
/// For A_r this is the r diagonal traceless matrices `E_ii − E_{i+1,i+1}`
/// of size r + 1.
///
/// # Errors
///
/// - `InvalidDimension`: if `rank == 0`
/// - `Unsupported`: for every type other than A
pub fn cartan_subalgebra_basis(lie_type: CartanType, rank: usize) -> Result<Vec<DMatrix<f64>>> {
    if rank == 0 {
        return Err(LieError::invalid_dimension("Cartan subalgebra rank must be at least 1"));
    }
    match lie_type {
        CartanType::A => {
            let size = rank + 1;
            Ok((0..rank)
                .map(|i| {
                    let mut h = DMatrix::<f64>::zeros(size, size);
                    h[(i, i)] = 1.0;
                    h[(i + 1, i + 1)] = -1.0;
                    h
                })
                .collect())
        }
        other => Err(other.unsupported("Cartan subalgebra basis")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_letters() {
        for t in CartanType::ALL {
            assert_eq!(t.to_string().parse::<CartanType>().unwrap(), t);
        }
        assert_eq!("a".parse::<CartanType>().unwrap(), CartanType::A);
        assert!(matches!(
            "Z".parse::<CartanType>(),
            Err(LieError::UnknownMethod { .. })
        ));
        assert!(matches!(
            "AB".parse::<CartanType>(),
            Err(LieError::UnknownMethod { .. })
        ));
    }

    #[test]
    fn test_type_a_basis() {
        let basis = cartan_subalgebra_basis(CartanType::A, 3).unwrap();
        assert_eq!(basis.len(), 3);
        for h in &basis {
            assert_eq!(h.shape(), (4, 4));
            assert_eq!(h.trace(), 0.0);
            for i in 0..4 {
                for j in 0..4 {
                    if i != j {
                        assert_eq!(h[(i, j)], 0.0);
                    }
                }
            }
        }
        for a in &basis {
            for b in &basis {
                assert_eq!(a * b - b * a, DMatrix::<f64>::zeros(4, 4));
            }
        }
    }

    #[test]
    fn test_unsupported_types() {
        let g = GroupElement::identity(3, 3);
        for t in CartanType::ALL.into_iter().filter(|t| !t.is_supported()) {
            assert!(matches!(
                weyl_chamber_projection(&g, t),
                Err(LieError::Unsupported { .. })
            ));
            assert!(matches!(
                cartan_subalgebra_basis(t, 2),
                Err(LieError::Unsupported { .. })
            ));
        }
    }

    #[test]
    fn test_zero_rank() {
        assert!(matches!(
            cartan_subalgebra_basis(CartanType::A, 0),
            Err(LieError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_type_a_projection_is_alcove() {
        let g = GroupElement::identity(4, 4);
        assert_eq!(
            weyl_chamber_projection(&g, CartanType::A).unwrap(),
            sun_alcove_coords(&g).unwrap()
        );
    }
}
