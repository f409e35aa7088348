//! # Pipeline Types
//!
//! Vocabulary shared by more than one stage of the MCNP geometry pipeline:
//! the fixed surface-kind mnemonic table and surface names.
//!
//! ```text
//! mcnp-deck (splits cards) ──► mcnp-cad (translates surfaces)
//!        └──────── SurfaceKind / SurfaceName ────────┘
//! ```

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// ERRORS
// =============================================================================

/// Errors raised when parsing shared vocabulary from card text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// Token is not one of the surface mnemonics.
    #[error("unknown surface kind '{0}'")]
    UnknownSurfaceKind(String),

    /// Token is not a surface name.
    #[error("invalid surface name '{0}'")]
    InvalidSurfaceName(String),
}

// =============================================================================
// SURFACE KIND
// =============================================================================

/// Geometric family a surface kind belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceFamily {
    Sphere,
    Plane,
    Cylinder,
    Cone,
}

/// One entry of the fixed surface mnemonic table.
///
/// Matching is case-insensitive; [`SurfaceKind::mnemonic`] returns the
/// canonical lowercase spelling.
///
/// ```rust
/// use pipeline_types::SurfaceKind;
///
/// let kind: SurfaceKind = "C/Z".parse().unwrap();
/// assert_eq!(kind, SurfaceKind::CParallelZ);
/// assert_eq!(kind.mnemonic(), "c/z");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceKind {
    /// Sphere centered at the origin: `R`.
    #[serde(rename = "so")]
    So,
    /// Sphere centered on the x axis: `x R`.
    #[serde(rename = "sx")]
    Sx,
    /// Sphere centered on the y axis: `y R`.
    #[serde(rename = "sy")]
    Sy,
    /// Sphere centered on the z axis: `z R`.
    #[serde(rename = "sz")]
    Sz,
    /// General sphere: `x y z R`.
    #[serde(rename = "s")]
    S,
    /// Plane normal to x: `D`.
    #[serde(rename = "px")]
    Px,
    /// Plane normal to y: `D`.
    #[serde(rename = "py")]
    Py,
    /// Plane normal to z: `D`.
    #[serde(rename = "pz")]
    Pz,
    /// General plane `Ax + By + Cz - D = 0`: `A B C D`.
    #[serde(rename = "p")]
    P,
    /// Cylinder on the x axis: `R`.
    #[serde(rename = "cx")]
    Cx,
    /// Cylinder on the y axis: `R`.
    #[serde(rename = "cy")]
    Cy,
    /// Cylinder on the z axis: `R`.
    #[serde(rename = "cz")]
    Cz,
    /// Cylinder parallel to x: `y z R`.
    #[serde(rename = "c/x")]
    CParallelX,
    /// Cylinder parallel to y: `x z R`.
    #[serde(rename = "c/y")]
    CParallelY,
    /// Cylinder parallel to z: `x y R`.
    #[serde(rename = "c/z")]
    CParallelZ,
    /// Cone on the x axis: `x t² [±1]`.
    #[serde(rename = "kx")]
    Kx,
    /// Cone on the y axis: `y t² [±1]`.
    #[serde(rename = "ky")]
    Ky,
    /// Cone on the z axis: `z t² [±1]`.
    #[serde(rename = "kz")]
    Kz,
    /// Cone parallel to x: `x y z t² [±1]`.
    #[serde(rename = "k/x")]
    KParallelX,
    /// Cone parallel to y: `x y z t² [±1]`.
    #[serde(rename = "k/y")]
    KParallelY,
    /// Cone parallel to z: `x y z t² [±1]`.
    #[serde(rename = "k/z")]
    KParallelZ,
}

impl SurfaceKind {
    /// Every mnemonic in table order.
    pub const ALL: [SurfaceKind; 21] = [
        Self::So,
        Self::Sx,
        Self::Sy,
        Self::Sz,
        Self::S,
        Self::Px,
        Self::Py,
        Self::Pz,
        Self::P,
        Self::Cx,
        Self::Cy,
        Self::Cz,
        Self::CParallelX,
        Self::CParallelY,
        Self::CParallelZ,
        Self::Kx,
        Self::Ky,
        Self::Kz,
        Self::KParallelX,
        Self::KParallelY,
        Self::KParallelZ,
    ];

    /// Canonical lowercase mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::So => "so",
            Self::Sx => "sx",
            Self::Sy => "sy",
            Self::Sz => "sz",
            Self::S => "s",
            Self::Px => "px",
            Self::Py => "py",
            Self::Pz => "pz",
            Self::P => "p",
            Self::Cx => "cx",
            Self::Cy => "cy",
            Self::Cz => "cz",
            Self::CParallelX => "c/x",
            Self::CParallelY => "c/y",
            Self::CParallelZ => "c/z",
            Self::Kx => "kx",
            Self::Ky => "ky",
            Self::Kz => "kz",
            Self::KParallelX => "k/x",
            Self::KParallelY => "k/y",
            Self::KParallelZ => "k/z",
        }
    }

    /// Family of the primitive.
    pub const fn family(self) -> SurfaceFamily {
        match self {
            Self::So | Self::Sx | Self::Sy | Self::Sz | Self::S => SurfaceFamily::Sphere,
            Self::Px | Self::Py | Self::Pz | Self::P => SurfaceFamily::Plane,
            Self::Cx
            | Self::Cy
            | Self::Cz
            | Self::CParallelX
            | Self::CParallelY
            | Self::CParallelZ => SurfaceFamily::Cylinder,
            Self::Kx
            | Self::Ky
            | Self::Kz
            | Self::KParallelX
            | Self::KParallelY
            | Self::KParallelZ => SurfaceFamily::Cone,
        }
    }

    /// Accepted number of card parameters.
    ///
    /// Cones take one optional trailing sheet selector.
    ///
    /// ```rust
    /// use pipeline_types::SurfaceKind;
    ///
    /// assert_eq!(SurfaceKind::P.arity(), 4..=4);
    /// assert_eq!(SurfaceKind::Kz.arity(), 2..=3);
    /// ```
    pub const fn arity(self) -> RangeInclusive<usize> {
        match self {
            Self::So | Self::Px | Self::Py | Self::Pz | Self::Cx | Self::Cy | Self::Cz => 1..=1,
            Self::Sx | Self::Sy | Self::Sz => 2..=2,
            Self::CParallelX | Self::CParallelY | Self::CParallelZ => 3..=3,
            Self::S | Self::P => 4..=4,
            Self::Kx | Self::Ky | Self::Kz => 2..=3,
            Self::KParallelX | Self::KParallelY | Self::KParallelZ => 4..=5,
        }
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl FromStr for SurfaceKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.mnemonic().eq_ignore_ascii_case(s))
            .ok_or_else(|| TypeError::UnknownSurfaceKind(s.to_string()))
    }
}

// =============================================================================
// SURFACE NAME
// =============================================================================

/// Boundary condition marker written in front of a surface number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMarker {
    #[default]
    None,
    /// `*` – specularly reflecting surface.
    Reflective,
    /// `+` – white boundary.
    WhiteBoundary,
}

impl BoundaryMarker {
    /// Marker character, if any.
    pub const fn symbol(self) -> Option<char> {
        match self {
            Self::None => None,
            Self::Reflective => Some('*'),
            Self::WhiteBoundary => Some('+'),
        }
    }
}

/// Surface number together with its boundary marker.
///
/// ```rust
/// use pipeline_types::{BoundaryMarker, SurfaceName};
///
/// let name: SurfaceName = "*12".parse().unwrap();
/// assert_eq!(name.id, 12);
/// assert_eq!(name.marker, BoundaryMarker::Reflective);
/// assert_eq!(name.to_string(), "*12");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceName {
    pub id: u32,
    pub marker: BoundaryMarker,
}

impl SurfaceName {
    pub const fn new(id: u32) -> Self {
        Self {
            id,
            marker: BoundaryMarker::None,
        }
    }

    pub const fn with_marker(mut self, marker: BoundaryMarker) -> Self {
        self.marker = marker;
        self
    }
}

impl fmt::Display for SurfaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(symbol) = self.marker.symbol() {
            write!(f, "{symbol}")?;
        }
        write!(f, "{}", self.id)
    }
}

impl FromStr for SurfaceName {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (marker, digits) = match s.chars().next() {
            Some('*') => (BoundaryMarker::Reflective, &s[1..]),
            Some('+') => (BoundaryMarker::WhiteBoundary, &s[1..]),
            _ => (BoundaryMarker::None, s),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TypeError::InvalidSurfaceName(s.to_string()));
        }
        let id: u32 = digits
            .parse()
            .map_err(|_| TypeError::InvalidSurfaceName(s.to_string()))?;
        if id == 0 {
            return Err(TypeError::InvalidSurfaceName(s.to_string()));
        }
        Ok(Self { id, marker })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_unique_mnemonics() {
        let mut seen = std::collections::HashSet::new();
        for kind in SurfaceKind::ALL {
            assert!(seen.insert(kind.mnemonic()), "duplicate {}", kind);
        }
        assert_eq!(seen.len(), 21);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        for kind in SurfaceKind::ALL {
            let upper = kind.mnemonic().to_uppercase();
            assert_eq!(upper.parse::<SurfaceKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_kind() {
        let err = "gq".parse::<SurfaceKind>().unwrap_err();
        assert_eq!(err, TypeError::UnknownSurfaceKind("gq".to_string()));
    }

    #[test]
    fn test_families() {
        assert_eq!(SurfaceKind::So.family(), SurfaceFamily::Sphere);
        assert_eq!(SurfaceKind::P.family(), SurfaceFamily::Plane);
        assert_eq!(SurfaceKind::CParallelY.family(), SurfaceFamily::Cylinder);
        assert_eq!(SurfaceKind::KParallelX.family(), SurfaceFamily::Cone);
    }

    #[test]
    fn test_serde_uses_mnemonic() {
        let json = serde_json::to_string(&SurfaceKind::KParallelZ).unwrap();
        assert_eq!(json, "\"k/z\"");
    }

    #[test]
    fn test_surface_name_markers() {
        assert_eq!("+3".parse::<SurfaceName>().unwrap().marker, BoundaryMarker::WhiteBoundary);
        assert_eq!("3".parse::<SurfaceName>().unwrap(), SurfaceName::new(3));
        assert!("*".parse::<SurfaceName>().is_err());
        assert!("0".parse::<SurfaceName>().is_err());
        assert!("-3".parse::<SurfaceName>().is_err());
        assert!("3a".parse::<SurfaceName>().is_err());
    }
}
