//! # Error Types
//!
//! Errors raised while deriving CAD parameters from a surface card.
//!
//! ## Error Policy
//!
//! - Invalid input fails the whole translation
//! - No default frame or parameter is substituted

use pipeline_types::SurfaceKind;
use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while translating one surface.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CadError {
    /// A cone's squared tangent is negative.
    #[error("surface '{kind}': squared cone tangent must not be negative, found {value}")]
    NegativeTangentSquared {
        kind: SurfaceKind,
        value: f64,
    },

    /// A sphere or cylinder radius is negative.
    #[error("surface '{kind}': radius must not be negative, found {value}")]
    NegativeRadius {
        kind: SurfaceKind,
        value: f64,
    },

    /// A parameter is NaN or infinite.
    #[error("surface '{kind}': parameter {index} must be finite, found {value}")]
    NonFinite {
        kind: SurfaceKind,
        /// 0-based position in the parameter list.
        index: usize,
        value: f64,
    },

    /// A general plane's normal is too short to normalize.
    #[error("surface '{kind}': plane normal has length {length}, too short to normalize")]
    ZeroNormal {
        kind: SurfaceKind,
        length: f64,
    },

    /// The parameter list does not fit the surface kind.
    #[error("surface '{kind}' takes {min} to {max} parameters, found {found}")]
    ParameterCount {
        kind: SurfaceKind,
        min: usize,
        max: usize,
        found: usize,
    },

    /// A cone sheet selector other than `+1` or `-1`.
    #[error("surface '{kind}': cone sheet selector must be +1 or -1, found {value}")]
    InvalidSheet {
        kind: SurfaceKind,
        value: f64,
    },
}

/// Result type for CAD translation.
pub type Result<T> = std::result::Result<T, CadError>;
