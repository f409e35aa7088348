//! # CAD Frames
//!
//! Output types of the translator and the two vector helpers every surface
//! derivation is built from.

use glam::DVec3;
use pipeline_types::SurfaceKind;
use serde::{Deserialize, Serialize};

// =============================================================================
// HELPERS
// =============================================================================

/// Move `point` by `distance` along `axis`.
///
/// `axis` is expected to have unit length; it is not normalized here.
///
/// ```rust
/// use glam::DVec3;
/// use mcnp_cad::frame::shift_along_axis;
///
/// let p = shift_along_axis(DVec3::new(0.0, 0.0, 5.0), DVec3::Z, -1.0);
/// assert_eq!(p, DVec3::new(0.0, 0.0, 4.0));
/// ```
pub fn shift_along_axis(point: DVec3, axis: DVec3, distance: f64) -> DVec3 {
    point + axis * distance
}

/// Euclidean length.
pub fn norm(v: DVec3) -> f64 {
    v.length()
}

// =============================================================================
// DESCRIPTOR
// =============================================================================

/// Placement of a CAD primitive: a point and a unit axis.
///
/// For planes the axis is the normal; for spheres it is fixed to +Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub origin: DVec3,
    pub axis: DVec3,
}

impl Frame {
    pub fn new(origin: DVec3, axis: DVec3) -> Self {
        Self { origin, axis }
    }
}

/// Shape parameters of a CAD primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ShapeParams {
    Sphere {
        radius: f64,
    },
    Plane,
    Cylinder {
        radius: f64,
    },
    /// Cone cut one offset away from its apex.
    Cone {
        /// Radius of the cone at the frame origin.
        radius: f64,
        /// Half-angle in radians.
        half_angle: f64,
        /// `+1` or `-1` to keep one sheet; `None` keeps both.
        sheet: Option<i8>,
    },
}

/// Everything a CAD kernel needs to build one surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CadSurfaceDescriptor {
    pub kind: SurfaceKind,
    pub frame: Frame,
    pub shape: ShapeParams,
    /// A point on the negative-sense side of the surface.
    pub inside_point: DVec3,
    /// Radius of an origin-centred sphere that encloses the inside point
    /// and the primitive's extent.
    pub radius_contribution: f64,
}
