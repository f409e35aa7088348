//! # Surface Translator
//!
//! Maps one surface card to a [`CadSurfaceDescriptor`].
//!
//! Every kind reduces to one of four family derivations:
//!
//! | family | frame origin | inside point | radius contribution |
//! |--------|--------------|--------------|---------------------|
//! | sphere | center | center | `\|center\| + R + offset` |
//! | plane | point on plane | point shifted `-offset` along normal | `\|point\| + offset` |
//! | cylinder | axis point | axis point | `\|point\| + r + offset` |
//! | cone | apex shifted `+offset` along axis | frame origin | `\|apex\| + tan·offset + offset` |
//!
//! Cones are placed one offset away from the apex because CAD kernels need
//! an axis point distinct from it.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use mcnp_cad::CadTranslator;
//! use pipeline_types::SurfaceKind;
//!
//! let translator = CadTranslator::default();
//! let d = translator.translate(SurfaceKind::Pz, &[5.0]).unwrap();
//! assert_eq!(d.frame.origin, DVec3::new(0.0, 0.0, 5.0));
//! assert_eq!(d.inside_point, DVec3::new(0.0, 0.0, 4.0));
//! assert_eq!(d.radius_contribution, 6.0);
//! ```

use config::constants::GlobalConfig;
use glam::DVec3;
use pipeline_types::SurfaceKind;

use crate::error::{CadError, Result};
use crate::frame::{norm, shift_along_axis, CadSurfaceDescriptor, Frame, ShapeParams};

// =============================================================================
// TRANSLATOR
// =============================================================================

/// Stateless surface translator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CadTranslator {
    /// Distance between a surface and its inside point.
    pub offset: f64,
    /// Shortest plane normal accepted.
    pub tolerance: f64,
}

impl Default for CadTranslator {
    fn default() -> Self {
        Self::new(&GlobalConfig::default())
    }
}

impl CadTranslator {
    pub fn new(config: &GlobalConfig) -> Self {
        Self {
            offset: config.inside_offset,
            tolerance: config.zero_norm_tolerance,
        }
    }

    /// Translate one surface.
    ///
    /// ## Errors
    ///
    /// - `ParameterCount` if `params` does not fit `kind`
    /// - `NonFinite` if a parameter is NaN or infinite
    /// - `NegativeRadius` for a sphere or cylinder with `R < 0`
    /// - `ZeroNormal` for a `p` plane with a vanishing normal
    /// - `NegativeTangentSquared` for a cone with negative `t²`
    /// - `InvalidSheet` for a cone sheet selector other than ±1
    pub fn translate(&self, kind: SurfaceKind, params: &[f64]) -> Result<CadSurfaceDescriptor> {
        let arity = kind.arity();
        if !arity.contains(&params.len()) {
            return Err(CadError::ParameterCount {
                kind,
                min: *arity.start(),
                max: *arity.end(),
                found: params.len(),
            });
        }
        if let Some((index, &value)) = params.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(CadError::NonFinite { kind, index, value });
        }
        let p = |i: usize| params.get(i).copied().unwrap_or_default();

        let (frame, shape, inside_point, radius_contribution) = match kind {
            SurfaceKind::So => self.sphere(kind, DVec3::ZERO, p(0))?,
            SurfaceKind::Sx => self.sphere(kind, DVec3::new(p(0), 0.0, 0.0), p(1))?,
            SurfaceKind::Sy => self.sphere(kind, DVec3::new(0.0, p(0), 0.0), p(1))?,
            SurfaceKind::Sz => self.sphere(kind, DVec3::new(0.0, 0.0, p(0)), p(1))?,
            SurfaceKind::S => self.sphere(kind, DVec3::new(p(0), p(1), p(2)), p(3))?,

            SurfaceKind::Px => self.plane(DVec3::new(p(0), 0.0, 0.0), DVec3::X),
            SurfaceKind::Py => self.plane(DVec3::new(0.0, p(0), 0.0), DVec3::Y),
            SurfaceKind::Pz => self.plane(DVec3::new(0.0, 0.0, p(0)), DVec3::Z),
            SurfaceKind::P => self.general_plane(kind, DVec3::new(p(0), p(1), p(2)), p(3))?,

            SurfaceKind::Cx => self.cylinder(kind, DVec3::ZERO, p(0), DVec3::X)?,
            SurfaceKind::Cy => self.cylinder(kind, DVec3::ZERO, p(0), DVec3::Y)?,
            SurfaceKind::Cz => self.cylinder(kind, DVec3::ZERO, p(0), DVec3::Z)?,
            SurfaceKind::CParallelX => self.cylinder(kind, DVec3::new(0.0, p(0), p(1)), p(2), DVec3::X)?,
            SurfaceKind::CParallelY => self.cylinder(kind, DVec3::new(p(0), 0.0, p(1)), p(2), DVec3::Y)?,
            SurfaceKind::CParallelZ => self.cylinder(kind, DVec3::new(p(0), p(1), 0.0), p(2), DVec3::Z)?,

            SurfaceKind::Kx => self.cone(kind, DVec3::new(p(0), 0.0, 0.0), DVec3::X, &params[1..])?,
            SurfaceKind::Ky => self.cone(kind, DVec3::new(0.0, p(0), 0.0), DVec3::Y, &params[1..])?,
            SurfaceKind::Kz => self.cone(kind, DVec3::new(0.0, 0.0, p(0)), DVec3::Z, &params[1..])?,
            SurfaceKind::KParallelX => self.cone(kind, DVec3::new(p(0), p(1), p(2)), DVec3::X, &params[3..])?,
            SurfaceKind::KParallelY => self.cone(kind, DVec3::new(p(0), p(1), p(2)), DVec3::Y, &params[3..])?,
            SurfaceKind::KParallelZ => self.cone(kind, DVec3::new(p(0), p(1), p(2)), DVec3::Z, &params[3..])?,
        };

        Ok(CadSurfaceDescriptor {
            kind,
            frame,
            shape,
            inside_point,
            radius_contribution,
        })
    }

    // =========================================================================
    // FAMILIES
    // =========================================================================

    fn sphere(&self, kind: SurfaceKind, center: DVec3, radius: f64) -> Result<Derived> {
        check_radius(kind, radius)?;
        Ok((
            Frame::new(center, DVec3::Z),
            ShapeParams::Sphere { radius },
            center,
            norm(center) + radius + self.offset,
        ))
    }

    /// Plane through `point` with unit `normal`.
    fn plane(&self, point: DVec3, normal: DVec3) -> Derived {
        (
            Frame::new(point, normal),
            ShapeParams::Plane,
            shift_along_axis(point, normal, -self.offset),
            norm(point) + self.offset,
        )
    }

    /// Plane `A x + B y + C z = D`, placed at its point closest to the origin.
    fn general_plane(&self, kind: SurfaceKind, normal: DVec3, d: f64) -> Result<Derived> {
        let length = norm(normal);
        if length < self.tolerance {
            return Err(CadError::ZeroNormal { kind, length });
        }
        let unit = normal / length;
        let point = shift_along_axis(DVec3::ZERO, unit, d / length);
        Ok(self.plane(point, unit))
    }

    fn cylinder(&self, kind: SurfaceKind, center: DVec3, radius: f64, axis: DVec3) -> Result<Derived> {
        check_radius(kind, radius)?;
        Ok((
            Frame::new(center, axis),
            ShapeParams::Cylinder { radius },
            center,
            norm(center) + radius + self.offset,
        ))
    }

    /// `rest` is `[t², sheet?]`.
    fn cone(&self, kind: SurfaceKind, apex: DVec3, axis: DVec3, rest: &[f64]) -> Result<Derived> {
        let tan_squared = rest.first().copied().unwrap_or_default();
        if tan_squared < 0.0 {
            return Err(CadError::NegativeTangentSquared {
                kind,
                value: tan_squared,
            });
        }
        let sheet = match rest.get(1).copied() {
            None => None,
            Some(value) if value == 1.0 => Some(1),
            Some(value) if value == -1.0 => Some(-1),
            Some(value) => return Err(CadError::InvalidSheet { kind, value }),
        };

        let tan = tan_squared.sqrt();
        let origin = shift_along_axis(apex, axis, self.offset);
        Ok((
            Frame::new(origin, axis),
            ShapeParams::Cone {
                radius: tan * self.offset,
                half_angle: tan.atan(),
                sheet,
            },
            origin,
            norm(apex) + tan * self.offset + self.offset,
        ))
    }
}

/// Frame, shape, inside point and radius contribution of one surface.
type Derived = (Frame, ShapeParams, DVec3, f64);

fn check_radius(kind: SurfaceKind, radius: f64) -> Result<()> {
    if radius < 0.0 {
        return Err(CadError::NegativeRadius { kind, value: radius });
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
