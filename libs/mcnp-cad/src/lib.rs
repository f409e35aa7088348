//! # MCNP CAD
//!
//! Derives CAD-ready parameters from MCNP surface cards: a frame (point and
//! unit axis), shape parameters, a point on the negative-sense side, and a
//! contribution to the radius of an origin-centred world sphere.
//!
//! Coordinate transforms (`tr` cards) are not applied here; descriptors are
//! expressed in the surface's own coordinates.
//!
//! ## Example
//!
//! ```rust
//! use mcnp_cad::{CadTranslator, ShapeParams};
//! use pipeline_types::SurfaceKind;
//!
//! let d = CadTranslator::default().translate(SurfaceKind::So, &[2.0]).unwrap();
//! assert_eq!(d.shape, ShapeParams::Sphere { radius: 2.0 });
//! assert_eq!(d.radius_contribution, 3.0);
//! ```

pub mod error;
pub mod frame;
pub mod surface_set;
pub mod translator;

pub use error::{CadError, Result};
pub use frame::{norm, shift_along_axis, CadSurfaceDescriptor, Frame, ShapeParams};
pub use surface_set::{translate_surfaces, CadSurfaceSet, SurfaceInput, SurfaceSetError};
pub use translator::CadTranslator;
