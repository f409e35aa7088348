//! # MCNP Model
//!
//! Builds the geometry model of an MCNP input deck: cells with parsed
//! boolean geometry, surfaces with CAD descriptors, and the radius of a
//! world sphere centred at the origin.
//!
//! `like n but` references and `tr` transforms are passed through for an
//! outside resolver; they are not applied here.
//!
//! ## Example
//!
//! ```rust
//! use mcnp_geom::CellGeometry;
//! use mcnp_model::{build_model, ModelOptions};
//!
//! let text = "\
//! two spheres
//! 1 1 -7.8 -1 imp:n=1
//! 2 0 1 -2 imp:n=1
//! 3 0 2 imp:n=0
//!
//! 1 so 1.0
//! 2 so 5.0
//!
//! m1 26056 1
//! ";
//! let model = build_model(text, &ModelOptions::default()).unwrap();
//! assert_eq!(model.title.as_deref(), Some("two spheres"));
//! assert_eq!(model.cell(2).unwrap().geometry.surface_refs(), [1, -2]);
//! assert_eq!(model.world_radius, 6.0);
//! ```

pub mod builder;
pub mod error;
pub mod model;

pub use builder::{build_model, ModelOptions};
pub use error::{ModelError, Result};
pub use model::{CellEntry, GeometryModel, SurfaceEntry};
