//! # Config Crate
//!
//! Centralized configuration constants for the MCNP geometry pipeline.
//! All magic numbers and tunable parameters are defined here so that the
//! deck parser, the geometry grammar and the CAD translator agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{CAD_INSIDE_OFFSET, ZERO_NORM_TOLERANCE};
//!
//! // A normal shorter than the tolerance cannot be normalized.
//! let length: f64 = 1e-13;
//! assert!(length < ZERO_NORM_TOLERANCE);
//!
//! // Inside points sit one offset below their surface.
//! assert!(CAD_INSIDE_OFFSET > 0.0);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Format Compatible**: Column rules match the MCNP input format
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
