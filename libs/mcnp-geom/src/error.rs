//! # Grammar Errors
//!
//! Error type for geometry expression tokenizing and parsing.
//!
//! ## Example
//!
//! ```rust
//! use mcnp_geom::{parse_geometry, GrammarErrorKind};
//!
//! let error = parse_geometry("(1 2").unwrap_err();
//! assert_eq!(error.kind, GrammarErrorKind::UnbalancedParen);
//! assert_eq!(error.offset, 0);
//! ```

use std::fmt;

use config::constants::{shorten, FRAGMENT_DISPLAY_WIDTH};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// ERROR KIND
// =============================================================================

/// What went wrong in a geometry field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrammarErrorKind {
    /// A `(` without `)` or a `)` without `(`.
    UnbalancedParen,
    /// Nothing where an operand is required, e.g. `()` or an empty field.
    EmptyOperand,
    /// An operator with no operand on one side.
    DanglingOperator,
    /// A character or number that cannot appear in a geometry field.
    UnexpectedToken,
    /// Surface reference `0`, which has no half-space sense.
    ZeroSurface,
    /// Parentheses and complements nested deeper than `MAX_GEOMETRY_NESTING`.
    NestingTooDeep,
}

impl fmt::Display for GrammarErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::UnbalancedParen => "unbalanced parenthesis",
            Self::EmptyOperand => "empty operand",
            Self::DanglingOperator => "dangling operator",
            Self::UnexpectedToken => "unexpected token",
            Self::ZeroSurface => "zero surface reference",
            Self::NestingTooDeep => "nesting too deep",
        };
        f.write_str(text)
    }
}

// =============================================================================
// GRAMMAR ERROR
// =============================================================================

/// A geometry field that does not follow the expression grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at offset {offset} (near '{fragment}')")]
pub struct GrammarError {
    /// Error kind.
    pub kind: GrammarErrorKind,
    /// Byte offset into the geometry field.
    pub offset: usize,
    /// Field text from `offset` on, shortened for display.
    pub fragment: String,
}

impl GrammarError {
    /// Create an error at `offset` of `source`.
    pub fn new(kind: GrammarErrorKind, source: &str, offset: usize) -> Self {
        let rest = source.get(offset..).unwrap_or("");
        Self {
            kind,
            offset,
            fragment: shorten(rest.trim_end(), FRAGMENT_DISPLAY_WIDTH),
        }
    }
}

/// Result type for geometry parsing.
pub type Result<T> = std::result::Result<T, GrammarError>;
