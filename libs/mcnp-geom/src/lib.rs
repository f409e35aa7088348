//! # MCNP Geometry
//!
//! Parses the geometry field of a cell card into a boolean tree over signed
//! surface references.
//!
//! ## Architecture
//!
//! ```text
//! geometry text → lexer (explicit intersections) → parser → GeometryNode
//! ```
//!
//! ## Example
//!
//! ```rust
//! use mcnp_geom::{parse_cell_geometry, CellGeometry, GeometryNode};
//!
//! let geometry = parse_cell_geometry("-1 2 #3").unwrap();
//! let node = geometry.expression().unwrap();
//! assert_eq!(node.surface_refs(), [-1, 2, 3]);
//!
//! assert_eq!(parse_cell_geometry("like 4 but").unwrap(), CellGeometry::Like(4));
//! ```

pub mod error;
pub mod lexer;
pub mod node;
pub mod parser;

pub use error::{GrammarError, GrammarErrorKind, Result};
pub use lexer::normalize_geometry;
pub use node::{CellGeometry, GeometryNode};
pub use parser::Parser;

use tracing::trace;

/// Keyword that marks a geometry field as a reference to another cell.
const LIKE_KEYWORD: &str = "like";

/// Parse a geometry expression.
pub fn parse_geometry(source: &str) -> Result<GeometryNode> {
    let node = Parser::new(source)?.parse()?;
    trace!(depth = node.depth(), "parsed geometry");
    Ok(node)
}

/// Parse a cell's geometry field.
///
/// A field that contains `like` (in any case) is not an expression; the
/// cell number after the keyword is returned for later resolution.
///
/// ## Errors
///
/// Any [`GrammarError`] of [`parse_geometry`], or `UnexpectedToken` when
/// the `like` keyword is not followed by a cell number.
pub fn parse_cell_geometry(source: &str) -> Result<CellGeometry> {
    let lowered = source.to_ascii_lowercase();
    let Some(at) = lowered.find(LIKE_KEYWORD) else {
        return parse_geometry(source).map(CellGeometry::Expression);
    };

    let after = at + LIKE_KEYWORD.len();
    let rest = &source[after..];
    let reference = rest.split_whitespace().next().unwrap_or("");
    let offset = after + rest.find(reference).unwrap_or(0);
    reference
        .parse::<u32>()
        .ok()
        .filter(|&n| n > 0)
        .map(CellGeometry::Like)
        .ok_or_else(|| GrammarError::new(GrammarErrorKind::UnexpectedToken, source, offset))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_is_case_insensitive() {
        assert_eq!(parse_cell_geometry("LIKE 12 BUT").unwrap(), CellGeometry::Like(12));
    }

    #[test]
    fn test_like_without_reference() {
        let err = parse_cell_geometry("like but").unwrap_err();
        assert_eq!(err.kind, GrammarErrorKind::UnexpectedToken);
        assert_eq!(err.offset, 5);
    }

    #[test]
    fn test_expression_field() {
        let geometry = parse_cell_geometry("(1:-2) 3").unwrap();
        assert_eq!(geometry.surface_refs(), [1, -2, 3]);
    }
}
