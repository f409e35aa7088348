//! # Geometry Nodes
//!
//! Boolean tree over signed surface references.
//!
//! Operator chains are flat: `1 2 3` is one [`GeometryNode::Intersection`]
//! with three children. Parenthesized groups stay nested, so `(1 2) 3` keeps
//! its inner intersection.
//!
//! ## Printing
//!
//! `Display` writes the deck's infix form. A child is wrapped in
//! parentheses when it is a union inside an intersection, a chain of the
//! same kind as its parent, or a compound operand of a complement. Printing
//! and re-parsing yields an equal tree.
//!
//! ## Depth
//!
//! The parser accepts at most `MAX_GEOMETRY_NESTING` levels of parentheses
//! and complements. The walks below grow the stack on demand, but the
//! derived `Drop`, `Clone`, `PartialEq` and `Serialize` recurse natively, so
//! hand-built trees should stay within the same bound.
//!
//! ```rust
//! use mcnp_geom::{parse_geometry, GeometryNode};
//!
//! let node = parse_geometry("(1:2) -3").unwrap();
//! assert_eq!(node.to_string(), "(1:2) -3");
//! assert_eq!(node.surface_refs(), [1, 2, -3]);
//! ```

use std::fmt;

use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use serde::{Deserialize, Serialize};
use stacker::maybe_grow;

// =============================================================================
// GEOMETRY NODE
// =============================================================================

/// A node of a cell geometry expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryNode {
    /// Half-space of a surface; the sign selects the side.
    SurfaceRef(i32),
    /// Intersection of two or more operands.
    Intersection(Vec<GeometryNode>),
    /// Union of two or more operands.
    Union(Vec<GeometryNode>),
    /// Complement of one operand.
    Complement(Box<GeometryNode>),
}

impl GeometryNode {
    /// Intersection of `nodes`; a single node is returned unchanged.
    pub fn intersection(mut nodes: Vec<GeometryNode>) -> Self {
        if nodes.len() == 1 {
            if let Some(node) = nodes.pop() {
                return node;
            }
        }
        Self::Intersection(nodes)
    }

    /// Union of `nodes`; a single node is returned unchanged.
    pub fn union(mut nodes: Vec<GeometryNode>) -> Self {
        if nodes.len() == 1 {
            if let Some(node) = nodes.pop() {
                return node;
            }
        }
        Self::Union(nodes)
    }

    pub fn complement(node: GeometryNode) -> Self {
        Self::Complement(Box::new(node))
    }

    /// Whether the node is an operator rather than a surface reference.
    pub fn is_compound(&self) -> bool {
        !matches!(self, Self::SurfaceRef(_))
    }

    /// Signed surface references in left-to-right order, with repeats.
    pub fn surface_refs(&self) -> Vec<i32> {
        let mut refs = Vec::new();
        self.collect_refs(&mut refs);
        refs
    }

    fn collect_refs(&self, refs: &mut Vec<i32>) {
        maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || match self {
            Self::SurfaceRef(n) => refs.push(*n),
            Self::Intersection(children) | Self::Union(children) => {
                for child in children {
                    child.collect_refs(refs);
                }
            }
            Self::Complement(inner) => inner.collect_refs(refs),
        })
    }

    /// Distinct surface numbers (without sense), sorted.
    pub fn surface_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.surface_refs().iter().map(|n| n.unsigned_abs()).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Nesting depth; a surface reference has depth 1.
    pub fn depth(&self) -> usize {
        maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || match self {
            Self::SurfaceRef(_) => 1,
            Self::Intersection(children) | Self::Union(children) => {
                1 + children.iter().map(Self::depth).max().unwrap_or(0)
            }
            Self::Complement(inner) => 1 + inner.depth(),
        })
    }

    /// Whether `child` needs parentheses when printed inside `self`.
    fn wraps(&self, child: &GeometryNode) -> bool {
        match (self, child) {
            (_, Self::SurfaceRef(_)) => false,
            (Self::Complement(_), _) => true,
            (Self::Intersection(_), Self::Union(_) | Self::Intersection(_)) => true,
            (Self::Union(_), Self::Union(_)) => true,
            _ => false,
        }
    }

    fn write_child(&self, child: &GeometryNode, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.wraps(child) {
            write!(f, "({child})")
        } else {
            write!(f, "{child}")
        }
    }
}

impl fmt::Display for GeometryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || match self {
            Self::SurfaceRef(n) => write!(f, "{n}"),
            Self::Intersection(children) | Self::Union(children) => {
                let separator = if matches!(self, Self::Union(_)) { ":" } else { " " };
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(separator)?;
                    }
                    self.write_child(child, f)?;
                }
                Ok(())
            }
            Self::Complement(inner) => {
                f.write_str("#")?;
                self.write_child(inner, f)
            }
        })
    }
}

// =============================================================================
// CELL GEOMETRY
// =============================================================================

/// Geometry of a cell: a parsed expression, or the cell it is `like`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellGeometry {
    Expression(GeometryNode),
    /// Unresolved reference to another cell's geometry.
    Like(u32),
}

impl CellGeometry {
    pub fn expression(&self) -> Option<&GeometryNode> {
        match self {
            Self::Expression(node) => Some(node),
            Self::Like(_) => None,
        }
    }

    /// Surface references of the expression; empty for a `like` cell.
    pub fn surface_refs(&self) -> Vec<i32> {
        self.expression().map(GeometryNode::surface_refs).unwrap_or_default()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn s(n: i32) -> GeometryNode {
        GeometryNode::SurfaceRef(n)
    }

    #[test]
    fn test_single_element_chains_collapse() {
        assert_eq!(GeometryNode::intersection(vec![s(1)]), s(1));
        assert_eq!(GeometryNode::union(vec![s(-2)]), s(-2));
    }

    #[test]
    fn test_display_precedence() {
        let node = GeometryNode::Intersection(vec![GeometryNode::Union(vec![s(1), s(2)]), s(3)]);
        assert_eq!(node.to_string(), "(1:2) 3");

        let node = GeometryNode::Union(vec![GeometryNode::Intersection(vec![s(1), s(2)]), s(3)]);
        assert_eq!(node.to_string(), "1 2:3");
    }

    #[test]
    fn test_display_complement() {
        assert_eq!(GeometryNode::complement(s(-4)).to_string(), "#-4");
        let node = GeometryNode::complement(GeometryNode::Union(vec![s(1), s(2)]));
        assert_eq!(node.to_string(), "#(1:2)");
        let node = GeometryNode::complement(GeometryNode::complement(s(1)));
        assert_eq!(node.to_string(), "#(#1)");
    }

    #[test]
    fn test_nested_same_kind_keeps_parentheses() {
        let node = GeometryNode::Intersection(vec![GeometryNode::Intersection(vec![s(1), s(2)]), s(3)]);
        assert_eq!(node.to_string(), "(1 2) 3");
    }

    #[test]
    fn test_surface_ids_and_depth() {
        let node = GeometryNode::Union(vec![
            GeometryNode::Intersection(vec![s(-2), s(1)]),
            GeometryNode::complement(s(2)),
        ]);
        assert_eq!(node.surface_refs(), [-2, 1, 2]);
        assert_eq!(node.surface_ids(), [1, 2]);
        assert_eq!(node.depth(), 3);
    }

    #[test]
    fn test_like_geometry_has_no_refs() {
        assert!(CellGeometry::Like(4).surface_refs().is_empty());
        assert!(CellGeometry::Like(4).expression().is_none());
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&GeometryNode::complement(s(3))).unwrap();
        assert_eq!(json, r#"{"complement":{"surface_ref":3}}"#);
    }
}
