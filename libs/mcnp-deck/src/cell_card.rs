//! # Cell Cards
//!
//! Splits a normalized cell card into name, material, geometry and options.
//!
//! A cell card has one of two shapes:
//!
//! ```text
//! name  LIKE n BUT options
//! name  material [density]  geometry  options
//! ```
//!
//! The geometry field is the longest run of characters drawn from digits,
//! blanks and `( ) : # + -`; the first other character starts the options.
//!
//! ## Example
//!
//! ```rust
//! use mcnp_deck::cell_card::{split_cell_card, Material};
//!
//! let fields = split_cell_card("10 3 -7.8 -1 2 imp:n=1", 1).unwrap();
//! assert_eq!(fields.name, 10);
//! assert_eq!(fields.material, Some(Material::Filled { id: 3, density: -7.8 }));
//! assert_eq!(fields.geometry, "-1 2");
//! assert_eq!(fields.options, "imp:n=1");
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{DeckError, Result};

// =============================================================================
// FIELDS
// =============================================================================

/// Material of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    /// Material number 0.
    Void,
    /// Material number and density, passed through with its sign.
    Filled { id: u32, density: f64 },
}

/// Fields of one cell card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellCardFields {
    /// Cell number (>= 1).
    pub name: u32,
    /// `None` for a `like n but` cell.
    pub material: Option<Material>,
    /// Geometry field; empty for a `like n but` cell.
    pub geometry: String,
    /// Everything after the geometry field (or after `but`).
    pub options: String,
    /// Referenced cell of a `like n but` card.
    pub like: Option<u32>,
}

// =============================================================================
// MATCHERS
// =============================================================================

/// Outcome of one matcher.
#[derive(Debug)]
enum Attempt<T> {
    Matched(T),
    /// The card does not have this matcher's shape.
    NotApplicable,
    /// The card has this shape but a field is malformed.
    Rejected(String),
}

/// The card split after its name.
struct CellHead<'a> {
    name: u32,
    first: &'a str,
    rest: &'a str,
}

type Matcher = fn(&CellHead<'_>) -> Attempt<CellCardFields>;

/// Tried in order; the first match wins.
const MATCHERS: [Matcher; 3] = [match_like_but, match_void, match_filled];

/// Split a normalized cell card.
///
/// ## Errors
///
/// `CardPattern` when the card has neither the `like n but` shape nor the
/// material + geometry shape. `line` is reported in the error.
pub fn split_cell_card(content: &str, line: usize) -> Result<CellCardFields> {
    let (name_token, after_name) = next_token(content);
    let name = parse_positive(name_token)
        .ok_or_else(|| DeckError::card_pattern(line, content, "cell name must be a positive integer"))?;
    let (first, rest) = next_token(after_name);
    if first.is_empty() {
        return Err(DeckError::card_pattern(line, content, "cell card has no material or LIKE"));
    }
    let head = CellHead { name, first, rest };

    for matcher in MATCHERS {
        match matcher(&head) {
            Attempt::Matched(fields) => return Ok(fields),
            Attempt::Rejected(reason) => return Err(DeckError::card_pattern(line, content, reason)),
            Attempt::NotApplicable => {}
        }
    }
    Err(DeckError::card_pattern(
        line,
        content,
        format!("expected 'like n but' or a material number, found '{first}'"),
    ))
}

fn match_like_but(head: &CellHead<'_>) -> Attempt<CellCardFields> {
    if !head.first.eq_ignore_ascii_case("like") {
        return Attempt::NotApplicable;
    }
    let (reference, rest) = next_token(head.rest);
    let Some(like) = parse_positive(reference) else {
        return Attempt::Rejected(format!("LIKE reference must be a cell number, found '{reference}'"));
    };
    let (keyword, options) = next_token(rest);
    if !keyword.eq_ignore_ascii_case("but") {
        return Attempt::Rejected(format!("expected BUT after LIKE {like}, found '{keyword}'"));
    }
    Attempt::Matched(CellCardFields {
        name: head.name,
        material: None,
        geometry: String::new(),
        options: options.trim().to_string(),
        like: Some(like),
    })
}

/// Any numeric spelling of zero (`0`, `00`, `0.0`, `0e0`) marks a void cell.
fn match_void(head: &CellHead<'_>) -> Attempt<CellCardFields> {
    if head.first.parse::<f64>() != Ok(0.0) {
        return Attempt::NotApplicable;
    }
    with_geometry(head.name, Material::Void, head.rest)
}

fn match_filled(head: &CellHead<'_>) -> Attempt<CellCardFields> {
    let Some(id) = parse_positive(head.first) else {
        return Attempt::NotApplicable;
    };
    let (density_token, rest) = next_token(head.rest);
    let Some(density) = density_token.parse::<f64>().ok().filter(|d| d.is_finite()) else {
        return Attempt::Rejected(format!("material {id} needs a density, found '{density_token}'"));
    };
    with_geometry(head.name, Material::Filled { id, density }, rest)
}

fn with_geometry(name: u32, material: Material, rest: &str) -> Attempt<CellCardFields> {
    let (geometry, options) = split_geometry(rest);
    if geometry.is_empty() {
        return Attempt::Rejected("cell card has no geometry".to_string());
    }
    Attempt::Matched(CellCardFields {
        name,
        material: Some(material),
        geometry: geometry.to_string(),
        options: options.to_string(),
        like: None,
    })
}

// =============================================================================
// HELPERS
// =============================================================================

/// Characters that may appear in a geometry field.
pub fn is_geometry_char(c: char) -> bool {
    c.is_ascii_digit() || c.is_whitespace() || matches!(c, '(' | ')' | ':' | '#' | '+' | '-')
}

/// Split text into the geometry run and the remaining options, both trimmed.
///
/// ```rust
/// use mcnp_deck::cell_card::split_geometry;
///
/// assert_eq!(split_geometry(" (1:-2) #3 u=1"), ("(1:-2) #3", "u=1"));
/// assert_eq!(split_geometry("-1"), ("-1", ""));
/// ```
pub fn split_geometry(text: &str) -> (&str, &str) {
    let end = text
        .char_indices()
        .find(|&(_, c)| !is_geometry_char(c))
        .map_or(text.len(), |(i, _)| i);
    (text[..end].trim(), text[end..].trim())
}

/// Split off the first whitespace-delimited token.
fn next_token(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(i) => (&text[..i], &text[i..]),
        None => (text, ""),
    }
}

fn parse_positive(token: &str) -> Option<u32> {
    token.parse::<u32>().ok().filter(|&n| n > 0)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_cell() {
        let fields = split_cell_card("10 0 -1 2 imp:n=1", 1).unwrap();
        assert_eq!(fields.name, 10);
        assert_eq!(fields.material, Some(Material::Void));
        assert_eq!(fields.geometry, "-1 2");
        assert_eq!(fields.options, "imp:n=1");
        assert_eq!(fields.like, None);
    }

    #[test]
    fn test_void_material_written_as_float() {
        for card in ["10 0.0 -1 2", "10 00 -1 2", "10 0e0 -1 2"] {
            let fields = split_cell_card(card, 1).unwrap();
            assert_eq!(fields.material, Some(Material::Void), "{card}");
            assert_eq!(fields.geometry, "-1 2");
        }
    }

    #[test]
    fn test_non_finite_density_fails() {
        let err = split_cell_card("2 1 nan -1", 1).unwrap_err();
        assert!(err.to_string().contains("density"));
    }

    #[test]
    fn test_like_but_cell() {
        let fields = split_cell_card("10 like 5 but mat=2", 1).unwrap();
        assert_eq!(fields.like, Some(5));
        assert_eq!(fields.options, "mat=2");
        assert_eq!(fields.material, None);
        assert!(fields.geometry.is_empty());
    }

    #[test]
    fn test_like_but_is_case_insensitive() {
        let fields = split_cell_card("3 LIKE 1 BUT trcl=(1 0 0)", 1).unwrap();
        assert_eq!(fields.like, Some(1));
        assert_eq!(fields.options, "trcl=(1 0 0)");
    }

    #[test]
    fn test_like_without_but_fails() {
        let err = split_cell_card("3 like 1 mat=2", 7).unwrap_err();
        assert_eq!(err.line(), 7);
        assert!(err.to_string().contains("BUT"));
    }

    #[test]
    fn test_filled_cell() {
        let fields = split_cell_card("2 1 0.0483 (1:-2) #3", 1).unwrap();
        assert_eq!(fields.material, Some(Material::Filled { id: 1, density: 0.0483 }));
        assert_eq!(fields.geometry, "(1:-2) #3");
        assert_eq!(fields.options, "");
    }

    #[test]
    fn test_geometry_followed_by_parenthesis_options() {
        let fields = split_cell_card("4 0 -1 fill=2 (0 0 1)", 1).unwrap();
        assert_eq!(fields.geometry, "-1");
        assert_eq!(fields.options, "fill=2 (0 0 1)");
    }

    #[test]
    fn test_missing_density_fails() {
        let err = split_cell_card("2 1 imp:n=1", 1).unwrap_err();
        assert!(err.to_string().contains("density"));
    }

    #[test]
    fn test_missing_geometry_fails() {
        assert!(split_cell_card("2 0 imp:n=1", 1).is_err());
        assert!(split_cell_card("2 1 -1.0", 1).is_err());
    }

    #[test]
    fn test_bad_name_fails() {
        assert!(split_cell_card("x 0 -1", 1).is_err());
        assert!(split_cell_card("0 0 -1", 1).is_err());
        assert!(split_cell_card("5", 1).is_err());
    }

    #[test]
    fn test_unrecognized_material_fails() {
        let err = split_cell_card("5 m1 -1", 1).unwrap_err();
        assert!(matches!(err, DeckError::CardPattern { .. }));
        assert!(err.to_string().contains("m1"));
    }
}
