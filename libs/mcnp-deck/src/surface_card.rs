//! # Surface Cards
//!
//! Splits a normalized surface card into name, transform, kind and
//! parameters:
//!
//! ```text
//! [*|+]name  [transform]  kind  p1 p2 ...
//! ```
//!
//! The transform number is present only when the token after it is the
//! alphabetic surface kind.

use pipeline_types::{SurfaceKind, SurfaceName};
use serde::{Deserialize, Serialize};

use crate::error::{DeckError, Result};

/// Fields of one surface card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceCardFields {
    /// Surface number with its boundary marker.
    pub name: SurfaceName,
    /// Transform (or periodic partner, when negative) number.
    pub transform: Option<i32>,
    /// Surface mnemonic.
    pub kind: SurfaceKind,
    /// Card parameters in order.
    pub params: Vec<f64>,
}

/// Split a normalized surface card.
///
/// ## Errors
///
/// `CardPattern` when the name is malformed, the kind is not in the
/// mnemonic table, a parameter is not a finite number, or the parameter
/// count does not fit the kind.
///
/// ## Example
///
/// ```rust
/// use mcnp_deck::surface_card::split_surface_card;
/// use pipeline_types::SurfaceKind;
///
/// let fields = split_surface_card("*4 2 C/Z 1.0 2.0 0.5", 1).unwrap();
/// assert_eq!(fields.name.to_string(), "*4");
/// assert_eq!(fields.transform, Some(2));
/// assert_eq!(fields.kind, SurfaceKind::CParallelZ);
/// assert_eq!(fields.params, [1.0, 2.0, 0.5]);
/// ```
pub fn split_surface_card(content: &str, line: usize) -> Result<SurfaceCardFields> {
    let tokens: Vec<&str> = content.split_whitespace().collect();
    let Some((&name_token, rest)) = tokens.split_first() else {
        return Err(DeckError::card_pattern(line, content, "empty surface card"));
    };
    let name: SurfaceName = name_token
        .parse()
        .map_err(|e| DeckError::card_pattern(line, content, format!("{e}")))?;

    let (transform, rest) = match rest {
        [candidate, next, ..] if starts_alphabetic(next) => match candidate.parse::<i32>() {
            Ok(number) => (Some(number), &rest[1..]),
            Err(_) => (None, rest),
        },
        _ => (None, rest),
    };

    let Some((&kind_token, params)) = rest.split_first() else {
        return Err(DeckError::card_pattern(line, content, "surface card has no kind"));
    };
    let kind: SurfaceKind = kind_token
        .parse()
        .map_err(|e| DeckError::card_pattern(line, content, format!("{e}")))?;

    let params = params
        .iter()
        .map(|token| match token.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(DeckError::card_pattern(
                line,
                content,
                format!("parameter '{token}' is not a finite number"),
            )),
        })
        .collect::<Result<Vec<f64>>>()?;

    let arity = kind.arity();
    if !arity.contains(&params.len()) {
        return Err(DeckError::card_pattern(
            line,
            content,
            format!(
                "surface kind '{kind}' takes {} to {} parameters, found {}",
                arity.start(),
                arity.end(),
                params.len()
            ),
        ));
    }

    Ok(SurfaceCardFields {
        name,
        transform,
        kind,
        params,
    })
}

fn starts_alphabetic(token: &str) -> bool {
    token.chars().next().map_or(false, |c| c.is_ascii_alphabetic())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pipeline_types::BoundaryMarker;

    #[test]
    fn test_plain_surface() {
        let fields = split_surface_card("1 so 2.0", 1).unwrap();
        assert_eq!(fields.name.id, 1);
        assert_eq!(fields.transform, None);
        assert_eq!(fields.kind, SurfaceKind::So);
        assert_eq!(fields.params, [2.0]);
    }

    #[test]
    fn test_white_boundary_and_negative_transform() {
        let fields = split_surface_card("+7 -3 px 1e2", 1).unwrap();
        assert_eq!(fields.name.marker, BoundaryMarker::WhiteBoundary);
        assert_eq!(fields.transform, Some(-3));
        assert_eq!(fields.params, [100.0]);
    }

    #[test]
    fn test_unknown_kind_fails() {
        let err = split_surface_card("1 gq 1 2 3", 5).unwrap_err();
        assert!(matches!(err, DeckError::CardPattern { line: 5, .. }));
        assert!(err.to_string().contains("gq"));
    }

    #[test]
    fn test_number_before_number_is_not_a_transform() {
        // "1 2 3" has no alphabetic kind token at all.
        assert!(split_surface_card("1 2 3", 1).is_err());
    }

    #[test]
    fn test_bad_parameter_fails() {
        let err = split_surface_card("1 pz 2j", 1).unwrap_err();
        assert!(err.to_string().contains("2j"));
    }

    #[test]
    fn test_non_finite_parameter_fails() {
        for card in ["1 so nan", "1 so inf", "1 pz -Infinity", "1 kz 0 NaN"] {
            let err = split_surface_card(card, 9).unwrap_err();
            assert!(matches!(err, DeckError::CardPattern { line: 9, .. }), "{card}");
            let token = card.split_whitespace().last().unwrap();
            assert!(err.to_string().contains(&format!("'{token}'")), "{err}");
        }
    }

    #[test]
    fn test_arity_is_checked() {
        assert!(split_surface_card("1 p 1 0 0", 1).is_err());
        assert!(split_surface_card("1 s 0 0 0", 1).is_err());
        assert!(split_surface_card("1 kz 5 0.25 -1", 1).is_ok());
        assert!(split_surface_card("1 k/z 0 0 5 0.25 1", 1).is_ok());
        assert!(split_surface_card("1 k/z 0 0 5 0.25 1 1", 1).is_err());
    }

    #[test]
    fn test_bad_name_fails() {
        assert!(split_surface_card("a so 1", 1).is_err());
        assert!(split_surface_card("", 1).is_err());
    }
}
