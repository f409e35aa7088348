//! # Data Cards
//!
//! Splits a normalized data card into its name parts and the raw parameter
//! text. Interpretation of the parameters is left to the consumer.
//!
//! ```text
//! [*]mnemonic[number][:designator]  parameters
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{DeckError, Result};

/// Fields of one data card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataCardFields {
    /// Lowercased alphabetic mnemonic, e.g. `m`, `tr`, `imp`.
    pub mnemonic: String,
    /// Numeric suffix of the name, e.g. `1` in `m1`.
    pub number: Option<u32>,
    /// Particle designator after `:`, e.g. `n` in `imp:n`.
    pub designator: Option<String>,
    /// Leading `*` on the name.
    pub starred: bool,
    /// Remaining text after the name.
    pub params: String,
}

/// Split a normalized data card.
///
/// ## Example
///
/// ```rust
/// use mcnp_deck::data_card::split_data_card;
///
/// let fields = split_data_card("F4:N 10 20", 1).unwrap();
/// assert_eq!(fields.mnemonic, "f");
/// assert_eq!(fields.number, Some(4));
/// assert_eq!(fields.designator.as_deref(), Some("n"));
/// assert_eq!(fields.params, "10 20");
/// ```
pub fn split_data_card(content: &str, line: usize) -> Result<DataCardFields> {
    let content = content.trim();
    let (name, params) = match content.find(char::is_whitespace) {
        Some(i) => (&content[..i], content[i..].trim()),
        None => (content, ""),
    };

    let (starred, name) = match name.strip_prefix('*') {
        Some(rest) => (true, rest),
        None => (false, name),
    };
    let (name, designator) = match name.split_once(':') {
        Some((name, designator)) => (name, Some(designator.to_ascii_lowercase())),
        None => (name, None),
    };

    let letters = name
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(name.len());
    if letters == 0 {
        return Err(DeckError::card_pattern(
            line,
            content,
            "data card name must start with a letter",
        ));
    }
    let digits = &name[letters..];
    let number = if digits.is_empty() {
        None
    } else {
        Some(digits.parse::<u32>().map_err(|_| {
            DeckError::card_pattern(line, content, format!("invalid data card number '{digits}'"))
        })?)
    };

    Ok(DataCardFields {
        mnemonic: name[..letters].to_ascii_lowercase(),
        number,
        designator,
        starred,
        params: params.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_mnemonic() {
        let fields = split_data_card("mode n p", 1).unwrap();
        assert_eq!(fields.mnemonic, "mode");
        assert_eq!(fields.number, None);
        assert_eq!(fields.params, "n p");
    }

    #[test]
    fn test_starred_transform() {
        let fields = split_data_card("*tr1 0 0 0 90 0 90", 1).unwrap();
        assert!(fields.starred);
        assert_eq!(fields.mnemonic, "tr");
        assert_eq!(fields.number, Some(1));
    }

    #[test]
    fn test_designator_without_number() {
        let fields = split_data_card("imp:n 1 1 0", 1).unwrap();
        assert_eq!(fields.mnemonic, "imp");
        assert_eq!(fields.designator.as_deref(), Some("n"));
    }

    #[test]
    fn test_invalid_names() {
        assert!(split_data_card("12 3", 4).is_err());
        assert!(split_data_card("m1x 3", 4).is_err());
    }
}
