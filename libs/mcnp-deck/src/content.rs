//! # Card Content
//!
//! Reduces the raw lines of a card to one canonical line: comment lines
//! inside the card and inline comments are removed, lines are joined and
//! whitespace runs collapse to a single space.
//!
//! Both `$` and `&` end the meaningful part of a line; `&` additionally
//! marks the next line as a continuation (see [`crate::cards`]).
//!
//! ## Example
//!
//! ```rust
//! use mcnp_deck::content::normalize_card;
//!
//! let lines = ["1  0 -1 $ void", "c comment line", "      2  imp:n=1"];
//! assert_eq!(normalize_card(&lines), "1 0 -1 2 imp:n=1");
//! ```

use config::constants::{CONTINUATION_MARKER, INLINE_COMMENT_MARKER};

use crate::cards::is_comment_line;

/// Normalize the raw lines of one card.
///
/// The first line of a card is never a comment line, so comment-line
/// removal only applies to the following ones. This keeps normalization
/// idempotent.
pub fn normalize_card<S: AsRef<str>>(lines: &[S]) -> String {
    let mut pieces = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        if i > 0 && is_comment_line(line) {
            continue;
        }
        pieces.push(strip_inline_comment(line));
    }
    collapse_whitespace(&pieces.join(" "))
}

/// Normalize a multi-line card given as one string.
///
/// ```rust
/// use mcnp_deck::content::normalize;
///
/// let once = normalize("1 0 -1 &\n   2 $ note");
/// assert_eq!(once, "1 0 -1 2");
/// assert_eq!(normalize(&once), once);
/// ```
pub fn normalize(text: &str) -> String {
    let lines: Vec<&str> = text.split(['\n', '\r']).collect();
    normalize_card(&lines)
}

/// Cut `line` at the first comment-introducing character.
pub fn strip_inline_comment(line: &str) -> &str {
    match line.find([INLINE_COMMENT_MARKER, CONTINUATION_MARKER]) {
        Some(i) => &line[..i],
        None => line,
    }
}

/// Collapse whitespace runs to one space and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_strip_inline_comment() {
        assert_eq!(strip_inline_comment("1 so 5 $ sphere"), "1 so 5 ");
        assert_eq!(strip_inline_comment("1 0 -1 & rest"), "1 0 -1 ");
        assert_eq!(strip_inline_comment("no comment"), "no comment");
    }

    #[test]
    fn test_first_line_is_kept_even_if_comment_shaped() {
        // An already-normalized line is never dropped.
        assert_eq!(normalize_card(&["c x"]), "c x");
    }

    #[test]
    fn test_crlf_text() {
        assert_eq!(normalize("1 0\r\n     -1\r\n"), "1 0 -1");
    }

    #[test]
    fn test_empty_card() {
        assert_eq!(normalize_card::<&str>(&[]), "");
        assert_eq!(normalize("   $ only a comment"), "");
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(text in "[0-9a-zA-Z :#()$&\t\n-]{0,120}") {
            let once = normalize(&text);
            prop_assert_eq!(normalize(&once), once.clone());
        }

        #[test]
        fn prop_normalized_has_single_spaces(text in "[0-9a-z \t\n]{0,80}") {
            let once = normalize(&text);
            prop_assert!(!once.contains("  "));
            prop_assert_eq!(once.trim(), once.as_str());
        }
    }
}
