//! # Deck Errors
//!
//! Error types for block and card segmentation.
//!
//! ## Example
//!
//! ```rust
//! use mcnp_deck::DeckError;
//!
//! let error = DeckError::card_pattern(12, "10 x", "expected a material number");
//! assert_eq!(error.line(), 12);
//! println!("{}", error);
//! ```

use config::constants::{shorten, FRAGMENT_DISPLAY_WIDTH};
use thiserror::Error;

// =============================================================================
// DECK ERROR
// =============================================================================

/// Errors raised while segmenting a deck or splitting its cards.
///
/// Every variant carries the 1-based line where the offending text starts
/// and a shortened copy of that text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    /// A required block boundary is missing or the message header is malformed.
    #[error("block boundary error at line {line}: {reason} (near '{fragment}')")]
    BlockBoundary {
        /// Line where the block starts.
        line: usize,
        /// Offending text.
        fragment: String,
        /// What was expected.
        reason: String,
    },

    /// No splitter pattern matched the card, or its surface kind is unknown.
    #[error("card pattern error at line {line}: {reason} (in '{fragment}')")]
    CardPattern {
        /// Line where the card starts.
        line: usize,
        /// Normalized card content.
        fragment: String,
        /// Why the card was rejected.
        reason: String,
    },
}

impl DeckError {
    /// Create a block boundary error.
    pub fn block_boundary(line: usize, fragment: &str, reason: impl Into<String>) -> Self {
        Self::BlockBoundary {
            line,
            fragment: shorten(fragment.trim(), FRAGMENT_DISPLAY_WIDTH),
            reason: reason.into(),
        }
    }

    /// Create a card pattern error.
    pub fn card_pattern(line: usize, fragment: &str, reason: impl Into<String>) -> Self {
        Self::CardPattern {
            line,
            fragment: shorten(fragment.trim(), FRAGMENT_DISPLAY_WIDTH),
            reason: reason.into(),
        }
    }

    /// Line the error originates from.
    pub fn line(&self) -> usize {
        match self {
            Self::BlockBoundary { line, .. } | Self::CardPattern { line, .. } => *line,
        }
    }

    /// Quoted source fragment.
    pub fn fragment(&self) -> &str {
        match self {
            Self::BlockBoundary { fragment, .. } | Self::CardPattern { fragment, .. } => fragment,
        }
    }
}

/// Result type alias for deck operations.
pub type Result<T> = std::result::Result<T, DeckError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_pattern_display() {
        let error = DeckError::card_pattern(3, "  10 x  ", "expected a material number");
        let msg = error.to_string();
        assert!(msg.contains("line 3"));
        assert!(msg.contains("'10 x'"));
        assert!(msg.contains("material"));
    }

    #[test]
    fn test_long_fragment_is_shortened() {
        let text = "1 ".repeat(200);
        let error = DeckError::block_boundary(1, &text, "no boundary");
        assert!(error.fragment().chars().count() <= FRAGMENT_DISPLAY_WIDTH);
        assert!(error.fragment().contains(" ... "));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DeckError>();
    }
}
