//! # Geometry Lexer
//!
//! Turns a geometry field into an explicit token stream.
//!
//! Whitespace in a geometry field is significant only between two
//! operands, where it means intersection. The lexer makes that explicit:
//! it emits an [`TokenKind::Intersect`] token wherever an operand is
//! directly followed by another operand (`1 2`, `(1:2)3`, `1 #2`) and drops
//! every other run of whitespace (around `:` and inside parentheses).
//! The complement marker `#` becomes its own token kind, so it can never be
//! confused with a numeric sign.
//!
//! ## Example
//!
//! ```rust
//! use mcnp_geom::lexer::{tokenize, TokenKind};
//!
//! let kinds: Vec<_> = tokenize("-1 2 : 3").unwrap().into_iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     [
//!         TokenKind::Surface(-1),
//!         TokenKind::Intersect,
//!         TokenKind::Surface(2),
//!         TokenKind::Union,
//!         TokenKind::Surface(3),
//!     ]
//! );
//! ```

use std::fmt;

use crate::error::{GrammarError, GrammarErrorKind, Result};

/// Symbol used for intersection in the explicit form.
pub const INTERSECT_SYMBOL: char = '*';
/// Union operator.
pub const UNION_SYMBOL: char = ':';
/// Complement operator in deck text.
pub const COMPLEMENT_SYMBOL: char = '#';
/// Complement operator in the explicit form.
pub const EXPLICIT_COMPLEMENT_SYMBOL: char = '~';

// =============================================================================
// TOKEN
// =============================================================================

/// Kind of a geometry token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    LParen,
    RParen,
    Union,
    /// Implicit intersection between two adjacent operands.
    Intersect,
    Complement,
    /// Signed surface number; zero is rejected by the parser.
    Surface(i32),
}

impl TokenKind {
    /// Whether an operand may end with this token.
    fn ends_operand(self) -> bool {
        matches!(self, Self::RParen | Self::Surface(_))
    }

    /// Whether an operand may start with this token.
    fn starts_operand(self) -> bool {
        matches!(self, Self::LParen | Self::Complement | Self::Surface(_))
    }

    /// Whether this token is a binary or prefix operator.
    pub fn is_operator(self) -> bool {
        matches!(self, Self::Union | Self::Intersect | Self::Complement)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
            Self::Union => write!(f, "{UNION_SYMBOL}"),
            Self::Intersect => write!(f, "{INTERSECT_SYMBOL}"),
            Self::Complement => write!(f, "{EXPLICIT_COMPLEMENT_SYMBOL}"),
            Self::Surface(n) => write!(f, "{n}"),
        }
    }
}

/// A token with its byte offset in the geometry field.
///
/// An implicit intersection points at the whitespace it replaces, or at the
/// following operand when the two operands touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
}

// =============================================================================
// LEXER
// =============================================================================

/// Tokenize a geometry field.
///
/// ## Errors
///
/// `UnexpectedToken` for characters outside the geometry alphabet, a sign
/// with no digits, or a surface number that does not fit in `i32`.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut gap: Option<usize> = None;
    let mut chars = source.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        let kind = match c {
            c if c.is_whitespace() => {
                gap.get_or_insert(offset);
                continue;
            }
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            UNION_SYMBOL => TokenKind::Union,
            COMPLEMENT_SYMBOL => TokenKind::Complement,
            '+' | '-' | '0'..='9' => {
                let mut end = offset + c.len_utf8();
                while let Some(&(i, d)) = chars.peek() {
                    if !d.is_ascii_digit() {
                        break;
                    }
                    end = i + d.len_utf8();
                    chars.next();
                }
                let number = source[offset..end]
                    .parse::<i32>()
                    .map_err(|_| GrammarError::new(GrammarErrorKind::UnexpectedToken, source, offset))?;
                TokenKind::Surface(number)
            }
            _ => {
                return Err(GrammarError::new(
                    GrammarErrorKind::UnexpectedToken,
                    source,
                    offset,
                ))
            }
        };

        let adjacent = tokens
            .last()
            .map_or(false, |prev| prev.kind.ends_operand() && kind.starts_operand());
        if adjacent {
            tokens.push(Token {
                kind: TokenKind::Intersect,
                offset: gap.unwrap_or(offset),
            });
        }
        tokens.push(Token { kind, offset });
        gap = None;
    }
    Ok(tokens)
}

/// Rewrite a geometry field in explicit operator form.
///
/// ```rust
/// use mcnp_geom::lexer::normalize_geometry;
///
/// assert_eq!(normalize_geometry(" ( 1 : -2 )  #3 ").unwrap(), "(1:-2)*~3");
/// ```
pub fn normalize_geometry(source: &str) -> Result<String> {
    Ok(tokenize(source)?.iter().map(|t| t.kind.to_string()).collect())
}

// =============================================================================
// TESTS
// =============================================================================
