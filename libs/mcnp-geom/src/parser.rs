//! # Geometry Parser
//!
//! Recursive descent parser over the token stream of [`crate::lexer`].
//!
//! ## Grammar
//!
//! | Rule | Definition | Associativity |
//! |------|------------|---------------|
//! | Expr | Isect (`:` Isect)* | Left |
//! | Isect | Operand (INTERSECT Operand)* | Left |
//! | Operand | `(` Expr `)` \| `#` Operand \| SignedInt | Prefix |
//!
//! Union binds loosest. Complement applies to the operand right after it,
//! which may be parenthesized. Parentheses and complements may nest at most
//! [`MAX_GEOMETRY_NESTING`] levels deep.
//!
//! ## Example
//!
//! ```rust
//! use mcnp_geom::parser::Parser;
//! use mcnp_geom::GeometryNode::{Intersection, SurfaceRef, Union};
//!
//! let node = Parser::new("1 2:3").unwrap().parse().unwrap();
//! assert_eq!(
//!     node,
//!     Union(vec![Intersection(vec![SurfaceRef(1), SurfaceRef(2)]), SurfaceRef(3)])
//! );
//! ```

use config::constants::{MAX_GEOMETRY_NESTING, STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use stacker::maybe_grow;

use crate::error::{GrammarError, GrammarErrorKind, Result};
use crate::lexer::{tokenize, Token, TokenKind};
use crate::node::GeometryNode;

// =============================================================================
// PARSER
// =============================================================================

/// Parser for one geometry field.
pub struct Parser<'a> {
    /// Geometry field (for error fragments).
    source: &'a str,
    /// Token stream.
    tokens: Vec<Token>,
    /// Current token index.
    current: usize,
    /// Open parentheses and complements around the current operand.
    nesting: usize,
}

impl<'a> Parser<'a> {
    /// Tokenize `source` and prepare to parse it.
    pub fn new(source: &'a str) -> Result<Self> {
        Ok(Self {
            source,
            tokens: tokenize(source)?,
            current: 0,
            nesting: 0,
        })
    }

    /// Parse the whole field.
    ///
    /// ## Errors
    ///
    /// See [`GrammarErrorKind`]; the error offset points at the offending
    /// token, or at the end of the field for a missing operand.
    pub fn parse(mut self) -> Result<GeometryNode> {
        if self.tokens.is_empty() {
            return Err(self.error(GrammarErrorKind::EmptyOperand, 0));
        }
        let node = self.parse_expr()?;
        match self.peek() {
            None => Ok(node),
            Some(token) if token.kind == TokenKind::RParen => {
                Err(self.error(GrammarErrorKind::UnbalancedParen, token.offset))
            }
            Some(token) => Err(self.error(GrammarErrorKind::UnexpectedToken, token.offset)),
        }
    }

    // =========================================================================
    // RULES
    // =========================================================================

    fn parse_expr(&mut self) -> Result<GeometryNode> {
        let mut terms = vec![self.parse_isect()?];
        while self.eat(TokenKind::Union) {
            terms.push(self.parse_isect()?);
        }
        Ok(GeometryNode::union(terms))
    }

    fn parse_isect(&mut self) -> Result<GeometryNode> {
        let mut operands = vec![self.parse_operand()?];
        while self.eat(TokenKind::Intersect) {
            operands.push(self.parse_operand()?);
        }
        Ok(GeometryNode::intersection(operands))
    }

    fn parse_operand(&mut self) -> Result<GeometryNode> {
        maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            let Some(token) = self.peek() else {
                return Err(self.missing_operand());
            };
            match token.kind {
                TokenKind::Surface(0) => Err(self.error(GrammarErrorKind::ZeroSurface, token.offset)),
                TokenKind::Surface(n) => {
                    self.current += 1;
                    Ok(GeometryNode::SurfaceRef(n))
                }
                TokenKind::Complement => {
                    self.current += 1;
                    self.enter(token)?;
                    let inner = self.parse_operand()?;
                    self.nesting -= 1;
                    Ok(GeometryNode::complement(inner))
                }
                TokenKind::LParen => {
                    self.current += 1;
                    if let Some(close) = self.peek().filter(|t| t.kind == TokenKind::RParen) {
                        return Err(self.error(GrammarErrorKind::EmptyOperand, close.offset));
                    }
                    self.enter(token)?;
                    let inner = self.parse_expr()?;
                    self.nesting -= 1;
                    if !self.eat(TokenKind::RParen) {
                        return Err(self.error(GrammarErrorKind::UnbalancedParen, token.offset));
                    }
                    Ok(inner)
                }
                TokenKind::RParen if self.previous_is_operator() => {
                    Err(self.error(GrammarErrorKind::DanglingOperator, token.offset))
                }
                TokenKind::RParen => Err(self.error(GrammarErrorKind::UnbalancedParen, token.offset)),
                TokenKind::Union | TokenKind::Intersect => {
                    Err(self.error(GrammarErrorKind::DanglingOperator, token.offset))
                }
            }
        })
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    /// Step one nesting level down at `token`.
    fn enter(&mut self, token: Token) -> Result<()> {
        if self.nesting >= MAX_GEOMETRY_NESTING {
            return Err(self.error(GrammarErrorKind::NestingTooDeep, token.offset));
        }
        self.nesting += 1;
        Ok(())
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.current).copied()
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek().map_or(false, |t| t.kind == kind) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    fn previous_is_operator(&self) -> bool {
        self.current
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(false, |t| t.kind.is_operator())
    }

    /// Error for an operand missing at the end of the field.
    fn missing_operand(&self) -> GrammarError {
        let end = self.source.trim_end().len();
        let previous = self.current.checked_sub(1).and_then(|i| self.tokens.get(i));
        match previous {
            Some(t) if t.kind == TokenKind::LParen => self.error(GrammarErrorKind::UnbalancedParen, t.offset),
            Some(t) if t.kind.is_operator() => self.error(GrammarErrorKind::DanglingOperator, t.offset),
            _ => self.error(GrammarErrorKind::EmptyOperand, end),
        }
    }

    fn error(&self, kind: GrammarErrorKind, offset: usize) -> GrammarError {
        GrammarError::new(kind, self.source, offset)
    }
}

// =============================================================================
// TESTS
// =============================================================================
