//! # Model Errors
//!
//! Stage errors wrapped with the card they came from.

use mcnp_cad::CadError;
use mcnp_deck::DeckError;
use mcnp_geom::GrammarError;
use pipeline_types::SurfaceName;
use thiserror::Error;

/// Errors raised while building a geometry model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// Block or card segmentation failed.
    #[error(transparent)]
    Deck(#[from] DeckError),

    /// A cell's geometry field does not parse.
    #[error("cell {cell} at line {line}: {source}")]
    Grammar {
        cell: u32,
        line: usize,
        #[source]
        source: GrammarError,
    },

    /// A surface cannot be translated.
    #[error("surface {surface} at line {line}: {source}")]
    Cad {
        surface: SurfaceName,
        line: usize,
        #[source]
        source: CadError,
    },

    /// Two cell cards share a name.
    #[error("cell {cell} at line {line} is already defined at line {first_line}")]
    DuplicateCell {
        cell: u32,
        line: usize,
        first_line: usize,
    },

    /// Two surface cards share a number.
    #[error("surface {surface} at line {line} is already defined at line {first_line}")]
    DuplicateSurface {
        surface: u32,
        line: usize,
        first_line: usize,
    },
}

impl ModelError {
    /// 1-based line of the offending card.
    pub fn line(&self) -> usize {
        match self {
            Self::Deck(e) => e.line(),
            Self::Grammar { line, .. }
            | Self::Cad { line, .. }
            | Self::DuplicateCell { line, .. }
            | Self::DuplicateSurface { line, .. } => *line,
        }
    }
}

/// Result type for model building.
pub type Result<T> = std::result::Result<T, ModelError>;
