//! # MCNP Deck
//!
//! Segments an MCNP input deck into blocks and cards and splits each card
//! into typed fields.
//!
//! ## Architecture
//!
//! ```text
//! Document → blocks (blank-line boundaries) → cards (line classification)
//!          → normalized content → cell / surface / data fields
//! ```
//!
//! ## Example
//!
//! ```rust
//! use mcnp_deck::Deck;
//!
//! let text = "pin cell\n1 0 -1 imp:n=1\n2 0 1 imp:n=0\n\n1 so 2.0\n\nmode n\n";
//! let deck = Deck::parse(text).unwrap();
//! assert_eq!(deck.title(), Some("pin cell"));
//!
//! let cells: Vec<_> = deck.cell_cards().collect::<Result<_, _>>().unwrap();
//! assert_eq!(cells.len(), 2);
//! assert_eq!(cells[0].1.geometry, "-1");
//! ```
//!
//! ## Pipeline Integration
//!
//! ```text
//! mcnp-deck → mcnp-geom (cell geometry) → mcnp-cad (surfaces) → mcnp-model
//! ```

pub mod blocks;
pub mod cards;
pub mod cell_card;
pub mod content;
pub mod data_card;
pub mod error;
pub mod line;
pub mod surface_card;

pub use blocks::{segment, Block, BlockKind, SegmentOptions, Segmentation};
pub use cards::{Card, CardKind, CardSegmenter};
pub use cell_card::{split_cell_card, CellCardFields, Material};
pub use content::{normalize, normalize_card};
pub use data_card::{split_data_card, DataCardFields};
pub use error::{DeckError, Result};
pub use line::LineEnding;
pub use surface_card::{split_surface_card, SurfaceCardFields};

// =============================================================================
// DECK
// =============================================================================

/// A segmented document.
///
/// Block boundaries are computed once; card iteration is lazy and
/// re-scans the block from its start on every call.
#[derive(Debug, Clone)]
pub struct Deck<'a> {
    source: &'a str,
    segmentation: Segmentation,
}

impl<'a> Deck<'a> {
    /// Segment a complete deck.
    pub fn parse(source: &'a str) -> Result<Self> {
        Self::with_options(source, &SegmentOptions::default())
    }

    /// Segment a deck using explicit options.
    pub fn with_options(source: &'a str, options: &SegmentOptions) -> Result<Self> {
        let segmentation = segment(source, options)?;
        Ok(Self {
            source,
            segmentation,
        })
    }

    /// Original document text.
    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn segmentation(&self) -> &Segmentation {
        &self.segmentation
    }

    /// Blocks in document order.
    pub fn blocks(&self) -> &[Block] {
        &self.segmentation.blocks
    }

    /// Text of the block of the given kind.
    pub fn block_text(&self, kind: BlockKind) -> Option<&'a str> {
        self.segmentation.text(self.source, kind)
    }

    /// Title line without its terminator.
    pub fn title(&self) -> Option<&'a str> {
        self.block_text(BlockKind::Title)
            .map(|t| t.trim_end_matches(['\r', '\n']))
    }

    /// Cards and comment groups of one block; empty when the block is absent.
    pub fn groups(&self, kind: BlockKind) -> CardSegmenter<'a> {
        match self.segmentation.block(kind) {
            Some(block) => CardSegmenter::new(
                block.text(self.source),
                self.segmentation.line_ending,
                block.line,
            ),
            None => CardSegmenter::new("", self.segmentation.line_ending, 1),
        }
    }

    /// Groups of several blocks in document order, tagged with their block.
    pub fn cards<'s>(
        &'s self,
        kinds: &'s [BlockKind],
        include_comments: bool,
    ) -> impl Iterator<Item = (BlockKind, Card<'a>)> + 's {
        self.segmentation
            .blocks
            .iter()
            .filter(move |block| kinds.contains(&block.kind))
            .flat_map(move |block| {
                let kind = block.kind;
                self.groups(kind).map(move |card| (kind, card))
            })
            .filter(move |(_, card)| include_comments || !card.is_comment())
    }

    /// Cell cards with their split fields.
    pub fn cell_cards(&self) -> impl Iterator<Item = Result<(Card<'a>, CellCardFields)>> {
        self.groups(BlockKind::Cell)
            .filter(|card| !card.is_comment())
            .map(|card| {
                let fields = split_cell_card(&card.content(), card.line)?;
                Ok((card, fields))
            })
    }

    /// Surface cards with their split fields.
    pub fn surface_cards(&self) -> impl Iterator<Item = Result<(Card<'a>, SurfaceCardFields)>> {
        self.groups(BlockKind::Surface)
            .filter(|card| !card.is_comment())
            .map(|card| {
                let fields = split_surface_card(&card.content(), card.line)?;
                Ok((card, fields))
            })
    }

    /// Data cards with their split fields.
    pub fn data_cards(&self) -> impl Iterator<Item = Result<(Card<'a>, DataCardFields)>> {
        self.groups(BlockKind::Data)
            .filter(|card| !card.is_comment())
            .map(|card| {
                let fields = split_data_card(&card.content(), card.line)?;
                Ok((card, fields))
            })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const DECK: &str = "\
sample deck
c cells
1 0 -1 imp:n=1
2 1 -1.0 1 -2
     imp:n=1
3 like 2 but imp:n=0

c surfaces
1 so 1.0
2 so 2.0

m1 1001 2
";

    #[test]
    fn test_cards_across_blocks() {
        let deck = Deck::parse(DECK).unwrap();
        let tags: Vec<_> = deck
            .cards(&[BlockKind::Cell, BlockKind::Surface], false)
            .map(|(kind, _)| kind)
            .collect();
        assert_eq!(
            tags,
            [
                BlockKind::Cell,
                BlockKind::Cell,
                BlockKind::Cell,
                BlockKind::Surface,
                BlockKind::Surface
            ]
        );
    }

    #[test]
    fn test_comment_groups_included_on_request() {
        let deck = Deck::parse(DECK).unwrap();
        let comments = deck
            .cards(&[BlockKind::Cell, BlockKind::Surface], true)
            .filter(|(_, card)| card.is_comment())
            .count();
        assert_eq!(comments, 2);
    }

    #[test]
    fn test_cell_cards_split() {
        let deck = Deck::parse(DECK).unwrap();
        let cells: Vec<_> = deck.cell_cards().collect::<Result<_>>().unwrap();
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[1].0.line, 4);
        assert_eq!(cells[1].1.options, "imp:n=1");
        assert_eq!(cells[2].1.like, Some(2));
    }

    #[test]
    fn test_surface_and_data_cards_split() {
        let deck = Deck::parse(DECK).unwrap();
        let surfaces: Vec<_> = deck.surface_cards().collect::<Result<_>>().unwrap();
        assert_eq!(surfaces.len(), 2);
        assert_eq!(surfaces[1].0.line, 10);
        let data: Vec<_> = deck.data_cards().collect::<Result<_>>().unwrap();
        assert_eq!(data[0].1.mnemonic, "m");
    }

    #[test]
    fn test_missing_block_has_no_groups() {
        let deck = Deck::parse("nps 10\n").unwrap();
        assert_eq!(deck.groups(BlockKind::Cell).count(), 0);
        assert_eq!(deck.title(), None);
    }
}
