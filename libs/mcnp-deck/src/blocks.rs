//! # Block Segmentation
//!
//! Splits a deck into its message, title, cell, surface and data blocks.
//!
//! A complete input deck has the layout
//!
//! ```text
//! message block          (optional, starts with "message:")
//! <blank line>
//! title line
//! cell cards
//! <blank line>
//! surface cards
//! <blank line>
//! data cards
//! ```
//!
//! A continue-run deck consists of an optional message block followed by a
//! single data block. Blank (whitespace-only) lines are the only boundaries;
//! the title and cell blocks are split on the first physical line instead.
//!
//! ## Example
//!
//! ```rust
//! use mcnp_deck::blocks::{segment, BlockKind, SegmentOptions};
//!
//! let text = "title\n1 0 -1\n\n1 so 2.0\n\nmode n\n";
//! let seg = segment(text, &SegmentOptions::default()).unwrap();
//! let kinds: Vec<_> = seg.blocks.iter().map(|b| b.kind).collect();
//! assert_eq!(
//!     kinds,
//!     [BlockKind::Title, BlockKind::Cell, BlockKind::Surface, BlockKind::Data]
//! );
//! assert_eq!(seg.text(text, BlockKind::Surface), Some("1 so 2.0\n"));
//! ```

use std::fmt;
use std::ops::Range;

use config::constants::MESSAGE_KEYWORD;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DeckError, Result};
use crate::line::{LineEnding, LineScanner};

// =============================================================================
// BLOCK
// =============================================================================

/// Kind of a deck block, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Message,
    Title,
    Cell,
    Surface,
    Data,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Message => "message",
            Self::Title => "title",
            Self::Cell => "cell",
            Self::Surface => "surface",
            Self::Data => "data",
        };
        f.write_str(name)
    }
}

/// A contiguous section of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Block kind.
    pub kind: BlockKind,
    /// Byte range in the document (boundary separators excluded).
    pub range: Range<usize>,
    /// 1-based number of the block's first line.
    pub line: usize,
}

impl Block {
    /// Text of the block within `source`.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range.clone()]
    }

    /// Check if the block holds no text.
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

// =============================================================================
// OPTIONS
// =============================================================================

/// Controls how the first segment of a document is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentOptions {
    /// Block the text starts with.
    ///
    /// `None` detects a message header and infers the layout from the
    /// number of blocks. `Some(BlockKind::Message)` requires the header.
    /// Any other kind treats the text as a partial deck starting at that
    /// block.
    pub first_block: Option<BlockKind>,
}

impl SegmentOptions {
    /// Options for a partial deck starting at `kind`.
    pub fn starting_at(kind: BlockKind) -> Self {
        Self {
            first_block: Some(kind),
        }
    }
}

// =============================================================================
// SEGMENTATION
// =============================================================================

/// Result of splitting a document into blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segmentation {
    /// Line terminator style detected for the document.
    pub line_ending: LineEnding,
    /// Blocks in document order.
    pub blocks: Vec<Block>,
    /// Blank lines consumed as block boundaries.
    pub separators: Vec<Range<usize>>,
    /// Text after the blank line that ends the data block.
    pub trailer: Option<Range<usize>>,
}

impl Segmentation {
    /// Block of the given kind, if present.
    pub fn block(&self, kind: BlockKind) -> Option<&Block> {
        self.blocks.iter().find(|b| b.kind == kind)
    }

    /// Text of the block of the given kind, if present.
    pub fn text<'a>(&self, source: &'a str, kind: BlockKind) -> Option<&'a str> {
        self.block(kind).map(|b| b.text(source))
    }

    /// Every range produced by the scan, in document order.
    ///
    /// Concatenating the ranges reproduces the source exactly.
    pub fn ranges(&self) -> Vec<Range<usize>> {
        let mut ranges: Vec<Range<usize>> = self
            .blocks
            .iter()
            .map(|b| b.range.clone())
            .chain(self.separators.iter().cloned())
            .chain(self.trailer.iter().cloned())
            .collect();
        ranges.sort_by_key(|r| (r.start, r.end));
        ranges
    }
}

/// Text between two boundaries.
#[derive(Debug, Clone)]
struct Segment {
    range: Range<usize>,
    line: usize,
}

/// Split `text` into blocks.
///
/// ## Errors
///
/// `BlockBoundary` when the document is empty, when a message block is not
/// followed by a boundary, or when a required message header is missing.
pub fn segment(text: &str, options: &SegmentOptions) -> Result<Segmentation> {
    if text.trim().is_empty() {
        return Err(DeckError::block_boundary(1, text, "document has no content"));
    }

    let line_ending = LineEnding::detect(text);
    let (segments, boundaries) = scan_segments(text, line_ending);

    let mut builder = Builder {
        text,
        line_ending,
        segments: &segments,
        next: 0,
        blocks: Vec::new(),
    };

    match options.first_block {
        None => {
            if builder.take_message(false)? {
                if segments.len() - builder.next == 1 {
                    builder.push_next(BlockKind::Data);
                } else {
                    builder.push_full_layout();
                }
            } else if segments.len() == 1 {
                builder.push_next(BlockKind::Data);
            } else {
                builder.push_full_layout();
            }
        }
        Some(BlockKind::Message) => {
            builder.take_message(true)?;
            if segments.len() - builder.next == 1 {
                builder.push_next(BlockKind::Data);
            } else {
                builder.push_full_layout();
            }
        }
        Some(BlockKind::Title) => builder.push_full_layout(),
        Some(BlockKind::Cell) => builder.push_sequence(&[BlockKind::Cell, BlockKind::Surface, BlockKind::Data]),
        Some(BlockKind::Surface) => builder.push_sequence(&[BlockKind::Surface, BlockKind::Data]),
        Some(BlockKind::Data) => builder.push_next(BlockKind::Data),
    }

    let consumed = builder.next;
    let blocks = builder.blocks;

    // Boundary i precedes segment i + 1; anything after the last used
    // segment (and its terminating boundary) is trailer text.
    let trailer = segments
        .get(consumed)
        .map(|s| s.range.start..text.len())
        .filter(|r| !r.is_empty());
    let separators: Vec<Range<usize>> = boundaries.into_iter().take(consumed).collect();

    debug!(
        blocks = blocks.len(),
        separators = separators.len(),
        line_ending = ?line_ending,
        has_trailer = trailer.is_some(),
        "segmented deck"
    );

    Ok(Segmentation {
        line_ending,
        blocks,
        separators,
        trailer,
    })
}

/// Split text at blank lines.
///
/// Returns the segments and the boundaries between them; boundary `i` sits
/// between segment `i` and segment `i + 1`. An empty final segment (text
/// ending with a blank line) is dropped.
fn scan_segments(text: &str, ending: LineEnding) -> (Vec<Segment>, Vec<Range<usize>>) {
    let mut segments = Vec::new();
    let mut boundaries = Vec::new();
    let mut start = 0;
    let mut first_line = 1;

    for line in LineScanner::new(text, ending) {
        if line.is_blank() {
            segments.push(Segment {
                range: start..line.start,
                line: first_line,
            });
            boundaries.push(line.start..line.end);
            start = line.end;
            first_line = line.number + 1;
        }
    }
    segments.push(Segment {
        range: start..text.len(),
        line: first_line,
    });

    if segments.len() > 1 && segments.last().map_or(false, |s| s.range.is_empty()) {
        segments.pop();
    }
    (segments, boundaries)
}

/// Assigns segments to block kinds front to back.
struct Builder<'a> {
    text: &'a str,
    line_ending: LineEnding,
    segments: &'a [Segment],
    next: usize,
    blocks: Vec<Block>,
}

impl<'a> Builder<'a> {
    /// Consume a message block if the first segment starts with the header.
    fn take_message(&mut self, required: bool) -> Result<bool> {
        let Some(first) = self.segments.first() else {
            return Ok(false);
        };
        let body = &self.text[first.range.clone()];
        let is_message = body
            .trim_start()
            .get(..MESSAGE_KEYWORD.len())
            .map_or(false, |head| head.eq_ignore_ascii_case(MESSAGE_KEYWORD));

        if !is_message {
            if required {
                return Err(DeckError::block_boundary(
                    first.line,
                    body.lines().next().unwrap_or(""),
                    format!("expected message header '{MESSAGE_KEYWORD}'"),
                ));
            }
            return Ok(false);
        }
        if self.segments.len() < 2 {
            return Err(DeckError::block_boundary(
                first.line,
                body,
                "message block is not followed by a blank line",
            ));
        }
        self.push_next(BlockKind::Message);
        Ok(true)
    }

    /// Title + cell, surface, data.
    fn push_full_layout(&mut self) {
        if let Some(segment) = self.segments.get(self.next).cloned() {
            self.split_title(&segment);
            self.next += 1;
        }
        self.push_sequence(&[BlockKind::Surface, BlockKind::Data]);
    }

    fn push_sequence(&mut self, kinds: &[BlockKind]) {
        for &kind in kinds {
            if self.next >= self.segments.len() {
                break;
            }
            self.push_next(kind);
        }
    }

    fn push_next(&mut self, kind: BlockKind) {
        if let Some(segment) = self.segments.get(self.next) {
            self.blocks.push(Block {
                kind,
                range: segment.range.clone(),
                line: segment.line,
            });
            self.next += 1;
        }
    }

    /// The title is the first physical line; the rest of the segment is the cell block.
    fn split_title(&mut self, segment: &Segment) {
        let body = &self.text[segment.range.clone()];
        let title_end = LineScanner::new(body, self.line_ending)
            .next()
            .map_or(0, |line| line.end);
        let split = segment.range.start + title_end;

        self.blocks.push(Block {
            kind: BlockKind::Title,
            range: segment.range.start..split,
            line: segment.line,
        });
        self.blocks.push(Block {
            kind: BlockKind::Cell,
            range: split..segment.range.end,
            line: segment.line + usize::from(title_end > 0),
        });
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(seg: &Segmentation) -> Vec<BlockKind> {
        seg.blocks.iter().map(|b| b.kind).collect()
    }

    fn rebuild(text: &str, seg: &Segmentation) -> String {
        seg.ranges().into_iter().map(|r| &text[r]).collect()
    }

    #[test]
    fn test_full_deck() {
        let text = "a title\n1 0 -1\n2 0 1\n\n1 so 5\n\nmode n\nnps 10\n";
        let seg = segment(text, &SegmentOptions::default()).unwrap();
        assert_eq!(
            kinds(&seg),
            [BlockKind::Title, BlockKind::Cell, BlockKind::Surface, BlockKind::Data]
        );
        assert_eq!(seg.text(text, BlockKind::Title), Some("a title\n"));
        assert_eq!(seg.text(text, BlockKind::Cell), Some("1 0 -1\n2 0 1\n"));
        assert_eq!(seg.block(BlockKind::Cell).unwrap().line, 2);
        assert_eq!(seg.block(BlockKind::Surface).unwrap().line, 5);
        assert_eq!(seg.block(BlockKind::Data).unwrap().line, 7);
        assert_eq!(rebuild(text, &seg), text);
        assert!(seg.trailer.is_none());
    }

    #[test]
    fn test_message_then_full_deck() {
        let text = "MESSAGE: o=out\n\ntitle\n1 0 -1\n\n1 so 5\n\nmode n\n";
        let seg = segment(text, &SegmentOptions::default()).unwrap();
        assert_eq!(
            kinds(&seg),
            [
                BlockKind::Message,
                BlockKind::Title,
                BlockKind::Cell,
                BlockKind::Surface,
                BlockKind::Data
            ]
        );
        assert_eq!(seg.block(BlockKind::Title).unwrap().line, 3);
        assert_eq!(rebuild(text, &seg), text);
    }

    #[test]
    fn test_message_then_continue_run() {
        let text = "message: runtpe=r\n\nnps 100\nprint\n";
        let seg = segment(text, &SegmentOptions::default()).unwrap();
        assert_eq!(kinds(&seg), [BlockKind::Message, BlockKind::Data]);
        assert_eq!(seg.text(text, BlockKind::Data), Some("nps 100\nprint\n"));
    }

    #[test]
    fn test_message_header_glued_to_first_option() {
        let text = "Message:outp=x

t
1 0 -1

1 so 1

nps 1
";
        let seg = segment(text, &SegmentOptions::default()).unwrap();
        assert_eq!(kinds(&seg)[0], BlockKind::Message);
        assert_eq!(seg.block(BlockKind::Title).unwrap().line, 3);

        // A title that merely mentions the keyword later is still a title.
        let text = "my message: none
1 0 -1

1 so 1

nps 1
";
        let seg = segment(text, &SegmentOptions::default()).unwrap();
        assert_eq!(kinds(&seg)[0], BlockKind::Title);
    }

    #[test]
    fn test_single_segment_is_data() {
        let text = "nps 100\n";
        let seg = segment(text, &SegmentOptions::default()).unwrap();
        assert_eq!(kinds(&seg), [BlockKind::Data]);
    }

    #[test]
    fn test_message_without_boundary_fails() {
        let err = segment("message: x\n", &SegmentOptions::default()).unwrap_err();
        assert!(matches!(err, DeckError::BlockBoundary { line: 1, .. }));
    }

    #[test]
    fn test_required_message_missing_fails() {
        let options = SegmentOptions::starting_at(BlockKind::Message);
        let err = segment("title\n1 0 -1\n\n1 so 1\n", &options).unwrap_err();
        assert!(err.to_string().contains("message header"));
    }

    #[test]
    fn test_empty_document_fails() {
        assert!(segment("  \n\n", &SegmentOptions::default()).is_err());
    }

    #[test]
    fn test_trailer_after_data() {
        let text = "t\n1 0 -1\n\n1 so 1\n\nnps 1\n\nnotes after the deck\n";
        let seg = segment(text, &SegmentOptions::default()).unwrap();
        let trailer = seg.trailer.clone().unwrap();
        assert_eq!(&text[trailer], "notes after the deck\n");
        assert_eq!(seg.separators.len(), 3);
        assert_eq!(rebuild(text, &seg), text);
    }

    #[test]
    fn test_trailing_blank_line_is_not_a_block() {
        let text = "t\n1 0 -1\n\n1 so 1\n\nnps 1\n\n";
        let seg = segment(text, &SegmentOptions::default()).unwrap();
        assert_eq!(seg.blocks.len(), 4);
        assert!(seg.trailer.is_none());
        assert_eq!(rebuild(text, &seg), text);
    }

    #[test]
    fn test_crlf_counts_lines() {
        let text = "t\r\n1 0 -1\r\n\r\n1 so 1\r\n";
        let seg = segment(text, &SegmentOptions::default()).unwrap();
        assert_eq!(seg.line_ending, LineEnding::CrLf);
        assert_eq!(seg.block(BlockKind::Surface).unwrap().line, 4);
        assert_eq!(seg.text(text, BlockKind::Cell), Some("1 0 -1\r\n"));
        assert_eq!(rebuild(text, &seg), text);
    }

    #[test]
    fn test_partial_deck_from_surfaces() {
        let text = "1 so 1\n2 pz 0\n\nmode n\n";
        let seg = segment(text, &SegmentOptions::starting_at(BlockKind::Surface)).unwrap();
        assert_eq!(kinds(&seg), [BlockKind::Surface, BlockKind::Data]);
    }

    #[test]
    fn test_partial_deck_from_cells() {
        let text = "1 0 -1\n\n1 so 1\n";
        let seg = segment(text, &SegmentOptions::starting_at(BlockKind::Cell)).unwrap();
        assert_eq!(kinds(&seg), [BlockKind::Cell, BlockKind::Surface]);
        assert_eq!(seg.block(BlockKind::Cell).unwrap().line, 1);
    }

    #[test]
    fn test_title_without_terminator() {
        let text = "only a title";
        let seg = segment(text, &SegmentOptions::starting_at(BlockKind::Title)).unwrap();
        assert_eq!(seg.text(text, BlockKind::Title), Some("only a title"));
        assert!(seg.block(BlockKind::Cell).unwrap().is_empty());
    }
}
