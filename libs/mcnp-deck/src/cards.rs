//! # Card Segmentation
//!
//! Groups the lines of one block into cards and inter-card comment groups.
//!
//! Each physical line is classified as
//!
//! | class | rule |
//! |-------|------|
//! | comment | first non-blank character is `c`/`C` within the first 5 columns, followed by a blank or end of line |
//! | continuation | at least 5 leading blank columns, or the previous non-comment line ends with `&` |
//! | card start | anything else |
//!
//! Comment lines that sit between two lines of the same card are folded into
//! that card; comment lines followed by a new card form their own group.
//!
//! ## Example
//!
//! ```rust
//! use mcnp_deck::cards::{CardKind, CardSegmenter};
//! use mcnp_deck::line::LineEnding;
//!
//! let block = "1 0 -1\nc between cards\n2 0 1\nc inside\n     -2\n";
//! let groups: Vec<_> = CardSegmenter::new(block, LineEnding::Lf, 1).collect();
//! assert_eq!(groups.len(), 3);
//! assert_eq!(groups[1].kind, CardKind::Comment);
//! assert_eq!(groups[2].lines, ["2 0 1", "c inside", "     -2"]);
//! ```

use std::collections::VecDeque;

use config::constants::{
    COMMENT_COLUMN_LIMIT, CONTINUATION_INDENT, CONTINUATION_MARKER, INLINE_COMMENT_MARKER,
};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::content::normalize_card;
use crate::line::{leading_blank_columns, LineEnding, LineScanner, PhysicalLine};

// =============================================================================
// CARD
// =============================================================================

/// Type tag of an emitted group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    /// A logical record, possibly spanning several lines.
    Card,
    /// Comment lines between two cards.
    Comment,
}

/// A group of consecutive lines of one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card<'a> {
    /// Group type.
    pub kind: CardKind,
    /// Raw lines without terminators; never empty.
    pub lines: Vec<&'a str>,
    /// 1-based document line of the first line.
    pub line: usize,
    /// 0-based index of the first line within its block.
    pub index: usize,
}

impl<'a> Card<'a> {
    /// Canonical one-line content of the card.
    pub fn content(&self) -> String {
        normalize_card(&self.lines)
    }

    pub fn is_comment(&self) -> bool {
        self.kind == CardKind::Comment
    }
}

// =============================================================================
// LINE CLASSIFICATION
// =============================================================================

/// Class of a physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    Comment,
    Continuation,
    CardStart,
}

/// Check if `line` is a comment line.
///
/// ```rust
/// use mcnp_deck::cards::is_comment_line;
///
/// assert!(is_comment_line("c a comment"));
/// assert!(is_comment_line("    C"));
/// assert!(!is_comment_line("     c too far right"));
/// assert!(!is_comment_line("cz 5"));
/// ```
pub fn is_comment_line(line: &str) -> bool {
    if leading_blank_columns(line) >= COMMENT_COLUMN_LIMIT {
        return false;
    }
    let mut rest = line.trim_start().chars();
    matches!(rest.next(), Some('c' | 'C')) && rest.next().map_or(true, char::is_whitespace)
}

/// Check if the meaningful part of `line` ends with the continuation marker.
fn ends_with_continuation(line: &str) -> bool {
    let content = match line.find(INLINE_COMMENT_MARKER) {
        Some(i) => &line[..i],
        None => line,
    };
    content.trim_end().ends_with(CONTINUATION_MARKER)
}

/// Classify `line` given whether the previous non-comment line asked for continuation.
pub fn classify_line(line: &str, previous_continues: bool) -> LineClass {
    if is_comment_line(line) {
        LineClass::Comment
    } else if previous_continues || leading_blank_columns(line) >= CONTINUATION_INDENT {
        LineClass::Continuation
    } else {
        LineClass::CardStart
    }
}

// =============================================================================
// CARD SEGMENTER
// =============================================================================

/// Segmenter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Nothing accumulated yet.
    Start,
    /// Last line belonged to the current card.
    InCard,
    /// Last line was a comment held in the pending group.
    InComment,
}

/// Lines accumulated for one group.
#[derive(Debug)]
struct Pending<'a> {
    lines: Vec<&'a str>,
    line: usize,
    index: usize,
}

impl<'a> Pending<'a> {
    fn open(line: &PhysicalLine<'a>, index: usize) -> Self {
        Self {
            lines: vec![line.text],
            line: line.number,
            index,
        }
    }

    fn into_card(self, kind: CardKind) -> Card<'a> {
        Card {
            kind,
            lines: self.lines,
            line: self.line,
            index: self.index,
        }
    }
}

/// Lazy, forward-only iterator over the groups of one block.
///
/// Lines are consumed only as far as needed to produce the next group, so
/// `take(n)` stops early without scanning the rest of the block.
pub struct CardSegmenter<'a> {
    lines: LineScanner<'a>,
    state: State,
    /// Index of the next line within the block.
    index: usize,
    /// Whether the previous non-comment line ended with `&`.
    continues: bool,
    card: Option<Pending<'a>>,
    comments: Option<Pending<'a>>,
    ready: VecDeque<Card<'a>>,
}

impl<'a> CardSegmenter<'a> {
    /// Create a segmenter over `block`, whose first line is document line `first_line`.
    pub fn new(block: &'a str, ending: LineEnding, first_line: usize) -> Self {
        Self {
            lines: LineScanner::starting_at(block, ending, first_line),
            state: State::Start,
            index: 0,
            continues: false,
            card: None,
            comments: None,
            ready: VecDeque::new(),
        }
    }

    /// Advance the state machine by one line.
    fn step(&mut self, line: PhysicalLine<'a>) {
        let index = self.index;
        self.index += 1;
        let class = classify_line(line.text, self.continues);
        if class != LineClass::Comment {
            self.continues = ends_with_continuation(line.text);
        }

        self.state = match (self.state, class) {
            (_, LineClass::Comment) => {
                match self.comments.as_mut() {
                    Some(group) => group.lines.push(line.text),
                    None => self.comments = Some(Pending::open(&line, index)),
                }
                State::InComment
            }
            (State::InCard, LineClass::Continuation) => {
                if let Some(card) = self.card.as_mut() {
                    card.lines.push(line.text);
                }
                State::InCard
            }
            (State::InComment, LineClass::Continuation) if self.card.is_some() => {
                if let (Some(card), Some(comments)) = (self.card.as_mut(), self.comments.take()) {
                    card.lines.extend(comments.lines);
                    card.lines.push(line.text);
                }
                State::InCard
            }
            // A continuation with no open card starts one.
            (_, LineClass::Continuation | LineClass::CardStart) => {
                self.flush();
                self.card = Some(Pending::open(&line, index));
                State::InCard
            }
        };
    }

    /// Queue the current card, then the pending comment group.
    fn flush(&mut self) {
        if let Some(card) = self.card.take() {
            self.ready.push_back(card.into_card(CardKind::Card));
        }
        if let Some(comments) = self.comments.take() {
            self.ready.push_back(comments.into_card(CardKind::Comment));
        }
    }
}

impl<'a> Iterator for CardSegmenter<'a> {
    type Item = Card<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.ready.is_empty() {
            match self.lines.next() {
                Some(line) => self.step(line),
                None => {
                    self.flush();
                    break;
                }
            }
        }
        let card = self.ready.pop_front()?;
        trace!(kind = ?card.kind, line = card.line, lines = card.lines.len(), "card group");
        Some(card)
    }
}

// =============================================================================
// TESTS
// =============================================================================
