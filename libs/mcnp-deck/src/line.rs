//! # Physical Lines
//!
//! Forward-only line scanner used by both segmenters.
//! Tracks byte offset and 1-based line number as it advances.
//!
//! ## Example
//!
//! ```rust
//! use mcnp_deck::line::{LineEnding, LineScanner};
//!
//! let text = "title\r\n1 0 -1\r\n";
//! let ending = LineEnding::detect(text);
//! let lines: Vec<_> = LineScanner::new(text, ending).collect();
//! assert_eq!(ending, LineEnding::CrLf);
//! assert_eq!(lines[1].text, "1 0 -1");
//! assert_eq!(lines[1].number, 2);
//! ```

use config::constants::TAB_WIDTH;
use serde::{Deserialize, Serialize};

// =============================================================================
// LINE ENDING
// =============================================================================

/// Line terminator style of a document.
///
/// Detected once per document so that every stage counts lines the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
    Cr,
}

impl LineEnding {
    /// Detect the style from the first terminator found in `text`.
    ///
    /// Text without any terminator is treated as `Lf`.
    pub fn detect(text: &str) -> Self {
        let bytes = text.as_bytes();
        match bytes.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(i) if bytes[i] == b'\r' => {
                if bytes.get(i + 1) == Some(&b'\n') {
                    Self::CrLf
                } else {
                    Self::Cr
                }
            }
            _ => Self::Lf,
        }
    }

    /// Byte that ends a line in this style.
    pub const fn delimiter(self) -> u8 {
        match self {
            Self::Lf | Self::CrLf => b'\n',
            Self::Cr => b'\r',
        }
    }
}

// =============================================================================
// PHYSICAL LINE
// =============================================================================

/// One physical line of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicalLine<'a> {
    /// Line content without its terminator.
    pub text: &'a str,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset just past the terminator (or end of text).
    pub end: usize,
    /// 1-based line number.
    pub number: usize,
}

impl<'a> PhysicalLine<'a> {
    /// Whitespace-only lines separate blocks.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Count leading blank columns, expanding tabs to the next tab stop.
///
/// ```rust
/// use mcnp_deck::line::leading_blank_columns;
///
/// assert_eq!(leading_blank_columns("   x"), 3);
/// assert_eq!(leading_blank_columns("\tx"), 8);
/// assert_eq!(leading_blank_columns("  \tx"), 8);
/// ```
pub fn leading_blank_columns(text: &str) -> usize {
    let mut column = 0;
    for c in text.chars() {
        match c {
            ' ' => column += 1,
            '\t' => column = (column / TAB_WIDTH + 1) * TAB_WIDTH,
            _ => break,
        }
    }
    column
}

// =============================================================================
// LINE SCANNER
// =============================================================================

/// Iterator over the physical lines of a text.
///
/// ## Example
///
/// ```rust
/// use mcnp_deck::line::{LineEnding, LineScanner};
///
/// let mut scanner = LineScanner::new("a\nb", LineEnding::Lf);
/// assert_eq!(scanner.next().map(|l| l.text), Some("a"));
/// assert_eq!(scanner.next().map(|l| l.end), Some(3));
/// assert!(scanner.next().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct LineScanner<'a> {
    /// Source text.
    source: &'a str,
    /// Terminator style.
    ending: LineEnding,
    /// Current byte offset.
    byte: usize,
    /// Number of the next line (1-based).
    line: usize,
}

impl<'a> LineScanner<'a> {
    /// Create a scanner whose first line is line 1.
    pub fn new(source: &'a str, ending: LineEnding) -> Self {
        Self::starting_at(source, ending, 1)
    }

    /// Create a scanner whose first line carries `first_line`.
    ///
    /// Used when scanning a block cut out of a larger document.
    pub fn starting_at(source: &'a str, ending: LineEnding, first_line: usize) -> Self {
        Self {
            source,
            ending,
            byte: 0,
            line: first_line,
        }
    }

    /// Check if at end of text.
    pub fn is_eof(&self) -> bool {
        self.byte >= self.source.len()
    }
}

impl<'a> Iterator for LineScanner<'a> {
    type Item = PhysicalLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_eof() {
            return None;
        }
        let start = self.byte;
        let rest = &self.source.as_bytes()[start..];
        let (content_end, end) = match rest.iter().position(|&b| b == self.ending.delimiter()) {
            Some(i) => {
                let mut content_end = start + i;
                if self.ending == LineEnding::CrLf && i > 0 && rest[i - 1] == b'\r' {
                    content_end -= 1;
                }
                (content_end, start + i + 1)
            }
            None => (self.source.len(), self.source.len()),
        };

        let line = PhysicalLine {
            text: &self.source[start..content_end],
            start,
            end,
            number: self.line,
        };
        self.byte = end;
        self.line += 1;
        Some(line)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_styles() {
        assert_eq!(LineEnding::detect("a\nb\r\n"), LineEnding::Lf);
        assert_eq!(LineEnding::detect("a\r\nb"), LineEnding::CrLf);
        assert_eq!(LineEnding::detect("a\rb"), LineEnding::Cr);
        assert_eq!(LineEnding::detect("no terminator"), LineEnding::Lf);
    }

    #[test]
    fn test_scanner_empty() {
        let mut scanner = LineScanner::new("", LineEnding::Lf);
        assert!(scanner.is_eof());
        assert!(scanner.next().is_none());
    }

    #[test]
    fn test_scanner_ranges_cover_text() {
        let text = "one\ntwo\n\nfour";
        let lines: Vec<_> = LineScanner::new(text, LineEnding::Lf).collect();
        assert_eq!(lines.len(), 4);
        let rebuilt: String = lines.iter().map(|l| &text[l.start..l.end]).collect();
        assert_eq!(rebuilt, text);
        assert!(lines[2].is_blank());
        assert_eq!(lines[3].number, 4);
    }

    #[test]
    fn test_scanner_crlf_strips_carriage_return() {
        let text = "a\r\nb\r\n";
        let lines: Vec<_> = LineScanner::new(text, LineEnding::CrLf).collect();
        assert_eq!(lines[0].text, "a");
        assert_eq!(lines[0].end, 3);
        assert_eq!(lines[1].text, "b");
    }

    #[test]
    fn test_scanner_cr_only() {
        let lines: Vec<_> = LineScanner::new("a\rb\r", LineEnding::Cr).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].text, "b");
    }

    #[test]
    fn test_scanner_offset_numbering() {
        let lines: Vec<_> = LineScanner::starting_at("x\ny", LineEnding::Lf, 10).collect();
        assert_eq!(lines[0].number, 10);
        assert_eq!(lines[1].number, 11);
    }

    #[test]
    fn test_leading_columns_stop_at_content() {
        assert_eq!(leading_blank_columns("x    "), 0);
        assert_eq!(leading_blank_columns("     "), 5);
    }
}
