//! Centralized configuration values shared across the MCNP geometry pipeline.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;

// =============================================================================
// CAD TRANSLATION
// =============================================================================

/// Distance between a surface and its designated inside point.
///
/// Also used as the distance by which a cone apex is moved along the axis to
/// obtain a non-apex axis point.
///
/// # Examples
/// ```
/// use config::constants::CAD_INSIDE_OFFSET;
/// assert_eq!(CAD_INSIDE_OFFSET, 1.0);
/// ```
pub const CAD_INSIDE_OFFSET: f64 = 1.0;

/// Normals shorter than this cannot be normalized.
///
/// # Examples
/// ```
/// use config::constants::ZERO_NORM_TOLERANCE;
/// assert!(ZERO_NORM_TOLERANCE < 1.0e-6);
/// ```
pub const ZERO_NORM_TOLERANCE: f64 = 1.0e-12;

// =============================================================================
// CARD LAYOUT
// =============================================================================

/// A `c`/`C` comment marker must appear within this many leading columns.
///
/// # Examples
/// ```
/// use config::constants::COMMENT_COLUMN_LIMIT;
/// assert_eq!(COMMENT_COLUMN_LIMIT, 5);
/// ```
pub const COMMENT_COLUMN_LIMIT: usize = 5;

/// Lines with at least this many leading blank columns continue the previous card.
///
/// # Examples
/// ```
/// use config::constants::CONTINUATION_INDENT;
/// let line = "      -3 4";
/// let blanks = line.len() - line.trim_start().len();
/// assert!(blanks >= CONTINUATION_INDENT);
/// ```
pub const CONTINUATION_INDENT: usize = 5;

/// Column width of a tab stop when counting leading blank columns.
///
/// # Examples
/// ```
/// use config::constants::TAB_WIDTH;
/// assert_eq!(TAB_WIDTH, 8);
/// ```
pub const TAB_WIDTH: usize = 8;

/// Case-insensitive prefix of a message block's first non-blank text.
///
/// # Examples
/// ```
/// use config::constants::MESSAGE_KEYWORD;
/// let head = &"MESSAGE:outp=x"[..MESSAGE_KEYWORD.len()];
/// assert!(head.eq_ignore_ascii_case(MESSAGE_KEYWORD));
/// ```
pub const MESSAGE_KEYWORD: &str = "message:";

/// Starts an inline comment running to the end of the line.
///
/// # Examples
/// ```
/// use config::constants::INLINE_COMMENT_MARKER;
/// let line = "1 0 -1 $ void";
/// assert_eq!(line.find(INLINE_COMMENT_MARKER), Some(7));
/// ```
pub const INLINE_COMMENT_MARKER: char = '$';

/// Ends the meaningful part of a line and continues the card on the next line.
///
/// # Examples
/// ```
/// use config::constants::CONTINUATION_MARKER;
/// assert!("1 0 -1 &".trim_end().ends_with(CONTINUATION_MARKER));
/// ```
pub const CONTINUATION_MARKER: char = '&';

// =============================================================================
// DIAGNOSTICS
// =============================================================================

/// Maximum width of a source fragment quoted in an error message.
///
/// # Examples
/// ```
/// use config::constants::FRAGMENT_DISPLAY_WIDTH;
/// assert!(FRAGMENT_DISPLAY_WIDTH >= 20);
/// ```
pub const FRAGMENT_DISPLAY_WIDTH: usize = 80;

/// Deepest nesting of parentheses and complements accepted in one
/// geometry field.
///
/// Parsed trees are at most this deep (plus one), which keeps the derived
/// drop, clone and comparison of a tree within ordinary stack limits.
///
/// # Examples
/// ```
/// use config::constants::MAX_GEOMETRY_NESTING;
/// assert!(MAX_GEOMETRY_NESTING >= 100);
/// ```
pub const MAX_GEOMETRY_NESTING: usize = 1_000;

/// Bytes of stack space reserved when growing recursion limits using the
/// `stacker` crate.
///
/// # Examples
/// ```
/// use config::constants::STACKER_STACK_SIZE_BYTES;
/// assert!(STACKER_STACK_SIZE_BYTES >= 1024);
/// ```
pub const STACKER_STACK_SIZE_BYTES: usize = 8 * 1024 * 1024;

/// Remaining stack below which a recursive geometry walk switches to a
/// freshly allocated segment of [`STACKER_STACK_SIZE_BYTES`].
///
/// # Examples
/// ```
/// use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
/// assert!(STACKER_RED_ZONE_BYTES < STACKER_STACK_SIZE_BYTES);
/// ```
pub const STACKER_RED_ZONE_BYTES: usize = 64 * 1024;

/// Shortens `text` to at most `width` characters by eliding the middle.
///
/// # Examples
/// ```
/// use config::constants::shorten;
/// assert_eq!(shorten("short", 80), "short");
/// assert_eq!(shorten("abcdefghijklmnopqrstuvwxyz", 15), "abcde ... vwxyz");
/// ```
pub fn shorten(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(5) / 2;
    let head: String = text.chars().take(keep).collect();
    let tail: String = text.chars().skip(count - keep).collect();
    format!("{head} ... {tail}")
}

/// Immutable snapshot of global configuration settings that can be shared
/// between crates.
///
/// # Examples
/// ```
/// use config::constants::GlobalConfig;
/// let config = GlobalConfig::default();
/// assert!(config.inside_offset > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalConfig {
    /// Offset separating a surface from its inside point.
    pub inside_offset: f64,
    /// Smallest normal length accepted for plane normalization.
    pub zero_norm_tolerance: f64,
}

impl GlobalConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// values.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GlobalConfig;
    /// let cfg = GlobalConfig::new(2.0, 1.0e-12).expect("valid config");
    /// assert_eq!(cfg.inside_offset, 2.0);
    /// ```
    pub fn new(inside_offset: f64, zero_norm_tolerance: f64) -> Result<Self, ConfigError> {
        if !(inside_offset > 0.0) || !inside_offset.is_finite() {
            return Err(ConfigError::InvalidOffset(inside_offset));
        }
        if !(zero_norm_tolerance > 0.0) {
            return Err(ConfigError::InvalidTolerance(zero_norm_tolerance));
        }
        Ok(Self {
            inside_offset,
            zero_norm_tolerance,
        })
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            inside_offset: CAD_INSIDE_OFFSET,
            zero_norm_tolerance: ZERO_NORM_TOLERANCE,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the inside offset is zero, negative or not finite.
    InvalidOffset(f64),
    /// Raised when tolerance is zero or negative.
    InvalidTolerance(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidOffset(value) => {
                write!(f, "inside_offset must be positive and finite: {value}")
            }
            ConfigError::InvalidTolerance(value) => {
                write!(f, "zero_norm_tolerance must be positive: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
