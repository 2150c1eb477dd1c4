//! Configuration options for encoding.
//!
//! - [`EncodeOptions`]: indent width, delimiter and optional length marker
//! - [`Delimiter`]: the character separating inline values, columns and row cells
//!
//! Decoding takes no options: every non-default setting that affects parsing
//! is written into the array headers, so documents describe themselves.
//!
//! ## Examples
//!
//! ```rust
//! use tost::{encode, tost, Delimiter, EncodeOptions};
//!
//! let data = tost!({ "tags": ["a", "b", "c"] });
//!
//! let options = EncodeOptions::new()
//!     .with_delimiter(Delimiter::Pipe)
//!     .with_length_marker('#');
//! assert_eq!(encode(&data, &options).unwrap(), "tags[#3|]: a|b|c");
//! ```

use crate::EncodeError;

/// Delimiter used for inline arrays, tabular headers and tabular rows.
///
/// # Examples
///
/// ```rust
/// use tost::Delimiter;
///
/// assert_eq!(Delimiter::Comma.as_char(), ',');
/// assert_eq!(Delimiter::from_char('|'), Some(Delimiter::Pipe));
/// assert_eq!(Delimiter::from_char(';'), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
}

impl Delimiter {
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Delimiter::Comma => ",",
            Delimiter::Tab => "\t",
            Delimiter::Pipe => "|",
        }
    }

    /// Maps a single character to a delimiter, if it is one of the supported ones.
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            ',' => Some(Delimiter::Comma),
            '\t' => Some(Delimiter::Tab),
            '|' => Some(Delimiter::Pipe),
            _ => None,
        }
    }

    /// The character written inside an array header to announce this delimiter.
    ///
    /// The default comma is implied and therefore never written.
    #[must_use]
    pub const fn header_indicator(self) -> Option<char> {
        match self {
            Delimiter::Comma => None,
            other => Some(other.as_char()),
        }
    }
}

impl TryFrom<char> for Delimiter {
    type Error = EncodeError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        Delimiter::from_char(ch).ok_or_else(|| {
            EncodeError::invalid_options(format!(
                "unsupported delimiter {:?} (expected ',', '|' or a tab)",
                ch
            ))
        })
    }
}

/// Options consumed by [`encode`](crate::encode).
///
/// # Examples
///
/// ```rust
/// use tost::{Delimiter, EncodeOptions};
///
/// let options = EncodeOptions::new()
///     .with_indent(4)
///     .with_delimiter(Delimiter::Pipe)
///     .with_length_marker('#');
/// assert_eq!(options.indent, 4);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Spaces per nesting level. Must be positive.
    pub indent: usize,
    pub delimiter: Delimiter,
    /// Written in front of every array count, e.g. `[#3]`.
    pub length_marker: Option<char>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            indent: 2,
            delimiter: Delimiter::default(),
            length_marker: None,
        }
    }
}

impl EncodeOptions {
    /// Creates default options (2-space indent, comma delimiter, no length marker).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets a length marker character for arrays (`[#3]` instead of `[3]`).
    #[must_use]
    pub fn with_length_marker(mut self, marker: char) -> Self {
        self.length_marker = Some(marker);
        self
    }

    /// Checks that a document written with these options can be decoded again.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::InvalidOptions`] when the indent is zero or the
    /// length marker would be confused with the count, the delimiter or the
    /// header punctuation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tost::EncodeOptions;
    ///
    /// assert!(EncodeOptions::new().with_indent(0).validate().is_err());
    /// assert!(EncodeOptions::new().with_length_marker('7').validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), EncodeError> {
        if self.indent == 0 {
            return Err(EncodeError::invalid_options("indent must be positive"));
        }

        if let Some(marker) = self.length_marker {
            if marker.is_ascii_digit()
                || marker.is_whitespace()
                || matches!(marker, '[' | ']' | '{' | '}' | ':' | '"')
                || marker == self.delimiter.as_char()
            {
                return Err(EncodeError::invalid_options(format!(
                    "length marker {:?} cannot be told apart from the array header",
                    marker
                )));
            }
        }

        Ok(())
    }
}
