//! Error types for encoding and decoding.
//!
//! The codec has no partial-success concept: a document either renders or
//! parses completely, or the call fails with one of the typed errors below.
//!
//! - [`EncodeError`]: a value (or option set) has no lossless textual form
//! - [`DecodeError`]: the text is not a well-formed document
//!
//! Every syntax error raised by the decoder carries the 1-based line number
//! of the offending line.
//!
//! ## Examples
//!
//! ```rust
//! use tost::{decode, DecodeError};
//!
//! let err = decode("items[2]{a,b}:\n  1,2\n  3").unwrap_err();
//! assert_eq!(
//!     err,
//!     DecodeError::RowArity { line: 3, expected: 2, found: 1 }
//! );
//! ```

use std::fmt;
use thiserror::Error;

/// Failures raised while turning a [`Value`](crate::Value) into text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    /// NaN and the infinities have no lossless textual form.
    #[error("cannot encode non-finite number {0}")]
    NonFiniteNumber(f64),

    /// Two map keys became identical after being normalized to strings.
    #[error("key `{key}` collides with an existing key after normalization")]
    KeyCollision { key: String },

    /// The [`EncodeOptions`](crate::EncodeOptions) cannot produce a decodable document.
    #[error("invalid encode options: {0}")]
    InvalidOptions(String),

    /// A Rust value that has no counterpart in the value model.
    #[error("unsupported value: {0}")]
    Unsupported(String),

    /// Raised by `Serialize` implementations.
    #[error("{0}")]
    Custom(String),
}

/// Failures raised while parsing text back into a [`Value`](crate::Value).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The bracket header or column list of an array is not well formed.
    #[error("malformed array header at line {line}: {msg}")]
    MalformedHeader { line: usize, msg: String },

    /// A tabular row does not have one value per declared column.
    #[error("tabular row at line {line} has {found} values, header declares {expected} columns")]
    RowArity {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// The number of elements differs from the count in the array header.
    #[error("array at line {line} declares {expected} elements, found {found}")]
    LengthMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A quoted token has no closing quote.
    #[error("unterminated quoted string at line {line}, column {col}")]
    UnterminatedString { line: usize, col: usize },

    /// A quoted token contains an escape sequence outside the supported set.
    #[error("invalid escape sequence at line {line}, column {col}: {msg}")]
    InvalidEscape { line: usize, col: usize, msg: String },

    /// Indentation is not a multiple of the document's indent step, or skips a level.
    #[error("indentation error at line {line}: {msg}")]
    Indentation { line: usize, msg: String },

    /// A line that matches none of the structural patterns.
    #[error("unrecognized line {line}: `{content}`")]
    UnrecognizedLine { line: usize, content: String },

    /// A numeral whose value does not fit in a finite `f64`.
    #[error("numeral `{token}` at line {line} is out of range")]
    InvalidNumber { line: usize, token: String },

    /// An empty token where a value is required.
    #[error("missing value at line {line}")]
    MissingValue { line: usize },

    /// The same key appears twice in one object.
    #[error("duplicate key `{key}` at line {line}")]
    DuplicateKey { line: usize, key: String },

    /// Raised by `Deserialize` implementations when converting out of a `Value`.
    #[error("{0}")]
    Custom(String),
}

impl EncodeError {
    /// Creates an invalid-options error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tost::EncodeError;
    ///
    /// let err = EncodeError::invalid_options("indent must be positive");
    /// assert!(err.to_string().contains("indent must be positive"));
    /// ```
    pub fn invalid_options<T: fmt::Display>(msg: T) -> Self {
        EncodeError::InvalidOptions(msg.to_string())
    }

    pub fn unsupported<T: fmt::Display>(msg: T) -> Self {
        EncodeError::Unsupported(msg.to_string())
    }
}

impl DecodeError {
    pub(crate) fn malformed_header(line: usize, msg: &str) -> Self {
        DecodeError::MalformedHeader {
            line,
            msg: msg.to_string(),
        }
    }

    pub(crate) fn indentation(line: usize, msg: String) -> Self {
        DecodeError::Indentation { line, msg }
    }

    pub(crate) fn unrecognized(line: usize, content: &str) -> Self {
        DecodeError::UnrecognizedLine {
            line,
            content: content.to_string(),
        }
    }

    /// Returns the 1-based line the error points at, if it came from the parser.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tost::decode;
    ///
    /// let err = decode("a: 1\n   b: 2").unwrap_err();
    /// assert_eq!(err.line(), Some(2));
    /// ```
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            DecodeError::MalformedHeader { line, .. }
            | DecodeError::RowArity { line, .. }
            | DecodeError::LengthMismatch { line, .. }
            | DecodeError::UnterminatedString { line, .. }
            | DecodeError::InvalidEscape { line, .. }
            | DecodeError::Indentation { line, .. }
            | DecodeError::UnrecognizedLine { line, .. }
            | DecodeError::InvalidNumber { line, .. }
            | DecodeError::MissingValue { line }
            | DecodeError::DuplicateKey { line, .. } => Some(*line),
            DecodeError::Custom(_) => None,
        }
    }
}

impl serde::ser::Error for EncodeError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        EncodeError::Custom(msg.to_string())
    }
}

impl serde::de::Error for DecodeError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        DecodeError::Custom(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_arity_message_names_both_counts() {
        let err = DecodeError::RowArity {
            line: 3,
            expected: 2,
            found: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("line 3"));
        assert!(msg.contains("1 values"));
        assert!(msg.contains("2 columns"));
    }

    #[test]
    fn test_custom_error_has_no_line() {
        let err = <DecodeError as serde::de::Error>::custom("missing field `id`");
        assert_eq!(err.line(), None);
        assert_eq!(err.to_string(), "missing field `id`");
    }

    #[test]
    fn test_non_finite_message() {
        let err = EncodeError::NonFiniteNumber(f64::INFINITY);
        assert_eq!(err.to_string(), "cannot encode non-finite number inf");
    }
}
