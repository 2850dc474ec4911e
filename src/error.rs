//! Error types and result type for the jmdict crate.
//!
//! This module defines all error variants that can occur while loading a JMdict
//! document, building the entry model from it, and querying the loaded entries.
//! It uses the `snafu` library for ergonomic error handling with automatic
//! backtrace capture.
//!
//! # Examples
//!
//! ```
//! use jmdict::{Result, JmdictError};
//!
//! fn pick_range(len: usize) -> Result<()> {
//!     Err(JmdictError::index_out_of_range(Some(5), Some(6), len))
//! }
//!
//! assert!(pick_range(2).unwrap_err().is_index_out_of_range());
//! ```
//!
//! # Error Variants
//!
//! - [`JmdictError::Io`]: the document could not be read
//! - [`JmdictError::ParserError`]: malformed markup reported by the XML reader
//! - [`JmdictError::InvalidDataFormat`]: structurally broken markup
//! - [`JmdictError::TagMismatch`]: a builder was handed the wrong element
//! - [`JmdictError::NotFound`]: the root element or a required child is missing
//! - [`JmdictError::InvalidParameter`]: bad query arguments
//! - [`JmdictError::IndexOutOfRange`]: a render range outside the loaded entries

use std::io;
use snafu::{Snafu, Backtrace};

// Re-export snafu for context providers
pub use snafu;

/// Main error type for the jmdict crate.
///
/// All errors include automatic backtrace capture for debugging purposes.
/// Use the helper methods on `JmdictError` for convenient error construction.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum JmdictError {
    /// I/O error occurred while reading the document.
    #[snafu(display("IO error: {source}"))]
    Io {
        source: io::Error,
        backtrace: Backtrace,
    },

    /// Error reported by the XML reader or while converting parsed text.
    #[snafu(display("Parser error: {source}"))]
    ParserError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
        backtrace: Backtrace,
    },

    /// The document is well-formed enough to read but structurally broken.
    #[snafu(display("Invalid data format: {message}"))]
    InvalidDataFormat {
        message: String,
        backtrace: Backtrace,
    },

    /// A builder was invoked on a node carrying a different tag.
    #[snafu(display("Tag name mismatched ({expected} != {found})"))]
    TagMismatch {
        expected: String,
        found: String,
        backtrace: Backtrace,
    },

    /// A required element is absent.
    #[snafu(display("Element <{tag}> not found in {context}"))]
    NotFound {
        tag: String,
        context: String,
        backtrace: Backtrace,
    },

    /// Function was called with invalid parameters.
    #[snafu(display("Invalid parameter: {message}"))]
    InvalidParameter {
        message: String,
        backtrace: Backtrace,
    },

    /// Requested entry range lies outside the available entries.
    #[snafu(display("Index out of range: start={start:?}, end={end:?}, entries={len}"))]
    IndexOutOfRange {
        start: Option<usize>,
        end: Option<usize>,
        len: usize,
        backtrace: Backtrace,
    },

    /// Operation was cancelled by the progress callback.
    #[snafu(display("User interrupted"))]
    UserInterrupted {
        backtrace: Backtrace,
    },
}

// For automatic conversions from standard error types
impl From<io::Error> for JmdictError {
    fn from(source: io::Error) -> Self {
        Self::Io { source, backtrace: Backtrace::capture() }
    }
}

impl From<quick_xml::Error> for JmdictError {
    fn from(source: quick_xml::Error) -> Self {
        Self::ParserError { source: Box::new(source), backtrace: Backtrace::capture() }
    }
}

impl From<std::str::Utf8Error> for JmdictError {
    fn from(source: std::str::Utf8Error) -> Self {
        Self::ParserError { source: Box::new(source), backtrace: Backtrace::capture() }
    }
}

impl From<std::num::ParseIntError> for JmdictError {
    fn from(source: std::num::ParseIntError) -> Self {
        Self::ParserError { source: Box::new(source), backtrace: Backtrace::capture() }
    }
}

impl From<url::ParseError> for JmdictError {
    fn from(source: url::ParseError) -> Self {
        Self::ParserError { source: Box::new(source), backtrace: Backtrace::capture() }
    }
}

impl From<serde_json::Error> for JmdictError {
    fn from(source: serde_json::Error) -> Self {
        Self::ParserError { source: Box::new(source), backtrace: Backtrace::capture() }
    }
}

impl From<regex::Error> for JmdictError {
    fn from(source: regex::Error) -> Self {
        Self::InvalidParameter {
            message: format!("Invalid search pattern: {}", source),
            backtrace: Backtrace::capture(),
        }
    }
}

/// Helper methods for creating errors without context providers.
impl JmdictError {
    /// Creates an `InvalidParameter` error with the given message.
    pub fn invalid_parameter<S: Into<String>>(message: S) -> Self {
        Self::InvalidParameter {
            message: message.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates an `InvalidDataFormat` error with the given message.
    pub fn invalid_data_format<S: Into<String>>(message: S) -> Self {
        Self::InvalidDataFormat {
            message: message.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates a `TagMismatch` error.
    ///
    /// # Examples
    ///
    /// ```
    /// use jmdict::JmdictError;
    ///
    /// let error = JmdictError::tag_mismatch("k_ele", "r_ele");
    /// assert_eq!(error.to_string(), "Tag name mismatched (k_ele != r_ele)");
    /// ```
    pub fn tag_mismatch<S: Into<String>, T: Into<String>>(expected: S, found: T) -> Self {
        Self::TagMismatch {
            expected: expected.into(),
            found: found.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates a `NotFound` error for a missing element.
    pub fn not_found<S: Into<String>, C: Into<String>>(tag: S, context: C) -> Self {
        Self::NotFound {
            tag: tag.into(),
            context: context.into(),
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates an `IndexOutOfRange` error.
    pub fn index_out_of_range(start: Option<usize>, end: Option<usize>, len: usize) -> Self {
        Self::IndexOutOfRange {
            start,
            end,
            len,
            backtrace: Backtrace::capture(),
        }
    }

    /// Creates a `UserInterrupted` error.
    pub fn user_interrupted() -> Self {
        Self::UserInterrupted {
            backtrace: Backtrace::capture(),
        }
    }

    /// Checks if this error is a `TagMismatch` variant.
    pub fn is_tag_mismatch(&self) -> bool {
        matches!(self, JmdictError::TagMismatch { .. })
    }

    /// Checks if this error is a `NotFound` variant.
    pub fn is_not_found(&self) -> bool {
        matches!(self, JmdictError::NotFound { .. })
    }

    /// Checks if this error is an `InvalidParameter` variant.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, JmdictError::InvalidParameter { .. })
    }

    /// Checks if this error is an `IndexOutOfRange` variant.
    pub fn is_index_out_of_range(&self) -> bool {
        matches!(self, JmdictError::IndexOutOfRange { .. })
    }

    /// Checks if this error is an `Io` variant.
    pub fn is_io(&self) -> bool {
        matches!(self, JmdictError::Io { .. })
    }

    /// Checks if this error was raised while parsing markup.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, JmdictError::ParserError { .. } | JmdictError::InvalidDataFormat { .. })
    }
}

/// A specialized `Result` type for jmdict operations.
///
/// This is a convenience type alias that uses [`JmdictError`] as the error type.
pub type Result<T> = std::result::Result<T, JmdictError>;
