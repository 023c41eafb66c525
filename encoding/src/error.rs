//! Crate-level error types.
use dicom_core::error::Error as CoreError;
pub use dicom_core::error::{CastValueError, ConvertValueError, InvalidValueReadError};
use dicom_core::Tag;
use snafu::Snafu;
use std::borrow::Cow;
use std::fmt;
use std::io;

/// Type alias for a result from this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The main data type for errors in this crate.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// Raised when the obtained data element tag was not the one expected.
    #[snafu(display("Unexpected DICOM tag {}", tag))]
    UnexpectedTag {
        /// the tag that was read
        tag: Tag,
    },
    /// Raised when the obtained length is inconsistent.
    #[snafu(display("Inconsistent data value length in data element"))]
    UnexpectedDataValueLength,
    /// Error related to an invalid value read.
    #[snafu(display("Invalid value read: {}", source))]
    ReadValue {
        /// the underlying error
        source: InvalidValueReadError,
    },
    /// Error related to a failed text encoding / decoding procedure.
    #[snafu(display("Failed text encoding/decoding: {}", source))]
    TextEncoding {
        /// the underlying error
        source: TextEncodingError,
    },
    /// A failed attempt to cast a value to an inappropriate format.
    #[snafu(display("Failed value cast: {}", source))]
    CastValue {
        /// the underlying error
        source: CastValueError,
    },
    /// A failed attempt to convert a value to an inappropriate format.
    #[snafu(display("Failed value conversion: {}", source))]
    ConvertValue {
        /// the underlying error
        source: ConvertValueError,
    },
    /// Other I/O errors.
    #[snafu(display("I/O error: {}", source))]
    Io {
        /// the underlying error
        source: io::Error,
    },
}

impl From<InvalidValueReadError> for Error {
    fn from(source: InvalidValueReadError) -> Self {
        Error::ReadValue { source }
    }
}

impl From<TextEncodingError> for Error {
    fn from(source: TextEncodingError) -> Self {
        Error::TextEncoding { source }
    }
}

impl From<CastValueError> for Error {
    fn from(source: CastValueError) -> Self {
        Error::CastValue { source }
    }
}

impl From<ConvertValueError> for Error {
    fn from(source: ConvertValueError) -> Self {
        Error::ConvertValue { source }
    }
}

impl From<io::Error> for Error {
    fn from(source: io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<CoreError> for Error {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::UnexpectedDataValueLength => Error::UnexpectedDataValueLength,
            CoreError::UnexpectedTag { tag } => Error::UnexpectedTag { tag },
            CoreError::UnexpectedElement => Error::UnexpectedDataValueLength,
            CoreError::ReadValue { source } => Error::ReadValue { source },
            CoreError::CastValue { source } => Error::CastValue { source },
            CoreError::ConvertValue { source } => Error::ConvertValue { source },
        }
    }
}

/// An error type for text encoding issues.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEncodingError(Cow<'static, str>);

impl TextEncodingError {
    /// Build an error from a cause text, as provided by the
    /// `encoding` crate.
    pub fn new<E: Into<Cow<'static, str>>>(cause: E) -> Self {
        TextEncodingError(cause.into())
    }
}

impl fmt::Display for TextEncodingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "encoding/decoding process failed: {}", self.0)
    }
}

impl std::error::Error for TextEncodingError {}
