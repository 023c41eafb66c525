//! This module aggregates errors that may emerge from the core data model.
use crate::value::ValueType;
use crate::Tag;
use snafu::Snafu;
use std::num::{ParseFloatError, ParseIntError};

/// Type alias for a result from this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The main data type for errors raised while building or inspecting
/// in-memory DICOM element values.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// Raised when the obtained data element was not the one expected.
    #[snafu(display("Unexpected DICOM tag {}", tag))]
    UnexpectedTag { tag: Tag },

    /// Raised when the obtained element does not have the expected shape.
    #[snafu(display("Unexpected DICOM element"))]
    UnexpectedElement,

    /// Raised when the obtained length is inconsistent.
    #[snafu(display("Inconsistent data value length in data element"))]
    UnexpectedDataValueLength,

    /// Error related to an invalid value read.
    #[snafu(display("Invalid value read: {}", source))]
    ReadValue { source: InvalidValueReadError },

    /// A failed attempt to cast a value to an inappropriate format.
    #[snafu(display("Failed value cast: {}", source))]
    CastValue { source: CastValueError },

    /// A failed attempt to convert a value to an inappropriate format.
    #[snafu(display("Failed value conversion: {}", source))]
    ConvertValue { source: ConvertValueError },
}

impl From<InvalidValueReadError> for Error {
    fn from(source: InvalidValueReadError) -> Self {
        Error::ReadValue { source }
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

/// Triggered when a value parsing or conversion attempt fails.
#[derive(Debug, Snafu, PartialEq, Clone)]
#[non_exhaustive]
pub enum InvalidValueReadError {
    /// attempted to retrieve complex value as primitive
    NonPrimitiveType,

    /// value length could not be resolved
    UnresolvedValueLength,

    /// invalid token received for the expected value representation
    #[snafu(display("invalid token: expected {} but got {:?}", expected, got))]
    InvalidToken { got: u8, expected: &'static str },

    /// invalid slice length for the expected value representation
    #[snafu(display("invalid length: expected {} but got {}", expected, got))]
    InvalidLength { got: usize, expected: &'static str },

    /// invalid date/time component
    #[snafu(display("invalid date/time component: expected {} but got {}", expected, got))]
    ParseDateTime { got: u32, expected: &'static str },

    /// invalid or ambiguous combination of date with time
    DateTimeZone,

    /// a single-valued conversion was attempted with {len} values
    TwoValuesForRange { len: usize },

    /// failed to parse date/time
    #[snafu(display("failed to parse date/time: {}", source))]
    Chrono { source: chrono::ParseError },

    /// failed to parse text value as a floating point number
    #[snafu(display("failed to parse float: {}", source))]
    ParseFloat { source: ParseFloatError },

    /// failed to parse text value as an integer
    #[snafu(display("failed to parse integer: {}", source))]
    ParseInteger { source: ParseIntError },

    /// unexpected end of element value
    UnexpectedEndOfElement,
}

impl From<chrono::ParseError> for InvalidValueReadError {
    fn from(source: chrono::ParseError) -> Self {
        InvalidValueReadError::Chrono { source }
    }
}

impl From<ParseFloatError> for InvalidValueReadError {
    fn from(source: ParseFloatError) -> Self {
        InvalidValueReadError::ParseFloat { source }
    }
}

impl From<ParseIntError> for InvalidValueReadError {
    fn from(source: ParseIntError) -> Self {
        InvalidValueReadError::ParseInteger { source }
    }
}

/// An error type for an attempt of accessing a value
/// in an inappropriate format.
#[derive(Debug, Clone, PartialEq)]
pub struct CastValueError {
    /// The value format requested
    pub requested: &'static str,
    /// The value's actual representation
    pub got: ValueType,
}

impl std::fmt::Display for CastValueError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "bad value cast: requested {} but value is {:?}",
            self.requested, self.got
        )
    }
}

impl std::error::Error for CastValueError {}

/// An error type for an attempt of converting a value
/// into another representation (e.g. a date range, an integer).
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertValueError {
    /// The value format requested
    pub requested: &'static str,
    /// The value's actual representation
    pub original: ValueType,
    /// The cause of the conversion failure, if any
    pub cause: Option<InvalidValueReadError>,
}

impl std::fmt::Display for ConvertValueError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "could not convert value: requested {} but value is {:?}",
            self.requested, self.original
        )?;
        if let Some(cause) = &self.cause {
            write!(f, " ({})", cause)?;
        }
        Ok(())
    }
}

impl std::error::Error for ConvertValueError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause.as_ref().map(|e| e as _)
    }
}
