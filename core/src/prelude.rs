//! A convenience module for glob-importing the most commonly used items of
//! this crate.
//!
//! ```
//! use dicom_core::prelude::*;
//! ```
pub use crate::dictionary::DataDictionary;
pub use crate::header::{DataElement, DataElementHeader, HasLength, Header, Length, Tag, VR};
pub use crate::value::{DicomValueType, PrimitiveValue, Value};
pub use crate::dicom_value;
