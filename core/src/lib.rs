#![crate_type = "lib"]
#![deny(trivial_casts, trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    unused_qualifications,
    unused_import_braces
)]
#![recursion_limit = "60"]

//! Core data model for the DICOM byte-stream decoder: tags, value
//! representations, primitive values and the data dictionary contract
//! shared by the rest of the workspace.
//!
//! This crate does not read or write bytes itself — see `dicom-parser`
//! for the stream decoder and `dicom-object` for the file-level reader.

pub mod dictionary;
pub mod error;
pub mod header;
pub mod prelude;
pub mod util;
pub mod value;

pub use dictionary::DataDictionary;
pub use error::{Error, Result};
pub use header::{DataElement, DataElementHeader, Length, Tag, VR};
pub use value::{PrimitiveValue, Value as DicomValue};
pub use util::{ReadSeek, SeekInterval};

/// Build a [`PrimitiveValue`] of a specific variant from a literal list of
/// values, converting each element into the variant's inner type.
///
/// ```
/// # use dicom_core::dicom_value;
/// let value = dicom_value!(Strs, ["Smith^John"]);
/// ```
#[macro_export]
macro_rules! dicom_value {
    (Str, $val: expr) => {
        $crate::value::PrimitiveValue::Str(::std::string::String::from($val))
    };
    (Strs, [$($val: expr),* $(,)*]) => {
        $crate::value::PrimitiveValue::Strs(
            $crate::value::C::from_vec(vec![$(::std::string::String::from($val)),*])
        )
    };
    ($vr_variant: ident, [$($val: expr),* $(,)*]) => {
        $crate::value::PrimitiveValue::$vr_variant(
            $crate::value::C::from_vec(vec![$($val),*])
        )
    };
}
