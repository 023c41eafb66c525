//! This crate implements the standard DICOM data element dictionary used
//! to resolve a tag's value representation under an implicit VR transfer
//! syntax, plus the constants needed to recognize File Meta and Transfer
//! Syntax attributes by tag or UID.
//!
//! ## Run-time dictionary
//!
//! - [`data_element`]: a curated table of the DICOM attributes this
//!   decoder needs to recognize. It is used by default in
//!   `dicom-parser` and `dicom-object` whenever a tag's VR must be
//!   resolved and the file does not declare it explicitly.
//!
//! The records are collected from [DICOM PS3.6], restricted to the
//! attributes this reader consults directly (File Meta, Pixel Module,
//! sequence framing) plus a representative general sample; unknown tags
//! correctly fall back to VR `UN` per the dictionary contract.
//!
//! [DICOM PS3.6]: https://dicom.nema.org/medical/dicom/current/output/chtml/part06/ps3.6.html
//!
//! ## Constants
//!
//! - [`tags`], which map an attribute alias to a DICOM tag
//! - [`uids`], for various normative DICOM unique identifiers
pub mod data_element;
pub mod tags;
pub mod uids;

pub use data_element::{StandardDataDictionary, StandardDataDictionaryRegistry};

#[cfg(test)]
mod tests {
    use dicom_core::Tag;

    /// tests for just a few attributes to make sure that the tag constants
    /// were well installed into the crate
    #[test]
    fn tags_constants_available() {
        use crate::tags::*;
        assert_eq!(PATIENT_NAME, Tag(0x0010, 0x0010));
        assert_eq!(MODALITY, Tag(0x0008, 0x0060));
        assert_eq!(PIXEL_DATA, Tag(0x7FE0, 0x0010));
        assert_eq!(STATUS, Tag(0x0000, 0x0900));
    }

    /// tests for the presence of a few UID constants
    #[test]
    fn uids_constants_available() {
        use crate::uids::*;
        assert_eq!(EXPLICIT_VR_LITTLE_ENDIAN, "1.2.840.10008.1.2.1");
        assert_eq!(VERIFICATION, "1.2.840.10008.1.1");
        assert_eq!(HOT_IRON_PALETTE, "1.2.840.10008.1.5.1");
        assert_eq!(
            PATIENT_ROOT_QUERY_RETRIEVE_INFORMATION_MODEL_FIND,
            "1.2.840.10008.5.1.4.1.2.1.1"
        );
        assert_eq!(
            STUDY_ROOT_QUERY_RETRIEVE_INFORMATION_MODEL_MOVE,
            "1.2.840.10008.5.1.4.1.2.2.2"
        );
    }
}
