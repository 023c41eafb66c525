//! Constant declarations for DICOM tags, plus the static entry table
//! consulted by [`crate::data_element::StandardDataDictionary`].
//!
//! This is not an exhaustive rendition of PS3.6 — it covers the File
//! Meta group, the Pixel Module, sequence/command framing attributes,
//! and a representative sample of commonly used attributes. Any tag
//! absent from this table resolves to VR `UN` under implicit VR, which
//! is a conformant (if imprecise) fallback per the dictionary contract.

use dicom_core::dictionary::{DataDictionaryEntryRef, TagRange::*, VirtualVr};
use dicom_core::header::{Tag, VR};

macro_rules! single_entry {
    ($const_name: ident, $tag: expr, $alias: expr, $vr: ident) => {
        #[allow(missing_docs)]
        pub const $const_name: Tag = $tag;
    };
}

// -- Command group (0000,xxxx) --
single_entry!(COMMAND_GROUP_LENGTH, Tag(0x0000, 0x0000), "CommandGroupLength", UL);
single_entry!(AFFECTED_SOP_CLASS_UID, Tag(0x0000, 0x0002), "AffectedSOPClassUID", UI);
single_entry!(AFFECTED_SOP_INSTANCE_UID, Tag(0x0000, 0x1000), "AffectedSOPInstanceUID", UI);
single_entry!(COMMAND_FIELD, Tag(0x0000, 0x0100), "CommandField", US);
single_entry!(MESSAGE_ID, Tag(0x0000, 0x0110), "MessageID", US);
single_entry!(PRIORITY, Tag(0x0000, 0x0700), "Priority", US);
single_entry!(COMMAND_DATA_SET_TYPE, Tag(0x0000, 0x0800), "CommandDataSetType", US);
single_entry!(STATUS, Tag(0x0000, 0x0900), "Status", US);

// -- File Meta group (0002,xxxx) --
single_entry!(
    FILE_META_INFORMATION_GROUP_LENGTH,
    Tag(0x0002, 0x0000),
    "FileMetaInformationGroupLength",
    UL
);
single_entry!(
    FILE_META_INFORMATION_VERSION,
    Tag(0x0002, 0x0001),
    "FileMetaInformationVersion",
    OB
);
single_entry!(
    MEDIA_STORAGE_SOP_CLASS_UID,
    Tag(0x0002, 0x0002),
    "MediaStorageSOPClassUID",
    UI
);
single_entry!(
    MEDIA_STORAGE_SOP_INSTANCE_UID,
    Tag(0x0002, 0x0003),
    "MediaStorageSOPInstanceUID",
    UI
);
single_entry!(TRANSFER_SYNTAX_UID, Tag(0x0002, 0x0010), "TransferSyntaxUID", UI);
single_entry!(
    IMPLEMENTATION_CLASS_UID,
    Tag(0x0002, 0x0012),
    "ImplementationClassUID",
    UI
);
single_entry!(
    IMPLEMENTATION_VERSION_NAME,
    Tag(0x0002, 0x0013),
    "ImplementationVersionName",
    SH
);
single_entry!(
    SOURCE_APPLICATION_ENTITY_TITLE,
    Tag(0x0002, 0x0016),
    "SourceApplicationEntityTitle",
    AE
);
single_entry!(
    SENDING_APPLICATION_ENTITY_TITLE,
    Tag(0x0002, 0x0017),
    "SendingApplicationEntityTitle",
    AE
);
single_entry!(
    RECEIVING_APPLICATION_ENTITY_TITLE,
    Tag(0x0002, 0x0018),
    "ReceivingApplicationEntityTitle",
    AE
);
single_entry!(
    PRIVATE_INFORMATION_CREATOR_UID,
    Tag(0x0002, 0x0100),
    "PrivateInformationCreatorUID",
    UI
);
single_entry!(PRIVATE_INFORMATION, Tag(0x0002, 0x0102), "PrivateInformation", OB);

// -- Identifying / general attributes --
single_entry!(SOP_CLASS_UID, Tag(0x0008, 0x0016), "SOPClassUID", UI);
single_entry!(SOP_INSTANCE_UID, Tag(0x0008, 0x0018), "SOPInstanceUID", UI);
single_entry!(STUDY_DESCRIPTION, Tag(0x0008, 0x1030), "StudyDescription", LO);
single_entry!(MODALITY, Tag(0x0008, 0x0060), "Modality", CS);
single_entry!(INSTITUTION_NAME, Tag(0x0008, 0x0080), "InstitutionName", LO);
single_entry!(REQUESTING_PHYSICIAN, Tag(0x0008, 0x0090), "ReferringPhysicianName", PN);
single_entry!(CODE_VALUE, Tag(0x0008, 0x0100), "CodeValue", SH);
single_entry!(
    CODING_SCHEME_DESIGNATOR,
    Tag(0x0008, 0x0102),
    "CodingSchemeDesignator",
    SH
);
single_entry!(CODE_MEANING, Tag(0x0008, 0x0104), "CodeMeaning", LO);
single_entry!(
    ANATOMIC_REGION_SEQUENCE,
    Tag(0x0008, 0x2218),
    "AnatomicRegionSequence",
    SQ
);
single_entry!(
    ANATOMIC_REGION_MODIFIER_SEQUENCE,
    Tag(0x0008, 0x2220),
    "AnatomicRegionModifierSequence",
    SQ
);
single_entry!(
    BURNED_IN_ANNOTATION,
    Tag(0x0028, 0x0301),
    "BurnedInAnnotation",
    CS
);
single_entry!(
    LOSSY_IMAGE_COMPRESSION,
    Tag(0x0028, 0x2110),
    "LossyImageCompression",
    CS
);
single_entry!(
    LOSSY_IMAGE_COMPRESSION_RATIO,
    Tag(0x0028, 0x2112),
    "LossyImageCompressionRatio",
    DS
);
single_entry!(
    LOSSY_IMAGE_COMPRESSION_METHOD,
    Tag(0x0028, 0x2114),
    "LossyImageCompressionMethod",
    CS
);

// -- Patient --
single_entry!(PATIENT_NAME, Tag(0x0010, 0x0010), "PatientName", PN);
single_entry!(PATIENT_BIRTH_DATE, Tag(0x0010, 0x0030), "PatientBirthDate", DA);
single_entry!(PATIENT_ADDRESS, Tag(0x0010, 0x1040), "PatientAddress", LO);
single_entry!(PATIENT_AGE, Tag(0x0010, 0x1010), "PatientAge", AS);
single_entry!(OPERATORS_NAME, Tag(0x0010, 0x0021), "OperatorsName", PN);

// -- Series / instance --
single_entry!(SERIES_INSTANCE_UID, Tag(0x0020, 0x000E), "SeriesInstanceUID", UI);
single_entry!(INSTANCE_NUMBER, Tag(0x0020, 0x0013), "InstanceNumber", IS);

// -- Pixel Module (the Pixel Description fields, §3) --
single_entry!(SAMPLES_PER_PIXEL, Tag(0x0028, 0x0002), "SamplesPerPixel", US);
single_entry!(
    PHOTOMETRIC_INTERPRETATION,
    Tag(0x0028, 0x0004),
    "PhotometricInterpretation",
    CS
);
single_entry!(
    PLANAR_CONFIGURATION,
    Tag(0x0028, 0x0006),
    "PlanarConfiguration",
    US
);
single_entry!(NUMBER_OF_FRAMES, Tag(0x0028, 0x0008), "NumberOfFrames", IS);
single_entry!(ROWS, Tag(0x0028, 0x0010), "Rows", US);
single_entry!(COLUMNS, Tag(0x0028, 0x0011), "Columns", US);
single_entry!(BITS_ALLOCATED, Tag(0x0028, 0x0100), "BitsAllocated", US);
single_entry!(BITS_STORED, Tag(0x0028, 0x0101), "BitsStored", US);
single_entry!(HIGH_BIT, Tag(0x0028, 0x0102), "HighBit", US);
single_entry!(
    PIXEL_REPRESENTATION,
    Tag(0x0028, 0x0103),
    "PixelRepresentation",
    US
);
single_entry!(PIXEL_DATA, Tag(0x7FE0, 0x0010), "PixelData", OB);
single_entry!(
    EXTENDED_OFFSET_TABLE,
    Tag(0x7FE0, 0x0001),
    "ExtendedOffsetTable",
    OV
);
single_entry!(
    EXTENDED_OFFSET_TABLE_LENGTHS,
    Tag(0x7FE0, 0x0002),
    "ExtendedOffsetTableLengths",
    OV
);

// -- Directory records (only the entries needed for DICOMDIR traversal) --
single_entry!(
    DIRECTORY_RECORD_SEQUENCE,
    Tag(0x0004, 0x1220),
    "DirectoryRecordSequence",
    SQ
);
single_entry!(REFERENCED_FILE_ID, Tag(0x0004, 0x1500), "ReferencedFileID", CS);

/// The standard dictionary entry table, indexed at startup by
/// [`crate::data_element::StandardDataDictionary`].
pub static ENTRIES: &[DataDictionaryEntryRef<'static>] = &[
    DataDictionaryEntryRef { tag: Single(COMMAND_GROUP_LENGTH), alias: "CommandGroupLength", vr: VirtualVr::Exact(VR::UL) },
    DataDictionaryEntryRef { tag: Single(AFFECTED_SOP_CLASS_UID), alias: "AffectedSOPClassUID", vr: VirtualVr::Exact(VR::UI) },
    DataDictionaryEntryRef { tag: Single(AFFECTED_SOP_INSTANCE_UID), alias: "AffectedSOPInstanceUID", vr: VirtualVr::Exact(VR::UI) },
    DataDictionaryEntryRef { tag: Single(COMMAND_FIELD), alias: "CommandField", vr: VirtualVr::Exact(VR::US) },
    DataDictionaryEntryRef { tag: Single(MESSAGE_ID), alias: "MessageID", vr: VirtualVr::Exact(VR::US) },
    DataDictionaryEntryRef { tag: Single(PRIORITY), alias: "Priority", vr: VirtualVr::Exact(VR::US) },
    DataDictionaryEntryRef { tag: Single(COMMAND_DATA_SET_TYPE), alias: "CommandDataSetType", vr: VirtualVr::Exact(VR::US) },
    DataDictionaryEntryRef { tag: Single(STATUS), alias: "Status", vr: VirtualVr::Exact(VR::US) },
    DataDictionaryEntryRef { tag: Single(FILE_META_INFORMATION_GROUP_LENGTH), alias: "FileMetaInformationGroupLength", vr: VirtualVr::Exact(VR::UL) },
    DataDictionaryEntryRef { tag: Single(FILE_META_INFORMATION_VERSION), alias: "FileMetaInformationVersion", vr: VirtualVr::Exact(VR::OB) },
    DataDictionaryEntryRef { tag: Single(MEDIA_STORAGE_SOP_CLASS_UID), alias: "MediaStorageSOPClassUID", vr: VirtualVr::Exact(VR::UI) },
    DataDictionaryEntryRef { tag: Single(MEDIA_STORAGE_SOP_INSTANCE_UID), alias: "MediaStorageSOPInstanceUID", vr: VirtualVr::Exact(VR::UI) },
    DataDictionaryEntryRef { tag: Single(TRANSFER_SYNTAX_UID), alias: "TransferSyntaxUID", vr: VirtualVr::Exact(VR::UI) },
    DataDictionaryEntryRef { tag: Single(IMPLEMENTATION_CLASS_UID), alias: "ImplementationClassUID", vr: VirtualVr::Exact(VR::UI) },
    DataDictionaryEntryRef { tag: Single(IMPLEMENTATION_VERSION_NAME), alias: "ImplementationVersionName", vr: VirtualVr::Exact(VR::SH) },
    DataDictionaryEntryRef { tag: Single(SOURCE_APPLICATION_ENTITY_TITLE), alias: "SourceApplicationEntityTitle", vr: VirtualVr::Exact(VR::AE) },
    DataDictionaryEntryRef { tag: Single(SENDING_APPLICATION_ENTITY_TITLE), alias: "SendingApplicationEntityTitle", vr: VirtualVr::Exact(VR::AE) },
    DataDictionaryEntryRef { tag: Single(RECEIVING_APPLICATION_ENTITY_TITLE), alias: "ReceivingApplicationEntityTitle", vr: VirtualVr::Exact(VR::AE) },
    DataDictionaryEntryRef { tag: Single(PRIVATE_INFORMATION_CREATOR_UID), alias: "PrivateInformationCreatorUID", vr: VirtualVr::Exact(VR::UI) },
    DataDictionaryEntryRef { tag: Single(PRIVATE_INFORMATION), alias: "PrivateInformation", vr: VirtualVr::Exact(VR::OB) },
    DataDictionaryEntryRef { tag: Single(DIRECTORY_RECORD_SEQUENCE), alias: "DirectoryRecordSequence", vr: VirtualVr::Exact(VR::SQ) },
    DataDictionaryEntryRef { tag: Single(REFERENCED_FILE_ID), alias: "ReferencedFileID", vr: VirtualVr::Exact(VR::CS) },
    DataDictionaryEntryRef { tag: Single(SOP_CLASS_UID), alias: "SOPClassUID", vr: VirtualVr::Exact(VR::UI) },
    DataDictionaryEntryRef { tag: Single(SOP_INSTANCE_UID), alias: "SOPInstanceUID", vr: VirtualVr::Exact(VR::UI) },
    DataDictionaryEntryRef { tag: Single(MODALITY), alias: "Modality", vr: VirtualVr::Exact(VR::CS) },
    DataDictionaryEntryRef { tag: Single(INSTITUTION_NAME), alias: "InstitutionName", vr: VirtualVr::Exact(VR::LO) },
    DataDictionaryEntryRef { tag: Single(REQUESTING_PHYSICIAN), alias: "ReferringPhysicianName", vr: VirtualVr::Exact(VR::PN) },
    DataDictionaryEntryRef { tag: Single(CODE_VALUE), alias: "CodeValue", vr: VirtualVr::Exact(VR::SH) },
    DataDictionaryEntryRef { tag: Single(CODING_SCHEME_DESIGNATOR), alias: "CodingSchemeDesignator", vr: VirtualVr::Exact(VR::SH) },
    DataDictionaryEntryRef { tag: Single(CODE_MEANING), alias: "CodeMeaning", vr: VirtualVr::Exact(VR::LO) },
    DataDictionaryEntryRef { tag: Single(ANATOMIC_REGION_SEQUENCE), alias: "AnatomicRegionSequence", vr: VirtualVr::Exact(VR::SQ) },
    DataDictionaryEntryRef { tag: Single(ANATOMIC_REGION_MODIFIER_SEQUENCE), alias: "AnatomicRegionModifierSequence", vr: VirtualVr::Exact(VR::SQ) },
    DataDictionaryEntryRef { tag: Single(STUDY_DESCRIPTION), alias: "StudyDescription", vr: VirtualVr::Exact(VR::LO) },
    DataDictionaryEntryRef { tag: Single(BURNED_IN_ANNOTATION), alias: "BurnedInAnnotation", vr: VirtualVr::Exact(VR::CS) },
    DataDictionaryEntryRef { tag: Single(LOSSY_IMAGE_COMPRESSION), alias: "LossyImageCompression", vr: VirtualVr::Exact(VR::CS) },
    DataDictionaryEntryRef { tag: Single(LOSSY_IMAGE_COMPRESSION_RATIO), alias: "LossyImageCompressionRatio", vr: VirtualVr::Exact(VR::DS) },
    DataDictionaryEntryRef { tag: Single(LOSSY_IMAGE_COMPRESSION_METHOD), alias: "LossyImageCompressionMethod", vr: VirtualVr::Exact(VR::CS) },
    DataDictionaryEntryRef { tag: Single(PATIENT_NAME), alias: "PatientName", vr: VirtualVr::Exact(VR::PN) },
    DataDictionaryEntryRef { tag: Single(PATIENT_BIRTH_DATE), alias: "PatientBirthDate", vr: VirtualVr::Exact(VR::DA) },
    DataDictionaryEntryRef { tag: Single(PATIENT_ADDRESS), alias: "PatientAddress", vr: VirtualVr::Exact(VR::LO) },
    DataDictionaryEntryRef { tag: Single(PATIENT_AGE), alias: "PatientAge", vr: VirtualVr::Exact(VR::AS) },
    DataDictionaryEntryRef { tag: Single(OPERATORS_NAME), alias: "OperatorsName", vr: VirtualVr::Exact(VR::PN) },
    DataDictionaryEntryRef { tag: Single(SERIES_INSTANCE_UID), alias: "SeriesInstanceUID", vr: VirtualVr::Exact(VR::UI) },
    DataDictionaryEntryRef { tag: Single(INSTANCE_NUMBER), alias: "InstanceNumber", vr: VirtualVr::Exact(VR::IS) },
    DataDictionaryEntryRef { tag: Single(SAMPLES_PER_PIXEL), alias: "SamplesPerPixel", vr: VirtualVr::Exact(VR::US) },
    DataDictionaryEntryRef { tag: Single(PHOTOMETRIC_INTERPRETATION), alias: "PhotometricInterpretation", vr: VirtualVr::Exact(VR::CS) },
    DataDictionaryEntryRef { tag: Single(PLANAR_CONFIGURATION), alias: "PlanarConfiguration", vr: VirtualVr::Exact(VR::US) },
    DataDictionaryEntryRef { tag: Single(NUMBER_OF_FRAMES), alias: "NumberOfFrames", vr: VirtualVr::Exact(VR::IS) },
    DataDictionaryEntryRef { tag: Single(ROWS), alias: "Rows", vr: VirtualVr::Exact(VR::US) },
    DataDictionaryEntryRef { tag: Single(COLUMNS), alias: "Columns", vr: VirtualVr::Exact(VR::US) },
    DataDictionaryEntryRef { tag: Single(BITS_ALLOCATED), alias: "BitsAllocated", vr: VirtualVr::Exact(VR::US) },
    DataDictionaryEntryRef { tag: Single(BITS_STORED), alias: "BitsStored", vr: VirtualVr::Exact(VR::US) },
    DataDictionaryEntryRef { tag: Single(HIGH_BIT), alias: "HighBit", vr: VirtualVr::Exact(VR::US) },
    DataDictionaryEntryRef { tag: Single(PIXEL_REPRESENTATION), alias: "PixelRepresentation", vr: VirtualVr::Exact(VR::US) },
    DataDictionaryEntryRef { tag: Single(PIXEL_DATA), alias: "PixelData", vr: VirtualVr::Px },
    DataDictionaryEntryRef { tag: Single(EXTENDED_OFFSET_TABLE), alias: "ExtendedOffsetTable", vr: VirtualVr::Exact(VR::OV) },
    DataDictionaryEntryRef { tag: Single(EXTENDED_OFFSET_TABLE_LENGTHS), alias: "ExtendedOffsetTableLengths", vr: VirtualVr::Exact(VR::OV) },
    DataDictionaryEntryRef { tag: Group100(Tag(0x6000, 0x3000)), alias: "OverlayData", vr: VirtualVr::Ox },
];
