//! A no-op data dictionary, useful in tests and in contexts that do not
//! need attribute resolution.
use super::{DataDictionary, DictionaryEntry, TagRange, VirtualVr};
use crate::header::Tag;

/// A dictionary entry that is never actually produced by [`StubDataDictionary`].
#[derive(Debug)]
pub struct StubDictionaryEntry;

impl DictionaryEntry for StubDictionaryEntry {
    fn tag(&self) -> TagRange {
        TagRange::Single(Tag(0, 0))
    }

    fn alias(&self) -> &str {
        ""
    }

    fn vr(&self) -> VirtualVr {
        VirtualVr::Exact(crate::header::VR::UN)
    }
}

/// A data dictionary which knows no attributes.
///
/// Every lookup fails, so `vr_of` always resolves to `VR::UN`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubDataDictionary;

impl DataDictionary for StubDataDictionary {
    type Entry = StubDictionaryEntry;

    fn by_name(&self, _name: &str) -> Option<&Self::Entry> {
        None
    }

    fn by_tag(&self, _tag: Tag) -> Option<&Self::Entry> {
        None
    }
}
