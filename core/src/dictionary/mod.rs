//! This module contains the concept of a DICOM data dictionary, used to
//! resolve the value representation of a tag when decoding a Data Set
//! under an implicit VR transfer syntax.
//!
//! For most purposes, the standard data dictionary provided by
//! `dicom-dictionary-std` is sufficient. This crate only defines the
//! dictionary's interface so that other crates (the parser, the object
//! reader) do not need to depend on the full attribute table.

pub mod stub;
pub mod uid;

pub use self::uid::{UidDictionary, UidDictionaryEntry};

use crate::header::{Tag, VR};
use std::fmt::Debug;

/// Type trait for a dictionary of DICOM attributes.
///
/// Attribute dictionaries provide the means to resolve a tag to its
/// canonical value representation and alias, which is required to decode
/// a Data Set under an implicit VR transfer syntax. The methods herein
/// have no generic parameters, so as to enable being used as a trait
/// object.
pub trait DataDictionary: Debug {
    /// The type of the dictionary entry.
    type Entry: DictionaryEntry;

    /// Fetch an entry by its usual alias (e.g. "PatientName").
    /// Aliases are usually case sensitive and not separated by spaces.
    fn by_name(&self, name: &str) -> Option<&Self::Entry>;

    /// Fetch an entry by its tag.
    fn by_tag(&self, tag: Tag) -> Option<&Self::Entry>;

    /// Resolve the canonical value representation for a tag, defaulting
    /// to `VR::UN` when the tag is not known. This is the operation
    /// consulted while decoding an element header under implicit VR.
    fn vr_of(&self, tag: Tag) -> VR {
        self.by_tag(tag)
            .map(|e| e.vr().real_vr())
            .unwrap_or(VR::UN)
    }

    /// Parse a string as a tag, either in `(gggg,eeee)` / `gggg,eeee` form,
    /// or as a known attribute alias.
    fn parse_tag(&self, string: &str) -> Option<Tag> {
        if let Some(tag) = parse_tag_number(string) {
            return Some(tag);
        }
        self.by_name(string).map(|e| e.tag().inner())
    }

    /// Fetch an entry either by tag expression or by alias.
    fn by_expr(&self, string: &str) -> Option<&Self::Entry> {
        if let Some(tag) = parse_tag_number(string) {
            return self.by_tag(tag);
        }
        self.by_name(string)
    }
}

fn parse_tag_number(string: &str) -> Option<Tag> {
    let trimmed = string.trim();
    let trimmed = trimmed
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(trimmed);
    let (group, elem) = trimmed.split_once(',')?;
    let group = u16::from_str_radix(group.trim(), 16).ok()?;
    let elem = u16::from_str_radix(elem.trim(), 16).ok()?;
    Some(Tag(group, elem))
}

/// The dictionary entry data type, representing a DICOM attribute.
pub trait DictionaryEntry {
    /// The range of tags that this entry applies to.
    fn tag(&self) -> TagRange;
    /// The alias of the attribute, with no spaces, usually in UpperCamelCase.
    fn alias(&self) -> &str;
    /// The _typical_ value representation of the attribute.
    fn vr(&self) -> VirtualVr;
}

/// A range of tags which a dictionary entry applies to.
///
/// Most attributes apply to a single, exact tag. Some, known as
/// "repeating groups" in the standard, use `xx` as a wildcard in either
/// the group or the element part (e.g. overlay data `60xx,3000`). Two
/// pseudo-ranges exist for the ubiquitous group length and private
/// creator attributes, which exist identically in every group.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TagRange {
    /// A single, exact tag.
    Single(Tag),
    /// A tag which repeats over the high byte of the group number
    /// (`ggxx,eeee`); the stored tag has that byte zeroed.
    Group100(Tag),
    /// A tag which repeats over the high byte of the element number
    /// (`gggg,eexx`); the stored tag has that byte zeroed.
    Element100(Tag),
    /// The generic group length attribute, present at `(gggg,0000)` of
    /// every group.
    GroupLength,
    /// The generic private creator attribute, present at
    /// `(gggg,00xx)` for odd groups, `0x10..=0xFF`.
    PrivateCreator,
}

impl TagRange {
    /// The canonical, wildcard-zeroed tag used to index this range.
    pub fn inner(&self) -> Tag {
        match self {
            TagRange::Single(tag) => *tag,
            TagRange::Group100(tag) => *tag,
            TagRange::Element100(tag) => *tag,
            TagRange::GroupLength => Tag(0x0000, 0x0000),
            TagRange::PrivateCreator => Tag(0x0009, 0x0010),
        }
    }
}

/// A virtual value representation, used by dictionary entries whose real
/// VR depends on context not available to a static table (namely, pixel
/// data and overlay data, whose VR depends on whether the transfer syntax
/// is encapsulated).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum VirtualVr {
    /// An exact, context-free value representation.
    Exact(VR),
    /// Pixel Data: `OW` for native transfer syntaxes carrying more than
    /// 8 bits per sample, `OB` otherwise.
    Px,
    /// Overlay Data: `OW` or `OB` depending on bits allocated, same as
    /// Pixel Data.
    Ox,
}

impl VirtualVr {
    /// Resolve to a concrete value representation, defaulting the
    /// context-dependent cases to `OB` (the decoder does not need the
    /// precise answer for these attributes: it always reads Pixel Data
    /// through the Pixel Data locator rather than the generic Value
    /// Decoder, so this default is never actually observed in practice).
    pub fn real_vr(&self) -> VR {
        match self {
            VirtualVr::Exact(vr) => *vr,
            VirtualVr::Px | VirtualVr::Ox => VR::OB,
        }
    }
}

impl From<VR> for VirtualVr {
    fn from(vr: VR) -> Self {
        VirtualVr::Exact(vr)
    }
}

/// A data type for a dictionary entry with a string slice for its alias
/// and a tag range (to account for repeating groups).
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct DataDictionaryEntryRef<'a> {
    /// The range of tags that this entry applies to.
    pub tag: TagRange,
    /// The alias of the attribute, with no spaces, usually InCapitalizedCamelCase.
    pub alias: &'a str,
    /// The _typical_ value representation of the attribute.
    pub vr: VirtualVr,
}

impl<'a> DictionaryEntry for DataDictionaryEntryRef<'a> {
    fn tag(&self) -> TagRange {
        self.tag
    }
    fn alias(&self) -> &str {
        self.alias
    }
    fn vr(&self) -> VirtualVr {
        self.vr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tag_numbers() {
        assert_eq!(parse_tag_number("(0010,0010)"), Some(Tag(0x0010, 0x0010)));
        assert_eq!(parse_tag_number("0008,0060"), Some(Tag(0x0008, 0x0060)));
        assert_eq!(parse_tag_number("not a tag"), None);
    }

    #[test]
    fn tag_range_inner_zeroes_wildcard() {
        assert_eq!(TagRange::Group100(Tag(0x6000, 0x3000)).inner(), Tag(0x6000, 0x3000));
        assert_eq!(TagRange::GroupLength.inner(), Tag(0x0000, 0x0000));
    }
}
