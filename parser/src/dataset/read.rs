//! This module contains a mid-level abstraction for reading DICOM content
//! sequentially.
//!
//! The rest of the crate is used to obtain DICOM element headers and values.
//! At this level, headers and values are treated as tokens which can be used
//! to form a syntax tree of a full data set.
use crate::dataset::{DataToken, SeqTokenType};
use crate::stateful::decode::{self, CharacterSetOverride, DynStatefulDecoder, StatefulDecode};
use dicom_core::dictionary::DataDictionary;
use dicom_core::header::{DataElementHeader, HasLength, Length, SequenceItemHeader};
use dicom_core::{Tag, VR};
use dicom_dictionary_std::StandardDataDictionary;
use dicom_encoding::text::SpecificCharacterSet;
use dicom_encoding::transfer_syntax::TransferSyntax;
use snafu::{ResultExt, Snafu};
use std::io::{ErrorKind, Read};
use std::iter::Iterator;

/// Tag of the pixel data element, under which encapsulated (compressed)
/// frames are transmitted as a sequence of items.
const TAG_PIXEL_DATA: Tag = Tag(0x7FE0, 0x0010);

/// Module-level error type for data set reading issues.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("Could not construct a decoder for the data set"))]
    CreateDecoder { source: decode::Error },
    #[snafu(display("Could not read data element header"))]
    ReadHeader { source: decode::Error },
    #[snafu(display("Could not read item header"))]
    ReadItemHeader { source: decode::Error },
    #[snafu(display("Could not read primitive value"))]
    ReadValue { source: decode::Error },
    #[snafu(display("Could not read the pixel data offset table or fragment"))]
    ReadItemValue { source: decode::Error },
    #[snafu(display(
        "Inconsistent sequence or item end: expected it at {} bytes, found it at {}",
        expected,
        actual
    ))]
    InconsistentSequenceEnd { expected: u64, actual: u64 },
    #[snafu(display(
        "Found odd-length value of {} bytes for element tagged {}",
        length,
        tag
    ))]
    UnexpectedOddLength { tag: Tag, length: u32 },
    #[snafu(display("Pixel data sequence has no defined length"))]
    UndefinedLength,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A strategy for how the reader should react to odd-length primitive
/// values, which are not conformant to the standard but are sometimes
/// found in the wild.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[non_exhaustive]
pub enum OddLengthStrategy {
    /// Accept the value as is and continue reading.
    Accept,
    /// Fail the read operation with an error.
    Fail,
}

impl Default for OddLengthStrategy {
    fn default() -> Self {
        OddLengthStrategy::Accept
    }
}

/// A strategy for how the reader should retrieve the binary contents of a
/// primitive data element value.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[non_exhaustive]
pub enum ValueReadStrategy {
    /// Convert the value eagerly into the most fitting native type
    /// (see [`StatefulDecode::read_value`](decode::StatefulDecode::read_value)).
    Interpreted,
    /// Preserve the value's original textual or binary representation
    /// (see [`StatefulDecode::read_value_preserved`](decode::StatefulDecode::read_value_preserved)).
    Preserved,
    /// Read the value as raw bytes regardless of its value representation
    /// (see [`StatefulDecode::read_value_bytes`](decode::StatefulDecode::read_value_bytes)).
    Raw,
}

impl Default for ValueReadStrategy {
    fn default() -> Self {
        ValueReadStrategy::Preserved
    }
}

/// Aggregate options for constructing a [`DataSetReader`].
#[derive(Debug, Copy, Clone, Default)]
#[non_exhaustive]
pub struct DataSetReaderOptions {
    /// how primitive values should be read
    pub value_read: ValueReadStrategy,
    /// how odd-length values should be handled
    pub odd_length: OddLengthStrategy,
}

/// A reader-specific token representing a sequence or item start.
#[derive(Debug, Copy, Clone, PartialEq)]
struct SeqToken {
    /// Whether it is the start of a sequence or the start of an item.
    typ: SeqTokenType,
    /// The length of the value, as indicated by the starting element,
    /// can be unknown.
    len: Length,
    /// The number of bytes the parser had read until it reached the
    /// beginning of the sequence or item value data.
    base_offset: u64,
    /// Whether this sequence is actually the encapsulated pixel data
    /// sequence, whose items hold raw fragment bytes instead of nested
    /// data sets.
    pixel_data: bool,
}

/// What to do with the next item value found inside of the encapsulated
/// pixel data sequence.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum PixelItem {
    OffsetTable,
    Fragment,
}

/// A higher-level reader for retrieving structure in a DICOM data set from an
/// arbitrary data source. Implements [`Iterator`] over [`DataToken`],
/// which is the basic unit of structured DICOM data.
#[derive(Debug)]
pub struct DataSetReader<S, D> {
    parser: S,
    dict: D,
    options: DataSetReaderOptions,
    /// whether the reader is expecting an item next (or a sequence delimiter)
    in_sequence: bool,
    /// whether a check for a sequence or item delimitation is pending
    delimiter_check_pending: bool,
    /// a stack of delimiters
    seq_delimiters: Vec<SeqToken>,
    /// fuse the iteration process if true
    hard_break: bool,
    /// last decoded header, awaiting its value
    last_header: Option<DataElementHeader>,
    /// the next pixel data item is either the offset table or a fragment
    next_pixel_item: Option<PixelItem>,
}

impl<S> DataSetReader<DynStatefulDecoder<S>, StandardDataDictionary>
where
    S: Read,
{
    /// Create a new iterator with the given random access source, while
    /// considering the given transfer syntax and specific character set.
    pub fn new_with_ts_cs(source: S, ts: &TransferSyntax, cs: SpecificCharacterSet) -> Result<Self> {
        Self::new_with_ts_cs_options(source, ts, cs, DataSetReaderOptions::default())
    }

    /// Create a new iterator with the given random access source, transfer
    /// syntax, specific character set, and reader options.
    pub fn new_with_ts_cs_options(
        source: S,
        ts: &TransferSyntax,
        cs: SpecificCharacterSet,
        options: DataSetReaderOptions,
    ) -> Result<Self> {
        let parser =
            DynStatefulDecoder::new_with(source, ts, cs, 0).context(CreateDecoderSnafu)?;

        Ok(DataSetReader {
            parser,
            dict: StandardDataDictionary,
            options,
            seq_delimiters: Vec::new(),
            delimiter_check_pending: false,
            in_sequence: false,
            hard_break: false,
            last_header: None,
            next_pixel_item: None,
        })
    }

    /// Create a new iterator with the given random access source, transfer
    /// syntax, specific character set override, and reader options.
    pub fn new_with_character_set_override(
        source: S,
        ts: &TransferSyntax,
        charset_override: CharacterSetOverride,
        options: DataSetReaderOptions,
    ) -> Result<Self> {
        let cs = match charset_override {
            CharacterSetOverride::None => SpecificCharacterSet::Default,
            CharacterSetOverride::Override(cs) => cs,
        };
        Self::new_with_ts_cs_options(source, ts, cs, options)
    }
}

impl<S> DataSetReader<S, StandardDataDictionary> {
    /// Create a new iterator with the given stateful decoder and options.
    pub fn new(decoder: S, options: DataSetReaderOptions) -> Self {
        DataSetReader {
            parser: decoder,
            dict: StandardDataDictionary,
            options,
            seq_delimiters: Vec::new(),
            delimiter_check_pending: false,
            in_sequence: false,
            hard_break: false,
            last_header: None,
            next_pixel_item: None,
        }
    }
}

impl<S, D> DataSetReader<S, D> {
    /// Create a new iterator with the given stateful decoder, data
    /// dictionary, and options.
    pub fn new_with_dictionary(decoder: S, dict: D, options: DataSetReaderOptions) -> Self {
        DataSetReader {
            parser: decoder,
            dict,
            options,
            seq_delimiters: Vec::new(),
            delimiter_check_pending: false,
            in_sequence: false,
            hard_break: false,
            last_header: None,
            next_pixel_item: None,
        }
    }
}

fn is_eof(e: &decode::Error) -> bool {
    use dicom_encoding::decode::Error as DecError;
    let io_err = match e {
        decode::Error::DecodeElementHeader {
            source: DecError::ReadHeaderTag { source, .. },
            ..
        } => Some(source),
        decode::Error::DecodeElementHeader {
            source: DecError::ReadTag { source, .. },
            ..
        } => Some(source),
        decode::Error::DecodeItemHeader {
            source: DecError::ReadItemHeader { source, .. },
            ..
        } => Some(source),
        _ => None,
    };
    matches!(io_err, Some(e) if e.kind() == ErrorKind::UnexpectedEof)
}

impl<S, D> Iterator for DataSetReader<S, D>
where
    S: StatefulDecode,
    D: DataDictionary,
{
    type Item = Result<DataToken>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.hard_break {
            return None;
        }

        // item or sequence delimitation logic for explicit lengths
        if self.delimiter_check_pending {
            match self.update_seq_delimiters() {
                Err(e) => {
                    self.hard_break = true;
                    return Some(Err(e));
                }
                Ok(Some(token)) => return Some(Ok(token)),
                Ok(None) => { /* no-op */ }
            }
        }

        if let Some(item) = self.next_pixel_item {
            return self.read_pixel_item(item);
        }

        if self.in_sequence {
            match self.parser.decode_item_header() {
                Ok(header) => match header {
                    SequenceItemHeader::Item { len } => {
                        let pixel_data = self
                            .seq_delimiters
                            .last()
                            .map(|sd| sd.pixel_data)
                            .unwrap_or(false);

                        self.in_sequence = pixel_data;
                        self.seq_delimiters.push(SeqToken {
                            typ: SeqTokenType::Item,
                            len,
                            base_offset: self.parser.position(),
                            pixel_data,
                        });

                        if pixel_data {
                            self.next_pixel_item = Some(if self.first_pixel_item() {
                                PixelItem::OffsetTable
                            } else {
                                PixelItem::Fragment
                            });
                        } else if len == Length(0) {
                            // items can be empty
                            self.delimiter_check_pending = true;
                        }
                        Some(Ok(DataToken::ItemStart { len }))
                    }
                    SequenceItemHeader::ItemDelimiter => {
                        self.seq_delimiters.pop();
                        self.in_sequence = true;
                        Some(Ok(DataToken::ItemEnd))
                    }
                    SequenceItemHeader::SequenceDelimiter => {
                        self.seq_delimiters.pop();
                        self.in_sequence = false;
                        Some(Ok(DataToken::SequenceEnd))
                    }
                },
                Err(e) => {
                    if is_eof(&e) {
                        self.hard_break = true;
                        return None;
                    }
                    self.hard_break = true;
                    Some(Err(e).context(ReadItemHeaderSnafu))
                }
            }
        } else if let Some(header) = self.last_header.take() {
            // a plain element header was read, so a value is expected
            let value = match self.read_value_for(&header) {
                Ok(v) => v,
                Err(e) => {
                    self.hard_break = true;
                    return Some(Err(e));
                }
            };

            // sequences can end after this token
            self.delimiter_check_pending = true;

            Some(Ok(DataToken::PrimitiveValue(value)))
        } else {
            // a data element header or item delimiter is expected
            match self.parser.decode_header() {
                Ok(DataElementHeader {
                    tag: TAG_PIXEL_DATA,
                    vr,
                    len,
                }) if len.is_undefined() && (vr == VR::OB || vr == VR::OW || vr == VR::UN) => {
                    self.in_sequence = true;
                    self.seq_delimiters.push(SeqToken {
                        typ: SeqTokenType::Sequence,
                        len,
                        base_offset: self.parser.position(),
                        pixel_data: true,
                    });
                    Some(Ok(DataToken::PixelSequenceStart))
                }
                Ok(DataElementHeader { tag, vr: VR::SQ, len }) => {
                    self.in_sequence = true;
                    self.seq_delimiters.push(SeqToken {
                        typ: SeqTokenType::Sequence,
                        len,
                        base_offset: self.parser.position(),
                        pixel_data: false,
                    });

                    if len == Length(0) {
                        // sequences can end right after they start
                        self.delimiter_check_pending = true;
                    }

                    Some(Ok(DataToken::SequenceStart { tag, len }))
                }
                Ok(header) => {
                    if let Err(e) = self.check_odd_length(&header) {
                        self.hard_break = true;
                        return Some(Err(e));
                    }
                    // save it for the next step
                    self.last_header = Some(header);
                    Some(Ok(DataToken::ElementHeader(header)))
                }
                Err(e) => {
                    if is_eof(&e) {
                        self.hard_break = true;
                        return None;
                    }
                    self.hard_break = true;
                    Some(Err(e).context(ReadHeaderSnafu))
                }
            }
        }
    }
}

impl<S, D> DataSetReader<S, D> {
    fn first_pixel_item(&self) -> bool {
        // an offset table is only ever the very first item of the
        // (just-pushed) pixel data sequence; there is exactly one such
        // sequence token below the item we just pushed.
        self.seq_delimiters.len() == 2
    }

    fn check_odd_length(&self, header: &DataElementHeader) -> Result<()> {
        if self.options.odd_length == OddLengthStrategy::Fail {
            if let Some(len) = header.length().get() {
                if len % 2 != 0 {
                    return UnexpectedOddLengthSnafu {
                        tag: header.tag,
                        length: len,
                    }
                    .fail();
                }
            }
        }
        Ok(())
    }
}

impl<S, D> DataSetReader<S, D>
where
    S: StatefulDecode,
{
    fn read_value_for(&mut self, header: &DataElementHeader) -> Result<dicom_core::PrimitiveValue> {
        match self.options.value_read {
            ValueReadStrategy::Interpreted => {
                self.parser.read_value(header).context(ReadValueSnafu)
            }
            ValueReadStrategy::Preserved => self
                .parser
                .read_value_preserved(header)
                .context(ReadValueSnafu),
            ValueReadStrategy::Raw => self
                .parser
                .read_value_bytes(header)
                .context(ReadValueSnafu),
        }
    }

    fn read_pixel_item(&mut self, item: PixelItem) -> Option<Result<DataToken>> {
        let len = match self.seq_delimiters.last() {
            Some(sd) => match sd.len.get() {
                Some(len) => len,
                None => {
                    self.hard_break = true;
                    return Some(UndefinedLengthSnafu.fail());
                }
            },
            None => {
                self.hard_break = true;
                return Some(InconsistentSequenceEndSnafu {
                    expected: 0u64,
                    actual: self.parser.position(),
                }
                .fail());
            }
        };

        let mut data = Vec::new();
        if let Err(e) = self.parser.read_to_vec(len, &mut data) {
            self.hard_break = true;
            return Some(Err(e).context(ReadItemValueSnafu));
        }

        self.next_pixel_item = None;
        self.delimiter_check_pending = true;

        match item {
            PixelItem::OffsetTable => {
                let table = data
                    .chunks_exact(4)
                    .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                    .collect();
                Some(Ok(DataToken::OffsetTable(table)))
            }
            PixelItem::Fragment => Some(Ok(DataToken::ItemValue(data))),
        }
    }

    fn update_seq_delimiters(&mut self) -> Result<Option<DataToken>> {
        if let Some(sd) = self.seq_delimiters.last() {
            if let Some(len) = sd.len.get() {
                let eos = sd.base_offset + len as u64;
                let position = self.parser.position();
                if eos == position {
                    let token;
                    match sd.typ {
                        SeqTokenType::Sequence => {
                            self.in_sequence = false;
                            token = DataToken::SequenceEnd;
                        }
                        SeqTokenType::Item => {
                            self.in_sequence = true;
                            token = DataToken::ItemEnd;
                        }
                    }

                    self.seq_delimiters.pop();
                    self.delimiter_check_pending = false;
                    return Ok(Some(token));
                } else if eos < position {
                    self.delimiter_check_pending = false;
                    return InconsistentSequenceEndSnafu {
                        expected: eos,
                        actual: position,
                    }
                    .fail();
                }
            }
        }
        self.delimiter_check_pending = false;
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::{DataSetReader, DataSetReaderOptions, DataToken};
    use crate::stateful::decode::StatefulDecoder;
    use dicom_core::header::{DataElementHeader, Length};
    use dicom_core::value::PrimitiveValue;
    use dicom_core::{Tag, VR};
    use dicom_encoding::decode::basic::LittleEndianBasicDecoder;
    use dicom_encoding::text::{DefaultCharacterSetCodec, DynamicTextCodec};
    use dicom_encoding::transfer_syntax::explicit_le::ExplicitVRLittleEndianDecoder;
    use std::io::Read;

    fn validate_dataset_reader<I>(data: &[u8], ground_truth: I)
    where
        I: IntoIterator<Item = DataToken>,
    {
        let mut cursor = data;
        let parser = StatefulDecoder::new(
            cursor.by_ref(),
            ExplicitVRLittleEndianDecoder::default(),
            LittleEndianBasicDecoder,
            Box::new(DefaultCharacterSetCodec) as DynamicTextCodec,
        );

        let mut dset_reader = DataSetReader::new(parser, DataSetReaderOptions::default());

        let mut iter = Iterator::zip(&mut dset_reader, ground_truth);

        while let Some((res, gt_token)) = iter.next() {
            let token = res.expect("should parse without an error");
            assert_eq!(token, gt_token);
        }

        assert_eq!(
            iter.count(),
            0,
            "unexpected number of tokens remaining"
        );
    }

    #[test]
    fn sequence_reading_explicit() {
        #[rustfmt::skip]
        static DATA: &[u8] = &[
            0x18, 0x00, 0x11, 0x60, // sequence tag: (0018,6011) SequenceOfUltrasoundRegions
            b'S', b'Q', // VR
            0x00, 0x00, // reserved
            0x2e, 0x00, 0x00, 0x00, // length: 46
            0xfe, 0xff, 0x00, 0xe0, // item start tag
            0x14, 0x00, 0x00, 0x00, // item length: 20
            0x18, 0x00, 0x12, 0x60, b'U', b'S', 0x02, 0x00, 0x01, 0x00,
            0x18, 0x00, 0x14, 0x60, b'U', b'S', 0x02, 0x00, 0x02, 0x00,
            0xfe, 0xff, 0x00, 0xe0, // item start tag
            0x0a, 0x00, 0x00, 0x00, // item length: 10
            0x18, 0x00, 0x12, 0x60, b'U', b'S', 0x02, 0x00, 0x04, 0x00,
            0x20, 0x00, 0x00, 0x40, b'L', b'T', 0x04, 0x00,
            b'T', b'E', b'S', b'T',
        ];

        let ground_truth = vec![
            DataToken::SequenceStart {
                tag: Tag(0x0018, 0x6011),
                len: Length(46),
            },
            DataToken::ItemStart { len: Length(20) },
            DataToken::ElementHeader(DataElementHeader {
                tag: Tag(0x0018, 0x6012),
                vr: VR::US,
                len: Length(2),
            }),
            DataToken::PrimitiveValue(PrimitiveValue::U16([1].as_ref().into())),
            DataToken::ElementHeader(DataElementHeader {
                tag: Tag(0x0018, 0x6014),
                vr: VR::US,
                len: Length(2),
            }),
            DataToken::PrimitiveValue(PrimitiveValue::U16([2].as_ref().into())),
            DataToken::ItemEnd,
            DataToken::ItemStart { len: Length(10) },
            DataToken::ElementHeader(DataElementHeader {
                tag: Tag(0x0018, 0x6012),
                vr: VR::US,
                len: Length(2),
            }),
            DataToken::PrimitiveValue(PrimitiveValue::U16([4].as_ref().into())),
            DataToken::ItemEnd,
            DataToken::SequenceEnd,
            DataToken::ElementHeader(DataElementHeader {
                tag: Tag(0x0020, 0x4000),
                vr: VR::LT,
                len: Length(4),
            }),
            DataToken::PrimitiveValue(PrimitiveValue::Str("TEST".into())),
        ];

        validate_dataset_reader(DATA, ground_truth);
    }

    #[test]
    fn read_sequence_implicit_length() {
        #[rustfmt::skip]
        static DATA: &[u8] = &[
            0x18, 0x00, 0x11, 0x60, // sequence tag: (0018,6011) SequenceOfUltrasoundRegions
            b'S', b'Q', // VR
            0x00, 0x00, // reserved
            0xff, 0xff, 0xff, 0xff, // length: undefined
            0xfe, 0xff, 0x00, 0xe0, // item start tag
            0xff, 0xff, 0xff, 0xff, // item length: undefined
            0x18, 0x00, 0x12, 0x60, b'U', b'S', 0x02, 0x00, 0x01, 0x00,
            0xfe, 0xff, 0x0d, 0xe0, 0x00, 0x00, 0x00, 0x00, // item end
            0xfe, 0xff, 0xdd, 0xe0, 0x00, 0x00, 0x00, 0x00, // sequence end
        ];

        let ground_truth = vec![
            DataToken::SequenceStart {
                tag: Tag(0x0018, 0x6011),
                len: Length::UNDEFINED,
            },
            DataToken::ItemStart {
                len: Length::UNDEFINED,
            },
            DataToken::ElementHeader(DataElementHeader {
                tag: Tag(0x0018, 0x6012),
                vr: VR::US,
                len: Length(2),
            }),
            DataToken::PrimitiveValue(PrimitiveValue::U16([1].as_ref().into())),
            DataToken::ItemEnd,
            DataToken::SequenceEnd,
        ];

        validate_dataset_reader(DATA, ground_truth);
    }

    #[test]
    fn read_encapsulated_pixel_data() {
        #[rustfmt::skip]
        static DATA: &[u8] = &[
            0xe0, 0x7f, 0x10, 0x00, // tag: (7FE0,0010) PixelData
            b'O', b'B', 0x00, 0x00, // VR, reserved
            0xff, 0xff, 0xff, 0xff, // length: undefined
            0xfe, 0xff, 0x00, 0xe0, // item start tag (offset table)
            0x00, 0x00, 0x00, 0x00, // item length: 0 (empty offset table)
            0xfe, 0xff, 0x00, 0xe0, // item start tag (fragment)
            0x04, 0x00, 0x00, 0x00, // item length: 4
            0x01, 0x02, 0x03, 0x04, // fragment bytes
            0xfe, 0xff, 0xdd, 0xe0, 0x00, 0x00, 0x00, 0x00, // sequence end
        ];

        let ground_truth = vec![
            DataToken::PixelSequenceStart,
            DataToken::ItemStart { len: Length(0) },
            DataToken::OffsetTable(Vec::new()),
            DataToken::ItemEnd,
            DataToken::ItemStart { len: Length(4) },
            DataToken::ItemValue(vec![1, 2, 3, 4]),
            DataToken::ItemEnd,
            DataToken::SequenceEnd,
        ];

        validate_dataset_reader(DATA, ground_truth);
    }
}
