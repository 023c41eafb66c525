//! Module for the data set writer
use crate::dataset::{DataToken, SeqTokenType};
use dicom_core::{DataElementHeader, Length, Tag, VR};
use dicom_encoding::encode::EncodeTo;
use snafu::{Backtrace, OptionExt, ResultExt, Snafu};
use std::io::Write;

/// Module-level error type for data set writing issues.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("Could not write element header"))]
    WriteHeader {
        source: dicom_encoding::encode::Error,
    },
    #[snafu(display("Could not write item header"))]
    WriteItemHeader {
        source: dicom_encoding::encode::Error,
    },
    #[snafu(display("Could not write item delimiter"))]
    WriteItemDelimiter {
        source: dicom_encoding::encode::Error,
    },
    #[snafu(display("Could not write sequence delimiter"))]
    WriteSequenceDelimiter {
        source: dicom_encoding::encode::Error,
    },
    #[snafu(display("Could not write primitive value"))]
    WritePrimitiveValue {
        source: dicom_encoding::encode::Error,
    },
    #[snafu(display("Could not write encapsulated item bytes"))]
    WriteItemBytes { backtrace: Backtrace, source: std::io::Error },
    #[snafu(display("Unexpected token {:?} in data set writer", token))]
    UnexpectedToken { token: DataToken },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A writer-specific token representing a sequence or item start,
/// recorded so the writer knows whether to emit a delimiter when the
/// matching end token arrives.
#[derive(Debug)]
struct SeqToken {
    typ: SeqTokenType,
    len: Length,
}

/// A stateful device for writing a DICOM data set in sequential order,
/// consuming a stream of [`DataToken`]s. This is the write-side
/// counterpart to `DataSetReader`.
#[derive(Debug)]
pub struct DataSetWriter<W, E> {
    to: W,
    encoder: E,
    seq_tokens: Vec<SeqToken>,
    last_header: Option<DataElementHeader>,
}

impl<W, E> DataSetWriter<W, E> {
    /// Construct a new data set writer out of a destination writer
    /// and an encoder bound to it.
    pub fn new(to: W, encoder: E) -> Self {
        DataSetWriter {
            to,
            encoder,
            seq_tokens: Vec::new(),
            last_header: None,
        }
    }
}

impl<W, E> DataSetWriter<W, E>
where
    W: Write,
    E: EncodeTo<W>,
{
    /// Feed the given sequence of tokens, which are all part of the
    /// same data set, to the writer.
    pub fn write_sequence<I>(&mut self, tokens: I) -> Result<()>
    where
        I: IntoIterator<Item = DataToken>,
    {
        for token in tokens {
            self.write(token)?;
        }
        Ok(())
    }

    /// Feed a single data set token to the writer.
    pub fn write(&mut self, token: DataToken) -> Result<()> {
        match token {
            DataToken::SequenceStart { tag, len } => {
                self.seq_tokens.push(SeqToken {
                    typ: SeqTokenType::Sequence,
                    len,
                });
                self.encoder
                    .encode_element_header(&mut self.to, DataElementHeader::new(tag, VR::SQ, len))
                    .context(WriteHeaderSnafu)?;
                Ok(())
            }
            DataToken::PixelSequenceStart => {
                self.seq_tokens.push(SeqToken {
                    typ: SeqTokenType::Sequence,
                    len: Length::UNDEFINED,
                });
                self.encoder
                    .encode_element_header(
                        &mut self.to,
                        DataElementHeader::new(Tag(0x7FE0, 0x0010), VR::OB, Length::UNDEFINED),
                    )
                    .context(WriteHeaderSnafu)?;
                Ok(())
            }
            DataToken::ItemStart { len } => {
                self.seq_tokens.push(SeqToken {
                    typ: SeqTokenType::Item,
                    len,
                });
                self.encoder
                    .encode_item_header(&mut self.to, len.0)
                    .context(WriteItemHeaderSnafu)?;
                Ok(())
            }
            DataToken::ItemEnd => {
                if let Some(seq) = self.seq_tokens.pop() {
                    if seq.typ == SeqTokenType::Item && seq.len.is_undefined() {
                        self.encoder
                            .encode_item_delimiter(&mut self.to)
                            .context(WriteItemDelimiterSnafu)?;
                    }
                }
                Ok(())
            }
            DataToken::SequenceEnd => {
                if let Some(seq) = self.seq_tokens.pop() {
                    if seq.typ == SeqTokenType::Sequence && seq.len.is_undefined() {
                        self.encoder
                            .encode_sequence_delimiter(&mut self.to)
                            .context(WriteSequenceDelimiterSnafu)?;
                    }
                }
                Ok(())
            }
            DataToken::ElementHeader(header) => {
                self.last_header = Some(header);
                self.encoder
                    .encode_element_header(&mut self.to, header)
                    .context(WriteHeaderSnafu)?;
                Ok(())
            }
            DataToken::PrimitiveValue(ref value) => {
                self.last_header
                    .take()
                    .context(UnexpectedTokenSnafu {
                        token: token.clone(),
                    })?;
                self.encoder
                    .encode_primitive(&mut self.to, value)
                    .context(WritePrimitiveValueSnafu)?;
                Ok(())
            }
            DataToken::ItemValue(ref data) => {
                self.to.write_all(data).context(WriteItemBytesSnafu)?;
                Ok(())
            }
            DataToken::OffsetTable(ref table) => {
                self.encoder
                    .encode_offset_table(&mut self.to, table)
                    .context(WritePrimitiveValueSnafu)?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DataSetWriter;
    use crate::dataset::DataToken;
    use dicom_core::{
        header::{DataElementHeader, Length},
        value::PrimitiveValue,
        Tag, VR,
    };
    use dicom_encoding::encode::{explicit_le::ExplicitVRLittleEndianEncoder, EncoderFor};

    fn validate_dataset_writer<I>(tokens: I, ground_truth: &[u8])
    where
        I: IntoIterator<Item = DataToken>,
    {
        let mut raw_out: Vec<u8> = vec![];
        let encoder = EncoderFor::new(ExplicitVRLittleEndianEncoder::default());
        let mut dset_writer = DataSetWriter::new(&mut raw_out, encoder);

        dset_writer.write_sequence(tokens).unwrap();

        assert_eq!(raw_out, ground_truth);
    }

    #[test]
    fn write_sequence_explicit() {
        let tokens = vec![
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

        #[rustfmt::skip]
        static GROUND_TRUTH: &[u8] = &[
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

        validate_dataset_writer(tokens, GROUND_TRUTH);
    }

    #[test]
    fn write_sequence_implicit_length() {
        let tokens = vec![
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

        #[rustfmt::skip]
        static GROUND_TRUTH: &[u8] = &[
            0x18, 0x00, 0x11, 0x60, b'S', b'Q', 0x00, 0x00,
            0xff, 0xff, 0xff, 0xff, // length: undefined
            0xfe, 0xff, 0x00, 0xe0,
            0xff, 0xff, 0xff, 0xff, // item length: undefined
            0x18, 0x00, 0x12, 0x60, b'U', b'S', 0x02, 0x00, 0x01, 0x00,
            0xfe, 0xff, 0x0d, 0xe0, 0x00, 0x00, 0x00, 0x00, // item end
            0xfe, 0xff, 0xdd, 0xe0, 0x00, 0x00, 0x00, 0x00, // sequence end
        ];

        validate_dataset_writer(tokens, GROUND_TRUTH);
    }
}
