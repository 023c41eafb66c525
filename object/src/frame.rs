//! Random access to encapsulated or native pixel data frames.
//!
//! The types in this module read just enough of a DICOM file to locate its
//! Pixel Data element, reconstruct (or read) its Basic Offset Table, and
//! fetch individual frames by index without materializing the whole data
//! set or the whole pixel stream in memory.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use snafu::{Backtrace, OptionExt, ResultExt, Snafu};

use dicom_core::header::Header;
use dicom_core::{Tag, VR};
use dicom_dictionary_std::StandardDataDictionary;
use dicom_encoding::decode::basic::LittleEndianBasicDecoder;
use dicom_encoding::decode::explicit_le::ExplicitVRLittleEndianDecoder;
use dicom_encoding::decode::implicit_le::ImplicitVRLittleEndianDecoder;
use dicom_encoding::decode::{BasicDecode, Decode};
use dicom_encoding::transfer_syntax::TransferSyntaxIndex;
use dicom_encoding::Codec;
use dicom_transfer_syntax_registry::TransferSyntaxRegistry;

use crate::file::ReadPreamble;
use crate::mem::InMemDicomObject;
use crate::meta::FileMetaTable;
use crate::FileDicomObject;

/// Pixel Data, native or encapsulated.
const PIXEL_DATA: Tag = Tag(0x7FE0, 0x0010);
/// Float Pixel Data, the first tag group member could ever stop metadata at.
const FLOAT_PIXEL_DATA: Tag = Tag(0x7FE0, 0x0008);
/// Double Float Pixel Data.
const DOUBLE_PIXEL_DATA: Tag = Tag(0x7FE0, 0x0009);
/// Extended Offset Table, always found right before Pixel Data.
const EXTENDED_OFFSET_TABLE: Tag = Tag(0x7FE0, 0x0001);
/// Extended Offset Table Lengths, immediately follows the table above.
const EXTENDED_OFFSET_TABLE_LENGTHS: Tag = Tag(0x7FE0, 0x0002);
/// Data Set Trailing Padding, can follow Pixel Data in some writers' output.
const TRAILING_PADDING: Tag = Tag(0xFFFC, 0xFFFC);

const ITEM: Tag = Tag(0xFFFE, 0xE000);
/// `ITEM`, packed as it would appear in a little-endian-decoded u32 offset
/// entry; a Basic Offset Table entry equal to this value is the sentinel the
/// original implementation checks for (`dicom-file.c`'s `value == TAG_ITEM`).
const ITEM_TAG_AS_U32: u32 = 0xFFFE_E000;

const IMPLICIT_VR_LITTLE_ENDIAN: &str = "1.2.840.10008.1.2";

/// The error type for everything in this module.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("Could not open file {}: {}", filename.display(), source))]
    OpenFile {
        filename: PathBuf,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    #[snafu(display("Could not read from file: {}", source))]
    ReadFile {
        source: std::io::Error,
        backtrace: Backtrace,
    },

    #[snafu(display("Could not read file meta group: {}", source))]
    ReadMeta {
        source: crate::meta::Error,
        backtrace: Backtrace,
    },

    #[snafu(display("Could not read data set up to the pixel data element: {}", source))]
    ReadDataSet {
        source: crate::ReadError,
        backtrace: Backtrace,
    },

    #[snafu(display("Could not decode a data element header: {}", source))]
    DecodeHeader {
        source: dicom_encoding::decode::Error,
        backtrace: Backtrace,
    },

    #[snafu(display("Transfer syntax `{}` is not supported", uid))]
    UnsupportedTransferSyntax { uid: String, backtrace: Backtrace },

    #[snafu(display("Pixel data could not be located in the data set"))]
    PixelDataNotFound { backtrace: Backtrace },

    #[snafu(display("Missing required attribute `{}`", name))]
    MissingAttribute {
        name: &'static str,
        backtrace: Backtrace,
    },

    #[snafu(display("Could not read attribute `{}`: {}", name, source))]
    ReadAttribute {
        name: &'static str,
        source: dicom_core::value::ConvertValueError,
        backtrace: Backtrace,
    },

    #[snafu(display("Could not read attribute `{}`: {}", name, source))]
    CastAttribute {
        name: &'static str,
        source: dicom_core::value::CastValueError,
        backtrace: Backtrace,
    },

    #[snafu(display("Expected an item tag, found {}", tag))]
    ExpectedItem { tag: Tag, backtrace: Backtrace },

    #[snafu(display(
        "Basic offset table is malformed: entry {} is not a valid offset",
        index
    ))]
    MalformedBot { index: usize, backtrace: Backtrace },

    #[snafu(display(
        "Number of Frames ({}) does not match the number of entries \
         reconstructed for the offset table ({})",
        declared,
        reconstructed
    ))]
    FrameCountMismatch {
        declared: u32,
        reconstructed: usize,
        backtrace: Backtrace,
    },

    #[snafu(display("Number of Frames must be strictly positive, found {}", value))]
    BadFrameCount { value: i64, backtrace: Backtrace },

    #[snafu(display(
        "Frame index {} is out of bounds for an object with {} frame(s)",
        index,
        num_frames
    ))]
    BadFrameIndex {
        index: u32,
        num_frames: u32,
        backtrace: Backtrace,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A reconstructed or decoded Basic Offset Table.
///
/// Each entry is the byte offset, relative to the first byte of the first
/// fragment's value, at which the respective frame's data begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicOffsetTable {
    /// number of frames this table accounts for
    pub num_frames: u32,
    /// per-frame start offsets, `offsets.len() == num_frames as usize`
    pub offsets: Vec<u64>,
}

impl BasicOffsetTable {
    /// The byte offset at which the given 1-based frame number starts,
    /// relative to the first fragment's value.
    pub fn offset_of(&self, frame_number: u32) -> Option<u64> {
        self.offsets.get(frame_number.checked_sub(1)? as usize).copied()
    }
}

/// The subset of Image Pixel module attributes needed to make sense of a
/// pixel data stream without decoding it.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelDescription {
    pub rows: u16,
    pub columns: u16,
    pub samples_per_pixel: u16,
    pub bits_allocated: u16,
    pub bits_stored: u16,
    pub high_bit: u16,
    pub pixel_representation: u16,
    pub planar_configuration: u16,
    pub photometric_interpretation: String,
    pub number_of_frames: u32,
}

impl PixelDescription {
    /// Read the attributes this type holds from an already-parsed data set.
    fn from_dataset(obj: &InMemDicomObject<StandardDataDictionary>) -> Result<Self> {
        use dicom_dictionary_std::tags;

        let rows = read_u16(obj, tags::ROWS, "Rows")?;
        let columns = read_u16(obj, tags::COLUMNS, "Columns")?;
        let samples_per_pixel = read_u16(obj, tags::SAMPLES_PER_PIXEL, "SamplesPerPixel")?;
        let bits_allocated = read_u16(obj, tags::BITS_ALLOCATED, "BitsAllocated")?;
        let bits_stored = read_u16(obj, tags::BITS_STORED, "BitsStored")?;
        let high_bit = read_u16(obj, tags::HIGH_BIT, "HighBit")?;
        let pixel_representation =
            read_u16(obj, tags::PIXEL_REPRESENTATION, "PixelRepresentation")?;
        let planar_configuration = obj
            .element_opt(tags::PLANAR_CONFIGURATION)
            .ok()
            .flatten()
            .and_then(|e| e.value().to_int::<u16>().ok())
            .unwrap_or(0);
        let photometric_interpretation = obj
            .element(tags::PHOTOMETRIC_INTERPRETATION)
            .ok()
            .and_then(|e| e.value().string().ok())
            .unwrap_or("")
            .trim_end()
            .to_string();

        let number_of_frames = obj
            .element_opt(tags::NUMBER_OF_FRAMES)
            .ok()
            .flatten()
            .and_then(|e| e.value().to_int::<i64>().ok())
            .unwrap_or(1);
        let number_of_frames =
            u32::try_from(number_of_frames).ok().filter(|v| *v > 0).with_context(|| {
                BadFrameCountSnafu {
                    value: number_of_frames,
                }
            })?;

        Ok(PixelDescription {
            rows,
            columns,
            samples_per_pixel,
            bits_allocated,
            bits_stored,
            high_bit,
            pixel_representation,
            planar_configuration,
            photometric_interpretation,
            number_of_frames,
        })
    }

    /// The number of bytes a single native (non-encapsulated) frame occupies.
    pub fn bytes_per_frame(&self) -> u64 {
        self.rows as u64
            * self.columns as u64
            * self.samples_per_pixel as u64
            * (self.bits_allocated as u64 / 8)
    }
}

fn read_u16(
    obj: &InMemDicomObject<StandardDataDictionary>,
    tag: Tag,
    name: &'static str,
) -> Result<u16> {
    let elem = obj
        .element(tag)
        .ok()
        .with_context(|| MissingAttributeSnafu { name })?;
    elem.value()
        .to_int::<u16>()
        .context(ReadAttributeSnafu { name })
}

/// A single decoded frame, with enough of the Image Pixel module carried
/// along to interpret its bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// 1-based frame number
    pub number: u32,
    /// the raw bytes of this frame, exactly as stored (possibly compressed)
    pub value: Vec<u8>,
    pub rows: u16,
    pub columns: u16,
    pub samples_per_pixel: u16,
    pub bits_allocated: u16,
    pub bits_stored: u16,
    pub pixel_representation: u16,
    pub planar_configuration: u16,
    pub photometric_interpretation: String,
    pub transfer_syntax_uid: String,
}

/// A handle to a DICOM Part 10 file opened for frame-level random access.
///
/// Unlike [`FileDicomObject`], a `FrameSource` does not keep the pixel data
/// in memory: it records where the Pixel Data element begins and reopens
/// the file (or reuses an already-open handle, seeking as needed) whenever
/// a frame is requested.
#[derive(Debug)]
pub struct FrameSource {
    path: PathBuf,
    meta: FileMetaTable,
    implicit_vr: bool,
    encapsulated: bool,
    pixel_data_offset: u64,
    pixel_data_vr: VR,
    description: PixelDescription,
}

impl FrameSource {
    /// Open a file and locate its pixel data, without reading any of the
    /// pixel stream itself.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Phase 1: reuse the regular data set reader, stopping just before
        // any pixel-data-family element, to get the attributes that
        // describe the pixel stream.
        let obj: FileDicomObject<InMemDicomObject<StandardDataDictionary>> =
            FileDicomObject::open_file_with_all_options(
                path,
                StandardDataDictionary,
                TransferSyntaxRegistry,
                Some(FLOAT_PIXEL_DATA),
                ReadPreamble::Auto,
            )
            .context(ReadDataSetSnafu)?;

        let meta = obj.meta().clone();
        let description = PixelDescription::from_dataset(&obj.into_inner())?;

        let ts = TransferSyntaxRegistry
            .get(&meta.transfer_syntax)
            .with_context(|| UnsupportedTransferSyntaxSnafu {
                uid: meta.transfer_syntax.clone(),
            })?;
        let implicit_vr = meta.transfer_syntax.trim_end_matches('\0') == IMPLICIT_VR_LITTLE_ENDIAN;
        let encapsulated = matches!(ts.codec(), Codec::EncapsulatedPixelData(..));

        // Phase 2: a second, unbuffered pass purely to find the exact byte
        // offset of the pixel data element header. `open_file_with_all_options`
        // reads through a `BufReader`, whose read-ahead makes its internal
        // position an unreliable proxy for logical stream position, so this
        // walk is kept deliberately independent of it.
        let mut file = File::open(path).with_context(|_| OpenFileSnafu { filename: path })?;

        if detect_preamble(&mut file)? {
            let mut preamble = [0u8; 128];
            file.read_exact(&mut preamble).context(ReadFileSnafu)?;
        }

        let _ = FileMetaTable::from_reader(&mut file).context(ReadMetaSnafu)?;

        let (pixel_data_offset, pixel_data_vr) =
            locate_pixel_data(&mut file, implicit_vr)?;

        Ok(FrameSource {
            path: path.to_owned(),
            meta,
            implicit_vr,
            encapsulated,
            pixel_data_offset,
            pixel_data_vr,
            description,
        })
    }

    /// The Transfer Syntax UID declared in the file's meta group.
    pub fn transfer_syntax_uid(&self) -> &str {
        self.meta.transfer_syntax.trim_end_matches('\0')
    }

    /// Whether pixel data is stored encapsulated (in fragment items) rather
    /// than as one contiguous native stream.
    pub fn is_encapsulated(&self) -> bool {
        self.encapsulated
    }

    /// The Image Pixel module attributes read for this object.
    pub fn description(&self) -> &PixelDescription {
        &self.description
    }

    /// The value representation of the Pixel Data element itself
    /// (`OB`, `OW`, `OF` or `OD`, depending on bit depth and transfer syntax).
    pub fn pixel_data_vr(&self) -> VR {
        self.pixel_data_vr
    }

    fn reopen(&self) -> Result<File> {
        let mut file = File::open(&self.path).with_context(|_| OpenFileSnafu {
            filename: self.path.clone(),
        })?;
        file.seek(SeekFrom::Start(self.pixel_data_offset))
            .context(ReadFileSnafu)?;
        Ok(file)
    }

    fn decode_header(&self, file: &mut File) -> Result<(Tag, VR, u32, usize)> {
        decode_header_at(file, self.implicit_vr)
    }

    /// Read the offset table already present in the file, if any.
    ///
    /// For encapsulated pixel data, this is the first (possibly empty) item
    /// of the pixel data fragment sequence, or the Extended Offset Table
    /// when the first item is empty. Returns `Ok(None)` when no such table
    /// is present in the file and one must instead be constructed with
    /// [`build_bot`](FrameSource::build_bot).
    pub fn read_bot(&self) -> Result<Option<BasicOffsetTable>> {
        if !self.encapsulated {
            return Ok(None);
        }

        let num_frames = self.description.number_of_frames;

        let mut file = self.reopen()?;
        let (tag, _vr, len, _n) = self.decode_header(&mut file)?;
        if tag != PIXEL_DATA {
            return PixelDataNotFoundSnafu.fail();
        }
        let _ = len; // pixel data itself carries an undefined length here

        let (item_tag, item_len) = decode_item_header(&mut file)?;
        if item_tag != ITEM {
            return ExpectedItemSnafu { tag: item_tag }.fail();
        }

        if item_len > 0 {
            let basic = LittleEndianBasicDecoder;
            let mut offsets = Vec::with_capacity(num_frames as usize);
            for i in 0..num_frames as usize {
                let value = basic.decode_ul(&mut file).context(ReadFileSnafu)?;
                if value == ITEM_TAG_AS_U32 {
                    return MalformedBotSnafu { index: i }.fail();
                }
                offsets.push(value as u64);
            }
            return Ok(Some(finish_bot(offsets, num_frames)?));
        }

        // empty basic offset table: fall back to the Extended Offset Table,
        // which was already captured while reading the data set in phase 1
        // (its tag precedes Pixel Data's, so `read_until` does not skip it).
        let obj: FileDicomObject<InMemDicomObject<StandardDataDictionary>> =
            FileDicomObject::open_file_with_all_options(
                &self.path,
                StandardDataDictionary,
                TransferSyntaxRegistry,
                Some(FLOAT_PIXEL_DATA),
                ReadPreamble::Auto,
            )
            .context(ReadDataSetSnafu)?;

        let dataset = obj.into_inner();
        let Ok(elem) = dataset.element(EXTENDED_OFFSET_TABLE) else {
            return Ok(None);
        };

        let bytes = elem
            .value()
            .to_bytes()
            .context(CastAttributeSnafu {
                name: "ExtendedOffsetTable",
            })?;
        let offsets: Vec<u64> = bytes
            .chunks_exact(8)
            .map(|c| u64::from_le_bytes(c.try_into().unwrap()))
            .collect();

        Ok(Some(finish_bot(offsets, num_frames)?))
    }

    /// Construct a Basic Offset Table by scanning or computing it, for
    /// files that do not carry one of their own.
    ///
    /// For encapsulated transfer syntaxes, every fragment item between the
    /// offset table item and the sequence delimiter is walked in turn,
    /// accumulating offsets as fragments are consumed (multiple fragments
    /// per frame are summed into a single frame offset). For native
    /// transfer syntaxes, offsets are computed arithmetically from the
    /// Image Pixel module attributes.
    pub fn build_bot(&self) -> Result<BasicOffsetTable> {
        let num_frames = self.description.number_of_frames;

        if !self.encapsulated {
            let frame_len = self.description.bytes_per_frame();
            let offsets = (0..num_frames as u64).map(|i| i * frame_len).collect();
            return finish_bot(offsets, num_frames);
        }

        let mut file = self.reopen()?;
        let (tag, _vr, _len, _n) = self.decode_header(&mut file)?;
        if tag != PIXEL_DATA {
            return PixelDataNotFoundSnafu.fail();
        }

        let (item_tag, item_len) = decode_item_header(&mut file)?;
        if item_tag != ITEM {
            return ExpectedItemSnafu { tag: item_tag }.fail();
        }
        // skip over the (possibly populated) offset table item itself;
        // relative to the current position, not the start of the stream.
        file.seek(SeekFrom::Current(item_len as i64))
            .context(ReadFileSnafu)?;

        let fragments_start = file.stream_position().context(ReadFileSnafu)?;
        let mut offsets = Vec::with_capacity(num_frames as usize);
        let mut running = 0u64;
        let mut first = true;

        loop {
            let (item_tag, item_len) = decode_item_header(&mut file)?;
            if item_tag != ITEM {
                // sequence delimiter: stop, whatever fragments were seen
                break;
            }
            if first {
                offsets.push(0);
                first = false;
            } else {
                offsets.push(running);
            }
            running += 8 + item_len as u64;
            file.seek(SeekFrom::Current(item_len as i64))
                .context(ReadFileSnafu)?;
        }

        let _ = fragments_start;
        finish_bot(offsets, num_frames)
    }

    /// Read a single frame's raw bytes by its 1-based frame number.
    pub fn read_frame(&self, frame_number: u32, bot: &BasicOffsetTable) -> Result<Frame> {
        if frame_number == 0 {
            return BadFrameIndexSnafu {
                index: frame_number,
                num_frames: bot.num_frames,
            }
            .fail();
        }
        let offset = bot.offset_of(frame_number).with_context(|| BadFrameIndexSnafu {
            index: frame_number,
            num_frames: bot.num_frames,
        })?;

        let value = if self.encapsulated {
            self.read_encapsulated_frame(offset, frame_number, bot)?
        } else {
            self.read_native_frame(offset)?
        };

        Ok(Frame {
            number: frame_number,
            value,
            rows: self.description.rows,
            columns: self.description.columns,
            samples_per_pixel: self.description.samples_per_pixel,
            bits_allocated: self.description.bits_allocated,
            bits_stored: self.description.bits_stored,
            pixel_representation: self.description.pixel_representation,
            planar_configuration: self.description.planar_configuration,
            photometric_interpretation: self.description.photometric_interpretation.clone(),
            transfer_syntax_uid: self.transfer_syntax_uid().to_string(),
        })
    }

    fn read_native_frame(&self, offset: u64) -> Result<Vec<u8>> {
        let frame_len = self.description.bytes_per_frame();
        let mut file = self.reopen()?;
        let (tag, _vr, _len, _n) = self.decode_header(&mut file)?;
        if tag != PIXEL_DATA {
            return PixelDataNotFoundSnafu.fail();
        }
        file.seek(SeekFrom::Current(offset as i64))
            .context(ReadFileSnafu)?;
        let mut buf = vec![0u8; frame_len as usize];
        file.read_exact(&mut buf).context(ReadFileSnafu)?;
        Ok(buf)
    }

    fn read_encapsulated_frame(
        &self,
        offset: u64,
        frame_number: u32,
        bot: &BasicOffsetTable,
    ) -> Result<Vec<u8>> {
        let mut file = self.reopen()?;
        let (tag, _vr, _len, _n) = self.decode_header(&mut file)?;
        if tag != PIXEL_DATA {
            return PixelDataNotFoundSnafu.fail();
        }
        let (item_tag, item_len) = decode_item_header(&mut file)?;
        if item_tag != ITEM {
            return ExpectedItemSnafu { tag: item_tag }.fail();
        }
        file.seek(SeekFrom::Current(item_len as i64))
            .context(ReadFileSnafu)?;

        let fragments_start = file.stream_position().context(ReadFileSnafu)?;
        file.seek(SeekFrom::Start(fragments_start + offset))
            .context(ReadFileSnafu)?;

        // the number of bytes for this frame is the distance to the next
        // frame's offset, or the remainder of the fragment stream for the
        // last frame.
        let next_offset = bot.offset_of(frame_number + 1);

        let mut value = Vec::new();
        loop {
            let (item_tag, item_len) = decode_item_header(&mut file)?;
            if item_tag != ITEM {
                break;
            }
            let mut chunk = vec![0u8; item_len as usize];
            file.read_exact(&mut chunk).context(ReadFileSnafu)?;
            value.extend_from_slice(&chunk);

            if let Some(next_offset) = next_offset {
                let consumed = file.stream_position().context(ReadFileSnafu)? - fragments_start;
                if consumed >= next_offset {
                    break;
                }
            } else {
                // last frame: a single fragment is the common case, keep
                // reading fragments until the delimiter is reached only
                // when fragments genuinely continue beyond this one.
                break;
            }
        }

        Ok(value)
    }
}

/// Peek at the first 132 bytes of `file` to decide whether a 128-byte
/// preamble precedes the `DICM` magic code, leaving the stream position
/// unchanged. Mirrors [`InMemDicomObject`]'s own `detect_preamble`, falling
/// back to assuming a preamble is present when the shape can't be told apart
/// (e.g. a file shorter than 132 bytes).
fn detect_preamble(file: &mut File) -> Result<bool> {
    let start = file.stream_position().context(ReadFileSnafu)?;
    let mut buf = [0u8; 132];
    let mut read = 0;
    loop {
        match file.read(&mut buf[read..]).context(ReadFileSnafu)? {
            0 => break,
            n => read += n,
        }
    }
    file.seek(SeekFrom::Start(start)).context(ReadFileSnafu)?;

    if read >= 132 && &buf[128..132] == b"DICM" {
        return Ok(true);
    }
    if read >= 4 && &buf[0..4] == b"DICM" {
        return Ok(false);
    }
    Ok(true)
}

fn finish_bot(offsets: Vec<u64>, num_frames: u32) -> Result<BasicOffsetTable> {
    if offsets.len() != num_frames as usize {
        return FrameCountMismatchSnafu {
            declared: num_frames,
            reconstructed: offsets.len(),
        }
        .fail();
    }
    Ok(BasicOffsetTable { num_frames, offsets })
}

fn decode_header_at(file: &mut File, implicit_vr: bool) -> Result<(Tag, VR, u32, usize)> {
    if implicit_vr {
        let dec = ImplicitVRLittleEndianDecoder::<StandardDataDictionary>::with_std_dict();
        let (header, n) = dec.decode_header(file).context(DecodeHeaderSnafu)?;
        Ok((header.tag(), header.vr(), header.len.0, n))
    } else {
        let dec = ExplicitVRLittleEndianDecoder::default();
        let (header, n) = dec.decode_header(file).context(DecodeHeaderSnafu)?;
        Ok((header.tag(), header.vr(), header.len.0, n))
    }
}

fn decode_item_header(file: &mut File) -> Result<(Tag, u32)> {
    let basic = LittleEndianBasicDecoder;
    let group = basic.decode_us(&mut *file).context(ReadFileSnafu)?;
    let element = basic.decode_us(&mut *file).context(ReadFileSnafu)?;
    let len = basic.decode_ul(&mut *file).context(ReadFileSnafu)?;
    Ok((Tag(group, element), len))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use dicom_core::{DataElement, PrimitiveValue, VR};
    use dicom_dictionary_std::{tags, uids};

    use crate::meta::FileMetaTableBuilder;
    use crate::InMemDicomObject;

    use super::*;

    fn item_header(length: u32) -> [u8; 8] {
        let mut buf = [0u8; 8];
        buf[0..2].copy_from_slice(&0xFFFEu16.to_le_bytes());
        buf[2..4].copy_from_slice(&0xE000u16.to_le_bytes());
        buf[4..8].copy_from_slice(&length.to_le_bytes());
        buf
    }

    fn sq_delim_header() -> [u8; 8] {
        let mut buf = [0u8; 8];
        buf[0..2].copy_from_slice(&0xFFFEu16.to_le_bytes());
        buf[2..4].copy_from_slice(&0xE0DDu16.to_le_bytes());
        buf[4..8].copy_from_slice(&0u32.to_le_bytes());
        buf
    }

    /// assemble a complete Part 10 file with an encapsulated Pixel Data
    /// element whose fragment sequence is written verbatim by the caller,
    /// mirroring the literal byte layout of spec seed scenarios 4 and 5.
    fn write_encapsulated_file(path: &std::path::Path, num_frames: u32, fragments: &[u8]) {
        let meta = FileMetaTableBuilder::new()
            .media_storage_sop_class_uid(uids::VL_WHOLE_SLIDE_MICROSCOPY_IMAGE_STORAGE)
            .media_storage_sop_instance_uid("2.25.1")
            .transfer_syntax(uids::RLE_LOSSLESS)
            .build()
            .unwrap();

        let obj = InMemDicomObject::<dicom_dictionary_std::StandardDataDictionary>::from_element_iter([
            DataElement::new(tags::ROWS, VR::US, PrimitiveValue::from(4_u16)),
            DataElement::new(tags::COLUMNS, VR::US, PrimitiveValue::from(4_u16)),
            DataElement::new(
                tags::SAMPLES_PER_PIXEL,
                VR::US,
                PrimitiveValue::from(1_u16),
            ),
            DataElement::new(tags::BITS_ALLOCATED, VR::US, PrimitiveValue::from(8_u16)),
            DataElement::new(tags::BITS_STORED, VR::US, PrimitiveValue::from(8_u16)),
            DataElement::new(tags::HIGH_BIT, VR::US, PrimitiveValue::from(7_u16)),
            DataElement::new(
                tags::PIXEL_REPRESENTATION,
                VR::US,
                PrimitiveValue::from(0_u16),
            ),
            DataElement::new(
                tags::PHOTOMETRIC_INTERPRETATION,
                VR::CS,
                "MONOCHROME2",
            ),
            DataElement::new(
                tags::NUMBER_OF_FRAMES,
                VR::IS,
                num_frames.to_string(),
            ),
        ]);

        let mut encoded = Vec::new();
        encoded.extend_from_slice(&[0u8; 128]);
        encoded.extend_from_slice(b"DICM");
        meta.write(&mut encoded).unwrap();

        // the main data set, explicit VR little endian (File Meta always is,
        // and the dataset itself uses whichever TS the meta group declares,
        // but every element here except Pixel Data is VR-framed the same
        // way regardless, so writing it via the normal dataset encoder and
        // then appending the hand-built Pixel Data element is equivalent to
        // what a real RLE Lossless writer would produce).
        let ts = dicom_transfer_syntax_registry::TransferSyntaxRegistry
            .get(uids::EXPLICIT_VR_LITTLE_ENDIAN)
            .unwrap();
        obj.write_dataset_with_ts(&mut encoded, ts).unwrap();

        // Pixel Data element header: tag + VR "OB" + 2 reserved + 4-byte
        // length 0xFFFFFFFF (undefined length, encapsulated).
        encoded.extend_from_slice(&0x7FE0u16.to_le_bytes());
        encoded.extend_from_slice(&0x0010u16.to_le_bytes());
        encoded.extend_from_slice(b"OB");
        encoded.extend_from_slice(&[0u8, 0u8]);
        encoded.extend_from_slice(&0xFFFFFFFFu32.to_le_bytes());

        encoded.extend_from_slice(fragments);

        let mut file = std::fs::File::create(path).unwrap();
        file.write_all(&encoded).unwrap();
    }

    #[test]
    fn read_bot_returns_on_disk_table_verbatim() {
        // seed scenario 4: BOT item length 12, offsets {0, 1024, 2048}.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bot_read.dcm");

        let mut fragments = Vec::new();
        fragments.extend_from_slice(&item_header(12));
        for off in [0u32, 1024, 2048] {
            fragments.extend_from_slice(&off.to_le_bytes());
        }
        // a dummy single fragment so the file is well-formed past the BOT.
        fragments.extend_from_slice(&item_header(4));
        fragments.extend_from_slice(&[0u8; 4]);
        fragments.extend_from_slice(&sq_delim_header());

        write_encapsulated_file(&path, 3, &fragments);

        let source = FrameSource::open(&path).unwrap();
        assert!(source.is_encapsulated());

        let bot = source.read_bot().unwrap().expect("BOT should be present");
        assert_eq!(bot.num_frames, 3);
        assert_eq!(bot.offsets, vec![0, 1024, 2048]);
        assert_eq!(bot.offset_of(1), Some(0));
    }

    #[test]
    fn build_bot_reconstructs_offsets_from_fragment_items() {
        // seed scenario 5: BOT item length 0, three Frame Items of lengths
        // 100, 200, 300. Expected offsets [0, 108, 316].
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bot_build.dcm");

        let mut fragments = Vec::new();
        fragments.extend_from_slice(&item_header(0));
        for len in [100u32, 200, 300] {
            fragments.extend_from_slice(&item_header(len));
            fragments.extend_from_slice(&vec![0xAAu8; len as usize]);
        }
        fragments.extend_from_slice(&sq_delim_header());

        write_encapsulated_file(&path, 3, &fragments);

        let source = FrameSource::open(&path).unwrap();

        // no Extended Offset Table and an empty BOT item: nothing to read.
        assert!(source.read_bot().unwrap().is_none());

        let bot = source.build_bot().unwrap();
        assert_eq!(bot.offsets, vec![0, 108, 316]);

        // P10: seeking to the first byte after the BOT item, plus offsets[k],
        // must land exactly on an ITEM tag. The BOT item here is empty
        // (length 0), so the fragment stream starts right after its 8-byte
        // item header; `4*N` only applies to a populated BOT and must not
        // be assumed here, mirroring `read_encapsulated_frame`'s own
        // dynamic `fragments_start` computation.
        let mut file = std::fs::File::open(&path).unwrap();
        file.seek(SeekFrom::Start(source.pixel_data_offset))
            .unwrap();
        let (_tag, _vr, _len, _n) = decode_header_at(&mut file, source.implicit_vr).unwrap();
        let (bot_item_tag, bot_item_len) = decode_item_header(&mut file).unwrap();
        assert_eq!(bot_item_tag, ITEM);
        file.seek(SeekFrom::Current(bot_item_len as i64)).unwrap();
        let fragments_start = file.stream_position().unwrap();

        for &offset in &bot.offsets {
            file.seek(SeekFrom::Start(fragments_start + offset))
                .unwrap();
            let (tag, _len) = decode_item_header(&mut file).unwrap();
            assert_eq!(tag, ITEM);
        }
    }

    #[test]
    fn read_frame_extracts_the_requested_fragment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("read_frame.dcm");

        let mut fragments = Vec::new();
        fragments.extend_from_slice(&item_header(0));
        let frame_bytes: Vec<Vec<u8>> =
            vec![vec![0x11u8; 16], vec![0x22u8; 16], vec![0x33u8; 16]];
        for bytes in &frame_bytes {
            fragments.extend_from_slice(&item_header(bytes.len() as u32));
            fragments.extend_from_slice(bytes);
        }
        fragments.extend_from_slice(&sq_delim_header());

        write_encapsulated_file(&path, 3, &fragments);

        let source = FrameSource::open(&path).unwrap();
        let bot = source.build_bot().unwrap();

        for (i, expected) in frame_bytes.iter().enumerate() {
            let frame = source.read_frame((i + 1) as u32, &bot).unwrap();
            assert_eq!(&frame.value, expected);
            assert_eq!(frame.number, (i + 1) as u32);
            assert_eq!(frame.rows, 4);
            assert_eq!(frame.columns, 4);
        }
    }

    #[test]
    fn read_frame_rejects_a_zero_frame_number() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zero_index.dcm");

        let mut fragments = Vec::new();
        fragments.extend_from_slice(&item_header(0));
        fragments.extend_from_slice(&item_header(4));
        fragments.extend_from_slice(&[0u8; 4]);
        fragments.extend_from_slice(&sq_delim_header());

        write_encapsulated_file(&path, 1, &fragments);

        let source = FrameSource::open(&path).unwrap();
        let bot = source.build_bot().unwrap();

        let err = source.read_frame(0, &bot).unwrap_err();
        assert!(matches!(err, Error::BadFrameIndex { index: 0, .. }));
    }

    /// non-encapsulated (native) pixel data: seed scenario 6.
    #[test]
    fn build_bot_and_read_frame_for_native_pixel_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("native.dcm");

        let meta = FileMetaTableBuilder::new()
            .media_storage_sop_class_uid(uids::VL_WHOLE_SLIDE_MICROSCOPY_IMAGE_STORAGE)
            .media_storage_sop_instance_uid("2.25.2")
            .transfer_syntax(uids::IMPLICIT_VR_LITTLE_ENDIAN)
            .build()
            .unwrap();

        let frame0 = vec![0x01u8; 16];
        let frame1 = vec![0x02u8; 16];
        let mut pixel_data = frame0.clone();
        pixel_data.extend_from_slice(&frame1);

        let obj = InMemDicomObject::<dicom_dictionary_std::StandardDataDictionary>::from_element_iter([
            DataElement::new(tags::ROWS, VR::US, PrimitiveValue::from(4_u16)),
            DataElement::new(tags::COLUMNS, VR::US, PrimitiveValue::from(4_u16)),
            DataElement::new(
                tags::SAMPLES_PER_PIXEL,
                VR::US,
                PrimitiveValue::from(1_u16),
            ),
            DataElement::new(tags::BITS_ALLOCATED, VR::US, PrimitiveValue::from(8_u16)),
            DataElement::new(tags::BITS_STORED, VR::US, PrimitiveValue::from(8_u16)),
            DataElement::new(tags::HIGH_BIT, VR::US, PrimitiveValue::from(7_u16)),
            DataElement::new(
                tags::PIXEL_REPRESENTATION,
                VR::US,
                PrimitiveValue::from(0_u16),
            ),
            DataElement::new(
                tags::PHOTOMETRIC_INTERPRETATION,
                VR::CS,
                "MONOCHROME2",
            ),
            DataElement::new(tags::NUMBER_OF_FRAMES, VR::IS, "2"),
            DataElement::new(tags::PIXEL_DATA, VR::OB, PrimitiveValue::from(pixel_data)),
        ]);

        let mut encoded = Vec::new();
        encoded.extend_from_slice(&[0u8; 128]);
        encoded.extend_from_slice(b"DICM");
        meta.write(&mut encoded).unwrap();
        let ts = dicom_transfer_syntax_registry::TransferSyntaxRegistry
            .get(uids::IMPLICIT_VR_LITTLE_ENDIAN)
            .unwrap();
        obj.write_dataset_with_ts(&mut encoded, ts).unwrap();

        std::fs::write(&path, &encoded).unwrap();

        let source = FrameSource::open(&path).unwrap();
        assert!(!source.is_encapsulated());

        let bot = source.build_bot().unwrap();
        assert_eq!(bot.offsets, vec![0, 16]);

        let frame = source.read_frame(2, &bot).unwrap();
        assert_eq!(frame.value, frame1);
    }
}

/// Walk data element headers starting right after the file meta group,
/// stopping as soon as a pixel-data-family tag (or trailing padding) is
/// reached, returning its exact byte offset and VR.
fn locate_pixel_data(file: &mut File, implicit_vr: bool) -> Result<(u64, VR)> {
    loop {
        let position_before = file.stream_position().context(ReadFileSnafu)?;
        let (tag, vr, len, _n) = decode_header_at(file, implicit_vr)?;

        match tag {
            PIXEL_DATA | FLOAT_PIXEL_DATA | DOUBLE_PIXEL_DATA => {
                return Ok((position_before, vr));
            }
            TRAILING_PADDING => {
                return PixelDataNotFoundSnafu.fail();
            }
            EXTENDED_OFFSET_TABLE | EXTENDED_OFFSET_TABLE_LENGTHS => {
                // consumed as part of the main data set read in phase 1;
                // here it just needs to be skipped over.
                file.seek(SeekFrom::Current(len as i64))
                    .context(ReadFileSnafu)?;
            }
            _ => {
                file.seek(SeekFrom::Current(len as i64))
                    .context(ReadFileSnafu)?;
            }
        }
    }
}
