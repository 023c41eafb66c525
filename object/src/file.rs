//! Options governing how the 128-byte Part 10 preamble is handled, and
//! thin free functions mirroring [`FileDicomObject`](crate::FileDicomObject)'s
//! own `open_file`/`from_reader` constructors.
use crate::mem::InMemDicomObject;
use crate::{DefaultDicomObject, FileDicomObject, ReadError};
use dicom_core::Tag;
use dicom_dictionary_std::StandardDataDictionary;
use dicom_encoding::transfer_syntax::TransferSyntaxIndex;
use dicom_transfer_syntax_registry::TransferSyntaxRegistry;
use std::io::Read;
use std::path::Path;

/// How a source's 128-byte preamble should be treated before the `DICM`
/// magic code and File Meta Information are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadPreamble {
    /// Peek at the source to decide whether a preamble is present.
    #[default]
    Auto,
    /// Assume a preamble is always present and skip it unconditionally.
    Always,
    /// Assume there is no preamble.
    Never,
}

/// Create a DICOM object by reading from a file, using the default
/// reading options.
///
/// See [`OpenFileOptions`] for more control over how the file is read.
pub fn from_reader<F>(file: F) -> Result<DefaultDicomObject, ReadError>
where
    F: Read,
{
    DefaultDicomObject::from_reader(file)
}

/// Open and read a DICOM file from the file system, using the default
/// reading options.
///
/// See [`OpenFileOptions`] for more control over how the file is read.
pub fn open_file<P>(path: P) -> Result<DefaultDicomObject, ReadError>
where
    P: AsRef<Path>,
{
    DefaultDicomObject::open_file(path)
}

/// A builder for reading a DICOM file with finer control than
/// [`open_file`] or [`from_reader`] provide, such as stopping the read
/// early or overriding how the preamble is detected.
///
/// ```no_run
/// use dicom_object::OpenFileOptions;
///
/// # fn foo() -> Result<(), dicom_object::ReadError> {
/// let obj = OpenFileOptions::new()
///     .read_until(dicom_dictionary_std::tags::PIXEL_DATA)
///     .open_file("0002.dcm")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct OpenFileOptions<R = TransferSyntaxRegistry> {
    read_until: Option<Tag>,
    read_preamble: ReadPreamble,
    ts_index: R,
}

impl OpenFileOptions<TransferSyntaxRegistry> {
    /// Construct a new set of options, initially equivalent to
    /// [`open_file`]/[`from_reader`].
    pub fn new() -> Self {
        OpenFileOptions {
            read_until: None,
            read_preamble: ReadPreamble::Auto,
            ts_index: TransferSyntaxRegistry,
        }
    }
}

impl<R> OpenFileOptions<R>
where
    R: TransferSyntaxIndex,
{
    /// Stop reading the data set as soon as a data element tagged `tag`,
    /// or a tag that sorts after it, is reached. The returned object will
    /// not contain that element or any of the ones following it.
    ///
    /// This is most useful for skipping over a large Pixel Data element
    /// and the elements that may follow it.
    pub fn read_until(mut self, tag: Tag) -> Self {
        self.read_until = Some(tag);
        self
    }

    /// Set how the 128-byte preamble should be detected.
    pub fn read_preamble(mut self, read_preamble: ReadPreamble) -> Self {
        self.read_preamble = read_preamble;
        self
    }

    /// Use a different transfer syntax index than the built-in registry.
    pub fn transfer_syntax_index<R2>(self, ts_index: R2) -> OpenFileOptions<R2>
    where
        R2: TransferSyntaxIndex,
    {
        OpenFileOptions {
            read_until: self.read_until,
            read_preamble: self.read_preamble,
            ts_index,
        }
    }

    /// Open and read a DICOM file from the file system with these options.
    pub fn open_file<P>(self, path: P) -> Result<DefaultDicomObject, ReadError>
    where
        P: AsRef<Path>,
    {
        FileDicomObject::<InMemDicomObject<StandardDataDictionary>>::open_file_with_all_options(
            path,
            StandardDataDictionary,
            self.ts_index,
            self.read_until,
            self.read_preamble,
        )
    }

    /// Create a DICOM object by reading from a byte source with these options.
    pub fn from_reader<S>(self, src: S) -> Result<DefaultDicomObject, ReadError>
    where
        S: Read,
    {
        FileDicomObject::<InMemDicomObject<StandardDataDictionary>>::from_reader_with_all_options(
            src,
            StandardDataDictionary,
            self.ts_index,
            self.read_until,
            self.read_preamble,
        )
    }
}
