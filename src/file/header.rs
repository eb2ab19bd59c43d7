use crate::file::{FormatType, Timing};
use crate::reader::{ReadResult, Reader, ReaderError};
use crate::settings::{ReadSettings, UnknownFileFormatPolicy};
use crate::{FileError, HeaderError};

#[doc = r#"
The decoded `MThd` chunk: format word, declared track count and division.

A header is always six bytes of content. Longer headers (the length field
permits them) have their surplus skipped, since the meaning of the first six
bytes is fixed; shorter ones are malformed.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawHeaderChunk {
    format: u16,
    num_tracks: u16,
    timing: Timing,
}

impl RawHeaderChunk {
    /// Describe a file to be written.
    pub const fn new(format: FormatType, num_tracks: u16, timing: Timing) -> Self {
        Self {
            format: format.word(),
            num_tracks,
            timing,
        }
    }

    /// Decode the header chunk's content (the bytes after `MThd` and the
    /// length field).
    ///
    /// The caller has already checked the identifier and read `length`.
    pub(crate) fn read(
        reader: &mut Reader<'_>,
        length: u32,
        settings: &ReadSettings,
    ) -> ReadResult<Self> {
        let at = reader.buffer_position();
        if length < 6 {
            return Err(ReaderError::parse(at, HeaderError::InvalidLength(length)));
        }

        let format = reader.read_u16()?;
        let num_tracks = reader.read_u16()?;
        let division = reader.read_array::<2>()?;
        let timing = Timing::from_bytes(division).map_err(|e| ReaderError::parse(at + 4, e))?;

        if FormatType::from_word(format).is_none()
            && matches!(
                settings.unknown_file_format,
                UnknownFileFormatPolicy::Abort
            )
        {
            return Err(ReaderError::parse(at, FileError::UnknownFormat(format)));
        }

        // Tolerate headers that declare more than the six defined bytes.
        reader.skip(length as usize - 6)?;

        Ok(Self {
            format,
            num_tracks,
            timing,
        })
    }

    /// The raw format word.
    pub const fn format_word(&self) -> u16 {
        self.format
    }

    /// The format, if the word names one.
    ///
    /// `None` only survives reading under
    /// [`UnknownFileFormatPolicy::Ignore`], which treats the file as
    /// format 1.
    pub const fn format_type(&self) -> Option<FormatType> {
        FormatType::from_word(self.format)
    }

    /// The declared track count.
    pub const fn num_tracks(&self) -> u16 {
        self.num_tracks
    }

    /// The division.
    pub const fn timing(&self) -> Timing {
        self.timing
    }
}
