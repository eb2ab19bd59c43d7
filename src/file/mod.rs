#![doc = r#"
The Standard MIDI File container.

A `.mid` file is a header chunk (`MThd`) followed by track chunks (`MTrk`)
and, occasionally, proprietary chunks under other identifiers. The header
names a format:

- format 0: one track carrying every channel,
- format 1: tracks played simultaneously,
- format 2: independent sequences.

[`MidiFile::parse`] reads with default [`ReadSettings`]; every structural
liberty a file can take is governed by a policy there.
"#]

mod header;
pub use header::*;

mod timing;
pub use timing::*;

mod track;
pub use track::*;

mod builder;
pub use builder::*;

use alloc::borrow::Cow;
use alloc::vec;
use alloc::vec::Vec;

use crate::error::WriteError;
use crate::reader::{ReadResult, Reader};
use crate::settings::{ReadSettings, WriteSettings};
use crate::writer::Writer;

/// The header's format word, resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormatType {
    /// Format 0
    SingleMultiChannel,
    /// Format 1
    Simultaneous,
    /// Format 2
    SequentiallyIndependent,
}

impl FormatType {
    /// The header word for this format.
    pub const fn word(&self) -> u16 {
        match self {
            Self::SingleMultiChannel => 0,
            Self::Simultaneous => 1,
            Self::SequentiallyIndependent => 2,
        }
    }

    /// Resolve a header word.
    pub const fn from_word(word: u16) -> Option<Self> {
        match word {
            0 => Some(Self::SingleMultiChannel),
            1 => Some(Self::Simultaneous),
            2 => Some(Self::SequentiallyIndependent),
            _ => None,
        }
    }
}

/// The parsed tracks, arranged per the file's format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Format<'a> {
    /// Format 0: the single track
    SingleMultiChannel(Track<'a>),
    /// Format 1: tracks sounding together
    Simultaneous(Vec<Track<'a>>),
    /// Format 2: independent sequences
    SequentiallyIndependent(Vec<Track<'a>>),
}

impl<'a> Format<'a> {
    /// The format type this arrangement belongs to.
    pub const fn format_type(&self) -> FormatType {
        match self {
            Format::SingleMultiChannel(_) => FormatType::SingleMultiChannel,
            Format::Simultaneous(_) => FormatType::Simultaneous,
            Format::SequentiallyIndependent(_) => FormatType::SequentiallyIndependent,
        }
    }
}

/// A chunk kept verbatim: its four-byte identifier and payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownChunk<'a> {
    id: [u8; 4],
    data: Cow<'a, [u8]>,
}

impl<'a> UnknownChunk<'a> {
    /// Create a chunk from an identifier and payload.
    pub fn new(id: [u8; 4], data: impl Into<Cow<'a, [u8]>>) -> Self {
        Self {
            id,
            data: data.into(),
        }
    }

    /// The four-byte identifier.
    pub const fn id(&self) -> [u8; 4] {
        self.id
    }

    /// The payload bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

#[doc = r#"
A parsed (or assembled) MIDI file.

# Example

```rust
use midion::prelude::*;

let bytes: &[u8] = &[
    0x4D, 0x54, 0x68, 0x64, // MThd
    0x00, 0x00, 0x00, 0x06, // length 6
    0x00, 0x00, // format 0
    0x00, 0x01, // one track
    0x00, 0x60, // 96 ticks per quarter note
    0x4D, 0x54, 0x72, 0x6B, // MTrk
    0x00, 0x00, 0x00, 0x0C, // length 12
    0x00, 0x90, 0x3C, 0x40, // NoteOn C4
    0x60, 0x80, 0x3C, 0x00, // NoteOff C4 after 96 ticks
    0x00, 0xFF, 0x2F, 0x00, // End of Track
];

let file = MidiFile::parse(bytes).unwrap();
assert_eq!(file.format_type(), FormatType::SingleMultiChannel);
assert_eq!(file.tracks()[0].len(), 2);
```
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiFile<'a> {
    timing: Timing,
    format: Format<'a>,
    unknown_chunks: Vec<UnknownChunk<'a>>,
}

impl<'a> MidiFile<'a> {
    /// Assemble a file from parts.
    pub const fn new(timing: Timing, format: Format<'a>) -> Self {
        Self {
            timing,
            format,
            unknown_chunks: Vec::new(),
        }
    }

    /// Parse a byte buffer with default settings.
    pub fn parse(bytes: &'a [u8]) -> ReadResult<Self> {
        Self::parse_with(bytes, &ReadSettings::default())
    }

    /// Parse a byte buffer.
    pub fn parse_with(bytes: &'a [u8], settings: &ReadSettings) -> ReadResult<Self> {
        let mut reader = Reader::from_byte_slice(bytes);
        let mut builder = MidiFileBuilder::new(settings);
        while !reader.is_at_end() {
            builder.handle_next(&mut reader)?;
        }
        builder.build(reader.buffer_position())
    }

    /// The header's division.
    pub const fn timing(&self) -> Timing {
        self.timing
    }

    /// The tracks, arranged per format.
    pub const fn format(&self) -> &Format<'a> {
        &self.format
    }

    /// The format type.
    pub const fn format_type(&self) -> FormatType {
        self.format.format_type()
    }

    /// The tracks, in file order.
    pub fn tracks(&self) -> Vec<&Track<'a>> {
        match &self.format {
            Format::SingleMultiChannel(track) => vec![track],
            Format::Simultaneous(tracks) | Format::SequentiallyIndependent(tracks) => {
                tracks.iter().collect()
            }
        }
    }

    /// The tracks, mutably.
    pub fn tracks_mut(&mut self) -> Vec<&mut Track<'a>> {
        match &mut self.format {
            Format::SingleMultiChannel(track) => vec![track],
            Format::Simultaneous(tracks) | Format::SequentiallyIndependent(tracks) => {
                tracks.iter_mut().collect()
            }
        }
    }

    /// Chunks retained under identifiers this crate does not decode.
    pub fn unknown_chunks(&self) -> &[UnknownChunk<'a>] {
        &self.unknown_chunks
    }

    pub(crate) fn with_unknown_chunks(mut self, unknown_chunks: Vec<UnknownChunk<'a>>) -> Self {
        self.unknown_chunks = unknown_chunks;
        self
    }

    /// Encode the file: header, track chunks, then any retained unknown
    /// chunks.
    pub fn write(&self, settings: &WriteSettings) -> Result<Vec<u8>, WriteError> {
        let tracks = self.tracks();

        let mut writer = Writer::new();
        writer.write_bytes(b"MThd");
        writer.write_u32(6);
        writer.write_u16(self.format_type().word());
        writer.write_u16(tracks.len().min(u16::MAX as usize) as u16);
        writer.write_bytes(&self.timing.to_bytes());

        for track in tracks {
            track.write_chunk(&mut writer, settings)?;
        }
        for chunk in &self.unknown_chunks {
            writer.write_bytes(&chunk.id);
            writer.write_u32(chunk.data.len().min(u32::MAX as usize) as u32);
            writer.write_bytes(&chunk.data);
        }
        Ok(writer.into_bytes())
    }
}
