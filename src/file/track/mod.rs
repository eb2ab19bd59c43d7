#![doc = r#"
The track chunk and its stateful codec.

On disk a track is `MTrk`, a big-endian length, then delta-time/event
records, terminated by the End of Track meta event (`FF 2F 00`). In memory a
[`Track`] is just the ordered event list: the terminator is stripped on read
and re-synthesized on write, so it exists exactly once per chunk and user
code never has to think about it.

Decoding owns the running-status state for the chunk; each track starts
fresh.
"#]

mod write;
pub(crate) use write::traverse;

use alloc::vec::Vec;

use crate::error::WriteError;
use crate::events::TrackEvent;
use crate::reader::{ReadResult, Reader, ReaderError};
use crate::settings::{InvalidChunkSizePolicy, MissedEndOfTrackPolicy, ReadSettings, WriteSettings};
use crate::writer::Writer;
use crate::ChunkError;

/// An ordered sequence of track events.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Track<'a> {
    pub(crate) events: Vec<TrackEvent<'a>>,
}

impl<'a> Track<'a> {
    /// Create a track from an event list.
    pub const fn new(events: Vec<TrackEvent<'a>>) -> Self {
        Self { events }
    }

    /// The events, in order.
    pub fn events(&self) -> &[TrackEvent<'a>] {
        &self.events
    }

    /// The event list, mutably.
    pub fn events_mut(&mut self) -> &mut Vec<TrackEvent<'a>> {
        &mut self.events
    }

    /// Append an event.
    pub fn push(&mut self, event: TrackEvent<'a>) {
        self.events.push(event);
    }

    /// The number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if the track holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Clone any borrowed payloads into owned ones.
    pub fn into_owned(self) -> Track<'static> {
        Track {
            events: self
                .events
                .into_iter()
                .map(TrackEvent::into_owned)
                .collect(),
        }
    }

    /// Parse a complete `MTrk` chunk (identifier, length, content).
    pub fn from_bytes(bytes: &'a [u8], settings: &ReadSettings) -> ReadResult<Self> {
        let mut reader = Reader::from_byte_slice(bytes);
        let id_at = reader.buffer_position();
        let id = reader.read_array::<4>()?;
        if &id != b"MTrk" {
            return Err(ReaderError::parse(id_at, ChunkError::UnknownId(id)));
        }
        let declared = reader.read_u32()?;
        Self::read(&mut reader, declared, settings)
    }

    /// Decode a track's content, bounded by the chunk's declared size.
    ///
    /// `reader` is positioned just past the length field.
    pub(crate) fn read(
        reader: &mut Reader<'a>,
        declared: u32,
        settings: &ReadSettings,
    ) -> ReadResult<Self> {
        let start = reader.buffer_position();
        // Taking the whole body up front realigns the outer reader to the
        // declared boundary no matter how parsing goes.
        let body = reader.read_bytes(declared as usize)?;
        let mut content = Reader::with_offset(body, start);

        let mut running_status: Option<u8> = None;
        let mut events = Vec::new();
        let mut terminated = false;

        while !content.is_at_end() {
            let event = TrackEvent::read(&mut content, &mut running_status, settings)?;
            if event.event().is_end_of_track() {
                terminated = true;
                break;
            }
            events.push(event);
        }

        if !terminated && matches!(settings.missed_end_of_track, MissedEndOfTrackPolicy::Abort) {
            return Err(ReaderError::parse(
                content.buffer_position(),
                ChunkError::MissedEndOfTrack,
            ));
        }

        if terminated && !content.is_at_end() {
            let consumed = (content.buffer_position() - start) as u32;
            match settings.invalid_chunk_size {
                InvalidChunkSizePolicy::Abort => {
                    return Err(ReaderError::parse(
                        content.buffer_position(),
                        ChunkError::InvalidSize { declared, consumed },
                    ));
                }
                InvalidChunkSizePolicy::Ignore => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        declared,
                        consumed,
                        "track declared more bytes than its events span"
                    );
                }
            }
        }

        Ok(Self { events })
    }

    /// The byte length of the chunk content this track encodes to, without
    /// producing it.
    ///
    /// Always equals the length of the bytes [`Track::to_bytes`] puts after
    /// the length field, for every [`WriteSettings`].
    pub fn encoded_content_len(&self, settings: &WriteSettings) -> Result<usize, WriteError> {
        let mut len = 0usize;
        traverse(&self.events, &settings.compression, |event, write_status| {
            len += event.encoded_len(write_status);
            Ok(())
        })?;
        Ok(len)
    }

    /// Encode the complete `MTrk` chunk.
    pub fn to_bytes(&self, settings: &WriteSettings) -> Result<Vec<u8>, WriteError> {
        let mut writer = Writer::new();
        self.write_chunk(&mut writer, settings)?;
        Ok(writer.into_bytes())
    }

    /// Append the complete `MTrk` chunk to `writer`.
    ///
    /// The length prefix comes from the size pass, so the chunk is written
    /// in one forward sweep.
    pub(crate) fn write_chunk(
        &self,
        writer: &mut Writer,
        settings: &WriteSettings,
    ) -> Result<(), WriteError> {
        let content_len = self.encoded_content_len(settings)?;
        writer.write_bytes(b"MTrk");
        writer.write_u32(content_len.min(u32::MAX as usize) as u32);

        let before = writer.len();
        traverse(&self.events, &settings.compression, |event, write_status| {
            event.write(writer, write_status)
        })?;
        debug_assert_eq!(writer.len() - before, content_len);
        Ok(())
    }
}

impl<'a> FromIterator<TrackEvent<'a>> for Track<'a> {
    fn from_iter<T: IntoIterator<Item = TrackEvent<'a>>>(iter: T) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}
