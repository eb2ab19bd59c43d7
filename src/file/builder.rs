use alloc::borrow::Cow;
use alloc::vec::Vec;

use crate::file::{Format, FormatType, MidiFile, RawHeaderChunk, Track, UnknownChunk};
use crate::reader::{ReadResult, Reader, ReaderError};
use crate::settings::{
    ExtraTrackChunkPolicy, ReadSettings, UnexpectedTrackChunksCountPolicy, UnknownChunkIdPolicy,
};
use crate::{ChunkError, FileError, HeaderError};

#[doc = r#"
Builds a [`MidiFile`] one chunk at a time, applying the reading policies.

The builder eats chunks straight off a [`Reader`]; once the source is
exhausted, [`MidiFileBuilder::build`] checks the file-level invariants (a
header was present, the track count agrees if the policy cares) and
arranges the tracks per the header's format.
"#]
#[derive(Debug)]
pub struct MidiFileBuilder<'a, 's> {
    settings: &'s ReadSettings,
    header: Option<RawHeaderChunk>,
    tracks: Vec<Track<'a>>,
    unknown_chunks: Vec<UnknownChunk<'a>>,
    encountered_tracks: u16,
}

impl<'a, 's> MidiFileBuilder<'a, 's> {
    /// Create a builder reading under `settings`.
    pub const fn new(settings: &'s ReadSettings) -> Self {
        Self {
            settings,
            header: None,
            tracks: Vec::new(),
            unknown_chunks: Vec::new(),
            encountered_tracks: 0,
        }
    }

    /// Consume the next chunk from `reader`.
    pub fn handle_next(&mut self, reader: &mut Reader<'a>) -> ReadResult<()> {
        let id_at = reader.buffer_position();
        let id = reader.read_array::<4>()?;
        let length = reader.read_u32()?;

        if self.header.is_none() && &id != b"MThd" {
            return Err(ReaderError::parse(id_at, HeaderError::Missing));
        }

        match &id {
            b"MThd" => {
                if self.header.is_some() {
                    return Err(ReaderError::parse(id_at, ChunkError::DuplicateHeader));
                }
                self.header = Some(RawHeaderChunk::read(reader, length, self.settings)?);
            }
            b"MTrk" => {
                self.encountered_tracks = self.encountered_tracks.saturating_add(1);
                let declared = self
                    .header
                    .as_ref()
                    .map(RawHeaderChunk::num_tracks)
                    .unwrap_or(0);

                let is_extra = self.encountered_tracks > declared;
                if is_extra && matches!(self.settings.extra_track_chunk, ExtraTrackChunkPolicy::Skip)
                {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        declared,
                        "skipping a track chunk beyond the declared count"
                    );
                    reader.skip(length as usize)?;
                } else {
                    self.tracks.push(Track::read(reader, length, self.settings)?);
                }
            }
            _ => self.handle_foreign(reader, id, length, id_at)?,
        }
        Ok(())
    }

    fn handle_foreign(
        &mut self,
        reader: &mut Reader<'a>,
        id: [u8; 4],
        length: u32,
        id_at: usize,
    ) -> ReadResult<()> {
        if let Some(decode) = self.settings.registry.chunk_decoder(id) {
            let data_at = reader.buffer_position();
            let data = reader.read_bytes(length as usize)?;
            let chunk = decode(id, data).map_err(|e| ReaderError::parse(data_at, e))?;
            self.unknown_chunks.push(chunk);
            return Ok(());
        }

        match self.settings.unknown_chunk_id {
            UnknownChunkIdPolicy::ReadAsUnknownChunk => {
                let data = reader.read_bytes(length as usize)?;
                self.unknown_chunks
                    .push(UnknownChunk::new(id, Cow::Borrowed(data)));
            }
            UnknownChunkIdPolicy::Skip => {
                #[cfg(feature = "tracing")]
                tracing::warn!(?id, "skipping a chunk with an unrecognized identifier");
                reader.skip(length as usize)?;
            }
            UnknownChunkIdPolicy::Abort => {
                return Err(ReaderError::parse(id_at, ChunkError::UnknownId(id)));
            }
        }
        Ok(())
    }

    /// Check the file-level invariants and assemble the file.
    ///
    /// `position` stamps any error with where the source ended.
    pub fn build(self, position: usize) -> ReadResult<MidiFile<'a>> {
        let Some(header) = self.header else {
            return Err(ReaderError::parse(position, HeaderError::Missing));
        };

        let declared = header.num_tracks();
        if self.encountered_tracks != declared {
            match self.settings.unexpected_track_chunks_count {
                UnexpectedTrackChunksCountPolicy::Abort => {
                    return Err(ReaderError::parse(
                        position,
                        FileError::UnexpectedTrackCount {
                            declared,
                            actual: self.encountered_tracks,
                        },
                    ));
                }
                UnexpectedTrackChunksCountPolicy::Ignore => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        declared,
                        actual = self.encountered_tracks,
                        "track count disagrees with the header"
                    );
                }
            }
        }

        let mut tracks = self.tracks;
        // An unnamed format only survives reading under the lenient policy;
        // arrange it like format 1. Same for a format 0 whose track count
        // the policies let disagree.
        let format = match header.format_type() {
            Some(FormatType::SingleMultiChannel) if tracks.len() == 1 => {
                let track = tracks.pop().unwrap_or_default();
                Format::SingleMultiChannel(track)
            }
            Some(FormatType::SequentiallyIndependent) => Format::SequentiallyIndependent(tracks),
            _ => Format::Simultaneous(tracks),
        };

        Ok(MidiFile::new(header.timing(), format).with_unknown_chunks(self.unknown_chunks))
    }
}
