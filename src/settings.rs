#![doc = r#"
Reading and writing configuration.

Every structural surprise a `.mid` file can spring has a policy here: either
abort with the matching error, or recover in a well-defined way. Defaults are
lenient for surprises that real files exhibit routinely (extra chunks, wrong
track counts) and strict for outright corruption (truncated tracks,
disagreeing chunk sizes).
"#]

use crate::events::EventRegistry;

/// What to do when the header's declared track count disagrees with the
/// number of track chunks actually encountered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnexpectedTrackChunksCountPolicy {
    /// Accept the file with the tracks found
    #[default]
    Ignore,
    /// Fail with [`FileError::UnexpectedTrackCount`](crate::FileError::UnexpectedTrackCount)
    Abort,
}

/// What to do with track chunks beyond the declared count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExtraTrackChunkPolicy {
    /// Parse and keep them
    #[default]
    Read,
    /// Skip their bytes
    Skip,
}

/// What to do with a chunk whose identifier no decoder claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnknownChunkIdPolicy {
    /// Keep identifier and payload as an [`UnknownChunk`](crate::file::UnknownChunk)
    #[default]
    ReadAsUnknownChunk,
    /// Skip the chunk's bytes
    Skip,
    /// Fail with [`ChunkError::UnknownId`](crate::ChunkError::UnknownId)
    Abort,
}

/// What to do when a track's bytes run out without an End of Track event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MissedEndOfTrackPolicy {
    /// Accept the events read so far
    Ignore,
    /// Fail with [`ChunkError::MissedEndOfTrack`](crate::ChunkError::MissedEndOfTrack)
    #[default]
    Abort,
}

/// How to surface a Note On with velocity zero.
///
/// On the wire a silent Note On conventionally *ends* a note, because it lets
/// a writer hold one running status for an entire stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SilentNoteOnPolicy {
    /// Keep the event exactly as stored
    NoteOn,
    /// Rewrite it to a Note Off with release velocity zero
    #[default]
    NoteOff,
}

/// What to do when a chunk's declared size disagrees with the bytes its
/// content actually consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvalidChunkSizePolicy {
    /// Trust the content and realign to the declared boundary
    Ignore,
    /// Fail with [`ChunkError::InvalidSize`](crate::ChunkError::InvalidSize)
    #[default]
    Abort,
}

/// What to do when the header's format word is not 0, 1 or 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnknownFileFormatPolicy {
    /// Read the file as if it were format 1
    Ignore,
    /// Fail with [`FileError::UnknownFormat`](crate::FileError::UnknownFormat)
    #[default]
    Abort,
}

/// Everything that can be configured about reading.
///
/// `ReadSettings::default()` reads well-formed files and the common run of
/// slightly sloppy ones; see each policy for the knob it turns.
#[derive(Debug, Clone, Default)]
pub struct ReadSettings {
    /// Declared vs. encountered track count disagreement.
    pub unexpected_track_chunks_count: UnexpectedTrackChunksCountPolicy,
    /// Track chunks beyond the declared count.
    pub extra_track_chunk: ExtraTrackChunkPolicy,
    /// Chunks with unrecognized identifiers.
    pub unknown_chunk_id: UnknownChunkIdPolicy,
    /// Tracks without a terminating End of Track.
    pub missed_end_of_track: MissedEndOfTrackPolicy,
    /// Note On events with velocity zero.
    pub silent_note_on: SilentNoteOnPolicy,
    /// Declared vs. consumed chunk size disagreement.
    pub invalid_chunk_size: InvalidChunkSizePolicy,
    /// Format words other than 0, 1 and 2.
    pub unknown_file_format: UnknownFileFormatPolicy,
    /// User-registered meta-event and chunk decoders.
    pub registry: EventRegistry,
}

/// The independent flags of the write-time compression pass.
///
/// `CompressionPolicy::default()` leaves every flag off, which makes writing
/// the identity transform a byte-exact round-trip relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompressionPolicy {
    /// Omit repeated status bytes of consecutive channel events.
    pub use_running_status: bool,
    /// Write Note Offs as silent Note Ons so running status can catch them.
    pub note_off_as_silent_note_on: bool,
    /// Drop meta events no decoder recognized.
    pub delete_unknown_meta_events: bool,
    /// Drop leading Set Tempo events that state the 120 BPM default.
    pub delete_default_set_tempo: bool,
    /// Drop leading Key Signature events that state C major.
    pub delete_default_key_signature: bool,
    /// Drop leading Time Signature events that state 4/4.
    pub delete_default_time_signature: bool,
}

/// Everything that can be configured about writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WriteSettings {
    /// The compression flags applied by the encode traversal.
    pub compression: CompressionPolicy,
}
