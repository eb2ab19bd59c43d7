#![doc = r#"
Everything that can go wrong while parsing or writing MIDI data.

Errors are layered: the [`Reader`](crate::reader::Reader) reports a positioned
[`ReaderError`](crate::reader::ReaderError) whose kind is either an
out-of-bounds read or one of the [`ParseError`] variants below.
"#]

use thiserror::Error;

/// Any structural error found while interpreting MIDI bytes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A variable-length quantity was malformed
    #[error("Variable-length quantity: {0}")]
    Vlq(#[from] VlqError),
    /// An event could not be decoded
    #[error("Event: {0}")]
    Event(#[from] EventError),
    /// A chunk could not be decoded
    #[error("Chunk: {0}")]
    Chunk(#[from] ChunkError),
    /// The header chunk could not be decoded
    #[error("Header: {0}")]
    Header(#[from] HeaderError),
    /// The file as a whole is inconsistent
    #[error("File: {0}")]
    File(#[from] FileError),
    /// An SMPTE offset payload was out of range
    #[error("Smpte: {0}")]
    Smpte(#[from] SmpteError),
    /// A data byte had its leading bit set
    #[error("Expected a data byte (leading bit clear), got {0:#04X}")]
    InvalidDataByte(u8),
}

/// A malformed variable-length quantity.
///
/// Delta times and payload lengths are encoded in one to four bytes of seven
/// bits each, most significant first, with the top bit flagging continuation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VlqError {
    /// A fifth byte still had its continuation bit set
    #[error("More than four bytes in sequence")]
    Overflow,
    /// The input ended while a continuation bit was pending
    #[error("Input ended mid-sequence")]
    Truncated,
    /// A value above `0x0FFF_FFFF` cannot be encoded
    #[error("Value {0:#X} does not fit in four bytes")]
    TooLarge(u32),
}

/// A malformed event within a track chunk.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    /// The status byte is not defined for Standard MIDI Files
    #[error("Forbidden status byte {0:#04X}")]
    InvalidStatus(u8),
    /// The first event of a stream began with a data byte
    #[error("Data byte with no running status established")]
    UnexpectedRunningStatus,
    /// A meta event declared a type byte with the leading bit set
    #[error("Meta type byte {0:#04X} out of range")]
    InvalidMetaType(u8),
    /// A meta payload did not have the length its type requires
    #[error("Meta {kind:#04X}: expected {expected} payload byte(s), got {actual}")]
    InvalidMetaLength {
        /// The meta type byte
        kind: u8,
        /// The length the type requires
        expected: usize,
        /// The length declared on the wire
        actual: usize,
    },
    /// A key signature outside -7..=7 sharps/flats or an unknown scale byte
    #[error("Key signature out of range (key {key}, scale {scale})")]
    InvalidKeySignature {
        /// Sharps (positive) or flats (negative)
        key: i8,
        /// 0 = major, 1 = minor
        scale: u8,
    },
}

/// A malformed chunk.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ChunkError {
    /// The declared size was consumed without an End of Track event
    #[error("Track data ended without an End of Track event")]
    MissedEndOfTrack,
    /// Parsing consumed a different number of bytes than the chunk declared
    #[error("Chunk declared {declared} byte(s) but parsing consumed {consumed}")]
    InvalidSize {
        /// Byte count from the chunk header
        declared: u32,
        /// Byte count actually consumed
        consumed: u32,
    },
    /// A chunk identifier no decoder claims
    #[error("Unknown chunk identifier {0:?}")]
    UnknownId([u8; 4]),
    /// A second `MThd` chunk
    #[error("More than one header chunk")]
    DuplicateHeader,
}

/// A malformed header chunk.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HeaderError {
    /// The file did not begin with an `MThd` chunk
    #[error("File does not begin with an MThd chunk")]
    Missing,
    /// The header declared fewer than six bytes
    #[error("Header declared {0} byte(s); at least six are required")]
    InvalidLength(u32),
    /// The division word used the SMPTE marker with an undefined frame rate
    #[error("Undefined SMPTE frame rate byte {0}")]
    InvalidSmpteDivision(i8),
}

/// An inconsistency at the file level.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FileError {
    /// The header's format word is not 0, 1 or 2
    #[error("Unknown file format {0}")]
    UnknownFormat(u16),
    /// The declared track count disagrees with the tracks encountered
    #[error("Header declared {declared} track(s), encountered {actual}")]
    UnexpectedTrackCount {
        /// Count from the header chunk
        declared: u16,
        /// Count of track chunks encountered
        actual: u16,
    },
}

/// An out-of-range SMPTE offset payload.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SmpteError {
    /// The payload was not exactly five bytes
    #[error("Expected five bytes, got {0}")]
    Length(usize),
    /// The frame-rate code had its (reserved) high bit set
    #[error("Frame-rate code {0} out of range")]
    FrameRate(u8),
    /// Hours above 23
    #[error("Hour {0} out of range")]
    Hour(u8),
    /// Minutes above 59
    #[error("Minute {0} out of range")]
    Minute(u8),
    /// Seconds above 59
    #[error("Second {0} out of range")]
    Second(u8),
    /// Fractional frames above 99
    #[error("Subframe {0} out of range")]
    Subframe(u8),
}

/// A failure while encoding events to bytes.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum WriteError {
    /// A delta time or payload length does not fit in a VLQ
    #[error("Variable-length quantity: {0}")]
    Vlq(#[from] VlqError),
}
