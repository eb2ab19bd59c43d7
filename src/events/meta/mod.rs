#![doc = r#"
Meta events: the non-audible `FF`-prefixed events a track interleaves with
its channel traffic.

On the wire every meta event is `FF <type> <vlq length> <payload>`. Types
this crate does not recognize decode to [`MetaMessage::Unknown`], which
keeps the raw type byte and payload so the event survives a round trip
(unless [`delete_unknown_meta_events`](crate::settings::CompressionPolicy::delete_unknown_meta_events)
drops it on write).
"#]

mod tempo;
pub use tempo::*;

mod time_signature;
pub use time_signature::*;

mod key_signature;
pub use key_signature::*;

mod smpte_offset;
pub use smpte_offset::*;

use alloc::borrow::Cow;

use crate::events::EventRegistry;
use crate::reader::{ReadResult, Reader, ReaderError};
use crate::writer::Writer;
use crate::{Channel, DataByte, EventError, vlq};

/// Meta type bytes.
mod kind {
    pub const SEQUENCE_NUMBER: u8 = 0x00;
    pub const TEXT: u8 = 0x01;
    pub const COPYRIGHT: u8 = 0x02;
    pub const TRACK_NAME: u8 = 0x03;
    pub const INSTRUMENT_NAME: u8 = 0x04;
    pub const LYRIC: u8 = 0x05;
    pub const MARKER: u8 = 0x06;
    pub const CUE_POINT: u8 = 0x07;
    pub const CHANNEL_PREFIX: u8 = 0x20;
    pub const PORT_PREFIX: u8 = 0x21;
    pub const END_OF_TRACK: u8 = 0x2F;
    pub const SET_TEMPO: u8 = 0x51;
    pub const SMPTE_OFFSET: u8 = 0x54;
    pub const TIME_SIGNATURE: u8 = 0x58;
    pub const KEY_SIGNATURE: u8 = 0x59;
    pub const SEQUENCER_SPECIFIC: u8 = 0x7F;
}

/// True for type bytes this crate decodes itself.
pub(crate) const fn is_standard_meta_type(byte: u8) -> bool {
    use kind::*;
    matches!(
        byte,
        SEQUENCE_NUMBER
            | TEXT
            | COPYRIGHT
            | TRACK_NAME
            | INSTRUMENT_NAME
            | LYRIC
            | MARKER
            | CUE_POINT
            | CHANNEL_PREFIX
            | PORT_PREFIX
            | END_OF_TRACK
            | SET_TEMPO
            | SMPTE_OFFSET
            | TIME_SIGNATURE
            | KEY_SIGNATURE
            | SEQUENCER_SPECIFIC
    )
}

#[doc = r#"
The set of meta events.

Text-ish payloads are byte strings, not `str`: files in the wild carry every
encoding under the sun, and the codec's job is to hand them back untouched.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaMessage<'a> {
    /// `FF 00`: the sequence's number; an empty payload means "use the
    /// position in the file"
    SequenceNumber(Option<u16>),
    /// `FF 01`: free text
    Text(Cow<'a, [u8]>),
    /// `FF 02`: copyright notice
    Copyright(Cow<'a, [u8]>),
    /// `FF 03`: the track's name
    TrackName(Cow<'a, [u8]>),
    /// `FF 04`: the instrument's name
    InstrumentName(Cow<'a, [u8]>),
    /// `FF 05`: a lyric syllable
    Lyric(Cow<'a, [u8]>),
    /// `FF 06`: a rehearsal or section marker
    Marker(Cow<'a, [u8]>),
    /// `FF 07`: a cue description
    CuePoint(Cow<'a, [u8]>),
    /// `FF 20`: the channel subsequent meta events refer to
    ChannelPrefix(Channel),
    /// `FF 21`: the output port subsequent events refer to
    PortPrefix(DataByte),
    /// `FF 2F`: terminates a track chunk; never stored in an in-memory
    /// track, always written exactly once at the end
    EndOfTrack,
    /// `FF 51`: microseconds per quarter note
    Tempo(Tempo),
    /// `FF 54`: the track's starting timecode
    SmpteOffset(SmpteOffset),
    /// `FF 58`: time signature and metronome configuration
    TimeSignature(TimeSignature),
    /// `FF 59`: sharps/flats and scale
    KeySignature(KeySignature),
    /// `FF 7F`: manufacturer-specific payload
    SequencerSpecific(Cow<'a, [u8]>),
    /// Any type byte without a decoder; kept raw
    Unknown {
        /// The type byte
        kind: u8,
        /// The payload, verbatim
        data: Cow<'a, [u8]>,
    },
}

impl<'a> MetaMessage<'a> {
    /// The type byte this message serializes under.
    pub const fn kind(&self) -> u8 {
        use MetaMessage::*;
        match self {
            SequenceNumber(_) => kind::SEQUENCE_NUMBER,
            Text(_) => kind::TEXT,
            Copyright(_) => kind::COPYRIGHT,
            TrackName(_) => kind::TRACK_NAME,
            InstrumentName(_) => kind::INSTRUMENT_NAME,
            Lyric(_) => kind::LYRIC,
            Marker(_) => kind::MARKER,
            CuePoint(_) => kind::CUE_POINT,
            ChannelPrefix(_) => kind::CHANNEL_PREFIX,
            PortPrefix(_) => kind::PORT_PREFIX,
            EndOfTrack => kind::END_OF_TRACK,
            Tempo(_) => kind::SET_TEMPO,
            SmpteOffset(_) => kind::SMPTE_OFFSET,
            TimeSignature(_) => kind::TIME_SIGNATURE,
            KeySignature(_) => kind::KEY_SIGNATURE,
            SequencerSpecific(_) => kind::SEQUENCER_SPECIFIC,
            Unknown { kind, .. } => *kind,
        }
    }

    /// Decode the bytes following an `FF` status byte.
    pub(crate) fn read(reader: &mut Reader<'a>, registry: &EventRegistry) -> ReadResult<Self> {
        let kind_at = reader.buffer_position();
        let kind = reader.read_byte()?;
        if kind > 0x7F {
            return Err(ReaderError::parse(kind_at, EventError::InvalidMetaType(kind)));
        }

        let len = reader.read_vlq()? as usize;
        let data_at = reader.buffer_position();
        let data = reader.read_bytes(len)?;
        let err = |e: EventError| ReaderError::parse(data_at, e);

        use MetaMessage::*;
        Ok(match kind {
            kind::SEQUENCE_NUMBER => match data.len() {
                0 => SequenceNumber(None),
                2 => SequenceNumber(Some(u16::from_be_bytes([data[0], data[1]]))),
                actual => {
                    return Err(err(EventError::InvalidMetaLength {
                        kind,
                        expected: 2,
                        actual,
                    }));
                }
            },
            kind::TEXT => Text(Cow::Borrowed(data)),
            kind::COPYRIGHT => Copyright(Cow::Borrowed(data)),
            kind::TRACK_NAME => TrackName(Cow::Borrowed(data)),
            kind::INSTRUMENT_NAME => InstrumentName(Cow::Borrowed(data)),
            kind::LYRIC => Lyric(Cow::Borrowed(data)),
            kind::MARKER => Marker(Cow::Borrowed(data)),
            kind::CUE_POINT => CuePoint(Cow::Borrowed(data)),
            kind::CHANNEL_PREFIX => {
                let [byte] = expect_payload::<1>(kind, data).map_err(err)?;
                ChannelPrefix(Channel::from_bits(byte))
            }
            kind::PORT_PREFIX => {
                let [byte] = expect_payload::<1>(kind, data).map_err(err)?;
                PortPrefix(DataByte::new(byte).map_err(|e| ReaderError::parse(data_at, e))?)
            }
            kind::END_OF_TRACK => {
                expect_payload::<0>(kind, data).map_err(err)?;
                EndOfTrack
            }
            kind::SET_TEMPO => {
                let bytes = expect_payload::<3>(kind, data).map_err(err)?;
                Tempo(self::Tempo::from_bytes(bytes))
            }
            kind::SMPTE_OFFSET => {
                let offset = self::SmpteOffset::parse(data)
                    .map_err(|e| ReaderError::parse(data_at, e))?;
                SmpteOffset(offset)
            }
            kind::TIME_SIGNATURE => {
                let bytes = expect_payload::<4>(kind, data).map_err(err)?;
                TimeSignature(self::TimeSignature::from_bytes(bytes))
            }
            kind::KEY_SIGNATURE => {
                let bytes = expect_payload::<2>(kind, data).map_err(err)?;
                KeySignature(self::KeySignature::from_bytes(bytes).map_err(err)?)
            }
            kind::SEQUENCER_SPECIFIC => SequencerSpecific(Cow::Borrowed(data)),
            other => match registry.meta_decoder(other) {
                Some(decode) => decode(other, data).map_err(err)?,
                None => Unknown {
                    kind: other,
                    data: Cow::Borrowed(data),
                },
            },
        })
    }

    /// Append `FF <type> <vlq length> <payload>`.
    pub(crate) fn write(&self, writer: &mut Writer) -> Result<(), crate::error::WriteError> {
        writer.write_byte(0xFF);
        writer.write_byte(self.kind());
        self.with_payload(|payload| {
            writer.write_vlq(payload.len() as u32)?;
            writer.write_bytes(payload);
            Ok(())
        })
    }

    /// `FF` + type byte + length quantity + payload.
    pub(crate) fn encoded_len(&self) -> usize {
        let payload_len = self.payload_len();
        2 + vlq::encoded_len(payload_len.min(vlq::MAX as usize) as u32) + payload_len
    }

    /// The payload length in bytes.
    pub(crate) fn payload_len(&self) -> usize {
        let mut len = 0;
        let _ = self.with_payload::<_, core::convert::Infallible>(|payload| {
            len = payload.len();
            Ok(())
        });
        len
    }

    /// Run `f` on the payload bytes without allocating for the borrowed
    /// variants. Fixed-size payloads materialize on the stack.
    fn with_payload<F, E>(&self, f: F) -> Result<(), E>
    where
        F: FnOnce(&[u8]) -> Result<(), E>,
    {
        use MetaMessage::*;
        match self {
            SequenceNumber(None) | EndOfTrack => f(&[]),
            SequenceNumber(Some(n)) => f(&n.to_be_bytes()),
            Text(data) | Copyright(data) | TrackName(data) | InstrumentName(data)
            | Lyric(data) | Marker(data) | CuePoint(data) | SequencerSpecific(data) => f(data),
            ChannelPrefix(channel) => f(&[channel.bits()]),
            PortPrefix(port) => f(&[port.value()]),
            Tempo(tempo) => f(&tempo.to_bytes()),
            SmpteOffset(offset) => f(&offset.to_bytes()),
            TimeSignature(sig) => f(&sig.to_bytes()),
            KeySignature(sig) => f(&sig.to_bytes()),
            Unknown { data, .. } => f(data),
        }
    }

    /// Clone any borrowed payload into an owned one, untying the message
    /// from its source buffer.
    pub fn into_owned(self) -> MetaMessage<'static> {
        use MetaMessage::*;
        match self {
            SequenceNumber(n) => SequenceNumber(n),
            Text(data) => Text(own(data)),
            Copyright(data) => Copyright(own(data)),
            TrackName(data) => TrackName(own(data)),
            InstrumentName(data) => InstrumentName(own(data)),
            Lyric(data) => Lyric(own(data)),
            Marker(data) => Marker(own(data)),
            CuePoint(data) => CuePoint(own(data)),
            ChannelPrefix(channel) => ChannelPrefix(channel),
            PortPrefix(port) => PortPrefix(port),
            EndOfTrack => EndOfTrack,
            Tempo(tempo) => Tempo(tempo),
            SmpteOffset(offset) => SmpteOffset(offset),
            TimeSignature(sig) => TimeSignature(sig),
            KeySignature(sig) => KeySignature(sig),
            SequencerSpecific(data) => SequencerSpecific(own(data)),
            Unknown { kind, data } => Unknown {
                kind,
                data: own(data),
            },
        }
    }
}

fn own(data: Cow<'_, [u8]>) -> Cow<'static, [u8]> {
    Cow::Owned(data.into_owned())
}

fn expect_payload<const N: usize>(kind: u8, data: &[u8]) -> Result<[u8; N], EventError> {
    if data.len() != N {
        return Err(EventError::InvalidMetaLength {
            kind,
            expected: N,
            actual: data.len(),
        });
    }
    let mut bytes = [0u8; N];
    bytes.copy_from_slice(data);
    Ok(bytes)
}
