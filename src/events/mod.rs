#![doc = r#"
The events a track chunk is made of.

# Hierarchy

```text
                  |------------|
                  | TrackEvent |  delta time + message
                  |------------|
                        |
                 |--------------|
                 | TrackMessage |
                 |--------------|
                /       |        \
|---------------|  |---------|  |------------------------|
| Channel Voice |  |  Meta   |  |    System Exclusive    |
|---------------|  |---------|  |------------------------|
   0x80..=0xEF    0xFF prefixed        0xF0 / 0xF7
```

Reading and writing are stateful: consecutive channel voice messages with
the same status byte may omit it on the wire (*running status*), so the
codec threads the current status byte through every event. Meta and SysEx
events clear it, on both sides, per Standard MIDI File convention.
"#]

mod voice;
pub use voice::*;

pub mod meta;
pub use meta::{KeySignature, MetaMessage, Scale, SmpteOffset, Tempo, TimeSignature};

mod sysex;
pub use sysex::*;

mod registry;
pub use registry::*;

use crate::error::WriteError;
use crate::reader::{ReadResult, Reader, ReaderError};
use crate::settings::ReadSettings;
use crate::writer::Writer;
use crate::{EventError, vlq};

#[doc = r#"
One track event: a delta time in ticks since the previous event, and the
message that fires after that long a wait.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackEvent<'a> {
    delta_ticks: u32,
    message: TrackMessage<'a>,
}

#[doc = r#"
The payload of a [`TrackEvent`].
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackMessage<'a> {
    /// A channel voice message
    ChannelVoice(ChannelVoiceMessage),
    /// A meta event
    Meta(MetaMessage<'a>),
    /// A system exclusive message
    SystemExclusive(SystemExclusiveMessage<'a>),
}

impl<'a> TrackMessage<'a> {
    /// The channel voice message, if this is one.
    pub const fn as_channel_voice(&self) -> Option<&ChannelVoiceMessage> {
        match self {
            TrackMessage::ChannelVoice(cv) => Some(cv),
            _ => None,
        }
    }

    /// True for the End of Track meta event.
    pub const fn is_end_of_track(&self) -> bool {
        matches!(self, TrackMessage::Meta(MetaMessage::EndOfTrack))
    }

    /// Clone any borrowed payload into an owned one.
    pub fn into_owned(self) -> TrackMessage<'static> {
        match self {
            TrackMessage::ChannelVoice(cv) => TrackMessage::ChannelVoice(cv),
            TrackMessage::Meta(meta) => TrackMessage::Meta(meta.into_owned()),
            TrackMessage::SystemExclusive(sysex) => {
                TrackMessage::SystemExclusive(sysex.into_owned())
            }
        }
    }
}

impl<'a> TrackEvent<'a> {
    /// Create an event.
    pub const fn new(delta_ticks: u32, message: TrackMessage<'a>) -> Self {
        Self {
            delta_ticks,
            message,
        }
    }

    /// Ticks since the previous event.
    pub const fn delta_ticks(&self) -> u32 {
        self.delta_ticks
    }

    /// Replace the delta time.
    pub fn set_delta_ticks(&mut self, delta_ticks: u32) {
        self.delta_ticks = delta_ticks;
    }

    /// The message.
    pub const fn event(&self) -> &TrackMessage<'a> {
        &self.message
    }

    /// The message, mutably.
    pub fn event_mut(&mut self) -> &mut TrackMessage<'a> {
        &mut self.message
    }

    /// Take the message.
    pub fn into_event(self) -> TrackMessage<'a> {
        self.message
    }

    /// Clone any borrowed payload into an owned one.
    pub fn into_owned(self) -> TrackEvent<'static> {
        TrackEvent {
            delta_ticks: self.delta_ticks,
            message: self.message.into_owned(),
        }
    }

    /// Decode one event.
    ///
    /// `running_status` is the decoder state: the status byte of the last
    /// channel voice message, if the last event was one. A data byte where a
    /// status byte belongs reuses it; a status byte replaces it; meta and
    /// SysEx events clear it.
    pub(crate) fn read(
        reader: &mut Reader<'a>,
        running_status: &mut Option<u8>,
        settings: &ReadSettings,
    ) -> ReadResult<Self> {
        let delta_ticks = reader.read_vlq()?;

        let status_at = reader.buffer_position();
        let peeked = reader.peek_byte()?;
        let status = if peeked < 0x80 {
            // Data byte: the previous channel status is still in effect.
            running_status.ok_or_else(|| {
                ReaderError::parse(status_at, EventError::UnexpectedRunningStatus)
            })?
        } else {
            reader.read_byte()?;
            peeked
        };

        let message = match status {
            0x80..=0xEF => {
                *running_status = Some(status);
                TrackMessage::ChannelVoice(ChannelVoiceMessage::read(
                    reader,
                    status,
                    settings.silent_note_on,
                )?)
            }
            0xF0 => {
                *running_status = None;
                TrackMessage::SystemExclusive(SystemExclusiveMessage::read(
                    reader,
                    SysExKind::Normal,
                )?)
            }
            0xF7 => {
                *running_status = None;
                TrackMessage::SystemExclusive(SystemExclusiveMessage::read(
                    reader,
                    SysExKind::Escape,
                )?)
            }
            0xFF => {
                *running_status = None;
                TrackMessage::Meta(MetaMessage::read(reader, &settings.registry)?)
            }
            // System common and realtime bytes have no business inside a
            // track chunk.
            forbidden => {
                return Err(ReaderError::parse(
                    status_at,
                    EventError::InvalidStatus(forbidden),
                ));
            }
        };

        Ok(Self {
            delta_ticks,
            message,
        })
    }

    /// Encode this event.
    ///
    /// `write_status_byte` is decided by the track traversal: it is `false`
    /// only when running status makes the status byte redundant.
    pub(crate) fn write(&self, writer: &mut Writer, write_status_byte: bool) -> Result<(), WriteError> {
        writer.write_vlq(self.delta_ticks)?;
        match &self.message {
            TrackMessage::ChannelVoice(cv) => {
                if write_status_byte {
                    writer.write_byte(cv.status_byte());
                }
                cv.write_data(writer);
                Ok(())
            }
            TrackMessage::Meta(meta) => meta.write(writer),
            TrackMessage::SystemExclusive(sysex) => {
                writer.write_byte(sysex.status_byte());
                sysex.write_data(writer)
            }
        }
    }

    /// The number of bytes [`TrackEvent::write`] will produce.
    pub(crate) fn encoded_len(&self, write_status_byte: bool) -> usize {
        let body = match &self.message {
            TrackMessage::ChannelVoice(cv) => cv.encoded_len(write_status_byte),
            TrackMessage::Meta(meta) => meta.encoded_len(),
            TrackMessage::SystemExclusive(sysex) => sysex.encoded_len(),
        };
        vlq::encoded_len(self.delta_ticks) + body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    fn read_events(bytes: &[u8]) -> alloc::vec::Vec<TrackEvent<'_>> {
        let settings = ReadSettings::default();
        let mut reader = Reader::from_byte_slice(bytes);
        let mut running_status = None;
        let mut events = alloc::vec::Vec::new();
        while !reader.is_at_end() {
            events.push(TrackEvent::read(&mut reader, &mut running_status, &settings).unwrap());
        }
        events
    }

    #[test]
    fn running_status_reuses_the_previous_status_byte() {
        use pretty_assertions::assert_eq;

        // 00 90 3C 40 | 60 3C 00  (second event has no status byte)
        let bytes = [0x00, 0x90, 0x3C, 0x40, 0x60, 0x3C, 0x00];
        let events = read_events(&bytes);

        assert_eq!(
            events,
            [
                TrackEvent::new(
                    0,
                    TrackMessage::ChannelVoice(ChannelVoiceMessage::new(
                        Channel::One,
                        VoiceEvent::NoteOn {
                            key: Key::MIDDLE_C,
                            velocity: Velocity::new(64).unwrap(),
                        },
                    )),
                ),
                // NoteOn with velocity zero, normalized by the default policy
                TrackEvent::new(
                    96,
                    TrackMessage::ChannelVoice(ChannelVoiceMessage::new(
                        Channel::One,
                        VoiceEvent::NoteOff {
                            key: Key::MIDDLE_C,
                            velocity: Velocity::ZERO,
                        },
                    )),
                ),
            ]
        );
    }

    #[test]
    fn a_leading_data_byte_has_no_status_to_run_on() {
        let bytes = [0x00, 0x3C, 0x40];
        let settings = ReadSettings::default();
        let mut reader = Reader::from_byte_slice(&bytes);
        let mut running_status = None;
        let err = TrackEvent::read(&mut reader, &mut running_status, &settings).unwrap_err();
        assert!(matches!(
            err.kind(),
            ReaderErrorKind::ParseError(ParseError::Event(EventError::UnexpectedRunningStatus))
        ));
    }

    #[test]
    fn sysex_clears_running_status() {
        // NoteOn, then an escape SysEx, then a bare data byte: the SysEx
        // must have cleared the NoteOn's status.
        let bytes = [
            0x00, 0x90, 0x3C, 0x40, // NoteOn
            0x00, 0xF7, 0x01, 0xAA, // escape SysEx
            0x00, 0x3C, 0x00, // data byte with nothing to run on
        ];
        let settings = ReadSettings::default();
        let mut reader = Reader::from_byte_slice(&bytes);
        let mut running_status = None;

        TrackEvent::read(&mut reader, &mut running_status, &settings).unwrap();
        TrackEvent::read(&mut reader, &mut running_status, &settings).unwrap();
        assert_eq!(running_status, None);
        let err = TrackEvent::read(&mut reader, &mut running_status, &settings).unwrap_err();
        assert!(matches!(
            err.kind(),
            ReaderErrorKind::ParseError(ParseError::Event(EventError::UnexpectedRunningStatus))
        ));
    }

    #[test]
    fn realtime_status_bytes_are_forbidden() {
        for forbidden in [0xF1u8, 0xF4, 0xF8, 0xFE] {
            let bytes = [0x00, forbidden];
            let settings = ReadSettings::default();
            let mut reader = Reader::from_byte_slice(&bytes);
            let mut running_status = None;
            let err = TrackEvent::read(&mut reader, &mut running_status, &settings).unwrap_err();
            assert!(matches!(
                err.kind(),
                ReaderErrorKind::ParseError(ParseError::Event(EventError::InvalidStatus(b)))
                    if *b == forbidden
            ));
        }
    }

    #[test]
    fn write_matches_encoded_len() {
        const SYSEX_DATA: &[u8] = &[0x43, 0x12, 0xF7];
        let events = [
            TrackEvent::new(
                0x83,
                TrackMessage::ChannelVoice(ChannelVoiceMessage::new(
                    Channel::Three,
                    VoiceEvent::ProgramChange {
                        program: DataByte::new(12).unwrap(),
                    },
                )),
            ),
            TrackEvent::new(0, TrackMessage::Meta(MetaMessage::Tempo(Tempo::DEFAULT))),
            TrackEvent::new(
                5,
                TrackMessage::SystemExclusive(SystemExclusiveMessage::new(SYSEX_DATA)),
            ),
        ];

        for event in &events {
            for write_status in [true, false] {
                let mut writer = Writer::new();
                event.write(&mut writer, write_status).unwrap();
                assert_eq!(writer.len(), event.encoded_len(write_status));
            }
        }
    }
}
