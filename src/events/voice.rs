use crate::reader::{ReadResult, Reader, ReaderError};
use crate::settings::SilentNoteOnPolicy;
use crate::writer::Writer;
use crate::{Channel, DataByte, EventError, Key, PitchBend, Velocity};

#[doc = r#"
A channel voice message: one of the seven event kinds addressed to a single
channel.

The status byte is `(kind_nibble << 4) | channel`; the kind determines whether
one or two data bytes follow. Channel voice messages are the only events
running status applies to.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelVoiceMessage {
    channel: Channel,
    event: VoiceEvent,
}

impl ChannelVoiceMessage {
    /// Address a voice event to a channel.
    pub const fn new(channel: Channel, event: VoiceEvent) -> Self {
        Self { channel, event }
    }

    /// The channel addressed.
    pub const fn channel(&self) -> Channel {
        self.channel
    }

    /// The voice event carried.
    pub const fn event(&self) -> &VoiceEvent {
        &self.event
    }

    /// The voice event carried, mutably.
    pub fn event_mut(&mut self) -> &mut VoiceEvent {
        &mut self.event
    }

    /// The status byte this message serializes to.
    pub const fn status_byte(&self) -> u8 {
        (self.event.status_nibble() << 4) | self.channel.bits()
    }

    /// Decode the data bytes of the message `status` announces.
    ///
    /// `status` must already be known to lie in `0x80..=0xEF`. A silent Note
    /// On is rewritten to a Note Off when `policy` says so.
    pub(crate) fn read(
        reader: &mut Reader<'_>,
        status: u8,
        policy: SilentNoteOnPolicy,
    ) -> ReadResult<Self> {
        let channel = Channel::from_bits(status & 0x0F);
        let event = VoiceEvent::read(reader, status >> 4)?;

        let event = match event {
            VoiceEvent::NoteOn { key, velocity }
                if velocity.is_silent() && matches!(policy, SilentNoteOnPolicy::NoteOff) =>
            {
                VoiceEvent::NoteOff {
                    key,
                    velocity: Velocity::ZERO,
                }
            }
            other => other,
        };

        Ok(Self { channel, event })
    }

    /// Append the data bytes (the status byte is the caller's business,
    /// because running status may have suppressed it).
    pub(crate) fn write_data(&self, writer: &mut Writer) {
        self.event.write_data(writer);
    }

    /// Status byte plus data bytes.
    pub(crate) fn encoded_len(&self, with_status: bool) -> usize {
        self.event.data_len() + usize::from(with_status)
    }
}

#[doc = r#"
The seven channel voice event kinds.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VoiceEvent {
    /// Release a key
    NoteOff {
        /// The key released
        key: Key,
        /// The release velocity
        velocity: Velocity,
    },
    /// Press a key
    NoteOn {
        /// The key pressed
        key: Key,
        /// The press velocity; zero conventionally means release
        velocity: Velocity,
    },
    /// Re-weight a key that is already down
    PolyPressure {
        /// The key affected
        key: Key,
        /// The new pressure
        amount: DataByte,
    },
    /// Move a controller
    ControlChange {
        /// The controller number
        controller: DataByte,
        /// The new controller value
        value: DataByte,
    },
    /// Select an instrument
    ProgramChange {
        /// The program number
        program: DataByte,
    },
    /// Re-weight the whole channel
    ChannelPressure {
        /// The new pressure
        amount: DataByte,
    },
    /// Bend the channel's pitch
    PitchBend(PitchBend),
}

impl VoiceEvent {
    /// The high nibble of the status byte, `0x8..=0xE`.
    pub const fn status_nibble(&self) -> u8 {
        use VoiceEvent::*;
        match self {
            NoteOff { .. } => 0x8,
            NoteOn { .. } => 0x9,
            PolyPressure { .. } => 0xA,
            ControlChange { .. } => 0xB,
            ProgramChange { .. } => 0xC,
            ChannelPressure { .. } => 0xD,
            PitchBend(_) => 0xE,
        }
    }

    /// The number of data bytes following the status byte.
    pub const fn data_len(&self) -> usize {
        use VoiceEvent::*;
        match self {
            ProgramChange { .. } | ChannelPressure { .. } => 1,
            _ => 2,
        }
    }

    fn read(reader: &mut Reader<'_>, kind_nibble: u8) -> ReadResult<Self> {
        use VoiceEvent::*;
        Ok(match kind_nibble {
            0x8 => NoteOff {
                key: read_data_byte(reader)?.into(),
                velocity: read_data_byte(reader)?.into(),
            },
            0x9 => NoteOn {
                key: read_data_byte(reader)?.into(),
                velocity: read_data_byte(reader)?.into(),
            },
            0xA => PolyPressure {
                key: read_data_byte(reader)?.into(),
                amount: read_data_byte(reader)?,
            },
            0xB => ControlChange {
                controller: read_data_byte(reader)?,
                value: read_data_byte(reader)?,
            },
            0xC => ProgramChange {
                program: read_data_byte(reader)?,
            },
            0xD => ChannelPressure {
                amount: read_data_byte(reader)?,
            },
            0xE => {
                let lsb = read_data_byte(reader)?;
                let msb = read_data_byte(reader)?;
                PitchBend(crate::PitchBend::from_bytes(lsb, msb))
            }
            other => {
                // The track codec only routes 0x80..=0xEF here.
                return Err(ReaderError::parse(
                    reader.buffer_position(),
                    EventError::InvalidStatus(other << 4),
                ));
            }
        })
    }

    fn write_data(&self, writer: &mut Writer) {
        use VoiceEvent::*;
        match self {
            NoteOff { key, velocity } | NoteOn { key, velocity } => {
                writer.write_byte(key.number());
                writer.write_byte(velocity.value());
            }
            PolyPressure { key, amount } => {
                writer.write_byte(key.number());
                writer.write_byte(amount.value());
            }
            ControlChange { controller, value } => {
                writer.write_byte(controller.value());
                writer.write_byte(value.value());
            }
            ProgramChange { program } => writer.write_byte(program.value()),
            ChannelPressure { amount } => writer.write_byte(amount.value()),
            PitchBend(bend) => {
                writer.write_byte(bend.lsb().value());
                writer.write_byte(bend.msb().value());
            }
        }
    }
}

fn read_data_byte(reader: &mut Reader<'_>) -> ReadResult<DataByte> {
    let at = reader.buffer_position();
    let byte = reader.read_byte()?;
    DataByte::new(byte).map_err(|e| ReaderError::parse(at, e))
}
