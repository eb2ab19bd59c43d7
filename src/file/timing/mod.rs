mod smpte;
pub use smpte::*;

use crate::HeaderError;

#[doc = r#"
The header's division word: what one tick of delta time means.

Either a tick rate per quarter note (musical time, by far the common case)
or an SMPTE frame subdivision (absolute time). Only the representation is
modeled here; tempo maps and timecode arithmetic are other crates' business.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Timing {
    /// Delta times count fractions of a quarter note
    TicksPerQuarterNote(TicksPerQuarterNote),
    /// Delta times count fractions of an SMPTE frame
    Smpte(SmpteHeader),
}

impl Timing {
    /// Musical timing. The leading bit of `tpqn` is reserved and masked off.
    pub const fn new_ticks_per_quarter_note(tpqn: u16) -> Self {
        Self::TicksPerQuarterNote(TicksPerQuarterNote {
            inner: (tpqn & 0x7FFF).to_be_bytes(),
        })
    }

    /// SMPTE timing from a frame rate and ticks per frame.
    pub const fn new_smpte(fps: SmpteFps, ticks_per_frame: u8) -> Self {
        Self::Smpte(SmpteHeader {
            fps,
            ticks_per_frame,
        })
    }

    /// Interpret the header's two division bytes.
    pub(crate) const fn from_bytes(bytes: [u8; 2]) -> Result<Self, HeaderError> {
        if bytes[0] >> 7 == 0 {
            return Ok(Self::TicksPerQuarterNote(TicksPerQuarterNote {
                inner: bytes,
            }));
        }
        // Negative fps byte in two's complement, then ticks per frame.
        let fps = match SmpteFps::from_division_byte(bytes[0] as i8) {
            Some(fps) => fps,
            None => return Err(HeaderError::InvalidSmpteDivision(bytes[0] as i8)),
        };
        Ok(Self::Smpte(SmpteHeader {
            fps,
            ticks_per_frame: bytes[1],
        }))
    }

    /// The two division bytes this timing serializes to.
    pub(crate) const fn to_bytes(&self) -> [u8; 2] {
        match self {
            Self::TicksPerQuarterNote(t) => t.inner,
            Self::Smpte(s) => [s.fps.division_byte() as u8, s.ticks_per_frame],
        }
    }

    /// The tick rate, if the timing is musical.
    pub const fn ticks_per_quarter_note(&self) -> Option<u16> {
        match self {
            Self::TicksPerQuarterNote(t) => Some(t.ticks_per_quarter_note()),
            Self::Smpte(_) => None,
        }
    }
}

impl Default for Timing {
    /// 480 ticks per quarter note, the most common rate in the wild.
    fn default() -> Self {
        Self::new_ticks_per_quarter_note(480)
    }
}

/// Musical division: ticks per quarter note, stored as the raw word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TicksPerQuarterNote {
    pub(crate) inner: [u8; 2],
}

impl TicksPerQuarterNote {
    /// The tick rate, `0..=32767`.
    pub const fn ticks_per_quarter_note(&self) -> u16 {
        u16::from_be_bytes(self.inner) & 0x7FFF
    }
}

/// SMPTE division: a frame rate and a tick count per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmpteHeader {
    pub(crate) fps: SmpteFps,
    pub(crate) ticks_per_frame: u8,
}

impl SmpteHeader {
    /// The frame rate.
    pub const fn fps(&self) -> SmpteFps {
        self.fps
    }

    /// Ticks per frame.
    pub const fn ticks_per_frame(&self) -> u8 {
        self.ticks_per_frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case([0x01, 0xE0], 480)]
    #[test_case([0x00, 0x60], 96)]
    #[test_case([0x7F, 0xFF], 32767)]
    fn musical_division(bytes: [u8; 2], tpqn: u16) {
        let timing = Timing::from_bytes(bytes).unwrap();
        assert_eq!(timing.ticks_per_quarter_note(), Some(tpqn));
        assert_eq!(timing.to_bytes(), bytes);
        assert_eq!(Timing::new_ticks_per_quarter_note(tpqn), timing);
    }

    #[test]
    fn smpte_division() {
        // -25 fps, 40 ticks per frame
        let timing = Timing::from_bytes([0xE7, 40]).unwrap();
        let Timing::Smpte(header) = timing else {
            panic!("expected SMPTE timing");
        };
        assert_eq!(header.fps(), SmpteFps::TwentyFive);
        assert_eq!(header.ticks_per_frame(), 40);
        assert_eq!(timing.ticks_per_quarter_note(), None);
        assert_eq!(timing.to_bytes(), [0xE7, 40]);
    }

    #[test]
    fn undefined_smpte_rates_are_rejected() {
        assert_eq!(
            Timing::from_bytes([0x9C, 40]),
            Err(HeaderError::InvalidSmpteDivision(-100))
        );
    }
}
