use core::fmt;

use crate::ParseError;

#[doc = r#"
A byte whose leading bit is guaranteed clear.

Everything a channel event carries on the wire (keys, velocities, controller
numbers, program numbers, pressure amounts) is a seven-bit quantity; the
leading bit is reserved for status bytes. [`DataByte`] is the checked wrapper
the rest of the crate builds on.

# Example
```rust
use midion::prelude::*;

let ok = DataByte::new(100).unwrap();
assert_eq!(ok.value(), 100);

assert!(DataByte::new(0x80).is_err());
```
"#]
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataByte(pub(crate) u8);

impl DataByte {
    /// Create a new data byte, checking the leading bit.
    pub const fn new(byte: u8) -> Result<Self, ParseError> {
        if byte > 0x7F {
            return Err(ParseError::InvalidDataByte(byte));
        }
        Ok(Self(byte))
    }

    /// Create a new data byte without checking the leading bit.
    pub const fn new_unchecked(byte: u8) -> Self {
        Self(byte & 0x7F)
    }

    /// The underlying byte.
    #[inline]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for DataByte {
    type Error = ParseError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DataByte> for u8 {
    fn from(value: DataByte) -> Self {
        value.0
    }
}

impl fmt::Display for DataByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[doc = r#"
The strength with which a key is pressed or released.

A velocity of zero on a Note On is the classic "silent note on", which most
producers use as a note release so that running status can compress the whole
stream down to one status byte. See
[`SilentNoteOnPolicy`](crate::settings::SilentNoteOnPolicy) for how reading
treats those.
"#]
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Velocity(DataByte);

impl Velocity {
    /// No velocity at all.
    pub const ZERO: Self = Self(DataByte(0));
    /// The loudest representable velocity.
    pub const MAX: Self = Self(DataByte(127));

    /// Create a new velocity, checking the leading bit.
    pub const fn new(velocity: u8) -> Result<Self, ParseError> {
        match DataByte::new(velocity) {
            Ok(b) => Ok(Self(b)),
            Err(e) => Err(e),
        }
    }

    /// Create a new velocity without checking the leading bit.
    pub const fn new_unchecked(velocity: u8) -> Self {
        Self(DataByte::new_unchecked(velocity))
    }

    /// The underlying byte.
    #[inline]
    pub const fn value(&self) -> u8 {
        self.0.0
    }

    /// True for velocity zero.
    #[inline]
    pub const fn is_silent(&self) -> bool {
        self.0.0 == 0
    }
}

impl From<DataByte> for Velocity {
    fn from(value: DataByte) -> Self {
        Self(value)
    }
}

impl fmt::Display for Velocity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[doc = r#"
A 14-bit pitch bend amount, assembled from two data bytes.

`0x0000` is full bend down, [`PitchBend::MIDPOINT`] (`0x2000`) is no bend,
`0x3FFF` is full bend up.
"#]
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PitchBend {
    lsb: DataByte,
    msb: DataByte,
}

impl PitchBend {
    /// No bend.
    pub const MIDPOINT: Self = Self {
        lsb: DataByte(0),
        msb: DataByte(0x40),
    };

    /// Build from the two wire bytes, least significant first.
    pub const fn from_bytes(lsb: DataByte, msb: DataByte) -> Self {
        Self { lsb, msb }
    }

    /// Build from a 14-bit value. Values above `0x3FFF` are masked.
    pub const fn from_value(value: u16) -> Self {
        Self {
            lsb: DataByte((value & 0x7F) as u8),
            msb: DataByte(((value >> 7) & 0x7F) as u8),
        }
    }

    /// The combined 14-bit value.
    #[inline]
    pub const fn value(&self) -> u16 {
        ((self.msb.0 as u16) << 7) | self.lsb.0 as u16
    }

    /// The least significant wire byte.
    pub const fn lsb(&self) -> DataByte {
        self.lsb
    }

    /// The most significant wire byte.
    pub const fn msb(&self) -> DataByte {
        self.msb
    }
}

impl Default for PitchBend {
    fn default() -> Self {
        Self::MIDPOINT
    }
}

#[test]
fn data_byte_rejects_status_range() {
    assert_eq!(DataByte::new(0x7F), Ok(DataByte(0x7F)));
    assert_eq!(DataByte::new(0x80), Err(ParseError::InvalidDataByte(0x80)));
    assert_eq!(DataByte::new_unchecked(0xFF).value(), 0x7F);
}

#[test]
fn pitch_bend_round_trips_value() {
    for value in [0u16, 1, 0x1FFF, 0x2000, 0x3FFF] {
        let bend = PitchBend::from_value(value);
        assert_eq!(bend.value(), value);
        assert_eq!(PitchBend::from_bytes(bend.lsb(), bend.msb()), bend);
    }
    assert_eq!(PitchBend::MIDPOINT.value(), 0x2000);
}
