use core::fmt;

#[doc = r#"
A Set Tempo payload: microseconds per quarter note, stored in the three
big-endian bytes the wire carries.

The Standard MIDI File default is 500 000 µs per quarter note (120 BPM),
which is what a track without any Set Tempo event plays at.

# Example
```rust
use midion::prelude::*;

let tempo = Tempo::from_micros_per_quarter_note(500_000);
assert_eq!(tempo, Tempo::DEFAULT);
assert_eq!(tempo.bpm(), 120.0);
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tempo {
    inner: [u8; 3],
}

impl Tempo {
    /// 500 000 µs per quarter note, i.e. 120 BPM.
    pub const DEFAULT: Self = Self::from_micros_per_quarter_note(500_000);

    /// Build from the three payload bytes.
    pub const fn from_bytes(inner: [u8; 3]) -> Self {
        Self { inner }
    }

    /// Build from a microsecond count. Values above 24 bits are masked.
    pub const fn from_micros_per_quarter_note(micros: u32) -> Self {
        Self {
            inner: [(micros >> 16) as u8, (micros >> 8) as u8, micros as u8],
        }
    }

    /// Microseconds per quarter note.
    pub const fn micros_per_quarter_note(&self) -> u32 {
        ((self.inner[0] as u32) << 16) | ((self.inner[1] as u32) << 8) | self.inner[2] as u32
    }

    /// Quarter notes per minute.
    pub fn bpm(&self) -> f64 {
        60_000_000.0 / self.micros_per_quarter_note() as f64
    }

    /// The three payload bytes.
    pub const fn to_bytes(&self) -> [u8; 3] {
        self.inner
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}µs/quarter", self.micros_per_quarter_note())
    }
}

#[test]
fn bytes_are_big_endian() {
    let tempo = Tempo::from_micros_per_quarter_note(500_000);
    assert_eq!(tempo.to_bytes(), [0x07, 0xA1, 0x20]);
    assert_eq!(Tempo::from_bytes([0x07, 0xA1, 0x20]), tempo);
}

#[test]
fn bpm_of_the_default_is_120() {
    assert_eq!(Tempo::DEFAULT.bpm(), 120.0);
    assert_eq!(Tempo::from_micros_per_quarter_note(400_000).bpm(), 150.0);
}
