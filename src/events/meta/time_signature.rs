use core::fmt;

#[doc = r#"
A Time Signature payload.

The denominator is stored as a power of two (`2` means a quarter note, so
4/4 is numerator 4, denominator power 2). The last two bytes describe the
metronome: MIDI clocks per click and notated 32nd notes per quarter note,
which almost every file leaves at 24 and 8.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSignature {
    /// Beats per bar.
    pub numerator: u8,
    /// The beat unit as a power of two.
    pub denominator: u8,
    /// MIDI clocks per metronome click.
    pub clocks_per_click: u8,
    /// Notated 32nd notes per quarter note.
    pub thirty_seconds_per_quarter: u8,
}

impl TimeSignature {
    /// 4/4 with the conventional metronome bytes.
    pub const DEFAULT: Self = Self {
        numerator: 4,
        denominator: 2,
        clocks_per_click: 24,
        thirty_seconds_per_quarter: 8,
    };

    /// Build from the four payload bytes.
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self {
            numerator: bytes[0],
            denominator: bytes[1],
            clocks_per_click: bytes[2],
            thirty_seconds_per_quarter: bytes[3],
        }
    }

    /// The four payload bytes.
    pub const fn to_bytes(&self) -> [u8; 4] {
        [
            self.numerator,
            self.denominator,
            self.clocks_per_click,
            self.thirty_seconds_per_quarter,
        ]
    }

    /// The denominator as the note-value count it names, e.g. `8` for 6/8.
    pub const fn denominator_value(&self) -> u32 {
        1u32 << self.denominator
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator_value())
    }
}

#[test]
fn six_eight_displays_as_expected() {
    let sig = TimeSignature {
        numerator: 6,
        denominator: 3,
        ..TimeSignature::DEFAULT
    };
    assert_eq!(sig.to_string(), "6/8");
    assert_eq!(TimeSignature::DEFAULT.to_string(), "4/4");
}

#[test]
fn bytes_round_trip() {
    let sig = TimeSignature::from_bytes([7, 3, 36, 8]);
    assert_eq!(sig.to_bytes(), [7, 3, 36, 8]);
    assert_eq!(TimeSignature::default().to_bytes(), [4, 2, 24, 8]);
}
