use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use crate::{DataByte, ParseError};

#[doc = r#"
A seven-bit MIDI key number.

Key `0` is `C(-1)` and key `127` is `G9`; middle C is key `60`. Every key
decomposes into a [`PitchClass`] and an [`Octave`].

# Example
```rust
use midion::prelude::*;

let key = Key::new(60).unwrap();

assert_eq!(key.pitch_class(), PitchClass::C);
assert_eq!(key.octave(), Octave::new(4));
assert_eq!(key.to_string(), "C4");
```
"#]
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Key(DataByte);

impl Key {
    /// Middle C.
    pub const MIDDLE_C: Self = Self(DataByte(60));

    /// Create a key from its number, checking the leading bit.
    pub const fn new(number: u8) -> Result<Self, ParseError> {
        match DataByte::new(number) {
            Ok(b) => Ok(Self(b)),
            Err(e) => Err(e),
        }
    }

    /// Create a key without checking the leading bit.
    pub const fn new_unchecked(number: u8) -> Self {
        Self(DataByte::new_unchecked(number))
    }

    /// All 128 keys, lowest first.
    pub fn all() -> [Key; 128] {
        core::array::from_fn(|i| Key(DataByte(i as u8)))
    }

    /// Compose a key from a pitch class and an octave.
    ///
    /// # Panics
    /// For combinations above `G9`, which are not representable in seven
    /// bits.
    pub const fn compose(class: PitchClass, octave: Octave) -> Self {
        let semitones = (octave.value() + 1) as u8 * 12 + class.semitone();
        if semitones > 127 {
            panic!("keys above G9 are not representable");
        }
        Self(DataByte(semitones))
    }

    /// The key number, `0..=127`.
    #[inline]
    pub const fn number(&self) -> u8 {
        self.0.0
    }

    /// The underlying data byte.
    #[inline]
    pub const fn byte(&self) -> DataByte {
        self.0
    }

    /// The pitch class of this key.
    #[inline]
    pub const fn pitch_class(&self) -> PitchClass {
        PitchClass::from_semitone(self.0.0 % 12)
    }

    /// The octave of this key, `-1..=9`.
    #[inline]
    pub const fn octave(&self) -> Octave {
        Octave((self.0.0 / 12) as i8 - 1)
    }

    /// True if the key falls on a black piano key.
    #[inline]
    pub const fn is_sharp(&self) -> bool {
        self.pitch_class().is_sharp()
    }
}

impl From<DataByte> for Key {
    fn from(value: DataByte) -> Self {
        Self(value)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch_class(), self.octave())
    }
}

impl Add<u8> for Key {
    type Output = Key;
    fn add(self, rhs: u8) -> Self::Output {
        Self(DataByte((self.0.0).saturating_add(rhs).min(127)))
    }
}

impl AddAssign<u8> for Key {
    fn add_assign(&mut self, rhs: u8) {
        *self = *self + rhs;
    }
}

impl Sub<u8> for Key {
    type Output = Key;
    fn sub(self, rhs: u8) -> Self::Output {
        Self(DataByte(self.0.0.saturating_sub(rhs)))
    }
}

impl SubAssign<u8> for Key {
    fn sub_assign(&mut self, rhs: u8) {
        *self = *self - rhs;
    }
}

/// Compose a [`Key`] from a pitch-class name and an octave literal.
///
/// # Example
/// ```rust
/// use midion::key;
/// use midion::prelude::*;
///
/// assert_eq!(key!(A, 4).number(), 69);
/// ```
#[macro_export]
macro_rules! key {
    ($class:ident, $oct:literal) => {
        $crate::Key::compose($crate::PitchClass::$class, $crate::Octave::new($oct))
    };
}

#[doc = r#"
One of the twelve pitch classes, named by its sharp spelling.
"#]
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl PitchClass {
    /// All twelve pitch classes from C upward.
    pub const fn all() -> [PitchClass; 12] {
        use PitchClass::*;
        [C, CSharp, D, DSharp, E, F, FSharp, G, GSharp, A, ASharp, B]
    }

    /// The pitch class `semitone` steps above C. Values wrap at twelve.
    pub const fn from_semitone(semitone: u8) -> Self {
        use PitchClass::*;
        match semitone % 12 {
            0 => C,
            1 => CSharp,
            2 => D,
            3 => DSharp,
            4 => E,
            5 => F,
            6 => FSharp,
            7 => G,
            8 => GSharp,
            9 => A,
            10 => ASharp,
            _ => B,
        }
    }

    /// Semitones above C, `0..=11`.
    pub const fn semitone(&self) -> u8 {
        use PitchClass::*;
        match self {
            C => 0,
            CSharp => 1,
            D => 2,
            DSharp => 3,
            E => 4,
            F => 5,
            FSharp => 6,
            G => 7,
            GSharp => 8,
            A => 9,
            ASharp => 10,
            B => 11,
        }
    }

    /// True for the five sharps.
    pub const fn is_sharp(&self) -> bool {
        use PitchClass::*;
        matches!(self, CSharp | DSharp | FSharp | GSharp | ASharp)
    }

    /// Place this pitch class in an octave.
    pub const fn in_octave(self, octave: Octave) -> Key {
        Key::compose(self, octave)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use PitchClass::*;
        let name = match self {
            C => "C",
            CSharp => "C#",
            D => "D",
            DSharp => "D#",
            E => "E",
            F => "F",
            FSharp => "F#",
            G => "G",
            GSharp => "G#",
            A => "A",
            ASharp => "A#",
            B => "B",
        };
        f.write_str(name)
    }
}

#[doc = r#"
The octave of a [`Key`], from -1 to 9. Construction clamps.
"#]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Octave(i8);

impl Octave {
    /// Clamps to `-1..=9`.
    pub const fn new(octave: i8) -> Self {
        if octave < -1 {
            Self(-1)
        } else if octave > 9 {
            Self(9)
        } else {
            Self(octave)
        }
    }

    /// The octave number.
    pub const fn value(&self) -> i8 {
        self.0
    }
}

impl fmt::Display for Octave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[test]
fn key_decomposition_round_trips() {
    for number in 0..128 {
        let key = Key::new(number).unwrap();
        let rebuilt = Key::compose(key.pitch_class(), key.octave());
        assert_eq!(rebuilt, key);
    }
}

#[test]
fn key_arithmetic_clamps() {
    let top = Key::new(127).unwrap();
    assert_eq!((top + 10).number(), 127);

    let bottom = Key::new(0).unwrap();
    assert_eq!((bottom - 10).number(), 0);

    let mut c4 = Key::MIDDLE_C;
    c4 += 12;
    assert_eq!(c4, key!(C, 5));
    c4 -= 24;
    assert_eq!(c4, key!(C, 3));
}

#[test]
fn display_names() {
    assert_eq!(Key::MIDDLE_C.to_string(), "C4");
    assert_eq!(key!(FSharp, 2).to_string(), "F#2");
    assert_eq!(Key::new(0).unwrap().to_string(), "C-1");
}
