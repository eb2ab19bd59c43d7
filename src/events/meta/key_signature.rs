use core::fmt;

use crate::EventError;

#[doc = r#"
A Key Signature payload: a count of sharps (positive) or flats (negative)
and a [`Scale`]. The default is C major.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeySignature {
    key: i8,
    scale: Scale,
}

/// Major or minor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scale {
    /// Scale byte 0
    #[default]
    Major,
    /// Scale byte 1
    Minor,
}

impl KeySignature {
    /// C major: no sharps, no flats.
    pub const DEFAULT: Self = Self {
        key: 0,
        scale: Scale::Major,
    };

    /// Create a key signature.
    ///
    /// # Errors
    /// [`EventError::InvalidKeySignature`] for more than seven sharps or
    /// flats.
    pub const fn new(key: i8, scale: Scale) -> Result<Self, EventError> {
        if key < -7 || key > 7 {
            return Err(EventError::InvalidKeySignature {
                key,
                scale: scale as u8,
            });
        }
        Ok(Self { key, scale })
    }

    /// Parse the two payload bytes.
    pub const fn from_bytes(bytes: [u8; 2]) -> Result<Self, EventError> {
        let key = bytes[0] as i8;
        let scale = match bytes[1] {
            0 => Scale::Major,
            1 => Scale::Minor,
            other => {
                return Err(EventError::InvalidKeySignature { key, scale: other });
            }
        };
        Self::new(key, scale)
    }

    /// The two payload bytes.
    pub const fn to_bytes(&self) -> [u8; 2] {
        [self.key as u8, self.scale as u8]
    }

    /// Sharps (positive) or flats (negative), `-7..=7`.
    pub const fn key(&self) -> i8 {
        self.key
    }

    /// The scale.
    pub const fn scale(&self) -> Scale {
        self.scale
    }
}

impl Default for KeySignature {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for KeySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let accidentals = match self.key {
            0 => "no accidentals".into(),
            1 => "1 sharp".into(),
            -1 => "1 flat".into(),
            n if n > 0 => alloc::format!("{n} sharps"),
            n => alloc::format!("{} flats", -n),
        };
        let scale = match self.scale {
            Scale::Major => "major",
            Scale::Minor => "minor",
        };
        write!(f, "{accidentals}, {scale}")
    }
}
