use core::fmt;

#[doc = r#"
One of the sixteen MIDI channels.

Channels are numbered 1 through 16 in conversation and 0 through 15 on the
wire; the low nibble of a channel event's status byte carries the wire form.

# Example
```rust
use midion::prelude::*;

let channel = Channel::Ten;
assert_eq!(channel.bits(), 9);
assert_eq!(Channel::from_bits(9), Channel::Ten);
assert_eq!(channel.to_string(), "10");
```
"#]
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Channel {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Eleven,
    Twelve,
    Thirteen,
    Fourteen,
    Fifteen,
    Sixteen,
}

impl Channel {
    /// All sixteen channels, in wire order.
    pub const fn all() -> [Channel; 16] {
        use Channel::*;
        [
            One, Two, Three, Four, Five, Six, Seven, Eight, Nine, Ten, Eleven, Twelve, Thirteen,
            Fourteen, Fifteen, Sixteen,
        ]
    }

    /// The channel for a status byte's low nibble. Upper bits are masked.
    pub const fn from_bits(nibble: u8) -> Self {
        use Channel::*;
        match nibble & 0x0F {
            0 => One,
            1 => Two,
            2 => Three,
            3 => Four,
            4 => Five,
            5 => Six,
            6 => Seven,
            7 => Eight,
            8 => Nine,
            9 => Ten,
            10 => Eleven,
            11 => Twelve,
            12 => Thirteen,
            13 => Fourteen,
            14 => Fifteen,
            _ => Sixteen,
        }
    }

    /// The wire nibble, `0..=15`.
    pub const fn bits(&self) -> u8 {
        *self as u8
    }

    /// The conversational number, `1..=16`.
    pub const fn number(&self) -> u8 {
        self.bits() + 1
    }

    /// True for channel 10, which General MIDI reserves for percussion.
    pub const fn is_percussion(&self) -> bool {
        matches!(self, Channel::Ten)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.number().fmt(f)
    }
}
