#![doc = r#"
`midion` reads, edits and writes Standard MIDI Files.

The crate is a codec first: track chunks decode to plain event lists and
encode back byte-exactly (running status, delta times and the End of Track
terminator are the codec's business, not yours), with every structural
liberty of real-world files governed by an explicit policy. On top of the
events sits a pairing engine that reconstructs [`Note`](notes::Note)s from
Note On / Note Off pairs (lazily, in order, across overlapping voices), and
processing operations that write note edits back into the event stream.

# Reading

```rust
use midion::prelude::*;

let bytes: &[u8] = &[
    0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, // MThd, length 6
    0x00, 0x00, 0x00, 0x01, 0x00, 0x60, // format 0, 1 track, 96 tpqn
    0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x0C, // MTrk, length 12
    0x00, 0x90, 0x3C, 0x40, // NoteOn C4, velocity 64
    0x60, 0x80, 0x3C, 0x00, // NoteOff C4, 96 ticks later
    0x00, 0xFF, 0x2F, 0x00, // End of Track
];

let file = MidiFile::parse(bytes).unwrap();
let track = file.tracks()[0];

let notes: Vec<Note> = track.notes().collect();
assert_eq!(notes.len(), 1);
assert_eq!(notes[0].key(), Key::MIDDLE_C);
assert_eq!(notes[0].length(), 96);
```

# Writing

```rust
use midion::prelude::*;

let mut track = Track::default();
track.push(TrackEvent::new(
    0,
    TrackMessage::ChannelVoice(ChannelVoiceMessage::new(
        Channel::One,
        VoiceEvent::NoteOn {
            key: Key::MIDDLE_C,
            velocity: Velocity::MAX,
        },
    )),
));

// The End of Track terminator is appended for you.
let chunk = track.to_bytes(&WriteSettings::default()).unwrap();
assert_eq!(&chunk[..4], b"MTrk");
assert_eq!(&chunk[chunk.len() - 4..], &[0x00, 0xFF, 0x2F, 0x00]);
```
"#]
#![warn(missing_docs)]

extern crate alloc;

mod bytes;
pub use bytes::*;

mod channel;
pub use channel::*;

mod key;
pub use key::*;

mod error;
pub use error::*;

pub mod vlq;

pub mod reader;

pub mod writer;

pub mod events;

pub mod file;

pub mod settings;

pub mod timed;

pub mod notes;

pub mod prelude;
