#![doc = r#"
Notes: Note On / Note Off pairs reconstructed from the event stream.

A [`Note`] is a *view*. The two timed events remain the source of truth; the
note carries them, and editing its time or length edits them, so writing the
edited material back is just a matter of collecting the events again (which
[`Track::process_notes`] does).

Pairing matches by [`NoteId`] (channel and key), newest press first, and
tolerates everything real files do: overlapping presses of the same key,
releases with no press, presses that never resolve. See
[`pairing`](self::pairing) for the order guarantees.
"#]

pub mod pairing;
pub use pairing::{NoteOrEvent, NotesAndEvents, notes_and_events};

mod process;

use crate::events::{ChannelVoiceMessage, TrackEvent, TrackMessage, VoiceEvent};
use crate::file::Track;
use crate::timed::Timed;
use crate::{Channel, Key, Velocity};

#[doc = r#"
What identifies a Note Off as the release of an earlier Note On: the
channel and the key.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoteId {
    channel: Channel,
    key: Key,
}

impl NoteId {
    /// Create an identity.
    pub const fn new(channel: Channel, key: Key) -> Self {
        Self { channel, key }
    }

    /// The channel.
    pub const fn channel(&self) -> Channel {
        self.channel
    }

    /// The key.
    pub const fn key(&self) -> Key {
        self.key
    }
}

#[doc = r#"
A reconstructed note: a Note On and its matching Note Off.

Times are absolute ticks; `length` is never negative. The note owns its two
underlying timed events: [`Note::set_time`] and [`Note::set_length`] move
them, and collecting the events back out (as the processing operations do)
observes the edits.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note<'a> {
    id: NoteId,
    velocity: Velocity,
    off_velocity: Velocity,
    on: Timed<TrackEvent<'a>>,
    off: Timed<TrackEvent<'a>>,
    on_source: usize,
    off_source: usize,
}

impl<'a> Note<'a> {
    pub(crate) const fn from_parts(
        id: NoteId,
        velocity: Velocity,
        off_velocity: Velocity,
        on_source: usize,
        on: Timed<TrackEvent<'a>>,
        off_source: usize,
        off: Timed<TrackEvent<'a>>,
    ) -> Self {
        Self {
            id,
            velocity,
            off_velocity,
            on,
            off,
            on_source,
            off_source,
        }
    }

    /// Build a free-standing note, synthesizing its two events.
    ///
    /// `length` is clamped at zero.
    pub fn new(
        channel: Channel,
        key: Key,
        velocity: Velocity,
        time: i64,
        length: i64,
    ) -> Self {
        let id = NoteId::new(channel, key);
        let on = Timed::new(
            time,
            TrackEvent::new(
                0,
                TrackMessage::ChannelVoice(ChannelVoiceMessage::new(
                    channel,
                    VoiceEvent::NoteOn { key, velocity },
                )),
            ),
        );
        let off = Timed::new(
            time + length.max(0),
            TrackEvent::new(
                0,
                TrackMessage::ChannelVoice(ChannelVoiceMessage::new(
                    channel,
                    VoiceEvent::NoteOff {
                        key,
                        velocity: Velocity::ZERO,
                    },
                )),
            ),
        );
        Self {
            id,
            velocity,
            off_velocity: Velocity::ZERO,
            on,
            off,
            on_source: 0,
            off_source: 0,
        }
    }

    /// The pairing identity.
    pub const fn id(&self) -> NoteId {
        self.id
    }

    /// The channel.
    pub const fn channel(&self) -> Channel {
        self.id.channel()
    }

    /// The key.
    pub const fn key(&self) -> Key {
        self.id.key()
    }

    /// The press velocity.
    pub const fn velocity(&self) -> Velocity {
        self.velocity
    }

    /// The release velocity.
    pub const fn off_velocity(&self) -> Velocity {
        self.off_velocity
    }

    /// The onset, in absolute ticks.
    pub const fn time(&self) -> i64 {
        self.on.time
    }

    /// Ticks between press and release. Never negative.
    pub const fn length(&self) -> i64 {
        self.off.time - self.on.time
    }

    /// The tick of the release.
    pub const fn end_time(&self) -> i64 {
        self.off.time
    }

    /// Move the note, keeping its length.
    pub fn set_time(&mut self, time: i64) {
        let length = self.length();
        self.on.time = time;
        self.off.time = time + length;
    }

    /// Stretch or shrink the note in place. Negative lengths clamp to zero.
    pub fn set_length(&mut self, length: i64) {
        self.off.time = self.on.time + length.max(0);
    }

    /// The underlying Note On with its time.
    pub const fn on_event(&self) -> &Timed<TrackEvent<'a>> {
        &self.on
    }

    /// The underlying Note Off with its time.
    pub const fn off_event(&self) -> &Timed<TrackEvent<'a>> {
        &self.off
    }

    /// The source index the Note On arrived with (the track index under
    /// multi-track pairing; zero for the single-track helpers).
    pub const fn on_source(&self) -> usize {
        self.on_source
    }

    /// The source index the Note Off arrived with. May differ from
    /// [`Note::on_source`] when a note spans tracks.
    pub const fn off_source(&self) -> usize {
        self.off_source
    }

    /// Take the two timed events back out, with their source indexes.
    pub fn into_events(
        self,
    ) -> (
        (usize, Timed<TrackEvent<'a>>),
        (usize, Timed<TrackEvent<'a>>),
    ) {
        ((self.on_source, self.on), (self.off_source, self.off))
    }
}

impl<'a> Track<'a> {
    /// The pairing engine's output for this track: notes where their Note
    /// Ons sat, residual events in between. Lazy; events are cloned.
    pub fn notes_and_events(&self) -> impl Iterator<Item = NoteOrEvent<'a>> + '_ {
        notes_and_events(self.timed_events().map(|timed| (0usize, timed)))
    }

    /// Just the notes, in Note On order. Lazy; events are cloned.
    pub fn notes(&self) -> impl Iterator<Item = Note<'a>> + '_ {
        self.notes_and_events().filter_map(|item| match item {
            NoteOrEvent::Note(note) => Some(note),
            NoteOrEvent::Event { .. } => None,
        })
    }
}
