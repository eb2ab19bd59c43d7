#![doc = r#"
The streaming pairing engine.

The problem: given timed events in order, emit [`Note`]s and residual events
such that every output item sits where the *earlier* of its defining events
sat. A note appears at its Note On's position, even though it cannot be
finished until its Note Off arrives, arbitrarily many events later.

The engine keeps a `pending` list of descriptors: open or completed notes,
and the non-note events that arrived while something earlier was still open.
It lives in a slab (a plain vector with a free list), linked into a doubly
linked list, because descriptors are removed from the head while the tail
grows: a naive vector would pay for every removal. Open presses are also
indexed by [`NoteId`], a stack per identity, so releases match the newest
press first (overlapping presses of one key pair innermost-first).

Whenever a release completes the descriptor at the *head* of the list, the
head run of completed descriptors is emitted at once; an unresolved press
further back holds everything behind it. At end of input whatever is still
pending is flushed in order, unresolved presses degrading to residuals.

Amortized, every event is touched a constant number of times.
"#]

use alloc::collections::{BTreeMap, VecDeque};
use alloc::vec::Vec;

use crate::events::{TrackEvent, TrackMessage, VoiceEvent};
use crate::notes::{Note, NoteId};
use crate::timed::Timed;
use crate::Velocity;

/// One output item of the pairing engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteOrEvent<'a> {
    /// A completed (or, after flush, unresolved) note
    Note(Note<'a>),
    /// An event that is not part of any note
    Event {
        /// The index the event arrived with
        source: usize,
        /// The event and its absolute time
        event: Timed<TrackEvent<'a>>,
    },
}

impl<'a> NoteOrEvent<'a> {
    /// The note, if this item is one.
    pub fn note(self) -> Option<Note<'a>> {
        match self {
            NoteOrEvent::Note(note) => Some(note),
            NoteOrEvent::Event { .. } => None,
        }
    }

    /// The absolute time of the item's defining event (a note's Note On).
    pub const fn time(&self) -> i64 {
        match self {
            NoteOrEvent::Note(note) => note.time(),
            NoteOrEvent::Event { event, .. } => event.time,
        }
    }
}

/// Pair an indexed timed-event sequence.
///
/// Each input item is `(source, event)`; the source index rides along and
/// comes back out on notes and residuals, which is how multi-track
/// processing restores events to their tracks.
pub fn notes_and_events<'a, I>(input: I) -> NotesAndEvents<'a, I::IntoIter>
where
    I: IntoIterator<Item = (usize, Timed<TrackEvent<'a>>)>,
{
    NotesAndEvents {
        input: input.into_iter(),
        slots: Vec::new(),
        free: Vec::new(),
        head: None,
        tail: None,
        open: BTreeMap::new(),
        ready: VecDeque::new(),
        exhausted: false,
    }
}

/// The lazy pairing iterator. See [`notes_and_events`].
#[derive(Debug)]
pub struct NotesAndEvents<'a, I> {
    input: I,
    slots: Vec<Slot<'a>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    open: BTreeMap<NoteId, Vec<usize>>,
    ready: VecDeque<NoteOrEvent<'a>>,
    exhausted: bool,
}

#[derive(Debug)]
struct Slot<'a> {
    prev: Option<usize>,
    next: Option<usize>,
    body: Option<Body<'a>>,
}

#[derive(Debug)]
enum Body<'a> {
    Note {
        id: NoteId,
        velocity: Velocity,
        on_source: usize,
        on: Timed<TrackEvent<'a>>,
        off: Option<Release<'a>>,
    },
    Residual {
        source: usize,
        event: Timed<TrackEvent<'a>>,
    },
}

#[derive(Debug)]
struct Release<'a> {
    velocity: Velocity,
    source: usize,
    event: Timed<TrackEvent<'a>>,
}

impl<'a, I> Iterator for NotesAndEvents<'a, I>
where
    I: Iterator<Item = (usize, Timed<TrackEvent<'a>>)>,
{
    type Item = NoteOrEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.ready.pop_front() {
                return Some(item);
            }
            if self.exhausted {
                return None;
            }
            match self.input.next() {
                Some((source, timed)) => self.ingest(source, timed),
                None => {
                    self.exhausted = true;
                    self.flush();
                }
            }
        }
    }
}

impl<'a, I> NotesAndEvents<'a, I> {
    fn ingest(&mut self, source: usize, timed: Timed<TrackEvent<'a>>) {
        match classify(&timed) {
            Classified::On { id, velocity } => {
                let handle = self.append(Body::Note {
                    id,
                    velocity,
                    on_source: source,
                    on: timed,
                    off: None,
                });
                self.open.entry(id).or_default().push(handle);
            }
            Classified::Off { id, velocity } => {
                match self.pop_open(id) {
                    Some(handle) => {
                        let slot = &mut self.slots[handle];
                        if let Some(Body::Note { off, .. }) = slot.body.as_mut() {
                            *off = Some(Release {
                                velocity,
                                source,
                                event: timed,
                            });
                        }
                    }
                    // A release with no press: a residual, in position.
                    None => {
                        self.append(Body::Residual {
                            source,
                            event: timed,
                        });
                    }
                }
            }
            Classified::Other => {
                self.append(Body::Residual {
                    source,
                    event: timed,
                });
            }
        }
        self.drain_head();
    }

    /// Pop the newest open press for `id`, skipping handles whose slot is no
    /// longer an open note of that identity.
    fn pop_open(&mut self, id: NoteId) -> Option<usize> {
        let stack = self.open.get_mut(&id)?;
        while let Some(handle) = stack.pop() {
            let live = matches!(
                self.slots.get(handle).and_then(|slot| slot.body.as_ref()),
                Some(Body::Note {
                    id: slot_id,
                    off: None,
                    ..
                }) if *slot_id == id
            );
            if live {
                return Some(handle);
            }
        }
        None
    }

    /// Emit the run of completed descriptors at the head of `pending`.
    fn drain_head(&mut self) {
        while let Some(handle) = self.head {
            let complete = match self.slots[handle].body.as_ref() {
                Some(Body::Note { off, .. }) => off.is_some(),
                Some(Body::Residual { .. }) => true,
                None => true,
            };
            if !complete {
                break;
            }
            if let Some(body) = self.unlink_head() {
                self.emit(body);
            }
        }
    }

    /// Emit everything still pending, in order. Unresolved presses degrade
    /// to residual events.
    fn flush(&mut self) {
        while self.head.is_some() {
            if let Some(body) = self.unlink_head() {
                self.emit(body);
            }
        }
        self.open.clear();
    }

    fn emit(&mut self, body: Body<'a>) {
        let item = match body {
            Body::Note {
                id,
                velocity,
                on_source,
                on,
                off: Some(release),
            } => NoteOrEvent::Note(Note::from_parts(
                id,
                velocity,
                release.velocity,
                on_source,
                on,
                release.source,
                release.event,
            )),
            Body::Note {
                on_source,
                on,
                off: None,
                ..
            } => NoteOrEvent::Event {
                source: on_source,
                event: on,
            },
            Body::Residual { source, event } => NoteOrEvent::Event { source, event },
        };
        self.ready.push_back(item);
    }

    /// Link a new descriptor at the tail. Returns its handle.
    fn append(&mut self, body: Body<'a>) -> usize {
        let handle = match self.free.pop() {
            Some(handle) => {
                self.slots[handle] = Slot {
                    prev: self.tail,
                    next: None,
                    body: Some(body),
                };
                handle
            }
            None => {
                self.slots.push(Slot {
                    prev: self.tail,
                    next: None,
                    body: Some(body),
                });
                self.slots.len() - 1
            }
        };
        match self.tail {
            Some(tail) => self.slots[tail].next = Some(handle),
            None => self.head = Some(handle),
        }
        self.tail = Some(handle);
        handle
    }

    /// Unlink the head descriptor and recycle its slot. Always advances the
    /// head when there is one.
    fn unlink_head(&mut self) -> Option<Body<'a>> {
        let handle = self.head?;
        let slot = &mut self.slots[handle];
        let body = slot.body.take();
        let next = slot.next;
        slot.next = None;
        slot.prev = None;
        self.head = next;
        match next {
            Some(next) => self.slots[next].prev = None,
            None => self.tail = None,
        }
        self.free.push(handle);
        body
    }
}

enum Classified {
    On { id: NoteId, velocity: Velocity },
    Off { id: NoteId, velocity: Velocity },
    Other,
}

fn classify(timed: &Timed<TrackEvent<'_>>) -> Classified {
    let TrackMessage::ChannelVoice(cv) = timed.event.event() else {
        return Classified::Other;
    };
    match cv.event() {
        VoiceEvent::NoteOn { key, velocity } => Classified::On {
            id: NoteId::new(cv.channel(), *key),
            velocity: *velocity,
        },
        VoiceEvent::NoteOff { key, velocity } => Classified::Off {
            id: NoteId::new(cv.channel(), *key),
            velocity: *velocity,
        },
        _ => Classified::Other,
    }
}
