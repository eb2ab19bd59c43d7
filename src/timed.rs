#![doc = r#"
Projection between delta times and absolute times.

On the wire every event states its distance from the previous one; most
editing wants absolute positions instead. [`project`] materializes the
running sum lazily; [`collapse`] is the inverse and the canonicalization
step after any bulk time edit: a *stable* sort by absolute time, then a
delta recomputation. Stability matters: events at the same tick keep their
relative order, which tie-break-sensitive material (a program change right
before its note) relies on.
"#]

use alloc::vec::Vec;

use crate::events::TrackEvent;
use crate::file::Track;
use crate::vlq;

#[doc = r#"
Something placed at an absolute time, in ticks from the start of its track.

For any contiguous projected sequence the times are non-decreasing; user
edits may break that, and [`collapse`] restores it.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timed<T> {
    /// Ticks from the start of the track.
    pub time: i64,
    /// The thing placed there.
    pub event: T,
}

impl<T> Timed<T> {
    /// Place `event` at `time`.
    pub const fn new(time: i64, event: T) -> Self {
        Self { time, event }
    }

    /// Keep the time, replace the payload.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Timed<U> {
        Timed {
            time: self.time,
            event: f(self.event),
        }
    }
}

/// Project a delta-timed sequence onto absolute times, lazily.
pub fn project<'a, I>(events: I) -> impl Iterator<Item = Timed<TrackEvent<'a>>>
where
    I: IntoIterator<Item = TrackEvent<'a>>,
{
    let mut time = 0i64;
    events.into_iter().map(move |event| {
        time += i64::from(event.delta_ticks());
        Timed::new(time, event)
    })
}

/// Canonicalize an absolutely-timed sequence back into delta times.
///
/// Events are stably sorted by time, then each delta is recomputed as the
/// distance to its literal predecessor (the first, to tick zero). After the
/// sort only the first delta can come out negative; it clamps to zero, and
/// the spacing between events is preserved. Gaps beyond what a VLQ can hold
/// clamp to the representable maximum.
pub fn collapse<'a>(mut timed: Vec<Timed<TrackEvent<'a>>>) -> Vec<TrackEvent<'a>> {
    timed.sort_by_key(|t| t.time);

    let mut previous = 0i64;
    timed
        .into_iter()
        .map(|t| {
            let delta = (t.time - previous).clamp(0, i64::from(vlq::MAX)) as u32;
            previous = t.time;
            let mut event = t.event;
            event.set_delta_ticks(delta);
            event
        })
        .collect()
}

impl<'a> Track<'a> {
    /// The events with their absolute times, lazily, cloning each event.
    pub fn timed_events(&self) -> impl Iterator<Item = Timed<TrackEvent<'a>>> + '_ {
        let mut time = 0i64;
        self.events().iter().map(move |event| {
            time += i64::from(event.delta_ticks());
            Timed::new(time, event.clone())
        })
    }

    /// Replace this track's events with an absolutely-timed sequence,
    /// canonicalizing it (stable sort, recomputed deltas).
    pub fn replace_with_timed(&mut self, timed: Vec<Timed<TrackEvent<'a>>>) {
        self.events = collapse(timed);
    }
}
