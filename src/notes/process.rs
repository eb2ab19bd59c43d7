use alloc::vec;
use alloc::vec::Vec;

use crate::events::TrackEvent;
use crate::file::{MidiFile, Track};
use crate::notes::{Note, NoteOrEvent, notes_and_events};
use crate::timed::Timed;

impl<'a> Track<'a> {
    /// Run `action` on every note of this track, in Note On order.
    ///
    /// The action may move notes ([`Note::set_time`]) and resize them
    /// ([`Note::set_length`]). If any time or length actually changed, the
    /// track is rebuilt from the edited events: a stable sort by absolute
    /// time, then recomputed delta times. Events at equal times keep their
    /// relative order.
    ///
    /// Returns the number of notes processed.
    pub fn process_notes<F>(&mut self, mut action: F) -> usize
    where
        F: FnMut(&mut Note<'a>),
    {
        let mut items: Vec<NoteOrEvent<'a>> = self.notes_and_events().collect();

        let mut processed = 0;
        let mut changed = false;
        for item in &mut items {
            if let NoteOrEvent::Note(note) = item {
                let before = (note.time(), note.length());
                action(note);
                processed += 1;
                changed |= (note.time(), note.length()) != before;
            }
        }

        if changed {
            let mut timed = Vec::with_capacity(self.len());
            for item in items {
                match item {
                    NoteOrEvent::Note(note) => {
                        let ((_, on), (_, off)) = note.into_events();
                        timed.push(on);
                        timed.push(off);
                    }
                    NoteOrEvent::Event { event, .. } => timed.push(event),
                }
            }
            self.replace_with_timed(timed);
        }
        processed
    }

    /// Remove every note `predicate` matches, both of its events at once.
    ///
    /// Pairing happens first, so the two events of a note are removed (or
    /// kept) together, and orphan events are never touched. Returns the
    /// number of notes removed.
    pub fn remove_notes<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&Note<'a>) -> bool,
    {
        // Pair with each event's position as its source index, mark the
        // positions of matched notes, then let the timed-event removal
        // (which visits positions in order, exactly once) drop the marks.
        let mut marked = vec![false; self.len()];
        let mut removed = 0;

        for item in notes_and_events(self.timed_events().enumerate()) {
            if let NoteOrEvent::Note(note) = item
                && predicate(&note)
            {
                marked[note.on_source()] = true;
                marked[note.off_source()] = true;
                removed += 1;
            }
        }

        let mut position = 0;
        self.remove_timed_events(|_| {
            let hit = marked[position];
            position += 1;
            hit
        });
        removed
    }

    /// Remove every event `predicate` matches, presented with its absolute
    /// time.
    ///
    /// The predicate is evaluated exactly once per event, in order. Removal
    /// keeps the survivors at their absolute times by recomputing their
    /// delta times; no reordering happens.
    ///
    /// Returns the number of events removed.
    pub fn remove_timed_events<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&Timed<TrackEvent<'a>>) -> bool,
    {
        let events = core::mem::take(&mut self.events);
        let mut kept = Vec::with_capacity(events.len());
        let mut removed = 0;

        let mut time = 0i64;
        let mut previous_kept = 0i64;
        for event in events {
            time += i64::from(event.delta_ticks());
            let timed = Timed::new(time, event);
            if predicate(&timed) {
                removed += 1;
                continue;
            }
            let mut event = timed.event;
            event.set_delta_ticks((time - previous_kept).clamp(0, i64::from(crate::vlq::MAX)) as u32);
            previous_kept = time;
            kept.push(event);
        }

        self.events = kept;
        removed
    }
}

impl<'a> MidiFile<'a> {
    /// Run `action` on every note of the file, across all tracks.
    ///
    /// Events are merged in absolute time (file order breaking ties), so a
    /// note whose Note Off lives in another track than its Note On is still
    /// one note. Edited events go back to the track each came from, and any
    /// track that received edits is canonicalized.
    ///
    /// Returns the number of notes processed.
    pub fn process_notes<F>(&mut self, mut action: F) -> usize
    where
        F: FnMut(&mut Note<'a>),
    {
        let tracks = self.tracks_mut();

        let mut merged: Vec<(usize, Timed<TrackEvent<'a>>)> = Vec::new();
        for (index, track) in tracks.iter().enumerate() {
            merged.extend(track.timed_events().map(|timed| (index, timed)));
        }
        merged.sort_by_key(|(_, timed)| timed.time);

        let mut items: Vec<NoteOrEvent<'a>> = notes_and_events(merged).collect();

        let mut processed = 0;
        let mut changed = false;
        for item in &mut items {
            if let NoteOrEvent::Note(note) = item {
                let before = (note.time(), note.length());
                action(note);
                processed += 1;
                changed |= (note.time(), note.length()) != before;
            }
        }

        if changed {
            let mut per_track: Vec<Vec<Timed<TrackEvent<'a>>>> =
                (0..tracks.len()).map(|_| Vec::new()).collect();
            for item in items {
                match item {
                    NoteOrEvent::Note(note) => {
                        let ((on_source, on), (off_source, off)) = note.into_events();
                        per_track[on_source].push(on);
                        per_track[off_source].push(off);
                    }
                    NoteOrEvent::Event { source, event } => per_track[source].push(event),
                }
            }
            for (track, timed) in tracks.into_iter().zip(per_track) {
                track.replace_with_timed(timed);
            }
        }
        processed
    }

    /// Remove every note `predicate` matches, across all tracks.
    ///
    /// Returns the number of notes removed.
    pub fn remove_notes<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&Note<'a>) -> bool,
    {
        let tracks = self.tracks_mut();

        // Tag every event with an ordinal into a (track, position) table so
        // a matched note can mark its events wherever they live.
        let mut table: Vec<(usize, usize)> = Vec::new();
        let mut merged: Vec<(usize, Timed<TrackEvent<'a>>)> = Vec::new();
        for (track_index, track) in tracks.iter().enumerate() {
            for (position, timed) in track.timed_events().enumerate() {
                merged.push((table.len(), timed));
                table.push((track_index, position));
            }
        }
        merged.sort_by_key(|(_, timed)| timed.time);

        let mut marked: Vec<Vec<bool>> = tracks.iter().map(|t| vec![false; t.len()]).collect();
        let mut removed = 0;
        for item in notes_and_events(merged) {
            if let NoteOrEvent::Note(note) = item
                && predicate(&note)
            {
                let (on_track, on_position) = table[note.on_source()];
                let (off_track, off_position) = table[note.off_source()];
                marked[on_track][on_position] = true;
                marked[off_track][off_position] = true;
                removed += 1;
            }
        }

        for (track, marks) in tracks.into_iter().zip(marked) {
            let mut position = 0;
            track.remove_timed_events(|_| {
                let hit = marks[position];
                position += 1;
                hit
            });
        }
        removed
    }
}
