use midion::notes::{NoteOrEvent, notes_and_events};
use midion::prelude::*;

fn on(delta: u32, channel: Channel, key: u8, velocity: u8) -> TrackEvent<'static> {
    TrackEvent::new(
        delta,
        TrackMessage::ChannelVoice(ChannelVoiceMessage::new(
            channel,
            VoiceEvent::NoteOn {
                key: Key::new_unchecked(key),
                velocity: Velocity::new_unchecked(velocity),
            },
        )),
    )
}

fn off(delta: u32, channel: Channel, key: u8, velocity: u8) -> TrackEvent<'static> {
    TrackEvent::new(
        delta,
        TrackMessage::ChannelVoice(ChannelVoiceMessage::new(
            channel,
            VoiceEvent::NoteOff {
                key: Key::new_unchecked(key),
                velocity: Velocity::new_unchecked(velocity),
            },
        )),
    )
}

fn marker(delta: u32, name: &'static [u8]) -> TrackEvent<'static> {
    TrackEvent::new(
        delta,
        TrackMessage::Meta(MetaMessage::Marker(name.into())),
    )
}

fn pair(events: Vec<TrackEvent<'static>>) -> Vec<NoteOrEvent<'static>> {
    Track::new(events).notes_and_events().collect()
}

#[test]
fn a_simple_press_and_release_makes_one_note() {
    let items = pair(vec![on(0, Channel::One, 60, 100), off(96, Channel::One, 60, 64)]);

    assert_eq!(items.len(), 1);
    let NoteOrEvent::Note(note) = &items[0] else {
        panic!("expected a note");
    };
    assert_eq!(note.time(), 0);
    assert_eq!(note.length(), 96);
    assert_eq!(note.key().number(), 60);
    assert_eq!(note.velocity().value(), 100);
    assert_eq!(note.off_velocity().value(), 64);
}

#[test]
fn overlapping_presses_of_one_key_pair_newest_first() {
    // S5: on@0, on@10, off@20, off@30. The inner pair is (10, 20), the
    // outer (0, 30); the outer is emitted first because its NoteOn came
    // first and the head drains only once it completes.
    let items = pair(vec![
        on(0, Channel::One, 60, 100),
        on(10, Channel::One, 60, 100),
        off(10, Channel::One, 60, 0),
        off(10, Channel::One, 60, 0),
    ]);

    let notes: Vec<(i64, i64)> = items
        .into_iter()
        .filter_map(NoteOrEvent::note)
        .map(|n| (n.time(), n.length()))
        .collect();
    assert_eq!(notes, [(0, 30), (10, 10)]);
}

#[test]
fn notes_are_emitted_at_their_note_on_positions() {
    // A note on channel 2 opens before and closes after a whole note on
    // channel 1; output order follows the Note Ons.
    let items = pair(vec![
        on(0, Channel::Two, 48, 80),
        on(10, Channel::One, 60, 100),
        off(10, Channel::One, 60, 0),
        off(10, Channel::Two, 48, 0),
    ]);

    let summary: Vec<(u8, i64, i64)> = items
        .into_iter()
        .filter_map(NoteOrEvent::note)
        .map(|n| (n.channel().bits(), n.time(), n.length()))
        .collect();
    assert_eq!(summary, [(1, 0, 30), (0, 10, 10)]);
}

#[test]
fn residuals_keep_their_positions_between_notes() {
    let items = pair(vec![
        marker(0, b"before"),
        on(5, Channel::One, 60, 100),
        marker(5, b"inside"),
        off(10, Channel::One, 60, 0),
        marker(5, b"after"),
    ]);

    let summary: Vec<&str> = items
        .iter()
        .map(|item| match item {
            NoteOrEvent::Note(_) => "note",
            NoteOrEvent::Event { event, .. } => match event.event.event() {
                TrackMessage::Meta(MetaMessage::Marker(name)) => {
                    std::str::from_utf8(name).unwrap()
                }
                _ => "?",
            },
        })
        .collect();

    // "before" is emitted immediately (nothing pending); "inside" waits for
    // the note it is buffered behind; "after" flows straight through again.
    assert_eq!(summary, ["before", "note", "inside", "after"]);
}

#[test]
fn an_orphan_release_is_a_residual_not_a_note() {
    let items = pair(vec![off(0, Channel::One, 60, 0), on(5, Channel::One, 60, 9)]);

    assert_eq!(items.len(), 2);
    assert!(matches!(&items[0], NoteOrEvent::Event { event, .. }
        if matches!(
            event.event.event(),
            TrackMessage::ChannelVoice(cv) if matches!(cv.event(), VoiceEvent::NoteOff { .. })
        )));
    // The unresolved press flushes as a residual too.
    assert!(matches!(&items[1], NoteOrEvent::Event { .. }));
}

#[test]
fn distinct_identities_do_not_interfere() {
    // Same key on two channels, same channel on two keys.
    let items = pair(vec![
        on(0, Channel::One, 60, 1),
        on(0, Channel::Two, 60, 2),
        on(0, Channel::One, 62, 3),
        off(10, Channel::Two, 60, 0),
        off(10, Channel::One, 60, 0),
        off(10, Channel::One, 62, 0),
    ]);

    let notes: Vec<(u8, u8, i64)> = items
        .into_iter()
        .filter_map(NoteOrEvent::note)
        .map(|n| (n.channel().bits(), n.key().number(), n.length()))
        .collect();
    assert_eq!(notes, [(0, 60, 20), (1, 60, 10), (0, 62, 30)]);
}

#[test]
fn the_engine_is_lazy() {
    // An endless stream of releases (each a residual, nothing ever
    // pending): if the engine buffered its input, this would never return.
    let endless = (0..).map(|i| {
        (
            0usize,
            Timed::new(i as i64, off(0, Channel::One, 60, 0)),
        )
    });
    let first = notes_and_events(endless).next();
    assert!(matches!(first, Some(NoteOrEvent::Event { .. })));
}

#[test]
fn sources_ride_through_the_engine() {
    let input = vec![
        (7usize, Timed::new(0, on(0, Channel::One, 60, 100))),
        (9usize, Timed::new(50, off(0, Channel::One, 60, 0))),
        (3usize, Timed::new(60, marker(0, b"tail"))),
    ];
    let items: Vec<NoteOrEvent> = notes_and_events(input).collect();

    let NoteOrEvent::Note(note) = &items[0] else {
        panic!("expected a note");
    };
    assert_eq!(note.on_source(), 7);
    assert_eq!(note.off_source(), 9);
    assert!(matches!(&items[1], NoteOrEvent::Event { source: 3, .. }));
}

#[test]
fn track_notes_skips_residuals() {
    let track = Track::new(vec![
        marker(0, b"head"),
        on(0, Channel::One, 60, 100),
        off(10, Channel::One, 60, 0),
        on(0, Channel::One, 64, 100),
        // left hanging
    ]);

    let notes: Vec<Note> = track.notes().collect();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].key().number(), 60);
}
