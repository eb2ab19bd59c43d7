use midion::prelude::*;

fn on(delta: u32, key: u8, velocity: u8) -> TrackEvent<'static> {
    TrackEvent::new(
        delta,
        TrackMessage::ChannelVoice(ChannelVoiceMessage::new(
            Channel::One,
            VoiceEvent::NoteOn {
                key: Key::new_unchecked(key),
                velocity: Velocity::new_unchecked(velocity),
            },
        )),
    )
}

fn off(delta: u32, key: u8) -> TrackEvent<'static> {
    TrackEvent::new(
        delta,
        TrackMessage::ChannelVoice(ChannelVoiceMessage::new(
            Channel::One,
            VoiceEvent::NoteOff {
                key: Key::new_unchecked(key),
                velocity: Velocity::ZERO,
            },
        )),
    )
}

fn marker(delta: u32, name: &'static [u8]) -> TrackEvent<'static> {
    TrackEvent::new(delta, TrackMessage::Meta(MetaMessage::Marker(name.into())))
}

fn times(track: &Track<'_>) -> Vec<i64> {
    track.timed_events().map(|timed| timed.time).collect()
}

#[test]
fn shifting_notes_rewrites_the_deltas() {
    use pretty_assertions::assert_eq;

    let mut track = Track::new(vec![on(0, 60, 100), off(96, 60), on(24, 62, 100), off(96, 62)]);

    let processed = track.process_notes(|note| note.set_time(note.time() + 100));
    assert_eq!(processed, 2);

    // Note times were 0 and 120; all four events moved by 100.
    assert_eq!(times(&track), [100, 196, 220, 316]);
    assert_eq!(track.events()[0].delta_ticks(), 100);
}

#[test]
fn an_action_that_changes_nothing_leaves_the_track_alone() {
    use pretty_assertions::assert_eq;

    let events = vec![
        marker(0, b"head"),
        on(10, 60, 100),
        marker(0, b"inside"),
        off(86, 60),
    ];
    let mut track = Track::new(events.clone());

    let mut seen = Vec::new();
    let processed = track.process_notes(|note| seen.push((note.time(), note.length())));

    assert_eq!(processed, 1);
    assert_eq!(seen, [(10, 86)]);
    // Byte-for-byte the same event list, same order, same deltas.
    assert_eq!(track.events(), events);
}

#[test]
fn resizing_keeps_the_onset() {
    let mut track = Track::new(vec![on(0, 60, 100), off(96, 60)]);
    track.process_notes(|note| note.set_length(48));
    assert_eq!(times(&track), [0, 48]);
}

#[test]
fn residual_events_survive_processing_in_position() {
    let mut track = Track::new(vec![
        marker(0, b"tempo-ish"),
        on(10, 60, 100),
        off(90, 60),
        marker(20, b"tail"),
    ]);

    track.process_notes(|note| note.set_time(note.time() + 10));

    // Markers stayed at ticks 0 and 120; the note now spans 20..=110.
    assert_eq!(times(&track), [0, 20, 110, 120]);
    assert!(matches!(
        track.events()[0].event(),
        TrackMessage::Meta(MetaMessage::Marker(_))
    ));
    assert!(matches!(
        track.events()[3].event(),
        TrackMessage::Meta(MetaMessage::Marker(_))
    ));
}

#[test]
fn remove_notes_takes_both_events_and_counts_notes() {
    let mut track = Track::new(vec![
        on(0, 60, 100),
        on(0, 64, 100),
        marker(5, b"keep"),
        off(5, 60),
        off(10, 64),
        off(10, 67), // orphan, untouchable
    ]);

    let removed = track.remove_notes(|note| note.key().number() == 60);
    assert_eq!(removed, 1);

    // The 64 note, the marker and the orphan survive at their times.
    assert_eq!(times(&track), [0, 5, 20, 30]);
    assert_eq!(track.len(), 4);

    let removed = track.remove_notes(|_| true);
    assert_eq!(removed, 1);
    assert_eq!(track.len(), 2);
}

#[test]
fn remove_timed_events_preserves_survivor_times() {
    let mut track = Track::new(vec![
        marker(10, b"a"),
        on(10, 60, 100),
        marker(10, b"b"),
        off(10, 60),
    ]);

    let removed = track.remove_timed_events(|timed| {
        matches!(timed.event.event(), TrackMessage::Meta(MetaMessage::Marker(_)))
    });
    assert_eq!(removed, 2);
    assert_eq!(times(&track), [20, 40]);
    assert_eq!(track.events()[0].delta_ticks(), 20);
    assert_eq!(track.events()[1].delta_ticks(), 20);
}

#[test]
fn the_predicate_sees_every_event_exactly_once() {
    let mut track = Track::new(vec![marker(0, b"a"), on(5, 60, 9), off(5, 60)]);
    let mut calls = 0;
    track.remove_timed_events(|_| {
        calls += 1;
        false
    });
    assert_eq!(calls, 3);
}

#[test]
fn file_level_processing_pairs_across_tracks() {
    use pretty_assertions::assert_eq;

    // The press lives in track 1, the release in track 2.
    let track_one = Track::new(vec![on(0, 60, 100)]);
    let track_two = Track::new(vec![off(50, 60)]);
    let mut file = MidiFile::new(
        Timing::new_ticks_per_quarter_note(480),
        Format::Simultaneous(vec![track_one, track_two]),
    );

    let mut lengths = Vec::new();
    let processed = file.process_notes(|note| {
        lengths.push(note.length());
        note.set_time(note.time() + 10);
    });
    assert_eq!(processed, 1);
    assert_eq!(lengths, [50]);

    // Each event went home to its own track, shifted.
    let tracks = file.tracks();
    assert_eq!(times(tracks[0]), [10]);
    assert_eq!(times(tracks[1]), [60]);
}

#[test]
fn file_level_removal_reaches_both_tracks() {
    let track_one = Track::new(vec![on(0, 60, 100), marker(5, b"keep")]);
    let track_two = Track::new(vec![off(50, 60)]);
    let mut file = MidiFile::new(
        Timing::new_ticks_per_quarter_note(480),
        Format::Simultaneous(vec![track_one, track_two]),
    );

    let removed = file.remove_notes(|_| true);
    assert_eq!(removed, 1);

    let tracks = file.tracks();
    assert_eq!(tracks[0].len(), 1);
    assert!(matches!(
        tracks[0].events()[0].event(),
        TrackMessage::Meta(MetaMessage::Marker(_))
    ));
    assert!(tracks[1].is_empty());
}

#[test]
fn equal_time_events_keep_their_rebuilt_order() {
    // After an edit forces a rebuild, the off of the first note and the on
    // of the second share tick 96; the rebuild keeps off-before-on because
    // the first note's events are accumulated first.
    let mut track = Track::new(vec![on(0, 60, 100), off(96, 60), on(0, 62, 100), off(96, 62)]);
    track.process_notes(|note| {
        if note.key().number() == 62 {
            note.set_length(100);
        }
    });

    assert_eq!(times(&track), [0, 96, 96, 196]);
    let kinds: Vec<u8> = track
        .events()
        .iter()
        .filter_map(|event| event.event().as_channel_voice())
        .map(|cv| cv.event().status_nibble())
        .collect();
    assert_eq!(kinds, [0x9, 0x8, 0x9, 0x8]);
}
