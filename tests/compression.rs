use midion::prelude::*;
use std::borrow::Cow;

fn note_on(delta: u32, key: u8, velocity: u8) -> TrackEvent<'static> {
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

fn note_off(delta: u32, key: u8, velocity: u8) -> TrackEvent<'static> {
    TrackEvent::new(
        delta,
        TrackMessage::ChannelVoice(ChannelVoiceMessage::new(
            Channel::One,
            VoiceEvent::NoteOff {
                key: Key::new_unchecked(key),
                velocity: Velocity::new_unchecked(velocity),
            },
        )),
    )
}

fn tempo(delta: u32, micros: u32) -> TrackEvent<'static> {
    TrackEvent::new(
        delta,
        TrackMessage::Meta(MetaMessage::Tempo(Tempo::from_micros_per_quarter_note(
            micros,
        ))),
    )
}

fn with(compression: CompressionPolicy) -> WriteSettings {
    WriteSettings { compression }
}

/// Decode a written chunk back into events, to inspect what survived.
fn reparse(bytes: &[u8]) -> Vec<TrackEvent<'static>> {
    Track::from_bytes(bytes, &ReadSettings::default())
        .unwrap()
        .into_owned()
        .events()
        .to_vec()
}

#[test]
fn running_status_omits_the_repeated_status_byte() {
    use pretty_assertions::assert_eq;

    let track = Track::new(vec![note_on(0, 0x3C, 0x40), note_on(0x10, 0x3E, 0x40)]);
    let bytes = track
        .to_bytes(&with(CompressionPolicy {
            use_running_status: true,
            ..CompressionPolicy::default()
        }))
        .unwrap();

    assert_eq!(
        bytes[8..],
        [
            0x00, 0x90, 0x3C, 0x40, // first NoteOn carries the status
            0x10, 0x3E, 0x40, // second rides the running status
            0x00, 0xFF, 0x2F, 0x00,
        ]
    );
}

#[test]
fn note_off_as_silent_note_on_feeds_running_status() {
    use pretty_assertions::assert_eq;

    let track = Track::new(vec![note_on(0, 0x3C, 0x64), note_off(0x60, 0x3C, 0x40)]);
    let bytes = track
        .to_bytes(&with(CompressionPolicy {
            use_running_status: true,
            note_off_as_silent_note_on: true,
            ..CompressionPolicy::default()
        }))
        .unwrap();

    assert_eq!(
        bytes[8..],
        [
            0x00, 0x90, 0x3C, 0x64, // NoteOn
            0x60, 0x3C, 0x00, // NoteOff, rewritten silent and status-less
            0x00, 0xFF, 0x2F, 0x00,
        ]
    );
}

#[test]
fn default_tempo_suppression_stops_at_the_first_non_default() {
    // S4: leading default dropped; a later default, after a real tempo
    // change, is material and must survive.
    let track = Track::new(vec![
        tempo(0, 500_000),
        tempo(10, 400_000),
        tempo(10, 500_000),
    ]);
    let bytes = track
        .to_bytes(&with(CompressionPolicy {
            delete_default_set_tempo: true,
            ..CompressionPolicy::default()
        }))
        .unwrap();

    let tempos: Vec<u32> = reparse(&bytes)
        .into_iter()
        .filter_map(|event| match event.event() {
            TrackMessage::Meta(MetaMessage::Tempo(t)) => Some(t.micros_per_quarter_note()),
            _ => None,
        })
        .collect();
    assert_eq!(tempos, [400_000, 500_000]);
}

#[test]
fn consecutive_leading_defaults_are_all_dropped() {
    let track = Track::new(vec![
        tempo(0, 500_000),
        tempo(0, 500_000),
        tempo(10, 400_000),
    ]);
    let bytes = track
        .to_bytes(&with(CompressionPolicy {
            delete_default_set_tempo: true,
            ..CompressionPolicy::default()
        }))
        .unwrap();

    let tempos: Vec<u32> = reparse(&bytes)
        .into_iter()
        .filter_map(|event| match event.event() {
            TrackMessage::Meta(MetaMessage::Tempo(t)) => Some(t.micros_per_quarter_note()),
            _ => None,
        })
        .collect();
    assert_eq!(tempos, [400_000]);
}

#[test]
fn the_three_suppression_latches_are_independent() {
    let track = Track::new(vec![
        TrackEvent::new(
            0,
            TrackMessage::Meta(MetaMessage::KeySignature(KeySignature::DEFAULT)),
        ),
        TrackEvent::new(
            0,
            TrackMessage::Meta(MetaMessage::TimeSignature(TimeSignature {
                numerator: 3,
                ..TimeSignature::DEFAULT
            })),
        ),
        tempo(0, 500_000),
    ]);
    let bytes = track
        .to_bytes(&with(CompressionPolicy {
            delete_default_set_tempo: true,
            delete_default_key_signature: true,
            delete_default_time_signature: true,
            ..CompressionPolicy::default()
        }))
        .unwrap();

    let events = reparse(&bytes);
    // The default key signature and default tempo vanish; the 3/4 time
    // signature is not a default and stays.
    assert_eq!(events.len(), 1);
    assert!(matches!(
        events[0].event(),
        TrackMessage::Meta(MetaMessage::TimeSignature(sig)) if sig.numerator == 3
    ));
}

#[test]
fn suppression_does_not_touch_families_without_their_flag() {
    let track = Track::new(vec![tempo(0, 500_000)]);
    let bytes = track
        .to_bytes(&with(CompressionPolicy {
            delete_default_key_signature: true,
            ..CompressionPolicy::default()
        }))
        .unwrap();
    assert_eq!(reparse(&bytes).len(), 1);
}

#[test]
fn unknown_meta_events_are_deleted_on_demand() {
    let track = Track::new(vec![
        TrackEvent::new(
            0,
            TrackMessage::Meta(MetaMessage::Unknown {
                kind: 0x60,
                data: Cow::Borrowed(&[0x01, 0x02]),
            }),
        ),
        note_on(5, 0x3C, 0x40),
    ]);

    let kept = reparse(&track.to_bytes(&with(CompressionPolicy::default())).unwrap());
    assert_eq!(kept.len(), 2);

    let cleaned = reparse(
        &track
            .to_bytes(&with(CompressionPolicy {
                delete_unknown_meta_events: true,
                ..CompressionPolicy::default()
            }))
            .unwrap(),
    );
    assert_eq!(cleaned.len(), 1);
    assert!(matches!(cleaned[0].event(), TrackMessage::ChannelVoice(_)));
}

#[test]
fn size_pass_agrees_for_every_flag_combination() {
    let track = Track::new(vec![
        tempo(0, 500_000),
        TrackEvent::new(
            0,
            TrackMessage::Meta(MetaMessage::KeySignature(KeySignature::DEFAULT)),
        ),
        TrackEvent::new(
            0,
            TrackMessage::Meta(MetaMessage::TimeSignature(TimeSignature::DEFAULT)),
        ),
        TrackEvent::new(
            0,
            TrackMessage::Meta(MetaMessage::Unknown {
                kind: 0x7E,
                data: Cow::Borrowed(&[0xAA]),
            }),
        ),
        note_on(0, 0x3C, 0x40),
        note_on(1, 0x3E, 0x40),
        note_off(2, 0x3C, 0x15),
        note_off(0, 0x3E, 0x00),
        tempo(4, 600_000),
        tempo(4, 500_000),
    ]);

    for bits in 0u8..64 {
        let settings = with(CompressionPolicy {
            use_running_status: bits & 1 != 0,
            note_off_as_silent_note_on: bits & 2 != 0,
            delete_unknown_meta_events: bits & 4 != 0,
            delete_default_set_tempo: bits & 8 != 0,
            delete_default_key_signature: bits & 16 != 0,
            delete_default_time_signature: bits & 32 != 0,
        });
        let bytes = track.to_bytes(&settings).unwrap();
        let declared = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]) as usize;
        assert_eq!(bytes.len() - 8, declared, "flags {bits:#08b}");
        assert_eq!(
            track.encoded_content_len(&settings).unwrap(),
            declared,
            "flags {bits:#08b}"
        );
    }
}
