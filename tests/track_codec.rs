use midion::prelude::*;

/// Wrap track content in a complete `MTrk` chunk.
fn chunk(content: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"MTrk");
    bytes.extend_from_slice(&(content.len() as u32).to_be_bytes());
    bytes.extend_from_slice(content);
    bytes
}

fn parse(content: &[u8], settings: &ReadSettings) -> ReadResult<Track<'static>> {
    // Leak so the borrowed payloads get a 'static source; tests only.
    let bytes: &'static [u8] = Box::leak(chunk(content).into_boxed_slice());
    Track::from_bytes(bytes, settings)
}

#[test]
fn running_status_read_with_silent_note_on_normalization() {
    use pretty_assertions::assert_eq;

    // NoteOn C4 vel 64, then (running status) NoteOn C4 vel 0 after 96
    // ticks, which the default policy rewrites to a NoteOff.
    let content = [
        0x00, 0x90, 0x3C, 0x40, // delta 0, NoteOn
        0x60, 0x3C, 0x00, // delta 96, data bytes only
        0x00, 0xFF, 0x2F, 0x00, // End of Track
    ];
    let track = parse(&content, &ReadSettings::default()).unwrap();

    assert_eq!(
        track.events(),
        [
            TrackEvent::new(
                0,
                TrackMessage::ChannelVoice(ChannelVoiceMessage::new(
                    Channel::One,
                    VoiceEvent::NoteOn {
                        key: Key::MIDDLE_C,
                        velocity: Velocity::new(64).unwrap(),
                    },
                )),
            ),
            TrackEvent::new(
                96,
                TrackMessage::ChannelVoice(ChannelVoiceMessage::new(
                    Channel::One,
                    VoiceEvent::NoteOff {
                        key: Key::MIDDLE_C,
                        velocity: Velocity::ZERO,
                    },
                )),
            ),
        ]
    );
}

#[test]
fn silent_note_on_survives_under_the_lenient_policy() {
    let content = [
        0x00, 0x90, 0x3C, 0x00, // NoteOn with velocity 0
        0x00, 0xFF, 0x2F, 0x00,
    ];
    let settings = ReadSettings {
        silent_note_on: SilentNoteOnPolicy::NoteOn,
        ..ReadSettings::default()
    };
    let track = parse(&content, &settings).unwrap();
    assert!(matches!(
        track.events()[0].event(),
        TrackMessage::ChannelVoice(cv)
            if matches!(cv.event(), VoiceEvent::NoteOn { velocity, .. } if velocity.is_silent())
    ));
}

#[test]
fn uncompressed_round_trip_is_byte_exact() {
    use pretty_assertions::assert_eq;

    // A little of everything, all status bytes explicit, End of Track at
    // delta zero: re-encoding with no compression must reproduce it.
    let content = [
        0x00, 0x90, 0x3C, 0x40, // NoteOn
        0x60, 0x80, 0x3C, 0x00, // NoteOff
        0x00, 0xC0, 0x05, // ProgramChange
        0x10, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, // Set Tempo 500000
        0x00, 0xF0, 0x03, 0x43, 0x12, 0xF7, // SysEx
        0x00, 0xB1, 0x40, 0x7F, // ControlChange, channel 2
        0x81, 0x00, 0xE1, 0x00, 0x40, // PitchBend, two-byte delta
        0x00, 0xFF, 0x2F, 0x00, // End of Track
    ];
    let track = parse(&content, &ReadSettings::default()).unwrap();
    assert_eq!(track.len(), 7);

    let bytes = track.to_bytes(&WriteSettings::default()).unwrap();
    assert_eq!(bytes, chunk(&content));
}

#[test]
fn running_status_round_trips_to_the_same_events() {
    use pretty_assertions::assert_eq;

    let content = [
        0x00, 0x91, 0x3C, 0x40, // NoteOn channel 2
        0x05, 0x91, 0x3E, 0x40, // NoteOn channel 2 again
        0x05, 0x91, 0x40, 0x40, // and again
        0x00, 0x81, 0x3C, 0x20, // NoteOff
        0x00, 0xFF, 0x2F, 0x00,
    ];
    let track = parse(&content, &ReadSettings::default()).unwrap();

    let settings = WriteSettings {
        compression: CompressionPolicy {
            use_running_status: true,
            ..CompressionPolicy::default()
        },
    };
    let compressed = track.to_bytes(&settings).unwrap();
    // Three repeated status bytes collapse into one.
    assert_eq!(compressed.len(), chunk(&content).len() - 2);

    let reparsed = Track::from_bytes(&compressed, &ReadSettings::default()).unwrap();
    assert_eq!(reparsed.events(), track.events());
}

#[test]
fn missed_end_of_track_obeys_the_policy() {
    let content = [0x00, 0x90, 0x3C, 0x40];

    let err = parse(&content, &ReadSettings::default()).unwrap_err();
    assert!(matches!(
        err.kind(),
        ReaderErrorKind::ParseError(ParseError::Chunk(ChunkError::MissedEndOfTrack))
    ));

    let lenient = ReadSettings {
        missed_end_of_track: MissedEndOfTrackPolicy::Ignore,
        ..ReadSettings::default()
    };
    let track = parse(&content, &lenient).unwrap();
    assert_eq!(track.len(), 1);
}

#[test]
fn early_end_of_track_disagrees_with_the_declared_size() {
    // End of Track after four bytes, two declared bytes left over.
    let content = [0x00, 0xFF, 0x2F, 0x00, 0xAA, 0xBB];

    let err = parse(&content, &ReadSettings::default()).unwrap_err();
    assert!(matches!(
        err.kind(),
        ReaderErrorKind::ParseError(ParseError::Chunk(ChunkError::InvalidSize {
            declared: 6,
            consumed: 4,
        }))
    ));

    let lenient = ReadSettings {
        invalid_chunk_size: InvalidChunkSizePolicy::Ignore,
        ..ReadSettings::default()
    };
    let track = parse(&content, &lenient).unwrap();
    assert!(track.is_empty());
}

#[test]
fn a_leading_data_byte_is_an_unexpected_running_status() {
    let content = [0x00, 0x3C, 0x40, 0x00, 0xFF, 0x2F, 0x00];
    let err = parse(&content, &ReadSettings::default()).unwrap_err();
    assert!(matches!(
        err.kind(),
        ReaderErrorKind::ParseError(ParseError::Event(EventError::UnexpectedRunningStatus))
    ));
}

#[test]
fn a_stored_end_of_track_is_never_doubled() {
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
    track.push(TrackEvent::new(0, TrackMessage::Meta(MetaMessage::EndOfTrack)));

    let bytes = track.to_bytes(&WriteSettings::default()).unwrap();
    let eot = [0xFF, 0x2F, 0x00];
    let eot_count = bytes.windows(3).filter(|w| *w == eot).count();
    assert_eq!(eot_count, 1);
    assert_eq!(&bytes[bytes.len() - 4..], &[0x00, 0xFF, 0x2F, 0x00]);
}

#[test]
fn size_pass_agrees_with_the_emit_pass() {
    let content = [
        0x00, 0x92, 0x3C, 0x40, // NoteOn channel 3
        0x10, 0x82, 0x3C, 0x00, // NoteOff
        0x00, 0xFF, 0x06, 0x04, b'd', b'r', b'o', b'p', // Marker
        0x00, 0xF7, 0x02, 0xAB, 0xCD, // escape SysEx
        0x00, 0xFF, 0x2F, 0x00,
    ];
    let track = parse(&content, &ReadSettings::default()).unwrap();

    for use_running_status in [false, true] {
        for note_off_as_silent_note_on in [false, true] {
            let settings = WriteSettings {
                compression: CompressionPolicy {
                    use_running_status,
                    note_off_as_silent_note_on,
                    ..CompressionPolicy::default()
                },
            };
            let bytes = track.to_bytes(&settings).unwrap();
            let declared =
                u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]) as usize;
            assert_eq!(bytes.len() - 8, declared);
            assert_eq!(track.encoded_content_len(&settings).unwrap(), declared);
        }
    }
}
