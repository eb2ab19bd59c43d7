use crate::error::{VlqError, WriteError};
use crate::events::{
    ChannelVoiceMessage, KeySignature, MetaMessage, Tempo, TimeSignature, TrackEvent,
    TrackMessage, VoiceEvent,
};
use crate::settings::CompressionPolicy;
use crate::{Velocity, vlq};

/// Drive one pass over a track's logical event sequence.
///
/// Both the byte-emitting pass and the size pass run through here, so they
/// cannot disagree: the traversal applies the compression policy, decides
/// per event whether the status byte is written, appends the synthetic End
/// of Track, and only then calls `handler` with `(event, write_status_byte)`.
///
/// State is pass-local: the running status byte, and one "still leading"
/// latch per suppressible meta family. A latch is consulted only while it is
/// set; the first non-default event of its family clears it for good, after
/// which nothing of that family is ever dropped.
pub(crate) fn traverse<'a, F>(
    events: &[TrackEvent<'a>],
    policy: &CompressionPolicy,
    mut handler: F,
) -> Result<(), WriteError>
where
    F: FnMut(&TrackEvent<'a>, bool) -> Result<(), WriteError>,
{
    let mut running_status: Option<u8> = None;
    let mut skip_set_tempo = true;
    let mut skip_key_signature = true;
    let mut skip_time_signature = true;

    for event in events {
        // The terminator is always synthetic; a stored one is not written.
        if event.event().is_end_of_track() {
            continue;
        }

        if policy.delete_unknown_meta_events
            && matches!(event.event(), TrackMessage::Meta(MetaMessage::Unknown { .. }))
        {
            continue;
        }

        let substituted = substitute_note_off(policy, event);
        let event = substituted.as_ref().unwrap_or(event);

        match event.event() {
            TrackMessage::Meta(MetaMessage::Tempo(tempo)) => {
                if skip_set_tempo {
                    if policy.delete_default_set_tempo && *tempo == Tempo::DEFAULT {
                        continue;
                    }
                    skip_set_tempo = false;
                }
            }
            TrackMessage::Meta(MetaMessage::KeySignature(sig)) => {
                if skip_key_signature {
                    if policy.delete_default_key_signature && *sig == KeySignature::DEFAULT {
                        continue;
                    }
                    skip_key_signature = false;
                }
            }
            TrackMessage::Meta(MetaMessage::TimeSignature(sig)) => {
                if skip_time_signature {
                    if policy.delete_default_time_signature && *sig == TimeSignature::DEFAULT {
                        continue;
                    }
                    skip_time_signature = false;
                }
            }
            _ => {}
        }

        let write_status = match event.event() {
            TrackMessage::ChannelVoice(cv) => {
                let status = cv.status_byte();
                let suppress = policy.use_running_status && running_status == Some(status);
                running_status = Some(status);
                !suppress
            }
            // Meta and SysEx events interrupt running status.
            _ => {
                running_status = None;
                true
            }
        };

        validate(event)?;
        handler(event, write_status)?;
    }

    let terminator = TrackEvent::new(0, TrackMessage::Meta(MetaMessage::EndOfTrack));
    handler(&terminator, true)
}

/// The `NoteOffAsSilentNoteOn` rewrite, when it applies.
fn substitute_note_off<'a>(
    policy: &CompressionPolicy,
    event: &TrackEvent<'a>,
) -> Option<TrackEvent<'a>> {
    if !policy.note_off_as_silent_note_on {
        return None;
    }
    let cv = event.event().as_channel_voice()?;
    let VoiceEvent::NoteOff { key, .. } = cv.event() else {
        return None;
    };
    Some(TrackEvent::new(
        event.delta_ticks(),
        TrackMessage::ChannelVoice(ChannelVoiceMessage::new(
            cv.channel(),
            VoiceEvent::NoteOn {
                key: *key,
                velocity: Velocity::ZERO,
            },
        )),
    ))
}

/// Reject quantities neither pass could encode, so the size pass and the
/// emit pass fail on exactly the same inputs.
fn validate(event: &TrackEvent<'_>) -> Result<(), WriteError> {
    if event.delta_ticks() > vlq::MAX {
        return Err(VlqError::TooLarge(event.delta_ticks()).into());
    }
    let payload_len = match event.event() {
        TrackMessage::Meta(meta) => meta.payload_len(),
        TrackMessage::SystemExclusive(sysex) => sysex.data().len(),
        TrackMessage::ChannelVoice(_) => 0,
    };
    if payload_len > vlq::MAX as usize {
        return Err(VlqError::TooLarge(u32::MAX).into());
    }
    Ok(())
}
