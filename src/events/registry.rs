use alloc::collections::BTreeMap;

use crate::events::meta::{MetaMessage, is_standard_meta_type};
use crate::file::UnknownChunk;
use crate::{ChunkError, EventError};

/// Decodes the payload of a user-registered meta event type.
///
/// Receives the type byte and the payload; returns any [`MetaMessage`]
/// (usually a normalized [`MetaMessage::Unknown`], but mapping onto a
/// standard variant is allowed).
pub type MetaDecoder = fn(kind: u8, data: &[u8]) -> Result<MetaMessage<'static>, EventError>;

/// Decodes the payload of a user-registered chunk identifier.
pub type ChunkDecoder = fn(id: [u8; 4], data: &[u8]) -> Result<UnknownChunk<'static>, ChunkError>;

#[doc = r#"
User-registered decoders for meta event types and chunk identifiers the
Standard MIDI File specification leaves open.

A registration that would shadow a built-in decoder (a standard meta type
byte, a type byte with its leading bit set, or the `MThd`/`MTrk` chunk
identifiers) is silently ignored; the registry is consulted only where the
built-in tables come up empty.

# Example
```rust
use midion::prelude::*;
use std::borrow::Cow;

fn decode_stamp(kind: u8, data: &[u8]) -> Result<MetaMessage<'static>, EventError> {
    Ok(MetaMessage::Unknown {
        kind,
        data: Cow::Owned(data.to_ascii_uppercase()),
    })
}

let mut registry = EventRegistry::default();
registry.register_meta(0x60, decode_stamp);
registry.register_meta(0x51, decode_stamp); // standard Set Tempo: ignored

assert!(registry.meta_decoder(0x60).is_some());
assert!(registry.meta_decoder(0x51).is_none());
```
"#]
#[derive(Debug, Clone, Default)]
pub struct EventRegistry {
    meta: BTreeMap<u8, MetaDecoder>,
    chunks: BTreeMap<[u8; 4], ChunkDecoder>,
}

impl EventRegistry {
    /// Register a decoder for a meta event type byte.
    ///
    /// Returns `true` if the registration was accepted.
    pub fn register_meta(&mut self, kind: u8, decoder: MetaDecoder) -> bool {
        if kind > 0x7F || is_standard_meta_type(kind) {
            return false;
        }
        self.meta.insert(kind, decoder);
        true
    }

    /// Register a decoder for a chunk identifier.
    ///
    /// Returns `true` if the registration was accepted.
    pub fn register_chunk(&mut self, id: [u8; 4], decoder: ChunkDecoder) -> bool {
        if &id == b"MThd" || &id == b"MTrk" {
            return false;
        }
        self.chunks.insert(id, decoder);
        true
    }

    /// The decoder registered for a meta type byte, if any.
    pub fn meta_decoder(&self, kind: u8) -> Option<MetaDecoder> {
        self.meta.get(&kind).copied()
    }

    /// The decoder registered for a chunk identifier, if any.
    pub fn chunk_decoder(&self, id: [u8; 4]) -> Option<ChunkDecoder> {
        self.chunks.get(&id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::borrow::Cow;

    fn upper(kind: u8, data: &[u8]) -> Result<MetaMessage<'static>, EventError> {
        Ok(MetaMessage::Unknown {
            kind,
            data: Cow::Owned(data.to_ascii_uppercase()),
        })
    }

    fn keep(id: [u8; 4], data: &[u8]) -> Result<UnknownChunk<'static>, ChunkError> {
        Ok(UnknownChunk::new(id, data.to_vec()))
    }

    #[test]
    fn malformed_registrants_are_ignored() {
        let mut registry = EventRegistry::default();

        assert!(registry.register_meta(0x60, upper));
        assert!(!registry.register_meta(0x51, upper)); // Set Tempo
        assert!(!registry.register_meta(0x80, upper)); // status range
        assert!(registry.meta_decoder(0x51).is_none());
        assert!(registry.meta_decoder(0x80).is_none());

        assert!(registry.register_chunk(*b"XFIH", keep));
        assert!(!registry.register_chunk(*b"MTrk", keep));
        assert!(registry.chunk_decoder(*b"MTrk").is_none());
        assert!(registry.chunk_decoder(*b"XFIH").is_some());
    }
}
