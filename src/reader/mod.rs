#![doc = r#"
A positioned cursor over raw MIDI bytes.

[`Reader`] owns nothing: it walks a borrowed byte slice and hands out
sub-slices, so parsed events can keep borrowing their payloads from the
source buffer. Errors carry the absolute offset at which they were detected,
which stays meaningful inside track chunks because a bounded sub-reader is
created with [`Reader::with_offset`].
"#]

mod error;
pub use error::*;

use crate::error::VlqError;
use crate::vlq;

/// A cursor over a byte slice.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
    offset: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader over a byte slice.
    pub const fn from_byte_slice(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            offset: 0,
        }
    }

    /// Create a reader whose reported positions start at `offset`.
    ///
    /// Used for bounded sub-readers over chunk bodies, so their errors point
    /// into the enclosing file.
    pub const fn with_offset(bytes: &'a [u8], offset: usize) -> Self {
        Self {
            bytes,
            pos: 0,
            offset,
        }
    }

    /// The current position, relative to the original source.
    pub const fn buffer_position(&self) -> usize {
        self.offset + self.pos
    }

    /// The number of unread bytes.
    pub const fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// True once every byte has been consumed.
    pub const fn is_at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Look at the next byte without consuming it.
    pub fn peek_byte(&self) -> ReadResult<u8> {
        self.bytes
            .get(self.pos)
            .copied()
            .ok_or_else(|| ReaderError::oob(self.buffer_position()))
    }

    /// Consume one byte.
    pub fn read_byte(&mut self) -> ReadResult<u8> {
        let byte = self.peek_byte()?;
        self.pos += 1;
        Ok(byte)
    }

    /// Consume `count` bytes, borrowing them from the source.
    pub fn read_bytes(&mut self, count: usize) -> ReadResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(count)
            .filter(|end| *end <= self.bytes.len())
            .ok_or_else(|| ReaderError::oob(self.buffer_position()))?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    /// Consume exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let slice = self.read_bytes(N)?;
        let mut array = [0u8; N];
        array.copy_from_slice(slice);
        Ok(array)
    }

    /// Consume a big-endian `u16`.
    pub fn read_u16(&mut self) -> ReadResult<u16> {
        self.read_array().map(u16::from_be_bytes)
    }

    /// Consume a big-endian `u32`.
    pub fn read_u32(&mut self) -> ReadResult<u32> {
        self.read_array().map(u32::from_be_bytes)
    }

    /// Consume a variable-length quantity.
    ///
    /// Truncation is reported as [`VlqError::Truncated`] rather than an
    /// out-of-bounds read, so a caller can tell a bad quantity from a short
    /// buffer elsewhere.
    pub fn read_vlq(&mut self) -> ReadResult<u32> {
        let at = self.buffer_position();
        let (value, consumed) = vlq::read(&self.bytes[self.pos..])
            .map_err(|e: VlqError| ReaderError::parse(at, e))?;
        self.pos += consumed;
        Ok(value)
    }

    /// Discard `count` bytes.
    pub fn skip(&mut self, count: usize) -> ReadResult<()> {
        self.read_bytes(count).map(|_| ())
    }
}
