#![doc = r#"
The byte sink the encoder writes into.

[`Writer`] mirrors the [`Reader`](crate::reader::Reader) primitive for
primitive: big-endian integers, variable-length quantities and raw byte runs.
It appends to a growable buffer; chunk length prefixes are written up front
from the size pass, never patched afterwards.
"#]

use alloc::vec::Vec;

use crate::error::WriteError;
use crate::vlq;

/// A growable byte sink.
#[derive(Debug, Default, Clone)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Create an empty writer.
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// The number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Append one byte.
    pub fn write_byte(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// Append a byte run.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append a big-endian `u16`.
    pub fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Append a big-endian `u32`.
    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Append a variable-length quantity.
    pub fn write_vlq(&mut self, value: u32) -> Result<(), WriteError> {
        vlq::write(value, &mut self.buf)?;
        Ok(())
    }

    /// Take the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// The written bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }
}

#[test]
fn mirrors_the_reader() {
    use crate::reader::Reader;

    let mut writer = Writer::new();
    writer.write_bytes(b"MTrk");
    writer.write_u32(12);
    writer.write_vlq(0x2000).unwrap();
    writer.write_u16(0x8001);
    writer.write_byte(0x2F);

    let bytes = writer.into_bytes();
    let mut reader = Reader::from_byte_slice(&bytes);
    assert_eq!(reader.read_array::<4>().unwrap(), *b"MTrk");
    assert_eq!(reader.read_u32().unwrap(), 12);
    assert_eq!(reader.read_vlq().unwrap(), 0x2000);
    assert_eq!(reader.read_u16().unwrap(), 0x8001);
    assert_eq!(reader.read_byte().unwrap(), 0x2F);
    assert!(reader.is_at_end());
}
