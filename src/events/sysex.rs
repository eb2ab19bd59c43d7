use alloc::borrow::Cow;

use crate::reader::{ReadResult, Reader};
use crate::vlq;
use crate::writer::Writer;

#[doc = r#"
A System Exclusive message, carried in a track as
`F0 <vlq length> <payload>` or `F7 <vlq length> <payload>`.

The `F0` form is an ordinary SysEx transmission (the payload conventionally
ends with `F7`). The `F7` "escape" form dumps its payload onto the output
verbatim, which writers use for split SysEx packets and for smuggling
arbitrary bytes. Both forms clear running status.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemExclusiveMessage<'a> {
    kind: SysExKind,
    data: Cow<'a, [u8]>,
}

/// Which of the two SysEx transport forms a message uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SysExKind {
    /// Status byte `F0`
    Normal,
    /// Status byte `F7`
    Escape,
}

impl<'a> SystemExclusiveMessage<'a> {
    /// Create a normal (`F0`) message.
    pub fn new(data: impl Into<Cow<'a, [u8]>>) -> Self {
        Self {
            kind: SysExKind::Normal,
            data: data.into(),
        }
    }

    /// Create an escape (`F7`) message.
    pub fn escape(data: impl Into<Cow<'a, [u8]>>) -> Self {
        Self {
            kind: SysExKind::Escape,
            data: data.into(),
        }
    }

    /// The transport form.
    pub const fn kind(&self) -> SysExKind {
        self.kind
    }

    /// The payload bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The status byte this message serializes under.
    pub const fn status_byte(&self) -> u8 {
        match self.kind {
            SysExKind::Normal => 0xF0,
            SysExKind::Escape => 0xF7,
        }
    }

    /// Decode the bytes following an `F0`/`F7` status byte.
    pub(crate) fn read(reader: &mut Reader<'a>, kind: SysExKind) -> ReadResult<Self> {
        let len = reader.read_vlq()? as usize;
        let data = reader.read_bytes(len)?;
        Ok(Self {
            kind,
            data: Cow::Borrowed(data),
        })
    }

    /// Append `<vlq length> <payload>`; the status byte is written by the
    /// caller alongside the other event kinds.
    pub(crate) fn write_data(&self, writer: &mut Writer) -> Result<(), crate::error::WriteError> {
        writer.write_vlq(self.data.len() as u32)?;
        writer.write_bytes(&self.data);
        Ok(())
    }

    /// Status byte + length quantity + payload.
    pub(crate) fn encoded_len(&self) -> usize {
        1 + vlq::encoded_len(self.data.len().min(vlq::MAX as usize) as u32) + self.data.len()
    }

    /// Clone a borrowed payload into an owned one.
    pub fn into_owned(self) -> SystemExclusiveMessage<'static> {
        SystemExclusiveMessage {
            kind: self.kind,
            data: Cow::Owned(self.data.into_owned()),
        }
    }
}

#[test]
fn reads_both_forms() {
    let bytes = [0x04, 0x43, 0x12, 0x00, 0xF7];
    let mut reader = Reader::from_byte_slice(&bytes);
    let normal = SystemExclusiveMessage::read(&mut reader, SysExKind::Normal).unwrap();
    assert_eq!(normal, SystemExclusiveMessage::new(&bytes[1..]));
    assert_eq!(normal.status_byte(), 0xF0);
    assert_eq!(normal.encoded_len(), 6);

    let mut reader = Reader::from_byte_slice(&bytes);
    let escape = SystemExclusiveMessage::read(&mut reader, SysExKind::Escape).unwrap();
    assert_eq!(escape.status_byte(), 0xF7);
    assert_eq!(escape.data(), &bytes[1..]);
}
