use crate::SmpteError;
use crate::file::SmpteFps;

#[doc = r#"
An SMPTE Offset payload: the absolute timecode at which a track starts.

Only the representation is modeled; converting the offset into wall-clock
time is timecode arithmetic this crate stays out of. The five payload bytes
are

- `0rrhhhhh` (frame-rate code and hours),
- minutes, seconds, frames,
- fractional frames in hundredths.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmpteOffset {
    /// The frame rate the timecode counts in.
    pub fps: SmpteFps,
    /// Hours, `0..=23`.
    pub hour: u8,
    /// Minutes, `0..=59`.
    pub minute: u8,
    /// Seconds, `0..=59`.
    pub second: u8,
    /// Frames within the second; the valid range depends on `fps`.
    pub frame: u8,
    /// Hundredths of a frame, `0..=99`.
    pub subframe: u8,
}

impl SmpteOffset {
    /// Parse the five payload bytes.
    ///
    /// # Errors
    /// One [`SmpteError`] per out-of-range field.
    pub const fn parse(data: &[u8]) -> Result<Self, SmpteError> {
        if data.len() != 5 {
            return Err(SmpteError::Length(data.len()));
        }

        // 0 rr hhhhh
        let fps = match SmpteFps::from_offset_code(data[0] >> 5) {
            Some(fps) => fps,
            None => return Err(SmpteError::FrameRate(data[0] >> 5)),
        };
        let hour = data[0] & 0b0001_1111;
        if hour > 23 {
            return Err(SmpteError::Hour(hour));
        }
        if data[1] > 59 {
            return Err(SmpteError::Minute(data[1]));
        }
        if data[2] > 59 {
            return Err(SmpteError::Second(data[2]));
        }
        if data[4] > 99 {
            return Err(SmpteError::Subframe(data[4]));
        }

        Ok(Self {
            fps,
            hour,
            minute: data[1],
            second: data[2],
            frame: data[3],
            subframe: data[4],
        })
    }

    /// The five payload bytes.
    pub const fn to_bytes(&self) -> [u8; 5] {
        [
            (self.fps.offset_code() << 5) | (self.hour & 0b0001_1111),
            self.minute,
            self.second,
            self.frame,
            self.subframe,
        ]
    }
}

#[test]
fn parse_smpte_offset() {
    use pretty_assertions::assert_eq;
    // the bytes after 00 FF 54 05
    let bytes = [0x41, 0x17, 0x2D, 0x0C, 0x22];
    let offset = SmpteOffset::parse(&bytes).unwrap();

    assert_eq!(offset.fps, SmpteFps::TwentyNine);
    assert_eq!(offset.hour, 1);
    assert_eq!(offset.minute, 23);
    assert_eq!(offset.second, 45);
    assert_eq!(offset.frame, 12);
    assert_eq!(offset.subframe, 34);

    assert_eq!(offset.to_bytes(), bytes);
}

#[test]
fn parse_invalid_smpte_offset() {
    let bytes = [0x7F, 0x17, 0x2D, 0x0C, 0x22];
    assert_eq!(SmpteOffset::parse(&bytes), Err(SmpteError::Hour(31)));

    let bytes = [0x41, 0x50, 0x2D, 0x0C, 0x22];
    assert_eq!(SmpteOffset::parse(&bytes), Err(SmpteError::Minute(80)));

    assert_eq!(SmpteOffset::parse(&[0x41]), Err(SmpteError::Length(1)));
}
