//! Frame header encoding.
//!
//! Wire format per frame: `[varint type][varint length][length payload bytes]`.
//! Both header fields are varints, so the header has no fixed byte size.
//! Only the DATA type (`0x0`) is legal in this protocol; anything else is a
//! peer desync and is rejected by the stream layer.

use std::io::Read;

use bytes::BytesMut;

use crate::error::Result;
use crate::varint;

/// The one frame type this protocol carries: a DATA frame.
pub const FRAME_TYPE_DATA: u64 = 0x0;

/// Upper bound on an encoded header: two 8-byte varints.
pub const MAX_HEADER_LEN: usize = 16;

/// A frame header: semantic type plus payload byte count.
///
/// A header is always followed by exactly `length` payload bytes before the
/// next header may appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub frame_type: u64,
    pub length: u64,
}

impl FrameHeader {
    /// Create a DATA frame header for a payload of `length` bytes.
    pub fn data(length: u64) -> Self {
        Self {
            frame_type: FRAME_TYPE_DATA,
            length,
        }
    }

    /// Whether this header announces a DATA frame.
    pub fn is_data(&self) -> bool {
        self.frame_type == FRAME_TYPE_DATA
    }

    /// The encoded size of this header on the wire.
    pub fn encoded_len(&self) -> Result<usize> {
        Ok(varint::encoded_len(self.frame_type)? + varint::encoded_len(self.length)?)
    }

    /// Append the encoded header to `dst`.
    pub fn encode(&self, dst: &mut BytesMut) -> Result<()> {
        varint::encode(self.frame_type, dst)?;
        varint::encode(self.length, dst)
    }

    /// Decode a header from `src`, returning it and the bytes consumed.
    pub fn decode<R: Read>(src: &mut R) -> Result<(Self, usize)> {
        let (frame_type, type_len) = varint::decode(src)?;
        let (length, length_len) = varint::decode(src)?;
        Ok((Self { frame_type, length }, type_len + length_len))
    }

    /// Decode a header whose leading byte the caller already consumed.
    pub fn decode_after_first<R: Read>(first: u8, src: &mut R) -> Result<(Self, usize)> {
        let (frame_type, type_len) = varint::decode_after_first(first, src)?;
        let (length, length_len) = varint::decode(src)?;
        Ok((Self { frame_type, length }, type_len + length_len))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::error::WireError;

    #[test]
    fn header_roundtrip() {
        let header = FrameHeader::data(250);
        let mut buf = BytesMut::new();
        header.encode(&mut buf).unwrap();

        // type 0x0 is 1 byte, length 250 needs the 2-byte width
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.len(), header.encoded_len().unwrap());

        let (decoded, consumed) = FrameHeader::decode(&mut Cursor::new(&buf[..])).unwrap();
        assert_eq!(decoded, header);
        assert_eq!(consumed, 3);
        assert!(decoded.is_data());
    }

    #[test]
    fn zero_length_data_header() {
        let mut buf = BytesMut::new();
        FrameHeader::data(0).encode(&mut buf).unwrap();
        assert_eq!(buf.as_ref(), &[0x00, 0x00]);

        let (decoded, consumed) = FrameHeader::decode(&mut Cursor::new(&buf[..])).unwrap();
        assert_eq!(decoded.length, 0);
        assert_eq!(consumed, 2);
    }

    #[test]
    fn non_data_type_decodes_verbatim() {
        // The wire layer decodes any type; rejection is the stream's call.
        let mut buf = BytesMut::new();
        let header = FrameHeader {
            frame_type: 0x1,
            length: 4,
        };
        header.encode(&mut buf).unwrap();

        let (decoded, _) = FrameHeader::decode(&mut Cursor::new(&buf[..])).unwrap();
        assert_eq!(decoded.frame_type, 0x1);
        assert!(!decoded.is_data());
    }

    #[test]
    fn decode_after_first_matches_decode() {
        let mut buf = BytesMut::new();
        FrameHeader::data(100_000).encode(&mut buf).unwrap();

        let (a, consumed_a) = FrameHeader::decode(&mut Cursor::new(&buf[..])).unwrap();
        let (b, consumed_b) =
            FrameHeader::decode_after_first(buf[0], &mut Cursor::new(&buf[1..])).unwrap();
        assert_eq!(a, b);
        assert_eq!(consumed_a, consumed_b);
    }

    #[test]
    fn truncated_length_varint() {
        // type byte plus the first byte of a 2-byte length, then EOF
        let wire = [0x00, 0x40];
        let err = FrameHeader::decode(&mut Cursor::new(&wire)).unwrap_err();
        assert!(matches!(err, WireError::Truncated));
    }

    #[test]
    fn max_header_len_holds() {
        let header = FrameHeader {
            frame_type: crate::varint::MAX,
            length: crate::varint::MAX,
        };
        assert_eq!(header.encoded_len().unwrap(), MAX_HEADER_LEN);
    }
}
