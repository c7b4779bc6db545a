//! Variable-length integer codec.
//!
//! Encoding (RFC 9000 style): the two most-significant bits of the first
//! byte select the total width — `00` = 1 byte (6 value bits), `01` = 2
//! bytes (14 bits), `10` = 4 bytes (30 bits), `11` = 8 bytes (62 bits).
//! The remaining bits across the whole encoding carry the value, big-endian.
//!
//! The encoder always emits the minimal width. The decoder accepts
//! non-canonical encodings (a small value carried in a wider width) and
//! returns the same value; peers built on quicvarint behave the same way.

use std::io::{ErrorKind, Read};

use bytes::{BufMut, BytesMut};

use crate::error::{Result, WireError};

/// Largest encodable value: 2^62 - 1.
pub const MAX: u64 = (1 << 62) - 1;

const MAX_1BYTE: u64 = (1 << 6) - 1;
const MAX_2BYTE: u64 = (1 << 14) - 1;
const MAX_4BYTE: u64 = (1 << 30) - 1;

const PREFIX_2BYTE: u16 = 0x4000;
const PREFIX_4BYTE: u32 = 0x8000_0000;
const PREFIX_8BYTE: u64 = 0xC000_0000_0000_0000;

/// The width `encode` would pick for `value`.
pub fn encoded_len(value: u64) -> Result<usize> {
    if value <= MAX_1BYTE {
        Ok(1)
    } else if value <= MAX_2BYTE {
        Ok(2)
    } else if value <= MAX_4BYTE {
        Ok(4)
    } else if value <= MAX {
        Ok(8)
    } else {
        Err(WireError::ValueOutOfRange { value })
    }
}

/// Append the minimal canonical encoding of `value` to `dst`.
pub fn encode(value: u64, dst: &mut BytesMut) -> Result<()> {
    match encoded_len(value)? {
        1 => dst.put_u8(value as u8),
        2 => dst.put_u16(value as u16 | PREFIX_2BYTE),
        4 => dst.put_u32(value as u32 | PREFIX_4BYTE),
        _ => dst.put_u64(value | PREFIX_8BYTE),
    }
    Ok(())
}

/// Decode one varint from `src`, reading byte by byte.
///
/// Returns the value and the number of bytes consumed. Fails with
/// [`WireError::Truncated`] if the source ends mid-encoding; underlying I/O
/// errors propagate unchanged in [`WireError::Io`].
pub fn decode<R: Read>(src: &mut R) -> Result<(u64, usize)> {
    let first = read_byte(src)?;
    decode_after_first(first, src)
}

/// Decode one varint whose leading byte the caller already consumed.
///
/// The stream layer needs this split so it can treat end-of-data *before*
/// a header as clean termination while end-of-data *inside* one stays fatal.
pub fn decode_after_first<R: Read>(first: u8, src: &mut R) -> Result<(u64, usize)> {
    let width = 1usize << (first >> 6);
    let mut value = u64::from(first & 0x3F);
    for _ in 1..width {
        value = (value << 8) | u64::from(read_byte(src)?);
    }
    Ok((value, width))
}

fn read_byte<R: Read>(src: &mut R) -> Result<u8> {
    let mut byte = [0u8; 1];
    loop {
        match src.read(&mut byte) {
            Ok(0) => return Err(WireError::Truncated),
            Ok(_) => return Ok(byte[0]),
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(WireError::Io(err)),
        }
    }
}
