//! Varint length-prefix codec.
//!
//! minissdpd frames every variable-length field with a 7-bits-per-byte
//! length prefix: bit 7 (0x80) flags a continuation, the low seven bits
//! carry big-endian groups of the value, most-significant group first.

use crate::error::ProtocolError;
use bytes::{BufMut, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

/// Maximum number of bytes in an encoded length prefix.
pub const MAX_LENGTH_BYTES: usize = 5;

/// Largest length representable in `MAX_LENGTH_BYTES` 7-bit groups (2^35 - 1).
pub const MAX_LENGTH: i64 = (1 << 35) - 1;

/// Encodes `n` as a length prefix, appending it to `buf`.
///
/// The encoding is minimal: leading all-zero 7-bit groups are suppressed,
/// so values 0..=127 take a single byte. Returns the number of bytes
/// appended. Fails with [`ProtocolError::InvalidLength`] for values outside
/// `0..=MAX_LENGTH`, before anything is appended.
pub fn encode_length(n: i64, buf: &mut BytesMut) -> Result<usize, ProtocolError> {
    if !(0..=MAX_LENGTH).contains(&n) {
        return Err(ProtocolError::InvalidLength(n));
    }

    let n = n as u64;
    let mut written = 0;
    for shift in (1..MAX_LENGTH_BYTES).rev() {
        if n >= 1u64 << (7 * shift) {
            buf.put_u8((n >> (7 * shift)) as u8 | 0x80);
            written += 1;
        }
    }
    buf.put_u8((n & 0x7f) as u8);
    Ok(written + 1)
}

/// Decodes a length prefix, reading one byte at a time from `r`.
///
/// Accumulates `n = n << 7 | (b & 0x7f)` while the continuation bit is set.
/// Fails with [`ProtocolError::LengthTooLong`] once [`MAX_LENGTH_BYTES`]
/// bytes have been consumed without a terminating byte, so a corrupt or
/// malicious peer cannot force an unbounded read.
pub async fn decode_length<R: AsyncRead + Unpin>(r: &mut R) -> Result<i64, ProtocolError> {
    let mut n: i64 = 0;
    for _ in 0..MAX_LENGTH_BYTES {
        let b = r.read_u8().await?;
        n = n << 7 | i64::from(b & 0x7f);
        if b & 0x80 == 0 {
            return Ok(n);
        }
    }
    Err(ProtocolError::LengthTooLong)
}
