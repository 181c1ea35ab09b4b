use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{Result, WireError};

/// Frame header: magic (2) + length (4) = 6 bytes.
pub const HEADER_SIZE: usize = 6;

/// Magic bytes: "LT" (0x4C 0x54).
pub const MAGIC: [u8; 2] = [0x4C, 0x54];

/// Default maximum payload size: 64 KiB. Log records are small; anything
/// larger indicates a desynchronized or hostile stream.
pub const DEFAULT_MAX_PAYLOAD: usize = 64 * 1024;

/// Encode one record payload into the wire format, enforcing the same
/// payload bound the decode side does.
///
/// Wire format:
/// ```text
/// ┌──────────────┬───────────┬─────────────────┐
/// │ Magic (2B)   │ Length    │ Payload          │
/// │ 0x4C 0x54    │ (4B LE)   │ (Length bytes)   │
/// │ "LT"         │           │                  │
/// └──────────────┴───────────┴─────────────────┘
/// ```
pub fn encode_frame(payload: &[u8], dst: &mut BytesMut, max_payload: usize) -> Result<()> {
    // The length field is 4 bytes; no configured bound can lift that.
    let max = max_payload.min(u32::MAX as usize);
    if payload.len() > max {
        return Err(WireError::PayloadTooLarge {
            size: payload.len(),
            max,
        });
    }
    dst.reserve(HEADER_SIZE + payload.len());
    dst.put_slice(&MAGIC);
    dst.put_u32_le(payload.len() as u32);
    dst.put_slice(payload);
    Ok(())
}

/// Decode one frame from a buffer.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete frame yet.
/// On success, consumes the frame bytes from the buffer.
pub fn decode_frame(src: &mut BytesMut, max_payload: usize) -> Result<Option<Bytes>> {
    if src.len() < HEADER_SIZE {
        return Ok(None); // Need more data
    }

    if src[0..2] != MAGIC {
        return Err(WireError::InvalidMagic);
    }

    let payload_len = u32::from_le_bytes(src[2..6].try_into().unwrap()) as usize;
    if payload_len > max_payload {
        return Err(WireError::PayloadTooLarge {
            size: payload_len,
            max: max_payload,
        });
    }

    let total = HEADER_SIZE + payload_len;
    if src.len() < total {
        return Ok(None); // Need more data
    }

    src.advance(HEADER_SIZE);
    Ok(Some(src.split_to(payload_len).freeze()))
}

/// Configuration shared by record readers and writers.
#[derive(Debug, Clone)]
pub struct WireConfig {
    /// Maximum payload size in bytes. Default: 64 KiB.
    pub max_payload_size: usize,
    /// Read timeout for blocking operations.
    pub read_timeout: Option<std::time::Duration>,
    /// Write timeout for blocking operations.
    pub write_timeout: Option<std::time::Duration>,
}

impl Default for WireConfig {
    fn default() -> Self {
        Self {
            max_payload_size: DEFAULT_MAX_PAYLOAD,
            read_timeout: None,
            write_timeout: None,
        }
    }
}
