//! Wire format encoding and decoding.
//!
//! Every envelope is a type tag, a payload length and the payload:
//! ```text
//! ┌──────────────┬──────────┬─────────────────┐
//! │ Type tag     │ Length   │ Payload         │
//! │ 1 or 4 bytes │ 4 bytes  │ `length` bytes  │
//! │ uint (LE)    │ uint32 LE│                 │
//! └──────────────┴──────────┴─────────────────┘
//! ```
//!
//! All multi-byte integers are Little Endian. The current protocol uses a
//! single-byte tag; the legacy protocol used a 4-byte tag.

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{PluginError, Result};

/// Size of the length field in bytes.
pub const LENGTH_SIZE: usize = 4;

/// Default maximum payload size (64 MiB).
pub const DEFAULT_MAX_PAYLOAD_SIZE: u32 = 64 * 1024 * 1024;

/// Width of the type tag on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagWidth {
    /// One unsigned byte (current protocol).
    #[default]
    U8,
    /// Four bytes, unsigned little-endian (legacy protocol).
    U32,
}

impl TagWidth {
    /// Number of bytes the tag occupies.
    #[inline]
    pub fn size(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U32 => 4,
        }
    }

    /// Total header size (tag + length).
    #[inline]
    pub fn header_size(self) -> usize {
        self.size() + LENGTH_SIZE
    }

    /// Check that a tag value is representable at this width.
    pub fn check(self, tag: u32) -> Result<()> {
        match self {
            Self::U8 if tag > u32::from(u8::MAX) => Err(PluginError::UnknownMessageType(tag)),
            _ => Ok(()),
        }
    }
}

/// Decoded envelope header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Message type tag.
    pub tag: u32,
    /// Payload length in bytes.
    pub payload_length: u32,
}

impl Header {
    /// Create a new header.
    pub fn new(tag: u32, payload_length: u32) -> Self {
        Self {
            tag,
            payload_length,
        }
    }

    /// Append the encoded header to `buf`.
    ///
    /// The tag must already have been checked against `width`.
    pub fn encode_into(&self, width: TagWidth, buf: &mut BytesMut) {
        match width {
            TagWidth::U8 => buf.put_u8(self.tag as u8),
            TagWidth::U32 => buf.put_u32_le(self.tag),
        }
        buf.put_u32_le(self.payload_length);
    }

    /// Encode header to bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use gitspace_plugin_sdk::protocol::{Header, TagWidth};
    ///
    /// let bytes = Header::new(2, 5).encode(TagWidth::U8).unwrap();
    /// assert_eq!(&bytes[..], &[2, 5, 0, 0, 0]);
    /// ```
    pub fn encode(&self, width: TagWidth) -> Result<BytesMut> {
        width.check(self.tag)?;
        let mut buf = BytesMut::with_capacity(width.header_size());
        self.encode_into(width, &mut buf);
        Ok(buf)
    }

    /// Decode header from bytes.
    ///
    /// Returns `None` if the buffer is shorter than the header.
    pub fn decode(mut buf: &[u8], width: TagWidth) -> Option<Self> {
        if buf.len() < width.header_size() {
            return None;
        }
        let tag = match width {
            TagWidth::U8 => u32::from(buf.get_u8()),
            TagWidth::U32 => buf.get_u32_le(),
        };
        let payload_length = buf.get_u32_le();
        Some(Self {
            tag,
            payload_length,
        })
    }

    /// Validate the declared length against a limit.
    pub fn validate(&self, max_payload_size: u32) -> Result<()> {
        if self.payload_length > max_payload_size {
            return Err(PluginError::MessageTooLarge {
                size: u64::from(self.payload_length),
                max: max_payload_size,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_little_endian_byte_order() {
        let bytes = Header::new(3, 0x0102_0304).encode(TagWidth::U8).unwrap();
        assert_eq!(&bytes[..], &[0x03, 0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn test_legacy_tag_width() {
        let bytes = Header::new(2, 7).encode(TagWidth::U32).unwrap();
        assert_eq!(&bytes[..], &[2, 0, 0, 0, 7, 0, 0, 0]);

        let decoded = Header::decode(&bytes, TagWidth::U32).unwrap();
        assert_eq!(decoded, Header::new(2, 7));
    }

    #[test]
    fn test_header_sizes() {
        assert_eq!(TagWidth::U8.header_size(), 5);
        assert_eq!(TagWidth::U32.header_size(), 8);
        assert_eq!(TagWidth::default(), TagWidth::U8);
    }

    #[test]
    fn test_decode_too_short_buffer() {
        assert!(Header::decode(&[1, 0, 0, 0], TagWidth::U8).is_none());
        assert!(Header::decode(&[1, 0, 0, 0, 0, 0, 0], TagWidth::U32).is_none());
    }

    #[test]
    fn test_tag_too_wide_for_single_byte() {
        let result = Header::new(256, 0).encode(TagWidth::U8);
        assert!(matches!(result, Err(PluginError::UnknownMessageType(256))));
        assert!(Header::new(256, 0).encode(TagWidth::U32).is_ok());
    }

    #[test]
    fn test_validate_payload_too_large() {
        let header = Header::new(1, 1_000);
        assert!(header.validate(1_000).is_ok());
        let err = header.validate(999).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }
}
