//! Frame struct and envelope construction.
//!
//! Uses `bytes::Bytes` so decoded payloads can be handed around without
//! copying.

use bytes::{BufMut, Bytes, BytesMut};

use super::wire_format::{Header, TagWidth};
use crate::error::{PluginError, Result};

/// One complete envelope read from the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Message type tag.
    pub tag: u32,
    /// Payload bytes.
    pub payload: Bytes,
}

impl Frame {
    /// Create a new frame from tag and payload.
    pub fn new(tag: u32, payload: Bytes) -> Self {
        Self { tag, payload }
    }

    /// Get a reference to the payload bytes.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Get the payload length.
    #[inline]
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }

    /// Header describing this frame.
    ///
    /// Fails if the payload cannot be described by a 32-bit length.
    pub fn header(&self) -> Result<Header> {
        let length = u32::try_from(self.payload.len()).map_err(|_| PluginError::MessageTooLarge {
            size: self.payload.len() as u64,
            max: u32::MAX,
        })?;
        Ok(Header::new(self.tag, length))
    }
}

/// Build a complete envelope (header + payload) into a single buffer.
///
/// # Example
///
/// ```
/// use gitspace_plugin_sdk::protocol::{build_frame, TagWidth};
///
/// let bytes = build_frame(1, b"hi", TagWidth::U8).unwrap();
/// assert_eq!(&bytes[..], &[1, 2, 0, 0, 0, b'h', b'i']);
/// ```
pub fn build_frame(tag: u32, payload: &[u8], width: TagWidth) -> Result<Bytes> {
    width.check(tag)?;
    let length = u32::try_from(payload.len()).map_err(|_| PluginError::MessageTooLarge {
        size: payload.len() as u64,
        max: u32::MAX,
    })?;

    let mut buf = BytesMut::with_capacity(width.header_size() + payload.len());
    Header::new(tag, length).encode_into(width, &mut buf);
    buf.put_slice(payload);
    Ok(buf.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_accessors() {
        let frame = Frame::new(2, Bytes::from_static(b"hello"));
        assert_eq!(frame.payload(), b"hello");
        assert_eq!(frame.payload_len(), 5);
        assert_eq!(frame.header().unwrap(), Header::new(2, 5));
    }

    #[test]
    fn test_build_frame_empty_payload() {
        let bytes = build_frame(1, &[], TagWidth::U8).unwrap();
        assert_eq!(&bytes[..], &[1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_build_frame_legacy_width() {
        let bytes = build_frame(3, &[0xAA], TagWidth::U32).unwrap();
        assert_eq!(&bytes[..], &[3, 0, 0, 0, 1, 0, 0, 0, 0xAA]);
    }

    #[test]
    fn test_build_frame_rejects_wide_tag() {
        assert!(build_frame(300, b"x", TagWidth::U8).is_err());
    }
}
