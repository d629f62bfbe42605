//! Blocking envelope reader.
//!
//! Reads one envelope at a time from any [`Read`] source:
//! - end-of-stream before the first tag byte is a clean end (`Ok(None)`)
//! - end-of-stream anywhere after that is [`PluginError::IncompleteMessage`]
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use gitspace_plugin_sdk::protocol::{build_frame, FrameReader, TagWidth};
//!
//! let bytes = build_frame(1, b"", TagWidth::U8).unwrap();
//! let mut reader = FrameReader::new(Cursor::new(bytes.to_vec()));
//!
//! let frame = reader.read_frame().unwrap().unwrap();
//! assert_eq!(frame.tag, 1);
//! assert!(reader.read_frame().unwrap().is_none());
//! ```

use std::io::{self, ErrorKind, Read};

use bytes::Bytes;

use super::wire_format::{Header, TagWidth, DEFAULT_MAX_PAYLOAD_SIZE, LENGTH_SIZE};
use super::Frame;
use crate::error::{PluginError, Result};

/// Reads framed envelopes from a byte stream.
pub struct FrameReader<R> {
    reader: R,
    tag_width: TagWidth,
    max_payload_size: u32,
}

impl<R: Read> FrameReader<R> {
    /// Create a reader with the current single-byte tag and default limit.
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, TagWidth::default(), DEFAULT_MAX_PAYLOAD_SIZE)
    }

    /// Create a reader with explicit tag width and payload limit.
    pub fn with_options(reader: R, tag_width: TagWidth, max_payload_size: u32) -> Self {
        Self {
            reader,
            tag_width,
            max_payload_size,
        }
    }

    /// Tag width this reader expects.
    pub fn tag_width(&self) -> TagWidth {
        self.tag_width
    }

    /// Read the next envelope.
    ///
    /// Returns `Ok(None)` when the stream ends cleanly between messages.
    /// An oversized envelope is drained from the stream before
    /// [`PluginError::MessageTooLarge`] is returned, so the next call starts
    /// at the following envelope.
    pub fn read_frame(&mut self) -> Result<Option<Frame>> {
        let width = self.tag_width;
        let mut header_buf = [0u8; 8];
        let header_buf = &mut header_buf[..width.header_size()];

        let (tag_buf, length_buf) = header_buf.split_at_mut(width.size());
        let got = read_full(&mut self.reader, tag_buf)?;
        if got == 0 {
            return Ok(None);
        }
        if got < tag_buf.len() {
            return Err(PluginError::IncompleteMessage {
                expected: tag_buf.len(),
                received: got,
            });
        }

        let got = read_full(&mut self.reader, length_buf)?;
        if got < LENGTH_SIZE {
            return Err(PluginError::IncompleteMessage {
                expected: LENGTH_SIZE,
                received: got,
            });
        }

        let header = Header::decode(header_buf, width).ok_or(PluginError::IncompleteMessage {
            expected: width.header_size(),
            received: 0,
        })?;

        if let Err(too_large) = header.validate(self.max_payload_size) {
            self.discard(header.payload_length)?;
            return Err(too_large);
        }

        let expected = header.payload_length as usize;
        let mut payload = vec![0u8; expected];
        let got = read_full(&mut self.reader, &mut payload)?;
        if got < expected {
            return Err(PluginError::IncompleteMessage {
                expected,
                received: got,
            });
        }

        Ok(Some(Frame::new(header.tag, Bytes::from(payload))))
    }

    /// Skip `length` payload bytes.
    fn discard(&mut self, length: u32) -> Result<()> {
        let skipped = io::copy(
            &mut self.reader.by_ref().take(u64::from(length)),
            &mut io::sink(),
        )?;
        if skipped < u64::from(length) {
            return Err(PluginError::IncompleteMessage {
                expected: length as usize,
                received: skipped as usize,
            });
        }
        Ok(())
    }

    /// Consume the reader, returning the underlying stream.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// Fill `buf` as far as the stream allows.
///
/// Returns the number of bytes read; less than `buf.len()` only at
/// end-of-stream.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
