//! Blocking envelope writer.
//!
//! Each envelope is assembled into one buffer, written with a single
//! `write_all` and flushed immediately so a host reading the child's stdout
//! synchronously never waits on buffered data.

use std::io::Write;

use super::build_frame;
use super::wire_format::{TagWidth, DEFAULT_MAX_PAYLOAD_SIZE};
use crate::error::{PluginError, Result};

/// Writes framed envelopes to a byte stream.
pub struct FrameWriter<W: Write> {
    writer: W,
    tag_width: TagWidth,
    max_payload_size: u32,
}

impl<W: Write> FrameWriter<W> {
    /// Create a writer with the current single-byte tag and default limit.
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, TagWidth::default(), DEFAULT_MAX_PAYLOAD_SIZE)
    }

    /// Create a writer with explicit tag width and payload limit.
    pub fn with_options(writer: W, tag_width: TagWidth, max_payload_size: u32) -> Self {
        Self {
            writer,
            tag_width,
            max_payload_size,
        }
    }

    /// Write one envelope and flush.
    ///
    /// Nothing is written if the tag does not fit the tag width or the
    /// payload exceeds the limit.
    pub fn write_frame(&mut self, tag: u32, payload: &[u8]) -> Result<()> {
        if payload.len() as u64 > u64::from(self.max_payload_size) {
            return Err(PluginError::MessageTooLarge {
                size: payload.len() as u64,
                max: self.max_payload_size,
            });
        }

        let frame = build_frame(tag, payload, self.tag_width)?;
        self.writer.write_all(&frame)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Get a reference to the underlying stream.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Consume the writer, returning the underlying stream.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
