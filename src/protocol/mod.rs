//! Protocol module - wire format, framing and blocking stream I/O.
//!
//! This module implements the stdio envelope protocol:
//! - Tag + little-endian length header encoding/decoding
//! - Frame struct and whole-envelope construction
//! - Reader/writer over `std::io` streams

mod frame;
mod reader;
mod wire_format;
mod writer;

pub use frame::{build_frame, Frame};
pub use reader::FrameReader;
pub use wire_format::{Header, TagWidth, DEFAULT_MAX_PAYLOAD_SIZE, LENGTH_SIZE};
pub use writer::FrameWriter;
