//! Codec module - structured-data encoders for opaque payload blobs.
//!
//! The wire framing never looks inside these blobs; they travel as raw bytes
//! inside a protobuf field (for example `MenuResponse::menu_data`).
//!
//! - [`JsonCodec`] - JSON using `serde_json` (what the gitspace host reads)
//! - [`MsgPackCodec`] - MessagePack using `rmp-serde` (struct-as-map)
//!
//! # Example
//!
//! ```
//! use gitspace_plugin_sdk::codec::{JsonCodec, MenuEncoding};
//!
//! let encoded = MenuEncoding::Json.encode(&vec!["greet"]).unwrap();
//! let decoded: Vec<String> = JsonCodec::decode(&encoded).unwrap();
//! assert_eq!(decoded, vec!["greet".to_string()]);
//! ```

mod json;
mod msgpack;

pub use json::JsonCodec;
pub use msgpack::MsgPackCodec;

use crate::error::Result;

/// Encoding used for opaque menu blobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuEncoding {
    /// JSON (default).
    #[default]
    Json,
    /// MessagePack.
    MsgPack,
}

impl MenuEncoding {
    /// Encode a value with this encoding.
    pub fn encode<T: serde::Serialize>(self, value: &T) -> Result<Vec<u8>> {
        match self {
            Self::Json => JsonCodec::encode(value),
            Self::MsgPack => MsgPackCodec::encode(value),
        }
    }

    /// Decode a value with this encoding.
    pub fn decode<T: serde::de::DeserializeOwned>(self, bytes: &[u8]) -> Result<T> {
        match self {
            Self::Json => JsonCodec::decode(bytes),
            Self::MsgPack => MsgPackCodec::decode(bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encodings_differ() {
        let value = vec![1u8, 2, 3];
        let json = MenuEncoding::Json.encode(&value).unwrap();
        let msgpack = MenuEncoding::MsgPack.encode(&value).unwrap();
        assert_eq!(json, b"[1,2,3]");
        assert_ne!(json, msgpack);

        let back: Vec<u8> = MenuEncoding::MsgPack.decode(&msgpack).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_default_is_json() {
        assert_eq!(MenuEncoding::default(), MenuEncoding::Json);
    }
}
