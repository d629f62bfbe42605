//! MsgPack codec using `rmp-serde`.
//!
//! Structs are written with `to_vec_named` (map form, keyed by field name)
//! so a host can read them without knowing the Rust field order.

use crate::error::Result;

/// MessagePack codec for structured data.
pub struct MsgPackCodec;

impl MsgPackCodec {
    /// Encode a value to MsgPack bytes (struct-as-map).
    ///
    /// # Errors
    ///
    /// Returns error if the value cannot be serialized.
    #[inline]
    pub fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        Ok(rmp_serde::to_vec_named(value)?)
    }

    /// Decode MsgPack bytes to a value.
    ///
    /// # Errors
    ///
    /// Returns error if the bytes cannot be deserialized to type T.
    #[inline]
    pub fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
        Ok(rmp_serde::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Param {
        name: String,
        required: bool,
    }

    #[test]
    fn test_encode_decode_struct() {
        let original = Param {
            name: "greeting".to_string(),
            required: true,
        };

        let encoded = MsgPackCodec::encode(&original).unwrap();
        let decoded: Param = MsgPackCodec::decode(&encoded).unwrap();

        assert_eq!(decoded, original);
    }

    #[test]
    fn test_struct_is_map_format() {
        let encoded = MsgPackCodec::encode(&Param {
            name: "x".to_string(),
            required: false,
        })
        .unwrap();

        // 0x82 = fixmap with 2 entries; array form would be 0x92.
        assert_eq!(encoded[0], 0x82, "Expected fixmap, got {:02X}", encoded[0]);
    }

    #[test]
    fn test_encode_decode_sequence() {
        let items = vec!["greet", "customize"];
        let encoded = MsgPackCodec::encode(&items).unwrap();
        assert_eq!(encoded[0], 0x92);

        let decoded: Vec<String> = MsgPackCodec::decode(&encoded).unwrap();
        assert_eq!(decoded, items);
    }

    #[test]
    fn test_decode_error_on_invalid_data() {
        let result: Result<Param> = MsgPackCodec::decode(b"\xc1");
        assert!(result.is_err());
    }
}
