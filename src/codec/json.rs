//! JSON codec using `serde_json`.
//!
//! This is the encoding the gitspace host expects inside `MenuResponse`.

use crate::error::Result;

/// JSON codec for structured data.
pub struct JsonCodec;

impl JsonCodec {
    /// Encode a value to compact JSON bytes.
    #[inline]
    pub fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(value)?)
    }

    /// Decode JSON bytes to a value.
    #[inline]
    pub fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn test_encode_is_compact() {
        let mut map = BTreeMap::new();
        map.insert("label", "Simple Greeting");
        map.insert("command", "greet");

        let encoded = JsonCodec::encode(&map).unwrap();
        assert_eq!(
            String::from_utf8(encoded).unwrap(),
            r#"{"command":"greet","label":"Simple Greeting"}"#
        );
    }

    #[test]
    fn test_decode_error_on_invalid_data() {
        let result: Result<Vec<String>> = JsonCodec::decode(b"{not json");
        assert!(result.is_err());
    }
}
