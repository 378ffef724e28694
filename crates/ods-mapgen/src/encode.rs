//! Base64 transport encoding for interface-definition text.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::Result;

/// Encode raw schema text for embedding in a mapping document.
pub fn encode_schema(schema_text: &str) -> String {
    STANDARD.encode(schema_text.as_bytes())
}

/// Decode an embedded schema back to its raw text.
pub fn decode_schema(encoded: &str) -> Result<String> {
    let bytes = STANDARD.decode(encoded)?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MapGenError;

    #[test]
    fn test_round_trip() {
        let text = r#"{"type":"record","name":"Patient","fields":[]}"#;
        let encoded = encode_schema(text);
        assert_ne!(encoded, text);
        assert_eq!(decode_schema(&encoded).unwrap(), text);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(encode_schema(""), "");
        assert_eq!(decode_schema("").unwrap(), "");
    }

    #[test]
    fn test_invalid_base64_rejected() {
        let err = decode_schema("not!!base64").unwrap_err();
        assert!(matches!(err, MapGenError::Base64(_)));
    }
}
