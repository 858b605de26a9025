//! Payload decoding for completed exchanges

use serde::de::DeserializeOwned;

use crate::transport::WireResponse;

/// Decode a 2xx body as JSON.
///
/// An empty body (204/205, or a 200 without content) decodes from JSON
/// `null`, so `()` and `Option<_>` payloads succeed.
///
/// # Errors
/// Returns a message describing the decode failure.
pub fn decode_json<T: DeserializeOwned>(response: &WireResponse) -> Result<T, String> {
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
            format!(
                "empty response ({}) cannot be decoded into the requested payload type",
                response.status
            )
        });
    }

    serde_json::from_slice(&response.body)
        .map_err(|e| format!("failed to decode response payload: {e}"))
}

/// Body as UTF-8 text.
///
/// # Errors
/// Never fails; invalid sequences are replaced.
pub fn decode_text(response: &WireResponse) -> Result<String, String> {
    Ok(response.text())
}

/// Raw body bytes.
///
/// # Errors
/// Never fails.
pub fn decode_bytes(response: &WireResponse) -> Result<Vec<u8>, String> {
    Ok(response.body.clone())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: u32,
    }

    #[test]
    fn test_decode_json_payload() {
        let response = WireResponse::new(200, br#"{"id": 7}"#.to_vec());
        assert_eq!(decode_json::<Item>(&response).unwrap(), Item { id: 7 });
    }

    #[test]
    fn test_empty_body_decodes_unit_and_option() {
        let response = WireResponse::new(204, Vec::new());
        assert!(decode_json::<()>(&response).is_ok());
        assert_eq!(decode_json::<Option<Item>>(&response).unwrap(), None);
    }

    #[test]
    fn test_empty_body_for_struct_fails() {
        let response = WireResponse::new(204, Vec::new());
        let err = decode_json::<Item>(&response).unwrap_err();
        assert!(err.contains("204"));
    }

    #[test]
    fn test_malformed_json_fails() {
        let response = WireResponse::new(200, b"not json".to_vec());
        assert!(decode_json::<Item>(&response).unwrap_err().starts_with("failed to decode"));
    }
}
