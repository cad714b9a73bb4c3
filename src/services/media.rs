// src/services/media.rs
// DOCUMENTATION: Image payload helpers
// PURPOSE: Images travel as base64 inside JSON bodies and come back as data URLs

use crate::errors::BookingError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Placeholder shown when a tour has no main image
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/800x600?text=No+Image";

/// Decode a base64 image payload
/// DOCUMENTATION: Accepts raw base64 or a `data:image/...;base64,` URL
pub fn decode_image(input: &str) -> Result<Vec<u8>, BookingError> {
    let payload = match input.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:image") => rest,
        _ => input,
    };

    if payload.is_empty() {
        return Err(BookingError::InvalidInput("Empty image payload".to_string()));
    }

    STANDARD.decode(payload).map_err(|e| {
        log::warn!("Rejected malformed image payload: {}", e);
        BookingError::InvalidInput(format!("Invalid base64 image: {}", e))
    })
}

/// Encode image bytes as a JPEG data URL for the frontend
pub fn to_data_url(bytes: &[u8]) -> String {
    format!("data:image/jpeg;base64,{}", STANDARD.encode(bytes))
}

/// Main image data URL or the placeholder
pub fn to_data_url_or_placeholder(bytes: Option<&Vec<u8>>) -> String {
    match bytes {
        Some(b) if !b.is_empty() => to_data_url(b),
        _ => PLACEHOLDER_IMAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_raw_base64() {
        let bytes = decode_image("aGVsbG8=").unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn test_decode_data_url() {
        let bytes = decode_image("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_image("not base64 at all!!!").is_err());
        assert!(decode_image("").is_err());
    }

    #[test]
    fn test_round_trip() {
        let url = to_data_url(b"hello");
        assert_eq!(url, "data:image/jpeg;base64,aGVsbG8=");
        assert_eq!(decode_image(&url).unwrap(), b"hello");
    }

    #[test]
    fn test_placeholder() {
        assert_eq!(to_data_url_or_placeholder(None), PLACEHOLDER_IMAGE);
        assert_eq!(
            to_data_url_or_placeholder(Some(&Vec::new())),
            PLACEHOLDER_IMAGE
        );
    }
}
