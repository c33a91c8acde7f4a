//! Payload encoding utilities.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Encodes data as Base64.
///
/// Uses the standard alphabet with padding and no line wrapping, which is
/// what the transmission API expects for attachment and image data.
#[must_use]
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_encode() {
        assert_eq!(encode_base64(b"Hello, World!"), "SGVsbG8sIFdvcmxkIQ==");
        assert_eq!(encode_base64(b""), "");
    }

    #[test]
    fn test_base64_no_line_wrapping() {
        let encoded = encode_base64(&[0u8; 200]);
        assert!(!encoded.contains('\n'));
        assert!(!encoded.contains('\r'));
    }
}
