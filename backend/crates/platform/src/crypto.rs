//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Encode bytes as standard (padded) base64
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Decode standard (padded) base64
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(s)
}

/// Random bytes, base64 encoded. Used for opaque tokens and dev secrets.
pub fn random_base64(len: usize) -> String {
    to_base64(&random_bytes(len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(64);
        assert_eq!(bytes.len(), 64);
        // Should not be all zeros (statistically)
        assert!(bytes.iter().any(|&b| b != 0));
        assert!(random_bytes(0).is_empty());
    }

    #[test]
    fn test_base64_roundtrip() {
        let data = b"hello world";
        let encoded = to_base64(data);
        assert_eq!(encoded, "aGVsbG8gd29ybGQ=");
        assert_eq!(from_base64(&encoded).unwrap(), data);
    }

    #[test]
    fn test_random_base64_length() {
        // 64 bytes -> 88 padded base64 characters
        let token = random_base64(64);
        assert_eq!(token.len(), 88);
        assert_eq!(from_base64(&token).unwrap().len(), 64);
        assert_ne!(token, random_base64(64));
    }
}
