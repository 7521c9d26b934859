//! Encoding and decoding of persisted credential data.
//!
//! The side channel is a string-keyed mapping stored next to the digest; it
//! carries the cost parameters under the fixed keys `N`, `r` and `p`. Hash
//! and salt lengths are never persisted: the hash length is re-derived from
//! the stored digest's decoded byte length, and the salt itself is always
//! stored alongside the credential.

use crate::error::CredentialError;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, Engine, GeneralPurpose, GeneralPurposeConfig};
use std::collections::HashMap;

/// Side-channel key for the CPU/memory cost (scrypt `N`, argon2 `t`).
pub const COST_KEY: &str = "N";
/// Side-channel key for the block parameter (scrypt `r`, argon2 memory).
pub const BLOCK_SIZE_KEY: &str = "r";
/// Side-channel key for the parallelism degree.
pub const PARALLELISM_KEY: &str = "p";

/// Standard-alphabet Base64, padded on encode, indifferent on decode.
///
/// scrypt digests are stored padded while argon2 PHC strings carry unpadded
/// segments; stored data of either flavor must decode.
pub(crate) const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Writes the cost parameters into a fresh side-channel mapping.
pub fn side_channel(cost: u32, block_size: u32, parallelism: u32) -> HashMap<String, String> {
    let mut map = HashMap::new();
    map.insert(COST_KEY.to_string(), cost.to_string());
    map.insert(BLOCK_SIZE_KEY.to_string(), block_size.to_string());
    map.insert(PARALLELISM_KEY.to_string(), parallelism.to_string());
    map
}

/// Extracts the digest segment from an encoded hash string.
///
/// The digest is always the last `$`-delimited segment; trailing delimiters
/// are dropped before taking it. A string without any delimiter is returned
/// whole, leaving it to the Base64 decode downstream to reject it. Empty and
/// all-delimiter inputs have no recoverable digest.
pub fn extract_digest(encoded: &str) -> Option<&str> {
    let trimmed = encoded.trim_end_matches('$');
    if trimmed.is_empty() {
        return None;
    }
    trimmed.split('$').next_back()
}

/// Reads one decimal cost parameter from the side channel.
pub fn parse_parameter(
    parameters: &HashMap<String, String>,
    key: &str,
) -> Result<u32, CredentialError> {
    let value = parameters
        .get(key)
        .ok_or_else(|| CredentialError::Decoding(format!("parameter '{key}' is missing")))?;
    value
        .parse::<u32>()
        .map_err(|_| CredentialError::Decoding(format!("parameter '{key}' is not a number")))
}

/// Derives the hash length from a stored digest string.
///
/// The length is only knowable once a concrete digest exists; it cannot be
/// used prospectively. If the digest framing ever changes, this inference
/// breaks with it.
pub fn decoded_length(digest: &str) -> Result<usize, CredentialError> {
    decode_digest(digest).map(|bytes| bytes.len())
}

/// Decodes a Base64 digest string to raw bytes.
pub fn decode_digest(digest: &str) -> Result<Vec<u8>, CredentialError> {
    BASE64
        .decode(digest)
        .map_err(|e| CredentialError::Decoding(format!("digest is not valid Base64: {e}")))
}

/// Encodes raw digest bytes as padded Base64.
pub fn encode_digest(digest: &[u8]) -> String {
    BASE64.encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_digest_takes_last_segment() {
        let encoded = "$argon2id$v=19$m=65536,t=4,p=1$ETNLJIojWhiW6jnhz0GitA$dReu5sV+s9VPGBqCe5nts02aXVOpNN4oFZSmubzi5Lg";
        assert_eq!(
            extract_digest(encoded),
            Some("dReu5sV+s9VPGBqCe5nts02aXVOpNN4oFZSmubzi5Lg")
        );
    }

    #[test]
    fn extract_digest_returns_bare_string_unchanged() {
        assert_eq!(extract_digest("nonsense"), Some("nonsense"));
        assert_eq!(
            extract_digest("OaqIIbkVDDjH3OvyrkHAsUvIARzbhMD7REHMHmxjdPQ="),
            Some("OaqIIbkVDDjH3OvyrkHAsUvIARzbhMD7REHMHmxjdPQ=")
        );
    }

    #[test]
    fn extract_digest_absent_for_degenerate_input() {
        assert_eq!(extract_digest(""), None);
        assert_eq!(extract_digest("$"), None);
        assert_eq!(extract_digest("$$"), None);
    }

    #[test]
    fn extract_digest_drops_trailing_delimiters() {
        assert_eq!(extract_digest("abc$"), Some("abc"));
        assert_eq!(extract_digest("a$b$$"), Some("b"));
    }

    #[test]
    fn side_channel_holds_decimal_strings() {
        let map = side_channel(16384, 8, 1);
        assert_eq!(map.get("N").map(String::as_str), Some("16384"));
        assert_eq!(map.get("r").map(String::as_str), Some("8"));
        assert_eq!(map.get("p").map(String::as_str), Some("1"));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn parse_parameter_round_trips_side_channel() {
        let map = side_channel(16384, 8, 1);
        assert_eq!(parse_parameter(&map, COST_KEY).unwrap(), 16384);
        assert_eq!(parse_parameter(&map, BLOCK_SIZE_KEY).unwrap(), 8);
        assert_eq!(parse_parameter(&map, PARALLELISM_KEY).unwrap(), 1);
    }

    #[test]
    fn parse_parameter_rejects_missing_and_garbage() {
        let mut map = HashMap::new();
        assert!(matches!(
            parse_parameter(&map, COST_KEY),
            Err(CredentialError::Decoding(_))
        ));

        map.insert("N".to_string(), "sixteen".to_string());
        assert!(matches!(
            parse_parameter(&map, COST_KEY),
            Err(CredentialError::Decoding(_))
        ));
    }

    #[test]
    fn decoded_length_accepts_padded_and_unpadded() {
        // 32 bytes, padded (scrypt form).
        assert_eq!(
            decoded_length("OaqIIbkVDDjH3OvyrkHAsUvIARzbhMD7REHMHmxjdPQ=").unwrap(),
            32
        );
        // Same 32 bytes without padding (argon2 PHC form).
        assert_eq!(
            decoded_length("OaqIIbkVDDjH3OvyrkHAsUvIARzbhMD7REHMHmxjdPQ").unwrap(),
            32
        );
    }

    #[test]
    fn decoded_length_rejects_invalid_base64() {
        assert!(matches!(
            decoded_length("not base64 at all!"),
            Err(CredentialError::Decoding(_))
        ));
        // Truncated to an impossible length.
        assert!(decoded_length("abcde").is_err());
    }

    #[test]
    fn encode_digest_pads() {
        assert_eq!(encode_digest(&[0u8; 32]).len(), 44);
        assert!(encode_digest(b"abc").ends_with('='));
    }
}
