//! The persisted credential record.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A stored password credential: algorithm identifier, raw salt, the encoded
/// digest string and the side-channel parameter mapping.
///
/// Created once when a password is set and read-only afterwards; a policy
/// change produces a fresh credential instead of mutating this one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredential {
    algorithm: String,
    #[serde(with = "base64_bytes")]
    salt: Vec<u8>,
    encoded_digest: String,
    additional_parameters: HashMap<String, String>,
    created: String,
}

impl StoredCredential {
    pub fn new(
        algorithm: impl Into<String>,
        salt: Vec<u8>,
        encoded_digest: impl Into<String>,
        additional_parameters: HashMap<String, String>,
    ) -> Self {
        Self {
            algorithm: algorithm.into(),
            salt,
            encoded_digest: encoded_digest.into(),
            additional_parameters,
            created: Local::now().to_string(),
        }
    }

    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn encoded_digest(&self) -> &str {
        &self.encoded_digest
    }

    pub fn additional_parameters(&self) -> &HashMap<String, String> {
        &self.additional_parameters
    }

    pub fn created(&self) -> &str {
        &self.created
    }
}

/// Salt bytes travel as Base64 in JSON, matching the host's wire form.
mod base64_bytes {
    use crate::codec;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        codec::encode_digest(bytes).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        codec::decode_digest(&encoded).map_err(serde::de::Error::custom)
    }
}
