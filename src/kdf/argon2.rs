//! Argon2 family, wrapping the `argon2` crate.
//!
//! Argon2 has a native self-describing encoding, so the primitive's own PHC
//! string (`$argon2id$v=19$m=..,t=..,p=..$salt$digest`) is stored verbatim.
//! Stored parameters are reconstructed by parsing that string; the raw salt
//! used for recomputation always comes from the credential record, never
//! from the embedded salt segment.

use argon2::password_hash::{PasswordHash, PasswordHasher, SaltString};
use argon2::{Argon2, Params};
use std::collections::HashMap;

use super::PasswordHashAlgorithm;
use crate::codec;
use crate::credential::StoredCredential;
use crate::error::CredentialError;
use crate::params::{self, Argon2Params, Argon2Variant, Argon2Version, HashParams};
use crate::policy::{PolicySource, argon2_keys};

/// Identifier stored on argon2 credentials.
pub const ARGON2_ID: &str = "argon2";

/// The argon2 hash family.
///
/// `variant` selects the flavor used for fresh credentials; verification
/// always follows the variant recorded in the stored hash string.
#[derive(Debug, Clone, Copy)]
pub struct Argon2Kdf {
    variant: Argon2Variant,
}

impl Default for Argon2Kdf {
    fn default() -> Self {
        Self::new(Argon2Variant::Argon2id)
    }
}

impl Argon2Kdf {
    pub fn new(variant: Argon2Variant) -> Self {
        Self { variant }
    }
}

impl PasswordHashAlgorithm for Argon2Kdf {
    type Params = Argon2Params;

    fn identifier(&self) -> &'static str {
        ARGON2_ID
    }

    fn configured_params(&self, policy: &dyn PolicySource) -> Argon2Params {
        Argon2Params::with_lengths(
            policy
                .policy_config(argon2_keys::ITERATIONS)
                .unwrap_or(params::DEFAULT_COST),
            policy
                .policy_config(argon2_keys::MEMORY)
                .unwrap_or(params::DEFAULT_BLOCK),
            policy
                .policy_config(argon2_keys::PARALLELISM)
                .unwrap_or(params::DEFAULT_PARALLELISM),
            policy
                .policy_config(argon2_keys::HASH_LENGTH)
                .map(|v| v as usize)
                .unwrap_or(params::DEFAULT_HASH_LENGTH),
            policy
                .policy_config(argon2_keys::SALT_LENGTH)
                .map(|v| v as usize)
                .unwrap_or(params::DEFAULT_SALT_LENGTH),
        )
        .variant(self.variant)
    }

    fn produce_digest(
        &self,
        password: &str,
        salt: &[u8],
        params: &Argon2Params,
    ) -> Result<String, CredentialError> {
        let primitive_params = Params::new(
            params.memory_kib(),
            params.iterations(),
            params.parallelism(),
            Some(params.hash_length()),
        )
        .map_err(|e| CredentialError::Hashing(e.to_string()))?;

        let argon2 = Argon2::new(params.get_variant(), params.get_version(), primitive_params);

        let salt_string =
            SaltString::encode_b64(salt).map_err(|e| CredentialError::Hashing(e.to_string()))?;

        let hash = argon2
            .hash_password(password.as_bytes(), &salt_string)
            .map_err(|e| CredentialError::Hashing(e.to_string()))?;

        Ok(hash.to_string())
    }

    fn stored_params(
        &self,
        credential: &StoredCredential,
    ) -> Result<Argon2Params, CredentialError> {
        let parsed = PasswordHash::new(credential.encoded_digest())
            .map_err(|e| CredentialError::Decoding(format!("not a PHC hash string: {e}")))?;

        let variant = Argon2Variant::try_from(parsed.algorithm)
            .map_err(|_| CredentialError::Decoding("unknown argon2 variant".to_string()))?;

        let version = match parsed.version {
            Some(v) => Argon2Version::try_from(v)
                .map_err(|_| CredentialError::Decoding("unsupported argon2 version".to_string()))?,
            None => Argon2Version::V0x13,
        };

        let memory = decimal(&parsed, "m")?;
        let iterations = decimal(&parsed, "t")?;
        let parallelism = decimal(&parsed, "p")?;

        let digest = parsed.hash.ok_or_else(|| {
            CredentialError::Decoding("hash string has no digest segment".to_string())
        })?;

        Ok(Argon2Params::with_lengths(
            iterations,
            memory,
            parallelism,
            digest.len(),
            params::DEFAULT_SALT_LENGTH,
        )
        .variant(variant)
        .version(version))
    }

    fn side_channel(&self, params: &Argon2Params) -> HashMap<String, String> {
        codec::side_channel(
            params.iterations(),
            params.memory_kib(),
            params.parallelism(),
        )
    }
}

fn decimal(parsed: &PasswordHash<'_>, key: &str) -> Result<u32, CredentialError> {
    parsed
        .params
        .get_decimal(key)
        .ok_or_else(|| CredentialError::Decoding(format!("hash string is missing '{key}'")))
}
