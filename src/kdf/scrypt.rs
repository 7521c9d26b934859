//! scrypt family, wrapping the `scrypt` crate.
//!
//! scrypt has no self-describing encoding: the stored digest is a bare
//! padded-Base64 string and every cost parameter lives in the side-channel
//! mapping under `N`, `r` and `p`.

use scrypt::Params;
use std::collections::HashMap;

use super::PasswordHashAlgorithm;
use crate::codec;
use crate::credential::StoredCredential;
use crate::error::CredentialError;
use crate::params::{self, HashParams, ScryptParams};
use crate::policy::{PolicySource, scrypt_keys};

/// Identifier stored on scrypt credentials.
pub const SCRYPT_ID: &str = "scrypt";

/// The scrypt hash family.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScryptKdf;

impl ScryptKdf {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHashAlgorithm for ScryptKdf {
    type Params = ScryptParams;

    fn identifier(&self) -> &'static str {
        SCRYPT_ID
    }

    fn configured_params(&self, policy: &dyn PolicySource) -> ScryptParams {
        ScryptParams::with_lengths(
            policy
                .policy_config(scrypt_keys::COST)
                .unwrap_or(params::DEFAULT_COST),
            policy
                .policy_config(scrypt_keys::BLOCK_SIZE)
                .unwrap_or(params::DEFAULT_BLOCK),
            policy
                .policy_config(scrypt_keys::PARALLELISM)
                .unwrap_or(params::DEFAULT_PARALLELISM),
            policy
                .policy_config(scrypt_keys::HASH_LENGTH)
                .map(|v| v as usize)
                .unwrap_or(params::DEFAULT_HASH_LENGTH),
            policy
                .policy_config(scrypt_keys::SALT_LENGTH)
                .map(|v| v as usize)
                .unwrap_or(params::DEFAULT_SALT_LENGTH),
        )
    }

    fn produce_digest(
        &self,
        password: &str,
        salt: &[u8],
        params: &ScryptParams,
    ) -> Result<String, CredentialError> {
        let n = params.cost_n();
        // The primitive takes log2(N); anything that is not a power of two
        // greater than one cannot be expressed and is rejected up front with
        // the same failure kind the primitive uses.
        if n < 2 || !n.is_power_of_two() {
            return Err(CredentialError::Hashing(format!(
                "cost {n} is not a power of two greater than one"
            )));
        }
        if params.block_size_r() == 0 {
            return Err(CredentialError::Hashing(
                "block size must be greater than zero".to_string(),
            ));
        }
        let log_n = n.trailing_zeros() as u8;

        let primitive_params = Params::new(
            log_n,
            params.block_size_r(),
            params.parallelism(),
            params.hash_length(),
        )
        .map_err(|e| CredentialError::Hashing(e.to_string()))?;

        let mut output = vec![0u8; params.hash_length()];
        scrypt::scrypt(password.as_bytes(), salt, &primitive_params, &mut output)
            .map_err(|e| CredentialError::Hashing(e.to_string()))?;

        Ok(codec::encode_digest(&output))
    }

    fn stored_params(
        &self,
        credential: &StoredCredential,
    ) -> Result<ScryptParams, CredentialError> {
        let parameters = credential.additional_parameters();
        if parameters.is_empty() {
            return Err(CredentialError::MissingParameters);
        }

        let cost = codec::parse_parameter(parameters, codec::COST_KEY)?;
        let block_size = codec::parse_parameter(parameters, codec::BLOCK_SIZE_KEY)?;
        let parallelism = codec::parse_parameter(parameters, codec::PARALLELISM_KEY)?;
        let hash_length = codec::decoded_length(credential.encoded_digest())?;

        Ok(ScryptParams::with_lengths(
            cost,
            block_size,
            parallelism,
            hash_length,
            params::DEFAULT_SALT_LENGTH,
        ))
    }

    fn side_channel(&self, params: &ScryptParams) -> HashMap<String, String> {
        codec::side_channel(
            params.cost_n(),
            params.block_size_r(),
            params.parallelism(),
        )
    }
}
