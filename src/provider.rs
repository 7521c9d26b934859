//! Credential creation, verification and policy compliance.
//!
//! One generic provider serves both hash families; the comparison and
//! policy-check logic exists exactly once.

use crate::codec;
use crate::credential::StoredCredential;
use crate::error::CredentialError;
use crate::kdf::{self, Argon2Kdf, PasswordHashAlgorithm, ScryptKdf};
use crate::params::HashParams;
use crate::policy::PolicySource;

/// Password hashing provider for one algorithm family under one realm
/// policy.
///
/// Stateless apart from its configuration; safe to share across threads.
pub struct HashProvider<A, P> {
    algorithm: A,
    policy: P,
}

/// scrypt provider under the given realm policy.
pub fn scrypt_provider<P: PolicySource>(policy: P) -> HashProvider<ScryptKdf, P> {
    HashProvider::new(ScryptKdf::new(), policy)
}

/// argon2id provider under the given realm policy.
pub fn argon2_provider<P: PolicySource>(policy: P) -> HashProvider<Argon2Kdf, P> {
    HashProvider::new(Argon2Kdf::default(), policy)
}

impl<A: PasswordHashAlgorithm, P: PolicySource> HashProvider<A, P> {
    pub fn new(algorithm: A, policy: P) -> Self {
        Self { algorithm, policy }
    }

    /// Hashes `raw_password` under the configured policy parameters and
    /// returns a fully populated credential.
    pub fn encode_credential(
        &self,
        raw_password: &str,
    ) -> Result<StoredCredential, CredentialError> {
        let params = self.algorithm.configured_params(&self.policy);
        let salt = kdf::generate_salt(params.salt_length())?;
        let encoded = self.algorithm.produce_digest(raw_password, &salt, &params)?;

        Ok(StoredCredential::new(
            self.algorithm.identifier(),
            salt,
            encoded,
            self.algorithm.side_channel(&params),
        ))
    }

    /// Verifies `raw_password` against a stored credential.
    ///
    /// The stored parameters are reconstructed, the digest recomputed with
    /// the stored salt, and the digest segments compared in constant time.
    /// Malformed stored data is a hard error, never a `false`.
    pub fn verify(
        &self,
        raw_password: &str,
        credential: &StoredCredential,
    ) -> Result<bool, CredentialError> {
        let params = self.algorithm.stored_params(credential)?;

        let stored_digest = codec::extract_digest(credential.encoded_digest()).ok_or_else(|| {
            CredentialError::Decoding("stored encoding has no digest segment".to_string())
        })?;

        let attempted =
            self.algorithm
                .produce_digest(raw_password, credential.salt(), &params)?;
        let attempted_digest = codec::extract_digest(&attempted).ok_or_else(|| {
            CredentialError::Decoding("recomputed encoding has no digest segment".to_string())
        })?;

        Ok(kdf::digests_match(
            stored_digest.as_bytes(),
            attempted_digest.as_bytes(),
        ))
    }

    /// Checks whether a stored credential still satisfies the configured
    /// policy.
    ///
    /// A credential hashed by a different algorithm never satisfies this
    /// provider's policy. Otherwise the cost fingerprints must match
    /// exactly; hash and salt lengths play no part. Pure predicate: the
    /// decision to rehash lives with the caller.
    pub fn policy_check(&self, credential: &StoredCredential) -> Result<bool, CredentialError> {
        if credential.algorithm() != self.algorithm.identifier() {
            return Ok(false);
        }

        let stored = self.algorithm.stored_params(credential)?;
        let configured = self.algorithm.configured_params(&self.policy);

        Ok(stored.fingerprint() == configured.fingerprint())
    }
}
