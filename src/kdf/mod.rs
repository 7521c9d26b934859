//! The hash engine: memory-hard KDF wrappers, salt generation and the
//! constant-time digest comparison.
//!
//! Both algorithm families plug into the same [`PasswordHashAlgorithm`]
//! capability; everything above it (verification, policy check, credential
//! encoding) is shared.

pub mod argon2;
pub mod scrypt;

pub use self::argon2::Argon2Kdf;
pub use self::scrypt::ScryptKdf;

use crate::credential::StoredCredential;
use crate::error::CredentialError;
use crate::params::HashParams;
use crate::policy::PolicySource;
use getrandom::fill;
use std::collections::HashMap;
use subtle::ConstantTimeEq;

/// One memory-hard hash family.
///
/// Implementations wrap a trusted library primitive; they never implement
/// the KDF themselves. All operations are stateless and safe to call from
/// multiple threads.
pub trait PasswordHashAlgorithm {
    type Params: HashParams + Clone;

    /// The algorithm identifier stored on credentials.
    fn identifier(&self) -> &'static str;

    /// Resolves the currently configured parameters, falling back to the
    /// per-family defaults for anything the realm does not configure.
    fn configured_params(&self, policy: &dyn PolicySource) -> Self::Params;

    /// Hashes `password` with `salt`, returning the encoded digest string.
    ///
    /// Parameter rejections by the primitive come back as the same
    /// [`CredentialError::Hashing`] kind as every other hashing failure.
    fn produce_digest(
        &self,
        password: &str,
        salt: &[u8],
        params: &Self::Params,
    ) -> Result<String, CredentialError>;

    /// Reconstructs the parameters a stored credential was hashed with. The
    /// hash length is derived from the stored digest's decoded byte length.
    fn stored_params(&self, credential: &StoredCredential) -> Result<Self::Params, CredentialError>;

    /// The side-channel mapping to persist next to a fresh digest.
    fn side_channel(&self, params: &Self::Params) -> HashMap<String, String>;
}

/// Draws `length` cryptographically secure random bytes for use as a salt.
pub fn generate_salt(length: usize) -> Result<Vec<u8>, CredentialError> {
    let mut salt = vec![0u8; length];
    fill(&mut salt)
        .map_err(|_| CredentialError::Hashing("OS random generator unavailable".to_string()))?;
    Ok(salt)
}

/// Constant-time digest comparison.
///
/// Scans the full combined length regardless of where the first mismatch
/// sits, and folds a length mismatch into the verdict instead of returning
/// early: unequal lengths are simply "not equal".
pub fn digests_match(stored: &[u8], attempted: &[u8]) -> bool {
    let lengths_equal = stored.len().ct_eq(&attempted.len());
    let span = stored.len().max(attempted.len());
    let mut diff = 0u8;
    for i in 0..span {
        let a = stored.get(i).copied().unwrap_or(0);
        let b = attempted.get(i).copied().unwrap_or(0);
        diff |= a ^ b;
    }
    bool::from(diff.ct_eq(&0) & lengths_equal)
}
