//! Password credential hashing and verification.
//!
//! Two memory-hard hash families — argon2 and scrypt — behind one generic
//! provider: salt generation, digest computation, self-describing on-disk
//! encodings, constant-time verification and a policy compliance check that
//! tells the host when a stored credential must be re-hashed.

pub mod codec;
mod credential;
mod error;
pub mod kdf;
mod params;
mod policy;
mod provider;

pub use crate::credential::StoredCredential;
pub use crate::error::CredentialError;
pub use crate::kdf::{Argon2Kdf, PasswordHashAlgorithm, ScryptKdf, digests_match, generate_salt};
pub use crate::kdf::argon2::ARGON2_ID;
pub use crate::kdf::scrypt::SCRYPT_ID;
pub use crate::params::{
    Argon2Params, Argon2Variant, Argon2Version, CostFingerprint, HashParams, ScryptParams,
    DEFAULT_BLOCK, DEFAULT_COST, DEFAULT_HASH_LENGTH, DEFAULT_PARALLELISM, DEFAULT_SALT_LENGTH,
};
pub use crate::policy::{PolicySource, RealmPolicy, argon2_keys, scrypt_keys};
pub use crate::provider::{HashProvider, argon2_provider, scrypt_provider};
