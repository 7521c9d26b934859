//! Cost and shape parameters for the two hash families.
//!
//! Both families share the same default table. Construction performs no
//! validation; bad values are rejected by the hash engine when the primitive
//! is invoked.

pub use argon2::{Algorithm as Argon2Variant, Version as Argon2Version};

/// Default CPU/memory cost (scrypt `N`, argon2 iterations `t`).
pub const DEFAULT_COST: u32 = 16384;
/// Default block parameter (scrypt `r`, argon2 memory in KiB).
pub const DEFAULT_BLOCK: u32 = 8;
/// Default number of parallel lanes.
pub const DEFAULT_PARALLELISM: u32 = 1;
/// Default derived key length in bytes.
pub const DEFAULT_HASH_LENGTH: usize = 32;
/// Default salt length in bytes, used only at generation time.
pub const DEFAULT_SALT_LENGTH: usize = 16;

/// The three parameters the policy compliance check compares.
///
/// `hash_length` and `salt_length` are deliberately absent: the former is
/// derived from the stored digest, the latter only matters at generation
/// time, and neither is policy-significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostFingerprint {
    /// scrypt `N` / argon2 iterations.
    pub cost: u32,
    /// scrypt `r` / argon2 memory in KiB.
    pub block_size: u32,
    pub parallelism: u32,
}

/// Common view over both parameter families, shared by the policy check and
/// the credential encoder.
pub trait HashParams {
    fn fingerprint(&self) -> CostFingerprint;
    fn hash_length(&self) -> usize;
    fn salt_length(&self) -> usize;
}

/// Argon2 cost parameters.
///
/// `variant` and `version` are carried so that verification can reproduce
/// the stored encoding exactly; they take no part in the policy fingerprint.
#[derive(Debug, Clone, Copy)]
pub struct Argon2Params {
    variant: Argon2Variant,
    version: Argon2Version,
    iterations: u32,
    memory_kib: u32,
    parallelism: u32,
    hash_length: usize,
    salt_length: usize,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self::new(DEFAULT_COST, DEFAULT_BLOCK, DEFAULT_PARALLELISM)
    }
}

impl Argon2Params {
    /// Argon2id with the default hash and salt lengths.
    pub fn new(iterations: u32, memory_kib: u32, parallelism: u32) -> Self {
        Self::with_lengths(
            iterations,
            memory_kib,
            parallelism,
            DEFAULT_HASH_LENGTH,
            DEFAULT_SALT_LENGTH,
        )
    }

    pub fn with_lengths(
        iterations: u32,
        memory_kib: u32,
        parallelism: u32,
        hash_length: usize,
        salt_length: usize,
    ) -> Self {
        Self {
            variant: Argon2Variant::Argon2id,
            version: Argon2Version::V0x13,
            iterations,
            memory_kib,
            parallelism,
            hash_length,
            salt_length,
        }
    }

    pub fn variant(mut self, variant: Argon2Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn version(mut self, version: Argon2Version) -> Self {
        self.version = version;
        self
    }

    pub fn get_variant(&self) -> Argon2Variant {
        self.variant
    }

    pub fn get_version(&self) -> Argon2Version {
        self.version
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn memory_kib(&self) -> u32 {
        self.memory_kib
    }

    pub fn parallelism(&self) -> u32 {
        self.parallelism
    }
}

impl HashParams for Argon2Params {
    fn fingerprint(&self) -> CostFingerprint {
        CostFingerprint {
            cost: self.iterations,
            block_size: self.memory_kib,
            parallelism: self.parallelism,
        }
    }

    fn hash_length(&self) -> usize {
        self.hash_length
    }

    fn salt_length(&self) -> usize {
        self.salt_length
    }
}

/// scrypt cost parameters.
#[derive(Debug, Clone, Copy)]
pub struct ScryptParams {
    cost_n: u32,
    block_size_r: u32,
    parallelism: u32,
    hash_length: usize,
    salt_length: usize,
}

impl Default for ScryptParams {
    fn default() -> Self {
        Self::new(DEFAULT_COST, DEFAULT_BLOCK, DEFAULT_PARALLELISM)
    }
}

impl ScryptParams {
    /// Default hash and salt lengths.
    pub fn new(cost_n: u32, block_size_r: u32, parallelism: u32) -> Self {
        Self::with_lengths(
            cost_n,
            block_size_r,
            parallelism,
            DEFAULT_HASH_LENGTH,
            DEFAULT_SALT_LENGTH,
        )
    }

    pub fn with_lengths(
        cost_n: u32,
        block_size_r: u32,
        parallelism: u32,
        hash_length: usize,
        salt_length: usize,
    ) -> Self {
        Self {
            cost_n,
            block_size_r,
            parallelism,
            hash_length,
            salt_length,
        }
    }

    pub fn cost_n(&self) -> u32 {
        self.cost_n
    }

    pub fn block_size_r(&self) -> u32 {
        self.block_size_r
    }

    pub fn parallelism(&self) -> u32 {
        self.parallelism
    }
}

impl HashParams for ScryptParams {
    fn fingerprint(&self) -> CostFingerprint {
        CostFingerprint {
            cost: self.cost_n,
            block_size: self.block_size_r,
            parallelism: self.parallelism,
        }
    }

    fn hash_length(&self) -> usize {
        self.hash_length
    }

    fn salt_length(&self) -> usize {
        self.salt_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_policy_table() {
        let scrypt = ScryptParams::default();
        assert_eq!(scrypt.cost_n(), 16384);
        assert_eq!(scrypt.block_size_r(), 8);
        assert_eq!(scrypt.parallelism(), 1);
        assert_eq!(scrypt.hash_length(), 32);
        assert_eq!(scrypt.salt_length(), 16);

        let argon2 = Argon2Params::default();
        assert_eq!(argon2.iterations(), 16384);
        assert_eq!(argon2.memory_kib(), 8);
        assert_eq!(argon2.parallelism(), 1);
        assert_eq!(argon2.hash_length(), 32);
        assert_eq!(argon2.salt_length(), 16);
        assert_eq!(argon2.get_variant(), Argon2Variant::Argon2id);
    }

    #[test]
    fn fingerprint_ignores_lengths() {
        let a = ScryptParams::with_lengths(1024, 8, 2, 32, 16);
        let b = ScryptParams::with_lengths(1024, 8, 2, 64, 24);
        assert_eq!(a.fingerprint(), b.fingerprint());

        let c = ScryptParams::with_lengths(2048, 8, 2, 32, 16);
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn fingerprint_is_comparable_across_families() {
        // Same triple, different family: the provider never compares across
        // families (the identifier check runs first), but the value type is
        // shared.
        let scrypt = ScryptParams::new(16384, 8, 1);
        let argon2 = Argon2Params::new(16384, 8, 1);
        assert_eq!(scrypt.fingerprint(), argon2.fingerprint());
    }

    #[test]
    fn construction_does_not_validate() {
        // Degenerate values are rejected by the engine at use time, not here.
        let p = ScryptParams::new(0, 0, 0);
        assert_eq!(p.cost_n(), 0);
        let a = Argon2Params::new(0, 0, 0);
        assert_eq!(a.parallelism(), 0);
    }
}
