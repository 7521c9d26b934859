//! Realm policy configuration lookup.
//!
//! The host exposes per-realm policy values by parameter name. Lookup is a
//! typed optional: an absent value falls back to the hard-coded default for
//! that parameter, never to exception-driven control flow.

use std::collections::HashMap;

/// Policy parameter names for the scrypt family.
pub mod scrypt_keys {
    pub const COST: &str = "scryptN";
    pub const BLOCK_SIZE: &str = "scryptr";
    pub const PARALLELISM: &str = "scryptp";
    pub const HASH_LENGTH: &str = "scryptHashLength";
    pub const SALT_LENGTH: &str = "scryptSaltLength";
}

/// Policy parameter names for the argon2 family.
pub mod argon2_keys {
    pub const ITERATIONS: &str = "argon2Iterations";
    pub const MEMORY: &str = "argon2Memory";
    pub const PARALLELISM: &str = "argon2Parallelism";
    pub const HASH_LENGTH: &str = "argon2HashLength";
    pub const SALT_LENGTH: &str = "argon2SaltLength";
}

/// A source of configured policy values.
pub trait PolicySource {
    /// Returns the configured value for `parameter`, or `None` when the
    /// realm does not configure it.
    fn policy_config(&self, parameter: &str) -> Option<u32>;
}

/// Map-backed policy source; an empty policy yields the defaults everywhere.
#[derive(Debug, Clone, Default)]
pub struct RealmPolicy {
    values: HashMap<String, u32>,
}

impl RealmPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, parameter: impl Into<String>, value: u32) -> &mut Self {
        self.values.insert(parameter.into(), value);
        self
    }
}

impl PolicySource for RealmPolicy {
    fn policy_config(&self, parameter: &str) -> Option<u32> {
        self.values.get(parameter).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_policy_configures_nothing() {
        let policy = RealmPolicy::new();
        assert_eq!(policy.policy_config(scrypt_keys::COST), None);
        assert_eq!(policy.policy_config(argon2_keys::MEMORY), None);
    }

    #[test]
    fn set_values_are_returned() {
        let mut policy = RealmPolicy::new();
        policy.set(scrypt_keys::COST, 32768);
        policy.set(scrypt_keys::PARALLELISM, 2);
        assert_eq!(policy.policy_config(scrypt_keys::COST), Some(32768));
        assert_eq!(policy.policy_config(scrypt_keys::PARALLELISM), Some(2));
        assert_eq!(policy.policy_config(scrypt_keys::BLOCK_SIZE), None);
    }
}
