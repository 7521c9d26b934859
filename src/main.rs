use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
mod auth;
use credhash::{
    ARGON2_ID, RealmPolicy, SCRYPT_ID, StoredCredential, argon2_keys, argon2_provider,
    scrypt_keys, scrypt_provider,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Family {
    Scrypt,
    Argon2,
}

#[derive(Debug, clap::Args)]
struct PolicyArgs {
    /// CPU/memory cost: scrypt N (power of two) or argon2 iterations (default: 16384)
    #[arg(long)]
    cost: Option<u32>,

    /// scrypt block size r, or argon2 memory in KiB (default: 8)
    #[arg(long = "block-size")]
    block_size: Option<u32>,

    /// Parallel lanes (default: 1)
    #[arg(long)]
    parallelism: Option<u32>,

    /// Derived key length in bytes (default: 32)
    #[arg(long = "hash-length")]
    hash_length: Option<u32>,

    /// Salt length in bytes (default: 16)
    #[arg(long = "salt-length")]
    salt_length: Option<u32>,
}

impl PolicyArgs {
    fn to_realm_policy(&self, family: Family) -> RealmPolicy {
        let (cost, block, parallelism, hash_length, salt_length) = match family {
            Family::Scrypt => (
                scrypt_keys::COST,
                scrypt_keys::BLOCK_SIZE,
                scrypt_keys::PARALLELISM,
                scrypt_keys::HASH_LENGTH,
                scrypt_keys::SALT_LENGTH,
            ),
            Family::Argon2 => (
                argon2_keys::ITERATIONS,
                argon2_keys::MEMORY,
                argon2_keys::PARALLELISM,
                argon2_keys::HASH_LENGTH,
                argon2_keys::SALT_LENGTH,
            ),
        };

        let mut policy = RealmPolicy::new();
        if let Some(v) = self.cost {
            policy.set(cost, v);
        }
        if let Some(v) = self.block_size {
            policy.set(block, v);
        }
        if let Some(v) = self.parallelism {
            policy.set(parallelism, v);
        }
        if let Some(v) = self.hash_length {
            policy.set(hash_length, v);
        }
        if let Some(v) = self.salt_length {
            policy.set(salt_length, v);
        }
        policy
    }
}

#[derive(Debug, Parser)]
#[command(name = "credhash")]
#[command(
    version,
    about = "Hash, verify and policy-check password credentials (argon2 / scrypt)."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Hashes a password into a credential JSON file
    Hash {
        /// Hash family for the new credential
        #[arg(long, value_enum, default_value = "scrypt")]
        algorithm: Family,

        #[command(flatten)]
        policy: PolicyArgs,

        /// Where to write the credential (stdout when omitted)
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },

    /// Verifies a password against a stored credential
    #[command(arg_required_else_help = true)]
    Verify {
        /// Path to the credential JSON file
        #[arg(long, value_name = "PATH")]
        credential: PathBuf,
    },

    /// Checks whether a stored credential still meets the configured policy
    #[command(arg_required_else_help = true)]
    Check {
        /// Hash family the policy applies to
        #[arg(long, value_enum, default_value = "scrypt")]
        algorithm: Family,

        #[command(flatten)]
        policy: PolicyArgs,

        /// Path to the credential JSON file
        #[arg(long, value_name = "PATH")]
        credential: PathBuf,
    },
}

fn load_credential(path: &Path) -> Result<StoredCredential> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("cannot read credential file {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("cannot parse credential file {}", path.display()))
}

fn main() -> Result<()> {
    let args = Cli::parse();

    match args.command {
        Commands::Hash {
            algorithm,
            policy,
            out,
        } => {
            let password = auth::read_new_password()?;
            let realm = policy.to_realm_policy(algorithm);
            let credential = match algorithm {
                Family::Scrypt => scrypt_provider(realm).encode_credential(&password)?,
                Family::Argon2 => argon2_provider(realm).encode_credential(&password)?,
            };
            let json = serde_json::to_string_pretty(&credential)?;
            match out {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("cannot write {}", path.display()))?;
                    println!("credential written to {}", path.display());
                }
                None => println!("{json}"),
            }
        }

        Commands::Verify { credential } => {
            let password = auth::read_password()?;
            let stored = load_credential(&credential)?;
            let verified = match stored.algorithm() {
                SCRYPT_ID => scrypt_provider(RealmPolicy::new()).verify(&password, &stored)?,
                ARGON2_ID => argon2_provider(RealmPolicy::new()).verify(&password, &stored)?,
                other => bail!("credential uses unknown algorithm '{other}'"),
            };
            if verified {
                println!("password verified");
            } else {
                println!("password rejected");
                std::process::exit(1);
            }
        }

        Commands::Check {
            algorithm,
            policy,
            credential,
        } => {
            let stored = load_credential(&credential)?;
            let realm = policy.to_realm_policy(algorithm);
            let compliant = match algorithm {
                Family::Scrypt => scrypt_provider(realm).policy_check(&stored)?,
                Family::Argon2 => argon2_provider(realm).policy_check(&stored)?,
            };
            if compliant {
                println!("credential meets the configured policy");
            } else {
                println!("credential must be re-hashed");
                std::process::exit(2);
            }
        }
    }

    Ok(())
}
