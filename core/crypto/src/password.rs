//! Adaptive password hashing using Argon2id.
//!
//! Cost policy is explicit: a [`Password`] value carries the operations
//! and memory tiers it hashes under, instead of hiding them in mutable
//! process-wide defaults. Pass the policy to the call sites that need it;
//! verification reads its parameters from the hash string itself.

use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};

use cloakbox_common::{Error, Result};

/// Degree of parallelism. Fixed: the cost knobs are the tiers below.
const PARALLELISM: u32 = 1;

/// Named cost level for password hashing.
///
/// Tiers bundle an operations count and a memory budget; hashing takes
/// CPU time and memory proportional to the selected tier by design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostTier {
    /// For online, interactive logins (~64 MiB, 2 passes).
    Interactive,
    /// For server-side use where latency matters less (~256 MiB, 3 passes).
    Moderate,
    /// For high-value, rarely-used secrets (~1 GiB, 4 passes).
    Sensitive,
}

impl CostTier {
    /// Number of Argon2id passes for this tier.
    pub fn ops_limit(self) -> u32 {
        match self {
            CostTier::Interactive => 2,
            CostTier::Moderate => 3,
            CostTier::Sensitive => 4,
        }
    }

    /// Memory cost in KiB for this tier.
    pub fn memory_kib(self) -> u32 {
        match self {
            CostTier::Interactive => 65536,   // 64 MiB
            CostTier::Moderate => 262144,     // 256 MiB
            CostTier::Sensitive => 1048576,   // 1 GiB
        }
    }
}

/// Password hashing policy: an operations tier and a memory tier.
///
/// Construct once at startup and pass where needed. `Default` is the
/// interactive tier for both knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Password {
    ops: CostTier,
    mem: CostTier,
}

impl Password {
    /// Create a policy from explicit tiers.
    pub fn new(ops: CostTier, mem: CostTier) -> Self {
        Self { ops, mem }
    }

    /// Hash `password` under this policy.
    ///
    /// Returns a PHC-encoded string embedding the algorithm parameters and
    /// a random salt; hashing the same password twice yields different
    /// strings of the same length.
    ///
    /// # Errors
    /// - Returns `Crypto` if the provider rejects the parameters
    pub fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hashed = self
            .hasher()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| Error::Crypto(format!("password hashing failed: {}", e)))?;
        Ok(hashed.to_string())
    }

    /// Report whether `hash` was computed under parameters different from
    /// this policy.
    ///
    /// Used to detect hashes produced under weaker (or merely different)
    /// cost settings so they can be upgraded on next login.
    ///
    /// # Errors
    /// - Returns `MalformedHash` if `hash` cannot be parsed
    pub fn needs_rehash(&self, hash: &str) -> Result<bool> {
        let parsed =
            PasswordHash::new(hash).map_err(|e| Error::MalformedHash(e.to_string()))?;
        if parsed.algorithm.as_str() != Algorithm::Argon2id.as_str() {
            return Ok(true);
        }
        let params =
            Params::try_from(&parsed).map_err(|e| Error::MalformedHash(e.to_string()))?;
        Ok(params.t_cost() != self.ops.ops_limit()
            || params.m_cost() != self.mem.memory_kib()
            || params.p_cost() != PARALLELISM)
    }

    /// Verify `password` against a PHC-encoded hash.
    ///
    /// Parameters and salt come from the hash itself; the digest
    /// comparison is constant-time. A wrong password is `Ok(false)`, never
    /// an error.
    ///
    /// # Errors
    /// - Returns `MalformedHash` if `hash` cannot be parsed
    /// - Returns `Crypto` if verification fails for any reason other than
    ///   a mismatched password
    pub fn verify(password: &str, hash: &str) -> Result<bool> {
        let parsed =
            PasswordHash::new(hash).map_err(|e| Error::MalformedHash(e.to_string()))?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(Error::Crypto(format!(
                "password verification failed: {}",
                e
            ))),
        }
    }

    fn hasher(&self) -> Result<Argon2<'static>> {
        let params = Params::new(
            self.mem.memory_kib(),
            self.ops.ops_limit(),
            PARALLELISM,
            None,
        )
        .map_err(|e| Error::Crypto(format!("invalid password hash parameters: {}", e)))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl Default for Password {
    fn default() -> Self {
        Self::new(CostTier::Interactive, CostTier::Interactive)
    }
}
