use argon2::{
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use thiserror::Error;
use tracing::error;

/// Argon2 iteration count used for every new digest.
pub const HASH_COST: u32 = 10;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("malformed password digest")]
    Malformed,
    #[error("password does not match")]
    Mismatch,
}

/// Salted Argon2id hashing with a fixed cost.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self {
            cost: HASH_COST,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Returns a PHC string; the salt is generated here and embedded in it.
    pub fn hash(&self, plain: &str) -> Result<String, PasswordError> {
        let params = Params::new(
            Params::DEFAULT_M_COST,
            self.cost,
            Params::DEFAULT_P_COST,
            None,
        )
        .map_err(|e| {
            error!(error = %e, cost = self.cost, "argon2 params error");
            PasswordError::Hash(e.to_string())
        })?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let salt = SaltString::generate(&mut OsRng);
        let hash = argon2
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| {
                error!(error = %e, "argon2 hash_password error");
                PasswordError::Hash(e.to_string())
            })?
            .to_string();
        Ok(hash)
    }

    /// Cost and salt are read back from `digest`.
    pub fn verify(&self, digest: &str, plain: &str) -> Result<(), PasswordError> {
        let parsed = PasswordHash::new(digest).map_err(|e| {
            error!(error = %e, "argon2 parse hash error");
            PasswordError::Malformed
        })?;
        Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .map_err(|e| match e {
                argon2::password_hash::Error::Password => PasswordError::Mismatch,
                other => {
                    error!(error = %other, "argon2 verify error");
                    PasswordError::Malformed
                }
            })
    }
}
