//! Password hashing and verification using argon2id.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use thiserror::Error;

use crate::config::SecurityConfig;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Invalid password hashing parameters: {0}")]
    InvalidParams(String),

    #[error("Password hashing failed: {0}")]
    Hash(String),
}

/// Argon2id hasher with a configurable cost.
#[derive(Clone)]
pub struct CredentialHasher {
    params: Params,
}

impl CredentialHasher {
    pub fn new(memory_kib: u32, iterations: u32) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, 1, None)
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;
        Ok(Self { params })
    }

    pub fn from_config(security: &SecurityConfig) -> Result<Self, PasswordError> {
        Self::new(security.password_memory_kib, security.password_iterations)
    }

    /// Cheapest cost argon2 accepts. Only meant for tests.
    pub fn minimal() -> Self {
        Self {
            params: Params::new(Params::MIN_M_COST, Params::MIN_T_COST, 1, None)
                .unwrap_or_default(),
        }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a password with a random salt.
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::Hash(e.to_string()))
    }

    /// Compare a password against a stored hash. A stored value that is not
    /// a valid PHC string never matches.
    pub fn verify(&self, password: &str, stored_hash: &str) -> bool {
        match PasswordHash::new(stored_hash) {
            Ok(parsed) => self.argon2().verify_password(password.as_bytes(), &parsed).is_ok(),
            Err(e) => {
                tracing::error!("Stored password hash is unparsable: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let hasher = CredentialHasher::minimal();
        let hash = hasher.hash("pwd1").unwrap();
        assert!(hasher.verify("pwd1", &hash));
        assert!(!hasher.verify("notcorrect", &hash));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let hasher = CredentialHasher::minimal();
        assert_ne!(hasher.hash("pwd1").unwrap(), hasher.hash("pwd1").unwrap());
    }

    #[test]
    fn plaintext_in_hash_column_never_matches() {
        let hasher = CredentialHasher::minimal();
        assert!(!hasher.verify("pwd1", "pwd1"));
    }

    #[test]
    fn rejects_impossible_cost() {
        assert!(CredentialHasher::new(0, 0).is_err());
    }
}
