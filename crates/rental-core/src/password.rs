//! # Password Hashes
//!
//! Credentials are stored as salted argon2 PHC strings
//! (`$argon2id$v=19$m=...$salt$hash`), never as plaintext.

use std::fmt;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{CoreError, CoreResult};
use crate::validation::validate_password;

/// A stored password credential.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash {
    phc: String,
}

// Keep the hash out of logs.
impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHash")
            .field("phc", &"[REDACTED]")
            .finish()
    }
}

impl PasswordHash {
    /// Validates and hashes a new plaintext password with a fresh salt.
    ///
    /// ## Errors
    /// - `Validation` if the password is shorter than `MIN_PASSWORD_LENGTH`
    /// - `PasswordHash` if argon2 rejects its parameters
    pub fn new(plain_text: &str) -> CoreResult<Self> {
        validate_password(plain_text)?;

        let salt = SaltString::generate(&mut OsRng);
        let phc = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| CoreError::PasswordHash(e.to_string()))?
            .to_string();

        Ok(PasswordHash { phc })
    }

    /// Wraps a PHC string loaded from the store.
    pub fn from_phc(phc: impl Into<String>) -> Self {
        PasswordHash { phc: phc.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.phc
    }

    /// Checks a claimed password. A malformed stored hash never verifies.
    pub fn verify(&self, plain_text: &str) -> bool {
        match argon2::PasswordHash::new(&self.phc) {
            Ok(parsed) => Argon2::default()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}

impl From<PasswordHash> for String {
    fn from(hash: PasswordHash) -> Self {
        hash.phc
    }
}
