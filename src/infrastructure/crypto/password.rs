//! Password hashing utilities

use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};
use thiserror::Error;

/// bcrypt only reads the first 72 bytes of its input.
pub const MAX_PASSWORD_BYTES: usize = 72;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password must be at most 72 bytes, got {0}")]
    TooLong(usize),

    #[error(transparent)]
    Bcrypt(#[from] BcryptError),
}

/// Salted one-way password hashing (bcrypt).
///
/// The cost factor is part of the stored digest, so changing it only
/// affects new hashes; old digests keep verifying.
#[derive(Debug, Clone, Copy)]
pub struct PasswordManager {
    cost: u32,
}

impl PasswordManager {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password with a fresh random salt.
    ///
    /// Passwords longer than [`MAX_PASSWORD_BYTES`] are refused instead of
    /// being silently truncated.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordError::TooLong(password.len()));
        }
        Ok(hash(password, self.cost)?)
    }

    /// Verify a password against a stored digest.
    ///
    /// A malformed digest is reported as a mismatch, never as an error.
    /// So is an over-long password, which no stored digest can represent.
    pub fn verify_password(&self, password: &str, digest: &str) -> bool {
        if password.len() > MAX_PASSWORD_BYTES {
            return false;
        }
        verify(password, digest).unwrap_or(false)
    }
}

impl Default for PasswordManager {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}
