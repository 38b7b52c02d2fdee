//! Password hashing with Argon2 (PHC string format)

use argon2::{
    password_hash::{self, rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Password must not be empty")]
    Empty,
    #[error("Hash error: {0}")]
    HashError(String),
}

impl From<password_hash::Error> for PasswordError {
    fn from(e: password_hash::Error) -> Self {
        PasswordError::HashError(e.to_string())
    }
}

pub struct PasswordService;

impl PasswordService {
    /// One-way hash with a fresh random salt.
    pub fn hash(password: &str) -> Result<String, PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::Empty);
        }
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    /// `Ok(false)` on mismatch. Errors only when the stored hash is unusable.
    pub fn verify(password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        let parsed = PasswordHash::new(stored_hash)?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_salted_and_verifiable() {
        let first = PasswordService::hash("changeme").unwrap();
        let second = PasswordService::hash("changeme").unwrap();
        assert_ne!(first, second);
        assert!(first.starts_with("$argon2"));
        assert!(PasswordService::verify("changeme", &first).unwrap());
        assert!(!PasswordService::verify("wrong", &first).unwrap());
    }

    #[test]
    fn test_empty_password_is_rejected() {
        assert!(matches!(PasswordService::hash(""), Err(PasswordError::Empty)));
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(matches!(
            PasswordService::verify("changeme", "plaintext"),
            Err(PasswordError::HashError(_))
        ));
    }
}
