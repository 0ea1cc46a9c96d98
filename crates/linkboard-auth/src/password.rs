//! Argon2id password hashing
//!
//! Users never have their password stored; the `users.password_hash` column
//! holds a PHC string such as `$argon2id$v=19$m=19456,t=2,p=1$<salt>$<hash>`
//! produced with argon2's default parameters and a fresh random salt.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("failed to hash password: {0}")]
    Hash(String),

    #[error("stored password hash is malformed: {0}")]
    MalformedHash(String),

    #[error("failed to verify password: {0}")]
    Verify(String),
}

/// Hash `password` into a PHC string suitable for storage.
///
/// ```
/// use linkboard_auth::hash_password;
///
/// let hash = hash_password("hunter2").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Check `password` against a stored PHC string.
///
/// A mismatch is `Ok(false)`; only an unparseable hash or an internal argon2
/// failure is an error.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, PasswordError> {
    let parsed =
        PasswordHash::new(stored).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::Verify(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_phc_argon2id() {
        let hash = hash_password("a@x.com-secret").expect("hash");
        assert!(hash.starts_with("$argon2id$v=19$"));
        assert!(!hash.contains("a@x.com-secret"));
    }

    #[test]
    fn test_verify_matching_and_mismatching() {
        let hash = hash_password("correct horse").expect("hash");
        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("correct horse ", &hash).unwrap());
        assert!(!verify_password("Correct Horse", &hash).unwrap());
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let first = hash_password("12345678").expect("hash");
        let second = hash_password("12345678").expect("hash");
        assert_ne!(first, second);
        assert!(verify_password("12345678", &first).unwrap());
        assert!(verify_password("12345678", &second).unwrap());
    }

    #[test]
    fn test_plaintext_in_store_is_rejected() {
        // A legacy plaintext credential must not verify by string equality.
        let result = verify_password("12345678", "12345678");
        assert!(matches!(result, Err(PasswordError::MalformedHash(_))));
    }
}
