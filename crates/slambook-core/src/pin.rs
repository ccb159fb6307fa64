//! PIN hashing and verification.
//!
//! PINs are stored as salted Argon2id hashes in PHC string format and
//! verified with the constant-time comparison built into the `argon2`
//! crate. The presented PIN is trimmed before hashing or verification;
//! comparison is otherwise exact and case-sensitive.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, SaltString};
use argon2::{Argon2, PasswordVerifier};

use crate::error::{Error, Result};

/// Hash a (already trimmed and validated) PIN for storage.
pub fn hash_pin(pin: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(pin.trim().as_bytes(), &salt)
        .map_err(|e| Error::Internal(format!("PIN hashing failed: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a presented PIN against a stored hash.
///
/// Returns `Ok(true)` on match, `Ok(false)` on mismatch, and an error only
/// if the stored hash itself is malformed.
pub fn verify_pin(pin: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| Error::Internal(format!("Stored PIN hash is malformed: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(pin.trim().as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_pin("1234").unwrap();
        assert!(verify_pin("1234", &hash).unwrap());
    }

    #[test]
    fn test_wrong_pin_rejected() {
        let hash = hash_pin("1234").unwrap();
        assert!(!verify_pin("1235", &hash).unwrap());
    }

    #[test]
    fn test_presented_pin_is_trimmed() {
        let hash = hash_pin("1234").unwrap();
        assert!(verify_pin(" 1234 ", &hash).unwrap());
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        let hash = hash_pin("SecretPin").unwrap();
        assert!(verify_pin("SecretPin", &hash).unwrap());
        assert!(!verify_pin("secretpin", &hash).unwrap());
    }

    #[test]
    fn test_salts_differ_between_hashes() {
        let a = hash_pin("1234").unwrap();
        let b = hash_pin("1234").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        assert!(verify_pin("1234", "not-a-phc-string").is_err());
    }
}
