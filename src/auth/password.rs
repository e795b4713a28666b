//! Password hashing and verification via bcrypt.
//!
//! Stored hashes live in the `password_hash` column of the `users` table.
//! Verification is a slow one-way comparison; login treats a verification
//! failure the same as an unknown email.

use bcrypt::{hash, verify, BcryptError};

/// Work factor for new hashes. Matches what the seeded sample accounts use.
pub const HASH_COST: u32 = 10;

pub fn hash_password(password: &str) -> Result<String, BcryptError> {
    hash(password, HASH_COST)
}

pub fn verify_password(password: &str, hashed: &str) -> Result<bool, BcryptError> {
    verify(password, hashed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let hashed = hash(b"password", 4).unwrap();
        assert!(verify_password("password", &hashed).unwrap());
        assert!(!verify_password("wrong", &hashed).unwrap());
    }

    #[test]
    fn malformed_hash_errors() {
        assert!(verify_password("password", "not-a-bcrypt-hash").is_err());
    }
}
