//! Password hashing

use crate::StorageError;
use bcrypt::{hash, verify, DEFAULT_COST};

/// bcrypt-backed credential checks
pub struct AuthService;

impl AuthService {
    pub fn hash_password(password: &str) -> Result<String, StorageError> {
        Ok(hash(password, DEFAULT_COST)?)
    }

    pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, StorageError> {
        Ok(verify(password, password_hash)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hashed = AuthService::hash_password("s3cret").unwrap();
        assert!(AuthService::verify_password("s3cret", &hashed).unwrap());
        assert!(!AuthService::verify_password("wrong", &hashed).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = AuthService::hash_password("same").unwrap();
        let b = AuthService::hash_password("same").unwrap();
        assert_ne!(a, b);
    }
}
