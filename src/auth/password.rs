use crate::error::{AppError, ErrorKind};
use bcrypt::{hash, verify, DEFAULT_COST};

/// Hashes a password with a fresh random salt. Slow by construction;
/// hashing the same password twice yields different strings.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST).map_err(|e| {
        AppError::new(ErrorKind::Internal, format!("failed to hash password: {}", e))
    })
}

/// Verifies a password against a stored hash in constant time.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    verify(password, password_hash).map_err(|e| {
        AppError::new(
            ErrorKind::Internal,
            format!("failed to verify password: {}", e),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing_and_verification() {
        let password = "test_password123";
        let hashed = hash_password(password).unwrap();

        assert_ne!(password, hashed);
        assert!(verify_password(password, &hashed).unwrap());
        assert!(!verify_password("wrong_password", &hashed).unwrap());
    }

    #[test]
    fn test_salts_are_random() {
        let password = "same input";
        let first = hash_password(password).unwrap();
        let second = hash_password(password).unwrap();
        assert_ne!(first, second);
    }
}
