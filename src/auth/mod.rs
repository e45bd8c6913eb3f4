pub mod password;

use serde::Deserialize;
use validator::Validate;

// Re-export necessary items
pub use password::{hash_password, verify_password};

/// Payload for a registration request. Usernames are opaque case-sensitive
/// strings; the only rule is that they are non-empty.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

/// Payload for a login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            username: "alice".to_string(),
            password: "hunter2!".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty_username = RegisterRequest {
            username: "".to_string(),
            password: "hunter2!".to_string(),
        };
        assert!(empty_username.validate().is_err());

        let empty_password = RegisterRequest {
            username: "alice".to_string(),
            password: "".to_string(),
        };
        assert!(empty_password.validate().is_err());
    }

    #[test]
    fn test_login_request_validation() {
        let valid = LoginRequest {
            username: "alice".to_string(),
            password: "hunter2!".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty_username = LoginRequest {
            username: "".to_string(),
            password: "hunter2!".to_string(),
        };
        assert!(empty_username.validate().is_err());
    }
}
