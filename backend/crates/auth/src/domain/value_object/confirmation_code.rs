//! Confirmation Code Value Object
//!
//! The one-time code the pool emails during sign-up confirmation and
//! password reset. Only shape is checked here; whether the code is
//! correct or expired is the pool's call.

use kernel::error::app_error::{AppError, AppResult};

/// Maximum code length accepted by the pool API
const CODE_MAX_LENGTH: usize = 32;

/// One-time confirmation code value object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationCode(String);

impl ConfirmationCode {
    /// Create a new confirmation code with validation
    pub fn new(code: impl Into<String>) -> AppResult<Self> {
        let code = code.into().trim().to_string();

        if code.is_empty() {
            return Err(AppError::bad_request("Confirmation code cannot be empty"));
        }

        if code.len() > CODE_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Confirmation code must be at most {} characters",
                CODE_MAX_LENGTH
            )));
        }

        if code.chars().any(char::is_control) {
            return Err(AppError::bad_request(
                "Confirmation code contains invalid characters",
            ));
        }

        Ok(Self(code))
    }

    /// Get the code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_valid() {
        assert!(ConfirmationCode::new("123456").is_ok());
        assert!(ConfirmationCode::new(" 123456 ").is_ok());
        assert!(ConfirmationCode::new("ABC123").is_ok());
    }

    #[test]
    fn test_code_invalid() {
        assert!(ConfirmationCode::new("").is_err());
        assert!(ConfirmationCode::new("   ").is_err());
        assert!(ConfirmationCode::new("123\t456").is_err());
        assert!(ConfirmationCode::new("a".repeat(33)).is_err());
    }

    #[test]
    fn test_code_trimmed() {
        let code = ConfirmationCode::new(" 123456 ").unwrap();
        assert_eq!(code.as_str(), "123456");
    }
}
