//! Username Value Object
//!
//! The login identifier sent to the user pool. The screens collect an
//! email address, but the pool treats it as an opaque username, so the
//! rules here are deliberately loose: the pool is the authority on which
//! identifiers exist.

use kernel::error::app_error::{AppError, AppResult};
use std::str::FromStr;

/// Maximum username length accepted by the pool API
const USERNAME_MAX_LENGTH: usize = 128;

/// Pool login identifier value object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Create a new username with validation
    ///
    /// Normalizes case and whitespace the same way [`Email`] does, so a
    /// sign-in matches the account no matter how the address was typed.
    ///
    /// [`Email`]: crate::domain::value_object::email::Email
    pub fn new(username: impl Into<String>) -> AppResult<Self> {
        let username = username.into().trim().to_lowercase();

        if username.is_empty() {
            return Err(AppError::bad_request("Username cannot be empty"));
        }

        if username.len() > USERNAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Username must be at most {} characters",
                USERNAME_MAX_LENGTH
            )));
        }

        if username.chars().any(char::is_control) {
            return Err(AppError::bad_request(
                "Username contains invalid characters",
            ));
        }

        Ok(Self(username))
    }

    /// Get the username as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the normalized string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl FromStr for Username {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Username::new(s)
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_valid() {
        assert!(Username::new("user@example.com").is_ok());
        assert!(Username::new("plain-user").is_ok());
        assert!(Username::new("  padded@example.com  ").is_ok());
    }

    #[test]
    fn test_username_normalized() {
        let name = Username::new("  User@Example.COM ").unwrap();
        assert_eq!(name.as_str(), "user@example.com");
    }

    #[test]
    fn test_username_invalid() {
        assert!(Username::new("").is_err());
        assert!(Username::new("   ").is_err());
        assert!(Username::new("a".repeat(129)).is_err());
        assert!(Username::new("user\nname").is_err());
    }
}
