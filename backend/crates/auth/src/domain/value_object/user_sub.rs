//! User Sub Value Object
//!
//! The pool-issued unique identifier for a user (the `sub` attribute).
//! Opaque to us: the pool mints it at sign-up and it never changes, even
//! if the email does.

use kernel::error::app_error::{AppError, AppResult};

/// Pool-issued user identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserSub(String);

impl UserSub {
    /// Create from a pool response value
    pub fn new(sub: impl Into<String>) -> AppResult<Self> {
        let sub = sub.into();

        if sub.trim().is_empty() {
            return Err(AppError::bad_request("User identifier cannot be empty"));
        }

        Ok(Self(sub))
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserSub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for UserSub {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
