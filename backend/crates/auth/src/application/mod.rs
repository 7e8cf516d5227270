//! Application Layer
//!
//! Use cases and application services. One use case per screen action;
//! all of them talk to the same [`UserPool`] port.
//!
//! [`UserPool`]: crate::domain::provider::UserPool

pub mod check_session;
pub mod config;
pub mod confirm_sign_up;
pub mod reset_password;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

// Re-exports
pub use check_session::{CheckSessionUseCase, SessionInput, SessionOutput};
pub use config::AuthConfig;
pub use confirm_sign_up::{ConfirmSignUpInput, ConfirmSignUpUseCase};
pub use reset_password::{ResetPasswordInput, ResetPasswordUseCase};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::{SignOutInput, SignOutUseCase};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};

use crate::domain::value_object::{
    confirmation_code::ConfirmationCode, email::Email, username::Username,
};
use crate::error::{AuthError, AuthResult};

// Form-level checks shared by the use cases. These produce the friendly
// messages for empty or malformed fields; everything the pool can judge
// (wrong password, unknown code, policy) is left to the pool.

/// Parse the email field into a pool username
pub(crate) fn parse_username(raw: &str) -> AuthResult<Username> {
    if raw.trim().is_empty() {
        return Err(AuthError::MissingField("Email"));
    }
    Username::new(raw).map_err(|_| AuthError::InvalidEmail)
}

/// Parse the email field with full address validation (sign-up only;
/// the pool needs a deliverable address for the confirmation code)
pub(crate) fn parse_email(raw: &str) -> AuthResult<Email> {
    if raw.trim().is_empty() {
        return Err(AuthError::MissingField("Email"));
    }
    Email::new(raw).map_err(|_| AuthError::InvalidEmail)
}

/// Parse the confirmation-code field
pub(crate) fn parse_code(raw: &str) -> AuthResult<ConfirmationCode> {
    if raw.trim().is_empty() {
        return Err(AuthError::MissingField("Confirmation code"));
    }
    ConfirmationCode::new(raw).map_err(|_| AuthError::InvalidCode)
}

/// Check the password/confirmation pair before anything leaves this
/// process
pub(crate) fn parse_password_pair(password: &str, confirm: &str) -> AuthResult<()> {
    if password.is_empty() {
        return Err(AuthError::MissingField("Password"));
    }
    if password != confirm {
        return Err(AuthError::PasswordMismatch);
    }
    Ok(())
}
