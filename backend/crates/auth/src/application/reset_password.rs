//! Reset Password Use Case
//!
//! Two-step flow: the pool emails a code, then accepts it together with
//! the new password. The pool's password policy applies to the new
//! password; only the local form checks happen here.

use std::sync::Arc;

use crate::application::{parse_code, parse_password_pair, parse_username};
use crate::domain::provider::{CodeDelivery, UserPool};
use crate::error::AuthResult;

/// Input for completing a password reset
pub struct ResetPasswordInput {
    /// Email address (the pool username)
    pub email: String,
    /// The emailed reset code
    pub code: String,
    /// New password
    pub password: String,
    /// Confirmation field from the form
    pub confirm_password: String,
}

/// Reset password use case
pub struct ResetPasswordUseCase<P>
where
    P: UserPool,
{
    pool: Arc<P>,
}

impl<P> ResetPasswordUseCase<P>
where
    P: UserPool,
{
    pub fn new(pool: Arc<P>) -> Self {
        Self { pool }
    }

    /// Start a reset: the pool emails a code to the account's address
    pub async fn request_code(&self, email: &str) -> AuthResult<CodeDelivery> {
        let username = parse_username(email)?;

        let delivery = self.pool.forgot_password(&username).await?;

        tracing::info!(
            username = %username,
            destination = delivery.destination.as_deref().unwrap_or("unknown"),
            "Password reset code sent"
        );
        Ok(delivery)
    }

    /// Complete a reset with the emailed code and a new password
    ///
    /// The form checks run before any pool call, so a mismatched
    /// confirmation field never leaves this process.
    pub async fn confirm(&self, input: ResetPasswordInput) -> AuthResult<()> {
        let username = parse_username(&input.email)?;
        let code = parse_code(&input.code)?;
        parse_password_pair(&input.password, &input.confirm_password)?;

        self.pool
            .confirm_forgot_password(&username, &code, &input.password)
            .await?;

        tracing::info!(username = %username, "Password reset completed");
        Ok(())
    }
}
