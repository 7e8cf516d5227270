//! Confirm Sign Up Use Case
//!
//! Completes a registration with the emailed code, or asks the pool to
//! send a fresh one. The pool decides whether a code matches or has
//! expired.

use std::sync::Arc;

use crate::application::{parse_code, parse_username};
use crate::domain::provider::{CodeDelivery, UserPool};
use crate::error::AuthResult;

/// Confirm sign up input
pub struct ConfirmSignUpInput {
    /// Email address used at registration
    pub email: String,
    /// The emailed confirmation code
    pub code: String,
}

/// Confirm sign up use case
pub struct ConfirmSignUpUseCase<P>
where
    P: UserPool,
{
    pool: Arc<P>,
}

impl<P> ConfirmSignUpUseCase<P>
where
    P: UserPool,
{
    pub fn new(pool: Arc<P>) -> Self {
        Self { pool }
    }

    /// Confirm a registration with the emailed code
    pub async fn confirm(&self, input: ConfirmSignUpInput) -> AuthResult<()> {
        let username = parse_username(&input.email)?;
        let code = parse_code(&input.code)?;

        self.pool.confirm_sign_up(&username, &code).await?;

        tracing::info!(username = %username, "Registration confirmed");
        Ok(())
    }

    /// Ask the pool to email a fresh confirmation code
    pub async fn resend(&self, email: &str) -> AuthResult<CodeDelivery> {
        let username = parse_username(email)?;

        let delivery = self.pool.resend_confirmation_code(&username).await?;

        tracing::info!(
            username = %username,
            destination = delivery.destination.as_deref().unwrap_or("unknown"),
            "Confirmation code resent"
        );
        Ok(delivery)
    }
}
