//! Sign Up Use Case
//!
//! Registers a new account in the user pool. The pool stores the
//! credentials and emails the confirmation code; nothing is persisted
//! here.

use std::sync::Arc;

use crate::application::{parse_email, parse_password_pair};
use crate::domain::provider::{SignUpOutcome, UserPool};
use crate::domain::value_object::username::Username;
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    /// Email address, doubles as the pool username
    pub email: String,
    /// Password (policy enforced by the pool)
    pub password: String,
    /// Confirmation field from the form
    pub confirm_password: String,
}

/// Sign up output
pub struct SignUpOutput {
    /// Pool-issued identifier for the new user
    pub user_sub: String,
    /// Whether the pool auto-confirmed the account
    pub confirmed: bool,
    /// Masked destination the confirmation code went to
    pub code_sent_to: Option<String>,
}

/// Sign up use case
pub struct SignUpUseCase<P>
where
    P: UserPool,
{
    pool: Arc<P>,
}

impl<P> SignUpUseCase<P>
where
    P: UserPool,
{
    pub fn new(pool: Arc<P>) -> Self {
        Self { pool }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let email = parse_email(&input.email)?;
        parse_password_pair(&input.password, &input.confirm_password)?;

        // The pool treats the email as the account's username
        let username = Username::new(email.as_str()).map_err(|_| AuthError::InvalidEmail)?;

        let SignUpOutcome {
            user_sub,
            confirmed,
            code_delivery,
        } = self
            .pool
            .sign_up(&username, &input.password, &email)
            .await?;

        tracing::info!(
            user_sub = %user_sub,
            confirmed = confirmed,
            "User signed up"
        );

        Ok(SignUpOutput {
            user_sub: user_sub.as_str().to_string(),
            confirmed,
            code_sent_to: code_delivery.and_then(|d| d.destination),
        })
    }
}
