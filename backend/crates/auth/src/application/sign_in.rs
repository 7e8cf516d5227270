//! Sign In Use Case
//!
//! Exchanges credentials for a pool token bundle. An unconfirmed account
//! is not an error here: the screens route it back to the confirmation
//! page, so it comes out as a flag on the output.

use std::sync::Arc;

use crate::application::parse_username;
use crate::domain::entity::tokens::AuthTokens;
use crate::domain::provider::{ProviderErrorKind, UserPool};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    /// Email address (the pool username)
    pub email: String,
    /// Password
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    /// Token bundle on success, absent when confirmation is pending
    pub tokens: Option<AuthTokens>,
    /// The account exists but must confirm its email first
    pub needs_confirmation: bool,
    /// Normalized pool username the attempt ran under. Refresh calls
    /// need it to compute their secret hash, so it rides in a cookie.
    pub username: String,
}

/// Sign in use case
pub struct SignInUseCase<P>
where
    P: UserPool,
{
    pool: Arc<P>,
}

impl<P> SignInUseCase<P>
where
    P: UserPool,
{
    pub fn new(pool: Arc<P>) -> Self {
        Self { pool }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let username = parse_username(&input.email)?;

        if input.password.is_empty() {
            return Err(AuthError::MissingField("Password"));
        }

        match self.pool.initiate_auth(&username, &input.password).await {
            Ok(tokens) => {
                tracing::info!(username = %username, "User signed in");
                Ok(SignInOutput {
                    tokens: Some(tokens),
                    needs_confirmation: false,
                    username: username.into_string(),
                })
            }
            Err(e) if e.kind() == Some(ProviderErrorKind::UserNotConfirmed) => {
                tracing::info!(username = %username, "Sign-in deferred: account unconfirmed");
                Ok(SignInOutput {
                    tokens: None,
                    needs_confirmation: true,
                    username: username.into_string(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}
