//! Check Session Use Case
//!
//! Asks the pool who the access token belongs to. A rejected access
//! token gets one shot at the refresh flow before the session counts as
//! gone; the caller re-issues cookies when that happens.

use std::sync::Arc;

use crate::domain::entity::{pool_user::PoolUser, tokens::AuthTokens};
use crate::domain::provider::{ProviderError, ProviderErrorKind, UserPool};
use crate::error::{AuthError, AuthResult};

/// Tokens presented by the browser
pub struct SessionInput {
    /// Access token cookie, if present
    pub access_token: Option<String>,
    /// Refresh token cookie, if present
    pub refresh_token: Option<String>,
    /// Last signed-in username, needed to refresh on pools with a
    /// client secret
    pub username: Option<String>,
}

/// Session info output
#[derive(Debug)]
pub struct SessionOutput {
    /// The user behind the token
    pub user: PoolUser,
    /// Fresh token bundle when the access token had to be refreshed.
    /// The caller must re-set the access cookie from this.
    pub refreshed: Option<AuthTokens>,
}

/// Check session use case
pub struct CheckSessionUseCase<P>
where
    P: UserPool,
{
    pool: Arc<P>,
}

impl<P> CheckSessionUseCase<P>
where
    P: UserPool,
{
    pub fn new(pool: Arc<P>) -> Self {
        Self { pool }
    }

    /// Resolve the current session, refreshing the access token once if
    /// the pool rejects it
    pub async fn execute(&self, input: SessionInput) -> AuthResult<SessionOutput> {
        if let Some(access) = input.access_token.as_deref() {
            match self.pool.fetch_user(access).await {
                Ok(user) => {
                    return Ok(SessionOutput {
                        user,
                        refreshed: None,
                    });
                }
                Err(e) if Self::token_rejected(&e) => {
                    // Expired or revoked access token; try the refresh
                    // token below if the browser sent one
                    if input.refresh_token.is_none() {
                        return Err(AuthError::SessionInvalid);
                    }
                    tracing::debug!("Access token rejected, attempting refresh");
                }
                Err(e) => return Err(e.into()),
            }
        }

        let refresh = input
            .refresh_token
            .as_deref()
            .ok_or(AuthError::SessionInvalid)?;

        let tokens = self
            .pool
            .refresh_auth(refresh, input.username.as_deref())
            .await
            .map_err(|e| {
                if Self::token_rejected(&e) {
                    AuthError::SessionInvalid
                } else {
                    e.into()
                }
            })?;

        let user = self
            .pool
            .fetch_user(&tokens.access_token)
            .await
            .map_err(|e| {
                if Self::token_rejected(&e) {
                    AuthError::SessionInvalid
                } else {
                    e.into()
                }
            })?;

        tracing::debug!(username = %user.username, "Session restored via refresh token");

        Ok(SessionOutput {
            user,
            refreshed: Some(tokens),
        })
    }

    /// Whether the pool turned the token away (as opposed to the call
    /// itself failing)
    fn token_rejected(err: &ProviderError) -> bool {
        matches!(
            err.kind(),
            Some(
                ProviderErrorKind::NotAuthorized
                    | ProviderErrorKind::UserNotFound
                    | ProviderErrorKind::PasswordResetRequired
            )
        )
    }
}
