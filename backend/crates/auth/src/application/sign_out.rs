//! Sign Out Use Case
//!
//! Revokes pool tokens. With `everywhere` set, the pool invalidates
//! every token on every device; otherwise only this browser's refresh
//! token is revoked.

use std::sync::Arc;

use crate::domain::provider::UserPool;
use crate::error::AuthResult;

/// Sign out input
pub struct SignOutInput {
    /// Access token cookie, if present
    pub access_token: Option<String>,
    /// Refresh token cookie, if present
    pub refresh_token: Option<String>,
    /// Sign out on all devices, not just this one
    pub everywhere: bool,
}

/// Sign out use case
pub struct SignOutUseCase<P>
where
    P: UserPool,
{
    pool: Arc<P>,
}

impl<P> SignOutUseCase<P>
where
    P: UserPool,
{
    pub fn new(pool: Arc<P>) -> Self {
        Self { pool }
    }

    /// Revoke whatever tokens the browser still holds
    ///
    /// With no tokens left there is nothing to revoke; clearing the
    /// cookies is all a sign-out means then.
    pub async fn execute(&self, input: SignOutInput) -> AuthResult<()> {
        match (
            input.everywhere,
            input.access_token.as_deref(),
            input.refresh_token.as_deref(),
        ) {
            (true, Some(access), _) => {
                self.pool.global_sign_out(access).await?;
                tracing::info!("User signed out everywhere");
            }
            (_, _, Some(refresh)) => {
                self.pool.revoke_token(refresh).await?;
                tracing::info!("Refresh token revoked");
            }
            _ => {}
        }

        Ok(())
    }
}
