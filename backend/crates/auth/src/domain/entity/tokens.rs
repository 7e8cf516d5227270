//! Auth Tokens Entity
//!
//! The token bundle the user pool issues on successful authentication.
//! We never mint, verify, or decode these: they are forwarded to the
//! browser as HttpOnly cookies and handed back to the pool verbatim.

use chrono::Utc;

/// Pool-issued token bundle
#[derive(Clone)]
pub struct AuthTokens {
    /// Short-lived token that authorizes pool API calls for this user
    pub access_token: String,
    /// Identity token with user claims (not inspected here)
    pub id_token: Option<String>,
    /// Long-lived token used to obtain fresh access tokens.
    /// Absent on refresh responses: the pool keeps the original valid.
    pub refresh_token: Option<String>,
    /// Access token lifetime in seconds, as reported by the pool
    pub expires_in_secs: i64,
}

impl AuthTokens {
    /// Absolute expiry of the access token (Unix timestamp ms)
    ///
    /// Computed from `expires_in_secs` at the time of the call, so it is
    /// only as fresh as the response it came from.
    pub fn expires_at_ms(&self) -> i64 {
        Utc::now().timestamp_millis() + self.expires_in_secs * 1000
    }
}

// Tokens are credentials. Keep them out of Debug output and logs.
impl std::fmt::Debug for AuthTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthTokens")
            .field("access_token", &"<redacted>")
            .field("id_token", &self.id_token.as_ref().map(|_| "<redacted>"))
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "<redacted>"),
            )
            .field("expires_in_secs", &self.expires_in_secs)
            .finish()
    }
}
