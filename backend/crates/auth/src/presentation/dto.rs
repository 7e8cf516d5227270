//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

/// Page the front-end should route to after an action
///
/// Serialized as the page path so the client can navigate without a
/// lookup table of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Home,
    SignIn,
    SignUp,
    ConfirmSignUp,
    ResetPassword,
}

impl Destination {
    pub fn as_path(&self) -> &'static str {
        match self {
            Destination::Home => "/",
            Destination::SignIn => "/signin",
            Destination::SignUp => "/signup",
            Destination::ConfirmSignUp => "/confirm",
            Destination::ResetPassword => "/reset-password",
        }
    }
}

impl Serialize for Destination {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_path())
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// Sign up request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Sign up response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponse {
    pub user_sub: String,
    /// Whether the pool auto-confirmed the account
    pub confirmed: bool,
    /// Masked address the confirmation code went to
    pub code_sent_to: Option<String>,
    /// Email to prefill on the confirmation screen
    pub email: String,
    pub next: Destination,
}

// ============================================================================
// Confirm Sign Up
// ============================================================================

/// Confirm sign up request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmSignUpRequest {
    pub email: String,
    pub code: String,
}

/// Confirm sign up response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmSignUpResponse {
    pub confirmed: bool,
    pub next: Destination,
}

/// Resend confirmation code request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResendCodeRequest {
    pub email: String,
}

/// Resend confirmation code response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResendCodeResponse {
    pub code_sent: bool,
    pub code_sent_to: Option<String>,
}

// ============================================================================
// Sign In
// ============================================================================

/// Sign in request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Sign in response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub authenticated: bool,
    /// True when the account must confirm its email before signing in
    pub needs_confirmation: bool,
    /// Email to prefill on the confirmation screen
    pub email: Option<String>,
    /// Access token expiry (Unix ms), for client-side scheduling
    pub expires_at_ms: Option<i64>,
    pub next: Destination,
}

// ============================================================================
// Password Reset
// ============================================================================

/// Request a password reset code
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Password reset code response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordResponse {
    pub code_sent: bool,
    pub code_sent_to: Option<String>,
}

/// Complete a password reset
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub code: String,
    pub password: String,
    pub confirm_password: String,
}

/// Password reset completion response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordResponse {
    pub reset: bool,
    pub next: Destination,
}

// ============================================================================
// Session Status
// ============================================================================

/// Session status response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    pub user_sub: Option<String>,
    pub email: Option<String>,
    pub email_verified: Option<bool>,
}

// ============================================================================
// Sign Out
// ============================================================================

/// Sign out request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignOutRequest {
    /// Sign out on every device, not just this browser
    #[serde(default)]
    pub everywhere: bool,
}

/// Sign out response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignOutResponse {
    pub signed_out: bool,
    pub next: Destination,
}

// ============================================================================
// User Info (for authenticated users)
// ============================================================================

/// Current user info response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoResponse {
    pub user_sub: Option<String>,
    pub username: String,
    pub email: Option<String>,
    pub email_verified: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_serializes_as_path() {
        let json = serde_json::to_string(&Destination::ConfirmSignUp).unwrap();
        assert_eq!(json, "\"/confirm\"");
        let json = serde_json::to_string(&Destination::Home).unwrap();
        assert_eq!(json, "\"/\"");
    }

    #[test]
    fn test_sign_out_request_defaults() {
        let req: SignOutRequest = serde_json::from_str("{}").unwrap();
        assert!(!req.everywhere);
        let req: SignOutRequest = serde_json::from_str("{\"everywhere\":true}").unwrap();
        assert!(req.everywhere);
    }
}
