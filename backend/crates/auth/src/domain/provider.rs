//! User Pool Provider Port
//!
//! Interface to the hosted user pool that owns every credential and
//! security decision: password storage, code issuance, token lifetimes,
//! lockouts. One method per pool operation the screens need.
//! Implementation is in the infrastructure layer.

use crate::domain::entity::{pool_user::PoolUser, tokens::AuthTokens};
use crate::domain::value_object::{
    confirmation_code::ConfirmationCode, email::Email, user_sub::UserSub, username::Username,
};

/// Result alias for pool calls
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Machine-readable error classification reported by the pool
///
/// Mirrors the pool's exception names. Anything we do not recognize is
/// kept as [`ProviderErrorKind::Unrecognized`] with the raw name and
/// message preserved on the error itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProviderErrorKind {
    /// An account with this username already exists
    UsernameExists,
    /// The email is already linked to another account
    AliasExists,
    /// No account with this username
    UserNotFound,
    /// The account exists but has not confirmed its email
    UserNotConfirmed,
    /// Wrong password, revoked token, or otherwise rejected credentials
    NotAuthorized,
    /// The confirmation code does not match
    CodeMismatch,
    /// The confirmation code has expired
    CodeExpired,
    /// The pool failed to deliver a confirmation code
    CodeDeliveryFailure,
    /// The password does not satisfy the pool's policy
    InvalidPassword,
    /// A request parameter failed the pool's validation
    InvalidParameter,
    /// The account must reset its password before signing in
    PasswordResetRequired,
    /// The pool or app client id does not exist
    ResourceNotFound,
    /// A per-user operation limit was exceeded
    LimitExceeded,
    /// The pool is throttling requests
    TooManyRequests,
    /// Too many failed sign-in attempts; the account is locked out
    TooManyFailedAttempts,
    /// The pool reported an internal failure
    InternalError,
    /// Exception name we do not recognize
    Unrecognized,
}

impl ProviderErrorKind {
    /// Parse the wire-format exception name
    ///
    /// Accepts both the bare name (`UserNotFoundException`) and the
    /// namespaced form (`com.example.service#UserNotFoundException`),
    /// optionally followed by a `:`-separated URI.
    pub fn from_type_name(raw: &str) -> Self {
        let name = raw
            .split(':')
            .next()
            .unwrap_or(raw)
            .rsplit('#')
            .next()
            .unwrap_or(raw)
            .trim();

        match name {
            "UsernameExistsException" => Self::UsernameExists,
            "AliasExistsException" => Self::AliasExists,
            "UserNotFoundException" => Self::UserNotFound,
            "UserNotConfirmedException" => Self::UserNotConfirmed,
            "NotAuthorizedException" => Self::NotAuthorized,
            "CodeMismatchException" => Self::CodeMismatch,
            "ExpiredCodeException" => Self::CodeExpired,
            "CodeDeliveryFailureException" => Self::CodeDeliveryFailure,
            "InvalidPasswordException" => Self::InvalidPassword,
            "InvalidParameterException" => Self::InvalidParameter,
            "PasswordResetRequiredException" => Self::PasswordResetRequired,
            "ResourceNotFoundException" => Self::ResourceNotFound,
            "LimitExceededException" => Self::LimitExceeded,
            "TooManyRequestsException" => Self::TooManyRequests,
            "TooManyFailedAttemptsException" => Self::TooManyFailedAttempts,
            "InternalErrorException" => Self::InternalError,
            _ => Self::Unrecognized,
        }
    }
}

/// Error from a pool call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The pool rejected the call with a typed exception
    #[error("{type_name}: {message}")]
    Api {
        kind: ProviderErrorKind,
        /// Raw exception name from the wire, for logging
        type_name: String,
        /// Human-readable message from the pool
        message: String,
    },

    /// The pool could not be reached (DNS, connect)
    #[error("user pool unreachable: {0}")]
    Transport(String),

    /// The pool accepted the connection but did not answer in time
    #[error("user pool timed out: {0}")]
    Timeout(String),

    /// The pool answered with a body we could not interpret
    #[error("unexpected response from user pool: {0}")]
    Malformed(String),

    /// Authentication requires a challenge flow these screens do not
    /// implement (MFA, forced password change)
    #[error("unsupported authentication challenge: {0}")]
    UnsupportedChallenge(String),
}

impl ProviderError {
    /// The machine-readable kind, for typed API errors
    pub fn kind(&self) -> Option<ProviderErrorKind> {
        match self {
            Self::Api { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Shorthand used by in-crate tests and adapters
    pub fn api(kind: ProviderErrorKind, type_name: &str, message: &str) -> Self {
        Self::Api {
            kind,
            type_name: type_name.to_string(),
            message: message.to_string(),
        }
    }
}

/// Where the pool sent a confirmation code
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeDelivery {
    /// Masked destination, e.g. `u***@e***.com`
    pub destination: Option<String>,
    /// Delivery medium, e.g. `EMAIL`
    pub medium: Option<String>,
    /// Which attribute was verified, e.g. `email`
    pub attribute_name: Option<String>,
}

/// Result of a successful sign-up call
#[derive(Debug, Clone)]
pub struct SignUpOutcome {
    /// Pool-issued identifier for the new user
    pub user_sub: UserSub,
    /// Whether the account is already usable (pools can auto-confirm)
    pub confirmed: bool,
    /// Where the confirmation code went, when one was sent
    pub code_delivery: Option<CodeDelivery>,
}

/// User pool operations trait
#[trait_variant::make(UserPool: Send)]
pub trait LocalUserPool {
    /// Register a new account
    async fn sign_up(
        &self,
        username: &Username,
        password: &str,
        email: &Email,
    ) -> ProviderResult<SignUpOutcome>;

    /// Confirm a registration with an emailed code
    async fn confirm_sign_up(
        &self,
        username: &Username,
        code: &ConfirmationCode,
    ) -> ProviderResult<()>;

    /// Ask the pool to email a fresh confirmation code
    async fn resend_confirmation_code(&self, username: &Username) -> ProviderResult<CodeDelivery>;

    /// Exchange username/password for a token bundle
    async fn initiate_auth(
        &self,
        username: &Username,
        password: &str,
    ) -> ProviderResult<AuthTokens>;

    /// Exchange a refresh token for a fresh token bundle
    ///
    /// `username` is required by pools configured with a client secret;
    /// public clients ignore it.
    async fn refresh_auth(
        &self,
        refresh_token: &str,
        username: Option<&str>,
    ) -> ProviderResult<AuthTokens>;

    /// Start a password reset: the pool emails a code
    async fn forgot_password(&self, username: &Username) -> ProviderResult<CodeDelivery>;

    /// Complete a password reset with the emailed code
    async fn confirm_forgot_password(
        &self,
        username: &Username,
        code: &ConfirmationCode,
        new_password: &str,
    ) -> ProviderResult<()>;

    /// Fetch the user record behind an access token.
    /// Doubles as token validation: a rejected token means no session.
    async fn fetch_user(&self, access_token: &str) -> ProviderResult<PoolUser>;

    /// Invalidate every token issued to this user, on all devices
    async fn global_sign_out(&self, access_token: &str) -> ProviderResult<()>;

    /// Revoke one refresh token and the access tokens derived from it
    async fn revoke_token(&self, refresh_token: &str) -> ProviderResult<()>;
}
