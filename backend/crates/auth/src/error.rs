//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! Pool-reported errors keep the pool's human-readable message so the
//! screens can show it verbatim; a handful of well-known kinds are
//! remapped to friendlier strings (empty fields, unknown username,
//! unconfirmed account, missing pool/client id).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::provider::{ProviderError, ProviderErrorKind};

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required form field was empty
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Email failed basic shape validation
    #[error("Enter a valid email address")]
    InvalidEmail,

    /// Confirmation code failed basic shape validation
    #[error("Enter a valid confirmation code")]
    InvalidCode,

    /// Password and confirmation fields do not match
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Unknown user or wrong password.
    /// Deliberately does not say which, so accounts cannot be enumerated.
    /// The wording matches the pool's own wrong-password message so the
    /// two cases are indistinguishable on the wire.
    #[error("Incorrect username or password.")]
    InvalidCredentials,

    /// Account exists but its email was never confirmed
    #[error("This account has not been confirmed yet")]
    UserNotConfirmed,

    /// The pool rejected our pool/client id. A deployment problem, not
    /// a user one; the inner string is the raw pool error for the log.
    #[error("Sign-in is not configured correctly")]
    PoolMisconfigured(String),

    /// Pool-reported error surfaced with the pool's own message
    #[error("{message}")]
    Provider {
        kind: ProviderErrorKind,
        message: String,
    },

    /// The pool could not be reached
    #[error("The sign-in service is temporarily unavailable. Please try again.")]
    ProviderUnreachable(#[source] ProviderError),

    /// The pool did not answer in time
    #[error("The sign-in service took too long to respond. Please try again.")]
    ProviderTimeout(#[source] ProviderError),

    /// The pool answered with something we could not interpret
    #[error("The sign-in service returned an unexpected response. Please try again.")]
    ProviderInvalidResponse(#[source] ProviderError),

    /// Session not found or expired
    #[error("Session not found or expired")]
    SessionInvalid,

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MissingField(_)
            | AuthError::InvalidEmail
            | AuthError::InvalidCode
            | AuthError::PasswordMismatch => ErrorKind::BadRequest,
            AuthError::InvalidCredentials | AuthError::SessionInvalid => ErrorKind::Unauthorized,
            AuthError::UserNotConfirmed => ErrorKind::Forbidden,
            AuthError::PoolMisconfigured(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
            AuthError::Provider { kind, .. } => provider_error_kind(*kind),
            AuthError::ProviderUnreachable(_) => ErrorKind::ServiceUnavailable,
            AuthError::ProviderTimeout(_) => ErrorKind::GatewayTimeout,
            AuthError::ProviderInvalidResponse(_) => ErrorKind::BadGateway,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());
        match self {
            AuthError::UserNotConfirmed => {
                err.with_action("Enter the confirmation code we emailed you, then sign in again")
            }
            AuthError::PoolMisconfigured(_) => err.with_action("Contact support"),
            AuthError::Provider {
                kind: ProviderErrorKind::CodeExpired,
                ..
            } => err.with_action("Request a new code"),
            _ => err,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Provider { kind, message } => {
                tracing::warn!(kind = ?kind, message = %message, "User pool rejected request");
            }
            AuthError::ProviderUnreachable(e) => {
                tracing::error!(error = %e, "User pool unreachable");
            }
            AuthError::ProviderTimeout(e) => {
                tracing::error!(error = %e, "User pool timed out");
            }
            AuthError::ProviderInvalidResponse(e) => {
                tracing::error!(error = %e, "Unusable response from user pool");
            }
            AuthError::PoolMisconfigured(detail) => {
                tracing::error!(detail = %detail, "User pool rejected our pool/client id");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Sign-in attempt rejected");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

/// Map a pool error kind to the unified ErrorKind
fn provider_error_kind(kind: ProviderErrorKind) -> ErrorKind {
    match kind {
        ProviderErrorKind::UsernameExists | ProviderErrorKind::AliasExists => ErrorKind::Conflict,
        ProviderErrorKind::CodeMismatch
        | ProviderErrorKind::InvalidParameter
        | ProviderErrorKind::Unrecognized => ErrorKind::BadRequest,
        ProviderErrorKind::CodeExpired => ErrorKind::Gone,
        ProviderErrorKind::InvalidPassword => ErrorKind::UnprocessableEntity,
        ProviderErrorKind::NotAuthorized | ProviderErrorKind::UserNotFound => {
            ErrorKind::Unauthorized
        }
        ProviderErrorKind::UserNotConfirmed | ProviderErrorKind::PasswordResetRequired => {
            ErrorKind::Forbidden
        }
        ProviderErrorKind::ResourceNotFound => ErrorKind::InternalServerError,
        ProviderErrorKind::LimitExceeded
        | ProviderErrorKind::TooManyRequests
        | ProviderErrorKind::TooManyFailedAttempts => ErrorKind::TooManyRequests,
        ProviderErrorKind::CodeDeliveryFailure | ProviderErrorKind::InternalError => {
            ErrorKind::BadGateway
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<ProviderError> for AuthError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Api {
                kind,
                type_name,
                message,
            } => match kind {
                ProviderErrorKind::UserNotFound => AuthError::InvalidCredentials,
                ProviderErrorKind::UserNotConfirmed => AuthError::UserNotConfirmed,
                ProviderErrorKind::ResourceNotFound => {
                    AuthError::PoolMisconfigured(format!("{type_name}: {message}"))
                }
                _ => AuthError::Provider { kind, message },
            },
            e @ ProviderError::Transport(_) => AuthError::ProviderUnreachable(e),
            e @ ProviderError::Timeout(_) => AuthError::ProviderTimeout(e),
            e @ ProviderError::Malformed(_) => AuthError::ProviderInvalidResponse(e),
            ProviderError::UnsupportedChallenge(challenge) => AuthError::Provider {
                kind: ProviderErrorKind::Unrecognized,
                message: format!(
                    "This account requires an additional sign-in step ({challenge}) that is not supported here"
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_message_surfaced_verbatim() {
        let err: AuthError = ProviderError::api(
            ProviderErrorKind::InvalidPassword,
            "InvalidPasswordException",
            "Password did not conform with policy: Password not long enough",
        )
        .into();

        assert_eq!(
            err.to_string(),
            "Password did not conform with policy: Password not long enough"
        );
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_unknown_user_indistinguishable_from_wrong_password() {
        let unknown_user: AuthError = ProviderError::api(
            ProviderErrorKind::UserNotFound,
            "UserNotFoundException",
            "User does not exist.",
        )
        .into();
        let wrong_password: AuthError = ProviderError::api(
            ProviderErrorKind::NotAuthorized,
            "NotAuthorizedException",
            "Incorrect username or password.",
        )
        .into();

        assert!(matches!(unknown_user, AuthError::InvalidCredentials));
        assert_eq!(unknown_user.to_string(), wrong_password.to_string());
        assert_eq!(unknown_user.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_password.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_unknown_client_id_is_our_fault() {
        let err: AuthError = ProviderError::api(
            ProviderErrorKind::ResourceNotFound,
            "ResourceNotFoundException",
            "User pool client 4t1d does not exist.",
        )
        .into();

        assert!(matches!(err, AuthError::PoolMisconfigured(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        // The raw pool message stays out of the user-facing string
        assert!(!err.to_string().contains("4t1d"));
    }

    #[test]
    fn test_unconfirmed_user_mapping() {
        let err: AuthError = ProviderError::api(
            ProviderErrorKind::UserNotConfirmed,
            "UserNotConfirmedException",
            "User is not confirmed.",
        )
        .into();

        assert!(matches!(err, AuthError::UserNotConfirmed));
        assert!(err.to_app_error().action().is_some());
    }

    #[test]
    fn test_transport_maps_to_service_unavailable() {
        let err: AuthError = ProviderError::Transport("connect refused".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_timeout_maps_to_gateway_timeout() {
        let err: AuthError = ProviderError::Timeout("deadline elapsed".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn test_expired_code_status() {
        let err: AuthError = ProviderError::api(
            ProviderErrorKind::CodeExpired,
            "ExpiredCodeException",
            "Invalid code provided, please request a code again.",
        )
        .into();
        assert_eq!(err.status_code(), StatusCode::GONE);
    }

    #[test]
    fn test_throttling_status() {
        let err: AuthError = ProviderError::api(
            ProviderErrorKind::LimitExceeded,
            "LimitExceededException",
            "Attempt limit exceeded, please try after some time.",
        )
        .into();
        assert_eq!(err.status_code(), StatusCode::TOO_MANY_REQUESTS);
    }
}
