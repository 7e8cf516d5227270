//! Auth (Authentication) Backend Module
//!
//! Sign-up, sign-in, and session screens backed by a hosted user pool.
//! The pool owns every credential and security decision; this module
//! marshals form submissions into pool calls and pool outcomes into
//! JSON responses, token cookies, and page destinations.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, and the user pool port
//! - `application/` - One use case per screen action
//! - `infra/` - The Cognito wire-protocol client
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Registration with email confirmation codes (confirm + resend)
//! - Sign-in with pool-issued tokens stored in HttpOnly cookies
//! - Password reset via emailed code
//! - Session check with transparent token refresh
//! - Sign-out, optionally across all devices
//!
//! ## Security Model
//! - No password, code, or token is ever stored or verified here
//! - Tokens ride in HttpOnly cookies and go back to the pool verbatim
//! - Challenge flows (MFA, forced password change) are rejected, not
//!   half-implemented

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::cognito::{CognitoConfig, CognitoUserPool};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod pool {
    pub use crate::domain::provider::*;
    pub use crate::infra::cognito::{CognitoConfig, CognitoUserPool};
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
