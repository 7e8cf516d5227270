//! Domain Layer
//!
//! Contains entities, value objects, and the user pool provider port.

pub mod entity;
pub mod provider;
pub mod value_object;

// Re-exports
pub use entity::{pool_user::PoolUser, tokens::AuthTokens};
pub use provider::{ProviderError, ProviderErrorKind, ProviderResult, UserPool};
