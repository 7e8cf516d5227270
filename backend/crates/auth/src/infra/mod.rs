//! Infrastructure Layer
//!
//! External service integrations, currently the hosted user pool client.

pub mod cognito;

pub use cognito::{CognitoConfig, CognitoUserPool};
