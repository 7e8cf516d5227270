//! Entity Module

pub mod pool_user;
pub mod tokens;
