//! Value Object Module

pub mod confirmation_code;
pub mod email;
pub mod user_sub;
pub mod username;
