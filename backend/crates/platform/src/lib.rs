//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cookie management (Set-Cookie building, extraction)
//! - Client identification (IP / User-Agent extraction for audit logs)

pub mod client;
pub mod cookie;
