//! Client identification utilities
//!
//! Reads client details out of HTTP headers for audit logging. The
//! service always runs behind a front-end proxy, so the client address
//! comes from `X-Forwarded-For` rather than the socket peer.

use axum::http::{HeaderMap, header};
use std::net::IpAddr;

/// Extract the client IP address from `X-Forwarded-For`
///
/// Takes the first entry in the list, which the outermost proxy sets
/// to the originating client.
///
/// ## Returns
/// The client IP address, or None if the header is absent or unparseable
pub fn extract_client_ip(headers: &HeaderMap) -> Option<IpAddr> {
    let xff = headers.get("x-forwarded-for")?.to_str().ok()?;
    xff.split(',').next()?.trim().parse().ok()
}

/// Extract the User-Agent header as a string
///
/// Used for audit logging of authentication attempts.
pub fn extract_user_agent(headers: &HeaderMap) -> Option<&str> {
    headers.get(header::USER_AGENT).and_then(|v| v.to_str().ok())
}
