//! Error conversions - framework integration for [`AppError`]
//!
//! Renders [`AppError`] as an RFC 7807 problem-details response so every
//! screen-facing failure has the same JSON shape.

use super::app_error::AppError;

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
            "action": self.action(),
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(all(test, feature = "axum"))]
mod tests {
    use super::*;
    use crate::error::kind::ErrorKind;
    use axum::http::{StatusCode, header::CONTENT_TYPE};
    use axum::response::IntoResponse;

    #[test]
    fn test_status_carries_through() {
        let response =
            AppError::new(ErrorKind::Unauthorized, "Incorrect username or password.")
                .into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response =
            AppError::new(ErrorKind::Gone, "Confirmation code has expired").into_response();
        assert_eq!(response.status(), StatusCode::GONE);
    }

    #[test]
    fn test_body_is_json() {
        let response = AppError::bad_request("Invalid email format").into_response();
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }
}
