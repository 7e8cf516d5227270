//! Auth Middleware
//!
//! Middleware for requiring a valid pool session on protected routes.

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use platform::cookie::extract_cookie;

use crate::application::{CheckSessionUseCase, SessionInput};
use crate::domain::entity::pool_user::PoolUser;
use crate::domain::provider::UserPool;
use crate::presentation::handlers::AuthAppState;

/// The pool user behind the request, stored in request extensions by
/// [`require_session`]
#[derive(Clone)]
pub struct CurrentUser(pub PoolUser);

/// Middleware that requires a valid pool session
///
/// Validates the token cookies against the pool, riding a refresh when
/// the access token has expired, and stores the resulting
/// [`CurrentUser`] in request extensions for downstream handlers.
pub async fn require_session<P>(
    State(state): State<AuthAppState<P>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    P: UserPool + Clone + Send + Sync + 'static,
{
    let headers = req.headers();

    let input = SessionInput {
        access_token: extract_cookie(headers, &state.config.access_cookie_name),
        refresh_token: extract_cookie(headers, &state.config.refresh_cookie_name),
        username: extract_cookie(headers, &state.config.user_cookie_name),
    };

    if input.access_token.is_none() && input.refresh_token.is_none() {
        return Err(unauthorized());
    }

    let use_case = CheckSessionUseCase::new(state.pool.clone());

    match use_case.execute(input).await {
        Ok(output) => {
            req.extensions_mut().insert(CurrentUser(output.user));
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Protected route rejected");
            Err(unauthorized())
        }
    }
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, [("X-Auth-Required", "true")]).into_response()
}
