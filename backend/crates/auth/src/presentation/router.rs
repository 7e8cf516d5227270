//! Auth Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::provider::UserPool;
use crate::infra::cognito::CognitoUserPool;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_session;

/// Create the Auth router backed by the hosted user pool
pub fn auth_router(pool: CognitoUserPool, config: AuthConfig) -> Router {
    auth_router_generic(pool, config)
}

/// Create a generic Auth router for any pool implementation
pub fn auth_router_generic<P>(pool: P, config: AuthConfig) -> Router
where
    P: UserPool + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        pool: Arc::new(pool),
        config: Arc::new(config),
    };

    let protected = Router::new()
        .route("/me", get(handlers::current_user))
        .route_layer(from_fn_with_state(state.clone(), require_session::<P>));

    Router::new()
        .route("/signup", post(handlers::sign_up::<P>))
        .route("/confirm", post(handlers::confirm_sign_up::<P>))
        .route("/confirm/resend", post(handlers::resend_confirmation::<P>))
        .route("/signin", post(handlers::sign_in::<P>))
        .route("/password/forgot", post(handlers::forgot_password::<P>))
        .route("/password/reset", post(handlers::reset_password::<P>))
        .route("/session", get(handlers::session_status::<P>))
        .route("/signout", post(handlers::sign_out::<P>))
        .merge(protected)
        .with_state(state)
}
