//! HTTP Handlers
//!
//! One handler per screen action. Handlers unpack the form payload,
//! read token cookies, run the matching use case, and translate the
//! outcome into JSON plus Set-Cookie headers. They never talk to the
//! pool directly.

use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header};
use axum::response::{AppendHeaders, IntoResponse};
use axum::{Extension, Json};
use std::sync::Arc;

use platform::client::{extract_client_ip, extract_user_agent};
use platform::cookie::{delete_cookie_header, extract_cookie, set_cookie_header};

use crate::application::config::AuthConfig;
use crate::application::{
    CheckSessionUseCase, ConfirmSignUpInput, ConfirmSignUpUseCase, ResetPasswordInput,
    ResetPasswordUseCase, SessionInput, SignInInput, SignInUseCase, SignOutInput, SignOutUseCase,
    SignUpInput, SignUpUseCase,
};
use crate::domain::entity::tokens::AuthTokens;
use crate::domain::provider::UserPool;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    ConfirmSignUpRequest, ConfirmSignUpResponse, Destination, ForgotPasswordRequest,
    ForgotPasswordResponse, ResendCodeRequest, ResendCodeResponse, ResetPasswordRequest,
    ResetPasswordResponse, SessionStatusResponse, SignInRequest, SignInResponse, SignOutRequest,
    SignOutResponse, SignUpRequest, SignUpResponse, UserInfoResponse,
};
use crate::presentation::middleware::CurrentUser;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<P>
where
    P: UserPool + Clone + Send + Sync + 'static,
{
    pub pool: Arc<P>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/auth/signup
pub async fn sign_up<P>(
    State(state): State<AuthAppState<P>>,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<Json<SignUpResponse>>
where
    P: UserPool + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.pool.clone());

    let email = req.email.clone();

    let output = use_case
        .execute(SignUpInput {
            email: req.email,
            password: req.password,
            confirm_password: req.confirm_password,
        })
        .await?;

    // Pools can auto-confirm accounts; those skip the confirmation page.
    let next = if output.confirmed {
        Destination::SignIn
    } else {
        Destination::ConfirmSignUp
    };

    Ok(Json(SignUpResponse {
        user_sub: output.user_sub,
        confirmed: output.confirmed,
        code_sent_to: output.code_sent_to,
        email,
        next,
    }))
}

// ============================================================================
// Confirm Sign Up
// ============================================================================

/// POST /api/auth/confirm
pub async fn confirm_sign_up<P>(
    State(state): State<AuthAppState<P>>,
    Json(req): Json<ConfirmSignUpRequest>,
) -> AuthResult<Json<ConfirmSignUpResponse>>
where
    P: UserPool + Clone + Send + Sync + 'static,
{
    let use_case = ConfirmSignUpUseCase::new(state.pool.clone());

    use_case
        .confirm(ConfirmSignUpInput {
            email: req.email,
            code: req.code,
        })
        .await?;

    Ok(Json(ConfirmSignUpResponse {
        confirmed: true,
        next: Destination::SignIn,
    }))
}

/// POST /api/auth/confirm/resend
pub async fn resend_confirmation<P>(
    State(state): State<AuthAppState<P>>,
    Json(req): Json<ResendCodeRequest>,
) -> AuthResult<Json<ResendCodeResponse>>
where
    P: UserPool + Clone + Send + Sync + 'static,
{
    let use_case = ConfirmSignUpUseCase::new(state.pool.clone());

    let delivery = use_case.resend(&req.email).await?;

    Ok(Json(ResendCodeResponse {
        code_sent: true,
        code_sent_to: delivery.destination,
    }))
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /api/auth/signin
pub async fn sign_in<P>(
    State(state): State<AuthAppState<P>>,
    headers: HeaderMap,
    Json(req): Json<SignInRequest>,
) -> AuthResult<impl IntoResponse>
where
    P: UserPool + Clone + Send + Sync + 'static,
{
    let client_ip = extract_client_ip(&headers);
    let user_agent = extract_user_agent(&headers);
    tracing::debug!(?client_ip, user_agent, "Sign-in attempt received");

    let use_case = SignInUseCase::new(state.pool.clone());

    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    if output.needs_confirmation {
        // Unconfirmed account: route back to the confirmation screen
        // with the email prefilled instead of erroring.
        return Ok((
            StatusCode::OK,
            Json(SignInResponse {
                authenticated: false,
                needs_confirmation: true,
                email: Some(output.username),
                expires_at_ms: None,
                next: Destination::ConfirmSignUp,
            }),
        )
            .into_response());
    }

    let tokens = output.tokens.ok_or_else(|| {
        AuthError::Internal("sign-in finished without tokens or a confirmation flag".to_string())
    })?;

    let cookies = session_cookies(&state.config, &tokens, &output.username);

    Ok((
        StatusCode::OK,
        AppendHeaders(cookies),
        Json(SignInResponse {
            authenticated: true,
            needs_confirmation: false,
            email: None,
            expires_at_ms: Some(tokens.expires_at_ms()),
            next: Destination::Home,
        }),
    )
        .into_response())
}

// ============================================================================
// Password Reset
// ============================================================================

/// POST /api/auth/password/forgot
pub async fn forgot_password<P>(
    State(state): State<AuthAppState<P>>,
    Json(req): Json<ForgotPasswordRequest>,
) -> AuthResult<Json<ForgotPasswordResponse>>
where
    P: UserPool + Clone + Send + Sync + 'static,
{
    let use_case = ResetPasswordUseCase::new(state.pool.clone());

    let delivery = use_case.request_code(&req.email).await?;

    Ok(Json(ForgotPasswordResponse {
        code_sent: true,
        code_sent_to: delivery.destination,
    }))
}

/// POST /api/auth/password/reset
pub async fn reset_password<P>(
    State(state): State<AuthAppState<P>>,
    Json(req): Json<ResetPasswordRequest>,
) -> AuthResult<Json<ResetPasswordResponse>>
where
    P: UserPool + Clone + Send + Sync + 'static,
{
    let use_case = ResetPasswordUseCase::new(state.pool.clone());

    use_case
        .confirm(ResetPasswordInput {
            email: req.email,
            code: req.code,
            password: req.password,
            confirm_password: req.confirm_password,
        })
        .await?;

    Ok(Json(ResetPasswordResponse {
        reset: true,
        next: Destination::SignIn,
    }))
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/auth/session
pub async fn session_status<P>(
    State(state): State<AuthAppState<P>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    P: UserPool + Clone + Send + Sync + 'static,
{
    let input = SessionInput {
        access_token: extract_cookie(&headers, &state.config.access_cookie_name),
        refresh_token: extract_cookie(&headers, &state.config.refresh_cookie_name),
        username: extract_cookie(&headers, &state.config.user_cookie_name),
    };

    // No token cookies at all is a plain anonymous visit; skip the pool.
    if input.access_token.is_none() && input.refresh_token.is_none() {
        return Ok((StatusCode::OK, Json(anonymous())).into_response());
    }

    let use_case = CheckSessionUseCase::new(state.pool.clone());

    // An expired or revoked session is a normal state, not an error.
    match use_case.execute(input).await {
        Ok(output) => {
            let body = SessionStatusResponse {
                authenticated: true,
                user_sub: output.user.sub().map(str::to_string),
                email: output.user.email().map(str::to_string),
                email_verified: Some(output.user.email_verified()),
            };

            // The session rode a refresh: re-set the token cookies.
            if let Some(tokens) = &output.refreshed {
                let mut cookies = vec![(
                    header::SET_COOKIE,
                    set_cookie_header(
                        &state.config.access_cookie(tokens.expires_in_secs),
                        &tokens.access_token,
                    ),
                )];
                if let Some(refresh) = &tokens.refresh_token {
                    cookies.push((
                        header::SET_COOKIE,
                        set_cookie_header(&state.config.refresh_cookie(), refresh),
                    ));
                }

                return Ok((StatusCode::OK, AppendHeaders(cookies), Json(body)).into_response());
            }

            Ok((StatusCode::OK, Json(body)).into_response())
        }
        Err(e) => {
            tracing::debug!(error = %e, "Session check came back negative");
            Ok((StatusCode::OK, Json(anonymous())).into_response())
        }
    }
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /api/auth/signout
pub async fn sign_out<P>(
    State(state): State<AuthAppState<P>>,
    headers: HeaderMap,
    Json(req): Json<SignOutRequest>,
) -> AuthResult<impl IntoResponse>
where
    P: UserPool + Clone + Send + Sync + 'static,
{
    let use_case = SignOutUseCase::new(state.pool.clone());

    let input = SignOutInput {
        access_token: extract_cookie(&headers, &state.config.access_cookie_name),
        refresh_token: extract_cookie(&headers, &state.config.refresh_cookie_name),
        everywhere: req.everywhere,
    };

    // Best effort: the cookies are cleared no matter what the pool says.
    if let Err(e) = use_case.execute(input).await {
        tracing::warn!(error = %e, "Sign-out revocation failed");
    }

    Ok((
        StatusCode::OK,
        AppendHeaders(clear_session_cookies(&state.config)),
        Json(SignOutResponse {
            signed_out: true,
            next: Destination::Home,
        }),
    ))
}

// ============================================================================
// User Info (requires authentication)
// ============================================================================

/// GET /api/auth/me
pub async fn current_user(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Json<UserInfoResponse> {
    Json(UserInfoResponse {
        user_sub: user.sub().map(str::to_string),
        username: user.username.clone(),
        email: user.email().map(str::to_string),
        email_verified: user.email_verified(),
    })
}

// ============================================================================
// Helper Functions
// ============================================================================

fn anonymous() -> SessionStatusResponse {
    SessionStatusResponse {
        authenticated: false,
        user_sub: None,
        email: None,
        email_verified: None,
    }
}

/// Set-Cookie headers carrying a fresh token bundle
fn session_cookies(
    config: &AuthConfig,
    tokens: &AuthTokens,
    username: &str,
) -> Vec<(HeaderName, HeaderValue)> {
    let mut cookies = vec![(
        header::SET_COOKIE,
        set_cookie_header(
            &config.access_cookie(tokens.expires_in_secs),
            &tokens.access_token,
        ),
    )];

    if let Some(refresh) = &tokens.refresh_token {
        cookies.push((
            header::SET_COOKIE,
            set_cookie_header(&config.refresh_cookie(), refresh),
        ));
        // The username rides along so refresh calls can compute the
        // secret hash on pools with a client secret.
        cookies.push((
            header::SET_COOKIE,
            set_cookie_header(&config.user_cookie(), username),
        ));
    }

    cookies
}

/// Set-Cookie headers that expire every session cookie
fn clear_session_cookies(config: &AuthConfig) -> Vec<(HeaderName, HeaderValue)> {
    vec![
        (
            header::SET_COOKIE,
            delete_cookie_header(&config.access_cookie(0)),
        ),
        (
            header::SET_COOKIE,
            delete_cookie_header(&config.refresh_cookie()),
        ),
        (
            header::SET_COOKIE,
            delete_cookie_header(&config.user_cookie()),
        ),
    ]
}
