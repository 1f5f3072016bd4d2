//! services/api/src/web/auth.rs
//!
//! Authentication endpoints for signup, login, social login and logout.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use baeumteo_core::{
    validation::{LoginForm, SignupForm},
    AuthProvider, UserProfile,
};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;

use crate::error::{ApiError, ApiResult, ErrorBody};
use crate::web::middleware::{session_id_from, SESSION_COOKIE};
use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub agree_terms: bool,
    #[serde(default)]
    pub agree_privacy: bool,
}

#[derive(Serialize, ToSchema)]
pub struct AuthResponse {
    pub email: String,
    pub display_name: String,
    pub auth_provider: Option<String>,
    /// Email/password users go through onboarding first.
    pub needs_onboarding: bool,
}

//=========================================================================================
// Helpers
//=========================================================================================

fn session_cookie(session_id: &str, max_age: Duration) -> String {
    format!(
        "{}={}; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE,
        session_id,
        max_age.num_seconds()
    )
}

/// Opens a session for `profile` and answers with its cookie.
async fn start_session(
    state: &AppState,
    profile: UserProfile,
    needs_onboarding: bool,
    status: StatusCode,
) -> impl IntoResponse {
    let ttl = Duration::days(state.config.session_ttl_days);
    let response = AuthResponse {
        email: profile.email.clone(),
        display_name: profile.display_name.clone(),
        auth_provider: profile.auth_provider.map(|p| p.as_str().to_string()),
        needs_onboarding,
    };
    let (session_id, _) = state.sessions.create(profile, needs_onboarding, ttl).await;

    (
        status,
        [(header::SET_COOKIE, session_cookie(&session_id, ttl))],
        Json(response),
    )
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /auth/signup - Create a new account
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created and session started", body = AuthResponse),
        (status = 400, description = "Missing consent or required fields", body = ErrorBody)
    ),
    tag = "auth"
)]
pub async fn signup_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<impl IntoResponse> {
    let form = SignupForm {
        email: req.email,
        password: req.password,
        display_name: req.display_name,
        phone: req.phone,
        agree_terms: req.agree_terms,
        agree_privacy: req.agree_privacy,
    };
    form.validate()?;

    let profile = state.auth.signup(&form).await?;
    info!("Signup completed for {}", profile.email);
    Ok(start_session(&state, profile, true, StatusCode::CREATED).await)
}

/// POST /auth/login - Login with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Email or password missing", body = ErrorBody)
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let form = LoginForm {
        email: req.email,
        password: req.password,
    };
    form.validate()?;

    let profile = state.auth.login(&form).await?;
    info!("Login completed for {}", profile.email);
    Ok(start_session(&state, profile, true, StatusCode::OK).await)
}

/// POST /auth/social/{provider} - Login through Google, Naver or Kakao
#[utoipa::path(
    post,
    path = "/auth/social/{provider}",
    params(("provider" = String, Path, description = "google, naver or kakao")),
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Unknown provider", body = ErrorBody)
    ),
    tag = "auth"
)]
pub async fn social_login_handler(
    State(state): State<Arc<AppState>>,
    Path(provider): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let provider: AuthProvider = provider.parse()?;
    let profile = state.auth.social_login(provider).await?;
    info!("{} login completed for {}", provider.as_str(), profile.email);
    Ok(start_session(&state, profile, false, StatusCode::OK).await)
}

/// POST /auth/logout - Logout and discard the session
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 204, description = "Logout successful"),
        (status = 401, description = "No active session", body = ErrorBody)
    ),
    tag = "auth"
)]
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<impl IntoResponse> {
    let session_id = session_id_from(&headers).ok_or(ApiError::Unauthenticated)?;
    if !state.sessions.remove(session_id).await {
        return Err(ApiError::Unauthenticated);
    }

    let cookie = format!(
        "{}=; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age=0",
        SESSION_COOKIE
    );
    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}
