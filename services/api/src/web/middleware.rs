//! services/api/src/web/middleware.rs
//!
//! Authentication middleware for protecting routes.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

use crate::error::ApiError;
use crate::web::state::AppState;

pub const SESSION_COOKIE: &str = "session";

/// Extracts the session id from the `Cookie` header, if any.
pub fn session_id_from(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())?
        .split(';')
        .find_map(|c| {
            let (name, value) = c.trim().split_once('=')?;
            (name == SESSION_COOKIE && !value.is_empty()).then_some(value)
        })
}

/// Middleware that resolves the session cookie to a live session.
///
/// If valid, inserts the `SessionHandle` into request extensions for handlers to use.
/// If invalid, expired or missing, the request is refused with 401.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session_id = session_id_from(req.headers()).ok_or(ApiError::Unauthenticated)?;

    let session = state.sessions.get(session_id).await.ok_or_else(|| {
        debug!("Unknown or expired session cookie");
        ApiError::Unauthenticated
    })?;

    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}
