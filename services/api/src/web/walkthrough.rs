//! services/api/src/web/walkthrough.rs
//!
//! "Try it now" walkthrough endpoints. Each learning card has at most one
//! open walkthrough per session.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use baeumteo_core::{ContentKind, Walkthrough, WalkthroughState};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;

use crate::error::{ApiError, ApiResult, ErrorBody};
use crate::web::state::{AppState, OpenWalkthrough, SessionHandle};

#[derive(Serialize, ToSchema)]
pub struct WalkthroughView {
    pub card_id: String,
    pub title: String,
    /// `in_step` or `completed`.
    pub state: String,
    /// Zero-based; absent once completed.
    pub step_index: Option<usize>,
    pub step_count: usize,
    pub current_step: Option<String>,
    pub progress_percent: u8,
    pub notes: String,
    pub voice_enabled: bool,
}

impl WalkthroughView {
    fn new(card_id: &str, open: &OpenWalkthrough) -> Self {
        let machine = &open.machine;
        let (state, step_index) = match machine.state() {
            WalkthroughState::InStep(i) => ("in_step", Some(i)),
            WalkthroughState::Completed => ("completed", None),
        };
        Self {
            card_id: card_id.to_string(),
            title: open.title.clone(),
            state: state.to_string(),
            step_index,
            step_count: machine.step_count(),
            current_step: step_index.and_then(|i| open.steps.get(i).cloned()),
            progress_percent: machine.progress_percent(),
            notes: machine.notes().to_string(),
            voice_enabled: machine.voice_enabled(),
        }
    }
}

#[derive(Clone, Copy)]
enum Transition {
    Next,
    Previous,
    Reset,
    ToggleVoice,
}

fn not_open(card_id: &str) -> ApiError {
    ApiError::NotFound(format!("No walkthrough open for card {}", card_id))
}

/// Applies `transition` to the open walkthrough of `card_id`.
async fn apply(
    session: &SessionHandle,
    card_id: &str,
    transition: Transition,
) -> ApiResult<Json<WalkthroughView>> {
    let mut session = session.lock().await;
    let open = session
        .walkthroughs
        .get_mut(card_id)
        .ok_or_else(|| not_open(card_id))?;

    match transition {
        Transition::Next => {
            let was_completed = open.machine.is_completed();
            open.machine.next();
            if !was_completed && open.machine.is_completed() {
                info!("Walkthrough completed for card {}", card_id);
            }
        }
        Transition::Previous => {
            open.machine.previous();
        }
        Transition::Reset => {
            open.machine.reset();
        }
        Transition::ToggleVoice => {
            open.machine.toggle_voice();
        }
    }
    Ok(Json(WalkthroughView::new(card_id, open)))
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /walkthroughs/{card_id} - Open the walkthrough for a learning card
///
/// Opening an already-open walkthrough returns it unchanged. Any learning card
/// can be practised, whichever age band the feed shows it to.
#[utoipa::path(
    post,
    path = "/walkthroughs/{card_id}",
    params(("card_id" = String, Path, description = "Learning card id")),
    responses(
        (status = 200, description = "The walkthrough", body = WalkthroughView),
        (status = 400, description = "The card has no steps", body = ErrorBody),
        (status = 404, description = "No such learning card", body = ErrorBody)
    ),
    tag = "walkthrough"
)]
pub async fn open_walkthrough_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Path(card_id): Path<String>,
) -> ApiResult<Json<WalkthroughView>> {
    let card = state.feed.find(ContentKind::LearningCard, &card_id).await?;

    let mut session = session.lock().await;
    if let Some(open) = session.walkthroughs.get(&card_id) {
        return Ok(Json(WalkthroughView::new(&card_id, open)));
    }

    let open = OpenWalkthrough {
        machine: Walkthrough::new(card.steps().len())?,
        steps: card.steps().to_vec(),
        title: card.title,
    };
    let view = WalkthroughView::new(&card_id, &open);
    session.walkthroughs.insert(card_id.clone(), open);
    info!("Walkthrough opened for card {}", card_id);
    Ok(Json(view))
}

/// POST /walkthroughs/{card_id}/next - Advance, completing after the last step
#[utoipa::path(
    post,
    path = "/walkthroughs/{card_id}/next",
    params(("card_id" = String, Path, description = "Learning card id")),
    responses(
        (status = 200, description = "The walkthrough", body = WalkthroughView),
        (status = 404, description = "Walkthrough not open", body = ErrorBody)
    ),
    tag = "walkthrough"
)]
pub async fn next_step_handler(
    Extension(session): Extension<SessionHandle>,
    Path(card_id): Path<String>,
) -> ApiResult<Json<WalkthroughView>> {
    apply(&session, &card_id, Transition::Next).await
}

/// POST /walkthroughs/{card_id}/previous - Go back one step
#[utoipa::path(
    post,
    path = "/walkthroughs/{card_id}/previous",
    params(("card_id" = String, Path, description = "Learning card id")),
    responses(
        (status = 200, description = "The walkthrough", body = WalkthroughView),
        (status = 404, description = "Walkthrough not open", body = ErrorBody)
    ),
    tag = "walkthrough"
)]
pub async fn previous_step_handler(
    Extension(session): Extension<SessionHandle>,
    Path(card_id): Path<String>,
) -> ApiResult<Json<WalkthroughView>> {
    apply(&session, &card_id, Transition::Previous).await
}

/// POST /walkthroughs/{card_id}/reset - Start over with empty notes
#[utoipa::path(
    post,
    path = "/walkthroughs/{card_id}/reset",
    params(("card_id" = String, Path, description = "Learning card id")),
    responses(
        (status = 200, description = "The walkthrough", body = WalkthroughView),
        (status = 404, description = "Walkthrough not open", body = ErrorBody)
    ),
    tag = "walkthrough"
)]
pub async fn reset_walkthrough_handler(
    Extension(session): Extension<SessionHandle>,
    Path(card_id): Path<String>,
) -> ApiResult<Json<WalkthroughView>> {
    apply(&session, &card_id, Transition::Reset).await
}

/// POST /walkthroughs/{card_id}/voice - Toggle voice guidance
#[utoipa::path(
    post,
    path = "/walkthroughs/{card_id}/voice",
    params(("card_id" = String, Path, description = "Learning card id")),
    responses(
        (status = 200, description = "The walkthrough", body = WalkthroughView),
        (status = 404, description = "Walkthrough not open", body = ErrorBody)
    ),
    tag = "walkthrough"
)]
pub async fn toggle_voice_handler(
    Extension(session): Extension<SessionHandle>,
    Path(card_id): Path<String>,
) -> ApiResult<Json<WalkthroughView>> {
    apply(&session, &card_id, Transition::ToggleVoice).await
}

#[derive(Deserialize, ToSchema)]
pub struct NotesRequest {
    pub notes: String,
}

/// PUT /walkthroughs/{card_id}/notes - Save practice notes
#[utoipa::path(
    put,
    path = "/walkthroughs/{card_id}/notes",
    params(("card_id" = String, Path, description = "Learning card id")),
    request_body = NotesRequest,
    responses(
        (status = 200, description = "The walkthrough", body = WalkthroughView),
        (status = 404, description = "Walkthrough not open", body = ErrorBody)
    ),
    tag = "walkthrough"
)]
pub async fn update_notes_handler(
    Extension(session): Extension<SessionHandle>,
    Path(card_id): Path<String>,
    Json(req): Json<NotesRequest>,
) -> ApiResult<Json<WalkthroughView>> {
    let mut session = session.lock().await;
    let open = session
        .walkthroughs
        .get_mut(&card_id)
        .ok_or_else(|| not_open(&card_id))?;
    open.machine.set_notes(req.notes);
    Ok(Json(WalkthroughView::new(&card_id, open)))
}

/// DELETE /walkthroughs/{card_id} - Close and discard the walkthrough
#[utoipa::path(
    delete,
    path = "/walkthroughs/{card_id}",
    params(("card_id" = String, Path, description = "Learning card id")),
    responses(
        (status = 204, description = "Closed"),
        (status = 404, description = "Walkthrough not open", body = ErrorBody)
    ),
    tag = "walkthrough"
)]
pub async fn close_walkthrough_handler(
    Extension(session): Extension<SessionHandle>,
    Path(card_id): Path<String>,
) -> ApiResult<StatusCode> {
    let mut session = session.lock().await;
    session
        .walkthroughs
        .remove(&card_id)
        .ok_or_else(|| not_open(&card_id))?;
    info!("Walkthrough closed for card {}", card_id);
    Ok(StatusCode::NO_CONTENT)
}
