//! services/api/src/web/chat.rs
//!
//! The AI chat endpoints.
//!
//! A send is handled in three steps so that the session lock is never held
//! while the completion port is working:
//! 1. under the lock, gate the request (model tier, then daily quota) and
//!    append the user message, marking a reply as pending;
//! 2. call the completion port on a snapshot of the history;
//! 3. under the lock again, append the reply directly after its question.
//!
//! Steps 2 and 3 run on a spawned task, so a client that goes away mid-reply
//! still leaves the turn answered or abandoned. A second send while a reply
//! is pending is refused with 409.

use axum::{extract::State, Extension, Json};
use baeumteo_core::{
    entitlement::{authorize_chat, daily_limit, AI_MODELS},
    can_access, ChatMessage, PortError, QuotaKind,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult, ErrorBody};
use crate::web::profile::QuotaView;
use crate::web::state::{today, AppState, SessionHandle, UserSession};

//=========================================================================================
// Views
//=========================================================================================

#[derive(Serialize, ToSchema)]
pub struct MessageView {
    pub id: Uuid,
    /// `user` or `assistant`.
    pub role: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub model_name: Option<String>,
}

impl From<&ChatMessage> for MessageView {
    fn from(m: &ChatMessage) -> Self {
        Self {
            id: m.id,
            role: m.role.as_str().to_string(),
            text: m.text.clone(),
            timestamp: m.timestamp,
            model_name: m.model_name.clone(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ModelView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub required_tier: String,
    /// Whether the current plan may select this model.
    pub available: bool,
    pub selected: bool,
}

#[derive(Serialize, ToSchema)]
pub struct ModelsResponse {
    pub tier: String,
    pub models: Vec<ModelView>,
    pub usage: QuotaView,
}

#[derive(Serialize, ToSchema)]
pub struct ChatHistoryResponse {
    pub messages: Vec<MessageView>,
    pub pending: bool,
    pub usage: QuotaView,
}

fn chat_usage(session: &mut UserSession) -> QuotaView {
    let today = today();
    let tier = session.tier;
    let used = session.chat_usage.used(today);
    QuotaView::new(
        used,
        daily_limit(QuotaKind::ChatMessage, tier),
        session.chat_usage.remaining(tier, today),
    )
}

fn history_view(session: &mut UserSession) -> ChatHistoryResponse {
    ChatHistoryResponse {
        messages: session.chat.messages().iter().map(MessageView::from).collect(),
        pending: session.chat.is_pending(),
        usage: chat_usage(session),
    }
}

//=========================================================================================
// Handlers
//=========================================================================================

/// GET /chat/models - AI models and whether the plan allows them
#[utoipa::path(
    get,
    path = "/chat/models",
    responses((status = 200, description = "Model catalog", body = ModelsResponse)),
    tag = "chat"
)]
pub async fn models_handler(Extension(session): Extension<SessionHandle>) -> Json<ModelsResponse> {
    let mut session = session.lock().await;
    let tier = session.tier;
    let models = AI_MODELS
        .iter()
        .map(|m| ModelView {
            id: m.id.to_string(),
            name: m.name.to_string(),
            description: m.description.to_string(),
            required_tier: m.required_tier.as_str().to_string(),
            available: can_access(tier, m.required_tier),
            selected: m.id == session.selected_model,
        })
        .collect();

    Json(ModelsResponse {
        tier: tier.as_str().to_string(),
        models,
        usage: chat_usage(&mut session),
    })
}

/// GET /chat - The conversation so far
#[utoipa::path(
    get,
    path = "/chat",
    responses((status = 200, description = "Chat history", body = ChatHistoryResponse)),
    tag = "chat"
)]
pub async fn history_handler(
    Extension(session): Extension<SessionHandle>,
) -> Json<ChatHistoryResponse> {
    let mut session = session.lock().await;
    Json(history_view(&mut session))
}

#[derive(Deserialize, ToSchema)]
pub struct SendMessageRequest {
    pub text: String,
    /// Model id; defaults to the last model used in this session.
    pub model: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct SendMessageResponse {
    pub question: MessageView,
    pub reply: MessageView,
    pub usage: QuotaView,
}

/// POST /chat/messages - Ask the assistant a question
#[utoipa::path(
    post,
    path = "/chat/messages",
    request_body = SendMessageRequest,
    responses(
        (status = 200, description = "The question and its reply", body = SendMessageResponse),
        (status = 400, description = "Empty message or unknown model", body = ErrorBody),
        (status = 403, description = "Model needs a higher plan", body = ErrorBody),
        (status = 409, description = "A reply is still pending, or the chat was reset", body = ErrorBody),
        (status = 429, description = "Daily message limit reached", body = ErrorBody)
    ),
    tag = "chat"
)]
pub async fn send_message_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Json(req): Json<SendMessageRequest>,
) -> ApiResult<Json<SendMessageResponse>> {
    // --- 1. Gate and record the question ---
    let (model, question, history) = {
        let mut s = session.lock().await;
        s.chat.ready_for(&req.text)?;

        let model_id = req.model.clone().unwrap_or_else(|| s.selected_model.to_string());
        let tier = s.tier;
        let model = authorize_chat(tier, &model_id, &mut s.chat_usage, today())?;
        s.selected_model = model.id;

        let question = s.chat.begin_turn(&req.text, Utc::now())?;
        (model, question, s.chat.messages().to_vec())
    };

    // --- 2 and 3. Answer on a task of its own, so a dropped request still settles the turn ---
    let completion = state.completion.clone();
    let turn = session.clone();
    let question_id = question.id;
    let task = tokio::spawn(async move {
        let reply_text = match completion.complete(model, &history).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Completion with {} failed: {}", model.name, e);
                turn.lock().await.chat.abandon_turn(question_id);
                return Err(ApiError::from(e));
            }
        };

        let mut s = turn.lock().await;
        let reply = s.chat.finish_turn(
            question_id,
            reply_text,
            Some(model.name.to_string()),
            Utc::now(),
        )?;
        info!("{} answered a question with {}", s.profile.email, model.name);
        Ok::<_, ApiError>((reply, chat_usage(&mut s)))
    });

    let (reply, usage) = task
        .await
        .map_err(|e| PortError::Unexpected(format!("Chat turn did not finish: {}", e)))??;

    Ok(Json(SendMessageResponse {
        question: MessageView::from(&question),
        reply: MessageView::from(&reply),
        usage,
    }))
}

/// DELETE /chat - Clear the conversation
///
/// A reply still in flight is discarded when it arrives.
#[utoipa::path(
    delete,
    path = "/chat",
    responses((status = 200, description = "The cleared history", body = ChatHistoryResponse)),
    tag = "chat"
)]
pub async fn reset_chat_handler(
    Extension(session): Extension<SessionHandle>,
) -> Json<ChatHistoryResponse> {
    let mut session = session.lock().await;
    session.chat.reset(Utc::now());
    Json(history_view(&mut session))
}
