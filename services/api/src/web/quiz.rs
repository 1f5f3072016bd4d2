//! services/api/src/web/quiz.rs
//!
//! The scam-prevention quiz. Answers are never sent down with the questions;
//! they come back only as the outcome of an attempt.

use axum::{extract::Path, Extension, Json};
use baeumteo_core::scam_quiz::{QuizProgress, QUIZ};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::error::{ApiResult, ErrorBody};
use crate::web::state::SessionHandle;

#[derive(Serialize, ToSchema)]
pub struct QuizChoiceView {
    pub id: String,
    pub label: String,
}

#[derive(Serialize, ToSchema)]
pub struct QuizQuestionView {
    pub index: usize,
    pub question: String,
    pub choices: Vec<QuizChoiceView>,
    pub solved: bool,
}

#[derive(Serialize, ToSchema)]
pub struct QuizResponse {
    pub solved: usize,
    pub total: usize,
    pub progress_percent: u8,
    pub questions: Vec<QuizQuestionView>,
}

impl QuizResponse {
    fn new(progress: &QuizProgress) -> Self {
        let questions = QUIZ
            .iter()
            .enumerate()
            .map(|(index, q)| QuizQuestionView {
                index,
                question: q.question.to_string(),
                choices: q
                    .choices
                    .iter()
                    .map(|c| QuizChoiceView {
                        id: c.id.to_string(),
                        label: c.label.to_string(),
                    })
                    .collect(),
                solved: progress.is_solved(index),
            })
            .collect();
        Self {
            solved: progress.solved_count(),
            total: QUIZ.len(),
            progress_percent: progress.progress_percent(),
            questions,
        }
    }
}

/// GET /scam-prevention/quiz - Questions and progress
#[utoipa::path(
    get,
    path = "/scam-prevention/quiz",
    responses((status = 200, description = "Quiz progress", body = QuizResponse)),
    tag = "safety"
)]
pub async fn quiz_handler(Extension(session): Extension<SessionHandle>) -> Json<QuizResponse> {
    let session = session.lock().await;
    Json(QuizResponse::new(&session.quiz))
}

#[derive(Deserialize, ToSchema)]
pub struct QuizAnswerRequest {
    /// A choice id of the question.
    pub choice: String,
}

#[derive(Serialize, ToSchema)]
pub struct QuizAnswerResponse {
    pub correct: bool,
    pub answer: String,
    pub explanation: String,
    pub solved: usize,
    pub progress_percent: u8,
}

/// POST /scam-prevention/quiz/{index} - Answer one question
#[utoipa::path(
    post,
    path = "/scam-prevention/quiz/{index}",
    params(("index" = usize, Path, description = "Zero-based question number")),
    request_body = QuizAnswerRequest,
    responses(
        (status = 200, description = "Whether the answer was right, and why", body = QuizAnswerResponse),
        (status = 400, description = "Unknown question or choice", body = ErrorBody)
    ),
    tag = "safety"
)]
pub async fn answer_quiz_handler(
    Extension(session): Extension<SessionHandle>,
    Path(index): Path<usize>,
    Json(req): Json<QuizAnswerRequest>,
) -> ApiResult<Json<QuizAnswerResponse>> {
    let mut session = session.lock().await;
    let outcome = session.quiz.answer(index, &req.choice)?;
    if session.quiz.solved_count() == QUIZ.len() {
        info!("{} finished the scam-prevention quiz", session.profile.email);
    }

    Ok(Json(QuizAnswerResponse {
        correct: outcome.correct,
        answer: outcome.answer.to_string(),
        explanation: outcome.explanation.to_string(),
        solved: session.quiz.solved_count(),
        progress_percent: session.quiz.progress_percent(),
    }))
}

/// DELETE /scam-prevention/quiz - Start the quiz over
#[utoipa::path(
    delete,
    path = "/scam-prevention/quiz",
    responses((status = 200, description = "Quiz progress", body = QuizResponse)),
    tag = "safety"
)]
pub async fn reset_quiz_handler(
    Extension(session): Extension<SessionHandle>,
) -> Json<QuizResponse> {
    let mut session = session.lock().await;
    session.quiz.reset();
    Json(QuizResponse::new(&session.quiz))
}
