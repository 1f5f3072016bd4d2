//! services/api/src/web/rest.rs
//!
//! Assembles the REST router and holds the master definition for the OpenAPI
//! specification.

use crate::config::{Config, ConfigError};
use crate::error::ErrorBody;
use crate::web::{
    auth, chat, content, finance, middleware::require_auth, profile, quiz, state::AppState,
    walkthrough,
};
use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::signup_handler,
        auth::login_handler,
        auth::social_login_handler,
        auth::logout_handler,
        profile::me_handler,
        profile::update_settings_handler,
        profile::onboarding_goals_handler,
        profile::complete_onboarding_handler,
        profile::plans_handler,
        profile::select_plan_handler,
        content::learning_cards_handler,
        content::courses_handler,
        content::enroll_course_handler,
        content::insights_handler,
        content::insight_detail_handler,
        content::jobs_handler,
        content::community_posts_handler,
        content::community_events_handler,
        content::toggle_saved_handler,
        content::saved_list_handler,
        content::scam_tips_handler,
        content::faqs_handler,
        quiz::quiz_handler,
        quiz::answer_quiz_handler,
        quiz::reset_quiz_handler,
        finance::finance_summary_handler,
        finance::record_expense_handler,
        chat::models_handler,
        chat::history_handler,
        chat::send_message_handler,
        chat::reset_chat_handler,
        walkthrough::open_walkthrough_handler,
        walkthrough::next_step_handler,
        walkthrough::previous_step_handler,
        walkthrough::reset_walkthrough_handler,
        walkthrough::toggle_voice_handler,
        walkthrough::update_notes_handler,
        walkthrough::close_walkthrough_handler,
    ),
    components(
        schemas(
            ErrorBody,
            auth::LoginRequest, auth::SignupRequest, auth::AuthResponse,
            profile::MeResponse, profile::DensityView, profile::UsageView, profile::QuotaView,
            profile::SettingsRequest, profile::GoalsResponse, profile::GoalView,
            profile::OnboardingRequest, profile::PlanView, profile::SubscriptionRequest,
            profile::SubscriptionResponse,
            content::FeedResponse, content::ContentView, content::DetailsView,
            content::EnrollResponse, content::InsightDetailResponse,
            content::SavedToggleResponse, content::SavedListResponse,
            chat::MessageView, chat::ModelView, chat::ModelsResponse,
            chat::ChatHistoryResponse, chat::SendMessageRequest, chat::SendMessageResponse,
            quiz::QuizResponse, quiz::QuizQuestionView, quiz::QuizChoiceView,
            quiz::QuizAnswerRequest, quiz::QuizAnswerResponse,
            finance::FinanceSummaryResponse, finance::CategoryShareView, finance::ExpenseRequest,
            walkthrough::WalkthroughView, walkthrough::NotesRequest,
        )
    ),
    tags(
        (name = "auth", description = "Login, signup and sessions."),
        (name = "profile", description = "The signed-in user and display settings."),
        (name = "onboarding", description = "First-run goal and age band selection."),
        (name = "subscription", description = "Plans and plan changes."),
        (name = "content", description = "Age-tiered learning content, insights and jobs."),
        (name = "community", description = "Community posts and events."),
        (name = "safety", description = "Scam-prevention tips and quiz."),
        (name = "finance", description = "The household finance dashboard."),
        (name = "help", description = "Frequently asked questions."),
        (name = "chat", description = "The AI learning assistant."),
        (name = "walkthrough", description = "Guided step-by-step practice.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Router
//=========================================================================================

/// Builds the full application: public auth routes, session-protected routes
/// and the Swagger UI.
pub fn router(state: Arc<AppState>) -> Router {
    // Public routes (no session required)
    let public_routes = Router::new()
        .route("/auth/signup", post(auth::signup_handler))
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/social/{provider}", post(auth::social_login_handler))
        .route("/auth/logout", post(auth::logout_handler));

    // Protected routes (session required)
    let protected_routes = Router::new()
        .route("/me", get(profile::me_handler))
        .route("/me/settings", put(profile::update_settings_handler))
        .route("/onboarding/goals", get(profile::onboarding_goals_handler))
        .route("/onboarding", post(profile::complete_onboarding_handler))
        .route("/plans", get(profile::plans_handler))
        .route("/subscription", post(profile::select_plan_handler))
        .route("/feed/cards", get(content::learning_cards_handler))
        .route("/feed/courses", get(content::courses_handler))
        .route("/courses/{id}/enroll", post(content::enroll_course_handler))
        .route("/insights", get(content::insights_handler))
        .route("/insights/{id}", get(content::insight_detail_handler))
        .route("/jobs", get(content::jobs_handler))
        .route("/community/posts", get(content::community_posts_handler))
        .route("/community/events", get(content::community_events_handler))
        .route("/saved/{view}", get(content::saved_list_handler))
        .route("/saved/{view}/{id}", post(content::toggle_saved_handler))
        .route("/scam-prevention", get(content::scam_tips_handler))
        .route(
            "/scam-prevention/quiz",
            get(quiz::quiz_handler).delete(quiz::reset_quiz_handler),
        )
        .route("/scam-prevention/quiz/{index}", post(quiz::answer_quiz_handler))
        .route("/finance/summary", get(finance::finance_summary_handler))
        .route("/finance/expenses", post(finance::record_expense_handler))
        .route("/help/faqs", get(content::faqs_handler))
        .route("/chat/models", get(chat::models_handler))
        .route(
            "/chat",
            get(chat::history_handler).delete(chat::reset_chat_handler),
        )
        .route("/chat/messages", post(chat::send_message_handler))
        .route(
            "/walkthroughs/{card_id}",
            post(walkthrough::open_walkthrough_handler)
                .delete(walkthrough::close_walkthrough_handler),
        )
        .route("/walkthroughs/{card_id}/next", post(walkthrough::next_step_handler))
        .route(
            "/walkthroughs/{card_id}/previous",
            post(walkthrough::previous_step_handler),
        )
        .route(
            "/walkthroughs/{card_id}/reset",
            post(walkthrough::reset_walkthrough_handler),
        )
        .route("/walkthroughs/{card_id}/voice", post(walkthrough::toggle_voice_handler))
        .route("/walkthroughs/{card_id}/notes", put(walkthrough::update_notes_handler))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    let api_router = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state);

    Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// CORS for the configured front-end origin, with credentials so the session
/// cookie is sent.
pub fn cors_layer(config: &Config) -> Result<CorsLayer, ConfigError> {
    let origin = config.cors_origin.parse::<HeaderValue>().map_err(|e| {
        ConfigError::InvalidValue("CORS_ORIGIN".to_string(), e.to_string())
    })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]))
}
