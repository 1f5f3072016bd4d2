//! End-to-end tests that drive the full router in memory, with every
//! simulated delay set to zero.

use api_lib::{
    adapters::{SimulatedAuthAdapter, StaticCatalogAdapter},
    config::Config,
    web::{router, AppState, SessionStore},
};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use baeumteo_core::{
    ports::{CompletionService, PortResult},
    AiModel, ChatMessage,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tower::ServiceExt;

//=========================================================================================
// Helpers
//=========================================================================================

fn app() -> Router {
    let config = Arc::new(Config::without_delays());
    router(Arc::new(AppState::simulated(config)))
}

fn request(method: &str, uri: &str, cookie: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Sends one request; returns the status, the `name=value` part of any
/// Set-Cookie header, and the JSON body (`Null` when empty).
async fn call(app: &Router, req: Request<Body>) -> (StatusCode, Option<String>, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, cookie, body)
}

async fn get(app: &Router, uri: &str, cookie: &str) -> (StatusCode, Value) {
    let (status, _, body) = call(app, request("GET", uri, Some(cookie), None)).await;
    (status, body)
}

async fn post(app: &Router, uri: &str, cookie: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, _, body) = call(app, request("POST", uri, Some(cookie), body)).await;
    (status, body)
}

async fn signup(app: &Router) -> String {
    let (status, cookie, body) = call(
        app,
        request(
            "POST",
            "/auth/signup",
            None,
            Some(json!({
                "email": "park@example.com",
                "password": "pw1234",
                "display_name": "박순자",
                "agree_terms": true,
                "agree_privacy": true
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["needs_onboarding"], true);
    cookie.expect("signup sets the session cookie")
}

async fn set_tier(app: &Router, cookie: &str, tier: &str) {
    let (status, body) = post(app, "/subscription", cookie, Some(json!({ "tier": tier }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tier"], tier);
}

fn ids(feed: &Value) -> Vec<String> {
    feed["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}

//=========================================================================================
// Auth and Sessions
//=========================================================================================

#[tokio::test]
async fn protected_routes_need_a_session() {
    let app = app();
    let (status, _, body) = call(&app, request("GET", "/me", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthenticated");

    let (status, _) = get(&app, "/me", "session=not-a-session").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn signup_requires_consent_first() {
    let app = app();
    let (status, cookie, body) = call(
        &app,
        request(
            "POST",
            "/auth/signup",
            None,
            Some(json!({
                "email": "",
                "password": "",
                "display_name": "",
                "agree_terms": true
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");
    assert_eq!(body["message"], "필수 약관에 동의해주세요");
    assert!(cookie.is_none());
}

#[tokio::test]
async fn login_rejects_blank_credentials() {
    let app = app();
    let (status, _, body) = call(
        &app,
        request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": "kim@example.com", "password": "" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "이메일과 비밀번호를 입력해주세요");
}

#[tokio::test]
async fn new_users_start_free_in_the_default_cohort() {
    let app = app();
    let cookie = signup(&app).await;

    let (status, me) = get(&app, "/me", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["display_name"], "박순자");
    assert_eq!(me["cohort"], "60s");
    assert_eq!(me["tier"], "free");
    assert_eq!(me["needs_onboarding"], true);
    assert_eq!(me["density"]["text_step"], 2);
    assert_eq!(me["density"]["button_size"], "lg");
    assert_eq!(me["usage"]["chat"]["limit"], 10);
    assert_eq!(me["usage"]["chat"]["remaining"], 10);
}

#[tokio::test]
async fn social_login_skips_onboarding() {
    let app = app();
    let (status, cookie, body) =
        call(&app, request("POST", "/auth/social/kakao", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "user@kakao.com");
    assert_eq!(body["auth_provider"], "kakao");
    assert_eq!(body["needs_onboarding"], false);
    assert!(cookie.is_some());

    let (status, _, _) = call(&app, request("POST", "/auth/social/facebook", None, None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn logout_ends_the_session() {
    let app = app();
    let cookie = signup(&app).await;

    let (status, cleared, _) =
        call(&app, request("POST", "/auth/logout", Some(&cookie), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(cleared.as_deref(), Some("session="));

    let (status, _) = get(&app, "/me", &cookie).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

//=========================================================================================
// Onboarding, Settings and Content Relevance
//=========================================================================================

#[tokio::test]
async fn onboarding_sets_the_cohort_and_the_feed_follows() {
    let app = app();
    let cookie = signup(&app).await;

    let (status, goals) = get(&app, "/onboarding/goals?cohort=40s", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    let suggested: Vec<_> = goals["goals"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|g| g["suggested"] == true)
        .map(|g| g["id"].as_str().unwrap())
        .collect();
    assert_eq!(suggested, vec!["work", "life", "finance"]);

    let (status, body) = post(&app, "/onboarding", &cookie, Some(json!({ "goals": [] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "목표를 하나 이상 선택해주세요");

    let (status, me) = post(
        &app,
        "/onboarding",
        &cookie,
        Some(json!({
            "goals": ["work", "finance", "work"],
            "cohort": "40s",
            "notification_time": "evening"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["cohort"], "40s");
    assert_eq!(me["goals"], json!(["work", "finance"]));
    assert_eq!(me["notification_time"], "evening");
    assert_eq!(me["needs_onboarding"], false);

    let (_, feed) = get(&app, "/feed/cards", &cookie).await;
    assert_eq!(ids(&feed), vec!["1", "4"]);
    assert_eq!(feed["cohort"], "40s");
}

#[tokio::test]
async fn default_cohort_sees_its_own_cards_and_courses() {
    let app = app();
    let cookie = signup(&app).await;

    let (_, cards) = get(&app, "/feed/cards", &cookie).await;
    assert_eq!(ids(&cards), vec!["2", "3"]);

    let (_, courses) = get(&app, "/feed/courses", &cookie).await;
    assert_eq!(ids(&courses), vec!["1", "2", "3", "5", "6"]);
    let locked: Vec<_> = courses["items"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|c| c["locked"] == true)
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(locked, vec!["5"]);

    let (_, none) = get(&app, "/feed/cards?category=startup", &cookie).await;
    assert_eq!(none["empty"], true);
    assert_eq!(none["total"], 0);
}

#[tokio::test]
async fn easy_mode_for_seventies_enlarges_everything() {
    let app = app();
    let cookie = signup(&app).await;

    let (status, me) = call(
        &app,
        request(
            "PUT",
            "/me/settings",
            Some(&cookie),
            Some(json!({ "cohort": "70s", "easy_mode": true, "phone": "010-1234-5678" })),
        ),
    )
    .await
    .into_status_and_body();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["density"]["text_step"], 3);
    assert_eq!(me["density"]["text_size"], "text-2xl");
    assert_eq!(me["density"]["simple_home"], true);
    assert_eq!(me["phone"], "010-1234-5678");

    let (status, _, body) = call(
        &app,
        request("PUT", "/me/settings", Some(&cookie), Some(json!({ "cohort": "90s" }))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");
}

trait StatusAndBody {
    fn into_status_and_body(self) -> (StatusCode, Value);
}

impl StatusAndBody for (StatusCode, Option<String>, Value) {
    fn into_status_and_body(self) -> (StatusCode, Value) {
        (self.0, self.2)
    }
}

//=========================================================================================
// Insights, Jobs and Community
//=========================================================================================

#[tokio::test]
async fn insight_search_and_topics() {
    let app = app();
    let cookie = signup(&app).await;

    let (_, all) = get(&app, "/insights", &cookie).await;
    assert_eq!(all["total"], 8);

    let (_, blank) = get(&app, "/insights?q=%20%20", &cookie).await;
    assert_eq!(blank["total"], 8);

    // Matches "OpenAI" in the summary of the first insight.
    let (_, ai) = get(&app, "/insights?q=ai", &cookie).await;
    assert!(ids(&ai).contains(&"1".to_string()));

    let (_, gemini) = get(&app, "/insights?q=GEMINI", &cookie).await;
    assert_eq!(ids(&gemini), vec!["4"]);

    let (_, security) = get(&app, "/insights?category=security", &cookie).await;
    assert_eq!(ids(&security), vec!["3"]);

    let (_, tech) = get(&app, "/insights?category=ai-tech&q=gemini", &cookie).await;
    assert_eq!(ids(&tech), vec!["4"]);
}

#[tokio::test]
async fn free_users_open_five_insights_a_day() {
    let app = app();
    let cookie = signup(&app).await;

    let (status, _) = get(&app, "/insights/99", &cookie).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    for expected_remaining in (0..5).rev() {
        let (status, body) = get(&app, "/insights/2", &cookie).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["remaining_views"], expected_remaining);
        assert_eq!(body["item"]["details"]["type"], "insight");
    }

    let (status, body) = get(&app, "/insights/2", &cookie).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "quota_exhausted");
    assert_eq!(body["upgrade_to"], "pro");

    let (_, me) = get(&app, "/me", &cookie).await;
    assert_eq!(me["usage"]["insights"]["used"], 5);
}

#[tokio::test]
async fn job_search() {
    let app = app();
    let cookie = signup(&app).await;

    let (_, jobs) = get(&app, "/jobs", &cookie).await;
    assert_eq!(jobs["total"], 4);

    // "경비"
    let (_, guard) = get(&app, "/jobs?q=%EA%B2%BD%EB%B9%84", &cookie).await;
    assert_eq!(ids(&guard), vec!["2"]);

    let (_, nothing) = get(&app, "/jobs?q=astronaut", &cookie).await;
    assert_eq!(nothing["empty"], true);
}

#[tokio::test]
async fn community_age_filters() {
    let app = app();
    let cookie = signup(&app).await;

    let (_, events) = get(&app, "/community/events?cohort=all", &cookie).await;
    assert_eq!(events["total"], 6);
    assert_eq!(events["cohort"], Value::Null);

    // The open-to-all meetup shows up in every band.
    let (_, forties) = get(&app, "/community/events?cohort=40s", &cookie).await;
    assert_eq!(ids(&forties), vec!["4", "6"]);

    let (_, seventies) = get(&app, "/community/posts?cohort=70s", &cookie).await;
    assert_eq!(ids(&seventies), vec!["3"]);

    // "보안"
    let (_, security) = get(&app, "/community/posts?category=%EB%B3%B4%EC%95%88", &cookie).await;
    assert_eq!(ids(&security), vec!["3"]);

    let (status, _) = get(&app, "/community/posts?cohort=80s", &cookie).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bookmarks_toggle_per_view() {
    let app = app();
    let cookie = signup(&app).await;

    let (status, body) = post(&app, "/saved/jobs/2", &cookie, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["saved"], true);
    assert_eq!(body["view"], "job");

    let (_, saved) = get(&app, "/saved/jobs", &cookie).await;
    assert_eq!(saved["ids"], json!(["2"]));

    let (_, jobs) = get(&app, "/jobs", &cookie).await;
    let flagged: Vec<_> = jobs["items"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|j| j["saved"] == true)
        .map(|j| j["id"].as_str().unwrap())
        .collect();
    assert_eq!(flagged, vec!["2"]);

    let (_, body) = post(&app, "/saved/jobs/2", &cookie, None).await;
    assert_eq!(body["saved"], false);

    let (status, _) = post(&app, "/saved/recipes/2", &cookie, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = post(&app, "/saved/jobs/99", &cookie, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

//=========================================================================================
// Entitlements
//=========================================================================================

#[tokio::test]
async fn locked_course_needs_premium() {
    let app = app();
    let cookie = signup(&app).await;

    let (status, body) = post(&app, "/courses/5/enroll", &cookie, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "tier_required");
    assert_eq!(body["upgrade_to"], "premium");

    set_tier(&app, &cookie, "pro").await;
    let (status, _) = post(&app, "/courses/5/enroll", &cookie, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    set_tier(&app, &cookie, "premium").await;
    let (status, body) = post(&app, "/courses/5/enroll", &cookie, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enrolled"], true);

    let (status, _) = post(&app, "/courses/1/enroll", &cookie, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn enrollment_is_not_limited_to_the_feed_age_band() {
    let app = app();
    let cookie = signup(&app).await;

    // Course 4 targets 40s and 50s, so a 60s feed never lists it.
    let (_, courses) = get(&app, "/feed/courses", &cookie).await;
    assert!(!ids(&courses).contains(&"4".to_string()));

    let (status, body) = post(&app, "/courses/4/enroll", &cookie, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enrolled"], true);
}

#[tokio::test]
async fn downgrading_caps_todays_usage_at_the_new_limit() {
    let app = app();
    let cookie = signup(&app).await;
    set_tier(&app, &cookie, "pro").await;

    for i in 1..=12 {
        let (status, _) = post(
            &app,
            "/chat/messages",
            &cookie,
            Some(json!({ "text": format!("질문 {}", i) })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
    for _ in 0..7 {
        let (status, _) = get(&app, "/insights/2", &cookie).await;
        assert_eq!(status, StatusCode::OK);
    }

    set_tier(&app, &cookie, "free").await;
    let (_, me) = get(&app, "/me", &cookie).await;
    assert_eq!(me["usage"]["chat"], json!({ "used": 10, "limit": 10, "remaining": 0 }));
    assert_eq!(me["usage"]["insights"], json!({ "used": 5, "limit": 5, "remaining": 0 }));

    let (status, _) = post(&app, "/chat/messages", &cookie, Some(json!({ "text": "또" }))).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn plan_table_marks_the_current_plan() {
    let app = app();
    let cookie = signup(&app).await;

    let (status, plans) = get(&app, "/plans", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    let plans = plans.as_array().unwrap();
    assert_eq!(plans.len(), 3);
    assert_eq!(plans[0]["current"], true);
    assert_eq!(plans[1]["monthly_label"], "9,900원");
    assert_eq!(plans[1]["yearly_discount_percent"], 17);
    assert_eq!(plans[2]["chat_limit"], Value::Null);

    let (status, body) = post(
        &app,
        "/subscription",
        &cookie,
        Some(json!({ "tier": "premium", "billing_cycle": "yearly" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price_label"], "299,000원");

    let (status, _) = post(&app, "/subscription", &cookie, Some(json!({ "tier": "gold" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

//=========================================================================================
// Chat
//=========================================================================================

#[tokio::test]
async fn free_chat_allows_ten_messages_then_blocks() {
    let app = app();
    let cookie = signup(&app).await;

    for i in 1..=10 {
        let (status, body) = post(
            &app,
            "/chat/messages",
            &cookie,
            Some(json!({ "text": format!("질문 {}", i) })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "message {}", i);
        assert_eq!(body["usage"]["remaining"], 10 - i);
        assert!(body["reply"]["text"].as_str().unwrap().contains(&format!("질문 {}", i)));
        assert_eq!(body["reply"]["model_name"], "GPT-4");
    }

    let (status, body) = post(&app, "/chat/messages", &cookie, Some(json!({ "text": "하나 더" }))).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["upgrade_to"], "pro");

    // Greeting plus ten question/answer pairs; the refused message is not kept.
    let (_, history) = get(&app, "/chat", &cookie).await;
    assert_eq!(history["messages"].as_array().unwrap().len(), 21);

    // Upgrading lifts the block without resetting today's count.
    set_tier(&app, &cookie, "pro").await;
    let (status, body) = post(&app, "/chat/messages", &cookie, Some(json!({ "text": "하나 더" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["usage"]["used"], 11);
    assert_eq!(body["usage"]["remaining"], 89);
}

#[tokio::test]
async fn model_choice_is_checked_before_quota() {
    let app = app();
    let cookie = signup(&app).await;

    let (_, models) = get(&app, "/chat/models", &cookie).await;
    let available: Vec<_> = models["models"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|m| m["available"] == true)
        .map(|m| m["id"].as_str().unwrap())
        .collect();
    assert_eq!(available, vec!["gpt-4"]);

    let (status, body) = post(
        &app,
        "/chat/messages",
        &cookie,
        Some(json!({ "text": "안녕", "model": "gemini-pro" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["upgrade_to"], "premium");

    let (status, body) = post(
        &app,
        "/chat/messages",
        &cookie,
        Some(json!({ "text": "안녕", "model": "gpt-5" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "unknown_model");

    let (status, _) = post(&app, "/chat/messages", &cookie, Some(json!({ "text": "   " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, me) = get(&app, "/me", &cookie).await;
    assert_eq!(me["usage"]["chat"]["used"], 0);

    set_tier(&app, &cookie, "premium").await;
    let (status, body) = post(
        &app,
        "/chat/messages",
        &cookie,
        Some(json!({ "text": "안녕", "model": "gemini-pro" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"]["model_name"], "Gemini Pro");
    assert_eq!(body["usage"]["remaining"], Value::Null);

    // The model sticks for later messages.
    let (_, models) = get(&app, "/chat/models", &cookie).await;
    let selected: Vec<_> = models["models"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|m| m["selected"] == true)
        .map(|m| m["id"].as_str().unwrap())
        .collect();
    assert_eq!(selected, vec!["gemini-pro"]);
}

#[tokio::test]
async fn reset_leaves_a_single_notice() {
    let app = app();
    let cookie = signup(&app).await;
    post(&app, "/chat/messages", &cookie, Some(json!({ "text": "질문" }))).await;

    let (status, _, body) = call(&app, request("DELETE", "/chat", Some(&cookie), None)).await;
    assert_eq!(status, StatusCode::OK);
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["role"], "assistant");
    // Clearing the history does not refund the message.
    assert_eq!(body["usage"]["used"], 1);
}

/// A completion port that answers only when the test allows it.
struct GatedCompletion {
    release: Arc<Notify>,
}

#[async_trait]
impl CompletionService for GatedCompletion {
    async fn complete(&self, _model: &AiModel, _history: &[ChatMessage]) -> PortResult<String> {
        self.release.notified().await;
        Ok("늦은 답변".to_string())
    }
}

fn gated_app(release: Arc<Notify>) -> Router {
    let config = Arc::new(Config::without_delays());
    let state = AppState {
        auth: Arc::new(SimulatedAuthAdapter::new(Duration::ZERO, Duration::ZERO)),
        completion: Arc::new(GatedCompletion { release }),
        feed: Arc::new(StaticCatalogAdapter::new()),
        sessions: SessionStore::new(),
        config,
    };
    router(Arc::new(state))
}

/// Polls the history until its `pending` flag equals `wanted`.
async fn wait_for_pending(app: &Router, cookie: &str, wanted: bool) -> Value {
    for _ in 0..200 {
        let (_, history) = get(app, "/chat", cookie).await;
        if history["pending"] == wanted {
            return history;
        }
        tokio::task::yield_now().await;
    }
    panic!("chat never reached pending={}", wanted);
}

#[tokio::test]
async fn one_reply_in_flight_and_late_replies_after_reset_are_dropped() {
    let release = Arc::new(Notify::new());
    let app = gated_app(release.clone());
    let cookie = signup(&app).await;

    let first = tokio::spawn(app.clone().oneshot(request(
        "POST",
        "/chat/messages",
        Some(&cookie),
        Some(json!({ "text": "첫 질문" })),
    )));
    wait_for_pending(&app, &cookie, true).await;

    let (status, body) = post(&app, "/chat/messages", &cookie, Some(json!({ "text": "둘째" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "reply_pending");

    let (status, _, _) = call(&app, request("DELETE", "/chat", Some(&cookie), None)).await;
    assert_eq!(status, StatusCode::OK);

    release.notify_one();
    let response = first.await.unwrap().unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let (_, history) = get(&app, "/chat", &cookie).await;
    assert_eq!(history["messages"].as_array().unwrap().len(), 1);
    assert_eq!(history["pending"], false);
}

#[tokio::test]
async fn a_dropped_request_still_finishes_its_turn() {
    let release = Arc::new(Notify::new());
    let app = gated_app(release.clone());
    let cookie = signup(&app).await;

    let abandoned = tokio::spawn(app.clone().oneshot(request(
        "POST",
        "/chat/messages",
        Some(&cookie),
        Some(json!({ "text": "끊긴 질문" })),
    )));
    wait_for_pending(&app, &cookie, true).await;

    // The client goes away while the reply is still being written.
    abandoned.abort();
    assert!(abandoned.await.unwrap_err().is_cancelled());

    release.notify_one();
    let history = wait_for_pending(&app, &cookie, false).await;
    let texts: Vec<_> = history["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts[1..], ["끊긴 질문", "늦은 답변"]);

    release.notify_one();
    let (status, body) = post(&app, "/chat/messages", &cookie, Some(json!({ "text": "다시" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["usage"]["used"], 2);
}

//=========================================================================================
// Scam Prevention, Finance and Help
//=========================================================================================

#[tokio::test]
async fn scam_types_are_listed_and_searchable() {
    let app = app();
    let cookie = signup(&app).await;

    let (status, tips) = get(&app, "/scam-prevention", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&tips), vec!["1", "2", "3"]);
    let smishing = &tips["items"][0];
    assert_eq!(smishing["title"], "스미싱");
    assert_eq!(smishing["details"]["type"], "scam_tip");
    assert_eq!(smishing["details"]["risk"], "high");
    assert_eq!(smishing["details"]["prevention"].as_array().unwrap().len(), 3);

    // "카카오톡"
    let (_, messenger) = get(&app, "/scam-prevention?q=%EC%B9%B4%EC%B9%B4%EC%98%A4%ED%86%A1", &cookie).await;
    assert_eq!(ids(&messenger), vec!["3"]);
}

#[tokio::test]
async fn scam_quiz_tracks_correct_answers() {
    let app = app();
    let cookie = signup(&app).await;

    let (_, quiz) = get(&app, "/scam-prevention/quiz", &cookie).await;
    assert_eq!(quiz["total"], 5);
    assert_eq!(quiz["solved"], 0);
    assert!(quiz["questions"][0].get("answer").is_none());

    let (status, outcome) = post(
        &app,
        "/scam-prevention/quiz/4",
        &cookie,
        Some(json!({ "choice": "send" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["correct"], false);
    assert_eq!(outcome["answer"], "verify");
    assert_eq!(outcome["solved"], 0);

    let (_, outcome) = post(
        &app,
        "/scam-prevention/quiz/0",
        &cookie,
        Some(json!({ "choice": "no" })),
    )
    .await;
    assert_eq!(outcome["correct"], true);
    assert_eq!(outcome["progress_percent"], 20);

    let (status, _) = post(
        &app,
        "/scam-prevention/quiz/9",
        &cookie,
        Some(json!({ "choice": "no" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, quiz) =
        call(&app, request("DELETE", "/scam-prevention/quiz", Some(&cookie), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(quiz["solved"], 0);
}

#[tokio::test]
async fn finance_summary_and_quick_entry() {
    let app = app();
    let cookie = signup(&app).await;

    let (status, summary) = get(&app, "/finance/summary", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total_income"], 3_200_000);
    assert_eq!(summary["total_expense"], 2_450_000);
    assert_eq!(summary["savings"], 750_000);
    assert_eq!(summary["empty"], false);
    let percents: u64 = summary["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["percent"].as_u64().unwrap())
        .sum();
    assert_eq!(percents, 100);
    // Only the 40s band gets a tip.
    assert_eq!(summary["tip"], Value::Null);

    let (status, summary) = post(
        &app,
        "/finance/expenses",
        &cookie,
        Some(json!({ "amount": 50_000, "category": "food" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total_expense"], 2_500_000);
    assert_eq!(summary["categories"][0]["amount"], 730_000);

    // The entry sticks to the session.
    let (_, summary) = get(&app, "/finance/summary", &cookie).await;
    assert_eq!(summary["savings"], 700_000);

    let (status, _) = post(
        &app,
        "/finance/expenses",
        &cookie,
        Some(json!({ "amount": 0, "category": "food" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = post(
        &app,
        "/finance/expenses",
        &cookie,
        Some(json!({ "amount": 1000, "category": "travel" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn help_faqs_are_searchable() {
    let app = app();
    let cookie = signup(&app).await;

    let (status, faqs) = get(&app, "/help/faqs", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(faqs["total"], 5);
    assert_eq!(faqs["items"][0]["details"]["type"], "faq");

    // "상담"
    let (_, counselling) = get(&app, "/help/faqs?q=%EC%83%81%EB%8B%B4", &cookie).await;
    assert_eq!(ids(&counselling), vec!["3", "5"]);
}

//=========================================================================================
// Walkthrough
//=========================================================================================

#[tokio::test]
async fn walkthrough_runs_through_a_three_step_card() {
    let app = app();
    let cookie = signup(&app).await;

    let (status, view) = post(&app, "/walkthroughs/1", &cookie, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["state"], "in_step");
    assert_eq!(view["step_index"], 0);
    assert_eq!(view["step_count"], 3);
    assert_eq!(view["current_step"], "챗GPT 웹사이트에 접속하기");

    let (_, view) = post(&app, "/walkthroughs/1/previous", &cookie, None).await;
    assert_eq!(view["step_index"], 0);

    let (status, view) = call(
        &app,
        request(
            "PUT",
            "/walkthroughs/1/notes",
            Some(&cookie),
            Some(json!({ "notes": "보고서 요청 메일" })),
        ),
    )
    .await
    .into_status_and_body();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["notes"], "보고서 요청 메일");

    post(&app, "/walkthroughs/1/next", &cookie, None).await;
    let (_, view) = post(&app, "/walkthroughs/1/next", &cookie, None).await;
    assert_eq!(view["step_index"], 2);
    assert_eq!(view["progress_percent"], 100);

    let (_, view) = post(&app, "/walkthroughs/1/next", &cookie, None).await;
    assert_eq!(view["state"], "completed");
    assert_eq!(view["step_index"], Value::Null);

    // Re-opening returns the walkthrough as it is.
    let (_, view) = post(&app, "/walkthroughs/1", &cookie, None).await;
    assert_eq!(view["state"], "completed");

    let (_, view) = post(&app, "/walkthroughs/1/reset", &cookie, None).await;
    assert_eq!(view["step_index"], 0);
    assert_eq!(view["notes"], "");

    let (_, view) = post(&app, "/walkthroughs/1/voice", &cookie, None).await;
    assert_eq!(view["voice_enabled"], false);

    let (status, _, _) =
        call(&app, request("DELETE", "/walkthroughs/1", Some(&cookie), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = post(&app, "/walkthroughs/1/next", &cookie, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn walkthrough_needs_a_learning_card() {
    let app = app();
    let cookie = signup(&app).await;
    let (status, _) = post(&app, "/walkthroughs/42", &cookie, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = app();
    let (status, _, doc) = call(&app, request("GET", "/api-docs/openapi.json", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/chat/messages"].is_object());
}
