//! services/api/src/web/profile.rs
//!
//! Endpoints for the signed-in user's profile, display settings, onboarding
//! and subscription plan.

use axum::{extract::Query, Extension, Json};
use baeumteo_core::{
    cohort::density,
    entitlement::daily_limit,
    onboarding::{goals, suggested_goals, OnboardingAnswers},
    plans::{format_price, plan_for, BillingCycle, PLANS},
    validation::ValidationError,
    Cohort, Quota, SubscriptionTier, UsageCounter,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::error::{ApiResult, ErrorBody};
use crate::web::state::{today, SessionHandle, UserSession};

//=========================================================================================
// Response Types
//=========================================================================================

#[derive(Serialize, ToSchema)]
pub struct DensityView {
    /// 0 (base) to 3 (2xl).
    pub text_step: u8,
    pub text_size: String,
    pub button_size: String,
    pub simple_home: bool,
}

#[derive(Serialize, ToSchema)]
pub struct QuotaView {
    pub used: u32,
    /// `None` means unlimited.
    pub limit: Option<u32>,
    pub remaining: Option<u32>,
}

impl QuotaView {
    pub fn new(used: u32, limit: Quota, remaining: Quota) -> Self {
        Self {
            used,
            limit: limit.as_option(),
            remaining: remaining.as_option(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct UsageView {
    pub chat: QuotaView,
    pub insights: QuotaView,
}

#[derive(Serialize, ToSchema)]
pub struct MeResponse {
    pub email: String,
    pub display_name: String,
    pub phone: Option<String>,
    pub auth_provider: Option<String>,
    pub cohort: String,
    pub cohort_label: String,
    pub tier: String,
    pub easy_mode: bool,
    pub needs_onboarding: bool,
    pub goals: Vec<String>,
    pub notification_time: String,
    pub density: DensityView,
    pub usage: UsageView,
}

fn quota_view(counter: &mut UsageCounter, tier: SubscriptionTier) -> QuotaView {
    let today = today();
    let used = counter.used(today);
    let limit = daily_limit(counter.kind(), tier);
    QuotaView::new(used, limit, counter.remaining(tier, today))
}

pub(crate) fn me_view(session: &mut UserSession) -> MeResponse {
    let cohort = session.cohort();
    let ui = density(cohort, session.easy_mode);
    let tier = session.tier;
    let usage = UsageView {
        chat: quota_view(&mut session.chat_usage, tier),
        insights: quota_view(&mut session.insight_usage, tier),
    };

    MeResponse {
        email: session.profile.email.clone(),
        display_name: session.profile.display_name.clone(),
        phone: session.profile.phone.clone(),
        auth_provider: session.profile.auth_provider.map(|p| p.as_str().to_string()),
        cohort: cohort.as_str().to_string(),
        cohort_label: cohort.korean_label().to_string(),
        tier: tier.as_str().to_string(),
        easy_mode: session.easy_mode,
        needs_onboarding: session.needs_onboarding,
        goals: session.goals.iter().map(|g| g.to_string()).collect(),
        notification_time: session.notification_time.as_str().to_string(),
        density: DensityView {
            text_step: ui.text_step,
            text_size: ui.text_size.css_class().to_string(),
            button_size: ui.button_size.as_str().to_string(),
            simple_home: ui.simple_home,
        },
        usage,
    }
}

//=========================================================================================
// Profile and Settings
//=========================================================================================

/// GET /me - Profile, cohort, tier, UI density and today's usage
#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "The current user", body = MeResponse),
        (status = 401, description = "No active session", body = ErrorBody)
    ),
    tag = "profile"
)]
pub async fn me_handler(Extension(session): Extension<SessionHandle>) -> Json<MeResponse> {
    let mut session = session.lock().await;
    Json(me_view(&mut session))
}

#[derive(Deserialize, ToSchema)]
pub struct SettingsRequest {
    pub display_name: Option<String>,
    pub phone: Option<String>,
    /// One of `40s`, `50s`, `60s`, `70s`.
    pub cohort: Option<String>,
    pub easy_mode: Option<bool>,
}

/// PUT /me/settings - Update profile fields and display preferences
#[utoipa::path(
    put,
    path = "/me/settings",
    request_body = SettingsRequest,
    responses(
        (status = 200, description = "Updated profile", body = MeResponse),
        (status = 400, description = "Invalid value", body = ErrorBody)
    ),
    tag = "profile"
)]
pub async fn update_settings_handler(
    Extension(session): Extension<SessionHandle>,
    Json(req): Json<SettingsRequest>,
) -> ApiResult<Json<MeResponse>> {
    let display_name = match req.display_name {
        Some(name) if name.trim().is_empty() => {
            return Err(ValidationError::Empty("display_name").into())
        }
        Some(name) => Some(name.trim().to_string()),
        None => None,
    };
    let cohort = req.cohort.as_deref().map(str::parse::<Cohort>).transpose()?;

    let mut session = session.lock().await;
    if let Some(name) = display_name {
        session.profile.display_name = name;
    }
    if let Some(phone) = req.phone {
        let phone = phone.trim();
        session.profile.phone = (!phone.is_empty()).then(|| phone.to_string());
    }
    if let Some(cohort) = cohort {
        session.profile.cohort = Some(cohort);
    }
    if let Some(easy_mode) = req.easy_mode {
        session.easy_mode = easy_mode;
    }
    Ok(Json(me_view(&mut session)))
}

//=========================================================================================
// Onboarding
//=========================================================================================

#[derive(Serialize, ToSchema)]
pub struct GoalView {
    pub id: String,
    pub label: String,
    /// Whether the goal targets the requested cohort.
    pub suggested: bool,
}

#[derive(Serialize, ToSchema)]
pub struct GoalsResponse {
    pub cohort: String,
    pub goals: Vec<GoalView>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GoalsQuery {
    /// Defaults to the session's cohort.
    pub cohort: Option<String>,
}

/// GET /onboarding/goals - Learning goals, flagged when they suit the cohort
#[utoipa::path(
    get,
    path = "/onboarding/goals",
    params(GoalsQuery),
    responses(
        (status = 200, description = "Goal catalog", body = GoalsResponse),
        (status = 400, description = "Invalid cohort", body = ErrorBody)
    ),
    tag = "onboarding"
)]
pub async fn onboarding_goals_handler(
    Extension(session): Extension<SessionHandle>,
    Query(query): Query<GoalsQuery>,
) -> ApiResult<Json<GoalsResponse>> {
    let cohort = match query.cohort.as_deref() {
        Some(raw) => raw.parse::<Cohort>()?,
        None => session.lock().await.cohort(),
    };

    let suggested = suggested_goals(cohort);
    let goals = goals()
        .into_iter()
        .map(|g| GoalView {
            suggested: suggested.contains(&g),
            id: g.id.to_string(),
            label: g.label.to_string(),
        })
        .collect();

    Ok(Json(GoalsResponse {
        cohort: cohort.as_str().to_string(),
        goals,
    }))
}

#[derive(Deserialize, ToSchema)]
pub struct OnboardingRequest {
    pub goals: Vec<String>,
    pub cohort: Option<String>,
    /// `morning`, `afternoon`, `evening` or `none`.
    pub notification_time: Option<String>,
}

/// POST /onboarding - Submit goals, age band and notification time
#[utoipa::path(
    post,
    path = "/onboarding",
    request_body = OnboardingRequest,
    responses(
        (status = 200, description = "Onboarding completed", body = MeResponse),
        (status = 400, description = "No goals or an invalid answer", body = ErrorBody)
    ),
    tag = "onboarding"
)]
pub async fn complete_onboarding_handler(
    Extension(session): Extension<SessionHandle>,
    Json(req): Json<OnboardingRequest>,
) -> ApiResult<Json<MeResponse>> {
    let answers = OnboardingAnswers {
        goals: req.goals,
        cohort: req.cohort,
        notification_time: req.notification_time,
    };
    let result = answers.complete()?;

    let mut session = session.lock().await;
    session.profile.cohort = Some(result.cohort);
    session.goals = result.goals;
    session.notification_time = result.notification_time;
    session.needs_onboarding = false;
    info!(
        "Onboarding completed for {} ({})",
        session.profile.email,
        result.cohort.as_str()
    );
    Ok(Json(me_view(&mut session)))
}

//=========================================================================================
// Plans and Subscription
//=========================================================================================

#[derive(Serialize, ToSchema)]
pub struct PlanView {
    pub tier: String,
    pub name: String,
    pub monthly_price: u32,
    pub yearly_price: u32,
    pub monthly_label: String,
    pub yearly_label: String,
    pub yearly_discount_percent: u32,
    pub popular: bool,
    pub current: bool,
    pub features: Vec<String>,
    pub support: String,
    pub offline_courses: String,
    pub chat_limit: Option<u32>,
    pub insight_limit: Option<u32>,
}

/// GET /plans - The subscription plan table
#[utoipa::path(
    get,
    path = "/plans",
    responses((status = 200, description = "All plans, cheapest first", body = [PlanView])),
    tag = "subscription"
)]
pub async fn plans_handler(Extension(session): Extension<SessionHandle>) -> Json<Vec<PlanView>> {
    let current = session.lock().await.tier;
    let plans = PLANS
        .iter()
        .map(|plan| PlanView {
            tier: plan.tier.as_str().to_string(),
            name: plan.name.to_string(),
            monthly_price: plan.monthly_price,
            yearly_price: plan.yearly_price,
            monthly_label: format_price(plan.monthly_price),
            yearly_label: format_price(plan.yearly_price),
            yearly_discount_percent: plan.yearly_discount_percent(),
            popular: plan.popular,
            current: plan.tier == current,
            features: plan.features.iter().map(|f| f.to_string()).collect(),
            support: plan.support.to_string(),
            offline_courses: plan.offline_courses.to_string(),
            chat_limit: plan.chat_limit().as_option(),
            insight_limit: plan.insight_limit().as_option(),
        })
        .collect();
    Json(plans)
}

#[derive(Deserialize, ToSchema)]
pub struct SubscriptionRequest {
    /// `free`, `pro` or `premium`.
    pub tier: String,
    /// `monthly` (default) or `yearly`.
    pub billing_cycle: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct SubscriptionResponse {
    pub tier: String,
    pub billing_cycle: String,
    pub price: u32,
    pub price_label: String,
}

/// POST /subscription - Switch plan
///
/// No payment is taken. Today's usage carries over to the new plan, capped at
/// its daily limits.
#[utoipa::path(
    post,
    path = "/subscription",
    request_body = SubscriptionRequest,
    responses(
        (status = 200, description = "Plan changed", body = SubscriptionResponse),
        (status = 400, description = "Unknown tier or billing cycle", body = ErrorBody)
    ),
    tag = "subscription"
)]
pub async fn select_plan_handler(
    Extension(session): Extension<SessionHandle>,
    Json(req): Json<SubscriptionRequest>,
) -> ApiResult<Json<SubscriptionResponse>> {
    let tier: SubscriptionTier = req.tier.parse()?;
    let cycle = match req.billing_cycle.as_deref() {
        Some(raw) => raw.parse::<BillingCycle>()?,
        None => BillingCycle::Monthly,
    };
    let plan = plan_for(tier);

    let mut session = session.lock().await;
    let previous = session.tier;
    session.tier = tier;
    let today = today();
    session.chat_usage.clamp_to(tier, today);
    session.insight_usage.clamp_to(tier, today);
    info!(
        "{} switched plan {} -> {} ({})",
        session.profile.email,
        previous.as_str(),
        tier.as_str(),
        cycle.as_str()
    );

    Ok(Json(SubscriptionResponse {
        tier: tier.as_str().to_string(),
        billing_cycle: cycle.as_str().to_string(),
        price: plan.price(cycle),
        price_label: format_price(plan.price(cycle)),
    }))
}
