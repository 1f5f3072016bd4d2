//! services/api/src/web/finance.rs
//!
//! The household finance dashboard: the month's totals, the spending breakdown
//! and quick expense entry. The ledger is loaded into the session on first use.

use axum::{extract::State, Extension, Json};
use baeumteo_core::{
    finance::{tip_for, ExpenseCategory, FinanceMonth},
    Cohort,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;

use crate::error::{ApiError, ApiResult, ErrorBody};
use crate::web::state::{AppState, SessionHandle};

#[derive(Serialize, ToSchema)]
pub struct CategoryShareView {
    pub category: String,
    pub label: String,
    pub amount: u64,
    pub percent: u8,
}

#[derive(Serialize, ToSchema)]
pub struct FinanceSummaryResponse {
    pub year: i32,
    pub month: u32,
    pub total_income: u64,
    pub total_expense: u64,
    /// Negative for a deficit.
    pub savings: i64,
    /// True until the first expense is recorded.
    pub empty: bool,
    pub categories: Vec<CategoryShareView>,
    pub tip: Option<String>,
}

fn summary_view(month: &FinanceMonth, cohort: Cohort) -> FinanceSummaryResponse {
    let summary = month.summary();
    FinanceSummaryResponse {
        year: summary.year,
        month: summary.month,
        total_income: summary.total_income,
        total_expense: summary.total_expense,
        savings: summary.savings,
        empty: !month.has_expenses(),
        categories: summary
            .categories
            .into_iter()
            .map(|share| CategoryShareView {
                category: share.category.as_str().to_string(),
                label: share.category.korean_label().to_string(),
                amount: share.amount,
                percent: share.percent,
            })
            .collect(),
        tip: tip_for(cohort).map(str::to_string),
    }
}

fn no_month() -> ApiError {
    ApiError::NotFound("finance month".to_string())
}

/// Makes sure the session holds its ledger month, fetching it once.
async fn load_month(state: &AppState, session: &SessionHandle) -> ApiResult<()> {
    if session.lock().await.finance.is_some() {
        return Ok(());
    }
    let month = state.feed.fetch_finance_month().await?;
    let mut session = session.lock().await;
    if session.finance.is_none() {
        session.finance = Some(month);
    }
    Ok(())
}

/// GET /finance/summary - This month's income, spending and savings
#[utoipa::path(
    get,
    path = "/finance/summary",
    responses((status = 200, description = "Monthly summary", body = FinanceSummaryResponse)),
    tag = "finance"
)]
pub async fn finance_summary_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
) -> ApiResult<Json<FinanceSummaryResponse>> {
    load_month(&state, &session).await?;
    let session = session.lock().await;
    let month = session.finance.as_ref().ok_or_else(no_month)?;
    Ok(Json(summary_view(month, session.cohort())))
}

#[derive(Deserialize, ToSchema)]
pub struct ExpenseRequest {
    /// Whole KRW, greater than zero.
    pub amount: u64,
    /// `food`, `transport`, `medical`, `education` or `etc`.
    pub category: String,
}

/// POST /finance/expenses - Quick entry of one expense
#[utoipa::path(
    post,
    path = "/finance/expenses",
    request_body = ExpenseRequest,
    responses(
        (status = 200, description = "The updated summary", body = FinanceSummaryResponse),
        (status = 400, description = "Zero amount or unknown category", body = ErrorBody)
    ),
    tag = "finance"
)]
pub async fn record_expense_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Json(req): Json<ExpenseRequest>,
) -> ApiResult<Json<FinanceSummaryResponse>> {
    let category: ExpenseCategory = req.category.parse()?;
    load_month(&state, &session).await?;

    let mut session = session.lock().await;
    let cohort = session.cohort();
    let month = session.finance.as_mut().ok_or_else(no_month)?;
    month.record_expense(category, req.amount)?;
    let view = summary_view(month, cohort);
    info!(
        "{} recorded {} KRW under {}",
        session.profile.email, req.amount, category
    );
    Ok(Json(view))
}
