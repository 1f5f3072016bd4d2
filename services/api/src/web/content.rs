//! services/api/src/web/content.rs
//!
//! Content endpoints: the cohort-filtered learning feeds, insights, job search,
//! the community board, scam-prevention tips, help FAQs, bookmarks and course
//! enrollment.
//!
//! Every list runs the same pipeline: fetch from the feed port, then
//! `ContentQuery` (cohort, category, search) in that order.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use baeumteo_core::{
    entitlement::{can_access, require_tier},
    filter::{CategoryTaxonomy, ContentQuery, ALL_CATEGORIES, INSIGHT_TOPICS, LEARNING_CATEGORIES},
    Cohort, ContentDetails, ContentItem, ContentKind,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::error::{ApiResult, ErrorBody};
use crate::web::state::{today, AppState, SessionHandle, UserSession};

/// Community posts and events carry free-form category labels.
const FREE_LABELS: CategoryTaxonomy = CategoryTaxonomy::new(&[]);

//=========================================================================================
// Views
//=========================================================================================

#[derive(Serialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DetailsView {
    Insight {
        topic: String,
        read_time: String,
        published: String,
        source: String,
        url: String,
    },
    LearningCard {
        difficulty: String,
        duration: String,
        key_points: Vec<String>,
        steps: Vec<String>,
        source: String,
        warning: Option<String>,
        fraud_risk: Option<String>,
        has_voice: bool,
        has_video: bool,
    },
    Job {
        company: String,
        location: String,
        distance: String,
        pay: String,
        schedule: String,
        senior_friendly: bool,
    },
    Course {
        lessons: u32,
        duration: String,
        difficulty: String,
        progress: u8,
        downloaded: bool,
        required_tier: String,
        enrolled: bool,
    },
    Post {
        author: String,
        posted: String,
        likes: u32,
        comments: u32,
        verified: bool,
    },
    Event {
        date: String,
        time: String,
        location: String,
        participants: u32,
        max_participants: u32,
        full: bool,
    },
    ScamTip {
        risk: String,
        examples: Vec<String>,
        prevention: Vec<String>,
    },
    Faq {
        answer: String,
    },
}

#[derive(Serialize, ToSchema)]
pub struct ContentView {
    pub id: String,
    pub kind: String,
    pub title: String,
    pub summary: String,
    pub category: String,
    pub tags: Vec<String>,
    pub cohorts: Vec<String>,
    pub saved: bool,
    /// True when the current plan is below the item's required tier.
    pub locked: bool,
    pub details: DetailsView,
}

impl ContentView {
    pub fn new(item: &ContentItem, session: &UserSession) -> Self {
        let details = match &item.details {
            ContentDetails::Insight {
                topic,
                read_time,
                published,
                source,
                url,
            } => DetailsView::Insight {
                topic: topic.clone(),
                read_time: read_time.clone(),
                published: published.clone(),
                source: source.clone(),
                url: url.clone(),
            },
            ContentDetails::LearningCard {
                difficulty,
                duration,
                key_points,
                steps,
                source,
                warning,
                fraud_risk,
                has_voice,
                has_video,
            } => DetailsView::LearningCard {
                difficulty: difficulty.as_str().to_string(),
                duration: duration.clone(),
                key_points: key_points.clone(),
                steps: steps.clone(),
                source: source.clone(),
                warning: warning.clone(),
                fraud_risk: fraud_risk.map(|r| r.as_str().to_string()),
                has_voice: *has_voice,
                has_video: *has_video,
            },
            ContentDetails::Job {
                company,
                location,
                distance,
                pay,
                schedule,
                senior_friendly,
            } => DetailsView::Job {
                company: company.clone(),
                location: location.clone(),
                distance: distance.clone(),
                pay: pay.clone(),
                schedule: schedule.clone(),
                senior_friendly: *senior_friendly,
            },
            ContentDetails::Course {
                lessons,
                duration,
                difficulty,
                progress,
                downloaded,
                required_tier,
            } => DetailsView::Course {
                lessons: *lessons,
                duration: duration.clone(),
                difficulty: difficulty.as_str().to_string(),
                progress: *progress,
                downloaded: *downloaded,
                required_tier: required_tier.as_str().to_string(),
                enrolled: session.enrolled_courses.contains(&item.id),
            },
            ContentDetails::Post {
                author,
                posted,
                likes,
                comments,
                verified,
            } => DetailsView::Post {
                author: author.clone(),
                posted: posted.clone(),
                likes: *likes,
                comments: *comments,
                verified: *verified,
            },
            ContentDetails::Event {
                date,
                time,
                location,
                participants,
                max_participants,
            } => DetailsView::Event {
                date: date.clone(),
                time: time.clone(),
                location: location.clone(),
                participants: *participants,
                max_participants: *max_participants,
                full: participants >= max_participants,
            },
            ContentDetails::ScamTip {
                risk,
                examples,
                prevention,
            } => DetailsView::ScamTip {
                risk: risk.as_str().to_string(),
                examples: examples.clone(),
                prevention: prevention.clone(),
            },
            ContentDetails::Faq => DetailsView::Faq {
                answer: item.summary.clone(),
            },
        };

        Self {
            id: item.id.clone(),
            kind: item.kind.as_str().to_string(),
            title: item.title.clone(),
            summary: item.summary.clone(),
            category: item.category.clone(),
            tags: item.tags.clone(),
            cohorts: item.cohorts.iter().map(|c| c.as_str().to_string()).collect(),
            saved: session.is_saved(item.kind, &item.id),
            locked: !can_access(session.tier, item.required_tier()),
            details,
        }
    }
}

/// A filtered list. `empty` is set instead of failing when nothing matches.
#[derive(Serialize, ToSchema)]
pub struct FeedResponse {
    /// The cohort the list was filtered for, if any.
    pub cohort: Option<String>,
    pub total: usize,
    pub empty: bool,
    pub items: Vec<ContentView>,
}

impl FeedResponse {
    fn new(items: &[&ContentItem], cohort: Option<Cohort>, session: &UserSession) -> Self {
        Self {
            cohort: cohort.map(|c| c.as_str().to_string()),
            total: items.len(),
            empty: items.is_empty(),
            items: items
                .iter()
                .map(|item| ContentView::new(item, session))
                .collect(),
        }
    }
}

//=========================================================================================
// Query Parameters
//=========================================================================================

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FeedQuery {
    /// Taxonomy key such as `security`, or `all`.
    pub category: Option<String>,
    /// Case-insensitive search over title and summary.
    pub q: Option<String>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CommunityQuery {
    /// `40s`, `50s`, `60s`, `70s` or `all`.
    pub cohort: Option<String>,
    /// Category label, or `all`.
    pub category: Option<String>,
    pub q: Option<String>,
}

/// `all` and a blank value both mean "no cohort filter".
fn parse_cohort_filter(raw: Option<&str>) -> ApiResult<Option<Cohort>> {
    match raw.map(str::trim) {
        None | Some("") | Some(ALL_CATEGORIES) => Ok(None),
        Some(value) => Ok(Some(value.parse()?)),
    }
}

/// Filters one fetched collection for the session.
async fn filtered_feed(
    items: Vec<ContentItem>,
    session: &SessionHandle,
    query: ContentQuery,
    taxonomy: &CategoryTaxonomy,
) -> FeedResponse {
    let session = session.lock().await;
    let visible = query.apply(&items, taxonomy);
    FeedResponse::new(&visible, query.cohort, &session)
}

//=========================================================================================
// Learning Feeds
//=========================================================================================

/// GET /feed/cards - Learning cards for the user's cohort
#[utoipa::path(
    get,
    path = "/feed/cards",
    params(FeedQuery),
    responses((status = 200, description = "Filtered learning cards", body = FeedResponse)),
    tag = "content"
)]
pub async fn learning_cards_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Query(params): Query<FeedQuery>,
) -> ApiResult<Json<FeedResponse>> {
    let cohort = session.lock().await.cohort();
    let query = ContentQuery {
        cohort: Some(cohort),
        category: params.category,
        search: params.q,
    };
    let cards = state.feed.fetch_learning_cards().await?;
    let feed = filtered_feed(cards, &session, query, &LEARNING_CATEGORIES).await;
    Ok(Json(feed))
}

/// GET /feed/courses - Courses for the user's cohort, with lock state
#[utoipa::path(
    get,
    path = "/feed/courses",
    params(FeedQuery),
    responses((status = 200, description = "Filtered courses", body = FeedResponse)),
    tag = "content"
)]
pub async fn courses_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Query(params): Query<FeedQuery>,
) -> ApiResult<Json<FeedResponse>> {
    let cohort = session.lock().await.cohort();
    let query = ContentQuery {
        cohort: Some(cohort),
        category: params.category,
        search: params.q,
    };
    let courses = state.feed.fetch_courses().await?;
    let feed = filtered_feed(courses, &session, query, &LEARNING_CATEGORIES).await;
    Ok(Json(feed))
}

#[derive(Serialize, ToSchema)]
pub struct EnrollResponse {
    pub course_id: String,
    pub title: String,
    pub enrolled: bool,
}

/// POST /courses/{id}/enroll - Enroll in a course the plan allows
///
/// Only the plan gates enrollment; the age band just decides what the feed shows.
#[utoipa::path(
    post,
    path = "/courses/{id}/enroll",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Enrolled", body = EnrollResponse),
        (status = 403, description = "The course needs a higher plan", body = ErrorBody),
        (status = 404, description = "No such course", body = ErrorBody)
    ),
    tag = "content"
)]
pub async fn enroll_course_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Path(course_id): Path<String>,
) -> ApiResult<Json<EnrollResponse>> {
    let course = state.feed.find(ContentKind::Course, &course_id).await?;

    let mut session = session.lock().await;
    require_tier(session.tier, course.required_tier())?;
    session.enrolled_courses.insert(course.id.clone());
    info!("{} enrolled in course {}", session.profile.email, course.id);

    Ok(Json(EnrollResponse {
        course_id: course.id,
        title: course.title,
        enrolled: true,
    }))
}

//=========================================================================================
// Insights
//=========================================================================================

/// GET /insights - Insights filtered by topic and search text
#[utoipa::path(
    get,
    path = "/insights",
    params(FeedQuery),
    responses((status = 200, description = "Filtered insights", body = FeedResponse)),
    tag = "content"
)]
pub async fn insights_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Query(params): Query<FeedQuery>,
) -> ApiResult<Json<FeedResponse>> {
    let cohort = session.lock().await.cohort();
    let query = ContentQuery {
        cohort: Some(cohort),
        category: params.category,
        search: params.q,
    };
    let insights = state.feed.fetch_insights().await?;
    let feed = filtered_feed(insights, &session, query, &INSIGHT_TOPICS).await;
    Ok(Json(feed))
}

#[derive(Serialize, ToSchema)]
pub struct InsightDetailResponse {
    pub item: ContentView,
    /// Views left today; `None` means unlimited.
    pub remaining_views: Option<u32>,
}

/// GET /insights/{id} - Open an insight, using one of today's views
#[utoipa::path(
    get,
    path = "/insights/{id}",
    params(("id" = String, Path, description = "Insight id")),
    responses(
        (status = 200, description = "The insight", body = InsightDetailResponse),
        (status = 404, description = "No such insight", body = ErrorBody),
        (status = 429, description = "Daily insight limit reached", body = ErrorBody)
    ),
    tag = "content"
)]
pub async fn insight_detail_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Path(insight_id): Path<String>,
) -> ApiResult<Json<InsightDetailResponse>> {
    let insight = state.feed.find(ContentKind::Insight, &insight_id).await?;

    let mut session = session.lock().await;
    let tier = session.tier;
    let remaining = session.insight_usage.try_consume(tier, today())?;

    Ok(Json(InsightDetailResponse {
        item: ContentView::new(&insight, &session),
        remaining_views: remaining.as_option(),
    }))
}

//=========================================================================================
// Jobs
//=========================================================================================

/// GET /jobs - Senior-friendly job listings
#[utoipa::path(
    get,
    path = "/jobs",
    params(SearchQuery),
    responses((status = 200, description = "Matching jobs", body = FeedResponse)),
    tag = "content"
)]
pub async fn jobs_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Query(params): Query<SearchQuery>,
) -> ApiResult<Json<FeedResponse>> {
    let cohort = session.lock().await.cohort();
    let query = ContentQuery {
        cohort: Some(cohort),
        category: None,
        search: params.q,
    };
    let jobs = state.feed.fetch_jobs().await?;
    let feed = filtered_feed(jobs, &session, query, &FREE_LABELS).await;
    Ok(Json(feed))
}

//=========================================================================================
// Community
//=========================================================================================

fn community_query(params: CommunityQuery) -> ApiResult<ContentQuery> {
    Ok(ContentQuery {
        cohort: parse_cohort_filter(params.cohort.as_deref())?,
        category: params.category,
        search: params.q,
    })
}

/// GET /community/posts - Community posts, optionally for one age band
#[utoipa::path(
    get,
    path = "/community/posts",
    params(CommunityQuery),
    responses(
        (status = 200, description = "Matching posts", body = FeedResponse),
        (status = 400, description = "Invalid cohort", body = ErrorBody)
    ),
    tag = "community"
)]
pub async fn community_posts_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Query(params): Query<CommunityQuery>,
) -> ApiResult<Json<FeedResponse>> {
    let query = community_query(params)?;
    let posts = state.feed.fetch_posts().await?;
    Ok(Json(filtered_feed(posts, &session, query, &FREE_LABELS).await))
}

/// GET /community/events - Meetups and lectures, optionally for one age band
#[utoipa::path(
    get,
    path = "/community/events",
    params(CommunityQuery),
    responses(
        (status = 200, description = "Matching events", body = FeedResponse),
        (status = 400, description = "Invalid cohort", body = ErrorBody)
    ),
    tag = "community"
)]
pub async fn community_events_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Query(params): Query<CommunityQuery>,
) -> ApiResult<Json<FeedResponse>> {
    let query = community_query(params)?;
    let events = state.feed.fetch_events().await?;
    Ok(Json(filtered_feed(events, &session, query, &FREE_LABELS).await))
}

//=========================================================================================
// Scam Prevention and Help
//=========================================================================================

/// GET /scam-prevention - Common scam types with examples and prevention tips
#[utoipa::path(
    get,
    path = "/scam-prevention",
    params(SearchQuery),
    responses((status = 200, description = "Matching scam types", body = FeedResponse)),
    tag = "safety"
)]
pub async fn scam_tips_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Query(params): Query<SearchQuery>,
) -> ApiResult<Json<FeedResponse>> {
    let query = ContentQuery {
        cohort: None,
        category: None,
        search: params.q,
    };
    let tips = state.feed.fetch_scam_tips().await?;
    Ok(Json(filtered_feed(tips, &session, query, &FREE_LABELS).await))
}

/// GET /help/faqs - Frequently asked questions
#[utoipa::path(
    get,
    path = "/help/faqs",
    params(SearchQuery),
    responses((status = 200, description = "Matching questions", body = FeedResponse)),
    tag = "help"
)]
pub async fn faqs_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Query(params): Query<SearchQuery>,
) -> ApiResult<Json<FeedResponse>> {
    let query = ContentQuery {
        cohort: None,
        category: None,
        search: params.q,
    };
    let faqs = state.feed.fetch_faqs().await?;
    Ok(Json(filtered_feed(faqs, &session, query, &FREE_LABELS).await))
}

//=========================================================================================
// Bookmarks
//=========================================================================================

#[derive(Serialize, ToSchema)]
pub struct SavedToggleResponse {
    pub view: String,
    pub id: String,
    pub saved: bool,
}

#[derive(Serialize, ToSchema)]
pub struct SavedListResponse {
    pub view: String,
    pub ids: Vec<String>,
}

/// POST /saved/{view}/{id} - Toggle the bookmark on an item
#[utoipa::path(
    post,
    path = "/saved/{view}/{id}",
    params(
        ("view" = String, Path, description = "insights, cards, jobs, courses, posts, events, scam_tips or faqs"),
        ("id" = String, Path, description = "Item id within the view")
    ),
    responses(
        (status = 200, description = "New bookmark state", body = SavedToggleResponse),
        (status = 400, description = "Unknown view", body = ErrorBody),
        (status = 404, description = "No such item", body = ErrorBody)
    ),
    tag = "content"
)]
pub async fn toggle_saved_handler(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionHandle>,
    Path((view, item_id)): Path<(String, String)>,
) -> ApiResult<Json<SavedToggleResponse>> {
    let kind: ContentKind = view.parse()?;
    let item = state.feed.find(kind, &item_id).await?;

    let saved = session.lock().await.toggle_saved(kind, &item.id);
    Ok(Json(SavedToggleResponse {
        view: kind.as_str().to_string(),
        id: item.id,
        saved,
    }))
}

/// GET /saved/{view} - Bookmarked ids in a view
#[utoipa::path(
    get,
    path = "/saved/{view}",
    params(("view" = String, Path, description = "insights, cards, jobs, courses, posts, events, scam_tips or faqs")),
    responses(
        (status = 200, description = "Bookmarked ids", body = SavedListResponse),
        (status = 400, description = "Unknown view", body = ErrorBody)
    ),
    tag = "content"
)]
pub async fn saved_list_handler(
    Extension(session): Extension<SessionHandle>,
    Path(view): Path<String>,
) -> ApiResult<Json<SavedListResponse>> {
    let kind: ContentKind = view.parse()?;
    let session = session.lock().await;
    let ids = session
        .saved
        .get(&kind)
        .map(|ids| ids.iter().cloned().collect())
        .unwrap_or_default();
    Ok(Json(SavedListResponse {
        view: kind.as_str().to_string(),
        ids,
    }))
}
