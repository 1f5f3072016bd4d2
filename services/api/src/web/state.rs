//! services/api/src/web/state.rs
//!
//! Defines the application's shared state and the per-user session state.

use crate::adapters::{CannedCompletionAdapter, SimulatedAuthAdapter, StaticCatalogAdapter};
use crate::config::Config;
use baeumteo_core::{
    chat::ChatTranscript,
    cohort::classify,
    entitlement::{find_model, DEFAULT_MODEL_ID},
    finance::FinanceMonth,
    onboarding::NotificationTime,
    scam_quiz::QuizProgress,
    AuthService, Cohort, CompletionService, ContentFeedService, ContentKind, QuotaKind,
    SubscriptionTier, UsageCounter, UserProfile, Walkthrough,
};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::info;
use uuid::Uuid;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth: Arc<dyn AuthService>,
    pub completion: Arc<dyn CompletionService>,
    pub feed: Arc<dyn ContentFeedService>,
    pub sessions: SessionStore,
}

impl AppState {
    /// Wires the simulated adapters with the delays from `config`.
    pub fn simulated(config: Arc<Config>) -> Self {
        Self {
            auth: Arc::new(SimulatedAuthAdapter::new(
                config.auth_delay,
                config.social_auth_delay,
            )),
            completion: Arc::new(CannedCompletionAdapter::new(
                config.chat_delay_min,
                config.chat_delay_jitter,
            )),
            feed: Arc::new(StaticCatalogAdapter::new()),
            sessions: SessionStore::new(),
            config,
        }
    }
}

//=========================================================================================
// UserSession (Specific to One Logged-In User)
//=========================================================================================

/// A walkthrough opened on one learning card, with the card's step texts.
#[derive(Debug, Clone)]
pub struct OpenWalkthrough {
    pub title: String,
    pub steps: Vec<String>,
    pub machine: Walkthrough,
}

/// Everything the service remembers about one signed-in user.
pub struct UserSession {
    pub id: String,
    pub profile: UserProfile,
    pub tier: SubscriptionTier,
    pub easy_mode: bool,
    pub needs_onboarding: bool,
    pub goals: Vec<&'static str>,
    pub notification_time: NotificationTime,
    pub selected_model: &'static str,
    pub chat: ChatTranscript,
    pub chat_usage: UsageCounter,
    pub insight_usage: UsageCounter,
    /// Bookmarked item ids, per view.
    pub saved: HashMap<ContentKind, BTreeSet<String>>,
    pub enrolled_courses: BTreeSet<String>,
    /// Keyed by learning card id.
    pub walkthroughs: HashMap<String, OpenWalkthrough>,
    pub quiz: QuizProgress,
    /// Loaded from the feed port on first use, then updated by quick entries.
    pub finance: Option<FinanceMonth>,
}

impl UserSession {
    pub fn new(
        id: String,
        profile: UserProfile,
        needs_onboarding: bool,
        now: DateTime<Utc>,
    ) -> Self {
        let today = now.date_naive();
        let greeting_model = find_model(DEFAULT_MODEL_ID).map(|m| m.name.to_string());
        Self {
            id,
            profile,
            tier: SubscriptionTier::default(),
            easy_mode: false,
            needs_onboarding,
            goals: Vec::new(),
            notification_time: NotificationTime::default(),
            selected_model: DEFAULT_MODEL_ID,
            chat: ChatTranscript::new(greeting_model, now),
            chat_usage: UsageCounter::new(QuotaKind::ChatMessage, today),
            insight_usage: UsageCounter::new(QuotaKind::InsightView, today),
            saved: HashMap::new(),
            enrolled_courses: BTreeSet::new(),
            walkthroughs: HashMap::new(),
            quiz: QuizProgress::new(),
            finance: None,
        }
    }

    pub fn cohort(&self) -> Cohort {
        classify(&self.profile)
    }

    pub fn is_saved(&self, kind: ContentKind, id: &str) -> bool {
        self.saved.get(&kind).is_some_and(|ids| ids.contains(id))
    }

    /// Flips the bookmark on an item and returns whether it is now saved.
    pub fn toggle_saved(&mut self, kind: ContentKind, id: &str) -> bool {
        let ids = self.saved.entry(kind).or_default();
        if ids.remove(id) {
            false
        } else {
            ids.insert(id.to_string());
            true
        }
    }
}

pub type SessionHandle = Arc<Mutex<UserSession>>;

/// The current UTC day, used for the daily quota rollover.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

//=========================================================================================
// SessionStore
//=========================================================================================

struct StoredSession {
    handle: SessionHandle,
    expires_at: DateTime<Utc>,
}

/// In-memory sessions keyed by the value of the `session` cookie.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, StoredSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session for a freshly authenticated user, dropping any
    /// sessions that have expired in the meantime.
    pub async fn create(
        &self,
        profile: UserProfile,
        needs_onboarding: bool,
        ttl: Duration,
    ) -> (String, SessionHandle) {
        let now = Utc::now();
        let id = Uuid::new_v4().to_string();
        let session = UserSession::new(id.clone(), profile, needs_onboarding, now);
        let handle = Arc::new(Mutex::new(session));

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, stored| stored.expires_at > now);
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!("Evicted {} expired sessions", evicted);
        }
        sessions.insert(
            id.clone(),
            StoredSession {
                handle: handle.clone(),
                expires_at: now + ttl,
            },
        );
        info!("Session {} created", id);
        (id, handle)
    }

    /// Looks up a live session, evicting it if it has expired.
    pub async fn get(&self, id: &str) -> Option<SessionHandle> {
        let (handle, expires_at) = {
            let sessions = self.sessions.read().await;
            let stored = sessions.get(id)?;
            (stored.handle.clone(), stored.expires_at)
        };
        if expires_at <= Utc::now() {
            self.sessions.write().await.remove(id);
            info!("Session {} expired", id);
            return None;
        }
        Some(handle)
    }

    pub async fn remove(&self, id: &str) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            info!("Session {} closed", id);
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
