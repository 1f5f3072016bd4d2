//! crates/baeumteo_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's external collaborators.
//! These traits form the boundary of the hexagonal architecture: the rule-set in this
//! crate never knows whether auth, chat completions or the content feed are real
//! services or simulated ones.

use crate::domain::{AiModel, AuthProvider, ChatMessage, ContentItem, ContentKind, UserProfile};
use crate::finance::FinanceMonth;
use crate::validation::{LoginForm, SignupForm};
use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    #[error("Unauthorized")]
    Unauthorized,
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Authenticates an email/password pair. The form has already been validated.
    async fn login(&self, form: &LoginForm) -> PortResult<UserProfile>;

    /// Registers a new account and returns its profile.
    async fn signup(&self, form: &SignupForm) -> PortResult<UserProfile>;

    async fn social_login(&self, provider: AuthProvider) -> PortResult<UserProfile>;
}

#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Produces the assistant's reply to the last user message in `history`.
    async fn complete(&self, model: &AiModel, history: &[ChatMessage]) -> PortResult<String>;
}

#[async_trait]
pub trait ContentFeedService: Send + Sync {
    async fn fetch(&self, kind: ContentKind) -> PortResult<Vec<ContentItem>>;

    async fn fetch_insights(&self) -> PortResult<Vec<ContentItem>> {
        self.fetch(ContentKind::Insight).await
    }

    async fn fetch_learning_cards(&self) -> PortResult<Vec<ContentItem>> {
        self.fetch(ContentKind::LearningCard).await
    }

    async fn fetch_jobs(&self) -> PortResult<Vec<ContentItem>> {
        self.fetch(ContentKind::Job).await
    }

    async fn fetch_courses(&self) -> PortResult<Vec<ContentItem>> {
        self.fetch(ContentKind::Course).await
    }

    async fn fetch_posts(&self) -> PortResult<Vec<ContentItem>> {
        self.fetch(ContentKind::Post).await
    }

    async fn fetch_events(&self) -> PortResult<Vec<ContentItem>> {
        self.fetch(ContentKind::Event).await
    }

    async fn fetch_scam_tips(&self) -> PortResult<Vec<ContentItem>> {
        self.fetch(ContentKind::ScamTip).await
    }

    async fn fetch_faqs(&self) -> PortResult<Vec<ContentItem>> {
        self.fetch(ContentKind::Faq).await
    }

    /// The current month of the household ledger, before any quick entries.
    async fn fetch_finance_month(&self) -> PortResult<FinanceMonth>;

    /// Looks up one item by its id within a collection.
    async fn find(&self, kind: ContentKind, id: &str) -> PortResult<ContentItem> {
        self.fetch(kind)
            .await?
            .into_iter()
            .find(|item| item.id == id)
            .ok_or_else(|| PortError::NotFound(format!("{} {}", kind.as_str(), id)))
    }
}
