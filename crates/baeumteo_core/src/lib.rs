pub mod chat;
pub mod cohort;
pub mod domain;
pub mod entitlement;
pub mod filter;
pub mod finance;
pub mod onboarding;
pub mod plans;
pub mod ports;
pub mod scam_quiz;
pub mod validation;
pub mod walkthrough;

pub use domain::{
    AiModel, AuthProvider, ChatMessage, ChatRole, Cohort, CohortSet, ContentDetails, ContentItem,
    ContentKind, Difficulty, FraudRisk, SubscriptionTier, UserProfile,
};
pub use entitlement::{can_access, remaining_quota, EntitlementError, Quota, QuotaKind, UsageCounter};
pub use ports::{AuthService, CompletionService, ContentFeedService, PortError, PortResult};
pub use validation::ValidationError;
pub use walkthrough::{Walkthrough, WalkthroughState};
