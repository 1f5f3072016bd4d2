//! crates/baeumteo_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any web framework or serialization format;
//! the string forms used on the wire are exposed through `as_str` / `FromStr`.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

//=========================================================================================
// Cohorts and Tiers
//=========================================================================================

/// One of the four fixed age bands used to personalize content and UI density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Cohort {
    Forties,
    Fifties,
    Sixties,
    Seventies,
}

impl Cohort {
    pub const ALL: [Cohort; 4] = [
        Cohort::Forties,
        Cohort::Fifties,
        Cohort::Sixties,
        Cohort::Seventies,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Cohort::Forties => "40s",
            Cohort::Fifties => "50s",
            Cohort::Sixties => "60s",
            Cohort::Seventies => "70s",
        }
    }

    /// The Korean label shown next to community posts ("60대").
    pub fn korean_label(self) -> &'static str {
        match self {
            Cohort::Forties => "40대",
            Cohort::Fifties => "50대",
            Cohort::Sixties => "60대",
            Cohort::Seventies => "70대",
        }
    }

    fn bit(self) -> u8 {
        match self {
            Cohort::Forties => 0b0001,
            Cohort::Fifties => 0b0010,
            Cohort::Sixties => 0b0100,
            Cohort::Seventies => 0b1000,
        }
    }
}

impl fmt::Display for Cohort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name one of the enumerated values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind}: '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl FromStr for Cohort {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "40s" => Ok(Cohort::Forties),
            "50s" => Ok(Cohort::Fifties),
            "60s" => Ok(Cohort::Sixties),
            "70s" => Ok(Cohort::Seventies),
            other => Err(ParseEnumError::new("cohort", other)),
        }
    }
}

/// A subset of the four cohorts, i.e. which bands a piece of content applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CohortSet(u8);

impl CohortSet {
    pub const EMPTY: CohortSet = CohortSet(0);
    pub const ALL: CohortSet = CohortSet(0b1111);

    pub fn of(cohorts: &[Cohort]) -> Self {
        Self(cohorts.iter().fold(0, |acc, c| acc | c.bit()))
    }

    pub fn contains(self, cohort: Cohort) -> bool {
        self.0 & cohort.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Cohort> {
        Cohort::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

/// Subscription level, totally ordered by entitlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum SubscriptionTier {
    #[default]
    Free,
    Pro,
    Premium,
}

impl SubscriptionTier {
    pub const ALL: [SubscriptionTier; 3] = [
        SubscriptionTier::Free,
        SubscriptionTier::Pro,
        SubscriptionTier::Premium,
    ];

    pub fn rank(self) -> u8 {
        match self {
            SubscriptionTier::Free => 0,
            SubscriptionTier::Pro => 1,
            SubscriptionTier::Premium => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SubscriptionTier::Free => "free",
            SubscriptionTier::Pro => "pro",
            SubscriptionTier::Premium => "premium",
        }
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionTier {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(SubscriptionTier::Free),
            "pro" => Ok(SubscriptionTier::Pro),
            "premium" => Ok(SubscriptionTier::Premium),
            _ => Err(ParseEnumError::new("subscription tier", s)),
        }
    }
}

//=========================================================================================
// Users
//=========================================================================================

/// External identity providers supported by social login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthProvider {
    Google,
    Naver,
    Kakao,
}

impl AuthProvider {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthProvider::Google => "google",
            AuthProvider::Naver => "naver",
            AuthProvider::Kakao => "kakao",
        }
    }
}

impl FromStr for AuthProvider {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(AuthProvider::Google),
            "naver" => Ok(AuthProvider::Naver),
            "kakao" => Ok(AuthProvider::Kakao),
            _ => Err(ParseEnumError::new("auth provider", s)),
        }
    }
}

// Represents a user for the lifetime of one login session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub email: String,
    pub display_name: String,
    pub phone: Option<String>,
    pub cohort: Option<Cohort>,
    pub auth_provider: Option<AuthProvider>,
}

//=========================================================================================
// Content
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Insight,
    LearningCard,
    Job,
    Course,
    Post,
    Event,
    ScamTip,
    Faq,
}

impl ContentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Insight => "insight",
            ContentKind::LearningCard => "card",
            ContentKind::Job => "job",
            ContentKind::Course => "course",
            ContentKind::Post => "post",
            ContentKind::Event => "event",
            ContentKind::ScamTip => "scam_tip",
            ContentKind::Faq => "faq",
        }
    }
}

impl FromStr for ContentKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "insight" | "insights" => Ok(ContentKind::Insight),
            "card" | "cards" => Ok(ContentKind::LearningCard),
            "job" | "jobs" => Ok(ContentKind::Job),
            "course" | "courses" => Ok(ContentKind::Course),
            "post" | "posts" => Ok(ContentKind::Post),
            "event" | "events" => Ok(ContentKind::Event),
            "scam_tip" | "scam_tips" => Ok(ContentKind::ScamTip),
            "faq" | "faqs" => Ok(ContentKind::Faq),
            _ => Err(ParseEnumError::new("content kind", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FraudRisk {
    Low,
    Medium,
    High,
}

impl FraudRisk {
    pub fn as_str(self) -> &'static str {
        match self {
            FraudRisk::Low => "low",
            FraudRisk::Medium => "medium",
            FraudRisk::High => "high",
        }
    }
}

/// Fields that only exist on one kind of content.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentDetails {
    Insight {
        topic: String,
        read_time: String,
        published: String,
        source: String,
        url: String,
    },
    LearningCard {
        difficulty: Difficulty,
        duration: String,
        key_points: Vec<String>,
        steps: Vec<String>,
        source: String,
        warning: Option<String>,
        fraud_risk: Option<FraudRisk>,
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
        difficulty: Difficulty,
        progress: u8,
        downloaded: bool,
        required_tier: SubscriptionTier,
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
    },
    /// A scam type: how it approaches people and how to avoid it.
    ScamTip {
        risk: FraudRisk,
        examples: Vec<String>,
        prevention: Vec<String>,
    },
    /// The answer lives in the item's summary.
    Faq,
}

/// Any static mock record shown in a feed.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    /// Unique within its collection only.
    pub id: String,
    pub kind: ContentKind,
    pub title: String,
    pub summary: String,
    pub category: String,
    pub tags: Vec<String>,
    pub cohorts: CohortSet,
    pub details: ContentDetails,
}

impl ContentItem {
    /// Steps of a learning card; empty for every other kind.
    pub fn steps(&self) -> &[String] {
        match &self.details {
            ContentDetails::LearningCard { steps, .. } => steps,
            _ => &[],
        }
    }

    /// The tier needed to act on this item (only courses are gated).
    pub fn required_tier(&self) -> SubscriptionTier {
        match &self.details {
            ContentDetails::Course { required_tier, .. } => *required_tier,
            _ => SubscriptionTier::Free,
        }
    }
}

//=========================================================================================
// Chat
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// A single message within a chat session.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: ChatRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub model_name: Option<String>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: ChatRole::User,
            text: text.into(),
            timestamp,
            model_name: None,
        }
    }

    pub fn assistant(
        text: impl Into<String>,
        model_name: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: ChatRole::Assistant,
            text: text.into(),
            timestamp,
            model_name,
        }
    }
}

/// An AI model a user may chat with, gated by tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiModel {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub required_tier: SubscriptionTier,
}
