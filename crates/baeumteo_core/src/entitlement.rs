//! crates/baeumteo_core/src/entitlement.rs
//!
//! Tier-vs-required-tier access decisions, daily quotas and the model catalog.

use crate::domain::{AiModel, SubscriptionTier};
use chrono::NaiveDate;
use std::fmt;

//=========================================================================================
// Access and Quotas
//=========================================================================================

/// True iff `user_tier` ranks at or above `required_tier`.
pub fn can_access(user_tier: SubscriptionTier, required_tier: SubscriptionTier) -> bool {
    user_tier.rank() >= required_tier.rank()
}

/// A daily allowance, either a fixed count or unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quota {
    Limited(u32),
    Unbounded,
}

impl Quota {
    pub fn allows_another(self) -> bool {
        match self {
            Quota::Limited(remaining) => remaining > 0,
            Quota::Unbounded => true,
        }
    }

    pub fn as_option(self) -> Option<u32> {
        match self {
            Quota::Limited(n) => Some(n),
            Quota::Unbounded => None,
        }
    }
}

impl fmt::Display for Quota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quota::Limited(n) => write!(f, "{n}"),
            Quota::Unbounded => f.write_str("unlimited"),
        }
    }
}

/// The tier-limited actions that draw from a daily counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuotaKind {
    ChatMessage,
    InsightView,
}

impl QuotaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            QuotaKind::ChatMessage => "chat_message",
            QuotaKind::InsightView => "insight_view",
        }
    }
}

pub fn daily_limit(kind: QuotaKind, tier: SubscriptionTier) -> Quota {
    match (kind, tier) {
        (QuotaKind::ChatMessage, SubscriptionTier::Free) => Quota::Limited(10),
        (QuotaKind::ChatMessage, SubscriptionTier::Pro) => Quota::Limited(100),
        (QuotaKind::InsightView, SubscriptionTier::Free) => Quota::Limited(5),
        (QuotaKind::InsightView, SubscriptionTier::Pro) => Quota::Limited(50),
        (_, SubscriptionTier::Premium) => Quota::Unbounded,
    }
}

/// Chat messages left today for `tier` after `used_today` sends.
pub fn remaining_quota(tier: SubscriptionTier, used_today: u32) -> Quota {
    remaining_for(QuotaKind::ChatMessage, tier, used_today)
}

pub fn remaining_for(kind: QuotaKind, tier: SubscriptionTier, used_today: u32) -> Quota {
    match daily_limit(kind, tier) {
        Quota::Limited(limit) => Quota::Limited(limit.saturating_sub(used_today)),
        Quota::Unbounded => Quota::Unbounded,
    }
}

/// The cheapest tier at which `kind` would still be usable after `used_today` actions.
fn upgrade_for_quota(kind: QuotaKind, used_today: u32) -> Option<SubscriptionTier> {
    SubscriptionTier::ALL
        .into_iter()
        .find(|tier| remaining_for(kind, *tier, used_today).allows_another())
}

//=========================================================================================
// Errors
//=========================================================================================

/// A refused action. Recoverable only by waiting for the daily reset or upgrading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntitlementError {
    #[error("This feature requires the {required} plan (current plan: {current})")]
    TierRequired {
        required: SubscriptionTier,
        current: SubscriptionTier,
    },
    #[error("Daily {} limit of {limit} reached", .kind.as_str())]
    QuotaExhausted {
        kind: QuotaKind,
        limit: u32,
        upgrade_to: Option<SubscriptionTier>,
    },
    #[error("Unknown AI model: {0}")]
    UnknownModel(String),
}

impl EntitlementError {
    /// The plan that would lift this block, if any.
    pub fn upgrade_to(&self) -> Option<SubscriptionTier> {
        match self {
            EntitlementError::TierRequired { required, .. } => Some(*required),
            EntitlementError::QuotaExhausted { upgrade_to, .. } => *upgrade_to,
            EntitlementError::UnknownModel(_) => None,
        }
    }
}

pub fn require_tier(
    user_tier: SubscriptionTier,
    required_tier: SubscriptionTier,
) -> Result<(), EntitlementError> {
    if can_access(user_tier, required_tier) {
        Ok(())
    } else {
        Err(EntitlementError::TierRequired {
            required: required_tier,
            current: user_tier,
        })
    }
}

//=========================================================================================
// Usage Counter
//=========================================================================================

/// Counts gated actions of one kind for the current UTC day.
///
/// The counter rolls over lazily: any read or write against a later day
/// starts again from zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageCounter {
    kind: QuotaKind,
    used_today: u32,
    day: NaiveDate,
}

impl UsageCounter {
    pub fn new(kind: QuotaKind, today: NaiveDate) -> Self {
        Self::with_usage(kind, today, 0)
    }

    pub fn with_usage(kind: QuotaKind, today: NaiveDate, used_today: u32) -> Self {
        Self {
            kind,
            used_today,
            day: today,
        }
    }

    pub fn kind(&self) -> QuotaKind {
        self.kind
    }

    fn roll_over(&mut self, today: NaiveDate) {
        if today > self.day {
            self.day = today;
            self.used_today = 0;
        }
    }

    pub fn used(&mut self, today: NaiveDate) -> u32 {
        self.roll_over(today);
        self.used_today
    }

    pub fn remaining(&mut self, tier: SubscriptionTier, today: NaiveDate) -> Quota {
        self.roll_over(today);
        remaining_for(self.kind, tier, self.used_today)
    }

    /// Caps today's count at `tier`'s finite limit, used when the plan changes.
    pub fn clamp_to(&mut self, tier: SubscriptionTier, today: NaiveDate) {
        self.roll_over(today);
        if let Quota::Limited(limit) = daily_limit(self.kind, tier) {
            self.used_today = self.used_today.min(limit);
        }
    }

    /// Records one action, or refuses it without incrementing once the limit is reached.
    pub fn try_consume(
        &mut self,
        tier: SubscriptionTier,
        today: NaiveDate,
    ) -> Result<Quota, EntitlementError> {
        self.roll_over(today);
        match daily_limit(self.kind, tier) {
            Quota::Unbounded => {
                self.used_today = self.used_today.saturating_add(1);
                Ok(Quota::Unbounded)
            }
            Quota::Limited(limit) => {
                if self.used_today >= limit {
                    return Err(EntitlementError::QuotaExhausted {
                        kind: self.kind,
                        limit,
                        upgrade_to: upgrade_for_quota(self.kind, self.used_today),
                    });
                }
                self.used_today += 1;
                Ok(Quota::Limited(limit - self.used_today))
            }
        }
    }
}

//=========================================================================================
// Model Catalog
//=========================================================================================

pub static AI_MODELS: [AiModel; 4] = [
    AiModel {
        id: "gpt-4",
        name: "GPT-4",
        description: "가장 강력한 범용 AI",
        required_tier: SubscriptionTier::Free,
    },
    AiModel {
        id: "gpt-4-turbo",
        name: "GPT-4 Turbo",
        description: "더 빠르고 긴 대화 가능",
        required_tier: SubscriptionTier::Pro,
    },
    AiModel {
        id: "claude-3",
        name: "Claude 3",
        description: "자연스러운 대화에 특화",
        required_tier: SubscriptionTier::Pro,
    },
    AiModel {
        id: "gemini-pro",
        name: "Gemini Pro",
        description: "Google의 최신 AI",
        required_tier: SubscriptionTier::Premium,
    },
];

pub const DEFAULT_MODEL_ID: &str = "gpt-4";

pub fn find_model(model_id: &str) -> Option<&'static AiModel> {
    AI_MODELS.iter().find(|m| m.id == model_id)
}

/// Resolves a model and checks that the tier may select it.
pub fn select_model(
    user_tier: SubscriptionTier,
    model_id: &str,
) -> Result<&'static AiModel, EntitlementError> {
    let model =
        find_model(model_id).ok_or_else(|| EntitlementError::UnknownModel(model_id.to_string()))?;
    require_tier(user_tier, model.required_tier)?;
    Ok(model)
}

/// Gate for sending one chat message: model selection first, then quota.
pub fn authorize_chat(
    user_tier: SubscriptionTier,
    model_id: &str,
    counter: &mut UsageCounter,
    today: NaiveDate,
) -> Result<&'static AiModel, EntitlementError> {
    let model = select_model(user_tier, model_id)?;
    counter.try_consume(user_tier, today)?;
    Ok(model)
}
