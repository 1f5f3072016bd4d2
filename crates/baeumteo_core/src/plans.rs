//! crates/baeumteo_core/src/plans.rs
//!
//! The subscription plan table shown on the pricing page.

use crate::domain::{ParseEnumError, SubscriptionTier};
use crate::entitlement::{daily_limit, Quota, QuotaKind};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingCycle {
    Monthly,
    Yearly,
}

impl BillingCycle {
    pub fn as_str(self) -> &'static str {
        match self {
            BillingCycle::Monthly => "monthly",
            BillingCycle::Yearly => "yearly",
        }
    }
}

impl FromStr for BillingCycle {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(BillingCycle::Monthly),
            "yearly" => Ok(BillingCycle::Yearly),
            _ => Err(ParseEnumError::new("billing cycle", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub tier: SubscriptionTier,
    pub name: &'static str,
    /// Prices in KRW.
    pub monthly_price: u32,
    pub yearly_price: u32,
    pub popular: bool,
    pub features: &'static [&'static str],
    pub support: &'static str,
    pub offline_courses: &'static str,
}

impl Plan {
    pub fn price(&self, cycle: BillingCycle) -> u32 {
        match cycle {
            BillingCycle::Monthly => self.monthly_price,
            BillingCycle::Yearly => self.yearly_price,
        }
    }

    /// Whole-percent saving of yearly billing against twelve monthly payments.
    pub fn yearly_discount_percent(&self) -> u32 {
        if self.monthly_price == 0 {
            return 0;
        }
        let yearly_equivalent = f64::from(self.monthly_price) * 12.0;
        let savings = yearly_equivalent - f64::from(self.yearly_price);
        (savings / yearly_equivalent * 100.0).round().max(0.0) as u32
    }

    pub fn chat_limit(&self) -> Quota {
        daily_limit(QuotaKind::ChatMessage, self.tier)
    }

    pub fn insight_limit(&self) -> Quota {
        daily_limit(QuotaKind::InsightView, self.tier)
    }
}

/// "무료" for zero, otherwise the amount with thousands separators and "원".
pub fn format_price(price: u32) -> String {
    if price == 0 {
        return "무료".to_string();
    }
    let digits = price.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push('원');
    out
}

pub static PLANS: [Plan; 3] = [
    Plan {
        tier: SubscriptionTier::Free,
        name: "무료",
        monthly_price: 0,
        yearly_price: 0,
        popular: false,
        features: &[
            "AI 모델 하루 10회 사용",
            "AI 인사이트 하루 5개",
            "기본 학습 카드",
            "커뮤니티 이용",
            "사기 예방 알림",
        ],
        support: "커뮤니티",
        offline_courses: "기본",
    },
    Plan {
        tier: SubscriptionTier::Pro,
        name: "프로",
        monthly_price: 9_900,
        yearly_price: 99_000,
        popular: true,
        features: &[
            "AI 모델 하루 100회 사용",
            "AI 인사이트 하루 50개",
            "모든 학습 카드",
            "전화 상담 월 3회",
            "오프라인 강좌 할인 20%",
            "광고 없음",
            "우선 고객 지원",
        ],
        support: "전화 상담 3회/월",
        offline_courses: "20% 할인",
    },
    Plan {
        tier: SubscriptionTier::Premium,
        name: "프리미엄",
        monthly_price: 29_900,
        yearly_price: 299_000,
        popular: false,
        features: &[
            "모든 AI 모델 무제한 사용",
            "AI 인사이트 무제한",
            "모든 학습 카드 + 프리미엄 콘텐츠",
            "전화 상담 무제한",
            "1:1 맞춤 학습 코칭",
            "오프라인 강좌 우선 예약 + 무료",
            "가족 계정 3개 추가",
            "광고 없음",
            "VIP 고객 지원",
        ],
        support: "무제한 전화 + 1:1 코칭",
        offline_courses: "무료 + 우선 예약",
    },
];

pub fn plan_for(tier: SubscriptionTier) -> &'static Plan {
    match tier {
        SubscriptionTier::Free => &PLANS[0],
        SubscriptionTier::Pro => &PLANS[1],
        SubscriptionTier::Premium => &PLANS[2],
    }
}
