//! crates/baeumteo_core/src/onboarding.rs
//!
//! First-run questionnaire: learning goals, age band and reminder time.

use crate::cohort::DEFAULT_COHORT;
use crate::domain::{Cohort, CohortSet, ParseEnumError};
use crate::validation::ValidationError;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goal {
    pub id: &'static str,
    pub label: &'static str,
    pub target: CohortSet,
}

pub fn goals() -> [Goal; 6] {
    use Cohort::*;
    [
        Goal {
            id: "work",
            label: "AI로 업무 효율 높이기",
            target: CohortSet::of(&[Forties, Fifties]),
        },
        Goal {
            id: "life",
            label: "일상에서 AI 활용하기",
            target: CohortSet::ALL,
        },
        Goal {
            id: "security",
            label: "사기 예방하기",
            target: CohortSet::of(&[Fifties, Sixties, Seventies]),
        },
        Goal {
            id: "job",
            label: "재취업·창업 준비",
            target: CohortSet::of(&[Fifties, Sixties]),
        },
        Goal {
            id: "finance",
            label: "재무 관리하기",
            target: CohortSet::of(&[Forties, Fifties]),
        },
        Goal {
            id: "health",
            label: "건강 관리하기",
            target: CohortSet::of(&[Sixties, Seventies]),
        },
    ]
}

/// Goals whose target audience includes `cohort`, in catalog order.
pub fn suggested_goals(cohort: Cohort) -> Vec<Goal> {
    goals()
        .into_iter()
        .filter(|g| g.target.contains(cohort))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationTime {
    #[default]
    Morning,
    Afternoon,
    Evening,
    None,
}

impl NotificationTime {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationTime::Morning => "morning",
            NotificationTime::Afternoon => "afternoon",
            NotificationTime::Evening => "evening",
            NotificationTime::None => "none",
        }
    }
}

impl FromStr for NotificationTime {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "morning" => Ok(NotificationTime::Morning),
            "afternoon" => Ok(NotificationTime::Afternoon),
            "evening" => Ok(NotificationTime::Evening),
            "none" => Ok(NotificationTime::None),
            _ => Err(ParseEnumError {
                kind: "notification time",
                value: s.to_string(),
            }),
        }
    }
}

/// Raw answers as submitted by the client.
#[derive(Debug, Clone, Default)]
pub struct OnboardingAnswers {
    pub goals: Vec<String>,
    pub cohort: Option<String>,
    pub notification_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnboardingResult {
    pub goals: Vec<&'static str>,
    pub cohort: Cohort,
    pub notification_time: NotificationTime,
}

impl OnboardingAnswers {
    pub fn complete(&self) -> Result<OnboardingResult, ValidationError> {
        if self.goals.is_empty() {
            return Err(ValidationError::NoGoalsSelected);
        }
        let catalog = goals();
        let mut selected = Vec::with_capacity(self.goals.len());
        for requested in &self.goals {
            let goal = catalog
                .iter()
                .find(|g| g.id == requested.as_str())
                .ok_or_else(|| ValidationError::UnknownGoal(requested.clone()))?;
            if !selected.contains(&goal.id) {
                selected.push(goal.id);
            }
        }

        let cohort = match self.cohort.as_deref() {
            Some(raw) => raw.parse::<Cohort>()?,
            None => DEFAULT_COHORT,
        };
        let notification_time = match self.notification_time.as_deref() {
            Some(raw) => raw.parse::<NotificationTime>()?,
            None => NotificationTime::default(),
        };

        Ok(OnboardingResult {
            goals: selected,
            cohort,
            notification_time,
        })
    }
}
