//! crates/baeumteo_core/src/cohort.rs
//!
//! Maps a user profile to its age cohort and the cohort to UI density.

use crate::domain::{Cohort, UserProfile};

/// Cohort assumed for profiles that never chose one.
pub const DEFAULT_COHORT: Cohort = Cohort::Sixties;

/// Highest text-scale step; easy mode always lands here.
pub const MAX_TEXT_STEP: u8 = 3;

/// Returns the profile's explicit cohort, falling back to `60s`.
pub fn classify(profile: &UserProfile) -> Cohort {
    profile.cohort.unwrap_or(DEFAULT_COHORT)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Base,
    Large,
    ExtraLarge,
    DoubleExtraLarge,
}

impl TextSize {
    fn from_step(step: u8) -> Self {
        match step {
            0 => TextSize::Base,
            1 => TextSize::Large,
            2 => TextSize::ExtraLarge,
            _ => TextSize::DoubleExtraLarge,
        }
    }

    /// The utility class the web client applies for this size.
    pub fn css_class(self) -> &'static str {
        match self {
            TextSize::Base => "text-base",
            TextSize::Large => "text-lg",
            TextSize::ExtraLarge => "text-xl",
            TextSize::DoubleExtraLarge => "text-2xl",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonSize {
    Default,
    Large,
}

impl ButtonSize {
    pub fn as_str(self) -> &'static str {
        match self {
            ButtonSize::Default => "default",
            ButtonSize::Large => "lg",
        }
    }
}

/// Presentation defaults derived from the cohort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiDensity {
    pub text_step: u8,
    pub text_size: TextSize,
    pub button_size: ButtonSize,
    /// The stripped-down home screen with only the large call-to-action cards.
    pub simple_home: bool,
}

pub fn density(cohort: Cohort, easy_mode: bool) -> UiDensity {
    let base_step = match cohort {
        Cohort::Forties => 0,
        Cohort::Fifties => 1,
        Cohort::Sixties => 2,
        Cohort::Seventies => 3,
    };
    let text_step = if easy_mode { MAX_TEXT_STEP } else { base_step };

    let button_size = if easy_mode || matches!(cohort, Cohort::Sixties | Cohort::Seventies) {
        ButtonSize::Large
    } else {
        ButtonSize::Default
    };

    UiDensity {
        text_step,
        text_size: TextSize::from_step(text_step),
        button_size,
        simple_home: easy_mode && cohort == Cohort::Seventies,
    }
}
