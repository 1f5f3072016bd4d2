//! crates/baeumteo_core/src/walkthrough.rs
//!
//! The guided "Try it now" walkthrough over a learning card's steps.

/// Where the user is in a walkthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkthroughState {
    InStep(usize),
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WalkthroughError {
    #[error("A walkthrough needs at least one step")]
    NoSteps,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walkthrough {
    step_count: usize,
    state: WalkthroughState,
    notes: String,
    voice_enabled: bool,
}

impl Walkthrough {
    pub fn new(step_count: usize) -> Result<Self, WalkthroughError> {
        if step_count == 0 {
            return Err(WalkthroughError::NoSteps);
        }
        Ok(Self {
            step_count,
            state: WalkthroughState::InStep(0),
            notes: String::new(),
            voice_enabled: true,
        })
    }

    pub fn state(&self) -> WalkthroughState {
        self.state
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn voice_enabled(&self) -> bool {
        self.voice_enabled
    }

    pub fn is_completed(&self) -> bool {
        self.state == WalkthroughState::Completed
    }

    pub fn next(&mut self) -> WalkthroughState {
        if let WalkthroughState::InStep(i) = self.state {
            self.state = if i + 1 < self.step_count {
                WalkthroughState::InStep(i + 1)
            } else {
                WalkthroughState::Completed
            };
        }
        self.state
    }

    pub fn previous(&mut self) -> WalkthroughState {
        if let WalkthroughState::InStep(i) = self.state {
            if i > 0 {
                self.state = WalkthroughState::InStep(i - 1);
            }
        }
        self.state
    }

    /// Back to the first step with the practice notes cleared.
    pub fn reset(&mut self) -> WalkthroughState {
        self.state = WalkthroughState::InStep(0);
        self.notes.clear();
        self.state
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    pub fn toggle_voice(&mut self) -> bool {
        self.voice_enabled = !self.voice_enabled;
        self.voice_enabled
    }

    /// Progress through the steps, 100 once completed.
    pub fn progress_percent(&self) -> u8 {
        match self.state {
            WalkthroughState::InStep(i) => (((i + 1) * 100) / self.step_count) as u8,
            WalkthroughState::Completed => 100,
        }
    }
}
