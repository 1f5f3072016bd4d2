//! services/api/src/adapters/auth.rs
//!
//! An adapter that implements the `AuthService` port without a real identity
//! backend. Every call waits for a configured delay and then succeeds.

use async_trait::async_trait;
use baeumteo_core::{
    domain::{AuthProvider, UserProfile},
    ports::{AuthService, PortResult},
    validation::{LoginForm, SignupForm},
};
use std::time::Duration;
use tracing::info;

/// Display name given to accounts that log in without one on file.
const DEFAULT_DISPLAY_NAME: &str = "사용자";

#[derive(Clone)]
pub struct SimulatedAuthAdapter {
    delay: Duration,
    social_delay: Duration,
}

impl SimulatedAuthAdapter {
    pub fn new(delay: Duration, social_delay: Duration) -> Self {
        Self {
            delay,
            social_delay,
        }
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[async_trait]
impl AuthService for SimulatedAuthAdapter {
    async fn login(&self, form: &LoginForm) -> PortResult<UserProfile> {
        pause(self.delay).await;
        info!("Simulated login for {}", form.email);
        Ok(UserProfile {
            email: form.email.trim().to_string(),
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
            phone: None,
            cohort: None,
            auth_provider: None,
        })
    }

    async fn signup(&self, form: &SignupForm) -> PortResult<UserProfile> {
        pause(self.delay).await;
        info!("Simulated signup for {}", form.email);
        Ok(UserProfile {
            email: form.email.trim().to_string(),
            display_name: form.display_name.trim().to_string(),
            phone: form
                .phone
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
            cohort: None,
            auth_provider: None,
        })
    }

    async fn social_login(&self, provider: AuthProvider) -> PortResult<UserProfile> {
        pause(self.social_delay).await;
        info!("Simulated {} social login", provider.as_str());
        Ok(UserProfile {
            email: format!("user@{}.com", provider.as_str()),
            display_name: format!("{} 사용자", provider.as_str()),
            phone: None,
            cohort: None,
            auth_provider: Some(provider),
        })
    }
}
