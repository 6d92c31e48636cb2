//! `SessionApi`: the interface views depend on instead of the concrete
//! gateway, so pages can be exercised against fakes.

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::watch;

use crate::gateway::{AuthState, SessionGateway};
use crate::oauth::OAuthCallback;
use crate::outcome::Outcome;
use crate::types::{Activity, DashboardStats, UserProfile};

/// Operations and reactive state exposed by the session gateway.
///
/// Error semantics are not uniform: `dashboard_stats` never fails, every
/// other operation reports failures as `Outcome::Failure`.
#[async_trait]
pub trait SessionApi: Send + Sync {
    /// Snapshot of token/loading/error state.
    fn auth_state(&self) -> AuthState;

    /// Receiver notified on every auth state change.
    fn subscribe(&self) -> watch::Receiver<AuthState>;

    fn is_authenticated(&self) -> bool {
        self.auth_state().is_authenticated()
    }

    fn is_loading(&self) -> bool {
        self.auth_state().is_loading
    }

    fn error(&self) -> Option<String> {
        self.auth_state().error
    }

    async fn login(&self, email: &str, password: &str) -> Outcome;
    async fn register(&self, email: &str, password: &str) -> Outcome;
    async fn login_with_google(&self, oauth_token: &str) -> Outcome;
    async fn login_with_github(&self, oauth_code: &str) -> Outcome;
    async fn complete_oauth(&self, callback: &OAuthCallback) -> Outcome;
    fn logout(&self);

    async fn get_profile(&self) -> Outcome<UserProfile>;
    async fn update_profile(&self, email: &str) -> Outcome;
    async fn update_password(&self, current_password: &str, new_password: &str) -> Outcome;
    async fn delete_account(&self) -> Outcome;

    async fn analyze_trends(&self, topic: &str) -> Outcome<Value>;
    async fn analyze_opinion(&self, topic: &str) -> Outcome<Value>;
    async fn build_skill_path(&self, skill: &str) -> Outcome<Value>;

    async fn dashboard_stats(&self) -> Outcome<DashboardStats>;
    async fn recent_activities(&self, limit: Option<u32>) -> Outcome<Vec<Activity>>;
}

#[async_trait]
impl SessionApi for SessionGateway {
    fn auth_state(&self) -> AuthState {
        SessionGateway::auth_state(self)
    }

    fn subscribe(&self) -> watch::Receiver<AuthState> {
        SessionGateway::subscribe(self)
    }

    async fn login(&self, email: &str, password: &str) -> Outcome {
        SessionGateway::login(self, email, password).await
    }

    async fn register(&self, email: &str, password: &str) -> Outcome {
        SessionGateway::register(self, email, password).await
    }

    async fn login_with_google(&self, oauth_token: &str) -> Outcome {
        SessionGateway::login_with_google(self, oauth_token).await
    }

    async fn login_with_github(&self, oauth_code: &str) -> Outcome {
        SessionGateway::login_with_github(self, oauth_code).await
    }

    async fn complete_oauth(&self, callback: &OAuthCallback) -> Outcome {
        SessionGateway::complete_oauth(self, callback).await
    }

    fn logout(&self) {
        SessionGateway::logout(self);
    }

    async fn get_profile(&self) -> Outcome<UserProfile> {
        SessionGateway::get_profile(self).await
    }

    async fn update_profile(&self, email: &str) -> Outcome {
        SessionGateway::update_profile(self, email).await
    }

    async fn update_password(&self, current_password: &str, new_password: &str) -> Outcome {
        SessionGateway::update_password(self, current_password, new_password).await
    }

    async fn delete_account(&self) -> Outcome {
        SessionGateway::delete_account(self).await
    }

    async fn analyze_trends(&self, topic: &str) -> Outcome<Value> {
        SessionGateway::analyze_trends(self, topic).await
    }

    async fn analyze_opinion(&self, topic: &str) -> Outcome<Value> {
        SessionGateway::analyze_opinion(self, topic).await
    }

    async fn build_skill_path(&self, skill: &str) -> Outcome<Value> {
        SessionGateway::build_skill_path(self, skill).await
    }

    async fn dashboard_stats(&self) -> Outcome<DashboardStats> {
        SessionGateway::dashboard_stats(self).await
    }

    async fn recent_activities(&self, limit: Option<u32>) -> Outcome<Vec<Activity>> {
        SessionGateway::recent_activities(self, limit).await
    }
}
