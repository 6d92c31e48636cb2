//! Session gateway: bearer-token lifecycle plus typed backend requests.
//!
//! SYSTEM CONTEXT
//! ==============
//! Constructed once at startup and shared by reference (usually behind an
//! `Arc`). It is the only writer of the `auth_token` storage key and the
//! only place a bearer header is attached.
//!
//! STATE MACHINE
//! =============
//! `Anonymous` (no token) and `Authenticated` (token held). The initial
//! state is read synchronously from durable storage. Successful
//! login/OAuth exchanges move to `Authenticated`; `logout`, a successful
//! `delete_account`, or a 422 from `get_profile` move back to `Anonymous`.
//! Token validity is only discovered lazily through that 422.
//!
//! Every state change is published on a `watch` channel before the
//! operation's future resolves, so route guards observe it without polling.
//!
//! ERROR HANDLING
//! ==============
//! Helpers return `Result<_, GatewayError>`; each public operation converts
//! to `Outcome` once. `dashboard_stats` is the exception that degrades to
//! zeroed stats instead of failing, to keep the dashboard non-blocking.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::watch;

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::oauth::OAuthCallback;
use crate::outcome::Outcome;
use crate::storage::{AUTH_TOKEN_KEY, DurableStorage, REMEMBER_ME_KEY};
use crate::types::{
    Activity, CredentialsRequest, DashboardStats, ErrorBody, GithubCodeRequest, RecentActivities, SkillRequest,
    TokenResponse, TopicRequest, UpdatePasswordRequest, UpdateProfileRequest, UserProfile,
};

// =============================================================================
// AUTH STATE
// =============================================================================

/// Reactive auth state observed by views and route guards.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub token: Option<String>,
    /// True only while a credential-acquiring call is in flight.
    pub is_loading: bool,
    /// Last failure from a credential-acquiring call.
    pub error: Option<String>,
}

impl AuthState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

impl fmt::Debug for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthState")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("is_loading", &self.is_loading)
            .field("error", &self.error)
            .finish()
    }
}

// =============================================================================
// GATEWAY
// =============================================================================

pub struct SessionGateway {
    http: reqwest::Client,
    base_url: String,
    activity_limit: u32,
    storage: Arc<dyn DurableStorage>,
    state: watch::Sender<AuthState>,
}

impl SessionGateway {
    /// Build a gateway and resume any session left in `storage`.
    ///
    /// No network call is made; a stored token is trusted until the backend
    /// rejects it.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::HttpClientBuild`] if the HTTP client cannot be
    /// constructed.
    pub fn new(config: &GatewayConfig, storage: Arc<dyn DurableStorage>) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| GatewayError::HttpClientBuild(e.to_string()))?;

        let token = match storage.get(AUTH_TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "stored session unreadable; starting anonymous");
                None
            }
        };
        tracing::debug!(base_url = %config.base_url, resumed = token.is_some(), "session gateway initialized");

        let (state, _) = watch::channel(AuthState { token, ..AuthState::default() });
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            activity_limit: config.activity_limit.max(1),
            storage,
            state,
        })
    }

    // -------------------------------------------------------------------------
    // state accessors
    // -------------------------------------------------------------------------

    /// Snapshot of the current auth state.
    #[must_use]
    pub fn auth_state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every subsequent auth state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    // -------------------------------------------------------------------------
    // credential acquisition
    // -------------------------------------------------------------------------

    /// `POST /auth/login`. On success the token is persisted and held.
    pub async fn login(&self, email: &str, password: &str) -> Outcome {
        self.acquire("login", async {
            let request = self
                .request(Method::POST, "/auth/login")
                .json(&CredentialsRequest { email, password });
            let body = dispatch(request).await?.into_success("Login failed")?;
            token_from(body).map(Some)
        })
        .await
    }

    /// `POST /auth/register`. Registration never logs the user in.
    pub async fn register(&self, email: &str, password: &str) -> Outcome {
        self.acquire("register", async {
            let request = self
                .request(Method::POST, "/auth/register")
                .json(&CredentialsRequest { email, password });
            dispatch(request).await?.into_success("Registration failed")?;
            Ok::<_, GatewayError>(None)
        })
        .await
    }

    /// `POST /auth/google` with the Google access token as bearer.
    pub async fn login_with_google(&self, oauth_token: &str) -> Outcome {
        self.acquire("login_with_google", async {
            let request = self.request(Method::POST, "/auth/google").bearer_auth(oauth_token);
            let body = dispatch(request).await?.into_success("Google login failed")?;
            token_from(body).map(Some)
        })
        .await
    }

    /// `POST /auth/github` exchanging an authorization code.
    pub async fn login_with_github(&self, oauth_code: &str) -> Outcome {
        self.acquire("login_with_github", async {
            let request = self
                .request(Method::POST, "/auth/github")
                .json(&GithubCodeRequest { code: oauth_code });
            let body = dispatch(request).await?.into_success("GitHub login failed")?;
            token_from(body).map(Some)
        })
        .await
    }

    /// Exchange whichever credential came back on the OAuth redirect.
    pub async fn complete_oauth(&self, callback: &OAuthCallback) -> Outcome {
        match callback {
            OAuthCallback::GithubCode(code) => self.login_with_github(code).await,
            OAuthCallback::GoogleToken(token) => self.login_with_google(token).await,
        }
    }

    /// Drop the session. Idempotent and infallible.
    pub fn logout(&self) {
        self.clear_token("logout");
    }

    // -------------------------------------------------------------------------
    // account
    // -------------------------------------------------------------------------

    /// `GET /users/me`. A 422 clears the held token.
    pub async fn get_profile(&self) -> Outcome<UserProfile> {
        self.run("get_profile", async {
            let token = self.require_token()?;
            let reply = dispatch(self.request(Method::GET, "/users/me").bearer_auth(&token)).await?;
            if reply.status == StatusCode::UNPROCESSABLE_ENTITY {
                self.clear_token("session expired");
                return Err(GatewayError::SessionExpired);
            }
            decode::<UserProfile>(reply.into_success("Failed to fetch profile")?)
        })
        .await
    }

    /// `PUT /users/me`.
    pub async fn update_profile(&self, email: &str) -> Outcome {
        self.run("update_profile", async {
            let token = self.require_token()?;
            let request = self
                .request(Method::PUT, "/users/me")
                .bearer_auth(&token)
                .json(&UpdateProfileRequest { email });
            dispatch(request).await?.into_success("Failed to update profile")?;
            Ok::<_, GatewayError>(())
        })
        .await
    }

    /// `PUT /users/me/password`.
    pub async fn update_password(&self, current_password: &str, new_password: &str) -> Outcome {
        self.run("update_password", async {
            let token = self.require_token()?;
            let request = self
                .request(Method::PUT, "/users/me/password")
                .bearer_auth(&token)
                .json(&UpdatePasswordRequest { current_password, new_password });
            dispatch(request).await?.into_success("Failed to change password")?;
            Ok::<_, GatewayError>(())
        })
        .await
    }

    /// `DELETE /users/me`. Success ends the session.
    pub async fn delete_account(&self) -> Outcome {
        self.run("delete_account", async {
            let token = self.require_token()?;
            let request = self.request(Method::DELETE, "/users/me").bearer_auth(&token);
            dispatch(request).await?.into_success("Failed to delete account")?;
            self.clear_token("account deleted");
            Ok::<_, GatewayError>(())
        })
        .await
    }

    // -------------------------------------------------------------------------
    // analysis
    // -------------------------------------------------------------------------

    /// `POST /trends/`.
    pub async fn analyze_trends(&self, topic: &str) -> Outcome<Value> {
        self.run("analyze_trends", self.post_analysis("/trends/", &TopicRequest { topic }, "Failed to analyze trends"))
            .await
    }

    /// `POST /opinions/`.
    pub async fn analyze_opinion(&self, topic: &str) -> Outcome<Value> {
        self.run(
            "analyze_opinion",
            self.post_analysis("/opinions/", &TopicRequest { topic }, "Failed to analyze opinion"),
        )
        .await
    }

    /// `POST /skills/`.
    pub async fn build_skill_path(&self, skill: &str) -> Outcome<Value> {
        self.run(
            "build_skill_path",
            self.post_analysis("/skills/", &SkillRequest { skill }, "Failed to build skill path"),
        )
        .await
    }

    async fn post_analysis<B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> Result<Value, GatewayError> {
        let token = self.require_token()?;
        let request = self.request(Method::POST, path).bearer_auth(&token).json(body);
        dispatch(request).await?.into_success(fallback)
    }

    // -------------------------------------------------------------------------
    // dashboard
    // -------------------------------------------------------------------------

    /// `GET /dashboard/stats`. Never fails: any error yields zeroed stats.
    pub async fn dashboard_stats(&self) -> Outcome<DashboardStats> {
        let result = async {
            let token = self.require_token()?;
            let reply = dispatch(self.request(Method::GET, "/dashboard/stats").bearer_auth(&token)).await?;
            decode::<DashboardStats>(reply.into_success("Failed to fetch stats")?)
        }
        .await;

        match result {
            Ok(stats) => Outcome::Success(stats),
            Err(e) => {
                tracing::warn!(operation = "dashboard_stats", error = %e.detail(), "stats unavailable; showing zeros");
                Outcome::Success(DashboardStats::zeroed())
            }
        }
    }

    /// `GET /dashboard/recent-activities?limit=N`, newest first as served.
    ///
    /// `None` or `Some(0)` falls back to the configured default limit.
    pub async fn recent_activities(&self, limit: Option<u32>) -> Outcome<Vec<Activity>> {
        let limit = limit.filter(|n| *n > 0).unwrap_or(self.activity_limit);
        self.run("recent_activities", async {
            let token = self.require_token()?;
            let request = self
                .request(Method::GET, "/dashboard/recent-activities")
                .bearer_auth(&token)
                .query(&[("limit", limit)]);
            let body = dispatch(request)
                .await?
                .into_success("Failed to fetch recent activities")?;
            decode::<RecentActivities>(body).map(|feed| feed.activities)
        })
        .await
    }

    // -------------------------------------------------------------------------
    // remember-me
    // -------------------------------------------------------------------------

    /// Persist the cosmetic remember-me flag. Does not affect token lifetime.
    pub fn set_remember_me(&self, remember: bool) -> Outcome {
        let result = if remember {
            self.storage.set(REMEMBER_ME_KEY, "true")
        } else {
            self.storage.remove(REMEMBER_ME_KEY)
        };
        match result {
            Ok(()) => Outcome::Success(()),
            Err(e) => {
                tracing::warn!(error = %e, "failed to persist remember-me flag");
                Outcome::Failure(GatewayError::Storage(e).to_string())
            }
        }
    }

    #[must_use]
    pub fn remember_me(&self) -> bool {
        matches!(self.storage.get(REMEMBER_ME_KEY), Ok(Some(v)) if v == "true")
    }

    // -------------------------------------------------------------------------
    // plumbing
    // -------------------------------------------------------------------------

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!(method = method.as_str(), path, "backend request");
        self.http.request(method, format!("{}{path}", self.base_url))
    }

    fn require_token(&self) -> Result<String, GatewayError> {
        self.state.borrow().token.clone().ok_or(GatewayError::NoToken)
    }

    /// Remove the token from storage and memory. No-op when already anonymous.
    ///
    /// Logout cannot fail, so a store that refuses the removal only gets a
    /// warning; the in-memory session still ends and the stale token is
    /// resumed on the next start.
    fn clear_token(&self, reason: &'static str) {
        if let Err(e) = self.storage.remove(AUTH_TOKEN_KEY) {
            tracing::warn!(error = %e, reason, "failed to remove stored token");
        }
        let cleared = self.state.send_if_modified(|s| s.token.take().is_some());
        if cleared {
            tracing::info!(reason, "session cleared");
        }
    }

    /// Run a credential-acquiring call: raise `is_loading`, reset `error`,
    /// persist any returned token, then publish the final state once.
    async fn acquire<F>(&self, operation: &'static str, call: F) -> Outcome
    where
        F: Future<Output = Result<Option<String>, GatewayError>>,
    {
        self.state.send_modify(|s| {
            s.is_loading = true;
            s.error = None;
        });

        let result = call.await.and_then(|token| {
            if let Some(token) = &token {
                self.storage.set(AUTH_TOKEN_KEY, token)?;
            }
            Ok(token)
        });

        self.state.send_modify(|s| {
            s.is_loading = false;
            match &result {
                Ok(Some(token)) => s.token = Some(token.clone()),
                Ok(None) => {}
                Err(e) => s.error = Some(e.to_string()),
            }
        });

        match &result {
            Ok(Some(_)) => tracing::info!(operation, "session established"),
            Ok(None) => tracing::info!(operation, "request accepted"),
            Err(e) => log_failure(operation, e),
        }
        result.map(|_| ()).into()
    }

    async fn run<T, F>(&self, operation: &'static str, call: F) -> Outcome<T>
    where
        F: Future<Output = Result<T, GatewayError>>,
    {
        let result = call.await;
        if let Err(e) = &result {
            log_failure(operation, e);
        }
        result.into()
    }
}

// =============================================================================
// REPLY PARSING
// =============================================================================

async fn dispatch(request: RequestBuilder) -> Result<Reply, GatewayError> {
    let response = request.send().await?;
    let status = response.status();
    let text = response.text().await?;
    Ok(Reply { status, text })
}

/// Raw backend reply; the body is parsed only once the status is known.
struct Reply {
    status: StatusCode,
    text: String,
}

impl Reply {
    fn json(&self) -> Result<Value, GatewayError> {
        if self.text.trim().is_empty() {
            return Ok(Value::Object(serde_json::Map::new()));
        }
        serde_json::from_str(&self.text)
            .map_err(|e| GatewayError::Network(format!("non-JSON body (status {}): {e}", self.status.as_u16())))
    }

    /// Body of a 2xx reply, or `Rejected` carrying the backend's `error`
    /// field (or `fallback` when it has none).
    fn into_success(self, fallback: &str) -> Result<Value, GatewayError> {
        let body = self.json()?;
        if self.status.is_success() {
            return Ok(body);
        }
        let message = serde_json::from_value::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .unwrap_or_else(|| fallback.to_owned());
        Err(GatewayError::Rejected { status: self.status.as_u16(), message })
    }
}

fn decode<T: DeserializeOwned>(body: Value) -> Result<T, GatewayError> {
    serde_json::from_value(body).map_err(|e| GatewayError::Network(format!("unexpected response shape: {e}")))
}

fn token_from(body: Value) -> Result<String, GatewayError> {
    let TokenResponse { token } = decode(body)?;
    if token.is_empty() {
        return Err(GatewayError::Network("empty token in response".to_owned()));
    }
    Ok(token)
}

fn log_failure(operation: &'static str, error: &GatewayError) {
    match error {
        GatewayError::NoToken => tracing::debug!(operation, "skipped: no token"),
        GatewayError::Rejected { status, .. } => {
            tracing::warn!(operation, status, error = %error, "backend rejected request");
        }
        _ => tracing::warn!(operation, error = %error.detail(), "request failed"),
    }
}
