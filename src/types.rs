//! Wire records for the analytics backend.
//!
//! DESIGN
//! ======
//! One explicit record per endpoint. Bodies are parsed at the boundary and a
//! body that does not fit its record is treated as a transport failure
//! rather than trusted field by field. Analysis payloads (trends, opinions,
//! skill paths) stay as raw JSON because their schema belongs to the backend.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// REQUESTS
// =============================================================================

/// Body of `POST /auth/login` and `POST /auth/register`.
#[derive(Debug, Serialize)]
pub struct CredentialsRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of `POST /auth/github`.
#[derive(Debug, Serialize)]
pub struct GithubCodeRequest<'a> {
    pub code: &'a str,
}

/// Body of `PUT /users/me`.
#[derive(Debug, Serialize)]
pub struct UpdateProfileRequest<'a> {
    pub email: &'a str,
}

/// Body of `PUT /users/me/password`.
#[derive(Debug, Serialize)]
pub struct UpdatePasswordRequest<'a> {
    pub current_password: &'a str,
    pub new_password: &'a str,
}

/// Body of `POST /trends/` and `POST /opinions/`.
#[derive(Debug, Serialize)]
pub struct TopicRequest<'a> {
    pub topic: &'a str,
}

/// Body of `POST /skills/`.
#[derive(Debug, Serialize)]
pub struct SkillRequest<'a> {
    pub skill: &'a str,
}

// =============================================================================
// RESPONSES
// =============================================================================

/// Credential-acquiring success body.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Error body; `error` may be missing on some backend failures.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of `GET /users/me`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Fields the gateway does not interpret (id, plan, flags, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    /// Local part of the email, or `"User"` when there is none.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self.email.split('@').next() {
            Some(local) if !local.is_empty() => local,
            _ => "User",
        }
    }
}

/// Body of `GET /dashboard/stats`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub active_trends: u64,
    pub trends_change: String,
    pub opinions_analyzed: u64,
    pub opinions_change: String,
    pub skill_paths: u64,
    pub skills_change: String,
    pub total_insights: u64,
    pub insights_change: String,
}

impl DashboardStats {
    /// Stats shown when the backend cannot be reached.
    #[must_use]
    pub fn zeroed() -> Self {
        let flat = || "+0%".to_owned();
        Self {
            active_trends: 0,
            trends_change: flat(),
            opinions_analyzed: 0,
            opinions_change: flat(),
            skill_paths: 0,
            skills_change: flat(),
            total_insights: 0,
            insights_change: flat(),
        }
    }
}

impl Default for DashboardStats {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// One entry of the recent-activity feed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default)]
    pub id: Value,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    /// RFC 3339 timestamp as sent by the backend.
    pub timestamp: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `GET /dashboard/recent-activities`.
#[derive(Debug, Deserialize)]
pub struct RecentActivities {
    pub activities: Vec<Activity>,
}
