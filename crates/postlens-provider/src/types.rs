//! Wire types for the content-platform API.
//!
//! Every response carries a `"status"` field (`"ok"` or `"fail"`); the
//! remaining fields are endpoint-specific. Media items are kept as raw JSON
//! values so that one malformed item can be skipped without failing the page.

use serde::{Deserialize, Serialize};

/// Body of `POST accounts/login/`.
#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    /// Previously issued session id, offered for reuse.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached_session_id: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub session_id: String,
}

/// `GET users/{username}/usernameinfo/`.
#[derive(Debug, Deserialize)]
pub(crate) struct UsernameInfoResponse {
    pub user: UserRef,
}

/// The platform returns `pk` as either a number or a string.
#[derive(Debug, Deserialize)]
pub(crate) struct UserRef {
    pub pk: serde_json::Value,
}

/// `GET users/{id}/info/`.
#[derive(Debug, Deserialize)]
pub(crate) struct UserInfoResponse {
    pub user: UserInfo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserInfo {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub follower_count: Option<u64>,
    #[serde(default)]
    pub following_count: Option<u64>,
}

/// Envelope shared by both media listing endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct MediaListResponse {
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
}
