//! HTTP client for the content-platform API.
//!
//! Wraps `reqwest` with session handling, status-code mapping, and typed
//! response decoding. Every endpoint checks the `"status"` field of the JSON
//! envelope; `login_required` surfaces as [`ProviderError::Forbidden`] so the
//! caller can re-authenticate once.

use std::time::Duration;

use postlens_core::{AppConfig, ProfileIdentity, RawPost};
use reqwest::{Client, RequestBuilder, StatusCode, Url};

use crate::error::ProviderError;
use crate::session::{SessionCache, StoredSession};
use crate::types::{
    LoginRequest, LoginResponse, MediaListResponse, UserInfoResponse, UsernameInfoResponse,
};

/// Account credentials used to open a session.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Client for the content-platform API.
///
/// Holds the HTTP client, credentials, the current session id, and the
/// on-disk session cache. Use [`ProviderClient::from_config`] in production
/// or [`ProviderClient::with_base_url`] to point at a mock server in tests.
pub struct ProviderClient {
    client: Client,
    base_url: Url,
    credentials: Credentials,
    session_cache: SessionCache,
    session_id: Option<String>,
}

impl ProviderClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`ProviderError::InvalidBaseUrl`] for a bad base URL.
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        Self::with_base_url(
            Credentials {
                username: config.ig_username.clone(),
                password: config.ig_password.clone(),
            },
            SessionCache::new(&config.session_file),
            config.request_timeout_secs,
            &config.user_agent,
            &config.api_base_url,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`ProviderError::InvalidBaseUrl`] if `base_url` does not
    /// parse or cannot carry path segments.
    pub fn with_base_url(
        credentials: Credentials,
        session_cache: SessionCache,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let parsed = Url::parse(base_url).map_err(|e| ProviderError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ProviderError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: "URL cannot carry a path".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
            credentials,
            session_cache,
            session_id: None,
        })
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.session_id.is_some()
    }

    /// Opens a session, offering the cached session id when one exists for
    /// the same account, and writes the new session back to the cache.
    ///
    /// Cache write failures are logged, not returned.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Auth`] if the platform rejects the credentials.
    /// - [`ProviderError::Forbidden`] on HTTP 403.
    /// - [`ProviderError::Http`] on network failure.
    /// - [`ProviderError::Deserialize`] if the response shape is unexpected.
    pub async fn login(&mut self) -> Result<(), ProviderError> {
        let cached = self
            .session_cache
            .load()
            .filter(|s| s.username == self.credentials.username);
        if cached.is_some() {
            tracing::debug!(
                path = %self.session_cache.path().display(),
                "offering cached session at login"
            );
        }

        let url = self.build_url(&["accounts", "login"], &[]);
        let body = LoginRequest {
            username: &self.credentials.username,
            password: &self.credentials.password,
            cached_session_id: cached.as_ref().map(|s| s.session_id.as_str()),
        };
        let payload = self
            .send(self.client.post(url).json(&body), "accounts/login")
            .await
            .and_then(|payload| {
                Self::check_api_error(&payload, "accounts/login")?;
                Ok(payload)
            })
            .map_err(|e| match e {
                ProviderError::UnexpectedStatus { status: 400 | 401, .. } => {
                    ProviderError::Auth("credentials rejected".to_owned())
                }
                ProviderError::Api(message) => ProviderError::Auth(message),
                other => other,
            })?;

        let response: LoginResponse =
            serde_json::from_value(payload).map_err(|e| ProviderError::Deserialize {
                context: "accounts/login".to_owned(),
                source: e,
            })?;

        let stored = StoredSession {
            username: self.credentials.username.clone(),
            session_id: response.session_id.clone(),
        };
        if let Err(e) = self.session_cache.save(&stored) {
            tracing::warn!(error = %e, "could not write session cache");
        }
        self.session_id = Some(response.session_id);
        tracing::info!(username = %self.credentials.username, "logged in");
        Ok(())
    }

    /// Discards the current session and logs in again.
    ///
    /// # Errors
    ///
    /// Same as [`Self::login`].
    pub async fn relogin(&mut self) -> Result<(), ProviderError> {
        tracing::info!(username = %self.credentials.username, "re-authenticating");
        self.session_id = None;
        self.login().await
    }

    /// Releases the current session. A no-op when not logged in.
    ///
    /// The local session is dropped even when the platform call fails.
    ///
    /// # Errors
    ///
    /// Returns the error from the logout request, if any.
    pub async fn logout(&mut self) -> Result<(), ProviderError> {
        if self.session_id.is_none() {
            return Ok(());
        }
        let url = self.build_url(&["accounts", "logout"], &[]);
        let result = self
            .send(self.client.post(url), "accounts/logout")
            .await
            .map(|_| ());
        self.session_id = None;
        result
    }

    /// Resolves profile identity for `username`: looks up the account id,
    /// then fetches the profile.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Forbidden`] on HTTP 403 or `login_required`.
    /// - [`ProviderError::NotFound`] on HTTP 404.
    /// - [`ProviderError::Http`] on network failure.
    /// - [`ProviderError::Deserialize`] if a response shape is unexpected.
    pub async fn resolve_identity(&self, username: &str) -> Result<ProfileIdentity, ProviderError> {
        let url = self.build_url(&["users", username, "usernameinfo"], &[]);
        let context = format!("users/{username}/usernameinfo");
        let body = self.send(self.client.get(url), &context).await?;
        Self::check_api_error(&body, &context)?;
        let lookup: UsernameInfoResponse =
            serde_json::from_value(body).map_err(|e| ProviderError::Deserialize {
                context: context.clone(),
                source: e,
            })?;
        let account_id = match lookup.user.pk {
            serde_json::Value::String(s) if !s.is_empty() => s,
            serde_json::Value::Number(n) => n.to_string(),
            _ => {
                return Err(ProviderError::NotFound {
                    what: format!("account id for {username}"),
                })
            }
        };

        let url = self.build_url(&["users", &account_id, "info"], &[]);
        let context = format!("users/{account_id}/info");
        let body = self.send(self.client.get(url), &context).await?;
        Self::check_api_error(&body, &context)?;
        let info: UserInfoResponse =
            serde_json::from_value(body).map_err(|e| ProviderError::Deserialize {
                context,
                source: e,
            })?;
        let user = info.user;

        Ok(ProfileIdentity {
            display_name: user
                .full_name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| username.to_owned()),
            bio: user.biography.unwrap_or_default(),
            follower_count: user.follower_count.unwrap_or(0),
            following_count: user.following_count.unwrap_or(0),
            account_id,
        })
    }

    /// Lists up to `limit` recent posts, most recent first.
    ///
    /// Tries the primary feed endpoint, then the secondary media endpoint.
    /// Failures and empty pages are logged; when neither endpoint yields
    /// posts the result is an empty list. Malformed items are skipped.
    ///
    /// # Errors
    ///
    /// Endpoint failures, `Forbidden` included, degrade to an empty list;
    /// this client never returns `Err` here. Other [`ContentProvider`]
    /// implementations may.
    ///
    /// [`ContentProvider`]: crate::ContentProvider
    pub async fn list_recent_posts(
        &self,
        account_id: &str,
        limit: usize,
    ) -> Result<Vec<RawPost>, ProviderError> {
        let limit_str = limit.to_string();
        let attempts = [
            (
                self.build_url(&["feed", "user", account_id], &[("count", &limit_str)]),
                "feed/user",
            ),
            (
                self.build_url(&["users", account_id, "medias"], &[("amount", &limit_str)]),
                "users/medias",
            ),
        ];

        for (url, endpoint) in attempts {
            match self.fetch_media_page(url, endpoint).await {
                Ok(posts) if !posts.is_empty() => {
                    let mut posts = posts;
                    posts.truncate(limit);
                    return Ok(posts);
                }
                Ok(_) => {
                    tracing::debug!(account_id, endpoint, "media endpoint returned no posts");
                }
                Err(e) => {
                    tracing::warn!(account_id, endpoint, error = %e, "media endpoint failed");
                }
            }
        }
        Ok(Vec::new())
    }

    async fn fetch_media_page(
        &self,
        url: Url,
        endpoint: &str,
    ) -> Result<Vec<RawPost>, ProviderError> {
        let body = self.send(self.client.get(url), endpoint).await?;
        Self::check_api_error(&body, endpoint)?;
        let page: MediaListResponse =
            serde_json::from_value(body).map_err(|e| ProviderError::Deserialize {
                context: endpoint.to_owned(),
                source: e,
            })?;
        let posts = page
            .items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| {
                serde_json::from_value::<RawPost>(item)
                    .map_err(|e| {
                        tracing::warn!(endpoint, index, error = %e, "skipping malformed media item");
                    })
                    .ok()
            })
            .collect();
        Ok(posts)
    }

    /// Builds a request URL from path segments and query parameters.
    ///
    /// Segments are percent-encoded and the path always ends with `/`.
    pub(crate) fn build_url(&self, segments: &[&str], query: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            path.extend(segments);
            path.push("");
        }
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    /// Attaches the session, sends the request, maps the HTTP status, and
    /// parses the body as JSON.
    async fn send(
        &self,
        request: RequestBuilder,
        endpoint: &str,
    ) -> Result<serde_json::Value, ProviderError> {
        let request = match &self.session_id {
            Some(session_id) => request.bearer_auth(session_id),
            None => request,
        };
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().to_string();

        if status == StatusCode::FORBIDDEN {
            return Err(ProviderError::Forbidden {
                endpoint: endpoint.to_owned(),
            });
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound {
                what: endpoint.to_owned(),
            });
        }
        if !status.is_success() {
            return Err(ProviderError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ProviderError::Deserialize {
            context: url,
            source: e,
        })
    }

    /// Checks the top-level `"status"` field of the envelope.
    fn check_api_error(body: &serde_json::Value, endpoint: &str) -> Result<(), ProviderError> {
        if body.get("status").and_then(serde_json::Value::as_str) != Some("fail") {
            return Ok(());
        }
        let message = body
            .get("message")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("unknown error");
        if message == "login_required" {
            return Err(ProviderError::Forbidden {
                endpoint: endpoint.to_owned(),
            });
        }
        Err(ProviderError::Api(message.to_owned()))
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
