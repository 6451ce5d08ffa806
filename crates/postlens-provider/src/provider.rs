//! The seam between the analytics pipeline and the content platform.

use postlens_core::{ProfileIdentity, RawPost};

use crate::client::ProviderClient;
use crate::error::ProviderError;

/// Source of profile metadata and recent posts.
///
/// Implemented by [`ProviderClient`] for the real platform; tests supply
/// in-memory fakes.
#[allow(async_fn_in_trait)]
pub trait ContentProvider {
    /// Profile identity for `username`.
    async fn resolve_identity(&self, username: &str) -> Result<ProfileIdentity, ProviderError>;

    /// Up to `limit` recent posts, most recent first. Empty when the account
    /// has no accessible posts.
    async fn list_recent_posts(
        &self,
        account_id: &str,
        limit: usize,
    ) -> Result<Vec<RawPost>, ProviderError>;

    /// Drops the current session and authenticates again.
    async fn relogin(&mut self) -> Result<(), ProviderError>;

    /// Releases the session.
    async fn logout(&mut self) -> Result<(), ProviderError>;
}

impl ContentProvider for ProviderClient {
    async fn resolve_identity(&self, username: &str) -> Result<ProfileIdentity, ProviderError> {
        ProviderClient::resolve_identity(self, username).await
    }

    async fn list_recent_posts(
        &self,
        account_id: &str,
        limit: usize,
    ) -> Result<Vec<RawPost>, ProviderError> {
        ProviderClient::list_recent_posts(self, account_id, limit).await
    }

    async fn relogin(&mut self) -> Result<(), ProviderError> {
        ProviderClient::relogin(self).await
    }

    async fn logout(&mut self) -> Result<(), ProviderError> {
        ProviderClient::logout(self).await
    }
}
