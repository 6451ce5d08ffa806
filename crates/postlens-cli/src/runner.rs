//! Per-account orchestration: fetch, normalize, aggregate, report.
//!
//! Accounts run strictly one after another. A failing account is logged and
//! skipped; the session is released once every account has been attempted.

use std::path::PathBuf;

use anyhow::Context;
use postlens_analytics::{normalize_post, summarize, AnalysisSettings, SummaryRow};
use postlens_core::{Post, ProfileIdentity, RawPost};
use postlens_provider::{ContentProvider, ProviderError};

use crate::output;

#[derive(Debug, Clone)]
pub(crate) struct RunOptions {
    pub output_dir: PathBuf,
    pub limit: usize,
    pub settings: AnalysisSettings,
}

#[derive(Debug)]
pub(crate) enum AccountOutcome {
    /// Summary written to this path.
    Written(PathBuf),
    /// No usable posts; nothing written.
    NoPosts,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct RunTotals {
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Processes every account, then logs out whatever happened.
pub(crate) async fn run_session<P: ContentProvider>(
    provider: &mut P,
    usernames: &[String],
    options: &RunOptions,
) -> RunTotals {
    let totals = run_accounts(provider, usernames, options).await;
    if let Err(e) = provider.logout().await {
        tracing::warn!(error = %e, "logout failed");
    }
    totals
}

pub(crate) async fn run_accounts<P: ContentProvider>(
    provider: &mut P,
    usernames: &[String],
    options: &RunOptions,
) -> RunTotals {
    let mut totals = RunTotals::default();

    for username in usernames {
        println!();
        println!("=== @{username} ===");
        match process_account(provider, username, options).await {
            Ok(AccountOutcome::Written(path)) => {
                println!("Saved summary to {}", path.display());
                totals.written += 1;
            }
            Ok(AccountOutcome::NoPosts) => {
                totals.skipped += 1;
            }
            Err(e) => {
                let err_string = format!("{e:#}");
                tracing::error!(username = %username, error = %err_string, "account failed");
                println!("Skipping @{username}: {err_string}");
                totals.failed += 1;
            }
        }
    }

    totals
}

async fn process_account<P: ContentProvider>(
    provider: &mut P,
    username: &str,
    options: &RunOptions,
) -> anyhow::Result<AccountOutcome> {
    let identity = resolve_identity_with_relogin(provider, username)
        .await
        .with_context(|| format!("resolving @{username}"))?;

    let raw = list_posts_with_relogin(provider, &identity.account_id, options.limit)
        .await
        .with_context(|| format!("listing posts for @{username}"))?;
    if raw.is_empty() {
        println!("No posts found for @{username} (private or empty account).");
        return Ok(AccountOutcome::NoPosts);
    }

    let posts = normalize_all(username, &raw);
    if posts.is_empty() {
        println!("No usable posts for @{username}.");
        return Ok(AccountOutcome::NoPosts);
    }
    tracing::info!(username, fetched = raw.len(), analyzed = posts.len(), "posts normalized");

    let summary = summarize(&identity, username, &posts, options.settings);
    output::print_report(&summary, &posts);

    let row = SummaryRow::from_summary(&summary);
    let path = output::write_summary_csv(&options.output_dir, username, &row)?;
    Ok(AccountOutcome::Written(path))
}

async fn resolve_identity_with_relogin<P: ContentProvider>(
    provider: &mut P,
    username: &str,
) -> Result<ProfileIdentity, ProviderError> {
    match provider.resolve_identity(username).await {
        Err(e) if e.is_forbidden() => {
            tracing::warn!(username, error = %e, "forbidden; logging in again before one retry");
            provider.relogin().await?;
            provider.resolve_identity(username).await
        }
        other => other,
    }
}

async fn list_posts_with_relogin<P: ContentProvider>(
    provider: &mut P,
    account_id: &str,
    limit: usize,
) -> Result<Vec<RawPost>, ProviderError> {
    match provider.list_recent_posts(account_id, limit).await {
        Err(e) if e.is_forbidden() => {
            tracing::warn!(account_id, error = %e, "forbidden; logging in again before one retry");
            provider.relogin().await?;
            provider.list_recent_posts(account_id, limit).await
        }
        other => other,
    }
}

/// Normalizes every raw post, dropping the ones that fail with a log line.
fn normalize_all(username: &str, raw: &[RawPost]) -> Vec<Post> {
    raw.iter()
        .enumerate()
        .filter_map(|(i, item)| match normalize_post(item) {
            Ok(post) => Some(post),
            Err(e) => {
                tracing::warn!(
                    username,
                    post = i + 1,
                    media_id = item.id.as_deref().unwrap_or("?"),
                    error = %e,
                    "skipping post"
                );
                println!("  (skip post {}: {e})", i + 1);
                None
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
