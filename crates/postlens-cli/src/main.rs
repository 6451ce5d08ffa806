mod output;
mod runner;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use postlens_analytics::AnalysisSettings;
use postlens_provider::ProviderClient;
use tracing_subscriber::EnvFilter;

use crate::runner::RunOptions;

#[derive(Debug, Parser)]
#[command(name = "postlens")]
#[command(about = "Engagement analytics for recent Instagram posts")]
struct Cli {
    /// Accounts to analyze. Falls back to `IG_TARGET_USERNAME` when omitted.
    usernames: Vec<String>,

    /// Directory that receives `{username}_summary.csv`.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Posts to fetch per account (defaults to `POSTLENS_POSTS_TO_FETCH`).
    #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    limit: Option<usize>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = postlens_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let usernames = resolve_usernames(cli.usernames, config.target_username.as_deref())?;
    let options = RunOptions {
        output_dir: cli.output_dir,
        limit: cli.limit.unwrap_or(config.posts_to_fetch),
        settings: AnalysisSettings {
            min_hashtag_occurrences: config.min_hashtag_occurrences,
        },
    };

    let mut client = ProviderClient::from_config(&config)?;
    client
        .login()
        .await
        .with_context(|| format!("login failed for {}", config.ig_username))?;

    let totals = runner::run_session(&mut client, &usernames, &options).await;
    tracing::info!(
        written = totals.written,
        skipped = totals.skipped,
        failed = totals.failed,
        "run complete"
    );

    Ok(())
}

/// Positional usernames (leading `@` stripped), or the configured target.
fn resolve_usernames(args: Vec<String>, fallback: Option<&str>) -> anyhow::Result<Vec<String>> {
    let mut usernames: Vec<String> = args
        .into_iter()
        .map(|u| u.trim().trim_start_matches('@').to_owned())
        .filter(|u| !u.is_empty())
        .collect();
    if usernames.is_empty() {
        match fallback {
            Some(target) => usernames.push(target.to_owned()),
            None => anyhow::bail!(
                "no account given; usage: postlens <username>... (or set IG_TARGET_USERNAME)"
            ),
        }
    }
    if let Some(bad) = usernames.iter().find(|u| !is_safe_username(u)) {
        anyhow::bail!(
            "invalid username {bad:?}: path separators and dot segments are not allowed"
        );
    }
    Ok(usernames)
}

/// Usernames become output file names, so they must stay a single path component.
fn is_safe_username(name: &str) -> bool {
    !name.contains(['/', '\\']) && name != "." && name != ".."
}
