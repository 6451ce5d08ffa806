//! Account-level aggregation over normalized posts.
//!
//! Every analysis runs over the full post list of one account. Anything that
//! depends on the engagement ratio skips posts where it is undefined.

use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::{Datelike, Timelike};
use postlens_core::{Post, ProfileIdentity, Theme};

use crate::classify::DEFAULT_THEME;
use crate::region::guess_region;
use crate::stats::{mean, median, pearson_r, posts_per_week, OrderedGroups};

/// Number of hashtag and theme lift rows kept in a summary.
pub const TOP_LIFT_ROWS: usize = 5;

/// Number of hour and weekday buckets kept per posting-window analysis.
pub const TOP_WINDOW_ROWS: usize = 3;

/// Minimum posts a theme needs before it gets a lift row.
pub const MIN_THEME_OCCURRENCES: usize = 2;

/// Minimum posts an hour or weekday bucket needs to be reported.
pub const MIN_WINDOW_POSTS: usize = 2;

/// Default minimum posts a hashtag needs before it gets a lift row.
pub const DEFAULT_MIN_HASHTAG_OCCURRENCES: usize = 2;

/// Inclusive caption-length range with its report label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBucket {
    pub label: &'static str,
    pub min: usize,
    /// `None` means unbounded.
    pub max: Option<usize>,
}

impl LengthBucket {
    #[must_use]
    pub fn contains(&self, len: usize) -> bool {
        len >= self.min && self.max.is_none_or(|max| len <= max)
    }
}

pub const CAPTION_LENGTH_BUCKETS: [LengthBucket; 6] = [
    LengthBucket { label: "0-20", min: 0, max: Some(20) },
    LengthBucket { label: "21-40", min: 21, max: Some(40) },
    LengthBucket { label: "41-60", min: 41, max: Some(60) },
    LengthBucket { label: "61-80", min: 61, max: Some(80) },
    LengthBucket { label: "81-120", min: 81, max: Some(120) },
    LengthBucket { label: "121+", min: 121, max: None },
];

/// Tunables for [`summarize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisSettings {
    pub min_hashtag_occurrences: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            min_hashtag_occurrences: DEFAULT_MIN_HASHTAG_OCCURRENCES,
        }
    }
}

/// A group's mean engagement ratio compared against the account baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct LiftRow<K> {
    pub key: K,
    pub count: usize,
    pub mean: f64,
    pub lift: f64,
}

/// Mean engagement ratio of one hour-of-day (0-23) or weekday (Mon=0) slot.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowRow {
    pub slot: u32,
    pub mean: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostingWindows {
    pub hours: Vec<WindowRow>,
    pub weekdays: Vec<WindowRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BucketStat {
    pub label: &'static str,
    pub mean: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaptionLengthAnalysis {
    pub pearson_r: Option<f64>,
    /// One entry per [`CAPTION_LENGTH_BUCKETS`] entry, in order.
    pub buckets: Vec<BucketStat>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccountSummary {
    pub display_name: String,
    pub username: String,
    pub follower_count: u64,
    pub following_count: u64,
    pub posts_analyzed: usize,
    pub avg_likes: f64,
    pub avg_comments: f64,
    pub avg_shares: f64,
    pub avg_saves: f64,
    pub engagement_rate_mean: Option<f64>,
    pub engagement_rate_median: Option<f64>,
    pub posts_per_week: Option<f64>,
    pub dominant_theme: Theme,
    /// Sorted, unique, case-sensitive.
    pub hashtags_used: Vec<String>,
    pub region: &'static str,
    pub hashtag_lift: Vec<LiftRow<String>>,
    pub posting_windows: PostingWindows,
    pub caption_length: CaptionLengthAnalysis,
    pub theme_lift: Vec<LiftRow<Theme>>,
}

/// Computes the full account summary.
#[must_use]
pub fn summarize(
    identity: &ProfileIdentity,
    username: &str,
    posts: &[Post],
    settings: AnalysisSettings,
) -> AccountSummary {
    let ratios = engagement_ratios(posts);
    let timestamps: Vec<_> = posts.iter().filter_map(|p| p.timestamp).collect();

    let mut hashtag_lift = hashtag_efficiency(posts, settings.min_hashtag_occurrences);
    hashtag_lift.truncate(TOP_LIFT_ROWS);
    let mut theme_lift = theme_lift(posts);
    theme_lift.truncate(TOP_LIFT_ROWS);

    AccountSummary {
        display_name: identity.display_name.clone(),
        username: username.to_owned(),
        follower_count: identity.follower_count,
        following_count: identity.following_count,
        posts_analyzed: posts.len(),
        avg_likes: mean_count(posts, |p| p.likes),
        avg_comments: mean_count(posts, |p| p.comments),
        avg_shares: mean_count(posts, |p| p.shares),
        avg_saves: mean_count(posts, |p| p.saves),
        engagement_rate_mean: mean(&ratios),
        engagement_rate_median: median(&ratios),
        posts_per_week: posts_per_week(&timestamps),
        dominant_theme: dominant_theme(posts),
        hashtags_used: hashtags_used(posts),
        region: guess_region(&identity.bio),
        hashtag_lift,
        posting_windows: posting_windows(posts),
        caption_length: caption_length_vs_engagement(posts),
        theme_lift,
    }
}

/// Ratios of the posts that have one, in post order.
#[must_use]
pub fn engagement_ratios(posts: &[Post]) -> Vec<f64> {
    posts
        .iter()
        .filter_map(|p| p.engagement_rate_view_adjusted)
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn mean_count(posts: &[Post], field: impl Fn(&Post) -> u64) -> f64 {
    let values: Vec<f64> = posts.iter().map(|p| field(p) as f64).collect();
    mean(&values).unwrap_or(0.0)
}

/// Most frequent theme; ties go to the theme seen first.
#[must_use]
pub fn dominant_theme(posts: &[Post]) -> Theme {
    let mut counts: Vec<(Theme, usize)> = Vec::new();
    for post in posts {
        match counts.iter_mut().find(|(t, _)| *t == post.theme) {
            Some((_, n)) => *n += 1,
            None => counts.push((post.theme, 1)),
        }
    }
    // `max_by_key` keeps the last maximum, so scan in reverse.
    counts
        .into_iter()
        .rev()
        .max_by_key(|(_, n)| *n)
        .map_or(DEFAULT_THEME, |(t, _)| t)
}

fn hashtags_used(posts: &[Post]) -> Vec<String> {
    posts
        .iter()
        .flat_map(|p| p.hashtags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Lift of every case-folded hashtag found on at least `min_occurrences`
/// ratio-defined posts, sorted by lift descending.
#[must_use]
pub fn hashtag_efficiency(posts: &[Post], min_occurrences: usize) -> Vec<LiftRow<String>> {
    let mut groups = OrderedGroups::new();
    for post in posts {
        let Some(ratio) = post.engagement_rate_view_adjusted else {
            continue;
        };
        let mut seen = HashSet::new();
        for tag in &post.hashtags {
            let key = tag.to_lowercase();
            if seen.insert(key.clone()) {
                groups.push(key, ratio);
            }
        }
    }
    lift_rows(groups, mean(&engagement_ratios(posts)), min_occurrences)
}

/// Lift of every theme found on at least [`MIN_THEME_OCCURRENCES`]
/// ratio-defined posts, sorted by lift descending.
#[must_use]
pub fn theme_lift(posts: &[Post]) -> Vec<LiftRow<Theme>> {
    let mut groups = OrderedGroups::new();
    for post in posts {
        if let Some(ratio) = post.engagement_rate_view_adjusted {
            groups.push(post.theme, ratio);
        }
    }
    lift_rows(groups, mean(&engagement_ratios(posts)), MIN_THEME_OCCURRENCES)
}

fn lift_rows<K: Eq + std::hash::Hash + Clone>(
    groups: OrderedGroups<K>,
    overall: Option<f64>,
    min_count: usize,
) -> Vec<LiftRow<K>> {
    let Some(overall) = overall else {
        return Vec::new();
    };
    let mut rows: Vec<LiftRow<K>> = groups
        .into_groups()
        .into_iter()
        .filter(|(_, values)| values.len() >= min_count)
        .filter_map(|(key, values)| {
            let m = mean(&values)?;
            Some(LiftRow {
                key,
                count: values.len(),
                mean: m,
                lift: m - overall,
            })
        })
        .collect();
    rows.sort_by(|a, b| b.lift.total_cmp(&a.lift));
    rows
}

/// Best hour-of-day and weekday buckets (UTC) by mean ratio.
#[must_use]
pub fn posting_windows(posts: &[Post]) -> PostingWindows {
    let mut hours = OrderedGroups::new();
    let mut weekdays = OrderedGroups::new();
    for post in posts {
        let (Some(ratio), Some(ts)) = (post.engagement_rate_view_adjusted, post.timestamp) else {
            continue;
        };
        hours.push(ts.hour(), ratio);
        weekdays.push(ts.weekday().num_days_from_monday(), ratio);
    }
    PostingWindows {
        hours: top_windows(hours),
        weekdays: top_windows(weekdays),
    }
}

fn top_windows(groups: OrderedGroups<u32>) -> Vec<WindowRow> {
    let mut rows: Vec<WindowRow> = groups
        .into_groups()
        .into_iter()
        .filter(|(_, values)| values.len() >= MIN_WINDOW_POSTS)
        .filter_map(|(slot, values)| {
            Some(WindowRow {
                slot,
                mean: mean(&values)?,
                count: values.len(),
            })
        })
        .collect();
    rows.sort_by(|a, b| b.mean.total_cmp(&a.mean));
    rows.truncate(TOP_WINDOW_ROWS);
    rows
}

/// Pearson r between caption length and ratio, plus per-bucket means.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn caption_length_vs_engagement(posts: &[Post]) -> CaptionLengthAnalysis {
    let pairs: Vec<(usize, f64)> = posts
        .iter()
        .filter_map(|p| p.engagement_rate_view_adjusted.map(|r| (p.caption_len, r)))
        .collect();

    let lengths: Vec<f64> = pairs.iter().map(|(len, _)| *len as f64).collect();
    let ratios: Vec<f64> = pairs.iter().map(|(_, r)| *r).collect();

    let mut per_bucket: HashMap<&'static str, Vec<f64>> = HashMap::new();
    for (len, ratio) in &pairs {
        if let Some(bucket) = CAPTION_LENGTH_BUCKETS.iter().find(|b| b.contains(*len)) {
            per_bucket.entry(bucket.label).or_default().push(*ratio);
        }
    }

    let buckets = CAPTION_LENGTH_BUCKETS
        .iter()
        .map(|bucket| {
            let values = per_bucket.remove(bucket.label).unwrap_or_default();
            BucketStat {
                label: bucket.label,
                mean: mean(&values).unwrap_or(0.0),
                count: values.len(),
            }
        })
        .collect();

    CaptionLengthAnalysis {
        pearson_r: pearson_r(&lengths, &ratios),
        buckets,
    }
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
