//! Flat summary record and console text for one account.

use std::fmt::Display;

use postlens_core::Post;
use serde::Serialize;

use crate::aggregate::{AccountSummary, CaptionLengthAnalysis, LiftRow, PostingWindows, WindowRow};

pub const CONTENT_TYPE: &str = "Instagram (Post/Reel)";

/// Column order of the summary CSV. Matches the field order of [`SummaryRow`].
pub const SUMMARY_COLUMNS: [&str; 17] = [
    "tiktok_profile_name",
    "username",
    "posts_analyzed",
    "avg_likes",
    "avg_comments",
    "engagement_rate_view_adj_mean",
    "post_frequency_per_week",
    "content_type",
    "content_theme",
    "avg_shares",
    "avg_saves",
    "hashtags_used",
    "country_region",
    "hashtag_efficiency_top",
    "posting_window_performance",
    "caption_length_vs_er",
    "content_category_lift_top",
];

const WEEKDAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const MAX_CAPTION_CHARS: usize = 60;
const TRUNCATED_CAPTION_CHARS: usize = 57;

/// One summary record, every field pre-formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    #[serde(rename = "tiktok_profile_name")]
    pub profile_name: String,
    pub username: String,
    pub posts_analyzed: String,
    pub avg_likes: String,
    pub avg_comments: String,
    #[serde(rename = "engagement_rate_view_adj_mean")]
    pub engagement_rate_mean: String,
    #[serde(rename = "post_frequency_per_week")]
    pub posts_per_week: String,
    pub content_type: String,
    pub content_theme: String,
    pub avg_shares: String,
    pub avg_saves: String,
    pub hashtags_used: String,
    pub country_region: String,
    pub hashtag_efficiency_top: String,
    pub posting_window_performance: String,
    pub caption_length_vs_er: String,
    pub content_category_lift_top: String,
}

impl SummaryRow {
    #[must_use]
    pub fn from_summary(summary: &AccountSummary) -> Self {
        Self {
            profile_name: summary.display_name.clone(),
            username: summary.username.clone(),
            posts_analyzed: summary.posts_analyzed.to_string(),
            avg_likes: format!("{:.4}", summary.avg_likes),
            avg_comments: format!("{:.4}", summary.avg_comments),
            engagement_rate_mean: summary
                .engagement_rate_mean
                .map(|v| format!("{v:.6}"))
                .unwrap_or_default(),
            posts_per_week: summary
                .posts_per_week
                .map(|v| format!("{v:.4}"))
                .unwrap_or_default(),
            content_type: CONTENT_TYPE.to_owned(),
            content_theme: summary.dominant_theme.to_string(),
            avg_shares: format!("{:.4}", summary.avg_shares),
            avg_saves: format!("{:.4}", summary.avg_saves),
            hashtags_used: summary.hashtags_used.join(";"),
            country_region: summary.region.to_owned(),
            hashtag_efficiency_top: format_lift_rows(&summary.hashtag_lift),
            posting_window_performance: format_posting_windows(&summary.posting_windows),
            caption_length_vs_er: format_caption_length(&summary.caption_length),
            content_category_lift_top: format_lift_rows(&summary.theme_lift),
        }
    }
}

/// `key:+0.0123(n=3);key2:-0.0040(n=2)`
#[must_use]
pub fn format_lift_rows<K: Display>(rows: &[LiftRow<K>]) -> String {
    rows.iter()
        .map(|row| format!("{}:{:+.4}(n={})", row.key, row.lift, row.count))
        .collect::<Vec<_>>()
        .join(";")
}

/// `hours[h9@0.0450(n=3),...]|weekdays[Tue@0.0610(n=2),...]`
#[must_use]
pub fn format_posting_windows(windows: &PostingWindows) -> String {
    let hours = join_windows(&windows.hours, |slot| format!("h{slot}"));
    let weekdays = join_windows(&windows.weekdays, |slot| {
        WEEKDAY_NAMES
            .get(slot as usize)
            .map_or_else(|| slot.to_string(), |name| (*name).to_owned())
    });
    format!("hours[{hours}]|weekdays[{weekdays}]")
}

fn join_windows(rows: &[WindowRow], label: impl Fn(u32) -> String) -> String {
    rows.iter()
        .map(|row| format!("{}@{:.4}(n={})", label(row.slot), row.mean, row.count))
        .collect::<Vec<_>>()
        .join(",")
}

/// `r=0.123; 0-20:0.0500(n=2);21-40:0.0000(n=0);...`
#[must_use]
pub fn format_caption_length(analysis: &CaptionLengthAnalysis) -> String {
    let r = analysis
        .pearson_r
        .map_or_else(|| "N/A".to_owned(), |r| format!("{r:.3}"));
    let buckets = analysis
        .buckets
        .iter()
        .map(|b| format!("{}:{:.4}(n={})", b.label, b.mean, b.count))
        .collect::<Vec<_>>()
        .join(";");
    format!("r={r}; {buckets}")
}

/// Single-line caption, cut to 57 characters plus `...` past 60.
#[must_use]
pub fn truncate_caption(caption: &str) -> String {
    let flat = caption.replace('\n', " ");
    if flat.chars().count() > MAX_CAPTION_CHARS {
        let mut cut: String = flat.chars().take(TRUNCATED_CAPTION_CHARS).collect();
        cut.push_str("...");
        cut
    } else {
        flat
    }
}

/// Numbered console line for one post; `index` starts at 1.
#[must_use]
pub fn format_post_line(index: usize, post: &Post) -> String {
    let er = post
        .engagement_rate_view_adjusted
        .map_or_else(|| "NA".to_owned(), |er| format!("{er:.4}"));
    let date = post
        .timestamp
        .map_or_else(|| "?".to_owned(), |ts| ts.format("%Y-%m-%d").to_string());
    format!(
        " {index:02}. views={:>7} | likes={:>6} | comments={:>5} | ER {er:>6} | {date} | {}",
        post.views,
        post.likes,
        post.comments,
        truncate_caption(&post.caption),
    )
}

/// Human-readable account summary, one line per metric.
#[must_use]
pub fn console_summary_lines(summary: &AccountSummary) -> Vec<String> {
    let er_mean = summary
        .engagement_rate_mean
        .map_or_else(|| "N/A".to_owned(), |v| format!("{v:.4}"));
    let er_median = summary
        .engagement_rate_median
        .map_or_else(|| "N/A".to_owned(), |v| format!("{v:.4}"));
    let frequency = summary
        .posts_per_week
        .map_or_else(|| "Unknown".to_owned(), |v| format!("{v:.2}"));

    vec![
        format!("Profile:                {} (@{})", summary.display_name, summary.username),
        format!("Followers:              {}", group_thousands(summary.follower_count)),
        format!("Following:              {}", group_thousands(summary.following_count)),
        format!("Analyzed posts:         {}", summary.posts_analyzed),
        format!("Avg Likes:              {}", format_grouped_decimal(summary.avg_likes)),
        format!("Avg Comments:           {}", format_grouped_decimal(summary.avg_comments)),
        format!("View-adjusted ER:       mean={er_mean}, median={er_median}"),
        format!("Post frequency:         {frequency} posts/week"),
        format!("Content type:           {CONTENT_TYPE}"),
        format!("Content theme:          {}", summary.dominant_theme),
        format!(
            "Avg shares / saves:     {:.2} / {:.2}",
            summary.avg_shares, summary.avg_saves
        ),
        format!("Country/Region:         {}", summary.region),
    ]
}

/// `1234567` -> `1,234,567`
#[must_use]
pub fn group_thousands(n: u64) -> String {
    group_digits(&n.to_string())
}

fn format_grouped_decimal(value: f64) -> String {
    let formatted = format!("{value:.2}");
    match formatted.split_once('.') {
        Some((int, frac)) => format!("{}.{frac}", group_digits(int)),
        None => group_digits(&formatted),
    }
}

fn group_digits(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("{sign}{out}")
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
