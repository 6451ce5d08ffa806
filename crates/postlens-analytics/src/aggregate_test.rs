use chrono::{DateTime, Duration, TimeZone, Utc};
use postlens_core::{MediaType, Post, ProfileIdentity, Theme};

use super::*;

fn post(likes: u64, comments: u64, views: u64) -> Post {
    #[allow(clippy::cast_precision_loss)]
    let ratio = (views > 0).then(|| (likes + comments) as f64 / views as f64);
    Post {
        views,
        likes,
        comments,
        shares: 0,
        saves: 0,
        engagement_rate_view_adjusted: ratio,
        caption: String::new(),
        caption_len: 0,
        hashtags: Vec::new(),
        timestamp: None,
        theme: Theme::GeneralEnglish,
        media_type: MediaType::Video,
        permalink: None,
    }
}

fn with_ratio(ratio: f64) -> Post {
    let mut p = post(0, 0, 1);
    p.engagement_rate_view_adjusted = Some(ratio);
    p
}

fn tagged(ratio: f64, tags: &[&str]) -> Post {
    let mut p = with_ratio(ratio);
    p.hashtags = tags.iter().map(|t| (*t).to_owned()).collect();
    p
}

fn themed(ratio: Option<f64>, theme: Theme) -> Post {
    let mut p = post(0, 0, 1);
    p.engagement_rate_view_adjusted = ratio;
    p.theme = theme;
    p
}

fn at(ratio: f64, ts: DateTime<Utc>) -> Post {
    let mut p = with_ratio(ratio);
    p.timestamp = Some(ts);
    p
}

fn captioned(ratio: Option<f64>, len: usize) -> Post {
    let mut p = post(0, 0, 1);
    p.engagement_rate_view_adjusted = ratio;
    p.caption_len = len;
    p
}

fn identity(bio: &str) -> ProfileIdentity {
    ProfileIdentity {
        display_name: "English With Ola".to_owned(),
        bio: bio.to_owned(),
        follower_count: 12_345,
        following_count: 67,
        account_id: "42".to_owned(),
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ---------------------------------------------------------------------------
// summarize
// ---------------------------------------------------------------------------

#[test]
fn summarize_end_to_end_scenario() {
    let posts = vec![post(10, 2, 100), post(20, 4, 200), post(0, 0, 0)];
    let summary = summarize(
        &identity("Tutor from Poland"),
        "ola",
        &posts,
        AnalysisSettings::default(),
    );

    assert_eq!(summary.posts_analyzed, 3);
    assert!(approx(summary.avg_likes, 10.0));
    assert!(approx(summary.avg_comments, 2.0));
    assert!(approx(summary.engagement_rate_mean.unwrap(), 0.12));
    assert!(approx(summary.engagement_rate_median.unwrap(), 0.12));
    assert!(summary.posts_per_week.is_none());
    assert_eq!(summary.region, "Poland");
    assert_eq!(summary.display_name, "English With Ola");
    assert_eq!(summary.username, "ola");
}

#[test]
fn summarize_all_zero_views_leaves_engagement_undefined() {
    let posts = vec![post(5, 1, 0), post(3, 0, 0)];
    let summary = summarize(&identity(""), "u", &posts, AnalysisSettings::default());

    assert!(summary.engagement_rate_mean.is_none());
    assert!(summary.engagement_rate_median.is_none());
    assert!(summary.hashtag_lift.is_empty());
    assert!(summary.theme_lift.is_empty());
    assert!(summary.caption_length.pearson_r.is_none());
    assert!(approx(summary.avg_likes, 4.0));
}

#[test]
fn summarize_empty_post_list() {
    let summary = summarize(&identity(""), "u", &[], AnalysisSettings::default());

    assert_eq!(summary.posts_analyzed, 0);
    assert!(approx(summary.avg_likes, 0.0));
    assert!(approx(summary.avg_saves, 0.0));
    assert!(summary.engagement_rate_mean.is_none());
    assert_eq!(summary.dominant_theme, Theme::GeneralEnglish);
    assert!(summary.hashtags_used.is_empty());
    assert_eq!(summary.region, "Unknown");
    assert_eq!(summary.caption_length.buckets.len(), 6);
}

#[test]
fn summarize_collects_sorted_unique_hashtags() {
    let posts = vec![
        tagged(0.1, &["#vocab", "#ESL"]),
        tagged(0.2, &["#esl", "#vocab"]),
    ];
    let summary = summarize(&identity(""), "u", &posts, AnalysisSettings::default());
    assert_eq!(summary.hashtags_used, vec!["#ESL", "#esl", "#vocab"]);
}

#[test]
fn summarize_keeps_top_five_hashtags() {
    let tags = ["#a", "#b", "#c", "#d", "#e", "#f", "#g"];
    let posts = vec![tagged(0.1, &tags), tagged(0.2, &tags)];
    let summary = summarize(&identity(""), "u", &posts, AnalysisSettings::default());
    assert_eq!(summary.hashtag_lift.len(), TOP_LIFT_ROWS);
}

#[test]
fn summarize_respects_min_hashtag_setting() {
    let posts = vec![tagged(0.1, &["#solo"]), tagged(0.3, &["#pair"]), tagged(0.2, &["#pair"])];
    let settings = AnalysisSettings {
        min_hashtag_occurrences: 1,
    };
    let summary = summarize(&identity(""), "u", &posts, settings);
    assert_eq!(summary.hashtag_lift.len(), 2);
}

#[test]
fn summarize_cadence_from_timestamps() {
    let t0 = Utc.with_ymd_and_hms(2025, 5, 1, 10, 0, 0).unwrap();
    let posts = vec![at(0.1, t0), at(0.2, t0 + Duration::days(7))];
    let summary = summarize(&identity(""), "u", &posts, AnalysisSettings::default());
    assert_eq!(summary.posts_per_week, Some(2.0));
}

// ---------------------------------------------------------------------------
// dominant_theme
// ---------------------------------------------------------------------------

#[test]
fn dominant_theme_is_most_frequent() {
    let posts = vec![
        themed(None, Theme::Grammar),
        themed(None, Theme::Vocabulary),
        themed(None, Theme::Vocabulary),
    ];
    assert_eq!(dominant_theme(&posts), Theme::Vocabulary);
}

#[test]
fn dominant_theme_tie_goes_to_first_seen() {
    let posts = vec![
        themed(None, Theme::StudyTips),
        themed(None, Theme::Grammar),
        themed(None, Theme::Grammar),
        themed(None, Theme::StudyTips),
    ];
    assert_eq!(dominant_theme(&posts), Theme::StudyTips);
}

// ---------------------------------------------------------------------------
// hashtag_efficiency
// ---------------------------------------------------------------------------

#[test]
fn hashtag_efficiency_sorted_by_lift_descending() {
    let posts = vec![
        tagged(0.10, &["#low"]),
        tagged(0.12, &["#low"]),
        tagged(0.30, &["#high"]),
        tagged(0.28, &["#high"]),
        tagged(0.20, &["#mid", "#MID"]),
        tagged(0.20, &["#Mid"]),
    ];
    let rows = hashtag_efficiency(&posts, 2);
    let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["#high", "#mid", "#low"]);
    assert!(rows.windows(2).all(|w| w[0].lift >= w[1].lift));
}

#[test]
fn hashtag_counted_once_per_post() {
    let posts = vec![tagged(0.2, &["#Tip", "#tip"]), tagged(0.1, &[])];
    assert!(hashtag_efficiency(&posts, 2).is_empty());
}

#[test]
fn hashtag_below_min_occurrences_excluded() {
    let posts = vec![
        tagged(0.1, &["#three", "#two"]),
        tagged(0.2, &["#three", "#two"]),
        tagged(0.3, &["#three"]),
    ];
    let rows = hashtag_efficiency(&posts, 3);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].key, "#three");
    assert_eq!(rows[0].count, 3);
}

#[test]
fn hashtag_lift_is_mean_minus_overall() {
    let posts = vec![
        tagged(0.4, &["#a"]),
        tagged(0.2, &["#a"]),
        tagged(0.0, &[]),
    ];
    let rows = hashtag_efficiency(&posts, 2);
    assert_eq!(rows.len(), 1);
    assert!(approx(rows[0].mean, 0.3));
    assert!(approx(rows[0].lift, 0.1));
}

#[test]
fn hashtag_ignores_posts_without_ratio() {
    let mut undefined = tagged(0.0, &["#x"]);
    undefined.engagement_rate_view_adjusted = None;
    let posts = vec![undefined, tagged(0.2, &["#x"])];
    assert!(hashtag_efficiency(&posts, 2).is_empty());
}

#[test]
fn hashtag_ties_keep_first_seen_order() {
    let posts = vec![
        tagged(0.1, &["#first", "#second"]),
        tagged(0.1, &["#second", "#first"]),
    ];
    let rows = hashtag_efficiency(&posts, 2);
    let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["#first", "#second"]);
}

// ---------------------------------------------------------------------------
// theme_lift
// ---------------------------------------------------------------------------

#[test]
fn theme_lift_requires_two_posts() {
    let posts = vec![
        themed(Some(0.3), Theme::Grammar),
        themed(Some(0.1), Theme::Vocabulary),
        themed(Some(0.2), Theme::Vocabulary),
        themed(None, Theme::Grammar),
    ];
    let rows = theme_lift(&posts);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].key, Theme::Vocabulary);
    assert!(approx(rows[0].mean, 0.15));
    assert!(approx(rows[0].lift, 0.15 - 0.2));
}

// ---------------------------------------------------------------------------
// posting_windows
// ---------------------------------------------------------------------------

#[test]
fn posting_windows_bucket_by_utc_hour_and_weekday() {
    // 2025-05-05 is a Monday.
    let mon9 = Utc.with_ymd_and_hms(2025, 5, 5, 9, 0, 0).unwrap();
    let posts = vec![
        at(0.10, mon9),
        at(0.20, mon9 + Duration::days(7)),
        at(0.50, mon9 + Duration::days(2) + Duration::hours(9)),
        at(0.30, mon9 + Duration::days(9) + Duration::hours(9)),
        at(0.60, mon9 + Duration::days(3)),
    ];
    let windows = posting_windows(&posts);

    assert_eq!(windows.hours.len(), 2);
    assert_eq!(windows.hours[0].slot, 18);
    assert!(approx(windows.hours[0].mean, 0.4));
    assert_eq!(windows.hours[1].slot, 9);
    assert_eq!(windows.hours[1].count, 3);
    assert!(approx(windows.hours[1].mean, 0.3));

    assert_eq!(windows.weekdays.len(), 2);
    assert_eq!(windows.weekdays[0].slot, 2);
    assert_eq!(windows.weekdays[1].slot, 0);
    assert!(approx(windows.weekdays[1].mean, 0.15));
}

#[test]
fn posting_windows_skip_untimestamped_posts() {
    let posts = vec![with_ratio(0.1), with_ratio(0.2)];
    let windows = posting_windows(&posts);
    assert!(windows.hours.is_empty());
    assert!(windows.weekdays.is_empty());
}

#[test]
fn posting_windows_keep_top_three() {
    let t0 = Utc.with_ymd_and_hms(2025, 5, 5, 0, 0, 0).unwrap();
    let mut posts = Vec::new();
    for hour in 0..5_i32 {
        for week in 0..2 {
            posts.push(at(
                f64::from(hour) / 10.0,
                t0 + Duration::days(7 * week) + Duration::hours(i64::from(hour)),
            ));
        }
    }
    let windows = posting_windows(&posts);
    let hours: Vec<u32> = windows.hours.iter().map(|w| w.slot).collect();
    assert_eq!(hours, vec![4, 3, 2]);
}

// ---------------------------------------------------------------------------
// caption_length_vs_engagement
// ---------------------------------------------------------------------------

#[test]
fn caption_bucket_boundaries_are_inclusive() {
    let posts = vec![
        captioned(Some(0.1), 20),
        captioned(Some(0.2), 21),
        captioned(Some(0.3), 120),
        captioned(Some(0.4), 121),
    ];
    let analysis = caption_length_vs_engagement(&posts);
    let counts: Vec<(&str, usize)> = analysis
        .buckets
        .iter()
        .map(|b| (b.label, b.count))
        .collect();
    assert_eq!(
        counts,
        vec![
            ("0-20", 1),
            ("21-40", 1),
            ("41-60", 0),
            ("61-80", 0),
            ("81-120", 1),
            ("121+", 1),
        ]
    );
    assert!(approx(analysis.buckets[2].mean, 0.0));
    assert!(approx(analysis.buckets[4].mean, 0.3));
}

#[test]
fn caption_pearson_undefined_for_identical_lengths() {
    let posts = vec![captioned(Some(0.1), 30), captioned(Some(0.5), 30)];
    assert!(caption_length_vs_engagement(&posts).pearson_r.is_none());
}

#[test]
fn caption_pearson_positive_when_longer_captions_do_better() {
    let posts = vec![
        captioned(Some(0.1), 10),
        captioned(Some(0.2), 50),
        captioned(Some(0.3), 90),
        captioned(None, 500),
    ];
    let r = caption_length_vs_engagement(&posts).pearson_r.unwrap();
    assert!(approx(r, 1.0));
}

#[test]
fn length_bucket_contains() {
    assert!(CAPTION_LENGTH_BUCKETS[0].contains(0));
    assert!(!CAPTION_LENGTH_BUCKETS[0].contains(21));
    assert!(CAPTION_LENGTH_BUCKETS[5].contains(10_000));
}

#[test]
fn caption_pearson_undefined_for_identical_ratios() {
    let posts = vec![
        captioned(Some(1.0 / 10.0), 10),
        captioned(Some(3.0 / 30.0), 40),
        captioned(Some(7.0 / 70.0), 90),
    ];
    assert!(caption_length_vs_engagement(&posts).pearson_r.is_none());
}
