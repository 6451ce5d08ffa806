//! Normalization from [`RawPost`] records to [`Post`].

use chrono::{DateTime, Utc};
use postlens_core::{MediaType, Post, RawPost};

use crate::classify::{extract_hashtags, infer_theme};
use crate::error::ConversionError;

const PERMALINK_BASE: &str = "https://www.instagram.com/p/";

/// Converts one raw post into a [`Post`].
///
/// Missing optional fields map to 0, empty, or `None`. Shares and saves are
/// always 0.
///
/// # Errors
///
/// Returns [`ConversionError`] naming the field when a counter is negative
/// or a present timestamp is not RFC 3339.
#[allow(clippy::cast_precision_loss)]
pub fn normalize_post(raw: &RawPost) -> Result<Post, ConversionError> {
    let view_count = count("view_count", raw.view_count)?;
    let play_count = count("play_count", raw.play_count)?;
    let likes = count("like_count", raw.like_count)?;
    let comments = count("comment_count", raw.comment_count)?;

    let views = if view_count > 0 { view_count } else { play_count };
    let engagement_rate_view_adjusted =
        (views > 0).then(|| (likes + comments) as f64 / views as f64);

    let timestamp = raw
        .taken_at
        .as_deref()
        .map(parse_timestamp)
        .transpose()?;

    let caption = raw.caption_text.as_deref().unwrap_or_default().trim().to_owned();
    let hashtags = extract_hashtags(&caption);
    let theme = infer_theme(&hashtags, &caption);

    let permalink = raw
        .code
        .as_deref()
        .filter(|c| !c.is_empty())
        .map(|c| format!("{PERMALINK_BASE}{c}/"));

    Ok(Post {
        views,
        likes,
        comments,
        shares: 0,
        saves: 0,
        engagement_rate_view_adjusted,
        caption_len: caption.chars().count(),
        caption,
        hashtags,
        timestamp,
        theme,
        media_type: MediaType::from_code(raw.media_type),
        permalink,
    })
}

fn count(field: &'static str, value: Option<i64>) -> Result<u64, ConversionError> {
    match value {
        None => Ok(0),
        Some(v) => u64::try_from(v).map_err(|_| ConversionError::new(field, format!("negative count {v}"))),
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, ConversionError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ConversionError::new("taken_at", format!("{raw:?}: {e}")))
}
