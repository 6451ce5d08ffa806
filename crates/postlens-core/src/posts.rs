//! Post and profile types shared by the provider, analytics, and CLI crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A post record as delivered by the content platform.
///
/// Every field is optional on the wire. Counters are signed so that a
/// malformed negative value survives deserialization and can be rejected
/// during normalization with a field-level error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPost {
    #[serde(default)]
    pub id: Option<String>,
    /// Short code used in the public permalink.
    #[serde(default)]
    pub code: Option<String>,
    /// Platform content-type code: 1=photo, 2=video, 8=album.
    #[serde(default)]
    pub media_type: Option<i64>,
    #[serde(default)]
    pub view_count: Option<i64>,
    #[serde(default)]
    pub play_count: Option<i64>,
    #[serde(default)]
    pub like_count: Option<i64>,
    #[serde(default)]
    pub comment_count: Option<i64>,
    #[serde(default)]
    pub caption_text: Option<String>,
    /// Creation time as an RFC 3339 string.
    #[serde(default)]
    pub taken_at: Option<String>,
}

/// Content type of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    Photo,
    Video,
    Album,
    Unknown,
}

impl MediaType {
    /// Maps a platform content-type code. Unrecognised codes are `Unknown`.
    #[must_use]
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(1) => MediaType::Photo,
            Some(2) => MediaType::Video,
            Some(8) => MediaType::Album,
            _ => MediaType::Unknown,
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::Photo => write!(f, "Photo"),
            MediaType::Video => write!(f, "Video"),
            MediaType::Album => write!(f, "Album"),
            MediaType::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Coarse content category inferred from caption and hashtag keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Theme {
    Grammar,
    Vocabulary,
    Pronunciation,
    ExamPrep,
    SlangCulture,
    BusinessEnglish,
    StudyTips,
    GeneralEnglish,
}

impl Theme {
    /// Label written to reports.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Theme::Grammar => "grammar",
            Theme::Vocabulary => "vocabulary",
            Theme::Pronunciation => "pronunciation",
            Theme::ExamPrep => "exam/test prep",
            Theme::SlangCulture => "slang/culture",
            Theme::BusinessEnglish => "business english",
            Theme::StudyTips => "study tips",
            Theme::GeneralEnglish => "general english",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A normalized post ready for aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    /// Always 0: the platform does not expose shares.
    pub shares: u64,
    /// Always 0: the platform does not expose saves.
    pub saves: u64,
    /// `(likes + comments) / views`; `Some` iff `views > 0`.
    pub engagement_rate_view_adjusted: Option<f64>,
    pub caption: String,
    /// Caption length in characters.
    pub caption_len: usize,
    /// Hashtags with the leading `#`, case preserved, first-seen order.
    pub hashtags: Vec<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub theme: Theme,
    pub media_type: MediaType,
    pub permalink: Option<String>,
}

/// Profile metadata for one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileIdentity {
    pub display_name: String,
    pub bio: String,
    pub follower_count: u64,
    pub following_count: u64,
    pub account_id: String,
}
