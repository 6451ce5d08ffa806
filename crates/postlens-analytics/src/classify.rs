//! Hashtag extraction and keyword-based theme inference.

use std::collections::HashSet;
use std::sync::LazyLock;

use postlens_core::Theme;
use regex::Regex;

/// Theme assigned when no rule matches.
pub const DEFAULT_THEME: Theme = Theme::GeneralEnglish;

/// Ordered theme rules. The first rule with a keyword contained in the
/// lowercased hashtags-plus-caption text wins.
pub const THEME_RULES: &[(Theme, &[&str])] = &[
    (
        Theme::Grammar,
        &["grammar", "grammartips", "pasttense", "presentperfect", "articles", "tenses"],
    ),
    (
        Theme::Vocabulary,
        &["vocabulary", "vocab", "wordoftheday", "phrases", "idioms", "phrasalverbs"],
    ),
    (
        Theme::Pronunciation,
        &["pronunciation", "accent", "phonetics", "ipa", "sounds"],
    ),
    (
        Theme::ExamPrep,
        &["ielts", "toefl", "toeic", "cambridge", "pte"],
    ),
    (
        Theme::SlangCulture,
        &["slang", "culture", "britishvsamerican", "usvsuk"],
    ),
    (
        Theme::BusinessEnglish,
        &["businessenglish", "interview", "resume", "cv", "email"],
    ),
    (
        Theme::StudyTips,
        &["study", "tips", "learnenglish", "englishlearning"],
    ),
];

static HASHTAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\w+").expect("valid hashtag regex"));

/// Extracts `#tag` tokens from `text`, keeping the `#` and its case.
///
/// Repeats are dropped; the first occurrence keeps its position.
#[must_use]
pub fn extract_hashtags(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    HASHTAG_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|tag| seen.insert(*tag))
        .map(str::to_owned)
        .collect()
}

/// Infers the content theme from hashtags and caption.
#[must_use]
pub fn infer_theme(hashtags: &[String], caption: &str) -> Theme {
    let blob = format!("{} {}", hashtags.join(" "), caption).to_lowercase();
    THEME_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| blob.contains(kw)))
        .map_or(DEFAULT_THEME, |(theme, _)| *theme)
}
