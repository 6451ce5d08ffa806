//! Country/region guess from the profile bio.

pub const UNKNOWN_REGION: &str = "Unknown";

/// Ordered region rules; keywords are matched as substrings of the
/// lowercased bio and the first matching region wins.
pub const REGION_RULES: &[(&str, &[&str])] = &[
    ("United States", &["usa", "us", "america", "american"]),
    ("United Kingdom", &["uk", "united kingdom", "british", "england"]),
    ("Canada", &["canada", "canadian"]),
    ("Australia", &["australia", "aussie", "australian"]),
    ("India", &["india", "indian"]),
    ("Poland", &["poland", "polish"]),
    ("France", &["france", "french"]),
    ("Germany", &["germany", "german"]),
    ("Spain", &["spain", "spanish"]),
    ("Italy", &["italy", "italian"]),
    ("Brazil", &["brazil", "brazilian"]),
    ("Mexico", &["mexico", "mexican"]),
    ("China", &["china", "chinese"]),
    ("Japan", &["japan", "japanese"]),
    ("Korea", &["korea", "korean"]),
    ("Turkey", &["turkey", "turkish"]),
];

#[must_use]
pub fn guess_region(bio: &str) -> &'static str {
    if bio.trim().is_empty() {
        return UNKNOWN_REGION;
    }
    let bio = bio.to_lowercase();
    REGION_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| bio.contains(kw)))
        .map_or(UNKNOWN_REGION, |(region, _)| *region)
}
