//! Console report and summary CSV for one account.

use std::path::{Path, PathBuf};

use anyhow::Context;
use postlens_analytics::{console_summary_lines, format_post_line, AccountSummary, SummaryRow};
use postlens_core::Post;

/// `{output_dir}/{username}_summary.csv`
pub(crate) fn summary_path(output_dir: &Path, username: &str) -> PathBuf {
    output_dir.join(format!("{username}_summary.csv"))
}

/// Writes the header and the single summary row, replacing any earlier file.
pub(crate) fn write_summary_csv(
    output_dir: &Path,
    username: &str,
    row: &SummaryRow,
) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;

    let path = summary_path(output_dir, username);
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("opening {}", path.display()))?;
    writer
        .serialize(row)
        .with_context(|| format!("writing {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flushing {}", path.display()))?;

    Ok(path)
}

pub(crate) fn print_report(summary: &AccountSummary, posts: &[Post]) {
    for line in console_summary_lines(summary) {
        println!("{line}");
    }
    println!();
    println!("Per-post snapshot:");
    for (i, post) in posts.iter().enumerate() {
        println!("{}", format_post_line(i + 1, post));
    }
}

#[cfg(test)]
#[path = "output_test.rs"]
mod tests;
