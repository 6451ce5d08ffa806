//! Engagement analytics over normalized posts: normalization, aggregation,
//! and report formatting.

pub mod aggregate;
pub mod classify;
pub mod error;
pub mod normalize;
pub mod region;
pub mod report;
pub mod stats;

pub use aggregate::{summarize, AccountSummary, AnalysisSettings, LiftRow};
pub use error::ConversionError;
pub use normalize::normalize_post;
pub use region::guess_region;
pub use report::{console_summary_lines, format_post_line, SummaryRow, SUMMARY_COLUMNS};
