//! Content-platform adapter for postlens.
//!
//! Authenticates against the platform, caches the session on disk, and
//! fetches profile identity and recent posts as [`postlens_core::RawPost`]
//! records.

pub mod client;
pub mod error;
pub mod provider;
pub mod session;

mod types;

pub use client::{Credentials, ProviderClient};
pub use error::ProviderError;
pub use provider::ContentProvider;
pub use session::{SessionCache, StoredSession};
