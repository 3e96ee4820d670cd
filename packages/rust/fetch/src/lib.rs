//! Cloud file store staging for coursechef.
//!
//! [`ArchiveFetcher`] downloads the configured source archives into the
//! staging area, skipping anything already on disk.

pub mod fetcher;

pub use fetcher::{ArchiveFetcher, FetchSummary};
