//! Source archive staging from the cloud file store.
//!
//! Downloads each configured archive into the staging area, one at a time,
//! in configuration order. Staging is idempotent: an archive already on
//! disk is never fetched again, so a re-run only pulls what is missing.

use std::path::Path;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, instrument};
use url::Url;

use coursechef_shared::{ChefError, Result, SourceArchive, StagingPaths};

/// User-Agent string for download requests.
const USER_AGENT: &str = concat!("coursechef/", env!("CARGO_PKG_VERSION"));

/// Per-request timeout. Source archives run to tens of megabytes.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

// ---------------------------------------------------------------------------
// FetchSummary
// ---------------------------------------------------------------------------

/// Summary of a completed staging pass.
#[derive(Debug, Clone, Default)]
pub struct FetchSummary {
    /// Archives downloaded this run.
    pub downloaded: usize,
    /// Archives already present and left untouched.
    pub skipped: usize,
}

// ---------------------------------------------------------------------------
// ArchiveFetcher
// ---------------------------------------------------------------------------

/// Downloads source archives into the staging area.
pub struct ArchiveFetcher {
    client: Client,
    staging: StagingPaths,
}

impl ArchiveFetcher {
    /// Create a fetcher for the given staging area.
    pub fn new(staging: StagingPaths) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ChefError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, staging })
    }

    /// Ensure every source archive is present on disk.
    ///
    /// Any download failure aborts the run. A partially staged area is safe
    /// to resume because completed archives are skipped next time.
    #[instrument(skip_all, fields(sources = sources.len()))]
    pub async fn ensure_downloaded(&self, sources: &[SourceArchive]) -> Result<FetchSummary> {
        let mut summary = FetchSummary::default();

        for source in sources {
            let target = self.staging.archive(&source.file);
            if target.exists() {
                debug!(file = %source.file, "archive already staged, skipping");
                summary.skipped += 1;
                continue;
            }

            let url = Url::parse(&source.url)
                .map_err(|e| ChefError::Network(format!("{}: invalid url: {e}", source.name)))?;

            info!(name = %source.name, %url, "downloading archive");
            let bytes = self.fetch(&url).await?;
            write_atomic(&target, &bytes)?;
            summary.downloaded += 1;
        }

        info!(
            downloaded = summary.downloaded,
            skipped = summary.skipped,
            "archive staging complete"
        );

        Ok(summary)
    }

    /// Fetch a single archive body.
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| ChefError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChefError::Network(format!("{url}: HTTP {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ChefError::Network(format!("{url}: body read failed: {e}")))?;

        Ok(body.to_vec())
    }
}

/// Write bytes via a temp file and atomic rename, creating parent dirs.
fn write_atomic(target: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ChefError::io(parent, e))?;
    }

    let temp = target.with_extension("zip.tmp");
    std::fs::write(&temp, bytes).map_err(|e| ChefError::io(&temp, e))?;
    std::fs::rename(&temp, target).map_err(|e| ChefError::io(target, e))?;

    Ok(())
}
