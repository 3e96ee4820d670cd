//! SCORM archive extraction into the staging area.

use std::fs::File;

use tracing::{debug, info, instrument};
use zip::ZipArchive;

use coursechef_shared::{ChefError, Manifest, Result, StagingPaths};

/// Summary of a completed extraction pass.
#[derive(Debug, Clone, Default)]
pub struct UnpackSummary {
    /// Archives expanded this run.
    pub unpacked: usize,
    /// Lessons whose extraction directory already existed.
    pub skipped: usize,
}

/// Expand every staged archive referenced by the manifest.
///
/// Extraction is idempotent per lesson: a directory that already exists is
/// left untouched. Lessons sharing an archive token share its extraction.
#[instrument(skip_all, fields(lessons = manifest.lesson_count()))]
pub fn unpack_all(staging: &StagingPaths, manifest: &Manifest) -> Result<UnpackSummary> {
    let mut summary = UnpackSummary::default();

    for (_course, lessons) in manifest.courses() {
        for (_lesson, descriptor) in lessons {
            let target = staging.extracted(&descriptor.file);
            if target.exists() {
                debug!(file = %descriptor.file, "already extracted, skipping");
                summary.skipped += 1;
                continue;
            }

            unpack_archive(staging, &descriptor.file)?;
            summary.unpacked += 1;
        }
    }

    info!(
        unpacked = summary.unpacked,
        skipped = summary.skipped,
        "extraction complete"
    );

    Ok(summary)
}

/// Expand a single staged archive into its extraction directory.
fn unpack_archive(staging: &StagingPaths, file: &str) -> Result<()> {
    let archive_path = staging.archive(file);
    let target = staging.extracted(file);

    let reader = File::open(&archive_path).map_err(|e| ChefError::io(&archive_path, e))?;
    let mut archive = ZipArchive::new(reader)
        .map_err(|e| ChefError::archive(format!("cannot open {}: {e}", archive_path.display())))?;

    std::fs::create_dir_all(&target).map_err(|e| ChefError::io(&target, e))?;
    archive.extract(&target).map_err(|e| {
        ChefError::archive(format!("cannot extract {}: {e}", archive_path.display()))
    })?;

    debug!(file, entries = archive.len(), "archive extracted");
    Ok(())
}
