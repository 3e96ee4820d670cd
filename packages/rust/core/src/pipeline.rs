//! End-to-end `run` pipeline: manifest → fetch → unpack → package → assemble → publish.

use std::path::PathBuf;
use std::time::Instant;

use tracing::{debug, info, instrument};

use coursechef_bundle::{create_predictable_zip, sha256_file};
use coursechef_fetch::{ArchiveFetcher, FetchSummary};
use coursechef_scorm::{UnpackSummary, prepare_lesson_directory, unpack_all};
use coursechef_shared::{ChefConfig, LicenseInfo, Manifest, Result, StagingPaths};

use crate::assembler::{self, AssembleConfig};
use crate::publisher::{PublishReport, Publisher};

/// Configuration for a full chef run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Channel, license, label, staging, and source settings.
    pub chef: ChefConfig,
    /// Tool version recorded in the published tree.
    pub tool_version: String,
}

/// Result of a full chef run.
#[derive(Debug)]
pub struct RunResult {
    /// Courses in the manifest.
    pub courses: usize,
    /// Lessons in the manifest.
    pub lessons: usize,
    /// Document attachments in the manifest.
    pub documents: usize,
    /// Archive staging summary.
    pub fetch: FetchSummary,
    /// Archive unpacking summary.
    pub unpack: UnpackSummary,
    /// Lesson archives packaged this run (reused ones excluded).
    pub packaged: usize,
    /// Publish outcome, including the tree path.
    pub publish: PublishReport,
    /// Total elapsed time.
    pub elapsed: std::time::Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called when a lesson archive is packaged or reused.
    fn lesson_packaged(&self, course: &str, lesson: &str, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, result: &RunResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn lesson_packaged(&self, _course: &str, _lesson: &str, _current: usize, _total: usize) {}
    fn done(&self, _result: &RunResult) {}
}

/// Run the full chef pipeline.
///
/// 1. Load the course manifest
/// 2. Stage source archives (skip ones already on disk)
/// 3. Unpack SCORM archives (skip ones already extracted)
/// 4. Prepare and package each lesson, attaching its archive
/// 5. Assemble the channel tree
/// 6. Publish
///
/// Steps are strictly sequential; staging doubles as a cache, so re-running
/// after a failure resumes where the previous run left off.
#[instrument(skip_all, fields(staging = %config.chef.staging.root))]
pub async fn run(
    config: &RunConfig,
    publisher: &dyn Publisher,
    progress: &dyn ProgressReporter,
) -> Result<RunResult> {
    let start = Instant::now();
    let staging = StagingPaths::new(&config.chef.staging.root);

    // --- Phase 1: Manifest ---
    progress.phase("Loading course manifest");
    let mut manifest = Manifest::load(&staging.manifest())?;

    info!(
        courses = manifest.course_count(),
        lessons = manifest.lesson_count(),
        documents = manifest.document_count(),
        "manifest loaded"
    );

    // --- Phase 2: Stage source archives ---
    progress.phase("Staging source archives");
    let fetcher = ArchiveFetcher::new(staging.clone())?;
    let fetch = fetcher.ensure_downloaded(&config.chef.sources).await?;

    // --- Phase 3: Unpack ---
    progress.phase("Unpacking SCORM archives");
    let unpack = unpack_all(&staging, &manifest)?;

    // --- Phase 4: Prepare & package lessons ---
    progress.phase("Packaging lessons");
    let total = manifest.lesson_count();
    let mut packaged = 0;
    let mut current = 0;

    for (course, lessons) in manifest.courses_mut() {
        for (lesson, descriptor) in lessons.iter_mut() {
            current += 1;

            let lesson_dir = staging.lesson_dir(course, lesson);
            if !lesson_dir.exists() {
                prepare_lesson_directory(&staging, course, lesson, descriptor)?;
            }

            let zipfile = staging.lesson_zip(course, lesson);
            if zipfile.exists() {
                debug!(course = %course, lesson = %lesson, "lesson archive present, reusing");
            } else {
                let written = create_predictable_zip(&lesson_dir)?;
                let digest = sha256_file(&written)?;
                debug!(course = %course, lesson = %lesson, sha256 = %digest, "lesson packaged");
                packaged += 1;
            }

            descriptor.zipfile = Some(zipfile);
            progress.lesson_packaged(course, lesson, current, total);
        }
    }

    // --- Phase 5: Assemble ---
    progress.phase("Assembling channel tree");
    let assemble_config = make_assemble_config(config, &staging);
    let channel = assembler::assemble(&assemble_config, &manifest)?;

    // --- Phase 6: Publish ---
    progress.phase("Publishing channel tree");
    let publish = publisher.publish(&channel)?;

    let result = RunResult {
        courses: manifest.course_count(),
        lessons: manifest.lesson_count(),
        documents: manifest.document_count(),
        fetch,
        unpack,
        packaged,
        publish,
        elapsed: start.elapsed(),
    };

    progress.done(&result);

    info!(
        courses = result.courses,
        lessons = result.lessons,
        documents = result.documents,
        packaged = result.packaged,
        elapsed_ms = result.elapsed.as_millis(),
        "chef run complete"
    );

    Ok(result)
}

/// Project the run configuration into the assembler's view of the channel.
fn make_assemble_config(config: &RunConfig, staging: &StagingPaths) -> AssembleConfig {
    let channel = &config.chef.channel;
    AssembleConfig {
        title: channel.title.clone(),
        source_id: channel.source_id.clone(),
        source_domain: channel.source_domain.clone(),
        language: channel.language.clone(),
        description: channel.description.clone(),
        thumbnail: channel.thumbnail.as_ref().map(PathBuf::from),
        author: channel.author.clone(),
        license: LicenseInfo::from(&config.chef.license),
        categories: config.chef.labels.categories.clone(),
        grade_levels: config.chef.labels.grade_levels.clone(),
        staging: staging.clone(),
    }
}
