//! Prepared lesson directories.
//!
//! A prepared lesson is a self-contained web bundle: a launcher
//! `index.html` at the directory root plus the SCORM content tree copied
//! underneath it. Packaging zips this directory as-is.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use coursechef_shared::{ChefError, LessonDescriptor, Result, StagingPaths};

/// Entry point SCORM packages ship inside their content tree.
const SCORM_ENTRY: &str = "scormcontent/index.html";

/// Launcher page written at the root of every prepared lesson directory.
const LAUNCHER_HTML: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <meta http-equiv="refresh" content="0; url=scormcontent/index.html">
    <title>Loading lesson</title>
  </head>
  <body>
    <p><a href="scormcontent/index.html">Open lesson</a></p>
  </body>
</html>
"#;

/// Build the prepared directory for one lesson.
///
/// Copies the extracted `scormcontent/` tree under the lesson directory and
/// writes the launcher at its root. Fails when the extracted archive has no
/// SCORM entry point. Callers skip this step when the lesson directory
/// already exists.
#[instrument(skip_all, fields(course = %course, lesson = %lesson))]
pub fn prepare_lesson_directory(
    staging: &StagingPaths,
    course: &str,
    lesson: &str,
    descriptor: &LessonDescriptor,
) -> Result<PathBuf> {
    let extracted = staging.extracted(&descriptor.file);
    let entry = extracted.join(SCORM_ENTRY);
    if !entry.exists() {
        return Err(ChefError::archive(format!(
            "no SCORM entry point at {}",
            entry.display()
        )));
    }

    let lesson_dir = staging.lesson_dir(course, lesson);
    copy_tree(
        &extracted.join("scormcontent"),
        &lesson_dir.join("scormcontent"),
    )?;

    let launcher = lesson_dir.join("index.html");
    std::fs::write(&launcher, LAUNCHER_HTML).map_err(|e| ChefError::io(&launcher, e))?;

    debug!(path = %lesson_dir.display(), "lesson directory prepared");
    Ok(lesson_dir)
}

/// Recursively copy a directory tree.
fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst).map_err(|e| ChefError::io(dst, e))?;

    for entry in std::fs::read_dir(src).map_err(|e| ChefError::io(src, e))? {
        let entry = entry.map_err(|e| ChefError::io(src, e))?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        let file_type = entry.file_type().map_err(|e| ChefError::io(&from, e))?;

        if file_type.is_dir() {
            copy_tree(&from, &to)?;
        } else {
            std::fs::copy(&from, &to).map_err(|e| ChefError::io(&from, e))?;
        }
    }

    Ok(())
}
