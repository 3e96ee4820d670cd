//! Reproducible lesson packaging.
//!
//! A prepared lesson directory is packaged into a sibling `<dir>.zip` with
//! a fixed entry order, timestamp, permissions, and compression method, so
//! archives depend only on file paths and contents. Re-packaging unchanged
//! content yields a byte-identical archive.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use coursechef_shared::{ChefError, Result};

/// Package a prepared directory into a reproducible `<dir>.zip`.
///
/// Entries are the directory's contents, walked in sorted path order. The
/// archive is written to a temp file and renamed into place.
#[instrument(skip_all, fields(dir = %dir.display()))]
pub fn create_predictable_zip(dir: &Path) -> Result<PathBuf> {
    let target = zip_path_for(dir)?;
    let temp = target.with_extension("zip.tmp");

    let out = File::create(&temp).map_err(|e| ChefError::io(&temp, e))?;
    let mut writer = ZipWriter::new(out);

    // Fixed timestamp (1980-01-01) and permissions keep output independent
    // of file mtimes and umask.
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default())
        .unix_permissions(0o644);

    let mut entries = 0usize;
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry =
            entry.map_err(|e| ChefError::archive(format!("walk {}: {e}", dir.display())))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let rel = entry
            .path()
            .strip_prefix(dir)
            .map_err(|e| ChefError::archive(format!("{}: {e}", entry.path().display())))?;
        let name = zip_entry_name(rel);

        writer
            .start_file(name.as_str(), options)
            .map_err(|e| ChefError::archive(format!("cannot add {name}: {e}")))?;

        let mut source = File::open(entry.path()).map_err(|e| ChefError::io(entry.path(), e))?;
        std::io::copy(&mut source, &mut writer).map_err(|e| ChefError::io(entry.path(), e))?;
        entries += 1;
    }

    writer
        .finish()
        .map_err(|e| ChefError::archive(format!("cannot finish {}: {e}", temp.display())))?;

    std::fs::rename(&temp, &target).map_err(|e| ChefError::io(&target, e))?;

    debug!(entries, path = %target.display(), "directory packaged");
    Ok(target)
}

/// Archive path for a prepared directory: sibling `<dir>.zip`.
fn zip_path_for(dir: &Path) -> Result<PathBuf> {
    let name = dir.file_name().ok_or_else(|| {
        ChefError::archive(format!(
            "cannot package {}: no directory name",
            dir.display()
        ))
    })?;

    let mut file_name = name.to_os_string();
    file_name.push(".zip");
    Ok(dir.with_file_name(file_name))
}

/// Forward-slash entry name for a relative path.
fn zip_entry_name(rel: &Path) -> String {
    rel.iter()
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
