//! Helpers shared by this crate's tests.

use std::io::Write;
use std::path::PathBuf;

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use coursechef_shared::StagingPaths;

/// Fresh staging area under the system temp dir.
pub(crate) fn temp_staging() -> (PathBuf, StagingPaths) {
    let dir = std::env::temp_dir().join(format!("chef-scorm-test-{}", uuid::Uuid::now_v7()));
    std::fs::create_dir_all(&dir).unwrap();
    let staging = StagingPaths::new(&dir);
    (dir, staging)
}

/// Write a minimal SCORM archive for `file` into the staging area.
pub(crate) fn make_scorm_archive(staging: &StagingPaths, file: &str) {
    make_archive_with_entries(
        staging,
        file,
        &[
            (
                "scormcontent/index.html",
                b"<html><body>lesson</body></html>" as &[u8],
            ),
            ("scormcontent/assets/form_a.pdf", b"%PDF-1.4 fake form"),
            ("scormcontent/lib/app.js", b"console.log('lesson');"),
        ],
    );
}

/// Write an archive with the given entries into the staging area.
pub(crate) fn make_archive_with_entries(
    staging: &StagingPaths,
    file: &str,
    entries: &[(&str, &[u8])],
) {
    let path = staging.archive(file);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();

    let out = std::fs::File::create(&path).unwrap();
    let mut writer = ZipWriter::new(out);
    let options = SimpleFileOptions::default();

    for (name, content) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(content).unwrap();
    }
    writer.finish().unwrap();
}
