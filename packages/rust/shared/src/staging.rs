//! Staging directory layout.
//!
//! Everything the pipeline reads or writes lives under one root (default
//! `chefdata/`):
//!
//! ```text
//! chefdata/
//! ├── course_data.json          the course manifest
//! ├── archives/<file>.zip       downloaded source archives
//! ├── extracted/<file>/         raw SCORM trees
//! ├── <course>/<lesson>/        prepared lesson directories
//! ├── <course>/<lesson>.zip     packaged lesson archives
//! └── channel_tree.json         published output
//! ```

use std::path::{Path, PathBuf};

use crate::ids;

/// Resolves every staging path from the root directory.
#[derive(Debug, Clone)]
pub struct StagingPaths {
    root: PathBuf,
}

impl StagingPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The staging root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The course manifest document.
    pub fn manifest(&self) -> PathBuf {
        self.root.join("course_data.json")
    }

    /// Downloaded source archive for an archive token.
    pub fn archive(&self, file: &str) -> PathBuf {
        self.root.join("archives").join(format!("{file}.zip"))
    }

    /// Raw extraction directory for an archive token.
    pub fn extracted(&self, file: &str) -> PathBuf {
        self.root.join("extracted").join(file)
    }

    /// Prepared directory for one lesson.
    pub fn lesson_dir(&self, course: &str, lesson: &str) -> PathBuf {
        self.root.join(ids::slug(course)).join(lesson)
    }

    /// Packaged archive for one lesson, sibling to its prepared directory.
    pub fn lesson_zip(&self, course: &str, lesson: &str) -> PathBuf {
        self.root
            .join(ids::slug(course))
            .join(format!("{lesson}.zip"))
    }

    /// Backing file for a document attached to a lesson. Documents ship
    /// inside the SCORM assets of their lesson.
    pub fn document(&self, course: &str, lesson: &str, doc: &str) -> PathBuf {
        self.lesson_dir(course, lesson)
            .join("scormcontent")
            .join("assets")
            .join(doc)
    }

    /// The published channel tree.
    pub fn channel_tree(&self) -> PathBuf {
        self.root.join("channel_tree.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_rooted_and_course_scoped() {
        let staging = StagingPaths::new("chefdata");

        assert_eq!(staging.manifest(), Path::new("chefdata/course_data.json"));
        assert_eq!(
            staging.archive("dm_unit1"),
            Path::new("chefdata/archives/dm_unit1.zip")
        );
        assert_eq!(
            staging.extracted("dm_unit1"),
            Path::new("chefdata/extracted/dm_unit1")
        );
        assert_eq!(
            staging.lesson_dir("Digital Marketing", "Lesson 1"),
            Path::new("chefdata/digital_marketing/Lesson 1")
        );
        assert_eq!(
            staging.lesson_zip("Digital Marketing", "Lesson 1"),
            Path::new("chefdata/digital_marketing/Lesson 1.zip")
        );
        assert_eq!(
            staging.document("Digital Marketing", "Lesson 1", "form_a.pdf"),
            Path::new("chefdata/digital_marketing/Lesson 1/scormcontent/assets/form_a.pdf")
        );
    }
}
