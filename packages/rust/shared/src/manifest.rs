//! The course manifest: the declarative input that drives a chef run.
//!
//! `course_data.json` maps course names to lessons:
//!
//! ```json
//! {
//!   "Digital Marketing": {
//!     "Lesson 1": {
//!       "title": "Unit 1 - Getting Started",
//!       "file": "dm_unit1",
//!       "docs": ["form_a.pdf"]
//!     }
//!   }
//! }
//! ```
//!
//! Insertion order in the document is the build order of the channel tree,
//! so courses and lessons are held in [`IndexMap`]s rather than sorted maps.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ChefError, Result};

/// A single lesson entry in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonDescriptor {
    /// Display title, e.g. `"Unit 1 - Getting Started"`.
    pub title: String,

    /// Archive token locating the lesson's staged content.
    pub file: String,

    /// Document attachments, in display order.
    #[serde(default)]
    pub docs: Vec<String>,

    /// Path to the packaged lesson archive, attached during preparation.
    /// Never present in the source document.
    #[serde(skip)]
    pub zipfile: Option<PathBuf>,
}

/// The parsed course manifest. Iteration follows document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    courses: IndexMap<String, IndexMap<String, LessonDescriptor>>,
}

impl Manifest {
    /// Load and validate the manifest from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ChefError::manifest(format!("cannot read {}: {e}", path.display())))?;
        Self::parse(&content)
    }

    /// Parse and validate a manifest from a JSON string.
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Manifest = serde_json::from_str(content)
            .map_err(|e| ChefError::manifest(format!("malformed course manifest: {e}")))?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Shape checks beyond what deserialization enforces.
    fn validate(&self) -> Result<()> {
        for (course, lessons) in &self.courses {
            if course.trim().is_empty() {
                return Err(ChefError::manifest("empty course name"));
            }
            for (lesson, descriptor) in lessons {
                if descriptor.title.trim().is_empty() {
                    return Err(ChefError::manifest(format!(
                        "lesson '{lesson}' in course '{course}' has an empty title"
                    )));
                }
                if descriptor.file.trim().is_empty() {
                    return Err(ChefError::manifest(format!(
                        "lesson '{lesson}' in course '{course}' has an empty file token"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Iterate courses in document order.
    pub fn courses(
        &self,
    ) -> impl Iterator<Item = (&String, &IndexMap<String, LessonDescriptor>)> + '_ {
        self.courses.iter()
    }

    /// Mutable iteration, used by the pipeline to attach packaged archives.
    pub fn courses_mut(
        &mut self,
    ) -> impl Iterator<Item = (&String, &mut IndexMap<String, LessonDescriptor>)> + '_ {
        self.courses.iter_mut()
    }

    /// Number of courses.
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Total number of lessons across all courses.
    pub fn lesson_count(&self) -> usize {
        self.courses.values().map(IndexMap::len).sum()
    }

    /// Total number of document attachments across all lessons.
    pub fn document_count(&self) -> usize {
        self.courses
            .values()
            .flat_map(IndexMap::values)
            .map(|descriptor| descriptor.docs.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "Digital Marketing": {
            "Lesson 1": {
                "title": "Unit 1 - Getting Started",
                "file": "dm_unit1",
                "docs": ["form_a.pdf", "form_b.pdf"]
            },
            "Lesson 2": {
                "title": "Unit 2 - Building Your Audience",
                "file": "dm_unit2"
            }
        },
        "E Commerce": {
            "Lesson 1": {
                "title": "Unit 1 - Choosing a Platform",
                "file": "ec_unit1",
                "docs": ["checklist.pdf"]
            }
        }
    }"#;

    #[test]
    fn parse_counts_courses_lessons_documents() {
        let manifest = Manifest::parse(SAMPLE).unwrap();
        assert_eq!(manifest.course_count(), 2);
        assert_eq!(manifest.lesson_count(), 3);
        assert_eq!(manifest.document_count(), 3);
    }

    #[test]
    fn docs_default_to_empty() {
        let manifest = Manifest::parse(SAMPLE).unwrap();
        let (_, lessons) = manifest.courses().next().unwrap();
        let lesson2 = &lessons["Lesson 2"];
        assert!(lesson2.docs.is_empty());
        assert!(lesson2.zipfile.is_none());
    }

    #[test]
    fn insertion_order_is_preserved() {
        // Lexically out of order on purpose.
        let manifest = Manifest::parse(
            r#"{
                "Zebra Course": {"L": {"title": "T", "file": "z1"}},
                "Alpha Course": {"L": {"title": "T", "file": "a1"}}
            }"#,
        )
        .unwrap();

        let order: Vec<&String> = manifest.courses().map(|(course, _)| course).collect();
        assert_eq!(order, ["Zebra Course", "Alpha Course"]);
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = Manifest::parse("{not json").unwrap_err();
        assert!(err.to_string().contains("malformed course manifest"));
    }

    #[test]
    fn missing_title_is_rejected() {
        let err = Manifest::parse(
            r#"{"Course": {"Lesson 1": {"title": "", "file": "u1"}}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("empty title"));
    }

    #[test]
    fn missing_file_is_rejected() {
        let err = Manifest::parse(
            r#"{"Course": {"Lesson 1": {"title": "Unit 1", "file": "  "}}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("empty file token"));
    }

    #[test]
    fn load_missing_file_is_a_manifest_error() {
        let err = Manifest::load(Path::new("/nonexistent/course_data.json")).unwrap_err();
        assert!(matches!(err, ChefError::Manifest { .. }));
    }

    #[test]
    fn manifest_fixture_validates() {
        let fixture =
            std::fs::read_to_string("../../../fixtures/json/course_data.fixture.json")
                .expect("read fixture");
        let manifest = Manifest::parse(&fixture).expect("parse fixture manifest");
        assert_eq!(manifest.course_count(), 2);
        assert_eq!(manifest.lesson_count(), 3);
        assert_eq!(manifest.document_count(), 3);
    }
}
