//! Deterministic identifier and title derivation for channel nodes.
//!
//! Source identifiers are derived from manifest names alone, so re-running
//! the chef over an unchanged manifest reproduces the same tree.

/// Lower-case a manifest name and replace spaces with underscores.
pub fn slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// Filename without its final extension.
pub fn stem(filename: &str) -> &str {
    filename
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(filename)
}

/// Source identifier for a course topic.
pub fn topic_source_id(course: &str) -> String {
    format!("{}_id", slug(course))
}

/// Source identifier for a lesson bundle, scoped under its course.
pub fn bundle_source_id(course: &str, lesson: &str) -> String {
    format!("{}_{}_id", slug(course), slug(lesson))
}

/// Source identifier for a document attachment.
pub fn document_source_id(filename: &str) -> String {
    format!("{}_id", stem(filename).replace(' ', "_"))
}

/// Unit label for a lesson title: the segment before `" - "`, or the whole
/// title when no separator is present.
pub fn unit_label(lesson_title: &str) -> &str {
    lesson_title.split(" - ").next().unwrap_or(lesson_title)
}

/// Display title for a document attached to a lesson.
pub fn document_title(lesson_title: &str, filename: &str) -> String {
    format!("{} forms: {}", unit_label(lesson_title), stem(filename))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_ids_are_stable() {
        assert_eq!(topic_source_id("Digital Marketing"), "digital_marketing_id");
        assert_eq!(topic_source_id("E Commerce"), "e_commerce_id");
    }

    #[test]
    fn bundle_ids_scope_lesson_under_course() {
        assert_eq!(
            bundle_source_id("Digital Marketing", "Intro Video"),
            "digital_marketing_intro_video_id"
        );
    }

    #[test]
    fn document_ids_strip_extension() {
        assert_eq!(document_source_id("form_a.pdf"), "form_a_id");
        assert_eq!(document_source_id("cash flow plan.pdf"), "cash_flow_plan_id");
    }

    #[test]
    fn document_title_uses_unit_label() {
        assert_eq!(
            document_title("Unit 1 - Getting Started", "form_a.pdf"),
            "Unit 1 forms: form_a"
        );
    }

    #[test]
    fn unit_label_falls_back_to_whole_title() {
        assert_eq!(unit_label("Orientation"), "Orientation");
        assert_eq!(
            document_title("Orientation", "welcome.pdf"),
            "Orientation forms: welcome"
        );
    }

    #[test]
    fn stem_keeps_inner_dots() {
        assert_eq!(stem("report.v2.pdf"), "report.v2");
        assert_eq!(stem("no_extension"), "no_extension");
    }
}
