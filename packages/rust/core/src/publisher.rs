//! Channel publishing.
//!
//! [`Publisher`] is the seam between tree assembly and whatever consumes the
//! tree. The in-repo [`LocalPublisher`] checks that every leaf payload exists
//! on disk, then materializes the tree as `channel_tree.json` under the
//! staging root. Remote registration belongs to the platform's ingestion side.

use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, instrument, warn};

use coursechef_shared::{ChefError, ContentNode, NodePayload, Result, StagingPaths};

/// Outcome of a successful publish.
#[derive(Debug, Clone)]
pub struct PublishReport {
    /// Number of topic nodes in the published tree.
    pub topics: usize,
    /// Number of bundle nodes in the published tree.
    pub bundles: usize,
    /// Number of document nodes in the published tree.
    pub documents: usize,
    /// Where the tree document landed.
    pub tree_path: PathBuf,
}

/// Consumer of an assembled channel tree.
pub trait Publisher: Send + Sync {
    fn publish(&self, channel: &ContentNode) -> Result<PublishReport>;
}

/// The on-disk shape of `channel_tree.json`.
#[derive(Debug, Serialize)]
struct ChannelDocument<'a> {
    generator_version: &'a str,
    published_at: String,
    channel: &'a ContentNode,
}

/// Writes the channel tree to `channel_tree.json` in the staging root.
pub struct LocalPublisher {
    staging: StagingPaths,
    tool_version: String,
}

impl LocalPublisher {
    pub fn new(staging: StagingPaths, tool_version: impl Into<String>) -> Self {
        Self {
            staging,
            tool_version: tool_version.into(),
        }
    }
}

impl Publisher for LocalPublisher {
    #[instrument(skip_all, fields(channel = %channel.meta.title))]
    fn publish(&self, channel: &ContentNode) -> Result<PublishReport> {
        // Validate every payload before touching the output file, so a
        // failed publish leaves no partial tree behind.
        check_payloads(channel)?;

        let mut counts = NodeCounts::default();
        count_nodes(channel, &mut counts);

        let document = ChannelDocument {
            generator_version: &self.tool_version,
            published_at: Utc::now().to_rfc3339(),
            channel,
        };

        let json = serde_json::to_string_pretty(&document)
            .map_err(|e| ChefError::Publish(format!("tree serialization failed: {e}")))?;

        let target = self.staging.channel_tree();
        let temp = target.with_extension("json.tmp");
        std::fs::write(&temp, &json).map_err(|e| ChefError::io(&temp, e))?;
        std::fs::rename(&temp, &target).map_err(|e| ChefError::io(&target, e))?;

        info!(
            topics = counts.topics,
            bundles = counts.bundles,
            documents = counts.documents,
            path = %target.display(),
            "channel tree published"
        );

        Ok(PublishReport {
            topics: counts.topics,
            bundles: counts.bundles,
            documents: counts.documents,
            tree_path: target,
        })
    }
}

/// Fail on any bundle archive or document backing file missing from disk.
/// A missing channel thumbnail is only a warning.
fn check_payloads(node: &ContentNode) -> Result<()> {
    match &node.payload {
        NodePayload::Channel { thumbnail, .. } => {
            if let Some(thumb) = thumbnail {
                if !thumb.exists() {
                    warn!(
                        path = %thumb.display(),
                        "channel thumbnail missing, publishing without it"
                    );
                }
            }
        }
        NodePayload::Bundle { archive } => {
            if !archive.exists() {
                return Err(ChefError::Publish(format!(
                    "bundle '{}' archive missing: {}",
                    node.meta.source_id,
                    archive.display()
                )));
            }
        }
        NodePayload::Document { file } => {
            if !file.exists() {
                return Err(ChefError::Publish(format!(
                    "document '{}' backing file missing: {}",
                    node.meta.source_id,
                    file.display()
                )));
            }
        }
        NodePayload::Topic { .. } => {}
    }

    for child in node.children() {
        check_payloads(child)?;
    }
    Ok(())
}

#[derive(Debug, Default)]
struct NodeCounts {
    topics: usize,
    bundles: usize,
    documents: usize,
}

fn count_nodes(node: &ContentNode, counts: &mut NodeCounts) {
    match &node.payload {
        NodePayload::Topic { .. } => counts.topics += 1,
        NodePayload::Bundle { .. } => counts.bundles += 1,
        NodePayload::Document { .. } => counts.documents += 1,
        NodePayload::Channel { .. } => {}
    }
    for child in node.children() {
        count_nodes(child, counts);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use coursechef_shared::{LicenseInfo, NodeMeta};

    fn temp_staging() -> (PathBuf, StagingPaths) {
        let dir = std::env::temp_dir().join(format!(
            "chef-publisher-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let staging = StagingPaths::new(&dir);
        (dir, staging)
    }

    fn make_meta(source_id: &str, title: &str) -> NodeMeta {
        NodeMeta {
            source_id: source_id.into(),
            title: title.into(),
            language: "en".into(),
            license: LicenseInfo {
                id: "CC BY-SA".into(),
                copyright_holder: "International Labour Organization".into(),
            },
            categories: vec!["entrepreneurship".into()],
            grade_levels: vec!["professional".into()],
        }
    }

    /// A one-topic tree whose bundle and document payloads exist on disk.
    fn make_tree(staging: &StagingPaths) -> ContentNode {
        let archive = staging.lesson_zip("Digital Marketing", "Lesson 1");
        std::fs::create_dir_all(archive.parent().unwrap()).unwrap();
        std::fs::write(&archive, b"zip bytes").unwrap();

        let file = staging.document("Digital Marketing", "Lesson 1", "form_a.pdf");
        std::fs::create_dir_all(file.parent().unwrap()).unwrap();
        std::fs::write(&file, b"pdf bytes").unwrap();

        ContentNode {
            meta: make_meta("ilo-dyb", "Digitalize your business"),
            payload: NodePayload::Channel {
                description: "Self-guided course".into(),
                source_domain: "https://www.ilo.org".into(),
                thumbnail: None,
                children: vec![ContentNode {
                    meta: make_meta("digital_marketing_id", "Digital Marketing"),
                    payload: NodePayload::Topic {
                        author: "International Labour Organization".into(),
                        derive_thumbnail: true,
                        children: vec![
                            ContentNode {
                                meta: make_meta(
                                    "digital_marketing_lesson_1_id",
                                    "Unit 1 - Getting Started",
                                ),
                                payload: NodePayload::Bundle { archive },
                            },
                            ContentNode {
                                meta: make_meta("form_a_id", "Unit 1 forms: form_a"),
                                payload: NodePayload::Document { file },
                            },
                        ],
                    },
                }],
            },
        }
    }

    #[test]
    fn publishes_tree_with_counts_and_stamp() {
        let (tmp, staging) = temp_staging();
        let tree = make_tree(&staging);

        let publisher = LocalPublisher::new(staging.clone(), "0.1.0-test");
        let report = publisher.publish(&tree).unwrap();

        assert_eq!(report.topics, 1);
        assert_eq!(report.bundles, 1);
        assert_eq!(report.documents, 1);
        assert_eq!(report.tree_path, staging.channel_tree());
        assert!(report.tree_path.exists());

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&report.tree_path).unwrap()).unwrap();
        assert_eq!(json["generator_version"], "0.1.0-test");
        assert_eq!(json["channel"]["kind"], "channel");
        assert_eq!(json["channel"]["source_id"], "ilo-dyb");
        assert!(json["published_at"].as_str().unwrap().contains('T'));

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_bundle_archive_fails_and_writes_nothing() {
        let (tmp, staging) = temp_staging();
        let tree = make_tree(&staging);

        // Break the bundle payload after building a valid tree.
        std::fs::remove_file(staging.lesson_zip("Digital Marketing", "Lesson 1")).unwrap();

        let publisher = LocalPublisher::new(staging.clone(), "0.1.0-test");
        let err = publisher.publish(&tree).unwrap_err();

        assert!(matches!(err, ChefError::Publish(_)));
        assert!(err.to_string().contains("digital_marketing_lesson_1_id"));
        assert!(!staging.channel_tree().exists());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_document_file_fails() {
        let (tmp, staging) = temp_staging();
        let tree = make_tree(&staging);

        std::fs::remove_file(staging.document("Digital Marketing", "Lesson 1", "form_a.pdf"))
            .unwrap();

        let publisher = LocalPublisher::new(staging.clone(), "0.1.0-test");
        let err = publisher.publish(&tree).unwrap_err();

        assert!(err.to_string().contains("form_a_id"));
        assert!(!staging.channel_tree().exists());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_thumbnail_is_not_fatal() {
        let (tmp, staging) = temp_staging();
        let mut tree = make_tree(&staging);

        if let NodePayload::Channel { thumbnail, .. } = &mut tree.payload {
            *thumbnail = Some(tmp.join("no_such_thumbnail.png"));
        }

        let publisher = LocalPublisher::new(staging.clone(), "0.1.0-test");
        let report = publisher.publish(&tree).unwrap();
        assert!(report.tree_path.exists());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn republish_overwrites_atomically() {
        let (tmp, staging) = temp_staging();
        let tree = make_tree(&staging);

        let publisher = LocalPublisher::new(staging.clone(), "0.1.0-test");
        publisher.publish(&tree).unwrap();
        publisher.publish(&tree).unwrap();

        assert!(staging.channel_tree().exists());
        assert!(!staging.channel_tree().with_extension("json.tmp").exists());

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
