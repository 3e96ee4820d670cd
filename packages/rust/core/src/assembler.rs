//! Channel tree assembly.
//!
//! Walks the course manifest and builds the channel tree: one topic per
//! course, one bundle per lesson, one document per attachment, in manifest
//! order. Assembly is pure: it reads the manifest and configuration and
//! returns the tree, or fails on the first lesson that was never prepared.
//! It never returns a partial tree.

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use coursechef_shared::{
    ChefError, ContentNode, LicenseInfo, Manifest, NodeMeta, NodePayload, Result, StagingPaths,
    ids,
};

/// Channel-wide settings for tree assembly. Everything the tree needs is
/// passed in here; there is no ambient state.
#[derive(Debug, Clone)]
pub struct AssembleConfig {
    /// Channel display title.
    pub title: String,
    /// Channel source identifier.
    pub source_id: String,
    /// Origin domain recorded on the channel root.
    pub source_domain: String,
    /// Language code applied to every node.
    pub language: String,
    /// Channel description.
    pub description: String,
    /// Channel thumbnail path, when one exists.
    pub thumbnail: Option<PathBuf>,
    /// Author attribution for course topics.
    pub author: String,
    /// License applied to every node.
    pub license: LicenseInfo,
    /// Subject vocabulary tokens applied to every node.
    pub categories: Vec<String>,
    /// Level vocabulary tokens applied to every node.
    pub grade_levels: Vec<String>,
    /// Staging layout for resolving document payloads.
    pub staging: StagingPaths,
}

/// Assemble the channel tree from a prepared manifest.
///
/// Every lesson must carry its packaged archive (attached during
/// preparation); the first one that does not fails the whole assembly.
/// Document payloads are resolved but not checked here, that is the
/// publisher's concern.
#[instrument(skip_all, fields(channel = %config.title, courses = manifest.course_count()))]
pub fn assemble(config: &AssembleConfig, manifest: &Manifest) -> Result<ContentNode> {
    let mut topics = Vec::with_capacity(manifest.course_count());

    for (course, lessons) in manifest.courses() {
        let mut children = Vec::new();

        for (lesson, descriptor) in lessons {
            let archive = descriptor.zipfile.clone().ok_or_else(|| {
                ChefError::assembly(format!(
                    "lesson '{lesson}' in course '{course}' not prepared: no packaged archive"
                ))
            })?;

            children.push(ContentNode {
                meta: node_meta(
                    config,
                    ids::bundle_source_id(course, lesson),
                    descriptor.title.clone(),
                ),
                payload: NodePayload::Bundle { archive },
            });

            // Documents follow their lesson's bundle, in manifest order.
            for doc in &descriptor.docs {
                children.push(ContentNode {
                    meta: node_meta(
                        config,
                        ids::document_source_id(doc),
                        ids::document_title(&descriptor.title, doc),
                    ),
                    payload: NodePayload::Document {
                        file: config.staging.document(course, lesson, doc),
                    },
                });
            }
        }

        debug!(course = %course, nodes = children.len(), "topic assembled");

        topics.push(ContentNode {
            meta: node_meta(config, ids::topic_source_id(course), course.clone()),
            payload: NodePayload::Topic {
                author: config.author.clone(),
                derive_thumbnail: true,
                children,
            },
        });
    }

    info!(topics = topics.len(), "channel tree assembled");

    Ok(ContentNode {
        meta: node_meta(config, config.source_id.clone(), config.title.clone()),
        payload: NodePayload::Channel {
            description: config.description.clone(),
            source_domain: config.source_domain.clone(),
            thumbnail: config.thumbnail.clone(),
            children: topics,
        },
    })
}

/// Shared metadata base, identical for every node kind.
fn node_meta(config: &AssembleConfig, source_id: String, title: String) -> NodeMeta {
    NodeMeta {
        source_id,
        title,
        language: config.language.clone(),
        license: config.license.clone(),
        categories: config.categories.clone(),
        grade_levels: config.grade_levels.clone(),
    }
}
