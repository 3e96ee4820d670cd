//! Channel tree node types.
//!
//! Every node carries the same [`NodeMeta`] base; the [`NodePayload`] enum
//! distinguishes the four node kinds and holds their kind-specific data.
//! Children are owned by value, so the structure is a tree by construction.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// License
// ---------------------------------------------------------------------------

/// License descriptor attached to every node.
///
/// Carried as a plain identifier plus rights holder; the distribution
/// platform owns the actual license registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseInfo {
    /// Platform license identifier, e.g. `"CC BY-SA"`.
    pub id: String,
    /// Rights holder named on every node.
    pub copyright_holder: String,
}

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// Metadata shared by every node kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeMeta {
    /// Deterministic source identifier, stable across runs.
    pub source_id: String,
    /// Display title.
    pub title: String,
    /// Language code.
    pub language: String,
    /// License applied to this node.
    pub license: LicenseInfo,
    /// Subject vocabulary tokens.
    pub categories: Vec<String>,
    /// Level vocabulary tokens.
    pub grade_levels: Vec<String>,
}

/// Kind-specific node data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodePayload {
    /// The channel root.
    Channel {
        description: String,
        source_domain: String,
        thumbnail: Option<PathBuf>,
        children: Vec<ContentNode>,
    },

    /// A course topic.
    Topic {
        author: String,
        derive_thumbnail: bool,
        children: Vec<ContentNode>,
    },

    /// A packaged lesson bundle.
    Bundle { archive: PathBuf },

    /// A document attachment.
    Document { file: PathBuf },
}

/// A node in the assembled channel tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentNode {
    #[serde(flatten)]
    pub meta: NodeMeta,
    #[serde(flatten)]
    pub payload: NodePayload,
}

impl ContentNode {
    /// Child nodes, empty for leaf kinds.
    pub fn children(&self) -> &[ContentNode] {
        match &self.payload {
            NodePayload::Channel { children, .. } | NodePayload::Topic { children, .. } => children,
            NodePayload::Bundle { .. } | NodePayload::Document { .. } => &[],
        }
    }

    pub fn is_topic(&self) -> bool {
        matches!(self.payload, NodePayload::Topic { .. })
    }

    pub fn is_bundle(&self) -> bool {
        matches!(self.payload, NodePayload::Bundle { .. })
    }

    pub fn is_document(&self) -> bool {
        matches!(self.payload, NodePayload::Document { .. })
    }
}
