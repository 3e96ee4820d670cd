//! Shared types, error model, and configuration for coursechef.
//!
//! This crate is the foundation depended on by all other coursechef crates.
//! It provides:
//! - [`ChefError`]: the unified error type
//! - The course manifest ([`Manifest`], [`LessonDescriptor`])
//! - Channel tree nodes ([`ContentNode`], [`NodeMeta`], [`NodePayload`])
//! - Identifier derivation ([`ids`])
//! - Configuration ([`ChefConfig`], config loading) and the staging
//!   layout ([`StagingPaths`])

pub mod config;
pub mod error;
pub mod ids;
pub mod manifest;
pub mod node;
pub mod staging;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    CONFIG_FILE_NAME, ChannelConfig, ChefConfig, LabelsConfig, LicenseConfig, SourceArchive,
    StagingConfig, init_config, load_config, load_config_from, validate,
};
pub use error::{ChefError, Result};
pub use manifest::{LessonDescriptor, Manifest};
pub use node::{ContentNode, LicenseInfo, NodeMeta, NodePayload};
pub use staging::StagingPaths;
