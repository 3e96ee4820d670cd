//! Application configuration for coursechef.
//!
//! Config lives in `coursechef.toml` next to the project (override with
//! `--config`). Values omitted from the file fall back to the defaults
//! below, which describe the ILO "Digitalize your business" channel this
//! chef was first built for.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ChefError, Result};
use crate::node::LicenseInfo;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "coursechef.toml";

// ---------------------------------------------------------------------------
// Config structs (matching coursechef.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChefConfig {
    /// Channel metadata.
    #[serde(default)]
    pub channel: ChannelConfig,

    /// License applied to every node.
    #[serde(default)]
    pub license: LicenseConfig,

    /// Curated vocabulary tokens applied to every node.
    #[serde(default)]
    pub labels: LabelsConfig,

    /// Staging directory settings.
    #[serde(default)]
    pub staging: StagingConfig,

    /// Source archives to stage from the cloud file store.
    #[serde(default)]
    pub sources: Vec<SourceArchive>,
}

/// `[channel]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Channel display title.
    #[serde(default = "default_channel_title")]
    pub title: String,

    /// Channel source identifier.
    #[serde(default = "default_channel_source_id")]
    pub source_id: String,

    /// Origin domain recorded on the channel root.
    #[serde(default = "default_source_domain")]
    pub source_domain: String,

    /// Language code applied to every node.
    #[serde(default = "default_language")]
    pub language: String,

    /// Channel description.
    #[serde(default = "default_description")]
    pub description: String,

    /// Channel thumbnail path, relative to the working directory.
    #[serde(default = "default_thumbnail", skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    /// Author attribution stamped on course topics.
    #[serde(default = "default_author")]
    pub author: String,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            title: default_channel_title(),
            source_id: default_channel_source_id(),
            source_domain: default_source_domain(),
            language: default_language(),
            description: default_description(),
            thumbnail: default_thumbnail(),
            author: default_author(),
        }
    }
}

fn default_channel_title() -> String {
    "Digitalize your business".into()
}
fn default_channel_source_id() -> String {
    "ilo-dyb".into()
}
fn default_source_domain() -> String {
    "https://www.ilo.org/empent/areas/start-and-improve-your-business/WCMS_914727/lang--en/index.htm"
        .into()
}
fn default_language() -> String {
    "en".into()
}
fn default_description() -> String {
    "This online self-guided course discusses the basic requirements and main steps \
     for getting any existing or future business online."
        .into()
}
fn default_thumbnail() -> Option<String> {
    Some("chefdata/ilo_dyb.png".into())
}
fn default_author() -> String {
    "International Labour Organization".into()
}

/// `[license]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenseConfig {
    /// Platform license identifier.
    #[serde(default = "default_license_id")]
    pub id: String,

    /// Rights holder named on every node.
    #[serde(default = "default_copyright_holder")]
    pub copyright_holder: String,
}

impl Default for LicenseConfig {
    fn default() -> Self {
        Self {
            id: default_license_id(),
            copyright_holder: default_copyright_holder(),
        }
    }
}

fn default_license_id() -> String {
    "CC BY-SA".into()
}
fn default_copyright_holder() -> String {
    "International Labour Organization".into()
}

impl From<&LicenseConfig> for LicenseInfo {
    fn from(config: &LicenseConfig) -> Self {
        Self {
            id: config.id.clone(),
            copyright_holder: config.copyright_holder.clone(),
        }
    }
}

/// `[labels]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelsConfig {
    /// Subject vocabulary tokens.
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// Level vocabulary tokens.
    #[serde(default = "default_grade_levels")]
    pub grade_levels: Vec<String>,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            grade_levels: default_grade_levels(),
        }
    }
}

fn default_categories() -> Vec<String> {
    vec![
        "technical_and_vocational_training".into(),
        "entrepreneurship".into(),
        "financial_literacy".into(),
        "professional_skills".into(),
    ]
}
fn default_grade_levels() -> Vec<String> {
    vec!["professional".into(), "work_skills".into()]
}

/// `[staging]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagingConfig {
    /// Staging root directory.
    #[serde(default = "default_staging_root")]
    pub root: String,
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            root: default_staging_root(),
        }
    }
}

fn default_staging_root() -> String {
    "chefdata".into()
}

/// `[[sources]]` entry: one archive in the cloud file store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceArchive {
    /// Human-readable name for logs.
    pub name: String,
    /// Download URL.
    pub url: String,
    /// Archive token: the `file` value lessons reference in the manifest.
    pub file: String,
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the application config. An explicit `path` must exist; without one,
/// a missing `coursechef.toml` falls back to the built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<ChefConfig> {
    match path {
        Some(path) => load_config_from(path),
        None => {
            let default = Path::new(CONFIG_FILE_NAME);
            if !default.exists() {
                tracing::debug!(path = %default.display(), "config file not found, using defaults");
                return Ok(ChefConfig::default());
            }
            load_config_from(default)
        }
    }
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<ChefConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ChefError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| ChefError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Write a default config file into `dir`. Returns the path to the created file.
pub fn init_config(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| ChefError::io(dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = ChefConfig::default();
    let content = toml::to_string_pretty(&config).map_err(|e| ChefError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ChefError::io(&path, e))?;
    tracing::info!(path = %path.display(), "created default config file");

    Ok(path)
}

/// Check that the configuration is runnable: a usable language code,
/// parseable source URLs, non-empty archive tokens.
pub fn validate(config: &ChefConfig) -> Result<()> {
    if config.channel.language.trim().is_empty() {
        return Err(ChefError::config("channel.language must not be empty"));
    }
    if config.channel.source_id.trim().is_empty() {
        return Err(ChefError::config("channel.source_id must not be empty"));
    }

    for source in &config.sources {
        if source.file.trim().is_empty() {
            return Err(ChefError::config(format!(
                "source '{}' has an empty file token",
                source.name
            )));
        }
        Url::parse(&source.url).map_err(|e| {
            ChefError::config(format!("source '{}' has an invalid url: {e}", source.name))
        })?;
    }

    Ok(())
}
