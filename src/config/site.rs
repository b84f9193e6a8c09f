//! Site configuration loading from config.toml
//!
//! The `[blog]` table seeds the blog configuration row on first run and the
//! `[[blogroll]]` entries seed links that are not in the database yet.

use crate::{
    errors::{Error, Result},
    markup::MarkupRegistry,
};
use serde::Deserialize;
use std::path::Path;

const fn default_entries_per_page() -> i32 {
    10
}

const fn default_recents() -> i32 {
    5
}

const fn default_true() -> bool {
    true
}

fn default_markup_type() -> String {
    crate::markup::PLAIN.to_string()
}

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    /// Initial blog settings
    pub blog: BlogConfig,
    /// Links to seed into the blogroll
    #[serde(default)]
    pub blogroll: Vec<BlogRollConfig>,
    /// Markup type used for entries that do not name one
    #[serde(default = "default_markup_type")]
    pub default_markup_type: String,
}

impl SiteConfig {
    /// Built-in renderers with `default_markup_type` as the fallback type.
    ///
    /// # Errors
    /// Returns `Error::Config` if no renderer is registered for the configured type.
    pub fn markup_registry(&self) -> Result<MarkupRegistry> {
        let registry = MarkupRegistry::default().with_default_type(&self.default_markup_type);
        if !registry.supports(registry.default_type()) {
            return Err(Error::Config {
                message: format!(
                    "default_markup_type '{}' has no renderer",
                    self.default_markup_type
                ),
            });
        }
        Ok(registry)
    }
}

/// Blog settings from the `[blog]` table
#[derive(Debug, Deserialize, Clone)]
pub struct BlogConfig {
    pub title: String,
    #[serde(default)]
    pub tag_line: String,
    #[serde(default = "default_entries_per_page")]
    pub entries_per_page: i32,
    #[serde(default = "default_recents")]
    pub recents: i32,
    #[serde(default = "default_recents")]
    pub recent_comments: i32,
}

/// A single `[[blogroll]]` link
#[derive(Debug, Deserialize, Clone)]
pub struct BlogRollConfig {
    pub url: String,
    pub text: String,
    #[serde(default = "default_true")]
    pub is_published: bool,
}

/// Loads site configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SiteConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    parse_config(&contents)
}

/// Parses site configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<SiteConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads site configuration from `BLOGANGO_CONFIG`, or ./config.toml when unset
pub fn load_default_config() -> Result<SiteConfig> {
    let path = std::env::var("BLOGANGO_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    load_config(path)
}
