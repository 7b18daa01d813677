//! Build configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by whatever the user file sets; everything else keeps its
//! default.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [iiif]
//! api_version = "2.1"        # Image API version of service blocks: "2.1" or "3.0"
//! # json_ld_context = "http://iiif.io/api/presentation/3/context.json"
//!
//! [urls]
//! base_url = "http://localhost"   # Base of image, media and service URLs
//! # force_from = "http://internal:8080"   # Rewrite this URL prefix ...
//! # force_to = "https://images.example.org" # ... into this one
//!
//! [site]
//! # slug = "archive"         # Site whose pages back renderings without a file URL
//! ```
//!
//! Unknown keys are rejected to catch typos early. An unrecognized
//! `api_version` is not an error: it falls back to 2.1.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Setting key of the Image API version.
pub const API_VERSION_SETTING: &str = "imageserver_manifest_version";
pub const FORCE_FROM_SETTING: &str = "iiifserver_url_force_from";
pub const FORCE_TO_SETTING: &str = "iiifserver_url_force_to";
pub const SITE_SLUG_SETTING: &str = "site_slug";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Read-only access to configuration values by setting key.
pub trait SettingsLookup {
    /// Value of `key`, or `default` when the key is unknown or unset.
    fn setting(&self, key: &str, default: &str) -> String;
}

/// Configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// IIIF output settings.
    pub iiif: IiifConfig,
    /// URL layout of the deployment.
    pub urls: UrlsConfig,
    /// Public site settings.
    pub site: SiteSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IiifConfig {
    /// Image API version used for service blocks.
    pub api_version: String,
    /// `@context` the surrounding manifest carries. Annotation bodies never
    /// repeat it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_ld_context: Option<String>,
}

impl Default for IiifConfig {
    fn default() -> Self {
        Self {
            api_version: "2.1".to_string(),
            json_ld_context: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UrlsConfig {
    /// Absolute base URL of image, media and service routes.
    pub base_url: String,
    /// URL prefix to replace in service ids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_from: Option<String>,
    /// Replacement for `force_from`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_to: Option<String>,
}

impl Default for UrlsConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost".to_string(),
            force_from: None,
            force_to: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Slug of the site used for rendering page URLs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl SiteConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.urls.base_url.trim();
        if base.is_empty() {
            return Err(ConfigError::Validation(
                "urls.base_url must not be empty".into(),
            ));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::Validation(
                "urls.base_url must be an http(s) URL".into(),
            ));
        }
        if self.urls.force_from.is_some() != self.urls.force_to.is_some() {
            return Err(ConfigError::Validation(
                "urls.force_from and urls.force_to must be set together".into(),
            ));
        }
        if self.site.slug.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "site.slug must not be empty when set".into(),
            ));
        }
        Ok(())
    }
}

impl SettingsLookup for SiteConfig {
    fn setting(&self, key: &str, default: &str) -> String {
        let value = match key {
            API_VERSION_SETTING => Some(self.iiif.api_version.as_str()),
            FORCE_FROM_SETTING => self.urls.force_from.as_deref(),
            FORCE_TO_SETTING => self.urls.force_to.as_deref(),
            SITE_SLUG_SETTING => self.site.slug.as_deref(),
            _ => None,
        };
        value
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(default)
            .to_string()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# IIIF Fragments Configuration
# ============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# IIIF output
# ---------------------------------------------------------------------------
[iiif]
# Image API version of image service blocks: "2.1" or "3.0".
# Any other value is treated as "2.1".
api_version = "2.1"

# JSON-LD context of the surrounding manifest. Annotation bodies never carry
# their own @context.
# json_ld_context = "http://iiif.io/api/presentation/3/context.json"

# ---------------------------------------------------------------------------
# URLs
# ---------------------------------------------------------------------------
[urls]
# Absolute base URL of the image server, media server and service ids.
base_url = "http://localhost"

# Rewrite service ids that start with force_from so they start with force_to.
# Set both or neither.
# force_from = "http://internal:8080"
# force_to = "https://images.example.org"

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
# Slug of the public site. Renderings without a file URL link to the
# resource page on this site.
# slug = "archive"
"##
}
