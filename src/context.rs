//! Read-only build context shared by every node of a batch.
//!
//! All collaborators and settings are resolved here, once, before any node is
//! built. The context is `Sync`, so a batch can hand the same reference to
//! every worker.

use crate::config::{API_VERSION_SETTING, SITE_SLUG_SETTING, SettingsLookup, SiteConfig};
use crate::service::ApiVersion;
use crate::urls::{BaseUrlRewriter, CanonicalUrlBuilder, ForceBaseUrl, ImageUrlBuilder, RouteUrls};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct BuildContext {
    pub image_urls: Arc<dyn ImageUrlBuilder>,
    pub canonical_urls: Arc<dyn CanonicalUrlBuilder>,
    pub base_url_rewriter: Arc<dyn BaseUrlRewriter>,
    pub api_version: ApiVersion,
    pub site_slug: Option<String>,
    /// `@context` the surrounding manifest would inject into its children.
    pub json_ld_context: Option<String>,
}

impl BuildContext {
    /// Wire the stock route-based collaborators from configuration.
    pub fn from_config(config: &SiteConfig) -> Self {
        let routes = Arc::new(RouteUrls::from_config(&config.urls));
        let api_version =
            ApiVersion::from_setting(&config.setting(API_VERSION_SETTING, ApiVersion::V2_1.as_str()));
        let site_slug = Some(config.setting(SITE_SLUG_SETTING, "")).filter(|s| !s.is_empty());
        debug!(%api_version, ?site_slug, "build context ready");
        Self {
            image_urls: routes.clone(),
            canonical_urls: routes,
            base_url_rewriter: Arc::new(ForceBaseUrl::from_config(&config.urls)),
            api_version,
            site_slug,
            json_ld_context: config.iiif.json_ld_context.clone(),
        }
    }

    pub fn with_api_version(mut self, api_version: ApiVersion) -> Self {
        self.api_version = api_version;
        self
    }

    pub fn with_site_slug(mut self, slug: impl Into<String>) -> Self {
        self.site_slug = Some(slug.into());
        self
    }
}

impl std::fmt::Debug for BuildContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildContext")
            .field("api_version", &self.api_version)
            .field("site_slug", &self.site_slug)
            .field("json_ld_context", &self.json_ld_context)
            .finish_non_exhaustive()
    }
}
