//! Resource descriptors: everything the engine knows about one repository
//! resource.
//!
//! A descriptor is read from JSON (one object per resource) and is never
//! mutated afterwards. Nodes borrow it for the duration of a single build.
//!
//! ```json
//! {
//!   "id": 42,
//!   "kind": "media",
//!   "media_type": "image/jpeg",
//!   "renderer": "file",
//!   "extension": "jpg",
//!   "width": 800,
//!   "height": 600,
//!   "source_url": "https://repo.example.org/files/original/abc.jpg",
//!   "site_page_url": "https://repo.example.org/s/{slug}/media/42"
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder replaced by the site slug in [`ResourceDescriptor::site_page_url`].
const SLUG_PLACEHOLDER: &str = "{slug}";

/// What kind of repository entity the descriptor wraps.
///
/// Only `Media` can become a rendering; items and item sets are containers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    #[default]
    Media,
    Item,
    ItemSet,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Media => f.write_str("media"),
            ResourceKind::Item => f.write_str("item"),
            ResourceKind::ItemSet => f.write_str("item set"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceDescriptor {
    /// Repository identifier, also used as the image-server identifier.
    pub id: u64,
    #[serde(default)]
    pub kind: ResourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// Renderer that ingested the resource: `file`, `oembed`, `youtube`, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renderer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Duration in seconds, for time-based media.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Direct URL of the original file, when the repository exposes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Public page of the resource, with `{slug}` standing for the site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_page_url: Option<String>,
}

impl ResourceDescriptor {
    /// A media descriptor with only an id, for building up in code.
    pub fn media(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn resource_id(&self) -> u64 {
        self.id
    }

    /// Media type as given, with blank strings treated as absent.
    pub fn media_type(&self) -> Option<&str> {
        non_blank(self.media_type.as_deref())
    }

    pub fn renderer(&self) -> Option<&str> {
        non_blank(self.renderer.as_deref())
    }

    pub fn extension(&self) -> Option<&str> {
        non_blank(self.extension.as_deref())
    }

    pub fn original_url(&self) -> Option<&str> {
        non_blank(self.source_url.as_deref())
    }

    /// Width, with zero treated as unknown.
    pub fn width(&self) -> Option<u32> {
        self.width.filter(|w| *w > 0)
    }

    pub fn height(&self) -> Option<u32> {
        self.height.filter(|h| *h > 0)
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration.filter(|d| d.is_finite() && *d > 0.0)
    }

    /// Public page URL of the resource on the site with the given slug.
    pub fn site_page_url(&self, slug: &str) -> Option<String> {
        non_blank(self.site_page_url.as_deref()).map(|url| url.replace(SLUG_PLACEHOLDER, slug))
    }

    pub fn is_media(&self) -> bool {
        self.kind == ResourceKind::Media
    }
}

/// Absent when blank; the value itself is returned untouched.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}
