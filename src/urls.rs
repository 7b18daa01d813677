//! URL capabilities consumed by the node builders.
//!
//! Nodes never know how the deployment lays out its routes. They ask one of
//! three narrow capabilities:
//!
//! - [`ImageUrlBuilder`]: image-server and media-server URLs for a resource
//! - [`CanonicalUrlBuilder`]: absolute URL of the image service itself
//! - [`BaseUrlRewriter`]: deployment override of scheme and host
//!
//! [`RouteUrls`] and [`ForceBaseUrl`] are the implementations wired from
//! `config.toml`. Tests substitute their own.
//!
//! ## Route layout
//!
//! ```text
//! ImageMedia        {base}/iiif/{id}/{region}/{size}/{rotation}/{quality}.{format}
//! MediaServerMedia  {base}/iiif-media/{id}.{format}
//! ImageServiceId    {base}/iiif/{id}
//! ```

use crate::config::UrlsConfig;

/// Named routes the node builders can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// A rendered image at a given region/size/rotation/quality.
    ImageMedia,
    /// An audio or video file served by the media server.
    MediaServerMedia,
    /// Base URI of the image service for one resource.
    ImageServiceId,
}

/// Parameters filled into a route. Unused fields are ignored by the route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    pub id: u64,
    pub region: Option<String>,
    pub size: Option<String>,
    pub rotation: Option<u32>,
    pub quality: Option<String>,
    pub format: Option<String>,
}

impl RouteParams {
    pub fn for_id(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

pub trait ImageUrlBuilder: Send + Sync {
    fn image_url(&self, route: Route, params: &RouteParams) -> String;
}

pub trait CanonicalUrlBuilder: Send + Sync {
    /// Build the URL for `route`; relative unless `force_canonical` is set.
    fn url(&self, route: Route, params: &RouteParams, force_canonical: bool) -> String;
}

pub trait BaseUrlRewriter: Send + Sync {
    /// Rewrite `url` for the deployment. Must return it unchanged when no
    /// override is configured.
    fn rewrite(&self, url: &str) -> String;
}

/// Route-templated URLs under a single base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteUrls {
    base_url: String,
}

impl RouteUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &UrlsConfig) -> Self {
        Self::new(&config.base_url)
    }

    fn path(route: Route, params: &RouteParams) -> String {
        match route {
            Route::ImageMedia => format!(
                "/iiif/{}/{}/{}/{}/{}.{}",
                params.id,
                params.region.as_deref().unwrap_or("full"),
                params.size.as_deref().unwrap_or("max"),
                params.rotation.unwrap_or(0),
                params.quality.as_deref().unwrap_or("default"),
                params.format.as_deref().unwrap_or("jpg"),
            ),
            Route::MediaServerMedia => match params.format.as_deref() {
                Some(ext) => format!("/iiif-media/{}.{}", params.id, ext),
                None => format!("/iiif-media/{}", params.id),
            },
            Route::ImageServiceId => format!("/iiif/{}", params.id),
        }
    }
}

impl ImageUrlBuilder for RouteUrls {
    fn image_url(&self, route: Route, params: &RouteParams) -> String {
        format!("{}{}", self.base_url, Self::path(route, params))
    }
}

impl CanonicalUrlBuilder for RouteUrls {
    fn url(&self, route: Route, params: &RouteParams, force_canonical: bool) -> String {
        let path = Self::path(route, params);
        if force_canonical {
            format!("{}{}", self.base_url, path)
        } else {
            path
        }
    }
}

/// Replaces a configured URL prefix with another one.
///
/// With either end unset this is a pass-through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForceBaseUrl {
    from: Option<String>,
    to: Option<String>,
}

impl ForceBaseUrl {
    pub fn new(from: Option<String>, to: Option<String>) -> Self {
        Self { from, to }
    }

    pub fn from_config(config: &UrlsConfig) -> Self {
        Self::new(config.force_from.clone(), config.force_to.clone())
    }
}

impl BaseUrlRewriter for ForceBaseUrl {
    fn rewrite(&self, url: &str) -> String {
        match (self.from.as_deref(), self.to.as_deref()) {
            (Some(from), Some(to)) if !from.is_empty() => match url.strip_prefix(from) {
                Some(rest) => format!("{to}{rest}"),
                None => url.to_string(),
            },
            _ => url.to_string(),
        }
    }
}
