//! Shared test utilities for the iiif-fragments test suite.
//!
//! Provides descriptor fixtures for the common resource shapes and build
//! contexts wired to a fixed base URL.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let ctx = test_context();
//! let body = AnnotationBody::new(Some(&image(42, Some(800), Some(600))), &ctx).unwrap();
//! ```

use std::sync::{Arc, Mutex};

use crate::config::SiteConfig;
use crate::context::BuildContext;
use crate::descriptor::ResourceDescriptor;
use crate::urls::{ImageUrlBuilder, Route, RouteParams};

pub const BASE_URL: &str = "https://repo.example.org";

// =========================================================================
// Build contexts
// =========================================================================

/// Context with stock collaborators under [`BASE_URL`], API 2.1, no site.
pub fn test_context() -> BuildContext {
    let mut config = SiteConfig::default();
    config.urls.base_url = BASE_URL.to_string();
    BuildContext::from_config(&config)
}

pub type RecordedCalls = Arc<Mutex<Vec<(Route, RouteParams)>>>;

/// Image URL builder that records every request and answers with
/// `urn:test:{route}:{id}`.
pub struct RecordingUrls {
    calls: RecordedCalls,
}

impl ImageUrlBuilder for RecordingUrls {
    fn image_url(&self, route: Route, params: &RouteParams) -> String {
        self.calls.lock().unwrap().push((route, params.clone()));
        format!("urn:test:{route:?}:{}", params.id)
    }
}

/// [`test_context`] with its image URL builder replaced by a recorder.
pub fn recording_context() -> (BuildContext, RecordedCalls) {
    let calls: RecordedCalls = Arc::new(Mutex::new(Vec::new()));
    let mut ctx = test_context();
    ctx.image_urls = Arc::new(RecordingUrls {
        calls: calls.clone(),
    });
    (ctx, calls)
}

// =========================================================================
// Descriptor fixtures
// =========================================================================

pub fn with_media_type(media_type: &str) -> ResourceDescriptor {
    ResourceDescriptor {
        media_type: Some(media_type.to_string()),
        ..ResourceDescriptor::media(1)
    }
}

pub fn with_renderer(renderer: &str) -> ResourceDescriptor {
    ResourceDescriptor {
        renderer: Some(renderer.to_string()),
        ..ResourceDescriptor::media(1)
    }
}

/// A JPEG file media with the given dimensions.
pub fn image(id: u64, width: Option<u32>, height: Option<u32>) -> ResourceDescriptor {
    ResourceDescriptor {
        media_type: Some("image/jpeg".to_string()),
        renderer: Some("file".to_string()),
        extension: Some("jpg".to_string()),
        width,
        height,
        source_url: Some(format!("{BASE_URL}/files/original/{id}.jpg")),
        site_page_url: Some(format!("{BASE_URL}/s/{{slug}}/media/{id}")),
        ..ResourceDescriptor::media(id)
    }
}

/// An MP3 file media lasting two minutes.
pub fn audio(id: u64) -> ResourceDescriptor {
    ResourceDescriptor {
        media_type: Some("audio/mpeg".to_string()),
        renderer: Some("file".to_string()),
        extension: Some("mp3".to_string()),
        duration: Some(120.0),
        source_url: Some(format!("{BASE_URL}/files/original/{id}.mp3")),
        ..ResourceDescriptor::media(id)
    }
}

/// A PDF file media.
pub fn pdf(id: u64) -> ResourceDescriptor {
    ResourceDescriptor {
        media_type: Some("application/pdf".to_string()),
        renderer: Some("file".to_string()),
        extension: Some("pdf".to_string()),
        source_url: Some(format!("{BASE_URL}/files/original/{id}.pdf")),
        site_page_url: Some(format!("{BASE_URL}/s/{{slug}}/media/{id}")),
        ..ResourceDescriptor::media(id)
    }
}
