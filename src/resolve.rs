//! Canonical `id` URLs of described resources.
//!
//! The strategy depends on who asks. An annotation body points at the
//! deliverable bytes, a rendering points at something a person can open:
//!
//! ```text
//! Body       Image         → image server, full region at native size
//!            Audio/Video   → media server, by file extension
//!            otherwise     → the original file URL
//! Rendering  source URL    → as is
//!            site slug     → resource page on that site
//!            otherwise     → none (the rendering build then fails)
//! ```

use crate::context::BuildContext;
use crate::descriptor::ResourceDescriptor;
use crate::error::NodeError;
use crate::types::Category;
use crate::urls::{Route, RouteParams};

/// Id of an annotation body.
///
/// Image bodies need both dimensions; a missing one fails with
/// [`NodeError::MissingDimension`].
pub fn body_id(
    descriptor: &ResourceDescriptor,
    category: Category,
    ctx: &BuildContext,
) -> Result<Option<String>, NodeError> {
    let id = descriptor.resource_id();
    match category {
        Category::Image => {
            let width = descriptor.width().ok_or(NodeError::MissingDimension {
                id,
                dimension: "width",
            })?;
            let height = descriptor.height().ok_or(NodeError::MissingDimension {
                id,
                dimension: "height",
            })?;
            let params = RouteParams {
                region: Some("full".to_string()),
                size: Some(format!("{width},{height}")),
                rotation: Some(0),
                quality: Some("default".to_string()),
                format: Some("jpg".to_string()),
                ..RouteParams::for_id(id)
            };
            Ok(Some(ctx.image_urls.image_url(Route::ImageMedia, &params)))
        }
        Category::Audio | Category::Video => {
            let params = RouteParams {
                format: descriptor.extension().map(str::to_string),
                ..RouteParams::for_id(id)
            };
            Ok(Some(ctx.image_urls.image_url(Route::MediaServerMedia, &params)))
        }
        _ => Ok(descriptor.original_url().map(str::to_string)),
    }
}

/// Id of a rendering: the file URL, else the site page when a slug is
/// configured.
pub fn rendering_id(descriptor: &ResourceDescriptor, ctx: &BuildContext) -> Option<String> {
    if let Some(url) = descriptor.original_url() {
        return Some(url.to_string());
    }
    ctx.site_slug
        .as_deref()
        .and_then(|slug| descriptor.site_page_url(slug))
}
