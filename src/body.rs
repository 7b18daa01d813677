//! Annotation bodies.
//!
//! The body is the payload of a painting annotation: the actual image, sound
//! or video placed on a canvas.
//!
//! ```json
//! {
//!   "id": "https://repo.example.org/iiif/42/full/800,600/0/default.jpg",
//!   "type": "Image",
//!   "format": "image/jpeg",
//!   "service": {"@id": "https://repo.example.org/iiif/42", "@type": "ImageService2", "profile": "..."},
//!   "height": 600,
//!   "width": 800
//! }
//! ```
//!
//! `id`, `type` and `format` are required. `service`, `height`, `width` and
//! `duration` are emitted when they apply. `@context` is never emitted, even
//! when the surrounding manifest injects one.

use crate::classify::{self, Classification};
use crate::context::BuildContext;
use crate::descriptor::ResourceDescriptor;
use crate::error::NodeError;
use crate::policy::{FieldPolicy, Fragment, KeyTable, assemble};
use crate::resolve;
use crate::service::{ServiceDescriptor, build_service};
use crate::types::Category;
use crate::urls::{Route, RouteParams};
use serde_json::{Value, json};

const NODE: &str = "annotation body";

pub const BODY_KEYS: &KeyTable = &[
    ("@context", FieldPolicy::NotAllowed),
    ("id", FieldPolicy::Required),
    ("type", FieldPolicy::Required),
    ("format", FieldPolicy::Required),
    ("service", FieldPolicy::Recommended),
    ("height", FieldPolicy::Recommended),
    ("width", FieldPolicy::Recommended),
    ("duration", FieldPolicy::Recommended),
];

/// An annotation body bound to its descriptor and build context.
#[derive(Debug)]
pub struct AnnotationBody<'a> {
    descriptor: &'a ResourceDescriptor,
    ctx: &'a BuildContext,
    classification: Classification,
}

impl<'a> AnnotationBody<'a> {
    /// Bind a body to its resource. Fails without a descriptor.
    pub fn new(
        descriptor: Option<&'a ResourceDescriptor>,
        ctx: &'a BuildContext,
    ) -> Result<Self, NodeError> {
        let descriptor = descriptor.ok_or(NodeError::InvalidConstruction { node: NODE })?;
        Ok(Self {
            descriptor,
            ctx,
            classification: classify::explain(descriptor),
        })
    }

    pub fn category(&self) -> Category {
        self.classification.category
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn id(&self) -> Result<Option<String>, NodeError> {
        resolve::body_id(self.descriptor, self.category(), self.ctx)
    }

    pub fn kind(&self) -> Option<&'static str> {
        self.category().as_type()
    }

    pub fn format(&self) -> Option<&str> {
        self.descriptor.media_type()
    }

    /// Image service block, for images only.
    ///
    /// The service id always goes through the base URL rewriter.
    pub fn service(&self) -> Option<ServiceDescriptor> {
        if self.category() != Category::Image {
            return None;
        }
        let url = self.ctx.canonical_urls.url(
            Route::ImageServiceId,
            &RouteParams::for_id(self.descriptor.resource_id()),
            true,
        );
        let id = self.ctx.base_url_rewriter.rewrite(&url);
        Some(build_service(id, self.ctx.api_version))
    }

    pub fn width(&self) -> Option<u32> {
        match self.category() {
            Category::Image | Category::Video => self.descriptor.width(),
            _ => None,
        }
    }

    pub fn height(&self) -> Option<u32> {
        match self.category() {
            Category::Image | Category::Video => self.descriptor.height(),
            _ => None,
        }
    }

    pub fn duration(&self) -> Option<f64> {
        if self.category().is_audio_video() {
            self.descriptor.duration()
        } else {
            None
        }
    }

    /// Resolve every field and assemble the fragment.
    pub fn to_fragment(&self) -> Result<Fragment, NodeError> {
        let candidates = vec![
            ("@context", self.ctx.json_ld_context.as_ref().map(|c| json!(c))),
            ("id", self.id()?.map(Value::from)),
            ("type", self.kind().map(Value::from)),
            ("format", self.format().map(Value::from)),
            ("service", self.service().map(Value::from)),
            ("height", self.height().map(Value::from)),
            ("width", self.width().map(Value::from)),
            ("duration", self.duration().map(Value::from)),
        ];
        assemble(NODE, BODY_KEYS, candidates)
    }
}
