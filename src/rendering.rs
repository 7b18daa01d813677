//! Canvas renderings.
//!
//! A rendering is an alternate representation of a canvas, typically a
//! download link: the original PDF of a scanned book, the video of a
//! performance, and so on.
//!
//! ```json
//! {
//!   "id": "https://repo.example.org/files/original/3.pdf",
//!   "type": "Text",
//!   "label": {"none": "Text [application/pdf]"},
//!   "format": "application/pdf"
//! }
//! ```
//!
//! The label is not a title (the canvas already has one); it tells what kind
//! of file the link leads to.

use crate::classify::{self, Classification};
use crate::context::BuildContext;
use crate::descriptor::ResourceDescriptor;
use crate::error::NodeError;
use crate::policy::{FieldPolicy, Fragment, KeyTable, assemble};
use crate::resolve;
use crate::types::LanguageValue;
use serde_json::Value;

const NODE: &str = "rendering";

/// Key policy of a rendering, see <https://iiif.io/api/presentation/3.0/#rendering>.
pub const RENDERING_KEYS: &KeyTable = &[
    ("id", FieldPolicy::Required),
    ("type", FieldPolicy::Required),
    ("label", FieldPolicy::Optional),
    ("format", FieldPolicy::Optional),
];

#[derive(Debug)]
pub struct Rendering<'a> {
    descriptor: &'a ResourceDescriptor,
    ctx: &'a BuildContext,
    classification: Classification,
}

impl<'a> Rendering<'a> {
    /// Bind a rendering to a media resource.
    ///
    /// The type is classified here, once: the label depends on it.
    pub fn new(
        descriptor: Option<&'a ResourceDescriptor>,
        ctx: &'a BuildContext,
    ) -> Result<Self, NodeError> {
        let descriptor = descriptor.ok_or(NodeError::InvalidConstruction { node: NODE })?;
        if !descriptor.is_media() {
            return Err(NodeError::InvalidResourceKind {
                id: descriptor.resource_id(),
                kind: descriptor.kind.to_string(),
            });
        }
        Ok(Self {
            descriptor,
            ctx,
            classification: classify::explain(descriptor),
        })
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn id(&self) -> Option<String> {
        resolve::rendering_id(self.descriptor, self.ctx)
    }

    pub fn kind(&self) -> Option<&'static str> {
        self.classification.category.as_type()
    }

    /// The raw media type, if any.
    pub fn format(&self) -> Option<&str> {
        self.descriptor.media_type()
    }

    /// `"<Type> [<format>]"` under the `none` language.
    ///
    /// No label without a type, and none without a format either.
    pub fn label(&self) -> Option<LanguageValue> {
        let kind = self.kind()?;
        let format = self.format()?;
        Some(LanguageValue::none(format!("{kind} [{format}]")))
    }

    pub fn to_fragment(&self) -> Result<Fragment, NodeError> {
        let candidates = vec![
            ("id", self.id().map(Value::from)),
            ("type", self.kind().map(Value::from)),
            ("label", self.label().map(Value::from)),
            ("format", self.format().map(Value::from)),
        ];
        assemble(NODE, RENDERING_KEYS, candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::MatchedBy;
    use crate::descriptor::ResourceKind;
    use crate::test_helpers::{image, pdf, test_context, with_renderer};
    use crate::types::Category;
    use serde_json::json;

    #[test]
    fn construction_requires_descriptor() {
        let ctx = test_context();
        assert!(matches!(
            Rendering::new(None, &ctx),
            Err(NodeError::InvalidConstruction { node: "rendering" })
        ));
    }

    #[test]
    fn item_is_rejected() {
        let ctx = test_context();
        let d = ResourceDescriptor {
            kind: ResourceKind::Item,
            ..pdf(3)
        };
        let err = Rendering::new(Some(&d), &ctx).unwrap_err();
        assert_eq!(
            err,
            NodeError::InvalidResourceKind {
                id: 3,
                kind: "item".into()
            }
        );
    }

    #[test]
    fn item_set_is_rejected() {
        let ctx = test_context();
        let d = ResourceDescriptor {
            kind: ResourceKind::ItemSet,
            ..ResourceDescriptor::media(8)
        };
        assert!(matches!(
            Rendering::new(Some(&d), &ctx),
            Err(NodeError::InvalidResourceKind { id: 8, .. })
        ));
    }

    #[test]
    fn pdf_rendering_fragment() {
        let ctx = test_context();
        let d = pdf(3);
        let fragment = Rendering::new(Some(&d), &ctx).unwrap().to_fragment().unwrap();
        assert_eq!(
            fragment.into_value(),
            json!({
                "id": "https://repo.example.org/files/original/3.pdf",
                "type": "Text",
                "label": {"none": "Text [application/pdf]"},
                "format": "application/pdf"
            })
        );
    }

    #[test]
    fn type_classified_at_construction() {
        let ctx = test_context();
        let d = pdf(3);
        let rendering = Rendering::new(Some(&d), &ctx).unwrap();
        assert_eq!(rendering.classification().category, Category::Text);
        assert_eq!(rendering.classification().matched_by, MatchedBy::MediaTypeTable);
    }

    #[test]
    fn label_is_none_without_format() {
        let ctx = test_context();
        let d = ResourceDescriptor {
            source_url: Some("https://www.youtube.com/watch?v=x".into()),
            ..with_renderer("youtube")
        };
        let rendering = Rendering::new(Some(&d), &ctx).unwrap();
        assert_eq!(rendering.kind(), Some("Video"));
        assert_eq!(rendering.label(), None);

        let fragment = rendering.to_fragment().unwrap();
        assert_eq!(
            fragment.into_value(),
            json!({"id": "https://www.youtube.com/watch?v=x", "type": "Video"})
        );
    }

    #[test]
    fn label_is_none_without_type() {
        let ctx = test_context();
        let d = ResourceDescriptor {
            media_type: Some("application/zip".into()),
            ..pdf(3)
        };
        let rendering = Rendering::new(Some(&d), &ctx).unwrap();
        assert_eq!(rendering.label(), None);
    }

    #[test]
    fn listed_unclassified_type_defers_to_renderer() {
        let ctx = test_context();
        let d = ResourceDescriptor {
            media_type: Some("application/zip".into()),
            source_url: Some("https://www.youtube.com/watch?v=x".into()),
            ..with_renderer("youtube")
        };
        let fragment = Rendering::new(Some(&d), &ctx).unwrap().to_fragment().unwrap();
        assert_eq!(
            fragment.into_value(),
            json!({
                "id": "https://www.youtube.com/watch?v=x",
                "type": "Video",
                "label": {"none": "Video [application/zip]"},
                "format": "application/zip"
            })
        );
    }

    #[test]
    fn unknown_type_fails_on_required_type() {
        let ctx = test_context();
        let d = ResourceDescriptor {
            media_type: Some("application/zip".into()),
            ..pdf(3)
        };
        let err = Rendering::new(Some(&d), &ctx)
            .unwrap()
            .to_fragment()
            .unwrap_err();
        assert_eq!(
            err,
            NodeError::MissingRequiredField {
                node: "rendering",
                field: "type"
            }
        );
    }

    #[test]
    fn missing_id_is_an_error() {
        let ctx = test_context();
        let d = ResourceDescriptor {
            source_url: None,
            ..pdf(3)
        };
        let err = Rendering::new(Some(&d), &ctx)
            .unwrap()
            .to_fragment()
            .unwrap_err();
        assert!(matches!(
            err,
            NodeError::MissingRequiredField { field: "id", .. }
        ));
    }

    #[test]
    fn site_page_used_with_slug() {
        let ctx = test_context().with_site_slug("archive");
        let d = ResourceDescriptor {
            source_url: None,
            ..image(5, Some(1), Some(1))
        };
        let fragment = Rendering::new(Some(&d), &ctx).unwrap().to_fragment().unwrap();
        assert_eq!(fragment.id(), Some("https://repo.example.org/s/archive/media/5"));
        assert_eq!(
            fragment.get("label"),
            Some(&json!({"none": "Image [image/jpeg]"}))
        );
    }

    #[test]
    fn rendering_never_carries_context() {
        let mut ctx = test_context();
        ctx.json_ld_context = Some("http://iiif.io/api/presentation/3/context.json".into());
        let d = pdf(3);
        let fragment = Rendering::new(Some(&d), &ctx).unwrap().to_fragment().unwrap();
        assert!(!fragment.contains_key("@context"));
    }
}
