//! End-to-end checks through the public API: config file on disk, resources
//! file on disk, batch build, serialized report.

use iiif_fragments::batch::{self, NodeOutcome};
use iiif_fragments::body::AnnotationBody;
use iiif_fragments::config::load_config;
use iiif_fragments::context::BuildContext;
use iiif_fragments::descriptor::ResourceDescriptor;
use iiif_fragments::error::NodeError;
use iiif_fragments::rendering::Rendering;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

const RESOURCES: &str = r#"[
  {
    "id": 10,
    "media_type": "image/tiff",
    "renderer": "file",
    "extension": "tif",
    "width": 4000,
    "height": 3000,
    "source_url": "https://repo.example.org/files/original/10.tif"
  },
  {
    "id": 11,
    "media_type": "application/pdf",
    "renderer": "file",
    "site_page_url": "https://repo.example.org/s/{slug}/media/11"
  },
  {
    "id": 12,
    "media_type": "video/mp4",
    "extension": "mp4",
    "width": 1920,
    "height": 1080,
    "duration": 62.5,
    "source_url": "https://repo.example.org/files/original/12.mp4"
  },
  {
    "id": 13,
    "kind": "item"
  },
  null
]"#;

fn setup(config: &str) -> (TempDir, BuildContext) {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), config).unwrap();
    fs::write(tmp.path().join("resources.json"), RESOURCES).unwrap();
    let site_config = load_config(tmp.path()).unwrap();
    (tmp, BuildContext::from_config(&site_config))
}

#[test]
fn batch_with_api_3_and_site_slug() {
    let (tmp, ctx) = setup(
        r#"
[iiif]
api_version = "3.0"
json_ld_context = "http://iiif.io/api/presentation/3/context.json"

[urls]
base_url = "http://internal:8080"
force_from = "http://internal:8080"
force_to = "https://images.example.org"

[site]
slug = "archive"
"#,
    );
    let resources = batch::load_resources(&tmp.path().join("resources.json")).unwrap();
    let report = batch::build_all(&resources, &ctx);
    assert_eq!(report.api_version, "3.0");
    assert_eq!(report.entries.len(), 5);

    let image_body = report.entries[0].body.fragment().unwrap();
    assert_eq!(
        image_body.id(),
        Some("http://internal:8080/iiif/10/full/4000,3000/0/default.jpg")
    );
    assert_eq!(
        image_body.get("service"),
        Some(&json!({
            "id": "https://images.example.org/iiif/10",
            "type": "ImageService3",
            "profile": "level2"
        }))
    );
    assert!(!image_body.contains_key("@context"));

    let pdf_rendering = report.entries[1].rendering.fragment().unwrap();
    assert_eq!(
        pdf_rendering.id(),
        Some("https://repo.example.org/s/archive/media/11")
    );
    assert_eq!(
        pdf_rendering.get("label"),
        Some(&json!({"none": "Text [application/pdf]"}))
    );
    // No original URL, so the text body has no id.
    assert!(matches!(&report.entries[1].body, NodeOutcome::Failed(msg) if msg.contains("'id'")));

    let video_body = report.entries[2].body.fragment().unwrap();
    assert_eq!(
        video_body.clone().into_value(),
        json!({
            "id": "http://internal:8080/iiif-media/12.mp4",
            "type": "Video",
            "format": "video/mp4",
            "height": 1080,
            "width": 1920,
            "duration": 62.5
        })
    );

    assert!(matches!(&report.entries[3].rendering, NodeOutcome::Failed(msg) if msg.contains("item")));
    assert!(!report.entries[4].body.is_built());
}

#[test]
fn default_version_uses_json_ld_service_names() {
    let (_tmp, ctx) = setup("[urls]\nbase_url = \"https://repo.example.org\"\n");
    let descriptor: ResourceDescriptor = serde_json::from_str(
        r#"{"id": 5, "media_type": "image/png", "width": 10, "height": 20}"#,
    )
    .unwrap();
    let fragment = AnnotationBody::new(Some(&descriptor), &ctx)
        .unwrap()
        .to_fragment()
        .unwrap();
    assert_eq!(
        fragment.get("service"),
        Some(&json!({
            "@id": "https://repo.example.org/iiif/5",
            "@type": "ImageService2",
            "profile": "http://iiif.io/api/image/2/level2.json"
        }))
    );
}

#[test]
fn unknown_version_string_falls_back() {
    let (_tmp, ctx) = setup("[iiif]\napi_version = \"9.9\"\n");
    let descriptor = ResourceDescriptor {
        media_type: Some("image/png".into()),
        width: Some(1),
        height: Some(1),
        ..ResourceDescriptor::media(1)
    };
    let body = AnnotationBody::new(Some(&descriptor), &ctx).unwrap();
    let service = serde_json::to_value(body.service().unwrap()).unwrap();
    assert_eq!(service["@type"], json!("ImageService2"));
}

#[test]
fn rendering_from_item_fails_before_fields() {
    let (_tmp, ctx) = setup("");
    let descriptor: ResourceDescriptor =
        serde_json::from_str(r#"{"id": 13, "kind": "item"}"#).unwrap();
    let err = Rendering::new(Some(&descriptor), &ctx).unwrap_err();
    assert_eq!(
        err,
        NodeError::InvalidResourceKind {
            id: 13,
            kind: "item".into()
        }
    );
}

#[test]
fn serialized_report_is_stable() {
    let (tmp, ctx) = setup("");
    let resources = batch::load_resources(&tmp.path().join("resources.json")).unwrap();
    let first = serde_json::to_vec(&batch::build_all(&resources, &ctx)).unwrap();
    let second = serde_json::to_vec(&batch::build_all(&resources, &ctx)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn malformed_resource_does_not_sink_the_batch() {
    let (tmp, ctx) = setup("[site]\nslug = \"archive\"\n");
    let path = tmp.path().join("mixed.json");
    fs::write(
        &path,
        r#"[
  {"id": 1, "media_type": "application/pdf", "source_url": "https://repo.example.org/files/original/1.pdf"},
  {"id": 2, "owner": "x"},
  {"id": 3, "media_type": "application/zip", "renderer": "youtube", "source_url": "https://www.youtube.com/watch?v=y"}
]"#,
    )
    .unwrap();
    let resources = batch::load_resources(&path).unwrap();
    let report = batch::build_all(&resources, &ctx);

    assert_eq!(report.entries.len(), 3);
    assert!(report.entries[0].body.is_built());
    assert!(matches!(&report.entries[1].body, NodeOutcome::Failed(msg) if msg.contains("owner")));
    assert_eq!(
        report.entries[2].rendering.fragment().and_then(|f| f.get("type")),
        Some(&json!("Video"))
    );
}
