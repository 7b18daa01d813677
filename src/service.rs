//! Image service descriptors.
//!
//! The Image API version is chosen once per build from configuration and
//! decides the field naming of every service block:
//!
//! ```text
//! 3.0  {"id": url,  "type": "ImageService3",  "profile": "level2"}
//! 2.1  {"@id": url, "@type": "ImageService2", "profile": "http://iiif.io/api/image/2/level2.json"}
//! ```
//!
//! Unrecognized version strings use the 2.1 shape.

use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;
use tracing::debug;

pub const LEVEL2_PROFILE_V2: &str = "http://iiif.io/api/image/2/level2.json";
pub const LEVEL2_PROFILE_V3: &str = "level2";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApiVersion {
    #[default]
    V2_1,
    V3_0,
}

impl ApiVersion {
    /// Parse a configured version string. Anything but `"3.0"` is 2.1.
    pub fn from_setting(value: &str) -> Self {
        match value.trim() {
            "3.0" => ApiVersion::V3_0,
            "2.1" => ApiVersion::V2_1,
            other => {
                debug!(version = other, "unrecognized image API version, using 2.1");
                ApiVersion::V2_1
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ApiVersion::V2_1 => "2.1",
            ApiVersion::V3_0 => "3.0",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageService2 {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@type")]
    pub kind: &'static str,
    pub profile: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageService3 {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub profile: &'static str,
}

/// A service block in exactly one naming convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ServiceDescriptor {
    V2(ImageService2),
    V3(ImageService3),
}

impl ServiceDescriptor {
    pub fn id(&self) -> &str {
        match self {
            ServiceDescriptor::V2(s) => &s.id,
            ServiceDescriptor::V3(s) => &s.id,
        }
    }
}

impl From<ServiceDescriptor> for Value {
    fn from(service: ServiceDescriptor) -> Self {
        match service {
            ServiceDescriptor::V2(s) => json!({"@id": s.id, "@type": s.kind, "profile": s.profile}),
            ServiceDescriptor::V3(s) => json!({"id": s.id, "type": s.kind, "profile": s.profile}),
        }
    }
}

/// Build the image service block for `id_url`.
pub fn build_service(id_url: impl Into<String>, version: ApiVersion) -> ServiceDescriptor {
    let id = id_url.into();
    match version {
        ApiVersion::V3_0 => ServiceDescriptor::V3(ImageService3 {
            id,
            kind: "ImageService3",
            profile: LEVEL2_PROFILE_V3,
        }),
        ApiVersion::V2_1 => ServiceDescriptor::V2(ImageService2 {
            id,
            kind: "ImageService2",
            profile: LEVEL2_PROFILE_V2,
        }),
    }
}
