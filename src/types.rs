//! Shared value types used by every node module.
//!
//! These types appear both in the classifier output and in the serialized
//! fragments, so they must serialize exactly as IIIF expects them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// IIIF resource category of a described resource.
///
/// `Unknown` is the classifier's answer when nothing matched (or a table
/// deliberately left the entry unclassified). It never serializes as a type:
/// see [`Category::as_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Image,
    Audio,
    Video,
    Text,
    Dataset,
    Unknown,
}

impl Category {
    /// The IIIF `type` value, or `None` for `Unknown`.
    pub fn as_type(self) -> Option<&'static str> {
        match self {
            Category::Image => Some("Image"),
            Category::Audio => Some("Audio"),
            Category::Video => Some("Video"),
            Category::Text => Some("Text"),
            Category::Dataset => Some("Dataset"),
            Category::Unknown => None,
        }
    }

    pub fn is_known(self) -> bool {
        self != Category::Unknown
    }

    pub fn is_audio_video(self) -> bool {
        matches!(self, Category::Audio | Category::Video)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Image => "Image",
            Category::Audio => "Audio",
            Category::Video => "Video",
            Category::Text => "Text",
            Category::Dataset => "Dataset",
            Category::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// A language-tagged string value, e.g. `{"none": "Text [application/pdf]"}`.
///
/// Keys are language tags; `"none"` is the IIIF pseudo-tag for values that
/// carry no language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageValue(BTreeMap<String, String>);

impl LanguageValue {
    pub const NO_LANGUAGE: &'static str = "none";

    /// Wrap a value under the `"none"` pseudo-language.
    pub fn none(value: impl Into<String>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(Self::NO_LANGUAGE.to_string(), value.into());
        Self(map)
    }

    pub fn get(&self, lang: &str) -> Option<&str> {
        self.0.get(lang).map(String::as_str)
    }
}

impl From<LanguageValue> for Value {
    fn from(value: LanguageValue) -> Self {
        Value::Object(
            value
                .0
                .into_iter()
                .map(|(lang, text)| (lang, Value::String(text)))
                .collect(),
        )
    }
}
