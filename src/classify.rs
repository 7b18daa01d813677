//! Media type classification.
//!
//! Maps a resource descriptor to a IIIF [`Category`]. Three lookup tables are
//! consulted in a fixed order and the first stage that yields a category
//! decides:
//!
//! ```text
//! 1. top-level type   "image/tiff"            → image   → Image
//! 2. full media type  "application/pdf"        →         → Text
//!                     "application/x-tar"      →         → (unclassified, go on)
//! 3. renderer         "youtube"                →         → Video
//!                     "file"                   →         → (unclassified)
//! 4. nothing matched                                     → Unknown
//! ```
//!
//! An entry listed without a category behaves exactly like a missing entry:
//! the search moves on to the next stage. [`explain`] still remembers the
//! first unclassified hit and reports it when no later stage answers, so
//! callers can tell a listed type from an unheard-of one.
//!
//! Keys are matched case-sensitively in every stage: `IMAGE/PNG` and
//! `Application/PDF` are both unknown.
//!
//! Classification is total: missing information yields `Unknown`, never an
//! error.

use crate::descriptor::ResourceDescriptor;
use crate::types::Category;
use serde::Serialize;
use tracing::debug;

/// Top-level media type token (before the first `/`).
const TOP_LEVEL_TYPES: &[(&str, Category)] = &[
    ("audio", Category::Audio),
    ("image", Category::Image),
    ("text", Category::Text),
    ("video", Category::Video),
];

/// Common full media types whose top-level token says nothing useful.
/// `None` marks types that are known but intentionally left unclassified.
const MEDIA_TYPES: &[(&str, Option<Category>)] = &[
    ("application/msword", Some(Category::Text)),
    ("application/ogg", Some(Category::Video)),
    ("application/pdf", Some(Category::Text)),
    ("application/rtf", Some(Category::Text)),
    ("application/vnd.ms-access", Some(Category::Dataset)),
    ("application/vnd.ms-excel", Some(Category::Dataset)),
    ("application/vnd.ms-powerpoint", Some(Category::Text)),
    ("application/vnd.ms-project", Some(Category::Dataset)),
    ("application/vnd.ms-write", Some(Category::Text)),
    ("application/vnd.oasis.opendocument.chart", Some(Category::Image)),
    ("application/vnd.oasis.opendocument.database", Some(Category::Dataset)),
    ("application/vnd.oasis.opendocument.formula", Some(Category::Text)),
    ("application/vnd.oasis.opendocument.graphics", Some(Category::Image)),
    ("application/vnd.oasis.opendocument.presentation", Some(Category::Text)),
    ("application/vnd.oasis.opendocument.spreadsheet", Some(Category::Dataset)),
    ("application/vnd.oasis.opendocument.text", Some(Category::Text)),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some(Category::Text),
    ),
    (
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        Some(Category::Text),
    ),
    (
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some(Category::Dataset),
    ),
    ("application/x-gzip", None),
    ("application/x-ms-wmp", None),
    ("application/x-msdownload", None),
    ("application/x-shockwave-flash", None),
    ("application/x-tar", None),
    ("application/zip", None),
    ("application/xml", Some(Category::Text)),
    ("application/vnd.recordare.musicxml", Some(Category::Text)),
    ("application/vnd.mei+xml", Some(Category::Text)),
];

const RENDERERS: &[(&str, Option<Category>)] = &[
    ("file", None),
    ("oembed", Some(Category::Text)),
    ("youtube", Some(Category::Video)),
    ("html", Some(Category::Text)),
    ("iiif", Some(Category::Image)),
    ("tile", Some(Category::Image)),
];

/// Which lookup decided the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchedBy {
    TopLevelType,
    MediaTypeTable,
    /// The full media type is listed but mapped to no category.
    MediaTypeTableUnclassified,
    RendererTable,
    /// The renderer is listed but mapped to no category.
    RendererUnclassified,
    NoMatch,
}

/// Category plus the path that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub category: Category,
    pub matched_by: MatchedBy,
}

/// Result of a single lookup stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StageOutcome {
    Miss,
    Hit(Option<Category>),
}

type Stage = fn(&ResourceDescriptor) -> StageOutcome;

/// Stages in priority order, each paired with how it reports a hit and an
/// unclassified hit.
const STAGES: &[(Stage, MatchedBy, MatchedBy)] = &[
    (top_level_stage, MatchedBy::TopLevelType, MatchedBy::TopLevelType),
    (
        media_type_stage,
        MatchedBy::MediaTypeTable,
        MatchedBy::MediaTypeTableUnclassified,
    ),
    (
        renderer_stage,
        MatchedBy::RendererTable,
        MatchedBy::RendererUnclassified,
    ),
];

fn top_level_stage(descriptor: &ResourceDescriptor) -> StageOutcome {
    let Some(media_type) = descriptor.media_type() else {
        return StageOutcome::Miss;
    };
    let token = media_type.split('/').next().unwrap_or(media_type);
    TOP_LEVEL_TYPES
        .iter()
        .find(|(key, _)| *key == token)
        .map_or(StageOutcome::Miss, |(_, category)| {
            StageOutcome::Hit(Some(*category))
        })
}

fn media_type_stage(descriptor: &ResourceDescriptor) -> StageOutcome {
    lookup(MEDIA_TYPES, descriptor.media_type())
}

fn renderer_stage(descriptor: &ResourceDescriptor) -> StageOutcome {
    lookup(RENDERERS, descriptor.renderer())
}

fn lookup(table: &[(&str, Option<Category>)], key: Option<&str>) -> StageOutcome {
    let Some(key) = key else {
        return StageOutcome::Miss;
    };
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map_or(StageOutcome::Miss, |(_, category)| {
            StageOutcome::Hit(*category)
        })
}

/// Classify a descriptor and report which lookup decided.
pub fn explain(descriptor: &ResourceDescriptor) -> Classification {
    let mut first_unclassified = None;
    for (stage, hit, unclassified) in STAGES {
        match stage(descriptor) {
            StageOutcome::Miss => {}
            StageOutcome::Hit(Some(category)) => {
                return traced(descriptor, category, *hit);
            }
            StageOutcome::Hit(None) => {
                first_unclassified.get_or_insert(*unclassified);
            }
        }
    }
    let matched_by = first_unclassified.unwrap_or(MatchedBy::NoMatch);
    traced(descriptor, Category::Unknown, matched_by)
}

/// Classify a descriptor.
pub fn classify(descriptor: &ResourceDescriptor) -> Category {
    explain(descriptor).category
}

fn traced(
    descriptor: &ResourceDescriptor,
    category: Category,
    matched_by: MatchedBy,
) -> Classification {
    debug!(
        resource = descriptor.resource_id(),
        media_type = descriptor.media_type(),
        renderer = descriptor.renderer(),
        %category,
        ?matched_by,
        "classified resource"
    );
    Classification {
        category,
        matched_by,
    }
}
