//! Batch builds: one body and one rendering per resource.
//!
//! A manifest job hands over every resource of an item at once. Each
//! resource is built independently on the rayon pool; the context is shared
//! read-only. A failing node is recorded in the report (and logged) and the
//! batch moves on.
//!
//! ## Input
//!
//! A JSON array of descriptors. `null` entries are kept: they fail with
//! `InvalidConstruction` like any missing descriptor would. Entries are
//! parsed one by one, so a malformed descriptor (unknown key, negative
//! width) fails only its own nodes with `InvalidDescriptor`.
//!
//! ```json
//! [
//!   {"id": 1, "media_type": "image/jpeg", "width": 800, "height": 600},
//!   {"id": 2, "media_type": "application/pdf", "source_url": "https://..."},
//!   null
//! ]
//! ```

use crate::body::AnnotationBody;
use crate::context::BuildContext;
use crate::descriptor::ResourceDescriptor;
use crate::error::NodeError;
use crate::policy::Fragment;
use crate::rendering::Rendering;
use crate::types::Category;
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outcome of one node build: the fragment, or why it failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeOutcome {
    Built(Fragment),
    Failed(String),
}

impl NodeOutcome {
    fn from_result(result: Result<Fragment, NodeError>) -> Self {
        match result {
            Ok(fragment) => NodeOutcome::Built(fragment),
            Err(e) => NodeOutcome::Failed(e.to_string()),
        }
    }

    pub fn fragment(&self) -> Option<&Fragment> {
        match self {
            NodeOutcome::Built(f) => Some(f),
            NodeOutcome::Failed(_) => None,
        }
    }

    pub fn is_built(&self) -> bool {
        matches!(self, NodeOutcome::Built(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchEntry {
    /// Position in the input list.
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<u64>,
    pub category: Category,
    pub body: NodeOutcome,
    pub rendering: NodeOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub api_version: String,
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    /// Number of node builds that failed, bodies and renderings together.
    pub fn failure_count(&self) -> usize {
        self.entries
            .iter()
            .map(|e| usize::from(!e.body.is_built()) + usize::from(!e.rendering.is_built()))
            .sum()
    }
}

/// One entry of a resources file: a descriptor, `null`, or the reason it
/// could not be parsed.
pub type ResourceSlot = Result<Option<ResourceDescriptor>, NodeError>;

/// Anything a batch can build from.
pub trait ResourceSource: Sync {
    fn descriptor(&self) -> Result<Option<&ResourceDescriptor>, NodeError>;
}

impl ResourceSource for Option<ResourceDescriptor> {
    fn descriptor(&self) -> Result<Option<&ResourceDescriptor>, NodeError> {
        Ok(self.as_ref())
    }
}

impl ResourceSource for ResourceSlot {
    fn descriptor(&self) -> Result<Option<&ResourceDescriptor>, NodeError> {
        self.as_ref().map(Option::as_ref).map_err(Clone::clone)
    }
}

/// Read a JSON array of (possibly null) descriptors.
///
/// Only an unreadable file or a document that is not an array fails as a
/// whole; each entry is parsed on its own.
pub fn load_resources(path: &Path) -> Result<Vec<ResourceSlot>, BatchError> {
    let content = std::fs::read_to_string(path)?;
    let raw: Vec<Value> = serde_json::from_str(&content)?;
    Ok(raw
        .into_iter()
        .enumerate()
        .map(|(index, value)| parse_slot(index, value))
        .collect())
}

fn parse_slot(index: usize, value: Value) -> ResourceSlot {
    serde_json::from_value(value).map_err(|e| NodeError::InvalidDescriptor {
        index,
        reason: e.to_string(),
    })
}

/// Build body and rendering for one resource.
pub fn build_entry(
    index: usize,
    descriptor: Option<&ResourceDescriptor>,
    ctx: &BuildContext,
) -> BatchEntry {
    let body = AnnotationBody::new(descriptor, ctx).and_then(|b| b.to_fragment());
    let rendering = Rendering::new(descriptor, ctx).and_then(|r| r.to_fragment());
    for (node, result) in [("body", &body), ("rendering", &rendering)] {
        if let Err(e) = result {
            warn!(index, resource = descriptor.map(|d| d.resource_id()), node, error = %e, "skipping node");
        }
    }
    BatchEntry {
        index,
        resource_id: descriptor.map(ResourceDescriptor::resource_id),
        category: descriptor.map_or(Category::Unknown, crate::classify::classify),
        body: NodeOutcome::from_result(body),
        rendering: NodeOutcome::from_result(rendering),
    }
}

/// Entry for a resource that never became a descriptor: both nodes fail.
fn invalid_entry(index: usize, error: NodeError) -> BatchEntry {
    warn!(index, error = %error, "skipping malformed resource");
    let reason = error.to_string();
    BatchEntry {
        index,
        resource_id: None,
        category: Category::Unknown,
        body: NodeOutcome::Failed(reason.clone()),
        rendering: NodeOutcome::Failed(reason),
    }
}

/// Build every resource in parallel, keeping input order.
pub fn build_all<R: ResourceSource>(resources: &[R], ctx: &BuildContext) -> BatchReport {
    let entries = resources
        .par_iter()
        .enumerate()
        .map(|(index, resource)| match resource.descriptor() {
            Ok(descriptor) => build_entry(index, descriptor, ctx),
            Err(e) => invalid_entry(index, e),
        })
        .collect();
    BatchReport {
        api_version: ctx.api_version.to_string(),
        entries,
    }
}
