//! CLI output formatting.
//!
//! JSON fragments go to stdout untouched; this module covers the human
//! summaries around them.
//!
//! # Output Format
//!
//! ## Classify
//!
//! ```text
//! Resource 42
//!     Media type: application/pdf
//!     Renderer: file
//!     Category: Text (media type table)
//! ```
//!
//! ## Batch
//!
//! ```text
//! 001 Resource 1 (Image)
//!     body: ok
//!     rendering: ok
//! 002 (no descriptor)
//!     body: Cannot build annotation body: no resource descriptor
//!     rendering: Cannot build rendering: no resource descriptor
//!
//! Built 2 resources, 2 failed nodes (API 2.1)
//! ```
//!
//! # Architecture
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stderr, keeping stdout
//! free for JSON.

use crate::batch::{BatchReport, NodeOutcome};
use crate::classify::{Classification, MatchedBy};
use crate::descriptor::ResourceDescriptor;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn matched_by_label(matched_by: MatchedBy) -> &'static str {
    match matched_by {
        MatchedBy::TopLevelType => "top-level media type",
        MatchedBy::MediaTypeTable => "media type table",
        MatchedBy::MediaTypeTableUnclassified => "listed media type, unclassified",
        MatchedBy::RendererTable => "renderer table",
        MatchedBy::RendererUnclassified => "listed renderer, unclassified",
        MatchedBy::NoMatch => "no match",
    }
}

fn outcome_line(node: &str, outcome: &NodeOutcome) -> String {
    match outcome {
        NodeOutcome::Built(_) => format!("    {node}: ok"),
        NodeOutcome::Failed(reason) => format!("    {node}: {reason}"),
    }
}

// ============================================================================
// Classify output
// ============================================================================

pub fn format_classification(
    descriptor: &ResourceDescriptor,
    classification: &Classification,
) -> Vec<String> {
    let mut lines = vec![format!("Resource {}", descriptor.resource_id())];
    lines.push(format!(
        "    Media type: {}",
        descriptor.media_type().unwrap_or("-")
    ));
    lines.push(format!(
        "    Renderer: {}",
        descriptor.renderer().unwrap_or("-")
    ));
    lines.push(format!(
        "    Category: {} ({})",
        classification.category,
        matched_by_label(classification.matched_by)
    ));
    lines
}

pub fn print_classification(descriptor: &ResourceDescriptor, classification: &Classification) {
    for line in format_classification(descriptor, classification) {
        eprintln!("{}", line);
    }
}

// ============================================================================
// Batch output
// ============================================================================

pub fn format_batch_report(report: &BatchReport) -> Vec<String> {
    let mut lines = Vec::new();
    for entry in &report.entries {
        let header = match entry.resource_id {
            Some(id) => format!(
                "{} Resource {} ({})",
                format_index(entry.index + 1),
                id,
                entry.category
            ),
            None => format!("{} (no descriptor)", format_index(entry.index + 1)),
        };
        lines.push(header);
        lines.push(outcome_line("body", &entry.body));
        lines.push(outcome_line("rendering", &entry.rendering));
    }
    lines.push(String::new());
    lines.push(format!(
        "Built {} resources, {} failed nodes (API {})",
        report.entries.len(),
        report.failure_count(),
        report.api_version
    ));
    lines
}

pub fn print_batch_report(report: &BatchReport) {
    for line in format_batch_report(report) {
        eprintln!("{}", line);
    }
}
