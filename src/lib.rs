//! # IIIF Fragments
//!
//! Derives IIIF Presentation and Image API JSON-LD fragments from the metadata
//! of digital-repository resources: the annotation body that paints a media on
//! a canvas, and the rendering that links a canvas to a downloadable file.
//!
//! # Pipeline
//!
//! ```text
//! descriptor ─▶ classify ─▶ resolve id ─┐
//!                        └▶ service ────┴▶ node (Body | Rendering) ─▶ policy ─▶ Fragment
//! ```
//!
//! A descriptor is classified into a IIIF category, the category selects how
//! the `id` URL and the image service block are built, and the node assembles
//! the final keyed structure under its field policy. Every step is a pure
//! function of the descriptor and a read-only [`context::BuildContext`], so
//! building the same resource twice yields identical output and a batch can
//! run one resource per worker.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`classify`] | Media type / renderer → IIIF category, with the lookup path that decided |
//! | [`descriptor`] | The resource descriptor read from JSON |
//! | [`resolve`] | `id` URL strategies for bodies and renderings |
//! | [`service`] | Image API version and version-specific service blocks |
//! | [`urls`] | URL capabilities (image/media routes, canonical URLs, base URL rewriting) |
//! | [`policy`] | Required / recommended / optional / forbidden keys and fragment assembly |
//! | [`body`] | Annotation body node |
//! | [`rendering`] | Rendering node |
//! | [`batch`] | Parallel per-resource builds with per-node failure reporting |
//! | [`context`] | Collaborators and settings resolved once per build |
//! | [`config`] | `config.toml` loading, validation and setting lookup |
//! | [`types`] | Shared values (`Category`, `LanguageValue`) |
//! | [`output`] | CLI text summaries |
//!
//! # Design Decisions
//!
//! ## Ordered Lookup Stages
//!
//! Classification consults three tables (top-level media type, full media
//! type, renderer) as separate stages in a fixed order. A stage that lists a
//! key but maps it to nothing passes the search on, like a miss. Keeping the
//! stages apart, instead of one merged map, keeps that priority visible and
//! lets tests observe which stage answered.
//!
//! ## One API Version Per Build
//!
//! The Image API version is read once into the build context. Every service
//! block of the build uses the same field naming (`@id`/`@type` for 2.1,
//! `id`/`type` for 3.0).
//!
//! ## Failures Stay Local
//!
//! A node that cannot be built returns a [`error::NodeError`]; batches record
//! it next to the resource and continue. A malformed entry in a resources
//! file fails only its own nodes.

pub mod batch;
pub mod body;
pub mod classify;
pub mod config;
pub mod context;
pub mod descriptor;
pub mod error;
pub mod output;
pub mod policy;
pub mod rendering;
pub mod resolve;
pub mod service;
pub mod types;
pub mod urls;

#[cfg(test)]
pub(crate) mod test_helpers;
