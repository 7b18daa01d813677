use thiserror::Error;

/// Failure of a single node build.
///
/// Each variant is fatal to the node being built and to nothing else; batch
/// builds record it and carry on with the next resource.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    #[error("Cannot build {node}: no resource descriptor")]
    InvalidConstruction { node: &'static str },
    #[error("Resource {id} is an {kind}, a rendering needs a media")]
    InvalidResourceKind { id: u64, kind: String },
    #[error("Image resource {id} has no {dimension}")]
    MissingDimension { id: u64, dimension: &'static str },
    #[error("Resource at position {index} is not a valid descriptor: {reason}")]
    InvalidDescriptor { index: usize, reason: String },
    #[error("Required field '{field}' of {node} resolved to null")]
    MissingRequiredField {
        node: &'static str,
        field: &'static str,
    },
}
