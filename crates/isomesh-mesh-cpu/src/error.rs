//! Error types for extraction.

use isomesh_field::FieldError;
use thiserror::Error;

/// Result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Cell coordinates `(i, j, k)` of the cube being processed.
pub type CellCoord = (usize, usize, usize);

/// Errors that can occur during extraction.
///
/// `InvalidEdgeIndex` and `UnrecognizedFaceConfiguration` indicate defects in the engine and are
/// never expected in practice; the sweep stops as soon as one is seen.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Field rejected before the sweep began.
    #[error("invalid field: {0}")]
    Field(#[from] FieldError),

    /// An edge id outside `0..12` reached the vertex generator, or a table entry named an edge
    /// that had no vertex.
    #[error("edge index {edge} out of range at cell {cell:?}")]
    InvalidEdgeIndex { edge: u8, cell: CellCoord },

    /// Line contouring met a face mask it has no rule for.
    #[error(
        "unrecognized face configuration: face {face} mask {mask:#06b} cube index {cube_index} at cell {cell:?}"
    )]
    UnrecognizedFaceConfiguration {
        face: usize,
        mask: u8,
        cube_index: u8,
        cell: CellCoord,
    },

    /// The cancellation callback asked the sweep to stop before `layer`.
    #[error("extraction cancelled before layer {layer}")]
    Cancelled { layer: usize },
}
