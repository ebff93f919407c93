//! CPU isosurface extraction: marching-cubes triangles or per-face contour lines from a dense
//! scalar field, streamed into a [`MeshSink`].
//!
//! The sweep visits cells layer by layer in `z`, row by row in `y`, and cell by cell in `x`.
//! Vertices on edges shared between neighbouring cells are generated once and reused through a
//! two-layer edge cache.
#![forbid(unsafe_code)]

use isomesh_field::ScalarField;

pub mod classify;
pub mod constants;
pub mod contour;
pub mod edge_cache;
pub mod error;
mod extract;
pub mod mesh_build;
pub mod report;
pub mod sink;
pub mod tables;
pub mod vertex;

pub use constants::{DEFAULT_NORMAL, EPSILON, SURFACE_TAG};
pub use contour::CubeFace;
pub use error::{CellCoord, ExtractError, ExtractResult};
pub use extract::{ContourMode, ExtractOptions, ExtractStats};
pub use mesh_build::MeshBuild;
pub use report::{MeshReport, mesh_report};
pub use sink::{CountingSink, MeshSink, VertexId};

/// Triangulates the `threshold` level set of a row-major `nx * ny * nz` field into `sink`.
///
/// Fails before touching the sink if any dimension is below 2 or `field.len()` does not match.
pub fn extract<S: MeshSink + ?Sized>(
    field: &[f32],
    nx: usize,
    ny: usize,
    nz: usize,
    threshold: f32,
    invert: bool,
    sink: &mut S,
) -> ExtractResult<ExtractStats> {
    let view = ScalarField::new(field, nx, ny, nz).inspect_err(|e| log::error!("{}", e))?;
    extract_with(&view, &ExtractOptions::surface(threshold).with_invert(invert), sink)
}

/// Runs one sweep over `field` with explicit options.
pub fn extract_with<S: MeshSink + ?Sized>(
    field: &ScalarField<'_>,
    opts: &ExtractOptions,
    sink: &mut S,
) -> ExtractResult<ExtractStats> {
    extract_with_cancel(field, opts, sink, || false)
}

/// Like [`extract_with`], polling `should_cancel` before each layer.
///
/// On cancellation the sink keeps whatever the completed layers produced.
pub fn extract_with_cancel<S: MeshSink + ?Sized>(
    field: &ScalarField<'_>,
    opts: &ExtractOptions,
    sink: &mut S,
    should_cancel: impl FnMut() -> bool,
) -> ExtractResult<ExtractStats> {
    extract::Sweep::new(*field, *opts, sink).run(should_cancel)
}
