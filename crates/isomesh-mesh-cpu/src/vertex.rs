//! Edge crossing positions and gradient normals.

use isomesh_field::ScalarField;
use isomesh_geom::Vec3;

use crate::constants::{CUBE_CORNERS, DEFAULT_NORMAL, EPSILON};
use crate::error::{CellCoord, ExtractError, ExtractResult};
use crate::tables::{CORNER_OFFSETS, EDGE_CORNERS};

/// Vertex produced where the surface crosses one cube edge.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EdgeVertex {
    /// Grid-index space.
    pub position: Vec3,
    /// Unit normal facing out of the inside region, zero when normals were not requested.
    pub normal: Vec3,
    /// Crossing fraction from the edge's first corner.
    pub fraction: f64,
    /// Gradient too short to normalize; `normal` is `DEFAULT_NORMAL`.
    pub degenerate_normal: bool,
}

/// Where along `from -> to` the field crosses `threshold`, snapped to the ends within `EPSILON`.
///
/// Only meaningful for crossed edges, where `f_from != f_to`.
#[inline]
pub fn crossing_fraction(f_from: f32, f_to: f32, threshold: f32) -> f64 {
    let a = f_from as f64;
    let b = f_to as f64;
    let d = (a - threshold as f64) / (a - b);
    if d < EPSILON {
        0.0
    } else if d > 1.0 - EPSILON {
        1.0
    } else {
        d
    }
}

/// Vertex on `edge` of the cell at `cell`. `corners` are that cell's samples in corner order.
///
/// With `with_normal` unset the normal is left at zero and no gradient is sampled.
pub fn edge_vertex(
    field: &ScalarField<'_>,
    cell: CellCoord,
    edge: u8,
    corners: &[f32; CUBE_CORNERS],
    threshold: f32,
    with_normal: bool,
) -> ExtractResult<EdgeVertex> {
    let &(a, b) = EDGE_CORNERS
        .get(edge as usize)
        .ok_or(ExtractError::InvalidEdgeIndex { edge, cell })?;
    let (i, j, k) = cell;
    let (ai, aj, ak) = CORNER_OFFSETS[a];
    let (bi, bj, bk) = CORNER_OFFSETS[b];
    let from = (i + ai, j + aj, k + ak);
    let to = (i + bi, j + bj, k + bk);

    let fraction = crossing_fraction(corners[a], corners[b], threshold);
    let position =
        Vec3::from_grid(from.0, from.1, from.2).lerp(Vec3::from_grid(to.0, to.1, to.2), fraction);
    if !with_normal {
        return Ok(EdgeVertex {
            position,
            normal: Vec3::ZERO,
            fraction,
            degenerate_normal: false,
        });
    }

    let g_from = field.gradient(from.0, from.1, from.2);
    let g_to = field.gradient(to.0, to.1, to.2);
    let (normal, degenerate_normal) = match (-g_from.lerp(g_to, fraction)).try_normalized(EPSILON) {
        Some(n) => (n, false),
        None => (DEFAULT_NORMAL, true),
    };
    Ok(EdgeVertex {
        position,
        normal,
        fraction,
        degenerate_normal,
    })
}
