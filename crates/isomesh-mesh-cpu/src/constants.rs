//! Shared constants for isomesh-mesh-cpu.

use isomesh_geom::Vec3;

pub(crate) const CUBE_CORNERS: usize = 8;
pub(crate) const CUBE_EDGES: usize = 12;

/// Snap distance for interpolation fractions and minimum gradient length.
pub const EPSILON: f64 = 1e-6;

/// Normal used when the interpolated gradient is too short to normalize.
pub const DEFAULT_NORMAL: Vec3 = Vec3::X;

/// Tag attached to every surface triangle.
pub const SURFACE_TAG: i32 = 0;
