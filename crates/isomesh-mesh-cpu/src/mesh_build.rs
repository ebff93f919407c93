use isomesh_geom::{Aabb, Vec3};

use crate::sink::{MeshSink, VertexId};

/// In-memory mesh sink with flat attribute arrays.
#[derive(Default, Clone, Debug)]
pub struct MeshBuild {
    pub pos: Vec<f64>,
    pub norm: Vec<f64>,
    pub uv: Vec<f64>,
    pub tris: Vec<[VertexId; 3]>,
    pub tri_tags: Vec<i32>,
    pub lines: Vec<[VertexId; 2]>,
    pub line_tags: Vec<i32>,
}

impl MeshBuild {
    /// Clears all arrays but retains capacity for reuse across extractions.
    #[inline]
    pub fn clear_keep_capacity(&mut self) {
        self.pos.clear();
        self.norm.clear();
        self.uv.clear();
        self.tris.clear();
        self.tri_tags.clear();
        self.lines.clear();
        self.line_tags.clear();
    }

    /// Pre-reserve capacity for approximately `n_points` vertices and twice as many triangles.
    #[inline]
    pub fn reserve_points(&mut self, n_points: usize) {
        self.pos.reserve(n_points * 3);
        self.norm.reserve(n_points * 3);
        self.uv.reserve(n_points * 2);
        self.tris.reserve(n_points * 2);
        self.tri_tags.reserve(n_points * 2);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    #[inline]
    pub fn position(&self, id: VertexId) -> Vec3 {
        let b = id as usize * 3;
        Vec3::new(self.pos[b], self.pos[b + 1], self.pos[b + 2])
    }

    #[inline]
    pub fn normal(&self, id: VertexId) -> Vec3 {
        let b = id as usize * 3;
        Vec3::new(self.norm[b], self.norm[b + 1], self.norm[b + 2])
    }

    /// Returns a slice of interleaved vertex positions (x,y,z per vertex).
    pub fn positions(&self) -> &[f64] {
        &self.pos
    }

    /// Returns a slice of interleaved vertex normals (x,y,z per vertex).
    pub fn normals(&self) -> &[f64] {
        &self.norm
    }

    /// Box around every vertex, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points((0..self.vertex_count()).map(|i| self.position(i as VertexId)))
    }

    /// Maps grid-index positions to world space: `origin + spacing * p`, per axis.
    /// Normals are rescaled for anisotropic spacing and renormalized.
    pub fn transform_to_world(&mut self, origin: Vec3, spacing: Vec3) {
        for p in self.pos.chunks_exact_mut(3) {
            p[0] = origin.x + spacing.x * p[0];
            p[1] = origin.y + spacing.y * p[1];
            p[2] = origin.z + spacing.z * p[2];
        }
        for n in self.norm.chunks_exact_mut(3) {
            let v = Vec3::new(n[0] / spacing.x, n[1] / spacing.y, n[2] / spacing.z);
            if let Some(v) = v.try_normalized(f64::EPSILON) {
                n[0] = v.x;
                n[1] = v.y;
                n[2] = v.z;
            }
        }
    }
}

impl MeshSink for MeshBuild {
    fn add_point(
        &mut self,
        x: f64,
        y: f64,
        z: f64,
        nx: f64,
        ny: f64,
        nz: f64,
        u: f64,
        v: f64,
    ) -> VertexId {
        let id = self.vertex_count() as VertexId;
        self.pos.extend_from_slice(&[x, y, z]);
        self.norm.extend_from_slice(&[nx, ny, nz]);
        self.uv.extend_from_slice(&[u, v]);
        id
    }

    #[inline]
    fn add_triangle(&mut self, v0: VertexId, v1: VertexId, v2: VertexId, tag: i32) {
        self.tris.push([v0, v1, v2]);
        self.tri_tags.push(tag);
    }

    #[inline]
    fn add_line(&mut self, v0: VertexId, v1: VertexId, tag: i32) {
        self.lines.push([v0, v1]);
        self.line_tags.push(tag);
    }

    #[inline]
    fn point_count(&self) -> usize {
        self.vertex_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential_and_attributes_line_up() {
        let mut mb = MeshBuild::default();
        let a = mb.add_point(0.0, 1.0, 2.0, 1.0, 0.0, 0.0, 0.5, 0.25);
        let b = mb.add_point(3.0, 4.0, 5.0, 0.0, 1.0, 0.0, 0.0, 0.0);
        assert_eq!((a, b), (0, 1));
        assert_eq!(mb.point_count(), 2);
        assert_eq!(mb.position(b), Vec3::new(3.0, 4.0, 5.0));
        assert_eq!(mb.normal(a), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(&mb.uv[..2], &[0.5, 0.25]);
        mb.add_triangle(a, b, a, 7);
        mb.add_line(b, a, 3);
        assert_eq!(mb.tris, vec![[0, 1, 0]]);
        assert_eq!(mb.lines, vec![[1, 0]]);
        assert_eq!((mb.tri_tags[0], mb.line_tags[0]), (7, 3));

        mb.clear_keep_capacity();
        assert_eq!(mb.point_count(), 0);
        assert!(mb.pos.capacity() >= 6);
    }

    #[test]
    fn transform_to_world_scales_positions_and_renormalizes() {
        let mut mb = MeshBuild::default();
        mb.add_point(1.0, 2.0, 3.0, 1.0, 1.0, 0.0, 0.0, 0.0);
        mb.transform_to_world(Vec3::new(10.0, 0.0, -1.0), Vec3::new(0.5, 2.0, 1.0));
        assert_eq!(mb.position(0), Vec3::new(10.5, 4.0, 2.0));
        let n = mb.normal(0);
        assert!((n.length() - 1.0).abs() < 1e-12);
        // x gradient component grows relative to y when x spacing shrinks
        assert!(n.x > n.y);
    }

    #[test]
    fn bounds_cover_every_vertex() {
        let mut mb = MeshBuild::default();
        assert!(mb.bounds().is_none());
        mb.reserve_points(4);
        assert!(mb.pos.capacity() >= 12 && mb.tris.capacity() >= 8);
        mb.add_point(1.0, -2.0, 0.5, 0.0, 0.0, 1.0, 0.0, 0.0);
        mb.add_point(-1.0, 3.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        let b = mb.bounds().unwrap();
        assert_eq!(b.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(b.max, Vec3::new(1.0, 3.0, 0.5));
    }
}
