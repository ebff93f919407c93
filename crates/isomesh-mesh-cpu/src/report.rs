//! Topology summary of an extracted mesh.

use hashbrown::{HashMap, HashSet};

use crate::mesh_build::MeshBuild;
use crate::sink::VertexId;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MeshReport {
    pub vertices: usize,
    pub triangles: usize,
    pub lines: usize,
    /// Vertices whose position exactly equals an earlier vertex.
    pub duplicate_positions: usize,
    /// Triangles that repeat a vertex id.
    pub degenerate_triangles: usize,
    /// Vertices used by no triangle or line.
    pub unreferenced_vertices: usize,
    /// Undirected edges used by exactly one triangle.
    pub boundary_edges: usize,
    /// Undirected edges used by more than two triangles.
    pub non_manifold_edges: usize,
}

impl MeshReport {
    /// Every triangle edge is shared by exactly two triangles.
    pub fn is_closed_manifold(&self) -> bool {
        self.triangles > 0 && self.boundary_edges == 0 && self.non_manifold_edges == 0
    }
}

#[inline]
fn edge_key(a: VertexId, b: VertexId) -> (VertexId, VertexId) {
    if a < b { (a, b) } else { (b, a) }
}

pub fn mesh_report(mesh: &MeshBuild) -> MeshReport {
    let vertices = mesh.vertex_count();

    let mut seen: HashSet<[u64; 3]> = HashSet::with_capacity(vertices);
    let mut duplicate_positions = 0;
    for p in mesh.pos.chunks_exact(3) {
        if !seen.insert([p[0].to_bits(), p[1].to_bits(), p[2].to_bits()]) {
            duplicate_positions += 1;
        }
    }

    let mut used = vec![false; vertices];
    let mut edge_uses: HashMap<(VertexId, VertexId), u32> = HashMap::new();
    let mut degenerate_triangles = 0;
    for &[a, b, c] in &mesh.tris {
        if a == b || b == c || a == c {
            degenerate_triangles += 1;
        }
        for (u, v) in [(a, b), (b, c), (c, a)] {
            *edge_uses.entry(edge_key(u, v)).or_insert(0) += 1;
        }
        for v in [a, b, c] {
            if let Some(u) = used.get_mut(v as usize) {
                *u = true;
            }
        }
    }
    for &[a, b] in &mesh.lines {
        for v in [a, b] {
            if let Some(u) = used.get_mut(v as usize) {
                *u = true;
            }
        }
    }

    MeshReport {
        vertices,
        triangles: mesh.tris.len(),
        lines: mesh.lines.len(),
        duplicate_positions,
        degenerate_triangles,
        unreferenced_vertices: used.iter().filter(|u| !**u).count(),
        boundary_edges: edge_uses.values().filter(|&&n| n == 1).count(),
        non_manifold_edges: edge_uses.values().filter(|&&n| n > 2).count(),
    }
}
