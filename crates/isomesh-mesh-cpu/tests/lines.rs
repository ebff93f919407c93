use hashbrown::HashMap;

use isomesh_field::{FieldBuf, ScalarField};
use isomesh_geom::Vec3;
use isomesh_mesh_cpu::{CubeFace, ExtractOptions, MeshBuild, MeshSink, VertexId, extract_with};

fn sphere(n: usize, radius: f32) -> FieldBuf {
    let c = (n as f32 - 1.0) * 0.5;
    FieldBuf::from_fn(n, n, n, |i, j, k| {
        let (x, y, z) = (i as f32 - c, j as f32 - c, k as f32 - c);
        radius - (x * x + y * y + z * z).sqrt()
    })
    .unwrap()
}

fn contour(buf: &FieldBuf, t: f32) -> MeshBuild {
    let mut mb = MeshBuild::default();
    extract_with(&buf.as_field(), &ExtractOptions::lines(t), &mut mb).unwrap();
    mb
}

#[test]
fn each_grid_face_is_contoured_once() {
    let buf = sphere(13, 4.1);
    let mb = contour(&buf, 0.0);
    assert!(mb.tris.is_empty());
    assert!(!mb.lines.is_empty());
    // an interior crossed edge lies on four grid faces, each contributing one segment end
    let mut degree: HashMap<VertexId, u32> = HashMap::new();
    for &[a, b] in &mb.lines {
        assert_ne!(a, b);
        *degree.entry(a).or_insert(0) += 1;
        *degree.entry(b).or_insert(0) += 1;
    }
    assert_eq!(degree.len(), mb.vertex_count());
    assert!(degree.values().all(|&d| d == 4));
    assert_eq!(mb.lines.len(), 2 * mb.vertex_count());
}

#[test]
fn line_vertices_carry_no_normal() {
    let buf = sphere(9, 2.7);
    let mb = contour(&buf, 0.0);
    assert!(mb.norm.iter().all(|&n| n == 0.0));
}

#[test]
fn tags_encode_face_and_mask() {
    let buf = sphere(9, 2.7);
    let mb = contour(&buf, 0.0);
    for &tag in &mb.line_tags {
        let face = tag >> 4;
        let mask = tag & 0xF;
        assert!((0..6).contains(&face));
        assert!(mask != 0 && mask != 15, "tag {:#x}", tag);
    }
}

#[test]
fn last_cells_close_the_outer_faces() {
    // plane x = 1.5 through a 3x2x2 grid: two cells, only cell 1 has a +x face to close
    let buf = FieldBuf::from_fn(3, 2, 2, |i, _, _| i as f32).unwrap();
    let mb = contour(&buf, 0.5);
    // crossing only between i=0 and i=1: cell 0 contours -y, +y, -z, +z faces of that slab
    assert_eq!(mb.vertex_count(), 4);
    assert_eq!(mb.lines.len(), 4);
    let tag_faces: Vec<i32> = mb.line_tags.iter().map(|t| t >> 4).collect();
    for face in [CubeFace::NegY, CubeFace::PosY, CubeFace::NegZ, CubeFace::PosZ] {
        assert!(tag_faces.contains(&(face.index() as i32)), "{:?}", face);
    }
}

/// Midpoints, in the xy plane, of the segments tagged for the `-z` face with mask 5.
fn diagonal_face_midpoints(t: f32) -> Vec<Vec3> {
    // ring around -z: corners 0..3 = 1, 0, 1, 0; the top face is all outside
    let values = [1.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0];
    let field = ScalarField::new(&values, 2, 2, 2).unwrap();
    let mut mb = MeshBuild::default();
    extract_with(&field, &ExtractOptions::lines(t), &mut mb).unwrap();
    let tag = ((CubeFace::NegZ.index() as i32) << 4) | 0b0101;
    mb.lines
        .iter()
        .zip(&mb.line_tags)
        .filter(|(_, lt)| **lt == tag)
        .map(|(&[a, b], _)| (mb.position(a) + mb.position(b)) * 0.5)
        .collect()
}

#[test]
fn diagonal_face_centre_above_threshold_isolates_the_outside_corners() {
    // storage order: (0,0,0)=1, (1,0,0)=0, (0,1,0)=0, (1,1,0)=1
    let mids = diagonal_face_midpoints(0.4);
    assert_eq!(mids.len(), 2);
    for m in mids {
        assert!((m.x - m.y).abs() > 0.5, "{:?}", m);
    }
}

#[test]
fn diagonal_face_centre_below_threshold_isolates_the_inside_corners() {
    let mids = diagonal_face_midpoints(0.6);
    assert_eq!(mids.len(), 2);
    for m in mids {
        assert!((m.x - m.y).abs() < 1e-6, "{:?}", m);
    }
}

#[test]
fn reports_vertices_through_point_count() {
    let buf = sphere(7, 2.2);
    let mb = contour(&buf, 0.0);
    assert_eq!(mb.point_count(), mb.vertex_count());
}
