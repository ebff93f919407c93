//! Wavefront OBJ export.

use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

use isomesh_mesh_cpu::MeshBuild;

/// OBJ text for `mesh`. Normals are written only when there are triangles to use them.
pub fn mesh_to_obj_string(mesh: &MeshBuild) -> String {
    let n = mesh.vertex_count();
    let mut out = String::with_capacity(64 + n * 48 + mesh.tris.len() * 32);
    let _ = writeln!(
        out,
        "# isomesh: {} vertices, {} triangles, {} lines",
        n,
        mesh.tris.len(),
        mesh.lines.len()
    );
    for p in mesh.positions().chunks_exact(3) {
        let _ = writeln!(out, "v {} {} {}", p[0], p[1], p[2]);
    }
    if !mesh.tris.is_empty() {
        for vn in mesh.normals().chunks_exact(3) {
            let _ = writeln!(out, "vn {} {} {}", vn[0], vn[1], vn[2]);
        }
    }
    // OBJ indices are 1-based
    for &[a, b, c] in &mesh.tris {
        let (a, b, c) = (a + 1, b + 1, c + 1);
        let _ = writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}");
    }
    for &[a, b] in &mesh.lines {
        let _ = writeln!(out, "l {} {}", a + 1, b + 1);
    }
    out
}

pub fn write_obj(path: &Path, mesh: &MeshBuild) -> Result<(), Box<dyn Error>> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, mesh_to_obj_string(mesh))?;
    Ok(())
}
