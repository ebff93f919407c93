use std::time::Instant;

use isomesh_field::{Axis, ScalarField};

use crate::classify::{CellSample, RowScan};
use crate::constants::{CUBE_EDGES, SURFACE_TAG};
use crate::contour::{CubeFace, face_segments, line_tag};
use crate::edge_cache::LayerEdgeCache;
use crate::error::{CellCoord, ExtractError, ExtractResult};
use crate::sink::{MeshSink, VertexId};
use crate::tables::{EDGE_TABLE, TRIANGLES};
use crate::vertex::edge_vertex;

/// What the sweep emits for each active cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ContourMode {
    /// Triangles from the marching-cubes table.
    #[default]
    Surface,
    /// Line segments where the level set crosses each cube face.
    Lines,
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ExtractOptions {
    /// Samples strictly greater than this are inside.
    pub threshold: f32,
    /// Flip every emitted normal.
    pub invert: bool,
    pub mode: ContourMode,
}

impl ExtractOptions {
    pub fn surface(threshold: f32) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    pub fn lines(threshold: f32) -> Self {
        Self {
            threshold,
            mode: ContourMode::Lines,
            ..Self::default()
        }
    }

    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }
}

/// Counters gathered during one sweep.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub layers: usize,
    pub cells_visited: usize,
    /// Cells with index 0 or 255.
    pub cells_skipped: usize,
    pub samples_read: usize,
    pub vertices: usize,
    pub triangles: usize,
    pub lines: usize,
    /// Vertices whose gradient was too short to normalize.
    pub degenerate_normals: usize,
    pub elapsed_ms: u32,
}

fn elapsed_ms(start: Instant) -> u32 {
    start.elapsed().as_millis().min(u128::from(u32::MAX)) as u32
}

/// One pass over a field. Owns the edge cache and running counters; borrows the sink.
pub(crate) struct Sweep<'f, 's, S: MeshSink + ?Sized> {
    field: ScalarField<'f>,
    opts: ExtractOptions,
    sink: &'s mut S,
    cache: LayerEdgeCache,
    cells: (usize, usize, usize),
    stats: ExtractStats,
}

impl<'f, 's, S: MeshSink + ?Sized> Sweep<'f, 's, S> {
    pub(crate) fn new(field: ScalarField<'f>, opts: ExtractOptions, sink: &'s mut S) -> Self {
        let cells = field.dims().cells();
        Self {
            field,
            opts,
            sink,
            cache: LayerEdgeCache::new(cells.0, cells.1),
            cells,
            stats: ExtractStats::default(),
        }
    }

    pub(crate) fn run(
        mut self,
        mut should_cancel: impl FnMut() -> bool,
    ) -> ExtractResult<ExtractStats> {
        let start = Instant::now();
        let (cx, cy, cz) = self.cells;
        log::debug!(
            "extract {:?} t={} invert={} over {}x{}x{} cells",
            self.opts.mode,
            self.opts.threshold,
            self.opts.invert,
            cx,
            cy,
            cz
        );
        for k in 0..cz {
            if should_cancel() {
                log::debug!("extract cancelled before layer {} of {}", k, cz);
                return Err(ExtractError::Cancelled { layer: k });
            }
            self.cache.begin_layer(k);
            for j in 0..cy {
                self.sweep_row(j, k)?;
            }
            self.stats.layers += 1;
            log::trace!(
                "layer {} done: vertices={} triangles={} lines={}",
                k,
                self.stats.vertices,
                self.stats.triangles,
                self.stats.lines
            );
        }
        self.stats.elapsed_ms = elapsed_ms(start);
        let s = &self.stats;
        log::debug!(
            target: "perf",
            "ms extract={} cells={} skipped={} samples={} verts={} tris={} lines={} degenerate_normals={}",
            s.elapsed_ms,
            s.cells_visited,
            s.cells_skipped,
            s.samples_read,
            s.vertices,
            s.triangles,
            s.lines,
            s.degenerate_normals
        );
        Ok(self.stats)
    }

    fn sweep_row(&mut self, j: usize, k: usize) -> ExtractResult<()> {
        let mut scan = RowScan::new(self.field, j, k, self.opts.threshold);
        for cell in scan.by_ref() {
            self.stats.cells_visited += 1;
            if cell.is_trivial() {
                self.stats.cells_skipped += 1;
                continue;
            }
            self.process_cell(&cell, (cell.i, j, k))?;
        }
        self.stats.samples_read += scan.samples_read();
        Ok(())
    }

    fn process_cell(&mut self, cell: &CellSample, at: CellCoord) -> ExtractResult<()> {
        // Every crossed edge gets its vertex, even in line mode, so that later cells sharing the
        // edge always find it in the cache.
        let crossed = EDGE_TABLE[cell.cube_index as usize];
        let mut verts: [Option<VertexId>; CUBE_EDGES] = [None; CUBE_EDGES];
        for (e, slot) in verts.iter_mut().enumerate() {
            if crossed & (1 << e) != 0 {
                *slot = Some(self.add_vertex(e as u8, at, cell)?);
            }
        }
        self.cache.propagate(at.0, at.1, &verts);

        match self.opts.mode {
            ContourMode::Surface => self.emit_triangles(cell.cube_index, &verts, at),
            ContourMode::Lines => self.emit_lines(cell, &verts, at),
        }
    }

    /// Id of the vertex on `edge` of the cell at `at`, generating it on first use.
    fn add_vertex(
        &mut self,
        edge: u8,
        at: CellCoord,
        cell: &CellSample,
    ) -> ExtractResult<VertexId> {
        if edge as usize >= CUBE_EDGES {
            log::error!("edge index {} out of range at cell {:?}", edge, at);
            return Err(ExtractError::InvalidEdgeIndex { edge, cell: at });
        }
        if let Some(id) = self.cache.get(at.0, at.1, edge) {
            return Ok(id);
        }
        let with_normal = self.opts.mode == ContourMode::Surface;
        let v = edge_vertex(
            &self.field,
            at,
            edge,
            &cell.corners,
            self.opts.threshold,
            with_normal,
        )?;
        if v.degenerate_normal {
            self.stats.degenerate_normals += 1;
        }
        let n = if self.opts.invert { -v.normal } else { v.normal };
        let p = v.position;
        let id = self
            .sink
            .add_point(p.x, p.y, p.z, n.x, n.y, n.z, v.fraction, 0.0);
        self.cache.set(at.0, at.1, edge, id);
        self.stats.vertices += 1;
        Ok(id)
    }

    fn emit_triangles(
        &mut self,
        cube_index: u8,
        verts: &[Option<VertexId>; CUBE_EDGES],
        at: CellCoord,
    ) -> ExtractResult<()> {
        for tri in TRIANGLES[cube_index as usize] {
            let a = vertex_on(verts, tri[0], at)?;
            let b = vertex_on(verts, tri[1], at)?;
            let c = vertex_on(verts, tri[2], at)?;
            self.sink.add_triangle(a, b, c, SURFACE_TAG);
            self.stats.triangles += 1;
        }
        Ok(())
    }

    fn emit_lines(
        &mut self,
        cell: &CellSample,
        verts: &[Option<VertexId>; CUBE_EDGES],
        at: CellCoord,
    ) -> ExtractResult<()> {
        let (cx, cy, cz) = self.cells;
        for face in CubeFace::ALL {
            // High-side faces belong to the next cell unless this is the last one on that axis.
            if face.is_high_side() {
                let (pos, len) = match face.axis() {
                    Axis::X => (at.0, cx),
                    Axis::Y => (at.1, cy),
                    Axis::Z => (at.2, cz),
                };
                if pos + 1 != len {
                    continue;
                }
            }
            let mask = face.mask(cell.cube_index);
            let samples = face.samples(&cell.corners);
            let Some(segs) = face_segments(mask, &samples, self.opts.threshold) else {
                log::error!(
                    "unrecognized face configuration: face {:?} mask {} cube index {} at cell {:?}",
                    face,
                    mask,
                    cell.cube_index,
                    at
                );
                return Err(ExtractError::UnrecognizedFaceConfiguration {
                    face: face.index(),
                    mask,
                    cube_index: cell.cube_index,
                    cell: at,
                });
            };
            let ring = face.edges();
            let tag = line_tag(face, mask);
            for &[a, b] in segs.as_slice() {
                let va = vertex_on(verts, ring[a], at)?;
                let vb = vertex_on(verts, ring[b], at)?;
                self.sink.add_line(va, vb, tag);
                self.stats.lines += 1;
            }
        }
        Ok(())
    }
}

#[inline]
fn vertex_on(
    verts: &[Option<VertexId>; CUBE_EDGES],
    edge: u8,
    at: CellCoord,
) -> ExtractResult<VertexId> {
    match verts.get(edge as usize).copied().flatten() {
        Some(id) => Ok(id),
        None => {
            log::error!("no vertex on edge {} at cell {:?}", edge, at);
            Err(ExtractError::InvalidEdgeIndex { edge, cell: at })
        }
    }
}
