/// Index of a generated vertex inside a sink.
pub type VertexId = u32;

/// Receiver for generated geometry.
///
/// `add_point` must hand out ids that increase by one per call, starting at the sink's current
/// `point_count()`.
pub trait MeshSink {
    #[allow(clippy::too_many_arguments)]
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
    ) -> VertexId;
    fn add_triangle(&mut self, v0: VertexId, v1: VertexId, v2: VertexId, tag: i32);
    fn add_line(&mut self, v0: VertexId, v1: VertexId, tag: i32);
    fn point_count(&self) -> usize;
}

impl<S: MeshSink + ?Sized> MeshSink for &mut S {
    #[inline]
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
        (**self).add_point(x, y, z, nx, ny, nz, u, v)
    }
    #[inline]
    fn add_triangle(&mut self, v0: VertexId, v1: VertexId, v2: VertexId, tag: i32) {
        (**self).add_triangle(v0, v1, v2, tag)
    }
    #[inline]
    fn add_line(&mut self, v0: VertexId, v1: VertexId, tag: i32) {
        (**self).add_line(v0, v1, tag)
    }
    #[inline]
    fn point_count(&self) -> usize {
        (**self).point_count()
    }
}

/// Sink that only counts what it receives. Useful for benchmarking the sweep itself.
#[derive(Default, Clone, Debug)]
pub struct CountingSink {
    pub points: usize,
    pub triangles: usize,
    pub lines: usize,
}

impl MeshSink for CountingSink {
    #[inline]
    fn add_point(
        &mut self,
        _x: f64,
        _y: f64,
        _z: f64,
        _nx: f64,
        _ny: f64,
        _nz: f64,
        _u: f64,
        _v: f64,
    ) -> VertexId {
        self.points += 1;
        (self.points - 1) as VertexId
    }
    #[inline]
    fn add_triangle(&mut self, _v0: VertexId, _v1: VertexId, _v2: VertexId, _tag: i32) {
        self.triangles += 1;
    }
    #[inline]
    fn add_line(&mut self, _v0: VertexId, _v1: VertexId, _tag: i32) {
        self.lines += 1;
    }
    #[inline]
    fn point_count(&self) -> usize {
        self.points
    }
}
