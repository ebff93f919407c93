//! Dense scalar fields: borrowed views for extraction plus owned buffers and synthetic sources.
#![forbid(unsafe_code)]

use isomesh_geom::Vec3;
use thiserror::Error;

pub mod raw;
pub mod source;

pub use source::{FieldSource, FieldSpec, generate_field};

#[derive(Debug, Error)]
pub enum FieldError {
    #[error("field dimensions must be at least 2 on every axis, got {nx}x{ny}x{nz}")]
    InvalidDimensions { nx: usize, ny: usize, nz: usize },
    #[error("field holds {actual} samples but {expected} were expected")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("field file I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Grid axis, used for per-axis finite differences.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Sample counts along each axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FieldDims {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
}

impl FieldDims {
    /// Rejects axes shorter than two samples and sample counts that overflow `usize`.
    pub fn new(nx: usize, ny: usize, nz: usize) -> Result<Self, FieldError> {
        let total = nx.checked_mul(ny).and_then(|n| n.checked_mul(nz));
        if nx < 2 || ny < 2 || nz < 2 || total.is_none() {
            return Err(FieldError::InvalidDimensions { nx, ny, nz });
        }
        Ok(Self { nx, ny, nz })
    }

    /// Total number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of cells (cubes) along each axis.
    #[inline]
    pub fn cells(&self) -> (usize, usize, usize) {
        (self.nx - 1, self.ny - 1, self.nz - 1)
    }

    #[inline]
    pub fn axis_len(&self, axis: Axis) -> usize {
        match axis {
            Axis::X => self.nx,
            Axis::Y => self.ny,
            Axis::Z => self.nz,
        }
    }

    /// Linear offset of sample `(i, j, k)`; x varies fastest, z slowest.
    #[inline]
    pub fn idx(&self, i: usize, j: usize, k: usize) -> usize {
        (k * self.ny + j) * self.nx + i
    }

    /// Distance in the flat array between neighbours along `axis`.
    #[inline]
    pub fn stride(&self, axis: Axis) -> usize {
        match axis {
            Axis::X => 1,
            Axis::Y => self.nx,
            Axis::Z => self.nx * self.ny,
        }
    }
}

/// Immutable view over a caller-owned field. Never copies the samples.
#[derive(Copy, Clone, Debug)]
pub struct ScalarField<'a> {
    dims: FieldDims,
    values: &'a [f32],
}

impl<'a> ScalarField<'a> {
    pub fn new(values: &'a [f32], nx: usize, ny: usize, nz: usize) -> Result<Self, FieldError> {
        let dims = FieldDims::new(nx, ny, nz)?;
        if values.len() != dims.len() {
            return Err(FieldError::LengthMismatch {
                expected: dims.len(),
                actual: values.len(),
            });
        }
        Ok(Self { dims, values })
    }

    #[inline]
    pub fn dims(&self) -> FieldDims {
        self.dims
    }

    #[inline]
    pub fn values(&self) -> &'a [f32] {
        self.values
    }

    #[inline]
    pub fn idx(&self, i: usize, j: usize, k: usize) -> usize {
        self.dims.idx(i, j, k)
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize, k: usize) -> f32 {
        self.values[self.dims.idx(i, j, k)]
    }

    /// Derivative along `axis` at sample `(i, j, k)` from a 3-point stencil.
    ///
    /// Interior samples use the central difference. The first and last samples use the
    /// one-sided second-order formulas. An axis with only two samples has no room for a
    /// 3-point stencil and falls back to the plain forward difference.
    pub fn axis_derivative(&self, i: usize, j: usize, k: usize, axis: Axis) -> f64 {
        let n = self.dims.axis_len(axis);
        let pos = match axis {
            Axis::X => i,
            Axis::Y => j,
            Axis::Z => k,
        };
        let stride = self.dims.stride(axis);
        let at = self.dims.idx(i, j, k);
        let f = |off: isize| -> f64 {
            let ix = (at as isize + off * stride as isize) as usize;
            self.values[ix] as f64
        };
        if n == 2 {
            return if pos == 0 { f(1) - f(0) } else { f(0) - f(-1) };
        }
        if pos == 0 {
            0.5 * (-3.0 * f(0) + 4.0 * f(1) - f(2))
        } else if pos == n - 1 {
            0.5 * (f(-2) - 4.0 * f(-1) + 3.0 * f(0))
        } else {
            0.5 * (f(1) - f(-1))
        }
    }

    /// Field gradient at a grid sample.
    #[inline]
    pub fn gradient(&self, i: usize, j: usize, k: usize) -> Vec3 {
        Vec3::new(
            self.axis_derivative(i, j, k, Axis::X),
            self.axis_derivative(i, j, k, Axis::Y),
            self.axis_derivative(i, j, k, Axis::Z),
        )
    }
}

/// Owned field storage, e.g. produced by a synthetic source or loaded from disk.
///
/// Only built through the checked constructors, so `as_field` always yields a valid view.
#[derive(Clone, Debug)]
pub struct FieldBuf {
    dims: FieldDims,
    values: Vec<f32>,
}

impl FieldBuf {
    pub fn from_values(
        nx: usize,
        ny: usize,
        nz: usize,
        values: Vec<f32>,
    ) -> Result<Self, FieldError> {
        let dims = FieldDims::new(nx, ny, nz)?;
        if values.len() != dims.len() {
            return Err(FieldError::LengthMismatch {
                expected: dims.len(),
                actual: values.len(),
            });
        }
        Ok(Self { dims, values })
    }

    /// Samples `f(i, j, k)` at every grid point in storage order.
    pub fn from_fn(
        nx: usize,
        ny: usize,
        nz: usize,
        mut f: impl FnMut(usize, usize, usize) -> f32,
    ) -> Result<Self, FieldError> {
        let dims = FieldDims::new(nx, ny, nz)?;
        let mut values = Vec::with_capacity(dims.len());
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    values.push(f(i, j, k));
                }
            }
        }
        Ok(Self { dims, values })
    }

    #[inline]
    pub fn dims(&self) -> FieldDims {
        self.dims
    }

    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Borrowed view for handing to the extractor.
    #[inline]
    pub fn as_field(&self) -> ScalarField<'_> {
        ScalarField {
            dims: self.dims,
            values: &self.values,
        }
    }

    /// Smallest and largest sample, ignoring NaNs.
    pub fn value_range(&self) -> Option<(f32, f32)> {
        let mut it = self.values.iter().copied().filter(|v| !v.is_nan());
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}
