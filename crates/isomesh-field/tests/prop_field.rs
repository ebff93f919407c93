use isomesh_field::{Axis, FieldBuf, FieldDims, ScalarField};
use proptest::prelude::*;

fn dim() -> impl Strategy<Value = usize> {
    2usize..=7
}

proptest! {
    // idx maps each (i,j,k) within bounds to unique in-range indices
    #[test]
    fn idx_is_unique_and_in_range(nx in dim(), ny in dim(), nz in dim()) {
        let dims = FieldDims::new(nx, ny, nz).unwrap();
        let expect = nx * ny * nz;
        let mut seen = vec![false; expect];
        for k in 0..nz { for j in 0..ny { for i in 0..nx {
            let ix = dims.idx(i, j, k);
            prop_assert!(ix < expect);
            prop_assert!(!seen[ix]);
            seen[ix] = true;
        }}}
        prop_assert!(seen.into_iter().all(|b| b));
    }

    // x is the fastest-varying axis, z the slowest
    #[test]
    fn strides_match_row_major_layout(nx in dim(), ny in dim(), nz in dim()) {
        let dims = FieldDims::new(nx, ny, nz).unwrap();
        prop_assert_eq!(dims.idx(1, 0, 0), dims.stride(Axis::X));
        prop_assert_eq!(dims.idx(0, 1, 0), dims.stride(Axis::Y));
        prop_assert_eq!(dims.idx(0, 0, 1), dims.stride(Axis::Z));
    }

    // get reads from linearized storage at idx, and from_fn stores in that order
    #[test]
    fn from_fn_and_get_agree(nx in dim(), ny in dim(), nz in dim()) {
        let buf = FieldBuf::from_fn(nx, ny, nz, |i, j, k| (i + 10 * j + 100 * k) as f32).unwrap();
        let field = buf.as_field();
        for k in 0..nz { for j in 0..ny { for i in 0..nx {
            prop_assert_eq!(field.get(i, j, k), (i + 10 * j + 100 * k) as f32);
            prop_assert_eq!(field.values()[field.idx(i, j, k)], field.get(i, j, k));
        }}}
    }

    // Every stencil reproduces the slope of an affine field exactly
    #[test]
    fn affine_field_gradient_is_exact(
        nx in 3usize..=6, ny in 3usize..=6, nz in 3usize..=6,
        a in -4i32..=4, b in -4i32..=4, c in -4i32..=4,
    ) {
        let buf = FieldBuf::from_fn(nx, ny, nz, |i, j, k| {
            (a * i as i32 + b * j as i32 + c * k as i32) as f32
        }).unwrap();
        let field = buf.as_field();
        for k in 0..nz { for j in 0..ny { for i in 0..nx {
            let g = field.gradient(i, j, k);
            prop_assert!((g.x - a as f64).abs() < 1e-6);
            prop_assert!((g.y - b as f64).abs() < 1e-6);
            prop_assert!((g.z - c as f64).abs() < 1e-6);
        }}}
    }

    // A view only accepts exactly nx*ny*nz samples
    #[test]
    fn view_requires_exact_length(nx in dim(), ny in dim(), nz in dim(), extra in 1usize..4) {
        let n = nx * ny * nz;
        let ok = vec![0.0f32; n];
        prop_assert!(ScalarField::new(&ok, nx, ny, nz).is_ok());
        let long = vec![0.0f32; n + extra];
        prop_assert!(ScalarField::new(&long, nx, ny, nz).is_err());
        let short = vec![0.0f32; n - 1];
        prop_assert!(ScalarField::new(&short, nx, ny, nz).is_err());
    }
}
