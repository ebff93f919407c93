use isomesh_geom::{Aabb, Vec3};
use proptest::prelude::*;
use proptest::num::f64::NORMAL;
use proptest::strategy::Strategy;

fn approx(a: f64, b: f64, eps: f64) -> bool { (a - b).abs() <= eps }
fn vapprox(a: Vec3, b: Vec3, eps: f64) -> bool {
    approx(a.x, b.x, eps) && approx(a.y, b.y, eps) && approx(a.z, b.z, eps)
}

fn approx_abs_rel(a: f64, b: f64, atol: f64, rtol: f64) -> bool {
    let diff = (a - b).abs();
    let scale = a.abs().max(b.abs());
    diff <= atol + rtol * scale
}

fn vapprox_abs_rel(a: Vec3, b: Vec3, atol: f64, rtol: f64) -> bool {
    approx_abs_rel(a.x, b.x, atol, rtol)
        && approx_abs_rel(a.y, b.y, atol, rtol)
        && approx_abs_rel(a.z, b.z, atol, rtol)
}

fn bounded_f64() -> impl Strategy<Value = f64> {
    NORMAL.prop_filter("bounded", |v| v.is_finite() && v.abs() <= 1e6)
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (bounded_f64(), bounded_f64(), bounded_f64())
        .prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    // Addition commutativity: a + b == b + a
    #[test]
    fn vec3_add_commutative(a in arb_vec3(), b in arb_vec3()) {
        prop_assert!(vapprox(a + b, b + a, 1e-9));
    }

    // Negation is an additive inverse
    #[test]
    fn vec3_neg_is_additive_inverse(a in arb_vec3()) {
        prop_assert!(vapprox(a + (-a), Vec3::ZERO, 1e-9));
    }

    // Lerp hits both endpoints exactly enough
    #[test]
    fn vec3_lerp_endpoints(a in arb_vec3(), b in arb_vec3()) {
        prop_assert!(vapprox_abs_rel(a.lerp(b, 0.0), a, 1e-9, 1e-12));
        prop_assert!(vapprox_abs_rel(a.lerp(b, 1.0), b, 1e-6, 1e-9));
    }

    // try_normalized yields unit length whenever it yields anything
    #[test]
    fn vec3_try_normalized_unit(v in arb_vec3()) {
        match v.try_normalized(1e-6) {
            Some(n) => prop_assert!(approx(n.length(), 1.0, 1e-9)),
            None => prop_assert!(v.length() < 1e-6),
        }
    }

    // Cauchy-Schwarz: |a·b| <= |a||b|
    #[test]
    fn vec3_cauchy_schwarz(a in arb_vec3(), b in arb_vec3()) {
        let lhs = a.dot(b).abs();
        let rhs = a.length() * b.length();
        prop_assert!(lhs <= rhs + 1e-9 + 1e-9 * rhs.max(1.0));
    }

    // The bounding box of a point set contains every point
    #[test]
    fn aabb_from_points_contains_all(pts in prop::collection::vec(arb_vec3(), 1..32)) {
        let bb = Aabb::from_points(pts.iter().copied()).unwrap();
        for p in &pts {
            prop_assert!(bb.contains(*p));
        }
        let e = bb.extent();
        prop_assert!(e.x >= 0.0 && e.y >= 0.0 && e.z >= 0.0);
    }
}
