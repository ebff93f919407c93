use isomesh_geom::{Aabb, Vec3};

fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

fn vec3_approx_eq(a: Vec3, b: Vec3, eps: f64) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps) && approx_eq(a.z, b.z, eps)
}

#[test]
fn vec3_constants() {
    assert!(vec3_approx_eq(Vec3::ZERO, Vec3::new(0.0, 0.0, 0.0), 1e-12));
    assert!(vec3_approx_eq(Vec3::X, Vec3::new(1.0, 0.0, 0.0), 1e-12));
    assert!(vec3_approx_eq(Vec3::from_grid(1, 2, 3), Vec3::new(1.0, 2.0, 3.0), 1e-12));
}

#[test]
fn vec3_add_sub_neg() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(-4.0, 5.0, -6.0);
    let c = a + b;
    assert!(vec3_approx_eq(c, Vec3::new(-3.0, 7.0, -3.0), 1e-12));
    assert!(vec3_approx_eq(c - a, b, 1e-12));
    assert!(vec3_approx_eq(-a, Vec3::new(-1.0, -2.0, -3.0), 1e-12));

    let mut v = Vec3::new(1.0, 1.0, 1.0);
    v += Vec3::new(2.0, 3.0, 4.0);
    v -= Vec3::new(1.0, 2.0, 3.0);
    assert!(vec3_approx_eq(v, Vec3::new(2.0, 2.0, 2.0), 1e-12));
}

#[test]
fn vec3_lerp_endpoints_and_midpoint() {
    let a = Vec3::new(0.0, 0.0, 0.0);
    let b = Vec3::new(0.0, 0.0, 1.0);
    assert!(vec3_approx_eq(a.lerp(b, 0.0), a, 1e-12));
    assert!(vec3_approx_eq(a.lerp(b, 1.0), b, 1e-12));
    assert!(vec3_approx_eq(a.lerp(b, 0.5), Vec3::new(0.0, 0.0, 0.5), 1e-12));
}

#[test]
fn vec3_dot_length_normalized() {
    let v = Vec3::new(3.0, 4.0, 0.0);
    assert!(approx_eq(v.dot(v), 25.0, 1e-12));
    assert!(approx_eq(v.length(), 5.0, 1e-12));
    assert!(vec3_approx_eq(v.normalized(), Vec3::new(0.6, 0.8, 0.0), 1e-12));

    // Zero vector normalization is a no-op, not NaN
    assert!(vec3_approx_eq(Vec3::ZERO.normalized(), Vec3::ZERO, 1e-12));
}

#[test]
fn vec3_try_normalized_rejects_short_vectors() {
    assert_eq!(Vec3::new(1e-9, 0.0, 0.0).try_normalized(1e-6), None);
    let n = Vec3::new(0.0, -2.0, 0.0).try_normalized(1e-6).unwrap();
    assert!(vec3_approx_eq(n, Vec3::new(0.0, -1.0, 0.0), 1e-12));
}

#[test]
fn vec3_cross_properties() {
    let i = Vec3::new(1.0, 0.0, 0.0);
    let j = Vec3::new(0.0, 1.0, 0.0);
    let k = Vec3::new(0.0, 0.0, 1.0);
    assert!(vec3_approx_eq(i.cross(j), k, 1e-12));
    assert!(vec3_approx_eq(j.cross(k), i, 1e-12));
    assert!(vec3_approx_eq(k.cross(i), j, 1e-12));
}

#[test]
fn aabb_from_points_and_contains() {
    assert_eq!(Aabb::from_points(Vec::new()), None);
    let pts = [
        Vec3::new(-1.0, 0.0, 1.0),
        Vec3::new(2.0, 3.0, -4.0),
        Vec3::new(0.5, -2.0, 0.0),
    ];
    let bb = Aabb::from_points(pts).unwrap();
    assert!(vec3_approx_eq(bb.min, Vec3::new(-1.0, -2.0, -4.0), 1e-12));
    assert!(vec3_approx_eq(bb.max, Vec3::new(2.0, 3.0, 1.0), 1e-12));
    assert!(vec3_approx_eq(bb.extent(), Vec3::new(3.0, 5.0, 5.0), 1e-12));
    for p in pts {
        assert!(bb.contains(p));
    }
    assert!(!bb.contains(Vec3::new(3.0, 0.0, 0.0)));
}
