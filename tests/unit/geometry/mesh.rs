use super::*;

fn tri(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> Triangle {
    Triangle::new(
        Point3D::new(a[0], a[1], a[2]),
        Point3D::new(b[0], b[1], b[2]),
        Point3D::new(c[0], c[1], c[2]),
    )
}

#[test]
fn normal_is_unit_length() {
    let t = tri([0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0]);
    let n = t.normal();
    assert!((n.norm() - 1.0).abs() < 1e-12);
    assert!((n - Vector3D::new(0.0, 0.0, 1.0)).norm() < 1e-12);
}

#[test]
fn degenerate_triangle_gets_safe_normal() {
    let t = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
    assert_eq!(t.normal(), Vector3D::new(0.0, 0.0, 1.0));
}

#[test]
fn plane_through_triangle_yields_segment() {
    let t = tri([0.0, 0.0, 0.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0]);
    let seg = t
        .intersect_plane(&Vector3D::new(0.0, 0.0, 1.0), 0.5)
        .expect("plane crosses triangle");
    assert!((seg.start.z - 0.5).abs() < 1e-12);
    assert!((seg.end.z - 0.5).abs() < 1e-12);
}

#[test]
fn plane_missing_triangle_yields_none() {
    let t = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
    assert!(
        t.intersect_plane(&Vector3D::new(0.0, 0.0, 1.0), 1.0)
            .is_none()
    );
}

#[test]
fn plane_grazing_vertex_yields_none() {
    let t = tri([0.0, 0.0, 0.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0]);
    assert!(
        t.intersect_plane(&Vector3D::new(0.0, 0.0, 1.0), 0.0)
            .is_none()
    );
}

#[test]
fn mesh_bounds_cover_all_vertices() {
    let mesh = TriangleMesh::from_triangles(vec![
        tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 2.0, 0.0]),
        tri([0.0, 0.0, -1.0], [1.0, 0.0, 3.0], [0.0, 2.0, 0.0]),
    ]);
    assert_eq!(mesh.bounds(), Bounds::new(0.0, 1.0, 0.0, 2.0, -1.0, 3.0));
}

#[test]
fn empty_mesh_has_uninitialized_bounds() {
    assert!(!TriangleMesh::default().bounds().is_initialized());
}
