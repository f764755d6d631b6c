use super::*;
use crate::geometry::mesh::Triangle;

fn cuboid(x0: f64, x1: f64, y0: f64, y1: f64, z0: f64, z1: f64) -> TriangleMesh {
    let p = |x: f64, y: f64, z: f64| Point3D::new(x, y, z);
    let quad = |a: Point3D, b: Point3D, c: Point3D, d: Point3D| {
        [Triangle::new(a, b, c), Triangle::new(a, c, d)]
    };
    let mut triangles = Vec::with_capacity(12);
    // -z / +z
    triangles.extend(quad(p(x0, y0, z0), p(x1, y0, z0), p(x1, y1, z0), p(x0, y1, z0)));
    triangles.extend(quad(p(x0, y0, z1), p(x1, y0, z1), p(x1, y1, z1), p(x0, y1, z1)));
    // -y / +y
    triangles.extend(quad(p(x0, y0, z0), p(x1, y0, z0), p(x1, y0, z1), p(x0, y0, z1)));
    triangles.extend(quad(p(x0, y1, z0), p(x1, y1, z0), p(x1, y1, z1), p(x0, y1, z1)));
    // -x / +x
    triangles.extend(quad(p(x0, y0, z0), p(x0, y1, z0), p(x0, y1, z1), p(x0, y0, z1)));
    triangles.extend(quad(p(x1, y0, z0), p(x1, y1, z0), p(x1, y1, z1), p(x1, y0, z1)));
    TriangleMesh::from_triangles(triangles)
}

#[test]
fn no_planes_means_no_polygons() {
    let cutter = MultiPlaneCutter::default();
    let polys = cutter.generate(&cuboid(0.0, 1.0, 0.0, 1.0, 0.0, 1.0)).unwrap();
    assert!(polys.is_empty());
}

#[test]
fn single_z_plane_through_unit_cube_yields_one_closed_contour() {
    let mut cutter = MultiPlaneCutter::default();
    cutter.set_cut_planes(SliceAxis::Z, Vector3D::new(0.0, 0.0, 1.0), &[0.5]);
    let polys = cutter.generate(&cuboid(0.0, 1.0, 0.0, 1.0, 0.0, 1.0)).unwrap();

    assert_eq!(polys.len(), 1);
    let poly = &polys[0];
    assert!(poly.closed);
    assert_eq!(poly.axis, SliceAxis::Z);
    assert!((poly.offset - 0.5).abs() < 1e-12);
    for p in &poly.points {
        assert!((p.z - 0.5).abs() < 1e-9);
        assert!((0.0..=1.0).contains(&p.x));
        assert!((0.0..=1.0).contains(&p.y));
    }
    // The contour must span the full X-Y cross-section of the cube.
    let (mut xmin, mut xmax, mut ymin, mut ymax) = (f64::MAX, f64::MIN, f64::MAX, f64::MIN);
    for p in &poly.points {
        xmin = xmin.min(p.x);
        xmax = xmax.max(p.x);
        ymin = ymin.min(p.y);
        ymax = ymax.max(p.y);
    }
    assert!((xmin, xmax, ymin, ymax) == (0.0, 1.0, 0.0, 1.0));
}

#[test]
fn multiple_offsets_yield_one_contour_each() {
    let mut cutter = MultiPlaneCutter::default();
    cutter.set_cut_planes(
        SliceAxis::Z,
        Vector3D::new(0.0, 0.0, 1.0),
        &[0.25, 0.5, 0.75],
    );
    let polys = cutter.generate(&cuboid(0.0, 1.0, 0.0, 1.0, 0.0, 1.0)).unwrap();
    assert_eq!(polys.len(), 3);
    assert!(polys.iter().all(|p| p.closed));
}

#[test]
fn replacing_a_plane_family_discards_the_old_offsets() {
    let mut cutter = MultiPlaneCutter::default();
    let n = Vector3D::new(0.0, 0.0, 1.0);
    cutter.set_cut_planes(SliceAxis::Z, n, &[0.25, 0.75]);
    cutter.set_cut_planes(SliceAxis::Z, n, &[0.5]);
    let polys = cutter.generate(&cuboid(0.0, 1.0, 0.0, 1.0, 0.0, 1.0)).unwrap();
    assert_eq!(polys.len(), 1);
    assert!((polys[0].offset - 0.5).abs() < 1e-12);
}

#[test]
fn axes_cut_independently() {
    let mut cutter = MultiPlaneCutter::default();
    cutter.set_cut_planes(SliceAxis::X, Vector3D::new(1.0, 0.0, 0.0), &[0.5]);
    cutter.set_cut_planes(SliceAxis::Z, Vector3D::new(0.0, 0.0, 1.0), &[0.5]);
    let polys = cutter.generate(&cuboid(0.0, 1.0, 0.0, 1.0, 0.0, 1.0)).unwrap();
    assert_eq!(polys.len(), 2);
    assert!(polys.iter().any(|p| p.axis == SliceAxis::X));
    assert!(polys.iter().any(|p| p.axis == SliceAxis::Z));
}
