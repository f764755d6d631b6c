use super::*;

fn slab(z0: f64, z1: f64) -> Bounds {
    Bounds::new(0.0, 1.0, 0.0, 1.0, z0, z1)
}

#[test]
fn ordering_is_a_permutation_of_ranks() {
    let kd = KdTreePartition::new(vec![slab(0.0, 1.0), slab(1.0, 2.0), slab(2.0, 3.0)]);
    let mut order = kd.back_to_front_ordering(Vector3D::new(0.3, -0.2, 0.9));
    order.sort_unstable();
    assert_eq!(order, vec![0, 1, 2]);
}

#[test]
fn farthest_region_composites_first() {
    // Camera looking down -z: view direction is (0, 0, -1), so regions with
    // smaller z are farther and must come first.
    let kd = KdTreePartition::new(vec![slab(0.0, 1.0), slab(-3.0, -2.0), slab(4.0, 5.0)]);
    let order = kd.back_to_front_ordering(Vector3D::new(0.0, 0.0, -1.0));
    assert_eq!(order, vec![1, 0, 2]);
}

#[test]
fn flipping_the_view_reverses_the_order() {
    let kd = KdTreePartition::new(vec![slab(0.0, 1.0), slab(2.0, 3.0)]);
    let fwd = kd.back_to_front_ordering(Vector3D::new(0.0, 0.0, 1.0));
    let rev = kd.back_to_front_ordering(Vector3D::new(0.0, 0.0, -1.0));
    assert_eq!(fwd, vec![1, 0]);
    assert_eq!(rev, vec![0, 1]);
}
