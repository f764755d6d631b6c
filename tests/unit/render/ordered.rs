use super::*;
use crate::foundation::core::Bounds;

struct FailingCollective;

impl CompositingCollective for FailingCollective {
    fn gather(&mut self, _local: TileImage, _tile_group_id: u32) -> ParvisResult<Vec<TileImage>> {
        Err(ParvisError::render("collective must not be reached"))
    }
}

fn opaque(rgba: [u8; 4]) -> TileImage {
    TileImage::solid(2, 2, rgba)
}

#[test]
fn pregathered_collective_splices_local_at_rank() {
    let mut collective =
        PreGatheredCollective::new(1, vec![(0, opaque([1, 0, 0, 255])), (2, opaque([3, 0, 0, 255]))]);
    let tiles = collective.gather(opaque([2, 0, 0, 255]), 0).unwrap();
    assert_eq!(tiles.len(), 3);
    assert_eq!(tiles[0].data[0], 1);
    assert_eq!(tiles[1].data[0], 2);
    assert_eq!(tiles[2].data[0], 3);
}

#[test]
fn pregathered_collective_rejects_duplicate_local_rank() {
    let mut collective = PreGatheredCollective::new(0, vec![(0, opaque([1, 0, 0, 255]))]);
    assert!(collective.gather(opaque([2, 0, 0, 255]), 0).is_err());
}

#[test]
fn kd_ordering_controls_blend_order() {
    // Rank 0 sits nearer the camera than rank 1, so rank 0's opaque tile
    // must win even though natural order would blend it first.
    let kd = KdTreePartition::new(vec![
        Bounds::new(0.0, 1.0, 0.0, 1.0, 0.0, 1.0),
        Bounds::new(0.0, 1.0, 0.0, 1.0, 5.0, 6.0),
    ]);
    let mut compositor = OrderedCompositor::new(
        Box::new(PreGatheredCollective::new(0, vec![(1, opaque([0, 255, 0, 255]))])),
        0,
    );
    compositor.set_kd_tree(Some(kd));
    compositor.set_camera_direction(Vector3D::new(0.0, 0.0, 1.0));

    let out = compositor.composite(opaque([255, 0, 0, 255])).unwrap();
    assert_eq!(&out.data[0..4], &[255, 0, 0, 255]);
}

#[test]
fn without_partition_natural_rank_order_is_used() {
    let mut compositor = OrderedCompositor::new(
        Box::new(PreGatheredCollective::new(0, vec![(1, opaque([0, 255, 0, 255]))])),
        0,
    );
    // Natural order: rank 0 first, rank 1 blended over it.
    let out = compositor.composite(opaque([255, 0, 0, 255])).unwrap();
    assert_eq!(&out.data[0..4], &[0, 255, 0, 255]);
}

#[test]
fn replicated_data_skips_the_collective() {
    let mut compositor = OrderedCompositor::new(Box::new(FailingCollective), 0);
    compositor.set_data_replicated(true);
    let out = compositor.composite(opaque([9, 9, 9, 255])).unwrap();
    assert_eq!(&out.data[0..4], &[9, 9, 9, 255]);
}

#[test]
fn mismatched_tile_sizes_error() {
    let mut compositor = OrderedCompositor::new(
        Box::new(PreGatheredCollective::new(0, vec![(1, TileImage::solid(3, 3, [0, 0, 0, 255]))])),
        0,
    );
    assert!(compositor.composite(opaque([1, 1, 1, 255])).is_err());
}

#[test]
fn depth_buffers_resolve_opaque_overlap() {
    let mut near = opaque([10, 0, 0, 255]);
    near.depth = Some(vec![0.2; 4]);
    let mut far = opaque([0, 10, 0, 255]);
    far.depth = Some(vec![0.8; 4]);

    let mut compositor =
        OrderedCompositor::new(Box::new(PreGatheredCollective::new(0, vec![(1, near)])), 0);
    compositor.set_use_depth_buffer(true);
    let out = compositor.composite(far).unwrap();
    // The nearer fragment wins regardless of blend order.
    assert_eq!(&out.data[0..4], &[10, 0, 0, 255]);
}

#[test]
fn skipped_empty_tiles_do_not_affect_the_result() {
    let empty = TileImage::new(2, 2);
    let mut compositor =
        OrderedCompositor::new(Box::new(PreGatheredCollective::new(0, vec![(1, empty)])), 0);
    compositor.set_render_empty_images(false);
    let out = compositor.composite(opaque([5, 6, 7, 255])).unwrap();
    assert_eq!(&out.data[0..4], &[5, 6, 7, 255]);
}
