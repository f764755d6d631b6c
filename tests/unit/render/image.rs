use super::*;

#[test]
fn new_tile_is_fully_transparent() {
    let tile = TileImage::new(4, 4);
    assert!(tile.is_fully_transparent());
    assert_eq!(tile.data.len(), 4 * 4 * 4);
}

#[test]
fn solid_tile_is_not_transparent() {
    let tile = TileImage::solid(2, 2, [10, 20, 30, 255]);
    assert!(!tile.is_fully_transparent());
    assert_eq!(&tile.data[0..4], &[10, 20, 30, 255]);
}

#[test]
fn reduce_by_one_is_identity() {
    let tile = TileImage::solid(5, 3, [1, 2, 3, 255]);
    let out = tile.reduce(1).unwrap();
    assert_eq!(out, tile);
}

#[test]
fn reduce_rounds_dimensions_up() {
    let tile = TileImage::solid(5, 3, [1, 2, 3, 255]);
    let out = tile.reduce(2).unwrap();
    assert_eq!((out.width, out.height), (3, 2));
}

#[test]
fn reduce_rejects_factor_zero() {
    assert!(TileImage::new(2, 2).reduce(0).is_err());
}

#[test]
fn upscale_restores_reduced_size() {
    let tile = TileImage::solid(8, 6, [9, 9, 9, 255]);
    let reduced = tile.reduce(2).unwrap();
    let restored = reduced.upscale_to(8, 6).unwrap();
    assert_eq!((restored.width, restored.height), (8, 6));
    assert_eq!(restored.data, tile.data);
}

#[test]
fn upscale_rejects_shrinking() {
    assert!(TileImage::new(4, 4).upscale_to(2, 4).is_err());
}

#[test]
fn merge_places_source_at_its_extent() {
    let mut mosaic = TileImage::new(4, 2);
    let mut right = TileImage::solid(2, 2, [255, 0, 0, 255]);
    right.adjust_extent(2, 0);
    mosaic.merge(&right).unwrap();

    // Left half untouched, right half red.
    assert_eq!(&mosaic.data[0..4], &[0, 0, 0, 0]);
    let off = 2 * 4;
    assert_eq!(&mosaic.data[off..off + 4], &[255, 0, 0, 255]);
}

#[test]
fn merge_outside_extent_is_a_noop() {
    let mut mosaic = TileImage::new(2, 2);
    let mut far = TileImage::solid(2, 2, [255, 0, 0, 255]);
    far.adjust_extent(10, 10);
    mosaic.merge(&far).unwrap();
    assert!(mosaic.is_fully_transparent());
}

#[test]
fn rgba_image_interop_preserves_pixels() {
    let tile = TileImage::solid(3, 2, [7, 8, 9, 255]);
    let img = tile.to_rgba_image().unwrap();
    assert_eq!(img.dimensions(), (3, 2));
    assert_eq!(img.get_pixel(2, 1).0, [7, 8, 9, 255]);
}
