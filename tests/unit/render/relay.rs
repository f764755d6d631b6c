use super::*;

#[test]
fn uncompressed_relay_roundtrips_via_upscale() {
    let mut relay = ClientRelaySynchronizer::default();
    relay.set_image_reduction_factor(2);

    let full = TileImage::solid(8, 8, [40, 30, 20, 255]);
    let reduced = full.reduce(2).unwrap();
    let relayed = relay.relay(&reduced, (8, 8)).unwrap();
    assert!(!relayed.compressed);
    assert_eq!(relayed.reduction_factor, 2);

    let restored = relay.receive(&relayed).unwrap();
    assert_eq!((restored.width, restored.height), (8, 8));
    assert_eq!(restored.data, full.data);
}

#[test]
fn configured_compressor_produces_compressed_payloads() {
    let mut relay = ClientRelaySynchronizer::default();
    relay.configure_compressor("rle 0").unwrap();

    let frame = TileImage::solid(16, 16, [5, 5, 5, 255]);
    let relayed = relay.relay(&frame, (16, 16)).unwrap();
    assert!(relayed.compressed);
    assert!(relayed.payload.len() < frame.data.len());

    let restored = relay.receive(&relayed).unwrap();
    assert_eq!(restored.data, frame.data);
}

#[test]
fn lossless_toggle_reaches_an_already_configured_compressor() {
    let mut relay = ClientRelaySynchronizer::default();
    relay.configure_compressor("rle 4").unwrap();
    relay.set_lossless_compression(true);

    let frame = TileImage::solid(4, 4, [0b0000_1111, 1, 2, 255]);
    let relayed = relay.relay(&frame, (4, 4)).unwrap();
    let restored = relay.receive(&relayed).unwrap();
    assert_eq!(restored.data, frame.data);
}

#[test]
fn receiving_compressed_without_compressor_errors() {
    let mut sender = ClientRelaySynchronizer::default();
    sender.configure_compressor("rle 0").unwrap();
    let relayed = sender
        .relay(&TileImage::solid(4, 4, [1, 2, 3, 255]), (4, 4))
        .unwrap();

    let receiver = ClientRelaySynchronizer::default();
    assert!(receiver.receive(&relayed).is_err());
}

#[test]
fn payload_length_is_validated() {
    let relay = ClientRelaySynchronizer::default();
    let mut relayed = relay
        .relay(&TileImage::solid(4, 4, [1, 2, 3, 255]), (4, 4))
        .unwrap();
    relayed.payload.pop();
    assert!(relay.receive(&relayed).is_err());
}
