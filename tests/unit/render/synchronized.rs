use super::*;
use crate::render::backend::SolidRenderer;
use crate::render::ordered::PreGatheredCollective;

fn solid(color: [u8; 4]) -> Box<SolidRenderer> {
    Box::new(SolidRenderer::new(8, 8, color, 0.5))
}

struct Recolor([u8; 4]);

impl ImageProcessingPass for Recolor {
    fn process(&mut self, image: &mut TileImage, _use_depth_buffer: bool) -> ParvisResult<()> {
        for px in image.data.chunks_exact_mut(4) {
            px.copy_from_slice(&self.0);
        }
        Ok(())
    }
}

#[test]
fn builtin_session_renders_pass_through() {
    let mut sync = SynchronizedRenderer::new(solid([1, 2, 3, 255]));
    sync.initialize(&Session::builtin(), 0, None).unwrap();
    assert_eq!(sync.mode(), SynchronizerMode::Builtin);
    assert!(sync.parallel_synchronizer().is_none());
    assert!(sync.client_synchronizer().is_none());

    let frame = sync.render().unwrap();
    assert_eq!(&frame.data[0..4], &[1, 2, 3, 255]);
}

#[test]
fn initialize_is_one_time_only() {
    let mut sync = SynchronizedRenderer::new(solid([0, 0, 0, 255]));
    sync.initialize(&Session::builtin(), 0, None).unwrap();
    assert!(sync.initialize(&Session::builtin(), 0, None).is_err());
}

#[test]
fn client_session_gets_a_relay_synchronizer() {
    let mut sync = SynchronizedRenderer::new(solid([0, 0, 0, 255]));
    sync.initialize(&Session::client(), 0, None).unwrap();
    assert!(sync.parallel_synchronizer().is_none());
    assert!(sync.client_synchronizer().is_some());
}

#[test]
fn single_process_server_relays_to_the_client() {
    let mut server = SynchronizedRenderer::new(solid([50, 60, 70, 255]));
    server
        .initialize(&Session::server(0, 1).unwrap(), 0, None)
        .unwrap();
    server.set_image_reduction_factor(2).unwrap();
    server.render().unwrap();

    let payload = server.take_client_payload().expect("server relays");
    assert_eq!((payload.width, payload.height), (4, 4));
    assert_eq!(payload.full_size, (8, 8));

    let mut client = SynchronizedRenderer::new(solid([0, 0, 0, 255]));
    client.initialize(&Session::client(), 0, None).unwrap();
    client.set_image_reduction_factor(2).unwrap();
    let frame = client.receive_client_payload(&payload).unwrap();
    assert_eq!((frame.width, frame.height), (8, 8));
    assert_eq!(&frame.data[0..4], &[50, 60, 70, 255]);
}

#[test]
fn multi_process_server_uses_ordered_compositing() {
    let collective = PreGatheredCollective::new(0, vec![(1, TileImage::new(8, 8))]);
    let mut sync = SynchronizedRenderer::new(solid([9, 9, 9, 255]));
    sync.initialize(
        &Session::server(0, 2).unwrap(),
        7,
        Some(Box::new(collective)),
    )
    .unwrap();
    assert!(sync.parallel_synchronizer().is_some());
    // Root rank of a server also relays to the client.
    assert!(sync.client_synchronizer().is_some());

    let frame = sync.render().unwrap();
    assert_eq!((frame.width, frame.height), (8, 8));
    assert_eq!(&frame.data[0..4], &[9, 9, 9, 255]);
    assert!(sync.take_client_payload().is_some());
}

#[test]
fn non_root_server_rank_does_not_relay() {
    let collective = PreGatheredCollective::new(1, vec![(0, TileImage::new(8, 8))]);
    let mut sync = SynchronizedRenderer::new(solid([9, 9, 9, 255]));
    sync.initialize(
        &Session::server(1, 2).unwrap(),
        7,
        Some(Box::new(collective)),
    )
    .unwrap();
    assert!(sync.parallel_synchronizer().is_some());
    assert!(sync.client_synchronizer().is_none());

    sync.render().unwrap();
    assert!(sync.take_client_payload().is_none());
}

#[test]
fn disabling_ordered_compositing_degrades_silently() {
    let collective = PreGatheredCollective::new(0, vec![(1, TileImage::new(8, 8))]);
    let mut sync = SynchronizedRenderer::new(solid([9, 9, 9, 255]));
    sync.set_disable_ordered_compositing(true);
    sync.initialize(
        &Session::server(0, 2).unwrap(),
        0,
        Some(Box::new(collective)),
    )
    .unwrap();
    assert!(sync.parallel_synchronizer().is_none());
    assert!(sync.client_synchronizer().is_some());
}

#[test]
fn missing_collective_degrades_silently() {
    let mut sync = SynchronizedRenderer::new(solid([9, 9, 9, 255]));
    sync.initialize(&Session::batch(0, 4).unwrap(), 0, None)
        .unwrap();
    assert!(sync.parallel_synchronizer().is_none());
    sync.render().unwrap();
}

#[test]
fn disabled_renderer_bypasses_all_interception() {
    let mut sync = SynchronizedRenderer::new(solid([1, 1, 1, 255]));
    sync.initialize(&Session::builtin(), 0, None).unwrap();
    sync.set_image_processing_pass(Some(Box::new(Recolor([200, 0, 0, 255]))));

    let processed = sync.render().unwrap();
    assert_eq!(&processed.data[0..4], &[200, 0, 0, 255]);

    sync.set_enabled(false);
    let raw = sync.render().unwrap();
    assert_eq!(&raw.data[0..4], &[1, 1, 1, 255]);
}

#[test]
fn reduction_factor_zero_is_rejected() {
    let mut sync = SynchronizedRenderer::new(solid([0, 0, 0, 255]));
    assert!(sync.set_image_reduction_factor(0).is_err());
    assert!(sync.set_image_reduction_factor(4).is_ok());
    assert_eq!(sync.image_reduction_factor(), 4);
}

#[test]
fn passes_are_forwarded_to_the_ordered_compositor() {
    let collective = PreGatheredCollective::new(0, vec![(1, TileImage::new(8, 8))]);
    let mut sync = SynchronizedRenderer::new(solid([1, 1, 1, 255]));
    sync.initialize(
        &Session::batch(0, 2).unwrap(),
        0,
        Some(Box::new(collective)),
    )
    .unwrap();
    sync.set_image_processing_pass(Some(Box::new(Recolor([0, 99, 0, 255]))));

    let frame = sync.render().unwrap();
    assert_eq!(&frame.data[0..4], &[0, 99, 0, 255]);
}
