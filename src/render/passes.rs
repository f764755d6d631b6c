use crate::foundation::error::ParvisResult;
use crate::render::backend::Renderer;
use crate::render::image::TileImage;

/// Injected geometry render pass.
///
/// When set, this pass owns producing the local frame instead of the default
/// renderer path. It is forwarded to the ordered compositor when that owns
/// the render loop.
pub trait RenderPass: Send {
    /// Produce the local frame from the target renderer.
    fn render(&mut self, renderer: &mut dyn Renderer) -> ParvisResult<TileImage>;
}

/// Injected post-process image pass, applied after compositing.
pub trait ImageProcessingPass: Send {
    /// Process the composited frame in place. `use_depth_buffer` signals that
    /// the pass may read the tile's depth channel.
    fn process(&mut self, image: &mut TileImage, use_depth_buffer: bool) -> ParvisResult<()>;
}
