use crate::foundation::error::ParvisResult;
use crate::render::image::TileImage;

/// The one target renderer a [`SynchronizedRenderer`] synchronizes.
///
/// Real deployments wrap the toolkit's renderer here; tests inject stubs.
///
/// [`SynchronizedRenderer`]: crate::render::synchronized::SynchronizedRenderer
pub trait Renderer: Send {
    /// Render the local scene into a tile.
    fn render(&mut self) -> ParvisResult<TileImage>;

    /// Viewport size in pixels.
    fn viewport_size(&self) -> (u32, u32);
}

/// Minimal always-available renderer: fills the viewport with one color at a
/// constant depth.
#[derive(Clone, Debug)]
pub struct SolidRenderer {
    width: u32,
    height: u32,
    /// Premultiplied fill color.
    pub color: [u8; 4],
    /// Constant depth written for every pixel.
    pub depth: f32,
}

impl SolidRenderer {
    /// Renderer with the given viewport and fill.
    pub fn new(width: u32, height: u32, color: [u8; 4], depth: f32) -> Self {
        Self {
            width,
            height,
            color,
            depth,
        }
    }
}

impl Renderer for SolidRenderer {
    fn render(&mut self) -> ParvisResult<TileImage> {
        let mut tile = TileImage::solid(self.width, self.height, self.color);
        tile.depth = Some(vec![self.depth; (self.width * self.height) as usize]);
        Ok(tile)
    }

    fn viewport_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
