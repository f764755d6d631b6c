use std::sync::atomic::{AtomicU64, Ordering};

use crate::foundation::core::{Extent, ViewId};
use crate::render::image::TileImage;
use crate::session::Session;

static SURFACE_SERIAL: AtomicU64 = AtomicU64::new(1);

/// Render surface backing one sub-view of the comparative grid.
///
/// Stands in for the per-view render window/interactor binding. Each surface
/// gets a unique serial at creation, so callers can verify that surviving
/// surfaces are preserved by identity across registry updates.
#[derive(Clone, Debug)]
pub struct RenderSurface {
    view: ViewId,
    serial: u64,
    session: Session,
    width: u32,
    height: u32,
    fill: [u8; 4],
    offscreen_screenshots: bool,
}

impl RenderSurface {
    /// Create and initialize a surface for `view`, propagating the session.
    pub fn new(view: ViewId, session: Session) -> Self {
        Self {
            view,
            serial: SURFACE_SERIAL.fetch_add(1, Ordering::Relaxed),
            session,
            width: 300,
            height: 300,
            fill: [0, 0, 0, 255],
            offscreen_screenshots: false,
        }
    }

    /// The sub-view this surface renders.
    pub fn view(&self) -> ViewId {
        self.view
    }

    /// Creation serial; unique per surface instance.
    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// Session the surface was initialized with.
    pub fn session(&self) -> Session {
        self.session
    }

    /// Resize the bound render window.
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Surface size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Set the solid color this surface renders.
    pub fn set_fill(&mut self, fill: [u8; 4]) {
        self.fill = fill;
    }

    /// Toggle offscreen rendering for screenshots.
    pub fn set_offscreen_screenshots(&mut self, enabled: bool) {
        self.offscreen_screenshots = enabled;
    }

    /// Whether offscreen screenshot rendering is on.
    pub fn offscreen_screenshots(&self) -> bool {
        self.offscreen_screenshots
    }

    /// Capture the surface raster at an integer magnification.
    pub fn capture(&self, magnification: u32) -> TileImage {
        let w = self.width * magnification.max(1);
        let h = self.height * magnification.max(1);
        let mut tile = TileImage::solid(w, h, self.fill);
        tile.extent = Extent::anchored(0, 0, w, h);
        tile
    }
}
