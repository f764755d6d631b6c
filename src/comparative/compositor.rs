use std::collections::{BTreeMap, BTreeSet};

use crate::foundation::core::{GridDims, ViewId};
use crate::foundation::error::ParvisResult;
use crate::render::image::TileImage;
use crate::session::Session;

use super::surface::RenderSurface;

/// Grid configuration of the comparative container.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct ComparativeLayout {
    /// Grid dimensions `(columns, rows)`.
    pub dimensions: GridDims,
    /// Horizontal and vertical spacing between cells, display-only.
    pub spacing: (u32, u32),
    /// Collapse the grid to a single overlaid cell.
    pub overlay_all: bool,
}

impl Default for ComparativeLayout {
    fn default() -> Self {
        Self {
            dimensions: GridDims { cols: 1, rows: 1 },
            spacing: (0, 0),
            overlay_all: false,
        }
    }
}

/// Manages one render surface per sub-view of an N x M comparison grid and
/// assembles their captured images into a single mosaic.
pub struct ComparativeCompositor {
    session: Session,
    layout: ComparativeLayout,
    view_position: (i32, i32),
    visible: bool,
    surfaces: BTreeMap<ViewId, RenderSurface>,
    /// Row-major cell -> view mapping rebuilt on every widget update.
    cells: Vec<Option<ViewId>>,
    cell_dims: GridDims,
}

impl ComparativeCompositor {
    /// Empty compositor bound to a session.
    pub fn new(session: Session) -> Self {
        Self {
            session,
            layout: ComparativeLayout::default(),
            view_position: (0, 0),
            visible: true,
            surfaces: BTreeMap::new(),
            cells: Vec::new(),
            cell_dims: GridDims { cols: 1, rows: 1 },
        }
    }

    /// Replace the grid configuration. Takes effect at the next
    /// [`update_view_widgets`](Self::update_view_widgets).
    pub fn set_layout(&mut self, layout: ComparativeLayout) {
        self.layout = layout;
    }

    /// Position of this container inside its parent view, in unmagnified
    /// pixels.
    pub fn set_view_position(&mut self, x: i32, y: i32) {
        self.view_position = (x, y);
    }

    /// Show or hide the container. Invisible containers capture nothing.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Surface registered for `view`, if any.
    pub fn surface(&self, view: ViewId) -> Option<&RenderSurface> {
        self.surfaces.get(&view)
    }

    /// Mutable surface registered for `view`, if any.
    pub fn surface_mut(&mut self, view: ViewId) -> Option<&mut RenderSurface> {
        self.surfaces.get_mut(&view)
    }

    /// Number of registered surfaces.
    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    fn effective_dims(&self) -> GridDims {
        if self.layout.overlay_all {
            GridDims { cols: 1, rows: 1 }
        } else {
            self.layout.dimensions
        }
    }

    /// Synchronize surfaces against the server-side view collection and
    /// rebuild the grid layout from scratch.
    ///
    /// Membership is set-difference-driven: surfaces are destroyed for views
    /// that disappeared and created for views that appeared; surfaces for
    /// surviving views are the same instances. Cell `(x, y)` maps to
    /// `current_views[y * cols + x]`.
    pub fn update_view_widgets(&mut self, current_views: &[ViewId]) {
        let current: BTreeSet<ViewId> = current_views.iter().copied().collect();
        let known: BTreeSet<ViewId> = self.surfaces.keys().copied().collect();

        for removed in known.difference(&current) {
            self.surfaces.remove(removed);
        }
        for added in current.difference(&known) {
            self.surfaces
                .insert(*added, RenderSurface::new(*added, self.session));
        }

        let dims = self.effective_dims();
        self.cell_dims = dims;
        self.cells.clear();
        for y in 0..dims.rows {
            for x in 0..dims.cols {
                let index = (y * dims.cols + x) as usize;
                self.cells.push(current_views.get(index).copied());
            }
        }
    }

    /// Capture the mosaic of every grid cell at an integer magnification.
    ///
    /// Returns `Ok(None)` when the container is not visible — an explicit
    /// no-result, not an error. Cells are captured in row-major order; each
    /// cell's extent is adjusted to its accumulated top-left position, and
    /// the row's y-advance uses the height of the *last* captured image in
    /// that row. Mixed cell heights within a row therefore misalign the
    /// mosaic; a debug assertion flags this.
    #[tracing::instrument(skip(self))]
    pub fn capture_image(&mut self, magnification: u32) -> ParvisResult<Option<TileImage>> {
        if !self.visible {
            return Ok(None);
        }
        let magnification = magnification.max(1);
        let dims = self.cell_dims;

        let mut images: Vec<TileImage> = Vec::with_capacity(dims.len());
        let mut final_width: u32 = 0;
        let mut final_height: u32 = 0;

        for y in 0..dims.rows {
            final_width = 0;
            let mut row_height: u32 = 0;
            for x in 0..dims.cols {
                let index = (y * dims.cols + x) as usize;
                let Some(view) = self.cells.get(index).copied().flatten() else {
                    continue;
                };
                let Some(surface) = self.surfaces.get_mut(&view) else {
                    continue;
                };
                // Offscreen rendering does not work with comparative
                // screenshots; force it off before capturing.
                surface.set_offscreen_screenshots(false);

                let mut img = surface.capture(magnification);
                img.adjust_extent(final_width as i32, final_height as i32);
                final_width += img.width;
                if row_height != 0 {
                    debug_assert_eq!(
                        row_height, img.height,
                        "mixed cell heights within a row misalign the mosaic"
                    );
                }
                row_height = img.height;
                images.push(img);
            }
            final_height += row_height;
        }

        let mut final_image = TileImage::new(final_width, final_height);
        for img in &images {
            final_image.merge(img)?;
        }
        final_image.extent.translate(
            self.view_position.0 * magnification as i32,
            self.view_position.1 * magnification as i32,
        );
        Ok(Some(final_image))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/comparative/compositor.rs"]
mod tests;
