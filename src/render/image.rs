use rayon::prelude::*;

use crate::foundation::core::Extent;
use crate::foundation::error::{ParvisError, ParvisResult};

/// A rendered tile as RGBA8 pixels plus an optional depth buffer.
///
/// Pixels are **premultiplied alpha**, tightly packed, row-major, with the
/// extent locating the tile in mosaic/display space.
#[derive(Clone, Debug, PartialEq)]
pub struct TileImage {
    /// Tile width in pixels.
    pub width: u32,
    /// Tile height in pixels.
    pub height: u32,
    /// RGBA8 bytes, `width * height * 4` long.
    pub data: Vec<u8>,
    /// Optional per-pixel depth, `width * height` long, smaller is nearer.
    pub depth: Option<Vec<f32>>,
    /// Placement of this tile.
    pub extent: Extent,
}

impl TileImage {
    /// Fully transparent tile anchored at the origin.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
            depth: None,
            extent: Extent::anchored(0, 0, width, height),
        }
    }

    /// Tile filled with one premultiplied RGBA color.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut img = Self::new(width, height);
        for px in img.data.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
        img
    }

    /// Byte length expected for the dimensions.
    fn expected_len(width: u32, height: u32) -> usize {
        (width as usize) * (height as usize) * 4
    }

    /// `true` when every pixel is fully transparent.
    pub fn is_fully_transparent(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 0)
    }

    /// Subsample by an integer factor, producing a
    /// `ceil(w/factor) x ceil(h/factor)` tile. Factor 1 is a clone.
    pub fn reduce(&self, factor: u32) -> ParvisResult<TileImage> {
        if factor == 0 {
            return Err(ParvisError::validation("reduction factor must be >= 1"));
        }
        if factor == 1 {
            return Ok(self.clone());
        }
        let out_w = self.width.div_ceil(factor);
        let out_h = self.height.div_ceil(factor);
        let mut out = TileImage::new(out_w, out_h);
        if out_w == 0 || out_h == 0 {
            return Ok(out);
        }
        out.data
            .par_chunks_exact_mut((out_w as usize) * 4)
            .enumerate()
            .for_each(|(oy, row)| {
                let sy = ((oy as u32) * factor).min(self.height - 1) as usize;
                for ox in 0..out_w as usize {
                    let sx = ((ox as u32) * factor).min(self.width - 1) as usize;
                    let src = (sy * self.width as usize + sx) * 4;
                    row[ox * 4..ox * 4 + 4].copy_from_slice(&self.data[src..src + 4]);
                }
            });
        out.extent = self.extent;
        Ok(out)
    }

    /// Nearest-neighbor upscale to an explicit target size, inverse of
    /// [`TileImage::reduce`] on the display side.
    pub fn upscale_to(&self, target_w: u32, target_h: u32) -> ParvisResult<TileImage> {
        if target_w < self.width || target_h < self.height {
            return Err(ParvisError::validation(
                "upscale target must not be smaller than the source",
            ));
        }
        if target_w == self.width && target_h == self.height {
            return Ok(self.clone());
        }
        let mut out = TileImage::new(target_w, target_h);
        out.data
            .par_chunks_exact_mut((target_w as usize) * 4)
            .enumerate()
            .for_each(|(oy, row)| {
                let sy = ((oy as u64 * self.height as u64) / target_h as u64) as usize;
                for ox in 0..target_w as usize {
                    let sx = ((ox as u64 * self.width as u64) / target_w as u64) as usize;
                    let src = (sy * self.width as usize + sx) * 4;
                    row[ox * 4..ox * 4 + 4].copy_from_slice(&self.data[src..src + 4]);
                }
            });
        out.extent = self.extent;
        Ok(out)
    }

    /// Anchor the extent at an explicit top-left position in mosaic space.
    pub fn adjust_extent(&mut self, top_left_x: i32, top_left_y: i32) {
        self.extent = Extent::anchored(top_left_x, top_left_y, self.width, self.height);
    }

    /// Copy `src` into this tile where their extents overlap.
    pub fn merge(&mut self, src: &TileImage) -> ParvisResult<()> {
        if src.data.len() != Self::expected_len(src.width, src.height) {
            return Err(ParvisError::render("merge source has inconsistent length"));
        }
        let x0 = src.extent.xmin.max(self.extent.xmin);
        let x1 = src.extent.xmax.min(self.extent.xmax);
        let y0 = src.extent.ymin.max(self.extent.ymin);
        let y1 = src.extent.ymax.min(self.extent.ymax);
        if x0 > x1 || y0 > y1 {
            return Ok(());
        }
        for y in y0..=y1 {
            let src_row = (y - src.extent.ymin) as usize;
            let dst_row = (y - self.extent.ymin) as usize;
            let src_off = (src_row * src.width as usize + (x0 - src.extent.xmin) as usize) * 4;
            let dst_off = (dst_row * self.width as usize + (x0 - self.extent.xmin) as usize) * 4;
            let run = ((x1 - x0 + 1) as usize) * 4;
            self.data[dst_off..dst_off + run].copy_from_slice(&src.data[src_off..src_off + run]);
        }
        Ok(())
    }

    /// Interop view as an [`image::RgbaImage`], e.g. for raster comparison in
    /// tests and tooling.
    pub fn to_rgba_image(&self) -> ParvisResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| ParvisError::render("tile buffer does not match dimensions"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/image.rs"]
mod tests;
