use crate::foundation::error::{ParvisError, ParvisResult};
use crate::render::compressor::{Compressor, CompressorConfig};
use crate::render::image::TileImage;

/// A reduced, optionally compressed frame in flight to the client.
#[derive(Clone, Debug)]
pub struct RelayedImage {
    /// Width of the reduced raster.
    pub width: u32,
    /// Height of the reduced raster.
    pub height: u32,
    /// Full-resolution size to restore on display.
    pub full_size: (u32, u32),
    /// Reduction factor that was applied on the server side.
    pub reduction_factor: u32,
    /// Raw or RLE-compressed RGBA8 payload.
    pub payload: Vec<u8>,
    /// Whether `payload` is compressed.
    pub compressed: bool,
}

/// Client-server image-relay synchronizer.
///
/// On the server side it packages reduced frames for the wire, compressing
/// when a compressor has been configured; on the client side it restores the
/// display-resolution frame. The reduction factor is recorded in the payload
/// so the client can upscale, but both sides are expected to be configured
/// identically — a mismatch is the caller's bug and is not detected here.
pub struct ClientRelaySynchronizer {
    reduction_factor: u32,
    compressor: Option<Compressor>,
    lossless: bool,
}

impl Default for ClientRelaySynchronizer {
    fn default() -> Self {
        Self {
            reduction_factor: 1,
            compressor: None,
            lossless: false,
        }
    }
}

impl ClientRelaySynchronizer {
    /// Record the reduction factor applied before relaying.
    pub fn set_image_reduction_factor(&mut self, factor: u32) {
        self.reduction_factor = factor.max(1);
    }

    /// Configure compression from the opaque configuration string.
    pub fn configure_compressor(&mut self, configuration: &str) -> ParvisResult<()> {
        let mut compressor = Compressor::new(CompressorConfig::parse(configuration)?);
        compressor.set_lossless(self.lossless);
        self.compressor = Some(compressor);
        Ok(())
    }

    /// Force exact image reconstruction on the client.
    pub fn set_lossless_compression(&mut self, lossless: bool) {
        self.lossless = lossless;
        if let Some(compressor) = self.compressor.as_mut() {
            compressor.set_lossless(lossless);
        }
    }

    /// Package an already-reduced frame for delivery.
    pub fn relay(&self, reduced: &TileImage, full_size: (u32, u32)) -> ParvisResult<RelayedImage> {
        let (payload, compressed) = match &self.compressor {
            Some(compressor) => (compressor.compress(&reduced.data)?, true),
            None => (reduced.data.clone(), false),
        };
        Ok(RelayedImage {
            width: reduced.width,
            height: reduced.height,
            full_size,
            reduction_factor: self.reduction_factor,
            payload,
            compressed,
        })
    }

    /// Restore a relayed frame to display resolution.
    pub fn receive(&self, relayed: &RelayedImage) -> ParvisResult<TileImage> {
        let expected = (relayed.width as usize) * (relayed.height as usize) * 4;
        let data = if relayed.compressed {
            let compressor = self
                .compressor
                .as_ref()
                .ok_or_else(|| ParvisError::render("received compressed frame without a compressor"))?;
            compressor.decompress(&relayed.payload, expected)?
        } else {
            if relayed.payload.len() != expected {
                return Err(ParvisError::render("relayed payload length mismatch"));
            }
            relayed.payload.clone()
        };

        let reduced = TileImage {
            width: relayed.width,
            height: relayed.height,
            data,
            depth: None,
            extent: crate::foundation::core::Extent::anchored(0, 0, relayed.width, relayed.height),
        };
        reduced.upscale_to(relayed.full_size.0, relayed.full_size.1)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/relay.rs"]
mod tests;
