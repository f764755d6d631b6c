use crate::foundation::error::{ParvisError, ParvisResult};

/// Supported compression kinds for network-bound image relay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CompressorKind {
    /// Run-length encoding over 32-bit pixels, optionally lossy via low-bit
    /// masking of the color channels.
    Rle,
}

/// Parsed compressor configuration.
///
/// The wire form is an opaque string `"<kind> <lossy-bits>"`, e.g. `"rle 3"`.
/// `lossy_bits` is the number of low bits masked off each color channel
/// before encoding; it is ignored when lossless compression is forced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CompressorConfig {
    /// Compression algorithm.
    pub kind: CompressorKind,
    /// Low bits masked per color channel in lossy mode, 0..=7.
    pub lossy_bits: u8,
}

impl CompressorConfig {
    /// Parse the opaque configuration string.
    pub fn parse(configuration: &str) -> ParvisResult<Self> {
        let mut parts = configuration.split_whitespace();
        let kind = match parts.next() {
            Some("rle") => CompressorKind::Rle,
            Some(other) => {
                return Err(ParvisError::validation(format!(
                    "unknown compressor kind '{other}'"
                )));
            }
            None => return Err(ParvisError::validation("empty compressor configuration")),
        };
        let lossy_bits = match parts.next() {
            Some(v) => v
                .parse::<u8>()
                .ok()
                .filter(|b| *b <= 7)
                .ok_or_else(|| ParvisError::validation("compressor lossy bits must be 0..=7"))?,
            None => 0,
        };
        Ok(Self { kind, lossy_bits })
    }
}

/// Image compressor used on the client-relay path.
#[derive(Clone, Copy, Debug)]
pub struct Compressor {
    config: CompressorConfig,
    lossless: bool,
}

impl Compressor {
    /// Compressor from a parsed configuration; lossless is off by default.
    pub fn new(config: CompressorConfig) -> Self {
        Self {
            config,
            lossless: false,
        }
    }

    /// Force exact reconstruction regardless of configured lossy bits.
    pub fn set_lossless(&mut self, lossless: bool) {
        self.lossless = lossless;
    }

    fn channel_mask(&self) -> u8 {
        if self.lossless {
            0xFF
        } else {
            0xFFu8 << self.config.lossy_bits
        }
    }

    /// Compress tightly packed RGBA8 bytes.
    ///
    /// Output format: repeated `[run_len_minus_one: u8, rgba: 4 bytes]`
    /// records. Alpha is never masked.
    pub fn compress(&self, rgba: &[u8]) -> ParvisResult<Vec<u8>> {
        if !rgba.len().is_multiple_of(4) {
            return Err(ParvisError::render("compress expects rgba8 input"));
        }
        let mask = self.channel_mask();
        let mut out = Vec::with_capacity(rgba.len() / 4);
        let mut pixels = rgba.chunks_exact(4).map(|px| {
            [px[0] & mask, px[1] & mask, px[2] & mask, px[3]]
        });

        let Some(mut current) = pixels.next() else {
            return Ok(out);
        };
        let mut run: u16 = 0;
        for px in pixels {
            if px == current && run < 255 {
                run += 1;
            } else {
                out.push(run as u8);
                out.extend_from_slice(&current);
                current = px;
                run = 0;
            }
        }
        out.push(run as u8);
        out.extend_from_slice(&current);
        Ok(out)
    }

    /// Decompress into exactly `expected_len` bytes of RGBA8.
    pub fn decompress(&self, payload: &[u8], expected_len: usize) -> ParvisResult<Vec<u8>> {
        if !payload.len().is_multiple_of(5) {
            return Err(ParvisError::render("corrupt rle payload length"));
        }
        let mut out = Vec::with_capacity(expected_len);
        for record in payload.chunks_exact(5) {
            let run = record[0] as usize + 1;
            for _ in 0..run {
                out.extend_from_slice(&record[1..5]);
            }
        }
        if out.len() != expected_len {
            return Err(ParvisError::render(format!(
                "rle payload decoded to {} bytes, expected {expected_len}",
                out.len()
            )));
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compressor.rs"]
mod tests;
