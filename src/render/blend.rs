use crate::foundation::error::{ParvisError, ParvisResult};

pub(crate) type PremulRgba8 = [u8; 4];

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

/// Porter-Duff `src over dst` on premultiplied RGBA8.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(src[3]);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(src[3], mul_div255(u16::from(dst[3]), inv));
    for i in 0..3 {
        out[i] = add_sat_u8(src[i], mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Blend `src` over `dst` pixel-wise; buffers must be equal-length RGBA8.
pub(crate) fn over_in_place(dst: &mut [u8], src: &[u8]) -> ParvisResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(ParvisError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Depth-resolve `src` into `dst`: per pixel, the fragment with the smaller
/// depth wins. Used for opaque geometry when depth buffers are available.
pub(crate) fn depth_resolve_in_place(
    dst: &mut [u8],
    dst_depth: &mut [f32],
    src: &[u8],
    src_depth: &[f32],
) -> ParvisResult<()> {
    if dst.len() != src.len()
        || !dst.len().is_multiple_of(4)
        || dst_depth.len() != src_depth.len()
        || dst_depth.len() * 4 != dst.len()
    {
        return Err(ParvisError::render(
            "depth_resolve_in_place expects matching rgba8 and depth buffers",
        ));
    }
    for (i, (dd, sd)) in dst_depth.iter_mut().zip(src_depth.iter()).enumerate() {
        if sd < dd {
            *dd = *sd;
            let off = i * 4;
            dst[off..off + 4].copy_from_slice(&src[off..off + 4]);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/blend.rs"]
mod tests;
