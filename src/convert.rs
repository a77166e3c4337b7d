//! Per-texel conversions between uncompressed encodings and canonical BGRA.
//!
//! All converters work row by row through [`crate::parallel::map_chunks`].

use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;

use crate::error::FsBmpError;
use crate::parallel::map_chunks;
use crate::pixel::ChannelMask;

/// Expand a 5-bit channel to 8 bits.
#[inline]
pub(crate) fn expand5(v: u32) -> u8 {
    ((v & 0x1f) * 255 / 31) as u8
}

/// Expand a 6-bit channel to 8 bits.
#[inline]
pub(crate) fn expand6(v: u32) -> u8 {
    ((v & 0x3f) * 255 / 63) as u8
}

/// B,G,R → B,G,R,A with opaque alpha.
pub(crate) fn std24_to_bgra(
    data: &[u8],
    width: u32,
    stop: &dyn Stop,
) -> Result<Vec<u8>, FsBmpError> {
    let w = width as usize;
    let mut out = vec![0u8; data.len() / 3 * 4];
    map_chunks(data, w * 3, &mut out, w * 4, stop, |src, dst| {
        for (s, d) in src.chunks_exact(3).zip(dst.chunks_exact_mut(4)) {
            d[..3].copy_from_slice(s);
            d[3] = 0xff;
        }
    })?;
    Ok(out)
}

/// B,G,R,A → B,G,R.
pub(crate) fn bgra_to_std24(
    pixels: &[u8],
    width: u32,
    stop: &dyn Stop,
) -> Result<Vec<u8>, FsBmpError> {
    let w = width as usize;
    let mut out = vec![0u8; pixels.len() / 4 * 3];
    map_chunks(pixels, w * 4, &mut out, w * 3, stop, |src, dst| {
        for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(3)) {
            d.copy_from_slice(&s[..3]);
        }
    })?;
    Ok(out)
}

/// X1R5G5B5 → B,G,R,A.
pub(crate) fn std16_to_bgra(
    data: &[u8],
    width: u32,
    stop: &dyn Stop,
) -> Result<Vec<u8>, FsBmpError> {
    let w = width as usize;
    let mut out = vec![0u8; data.len() / 2 * 4];
    map_chunks(data, w * 2, &mut out, w * 4, stop, |src, dst| {
        for (s, d) in src.chunks_exact(2).zip(dst.chunks_exact_mut(4)) {
            let v = u32::from(u16::from_le_bytes([s[0], s[1]]));
            d[0] = expand5(v);
            d[1] = expand5(v >> 5);
            d[2] = expand5(v >> 10);
            d[3] = 0xff;
        }
    })?;
    Ok(out)
}

/// Bitfield 16-bit → B,G,R,A.
pub(crate) fn masked16_to_bgra(
    data: &[u8],
    width: u32,
    masks: ChannelMask,
    stop: &dyn Stop,
) -> Result<Vec<u8>, FsBmpError> {
    let w = width as usize;
    let mut out = vec![0u8; data.len() / 2 * 4];
    map_chunks(data, w * 2, &mut out, w * 4, stop, |src, dst| {
        for (s, d) in src.chunks_exact(2).zip(dst.chunks_exact_mut(4)) {
            d.copy_from_slice(&unpack_masked(u16::from_le_bytes([s[0], s[1]]), masks));
        }
    })?;
    Ok(out)
}

/// Unpack one bitfield pixel to B,G,R,A.
///
/// Each channel is shifted down by dividing by one plus the sum of the masks
/// of the channels before it (blue, green, red, alpha), then scaled by
/// `255 / (mask / divisor)`. This only equals a shift-and-scale when the
/// masks are contiguous, disjoint and ordered blue < green < red < alpha;
/// other layouts produce whatever this arithmetic yields.
fn unpack_masked(pixel: u16, masks: ChannelMask) -> [u8; 4] {
    let pixel = u32::from(pixel);
    let channel = |mask: u32, divisor: u32, default: u8| -> u8 {
        if mask == 0 {
            return default;
        }
        let value = (pixel & mask) / divisor;
        // A mask narrower than its divisor has no representable range.
        match value.checked_mul(255).and_then(|v| v.checked_div(mask / divisor)) {
            Some(v) => v as u8,
            None => 0,
        }
    };
    let blue_div = 1;
    let green_div = masks.blue.wrapping_add(1);
    let red_div = masks.green.wrapping_add(masks.blue).wrapping_add(1);
    let alpha_div = masks
        .red
        .wrapping_add(masks.green)
        .wrapping_add(masks.blue)
        .wrapping_add(1);
    [
        channel(masks.blue, blue_div, 0x00),
        channel(masks.green, green_div.max(1), 0x00),
        channel(masks.red, red_div.max(1), 0x00),
        channel(masks.alpha, alpha_div.max(1), 0xff),
    ]
}
