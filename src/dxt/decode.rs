//! DXT1/DXT3/DXT5 block decoding into B,G,R,A texels.

use crate::bytes::{read_u16_le, read_u32_le, read_u48_le, read_u64_le};
use crate::convert::{expand5, expand6};

use super::Texels;

/// Expand a 5-6-5 color to 8-bit B,G,R.
pub fn expand_565(c: u16) -> [u8; 3] {
    let c = u32::from(c);
    [expand5(c), expand6(c >> 5), expand5(c >> 11)]
}

/// Four-entry B,G,R,A palette for a color block.
///
/// With `four_color` the palette is always the opaque two-thirds/one-third
/// interpolation. Otherwise the DXT1 rule applies: `c0 > c1` selects the
/// four-color palette, anything else gives a midpoint and black, and black is
/// transparent when `punch_through` is set.
pub fn color_palette(c0: u16, c1: u16, four_color: bool, punch_through: bool) -> [[u8; 4]; 4] {
    let e0 = expand_565(c0);
    let e1 = expand_565(c1);
    let mut palette = [[0, 0, 0, 0xff]; 4];
    for ch in 0..3 {
        let (a, b) = (u16::from(e0[ch]), u16::from(e1[ch]));
        palette[0][ch] = e0[ch];
        palette[1][ch] = e1[ch];
        if four_color || c0 > c1 {
            palette[2][ch] = ((2 * a + b) / 3) as u8;
            palette[3][ch] = ((a + 2 * b) / 3) as u8;
        } else {
            palette[2][ch] = ((a + b) / 2) as u8;
        }
    }
    if !four_color && c0 <= c1 && punch_through {
        palette[3][3] = 0;
    }
    palette
}

/// Eight-entry alpha palette for a DXT5 block.
pub fn alpha_palette(a0: u8, a1: u8) -> [u8; 8] {
    let (x, y) = (u16::from(a0), u16::from(a1));
    let mut palette = [a0, a1, 0, 0, 0, 0, 0, 0xff];
    if a0 > a1 {
        for k in 1..=6u16 {
            palette[k as usize + 1] = (((7 - k) * x + k * y) / 7) as u8;
        }
    } else {
        for k in 1..=4u16 {
            palette[k as usize + 1] = (((5 - k) * x + k * y) / 5) as u8;
        }
        palette[6] = 0;
        palette[7] = 0xff;
    }
    palette
}

/// Apply a 2-bit index grid to a color palette.
fn apply_color_indices(palette: &[[u8; 4]; 4], indices: u32) -> Texels {
    let mut texels = [[0u8; 4]; 16];
    for (i, texel) in texels.iter_mut().enumerate() {
        *texel = palette[((indices >> (i * 2)) & 0b11) as usize];
    }
    texels
}

/// Decode an 8-byte DXT1 block.
pub fn decode_dxt1_block(block: &[u8; 8], punch_through: bool) -> Texels {
    let c0 = read_u16_le(block, 0);
    let c1 = read_u16_le(block, 2);
    let palette = color_palette(c0, c1, false, punch_through);
    apply_color_indices(&palette, read_u32_le(block, 4))
}

/// Decode a 16-byte DXT3 block.
pub fn decode_dxt3_block(block: &[u8; 16]) -> Texels {
    let alpha = read_u64_le(block, 0);
    let palette = color_palette(read_u16_le(block, 8), read_u16_le(block, 10), true, false);
    let mut texels = apply_color_indices(&palette, read_u32_le(block, 12));
    for (i, texel) in texels.iter_mut().enumerate() {
        texel[3] = ((alpha >> (i * 4)) & 0xf) as u8 * 17;
    }
    texels
}

/// Decode a 16-byte DXT5 block.
pub fn decode_dxt5_block(block: &[u8; 16]) -> Texels {
    let alphas = alpha_palette(block[0], block[1]);
    let alpha_indices = read_u48_le(block, 2);
    let palette = color_palette(read_u16_le(block, 8), read_u16_le(block, 10), true, false);
    let mut texels = apply_color_indices(&palette, read_u32_le(block, 12));
    for (i, texel) in texels.iter_mut().enumerate() {
        texel[3] = alphas[((alpha_indices >> (i * 3)) & 0b111) as usize];
    }
    texels
}
