//! DXT (S3TC) 4x4 block codecs.
//!
//! Block functions work on a single block and are public for callers that
//! manage their own block layout. The raster functions below walk a whole
//! image one block row at a time through [`crate::parallel::map_chunks`].

mod decode;
mod encode;

pub use decode::{
    alpha_palette, color_palette, decode_dxt1_block, decode_dxt3_block, decode_dxt5_block,
    expand_565,
};
pub use encode::{encode_dxt3_block, pack_565, quantize_alpha};

use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;

use crate::error::FsBmpError;
use crate::parallel::map_chunks;

/// The 16 texels of one block, row-major, each B,G,R,A.
pub type Texels = [[u8; 4]; 16];

/// Copy block texels into a band of four BGRA rows `width` pixels wide.
fn scatter(texels: &Texels, band: &mut [u8], width: usize, bx: usize) {
    for (row, line) in texels.chunks_exact(4).enumerate() {
        let start = (row * width + bx * 4) * 4;
        for (dst, texel) in band[start..start + 16].chunks_exact_mut(4).zip(line) {
            dst.copy_from_slice(texel);
        }
    }
}

/// Gather block texels out of a band of four BGRA rows.
fn gather(band: &[u8], width: usize, bx: usize) -> Texels {
    let mut texels = [[0u8; 4]; 16];
    for (row, line) in texels.chunks_exact_mut(4).enumerate() {
        let start = (row * width + bx * 4) * 4;
        for (texel, src) in line.iter_mut().zip(band[start..start + 16].chunks_exact(4)) {
            texel.copy_from_slice(src);
        }
    }
    texels
}

/// Decode a raster of `N`-byte blocks with `block` applied to each one.
fn decode_blocks<const N: usize>(
    data: &[u8],
    width: u32,
    height: u32,
    stop: &dyn Stop,
    block: impl Fn(&[u8; N]) -> Texels + Sync,
) -> Result<Vec<u8>, FsBmpError> {
    let w = width as usize;
    let h = height as usize;
    let blocks_per_row = w / 4;
    let mut out = vec![0u8; w * h * 4];
    map_chunks(
        &data[..blocks_per_row * N * (h / 4)],
        blocks_per_row * N,
        &mut out,
        w * 4 * 4,
        stop,
        |src, band| {
            let (blocks, _) = src.as_chunks::<N>();
            for (bx, b) in blocks.iter().enumerate() {
                scatter(&block(b), band, w, bx);
            }
        },
    )?;
    Ok(out)
}

/// Decode DXT1 blocks, treating index 3 of three-color blocks as
/// transparent when `punch_through` is set.
pub(crate) fn decode_dxt1(
    data: &[u8],
    width: u32,
    height: u32,
    punch_through: bool,
    stop: &dyn Stop,
) -> Result<Vec<u8>, FsBmpError> {
    decode_blocks::<8>(data, width, height, stop, |b| {
        decode_dxt1_block(b, punch_through)
    })
}

pub(crate) fn decode_dxt3(
    data: &[u8],
    width: u32,
    height: u32,
    stop: &dyn Stop,
) -> Result<Vec<u8>, FsBmpError> {
    decode_blocks::<16>(data, width, height, stop, decode_dxt3_block)
}

pub(crate) fn decode_dxt5(
    data: &[u8],
    width: u32,
    height: u32,
    stop: &dyn Stop,
) -> Result<Vec<u8>, FsBmpError> {
    decode_blocks::<16>(data, width, height, stop, decode_dxt5_block)
}

/// Compress a BGRA raster into DXT3 blocks (`width * height` bytes).
pub(crate) fn encode_dxt3(
    pixels: &[u8],
    width: u32,
    height: u32,
    stop: &dyn Stop,
) -> Result<Vec<u8>, FsBmpError> {
    let w = width as usize;
    let h = height as usize;
    let blocks_per_row = w / 4;
    let mut out = vec![0u8; w * h];
    map_chunks(
        &pixels[..w * h * 4],
        w * 4 * 4,
        &mut out,
        blocks_per_row * 16,
        stop,
        |band, dst| {
            for (bx, block) in dst.chunks_exact_mut(16).enumerate() {
                block.copy_from_slice(&encode_dxt3_block(&gather(band, w, bx)));
            }
        },
    )?;
    Ok(out)
}
