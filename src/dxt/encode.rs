//! DXT3 block encoder.
//!
//! Endpoints come from the block average plus/minus the mean deviation of
//! each channel, signed by the red channel's deviation. This is a cheap
//! stand-in for a principal-axis fit and tends to underestimate the color
//! range of a block.

use crate::bytes::{put_u16_le, put_u32_le, put_u64_le};

use super::Texels;

/// Quantize an 8-bit alpha to the nearest 4-bit level.
#[inline]
pub fn quantize_alpha(alpha: u8) -> u8 {
    ((u16::from(alpha) + 8) / 17) as u8
}

/// Pack 8-bit B,G,R into 5-6-5.
#[inline]
pub fn pack_565(bgr: [u8; 3]) -> u16 {
    let [b, g, r] = bgr.map(u16::from);
    ((r >> 3) << 11) | ((g >> 2) << 5) | (b >> 3)
}

/// `floor(10000 * euclidean distance)` between two B,G,R colors.
///
/// Comparing these scaled distances orders candidates exactly like comparing
/// squared distances, but ties are resolved on the truncated value.
fn scaled_distance(a: [u8; 3], b: [u8; 3]) -> u64 {
    let d2: u64 = a
        .iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = i64::from(x) - i64::from(y);
            (d * d) as u64
        })
        .sum();
    (d2 * 100_000_000).isqrt()
}

/// Encode 16 B,G,R,A texels into a 16-byte DXT3 block.
pub fn encode_dxt3_block(texels: &Texels) -> [u8; 16] {
    let mut block = [0u8; 16];

    let alpha = texels
        .iter()
        .enumerate()
        .fold(0u64, |acc, (i, t)| acc | (u64::from(quantize_alpha(t[3])) << (i * 4)));
    put_u64_le(&mut block, 0, alpha);

    let (c0, c1, indices) = encode_color(texels);
    put_u16_le(&mut block, 8, c0);
    put_u16_le(&mut block, 10, c1);
    put_u32_le(&mut block, 12, indices);
    block
}

/// Pick endpoints and the 2-bit index grid for the color half of a block.
fn encode_color(texels: &Texels) -> (u16, u16, u32) {
    let mut sum = [0u32; 3];
    for t in texels {
        for ch in 0..3 {
            sum[ch] += u32::from(t[ch]);
        }
    }
    let avg = sum.map(|s| (s >> 4) as i32);

    // Deviation along the axis correlated with red (channel 2).
    let mut dev = [0i32; 3];
    for t in texels {
        let sign = (i32::from(t[2]) - avg[2]).signum();
        for ch in 0..3 {
            dev[ch] += (i32::from(t[ch]) - avg[ch]) * sign;
        }
    }
    let dev = dev.map(|d| (d >> 3) / 3);

    if log::log_enabled!(log::Level::Trace) {
        log::trace!("dxt3 block spread: {:?}", BlockSpread::measure(texels, avg));
    }

    let mut ends = [[0u8; 3]; 2];
    for ch in 0..3 {
        ends[0][ch] = (avg[ch] + dev[ch]).clamp(0, 255) as u8;
        ends[1][ch] = (avg[ch] - dev[ch]).clamp(0, 255) as u8;
    }

    let mut c0 = pack_565(ends[0]);
    let mut c1 = pack_565(ends[1]);
    if c0 < c1 {
        core::mem::swap(&mut c0, &mut c1);
        ends.swap(0, 1);
    }
    if c0 == c1 {
        return (c0, c1, 0);
    }

    let (e0, e1) = (ends[0].map(u16::from), ends[1].map(u16::from));
    let palette = [
        ends[0],
        ends[1],
        core::array::from_fn(|ch| ((2 * e0[ch] + e1[ch]) / 3) as u8),
        core::array::from_fn(|ch| ((e0[ch] + 2 * e1[ch]) / 3) as u8),
    ];

    let mut indices = 0u32;
    for (i, t) in texels.iter().enumerate() {
        let color = [t[0], t[1], t[2]];
        let d = palette.map(|p| scaled_distance(color, p));
        let near = if d[0] <= d[1] { 0 } else { 1 };
        let far = if d[2] <= d[3] { 2 } else { 3 };
        let best = if d[near] <= d[far] { near } else { far };
        indices |= (best as u32) << (i * 2);
    }
    (c0, c1, indices)
}

/// Block statistics that describe how spread out a block's colors are.
///
/// They do not influence the emitted endpoints and are only gathered for
/// trace logging.
#[derive(Debug)]
#[allow(dead_code)] // read through Debug
struct BlockSpread {
    max_distance: u32,
    std_dev: [u32; 3],
    sd_distance: u32,
    adjust: u32,
}

impl BlockSpread {
    fn measure(texels: &Texels, avg: [i32; 3]) -> Self {
        let mut max_distance = 0;
        let mut var = [0u32; 3];
        for t in texels {
            let mut d2 = 0u32;
            for ch in 0..3 {
                let d = (i32::from(t[ch]) - avg[ch]).unsigned_abs();
                d2 += d * d;
                var[ch] += d * d;
            }
            max_distance = max_distance.max(d2.isqrt());
        }
        let std_dev = var.map(|v| (v >> 4).isqrt());
        let sd_distance = std_dev.iter().map(|s| s * s).sum::<u32>().isqrt();
        let adjust = max_distance.checked_div(sd_distance).unwrap_or(0);
        Self {
            max_distance,
            std_dev,
            sd_distance,
            adjust,
        }
    }
}
